//! Adapters - Transport implementations of the engine port

pub mod payload;
pub mod rest;

pub use rest::RestEngine;
