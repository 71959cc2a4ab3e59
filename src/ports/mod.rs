//! # Ports
//!
//! Trait definitions for adapters. Contracts only, no implementations.
//!
//! - Ports define WHAT the client needs from the engine
//! - Adapters define HOW it is reached (REST today)
//!
//! The demos are written against these traits, not against an adapter.

mod engine;

pub use engine::{outputs, Engine, EngineError, EngineResult, NetworkId, SENSED_VALUE_PARAM};
