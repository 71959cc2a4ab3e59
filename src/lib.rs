//! # htm-rest
//!
//! Drive a remote htm.core network from Rust.
//!
//! ## Overview
//!
//! The engine runs the network (encoders, Spatial Pooler, Temporal Memory)
//! behind its NetworkAPI REST interface. This crate is the client side:
//!
//! - **`Sdr`**: fixed-shape binary tensor, dense or sparse, with the
//!   engine's coordinate convention
//! - **`Engine`**: the remote control surface as a trait
//! - **`RestEngine`**: blocking HTTP implementation of `Engine`
//! - **`demos`**: sine wave and up/down sequence drivers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use htm_rest::{Engine, EngineConfig, RestEngine};
//!
//! let engine = RestEngine::new(EngineConfig::default())?;
//! let network = engine.create_network(&topology_json)?;
//!
//! engine.set_input(&network, "encoder", 0.25)?;
//! engine.run(&network)?;
//!
//! let active = engine.active_cells(&network, "tm")?;
//! println!("active cells: {}", active);
//! println!("anomaly: {:.3}", engine.anomaly(&network, "tm")?);
//!
//! engine.delete_network(&network)?;
//! ```

pub mod core;
pub mod ports;
pub mod adapters;
pub mod demos;

// Re-exports for convenience
pub use crate::core::{ConfigError, EngineConfig, OutOfRange, Sdr, SdrError, SdrResult};
pub use crate::ports::{Engine, EngineError, EngineResult, NetworkId};
pub use crate::adapters::RestEngine;
