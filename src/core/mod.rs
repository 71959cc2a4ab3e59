//! # Core Domain
//!
//! Pure data, no I/O.
//!
//! - `Sdr` - Fixed-shape binary tensor with dense/sparse conversion
//! - `layout` - Stride arithmetic, including the engine's axis-reversed addressing
//! - `config` - Engine connection settings
//!
//! Nothing in here talks to the network; the adapters do that.

mod sdr;
pub mod layout;
pub mod config;

// Re-exports
pub use sdr::{OutOfRange, Sdr, SdrError, SdrResult};
pub use config::{ConfigError, EngineConfig};
