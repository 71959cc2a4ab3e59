//! # Demos
//!
//! Two driver loops that exercise a remote network end to end:
//!
//! - `sine_wave` - feeds `sin(x)` through encoder -> SP -> TM and reports anomaly
//! - `up_down` - feeds a repeating up/down integer sequence into a small TM and
//!   reports the active, winner and predictive cells of every step
//!
//! Both are generic over [`Engine`], so they run against the REST adapter in
//! the CLI and against an in-memory fake in tests. Requests are strictly
//! sequential and the first failure ends the run.

use std::io;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::ports::{Engine, EngineResult, NetworkId};

pub mod display;
pub mod sine_wave;
pub mod up_down;

#[cfg(test)]
pub(crate) mod fake;

/// Create a network, hand it to `body`, then delete it
///
/// Deletion is attempted even when `body` fails; a failed cleanup is logged
/// and the original error is returned.
pub fn with_network<E, T, F>(engine: &E, topology: &str, body: F) -> EngineResult<T>
where
    E: Engine + ?Sized,
    F: FnOnce(&NetworkId) -> EngineResult<T>,
{
    let network = engine.create_network(topology)?;
    info!(%network, "network created");

    match body(&network) {
        Ok(value) => {
            engine.delete_network(&network)?;
            info!(%network, "network deleted");
            Ok(value)
        }
        Err(err) => {
            if let Err(cleanup) = engine.delete_network(&network) {
                warn!(%network, error = %cleanup, "failed to delete network after error");
            }
            Err(err)
        }
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Read a topology JSON file, passed to the engine unparsed
pub fn load_topology(path: &str) -> io::Result<String> {
    let path = expand_path(path);
    let text = std::fs::read_to_string(&path)?;
    info!(path = %path.display(), bytes = text.len(), "loaded topology");
    Ok(text)
}
