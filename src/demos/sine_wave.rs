//! Sine wave demo.
//!
//! Feeds `sin(x)` for `x = 0, step_size, 2 * step_size, ..` through an
//! RDSE encoder, a Spatial Pooler and a Temporal Memory, and reports the TM
//! anomaly score for every step. The score stays near 1 until the network
//! has seen enough of the wave to predict it.

use serde_json::json;

use super::with_network;
use crate::ports::{Engine, EngineResult};

/// Sine wave demo settings
#[derive(Clone, Debug)]
pub struct SineWaveConfig {
    /// Increment of `x` per step
    pub step_size: f64,

    /// Number of steps before the demo stops
    pub max_steps: usize,

    /// Columns of the Spatial Pooler and Temporal Memory
    pub column_count: usize,

    /// Cells per column of the Temporal Memory
    pub cells_per_column: usize,

    pub encoder_region: String,
    pub sp_region: String,
    pub tm_region: String,

    /// Replaces the generated topology when set
    pub topology: Option<String>,
}

impl SineWaveConfig {
    pub fn with_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Use caller-supplied topology JSON instead of the built-in one
    pub fn with_topology(mut self, topology: String) -> Self {
        self.topology = Some(topology);
        self
    }

    /// Topology JSON sent on network creation
    pub fn network_json(&self) -> String {
        if let Some(topology) = &self.topology {
            return topology.clone();
        }

        json!({
            "network": [
                { "addRegion": {
                    "name": self.encoder_region,
                    "type": "RDSEEncoderRegion",
                    "params": { "size": 1000, "sparsity": 0.02, "radius": 0.03, "seed": 2020, "noise": 0.01 }
                }},
                { "addRegion": {
                    "name": self.sp_region,
                    "type": "SPRegion",
                    "params": { "columnCount": self.column_count, "globalInhibition": true }
                }},
                { "addRegion": {
                    "name": self.tm_region,
                    "type": "TMRegion",
                    "params": { "cellsPerColumn": self.cells_per_column, "orColumnOutputs": true }
                }},
                { "addLink": {
                    "src": format!("{}.encoded", self.encoder_region),
                    "dest": format!("{}.bottomUpIn", self.sp_region)
                }},
                { "addLink": {
                    "src": format!("{}.bottomUpOut", self.sp_region),
                    "dest": format!("{}.bottomUpIn", self.tm_region)
                }}
            ]
        })
        .to_string()
    }
}

impl Default for SineWaveConfig {
    fn default() -> Self {
        Self {
            step_size: 0.01,
            max_steps: 10_000,
            column_count: 2048,
            cells_per_column: 8,
            encoder_region: "encoder".to_string(),
            sp_region: "sp".to_string(),
            tm_region: "tm".to_string(),
            topology: None,
        }
    }
}

/// Result of one network step
#[derive(Clone, Debug, PartialEq)]
pub struct SineStep {
    pub step: usize,
    pub value: f64,
    pub anomaly: f64,
}

/// Run the demo, calling `on_step` after every step
///
/// Returns the number of completed steps.
pub fn run<E, F>(engine: &E, config: &SineWaveConfig, mut on_step: F) -> EngineResult<usize>
where
    E: Engine + ?Sized,
    F: FnMut(&SineStep),
{
    with_network(engine, &config.network_json(), |network| {
        let mut x = 0.0f64;
        for step in 0..config.max_steps {
            let value = x.sin();

            engine.set_input(network, &config.encoder_region, value)?;
            engine.run(network)?;
            let anomaly = engine.anomaly(network, &config.tm_region)?;

            on_step(&SineStep { step, value, anomaly });
            x += config.step_size;
        }
        Ok(config.max_steps)
    })
}

/// One console line per step, step number padded to the width of `max_steps`
pub fn format_step(max_steps: usize, step: &SineStep) -> String {
    let width = max_steps.to_string().len();
    format!(
        "step: {:0width$} | value: {:+.3} | anomaly: {:.3}",
        step.step,
        step.value,
        step.anomaly,
        width = width
    )
}
