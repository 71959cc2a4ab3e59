//! Up/down sequence demo.
//!
//! Feeds `0 1 2 .. 7 6 .. 1` into a scalar encoder wired straight into a
//! small Temporal Memory, several times over. After every step the active,
//! winner and predictive cells are pulled back so the learning can be
//! watched column by column. With the default parameters the TM predicts the
//! sequence from the second cycle on.

use std::time::Duration;

use serde_json::json;

use super::with_network;
use crate::core::Sdr;
use crate::ports::{Engine, EngineResult};

/// Up/down demo settings
#[derive(Clone, Debug)]
pub struct UpDownConfig {
    /// Values fed to the encoder, one per step
    pub sequence: Vec<u32>,

    /// Times the sequence is repeated
    pub cycles: usize,

    /// Encoder size, which is also the TM column count
    pub column_size: usize,

    /// Cells per column of the Temporal Memory
    pub cells_per_column: usize,

    pub encoder_region: String,
    pub tm_region: String,

    /// Pause between rendered frames
    pub display_delay: Duration,

    /// Replaces the generated topology when set
    pub topology: Option<String>,
}

impl UpDownConfig {
    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn with_display_delay(mut self, delay: Duration) -> Self {
        self.display_delay = delay;
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

        let max_value = self.sequence.iter().copied().max().unwrap_or(0);
        json!({
            "network": [
                { "addRegion": {
                    "name": self.encoder_region,
                    "type": "ScalarEncoderRegion",
                    "params": { "size": self.column_size, "activeBits": 1, "minValue": 0, "maxValue": max_value }
                }},
                { "addRegion": {
                    "name": self.tm_region,
                    "type": "TMRegion",
                    "params": {
                        "cellsPerColumn": self.cells_per_column,
                        "orColumnOutputs": false,
                        "activationThreshold": 1,
                        "minThreshold": 1,
                        "initialPermanence": 0.4
                    }
                }},
                { "addLink": {
                    "src": format!("{}.encoded", self.encoder_region),
                    "dest": format!("{}.bottomUpIn", self.tm_region)
                }}
            ]
        })
        .to_string()
    }
}

impl Default for UpDownConfig {
    fn default() -> Self {
        Self {
            sequence: vec![0, 1, 2, 3, 4, 5, 6, 7, 6, 5, 4, 3, 2, 1],
            cycles: 4,
            column_size: 8,
            cells_per_column: 2,
            encoder_region: "encoder".to_string(),
            tm_region: "tm".to_string(),
            display_delay: Duration::from_millis(250),
            topology: None,
        }
    }
}

/// TM state after one step
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// 1-based cycle number
    pub cycle: usize,
    /// 1-based step within the cycle
    pub step: usize,
    pub value: u32,
    pub anomaly: f64,
    pub active: Sdr,
    pub winner: Sdr,
    pub predictive: Sdr,
}

/// Run the demo, calling `on_frame` after every step
///
/// Returns the number of frames produced.
pub fn run<E, F>(engine: &E, config: &UpDownConfig, mut on_frame: F) -> EngineResult<usize>
where
    E: Engine + ?Sized,
    F: FnMut(&Frame),
{
    with_network(engine, &config.network_json(), |network| {
        let mut frames = 0;
        for cycle in 1..=config.cycles {
            for (index, &value) in config.sequence.iter().enumerate() {
                engine.set_input(network, &config.encoder_region, f64::from(value))?;
                engine.run(network)?;

                let frame = Frame {
                    cycle,
                    step: index + 1,
                    value,
                    active: engine.active_cells(network, &config.tm_region)?,
                    winner: engine.winner_cells(network, &config.tm_region)?,
                    predictive: engine.predictive_cells(network, &config.tm_region)?,
                    anomaly: engine.anomaly(network, &config.tm_region)?,
                };
                on_frame(&frame);
                frames += 1;
            }
        }
        Ok(frames)
    })
}
