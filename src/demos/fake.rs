//! In-memory engine for driver tests.

use std::cell::{Cell, RefCell};

use crate::core::Sdr;
use crate::ports::{Engine, EngineError, EngineResult, NetworkId};

/// Scripted engine that records every successful call
pub(crate) struct FakeEngine {
    calls: RefCell<Vec<String>>,
    networks: Cell<usize>,
    runs: Cell<usize>,
    fail_on: Option<&'static str>,
    fail_after_runs: Option<usize>,
    shape: Vec<usize>,
}

impl FakeEngine {
    pub(crate) fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            networks: Cell::new(0),
            runs: Cell::new(0),
            fail_on: None,
            fail_after_runs: None,
            shape: vec![16],
        }
    }

    /// Fail every call of the named operation
    pub(crate) fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Fail `run` once this many runs have succeeded
    pub(crate) fn failing_after_runs(mut self, runs: usize) -> Self {
        self.fail_after_runs = Some(runs);
        self
    }

    /// Shape of every SDR output
    pub(crate) fn with_shape(mut self, shape: &[usize]) -> Self {
        self.shape = shape.to_vec();
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn call(&self, operation: &'static str, record: String) -> EngineResult<()> {
        if self.fail_on == Some(operation) {
            return Err(EngineError::Remote(format!("ERROR: injected {} failure", operation)));
        }
        self.calls.borrow_mut().push(record);
        Ok(())
    }
}

impl Engine for FakeEngine {
    fn create_network(&self, config_json: &str) -> EngineResult<NetworkId> {
        self.call("create", format!("create {}", config_json))?;
        self.networks.set(self.networks.get() + 1);
        Ok(NetworkId::new(format!("net-{}", self.networks.get())))
    }

    fn set_input(&self, _network: &NetworkId, region: &str, value: f64) -> EngineResult<()> {
        self.call("set", format!("set {}={}", region, value))
    }

    fn run(&self, _network: &NetworkId) -> EngineResult<()> {
        if self.fail_after_runs == Some(self.runs.get()) {
            return Err(EngineError::Remote("ERROR: network run failed".to_string()));
        }
        self.call("run", "run".to_string())?;
        self.runs.set(self.runs.get() + 1);
        Ok(())
    }

    fn sdr_output(&self, _network: &NetworkId, region: &str, output: &str) -> EngineResult<Sdr> {
        self.call("sdr", format!("sdr {}.{}", region, output))?;
        let mut sdr = Sdr::new(&self.shape)?;
        sdr.set_sparse(&[self.runs.get() % sdr.size()])?;
        Ok(sdr)
    }

    fn scalar_output(&self, _network: &NetworkId, region: &str, output: &str) -> EngineResult<f64> {
        self.call("scalar", format!("scalar {}.{}", region, output))?;
        Ok(1.0 / self.runs.get().max(1) as f64)
    }

    fn delete_network(&self, network: &NetworkId) -> EngineResult<()> {
        self.call("delete", format!("delete {}", network))
    }
}
