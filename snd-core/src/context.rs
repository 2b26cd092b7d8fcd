use crate::diag::Collector;
use crate::policy::{Config, ErrorPolicy};

/// Caller-owned state threaded through loads, lookups and exports.
///
/// Loads never clear the collector; diagnostics accumulate until the caller
/// drains or clears it. The error policy lives in the config and is mirrored
/// into the collector, so it only changes through [`Context::set_policy`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    pub(crate) config: Config,
    pub(crate) collector: Collector,
}

impl Context {
    pub fn new(config: Config) -> Self {
        let collector = Collector::new(config.policy);
        Self { config, collector }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.config.policy
    }

    pub fn set_policy(&mut self, policy: ErrorPolicy) {
        self.config.policy = policy;
        self.collector.set_policy(policy);
    }

    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    pub fn collector_mut(&mut self) -> &mut Collector {
        &mut self.collector
    }
}
