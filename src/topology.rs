// Cluster membership from configuration

use crate::aggregator::TopologyProvider;
use crate::error::TopologyError;

/// Fixed host list (from `[cluster] hosts`), returned in configured order.
#[derive(Debug, Clone, Default)]
pub struct StaticTopology {
    hosts: Vec<String>,
}

impl StaticTopology {
    pub fn new(hosts: Vec<String>) -> Self {
        Self { hosts }
    }
}

impl TopologyProvider for StaticTopology {
    fn list_hosts(&self) -> Result<Vec<String>, TopologyError> {
        Ok(self.hosts.clone())
    }
}
