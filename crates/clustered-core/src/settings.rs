use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};

/// Settings for a single grouping invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    /// Capacity reserved for each new cluster buffer.
    /// Buffers still grow past this when a run is longer. Default: 8
    pub initial_capacity: usize,

    /// Upper bound on the number of items in one cluster.
    /// Enforced by the fallible clustered grouper, which reports
    /// [`ClusterError::ClusterTooLarge`] instead of buffering further.
    /// Default: None (unbounded)
    pub max_cluster_len: Option<usize>,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            initial_capacity: 8,
            max_cluster_len: None,
        }
    }
}

impl ClusterSettings {
    /// Create new settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the initial buffer capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Builder method to cap the cluster length.
    pub fn with_max_cluster_len(mut self, limit: usize) -> Self {
        self.max_cluster_len = Some(limit);
        self
    }

    /// Reject settings that could never admit a cluster.
    pub fn validate(&self) -> Result<()> {
        if self.max_cluster_len == Some(0) {
            return Err(ClusterError::InvalidSettings(
                "max_cluster_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Capacity for a fresh buffer, never above the cluster limit.
    pub(crate) fn buffer_capacity(&self) -> usize {
        match self.max_cluster_len {
            Some(limit) => self.initial_capacity.min(limit),
            None => self.initial_capacity,
        }
    }
}
