use serde::Serialize;

/// Counters describing how far a clustered grouper has progressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClusterStats {
    /// Items taken from the source so far, including the look-ahead item
    /// that revealed the most recent cluster boundary.
    pub items_pulled: usize,
    /// Groups handed to the consumer.
    pub groups_emitted: usize,
    /// Length of the longest emitted cluster.
    pub largest_cluster: usize,
}

impl ClusterStats {
    pub(crate) fn record_item(&mut self) {
        self.items_pulled += 1;
    }

    pub(crate) fn record_group(&mut self, len: usize) {
        self.groups_emitted += 1;
        self.largest_cluster = self.largest_cluster.max(len);

        #[cfg(feature = "trace")]
        tracing::trace!(
            group = self.groups_emitted,
            len,
            items_pulled = self.items_pulled,
            "cluster emitted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_group_tracks_largest_cluster() {
        let mut stats = ClusterStats::default();
        stats.record_group(3);
        stats.record_group(1);
        assert_eq!(stats.groups_emitted, 2);
        assert_eq!(stats.largest_cluster, 3);
    }
}
