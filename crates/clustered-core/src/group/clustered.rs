//! Streaming group-by over sources whose equal keys are adjacent.
//!
//! The grouper is a small state machine:
//!
//! ```text
//! NotStarted --first item--> Accumulating(key, buffer) --source ends--> Exhausted
//!      \                         |   ^
//!       \--empty source-->       |   | same key: push / new key: emit + restart
//!          Exhausted             +---+
//! ```
//!
//! Exactly one item is pulled per step. A cluster is handed out only when the
//! first item of the next cluster has been seen or the source has ended, so at
//! most one item beyond the emitted cluster is ever read.
//!
//! The grouper trusts the caller that the source is clustered. A key that
//! shows up again after a different key starts a new group; nothing is merged
//! and no error is raised.

use std::iter::FusedIterator;
use std::mem;

use super::stats::ClusterStats;
use crate::settings::ClusterSettings;

/// Progress of a clustered grouper through its source.
#[derive(Debug)]
pub(crate) enum ClusterState<K, T> {
    NotStarted,
    Accumulating { key: K, buffer: Vec<T> },
    Exhausted,
}

/// Lazy iterator of `(key, cluster)` pairs.
///
/// Created by [`group_clustered_by`] or
/// [`GroupingExt::group_clustered_by`](super::GroupingExt::group_clustered_by).
/// Each emitted `Vec` is moved out of the grouper, so the consumer may keep it
/// for as long as it likes.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ClusteredGroups<I, K, F>
where
    I: Iterator,
{
    source: I,
    key_of: F,
    state: ClusterState<K, I::Item>,
    capacity: usize,
    stats: ClusterStats,
}

impl<I, K, F> ClusteredGroups<I, K, F>
where
    I: Iterator,
    K: Eq,
    F: FnMut(&I::Item) -> K,
{
    pub(crate) fn new(source: I, key_of: F, settings: &ClusterSettings) -> Self {
        Self {
            source,
            key_of,
            state: ClusterState::NotStarted,
            capacity: settings.buffer_capacity(),
            stats: ClusterStats::default(),
        }
    }

    /// Counters for the work done so far.
    pub fn stats(&self) -> ClusterStats {
        self.stats
    }

    /// Number of items currently held in the active cluster.
    pub fn buffered_len(&self) -> usize {
        match &self.state {
            ClusterState::Accumulating { buffer, .. } => buffer.len(),
            ClusterState::NotStarted | ClusterState::Exhausted => 0,
        }
    }

    fn pull(&mut self) -> Option<(K, I::Item)> {
        let item = self.source.next()?;
        self.stats.record_item();
        let key = (self.key_of)(&item);
        Some((key, item))
    }

    fn start_buffer(&self, first: I::Item) -> Vec<I::Item> {
        let mut buffer = Vec::with_capacity(self.capacity.max(1));
        buffer.push(first);
        buffer
    }
}

impl<I, K, F> Iterator for ClusteredGroups<I, K, F>
where
    I: Iterator,
    K: Eq,
    F: FnMut(&I::Item) -> K,
{
    type Item = (K, Vec<I::Item>);

    fn next(&mut self) -> Option<Self::Item> {
        // The state stays Exhausted while a step runs, so a panic in the
        // source or the key projection leaves the grouper terminated.
        let (key, mut buffer) = match mem::replace(&mut self.state, ClusterState::Exhausted) {
            ClusterState::Exhausted => return None,
            ClusterState::NotStarted => {
                let (key, first) = self.pull()?;
                (key, self.start_buffer(first))
            }
            ClusterState::Accumulating { key, buffer } => (key, buffer),
        };

        while let Some((next_key, item)) = self.pull() {
            if next_key == key {
                buffer.push(item);
                continue;
            }

            self.state = ClusterState::Accumulating {
                key: next_key,
                buffer: self.start_buffer(item),
            };
            self.stats.record_group(buffer.len());
            return Some((key, buffer));
        }

        self.stats.record_group(buffer.len());
        Some((key, buffer))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.source.size_hint();
        match self.state {
            ClusterState::NotStarted => (lower.min(1), upper),
            ClusterState::Accumulating { .. } => (1, upper.and_then(|n| n.checked_add(1))),
            ClusterState::Exhausted => (0, Some(0)),
        }
    }
}

impl<I, K, F> FusedIterator for ClusteredGroups<I, K, F>
where
    I: Iterator,
    K: Eq,
    F: FnMut(&I::Item) -> K,
{
}

/// Group a clustered source into runs of equal keys, lazily.
///
/// `key_of` is called once per item, in source order. Memory use is bounded
/// by the longest run, and an empty source yields no groups.
pub fn group_clustered_by<I, K, F>(source: I, key_of: F) -> ClusteredGroups<I::IntoIter, K, F>
where
    I: IntoIterator,
    K: Eq,
    F: FnMut(&I::Item) -> K,
{
    group_clustered_by_with(source, key_of, &ClusterSettings::default())
}

/// [`group_clustered_by`] with explicit settings.
///
/// Only [`ClusterSettings::initial_capacity`] applies here; the cluster
/// length limit needs the fallible grouper to be reported.
pub fn group_clustered_by_with<I, K, F>(
    source: I,
    key_of: F,
    settings: &ClusterSettings,
) -> ClusteredGroups<I::IntoIter, K, F>
where
    I: IntoIterator,
    K: Eq,
    F: FnMut(&I::Item) -> K,
{
    ClusteredGroups::new(source.into_iter(), key_of, settings)
}
