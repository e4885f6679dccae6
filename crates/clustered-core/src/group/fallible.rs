use std::iter::FusedIterator;
use std::mem;

use super::clustered::ClusterState;
use super::stats::ClusterStats;
use crate::error::ClusterError;
use crate::settings::ClusterSettings;

/// Lazy iterator of `Result<(key, cluster), E>` over a fallible source.
///
/// The first error from the source, the key projection, or the cluster
/// length limit is yielded once. The cluster being accumulated at that point
/// is dropped, and every later call to `next` returns `None` without touching
/// the source again.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct TryClusteredGroups<I, T, K, F> {
    source: I,
    key_of: F,
    state: ClusterState<K, T>,
    capacity: usize,
    limit: Option<usize>,
    stats: ClusterStats,
}

impl<I, T, E, K, F> TryClusteredGroups<I, T, K, F>
where
    I: Iterator<Item = Result<T, E>>,
    K: Eq,
    F: FnMut(&T) -> Result<K, E>,
    E: From<ClusterError>,
{
    pub(crate) fn new(source: I, key_of: F, settings: &ClusterSettings) -> Self {
        Self {
            source,
            key_of,
            state: ClusterState::NotStarted,
            capacity: settings.buffer_capacity(),
            limit: settings.max_cluster_len,
            stats: ClusterStats::default(),
        }
    }

    /// Counters for the work done so far.
    pub fn stats(&self) -> ClusterStats {
        self.stats
    }

    fn pull(&mut self) -> Option<Result<(K, T), E>> {
        let item = match self.source.next()? {
            Ok(item) => item,
            Err(error) => return Some(Err(error)),
        };
        self.stats.record_item();
        Some((self.key_of)(&item).map(|key| (key, item)))
    }

    fn admit(&self, buffer: &mut Vec<T>, item: T) -> Result<(), E> {
        if let Some(limit) = self.limit {
            if buffer.len() >= limit {
                return Err(ClusterError::ClusterTooLarge {
                    position: self.stats.items_pulled.saturating_sub(1),
                    limit,
                }
                .into());
            }
        }
        buffer.push(item);
        Ok(())
    }

    fn start_buffer(&self, first: T) -> Result<Vec<T>, E> {
        let mut buffer = Vec::with_capacity(self.capacity.max(1));
        self.admit(&mut buffer, first)?;
        Ok(buffer)
    }

    fn step(&mut self) -> Option<Result<(K, Vec<T>), E>> {
        let (key, mut buffer) = match mem::replace(&mut self.state, ClusterState::Exhausted) {
            ClusterState::Exhausted => return None,
            ClusterState::NotStarted => match self.pull()? {
                Ok((key, first)) => match self.start_buffer(first) {
                    Ok(buffer) => (key, buffer),
                    Err(error) => return Some(Err(error)),
                },
                Err(error) => return Some(Err(error)),
            },
            ClusterState::Accumulating { key, buffer } => (key, buffer),
        };

        while let Some(pulled) = self.pull() {
            let (next_key, item) = match pulled {
                Ok(pair) => pair,
                Err(error) => return Some(Err(error)),
            };

            if next_key == key {
                if let Err(error) = self.admit(&mut buffer, item) {
                    return Some(Err(error));
                }
                continue;
            }

            let next_buffer = match self.start_buffer(item) {
                Ok(next_buffer) => next_buffer,
                Err(error) => return Some(Err(error)),
            };
            self.state = ClusterState::Accumulating {
                key: next_key,
                buffer: next_buffer,
            };
            self.stats.record_group(buffer.len());
            return Some(Ok((key, buffer)));
        }

        self.stats.record_group(buffer.len());
        Some(Ok((key, buffer)))
    }
}

impl<I, T, E, K, F> Iterator for TryClusteredGroups<I, T, K, F>
where
    I: Iterator<Item = Result<T, E>>,
    K: Eq,
    F: FnMut(&T) -> Result<K, E>,
    E: From<ClusterError>,
{
    type Item = Result<(K, Vec<T>), E>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.step()?;

        #[cfg(feature = "trace")]
        if result.is_err() {
            tracing::debug!(
                items_pulled = self.stats.items_pulled,
                groups_emitted = self.stats.groups_emitted,
                "clustered grouping terminated by error"
            );
        }

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.source.size_hint();
        match self.state {
            ClusterState::NotStarted => (0, upper),
            ClusterState::Accumulating { .. } => (1, upper.and_then(|n| n.checked_add(1))),
            ClusterState::Exhausted => (0, Some(0)),
        }
    }
}

impl<I, T, E, K, F> FusedIterator for TryClusteredGroups<I, T, K, F>
where
    I: Iterator<Item = Result<T, E>>,
    K: Eq,
    F: FnMut(&T) -> Result<K, E>,
    E: From<ClusterError>,
{
}

/// Fallible form of [`group_clustered_by`](super::group_clustered_by).
///
/// Source items and keys are `Result`s. The error type must be able to carry
/// a [`ClusterError`] so that the cluster length limit can be reported.
pub fn try_group_clustered_by<I, T, E, K, F>(
    source: I,
    key_of: F,
) -> TryClusteredGroups<I::IntoIter, T, K, F>
where
    I: IntoIterator<Item = Result<T, E>>,
    K: Eq,
    F: FnMut(&T) -> Result<K, E>,
    E: From<ClusterError>,
{
    try_group_clustered_by_with(source, key_of, &ClusterSettings::default())
}

/// [`try_group_clustered_by`] with explicit settings, including the cluster
/// length limit.
pub fn try_group_clustered_by_with<I, T, E, K, F>(
    source: I,
    key_of: F,
    settings: &ClusterSettings,
) -> TryClusteredGroups<I::IntoIter, T, K, F>
where
    I: IntoIterator<Item = Result<T, E>>,
    K: Eq,
    F: FnMut(&T) -> Result<K, E>,
    E: From<ClusterError>,
{
    TryClusteredGroups::new(source.into_iter(), key_of, settings)
}
