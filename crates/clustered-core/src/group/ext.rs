use std::hash::Hash;

use super::{ClusteredGroups, TryClusteredGroups};
use crate::error::ClusterError;
use crate::settings::ClusterSettings;

/// Grouping adapters available on every iterator.
///
/// ```
/// use clustered_core::GroupingExt;
///
/// let keys: Vec<_> = [3, 3, 4].into_iter().group_clustered_by(|&x| x).map(|(k, _)| k).collect();
/// assert_eq!(keys, vec![3, 4]);
/// ```
pub trait GroupingExt: Iterator + Sized {
    /// See [`group_clustered_by`](super::group_clustered_by).
    fn group_clustered_by<K, F>(self, key_of: F) -> ClusteredGroups<Self, K, F>
    where
        K: Eq,
        F: FnMut(&Self::Item) -> K,
    {
        ClusteredGroups::new(self, key_of, &ClusterSettings::default())
    }

    /// See [`group_clustered_by_with`](super::group_clustered_by_with).
    fn group_clustered_by_with<K, F>(
        self,
        key_of: F,
        settings: &ClusterSettings,
    ) -> ClusteredGroups<Self, K, F>
    where
        K: Eq,
        F: FnMut(&Self::Item) -> K,
    {
        ClusteredGroups::new(self, key_of, settings)
    }

    /// See [`try_group_clustered_by`](super::try_group_clustered_by).
    fn try_group_clustered_by<T, E, K, F>(self, key_of: F) -> TryClusteredGroups<Self, T, K, F>
    where
        Self: Iterator<Item = Result<T, E>>,
        K: Eq,
        F: FnMut(&T) -> Result<K, E>,
        E: From<ClusterError>,
    {
        TryClusteredGroups::new(self, key_of, &ClusterSettings::default())
    }

    /// See [`try_group_clustered_by_with`](super::try_group_clustered_by_with).
    fn try_group_clustered_by_with<T, E, K, F>(
        self,
        key_of: F,
        settings: &ClusterSettings,
    ) -> TryClusteredGroups<Self, T, K, F>
    where
        Self: Iterator<Item = Result<T, E>>,
        K: Eq,
        F: FnMut(&T) -> Result<K, E>,
        E: From<ClusterError>,
    {
        TryClusteredGroups::new(self, key_of, settings)
    }

    /// See [`group_values_by`](super::group_values_by).
    fn group_values_by<K, V, P>(self, projection: P) -> Vec<(K, Vec<V>)>
    where
        K: Hash + Eq,
        P: FnMut(Self::Item) -> (K, V),
    {
        super::group_values_by(self, projection)
    }

    /// See [`try_group_values_by`](super::try_group_values_by).
    fn try_group_values_by<K, V, E, P>(self, projection: P) -> Result<Vec<(K, Vec<V>)>, E>
    where
        K: Hash + Eq,
        P: FnMut(Self::Item) -> Result<(K, V), E>,
    {
        super::try_group_values_by(self, projection)
    }
}

impl<I: Iterator> GroupingExt for I {}
