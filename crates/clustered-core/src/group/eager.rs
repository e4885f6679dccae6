use std::hash::Hash;

use indexmap::IndexMap;

/// Group projected `(key, value)` pairs by key over the whole source.
///
/// Groups come out in the order each key was first seen, and values keep
/// their source order. Unlike [`group_clustered_by`](super::group_clustered_by),
/// a key that appears in several places collects into a single group.
pub fn group_values_by<I, K, V, P>(source: I, mut projection: P) -> Vec<(K, Vec<V>)>
where
    I: IntoIterator,
    K: Hash + Eq,
    P: FnMut(I::Item) -> (K, V),
{
    let mut groups: IndexMap<K, Vec<V>> = IndexMap::new();
    for item in source {
        let (key, value) = projection(item);
        groups.entry(key).or_default().push(value);
    }
    groups.into_iter().collect()
}

/// Fallible form of [`group_values_by`]. Stops at the first projection error.
pub fn try_group_values_by<I, K, V, E, P>(
    source: I,
    mut projection: P,
) -> Result<Vec<(K, Vec<V>)>, E>
where
    I: IntoIterator,
    K: Hash + Eq,
    P: FnMut(I::Item) -> Result<(K, V), E>,
{
    let mut groups: IndexMap<K, Vec<V>> = IndexMap::new();
    for item in source {
        let (key, value) = projection(item)?;
        groups.entry(key).or_default().push(value);
    }
    Ok(groups.into_iter().collect())
}
