//! Clustered (streaming) and eager grouping.

mod clustered;
mod eager;
mod ext;
mod fallible;
mod stats;

pub use clustered::{group_clustered_by, group_clustered_by_with, ClusteredGroups};
pub use eager::{group_values_by, try_group_values_by};
pub use ext::GroupingExt;
pub use fallible::{try_group_clustered_by, try_group_clustered_by_with, TryClusteredGroups};
pub use stats::ClusterStats;
