//! Lazy, memory-bounded grouping of sequences that are clustered by key.
//!
//! Records that share a key are very often stored next to each other (log
//! lines per request, rows per customer, sorted exports). [`group_clustered_by`]
//! exploits that: it streams the source once and hands out each run of equal
//! keys as soon as the next key shows up, so memory stays proportional to the
//! largest run instead of the whole input.
//!
//! [`group_values_by`] is the eager counterpart for data that is not clustered.
//! It sees the whole input before returning and merges every occurrence of a key.
//!
//! ```
//! use clustered_core::group_clustered_by;
//!
//! let rows = [("Dog", 12), ("Dog", 5), ("Cat", 3)];
//! let groups: Vec<_> = group_clustered_by(rows, |row| row.0).collect();
//!
//! assert_eq!(groups[0], ("Dog", vec![("Dog", 12), ("Dog", 5)]));
//! assert_eq!(groups[1], ("Cat", vec![("Cat", 3)]));
//! ```

pub mod error;
pub mod group;
pub mod settings;

pub use error::{ClusterError, Result};

pub use group::{
    group_clustered_by, group_clustered_by_with, group_values_by, try_group_clustered_by,
    try_group_clustered_by_with, try_group_values_by, ClusterStats, ClusteredGroups,
    GroupingExt, TryClusteredGroups,
};
pub use settings::ClusterSettings;
