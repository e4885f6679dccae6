//! Fallible clustered grouper integration tests

use std::cell::Cell;

use clustered_core::{
    try_group_clustered_by, try_group_clustered_by_with, ClusterError, ClusterSettings,
    GroupingExt,
};
use pretty_assertions::assert_eq;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
enum RecordError {
    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("source closed unexpectedly")]
    SourceClosed,

    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

fn key_of(line: &&str) -> Result<String, RecordError> {
    line.split_once(',')
        .map(|(key, _)| key.to_string())
        .ok_or_else(|| RecordError::Malformed(line.to_string()))
}

#[test]
fn groups_like_the_infallible_grouper_when_nothing_fails() {
    let lines = vec![Ok("a,1"), Ok("a,2"), Ok("b,3")];

    let groups: Result<Vec<_>, RecordError> = try_group_clustered_by(lines, key_of).collect();

    assert_eq!(
        groups,
        Ok(vec![
            ("a".to_string(), vec!["a,1", "a,2"]),
            ("b".to_string(), vec!["b,3"]),
        ])
    );
}

#[test]
fn key_error_surfaces_at_the_failing_item() {
    let lines = vec![Ok("a,1"), Ok("b,2"), Ok("garbage"), Ok("c,3")];
    let mut groups = try_group_clustered_by(lines, key_of);

    assert_eq!(groups.next(), Some(Ok(("a".to_string(), vec!["a,1"]))));
    assert_eq!(
        groups.next(),
        Some(Err(RecordError::Malformed("garbage".to_string())))
    );
    assert_eq!(groups.next(), None);
    assert_eq!(groups.stats().items_pulled, 3);
}

#[test]
fn source_is_not_polled_after_an_error() {
    let polls = Cell::new(0);
    let source = std::iter::from_fn(|| {
        polls.set(polls.get() + 1);
        match polls.get() {
            1 => Some(Ok("a,1")),
            2 => Some(Err(RecordError::SourceClosed)),
            _ => Some(Ok("z,9")),
        }
    });

    let mut groups = source.try_group_clustered_by(key_of);

    assert_eq!(groups.next(), Some(Err(RecordError::SourceClosed)));
    assert_eq!(groups.next(), None);
    assert_eq!(groups.next(), None);
    assert_eq!(polls.get(), 2);
}

#[test]
fn oversized_cluster_is_reported() {
    let settings = ClusterSettings::new().with_max_cluster_len(2);
    let lines = vec![Ok("a,1"), Ok("a,2"), Ok("b,1"), Ok("b,2"), Ok("b,3")];
    let mut groups = try_group_clustered_by_with(lines, key_of, &settings);

    assert_eq!(
        groups.next(),
        Some(Ok(("a".to_string(), vec!["a,1", "a,2"])))
    );
    assert_eq!(
        groups.next(),
        Some(Err(RecordError::Cluster(ClusterError::ClusterTooLarge {
            position: 4,
            limit: 2,
        })))
    );
    assert_eq!(groups.next(), None);
}

#[test]
fn limit_allows_clusters_of_exactly_the_limit() {
    let settings = ClusterSettings::new().with_max_cluster_len(3);
    let lines = vec![Ok("a,1"), Ok("a,2"), Ok("a,3"), Ok("b,1")];

    let groups: Result<Vec<_>, RecordError> = lines
        .into_iter()
        .try_group_clustered_by_with(key_of, &settings)
        .map(|group| group.map(|(key, rows)| (key, rows.len())))
        .collect();

    assert_eq!(groups, Ok(vec![("a".to_string(), 3), ("b".to_string(), 1)]));
}

#[test]
fn empty_fallible_source_yields_nothing() {
    let lines: Vec<Result<&str, RecordError>> = Vec::new();
    let mut groups = try_group_clustered_by(lines, key_of);
    assert_eq!(groups.next(), None);
}
