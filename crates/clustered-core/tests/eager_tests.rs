//! Eager grouper integration tests

use std::collections::HashMap;

use clustered_core::{group_clustered_by, group_values_by, try_group_values_by, GroupingExt};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn eager_grouping_merges_non_adjacent_keys() {
    let input = vec![("Dog", 1), ("Cat", 2), ("Dog", 3)];

    let groups = group_values_by(input, |pair| pair);

    assert_eq!(groups, vec![("Dog", vec![1, 3]), ("Cat", vec![2])]);
}

#[test]
fn eager_and_clustered_agree_on_clustered_input() {
    let input = vec![
        ("Dog", 12),
        ("Dog", 5),
        ("Cat", 3),
        ("Cat", 6),
        ("Cat", 9),
        ("Horse", 16),
    ];

    let eager = group_values_by(input.clone(), |pair| pair);
    let clustered: Vec<(&str, Vec<i32>)> = group_clustered_by(input, |pair| pair.0)
        .map(|(key, rows)| (key, rows.into_iter().map(|(_, v)| v).collect()))
        .collect();

    assert_eq!(eager, clustered);
}

#[test]
fn projection_can_reshape_values() {
    let words = ["apple", "avocado", "banana", "blueberry", "cherry"];

    let groups = words
        .into_iter()
        .group_values_by(|word| (word.chars().next(), word.len()));

    assert_eq!(
        groups,
        vec![
            (Some('a'), vec![5, 7]),
            (Some('b'), vec![6, 9]),
            (Some('c'), vec![6]),
        ]
    );
}

fn parse_row(row: &'static str) -> Result<(u32, &'static str), String> {
    let (key, value) = row
        .split_once(':')
        .ok_or_else(|| format!("missing separator in {row:?}"))?;
    let key = key.parse::<u32>().map_err(|e| e.to_string())?;
    Ok((key, value))
}

#[test]
fn try_grouping_returns_first_error() {
    let rows = ["1:a", "2:b", "oops", "also bad"];

    let result = try_group_values_by(rows, parse_row);

    assert_eq!(result, Err("missing separator in \"oops\"".to_string()));
}

#[test]
fn try_grouping_collects_when_all_rows_parse() {
    let rows = ["1:a", "2:b", "1:c"];

    let result = try_group_values_by(rows, parse_row);

    assert_eq!(result, Ok(vec![(1, vec!["a", "c"]), (2, vec!["b"])]));
}

#[test]
fn try_grouping_through_extension_trait() {
    let ok = ["1:a", "2:b", "1:c"].into_iter().try_group_values_by(parse_row);
    assert_eq!(ok, Ok(vec![(1, vec!["a", "c"]), (2, vec!["b"])]));

    let err = ["1:a", "x"].into_iter().try_group_values_by(parse_row);
    assert_eq!(err, Err("missing separator in \"x\"".to_string()));
}

proptest! {
    #[test]
    fn values_keep_source_order_within_each_key(
        input in prop::collection::vec((0u8..5, any::<i32>()), 0..50)
    ) {
        let groups = group_values_by(input.clone(), |pair| pair);

        let mut expected: HashMap<u8, Vec<i32>> = HashMap::new();
        for (key, value) in &input {
            expected.entry(*key).or_default().push(*value);
        }

        prop_assert_eq!(groups.len(), expected.len());
        for (key, values) in &groups {
            prop_assert_eq!(Some(values), expected.get(key));
        }

        let mut first_seen: Vec<u8> = Vec::new();
        for (key, _) in &input {
            if !first_seen.contains(key) {
                first_seen.push(*key);
            }
        }
        let group_keys: Vec<u8> = groups.iter().map(|(key, _)| *key).collect();
        prop_assert_eq!(group_keys, first_seen);
    }
}
