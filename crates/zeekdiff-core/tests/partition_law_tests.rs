//! Algebraic laws of projection and diff, checked over generated tables
//!
//! Covers:
//! - only-cluster, only-offline and shared rows partitioning each side
//! - diff results independent of source row order
//! - projection idempotence
//! - projected rows distinct and never all null

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use std::collections::HashSet;
use zeekdiff_core::{diff, project, LogTable, Row, Value};

fn columns() -> Vec<String> {
    vec!["ts".to_string(), "a".to_string(), "b".to_string()]
}

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        "[a-c]".prop_map(Value::Text),
        (0u16..20).prop_map(|n| Value::Text(n.to_string())),
    ]
}

fn table() -> impl Strategy<Value = LogTable> {
    prop::collection::vec(prop::collection::vec(cell(), 3), 0..24)
        .prop_map(|rows| LogTable::new(columns(), rows).unwrap())
}

fn key() -> Vec<String> {
    vec!["a".to_string(), "b".to_string()]
}

proptest! {
    #[test]
    fn prop_set_partition(a in table(), b in table()) {
        let pa = project(&a, &key()).unwrap();
        let pb = project(&b, &key()).unwrap();
        let result = diff("prop", &pa, &pb).unwrap();

        prop_assert_eq!(result.only_cluster.len() + result.shared, pa.len());
        prop_assert_eq!(result.only_offline.len() + result.shared, pb.len());

        let only_a: HashSet<&Row> = result.only_cluster.iter().collect();
        prop_assert!(result.only_offline.iter().all(|r| !only_a.contains(r)));
    }

    #[test]
    fn prop_diff_ignores_row_order(a in table(), b in table()) {
        let mut reversed: Vec<Row> = a.rows().to_vec();
        reversed.reverse();
        let a_rev = LogTable::new(columns(), reversed).unwrap();

        let forward = diff("prop", &project(&a, &key()).unwrap(), &project(&b, &key()).unwrap()).unwrap();
        let backward = diff("prop", &project(&a_rev, &key()).unwrap(), &project(&b, &key()).unwrap()).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_projection_idempotent(a in table()) {
        let once = project(&a, &key()).unwrap();
        let twice = project(&once.to_table().unwrap(), &key()).unwrap();
        prop_assert_eq!(once.rows(), twice.rows());
        prop_assert_eq!(once.digest(), twice.digest());
    }

    #[test]
    fn prop_projected_rows_distinct_and_not_all_null(a in table()) {
        let p = project(&a, &key()).unwrap();
        let distinct: HashSet<&Row> = p.rows().iter().collect();
        prop_assert_eq!(distinct.len(), p.len());
        prop_assert!(p.rows().iter().all(|r| r.iter().any(|v| !v.is_null())));
    }
}
