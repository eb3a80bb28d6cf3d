use copycat::{
    CancellationToken, Error, InvalidColumnReason, Key, KeyColumn, KeyIndex, NetworkRole,
    match_nodes,
};
use copycat_graph::{ColumnType, Graph, NodeIndex, Value};

fn keyed(name: &str, keys: &[(&str, Value)]) -> Graph {
    let mut g = Graph::new(name);
    g.table_mut().set_column("key", ColumnType::String);
    for (id, key) in keys {
        let ix = g.add_node(*id).unwrap();
        g[ix].set_value("key", key.clone());
    }
    g
}

fn ids(g: &Graph, nodes: impl IntoIterator<Item = NodeIndex>) -> Vec<String> {
    nodes.into_iter().map(|ix| g[ix].id().to_string()).collect()
}

#[test]
fn index_reports_duplicates_and_keeps_last() {
    let g = keyed(
        "source",
        &[
            ("a", Value::from("x1")),
            ("b", Value::from("x1")),
            ("c", Value::from("x2")),
        ],
    );
    let (index, duplicates) = KeyIndex::build(&g, "key").unwrap();

    assert!(duplicates);
    assert_eq!(index.len(), 2);
    assert_eq!(index.duplicate_count(), 1);
    assert_eq!(
        index.get(&Key::Str("x1".to_string())),
        g.node_index("b")
    );
    assert_eq!(ids(&g, index.nodes()), vec!["b", "c"]);
}

#[test]
fn index_without_duplicates_reports_none() {
    let g = keyed("source", &[("a", Value::from("x1")), ("b", Value::from("x2"))]);
    let (index, duplicates) = KeyIndex::build(&g, "key").unwrap();
    assert!(!duplicates);
    assert_eq!(index.len(), 2);
}

#[test]
fn index_skips_null_keys() {
    let g = keyed("source", &[("a", Value::Null), ("b", Value::from("x2"))]);
    let (index, duplicates) = KeyIndex::build(&g, "key").unwrap();
    assert!(!duplicates);
    assert_eq!(index.len(), 1);
    assert_eq!(index.keyless_count(), 1);
    assert_eq!(ids(&g, index.keyless_nodes()), vec!["a"]);
}

#[test]
fn null_keyed_source_nodes_stay_unmapped() {
    let source = keyed(
        "source",
        &[
            ("A", Value::from("x1")),
            ("B", Value::Null),
            ("E", Value::from("x5")),
        ],
    );
    let target = keyed("target", &[("C", Value::from("x1")), ("D", Value::Null)]);
    let (index, _) = KeyIndex::build(&source, "key").unwrap();
    let column = KeyColumn::resolve(&target, "key", NetworkRole::Target).unwrap();

    let m = match_nodes(&index, &target, &column, &CancellationToken::new()).unwrap();

    assert_eq!(m.mapped_count(), 1);
    assert_eq!(ids(&source, m.unmapped_source.iter().copied()), vec!["E", "B"]);
    assert_eq!(ids(&target, m.unmapped_target.iter().copied()), vec!["D"]);
}

#[test]
fn index_rejects_unknown_column() {
    let g = keyed("source", &[("a", Value::from("x1"))]);
    let err = KeyIndex::build(&g, "missing").unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidColumn {
            reason: InvalidColumnReason::Missing,
            ..
        }
    ));
}

#[test]
fn matcher_partitions_both_sides() {
    let source = keyed(
        "source",
        &[
            ("A", Value::from("x1")),
            ("B", Value::from("x2")),
            ("E", Value::from("x5")),
        ],
    );
    let target = keyed(
        "target",
        &[
            ("C", Value::from("x1")),
            ("D", Value::from("x3")),
            ("F", Value::from("x5")),
            ("G", Value::Null),
        ],
    );
    let (index, _) = KeyIndex::build(&source, "key").unwrap();
    let column = KeyColumn::resolve(&target, "key", NetworkRole::Target).unwrap();

    let m = match_nodes(&index, &target, &column, &CancellationToken::new()).unwrap();

    let pairs: Vec<(String, String)> = m
        .pairs
        .iter()
        .map(|&(s, t)| (source[s].id().to_string(), target[t].id().to_string()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("A".to_string(), "C".to_string()),
            ("E".to_string(), "F".to_string()),
        ]
    );
    assert_eq!(ids(&source, m.unmapped_source.iter().copied()), vec!["B"]);
    assert_eq!(ids(&target, m.unmapped_target.iter().copied()), vec!["D", "G"]);
    assert_eq!(m.mapped_count() + m.unmapped_target.len(), target.node_count());
}

#[test]
fn several_targets_may_share_one_source() {
    let source = keyed("source", &[("A", Value::from("x1"))]);
    let target = keyed(
        "target",
        &[("C1", Value::from("x1")), ("C2", Value::from("x1"))],
    );
    let (index, _) = KeyIndex::build(&source, "key").unwrap();
    let column = KeyColumn::resolve(&target, "key", NetworkRole::Target).unwrap();

    let m = match_nodes(&index, &target, &column, &CancellationToken::new()).unwrap();
    assert_eq!(m.mapped_count(), 2);
    assert!(m.unmapped_source.is_empty());
    assert!(m.unmapped_target.is_empty());
}

#[test]
fn matcher_returns_nothing_when_cancelled() {
    let source = keyed("source", &[("A", Value::from("x1"))]);
    let target = keyed("target", &[("C", Value::from("x1"))]);
    let (index, _) = KeyIndex::build(&source, "key").unwrap();
    let column = KeyColumn::resolve(&target, "key", NetworkRole::Target).unwrap();

    let cancel = CancellationToken::new();
    let handle = cancel.clone();
    handle.cancel();
    assert!(cancel.is_cancelled());
    assert!(match_nodes(&index, &target, &column, &cancel).is_none());
}
