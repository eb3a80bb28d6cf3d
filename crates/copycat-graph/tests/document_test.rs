use copycat_graph::{ColumnType, Error, Session, SessionDocument, Value, ViewState};

const SESSION: &str = r#"{
  "current": "target",
  "networks": [
    {
      "name": "source",
      "columns": { "gene": "String", "rank": "Integer" },
      "viewport": { "centerX": 12.5, "centerY": -3.0, "scale": 0.75 },
      "nodes": [
        { "id": "a", "x": 0.0, "y": 1.0, "z": 2.0, "row": { "name": "A", "gene": "x1", "rank": 3 } },
        { "id": "b", "x": 10.0, "y": 10.0, "selected": true, "row": { "gene": null } }
      ]
    },
    {
      "name": "target",
      "nodes": [ { "id": "c", "x": 4.0, "y": 4.0, "row": { "name": "C", "label": "free text" } } ]
    }
  ]
}"#;

#[test]
fn loads_networks_in_document_order() {
    let doc = SessionDocument::from_json_str(SESSION).unwrap();
    let session = Session::from_document(doc).unwrap();

    assert_eq!(session.names().collect::<Vec<_>>(), vec!["source", "target"]);
    assert_eq!(session.current().map(|g| g.name()), Some("target"));

    let source = session.by_name("source").unwrap();
    assert_eq!(source.table().column("rank"), Some(ColumnType::Integer));
    assert_eq!(source.viewport.center_x, 12.5);
    assert_eq!(source.viewport.center_z, 0.0);
    assert_eq!(source.viewport.scale, 0.75);

    let a = source.node_by_id("a").unwrap();
    assert_eq!(a.view, ViewState::new(0.0, 1.0, 2.0));
    assert_eq!(a.value("rank"), &Value::Integer(3));
    assert_eq!(a.value("gene"), &Value::from("x1"));

    let b = source.node_by_id("b").unwrap();
    assert!(b.selected);
    assert!(b.value("gene").is_null());
    assert_eq!(b.view.z, 0.0);
}

#[test]
fn undeclared_cells_become_string_columns() {
    let session = Session::from_document(SessionDocument::from_json_str(SESSION).unwrap()).unwrap();
    let target = session.by_name("target").unwrap();
    assert_eq!(target.table().column("label"), Some(ColumnType::String));
    assert_eq!(target.viewport.scale, 1.0);
}

#[test]
fn mistyped_cells_are_rejected() {
    let doc = SessionDocument::from_json_str(
        r#"{ "networks": [ { "name": "n", "columns": { "rank": "Integer" },
             "nodes": [ { "id": "a", "x": 0, "y": 0, "row": { "rank": "three" } } ] } ] }"#,
    )
    .unwrap();
    let err = Session::from_document(doc).unwrap_err();
    assert!(matches!(err, Error::ValueType { ref column, .. } if column == "rank"));
}

#[test]
fn unknown_column_types_are_rejected() {
    let doc = SessionDocument::from_json_str(
        r#"{ "networks": [ { "name": "n", "columns": { "tags": "List" } } ] }"#,
    )
    .unwrap();
    assert!(matches!(
        Session::from_document(doc),
        Err(Error::UnknownColumnType { .. })
    ));
}

#[test]
fn duplicate_node_ids_are_rejected() {
    let doc = SessionDocument::from_json_str(
        r#"{ "networks": [ { "name": "n", "nodes": [
             { "id": "a", "x": 0, "y": 0 }, { "id": "a", "x": 1, "y": 1 } ] } ] }"#,
    )
    .unwrap();
    assert!(matches!(
        Session::from_document(doc),
        Err(Error::DuplicateNode { .. })
    ));
}

#[test]
fn written_document_reloads_to_the_same_state() {
    let session = Session::from_document(SessionDocument::from_json_str(SESSION).unwrap()).unwrap();
    let text = session.to_document().to_json_string(true).unwrap();
    let reloaded =
        Session::from_document(SessionDocument::from_json_str(&text).unwrap()).unwrap();

    for (before, after) in session.graphs().zip(reloaded.graphs()) {
        assert_eq!(before.name(), after.name());
        assert_eq!(before.viewport, after.viewport);
        assert_eq!(
            before.table().columns().collect::<Vec<_>>(),
            after.table().columns().collect::<Vec<_>>()
        );
        for (n, m) in before.nodes().zip(after.nodes()) {
            assert_eq!(n.id(), m.id());
            assert_eq!(n.view, m.view);
            assert_eq!(n.selected, m.selected);
            assert_eq!(n.value("gene"), m.value("gene"));
            assert_eq!(n.value("name"), m.value("name"));
        }
    }
    assert_eq!(reloaded.current().map(|g| g.name()), Some("target"));
}

#[test]
fn selected_cells_set_the_selection_flag() {
    let doc = SessionDocument::from_json_str(
        r#"{ "networks": [ { "name": "n", "nodes": [
             { "id": "a", "x": 0, "y": 0, "row": { "name": "A", "selected": true } },
             { "id": "b", "x": 0, "y": 0, "row": { "selected": false } },
             { "id": "c", "x": 0, "y": 0, "selected": true, "row": { "selected": null } } ] } ] }"#,
    )
    .unwrap();
    let session = Session::from_document(doc).unwrap();
    let g = session.by_name("n").unwrap();

    let flags: Vec<bool> = g.nodes().map(|n| n.selected).collect();
    assert_eq!(flags, vec![true, false, true]);
    assert!(g.nodes().all(|n| n.value("selected").is_null()));

    let text = session.to_document().to_json_string(false).unwrap();
    let reloaded = Session::from_document(SessionDocument::from_json_str(&text).unwrap()).unwrap();
    let flags: Vec<bool> = reloaded
        .by_name("n")
        .unwrap()
        .nodes()
        .map(|n| n.selected)
        .collect();
    assert_eq!(flags, vec![true, false, true]);
}

#[test]
fn non_boolean_selected_cells_are_rejected() {
    let doc = SessionDocument::from_json_str(
        r#"{ "networks": [ { "name": "n", "nodes": [
             { "id": "a", "x": 0, "y": 0, "row": { "selected": "yes" } } ] } ] }"#,
    )
    .unwrap();
    let err = Session::from_document(doc).unwrap_err();
    assert!(matches!(err, Error::ValueType { ref column, .. } if column == "selected"));
}
