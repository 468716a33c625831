use super::{LIST, TRACE, instances};
use crate::*;

fn node_ids(graph: &InstanceGraph) -> Vec<&str> {
    graph.nodes.keys().map(String::as_str).collect()
}

fn edge_triples(graph: &InstanceGraph) -> Vec<(&str, &str, &str)> {
    graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str(), e.label.as_str()))
        .collect()
}

#[test]
fn unprojected_trace_step() {
    let steps = instances(TRACE);
    let graph = build_graph(&steps[0], 0, &GraphConfig::default()).unwrap();

    assert_eq!(graph.id, "0");
    assert_eq!(node_ids(&graph), vec!["X0", "O0", "Board0", "Board1", "0"]);
    assert_eq!(
        edge_triples(&graph),
        vec![("Board1", "X0", "board[0, 0]"), ("Board0", "Board1", "next")]
    );
    assert_eq!(graph.node("X0").unwrap().signature, "X");
    assert_eq!(graph.node("0").unwrap().signature, "Int");
}

#[test]
fn projection_keeps_only_the_chosen_atom() {
    let steps = instances(TRACE);
    let config = GraphConfig::default()
        .with_projection(Projection::time_projection("Board").with_atom("Board1"));
    let graph = build_graph(&steps[0], 0, &config).unwrap();

    assert_eq!(graph.id, "[Board:Board1]");
    assert_eq!(node_ids(&graph), vec!["X0", "O0", "0"]);
    assert_eq!(edge_triples(&graph), vec![("0", "X0", "board[0]")]);
    assert!(graph.node("Board0").is_none());
    assert_eq!(graph.projections[0].atom.as_deref(), Some("Board1"));
}

#[test]
fn projection_defaults_to_first_atom() {
    let steps = instances(TRACE);
    let config = GraphConfig::default().with_projection(Projection::atom_projection("Board"));
    let graph = build_graph(&steps[1], 1, &config).unwrap();

    assert_eq!(graph.id, "(Board:Board0)");
    assert!(graph.edges.is_empty());
    assert_eq!(node_ids(&graph), vec!["X0", "O0"]);
}

#[test]
fn projecting_a_parent_signature_covers_its_children() {
    let steps = instances(TRACE);
    let config = GraphConfig::default()
        .with_projection(Projection::atom_projection("Player").with_atom("O0"));
    let graph = build_graph(&steps[1], 1, &config).unwrap();

    assert!(graph.node("X0").is_none());
    assert!(graph.node("O0").is_none());
    assert_eq!(
        edge_triples(&graph),
        vec![
            ("Board2", "1", "board[1]"),
            ("Board0", "Board1", "next"),
            ("Board1", "Board2", "next"),
        ]
    );
}

#[test]
fn unknown_projection_type_is_rejected() {
    let steps = instances(TRACE);
    let config = GraphConfig::default().with_projection(Projection::atom_projection("Nope"));
    let err = build_graph(&steps[0], 0, &config).unwrap_err();
    assert!(matches!(err, Error::UnknownProjectionType { ref type_name } if type_name == "Nope"));
}

#[test]
fn unknown_projection_atom_is_rejected() {
    let steps = instances(TRACE);
    let config = GraphConfig::default()
        .with_projection(Projection::atom_projection("Board").with_atom("Board2"));
    let err = build_graph(&steps[0], 0, &config).unwrap_err();
    assert!(matches!(err, Error::UnknownProjectionAtom { ref atom, .. } if atom == "Board2"));
    assert!(build_graph(&steps[1], 1, &config).is_ok());
}

#[test]
fn list_graph_labels_and_owners() {
    let list = instances(LIST);
    let graph = build_graph(&list[0], 0, &GraphConfig::default()).unwrap();

    assert_eq!(
        node_ids(&graph),
        vec!["Node$0", "Node$1", "Node$2", "List$0", "3", "-2"]
    );
    assert_eq!(graph.node("Node$2").unwrap().signature, "this/Last");
    assert_eq!(graph.node("Node$1").unwrap().labels, vec!["$show_n"]);
    assert_eq!(graph.edges_of("next").count(), 2);
    assert_eq!(graph.edges_of("val").count(), 2);
    assert_eq!(
        graph.edges_of("head").next().map(|e| e.target.as_str()),
        Some("Node$0")
    );
}

#[test]
fn builtins_are_drawn_on_request() {
    let list = instances(LIST);
    let config = GraphConfig {
        hide_builtins: false,
        ..GraphConfig::default()
    };
    let graph = build_graph(&list[0], 0, &config).unwrap();
    let ints = graph.nodes.values().filter(|n| n.signature == "Int").count();
    assert_eq!(ints, 16);
}

#[test]
fn hidden_signatures_drop_their_tuples() {
    let list = instances(LIST);
    let config = GraphConfig {
        hidden: vec!["this/Node".to_string()],
        ..GraphConfig::default()
    };
    let graph = build_graph(&list[0], 0, &config).unwrap();
    assert_eq!(node_ids(&graph), vec!["List$0"]);
    assert!(graph.edges.is_empty());

    let config = GraphConfig {
        hide_disconnected: true,
        ..config
    };
    let graph = build_graph(&list[0], 0, &config).unwrap();
    assert!(graph.nodes.is_empty());
}

#[test]
fn graph_serializes_without_empty_labels() {
    let steps = instances(TRACE);
    let graph = build_graph(&steps[0], 0, &GraphConfig::default()).unwrap();
    let value = serde_json::to_value(&graph).unwrap();
    assert_eq!(value["id"], "0");
    assert_eq!(
        value["nodes"]["X0"],
        serde_json::json!({ "id": "X0", "signature": "X" })
    );
    assert_eq!(value["edges"][1]["relation"], "next");
}

#[test]
fn overlapping_projections_must_agree() {
    let steps = instances(TRACE);
    let config = GraphConfig::default()
        .with_projection(Projection::atom_projection("X").with_atom("X0"))
        .with_projection(Projection::atom_projection("Player").with_atom("O0"));
    let graph = build_graph(&steps[1], 1, &config).unwrap();

    assert_eq!(graph.id, "(Player:O0)|(X:X0)");
    assert_eq!(
        edge_triples(&graph),
        vec![
            ("Board2", "1", "board[1]"),
            ("Board0", "Board1", "next"),
            ("Board1", "Board2", "next"),
        ]
    );
}

#[test]
fn agreeing_overlapping_projections_keep_the_tuple() {
    let steps = instances(TRACE);
    let config = GraphConfig::default()
        .with_projection(Projection::atom_projection("Player").with_atom("X0"))
        .with_projection(Projection::atom_projection("X").with_atom("X0"));
    let graph = build_graph(&steps[1], 1, &config).unwrap();

    assert_eq!(
        edge_triples(&graph),
        vec![
            ("Board1", "0", "board[0]"),
            ("Board2", "0", "board[0]"),
            ("Board0", "Board1", "next"),
            ("Board1", "Board2", "next"),
        ]
    );
}
