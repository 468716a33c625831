use crate::*;

#[test]
fn defaults_hide_builtins() {
    let config = GraphConfig::default();
    assert!(config.hide_builtins);
    assert!(!config.hide_disconnected);
    assert_eq!(config.layout_id(), "|");
    assert_eq!(GraphConfig::from_json("{}").unwrap(), config);
}

#[test]
fn parses_camel_case_json() {
    let config = GraphConfig::from_json(
        r#"{
            "projections": [
                { "type": "Board", "atom": "Board1" },
                { "type": "Time", "time": true }
            ],
            "hidden": ["this/List"],
            "hideBuiltins": false,
            "hideDisconnected": true
        }"#,
    )
    .unwrap();

    assert_eq!(config.projections.len(), 2);
    assert_eq!(config.projections[0].atom.as_deref(), Some("Board1"));
    assert!(config.projections[1].time);
    assert_eq!(config.hidden, vec!["this/List"]);
    assert!(!config.hide_builtins);
    assert!(config.hide_disconnected);
    assert_eq!(config.layout_id(), "[Time]|(Board)");
}

#[test]
fn from_value_matches_from_json() {
    let value = serde_json::json!({ "projections": [{ "type": "A" }] });
    let config = GraphConfig::from_value(value).unwrap();
    assert_eq!(
        config,
        GraphConfig::default().with_projection(Projection::atom_projection("A"))
    );
}

#[test]
fn malformed_json_is_an_invalid_config() {
    let err = GraphConfig::from_json(r#"{ "projections": [{ "time": true }] }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert!(err.to_string().starts_with("Invalid graph config:"));
}
