use super::{UNIV_AND_INTS, instance_xml};
use crate::*;

const SIGS: &str = r#"
<sig label="this/Node" ID="4" parentID="2"><atom label="Node$0"/><atom label="Node$1"/></sig>
<sig label="this/List" ID="5" parentID="2"><atom label="List$0"/></sig>
"#;

fn parse_field(field: &str, options: ParseOptions) -> Result<Field> {
    let xml = instance_xml(3, &format!("{UNIV_AND_INTS}{SIGS}{field}"));
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let sigs = signatures_from_xml(doc.root_element()).unwrap();
    let el = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("field") || n.has_tag_name("skolem"))
        .unwrap();
    Field::from_element(el, &sigs, options)
}

#[test]
fn field_reads_tuples_types_and_parent() {
    let field = parse_field(
        r#"<field label="next" ID="6" parentID="4">
  <tuple><atom label="Node$0"/><atom label="Node$1"/></tuple>
  <types><type ID="4"/><type ID="4"/></types>
</field>"#,
        ParseOptions::strict(),
    )
    .unwrap();

    assert_eq!(field.id(), "next");
    assert_eq!(field.doc_id(), "6");
    assert_eq!(field.parent().map(|s| s.id()), Some("this/Node"));
    assert_eq!(field.arity(), 2);
    assert!(field.has_tuple_ids(&["Node$0", "Node$1"]));
    assert_eq!(field.types().len(), 1);
}

#[test]
fn field_accepts_int_columns() {
    let field = parse_field(
        r#"<field label="val" ID="6" parentID="4">
  <tuple><atom label="Node$0"/><atom label="-4"/></tuple>
  <types><type ID="4"/><type ID="1"/></types>
</field>"#,
        ParseOptions::strict(),
    )
    .unwrap();
    assert!(field.has_tuple_ids(&["Node$0", "-4"]));
}

#[test]
fn field_requires_label_and_id() {
    let err = parse_field(
        r#"<field ID="6"><types><type ID="4"/></types></field>"#,
        ParseOptions::strict(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::MissingAttribute {
            construct: "Field",
            attribute: "label"
        }
    ));

    let err = parse_field(
        r#"<field label="f"><types><type ID="4"/></types></field>"#,
        ParseOptions::strict(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::MissingAttribute {
            construct: "Field",
            attribute: "ID"
        }
    ));
}

#[test]
fn field_with_unknown_parent_is_rejected() {
    let err = parse_field(
        r#"<field label="f" ID="6" parentID="77"><types><type ID="4"/><type ID="4"/></types></field>"#,
        ParseOptions::strict(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Resolution { .. }), "{err}");
}

#[test]
fn strict_parsing_checks_column_types() {
    let xml = r#"<field label="head" ID="6" parentID="5">
  <tuple><atom label="Node$0"/><atom label="Node$1"/></tuple>
  <types><type ID="5"/><type ID="4"/></types>
</field>"#;

    let err = parse_field(xml, ParseOptions::strict()).unwrap_err();
    assert!(matches!(err, Error::Resolution { .. }), "{err}");

    let field = parse_field(xml, ParseOptions::lenient()).unwrap();
    assert_eq!(field.relation().len(), 1);
}

#[test]
fn union_types_accept_either_alternative() {
    let field = parse_field(
        r#"<field label="f" ID="6" parentID="4">
  <tuple><atom label="Node$0"/><atom label="Node$1"/></tuple>
  <tuple><atom label="Node$0"/><atom label="List$0"/></tuple>
  <types><type ID="4"/><type ID="4"/></types>
  <types><type ID="4"/><type ID="5"/></types>
</field>"#,
        ParseOptions::strict(),
    )
    .unwrap();
    assert_eq!(field.types().len(), 2);
    assert_eq!(field.relation().len(), 2);
}

#[test]
fn tuple_arity_must_match_columns() {
    let err = parse_field(
        r#"<field label="f" ID="6" parentID="4">
  <tuple><atom label="Node$0"/></tuple>
  <types><type ID="4"/><type ID="4"/></types>
</field>"#,
        ParseOptions::strict(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Domain { .. }), "{err}");
}

#[test]
fn skolem_has_no_parent() {
    let xml = instance_xml(
        3,
        &format!(
            r#"{UNIV_AND_INTS}{SIGS}<skolem label="$show_n" ID="9">
  <tuple><atom label="Node$1"/></tuple>
  <types><type ID="4"/></types>
</skolem>"#
        ),
    );
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let sigs = signatures_from_xml(doc.root_element()).unwrap();
    let el = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("skolem"))
        .unwrap();
    let skolem = Skolem::from_element(el, &sigs, ParseOptions::default()).unwrap();
    assert_eq!(skolem.id(), "$show_n");
    assert_eq!(skolem.arity(), 1);
    assert!(skolem.has_tuple_ids(&["Node$1"]));
}
