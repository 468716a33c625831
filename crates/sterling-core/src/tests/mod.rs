mod field;

/// Wraps `<sig>`/`<field>` markup in an `<instance>` element.
pub(crate) fn instance_xml(bitwidth: i32, body: &str) -> String {
    format!(r#"<instance bitwidth="{bitwidth}">{body}</instance>"#)
}

pub(crate) const UNIV_AND_INTS: &str = r#"
<sig label="seq/Int" ID="0" parentID="1" builtin="yes"/>
<sig label="Int" ID="1" parentID="2" builtin="yes"/>
<sig label="univ" ID="2" builtin="yes"/>
"#;
