//! Signature forest construction from an `<instance>` element.
//!
//! `<sig>` elements arrive as a flat list whose parent references may point forward, so the
//! build runs in two phases: every signature is created and registered under its document `ID`
//! first, then child lists are resolved through that map and attached once.

use crate::signature::{INT, SEQ_INT, Signature, UNIV};
use crate::xml::{attr, children_named};
use crate::{Error, Result};
use indexmap::IndexMap;
use roxmltree::Node;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Document-local signature `ID` to signature. `Int` and `seq/Int` share one entry value.
pub type SignatureMap = IndexMap<String, Rc<Signature>>;

/// Column types of a field or skolem: one entry per `<types>` element, one signature per column.
pub type FieldTypes = Vec<Vec<Rc<Signature>>>;

/// Reads the `bitwidth` attribute. An absent attribute yields `-1` (unspecified).
pub fn bitwidth(instance: Node<'_, '_>) -> Result<i64> {
    match attr(instance, "bitwidth") {
        None => Ok(-1),
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
            Error::domain("Instance", format!("bitwidth is not an integer: {raw:?}"))
        }),
    }
}

/// Builds every signature of an `<instance>` element, wires the forest, and returns the map
/// from document `ID` to signature.
pub fn signatures_from_xml(instance: Node<'_, '_>) -> Result<SignatureMap> {
    let bitwidth = bitwidth(instance)?;
    let int = Rc::new(Signature::int_signature(bitwidth)?);

    let mut sig_ids = SignatureMap::default();
    // document ID -> ID of the first entry holding the same signature
    let mut canonical: FxHashMap<String, String> = FxHashMap::default();
    let mut int_id: Option<String> = None;
    // (parent ID, child ID), document order
    let mut edges: Vec<(String, String)> = Vec::new();

    for sig_el in children_named(instance, "sig") {
        let id = attr(sig_el, "ID").ok_or(Error::missing_attribute("Signature", "ID"))?;
        let label =
            attr(sig_el, "label").ok_or(Error::missing_attribute("Signature", "label"))?;
        if sig_ids.contains_key(id) {
            return Err(Error::resolution(
                "Signature",
                format!("duplicate signature ID {id} ({label})"),
            ));
        }

        let parent = resolve_parent(sig_el)?;
        if parent.is_none() && label != UNIV {
            return Err(Error::resolution(
                "Signature",
                format!("unable to resolve parent sig for non-univ sig {label}"),
            ));
        }

        let signature = if label == INT || label == SEQ_INT {
            let first = int_id.get_or_insert_with(|| id.to_string());
            canonical.insert(id.to_string(), first.clone());
            Rc::clone(&int)
        } else {
            canonical.insert(id.to_string(), id.to_string());
            Rc::new(Signature::from_element(sig_el)?)
        };
        sig_ids.insert(id.to_string(), signature);

        if let Some(parent) = parent {
            if label != SEQ_INT {
                edges.push((parent.to_string(), id.to_string()));
            }
        }
    }

    let canon = |id: &str| -> String {
        canonical
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    };

    let parent_of: FxHashMap<String, String> = edges
        .iter()
        .map(|(parent, child)| (canon(child), canon(parent)))
        .collect();
    reject_cycles(&parent_of, &sig_ids)?;

    let mut children_of: IndexMap<String, Vec<&str>> = IndexMap::new();
    for (parent, child) in &edges {
        if !sig_ids.contains_key(parent) {
            tracing::warn!(parent = %parent, child = %child, "signature parent ID does not resolve");
        }
        children_of
            .entry(canon(parent))
            .or_default()
            .push(child.as_str());
    }

    for (id, signature) in &sig_ids {
        if canonical.get(id).map(String::as_str) != Some(id.as_str()) {
            continue;
        }
        let children = children_of
            .get(id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|child| {
                        let found = sig_ids.get(*child).cloned();
                        if found.is_none() {
                            tracing::warn!(child = %child, "dropping unresolved subsignature");
                        }
                        found
                    })
                    .collect()
            })
            .unwrap_or_default();
        signature.wire(children);
    }

    tracing::debug!(
        bitwidth,
        signatures = sig_ids.len(),
        "built signature forest"
    );
    Ok(sig_ids)
}

/// Resolves the parent `ID` of a `<sig>` element.
///
/// An `extends` sig carries `parentID`. An `in` (subset) sig omits it and instead holds exactly
/// one `<type ID=".."/>` child naming its superset. Only `univ` has no parent.
pub fn resolve_parent<'a>(sig_el: Node<'a, '_>) -> Result<Option<&'a str>> {
    if let Some(parent_id) = attr(sig_el, "parentID") {
        return Ok(Some(parent_id));
    }

    let label = sig_el.attribute("label").unwrap_or_default();
    if label == UNIV {
        return Ok(None);
    }

    let types: Vec<Node<'a, '_>> = children_named(sig_el, "type").collect();
    if types.len() != 1 {
        return Err(Error::resolution(
            "Signature",
            format!(
                "subset sig {label} had {} type elements; exactly one is supported",
                types.len()
            ),
        ));
    }
    attr(types[0], "ID")
        .map(Some)
        .ok_or(Error::missing_attribute("Signature", "type.ID"))
}

fn reject_cycles(parent_of: &FxHashMap<String, String>, sig_ids: &SignatureMap) -> Result<()> {
    for start in parent_of.keys() {
        let mut cur = start;
        let mut steps = 0usize;
        while let Some(parent) = parent_of.get(cur) {
            if parent == start {
                let label = sig_ids.get(start).map(|s| s.id()).unwrap_or(start.as_str());
                return Err(Error::resolution(
                    "Signature",
                    format!("signature {label} is its own ancestor"),
                ));
            }
            steps += 1;
            if steps > parent_of.len() {
                // Cycle not through `start`; reported from one of its members.
                break;
            }
            cur = parent;
        }
    }
    Ok(())
}

/// Resolves the `<types>` children of a `<field>` or `<skolem>` element.
///
/// A field whose type is a union is exported with several `<types>` elements, one per
/// alternative, so the result has one inner list per `<types>` element.
pub fn types_from_xml(element: Node<'_, '_>, sig_ids: &SignatureMap) -> Result<FieldTypes> {
    let types_elements: Vec<Node<'_, '_>> = children_named(element, "types").collect();
    if types_elements.is_empty() {
        return Err(Error::missing_element("Field", "types"));
    }
    types_elements
        .into_iter()
        .map(|types| types_from_xml_single(types, sig_ids))
        .collect()
}

fn types_from_xml_single(
    element: Node<'_, '_>,
    sig_ids: &SignatureMap,
) -> Result<Vec<Rc<Signature>>> {
    let columns = children_named(element, "type")
        .map(|type_el| {
            let type_id = attr(type_el, "ID").ok_or(Error::missing_attribute("Field", "ID"))?;
            sig_ids
                .get(type_id)
                .cloned()
                .ok_or_else(|| Error::resolution("Field", format!("No signature with ID: {type_id}")))
        })
        .collect::<Result<Vec<_>>>()?;
    if columns.is_empty() {
        return Err(Error::missing_element("Field", "type"));
    }
    Ok(columns)
}
