use crate::ParseOptions;
use crate::builder::{FieldTypes, SignatureMap, types_from_xml};
use crate::set::{Relation, RelationSet};
use crate::signature::Signature;
use crate::tuple::Tuple;
use crate::xml::{attr, children_named};
use crate::{Error, Result};
use roxmltree::Node;
use std::rc::Rc;

/// A relation declared on a signature (`<field>`).
#[derive(Debug, Clone)]
pub struct Field {
    id: String,
    doc_id: String,
    parent: Option<Rc<Signature>>,
    types: FieldTypes,
    tuples: RelationSet,
}

/// A skolem constant or witness relation (`<skolem>`).
#[derive(Debug, Clone)]
pub struct Skolem {
    id: String,
    doc_id: String,
    types: FieldTypes,
    tuples: RelationSet,
}

struct RelationParts {
    id: String,
    doc_id: String,
    types: FieldTypes,
    tuples: RelationSet,
}

impl Field {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The document-local `ID` attribute.
    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    /// The signature declaring this field, when the element names one.
    pub fn parent(&self) -> Option<&Rc<Signature>> {
        self.parent.as_ref()
    }

    pub fn types(&self) -> &FieldTypes {
        &self.types
    }

    pub fn relation(&self) -> &RelationSet {
        &self.tuples
    }

    pub fn from_element(
        element: Node<'_, '_>,
        sig_ids: &SignatureMap,
        options: ParseOptions,
    ) -> Result<Self> {
        let parts = parse_relation("Field", element, sig_ids, options)?;
        let parent = match attr(element, "parentID") {
            None => None,
            Some(parent_id) => Some(sig_ids.get(parent_id).cloned().ok_or_else(|| {
                Error::resolution(
                    "Field",
                    format!("field {} has unknown parent ID: {parent_id}", parts.id),
                )
            })?),
        };
        Ok(Self {
            id: parts.id,
            doc_id: parts.doc_id,
            parent,
            types: parts.types,
            tuples: parts.tuples,
        })
    }
}

impl Skolem {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    pub fn types(&self) -> &FieldTypes {
        &self.types
    }

    pub fn relation(&self) -> &RelationSet {
        &self.tuples
    }

    pub fn from_element(
        element: Node<'_, '_>,
        sig_ids: &SignatureMap,
        options: ParseOptions,
    ) -> Result<Self> {
        let parts = parse_relation("Skolem", element, sig_ids, options)?;
        Ok(Self {
            id: parts.id,
            doc_id: parts.doc_id,
            types: parts.types,
            tuples: parts.tuples,
        })
    }
}

impl Relation for Field {
    fn arity(&self) -> usize {
        self.tuples.arity()
    }

    fn tuples(&self) -> &[Tuple] {
        self.tuples.tuples()
    }
}

impl Relation for Skolem {
    fn arity(&self) -> usize {
        self.tuples.arity()
    }

    fn tuples(&self) -> &[Tuple] {
        self.tuples.tuples()
    }
}

fn parse_relation(
    construct: &'static str,
    element: Node<'_, '_>,
    sig_ids: &SignatureMap,
    options: ParseOptions,
) -> Result<RelationParts> {
    let label = attr(element, "label").ok_or(Error::missing_attribute(construct, "label"))?;
    let doc_id = attr(element, "ID").ok_or(Error::missing_attribute(construct, "ID"))?;
    let types = types_from_xml(element, sig_ids)?;

    let arity = types[0].len();
    if let Some(other) = types.iter().find(|columns| columns.len() != arity) {
        return Err(Error::resolution(
            construct,
            format!(
                "{label} declares union types of different arity ({arity} and {})",
                other.len()
            ),
        ));
    }

    let mut tuples = RelationSet::new(arity);
    for tuple_el in children_named(element, "tuple") {
        let tuple = Tuple::from_element(tuple_el)?;
        if options.check_tuple_types && tuple.arity() == arity {
            check_tuple_types(construct, label, &tuple, &types)?;
        }
        tuples.insert(tuple)?;
    }

    Ok(RelationParts {
        id: label.to_string(),
        doc_id: doc_id.to_string(),
        types,
        tuples,
    })
}

/// Every atom must belong to a signature typing its column in at least one union alternative.
fn check_tuple_types(
    construct: &'static str,
    label: &str,
    tuple: &Tuple,
    types: &FieldTypes,
) -> Result<()> {
    for (column, atom) in tuple.atoms().iter().enumerate() {
        let typed = types
            .iter()
            .any(|columns| columns[column].atom(atom.id()).is_some());
        if !typed {
            return Err(Error::resolution(
                construct,
                format!(
                    "atom {atom} in {label} tuple {} is not an instance of its column type",
                    tuple.to_arrow_string()
                ),
            ));
        }
    }
    Ok(())
}
