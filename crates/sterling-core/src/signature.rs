use crate::atom::Atom;
use crate::set::{Relation, RelationSet};
use crate::tuple::Tuple;
use crate::xml::{attr, children_named};
use crate::{Error, Result};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::cell::OnceCell;
use std::rc::Rc;

pub const UNIV: &str = "univ";
pub const INT: &str = "Int";
pub const SEQ_INT: &str = "seq/Int";
pub const STRING: &str = "String";

/// Largest bitwidth accepted by [`Signature::int_signature`]. Every integer is materialized as
/// an atom, so the cap bounds `Int` at 65536 atoms.
pub const MAX_BITWIDTH: i64 = 16;

/// A named set of atoms; the unary relation at the heart of the instance model.
///
/// Subsignatures are attached exactly once, by the instance builder, after every signature of
/// a document exists.
#[derive(Debug)]
pub struct Signature {
    id: String,
    atoms: Vec<Atom>,
    tuples: RelationSet,
    subsignatures: OnceCell<Vec<Rc<Signature>>>,
}

impl Signature {
    pub fn new(id: impl Into<String>, atoms: Vec<Atom>) -> Self {
        let tuples = RelationSet::unary(&atoms);
        Self {
            id: id.into(),
            atoms,
            tuples,
            subsignatures: OnceCell::new(),
        }
    }

    pub fn with_subsignatures(
        id: impl Into<String>,
        atoms: Vec<Atom>,
        subsignatures: Vec<Rc<Signature>>,
    ) -> Self {
        let sig = Self::new(id, atoms);
        sig.wire(subsignatures);
        sig
    }

    /// Attaches the child list. Returns `false` when the signature was already wired.
    pub(crate) fn wire(&self, subsignatures: Vec<Rc<Signature>>) -> bool {
        self.subsignatures.set(subsignatures).is_ok()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.id.as_str(), UNIV | INT | SEQ_INT | STRING)
    }

    /// Direct subsignatures, borrowed. Empty until the signature is wired.
    pub fn children(&self) -> &[Rc<Signature>] {
        self.subsignatures.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds an atom in this signature or any of its descendants.
    pub fn atom(&self, id: &str) -> Option<&Atom> {
        self.atoms
            .iter()
            .find(|atom| atom.id() == id)
            .or_else(|| self.children().iter().find_map(|sig| sig.atom(id)))
    }

    /// Atoms defined by this signature, followed (when `recursive`) by the atoms of every
    /// descendant, depth-first in child order.
    pub fn atoms(&self, recursive: bool) -> Vec<&Atom> {
        let mut out: Vec<&Atom> = self.atoms.iter().collect();
        if recursive {
            for sig in self.children() {
                out.extend(sig.atoms(true));
            }
        }
        out
    }

    pub fn own_atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Direct children, or (when `recursive`) every descendant: direct children first, then
    /// each child's descendants in child order.
    pub fn sub_signatures(&self, recursive: bool) -> Vec<Rc<Signature>> {
        let mut out: Vec<Rc<Signature>> = self.children().to_vec();
        if recursive {
            for sig in self.children() {
                out.extend(sig.sub_signatures(true));
            }
        }
        out
    }

    /// Reads a `<sig>` element and its atoms. Subsignatures are not attached.
    pub fn from_element(element: roxmltree::Node<'_, '_>) -> Result<Self> {
        let label = attr(element, "label").ok_or(Error::missing_attribute("Signature", "label"))?;
        let atoms = children_named(element, "atom")
            .map(Atom::from_element)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(label, atoms))
    }

    /// Synthesizes `Int`: one atom per two's-complement value of the given bitwidth, in
    /// increasing order.
    pub fn int_signature(bitwidth: i64) -> Result<Self> {
        if bitwidth < 0 {
            return Err(Error::domain(
                "Signature",
                format!("Invalid bitwidth: {bitwidth}"),
            ));
        }
        if bitwidth > MAX_BITWIDTH {
            return Err(Error::domain(
                "Signature",
                format!("Bitwidth {bitwidth} exceeds the maximum of {MAX_BITWIDTH}"),
            ));
        }
        let n = 1i64 << bitwidth;
        // Bitwidth 0 yields the single atom `0`.
        let lo = -(n / 2);
        let atoms = (lo..lo + n).map(|i| Atom::new(i.to_string())).collect();
        Ok(Self::new(INT, atoms))
    }
}

/// Deep copy of this signature and its subtree. Siblings and ancestors are not involved.
impl Clone for Signature {
    fn clone(&self) -> Self {
        let sig = Self::new(self.id.clone(), self.atoms.clone());
        if let Some(children) = self.subsignatures.get() {
            sig.wire(
                children
                    .iter()
                    .map(|child| Rc::new(Signature::clone(child)))
                    .collect(),
            );
        }
        sig
    }
}

impl Relation for Signature {
    fn arity(&self) -> usize {
        1
    }

    fn tuples(&self) -> &[Tuple] {
        self.tuples.tuples()
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Signature", 3)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("atoms", &self.atoms)?;
        s.serialize_field("subsignatures", self.children())?;
        s.end()
    }
}
