use crate::atom::Atom;
use crate::xml::children_named;
use crate::{Error, Result};
use serde::Serialize;

/// An ordered, non-empty sequence of atoms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tuple {
    atoms: Vec<Atom>,
}

impl Tuple {
    pub fn new(atoms: Vec<Atom>) -> Result<Self> {
        if atoms.is_empty() {
            return Err(Error::domain("Tuple", "a tuple needs at least one atom"));
        }
        Ok(Self { atoms })
    }

    pub(crate) fn unary(atom: Atom) -> Self {
        Self { atoms: vec![atom] }
    }

    pub fn arity(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, column: usize) -> Option<&Atom> {
        self.atoms.get(column)
    }

    /// Atom ids joined with `->`, Alloy's arrow notation.
    pub fn to_arrow_string(&self) -> String {
        self.atoms
            .iter()
            .map(Atom::id)
            .collect::<Vec<_>>()
            .join("->")
    }

    /// Reads a `<tuple>` element and its `<atom>` children.
    pub fn from_element(element: roxmltree::Node<'_, '_>) -> Result<Self> {
        let atoms = children_named(element, "atom")
            .map(Atom::from_element)
            .collect::<Result<Vec<_>>>()?;
        Self::new(atoms)
    }
}
