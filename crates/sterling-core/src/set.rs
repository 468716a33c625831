use crate::atom::Atom;
use crate::tuple::Tuple;
use crate::{Error, Result};
use serde::Serialize;

/// Read contract shared by signatures, fields and skolems.
pub trait Relation {
    fn arity(&self) -> usize;

    fn tuples(&self) -> &[Tuple];

    /// Structural membership: compares atom ids, never identity.
    fn has_tuple(&self, tuple: &Tuple) -> bool {
        tuple.arity() == self.arity() && self.tuples().iter().any(|t| t == tuple)
    }

    /// Membership test for a tuple given as atom ids.
    fn has_tuple_ids(&self, ids: &[&str]) -> bool {
        ids.len() == self.arity()
            && self
                .tuples()
                .iter()
                .any(|t| t.atoms().iter().map(Atom::id).eq(ids.iter().copied()))
    }
}

/// An unordered collection of tuples of one fixed arity.
///
/// `Clone` is deep: every atom is re-allocated and tuples are rebuilt around the copies, with
/// arity and multiplicity preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationSet {
    arity: usize,
    tuples: Vec<Tuple>,
}

impl RelationSet {
    pub fn new(arity: usize) -> Self {
        Self {
            arity,
            tuples: Vec::new(),
        }
    }

    pub fn with_tuples(arity: usize, tuples: Vec<Tuple>) -> Result<Self> {
        let mut set = Self::new(arity);
        for tuple in tuples {
            set.insert(tuple)?;
        }
        Ok(set)
    }

    pub(crate) fn unary(atoms: &[Atom]) -> Self {
        Self {
            arity: 1,
            tuples: atoms.iter().cloned().map(Tuple::unary).collect(),
        }
    }

    pub fn insert(&mut self, tuple: Tuple) -> Result<()> {
        if tuple.arity() != self.arity {
            return Err(Error::domain(
                "RelationSet",
                format!(
                    "tuple {} has arity {}, expected {}",
                    tuple.to_arrow_string(),
                    tuple.arity(),
                    self.arity
                ),
            ));
        }
        self.tuples.push(tuple);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}

impl Relation for RelationSet {
    fn arity(&self) -> usize {
        self.arity
    }

    fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }
}
