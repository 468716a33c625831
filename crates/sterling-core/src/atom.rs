use crate::xml::attr;
use crate::{Error, Result};
use serde::Serialize;

/// An opaque, named individual of an instance.
///
/// Cloning an atom allocates a fresh id string; two atoms are equal when their ids are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Atom {
    id: String,
}

impl Atom {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Reads an `<atom label="..">` element.
    pub fn from_element(element: roxmltree::Node<'_, '_>) -> Result<Self> {
        let label = attr(element, "label").ok_or(Error::missing_attribute("Atom", "label"))?;
        Ok(Self::new(label))
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}
