#![forbid(unsafe_code)]

//! Alloy/Forge instance parser + signature model (headless).
//!
//! An instance document is parsed into a forest of [`Signature`]s keyed by document `ID`,
//! plus the fields and skolems typed against that forest. Parsing is all-or-nothing: a
//! malformed document yields an [`Error`] and no partial model.

pub mod atom;
pub mod builder;
pub mod document;
pub mod error;
pub mod field;
pub mod instance;
pub mod proxy;
pub mod set;
pub mod signature;
pub mod tuple;
mod xml;

pub use atom::Atom;
pub use builder::{FieldTypes, SignatureMap, resolve_parent, signatures_from_xml, types_from_xml};
pub use document::{Document, parse_document, parse_document_with_proxy};
pub use error::{Error, Result};
pub use field::{Field, Skolem};
pub use instance::Instance;
pub use proxy::{Binding, ScriptBindings, ViewProxy, var_name};
pub use set::{Relation, RelationSet};
pub use signature::Signature;
pub use tuple::Tuple;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Reject field and skolem tuples whose atoms are not instances of their column types.
    pub check_tuple_types: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::strict()
    }
}

impl ParseOptions {
    /// Strict parsing: tuple atoms are checked against their column types.
    pub fn strict() -> Self {
        Self {
            check_tuple_types: true,
        }
    }

    /// Lenient parsing: tuples are taken as written.
    pub fn lenient() -> Self {
        Self {
            check_tuple_types: false,
        }
    }
}

#[cfg(test)]
mod tests;
