//! Post-construction binding of parsed objects under script-safe names.
//!
//! A [`ViewProxy`] is handed every signature, atom, field and skolem of a fully built instance,
//! so a host (e.g. a script evaluator) can expose them through its own accessors. The parsed
//! model itself is never modified.

use crate::atom::Atom;
use crate::field::{Field, Skolem};
use crate::signature::Signature;
use indexmap::IndexMap;
use std::rc::Rc;

pub trait ViewProxy {
    fn bind_signature(&mut self, name: &str, signature: &Rc<Signature>);

    fn bind_atom(&mut self, name: &str, atom: &Atom);

    fn bind_field(&mut self, _name: &str, _field: &Rc<Field>) {}

    fn bind_skolem(&mut self, _name: &str, _skolem: &Rc<Skolem>) {}
}

/// Turns a model id into an identifier-safe name: `this/Node` -> `Node`, `seq/Int` -> `seq$Int`.
///
/// Only the first `/` and the first `-` are replaced.
pub fn var_name(id: &str) -> String {
    id.strip_prefix("this/")
        .unwrap_or(id)
        .replacen('/', "$", 1)
        .replacen('-', "$", 1)
}

#[derive(Debug, Clone)]
pub enum Binding {
    Signature(Rc<Signature>),
    Atom(Atom),
    Field(Rc<Field>),
    Skolem(Rc<Skolem>),
}

/// A [`ViewProxy`] that records bindings by name. Later bindings replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ScriptBindings {
    bindings: IndexMap<String, Binding>,
}

impl ScriptBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn signature(&self, name: &str) -> Option<&Rc<Signature>> {
        match self.bindings.get(name)? {
            Binding::Signature(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn atom(&self, name: &str) -> Option<&Atom> {
        match self.bindings.get(name)? {
            Binding::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Rc<Field>> {
        match self.bindings.get(name)? {
            Binding::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn skolem(&self, name: &str) -> Option<&Rc<Skolem>> {
        match self.bindings.get(name)? {
            Binding::Skolem(skolem) => Some(skolem),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl ViewProxy for ScriptBindings {
    fn bind_signature(&mut self, name: &str, signature: &Rc<Signature>) {
        self.bindings
            .insert(name.to_string(), Binding::Signature(Rc::clone(signature)));
    }

    fn bind_atom(&mut self, name: &str, atom: &Atom) {
        self.bindings
            .insert(name.to_string(), Binding::Atom(atom.clone()));
    }

    fn bind_field(&mut self, name: &str, field: &Rc<Field>) {
        self.bindings
            .insert(name.to_string(), Binding::Field(Rc::clone(field)));
    }

    fn bind_skolem(&mut self, name: &str, skolem: &Rc<Skolem>) {
        self.bindings
            .insert(name.to_string(), Binding::Skolem(Rc::clone(skolem)));
    }
}
