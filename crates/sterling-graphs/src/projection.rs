//! Projections and the canonical ids derived from them.
//!
//! Graphs and layouts are cached under these ids, so the same projection set must map to the
//! same id no matter the order it was supplied in.

use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};

/// A dimension collapse: fix signature `type` to one atom, or (when `time`) to one time step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub time: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atom: Option<String>,
}

impl Projection {
    pub fn atom_projection(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            time: false,
            atom: None,
        }
    }

    pub fn time_projection(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            time: true,
            atom: None,
        }
    }

    pub fn with_atom(mut self, atom: impl Into<String>) -> Self {
        self.atom = Some(atom.into());
        self
    }
}

/// Time projections first, then by type name; the atom breaks remaining ties.
///
/// Names compare the way a browser's default `localeCompare` orders ASCII identifiers, so ids
/// agree with the ones a web front end derives for the same projections.
fn canonical_cmp(a: &Projection, b: &Projection) -> Ordering {
    Reverse(a.time)
        .cmp(&Reverse(b.time))
        .then_with(|| collate(&a.type_name, &b.type_name))
        .then_with(|| match (&a.atom, &b.atom) {
            (Some(x), Some(y)) => collate(x, y),
            (x, y) => x.cmp(y),
        })
}

/// Case-insensitive first (punctuation < digits < letters), then lowercase before uppercase,
/// then code points.
fn collate(a: &str, b: &str) -> Ordering {
    fn primary(c: char) -> (u8, char) {
        let class = if c.is_alphabetic() {
            2
        } else if c.is_numeric() {
            1
        } else {
            0
        };
        (class, c.to_lowercase().next().unwrap_or(c))
    }
    a.chars()
        .map(primary)
        .cmp(b.chars().map(primary))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

fn sorted(projections: &[Projection]) -> Vec<&Projection> {
    let mut out: Vec<&Projection> = projections.iter().collect();
    out.sort_by(|a, b| canonical_cmp(a, b));
    out
}

/// Identifies a layout: which signatures are projected, and how.
///
/// `[]` -> `"|"`; `[(A), [B]]` -> `"[B]|(A)"`.
pub fn generate_layout_id(projections: &[Projection]) -> String {
    if projections.is_empty() {
        return "|".to_string();
    }
    sorted(projections)
        .into_iter()
        .map(|p| {
            if p.time {
                format!("[{}]", p.type_name)
            } else {
                format!("({})", p.type_name)
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Identifies one graph: the projections plus the atom chosen for each. Without projections,
/// graphs are told apart by their index alone.
pub fn generate_graph_id(index: usize, projections: &[Projection]) -> String {
    if projections.is_empty() {
        return index.to_string();
    }
    sorted(projections)
        .into_iter()
        .map(|p| {
            let atom = p.atom.as_deref().unwrap_or_default();
            if p.time {
                format!("[{}:{atom}]", p.type_name)
            } else {
                format!("({}:{atom})", p.type_name)
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}
