//! Node/edge view of one instance under a set of projections.
//!
//! Atoms become nodes and relation tuples become edges. A projected signature contributes no
//! nodes: every tuple column holding one of its atoms is removed, and the tuple survives only
//! when that atom is the one chosen by every projection covering it.

use crate::config::GraphConfig;
use crate::projection::{Projection, generate_graph_id};
use crate::{Error, Result};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use sterling_core::{Instance, Relation, Signature};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    /// Label of the most specific signature holding the atom.
    pub signature: String,
    /// Unary relations (after projection) the atom belongs to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub relation: String,
    /// `relation`, or `relation[a, b]` when inner columns remain.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceGraph {
    pub id: String,
    pub projections: Vec<Projection>,
    pub nodes: IndexMap<String, GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl InstanceGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn edges_of<'a>(
        &'a self,
        relation: &'a str,
    ) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.relation == relation)
    }
}

struct Resolved {
    members: FxHashSet<String>,
    chosen: Option<String>,
}

/// Fills in the atom of every projection, defaulting to the first atom of its signature.
pub fn resolve_projections(
    instance: &Instance,
    projections: &[Projection],
) -> Result<Vec<Projection>> {
    projections
        .iter()
        .map(|p| {
            let sig = instance
                .signature(&p.type_name)
                .ok_or_else(|| Error::UnknownProjectionType {
                    type_name: p.type_name.clone(),
                })?;
            let atom = match &p.atom {
                Some(atom) => {
                    if sig.atom(atom).is_none() {
                        return Err(Error::UnknownProjectionAtom {
                            type_name: p.type_name.clone(),
                            atom: atom.clone(),
                        });
                    }
                    Some(atom.clone())
                }
                None => sig.atoms(true).first().map(|a| a.id().to_string()),
            };
            Ok(Projection {
                atom,
                ..p.clone()
            })
        })
        .collect()
}

/// Builds the graph of `instance` (the `index`-th of its datum) under `config`.
pub fn build_graph(
    instance: &Instance,
    index: usize,
    config: &GraphConfig,
) -> Result<InstanceGraph> {
    let projections = resolve_projections(instance, &config.projections)?;
    let resolved: Vec<Resolved> = projections
        .iter()
        .map(|p| {
            let members: FxHashSet<String> = instance
                .signature(&p.type_name)
                .map(|sig| sig.atoms(true).iter().map(|a| a.id().to_string()).collect())
                .unwrap_or_default();
            Resolved {
                members,
                chosen: p.atom.clone(),
            }
        })
        .collect();

    let mut owners: FxHashMap<&str, &Signature> = FxHashMap::default();
    for root in instance.roots() {
        collect_owners(root, &mut owners);
    }

    let hidden: FxHashSet<&str> = config
        .hidden
        .iter()
        .filter_map(|label| instance.signature(label))
        .flat_map(|sig| sig.atoms(true))
        .map(|a| a.id())
        .collect();
    let projected = |id: &str| resolved.iter().any(|p| p.members.contains(id));

    let mut nodes: IndexMap<String, GraphNode> = IndexMap::new();
    for atom in instance.atoms() {
        let id = atom.id();
        let Some(owner) = owners.get(id) else {
            continue;
        };
        let builtin_hidden = config.hide_builtins && owner.is_builtin();
        if projected(id) || hidden.contains(id) || builtin_hidden {
            continue;
        }
        nodes.insert(id.to_string(), new_node(id, owner));
    }

    let relations = instance
        .fields()
        .map(|f| (f.id(), f.tuples()))
        .chain(instance.skolems().map(|s| (s.id(), s.tuples())));

    let mut edges = Vec::new();
    for (name, tuples) in relations {
        'tuples: for tuple in tuples {
            let mut kept: Vec<&str> = Vec::with_capacity(tuple.arity());
            for atom in tuple.atoms() {
                let id = atom.id();
                let mut covering = resolved.iter().filter(|p| p.members.contains(id)).peekable();
                if covering.peek().is_none() {
                    kept.push(id);
                } else if covering.any(|p| p.chosen.as_deref() != Some(id)) {
                    // Overlapping projections must all have chosen this atom.
                    continue 'tuples;
                }
            }
            if kept.iter().any(|id| hidden.contains(id)) {
                continue;
            }

            for id in &kept {
                if !nodes.contains_key(*id) {
                    if let Some(owner) = owners.get(id) {
                        nodes.insert(id.to_string(), new_node(id, owner));
                    }
                }
            }

            match kept.as_slice() {
                [] => {}
                [only] => {
                    if let Some(node) = nodes.get_mut(*only) {
                        node.labels.push(name.to_string());
                    }
                }
                [source, middle @ .., target] => {
                    let label = if middle.is_empty() {
                        name.to_string()
                    } else {
                        format!("{name}[{}]", middle.join(", "))
                    };
                    edges.push(GraphEdge {
                        source: source.to_string(),
                        target: target.to_string(),
                        relation: name.to_string(),
                        label,
                    });
                }
            }
        }
    }

    if config.hide_disconnected {
        let connected: FxHashSet<&str> = edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        nodes.retain(|id, _| connected.contains(id.as_str()));
    }

    let id = generate_graph_id(index, &projections);
    tracing::debug!(
        graph = %id,
        nodes = nodes.len(),
        edges = edges.len(),
        "built instance graph"
    );
    Ok(InstanceGraph {
        id,
        projections,
        nodes,
        edges,
    })
}

fn new_node(id: &str, owner: &Signature) -> GraphNode {
    GraphNode {
        id: id.to_string(),
        signature: owner.id().to_string(),
        labels: Vec::new(),
    }
}

/// Depth-first, so deeper signatures overwrite their ancestors.
fn collect_owners<'a>(sig: &'a Signature, owners: &mut FxHashMap<&'a str, &'a Signature>) {
    for atom in sig.own_atoms() {
        owners.insert(atom.id(), sig);
    }
    for child in sig.children() {
        collect_owners(child, owners);
    }
}
