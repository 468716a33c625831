//! Per-datum caches of graphs and layouts, keyed by projection-derived ids.

use crate::Result;
use crate::config::GraphConfig;
use crate::graph::{InstanceGraph, build_graph, resolve_projections};
use crate::projection::{Projection, generate_graph_id, generate_layout_id};
use indexmap::IndexMap;
use indexmap::map::Entry;
use sterling_core::Instance;

#[derive(Debug, Clone)]
pub struct DatumGraphs {
    pub datum_id: String,
    pub graphs_by_id: IndexMap<String, InstanceGraph>,
}

/// `L` is whatever geometry the external layout engine produces.
#[derive(Debug, Clone)]
pub struct DatumLayouts<L> {
    pub datum_id: String,
    pub layout_by_id: IndexMap<String, L>,
}

#[derive(Debug, Clone)]
pub struct GraphsState<L> {
    graphs_by_datum_id: IndexMap<String, DatumGraphs>,
    layouts_by_datum_id: IndexMap<String, DatumLayouts<L>>,
}

impl<L> Default for GraphsState<L> {
    fn default() -> Self {
        Self {
            graphs_by_datum_id: IndexMap::new(),
            layouts_by_datum_id: IndexMap::new(),
        }
    }
}

impl<L> GraphsState<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self, datum_id: &str, graph_id: &str) -> Option<&InstanceGraph> {
        self.graphs_by_datum_id
            .get(datum_id)?
            .graphs_by_id
            .get(graph_id)
    }

    pub fn graphs(&self, datum_id: &str) -> Option<&DatumGraphs> {
        self.graphs_by_datum_id.get(datum_id)
    }

    /// Stores `graph` under its own id, replacing any graph with that id.
    pub fn insert_graph(&mut self, datum_id: &str, graph: InstanceGraph) -> Option<InstanceGraph> {
        self.datum_graphs_mut(datum_id)
            .graphs_by_id
            .insert(graph.id.clone(), graph)
    }

    /// Returns the graph of `instance` under `config`, building and caching it on a miss.
    ///
    /// Projections are resolved first, so the cache key is the id the built graph carries: a
    /// projection with no atom and one naming the default atom hit the same entry, in any
    /// order. A failed build caches nothing.
    pub fn graph_or_build(
        &mut self,
        datum_id: &str,
        instance: &Instance,
        index: usize,
        config: &GraphConfig,
    ) -> Result<&InstanceGraph> {
        let resolved = resolve_projections(instance, &config.projections)?;
        let key = generate_graph_id(index, &resolved);
        match self.datum_graphs_mut(datum_id).graphs_by_id.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                tracing::debug!(datum = %datum_id, graph = %entry.key(), "graph cache miss");
                let resolved_config = GraphConfig {
                    projections: resolved,
                    ..config.clone()
                };
                Ok(entry.insert(build_graph(instance, index, &resolved_config)?))
            }
        }
    }

    pub fn layout(&self, datum_id: &str, projections: &[Projection]) -> Option<&L> {
        self.layouts_by_datum_id
            .get(datum_id)?
            .layout_by_id
            .get(&generate_layout_id(projections))
    }

    pub fn set_layout(
        &mut self,
        datum_id: &str,
        projections: &[Projection],
        layout: L,
    ) -> Option<L> {
        self.layouts_by_datum_id
            .entry(datum_id.to_string())
            .or_insert_with(|| DatumLayouts {
                datum_id: datum_id.to_string(),
                layout_by_id: IndexMap::new(),
            })
            .layout_by_id
            .insert(generate_layout_id(projections), layout)
    }

    /// Drops every graph and layout of a datum. Returns whether anything was cached.
    pub fn remove_datum(&mut self, datum_id: &str) -> bool {
        let graphs = self.graphs_by_datum_id.shift_remove(datum_id).is_some();
        let layouts = self.layouts_by_datum_id.shift_remove(datum_id).is_some();
        graphs || layouts
    }

    pub fn datum_ids(&self) -> impl Iterator<Item = &str> {
        let mut seen: Vec<&str> = self.graphs_by_datum_id.keys().map(String::as_str).collect();
        for id in self.layouts_by_datum_id.keys() {
            if !seen.contains(&id.as_str()) {
                seen.push(id.as_str());
            }
        }
        seen.into_iter()
    }

    fn datum_graphs_mut(&mut self, datum_id: &str) -> &mut DatumGraphs {
        self.graphs_by_datum_id
            .entry(datum_id.to_string())
            .or_insert_with(|| DatumGraphs {
                datum_id: datum_id.to_string(),
                graphs_by_id: IndexMap::new(),
            })
    }
}
