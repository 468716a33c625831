#![forbid(unsafe_code)]

//! Projection-aware graph identities and instance graphs for `sterling-core` models.
//!
//! Layout positions are not computed here; [`GraphsState`] only stores whatever layout type the
//! host's geometry engine produces, under the layout id of its projections.

pub mod config;
pub mod error;
pub mod graph;
pub mod projection;
pub mod state;

pub use config::GraphConfig;
pub use error::{Error, Result};
pub use graph::{GraphEdge, GraphNode, InstanceGraph, build_graph, resolve_projections};
pub use projection::{Projection, generate_graph_id, generate_layout_id};
pub use state::{DatumGraphs, DatumLayouts, GraphsState};

#[cfg(test)]
mod tests;
