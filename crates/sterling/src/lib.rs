#![forbid(unsafe_code)]

//! `sterling` is a headless model of Alloy/Forge instances.
//!
//! It parses the XML instance documents written by the Alloy Analyzer and Forge into a typed
//! signature forest with fields and skolems, and (optionally) derives the projection-aware
//! graph ids a visualizer caches graphs and layouts under.
//!
//! # Features
//!
//! - `graphs`: enable instance graphs and projection ids (`sterling::graphs`)

pub use sterling_core::*;

#[cfg(feature = "graphs")]
pub mod graphs {
    pub use sterling_graphs::{
        DatumGraphs, DatumLayouts, GraphConfig, GraphEdge, GraphNode, GraphsState,
        InstanceGraph, Projection, build_graph, generate_graph_id, generate_layout_id,
        resolve_projections,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] sterling_core::Error),
        #[error(transparent)]
        Graph(#[from] sterling_graphs::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Synchronous helper: parses `text` and builds one graph per instance, in document order.
    ///
    /// Instance `i` of a trace gets index `i`, so unprojected graphs are told apart by index.
    pub fn graphs_from_xml(
        text: &str,
        parse_options: sterling_core::ParseOptions,
        config: &GraphConfig,
    ) -> Result<Vec<InstanceGraph>> {
        let document = sterling_core::parse_document(text, parse_options)?;
        let graphs = document
            .instances()
            .iter()
            .enumerate()
            .map(|(index, instance)| build_graph(instance, index, config))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(graphs)
    }

    /// Like [`graphs_from_xml`], but takes the graph config as JSON.
    pub fn graphs_from_xml_json(
        text: &str,
        parse_options: sterling_core::ParseOptions,
        config_json: &str,
    ) -> Result<Vec<InstanceGraph>> {
        let config = GraphConfig::from_json(config_json)?;
        graphs_from_xml(text, parse_options, &config)
    }
}
