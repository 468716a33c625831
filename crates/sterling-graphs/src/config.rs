use crate::projection::{Projection, generate_layout_id};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Graph generation settings, in the camelCase JSON shape hosts store them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
    pub projections: Vec<Projection>,
    /// Signature labels whose atoms (including subsignature atoms) are not drawn.
    pub hidden: Vec<String>,
    /// Draw `Int`, `seq/Int`, `String` and `univ` atoms only when a relation touches them.
    pub hide_builtins: bool,
    /// Drop nodes with no incident edge.
    pub hide_disconnected: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            projections: Vec::new(),
            hidden: Vec::new(),
            hide_builtins: true,
            hide_disconnected: false,
        }
    }
}

impl GraphConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projections.push(projection);
        self
    }

    pub fn layout_id(&self) -> String {
        generate_layout_id(&self.projections)
    }
}
