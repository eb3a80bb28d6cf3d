//! JSON interchange for sessions.
//!
//! ```json
//! {
//!   "current": "source",
//!   "networks": [{
//!     "name": "source",
//!     "columns": { "gene": "String" },
//!     "viewport": { "centerX": 0.0, "centerY": 0.0, "scale": 1.0 },
//!     "nodes": [{ "id": "a", "x": 0.0, "y": 0.0, "row": { "name": "A", "gene": "x1" } }]
//!   }]
//! }
//! ```

use crate::error::{Error, Result};
use crate::graph::{Graph, ViewState, Viewport};
use crate::session::Session;
use crate::table::{ColumnType, Value};
use crate::SELECTED_COLUMN;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(default)]
    pub networks: Vec<NetworkDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub name: String,
    /// Column name to declared type name (`String`, `Integer`, `Long`, `Double`, `Boolean`).
    #[serde(default)]
    pub columns: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub nodes: Vec<NodeDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDocument {
    pub id: String,
    #[serde(flatten)]
    pub view: ViewState,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub row: IndexMap<String, serde_json::Value>,
}

impl SessionDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let s = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(s)
    }
}

impl NetworkDocument {
    pub fn into_graph(self) -> Result<Graph> {
        let mut graph = Graph::new(self.name);
        for (column, type_name) in self.columns {
            let ty = type_name
                .parse::<ColumnType>()
                .map_err(|_| Error::UnknownColumnType {
                    column: column.clone(),
                    type_name: type_name.clone(),
                })?;
            graph.table_mut().set_column(column, ty);
        }
        if let Some(viewport) = self.viewport {
            graph.viewport = viewport;
        }

        for node in self.nodes {
            let ix = graph.add_node(node.id.clone())?;
            let mut cells = Vec::with_capacity(node.row.len());
            let mut selected = node.selected;
            for (column, raw) in &node.row {
                // A `selected` cell is the selection flag itself, not table data.
                if column == SELECTED_COLUMN {
                    if let Value::Boolean(flag) =
                        Value::from_json(column, &node.id, ColumnType::Boolean, raw)?
                    {
                        selected |= flag;
                    }
                    continue;
                }
                // Undeclared cells default to String, mirroring how a table grows on import.
                let ty = match graph.table().column(column) {
                    Some(ty) => ty,
                    None => {
                        graph.table_mut().set_column(column.clone(), ColumnType::String);
                        ColumnType::String
                    }
                };
                cells.push((column.clone(), Value::from_json(column, &node.id, ty, raw)?));
            }
            let n = &mut graph[ix];
            for (column, value) in cells {
                n.set_value(column, value);
            }
            n.view = node.view;
            n.selected = selected;
        }
        Ok(graph)
    }

    pub fn from_graph(graph: &Graph) -> Self {
        let columns = graph
            .table()
            .columns()
            .map(|(name, ty)| (name.to_string(), ty.as_str().to_string()))
            .collect();
        let nodes = graph
            .nodes()
            .map(|n| NodeDocument {
                id: n.id().to_string(),
                view: n.view,
                selected: n.selected,
                row: graph
                    .table()
                    .columns()
                    .filter(|(name, _)| *name != SELECTED_COLUMN)
                    .filter(|(name, _)| !n.value(name).is_null())
                    .map(|(name, _)| (name.to_string(), n.value(name).to_json()))
                    .collect(),
            })
            .collect();
        Self {
            name: graph.name().to_string(),
            columns,
            viewport: Some(graph.viewport),
            nodes,
        }
    }
}

impl Session {
    pub fn from_document(doc: SessionDocument) -> Result<Self> {
        let mut session = Session::new();
        for network in doc.networks {
            session.add(network.into_graph()?)?;
        }
        if let Some(current) = doc.current.as_deref() {
            session.set_current(current);
        }
        Ok(session)
    }

    pub fn to_document(&self) -> SessionDocument {
        SessionDocument {
            current: self.current().map(|g| g.name().to_string()),
            networks: self.graphs().map(NetworkDocument::from_graph).collect(),
        }
    }
}
