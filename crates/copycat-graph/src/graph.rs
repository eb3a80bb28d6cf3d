use crate::error::{Error, Result};
use crate::table::{NodeTable, Value};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

static NULL_VALUE: Value = Value::Null;

/// Identity of a network view.
///
/// Allocated once per [`Graph::new`]; clones of a graph share it, so two graphs with the same id
/// are the same view even when they live in different places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    fn next() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Position of a node inside its graph. Only meaningful for the graph that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Spatial state of a node view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl ViewState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Network-level camera: where the view is centered and how far it is zoomed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    #[serde(default)]
    pub center_x: f64,
    #[serde(default)]
    pub center_y: f64,
    #[serde(default)]
    pub center_z: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            center_z: 0.0,
            scale: default_scale(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    row: FxHashMap<String, Value>,
    pub view: ViewState,
    pub selected: bool,
}

impl Node {
    fn new(id: String) -> Self {
        Self {
            id,
            row: FxHashMap::default(),
            view: ViewState::default(),
            selected: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Row cell for `column`; absent cells read as [`Value::Null`].
    pub fn value(&self, column: &str) -> &Value {
        self.row.get(column).unwrap_or(&NULL_VALUE)
    }

    pub fn set_value(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        let column = column.into();
        if value.is_null() {
            self.row.remove(&column);
        } else {
            self.row.insert(column, value);
        }
        self
    }

    pub fn row(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.row.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn set_view(&mut self, view: ViewState) -> &mut Self {
        self.view = view;
        self
    }
}

/// A network view: ordered nodes, their shared default node table and the viewport.
#[derive(Debug, Clone)]
pub struct Graph {
    id: GraphId,
    name: String,
    table: NodeTable,
    nodes: Vec<Node>,
    node_index: FxHashMap<String, NodeIndex>,
    pub viewport: Viewport,
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GraphId::next(),
            name: name.into(),
            table: NodeTable::default(),
            nodes: Vec::new(),
            node_index: FxHashMap::default(),
            viewport: Viewport::default(),
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut NodeTable {
        &mut self.table
    }

    /// Adds a node with an empty row at the origin.
    pub fn add_node(&mut self, id: impl Into<String>) -> Result<NodeIndex> {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return Err(Error::DuplicateNode {
                network: self.name.clone(),
                node_id: id,
            });
        }
        let ix = NodeIndex(self.nodes.len());
        self.node_index.insert(id.clone(), ix);
        self.nodes.push(Node::new(id));
        Ok(ix)
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub fn node(&self, ix: NodeIndex) -> Option<&Node> {
        self.nodes.get(ix.0)
    }

    pub fn node_mut(&mut self, ix: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(ix.0)
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.node_index(id).and_then(|ix| self.node(ix))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in native (insertion) order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }
}

impl Index<NodeIndex> for Graph {
    type Output = Node;

    fn index(&self, ix: NodeIndex) -> &Node {
        &self.nodes[ix.0]
    }
}

impl IndexMut<NodeIndex> for Graph {
    fn index_mut(&mut self, ix: NodeIndex) -> &mut Node {
        &mut self.nodes[ix.0]
    }
}
