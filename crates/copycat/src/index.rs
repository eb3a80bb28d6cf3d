use crate::error::Result;
use crate::key::{Key, KeyColumn, NetworkRole};
use copycat_graph::{Graph, NodeIndex};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Key value to node lookup for one network, built fresh for every run.
///
/// Keys are unique: when two nodes share a key the one visited last wins and the collision is
/// logged. Nodes without a key (null cell) are kept aside: they never match but still count as
/// unmapped.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    map: IndexMap<Key, NodeIndex, FxBuildHasher>,
    duplicates: usize,
    keyless: Vec<NodeIndex>,
}

impl KeyIndex {
    /// Resolves `column` on `graph` and indexes it.
    ///
    /// Returns the index and whether any duplicate key was seen.
    pub fn build(graph: &Graph, column: &str) -> Result<(Self, bool)> {
        let column = KeyColumn::resolve(graph, column, NetworkRole::Source)?;
        Ok(Self::build_for(graph, &column))
    }

    /// Indexes an already validated key column.
    pub fn build_for(graph: &Graph, column: &KeyColumn) -> (Self, bool) {
        let mut index = Self {
            map: IndexMap::with_capacity_and_hasher(graph.node_count(), FxBuildHasher),
            duplicates: 0,
            keyless: Vec::new(),
        };

        for (ix, node) in graph.iter() {
            let Some(key) = Key::from_value(node.value(column.name()), column.key_type()) else {
                index.keyless.push(ix);
                continue;
            };
            if let Some(previous) = index.map.insert(key, ix) {
                index.duplicates += 1;
                tracing::warn!(
                    network = graph.name(),
                    column = column.name(),
                    kept = node.id(),
                    dropped = graph[previous].id(),
                    "duplicate key in source"
                );
            }
        }

        if !index.keyless.is_empty() {
            tracing::debug!(
                network = graph.name(),
                column = column.name(),
                keyless = index.keyless.len(),
                "nodes without a key value are excluded from matching"
            );
        }

        let duplicates_found = index.duplicates > 0;
        (index, duplicates_found)
    }

    pub fn get(&self, key: &Key) -> Option<NodeIndex> {
        self.map.get(key).copied()
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Indexed nodes, in order of first key insertion.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.map.values().copied()
    }

    /// Number of insertions that overwrote an existing key.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }

    /// Nodes left out of the map because their key cell was null, in graph order.
    pub fn keyless_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.keyless.iter().copied()
    }

    pub fn keyless_count(&self) -> usize {
        self.keyless.len()
    }
}
