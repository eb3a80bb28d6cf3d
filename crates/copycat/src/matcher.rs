use crate::cancel::CancellationToken;
use crate::index::KeyIndex;
use crate::key::{Key, KeyColumn};
use copycat_graph::{Graph, NodeIndex};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

pub type NodeSet = IndexSet<NodeIndex, FxBuildHasher>;

/// Outcome of matching a target network against a source [`KeyIndex`].
///
/// Every target node is either in exactly one pair or in `unmapped_target`. Every source node
/// that was not dropped as a duplicate key is either in at least one pair or in
/// `unmapped_source`; null-keyed source nodes always land in `unmapped_source`.
#[derive(Debug, Clone, Default)]
pub struct Matching {
    /// `(source, target)` pairs in target visiting order.
    pub pairs: Vec<(NodeIndex, NodeIndex)>,
    pub unmapped_source: NodeSet,
    pub unmapped_target: NodeSet,
}

impl Matching {
    pub fn mapped_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn matched_targets(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.pairs.iter().map(|&(_, t)| t)
    }
}

/// Walks `target` in native order and looks every key up in `index`.
///
/// Returns `None` when cancelled; the partial matching is discarded.
pub fn match_nodes(
    index: &KeyIndex,
    target: &Graph,
    column: &KeyColumn,
    cancel: &CancellationToken,
) -> Option<Matching> {
    let mut matching = Matching {
        pairs: Vec::with_capacity(target.node_count().min(index.len())),
        unmapped_source: index.nodes().chain(index.keyless_nodes()).collect(),
        unmapped_target: NodeSet::default(),
    };

    for (ix, node) in target.iter() {
        if cancel.is_cancelled() {
            return None;
        }
        let source = Key::from_value(node.value(column.name()), column.key_type())
            .and_then(|key| index.get(&key));
        match source {
            Some(source) => {
                matching.pairs.push((source, ix));
                matching.unmapped_source.shift_remove(&source);
            }
            None => {
                matching.unmapped_target.insert(ix);
            }
        }
    }

    Some(matching)
}
