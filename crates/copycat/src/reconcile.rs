use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::grid;
use crate::index::KeyIndex;
use crate::key::{KeyColumn, NetworkRole};
use crate::matcher::{Matching, NodeSet, match_nodes};
use crate::options::ReconcileOptions;
use crate::placement::{copy_placement, copy_viewport};
use crate::provider::GraphProvider;
use copycat_graph::{ColumnType, Graph, GraphId, NodeIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts reported for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    mapped_node_count: usize,
    unmapped_node_count: usize,
}

impl MatchResult {
    pub fn new(mapped_node_count: usize, unmapped_node_count: usize) -> Self {
        Self {
            mapped_node_count,
            unmapped_node_count,
        }
    }

    /// Target nodes that received a source placement.
    pub fn mapped_count(&self) -> usize {
        self.mapped_node_count
    }

    /// Target nodes left without a counterpart.
    pub fn unmapped_count(&self) -> usize {
        self.unmapped_node_count
    }
}

/// A run that could not proceed for a user-correctable reason. Nothing was mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SameNetwork,
    ColumnTypeMismatch {
        source: ColumnType,
        target: ColumnType,
    },
}

impl Rejection {
    pub fn title(&self) -> &'static str {
        match self {
            Self::SameNetwork => "Invalid Network Views",
            Self::ColumnTypeMismatch { .. } => "Invalid Column Types",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::SameNetwork => "Source and target network must be different".to_string(),
            Self::ColumnTypeMismatch { source, target } => format!(
                "Source and target column must be the same type (source is {source}, target is {target})"
            ),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed(MatchResult),
    Rejected(Rejection),
    /// Stopped on request; mutations applied before the stop are kept.
    Cancelled,
}

impl Outcome {
    pub fn result(&self) -> Option<MatchResult> {
        match self {
            Self::Completed(r) => Some(*r),
            _ => None,
        }
    }
}

/// Parameters of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub source_network: String,
    pub source_column: String,
    pub target_network: String,
    pub target_column: String,
    #[serde(default)]
    pub options: ReconcileOptions,
}

/// Resolves both networks through `provider` and reconciles them.
///
/// Fails with [`Error::NetworkNotFound`] or [`Error::InvalidColumn`] before touching anything.
/// Picking the same view twice, or key columns of different types, is a
/// [`Outcome::Rejected`] run.
pub fn run<P>(provider: &mut P, request: &Request, cancel: &CancellationToken) -> Result<Outcome>
where
    P: GraphProvider + ?Sized,
{
    let target_id = resolve(provider, &request.target_network, NetworkRole::Target)?;
    let source_id = resolve(provider, &request.source_network, NetworkRole::Source)?;
    if source_id == target_id {
        return Ok(reject(Rejection::SameNetwork));
    }

    let (source, target) = provider
        .graph_pair_mut(source_id, target_id)
        .ok_or_else(|| Error::NetworkNotFound {
            role: NetworkRole::Source,
            name: request.source_network.clone(),
        })?;

    reconcile(
        source,
        &request.source_column,
        target,
        &request.target_column,
        &request.options,
        cancel,
    )
}

fn resolve<P>(provider: &P, name: &str, role: NetworkRole) -> Result<GraphId>
where
    P: GraphProvider + ?Sized,
{
    provider.resolve_by_name(name).ok_or_else(|| {
        tracing::error!(network = name, "{role} network not found");
        Error::NetworkNotFound {
            role,
            name: name.to_string(),
        }
    })
}

fn reject(rejection: Rejection) -> Outcome {
    tracing::warn!(title = rejection.title(), "{}", rejection.message());
    Outcome::Rejected(rejection)
}

/// Copies placement from `source` onto `target` for every node pair sharing a key.
pub fn reconcile(
    source: &mut Graph,
    source_column: &str,
    target: &mut Graph,
    target_column: &str,
    options: &ReconcileOptions,
    cancel: &CancellationToken,
) -> Result<Outcome> {
    options.validate()?;
    if source.id() == target.id() {
        return Ok(reject(Rejection::SameNetwork));
    }

    let source_key = resolve_column(source, source_column, NetworkRole::Source)?;
    let target_key = resolve_column(target, target_column, NetworkRole::Target)?;
    if source_key.key_type() != target_key.key_type() {
        return Ok(reject(Rejection::ColumnTypeMismatch {
            source: source_key.column_type(),
            target: target_key.column_type(),
        }));
    }

    let _span = tracing::info_span!(
        "reconcile",
        source = source.name(),
        target = target.name(),
        source_column,
        target_column
    )
    .entered();

    let (index, duplicates_found) = KeyIndex::build_for(source, &source_key);
    if duplicates_found {
        tracing::warn!(
            duplicates = index.duplicate_count(),
            "source key column is not unique; the last node per key wins"
        );
    }

    let Some(matching) = match_nodes(&index, target, &target_key, cancel) else {
        return Ok(cancelled());
    };

    if !apply_matching(source, target, &matching, options, cancel) {
        return Ok(cancelled());
    }

    let result = MatchResult::new(matching.mapped_count(), matching.unmapped_target.len());
    tracing::info!(
        mapped = result.mapped_count(),
        unmapped = result.unmapped_count(),
        unmapped_source = matching.unmapped_source.len(),
        "placement copied"
    );
    Ok(Outcome::Completed(result))
}

/// Copies placement for every pair, then runs the optional selection, grid and viewport steps.
///
/// Returns `false` once cancellation is seen. Steps already applied stay applied.
fn apply_matching(
    source: &mut Graph,
    target: &mut Graph,
    matching: &Matching,
    options: &ReconcileOptions,
    cancel: &CancellationToken,
) -> bool {
    for &(s, t) in &matching.pairs {
        copy_placement(&source[s], &mut target[t]);
    }

    if options.select_unmapped && !select_unmapped(source, target, matching, cancel) {
        return false;
    }

    if options.grid_unmapped
        && !matching.unmapped_target.is_empty()
        && !grid_unmapped(target, matching, options, cancel)
    {
        return false;
    }

    if options.copy_viewport {
        copy_viewport(source, target);
    }
    true
}

fn resolve_column(graph: &Graph, column: &str, role: NetworkRole) -> Result<KeyColumn> {
    KeyColumn::resolve(graph, column, role).inspect_err(|err| {
        tracing::error!(network = graph.name(), "{err}");
    })
}

fn cancelled() -> Outcome {
    tracing::info!("reconciliation cancelled");
    Outcome::Cancelled
}

/// Clears the selection on both networks, then selects every unmapped node.
fn select_unmapped(
    source: &mut Graph,
    target: &mut Graph,
    matching: &Matching,
    cancel: &CancellationToken,
) -> bool {
    clear_selection(source, cancel)
        && clear_selection(target, cancel)
        && select(source, &matching.unmapped_source, cancel)
        && select(target, &matching.unmapped_target, cancel)
}

fn clear_selection(graph: &mut Graph, cancel: &CancellationToken) -> bool {
    for node in graph.nodes_mut() {
        if cancel.is_cancelled() {
            return false;
        }
        node.selected = false;
    }
    true
}

fn select(graph: &mut Graph, nodes: &NodeSet, cancel: &CancellationToken) -> bool {
    for &ix in nodes {
        if cancel.is_cancelled() {
            return false;
        }
        graph[ix].selected = true;
    }
    true
}

fn grid_unmapped(
    target: &mut Graph,
    matching: &Matching,
    options: &ReconcileOptions,
    cancel: &CancellationToken,
) -> bool {
    let anchor = grid::anchor(target, matching.matched_targets(), options.anchor_offset);
    tracing::debug!(
        x = anchor.x,
        y = anchor.y,
        nodes = matching.unmapped_target.len(),
        "placing unmapped nodes in a grid"
    );
    let unmapped: Vec<NodeIndex> = matching.unmapped_target.iter().copied().collect();
    grid::translate_to(target, &unmapped, anchor, cancel)
        && grid::layout(target, &unmapped, options.grid, cancel)
}
