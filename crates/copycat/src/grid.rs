//! Grid placement for unmapped nodes.
//!
//! Unmapped target nodes are first moved onto a common anchor beside the matched cluster
//! ([`anchor`], [`translate_to`]) and then spread out row-major around their (now shared)
//! centroid by [`layout`].

use crate::cancel::CancellationToken;
use crate::options::GridSpacing;
use copycat_graph::{Graph, NodeIndex};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// Number of grid columns for `n` nodes: `floor(sqrt(n))`, at least 1.
pub fn columns(n: usize) -> usize {
    ((n as f64).sqrt().floor() as usize).max(1)
}

/// Anchor for the unmapped grid: right of the right-most and level with the top-most matched
/// node. With no matched node both extremes read as `0.0`.
pub fn anchor(graph: &Graph, matched: impl IntoIterator<Item = NodeIndex>, offset: f64) -> Anchor {
    let mut extremes: Option<(f64, f64)> = None;
    for ix in matched {
        let v = graph[ix].view;
        extremes = Some(match extremes {
            None => (v.x, v.y),
            Some((max_x, min_y)) => (max_x.max(v.x), min_y.min(v.y)),
        });
    }
    let (max_x, min_y) = extremes.unwrap_or((0.0, 0.0));
    Anchor {
        x: max_x + offset,
        y: min_y,
    }
}

/// Moves every node in `nodes` onto `anchor` (z untouched). Returns `false` if cancelled.
pub fn translate_to(
    graph: &mut Graph,
    nodes: &[NodeIndex],
    anchor: Anchor,
    cancel: &CancellationToken,
) -> bool {
    for &ix in nodes {
        if cancel.is_cancelled() {
            return false;
        }
        let view = &mut graph[ix].view;
        view.x = anchor.x;
        view.y = anchor.y;
    }
    true
}

/// Lays `nodes` out row-major in a square-ish grid centered on their current centroid.
///
/// `nodes` must not be empty. Returns `false` if cancelled; nodes already placed stay placed.
pub fn layout(
    graph: &mut Graph,
    nodes: &[NodeIndex],
    spacing: GridSpacing,
    cancel: &CancellationToken,
) -> bool {
    debug_assert!(!nodes.is_empty());
    let count = nodes.len() as f64;
    let columns = columns(nodes.len());

    let (sum_x, sum_y) = nodes.iter().fold((0.0, 0.0), |(sx, sy), &ix| {
        let v = graph[ix].view;
        (sx + v.x, sy + v.y)
    });
    let (center_x, center_y) = (sum_x / count, sum_y / count);

    let span = (columns - 1) as f64 / 2.0;
    let origin_x = center_x - spacing.horizontal * span;
    let origin_y = center_y - spacing.vertical * span;

    let (mut x, mut y) = (origin_x, origin_y);
    let mut col = 0;
    for &ix in nodes {
        if cancel.is_cancelled() {
            return false;
        }
        let view = &mut graph[ix].view;
        view.x = x;
        view.y = y;

        col += 1;
        if col == columns {
            col = 0;
            x = origin_x;
            y += spacing.vertical;
        } else {
            x += spacing.horizontal;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_is_floor_sqrt() {
        let got: Vec<usize> = [1, 2, 3, 4, 5, 8, 9, 10, 15, 16, 17]
            .into_iter()
            .map(columns)
            .collect();
        assert_eq!(got, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4]);
    }

    #[test]
    fn anchor_defaults_to_offset_from_origin_without_matches() {
        let g = Graph::new("g");
        assert_eq!(anchor(&g, std::iter::empty(), 200.0), Anchor { x: 200.0, y: 0.0 });
    }
}
