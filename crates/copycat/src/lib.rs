#![forbid(unsafe_code)]

//! Copy node placement from one network onto another.
//!
//! Nodes are paired by equality of a key column (String or Integer). Every matched target node
//! takes the `{x, y, z}` of its source counterpart; unmatched nodes can be selected and the
//! unmatched target nodes can be gathered into a grid next to the matched cluster.
//!
//! ```
//! use copycat::{CancellationToken, Outcome, ReconcileOptions};
//! use copycat_graph::{Graph, ViewState};
//!
//! let mut source = Graph::new("source");
//! let a = source.add_node("a").unwrap();
//! source[a].set_value("name", "x1").set_view(ViewState::new(5.0, 7.0, 0.0));
//!
//! let mut target = Graph::new("target");
//! let c = target.add_node("c").unwrap();
//! target[c].set_value("name", "x1");
//!
//! let outcome = copycat::reconcile(
//!     &mut source,
//!     "name",
//!     &mut target,
//!     "name",
//!     &ReconcileOptions::default(),
//!     &CancellationToken::new(),
//! )
//! .unwrap();
//!
//! assert_eq!(outcome.result().map(|r| r.mapped_count()), Some(1));
//! assert_eq!(target[c].view, ViewState::new(5.0, 7.0, 0.0));
//! ```

pub mod cancel;
pub mod error;
pub mod grid;
pub mod index;
pub mod key;
pub mod matcher;
pub mod options;
pub mod placement;
pub mod provider;
pub mod reconcile;

pub use cancel::CancellationToken;
pub use error::{Error, InvalidColumnReason, Result};
pub use index::KeyIndex;
pub use key::{Key, KeyColumn, KeyType, NetworkRole};
pub use matcher::{Matching, match_nodes};
pub use options::{GridSpacing, ReconcileOptions};
pub use placement::{copy_placement, copy_viewport};
pub use provider::GraphProvider;
pub use reconcile::{MatchResult, Outcome, Rejection, Request, reconcile, run};
