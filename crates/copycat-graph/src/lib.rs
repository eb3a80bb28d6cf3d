#![forbid(unsafe_code)]

//! Network container APIs used by `copycat`.
//!
//! A [`Graph`] is a named network view: an ordered node set, a default node table declaring the
//! typed columns every node row may carry, per-node view state (position + selection), and a
//! network-level [`Viewport`]. A [`Session`] is the in-memory registry the host resolves
//! networks from.

pub mod document;
pub mod error;
pub mod graph;
pub mod session;
pub mod table;

pub use document::{NetworkDocument, NodeDocument, SessionDocument};
pub use error::{Error, Result};
pub use graph::{Graph, GraphId, Node, NodeIndex, ViewState, Viewport};
pub use session::Session;
pub use table::{ColumnType, NodeTable, Value};

/// Column every node table carries; used as the default key column.
pub const NAME_COLUMN: &str = "name";

/// Row attribute toggled by selection.
pub const SELECTED_COLUMN: &str = "selected";
