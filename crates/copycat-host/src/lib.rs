#![forbid(unsafe_code)]

//! Host-side collaborators around the `copycat` core.
//!
//! The core returns plain values; this crate is where they meet a user: the column choices a
//! parameter dialog offers, the defaults it starts from, and the textual / JSON / envelope forms
//! a finished run is reported in.

pub mod columns;
pub mod observer;
pub mod parameters;
pub mod report;

pub use columns::key_column_names;
pub use observer::{FinishStatus, TaskObserver, execute};
pub use parameters::Parameters;
pub use report::{Response, ResponseError};
