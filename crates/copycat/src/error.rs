use crate::key::NetworkRole;

pub type Result<T> = std::result::Result<T, Error>;

/// Precondition failures. All of them are raised before any network is mutated.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{role} network not found: `{name}`")]
    NetworkNotFound { role: NetworkRole, name: String },

    #[error(
        "{role} column `{column}` not found or invalid ({reason}). Must be existing String or Integer column"
    )]
    InvalidColumn {
        role: NetworkRole,
        column: String,
        reason: InvalidColumnReason,
    },

    #[error("invalid options: {message}")]
    InvalidOptions { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidColumnReason {
    Missing,
    UnsupportedType(copycat_graph::ColumnType),
}

impl std::fmt::Display for InvalidColumnReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => f.write_str("missing"),
            Self::UnsupportedType(ty) => write!(f, "declared as {ty}"),
        }
    }
}
