pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network `{network}` already contains a node with id `{node_id}`")]
    DuplicateNode { network: String, node_id: String },

    #[error("a network named `{name}` is already registered")]
    DuplicateNetwork { name: String },

    #[error("unknown column type `{type_name}` for column `{column}`")]
    UnknownColumnType { column: String, type_name: String },

    #[error("column `{column}` is declared as {expected} but node `{node_id}` holds {found}")]
    ValueType {
        column: String,
        node_id: String,
        expected: &'static str,
        found: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
