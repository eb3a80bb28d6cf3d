use crate::error::{Error, InvalidColumnReason, Result};
use copycat_graph::{ColumnType, Graph, Value};
use std::fmt;

/// Which side of a reconciliation a network (or column) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkRole {
    Source,
    Target,
}

impl fmt::Display for NetworkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("Source"),
            Self::Target => f.write_str("Target"),
        }
    }
}

/// Column types admissible as a matching key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    String,
    Integer,
}

impl KeyType {
    pub fn from_column_type(ty: ColumnType) -> Option<Self> {
        match ty {
            ColumnType::String => Some(Self::String),
            ColumnType::Integer => Some(Self::Integer),
            _ => None,
        }
    }

    pub fn column_type(self) -> ColumnType {
        match self {
            Self::String => ColumnType::String,
            Self::Integer => ColumnType::Integer,
        }
    }
}

/// A key value. Strings only ever equal strings and integers only ever equal integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Str(String),
    Int(i64),
}

impl Key {
    /// Reads a cell as a key of type `ty`.
    ///
    /// Null cells, and cells whose runtime type disagrees with the declared key type, yield
    /// `None`: they never take part in matching.
    pub fn from_value(value: &Value, ty: KeyType) -> Option<Self> {
        match (ty, value) {
            (KeyType::String, Value::String(s)) => Some(Self::Str(s.clone())),
            (KeyType::Integer, Value::Integer(n)) => Some(Self::Int(i64::from(*n))),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

/// A validated key column: present on the network's default node table and String or Integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumn {
    name: String,
    ty: KeyType,
}

impl KeyColumn {
    pub fn resolve(graph: &Graph, name: &str, role: NetworkRole) -> Result<Self> {
        let invalid = |reason| Error::InvalidColumn {
            role,
            column: name.to_string(),
            reason,
        };
        let declared = graph
            .table()
            .column(name)
            .ok_or_else(|| invalid(InvalidColumnReason::Missing))?;
        let ty = KeyType::from_column_type(declared)
            .ok_or_else(|| invalid(InvalidColumnReason::UnsupportedType(declared)))?;
        Ok(Self {
            name: name.to_string(),
            ty,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_type(&self) -> KeyType {
        self.ty
    }

    pub fn column_type(&self) -> ColumnType {
        self.ty.column_type()
    }
}
