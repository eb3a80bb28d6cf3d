use crate::error::{Error, Result};
use crate::{NAME_COLUMN, SELECTED_COLUMN};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// Declared type of a node table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    /// 32-bit integer column.
    Integer,
    /// 64-bit integer column.
    Long,
    Double,
    Boolean,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Long => "Long",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(Self::String),
            "integer" | "int" => Ok(Self::Integer),
            "long" => Ok(Self::Long),
            "double" | "float" => Ok(Self::Double),
            "boolean" | "bool" => Ok(Self::Boolean),
            _ => Err(()),
        }
    }
}

/// A typed cell of a node row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    String(String),
    Integer(i32),
    Long(i64),
    Double(f64),
    Boolean(bool),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The column type this value can be stored under, `None` for null.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Self::Null => None,
            Self::String(_) => Some(ColumnType::String),
            Self::Integer(_) => Some(ColumnType::Integer),
            Self::Long(_) => Some(ColumnType::Long),
            Self::Double(_) => Some(ColumnType::Double),
            Self::Boolean(_) => Some(ColumnType::Boolean),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Converts a JSON cell into a value of the declared column type.
    ///
    /// Integral JSON numbers are accepted for `Double` columns; nothing else is coerced.
    pub fn from_json(
        column: &str,
        node_id: &str,
        ty: ColumnType,
        raw: &serde_json::Value,
    ) -> Result<Self> {
        use serde_json::Value as Json;

        let mismatch = || Error::ValueType {
            column: column.to_string(),
            node_id: node_id.to_string(),
            expected: ty.as_str(),
            found: raw.to_string(),
        };

        let v = match (ty, raw) {
            (_, Json::Null) => Self::Null,
            (ColumnType::String, Json::String(s)) => Self::String(s.clone()),
            (ColumnType::Integer, Json::Number(n)) => n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Self::Integer)
                .ok_or_else(mismatch)?,
            (ColumnType::Long, Json::Number(n)) => {
                n.as_i64().map(Self::Long).ok_or_else(mismatch)?
            }
            (ColumnType::Double, Json::Number(n)) => {
                n.as_f64().map(Self::Double).ok_or_else(mismatch)?
            }
            (ColumnType::Boolean, Json::Bool(b)) => Self::Boolean(*b),
            _ => return Err(mismatch()),
        };
        Ok(v)
    }

    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Self::Null => Json::Null,
            Self::String(s) => Json::String(s.clone()),
            Self::Integer(n) => Json::from(*n),
            Self::Long(n) => Json::from(*n),
            Self::Double(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Self::Boolean(b) => Json::Bool(*b),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// The default node table of a network: the declared columns shared by all node rows.
///
/// Every table starts out with `name: String` and `selected: Boolean`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTable {
    columns: IndexMap<String, ColumnType>,
}

impl Default for NodeTable {
    fn default() -> Self {
        let mut columns = IndexMap::new();
        columns.insert(NAME_COLUMN.to_string(), ColumnType::String);
        columns.insert(SELECTED_COLUMN.to_string(), ColumnType::Boolean);
        Self { columns }
    }
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares (or re-declares) a column.
    pub fn set_column(&mut self, name: impl Into<String>, ty: ColumnType) -> &mut Self {
        self.columns.insert(name.into(), ty);
        self
    }

    pub fn column(&self, name: &str) -> Option<ColumnType> {
        self.columns.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Declared columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
