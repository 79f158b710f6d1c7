//! GoogleSQL wire types.
//!
//! A [`WireType`] tells the driver how to encode a bound parameter. It
//! serializes to the shape Spanner expects for parameter types:
//!
//! ```rust
//! use oxide_sql_googlesql::types;
//!
//! let ty = types::array(types::int64());
//! assert_eq!(ty.to_string(), "ARRAY<INT64>");
//! assert_eq!("array<int64>".parse::<oxide_sql_googlesql::WireType>(), Ok(ty));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Type code of a wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeCode {
    /// `STRING`
    String,
    /// `INT64`
    Int64,
    /// `FLOAT64`
    Float64,
    /// `BOOL`
    Bool,
    /// `JSON`
    Json,
    /// `BYTES`
    Bytes,
    /// `TIMESTAMP`
    Timestamp,
    /// `DATE`
    Date,
    /// `ARRAY`, with an element type.
    Array,
}

impl TypeCode {
    /// Returns the GoogleSQL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Int64 => "INT64",
            Self::Float64 => "FLOAT64",
            Self::Bool => "BOOL",
            Self::Json => "JSON",
            Self::Bytes => "BYTES",
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::Array => "ARRAY",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire type descriptor for a bound parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireType {
    code: TypeCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    array_element_type: Option<Box<Self>>,
}

impl WireType {
    const fn scalar(code: TypeCode) -> Self {
        Self {
            code,
            array_element_type: None,
        }
    }

    /// Returns the type code.
    #[must_use]
    pub const fn code(&self) -> TypeCode {
        self.code
    }

    /// Returns the element type of an `ARRAY`.
    #[must_use]
    pub fn array_element_type(&self) -> Option<&Self> {
        self.array_element_type.as_deref()
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.array_element_type {
            Some(element) => write!(f, "{}<{element}>", self.code),
            None => write!(f, "{}", self.code),
        }
    }
}

impl FromStr for WireType {
    type Err = TypeError;

    /// Resolves a type name, case-insensitively. Arrays are written
    /// `array<element>`.
    fn from_str(name: &str) -> Result<Self, TypeError> {
        let lowered = name.trim().to_lowercase();
        if let Some(element) = lowered
            .strip_prefix("array<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return element.parse().map(array);
        }
        match lowered.as_str() {
            "string" => Ok(string()),
            "int64" => Ok(int64()),
            "float64" => Ok(float64()),
            "bool" => Ok(bool()),
            "json" => Ok(json()),
            "bytes" => Ok(bytes()),
            "timestamp" => Ok(timestamp()),
            "date" => Ok(date()),
            _ => Err(TypeError::UnknownTypeName(String::from(name))),
        }
    }
}

/// `STRING`
#[must_use]
pub const fn string() -> WireType {
    WireType::scalar(TypeCode::String)
}

/// `INT64`
#[must_use]
pub const fn int64() -> WireType {
    WireType::scalar(TypeCode::Int64)
}

/// `FLOAT64`
#[must_use]
pub const fn float64() -> WireType {
    WireType::scalar(TypeCode::Float64)
}

/// `BOOL`
#[must_use]
pub const fn bool() -> WireType {
    WireType::scalar(TypeCode::Bool)
}

/// `JSON`
#[must_use]
pub const fn json() -> WireType {
    WireType::scalar(TypeCode::Json)
}

/// `BYTES`
#[must_use]
pub const fn bytes() -> WireType {
    WireType::scalar(TypeCode::Bytes)
}

/// `TIMESTAMP`
#[must_use]
pub const fn timestamp() -> WireType {
    WireType::scalar(TypeCode::Timestamp)
}

/// `DATE`
#[must_use]
pub const fn date() -> WireType {
    WireType::scalar(TypeCode::Date)
}

/// `ARRAY<element>`. Nesting depth is not checked.
#[must_use]
pub fn array(element: WireType) -> WireType {
    WireType {
        code: TypeCode::Array,
        array_element_type: Some(Box::new(element)),
    }
}
