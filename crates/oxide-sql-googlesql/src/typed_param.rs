//! Explicitly typed parameters.
//!
//! [`param_of`] and [`null_of`] bind a value under a caller-chosen wire type
//! instead of the inferred one. They produce fragments, to be composed into
//! a statement:
//!
//! ```rust
//! use oxide_sql_googlesql::{compiler, null_of, param_of, types, Compiler, Fragment};
//!
//! let stmt = Fragment::new()
//!     .sql("UPDATE Singers SET Rating = ")
//!     .append(param_of("float64", 5))
//!     .sql(", Notes = ")
//!     .append(null_of(types::string()));
//! let compiled = compiler().compile(&stmt);
//!
//! assert_eq!(compiled.sql(), "UPDATE Singers SET Rating = @param1, Notes = @param2");
//! assert_eq!(compiled.params().param_type(0), Some(&types::float64()));
//! assert_eq!(compiled.params().param_type(1), Some(&types::string()));
//! ```

use oxide_sql_core::{SqlValue, ToSqlValue};
use tracing::warn;

use crate::types::WireType;

/// Fragment type of the GoogleSQL dialect.
pub type Fragment = oxide_sql_core::Fragment<TypedParam>;

/// A type hint: a descriptor or a case-insensitive type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// A resolved descriptor.
    Type(WireType),
    /// A type name such as `"int64"` or `"ARRAY<STRING>"`.
    Name(String),
}

impl TypeHint {
    /// Resolves the hint into a descriptor.
    ///
    /// An empty name means "no hint". An unknown name is a caller error; it
    /// is logged and also treated as "no hint".
    #[must_use]
    pub fn normalize(&self) -> Option<WireType> {
        match self {
            Self::Type(ty) => Some(ty.clone()),
            Self::Name(name) if name.is_empty() => None,
            Self::Name(name) => match name.parse() {
                Ok(ty) => Some(ty),
                Err(error) => {
                    warn!(%error, "ignoring explicit parameter type");
                    None
                }
            },
        }
    }
}

impl From<WireType> for TypeHint {
    fn from(ty: WireType) -> Self {
        Self::Type(ty)
    }
}

impl From<&str> for TypeHint {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

impl From<String> for TypeHint {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Normalizes an optional hint. Absent hints stay absent.
#[must_use]
pub fn normalize_type_hint(hint: Option<&TypeHint>) -> Option<WireType> {
    hint.and_then(TypeHint::normalize)
}

/// Custom segment binding a value under an explicit type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedParam {
    value: SqlValue,
    hint: Option<TypeHint>,
}

impl TypedParam {
    /// Creates a marker.
    #[must_use]
    pub const fn new(value: SqlValue, hint: Option<TypeHint>) -> Self {
        Self { value, hint }
    }

    /// Returns the bound value.
    #[must_use]
    pub const fn value(&self) -> &SqlValue {
        &self.value
    }

    /// Returns the unresolved type hint.
    #[must_use]
    pub const fn hint(&self) -> Option<&TypeHint> {
        self.hint.as_ref()
    }
}

/// Binds `value` under the explicit type `ty`.
#[must_use]
pub fn param_of<T: ToSqlValue>(ty: impl Into<TypeHint>, value: T) -> Fragment {
    Fragment::new().custom(TypedParam::new(value.to_sql_value(), Some(ty.into())))
}

/// Binds `NULL` under the explicit type `ty`.
#[must_use]
pub fn null_of(ty: impl Into<TypeHint>) -> Fragment {
    Fragment::new().custom(TypedParam::new(SqlValue::Null, Some(ty.into())))
}
