//! Error types for wire type resolution.

use thiserror::Error;

/// Errors raised while resolving or inferring a wire type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The type name does not name a GoogleSQL type.
    #[error("unknown type name: {0}")]
    UnknownTypeName(String),

    /// The value carries no type information (e.g. NULL).
    #[error("value has no wire type")]
    Unspecified,

    /// An array without any non-NULL element.
    #[error("cannot infer the element type of an array without non-null elements")]
    UntypedArray,
}

/// Result type alias for type resolution.
pub type Result<T> = std::result::Result<T, TypeError>;
