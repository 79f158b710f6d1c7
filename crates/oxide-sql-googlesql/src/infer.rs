//! Wire type inference from runtime values.

use oxide_sql_core::SqlValue;

use crate::error::{Result, TypeError};
use crate::types::{self, WireType};

/// Infers the wire type of a bound value.
///
/// Arrays take the type of their first non-NULL element. `NULL` and arrays
/// without a non-NULL element carry no type and return an error; callers in
/// the compile path treat that as "no hint".
///
/// # Errors
///
/// [`TypeError::Unspecified`] for `NULL`, [`TypeError::UntypedArray`] for
/// an array without a non-NULL element.
pub fn infer_type(value: &SqlValue) -> Result<WireType> {
    match value {
        SqlValue::Null => Err(TypeError::Unspecified),
        SqlValue::Bool(_) => Ok(types::bool()),
        SqlValue::Int(_) => Ok(types::int64()),
        SqlValue::Float(_) => Ok(types::float64()),
        SqlValue::Text(_) => Ok(types::string()),
        SqlValue::Blob(_) => Ok(types::bytes()),
        SqlValue::Json(_) => Ok(types::json()),
        SqlValue::Timestamp(_) => Ok(types::timestamp()),
        SqlValue::Date(_) => Ok(types::date()),
        SqlValue::Array(elements) => elements
            .iter()
            .find(|element| !element.is_null())
            .ok_or(TypeError::UntypedArray)
            .and_then(infer_type)
            .map(types::array),
    }
}
