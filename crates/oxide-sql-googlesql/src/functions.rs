//! GoogleSQL function helpers.
//!
//! Expressions are inserted verbatim; only JSON paths are quoted.

use crate::typed_param::Fragment;

fn quote_path(path: &str) -> String {
    format!("'{}'", path.replace('\'', "''"))
}

/// `SAFE_CAST(expression AS target_type)`
#[must_use]
pub fn safe_cast(expression: &str, target_type: &str) -> Fragment {
    Fragment::new().sql(format!("SAFE_CAST({expression} AS {target_type})"))
}

/// `JSON_VALUE(expression, 'path')`
#[must_use]
pub fn json_value(expression: &str, path: &str) -> Fragment {
    Fragment::new().sql(format!("JSON_VALUE({expression}, {})", quote_path(path)))
}

/// `JSON_QUERY(expression, 'path')`
#[must_use]
pub fn json_query(expression: &str, path: &str) -> Fragment {
    Fragment::new().sql(format!("JSON_QUERY({expression}, {})", quote_path(path)))
}

/// `JSON_EXISTS`, reading NULL as FALSE.
#[must_use]
pub fn json_exists(expression: &str, path: &str) -> Fragment {
    Fragment::new().sql(format!(
        "IFNULL(JSON_EXISTS({expression}, {}), FALSE)",
        quote_path(path)
    ))
}

/// `SAFE_OFFSET(expression, offset)`
#[must_use]
pub fn safe_offset(expression: &str, offset: i64) -> Fragment {
    Fragment::new().sql(format!("SAFE_OFFSET({expression}, {offset})"))
}
