//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. A [`Dialect`]
//! supplies the hooks the [`StatementCompiler`] calls while walking a
//! fragment: placeholder naming, identifier quoting, custom segments and
//! bulk value shaping.
//!
//! Hooks that allocate parameters receive the dialect's per-compile
//! [`Dialect::Context`] explicitly. A context is created for one compile
//! call and dropped when it returns.
//!
//! [`StatementCompiler`]: crate::compiler::StatementCompiler

mod generic;

pub use generic::GenericDialect;

use crate::compiler::{CompileOptions, PlaceholderFn};
use crate::value::SqlValue;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Custom segment type understood by this dialect.
    type Custom;

    /// Mutable state shared by the hooks during one compile call.
    type Context;

    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character, `"` unless overridden.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Creates a fresh context for one compile call.
    fn context(&self, options: &CompileOptions) -> Self::Context;

    /// Allocates the placeholder for the next bound value.
    fn placeholder(&self, ctx: &mut Self::Context, value: &SqlValue) -> String;

    /// Renders an identifier.
    ///
    /// `without_transform` asks the dialect to skip any name transformation
    /// for this occurrence.
    fn on_identifier(&self, name: &str, without_transform: bool) -> String {
        let _ = without_transform;
        quote_identifier(self.identifier_quote(), name)
    }

    /// Renders a custom segment, returning its SQL and bound values.
    fn on_custom(
        &self,
        ctx: &mut Self::Context,
        custom: &Self::Custom,
        without_transform: bool,
    ) -> (String, Vec<SqlValue>);

    /// Shapes a multi-row values construct.
    ///
    /// `placeholders` is the already allocated `(..),(..)` row list,
    /// `columns` the parenthesized column list, and `returning` the compiled
    /// RETURNING body with its parameters.
    fn on_record_update(
        &self,
        placeholders: &str,
        alias: &str,
        columns: &str,
        values: &[Vec<SqlValue>],
        returning: Option<(String, Vec<SqlValue>)>,
    ) -> (String, Vec<SqlValue>) {
        let mut sql = format!("(values {placeholders}) AS {alias}{columns}");
        let mut params: Vec<SqlValue> = values.iter().flatten().cloned().collect();
        if let Some((returning_sql, returning_params)) = returning {
            sql.push_str(" RETURNING ");
            sql.push_str(&returning_sql);
            params.extend(returning_params);
        }
        (sql, params)
    }
}

/// Returns an escaping routine for the given delimiter.
///
/// Embedded delimiters are doubled and every `.` closes and reopens the
/// quotes, so qualified names quote part by part.
pub fn default_escape(delimiter: char) -> impl Fn(&str) -> String {
    move |name: &str| quote_identifier(delimiter, name)
}

fn quote_identifier(delimiter: char, name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push(delimiter);
    for ch in name.chars() {
        if ch == delimiter {
            out.push(delimiter);
            out.push(delimiter);
        } else if ch == '.' {
            out.push(delimiter);
            out.push('.');
            out.push(delimiter);
        } else {
            out.push(ch);
        }
    }
    out.push(delimiter);
    out
}

/// Positional placeholder counter with an optional caller override.
#[derive(Clone, Default)]
pub struct Placeholders {
    count: usize,
    placeholder: Option<PlaceholderFn>,
}

impl Placeholders {
    /// Creates a counter at zero, honoring the options' override.
    #[must_use]
    pub fn new(options: &CompileOptions) -> Self {
        Self {
            count: 0,
            placeholder: options.placeholder.clone(),
        }
    }

    /// Counts the next value and renders its placeholder.
    ///
    /// `default` receives the 1-based position and is used unless an
    /// override was supplied.
    pub fn allocate(&mut self, value: &SqlValue, default: impl FnOnce(usize) -> String) -> String {
        self.count += 1;
        match &self.placeholder {
            Some(placeholder) => placeholder(value),
            None => default(self.count),
        }
    }

    /// Returns the number of placeholders allocated so far.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl std::fmt::Debug for Placeholders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Placeholders")
            .field("count", &self.count)
            .field("placeholder", &self.placeholder.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
