//! GoogleSQL compiler.
//!
//! [`GoogleSqlCompiler`] wraps a [`StatementCompiler`] for
//! [`GoogleSqlDialect`]. Each compile runs with its own
//! [`ParamContext`](crate::ParamContext), attaches the collected wire types
//! to the parameter list, and rewrites `RETURNING` to GoogleSQL's
//! `THEN RETURN`.

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use oxide_sql_core::{CompileOptions, Compiler, Dialect, StatementCompiler};
use regex::Regex;
use tracing::trace;

use crate::dialect::{GoogleSqlDialect, NameTransform};
use crate::params::ParamList;
use crate::typed_param::{Fragment, TypedParam};

static RETURNING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bRETURNING\b").expect("RETURNING pattern is valid"));

static DEFAULT_COMPILER: LazyLock<GoogleSqlCompiler> = LazyLock::new(GoogleSqlCompiler::new);

/// Rewrites every standalone `RETURNING` to `THEN RETURN`.
///
/// Matching is case-sensitive. Text without the keyword is returned
/// borrowed, untouched.
#[must_use]
pub fn rewrite_returning(sql: &str) -> Cow<'_, str> {
    if !sql.contains("RETURNING") {
        return Cow::Borrowed(sql);
    }
    RETURNING.replace_all(sql, "THEN RETURN")
}

/// Returns the shared default compiler (no identifier transform).
#[must_use]
pub fn compiler() -> &'static GoogleSqlCompiler {
    &DEFAULT_COMPILER
}

/// SQL text and parameters of a compiled statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStatement {
    sql: String,
    params: ParamList,
}

impl CompiledStatement {
    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the parameters, with type metadata when any was collected.
    #[must_use]
    pub const fn params(&self) -> &ParamList {
        &self.params
    }

    /// Consumes the statement and returns `(sql, params)`.
    #[must_use]
    pub fn into_parts(self) -> (String, ParamList) {
        (self.sql, self.params)
    }
}

/// Compiles fragments to GoogleSQL.
#[derive(Debug, Clone)]
pub struct GoogleSqlCompiler {
    inner: StatementCompiler<GoogleSqlDialect>,
}

impl GoogleSqlCompiler {
    /// Creates a compiler without an identifier transform.
    #[must_use]
    pub fn new() -> Self {
        Self::from_dialect(GoogleSqlDialect::new())
    }

    /// Starts a builder for a customised compiler.
    #[must_use]
    pub fn builder() -> GoogleSqlCompilerBuilder {
        GoogleSqlCompilerBuilder::default()
    }

    fn from_dialect(dialect: GoogleSqlDialect) -> Self {
        Self {
            inner: StatementCompiler::new(dialect),
        }
    }

    /// Returns the wrapped structural compiler.
    #[must_use]
    pub const fn inner(&self) -> &StatementCompiler<GoogleSqlDialect> {
        &self.inner
    }
}

impl Default for GoogleSqlCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler for GoogleSqlCompiler {
    type Custom = TypedParam;
    type Output = CompiledStatement;

    fn compile_with(&self, statement: &Fragment, options: &CompileOptions) -> CompiledStatement {
        let mut ctx = self.inner.dialect().context(options);
        let (sql, values) = self
            .inner
            .compile_in(statement, options.without_transform, &mut ctx);

        let mut params = ParamList::new(values);
        let typed = ctx.has_types() && params.attach_param_types(&ctx.into_types());

        let rewritten = match rewrite_returning(&sql) {
            Cow::Owned(rewritten) => Some(rewritten),
            Cow::Borrowed(_) => None,
        };
        trace!(
            params = params.len(),
            typed,
            rewritten = rewritten.is_some(),
            "compiled GoogleSQL statement"
        );
        CompiledStatement {
            sql: rewritten.unwrap_or(sql),
            params,
        }
    }

    fn without_transform(&self) -> Self {
        Self {
            inner: self.inner.without_transform(),
        }
    }
}

/// Builder for [`GoogleSqlCompiler`].
#[derive(Default)]
pub struct GoogleSqlCompilerBuilder {
    transform_query_names: Option<NameTransform>,
}

impl GoogleSqlCompilerBuilder {
    /// Applies `transform` to every identifier before quoting.
    #[must_use]
    pub fn transform_query_names(
        mut self,
        transform: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.transform_query_names = Some(Arc::new(transform));
        self
    }

    /// Builds the compiler.
    #[must_use]
    pub fn build(self) -> GoogleSqlCompiler {
        let dialect = self
            .transform_query_names
            .map_or_else(GoogleSqlDialect::new, GoogleSqlDialect::with_transform);
        GoogleSqlCompiler::from_dialect(dialect)
    }
}
