//! GoogleSQL dialect implementation.

use std::fmt;
use std::sync::Arc;

use oxide_sql_core::{default_escape, CompileOptions, Dialect, SqlValue};

use crate::context::ParamContext;
use crate::typed_param::{normalize_type_hint, TypedParam};

/// Identifier transform applied before quoting, e.g. `camelCase` to `snake_case`.
pub type NameTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Renders `@param<n>`.
fn param_name(position: usize) -> String {
    format!("@param{position}")
}

/// GoogleSQL dialect.
///
/// Backtick identifiers, `@paramN` placeholders, explicitly typed
/// parameters and `(VALUES ...) AS alias (cols)` bulk shaping.
#[derive(Clone, Default)]
pub struct GoogleSqlDialect {
    transform_query_names: Option<NameTransform>,
}

impl GoogleSqlDialect {
    /// Creates the dialect without an identifier transform.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            transform_query_names: None,
        }
    }

    /// Creates the dialect with an identifier transform.
    #[must_use]
    pub fn with_transform(transform: NameTransform) -> Self {
        Self {
            transform_query_names: Some(transform),
        }
    }
}

impl fmt::Debug for GoogleSqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleSqlDialect")
            .field(
                "transform_query_names",
                &self.transform_query_names.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

impl Dialect for GoogleSqlDialect {
    type Custom = TypedParam;
    type Context = ParamContext;

    fn name(&self) -> &'static str {
        "googlesql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn context(&self, options: &CompileOptions) -> ParamContext {
        ParamContext::new(options)
    }

    fn placeholder(&self, ctx: &mut ParamContext, value: &SqlValue) -> String {
        ctx.allocate(value, param_name)
    }

    fn on_identifier(&self, name: &str, without_transform: bool) -> String {
        let escape = default_escape(self.identifier_quote());
        match &self.transform_query_names {
            Some(transform) if !without_transform => escape(&transform(name)),
            _ => escape(name),
        }
    }

    fn on_custom(
        &self,
        ctx: &mut ParamContext,
        custom: &TypedParam,
        _without_transform: bool,
    ) -> (String, Vec<SqlValue>) {
        let placeholder = self.placeholder(ctx, custom.value());
        if let Some(ty) = normalize_type_hint(custom.hint()) {
            ctx.record_explicit(ctx.position(), ty);
        }
        (placeholder, vec![custom.value().clone()])
    }

    fn on_record_update(
        &self,
        placeholders: &str,
        alias: &str,
        columns: &str,
        values: &[Vec<SqlValue>],
        returning: Option<(String, Vec<SqlValue>)>,
    ) -> (String, Vec<SqlValue>) {
        let mut sql = format!("(VALUES {placeholders}) AS {alias}{columns}");
        let mut params: Vec<SqlValue> = values.iter().flatten().cloned().collect();
        if let Some((returning_sql, returning_params)) = returning {
            sql.push_str(" RETURNING ");
            sql.push_str(&returning_sql);
            params.extend(returning_params);
        }
        (sql, params)
    }
}
