//! Structural statement compiler.
//!
//! [`StatementCompiler`] walks a [`Fragment`] and asks its [`Dialect`] how to
//! render each segment. Compilation never fails: every fragment the builder
//! can express has a rendering.

use std::fmt;
use std::sync::Arc;

use crate::dialect::Dialect;
use crate::fragment::{Fragment, Returning, Segment};
use crate::value::SqlValue;

/// Caller-supplied placeholder renderer, used when a statement is compiled
/// inside another compiler's parameter scheme.
pub type PlaceholderFn = Arc<dyn Fn(&SqlValue) -> String + Send + Sync>;

/// Per-call compile options.
#[derive(Clone, Default)]
pub struct CompileOptions {
    /// Skip identifier transformation for this call.
    pub without_transform: bool,
    /// Replaces the dialect's placeholder text.
    pub placeholder: Option<PlaceholderFn>,
}

impl CompileOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips identifier transformation.
    #[must_use]
    pub const fn without_transform(mut self) -> Self {
        self.without_transform = true;
        self
    }

    /// Overrides placeholder rendering.
    #[must_use]
    pub fn placeholder(mut self, placeholder: PlaceholderFn) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

impl fmt::Debug for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("without_transform", &self.without_transform)
            .field("placeholder", &self.placeholder.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Something that turns fragments into SQL.
pub trait Compiler {
    /// Custom segment type accepted by this compiler.
    type Custom;
    /// Compilation result.
    type Output;

    /// Compiles a fragment with explicit options.
    fn compile_with(&self, statement: &Fragment<Self::Custom>, options: &CompileOptions)
        -> Self::Output;

    /// Compiles a fragment with default options.
    fn compile(&self, statement: &Fragment<Self::Custom>) -> Self::Output {
        self.compile_with(statement, &CompileOptions::default())
    }

    /// Returns a sibling compiler whose compiles skip identifier
    /// transformation.
    #[must_use]
    fn without_transform(&self) -> Self
    where
        Self: Sized;
}

/// Renders fragments for a dialect.
pub struct StatementCompiler<D> {
    dialect: Arc<D>,
    without_transform: bool,
}

impl<D: Dialect> StatementCompiler<D> {
    /// Creates a compiler for `dialect`.
    #[must_use]
    pub fn new(dialect: D) -> Self {
        Self::from_arc(Arc::new(dialect))
    }

    /// Creates a compiler sharing an existing dialect.
    #[must_use]
    pub const fn from_arc(dialect: Arc<D>) -> Self {
        Self {
            dialect,
            without_transform: false,
        }
    }

    /// Returns the dialect.
    #[must_use]
    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Returns true when this compiler skips identifier transformation.
    #[must_use]
    pub const fn is_without_transform(&self) -> bool {
        self.without_transform
    }

    /// Compiles `statement` using an explicit context.
    ///
    /// Every bound value goes through [`Dialect::placeholder`] or
    /// [`Dialect::on_custom`] with `ctx`, in the order it appears in the
    /// output. Returning clauses are compiled with the same context so
    /// numbering continues.
    pub fn compile_in(
        &self,
        statement: &Fragment<D::Custom>,
        without_transform: bool,
        ctx: &mut D::Context,
    ) -> (String, Vec<SqlValue>) {
        let without_transform = without_transform || self.without_transform;
        let dialect = self.dialect.as_ref();
        let mut sql = String::new();
        let mut params = vec![];

        for segment in statement.segments() {
            match segment {
                Segment::Literal(text) => sql.push_str(text),
                Segment::Identifier(name) => {
                    sql.push_str(&dialect.on_identifier(name, without_transform));
                }
                Segment::Parameter(value) => {
                    sql.push_str(&dialect.placeholder(ctx, value));
                    params.push(value.clone());
                }
                Segment::ArrayHelper(values) => {
                    sql.push_str(&self.row_placeholders(ctx, values));
                    params.extend(values.iter().cloned());
                }
                Segment::RecordInsert(insert) => {
                    let rows = insert.values();
                    sql.push_str(&self.columns(&insert.columns(), without_transform));
                    sql.push_str(" VALUES ");
                    sql.push_str(&self.rows_placeholders(ctx, &rows));
                    params.extend(rows.into_iter().flatten());
                    if let Some(returning) = insert.returning_clause() {
                        let (returning_sql, returning_params) =
                            self.returning(returning, without_transform, ctx);
                        sql.push_str(" RETURNING ");
                        sql.push_str(&returning_sql);
                        params.extend(returning_params);
                    }
                }
                Segment::RecordUpdateSingle(update) => {
                    let assignments: Vec<String> = update
                        .assignments()
                        .map(|(column, value)| {
                            params.push(value.clone());
                            format!(
                                "{} = {}",
                                dialect.on_identifier(column, without_transform),
                                dialect.placeholder(ctx, value)
                            )
                        })
                        .collect();
                    sql.push_str(&assignments.join(", "));
                    if let Some(returning) = update.returning_clause() {
                        let (returning_sql, returning_params) =
                            self.returning(returning, without_transform, ctx);
                        sql.push_str(" RETURNING ");
                        sql.push_str(&returning_sql);
                        params.extend(returning_params);
                    }
                }
                Segment::RecordUpdate(update) => {
                    let rows = update.values();
                    let placeholders = self.rows_placeholders(ctx, &rows);
                    let returning = update
                        .returning_clause()
                        .map(|returning| self.returning(returning, without_transform, ctx));
                    let (update_sql, update_params) = dialect.on_record_update(
                        &placeholders,
                        &dialect.on_identifier(update.alias(), without_transform),
                        &self.columns(&update.columns(), without_transform),
                        &rows,
                        returning,
                    );
                    sql.push_str(&update_sql);
                    params.extend(update_params);
                }
                Segment::Custom(custom) => {
                    let (custom_sql, custom_params) =
                        dialect.on_custom(ctx, custom, without_transform);
                    sql.push_str(&custom_sql);
                    params.extend(custom_params);
                }
            }
        }

        (sql, params)
    }

    fn columns(&self, columns: &[String], without_transform: bool) -> String {
        let quoted: Vec<String> = columns
            .iter()
            .map(|column| self.dialect.on_identifier(column, without_transform))
            .collect();
        format!("({})", quoted.join(","))
    }

    fn row_placeholders(&self, ctx: &mut D::Context, row: &[SqlValue]) -> String {
        let placeholders: Vec<String> = row
            .iter()
            .map(|value| self.dialect.placeholder(ctx, value))
            .collect();
        format!("({})", placeholders.join(","))
    }

    fn rows_placeholders(&self, ctx: &mut D::Context, rows: &[Vec<SqlValue>]) -> String {
        let rows: Vec<String> = rows
            .iter()
            .map(|row| self.row_placeholders(ctx, row))
            .collect();
        rows.join(",")
    }

    fn returning(
        &self,
        returning: &Returning<D::Custom>,
        without_transform: bool,
        ctx: &mut D::Context,
    ) -> (String, Vec<SqlValue>) {
        match returning {
            Returning::All => (String::from("*"), vec![]),
            Returning::Fragment(fragment) => self.compile_in(fragment, without_transform, ctx),
        }
    }
}

impl<D> Clone for StatementCompiler<D> {
    fn clone(&self) -> Self {
        Self {
            dialect: Arc::clone(&self.dialect),
            without_transform: self.without_transform,
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for StatementCompiler<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementCompiler")
            .field("dialect", &self.dialect)
            .field("without_transform", &self.without_transform)
            .finish()
    }
}

impl<D: Dialect> Compiler for StatementCompiler<D> {
    type Custom = D::Custom;
    type Output = (String, Vec<SqlValue>);

    fn compile_with(
        &self,
        statement: &Fragment<D::Custom>,
        options: &CompileOptions,
    ) -> (String, Vec<SqlValue>) {
        let mut ctx = self.dialect.context(options);
        self.compile_in(statement, options.without_transform, &mut ctx)
    }

    fn without_transform(&self) -> Self {
        Self {
            dialect: Arc::clone(&self.dialect),
            without_transform: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::fragment::{insert, Record};

    #[test]
    fn test_compile_literal_and_param() {
        let compiler = StatementCompiler::new(GenericDialect::new());
        let stmt: Fragment = Fragment::new()
            .sql("SELECT * FROM ")
            .ident("users")
            .sql(" WHERE id = ")
            .param(7);
        let (sql, params) = compiler.compile(&stmt);
        assert_eq!(sql, "SELECT * FROM \"users\" WHERE id = ?");
        assert_eq!(params, vec![SqlValue::Int(7)]);
    }

    #[test]
    fn test_returning_params_follow_row_params() {
        let compiler = StatementCompiler::new(GenericDialect::new());
        let stmt: Fragment = Fragment::new().sql("INSERT INTO t ").append(
            insert(Record::new().set("a", 1)).returning(Returning::Fragment(
                Fragment::new().sql("a + ").param(2),
            )),
        );
        let (sql, params) = compiler.compile(&stmt);
        assert_eq!(sql, "INSERT INTO t (\"a\") VALUES (?) RETURNING a + ?");
        assert_eq!(params, vec![SqlValue::Int(1), SqlValue::Int(2)]);
    }

    #[test]
    fn test_without_transform_sibling_shares_dialect() {
        let compiler = StatementCompiler::new(GenericDialect::new());
        let sibling = compiler.without_transform();
        assert!(sibling.is_without_transform());
        assert!(!compiler.is_without_transform());
    }
}
