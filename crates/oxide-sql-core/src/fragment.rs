//! Composable statement fragments.
//!
//! A [`Fragment`] is an ordered list of [`Segment`]s: raw SQL text,
//! identifiers, bound parameters, record helpers and dialect-defined custom
//! segments. Fragments are rendered by a [`StatementCompiler`] for a given
//! [`Dialect`]; nothing here produces SQL on its own.
//!
//! ```rust
//! use oxide_sql_core::fragment::{insert, Fragment, Record};
//!
//! let stmt: Fragment = Fragment::new()
//!     .sql("INSERT INTO users ")
//!     .append(insert(Record::new().set("name", "Alice")).returning_column("id"));
//! assert_eq!(stmt.segments().len(), 2);
//! ```
//!
//! [`StatementCompiler`]: crate::compiler::StatementCompiler
//! [`Dialect`]: crate::dialect::Dialect

use crate::value::{SqlValue, ToSqlValue};

/// Custom segment type for dialects that define none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoCustom {}

/// A single piece of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<C> {
    /// Raw SQL text, emitted verbatim.
    Literal(String),
    /// An identifier, quoted by the dialect.
    Identifier(String),
    /// A bound value.
    Parameter(SqlValue),
    /// A parenthesized, comma separated list of bound values.
    ArrayHelper(Vec<SqlValue>),
    /// `(cols) VALUES (...), (...)`.
    RecordInsert(RecordInsert<C>),
    /// Multi-row values construct used by bulk updates.
    RecordUpdate(RecordUpdate<C>),
    /// `col = value, ...` assignment list.
    RecordUpdateSingle(RecordUpdateSingle<C>),
    /// Dialect-defined segment.
    Custom(C),
}

/// An ordered, immutable-by-convention list of segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment<C = NoCustom> {
    segments: Vec<Segment<C>>,
}

impl<C> Fragment<C> {
    /// Creates an empty fragment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Appends raw SQL text.
    ///
    /// **Warning**: Only use this for SQL that doesn't contain user input.
    #[must_use]
    pub fn sql(self, text: impl Into<String>) -> Self {
        self.push(Segment::Literal(text.into()))
    }

    /// Appends an identifier.
    #[must_use]
    pub fn ident(self, name: impl Into<String>) -> Self {
        self.push(Segment::Identifier(name.into()))
    }

    /// Appends a bound value.
    #[must_use]
    pub fn param<T: ToSqlValue>(self, value: T) -> Self {
        self.push(Segment::Parameter(value.to_sql_value()))
    }

    /// Appends `(v1,v2,...)` for use with `IN`.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: impl IntoIterator<Item = T>) -> Self {
        let values = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        self.push(Segment::ArrayHelper(values))
    }

    /// Appends a dialect-defined segment.
    #[must_use]
    pub fn custom(self, custom: C) -> Self {
        self.push(Segment::Custom(custom))
    }

    /// Appends a segment.
    #[must_use]
    pub fn push(mut self, segment: Segment<C>) -> Self {
        self.segments.push(segment);
        self
    }

    /// Appends every segment of another fragment.
    #[must_use]
    pub fn append(mut self, other: impl Into<Self>) -> Self {
        self.segments.extend(other.into().segments);
        self
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment<C>] {
        &self.segments
    }

    /// Returns true when the fragment has no segments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<C> Default for Fragment<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> From<Segment<C>> for Fragment<C> {
    fn from(segment: Segment<C>) -> Self {
        Self {
            segments: vec![segment],
        }
    }
}

impl<C> From<RecordInsert<C>> for Fragment<C> {
    fn from(insert: RecordInsert<C>) -> Self {
        Segment::RecordInsert(insert).into()
    }
}

impl<C> From<RecordUpdate<C>> for Fragment<C> {
    fn from(update: RecordUpdate<C>) -> Self {
        Segment::RecordUpdate(update).into()
    }
}

impl<C> From<RecordUpdateSingle<C>> for Fragment<C> {
    fn from(update: RecordUpdateSingle<C>) -> Self {
        Segment::RecordUpdateSingle(update).into()
    }
}

impl<C> FromIterator<Segment<C>> for Fragment<C> {
    fn from_iter<I: IntoIterator<Item = Segment<C>>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// A row of named values. Columns keep insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, SqlValue)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Sets a column, replacing an earlier value for the same column.
    #[must_use]
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        let value = value.to_sql_value();
        match self.fields.iter().position(|(name, _)| name == column) {
            Some(index) => self.fields[index].1 = value,
            None => self.fields.push((String::from(column), value)),
        }
        self
    }

    /// Returns the value bound to `column`.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no column is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: ToSqlValue> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |record, (column, value)| {
            let column: String = column.into();
            record.set(&column, value)
        })
    }
}

/// What a RETURNING clause returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Returning<C> {
    /// `*`
    All,
    /// Any fragment, compiled in place.
    Fragment(Fragment<C>),
}

impl<C> Returning<C> {
    /// Returns a single identifier.
    #[must_use]
    pub fn column(name: &str) -> Self {
        Self::Fragment(identifier(name))
    }
}

/// Column names of a record set, taken from its first row.
fn first_row_columns(rows: &[Record]) -> Vec<String> {
    rows.first()
        .map(|row| row.columns().map(String::from).collect())
        .unwrap_or_default()
}

/// Values of every row in `columns` order; missing columns read as NULL.
fn row_values(rows: &[Record], columns: &[String]) -> Vec<Vec<SqlValue>> {
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).cloned().unwrap_or(SqlValue::Null))
                .collect()
        })
        .collect()
}

/// Multi-row INSERT helper.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInsert<C> {
    rows: Vec<Record>,
    returning: Option<Returning<C>>,
}

impl<C> RecordInsert<C> {
    /// Adds a RETURNING clause.
    #[must_use]
    pub fn returning(mut self, returning: Returning<C>) -> Self {
        self.returning = Some(returning);
        self
    }

    /// Adds `RETURNING <column>`.
    #[must_use]
    pub fn returning_column(self, name: &str) -> Self {
        self.returning(Returning::column(name))
    }

    /// Adds `RETURNING *`.
    #[must_use]
    pub fn returning_all(self) -> Self {
        self.returning(Returning::All)
    }

    /// Returns the column names, taken from the first row.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        first_row_columns(&self.rows)
    }

    /// Returns every row's values in column order.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<SqlValue>> {
        row_values(&self.rows, &self.columns())
    }

    /// Returns the RETURNING clause, if any.
    #[must_use]
    pub const fn returning_clause(&self) -> Option<&Returning<C>> {
        self.returning.as_ref()
    }
}

/// Multi-row values construct for bulk updates:
/// `(VALUES (...), (...)) AS alias (cols)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordUpdate<C> {
    rows: Vec<Record>,
    alias: String,
    returning: Option<Returning<C>>,
}

impl<C> RecordUpdate<C> {
    /// Adds a RETURNING clause.
    #[must_use]
    pub fn returning(mut self, returning: Returning<C>) -> Self {
        self.returning = Some(returning);
        self
    }

    /// Adds `RETURNING <column>`.
    #[must_use]
    pub fn returning_column(self, name: &str) -> Self {
        self.returning(Returning::column(name))
    }

    /// Adds `RETURNING *`.
    #[must_use]
    pub fn returning_all(self) -> Self {
        self.returning(Returning::All)
    }

    /// Returns the alias of the values table.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the column names, taken from the first row.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        first_row_columns(&self.rows)
    }

    /// Returns every row's values in column order.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<SqlValue>> {
        row_values(&self.rows, &self.columns())
    }

    /// Returns the RETURNING clause, if any.
    #[must_use]
    pub const fn returning_clause(&self) -> Option<&Returning<C>> {
        self.returning.as_ref()
    }
}

/// Single-row `SET` assignment list.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordUpdateSingle<C> {
    record: Record,
    omit: Vec<String>,
    returning: Option<Returning<C>>,
}

impl<C> RecordUpdateSingle<C> {
    /// Leaves the named columns out of the assignment list.
    #[must_use]
    pub fn omit(mut self, columns: &[&str]) -> Self {
        self.omit.extend(columns.iter().map(|c| String::from(*c)));
        self
    }

    /// Adds a RETURNING clause.
    #[must_use]
    pub fn returning(mut self, returning: Returning<C>) -> Self {
        self.returning = Some(returning);
        self
    }

    /// Adds `RETURNING <column>`.
    #[must_use]
    pub fn returning_column(self, name: &str) -> Self {
        self.returning(Returning::column(name))
    }

    /// Returns the `(column, value)` pairs that are assigned.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.record
            .iter()
            .filter(|(column, _)| !self.omit.iter().any(|o| o == column))
    }

    /// Returns the RETURNING clause, if any.
    #[must_use]
    pub const fn returning_clause(&self) -> Option<&Returning<C>> {
        self.returning.as_ref()
    }
}

/// Raw SQL text.
///
/// **Warning**: Only use this for SQL that doesn't contain user input.
#[must_use]
pub fn unsafe_sql<C>(text: impl Into<String>) -> Fragment<C> {
    Fragment::new().sql(text)
}

/// A single identifier.
#[must_use]
pub fn identifier<C>(name: impl Into<String>) -> Fragment<C> {
    Fragment::new().ident(name)
}

/// A single bound value.
#[must_use]
pub fn param<C, T: ToSqlValue>(value: T) -> Fragment<C> {
    Fragment::new().param(value)
}

/// INSERT helper for one row.
#[must_use]
pub fn insert<C>(record: Record) -> RecordInsert<C> {
    insert_many(vec![record])
}

/// INSERT helper for several rows. Columns come from the first row.
#[must_use]
pub fn insert_many<C>(rows: impl IntoIterator<Item = Record>) -> RecordInsert<C> {
    RecordInsert {
        rows: rows.into_iter().collect(),
        returning: None,
    }
}

/// `col = value, ...` helper for UPDATE ... SET.
#[must_use]
pub const fn update<C>(record: Record) -> RecordUpdateSingle<C> {
    RecordUpdateSingle {
        record,
        omit: Vec::new(),
        returning: None,
    }
}

/// Values-table helper for bulk UPDATE ... FROM.
#[must_use]
pub fn update_values<C>(rows: impl IntoIterator<Item = Record>, alias: &str) -> RecordUpdate<C> {
    RecordUpdate {
        rows: rows.into_iter().collect(),
        alias: String::from(alias),
        returning: None,
    }
}

/// Joins fragments with `separator`.
///
/// No fragment yields `fallback`; one fragment is returned as is; several
/// are wrapped in parentheses when `add_parens` is set.
#[must_use]
pub fn join<C>(
    fragments: Vec<Fragment<C>>,
    separator: &str,
    add_parens: bool,
    fallback: &str,
) -> Fragment<C> {
    if fragments.is_empty() {
        return unsafe_sql(fallback);
    }
    if fragments.len() == 1 {
        return fragments.into_iter().next().unwrap_or_default();
    }
    let mut joined = Fragment::new();
    if add_parens {
        joined = joined.sql("(");
    }
    for (i, fragment) in fragments.into_iter().enumerate() {
        if i > 0 {
            joined = joined.sql(separator);
        }
        joined = joined.append(fragment);
    }
    if add_parens {
        joined = joined.sql(")");
    }
    joined
}

/// `(a AND b AND ...)`, or `1=1` for no clauses.
#[must_use]
pub fn and<C>(clauses: Vec<Fragment<C>>) -> Fragment<C> {
    join(clauses, " AND ", true, "1=1")
}

/// `(a OR b OR ...)`, or `1=1` for no clauses.
#[must_use]
pub fn or<C>(clauses: Vec<Fragment<C>>) -> Fragment<C> {
    join(clauses, " OR ", true, "1=1")
}
