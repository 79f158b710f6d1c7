//! # oxide-sql-core
//!
//! Composable SQL fragments compiled through pluggable dialects.
//!
//! This crate provides:
//! - [`Fragment`]: an ordered list of literal text, identifiers, bound
//!   values, record helpers and dialect-defined segments
//! - [`Dialect`]: the hooks a database dialect implements (placeholders,
//!   identifier quoting, custom segments, bulk value shaping)
//! - [`StatementCompiler`]: walks a fragment and renders it for a dialect
//!
//! ## SQL Injection Prevention
//!
//! Values are never written into the SQL text. Each one becomes a
//! placeholder and is returned in binding order:
//!
//! ```rust
//! use oxide_sql_core::{Compiler, Fragment, GenericDialect, SqlValue, StatementCompiler};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let compiler = StatementCompiler::new(GenericDialect::new());
//! let stmt: Fragment = Fragment::new()
//!     .sql("SELECT id FROM ")
//!     .ident("users")
//!     .sql(" WHERE name = ")
//!     .param(user_input);
//! let (sql, params) = compiler.compile(&stmt);
//!
//! assert_eq!(sql, "SELECT id FROM \"users\" WHERE name = ?");
//! assert_eq!(params, vec![SqlValue::Text(user_input.to_string())]);
//! ```

pub mod compiler;
pub mod dialect;
pub mod fragment;
pub mod transform;
pub mod value;

pub use compiler::{CompileOptions, Compiler, PlaceholderFn, StatementCompiler};
pub use dialect::{default_escape, Dialect, GenericDialect, Placeholders};
pub use fragment::{Fragment, NoCustom, Record, Returning, Segment};
pub use value::{SqlValue, ToSqlValue};
