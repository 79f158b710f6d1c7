//! # oxide-sql-googlesql
//!
//! GoogleSQL (Spanner) dialect for `oxide-sql-core`.
//!
//! # How GoogleSQL differs from other dialects
//!
//! - **Identifiers** are quoted with backticks; qualified names quote each
//!   part (`` `Project`.`User` ``).
//! - **Parameters** are named: `@param1`, `@param2`, ... in binding order.
//! - **`THEN RETURN`** replaces `RETURNING` on DML. Statements are compiled
//!   with `RETURNING` and rewritten at the end of each compile.
//! - **Typed parameters**: Spanner cannot always tell `INT64` from
//!   `FLOAT64`, or type a bare `NULL`. Every compile collects a wire type
//!   per parameter, inferred from the value or given explicitly with
//!   [`param_of`] / [`null_of`], and attaches it to the [`ParamList`].
//!
//! ## Example
//!
//! ```rust
//! use oxide_sql_core::fragment::{insert, Record};
//! use oxide_sql_googlesql::{compiler, types, Compiler, Fragment, SqlValue};
//!
//! let stmt = Fragment::new()
//!     .sql("INSERT INTO Singers ")
//!     .append(
//!         insert(Record::new().set("SingerId", 1).set("Name", "Alice"))
//!             .returning_column("SingerId"),
//!     );
//! let compiled = compiler().compile(&stmt);
//!
//! assert_eq!(
//!     compiled.sql(),
//!     "INSERT INTO Singers (`SingerId`,`Name`) VALUES (@param1,@param2) THEN RETURN `SingerId`"
//! );
//! assert_eq!(compiled.params().values(), &[SqlValue::Int(1), SqlValue::Text("Alice".into())]);
//! assert_eq!(compiled.params().param_type(0), Some(&types::int64()));
//! ```

mod compiler;
mod context;
mod dialect;
pub mod error;
pub mod functions;
mod infer;
mod params;
mod typed_param;
pub mod types;

pub use compiler::{
    compiler, rewrite_returning, CompiledStatement, GoogleSqlCompiler, GoogleSqlCompilerBuilder,
};
pub use context::ParamContext;
pub use dialect::{GoogleSqlDialect, NameTransform};
pub use error::{Result, TypeError};
pub use infer::infer_type;
pub use params::{attach_param_types_metadata, param_type_metadata, ParamList};
pub use typed_param::{normalize_type_hint, null_of, param_of, Fragment, TypeHint, TypedParam};
pub use types::{TypeCode, WireType};

pub use oxide_sql_core::{CompileOptions, Compiler, SqlValue, ToSqlValue};
