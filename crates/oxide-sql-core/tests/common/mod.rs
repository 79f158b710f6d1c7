#![allow(dead_code)]

use oxide_sql_core::{Compiler, Fragment, GenericDialect, SqlValue, StatementCompiler};

pub fn compile(stmt: &Fragment) -> (String, Vec<SqlValue>) {
    StatementCompiler::new(GenericDialect::new()).compile(stmt)
}

pub fn text(value: &str) -> SqlValue {
    SqlValue::Text(String::from(value))
}
