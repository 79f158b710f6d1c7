//! Tests for the structural compiler with the generic dialect: literals,
//! identifiers, parameters, IN lists, record helpers, RETURNING, clause
//! joining and placeholder overrides.

mod common;
use common::*;

use std::sync::Arc;

use oxide_sql_core::fragment::{
    and, insert, insert_many, or, unsafe_sql, update, update_values,
};
use oxide_sql_core::{
    CompileOptions, Compiler, Fragment, GenericDialect, Record, Returning, SqlValue,
    StatementCompiler,
};

#[test]
fn test_select_with_in_list() {
    let stmt: Fragment = Fragment::new()
        .sql("SELECT ")
        .ident("id")
        .sql(" FROM ")
        .ident("users")
        .sql(" WHERE status IN ")
        .in_list(vec!["active", "pending"]);
    let (sql, params) = compile(&stmt);
    assert_eq!(sql, "SELECT \"id\" FROM \"users\" WHERE status IN (?,?)");
    assert_eq!(params, vec![text("active"), text("pending")]);
}

#[test]
fn test_insert_single_row() {
    let stmt: Fragment = Fragment::new()
        .sql("INSERT INTO users ")
        .append(insert(Record::new().set("name", "Alice").set("age", 30)));
    let (sql, params) = compile(&stmt);
    assert_eq!(sql, "INSERT INTO users (\"name\",\"age\") VALUES (?,?)");
    assert_eq!(params, vec![text("Alice"), SqlValue::Int(30)]);
}

#[test]
fn test_insert_multiple_rows_with_returning() {
    let stmt: Fragment = Fragment::new().sql("INSERT INTO users ").append(
        insert_many(vec![
            Record::new().set("name", "A"),
            Record::new().set("name", "B"),
            Record::new().set("name", "C"),
        ])
        .returning_column("id"),
    );
    let (sql, params) = compile(&stmt);
    assert_eq!(
        sql,
        "INSERT INTO users (\"name\") VALUES (?),(?),(?) RETURNING \"id\""
    );
    assert_eq!(params.len(), 3);
}

#[test]
fn test_update_single_with_omit_and_returning() {
    let record = Record::new()
        .set("id", 1)
        .set("name", "Bob")
        .set("active", false);
    let stmt: Fragment = Fragment::new()
        .sql("UPDATE users SET ")
        .append(update(record).omit(&["id"]).returning(Returning::All));
    let (sql, params) = compile(&stmt);
    assert_eq!(
        sql,
        "UPDATE users SET \"name\" = ?, \"active\" = ? RETURNING *"
    );
    assert_eq!(params, vec![text("Bob"), SqlValue::Bool(false)]);
}

#[test]
fn test_update_values_default_shape() {
    let stmt: Fragment = Fragment::new()
        .sql("UPDATE users SET name = u.name FROM ")
        .append(update_values(
            vec![
                Record::new().set("id", 1).set("name", "a"),
                Record::new().set("id", 2).set("name", "b"),
            ],
            "u",
        ))
        .sql(" WHERE users.id = u.id");
    let (sql, params) = compile(&stmt);
    assert_eq!(
        sql,
        "UPDATE users SET name = u.name FROM (values (?,?),(?,?)) AS \"u\"(\"id\",\"name\") \
         WHERE users.id = u.id"
    );
    assert_eq!(
        params,
        vec![SqlValue::Int(1), text("a"), SqlValue::Int(2), text("b")]
    );
}

#[test]
fn test_and_or_clauses() {
    let active: Fragment = Fragment::new().sql("active = ").param(true);
    let age: Fragment = Fragment::new().sql("age > ").param(18);
    let verified: Fragment = unsafe_sql("verified");
    let stmt = Fragment::new()
        .sql("SELECT * FROM users WHERE ")
        .append(and(vec![active, or(vec![age, verified])]));
    let (sql, params) = compile(&stmt);
    assert_eq!(
        sql,
        "SELECT * FROM users WHERE (active = ? AND (age > ? OR verified))"
    );
    assert_eq!(params, vec![SqlValue::Bool(true), SqlValue::Int(18)]);
}

#[test]
fn test_empty_and_is_true() {
    let stmt = Fragment::new()
        .sql("SELECT * FROM users WHERE ")
        .append(and(vec![]));
    assert_eq!(compile(&stmt).0, "SELECT * FROM users WHERE 1=1");
}

#[test]
fn test_placeholder_override() {
    let compiler = StatementCompiler::new(GenericDialect::new());
    let options = CompileOptions::new().placeholder(Arc::new(|value: &SqlValue| match value {
        SqlValue::Int(n) => format!(":int{n}"),
        _ => String::from(":other"),
    }));
    let stmt: Fragment = Fragment::new()
        .sql("SELECT ")
        .param(4)
        .sql(", ")
        .param("x");
    let (sql, _) = compiler.compile_with(&stmt, &options);
    assert_eq!(sql, "SELECT :int4, :other");
}

#[test]
fn test_sql_injection_prevention() {
    let malicious = "'; DROP TABLE users; --";
    let stmt: Fragment = Fragment::new()
        .sql("SELECT * FROM users WHERE name = ")
        .param(malicious);
    let (sql, params) = compile(&stmt);
    // The value is parameterized, not interpolated
    assert_eq!(sql, "SELECT * FROM users WHERE name = ?");
    assert!(matches!(&params[0], SqlValue::Text(s) if s == malicious));
}

#[test]
fn test_compile_is_repeatable() {
    let stmt: Fragment = Fragment::new()
        .sql("INSERT INTO t ")
        .append(insert(Record::new().set("a", 1)).returning_all());
    assert_eq!(compile(&stmt), compile(&stmt));
}
