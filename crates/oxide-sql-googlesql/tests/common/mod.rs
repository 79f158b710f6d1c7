#![allow(dead_code)]

use oxide_sql_core::fragment::{insert, update, Record};
use oxide_sql_googlesql::{compiler, CompiledStatement, Compiler, Fragment, SqlValue};

pub fn compile(stmt: &Fragment) -> CompiledStatement {
    compiler().compile(stmt)
}

pub fn alice() -> Record {
    Record::new().set("userId", 1).set("displayName", "Alice")
}

/// `INSERT INTO Project.User (userId, displayName) ... RETURNING userId`
pub fn insert_alice() -> Fragment {
    Fragment::new()
        .sql("INSERT INTO Project.User ")
        .append(insert(alice()).returning_column("userId"))
}

/// `UPDATE Project.User SET displayName = 'Bob' WHERE id = 1 RETURNING id`
pub fn update_bob() -> Fragment {
    Fragment::new()
        .sql("UPDATE Project.User SET ")
        .append(update(Record::new().set("displayName", "Bob")))
        .sql(" WHERE id = ")
        .param(1)
        .sql(" RETURNING id")
}

pub fn text(value: &str) -> SqlValue {
    SqlValue::Text(String::from(value))
}

/// Positions of `@paramN` placeholders in order of appearance.
pub fn placeholder_numbers(sql: &str) -> Vec<usize> {
    sql.split("@param")
        .skip(1)
        .map(|rest| {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits
                .parse()
                .unwrap_or_else(|e| panic!("bad placeholder in {sql}: {e}"))
        })
        .collect()
}
