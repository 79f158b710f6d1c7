//! End-to-end compilation: placeholders, identifier quoting, THEN RETURN,
//! bulk shaping, and the parameter type side channel.

mod common;
use common::*;

use std::sync::Arc;

use oxide_sql_core::fragment::{insert, update_values, Record, Returning};
use oxide_sql_core::transform::camel_to_snake;
use oxide_sql_googlesql::{
    null_of, param_of, types, CompileOptions, Compiler, Fragment, GoogleSqlCompiler, SqlValue,
};

#[test]
fn test_insert_with_returning() {
    let compiled = compile(&insert_alice());
    let sql = compiled.sql();

    assert!(sql.contains("(`userId`,`displayName`)"));
    assert!(sql.contains("@param1"));
    assert!(sql.contains("@param2"));
    assert!(sql.contains("THEN RETURN"));
    assert_eq!(
        sql,
        "INSERT INTO Project.User (`userId`,`displayName`) VALUES (@param1,@param2) \
         THEN RETURN `userId`"
    );
    assert_eq!(compiled.params().values(), &[SqlValue::Int(1), text("Alice")]);
}

#[test]
fn test_insert_collects_inferred_types() {
    let compiled = compile(&insert_alice());
    assert_eq!(
        compiled.params().param_types(),
        Some(&[Some(types::int64()), Some(types::string())][..])
    );
}

#[test]
fn test_update_rewrites_returning() {
    let compiled = compile(&update_bob());
    let sql = compiled.sql();

    assert!(!sql.contains("RETURNING"));
    assert!(sql.contains("THEN RETURN id"));
    assert_eq!(
        sql,
        "UPDATE Project.User SET `displayName` = @param1 WHERE id = @param2 THEN RETURN id"
    );
    assert_eq!(compiled.params().values(), &[text("Bob"), SqlValue::Int(1)]);
}

#[test]
fn test_param_of_sets_explicit_type() {
    let stmt = Fragment::new()
        .sql("SELECT * FROM Singers WHERE SingerId = ")
        .append(param_of("int64", 5));
    let compiled = compile(&stmt);

    assert_eq!(compiled.sql(), "SELECT * FROM Singers WHERE SingerId = @param1");
    assert_eq!(compiled.params().values(), &[SqlValue::Int(5)]);
    let ty = compiled.params().param_type(0).expect("explicit type");
    assert_eq!(
        serde_json::to_value(ty).unwrap(),
        serde_json::json!({"code": "INT64"})
    );
}

#[test]
fn test_param_of_wins_over_inference() {
    let stmt = Fragment::new()
        .sql("SELECT ")
        .append(param_of("FLOAT64", 5));
    let compiled = compile(&stmt);
    assert_eq!(compiled.params().param_type(0), Some(&types::float64()));
}

#[test]
fn test_null_of_binds_typed_null() {
    let stmt = Fragment::new()
        .sql("UPDATE Singers SET Bio = ")
        .append(null_of("string"))
        .sql(" WHERE SingerId = ")
        .param(7);
    let compiled = compile(&stmt);

    assert_eq!(compiled.params().values(), &[SqlValue::Null, SqlValue::Int(7)]);
    let ty = compiled.params().param_type(0).expect("explicit type");
    assert_eq!(
        serde_json::to_value(ty).unwrap(),
        serde_json::json!({"code": "STRING"})
    );
}

#[test]
fn test_explicit_types_leave_uninferred_positions_empty() {
    let stmt = Fragment::new()
        .sql("SELECT ")
        .param(SqlValue::Null)
        .sql(", ")
        .append(param_of(types::bytes(), vec![0xCA_u8, 0xFE]))
        .sql(", ")
        .param(SqlValue::Array(vec![]));
    let compiled = compile(&stmt);

    assert_eq!(
        compiled.params().param_types(),
        Some(&[None, Some(types::bytes()), None][..])
    );
}

#[test]
fn test_no_types_means_no_metadata() {
    let compiled = compile(&Fragment::new().sql("SELECT 1"));
    assert_eq!(compiled.params().param_types(), None);

    let stmt = Fragment::new()
        .sql("SELECT * FROM t WHERE a IS ")
        .param(SqlValue::Null);
    let compiled = compile(&stmt);
    assert_eq!(compiled.params().len(), 1);
    assert_eq!(compiled.params().param_types(), None);
}

#[test]
fn test_unknown_type_name_falls_back_to_inference() {
    let stmt = Fragment::new().sql("SELECT ").append(param_of("numeric128", 5));
    let compiled = compile(&stmt);
    assert_eq!(compiled.params().param_type(0), Some(&types::int64()));

    let compiled = compile(&Fragment::new().sql("SELECT ").append(null_of("numeric128")));
    assert_eq!(compiled.params().param_types(), None);
}

#[test]
fn test_placeholders_follow_binding_order() {
    let stmt = Fragment::new()
        .sql("SELECT * FROM t WHERE a = ")
        .param(1)
        .sql(" AND b IN ")
        .in_list(vec!["x", "y", "z"])
        .sql(" AND c = ")
        .append(param_of("float64", 2.5))
        .sql(" AND d = ")
        .append(null_of("date"))
        .sql(" AND e = ")
        .param(true);
    let compiled = compile(&stmt);

    let numbers = placeholder_numbers(compiled.sql());
    assert_eq!(numbers, (1..=7).collect::<Vec<_>>());
    assert_eq!(compiled.params().len(), 7);
    assert_eq!(compiled.params()[1], text("x"));
    assert_eq!(compiled.params()[5], SqlValue::Null);
    assert_eq!(compiled.params().param_type(5), Some(&types::date()));
    assert_eq!(compiled.params().param_type(6), Some(&types::bool()));
}

#[test]
fn test_compiling_twice_is_idempotent() {
    let stmt = Fragment::new()
        .append(insert_alice())
        .sql("; SELECT ")
        .append(param_of("json", serde_json::json!({"a": 1})));
    let first = compile(&stmt);
    let second = compile(&stmt);

    assert_eq!(first, second);
    assert_eq!(placeholder_numbers(second.sql()), vec![1, 2, 3]);
}

#[test]
fn test_identifiers_without_transform() {
    let stmt = Fragment::new().sql("SELECT ").ident("userId");
    assert!(compile(&stmt).sql().contains("`userId`"));
}

#[test]
fn test_identifiers_with_transform() {
    let compiler = GoogleSqlCompiler::builder()
        .transform_query_names(camel_to_snake)
        .build();
    let compiled = compiler.compile(&insert_alice());

    assert!(compiled.sql().contains("(`user_id`,`display_name`)"));
    assert!(compiled.sql().ends_with("THEN RETURN `user_id`"));
}

#[test]
fn test_without_transform_sibling_keeps_pipeline() {
    let compiler = GoogleSqlCompiler::builder()
        .transform_query_names(camel_to_snake)
        .build();
    let sibling = compiler.without_transform();
    let compiled = sibling.compile(&insert_alice());

    assert!(compiled.sql().contains("(`userId`,`displayName`)"));
    assert!(compiled.sql().contains("THEN RETURN"));
    assert_eq!(compiled.params().param_type(0), Some(&types::int64()));
    // The transforming compiler is unaffected.
    assert!(compiler.compile(&insert_alice()).sql().contains("`user_id`"));
}

#[test]
fn test_without_transform_option_per_call() {
    let compiler = GoogleSqlCompiler::builder()
        .transform_query_names(camel_to_snake)
        .build();
    let stmt = Fragment::new().sql("SELECT ").ident("userId");
    let compiled = compiler.compile_with(&stmt, &CompileOptions::new().without_transform());
    assert_eq!(compiled.sql(), "SELECT `userId`");
}

#[test]
fn test_qualified_and_escaped_identifiers() {
    let stmt = Fragment::new()
        .sql("SELECT * FROM ")
        .ident("Project.User")
        .sql(" AS ")
        .ident("we`ird");
    assert_eq!(
        compile(&stmt).sql(),
        "SELECT * FROM `Project`.`User` AS `we``ird`"
    );
}

#[test]
fn test_bulk_update_values_with_returning() {
    let rows = vec![
        Record::new().set("id", 1).set("name", "a"),
        Record::new().set("id", 2).set("name", "b"),
    ];
    let stmt = Fragment::new()
        .sql("UPDATE Users SET name = u.name FROM ")
        .append(update_values(rows, "u").returning(Returning::Fragment(
            Fragment::new().ident("id").sql(" + ").param(10),
        )));
    let compiled = compile(&stmt);

    assert_eq!(
        compiled.sql(),
        "UPDATE Users SET name = u.name FROM \
         (VALUES (@param1,@param2),(@param3,@param4)) AS `u`(`id`,`name`) \
         THEN RETURN `id` + @param5"
    );
    assert_eq!(
        compiled.params().values(),
        &[
            SqlValue::Int(1),
            text("a"),
            SqlValue::Int(2),
            text("b"),
            SqlValue::Int(10),
        ]
    );
}

#[test]
fn test_bulk_update_values_without_returning() {
    let stmt: Fragment = update_values(vec![Record::new().set("id", 1)], "u").into();
    let compiled = compile(&stmt);

    assert_eq!(compiled.sql(), "(VALUES (@param1)) AS `u`(`id`)");
    assert_eq!(compiled.params().values(), &[SqlValue::Int(1)]);
}

#[test]
fn test_typed_param_inside_returning_keeps_numbering() {
    let stmt = Fragment::new().sql("INSERT INTO t ").append(
        insert(Record::new().set("a", 1).set("b", 2))
            .returning(Returning::Fragment(param_of("float64", 3))),
    );
    let compiled = compile(&stmt);

    assert_eq!(
        compiled.sql(),
        "INSERT INTO t (`a`,`b`) VALUES (@param1,@param2) THEN RETURN @param3"
    );
    assert_eq!(
        compiled.params().param_types(),
        Some(&[Some(types::int64()), Some(types::int64()), Some(types::float64())][..])
    );
}

#[test]
fn test_insert_returning_all() {
    let stmt = Fragment::new()
        .sql("INSERT INTO t ")
        .append(insert(Record::new().set("a", 1)).returning_all());
    assert_eq!(
        compile(&stmt).sql(),
        "INSERT INTO t (`a`) VALUES (@param1) THEN RETURN *"
    );
}

#[test]
fn test_multi_row_insert() {
    let stmt = Fragment::new().sql("INSERT INTO t ").append(
        oxide_sql_core::fragment::insert_many(vec![alice(), Record::new().set("userId", 2)]),
    );
    let compiled = compile(&stmt);

    assert_eq!(
        compiled.sql(),
        "INSERT INTO t (`userId`,`displayName`) VALUES (@param1,@param2),(@param3,@param4)"
    );
    assert_eq!(compiled.params()[3], SqlValue::Null);
    assert_eq!(compiled.params().param_type(3), None);
}

#[test]
fn test_placeholder_override_keeps_type_collection() {
    let options = CompileOptions::new().placeholder(Arc::new(|_: &SqlValue| String::from("?")));
    let stmt = Fragment::new()
        .sql("SELECT ")
        .param(1)
        .sql(", ")
        .append(null_of("timestamp"));
    let compiled = oxide_sql_googlesql::compiler().compile_with(&stmt, &options);

    assert_eq!(compiled.sql(), "SELECT ?, ?");
    assert_eq!(
        compiled.params().param_types(),
        Some(&[Some(types::int64()), Some(types::timestamp())][..])
    );
}

#[test]
fn test_returning_rewrite_only_touches_the_keyword() {
    let stmt = Fragment::new()
        .sql("DELETE FROM t WHERE ")
        .ident("RETURNING_at")
        .sql(" < ")
        .param(3)
        .sql(" RETURNING id, RETURNING_at");
    assert_eq!(
        compile(&stmt).sql(),
        "DELETE FROM t WHERE `RETURNING_at` < @param1 THEN RETURN id, RETURNING_at"
    );
}

#[test]
fn test_concurrent_compiles_do_not_share_state() {
    let stmt = insert_alice();
    let expected = compile(&stmt);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| (0..50).map(|_| compile(&stmt)).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            for compiled in handle.join().unwrap() {
                assert_eq!(compiled, expected);
            }
        }
    });
}

#[test]
fn test_into_parts_returns_sql_and_params() {
    let (sql, params) = compile(&update_bob()).into_parts();
    assert!(sql.starts_with("UPDATE"));
    assert_eq!(params.into_values(), vec![text("Bob"), SqlValue::Int(1)]);
}

#[test]
fn test_trailing_untyped_params_keep_metadata_aligned() {
    let stmt = Fragment::new()
        .sql("SELECT ")
        .param(1)
        .sql(", ")
        .param(SqlValue::Null)
        .sql(", ")
        .param(SqlValue::Array(vec![]));
    let compiled = compile(&stmt);

    assert_eq!(
        compiled.params().param_types(),
        Some(&[Some(types::int64()), None, None][..])
    );
}

#[test]
fn test_transform_keeps_acronyms_and_qualified_names() {
    let compiler = GoogleSqlCompiler::builder()
        .transform_query_names(camel_to_snake)
        .build();
    let stmt = Fragment::new()
        .sql("SELECT ")
        .ident("userID")
        .sql(" FROM ")
        .ident("Project.User");
    assert_eq!(
        compiler.compile(&stmt).sql(),
        "SELECT `user_id` FROM `project`.`user`"
    );
}
