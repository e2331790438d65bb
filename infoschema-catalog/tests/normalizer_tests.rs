//! Tests for identifier normalization across dialect spaces
//!
//! Exercises the normalizer through the public API over a spread of dialect
//! pairings rather than one fixed session.

use infoschema_catalog::dialect::{NormalizeOptions, Normalizer};
use infoschema_catalog::{Dialect, DialectSpace, DialectSpaces};

const ALL_DIALECTS: [Dialect; 8] = [
    Dialect::Spark,
    Dialect::Databricks,
    Dialect::Postgres,
    Dialect::Redshift,
    Dialect::DuckDb,
    Dialect::Snowflake,
    Dialect::BigQuery,
    Dialect::MySql,
];

const SPACES: [DialectSpace; 3] = [
    DialectSpace::Input,
    DialectSpace::Execution,
    DialectSpace::Output,
];

#[test]
fn test_same_space_is_identity_everywhere() {
    let values = ["orders", "Orders", "ORDERS", "my_table_2", "\"Quoted Name\"", "`odd`"];
    for execution in ALL_DIALECTS {
        let normalizer = Normalizer::new(DialectSpaces::new(Dialect::Spark, execution, Dialect::Postgres));
        for space in SPACES {
            for value in values {
                let out = normalizer
                    .normalize(value, space, space, NormalizeOptions::default())
                    .unwrap();
                assert_eq!(out, value, "{} in {} space over {}", value, space, execution);
            }
        }
    }
}

#[test]
fn test_round_trip_through_execution_space() {
    // Spark output folds to lowercase, so values come back lower-cased unless
    // the engine shares Spark's conventions and the value is left untouched
    let cases = [
        ("orders", "orders"),
        ("Orders", "orders"),
        ("DAILY_TOTALS", "daily_totals"),
        ("`My Table`", "`my table`"),
    ];
    for execution in ALL_DIALECTS {
        let normalizer = Normalizer::new(DialectSpaces::new(Dialect::Spark, execution, Dialect::Spark));
        for (value, folded) in cases {
            let stored = normalizer
                .normalize(
                    value,
                    DialectSpace::Output,
                    DialectSpace::Execution,
                    NormalizeOptions::default(),
                )
                .unwrap();
            let back = normalizer
                .normalize(
                    &stored,
                    DialectSpace::Execution,
                    DialectSpace::Output,
                    NormalizeOptions::default(),
                )
                .unwrap();
            let expected = if execution.same_convention(&Dialect::Spark) {
                value
            } else {
                folded
            };
            assert_eq!(back, expected, "{} via {} ({})", value, execution, stored);
        }
    }
}

#[test]
fn test_execution_spelling_per_engine() {
    let stored = |execution: Dialect, value: &str| {
        Normalizer::new(DialectSpaces::new(Dialect::Spark, execution, Dialect::Spark))
            .normalize(
                value,
                DialectSpace::Input,
                DialectSpace::Execution,
                NormalizeOptions::default(),
            )
            .unwrap()
    };

    assert_eq!(stored(Dialect::Snowflake, "Orders"), "ORDERS");
    assert_eq!(stored(Dialect::Postgres, "Orders"), "orders");
    assert_eq!(stored(Dialect::MySql, "Orders"), "orders");
    assert_eq!(stored(Dialect::Snowflake, "`Order Lines`"), "\"order lines\"");
    assert_eq!(stored(Dialect::Postgres, "`a\"b`"), "\"a\"\"b\"");
}

#[test]
fn test_case_sensitive_input_keeps_quoted_case() {
    let normalizer = Normalizer::new(DialectSpaces::new(
        Dialect::Postgres,
        Dialect::Snowflake,
        Dialect::Postgres,
    ));
    let quoted = normalizer
        .normalize(
            "\"Orders\"",
            DialectSpace::Input,
            DialectSpace::Execution,
            NormalizeOptions::default(),
        )
        .unwrap();
    assert_eq!(quoted, "\"Orders\"");

    let bare = normalizer
        .normalize(
            "Orders",
            DialectSpace::Input,
            DialectSpace::Execution,
            NormalizeOptions::default(),
        )
        .unwrap();
    assert_eq!(bare, "ORDERS");

    let back = normalizer
        .normalize(
            "ORDERS",
            DialectSpace::Execution,
            DialectSpace::Output,
            NormalizeOptions::default(),
        )
        .unwrap();
    assert_eq!(back, "orders");
}

#[test]
fn test_string_literals_and_patterns() {
    let normalizer = Normalizer::new(DialectSpaces::new(
        Dialect::Spark,
        Dialect::Snowflake,
        Dialect::Spark,
    ));

    let literal = normalizer
        .normalize(
            "sales.`Q1 Orders`",
            DialectSpace::Input,
            DialectSpace::Execution,
            NormalizeOptions::table().as_string_literal(),
        )
        .unwrap();
    assert_eq!(literal, "'SALES.q1 orders'");

    let pattern = normalizer
        .normalize(
            "Sales_*",
            DialectSpace::Input,
            DialectSpace::Execution,
            NormalizeOptions::pattern(),
        )
        .unwrap();
    assert_eq!(pattern, "SALES_*");
}
