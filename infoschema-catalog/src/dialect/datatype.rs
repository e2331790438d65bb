// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Data type names across dialects
//!
//! Information schemas report column types in each engine's own spelling
//! (`character varying`, `TEXT`, `INT64`). Column listings translate those
//! spellings into the output dialect through [`SqlType`].

use super::Dialect;
use std::fmt;

/// Canonical SQL type, independent of any dialect's spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal(Option<String>),
    Varchar(Option<String>),
    Char(Option<String>),
    Text,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Binary,
    Json,
    Uuid,
    /// Anything not recognized is carried through, upper-cased
    Other(String),
}

impl SqlType {
    /// Parse a type name as reported by an engine. Never fails: unknown names
    /// become [`SqlType::Other`].
    pub fn parse(text: &str) -> Self {
        let (base, params) = split_params(text);
        let base = base
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        match base.as_str() {
            "BOOLEAN" | "BOOL" => SqlType::Boolean,
            "TINYINT" | "INT1" | "BYTE" => SqlType::TinyInt,
            "SMALLINT" | "INT2" | "SHORT" => SqlType::SmallInt,
            "INT" | "INTEGER" | "INT4" => SqlType::Int,
            "BIGINT" | "INT8" | "LONG" | "INT64" => SqlType::BigInt,
            "REAL" | "FLOAT4" | "FLOAT" => SqlType::Float,
            "DOUBLE" | "DOUBLE PRECISION" | "FLOAT8" | "FLOAT64" => SqlType::Double,
            "DECIMAL" | "NUMERIC" | "NUMBER" => SqlType::Decimal(params),
            "VARCHAR" | "CHARACTER VARYING" => SqlType::Varchar(params),
            "CHAR" | "CHARACTER" | "BPCHAR" => SqlType::Char(params),
            "TEXT" | "STRING" => SqlType::Text,
            "DATE" => SqlType::Date,
            "TIME" | "TIME WITHOUT TIME ZONE" => SqlType::Time,
            "TIMESTAMP" | "TIMESTAMP WITHOUT TIME ZONE" | "TIMESTAMP_NTZ" | "DATETIME" => {
                SqlType::Timestamp
            }
            "TIMESTAMPTZ" | "TIMESTAMP WITH TIME ZONE" | "TIMESTAMP_TZ" | "TIMESTAMP_LTZ" => {
                SqlType::TimestampTz
            }
            "BYTEA" | "BINARY" | "VARBINARY" | "BLOB" | "BYTES" => SqlType::Binary,
            "JSON" | "JSONB" | "VARIANT" => SqlType::Json,
            "UUID" => SqlType::Uuid,
            _ => SqlType::Other(match params {
                Some(p) => format!("{}{}", base, p),
                None => base,
            }),
        }
    }

    /// Spell this type the way `dialect` does
    pub fn to_sql(&self, dialect: Dialect) -> String {
        use Dialect::*;

        let rendered = match (self, dialect) {
            (SqlType::Boolean, BigQuery) => "BOOL".to_string(),
            (SqlType::Boolean, _) => "BOOLEAN".to_string(),
            (SqlType::TinyInt | SqlType::SmallInt | SqlType::Int | SqlType::BigInt, BigQuery) => {
                "INT64".to_string()
            }
            (SqlType::TinyInt, Postgres | Redshift) => "SMALLINT".to_string(),
            (SqlType::TinyInt, _) => "TINYINT".to_string(),
            (SqlType::SmallInt, _) => "SMALLINT".to_string(),
            (SqlType::Int, _) => "INT".to_string(),
            (SqlType::BigInt, _) => "BIGINT".to_string(),
            (SqlType::Float | SqlType::Double, BigQuery) => "FLOAT64".to_string(),
            (SqlType::Float, Postgres | Redshift) => "REAL".to_string(),
            (SqlType::Float, _) => "FLOAT".to_string(),
            (SqlType::Double, Postgres | Redshift) => "DOUBLE PRECISION".to_string(),
            (SqlType::Double, _) => "DOUBLE".to_string(),
            (SqlType::Decimal(p), BigQuery) => with_params("NUMERIC", p),
            (SqlType::Decimal(p), _) => with_params("DECIMAL", p),
            (SqlType::Varchar(_) | SqlType::Char(_), BigQuery) => "STRING".to_string(),
            (SqlType::Varchar(None), Spark | Databricks) => "STRING".to_string(),
            (SqlType::Varchar(p), _) => with_params("VARCHAR", p),
            (SqlType::Char(p), _) => with_params("CHAR", p),
            (SqlType::Text, Spark | Databricks | BigQuery) => "STRING".to_string(),
            (SqlType::Text, _) => "TEXT".to_string(),
            (SqlType::Date, _) => "DATE".to_string(),
            (SqlType::Time, _) => "TIME".to_string(),
            (SqlType::Timestamp, BigQuery | MySql) => "DATETIME".to_string(),
            (SqlType::Timestamp, Databricks) => "TIMESTAMP_NTZ".to_string(),
            (SqlType::Timestamp, _) => "TIMESTAMP".to_string(),
            (SqlType::TimestampTz, Postgres | Redshift | DuckDb) => "TIMESTAMPTZ".to_string(),
            (SqlType::TimestampTz, Snowflake) => "TIMESTAMP_TZ".to_string(),
            (SqlType::TimestampTz, _) => "TIMESTAMP".to_string(),
            (SqlType::Binary, Postgres | Redshift) => "BYTEA".to_string(),
            (SqlType::Binary, BigQuery) => "BYTES".to_string(),
            (SqlType::Binary, DuckDb | MySql) => "BLOB".to_string(),
            (SqlType::Binary, _) => "BINARY".to_string(),
            (SqlType::Json, Snowflake) => "VARIANT".to_string(),
            (SqlType::Json, _) => "JSON".to_string(),
            (SqlType::Uuid, Postgres | DuckDb) => "UUID".to_string(),
            (SqlType::Uuid, _) => SqlType::Text.to_sql(dialect),
            (SqlType::Other(name), _) => name.clone(),
        };

        // Spark-family engines present type names in lowercase
        match dialect {
            Spark | Databricks => rendered.to_lowercase(),
            _ => rendered,
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql(Dialect::Postgres))
    }
}

/// Split `numeric(10, 2)` into `("numeric", Some("(10,2)"))`
fn split_params(text: &str) -> (&str, Option<String>) {
    let trimmed = text.trim();
    match (trimmed.find('('), trimmed.rfind(')')) {
        (Some(open), Some(close)) if close > open => {
            let inner: String = trimmed[open + 1..close]
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            (&trimmed[..open], Some(format!("({})", inner)))
        }
        _ => (trimmed, None),
    }
}

fn with_params(base: &str, params: &Option<String>) -> String {
    match params {
        Some(p) => format!("{}{}", base, p),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engine_spellings() {
        assert_eq!(SqlType::parse("character varying"), SqlType::Varchar(None));
        assert_eq!(SqlType::parse("integer"), SqlType::Int);
        assert_eq!(
            SqlType::parse("timestamp without time zone"),
            SqlType::Timestamp
        );
        assert_eq!(
            SqlType::parse("NUMBER(38, 0)"),
            SqlType::Decimal(Some("(38,0)".to_string()))
        );
        assert_eq!(
            SqlType::parse("geometry"),
            SqlType::Other("GEOMETRY".to_string())
        );
    }

    #[test]
    fn test_render_per_dialect() {
        assert_eq!(SqlType::parse("TEXT").to_sql(Dialect::Spark), "string");
        assert_eq!(SqlType::parse("integer").to_sql(Dialect::Spark), "int");
        assert_eq!(SqlType::parse("INT64").to_sql(Dialect::Postgres), "BIGINT");
        assert_eq!(
            SqlType::parse("float8").to_sql(Dialect::Postgres),
            "DOUBLE PRECISION"
        );
        assert_eq!(
            SqlType::parse("numeric(10,2)").to_sql(Dialect::BigQuery),
            "NUMERIC(10,2)"
        );
        assert_eq!(SqlType::parse("jsonb").to_sql(Dialect::Snowflake), "VARIANT");
    }
}
