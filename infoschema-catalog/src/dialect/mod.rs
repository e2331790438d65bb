// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SQL dialect descriptors and the three dialect spaces
//!
//! Every name that crosses the catalog boundary lives in exactly one of three
//! spaces: what the caller typed (input), what the engine stores and executes
//! (execution) and what the caller gets back (output). Each space is bound to a
//! concrete [`Dialect`] for the lifetime of a session.

pub mod datatype;
pub mod identifier;
pub mod normalizer;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use identifier::{Identifier, QualifiedName};
pub use normalizer::{NormalizeOptions, Normalizer};

/// How a dialect folds the case of identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationStrategy {
    /// Unquoted identifiers fold to lowercase (Postgres)
    Lowercase,
    /// Unquoted identifiers fold to uppercase (Snowflake)
    Uppercase,
    /// Everything folds to lowercase, quoted or not (Spark, DuckDB, Redshift)
    CaseInsensitive,
    /// Identifiers are kept exactly as written (MySQL)
    CaseSensitive,
}

impl NormalizationStrategy {
    /// Fold an identifier name according to this strategy
    pub fn fold(&self, name: &str, quoted: bool) -> String {
        match self {
            NormalizationStrategy::Lowercase if !quoted => name.to_lowercase(),
            NormalizationStrategy::Uppercase if !quoted => name.to_uppercase(),
            NormalizationStrategy::CaseInsensitive => name.to_lowercase(),
            _ => name.to_string(),
        }
    }
}

/// SQL dialects the catalog knows how to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Spark,
    Databricks,
    Postgres,
    Redshift,
    DuckDb,
    Snowflake,
    BigQuery,
    MySql,
}

impl Dialect {
    pub fn normalization_strategy(&self) -> NormalizationStrategy {
        match self {
            Dialect::Postgres => NormalizationStrategy::Lowercase,
            Dialect::Snowflake => NormalizationStrategy::Uppercase,
            Dialect::MySql => NormalizationStrategy::CaseSensitive,
            Dialect::Spark
            | Dialect::Databricks
            | Dialect::Redshift
            | Dialect::DuckDb
            | Dialect::BigQuery => NormalizationStrategy::CaseInsensitive,
        }
    }

    /// Character used to delimit identifiers that need quoting
    pub fn identifier_quote(&self) -> char {
        match self {
            Dialect::Spark | Dialect::Databricks | Dialect::BigQuery | Dialect::MySql => '`',
            Dialect::Postgres | Dialect::Redshift | Dialect::DuckDb | Dialect::Snowflake => '"',
        }
    }

    /// Two dialects share a textual convention when both their folding and
    /// quoting rules agree
    pub fn same_convention(&self, other: &Dialect) -> bool {
        self.normalization_strategy() == other.normalization_strategy()
            && self.identifier_quote() == other.identifier_quote()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dialect::Spark => "spark",
            Dialect::Databricks => "databricks",
            Dialect::Postgres => "postgres",
            Dialect::Redshift => "redshift",
            Dialect::DuckDb => "duckdb",
            Dialect::Snowflake => "snowflake",
            Dialect::BigQuery => "bigquery",
            Dialect::MySql => "mysql",
        };
        write!(f, "{}", s)
    }
}

/// One of the three places a name can live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectSpace {
    Input,
    Execution,
    Output,
}

impl fmt::Display for DialectSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DialectSpace::Input => "input",
            DialectSpace::Execution => "execution",
            DialectSpace::Output => "output",
        };
        write!(f, "{}", s)
    }
}

/// The dialect bound to each space, fixed per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectSpaces {
    pub input: Dialect,
    pub execution: Dialect,
    pub output: Dialect,
}

impl DialectSpaces {
    pub fn new(input: Dialect, execution: Dialect, output: Dialect) -> Self {
        Self {
            input,
            execution,
            output,
        }
    }

    /// Use the same dialect for all three spaces
    pub fn uniform(dialect: Dialect) -> Self {
        Self::new(dialect, dialect, dialect)
    }

    pub fn get(&self, space: DialectSpace) -> Dialect {
        match space {
            DialectSpace::Input => self.input,
            DialectSpace::Execution => self.execution,
            DialectSpace::Output => self.output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_respects_quoting() {
        let lower = NormalizationStrategy::Lowercase;
        assert_eq!(lower.fold("Foo", false), "foo");
        assert_eq!(lower.fold("Foo", true), "Foo");

        let upper = NormalizationStrategy::Uppercase;
        assert_eq!(upper.fold("Foo", false), "FOO");
        assert_eq!(upper.fold("Foo", true), "Foo");

        let insensitive = NormalizationStrategy::CaseInsensitive;
        assert_eq!(insensitive.fold("Foo", true), "foo");
    }

    #[test]
    fn test_same_convention() {
        assert!(Dialect::Spark.same_convention(&Dialect::Databricks));
        assert!(Dialect::DuckDb.same_convention(&Dialect::Redshift));
        assert!(!Dialect::Postgres.same_convention(&Dialect::Snowflake));
        assert!(!Dialect::Spark.same_convention(&Dialect::DuckDb));
    }

    #[test]
    fn test_dialect_serde_names() {
        let spaces: DialectSpaces = serde_json::from_str(
            r#"{"input": "spark", "execution": "duckdb", "output": "spark"}"#,
        )
        .unwrap();
        assert_eq!(spaces.get(DialectSpace::Execution), Dialect::DuckDb);
        assert_eq!(spaces.get(DialectSpace::Input), Dialect::Spark);
    }
}
