// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Engine profiles
//!
//! An [`EngineProfile`] is the immutable, per-engine description of how the
//! catalog talks to an information schema: how to spell the metadata views,
//! which builtins report the current catalog/database and which statement form
//! switches them. Profiles are plain serde records, so a deployment can ship its
//! own as JSON; the common engines come built in through [`Engine`].

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::dialect::{Dialect, DialectSpaces};
use crate::query::Expr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Builtin used to read a piece of session context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    /// `false` for keyword-style builtins such as Postgres' `current_catalog`
    #[serde(default = "default_parens")]
    pub parens: bool,
}

fn default_parens() -> bool {
    true
}

impl FunctionSpec {
    pub fn call(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parens: true,
        }
    }

    pub fn keyword(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parens: false,
        }
    }

    pub fn to_expr(&self) -> Expr {
        Expr::Function {
            name: self.name.clone(),
            parens: self.parens,
        }
    }
}

/// Where the current catalog is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogSource {
    /// Builtin reporting the current catalog
    Function(FunctionSpec),
    /// Engines without a catalog level report one constant name, such as
    /// MySQL's `def`
    Fixed { fixed: String },
}

impl CatalogSource {
    /// Whether the engine has catalogs above its databases
    pub fn has_catalog_level(&self) -> bool {
        matches!(self, CatalogSource::Function(_))
    }
}

impl From<FunctionSpec> for CatalogSource {
    fn from(function: FunctionSpec) -> Self {
        CatalogSource::Function(function)
    }
}

/// Native mechanism an engine offers for switching catalog or database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwitchMechanism {
    /// `USE [<keyword>] <name>`
    Use {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        keyword: Option<String>,
    },
    /// `SET <variable> TO "<name>"`
    SessionVariable { variable: String },
    /// The engine cannot switch this context from within a session
    Unsupported,
}

impl SwitchMechanism {
    /// Bare `USE <name>`
    pub fn use_statement() -> Self {
        SwitchMechanism::Use { keyword: None }
    }

    /// `USE <keyword> <name>`, e.g. `USE CATALOG main`
    pub fn use_keyword(keyword: &str) -> Self {
        SwitchMechanism::Use {
            keyword: Some(keyword.to_string()),
        }
    }
}

/// `<column> LIKE '<pattern>'` predicate marking engine-managed temporary objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempPredicate {
    pub column: String,
    pub like: String,
}

impl TempPredicate {
    pub fn new(column: &str, like: &str) -> Self {
        Self {
            column: column.to_string(),
            like: like.to_string(),
        }
    }

    pub fn to_expr(&self) -> Expr {
        Expr::column(self.column.as_str()).like(Expr::literal(self.like.as_str()))
    }
}

/// Immutable per-engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineProfile {
    pub name: String,
    pub execution_dialect: Dialect,
    /// Spell metadata views as `INFORMATION_SCHEMA.<VIEW>`
    #[serde(default)]
    pub uppercase_info_schema: bool,
    /// Prefix metadata views with the database they describe; a missing
    /// database is an error
    #[serde(default)]
    pub qualify_info_schema_with_database: bool,
    /// Prefix metadata views with the catalog in scope, when there is one
    #[serde(default)]
    pub qualify_info_schema_with_catalog: bool,
    /// Widens schema filters when temporary objects are requested
    #[serde(default)]
    pub temp_schema_filter: Option<TempPredicate>,
    /// Widens catalog filters when temporary objects are requested
    #[serde(default)]
    pub temp_catalog_filter: Option<TempPredicate>,
    pub current_catalog: CatalogSource,
    pub current_database: FunctionSpec,
    pub set_catalog: SwitchMechanism,
    pub set_database: SwitchMechanism,
}

impl EngineProfile {
    /// Load a profile from a JSON document
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let profile: EngineProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        let catalog_source = match &self.current_catalog {
            CatalogSource::Function(function) => &function.name,
            CatalogSource::Fixed { fixed } => fixed,
        };
        if catalog_source.trim().is_empty() || self.current_database.name.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(format!(
                "engine profile '{}' has an empty context function name",
                self.name
            )));
        }
        for mechanism in [&self.set_catalog, &self.set_database] {
            let blank = match mechanism {
                SwitchMechanism::SessionVariable { variable } => variable.trim().is_empty(),
                SwitchMechanism::Use { keyword: Some(keyword) } => keyword.trim().is_empty(),
                _ => false,
            };
            if blank {
                return Err(CatalogError::InvalidConfig(format!(
                    "engine profile '{}' has an empty switch variable or keyword",
                    self.name
                )));
            }
        }
        if !self.current_catalog.has_catalog_level() && self.set_catalog != SwitchMechanism::Unsupported {
            return Err(CatalogError::InvalidConfig(format!(
                "engine profile '{}' has a fixed catalog and cannot switch catalogs",
                self.name
            )));
        }
        Ok(())
    }
}

/// Engines with a built-in profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Postgres,
    Redshift,
    DuckDb,
    Snowflake,
    Databricks,
    MySql,
    BigQuery,
}

impl Engine {
    pub fn profile(&self) -> EngineProfile {
        match self {
            Engine::Postgres => postgres_family(Engine::Postgres, Dialect::Postgres),
            Engine::Redshift => postgres_family(Engine::Redshift, Dialect::Redshift),
            Engine::DuckDb => EngineProfile {
                name: self.to_string(),
                execution_dialect: Dialect::DuckDb,
                uppercase_info_schema: false,
                qualify_info_schema_with_database: false,
                qualify_info_schema_with_catalog: false,
                temp_schema_filter: None,
                temp_catalog_filter: Some(TempPredicate::new("table_catalog", "temp")),
                current_catalog: FunctionSpec::call("current_database").into(),
                current_database: FunctionSpec::call("current_schema"),
                set_catalog: SwitchMechanism::use_statement(),
                set_database: SwitchMechanism::use_statement(),
            },
            // `<database>.INFORMATION_SCHEMA` names a database, so views are
            // prefixed with the catalog rather than the schema
            Engine::Snowflake => EngineProfile {
                name: self.to_string(),
                execution_dialect: Dialect::Snowflake,
                uppercase_info_schema: true,
                qualify_info_schema_with_database: false,
                qualify_info_schema_with_catalog: true,
                temp_schema_filter: None,
                temp_catalog_filter: None,
                current_catalog: FunctionSpec::call("current_database").into(),
                current_database: FunctionSpec::call("current_schema"),
                set_catalog: SwitchMechanism::use_keyword("DATABASE"),
                set_database: SwitchMechanism::use_statement(),
            },
            // A bare `USE` selects a schema
            Engine::Databricks => EngineProfile {
                name: self.to_string(),
                execution_dialect: Dialect::Databricks,
                uppercase_info_schema: false,
                qualify_info_schema_with_database: false,
                qualify_info_schema_with_catalog: false,
                temp_schema_filter: None,
                temp_catalog_filter: None,
                current_catalog: FunctionSpec::call("current_catalog").into(),
                current_database: FunctionSpec::call("current_database"),
                set_catalog: SwitchMechanism::use_keyword("CATALOG"),
                set_database: SwitchMechanism::use_statement(),
            },
            // No catalog level: information_schema reports every table under `def`
            Engine::MySql => EngineProfile {
                name: self.to_string(),
                execution_dialect: Dialect::MySql,
                uppercase_info_schema: false,
                qualify_info_schema_with_database: false,
                qualify_info_schema_with_catalog: false,
                temp_schema_filter: None,
                temp_catalog_filter: None,
                current_catalog: CatalogSource::Fixed {
                    fixed: "def".to_string(),
                },
                current_database: FunctionSpec::call("database"),
                set_catalog: SwitchMechanism::Unsupported,
                set_database: SwitchMechanism::use_statement(),
            },
            // Metadata views live per dataset: `<dataset>.INFORMATION_SCHEMA.TABLES`
            Engine::BigQuery => EngineProfile {
                name: self.to_string(),
                execution_dialect: Dialect::BigQuery,
                uppercase_info_schema: true,
                qualify_info_schema_with_database: true,
                qualify_info_schema_with_catalog: false,
                temp_schema_filter: None,
                temp_catalog_filter: None,
                current_catalog: FunctionSpec::keyword("@@project_id").into(),
                current_database: FunctionSpec::keyword("@@dataset_id"),
                set_catalog: SwitchMechanism::Unsupported,
                set_database: SwitchMechanism::Unsupported,
            },
        }
    }

    /// Conventional input/execution/output pairing for this engine
    pub fn default_dialects(&self) -> DialectSpaces {
        match self {
            Engine::Postgres => DialectSpaces::uniform(Dialect::Postgres),
            other => DialectSpaces::new(Dialect::Spark, other.profile().execution_dialect, Dialect::Spark),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Engine::Postgres => "postgres",
            Engine::Redshift => "redshift",
            Engine::DuckDb => "duckdb",
            Engine::Snowflake => "snowflake",
            Engine::Databricks => "databricks",
            Engine::MySql => "mysql",
            Engine::BigQuery => "bigquery",
        };
        write!(f, "{}", s)
    }
}

/// Postgres and Redshift share context builtins and switch schemas through
/// `search_path`
fn postgres_family(engine: Engine, dialect: Dialect) -> EngineProfile {
    EngineProfile {
        name: engine.to_string(),
        execution_dialect: dialect,
        uppercase_info_schema: false,
        qualify_info_schema_with_database: false,
        qualify_info_schema_with_catalog: false,
        temp_schema_filter: Some(TempPredicate::new("table_schema", "pg_temp_%")),
        temp_catalog_filter: None,
        current_catalog: FunctionSpec::keyword("current_catalog").into(),
        current_database: FunctionSpec::keyword("current_schema"),
        set_catalog: SwitchMechanism::Unsupported,
        set_database: SwitchMechanism::SessionVariable {
            variable: "search_path".to_string(),
        },
    }
}
