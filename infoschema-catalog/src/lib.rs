// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! InfoSchema Catalog - dialect-aware catalog listings over `information_schema`
//!
//! Lists catalogs, databases, tables and columns of a SQL engine and reads or
//! switches the session's current catalog/database, for engines that expose
//! an ANSI-style information schema.
//!
//! # Features
//!
//! - **Three dialect spaces**: names arrive in the caller's input dialect, run
//!   in the engine's execution dialect and come back in the output dialect
//! - **Engine profiles**: built-in presets for Postgres, Redshift, DuckDB,
//!   Snowflake, Databricks, MySQL and BigQuery, or custom profiles loaded from JSON
//! - **Pluggable context strategies**: builtin functions, `USE` statements or
//!   session variables, chosen per engine
//! - **Temporary views**: session-local views are merged into listings
//!
//! # Usage
//!
//! The engine itself stays behind [`CatalogSession`]; the catalog only builds
//! abstract queries and hands them over:
//!
//! ```ignore
//! let catalog = InfoSchemaCatalog::for_engine(session, Engine::DuckDb)?;
//! catalog.set_current_database("analytics")?;
//! for table in catalog.list_tables(None, Some("fact_*"))? {
//!     println!("{} {}", table.name, table.table_type);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod dialect;
pub mod query;
pub mod session;

pub use catalog::{
    CatalogError, CatalogMetadata, CatalogResult, Column, ContextStrategies, Database,
    InfoSchemaCatalog, Table, TableType,
};
pub use config::{
    CatalogSource, Engine, EngineProfile, FunctionSpec, SwitchMechanism, TempPredicate,
};
pub use dialect::{Dialect, DialectSpace, DialectSpaces, NormalizationStrategy};
pub use query::{Expr, Projection, Select, Statement};
pub use session::{CatalogSession, InMemoryTempViews, Row, TempView, TempViewRegistry, Value};

/// InfoSchema Catalog version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// InfoSchema Catalog crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
