//! Test utilities for infoschema-catalog integration tests
//!
//! MockSession stands in for a SQL engine: it answers the catalog's abstract
//! metadata queries from in-memory schemata/tables/columns and records every
//! query and statement it receives.

#![allow(dead_code)]

pub mod mock_session;

/// Route `log` output through the test harness; `RUST_LOG=debug` shows the
/// generated SQL
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

use infoschema_catalog::{Engine, InfoSchemaCatalog};
use mock_session::MockSession;
use std::sync::Arc;

/// Catalog over `session` using `engine`'s built-in profile
pub fn catalog_for(session: &Arc<MockSession>, engine: Engine) -> InfoSchemaCatalog {
    init_logging();
    InfoSchemaCatalog::for_engine(session.clone(), engine).expect("Failed to create catalog")
}

/// DuckDB fixture and its catalog
pub fn duckdb_catalog() -> (Arc<MockSession>, InfoSchemaCatalog) {
    let session = Arc::new(MockSession::duckdb());
    let catalog = catalog_for(&session, Engine::DuckDb);
    (session, catalog)
}
