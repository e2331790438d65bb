// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session collaborator abstraction
//!
//! The catalog never talks to an engine directly. Everything it needs from the
//! surrounding session (running queries, running statements, the session's
//! dialects and its temporary views) goes through [`CatalogSession`].

use super::models::Row;
use super::temp_views::TempViewRegistry;
use crate::catalog::error::CatalogResult;
use crate::dialect::DialectSpaces;
use crate::query::{Select, Statement};

/// Query execution contract consumed by the catalog
///
/// Implementations report engine failures as
/// [`CatalogError::ExecutionFailed`](crate::catalog::error::CatalogError::ExecutionFailed)
/// carrying the engine's message unchanged. No retries are expected at this
/// layer; timeouts and cancellation belong to the implementation.
pub trait CatalogSession: Send + Sync {
    /// Execute a query and return its rows
    ///
    /// # Arguments
    /// * `query` - The metadata query to run
    /// * `quote_identifiers` - Whether projection aliases should be quoted
    ///   when the query is rendered
    fn fetch_rows(&self, query: &Select, quote_identifiers: bool) -> CatalogResult<Vec<Row>>;

    /// Execute a statement that produces no result set
    fn execute(&self, statement: &Statement) -> CatalogResult<()>;

    /// Dialects bound to the input, execution and output spaces
    fn dialects(&self) -> DialectSpaces;

    /// Read access to the session's temporary views
    fn temp_views(&self) -> &dyn TempViewRegistry;
}
