// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the catalog facade

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A metadata query needs a database qualifier and none could be resolved
    #[error("Unresolvable scope: {0}")]
    UnresolvableScope(String),

    /// The engine rejected or failed a query; the message is the engine's own
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A metadata row did not carry a projected column
    #[error("Missing column in metadata row: {0}")]
    MissingColumn(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidConfig(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
