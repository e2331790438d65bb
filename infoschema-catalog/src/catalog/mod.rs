// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Information-schema backed catalog
//!
//! The facade in [`manager`] composes the resolver, the metadata-view locator
//! and the per-engine context strategies; the other modules are its parts.

pub mod error;
pub mod locator;
pub mod manager;
pub mod models;
pub mod pattern;
pub mod resolver;
pub mod strategies;

pub use error::{CatalogError, CatalogResult};
pub use manager::InfoSchemaCatalog;
pub use models::{CatalogMetadata, Column, Database, Table, TableType};
pub use strategies::ContextStrategies;
