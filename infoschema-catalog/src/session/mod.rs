// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session collaborator interfaces
//!
//! Execution, dialect configuration and temporary views are owned by the
//! session; the catalog consumes them through the traits in this module.

pub mod models;
pub mod provider;
pub mod temp_views;

pub use models::{Row, Value};
pub use provider::CatalogSession;
pub use temp_views::{InMemoryTempViews, TempView, TempViewRegistry};
