// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog value records returned by listings
//!
//! All records are built fresh per call from metadata rows or temporary-view
//! reads. Names are in the output dialect space.

use super::pattern::Named;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub name: String,
    pub description: Option<String>,
}

/// A schema/database inside a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    pub catalog: String,
    pub description: Option<String>,
    pub location_uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TableType {
    View,
    Managed,
}

impl TableType {
    /// Classify an information-schema `table_type` value. Only the exact
    /// spelling `VIEW` counts as a view.
    pub fn from_info_schema(table_type: &str) -> Self {
        if table_type == "VIEW" {
            TableType::View
        } else {
            TableType::Managed
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TableType::View => "VIEW",
            TableType::Managed => "MANAGED",
        };
        write!(f, "{}", s)
    }
}

/// A table or view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// `None` for temporary views
    pub catalog: Option<String>,
    /// Schema path segments; empty for temporary views
    pub namespace: Vec<String>,
    pub description: Option<String>,
    pub table_type: TableType,
    pub is_temporary: bool,
}

impl Table {
    /// Entry for a session temporary view
    pub fn temporary_view(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            catalog: None,
            namespace: Vec::new(),
            description: None,
            table_type: TableType::View,
            is_temporary: true,
        }
    }
}

/// A column of a table or view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub description: Option<String>,
    /// Type name spelled in the output dialect; empty for temporary views
    pub data_type: String,
    pub nullable: bool,
    pub is_partition: bool,
    pub is_bucket: bool,
}

impl Column {
    /// Column of a temporary view: untyped and nullable
    pub fn temporary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            data_type: String::new(),
            nullable: true,
            is_partition: false,
            is_bucket: false,
        }
    }
}

impl Named for CatalogMetadata {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Database {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Table {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Column {
    fn name(&self) -> &str {
        &self.name
    }
}
