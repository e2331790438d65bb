// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Information-schema view location
//!
//! Builds the reference to the metadata view a listing reads from, honouring
//! the engine's spelling (`INFORMATION_SCHEMA.TABLES`) and whether the view
//! must be prefixed with the catalog or database it describes.

use super::error::{CatalogError, CatalogResult};
use crate::config::EngineProfile;
use crate::dialect::{DialectSpace, Identifier, NormalizeOptions, Normalizer, QualifiedName};
use crate::query::TableRef;
use std::fmt;

/// Metadata concepts exposed through the information schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoSchemaView {
    Schemata,
    Tables,
    Columns,
}

impl fmt::Display for InfoSchemaView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InfoSchemaView::Schemata => "schemata",
            InfoSchemaView::Tables => "tables",
            InfoSchemaView::Columns => "columns",
        };
        write!(f, "{}", s)
    }
}

pub struct InfoSchemaLocator<'a> {
    profile: &'a EngineProfile,
    normalizer: &'a Normalizer,
    catalog: Option<String>,
}

impl<'a> InfoSchemaLocator<'a> {
    pub fn new(profile: &'a EngineProfile, normalizer: &'a Normalizer) -> Self {
        Self {
            profile,
            normalizer,
            catalog: None,
        }
    }

    /// Input-space catalog in scope, used by engines that prefix metadata
    /// views with their catalog. Without one the view stays unprefixed.
    pub fn in_catalog(mut self, catalog: Option<&str>) -> Self {
        self.catalog = catalog
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self
    }

    /// Whether `locate` will need a database for this call
    pub fn needs_database(&self, force_qualify: Option<bool>) -> bool {
        force_qualify.unwrap_or(self.profile.qualify_info_schema_with_database)
    }

    /// Reference to the metadata view for `view`
    ///
    /// # Arguments
    /// * `view` - Metadata concept to read
    /// * `database` - Input-space database name, used when qualification applies
    /// * `force_qualify` - Overrides the engine's qualification flag
    ///
    /// # Returns
    /// * `Err(CatalogError::UnresolvableScope)` when qualification applies and
    ///   no database is available
    pub fn locate(
        &self,
        view: InfoSchemaView,
        database: Option<&str>,
        force_qualify: Option<bool>,
    ) -> CatalogResult<TableRef> {
        let mut schema = "information_schema".to_string();
        let mut name = view.to_string();
        if self.profile.uppercase_info_schema {
            schema = schema.to_uppercase();
            name = name.to_uppercase();
        }

        let mut parts = Vec::new();
        if let Some(catalog) = self
            .catalog
            .as_deref()
            .filter(|_| self.profile.qualify_info_schema_with_catalog)
        {
            let qualifier = self.normalizer.normalize_parts(
                catalog,
                DialectSpace::Input,
                DialectSpace::Execution,
                NormalizeOptions::default(),
            )?;
            parts.extend(qualifier.parts);
        }
        if self.needs_database(force_qualify) {
            let database = database.map(str::trim).filter(|db| !db.is_empty()).ok_or_else(|| {
                CatalogError::UnresolvableScope(format!(
                    "{} requires information_schema.{} to be qualified with a database, \
                     and none was given or current",
                    self.profile.name, view
                ))
            })?;
            let qualifier = self.normalizer.normalize_parts(
                database,
                DialectSpace::Input,
                DialectSpace::Execution,
                NormalizeOptions::schema(),
            )?;
            parts.extend(qualifier.parts);
        }
        parts.push(Identifier::unquoted(schema));
        parts.push(Identifier::unquoted(name));

        Ok(QualifiedName::new(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Engine;
    use crate::dialect::{Dialect, DialectSpaces};

    #[test]
    fn test_plain_info_schema() {
        let profile = Engine::Postgres.profile();
        let normalizer = Normalizer::new(DialectSpaces::uniform(Dialect::Postgres));
        let locator = InfoSchemaLocator::new(&profile, &normalizer);

        let table = locator.locate(InfoSchemaView::Tables, None, None).unwrap();
        assert_eq!(table.to_sql(Dialect::Postgres), "information_schema.tables");

        // An explicit override qualifies even when the engine does not
        let table = locator
            .locate(InfoSchemaView::Columns, Some("Sales"), Some(true))
            .unwrap();
        assert_eq!(
            table.to_sql(Dialect::Postgres),
            "sales.information_schema.columns"
        );
    }

    #[test]
    fn test_uppercase_and_qualified() {
        let profile = Engine::BigQuery.profile();
        let normalizer = Normalizer::new(Engine::BigQuery.default_dialects());
        let locator = InfoSchemaLocator::new(&profile, &normalizer);

        let table = locator
            .locate(InfoSchemaView::Tables, Some("sales"), None)
            .unwrap();
        assert_eq!(
            table.to_sql(Dialect::BigQuery),
            "sales.INFORMATION_SCHEMA.TABLES"
        );

        let table = locator
            .locate(InfoSchemaView::Schemata, None, Some(false))
            .unwrap();
        assert_eq!(table.to_sql(Dialect::BigQuery), "INFORMATION_SCHEMA.SCHEMATA");
    }

    #[test]
    fn test_catalog_prefix() {
        let profile = Engine::Snowflake.profile();
        let normalizer = Normalizer::new(Engine::Snowflake.default_dialects());

        let table = InfoSchemaLocator::new(&profile, &normalizer)
            .in_catalog(Some("analytics"))
            .locate(InfoSchemaView::Tables, Some("public"), None)
            .unwrap();
        assert_eq!(
            table.to_sql(Dialect::Snowflake),
            "ANALYTICS.INFORMATION_SCHEMA.TABLES"
        );

        // No catalog in scope: the session's current database answers
        let table = InfoSchemaLocator::new(&profile, &normalizer)
            .in_catalog(Some(" "))
            .locate(InfoSchemaView::Tables, None, None)
            .unwrap();
        assert_eq!(table.to_sql(Dialect::Snowflake), "INFORMATION_SCHEMA.TABLES");

        // Engines that do not prefix ignore the catalog
        let profile = Engine::DuckDb.profile();
        let normalizer = Normalizer::new(Engine::DuckDb.default_dialects());
        let table = InfoSchemaLocator::new(&profile, &normalizer)
            .in_catalog(Some("memory"))
            .locate(InfoSchemaView::Tables, None, None)
            .unwrap();
        assert_eq!(table.to_sql(Dialect::DuckDb), "information_schema.tables");
    }

    #[test]
    fn test_missing_database_is_fatal() {
        let profile = Engine::BigQuery.profile();
        let normalizer = Normalizer::new(Engine::BigQuery.default_dialects());
        let locator = InfoSchemaLocator::new(&profile, &normalizer);

        for database in [None, Some(""), Some("  ")] {
            let err = locator
                .locate(InfoSchemaView::Tables, database, None)
                .unwrap_err();
            assert!(matches!(err, CatalogError::UnresolvableScope(_)));
        }
    }
}
