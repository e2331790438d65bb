// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Qualified-name resolution
//!
//! Fills in the catalog and database a metadata query should be scoped to.
//! Precedence per part: explicit argument, then the part embedded in the dotted
//! name, then the session's current catalog/database. The current-context
//! lookups are passed as `FnOnce` closures: each costs a round trip to the
//! engine, so each runs at most once per resolution and only when needed.

use super::error::{CatalogError, CatalogResult};
use crate::dialect::{DialectSpace, NormalizeOptions, Normalizer, QualifiedName};

/// Catalog/database pair a metadata query is filtered by
///
/// Both parts are input-space SQL text. Recomputed per call, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualifiedScope {
    pub catalog: Option<String>,
    pub database: Option<String>,
}

impl QualifiedScope {
    pub fn is_unscoped(&self) -> bool {
        self.catalog.is_none() && self.database.is_none()
    }
}

/// Result of resolving a possibly partially qualified name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Unqualified object name, input-space SQL text
    pub name: Option<String>,
    pub scope: QualifiedScope,
}

pub struct ScopeResolver<'a> {
    normalizer: &'a Normalizer,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(normalizer: &'a Normalizer) -> Self {
        Self { normalizer }
    }

    /// Resolve `raw_name` (`[catalog.][database.]name`) against explicit
    /// arguments and the current context
    ///
    /// # Arguments
    /// * `raw_name` - Possibly qualified object name, input space; `None` to
    ///   resolve only the scope
    /// * `explicit_catalog` / `explicit_database` - Caller-supplied parts, input space
    /// * `current_catalog` / `current_database` - Current-context lookups, output space
    pub fn resolve<C, D>(
        &self,
        raw_name: Option<&str>,
        explicit_catalog: Option<&str>,
        explicit_database: Option<&str>,
        current_catalog: C,
        current_database: D,
    ) -> CatalogResult<ResolvedName>
    where
        C: FnOnce() -> CatalogResult<String>,
        D: FnOnce() -> CatalogResult<String>,
    {
        let input = self.normalizer.dialect(DialectSpace::Input);
        let embedded = match raw_name {
            Some(raw) => Some(QualifiedName::parse(raw, input)?),
            None => None,
        };

        let embedded_catalog = embedded
            .as_ref()
            .and_then(|n| n.catalog())
            .map(|ident| ident.to_sql(input));
        let embedded_database = embedded
            .as_ref()
            .and_then(|n| n.db())
            .map(|ident| ident.to_sql(input));

        let catalog = match explicit_catalog.map(str::to_string).or(embedded_catalog) {
            Some(catalog) => catalog,
            None => self.current_to_input(current_catalog()?)?,
        };
        let database = match explicit_database.map(str::to_string).or(embedded_database) {
            Some(database) => database,
            None => self.current_to_input(current_database()?)?,
        };

        Ok(ResolvedName {
            name: embedded
                .as_ref()
                .and_then(|n| n.name())
                .map(|ident| ident.to_sql(input)),
            scope: QualifiedScope {
                catalog: non_empty(catalog),
                database: non_empty(database),
            },
        })
    }

    /// Split an explicit `[catalog.]database` argument into its parts
    pub fn parse_scope(&self, db_name: &str) -> CatalogResult<QualifiedScope> {
        let input = self.normalizer.dialect(DialectSpace::Input);
        let name = QualifiedName::parse(db_name, input)?;
        if name.parts.len() > 2 {
            return Err(CatalogError::MalformedIdentifier(format!(
                "'{}' is not a [catalog.]database name",
                db_name
            )));
        }
        Ok(QualifiedScope {
            catalog: name.db().map(|ident| ident.to_sql(input)),
            database: name.name().map(|ident| ident.to_sql(input)),
        })
    }

    /// Bring a current-context value from the output space into the input space
    pub fn current_to_input(&self, value: String) -> CatalogResult<String> {
        if value.is_empty() {
            return Ok(value);
        }
        self.normalizer.normalize(
            &value,
            DialectSpace::Output,
            DialectSpace::Input,
            NormalizeOptions::default(),
        )
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
