// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog facade - the single external interface
//!
//! [`InfoSchemaCatalog`] answers "what catalogs, databases, tables and columns
//! exist" and "what is the current catalog/database" for one session, by
//! querying the engine's information schema through the session collaborator.
//! Names cross three dialect spaces on the way: arguments arrive in the input
//! space, queries run in the execution space and results leave in the output
//! space.

use super::error::{CatalogError, CatalogResult};
use super::locator::{InfoSchemaLocator, InfoSchemaView};
use super::models::{CatalogMetadata, Column, Database, Table, TableType};
use super::pattern::GlobPattern;
use super::resolver::{QualifiedScope, ScopeResolver};
use super::strategies::ContextStrategies;
use crate::config::{Engine, EngineProfile, TempPredicate};
use crate::dialect::{DialectSpace, NormalizeOptions, Normalizer};
use crate::query::{Expr, Projection, Select};
use crate::session::{CatalogSession, Row};
use std::sync::Arc;

/// Session-bound catalog facade
///
/// Holds no state beyond its collaborators: every listing is computed fresh
/// from the engine. Switching the current catalog/database is session-scoped,
/// so one facade should not be shared by callers that switch concurrently.
pub struct InfoSchemaCatalog {
    session: Arc<dyn CatalogSession>,
    profile: EngineProfile,
    strategies: ContextStrategies,
    normalizer: Normalizer,
}

impl std::fmt::Debug for InfoSchemaCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfoSchemaCatalog")
            .field("profile", &self.profile)
            .field("strategies", &self.strategies)
            .field("normalizer", &self.normalizer)
            .finish_non_exhaustive()
    }
}

impl InfoSchemaCatalog {
    /// Create a catalog for `session` using the strategies `profile` names
    ///
    /// # Returns
    /// * `Err(CatalogError::InvalidConfig)` if the profile is invalid or its
    ///   execution dialect differs from the session's execution space
    pub fn new(session: Arc<dyn CatalogSession>, profile: EngineProfile) -> CatalogResult<Self> {
        let strategies = ContextStrategies::from_profile(&profile);
        Self::with_strategies(session, profile, strategies)
    }

    /// Create a catalog with explicitly chosen context strategies
    pub fn with_strategies(
        session: Arc<dyn CatalogSession>,
        profile: EngineProfile,
        strategies: ContextStrategies,
    ) -> CatalogResult<Self> {
        profile.validate()?;
        let dialects = session.dialects();
        if dialects.execution != profile.execution_dialect {
            return Err(CatalogError::InvalidConfig(format!(
                "engine profile '{}' executes {} but the session executes {}",
                profile.name, profile.execution_dialect, dialects.execution
            )));
        }

        log::debug!(
            "catalog for {} (input {}, execution {}, output {})",
            profile.name,
            dialects.input,
            dialects.execution,
            dialects.output
        );

        Ok(Self {
            session,
            profile,
            strategies,
            normalizer: Normalizer::new(dialects),
        })
    }

    /// Create a catalog using a built-in engine profile
    pub fn for_engine(session: Arc<dyn CatalogSession>, engine: Engine) -> CatalogResult<Self> {
        Self::new(session, engine.profile())
    }

    pub fn profile(&self) -> &EngineProfile {
        &self.profile
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Current catalog, output space. Empty when the engine reports none.
    pub fn current_catalog(&self) -> CatalogResult<String> {
        self.strategies
            .current_catalog
            .read(self.session.as_ref(), &self.normalizer)
    }

    /// Current database, output space. Empty when the engine reports none.
    pub fn current_database(&self) -> CatalogResult<String> {
        self.strategies
            .current_database
            .read(self.session.as_ref(), &self.normalizer)
    }

    /// Switch the session's current catalog
    ///
    /// # Arguments
    /// * `name` - Catalog name, input space
    pub fn set_current_catalog(&self, name: &str) -> CatalogResult<()> {
        self.strategies
            .set_catalog
            .set_current_catalog(self.session.as_ref(), &self.normalizer, name)
    }

    /// Switch the session's current database
    ///
    /// # Arguments
    /// * `name` - Database name, input space; may be `catalog.database`. A bare
    ///   name keeps the current catalog.
    pub fn set_current_database(&self, name: &str) -> CatalogResult<()> {
        self.strategies.set_database.set_current_database(
            self.session.as_ref(),
            &self.normalizer,
            name,
            &|| self.current_catalog(),
        )
    }

    /// List catalogs
    ///
    /// # Arguments
    /// * `pattern` - Optional glob over catalog names, input space
    pub fn list_catalogs(&self, pattern: Option<&str>) -> CatalogResult<Vec<CatalogMetadata>> {
        let glob = self.compile_pattern(pattern)?;
        let locator = self.locator();

        let database = if locator.needs_database(None) {
            Some(self.current_database_input()?)
        } else {
            None
        };
        let schemata = locator.locate(InfoSchemaView::Schemata, database.as_deref(), None)?;

        let query = Select::new()
            .distinct()
            .project(Projection::aliased_column("catalog_name"))
            .from(schemata);

        let mut catalogs = Vec::new();
        for row in self.fetch(&query)? {
            catalogs.push(CatalogMetadata {
                name: self.to_output(&row.text("catalog_name", 0)?)?,
                description: None,
            });
        }

        Ok(filter_by(glob, catalogs))
    }

    /// List databases across all catalogs
    ///
    /// # Arguments
    /// * `pattern` - Optional glob over database names, input space
    pub fn list_databases(&self, pattern: Option<&str>) -> CatalogResult<Vec<Database>> {
        let glob = self.compile_pattern(pattern)?;
        let schemata = self
            .locator()
            .locate(InfoSchemaView::Schemata, None, Some(false))?;

        let query = Select::new()
            .project(Projection::aliased_column("schema_name"))
            .project(Projection::aliased_column("catalog_name"))
            .from(schemata);

        let mut databases = Vec::new();
        for row in self.fetch(&query)? {
            databases.push(Database {
                name: self.to_output(&row.text("schema_name", 0)?)?,
                catalog: self.to_output(&row.text("catalog_name", 1)?)?,
                description: None,
                location_uri: String::new(),
            });
        }

        Ok(filter_by(glob, databases))
    }

    /// List tables and views, followed by the session's temporary views
    ///
    /// # Arguments
    /// * `db_name` - Optional `[catalog.]database`, input space. Without it
    ///   (and without a pattern) the current catalog and database apply.
    /// * `pattern` - Optional glob over table names, input space. A pattern
    ///   without `db_name` searches every database.
    ///
    /// Temporary views are listed whatever scope was requested.
    pub fn list_tables(
        &self,
        db_name: Option<&str>,
        pattern: Option<&str>,
    ) -> CatalogResult<Vec<Table>> {
        let db_name = db_name.map(str::trim).filter(|db| !db.is_empty());
        let glob = self.compile_pattern(pattern)?;
        let resolver = ScopeResolver::new(&self.normalizer);

        // `from_context` marks a scope already read from the current context
        let (scope, from_context) = match (db_name, pattern) {
            (Some(db), _) => (resolver.parse_scope(db)?, false),
            (None, None) => {
                let resolved = resolver.resolve(
                    None,
                    None,
                    None,
                    || self.current_catalog(),
                    || self.current_database(),
                )?;
                (resolved.scope, true)
            }
            (None, Some(_)) => (QualifiedScope::default(), false),
        };

        let locator = self.locator().in_catalog(scope.catalog.as_deref());
        let database = match &scope.database {
            Some(db) => Some(db.clone()),
            None if !from_context && locator.needs_database(None) => {
                Some(self.current_database_input()?)
            }
            None => None,
        };
        let tables_view = locator.locate(InfoSchemaView::Tables, database.as_deref(), None)?;

        let mut query = Select::new()
            .project(Projection::aliased_column("table_name"))
            .project(Projection::aliased_column("table_schema"))
            .project(Projection::aliased_column("table_catalog"))
            .project(Projection::aliased_column("table_type"))
            .from(tables_view);
        if let Some(db) = &scope.database {
            query = query.filter(self.scope_filter("table_schema", db, None)?);
        }
        if let Some(catalog) = &scope.catalog {
            query = query.filter(self.scope_filter("table_catalog", catalog, None)?);
        }

        let mut tables = Vec::new();
        for row in self.fetch(&query)? {
            tables.push(self.table_from_row(&row)?);
        }

        let temp_views = self.session.temp_views().names();
        if !temp_views.is_empty() {
            log::debug!("appending {} temporary views", temp_views.len());
        }
        tables.extend(temp_views.into_iter().map(Table::temporary_view));

        Ok(filter_by(glob, tables))
    }

    /// List the columns of a table or view
    ///
    /// # Arguments
    /// * `table_name` - Table name, input space; may be qualified
    /// * `db_name` - Optional `[catalog.]database`, input space; its parts take
    ///   precedence over parts embedded in `table_name`
    /// * `include_temp` - Also match the engine's temporary schema/catalog
    ///
    /// A temporary view is answered from its declared columns without querying
    /// the engine. The registry is searched by the execution-space name.
    pub fn list_columns(
        &self,
        table_name: &str,
        db_name: Option<&str>,
        include_temp: bool,
    ) -> CatalogResult<Vec<Column>> {
        let stored = self.normalizer.normalize_parts(
            table_name,
            DialectSpace::Input,
            DialectSpace::Execution,
            NormalizeOptions::table(),
        )?;
        if let [view_name] = stored.parts.as_slice() {
            if let Some(view) = self.session.temp_views().get(&view_name.name) {
                log::debug!("columns of temporary view {} read from the session", view_name.name);
                return Ok(view.columns.into_iter().map(Column::temporary).collect());
            }
        }

        let resolver = ScopeResolver::new(&self.normalizer);
        let explicit = match db_name.map(str::trim).filter(|db| !db.is_empty()) {
            Some(db) => resolver.parse_scope(db)?,
            None => QualifiedScope::default(),
        };
        let resolved = resolver.resolve(
            Some(table_name),
            explicit.catalog.as_deref(),
            explicit.database.as_deref(),
            || self.current_catalog(),
            || self.current_database(),
        )?;
        let name = resolved.name.ok_or_else(|| {
            CatalogError::MalformedIdentifier(format!("'{}' names no table", table_name))
        })?;
        let scope = resolved.scope;

        let columns_view = self
            .locator()
            .in_catalog(scope.catalog.as_deref())
            .locate(InfoSchemaView::Columns, scope.database.as_deref(), None)?;

        let mut query = Select::new()
            .project(Projection::aliased_column("column_name"))
            .project(Projection::aliased_column("data_type"))
            .project(Projection::aliased_column("is_nullable"))
            .from(columns_view)
            .filter(Expr::column("table_name").equals(self.normalizer.literal(
                &name,
                DialectSpace::Input,
                DialectSpace::Execution,
            )?));

        let temp_schema = self.profile.temp_schema_filter.as_ref().filter(|_| include_temp);
        let temp_catalog = self.profile.temp_catalog_filter.as_ref().filter(|_| include_temp);
        if let Some(db) = &scope.database {
            query = query.filter(self.scope_filter("table_schema", db, temp_schema)?);
        }
        if let Some(catalog) = &scope.catalog {
            query = query.filter(self.scope_filter("table_catalog", catalog, temp_catalog)?);
        }

        let mut columns = Vec::new();
        for row in self.fetch(&query)? {
            columns.push(self.column_from_row(&row)?);
        }
        Ok(columns)
    }

    fn locator(&self) -> InfoSchemaLocator<'_> {
        InfoSchemaLocator::new(&self.profile, &self.normalizer)
    }

    /// `<column> = '<value>'`, widened with the temporary-object predicate if given
    fn scope_filter(
        &self,
        column: &str,
        value: &str,
        temp: Option<&TempPredicate>,
    ) -> CatalogResult<Expr> {
        let literal = self
            .normalizer
            .literal(value, DialectSpace::Input, DialectSpace::Execution)?;
        let condition = Expr::column(column).equals(literal);
        Ok(match temp {
            Some(predicate) => condition.or(predicate.to_expr()),
            None => condition,
        })
    }

    fn fetch(&self, query: &Select) -> CatalogResult<Vec<Row>> {
        log::debug!(
            "metadata query: {}",
            query.to_sql(self.normalizer.dialect(DialectSpace::Execution), true)
        );
        self.session.fetch_rows(query, true)
    }

    fn table_from_row(&self, row: &Row) -> CatalogResult<Table> {
        let catalog = self.to_output(&row.text("table_catalog", 2)?)?;
        Ok(Table {
            name: self.to_output(&row.text("table_name", 0)?)?,
            catalog: if catalog.is_empty() { None } else { Some(catalog) },
            namespace: vec![self.to_output(&row.text("table_schema", 1)?)?],
            description: None,
            table_type: TableType::from_info_schema(&row.text("table_type", 3)?),
            is_temporary: false,
        })
    }

    fn column_from_row(&self, row: &Row) -> CatalogResult<Column> {
        let data_type = row.text("data_type", 1)?;
        let data_type = if data_type.is_empty() {
            data_type
        } else {
            self.normalizer.normalize(
                &data_type,
                DialectSpace::Execution,
                DialectSpace::Output,
                NormalizeOptions::datatype(),
            )?
        };
        Ok(Column {
            name: self.to_output(&row.text("column_name", 0)?)?,
            description: None,
            data_type,
            nullable: row.text("is_nullable", 2)? == "YES",
            is_partition: false,
            is_bucket: false,
        })
    }

    /// Stored name to output space
    fn to_output(&self, value: &str) -> CatalogResult<String> {
        if value.is_empty() {
            return Ok(String::new());
        }
        self.normalizer.normalize(
            value,
            DialectSpace::Execution,
            DialectSpace::Output,
            NormalizeOptions::default(),
        )
    }

    /// Current database as input-space SQL text
    fn current_database_input(&self) -> CatalogResult<String> {
        ScopeResolver::new(&self.normalizer).current_to_input(self.current_database()?)
    }

    /// Bring a glob from the input space to the output space and compile it
    fn compile_pattern(&self, pattern: Option<&str>) -> CatalogResult<Option<GlobPattern>> {
        match pattern {
            Some(pattern) => {
                let pattern = self.normalizer.normalize(
                    pattern,
                    DialectSpace::Input,
                    DialectSpace::Output,
                    NormalizeOptions::pattern(),
                )?;
                Ok(Some(GlobPattern::new(&pattern)?))
            }
            None => Ok(None),
        }
    }
}

fn filter_by<T: super::pattern::Named>(glob: Option<GlobPattern>, items: Vec<T>) -> Vec<T> {
    match glob {
        Some(glob) => glob.filter(items),
        None => items,
    }
}
