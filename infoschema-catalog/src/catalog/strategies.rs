// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Current-context strategies
//!
//! Engines expose "which catalog/database am I in" and "switch to another one"
//! through different native mechanisms. Each capability is a small trait with
//! one implementation per mechanism; [`ContextStrategies`] holds the four
//! implementations chosen for an engine and is built once from its profile.

use super::error::{CatalogError, CatalogResult};
use crate::config::{CatalogSource, EngineProfile, FunctionSpec, SwitchMechanism};
use crate::dialect::{DialectSpace, NormalizeOptions, Normalizer, QualifiedName};
use crate::query::{Projection, Select, Statement};
use crate::session::{CatalogSession, Value};

/// Reads one piece of session context (current catalog or database)
pub trait CurrentContextReader: Send + Sync {
    /// Returns the value in the output space; empty when the engine reports none
    fn read(&self, session: &dyn CatalogSession, normalizer: &Normalizer) -> CatalogResult<String>;
}

/// Switches the session's current catalog
pub trait CatalogSwitcher: Send + Sync {
    /// `name` is input-space SQL text
    fn set_current_catalog(
        &self,
        session: &dyn CatalogSession,
        normalizer: &Normalizer,
        name: &str,
    ) -> CatalogResult<()>;
}

/// Switches the session's current database
pub trait DatabaseSwitcher: Send + Sync {
    /// `name` is input-space SQL text, optionally `catalog.database`.
    /// `current_catalog` yields the output-space current catalog and is only
    /// called when the mechanism needs it.
    fn set_current_database(
        &self,
        session: &dyn CatalogSession,
        normalizer: &Normalizer,
        name: &str,
        current_catalog: &dyn Fn() -> CatalogResult<String>,
    ) -> CatalogResult<()>;
}

/// Select a builtin and read its single scalar result
#[derive(Debug, Clone)]
pub struct FunctionContextReader {
    function: FunctionSpec,
}

impl FunctionContextReader {
    pub fn new(function: FunctionSpec) -> Self {
        Self { function }
    }
}

impl CurrentContextReader for FunctionContextReader {
    fn read(&self, session: &dyn CatalogSession, normalizer: &Normalizer) -> CatalogResult<String> {
        let query = Select::new().project(Projection::new(self.function.to_expr()));
        log::debug!(
            "reading session context: {}",
            query.to_sql(normalizer.dialect(DialectSpace::Execution), false)
        );

        let rows = session.fetch_rows(&query, false)?;
        let value = match rows.first().and_then(|row| row.get(0)) {
            Some(Value::Null) | None => return Ok(String::new()),
            Some(value) => value.to_string(),
        };
        if value.is_empty() {
            return Ok(value);
        }
        normalizer.normalize(
            &value,
            DialectSpace::Execution,
            DialectSpace::Output,
            NormalizeOptions::default(),
        )
    }
}

/// Report a constant context value, for engines without a catalog level
#[derive(Debug, Clone)]
pub struct FixedContextReader {
    value: String,
}

impl FixedContextReader {
    /// `value` is the name as the engine stores it
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl CurrentContextReader for FixedContextReader {
    fn read(&self, _session: &dyn CatalogSession, normalizer: &Normalizer) -> CatalogResult<String> {
        normalizer.normalize(
            &self.value,
            DialectSpace::Execution,
            DialectSpace::Output,
            NormalizeOptions::default(),
        )
    }
}

/// `USE [<keyword>] <name>` for catalogs and `USE [<keyword>] <catalog>.<database>`
/// for databases
#[derive(Debug, Clone)]
pub struct UseStatementSwitch {
    keyword: Option<String>,
    catalog_level: bool,
}

impl UseStatementSwitch {
    pub fn new(keyword: Option<String>) -> Self {
        Self {
            keyword,
            catalog_level: true,
        }
    }

    /// Database names are used bare and never qualified with a catalog
    pub fn without_catalog_level(mut self) -> Self {
        self.catalog_level = false;
        self
    }

    fn statement(&self, name: QualifiedName) -> Statement {
        Statement::Use {
            kind: self.keyword.clone(),
            name,
        }
    }
}

impl CatalogSwitcher for UseStatementSwitch {
    fn set_current_catalog(
        &self,
        session: &dyn CatalogSession,
        normalizer: &Normalizer,
        name: &str,
    ) -> CatalogResult<()> {
        let catalog = normalizer.normalize_parts(
            name,
            DialectSpace::Input,
            DialectSpace::Execution,
            NormalizeOptions::default(),
        )?;
        run(session, normalizer, self.statement(catalog))
    }
}

impl DatabaseSwitcher for UseStatementSwitch {
    fn set_current_database(
        &self,
        session: &dyn CatalogSession,
        normalizer: &Normalizer,
        name: &str,
        current_catalog: &dyn Fn() -> CatalogResult<String>,
    ) -> CatalogResult<()> {
        let mut target = normalizer.normalize_parts(
            name,
            DialectSpace::Input,
            DialectSpace::Execution,
            NormalizeOptions::schema(),
        )?;
        if target.parts.len() > 2 {
            return Err(CatalogError::MalformedIdentifier(format!(
                "'{}' is not a [catalog.]database name",
                name
            )));
        }

        if !self.catalog_level {
            if target.parts.len() > 1 {
                return Err(CatalogError::NotSupported(format!(
                    "no catalog level to switch into, got '{}'",
                    name
                )));
            }
            return run(session, normalizer, self.statement(target));
        }

        if target.parts.len() == 1 {
            let catalog = current_catalog()?;
            if !catalog.is_empty() {
                let catalog = normalizer.normalize_parts(
                    &catalog,
                    DialectSpace::Output,
                    DialectSpace::Execution,
                    NormalizeOptions::default(),
                )?;
                let mut parts = catalog.parts;
                parts.append(&mut target.parts);
                target = QualifiedName::new(parts);
            }
        }

        run(session, normalizer, self.statement(target))
    }
}

/// `SET <variable> TO "<database>"` for engines without `USE`
#[derive(Debug, Clone)]
pub struct SessionVariableSwitch {
    variable: String,
}

impl SessionVariableSwitch {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    /// The value is written double-quoted whatever the dialect
    fn assign(&self, value: &str) -> Statement {
        Statement::Raw(format!(
            "SET {} TO \"{}\"",
            self.variable,
            value.replace('"', "\"\"")
        ))
    }
}

impl DatabaseSwitcher for SessionVariableSwitch {
    fn set_current_database(
        &self,
        session: &dyn CatalogSession,
        normalizer: &Normalizer,
        name: &str,
        _current_catalog: &dyn Fn() -> CatalogResult<String>,
    ) -> CatalogResult<()> {
        let target = normalizer.normalize_parts(
            name,
            DialectSpace::Input,
            DialectSpace::Execution,
            NormalizeOptions::schema(),
        )?;
        let database = match target.parts.as_slice() {
            [database] => database,
            _ => {
                return Err(CatalogError::NotSupported(format!(
                    "setting {} cannot switch catalogs, got '{}'",
                    self.variable, name
                )))
            }
        };

        run(session, normalizer, self.assign(&database.name))
    }
}

impl CatalogSwitcher for SessionVariableSwitch {
    fn set_current_catalog(
        &self,
        session: &dyn CatalogSession,
        normalizer: &Normalizer,
        name: &str,
    ) -> CatalogResult<()> {
        let catalog = normalizer.normalize_parts(
            name,
            DialectSpace::Input,
            DialectSpace::Execution,
            NormalizeOptions::default(),
        )?;
        let value = catalog.name().map(|ident| ident.name.clone()).unwrap_or_default();
        run(session, normalizer, self.assign(&value))
    }
}

/// Capability the engine does not offer
#[derive(Debug, Clone)]
pub struct UnsupportedSwitch {
    engine: String,
    what: &'static str,
}

impl UnsupportedSwitch {
    pub fn new(engine: impl Into<String>, what: &'static str) -> Self {
        Self {
            engine: engine.into(),
            what,
        }
    }

    fn error(&self) -> CatalogError {
        CatalogError::NotSupported(format!(
            "{} does not support setting the current {}",
            self.engine, self.what
        ))
    }
}

impl CatalogSwitcher for UnsupportedSwitch {
    fn set_current_catalog(
        &self,
        _session: &dyn CatalogSession,
        _normalizer: &Normalizer,
        _name: &str,
    ) -> CatalogResult<()> {
        Err(self.error())
    }
}

impl DatabaseSwitcher for UnsupportedSwitch {
    fn set_current_database(
        &self,
        _session: &dyn CatalogSession,
        _normalizer: &Normalizer,
        _name: &str,
        _current_catalog: &dyn Fn() -> CatalogResult<String>,
    ) -> CatalogResult<()> {
        Err(self.error())
    }
}

fn run(session: &dyn CatalogSession, normalizer: &Normalizer, statement: Statement) -> CatalogResult<()> {
    log::debug!(
        "switching session context: {}",
        statement.to_sql(normalizer.dialect(DialectSpace::Execution))
    );
    session.execute(&statement)
}

/// One strategy per context capability
pub struct ContextStrategies {
    pub current_catalog: Box<dyn CurrentContextReader>,
    pub current_database: Box<dyn CurrentContextReader>,
    pub set_catalog: Box<dyn CatalogSwitcher>,
    pub set_database: Box<dyn DatabaseSwitcher>,
}

impl ContextStrategies {
    /// Pick the strategies an engine profile asks for
    pub fn from_profile(profile: &EngineProfile) -> Self {
        let catalog_level = profile.current_catalog.has_catalog_level();
        let use_switch = |keyword: &Option<String>| {
            let switch = UseStatementSwitch::new(keyword.clone());
            if catalog_level {
                switch
            } else {
                switch.without_catalog_level()
            }
        };

        let current_catalog: Box<dyn CurrentContextReader> = match &profile.current_catalog {
            CatalogSource::Function(function) => Box::new(FunctionContextReader::new(function.clone())),
            CatalogSource::Fixed { fixed } => Box::new(FixedContextReader::new(fixed.as_str())),
        };
        let set_catalog: Box<dyn CatalogSwitcher> = match &profile.set_catalog {
            SwitchMechanism::Use { keyword } => Box::new(use_switch(keyword)),
            SwitchMechanism::SessionVariable { variable } => {
                Box::new(SessionVariableSwitch::new(variable.as_str()))
            }
            SwitchMechanism::Unsupported => {
                Box::new(UnsupportedSwitch::new(profile.name.as_str(), "catalog"))
            }
        };
        let set_database: Box<dyn DatabaseSwitcher> = match &profile.set_database {
            SwitchMechanism::Use { keyword } => Box::new(use_switch(keyword)),
            SwitchMechanism::SessionVariable { variable } => {
                Box::new(SessionVariableSwitch::new(variable.as_str()))
            }
            SwitchMechanism::Unsupported => {
                Box::new(UnsupportedSwitch::new(profile.name.as_str(), "database"))
            }
        };

        Self {
            current_catalog,
            current_database: Box::new(FunctionContextReader::new(profile.current_database.clone())),
            set_catalog,
            set_database,
        }
    }
}

impl std::fmt::Debug for ContextStrategies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextStrategies").finish_non_exhaustive()
    }
}
