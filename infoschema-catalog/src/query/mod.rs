// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Abstract metadata queries handed to the execution collaborator
//!
//! Only the shapes the catalog needs are modelled: single-table projections
//! with AND-combined filters, and the statements used to switch the session's
//! catalog or database. Executors may render them with [`Select::to_sql`] /
//! [`Statement::to_sql`] or walk the structure themselves.

pub mod render;

use crate::dialect::QualifiedName;

/// Reference to a table or view, as a dotted identifier path
pub type TableRef = QualifiedName;

/// Scalar expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Unqualified column reference, written bare
    Column(String),
    /// String literal; holds the unescaped value
    Literal(String),
    /// Builtin function call. Some engines expose keyword-style functions
    /// (`current_catalog` on Postgres) that must be written without parentheses.
    Function { name: String, parens: bool },
    Eq(Box<Expr>, Box<Expr>),
    Like(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(name.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn function(name: impl Into<String>) -> Self {
        Expr::Function {
            name: name.into(),
            parens: true,
        }
    }

    pub fn keyword_function(name: impl Into<String>) -> Self {
        Expr::Function {
            name: name.into(),
            parens: false,
        }
    }

    pub fn equals(self, other: Expr) -> Self {
        Expr::Eq(Box::new(self), Box::new(other))
    }

    pub fn like(self, pattern: Expr) -> Self {
        Expr::Like(Box::new(self), Box::new(pattern))
    }

    pub fn or(self, other: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(other))
    }
}

/// One projected expression with an optional output alias
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl Projection {
    pub fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Project a column under its own name as alias, so rows stay
    /// addressable by that name whatever case the engine folds to
    pub fn aliased_column(name: &str) -> Self {
        Self {
            expr: Expr::column(name),
            alias: Some(name.to_string()),
        }
    }
}

/// Single-source SELECT
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    pub distinct: bool,
    pub projections: Vec<Projection>,
    pub from: Option<TableRef>,
    /// AND-combined WHERE conditions
    pub filters: Vec<Expr>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, projection: Projection) -> Self {
        self.projections.push(projection);
        self
    }

    pub fn from(mut self, table: TableRef) -> Self {
        self.from = Some(table);
        self
    }

    pub fn filter(mut self, condition: Expr) -> Self {
        self.filters.push(condition);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Aliases (or column names) of the projection, in order
    pub fn output_names(&self) -> Vec<String> {
        self.projections
            .iter()
            .map(|p| match (&p.alias, &p.expr) {
                (Some(alias), _) => alias.clone(),
                (None, Expr::Column(name)) => name.clone(),
                (None, Expr::Function { name, .. }) => name.clone(),
                (None, _) => String::new(),
            })
            .collect()
    }
}

/// Statement executed for its side effect only
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `USE [<object kind>] <name>`, e.g. `USE CATALOG main`
    Use {
        kind: Option<String>,
        name: TableRef,
    },
    /// Pre-rendered statement text, passed through unchanged
    Raw(String),
}

impl Statement {
    /// Bare `USE <name>`
    pub fn use_name(name: TableRef) -> Self {
        Statement::Use { kind: None, name }
    }
}
