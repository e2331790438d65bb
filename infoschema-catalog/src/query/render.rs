// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SQL text rendering for abstract queries

use super::{Expr, Projection, Select, Statement};
use crate::dialect::normalizer::quote_literal;
use crate::dialect::{Dialect, Identifier};

impl Expr {
    pub fn to_sql(&self, dialect: Dialect) -> String {
        match self {
            Expr::Column(name) => name.clone(),
            Expr::Literal(value) => quote_literal(value),
            Expr::Function { name, parens: true } => format!("{}()", name),
            Expr::Function { name, parens: false } => name.clone(),
            Expr::Eq(left, right) => {
                format!("{} = {}", left.to_sql(dialect), right.to_sql(dialect))
            }
            Expr::Like(left, right) => {
                format!("{} LIKE {}", left.to_sql(dialect), right.to_sql(dialect))
            }
            Expr::Or(left, right) => {
                format!("({} OR {})", left.to_sql(dialect), right.to_sql(dialect))
            }
        }
    }
}

impl Projection {
    pub fn to_sql(&self, dialect: Dialect, quote_identifiers: bool) -> String {
        let expr = self.expr.to_sql(dialect);
        match &self.alias {
            Some(alias) if quote_identifiers => format!(
                "{} AS {}",
                expr,
                Identifier::quoted(alias.as_str()).to_quoted_sql(dialect)
            ),
            Some(alias) => format!("{} AS {}", expr, alias),
            None => expr,
        }
    }
}

impl Select {
    /// Render as SQL text for `dialect`
    ///
    /// With `quote_identifiers` set, projection aliases are always quoted so the
    /// engine returns them exactly as written.
    pub fn to_sql(&self, dialect: Dialect, quote_identifiers: bool) -> String {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(
            &self
                .projections
                .iter()
                .map(|p| p.to_sql(dialect, quote_identifiers))
                .collect::<Vec<_>>()
                .join(", "),
        );
        if let Some(from) = &self.from {
            sql.push_str(" FROM ");
            sql.push_str(&from.to_sql(dialect));
        }
        if !self.filters.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(
                &self
                    .filters
                    .iter()
                    .map(|f| f.to_sql(dialect))
                    .collect::<Vec<_>>()
                    .join(" AND "),
            );
        }
        sql
    }
}

impl Statement {
    pub fn to_sql(&self, dialect: Dialect) -> String {
        match self {
            Statement::Use { kind: None, name } => format!("USE {}", name.to_sql(dialect)),
            Statement::Use {
                kind: Some(kind),
                name,
            } => format!("USE {} {}", kind, name.to_sql(dialect)),
            Statement::Raw(text) => text.clone(),
        }
    }
}
