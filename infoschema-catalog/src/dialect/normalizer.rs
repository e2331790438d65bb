// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Identifier normalization between dialect spaces
//!
//! Conversion is a two-step projection: the value is first read under the
//! source space's conventions into a dialect-neutral [`Identifier`], then folded
//! and rendered under the destination space's conventions.
//!
//! Values coming out of the execution space are raw stored names (what an
//! information schema returns), not SQL text, and are read with
//! [`Identifier::from_raw`]. Everything else is read as SQL text.

use super::datatype::SqlType;
use super::identifier::{is_simple, Identifier, QualifiedName};
use super::{Dialect, DialectSpace, DialectSpaces};
use crate::catalog::error::CatalogResult;
use crate::query::Expr;

/// Rendering mode for [`Normalizer::normalize`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Keep wildcard metacharacters; only fold case
    pub is_pattern: bool,
    /// Value may be `catalog.database`
    pub is_schema: bool,
    /// Value may be `catalog.database.table`
    pub is_table: bool,
    /// Value is a data type name, not an identifier
    pub is_datatype: bool,
    /// Wrap the result as a SQL string literal
    pub to_string_literal: bool,
}

impl NormalizeOptions {
    pub fn pattern() -> Self {
        Self {
            is_pattern: true,
            ..Self::default()
        }
    }

    pub fn schema() -> Self {
        Self {
            is_schema: true,
            ..Self::default()
        }
    }

    pub fn table() -> Self {
        Self {
            is_table: true,
            ..Self::default()
        }
    }

    pub fn datatype() -> Self {
        Self {
            is_datatype: true,
            ..Self::default()
        }
    }

    pub fn string_literal() -> Self {
        Self {
            to_string_literal: true,
            ..Self::default()
        }
    }

    pub fn as_string_literal(mut self) -> Self {
        self.to_string_literal = true;
        self
    }

    fn is_qualified(&self) -> bool {
        self.is_schema || self.is_table
    }
}

/// Converts names, patterns and literals between the input, execution and
/// output dialect spaces of one session
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    dialects: DialectSpaces,
}

impl Normalizer {
    pub fn new(dialects: DialectSpaces) -> Self {
        Self { dialects }
    }

    pub fn dialects(&self) -> &DialectSpaces {
        &self.dialects
    }

    pub fn dialect(&self, space: DialectSpace) -> Dialect {
        self.dialects.get(space)
    }

    /// Convert `value` from one dialect space to another
    ///
    /// Returns the input untouched when both spaces share the same folding and
    /// quoting conventions, unless a string literal was requested.
    pub fn normalize(
        &self,
        value: &str,
        from: DialectSpace,
        to: DialectSpace,
        options: NormalizeOptions,
    ) -> CatalogResult<String> {
        let from_dialect = self.dialects.get(from);
        let to_dialect = self.dialects.get(to);

        let normalized = if options.is_datatype {
            if from_dialect == to_dialect {
                value.to_string()
            } else {
                SqlType::parse(value).to_sql(to_dialect)
            }
        } else if options.is_pattern {
            normalize_pattern(value, from_dialect, to_dialect)
        } else if options.to_string_literal {
            self.normalize_parts(value, from, to, options)?
                .parts
                .iter()
                .map(|part| part.name.as_str())
                .collect::<Vec<_>>()
                .join(".")
        } else if from_dialect.same_convention(&to_dialect) {
            value.to_string()
        } else {
            self.normalize_parts(value, from, to, options)?
                .to_sql(to_dialect)
        };

        log::trace!(
            "normalize '{}' {}({}) -> {}({}) = '{}'",
            value,
            from,
            from_dialect,
            to,
            to_dialect,
            normalized
        );

        if options.to_string_literal {
            Ok(quote_literal(&normalized))
        } else {
            Ok(normalized)
        }
    }

    /// Read `value` in the source space and fold each part into the
    /// destination space, without rendering
    pub fn normalize_parts(
        &self,
        value: &str,
        from: DialectSpace,
        to: DialectSpace,
        options: NormalizeOptions,
    ) -> CatalogResult<QualifiedName> {
        let from_dialect = self.dialects.get(from);
        let to_dialect = self.dialects.get(to);

        let parsed = if options.is_qualified() {
            QualifiedName::parse(value, from_dialect)?
        } else if from == DialectSpace::Execution {
            QualifiedName::new(vec![Identifier::from_raw(value, from_dialect)])
        } else {
            QualifiedName::new(vec![Identifier::parse(value, from_dialect)?])
        };

        let parts = parsed
            .parts
            .iter()
            .map(|part| {
                let neutral = part.normalize(from_dialect);
                // A name that cannot be written bare only exists quoted
                let quoted = neutral.quoted || !is_simple(&neutral.name);
                Identifier::new(neutral.name, quoted).normalize(to_dialect)
            })
            .collect();

        Ok(QualifiedName::new(parts))
    }

    /// Normalize `value` and wrap it as a string literal expression
    pub fn literal(&self, value: &str, from: DialectSpace, to: DialectSpace) -> CatalogResult<Expr> {
        let parts = self.normalize_parts(value, from, to, NormalizeOptions::default())?;
        let text = parts
            .parts
            .iter()
            .map(|part| part.name.as_str())
            .collect::<Vec<_>>()
            .join(".");
        Ok(Expr::Literal(text))
    }
}

/// Fold the literal segments of a glob pattern, leaving metacharacters alone
fn normalize_pattern(pattern: &str, from: Dialect, to: Dialect) -> String {
    let quote = from.identifier_quote();
    let (text, quoted) =
        if pattern.len() >= 2 && pattern.starts_with(quote) && pattern.ends_with(quote) {
            let inner = &pattern[quote.len_utf8()..pattern.len() - quote.len_utf8()];
            (inner.replace(&format!("{}{}", quote, quote), &quote.to_string()), true)
        } else {
            (pattern.to_string(), false)
        };
    let neutral = from.normalization_strategy().fold(&text, quoted);
    to.normalization_strategy().fold(&neutral, quoted)
}

/// Render `value` as a single-quoted SQL string literal
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
