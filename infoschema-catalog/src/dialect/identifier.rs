// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Identifier parsing and rendering
//!
//! Identifiers arrive either as SQL text (`Sales."Q1 Orders"`) typed by a caller,
//! or as raw names read back out of an information schema. Both are reduced to
//! [`Identifier`] values here; rendering goes the other way and only quotes
//! when the target dialect would otherwise change the name.

use super::Dialect;
use crate::catalog::error::{CatalogError, CatalogResult};
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{all_consuming, map},
    error::{Error, ErrorKind},
    multi::separated_list1,
    IResult,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static SIMPLE_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("simple identifier regex is valid")
});

/// Maximum number of dotted segments: catalog.database.name
const MAX_PARTS: usize = 3;

/// Whether a name can appear unquoted in SQL text
pub fn is_simple(name: &str) -> bool {
    SIMPLE_IDENTIFIER.is_match(name)
}

/// A single identifier segment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// Identifier text with quotes and escapes removed
    pub name: String,
    /// Quoted identifiers are case-sensitive in most dialects
    pub quoted: bool,
}

impl Identifier {
    pub fn new(name: impl Into<String>, quoted: bool) -> Self {
        Self {
            name: name.into(),
            quoted,
        }
    }

    pub fn unquoted(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn quoted(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Parse a single identifier written as SQL text in `dialect`
    pub fn parse(text: &str, dialect: Dialect) -> CatalogResult<Self> {
        let mut qualified = QualifiedName::parse(text, dialect)?;
        if qualified.parts.len() != 1 {
            return Err(CatalogError::MalformedIdentifier(format!(
                "expected a single identifier, got '{}'",
                text
            )));
        }
        Ok(qualified.parts.remove(0))
    }

    /// Interpret a raw name as stored by an engine speaking `dialect`
    ///
    /// A stored name counts as quoted whenever writing it bare would make the
    /// engine fold it into something else.
    pub fn from_raw(name: &str, dialect: Dialect) -> Self {
        let quote = dialect.identifier_quote();
        if name.len() >= 2 && name.starts_with(quote) && name.ends_with(quote) {
            if let Ok(ident) = Identifier::parse(name, dialect) {
                return ident;
            }
        }
        let folded = dialect.normalization_strategy().fold(name, false);
        Identifier::new(name, !is_simple(name) || folded != name)
    }

    /// Apply the folding rules of `dialect`
    pub fn normalize(&self, dialect: Dialect) -> Self {
        Identifier::new(
            dialect.normalization_strategy().fold(&self.name, self.quoted),
            self.quoted,
        )
    }

    /// Render as SQL text in `dialect`, quoting only when required
    pub fn to_sql(&self, dialect: Dialect) -> String {
        let bare_folds_away = self.quoted
            && dialect.normalization_strategy().fold(&self.name, false) != self.name;
        if is_simple(&self.name) && !bare_folds_away {
            return self.name.clone();
        }
        self.to_quoted_sql(dialect)
    }

    /// Render as SQL text in `dialect`, always quoted
    pub fn to_quoted_sql(&self, dialect: Dialect) -> String {
        let quote = dialect.identifier_quote();
        let escaped = self
            .name
            .replace(quote, &format!("{}{}", quote, quote));
        format!("{}{}{}", quote, escaped, quote)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A dotted name of up to three segments: `[catalog.][database.]name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub parts: Vec<Identifier>,
}

impl QualifiedName {
    pub fn new(parts: Vec<Identifier>) -> Self {
        Self { parts }
    }

    /// Parse dotted SQL text written in `dialect`
    pub fn parse(text: &str, dialect: Dialect) -> CatalogResult<Self> {
        let trimmed = text.trim();
        let quote = dialect.identifier_quote();
        let parts = match all_consuming(segments(quote))(trimmed) {
            Ok((_, parts)) => parts,
            Err(_) => {
                return Err(CatalogError::MalformedIdentifier(format!(
                    "cannot parse '{}' as a {} identifier",
                    text, dialect
                )))
            }
        };
        if parts.len() > MAX_PARTS {
            return Err(CatalogError::MalformedIdentifier(format!(
                "'{}' has {} name parts, at most {} are allowed",
                text,
                parts.len(),
                MAX_PARTS
            )));
        }
        Ok(Self { parts })
    }

    /// The last segment
    pub fn name(&self) -> Option<&Identifier> {
        self.parts.last()
    }

    /// The segment before the name, if any
    pub fn db(&self) -> Option<&Identifier> {
        self.from_end(1)
    }

    /// The segment before the database, if any
    pub fn catalog(&self) -> Option<&Identifier> {
        self.from_end(2)
    }

    fn from_end(&self, offset: usize) -> Option<&Identifier> {
        self.parts
            .len()
            .checked_sub(offset + 1)
            .and_then(|idx| self.parts.get(idx))
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.parts
            .iter()
            .map(|part| part.to_sql(dialect))
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn segments(quote: char) -> impl FnMut(&str) -> IResult<&str, Vec<Identifier>> {
    move |input: &str| {
        separated_list1(char('.'), alt((quoted_segment(quote), bare_segment(quote))))(input)
    }
}

/// Quoted segment; a doubled quote character escapes a literal quote
fn quoted_segment(quote: char) -> impl FnMut(&str) -> IResult<&str, Identifier> {
    move |input: &str| {
        let (rest, _) = char(quote)(input)?;
        let mut name = String::new();
        let mut chars = rest.char_indices().peekable();
        while let Some((idx, c)) = chars.next() {
            if c != quote {
                name.push(c);
                continue;
            }
            if let Some((_, next)) = chars.peek() {
                if *next == quote {
                    name.push(quote);
                    chars.next();
                    continue;
                }
            }
            return Ok((&rest[idx + c.len_utf8()..], Identifier::quoted(name)));
        }
        // Unterminated quote: no alternative can recover
        Err(nom::Err::Failure(Error::new(input, ErrorKind::Char)))
    }
}

fn bare_segment(quote: char) -> impl FnMut(&str) -> IResult<&str, Identifier> {
    move |input: &str| {
        map(
            take_while1(move |c: char| c != '.' && c != quote),
            |s: &str| Identifier::unquoted(s.trim()),
        )(input)
    }
}
