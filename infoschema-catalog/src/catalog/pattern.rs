// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Shell-style glob filtering of listing results
//!
//! Supports `*`, `?`, `[seq]` and `[!seq]`. Matching is case-sensitive; case
//! rules are applied beforehand by normalizing the pattern into the output space.

use super::error::{CatalogError, CatalogResult};
use regex::Regex;

/// Anything a listing returns that can be filtered by name
pub trait Named {
    fn name(&self) -> &str;
}

/// Compiled glob pattern
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> CatalogResult<Self> {
        let regex = Regex::new(&translate(pattern)).map_err(|e| {
            CatalogError::MalformedIdentifier(format!("invalid pattern '{}': {}", pattern, e))
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Keep only the items whose name matches, preserving order
    pub fn filter<T: Named>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .filter(|item| self.matches(item.name()))
            .collect()
    }
}

/// Translate a glob into an anchored regular expression
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("(?s)^");
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    let mut class = String::from("[");
                    let mut j = i + 1;
                    if chars[j] == '!' {
                        class.push('^');
                        j += 1;
                    }
                    while j < end {
                        let c = chars[j];
                        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~' | '|') {
                            class.push('\\');
                        }
                        class.push(c);
                        j += 1;
                    }
                    class.push(']');
                    out.push_str(&class);
                    i = end;
                }
                None => out.push_str(r"\["),
            },
            c => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }
    out.push('$');
    out
}

/// Index of the `]` closing the class opened at `start`. A `]` directly after
/// `[` or `[!` is a literal member.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if j < chars.len() && chars[j] == '!' {
        j += 1;
    }
    if j < chars.len() && chars[j] == ']' {
        j += 1;
    }
    while j < chars.len() {
        if chars[j] == ']' {
            return Some(j);
        }
        j += 1;
    }
    None
}
