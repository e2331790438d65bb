// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Temporary view registry
//!
//! Temporary views are session-owned, in-memory tabular values that the engine
//! never sees. The catalog only reads the registry to merge temporary views into
//! table and column listings.

use parking_lot::RwLock;

/// The shape of a registered temporary view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempView {
    /// Column names in declaration order
    pub columns: Vec<String>,
}

impl TempView {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

/// Read access to a session's temporary views
///
/// Views are registered under their execution-space name.
pub trait TempViewRegistry: Send + Sync {
    /// Look up a view by its registered name
    fn get(&self, name: &str) -> Option<TempView>;

    /// All registered view names, in registration order
    fn names(&self) -> Vec<String>;
}

/// Insertion-ordered in-memory registry
///
/// Sessions that keep their own temporary views can embed this directly.
#[derive(Debug, Default)]
pub struct InMemoryTempViews {
    views: RwLock<Vec<(String, TempView)>>,
}

impl InMemoryTempViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a view. A replaced view keeps its original position.
    pub fn register(&self, name: impl Into<String>, columns: Vec<String>) {
        let name = name.into();
        let mut views = self.views.write();
        match views.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, view)) => *view = TempView::new(columns),
            None => views.push((name, TempView::new(columns))),
        }
    }

    /// Drop a view; returns whether it existed
    pub fn drop_view(&self, name: &str) -> bool {
        let mut views = self.views.write();
        let before = views.len();
        views.retain(|(existing, _)| existing != name);
        views.len() != before
    }

    pub fn len(&self) -> usize {
        self.views.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.read().is_empty()
    }
}

impl TempViewRegistry for InMemoryTempViews {
    fn get(&self, name: &str) -> Option<TempView> {
        self.views
            .read()
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, view)| view.clone())
    }

    fn names(&self) -> Vec<String> {
        self.views
            .read()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}
