//! Element index: record path -> card element and column key -> column
//! element. Rebuilt in full on a full render, patched per column on a
//! partial render, untouched on skip. After any successful render pass
//! the index and the live tree must agree exactly; `validate` checks
//! that invariant outside production hot paths.

use crate::renderer::{BoardRenderer, ColumnElements, ElementHandle};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Default)]
pub struct ElementIndex {
    cards: HashMap<String, ElementHandle>,
    columns: HashMap<String, ElementHandle>,
}

impl ElementIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole index from a full render's output.
    pub fn rebuild(&mut self, rendered: &[ColumnElements]) {
        self.cards.clear();
        self.columns.clear();
        for column in rendered {
            self.columns.insert(column.key.clone(), column.column);
            for (path, handle) in &column.cards {
                self.cards.insert(path.clone(), *handle);
            }
        }
    }

    /// Patch the index for one replaced column: drop the entries the old
    /// subtree owned, then add the replacement's.
    pub fn patch_column(&mut self, previous_paths: &[String], rendered: &ColumnElements) {
        for path in previous_paths {
            self.cards.remove(path);
        }
        self.columns.insert(rendered.key.clone(), rendered.column);
        for (path, handle) in &rendered.cards {
            self.cards.insert(path.clone(), *handle);
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.columns.clear();
    }

    pub fn card_element(&self, path: &str) -> Option<ElementHandle> {
        self.cards.get(path).copied()
    }

    pub fn column_element(&self, key: &str) -> Option<ElementHandle> {
        self.columns.get(key).copied()
    }

    /// Indexed columns with their handles, in no particular order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, ElementHandle)> {
        self.columns.iter().map(|(key, handle)| (key.as_str(), *handle))
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Consistency check against the live tree. Returns a description of
    /// each violation found; callers log them as warnings. Violations
    /// indicate a bug but never crash the view, which degrades to a full
    /// render on the next update.
    pub fn validate(&self, renderer: &dyn BoardRenderer) -> Vec<String> {
        let mut problems = Vec::new();

        let live_columns: HashMap<String, ElementHandle> =
            renderer.live_columns().into_iter().collect();
        let live_cards: HashMap<String, ElementHandle> =
            renderer.live_cards().into_iter().collect();

        for (key, handle) in &self.columns {
            match live_columns.get(key) {
                None => problems.push(format!("indexed column '{}' is not in the tree", key)),
                Some(live) if live != handle => problems.push(format!(
                    "column '{}' indexed as {:?} but tree has {:?}",
                    key, handle, live
                )),
                Some(_) => {}
            }
        }
        for key in live_columns.keys() {
            if !self.columns.contains_key(key) {
                problems.push(format!("live column '{}' is not indexed", key));
            }
        }

        for (path, handle) in &self.cards {
            match live_cards.get(path) {
                None => problems.push(format!("indexed card '{}' is not in the tree", path)),
                Some(live) if live != handle => problems.push(format!(
                    "card '{}' indexed as {:?} but tree has {:?}",
                    path, handle, live
                )),
                Some(_) => {}
            }
        }
        for path in live_cards.keys() {
            if !self.cards.contains_key(path) {
                problems.push(format!("live card '{}' is not indexed", path));
            }
        }

        for problem in &problems {
            warn!("element index inconsistency: {}", problem);
        }
        problems
    }
}
