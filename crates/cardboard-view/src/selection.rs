//! Multi-select state for cards: plain click, shift-click range select,
//! and ctrl/cmd toggle. Independent of the render strategy; resynced
//! against the current record set after every index rebuild.

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct SelectionState {
    selected: HashSet<String>,
    last_index: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Plain or shift click. `order` is the current flat card order.
    ///
    /// Without `extend`, selection collapses to just `path`. With
    /// `extend` and a valid prior anchor, selection becomes the
    /// inclusive range between the anchor and `path` (order-agnostic);
    /// without a valid anchor it behaves like a plain select.
    pub fn select(&mut self, path: &str, extend: bool, order: &[String]) {
        let index = order.iter().position(|p| p == path);

        if extend {
            if let (Some(anchor), Some(index)) = (self.valid_anchor(order), index) {
                let (start, end) = if anchor <= index {
                    (anchor, index)
                } else {
                    (index, anchor)
                };
                self.selected = order[start..=end].iter().cloned().collect();
                self.last_index = Some(index);
                return;
            }
        }

        self.selected.clear();
        self.selected.insert(path.to_string());
        self.last_index = index;
    }

    /// Ctrl/cmd click: toggle membership of one card.
    pub fn toggle(&mut self, path: &str, order: &[String]) {
        if !self.selected.remove(path) {
            self.selected.insert(path.to_string());
        }
        self.last_index = order.iter().position(|p| p == path);
    }

    /// Clear the selection. Returns false when it was already empty so
    /// callers can skip redundant style updates.
    pub fn clear(&mut self) -> bool {
        self.last_index = None;
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    /// Purge identifiers no longer present. Called after every index
    /// rebuild. An anchor pointing past the new order is dropped; the
    /// next extend then falls back to plain-select semantics.
    pub fn resync(&mut self, order: &[String]) {
        self.selected.retain(|path| order.iter().any(|p| p == path));
        if let Some(anchor) = self.last_index {
            if anchor >= order.len() {
                self.last_index = None;
            }
        }
    }

    /// The set of paths a drag starting on `source` carries: the whole
    /// selection when the source is part of it, otherwise just the
    /// source. Emitted in `order`'s sequence so the moved block keeps
    /// its on-board relative order through a drop.
    pub fn dragged_paths(&self, source: &str, order: &[String]) -> Vec<String> {
        if self.selected.contains(source) {
            order
                .iter()
                .filter(|p| self.selected.contains(*p))
                .cloned()
                .collect()
        } else {
            vec![source.to_string()]
        }
    }

    fn valid_anchor(&self, order: &[String]) -> Option<usize> {
        self.last_index.filter(|anchor| *anchor < order.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_plain_select_replaces_selection() {
        let order = order(&["p1", "p2", "p3"]);
        let mut selection = SelectionState::new();

        selection.select("p1", false, &order);
        selection.select("p3", false, &order);

        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected("p3"));
    }

    #[test]
    fn test_range_select_covers_inclusive_range() {
        let order = order(&["p1", "p2", "p3", "p4"]);
        let mut selection = SelectionState::new();

        selection.select("p1", false, &order);
        selection.select("p3", true, &order);

        assert_eq!(selection.len(), 3);
        assert!(selection.is_selected("p1"));
        assert!(selection.is_selected("p2"));
        assert!(selection.is_selected("p3"));
        assert!(!selection.is_selected("p4"));
    }

    #[test]
    fn test_range_select_backwards() {
        let order = order(&["p1", "p2", "p3", "p4"]);
        let mut selection = SelectionState::new();

        selection.select("p4", false, &order);
        selection.select("p2", true, &order);

        assert_eq!(selection.len(), 3);
        assert!(!selection.is_selected("p1"));
    }

    #[test]
    fn test_extend_without_anchor_is_plain_select() {
        let order = order(&["p1", "p2"]);
        let mut selection = SelectionState::new();

        selection.select("p2", true, &order);

        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected("p2"));
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let order = order(&["p1", "p2"]);
        let mut selection = SelectionState::new();

        selection.toggle("p1", &order);
        selection.toggle("p2", &order);
        assert_eq!(selection.len(), 2);

        selection.toggle("p1", &order);
        assert!(!selection.is_selected("p1"));
        assert!(selection.is_selected("p2"));
    }

    #[test]
    fn test_clear_reports_whether_anything_changed() {
        let order = order(&["p1"]);
        let mut selection = SelectionState::new();

        assert!(!selection.clear());
        selection.select("p1", false, &order);
        assert!(selection.clear());
        assert!(!selection.clear());
    }

    #[test]
    fn test_resync_purges_stale_paths() {
        let before = order(&["p1", "p2", "p3"]);
        let mut selection = SelectionState::new();
        selection.select("p1", false, &before);
        selection.select("p3", true, &before);

        selection.resync(&order(&["p1"]));

        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected("p1"));
    }

    #[test]
    fn test_dragged_paths_for_selected_source() {
        let order = order(&["p1", "p2", "p3"]);
        let mut selection = SelectionState::new();
        selection.select("p1", false, &order);
        selection.select("p2", true, &order);

        assert_eq!(selection.dragged_paths("p1", &order), vec!["p1", "p2"]);
    }

    #[test]
    fn test_dragged_paths_for_unselected_source() {
        let order = order(&["p1", "p2", "p5"]);
        let mut selection = SelectionState::new();
        selection.select("p1", false, &order);
        selection.select("p2", true, &order);

        assert_eq!(selection.dragged_paths("p5", &order), vec!["p5"]);
    }

    #[test]
    fn test_dragged_paths_follow_board_order() {
        let order = order(&["p1", "p2", "p3", "p4"]);
        let mut selection = SelectionState::new();

        // Backwards range select still drags in board order.
        selection.select("p4", false, &order);
        selection.select("p2", true, &order);

        assert_eq!(
            selection.dragged_paths("p3", &order),
            vec!["p2", "p3", "p4"]
        );
    }
}
