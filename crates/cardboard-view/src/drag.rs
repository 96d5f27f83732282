//! Drag-and-drop session tracking and the pure reorder computations a
//! drop resolves to. Column drags and card drags are independent
//! sessions; the UI layer guarantees at most one is active at a time.
//! Ending a session always clears its transient target state, whether or
//! not a drop happened.

/// Whether the dragged item lands before or after the hovered target,
/// decided by comparing the cursor position to the target's midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPlacement {
    Before,
    After,
}

/// In-flight column drag.
#[derive(Debug, Clone)]
pub struct ColumnDragSession {
    pub source_key: String,
    pub target_key: Option<String>,
    pub placement: Option<DropPlacement>,
}

impl ColumnDragSession {
    pub fn new(source_key: impl Into<String>) -> Self {
        Self {
            source_key: source_key.into(),
            target_key: None,
            placement: None,
        }
    }

    pub fn set_target(&mut self, key: impl Into<String>, placement: DropPlacement) {
        self.target_key = Some(key.into());
        self.placement = Some(placement);
    }

    pub fn clear_target(&mut self) {
        self.target_key = None;
        self.placement = None;
    }

    /// Reordered full key list for the drop, or `None` when no usable
    /// target was hovered.
    pub fn dropped_order(&self, current_keys: &[String]) -> Option<Vec<String>> {
        let target = self.target_key.as_deref()?;
        let placement = self.placement?;
        Some(reorder_keys(
            current_keys,
            &self.source_key,
            target,
            placement,
        ))
    }
}

/// In-flight card drag. The dragged set is captured at drag start from
/// the selection state.
#[derive(Debug, Clone)]
pub struct CardDragSession {
    pub paths: Vec<String>,
    pub source_key: String,
    pub target_key: Option<String>,
    /// Card hovered inside the target column, if any; dropping on empty
    /// column space appends instead.
    pub target_path: Option<String>,
    pub placement: Option<DropPlacement>,
}

impl CardDragSession {
    pub fn new(paths: Vec<String>, source_key: impl Into<String>) -> Self {
        Self {
            paths,
            source_key: source_key.into(),
            target_key: None,
            target_path: None,
            placement: None,
        }
    }

    pub fn set_target(
        &mut self,
        column_key: impl Into<String>,
        card_path: Option<String>,
        placement: Option<DropPlacement>,
    ) {
        self.target_key = Some(column_key.into());
        self.target_path = card_path;
        self.placement = placement;
    }

    pub fn clear_target(&mut self) {
        self.target_key = None;
        self.target_path = None;
        self.placement = None;
    }

    pub fn is_cross_column(&self) -> bool {
        self.target_key
            .as_deref()
            .map(|target| target != self.source_key)
            .unwrap_or(false)
    }
}

/// Move one column key relative to another. Dropping a key on itself is
/// a no-op.
pub fn reorder_keys(
    keys: &[String],
    source: &str,
    target: &str,
    placement: DropPlacement,
) -> Vec<String> {
    if source == target {
        return keys.to_vec();
    }

    let mut result: Vec<String> = keys.iter().filter(|k| *k != source).cloned().collect();
    let Some(target_idx) = result.iter().position(|k| k == target) else {
        return keys.to_vec();
    };
    let insert_at = match placement {
        DropPlacement::Before => target_idx,
        DropPlacement::After => target_idx + 1,
    };
    result.insert(insert_at, source.to_string());
    result
}

/// Reinsert the moved paths contiguously relative to `target` within a
/// column's order. Works for both same-column reorders (moved paths are
/// first removed from `order`) and cross-column inserts (moved paths are
/// simply absent from `order`). A target that is itself among the moved
/// set returns the order unchanged.
pub fn reorder_paths(
    order: &[String],
    moved: &[String],
    target: Option<&str>,
    placement: DropPlacement,
) -> Vec<String> {
    if let Some(target) = target {
        if moved.iter().any(|p| p == target) {
            return order.to_vec();
        }
    }

    let mut result: Vec<String> = order
        .iter()
        .filter(|p| !moved.contains(p))
        .cloned()
        .collect();

    let insert_at = match target.and_then(|t| result.iter().position(|p| p == t)) {
        Some(idx) => match placement {
            DropPlacement::Before => idx,
            DropPlacement::After => idx + 1,
        },
        // No target card: append at the end of the column.
        None => result.len(),
    };

    for (offset, path) in moved.iter().enumerate() {
        result.insert(insert_at + offset, path.clone());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reorder_keys_before() {
        let keys = strings(&["a", "b", "c"]);
        assert_eq!(
            reorder_keys(&keys, "c", "a", DropPlacement::Before),
            strings(&["c", "a", "b"])
        );
    }

    #[test]
    fn test_reorder_keys_after_adjusts_for_removal() {
        let keys = strings(&["a", "b", "c"]);
        assert_eq!(
            reorder_keys(&keys, "a", "b", DropPlacement::After),
            strings(&["b", "a", "c"])
        );
    }

    #[test]
    fn test_reorder_keys_onto_self_is_noop() {
        let keys = strings(&["a", "b"]);
        assert_eq!(
            reorder_keys(&keys, "a", "a", DropPlacement::Before),
            keys
        );
    }

    #[test]
    fn test_reorder_paths_same_column_contiguous() {
        let order = strings(&["1", "2", "3", "4"]);
        let moved = strings(&["1", "4"]);
        assert_eq!(
            reorder_paths(&order, &moved, Some("3"), DropPlacement::Before),
            strings(&["2", "1", "4", "3"])
        );
    }

    #[test]
    fn test_reorder_paths_cross_column_insert() {
        let order = strings(&["x", "y"]);
        let moved = strings(&["a", "b"]);
        assert_eq!(
            reorder_paths(&order, &moved, Some("y"), DropPlacement::After),
            strings(&["x", "y", "a", "b"])
        );
    }

    #[test]
    fn test_reorder_paths_no_target_appends() {
        let order = strings(&["x"]);
        let moved = strings(&["a"]);
        assert_eq!(
            reorder_paths(&order, &moved, None, DropPlacement::Before),
            strings(&["x", "a"])
        );
    }

    #[test]
    fn test_reorder_paths_target_in_moved_set_is_noop() {
        let order = strings(&["1", "2", "3"]);
        let moved = strings(&["2", "3"]);
        assert_eq!(
            reorder_paths(&order, &moved, Some("3"), DropPlacement::Before),
            order
        );
    }

    #[test]
    fn test_column_session_end_clears_target() {
        let mut session = ColumnDragSession::new("a");
        session.set_target("b", DropPlacement::After);
        session.clear_target();
        assert!(session.target_key.is_none());
        assert!(session.placement.is_none());
    }

    #[test]
    fn test_column_session_drop_without_target_is_none() {
        let session = ColumnDragSession::new("a");
        assert!(session.dropped_order(&strings(&["a", "b"])).is_none());
    }
}
