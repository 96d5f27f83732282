//! Point-in-time projection of what the board renders: per column, the
//! ordered list of card identifiers. Snapshots taken through the same
//! pipeline (merge, column order, local card order) are comparable;
//! diffing two of them yields the set of columns whose card membership
//! or order changed.

use cardboard_domain::BoardColumn;

/// Ordered columnKey -> ordered record paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSnapshot {
    columns: Vec<(String, Vec<String>)>,
}

impl ColumnSnapshot {
    pub fn capture(columns: &[BoardColumn]) -> Self {
        Self {
            columns: columns
                .iter()
                .map(|c| {
                    let paths = c.entries.iter().map(|r| r.path.clone()).collect();
                    (c.key.clone(), paths)
                })
                .collect(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(key, _)| key.as_str())
    }

    pub fn paths(&self, key: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, paths)| paths.as_slice())
    }

    /// Flat card order across all columns, used for range selection.
    pub fn flat_paths(&self) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(|(_, paths)| paths.iter().cloned())
            .collect()
    }

    /// True when both snapshots contain exactly the same column keys,
    /// regardless of column order or card membership.
    pub fn same_key_set(&self, other: &Self) -> bool {
        self.columns.len() == other.columns.len()
            && self.keys().all(|key| other.paths(key).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Columns whose card list changed between two snapshots.
///
/// New and modified columns come first in `current`'s order, then
/// columns removed since `previous`, in `previous`'s order. Removed
/// columns are still reported so the planner can fall back to a full
/// render.
pub fn diff_snapshots(previous: &ColumnSnapshot, current: &ColumnSnapshot) -> Vec<String> {
    let mut changed = Vec::new();

    for (key, paths) in &current.columns {
        match previous.paths(key) {
            None => changed.push(key.clone()),
            Some(old) if old != paths.as_slice() => changed.push(key.clone()),
            Some(_) => {}
        }
    }

    for (key, _) in &previous.columns {
        if current.paths(key).is_none() {
            changed.push(key.clone());
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(columns: &[(&str, &[&str])]) -> ColumnSnapshot {
        ColumnSnapshot {
            columns: columns
                .iter()
                .map(|(key, paths)| {
                    (
                        key.to_string(),
                        paths.iter().map(|p| p.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_identical_snapshots_diff_empty() {
        let a = snapshot(&[("todo", &["a", "b"]), ("done", &["c"])]);
        let b = snapshot(&[("todo", &["a", "b"]), ("done", &["c"])]);
        assert!(diff_snapshots(&a, &b).is_empty());
    }

    #[test]
    fn test_reorder_within_one_column_reports_only_it() {
        let a = snapshot(&[("todo", &["a", "b"]), ("done", &["c"])]);
        let b = snapshot(&[("todo", &["b", "a"]), ("done", &["c"])]);
        assert_eq!(diff_snapshots(&a, &b), vec!["todo".to_string()]);
    }

    #[test]
    fn test_new_column_is_changed() {
        let a = snapshot(&[("todo", &["a"])]);
        let b = snapshot(&[("todo", &["a"]), ("done", &[])]);
        assert_eq!(diff_snapshots(&a, &b), vec!["done".to_string()]);
    }

    #[test]
    fn test_removed_column_reported_after_modified() {
        let a = snapshot(&[("todo", &["a"]), ("done", &["c"])]);
        let b = snapshot(&[("todo", &["a", "b"])]);
        assert_eq!(
            diff_snapshots(&a, &b),
            vec!["todo".to_string(), "done".to_string()]
        );
    }

    #[test]
    fn test_same_key_set_ignores_order_and_content() {
        let a = snapshot(&[("todo", &["a"]), ("done", &["c"])]);
        let b = snapshot(&[("done", &[]), ("todo", &["x"])]);
        assert!(a.same_key_set(&b));

        let c = snapshot(&[("todo", &["a"])]);
        assert!(!a.same_key_set(&c));
    }

    #[test]
    fn test_flat_paths_concatenates_columns_in_order() {
        let a = snapshot(&[("todo", &["a", "b"]), ("done", &["c"])]);
        assert_eq!(a.flat_paths(), vec!["a", "b", "c"]);
    }
}
