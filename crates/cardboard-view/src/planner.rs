//! Render planner: the single authoritative decision point choosing,
//! per upstream update, between skipping, patching changed columns, or
//! rebuilding the whole board. Pure and total; never errors.

use crate::snapshot::{diff_snapshots, ColumnSnapshot};

/// Partial rendering is capped: above this many changed columns a full
/// rebuild is cheaper than patching.
pub const MAX_PARTIAL_COLUMNS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan {
    /// DOM structure untouched; only cheap style-only updates run.
    Skip,
    /// Rebuild and swap exactly these columns' subtrees in place.
    Partial(Vec<String>),
    /// Discard and rebuild the entire board subtree.
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartialDecision {
    pub can_partial: bool,
    pub changed: Vec<String>,
}

/// Partial rendering requires the column key sets to match (no columns
/// added or removed) and the changed-column count to be within the cap.
pub fn can_render_partially(
    previous: &ColumnSnapshot,
    current: &ColumnSnapshot,
) -> PartialDecision {
    let changed = diff_snapshots(previous, current);
    let can_partial =
        previous.same_key_set(current) && changed.len() <= MAX_PARTIAL_COLUMNS;
    PartialDecision {
        can_partial,
        changed,
    }
}

/// Decide the render strategy for this cycle.
///
/// First paint is always a full render. An unchanged signature skips all
/// structural work. An empty snapshot diff also skips: the signature
/// moved only on tracked-property content that does not affect card
/// layout, which the cheap-update path covers. (With signature-skip
/// checked first this branch is effectively unreachable, but it stays as
/// a safety check.)
pub fn plan_render(
    has_rendered_board: bool,
    signature_unchanged: bool,
    previous: Option<&ColumnSnapshot>,
    current: &ColumnSnapshot,
) -> RenderPlan {
    let Some(previous) = previous else {
        return RenderPlan::Full;
    };
    if !has_rendered_board {
        return RenderPlan::Full;
    }
    if signature_unchanged {
        return RenderPlan::Skip;
    }

    let decision = can_render_partially(previous, current);
    if decision.changed.is_empty() {
        return RenderPlan::Skip;
    }
    if decision.can_partial {
        RenderPlan::Partial(decision.changed)
    } else {
        RenderPlan::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardboard_domain::{BoardColumn, Record};

    fn snapshot(columns: &[(&str, &[&str])]) -> ColumnSnapshot {
        let columns: Vec<BoardColumn> = columns
            .iter()
            .map(|(key, paths)| BoardColumn {
                key: key.to_string(),
                has_key: true,
                entries: paths.iter().map(|p| Record::new(*p)).collect(),
            })
            .collect();
        ColumnSnapshot::capture(&columns)
    }

    #[test]
    fn test_first_paint_is_always_full() {
        let current = snapshot(&[("todo", &["a"])]);
        assert_eq!(
            plan_render(false, true, Some(&current.clone()), &current),
            RenderPlan::Full
        );
        assert_eq!(plan_render(true, true, None, &current), RenderPlan::Full);
    }

    #[test]
    fn test_unchanged_signature_skips() {
        let previous = snapshot(&[("todo", &["a"])]);
        let current = snapshot(&[("todo", &["a", "b"])]);
        // Signature equality is authoritative even if snapshots differ.
        assert_eq!(
            plan_render(true, true, Some(&previous), &current),
            RenderPlan::Skip
        );
    }

    #[test]
    fn test_empty_diff_skips_structural_path() {
        let previous = snapshot(&[("todo", &["a"])]);
        let current = snapshot(&[("todo", &["a"])]);
        assert_eq!(
            plan_render(true, false, Some(&previous), &current),
            RenderPlan::Skip
        );
    }

    #[test]
    fn test_single_column_change_renders_partially() {
        let previous = snapshot(&[("todo", &["a"]), ("done", &["c"])]);
        let current = snapshot(&[("todo", &["a", "b"]), ("done", &["c"])]);
        assert_eq!(
            plan_render(true, false, Some(&previous), &current),
            RenderPlan::Partial(vec!["todo".to_string()])
        );
    }

    #[test]
    fn test_key_set_change_forces_full() {
        let previous = snapshot(&[("todo", &["a"]), ("done", &["c"])]);
        let current = snapshot(&[("todo", &["a"])]);
        let decision = can_render_partially(&previous, &current);
        assert!(!decision.can_partial);
        assert_eq!(
            plan_render(true, false, Some(&previous), &current),
            RenderPlan::Full
        );
    }

    #[test]
    fn test_too_many_changed_columns_forces_full() {
        let previous = snapshot(&[
            ("a", &["1"]),
            ("b", &["2"]),
            ("c", &["3"]),
            ("d", &["4"]),
            ("e", &["5"]),
            ("f", &["6"]),
        ]);
        let current = snapshot(&[
            ("a", &["1", "x"]),
            ("b", &["2", "x"]),
            ("c", &["3", "x"]),
            ("d", &["4", "x"]),
            ("e", &["5", "x"]),
            ("f", &["6", "x"]),
        ]);
        assert_eq!(
            plan_render(true, false, Some(&previous), &current),
            RenderPlan::Full
        );
    }

    #[test]
    fn test_cap_boundary_allows_five_columns() {
        let previous = snapshot(&[
            ("a", &["1"]),
            ("b", &["2"]),
            ("c", &["3"]),
            ("d", &["4"]),
            ("e", &["5"]),
            ("f", &["6"]),
        ]);
        let current = snapshot(&[
            ("a", &["1", "x"]),
            ("b", &["2", "x"]),
            ("c", &["3", "x"]),
            ("d", &["4", "x"]),
            ("e", &["5", "x"]),
            ("f", &["6"]),
        ]);
        let decision = can_render_partially(&previous, &current);
        assert!(decision.can_partial);
        assert_eq!(decision.changed.len(), 5);
    }
}
