//! Rendering seam between the reconciliation core and the host's UI
//! tree. The core never touches real DOM nodes; it addresses them
//! through opaque handles handed out by the renderer, and every rendered
//! card and column carries its identifier as retrievable metadata so the
//! index can be validated against the live tree.

use crate::settings::DisplaySettings;
use cardboard_domain::BoardColumn;
use std::collections::HashSet;

/// Opaque handle to one rendered element. Stable for as long as the
/// element stays in the tree; replaced subtrees get fresh handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Handles produced by building one column subtree.
#[derive(Debug, Clone)]
pub struct ColumnElements {
    pub key: String,
    pub column: ElementHandle,
    /// Card handles in rendered order, tagged with their record path.
    pub cards: Vec<(String, ElementHandle)>,
}

pub trait BoardRenderer {
    /// Discard the current board subtree (or placeholder) and build all
    /// columns fresh, in the given order.
    fn render_board(
        &mut self,
        columns: &[BoardColumn],
        settings: &DisplaySettings,
    ) -> Vec<ColumnElements>;

    /// Build a replacement subtree for one column and swap it in place
    /// of `existing`. Returns `None` when the existing element is no
    /// longer in the tree; the caller skips that column's patch.
    fn replace_column(
        &mut self,
        existing: ElementHandle,
        column: &BoardColumn,
        settings: &DisplaySettings,
    ) -> Option<ColumnElements>;

    /// Replace the board with a "no grouping configured" message.
    fn render_placeholder(&mut self, message: &str);

    /// Style-only pass: selection highlight and background styling.
    /// Never changes DOM structure.
    fn apply_cheap_update(&mut self, selected: &HashSet<String>);

    /// Live column elements currently in the tree, with their keys.
    /// Used by index rebuild validation, never by hot-path decisions.
    fn live_columns(&self) -> Vec<(String, ElementHandle)>;

    /// Live card elements currently in the tree, with their paths.
    fn live_cards(&self) -> Vec<(String, ElementHandle)>;

    /// Transient vertical scroll offset of one column's card list.
    fn column_scroll(&self, column: ElementHandle) -> f64;
    fn set_column_scroll(&mut self, column: ElementHandle, offset: f64);

    /// Horizontal/vertical scroll of the whole board.
    fn board_scroll(&self) -> (f64, f64);
    fn set_board_scroll(&mut self, left: f64, top: f64);
}
