//! View orchestrator: composes merging, ordering, signature/snapshot
//! comparison, render planning, the element index, selection, drag
//! sessions, and scroll persistence on every upstream data update.

use crate::drag::{reorder_paths, CardDragSession, ColumnDragSession, DropPlacement};
use crate::index::ElementIndex;
use crate::planner::{plan_render, RenderPlan};
use crate::renderer::BoardRenderer;
use crate::scroll::ScrollPersistence;
use crate::selection::SelectionState;
use crate::settings::DisplaySettings;
use crate::signature::{can_skip_full_render, compute_signature};
use crate::snapshot::ColumnSnapshot;
use cardboard_core::{BoardResult, ConfigStore, MutationService, TrashOutcome, TrashService};
use cardboard_domain::{
    apply_local_card_order, merge_groups_by_column_key, serialize_card_order,
    serialize_column_order, sort_groups_by_column_order, BoardColumn, CardOrderStore,
    ColumnOrderStore, Group, NO_VALUE_COLUMN_KEY,
};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub const COLUMN_ORDER_KEY: &str = "column-order";
pub const CARD_ORDER_KEY: &str = "card-order";

const NO_GROUPING_MESSAGE: &str = "Group by a property to use the board view.";

/// One upstream data-update notification.
#[derive(Debug, Clone)]
pub struct ViewData {
    pub groups: Vec<Group>,
    pub settings: DisplaySettings,
}

pub struct BoardView<R: BoardRenderer> {
    renderer: R,
    config: Arc<dyn ConfigStore>,
    mutations: Arc<dyn MutationService>,
    trash: Arc<dyn TrashService>,

    column_order: ColumnOrderStore,
    card_order: CardOrderStore,
    index: ElementIndex,
    selection: SelectionState,
    column_drag: Option<ColumnDragSession>,
    card_drag: Option<CardDragSession>,
    scroll: ScrollPersistence,

    /// Transient per-column scroll offsets, held only for this view's
    /// lifetime (never persisted).
    column_scroll: HashMap<String, f64>,
    /// Flat card order of the last render, for range selection.
    card_sequence: Vec<String>,

    previous_signature: Option<String>,
    previous_snapshot: Option<ColumnSnapshot>,
    has_rendered_board: bool,
}

impl<R: BoardRenderer> BoardView<R> {
    pub fn new(
        renderer: R,
        config: Arc<dyn ConfigStore>,
        mutations: Arc<dyn MutationService>,
        trash: Arc<dyn TrashService>,
    ) -> Self {
        let scroll = ScrollPersistence::new(Arc::clone(&config));
        Self {
            renderer,
            config,
            mutations,
            trash,
            column_order: ColumnOrderStore::new(),
            card_order: CardOrderStore::new(),
            index: ElementIndex::new(),
            selection: SelectionState::new(),
            column_drag: None,
            card_drag: None,
            scroll,
            column_scroll: HashMap::new(),
            card_sequence: Vec::new(),
            previous_signature: None,
            previous_snapshot: None,
            has_rendered_board: false,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn index(&self) -> &ElementIndex {
        &self.index
    }

    /// React to an upstream data change. Returns the strategy taken.
    pub fn handle_data_update(&mut self, data: ViewData) -> RenderPlan {
        if self.has_rendered_board && self.scroll.should_suppress_update() {
            debug!("suppressing render cycle for own scroll write");
            return RenderPlan::Skip;
        }

        if data.settings.group_by.is_none() {
            // No usable grouping: a placeholder, not a board. Partial
            // and skip need an established board to diff against, so
            // the comparison state is dropped.
            self.renderer.render_placeholder(NO_GROUPING_MESSAGE);
            self.index.clear();
            self.card_sequence.clear();
            self.selection.resync(&self.card_sequence);
            self.previous_signature = None;
            self.previous_snapshot = None;
            return RenderPlan::Full;
        }

        let (columns, card_order) = self.build_columns(data.groups);
        let signature = compute_signature(&columns, &data.settings, &card_order);
        let snapshot = ColumnSnapshot::capture(&columns);

        let signature_unchanged = can_skip_full_render(
            &signature,
            self.previous_signature.as_deref(),
            self.has_rendered_board,
        );
        let plan = plan_render(
            self.has_rendered_board,
            signature_unchanged,
            self.previous_snapshot.as_ref(),
            &snapshot,
        );

        match &plan {
            RenderPlan::Skip => {
                // Selection highlight or background styling may still
                // need refreshing even without structural change.
                self.renderer.apply_cheap_update(self.selection.selected());
            }
            RenderPlan::Partial(keys) => {
                self.render_partial(keys, &columns, &data.settings);
            }
            RenderPlan::Full => {
                self.render_full(&columns, &data.settings);
            }
        }

        self.card_sequence = snapshot.flat_paths();
        self.selection.resync(&self.card_sequence);

        self.previous_signature = Some(signature);
        self.previous_snapshot = Some(snapshot);
        plan
    }

    /// Merge, column-order, and card-order pipeline. Snapshots are only
    /// comparable when taken through this exact sequence.
    fn build_columns(&mut self, groups: Vec<Group>) -> (Vec<BoardColumn>, HashMap<String, Vec<String>>) {
        let merged = merge_groups_by_column_key(groups);

        let raw_columns = self.config_string(COLUMN_ORDER_KEY);
        let order = self.column_order.parse(raw_columns.as_deref()).to_vec();
        let mut columns = sort_groups_by_column_order(merged, &order);

        let raw_cards = self.config_string(CARD_ORDER_KEY);
        let card_order = self.card_order.parse(raw_cards.as_deref()).clone();
        for column in &mut columns {
            if let Some(saved) = card_order.get(&column.key) {
                let entries = std::mem::take(&mut column.entries);
                column.entries = apply_local_card_order(entries, saved);
            }
        }

        (columns, card_order)
    }

    fn render_full(&mut self, columns: &[BoardColumn], settings: &DisplaySettings) {
        self.capture_column_scrolls();

        let rendered = self.renderer.render_board(columns, settings);
        self.index.rebuild(&rendered);

        if !self.has_rendered_board {
            if let Some((left, top)) = self.scroll.load() {
                self.renderer.set_board_scroll(left, top);
            }
            self.has_rendered_board = true;
        }

        self.restore_column_scrolls(columns);

        #[cfg(debug_assertions)]
        self.index.validate(&self.renderer);
    }

    fn render_partial(&mut self, keys: &[String], columns: &[BoardColumn], settings: &DisplaySettings) {
        for key in keys {
            let Some(column) = columns.iter().find(|c| &c.key == key) else {
                warn!("changed column '{}' missing from current data, skipping patch", key);
                continue;
            };
            let Some(existing) = self.index.column_element(key) else {
                warn!("no indexed element for changed column '{}', skipping patch", key);
                continue;
            };

            let offset = self.renderer.column_scroll(existing);
            match self.renderer.replace_column(existing, column, settings) {
                Some(rendered) => {
                    let previous_paths: Vec<String> = self
                        .previous_snapshot
                        .as_ref()
                        .and_then(|s| s.paths(key))
                        .map(|p| p.to_vec())
                        .unwrap_or_default();
                    self.index.patch_column(&previous_paths, &rendered);
                    self.renderer.set_column_scroll(rendered.column, offset);
                    self.column_scroll.insert(key.clone(), offset);
                }
                None => {
                    warn!("column '{}' element vanished during partial patch", key);
                }
            }
        }

        #[cfg(debug_assertions)]
        self.index.validate(&self.renderer);
    }

    fn capture_column_scrolls(&mut self) {
        let indexed: Vec<(String, crate::renderer::ElementHandle)> = self
            .index
            .columns()
            .map(|(key, handle)| (key.to_string(), handle))
            .collect();
        for (key, handle) in indexed {
            let offset = self.renderer.column_scroll(handle);
            self.column_scroll.insert(key, offset);
        }
    }

    fn restore_column_scrolls(&mut self, columns: &[BoardColumn]) {
        for column in columns {
            let Some(offset) = self.column_scroll.get(&column.key).copied() else {
                continue;
            };
            if let Some(handle) = self.index.column_element(&column.key) {
                self.renderer.set_column_scroll(handle, offset);
            }
        }
    }

    // --- selection -----------------------------------------------------

    pub fn handle_card_click(&mut self, path: &str, extend: bool, toggle: bool) {
        if toggle {
            self.selection.toggle(path, &self.card_sequence);
        } else {
            self.selection.select(path, extend, &self.card_sequence);
        }
        self.renderer.apply_cheap_update(self.selection.selected());
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.renderer.apply_cheap_update(self.selection.selected());
        }
    }

    // --- column drag ---------------------------------------------------

    pub fn start_column_drag(&mut self, key: &str) {
        if self.card_drag.is_some() {
            return;
        }
        self.column_drag = Some(ColumnDragSession::new(key));
    }

    pub fn update_column_drag(&mut self, target_key: &str, placement: DropPlacement) {
        if let Some(session) = &mut self.column_drag {
            session.set_target(target_key, placement);
        }
    }

    /// Complete the column drag. Transient drag state is cleared whether
    /// or not a drop target was established.
    pub fn drop_column(&mut self) {
        let Some(session) = self.column_drag.take() else {
            return;
        };
        let current: Vec<String> = self
            .previous_snapshot
            .as_ref()
            .map(|s| s.keys().map(str::to_string).collect())
            .unwrap_or_default();
        if let Some(order) = session.dropped_order(&current) {
            self.persist_column_order(&order);
        }
    }

    pub fn end_column_drag(&mut self) {
        self.column_drag = None;
    }

    // --- card drag -----------------------------------------------------

    pub fn start_card_drag(&mut self, source_path: &str, source_key: &str) {
        if self.column_drag.is_some() {
            return;
        }
        // Dragging an unselected card selects only itself.
        if !self.selection.is_selected(source_path) {
            self.selection.select(source_path, false, &self.card_sequence);
            self.renderer.apply_cheap_update(self.selection.selected());
        }
        let paths = self.selection.dragged_paths(source_path, &self.card_sequence);
        self.card_drag = Some(CardDragSession::new(paths, source_key));
    }

    pub fn update_card_drag(
        &mut self,
        column_key: &str,
        card_path: Option<String>,
        placement: Option<DropPlacement>,
    ) {
        if let Some(session) = &mut self.card_drag {
            session.set_target(column_key, card_path, placement);
        }
    }

    /// Complete the card drag: recompute the affected columns' saved
    /// orders, persist them, and (for cross-column drops) delegate the
    /// grouping-property change to the host. Dropping relative to a card
    /// that is itself being dragged is a no-op.
    pub async fn drop_card(&mut self) -> BoardResult<()> {
        let Some(session) = self.card_drag.take() else {
            return Ok(());
        };
        let Some(target_key) = session.target_key.clone() else {
            return Ok(());
        };
        if let Some(target_path) = session.target_path.as_deref() {
            if session.paths.iter().any(|p| p == target_path) {
                return Ok(());
            }
        }

        let placement = session.placement.unwrap_or(DropPlacement::Before);
        let raw = self.config_string(CARD_ORDER_KEY);
        let mut order_map = self.card_order.parse(raw.as_deref()).clone();

        let target_current = self.rendered_paths(&target_key);
        let new_target_order = reorder_paths(
            &target_current,
            &session.paths,
            session.target_path.as_deref(),
            placement,
        );
        order_map.insert(target_key.clone(), new_target_order);

        let cross_column = session.source_key != target_key;
        if cross_column {
            let source_current = self.rendered_paths(&session.source_key);
            let new_source_order: Vec<String> = source_current
                .into_iter()
                .filter(|p| !session.paths.contains(p))
                .collect();
            order_map.insert(session.source_key.clone(), new_source_order);
        }

        self.persist_card_order(&order_map);

        if cross_column {
            self.mutations
                .apply_grouping_change(&session.paths, grouping_value_for_key(&target_key))
                .await?;
        }

        Ok(())
    }

    pub fn end_card_drag(&mut self) {
        self.card_drag = None;
    }

    // --- record operations ---------------------------------------------

    /// Create and open a new record in the given column; the host
    /// pre-sets the grouping property.
    pub async fn create_card(&self, column_key: &str) -> BoardResult<()> {
        self.mutations
            .create_record(grouping_value_for_key(column_key))
            .await
    }

    /// Trash each record, collecting failures. Individual failures do
    /// not roll back the rest of the batch; the caller surfaces the
    /// aggregate.
    pub async fn trash_records(&self, paths: &[String]) -> TrashOutcome {
        let mut outcome = TrashOutcome::default();
        for path in paths {
            match self.trash.trash(path).await {
                Ok(()) => outcome.trashed.push(path.clone()),
                Err(e) => {
                    warn!("failed to trash '{}': {}", path, e);
                    outcome.failed.push(path.clone());
                }
            }
        }
        outcome
    }

    pub async fn trash_selected(&self) -> TrashOutcome {
        let paths: Vec<String> = self.selection.selected().iter().cloned().collect();
        self.trash_records(&paths).await
    }

    // --- scrolling -----------------------------------------------------

    pub fn handle_board_scroll(&mut self, left: f64, top: f64) {
        self.scroll.schedule_save(left, top);
    }

    pub fn handle_column_scroll(&mut self, key: &str, offset: f64) {
        self.column_scroll.insert(key.to_string(), offset);
        if let Some(handle) = self.index.column_element(key) {
            self.renderer.set_column_scroll(handle, offset);
        }
    }

    // --- persistence helpers -------------------------------------------

    fn persist_column_order(&mut self, order: &[String]) {
        self.config
            .set(COLUMN_ORDER_KEY, JsonValue::String(serialize_column_order(order)));
        self.column_order.invalidate();
    }

    fn persist_card_order(&mut self, order: &HashMap<String, Vec<String>>) {
        self.config
            .set(CARD_ORDER_KEY, JsonValue::String(serialize_card_order(order)));
        self.card_order.invalidate();
    }

    fn config_string(&self, key: &str) -> Option<String> {
        match self.config.get(key) {
            Some(JsonValue::String(s)) => Some(s),
            Some(_) | None => None,
        }
    }

    /// Rendered order of one column as of the last render pass.
    fn rendered_paths(&self, key: &str) -> Vec<String> {
        self.previous_snapshot
            .as_ref()
            .and_then(|s| s.paths(key))
            .map(|p| p.to_vec())
            .unwrap_or_default()
    }
}

fn grouping_value_for_key(key: &str) -> Option<String> {
    if key == NO_VALUE_COLUMN_KEY {
        None
    } else {
        Some(key.to_string())
    }
}
