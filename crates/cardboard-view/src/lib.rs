pub mod drag;
pub mod index;
pub mod planner;
pub mod renderer;
pub mod scroll;
pub mod selection;
pub mod settings;
pub mod signature;
pub mod snapshot;
pub mod view;

pub use drag::{reorder_keys, reorder_paths, CardDragSession, ColumnDragSession, DropPlacement};
pub use index::ElementIndex;
pub use planner::{
    can_render_partially, plan_render, PartialDecision, RenderPlan, MAX_PARTIAL_COLUMNS,
};
pub use renderer::{BoardRenderer, ColumnElements, ElementHandle};
pub use scroll::{BoardScrollState, ScrollPersistence, BOARD_SCROLL_KEY};
pub use selection::SelectionState;
pub use settings::DisplaySettings;
pub use signature::{can_skip_full_render, compute_signature};
pub use snapshot::{diff_snapshots, ColumnSnapshot};
pub use view::{BoardView, ViewData, CARD_ORDER_KEY, COLUMN_ORDER_KEY};
