pub mod group;
pub mod order;
pub mod record;
pub mod value;

pub use group::{column_key, merge_groups_by_column_key, BoardColumn, Group, NO_VALUE_COLUMN_KEY};
pub use order::{
    apply_local_card_order, serialize_card_order, serialize_column_order,
    sort_groups_by_column_order, CardOrderStore, ColumnOrderStore,
};
pub use record::{Record, FILE_NAME_PROPERTY};
pub use value::Value;
