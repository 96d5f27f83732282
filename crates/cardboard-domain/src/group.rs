use crate::record::Record;
use crate::value::Value;

/// Column key for records whose grouping property has no value.
///
/// Deliberately unlikely to collide with a real stringified property
/// value.
pub const NO_VALUE_COLUMN_KEY: &str = "__cardboard_no_value__";

/// One group as emitted by the upstream data source. The source may emit
/// several groups that normalize to the same column key.
#[derive(Debug, Clone)]
pub struct Group {
    pub key: Value,
    /// Distinguishes "explicitly grouped under this value" from the
    /// fallback/ungrouped bucket.
    pub has_key: bool,
    pub entries: Vec<Record>,
}

impl Group {
    pub fn new(key: Value, has_key: bool, entries: Vec<Record>) -> Self {
        Self {
            key,
            has_key,
            entries,
        }
    }
}

/// A logical board column: exactly one per column key after merging.
#[derive(Debug, Clone)]
pub struct BoardColumn {
    pub key: String,
    pub has_key: bool,
    pub entries: Vec<Record>,
}

/// Map an arbitrary grouping value to a stable column key. Pure and
/// total: no value fails to normalize.
pub fn column_key(value: &Value) -> String {
    if value.is_null() {
        NO_VALUE_COLUMN_KEY.to_string()
    } else {
        value.to_string()
    }
}

/// Collapse upstream groups sharing a column key into one column each.
///
/// Column order is first-occurrence order of each key. Entries are
/// concatenated in arrival order and `has_key` is OR-combined. Entries
/// are never dropped or deduplicated here; a record appearing in two
/// source groups is an upstream data concern.
pub fn merge_groups_by_column_key(groups: Vec<Group>) -> Vec<BoardColumn> {
    let mut columns: Vec<BoardColumn> = Vec::new();

    for group in groups {
        let key = column_key(&group.key);
        if let Some(existing) = columns.iter_mut().find(|c| c.key == key) {
            existing.entries.extend(group.entries);
            existing.has_key = existing.has_key || group.has_key;
        } else {
            columns.push(BoardColumn {
                key,
                has_key: group.has_key,
                entries: group.entries,
            });
        }
    }

    columns
}
