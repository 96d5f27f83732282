//! Persisted order overrides.
//!
//! Two stores share the same discipline: a delimited-string persisted
//! form, a parse path that never fails (malformed input reads as "no
//! override"), and a raw-string identity cache so an unchanged persisted
//! value is not re-parsed on every render cycle. The cache is an
//! optimization only; behavior is identical on hit and miss.
//!
//! Encoding is human-inspectable: newline-separated entries, with card
//! order using tab-separated fields (`column-key TAB path TAB path ...`).

use crate::group::BoardColumn;
use crate::record::Record;
use std::collections::HashMap;

/// Cached parser for the persisted column-key order.
#[derive(Debug, Default)]
pub struct ColumnOrderStore {
    raw: Option<String>,
    parsed: Vec<String>,
}

impl ColumnOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted order, reusing the previous result when the
    /// raw string is unchanged. `None` (key never written, or a value of
    /// an unexpected shape) reads as no override.
    pub fn parse(&mut self, raw: Option<&str>) -> &[String] {
        let unchanged = match (&self.raw, raw) {
            (Some(cached), Some(current)) => cached == current,
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            self.parsed = raw
                .map(|raw| {
                    raw.split('\n')
                        .filter(|line| !line.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            self.raw = raw.map(str::to_string);
        }
        &self.parsed
    }

    /// Drop the cache so the next read re-parses. Called after every
    /// write of the persisted value.
    pub fn invalidate(&mut self) {
        self.raw = None;
        self.parsed.clear();
    }
}

pub fn serialize_column_order(order: &[String]) -> String {
    order.join("\n")
}

/// Cached parser for the persisted per-column card order.
#[derive(Debug, Default)]
pub struct CardOrderStore {
    raw: Option<String>,
    parsed: HashMap<String, Vec<String>>,
}

impl CardOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&mut self, raw: Option<&str>) -> &HashMap<String, Vec<String>> {
        let unchanged = match (&self.raw, raw) {
            (Some(cached), Some(current)) => cached == current,
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            self.parsed.clear();
            if let Some(raw) = raw {
                for line in raw.split('\n').filter(|line| !line.is_empty()) {
                    let mut fields = line.split('\t');
                    let Some(key) = fields.next() else { continue };
                    if key.is_empty() {
                        continue;
                    }
                    let paths = fields
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                        .collect();
                    self.parsed.insert(key.to_string(), paths);
                }
            }
            self.raw = raw.map(str::to_string);
        }
        &self.parsed
    }

    pub fn invalidate(&mut self) {
        self.raw = None;
        self.parsed.clear();
    }
}

/// Serialize the card-order map. Columns are emitted in sorted key order
/// so equal maps always serialize identically.
pub fn serialize_card_order(order: &HashMap<String, Vec<String>>) -> String {
    let mut keys: Vec<_> = order.keys().collect();
    keys.sort();

    let mut lines = Vec::with_capacity(keys.len());
    for key in keys {
        let mut line = key.clone();
        for path in &order[key] {
            line.push('\t');
            line.push_str(path);
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Sort columns by the persisted key order. Stable: columns absent from
/// the order list keep their relative input order and sort after all
/// listed columns.
pub fn sort_groups_by_column_order(columns: Vec<BoardColumn>, order: &[String]) -> Vec<BoardColumn> {
    let mut indexed: Vec<(usize, BoardColumn)> = columns.into_iter().enumerate().collect();
    indexed.sort_by_key(|(original, column)| {
        let rank = order
            .iter()
            .position(|key| *key == column.key)
            .unwrap_or(usize::MAX);
        (rank, *original)
    });
    indexed.into_iter().map(|(_, column)| column).collect()
}

/// Apply a column's saved card order to its current entries.
///
/// Saved identifiers still present are emitted in saved order; stale
/// identifiers are skipped silently. Current entries not mentioned in
/// the saved list are prepended in their original relative order, so
/// newly-arrived cards surface at the top of the column.
pub fn apply_local_card_order(entries: Vec<Record>, saved: &[String]) -> Vec<Record> {
    if saved.is_empty() {
        return entries;
    }

    let mut used = vec![false; entries.len()];
    let mut ordered: Vec<usize> = Vec::with_capacity(entries.len());

    for path in saved {
        let found = entries
            .iter()
            .enumerate()
            .find(|(i, r)| !used[*i] && r.path == *path)
            .map(|(i, _)| i);
        if let Some(idx) = found {
            used[idx] = true;
            ordered.push(idx);
        }
    }

    let mut result: Vec<Record> = Vec::with_capacity(entries.len());
    let mut taken: Vec<Option<Record>> = entries.into_iter().map(Some).collect();

    // New (unordered) entries first, in original relative order.
    for (idx, slot) in taken.iter_mut().enumerate() {
        if !used[idx] {
            if let Some(record) = slot.take() {
                result.push(record);
            }
        }
    }
    for idx in ordered {
        if let Some(record) = taken[idx].take() {
            result.push(record);
        }
    }

    result
}
