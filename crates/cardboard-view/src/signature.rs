//! Render signature: a cheap content hash over everything that can
//! affect the rendered board. Two renders that would produce identical
//! output must produce equal signatures; the planner skips all DOM work
//! when the signature is unchanged.

use crate::settings::DisplaySettings;
use cardboard_domain::{serialize_card_order, BoardColumn, FILE_NAME_PROPERTY};
use std::collections::HashMap;

const FIELD_SEP: char = '\u{1f}';
const SECTION_SEP: char = '\u{1e}';

/// Compute the signature over the fully-ordered columns (merge, column
/// order, and local card order already applied), the display settings,
/// and the persisted card-order map.
///
/// Tracked properties are the shown properties minus the file-name
/// pseudo-property and the active group-by property; those two are
/// already captured by the column/path sections.
pub fn compute_signature(
    columns: &[BoardColumn],
    settings: &DisplaySettings,
    card_order: &HashMap<String, Vec<String>>,
) -> String {
    let tracked: Vec<&str> = settings
        .shown_properties
        .iter()
        .map(String::as_str)
        .filter(|p| *p != FILE_NAME_PROPERTY && Some(*p) != settings.group_by.as_deref())
        .collect();

    let mut signature = String::new();

    for column in columns {
        signature.push_str(&column.key);
        signature.push(FIELD_SEP);
    }
    signature.push(SECTION_SEP);

    for column in columns {
        for record in &column.entries {
            signature.push_str(&record.path);
            signature.push(FIELD_SEP);
        }
    }
    signature.push(SECTION_SEP);

    signature.push_str(&settings.encode());
    signature.push(SECTION_SEP);

    signature.push_str(&serialize_card_order(card_order));
    signature.push(SECTION_SEP);

    let mut hash: i32 = 0;
    for column in columns {
        for record in &column.entries {
            for property in &tracked {
                hash = hash_str(hash, &record.path);
                hash = hash_str(hash, property);
                if let Some(value) = record.value_of(property) {
                    hash = hash_str(hash, &value.to_string());
                }
            }
        }
    }
    signature.push_str(&hash.to_string());

    signature
}

/// Rolling polynomial hash with 32-bit signed overflow semantics.
/// Non-cryptographic; collisions are tolerated by design.
fn hash_str(mut hash: i32, s: &str) -> i32 {
    for ch in s.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(ch as i32);
    }
    hash
}

/// A render can be skipped entirely iff a previous render has occurred
/// and produced a signature equal to the current one. Always false
/// before the first paint.
pub fn can_skip_full_render(
    current: &str,
    previous: Option<&str>,
    has_rendered_board: bool,
) -> bool {
    has_rendered_board && previous == Some(current)
}
