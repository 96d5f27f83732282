use serde::{Deserialize, Serialize};

/// Display configuration for the board, as chosen in the host's view
/// settings UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Properties rendered on each card, in display order. May include
    /// the file-name pseudo-property.
    pub shown_properties: Vec<String>,
    /// Property the board groups by. `None` means no usable grouping is
    /// configured and the board renders a placeholder instead.
    pub group_by: Option<String>,
}

impl DisplaySettings {
    pub fn new(shown_properties: Vec<String>, group_by: Option<String>) -> Self {
        Self {
            shown_properties,
            group_by,
        }
    }

    /// Stable textual encoding used by the render signature.
    pub fn encode(&self) -> String {
        let mut encoded = self.shown_properties.join("\u{1f}");
        encoded.push('\u{1e}');
        if let Some(ref group_by) = self.group_by {
            encoded.push_str(group_by);
        }
        encoded
    }
}
