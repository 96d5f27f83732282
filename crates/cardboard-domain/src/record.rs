use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pseudo-property for the record's display name. Always rendered on a
/// card, so it is excluded from signature property tracking.
pub const FILE_NAME_PROPERTY: &str = "file.name";

/// A file-backed record as presented by the host's data source.
///
/// Records are read-only to the board: the view observes them and
/// delegates all mutation back to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Unique path-like identifier, stable for the record's lifetime.
    pub path: String,
    pub properties: HashMap<String, Value>,
}

impl Record {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(property.into(), value.into());
        self
    }

    /// Look up a property value; absent properties read as no value.
    pub fn value_of(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_of_missing_property() {
        let record = Record::new("notes/a.md");
        assert!(record.value_of("status").is_none());
    }

    #[test]
    fn test_with_property() {
        let record = Record::new("notes/a.md").with_property("status", "todo");
        assert_eq!(record.value_of("status"), Some(&Value::from("todo")));
    }
}
