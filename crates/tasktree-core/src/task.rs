//! Task record types for Goblin Tools task lists.
//!
//! These types map directly to the JSON array exported by Magic ToDo and are
//! deserialized via `serde` + `serde_json`. Scalar fields are decoded
//! leniently: exports in the wild carry floats, numeric strings and `null`
//! where integers are expected.

use serde::{Deserialize, Serialize};

use crate::lenient::{lenient_id, lenient_int, lenient_parent_id, null_as_default};

/// A single entry in a flat task list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier, unique within one batch.
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    /// Identifier of the parent task. `None` marks a root task.
    #[serde(default, deserialize_with = "lenient_parent_id")]
    pub parent_id: Option<String>,
    /// Display text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    /// Time estimate in seconds.
    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimate: Option<i64>,
    /// Creation time as epoch seconds or epoch milliseconds.
    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<i64>,
    /// Category glyph (see [`crate::format::Category`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Task {
    /// A root task with the given id and text and no metadata.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            text: text.into(),
            completed: false,
            estimate: None,
            timestamp: None,
            category: None,
        }
    }

    /// Attach this task under `parent_id`.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
