//! JSON Canvas document types.
//!
//! Only the fields this converter reads or writes are modelled. Unknown fields
//! on input (`fromSide`, `file`, `url`, ...) are ignored.

use serde::{Deserialize, Serialize};

use crate::lenient::{lenient_id, lenient_int_or_zero, null_as_default};

/// Node `type` value for text cards.
pub const TEXT_NODE: &str = "text";

/// A canvas: positioned cards and the edges between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Canvas {
    #[serde(default)]
    pub nodes: Vec<CanvasNode>,
    #[serde(default)]
    pub edges: Vec<CanvasEdge>,
}

/// A positioned card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanvasNode {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    /// `text`, `file`, `link` or `group`. Only text nodes map to tasks; an
    /// untyped node reads as `""` and is skipped.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_int_or_zero")]
    pub x: i64,
    #[serde(default, deserialize_with = "lenient_int_or_zero")]
    pub y: i64,
    #[serde(default, deserialize_with = "lenient_int_or_zero")]
    pub width: i64,
    #[serde(default, deserialize_with = "lenient_int_or_zero")]
    pub height: i64,
    /// Preset color index (`"1"`..`"6"`) or hex color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CanvasNode {
    pub fn is_text(&self) -> bool {
        self.kind == TEXT_NODE
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CanvasEdge {
    #[serde(default)]
    pub id: String,
    pub from_node: String,
    pub to_node: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
}

impl CanvasEdge {
    /// Parent-to-child edge with the derived `<from>-<to>` id.
    pub fn link(from_node: &str, to_node: &str) -> Self {
        Self {
            id: format!("{from_node}-{to_node}"),
            from_node: from_node.to_owned(),
            to_node: to_node.to_owned(),
            label: String::new(),
        }
    }
}
