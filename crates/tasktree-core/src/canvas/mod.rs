//! JSON Canvas codec: lay tasks out as cards and read cards back as tasks.

pub mod decode;
pub mod encode;
pub mod types;

pub use decode::{DECODED_CATEGORY, decode_canvas, decode_canvas_at};
pub use encode::{card_label, encode_canvas};
pub use types::{Canvas, CanvasEdge, CanvasNode, TEXT_NODE};
