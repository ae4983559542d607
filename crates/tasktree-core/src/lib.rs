//! Convert Goblin Tools task lists into Markdown checklists and JSON Canvas
//! boards, and read canvases back into task lists.
//!
//! The pipeline is: [`parse_source`] a JSON document, [`build_forest`] from
//! the flat tasks, then [`render_markdown`] the forest or [`encode_canvas`]
//! the tasks. Everything here is a pure, synchronous transformation; file
//! handling lives in the CLI.

pub mod canvas;
pub mod error;
pub mod format;
mod lenient;
pub mod markdown;
pub mod source;
pub mod task;
pub mod tree;

pub use canvas::{Canvas, CanvasEdge, CanvasNode, decode_canvas, decode_canvas_at, encode_canvas};
pub use error::ConvertError;
pub use format::{Category, category_emoji, format_duration, format_estimate, format_timestamp};
pub use markdown::{MarkdownOptions, render_markdown, render_markdown_with};
pub use source::{TaskSource, parse_source, tasks_to_json};
pub use task::Task;
pub use tree::{Forest, OrphanPolicy, TreeNode, build_forest, build_forest_with};
