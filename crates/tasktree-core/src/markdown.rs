//! Markdown checklist rendering.
//!
//! Root tasks become `##` section headers carrying their category glyph;
//! every descendant becomes a checkbox item indented two spaces per level.

use crate::format::{category_emoji, format_estimate, format_timestamp};
use crate::tree::{Forest, TreeNode};

/// Rendering options for [`render_markdown_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Append `(Created: ...)` to checklist items that carry a timestamp.
    pub show_timestamps: bool,
    /// Document title, rendered as the leading `#` header.
    pub title: String,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            show_timestamps: false,
            title: "Tasks".to_owned(),
        }
    }
}

/// Render a forest as a Markdown document titled `Tasks`.
pub fn render_markdown(forest: &Forest<'_>, show_timestamps: bool) -> String {
    render_markdown_with(
        forest,
        &MarkdownOptions {
            show_timestamps,
            ..MarkdownOptions::default()
        },
    )
}

/// Render a forest as a Markdown document.
///
/// Lines are joined with `\n` and the document has no trailing newline.
pub fn render_markdown_with(forest: &Forest<'_>, options: &MarkdownOptions) -> String {
    let mut lines = Vec::with_capacity(forest.len() + 1);
    lines.push(format!("# {}", options.title));
    // Nodes are stored pre-order, so a linear pass is the document order.
    for node in &forest.nodes {
        lines.push(render_line(node, options.show_timestamps));
    }
    lines.join("\n")
}

fn render_line(node: &TreeNode<'_>, show_timestamps: bool) -> String {
    let task = node.task;
    let estimate = format_estimate(task.estimate);

    if node.depth == 0 {
        let emoji = category_emoji(task.category.as_deref());
        return format!("\n## {emoji} {}{estimate}", task.text);
    }

    let indent = "  ".repeat(node.depth);
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{indent}- {checkbox} {}{estimate}", task.text);
    if show_timestamps {
        let created = format_timestamp(task.timestamp);
        if !created.is_empty() {
            line.push_str(&format!(" (Created: {created})"));
        }
    }
    line
}
