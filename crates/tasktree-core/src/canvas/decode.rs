//! Canvas to task list.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use super::types::Canvas;
use crate::format::Category;
use crate::task::Task;

/// Category given to every task read back from a canvas.
pub const DECODED_CATEGORY: Category = Category::Documentation;

/// Read the text cards of `canvas` back into a flat task list, stamped with
/// the current time.
pub fn decode_canvas(canvas: &Canvas) -> Vec<Task> {
    decode_canvas_at(canvas, Utc::now().timestamp_millis())
}

/// [`decode_canvas`] with an explicit creation time in epoch milliseconds.
///
/// Card text is copied verbatim. Each edge between two text cards makes the
/// target a child of the source; when several edges point at one card the
/// last one wins.
pub fn decode_canvas_at(canvas: &Canvas, now_millis: i64) -> Vec<Task> {
    let mut tasks = Vec::new();
    let mut by_id: HashMap<&str, usize> = HashMap::new();

    for node in &canvas.nodes {
        if !node.is_text() {
            debug!(id = %node.id, kind = %node.kind, "skipping non-text canvas node");
            continue;
        }
        by_id.insert(node.id.as_str(), tasks.len());
        tasks.push(Task {
            id: node.id.clone(),
            parent_id: None,
            text: node.text.clone(),
            completed: false,
            estimate: None,
            timestamp: Some(now_millis),
            category: Some(DECODED_CATEGORY.glyph().to_owned()),
        });
    }

    for edge in &canvas.edges {
        match (
            by_id.contains_key(edge.from_node.as_str()),
            by_id.get(edge.to_node.as_str()),
        ) {
            (true, Some(&child)) => tasks[child].parent_id = Some(edge.from_node.clone()),
            _ => debug!(
                from = %edge.from_node,
                to = %edge.to_node,
                "skipping edge without two text endpoints"
            ),
        }
    }

    debug!(tasks = tasks.len(), "decoded canvas");
    tasks
}
