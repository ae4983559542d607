//! Shared fixtures for tasktree integration tests.
//!
//! Provides small task builders and a realistic Magic ToDo export so tests
//! across crates exercise the same data.

use serde_json::json;
use tasktree_core::Task;

/// A root task.
pub fn root(id: &str, text: &str) -> Task {
    Task::new(id, text)
}

/// A task under `parent`.
pub fn child(id: &str, parent: &str, text: &str) -> Task {
    Task::new(id, text).with_parent(parent)
}

/// A root with two children: `root` -> `c1`, `c2`.
pub fn two_level_tasks() -> Vec<Task> {
    vec![
        root("root", "Plan birthday"),
        child("c1", "root", "Send invites"),
        child("c2", "root", "Order cake"),
    ]
}

/// Epoch-millisecond timestamp shared by [`goblin_export`] records.
pub const EXPORT_TIMESTAMP_MS: i64 = 1_717_243_200_000;

/// A Magic ToDo export: two root tasks, nested subtasks, estimates,
/// categories, one completed item and one record whose parent is missing.
pub fn goblin_export() -> String {
    let ts = EXPORT_TIMESTAMP_MS;
    json!([
        {"id": "t1", "parentId": null, "text": "Clean the apartment", "completed": false,
         "estimate": 7200, "timestamp": ts, "category": "📋"},
        {"id": "t1a", "parentId": "t1", "text": "Vacuum floors", "completed": true,
         "estimate": 1800, "timestamp": ts, "category": "📋"},
        {"id": "t1b", "parentId": "t1", "text": "Wipe counters", "completed": false,
         "estimate": 45, "timestamp": ts, "category": "📋"},
        {"id": "t1b1", "parentId": "t1b", "text": "Buy spray", "completed": false,
         "timestamp": ts},
        {"id": "t2", "parentId": null, "text": "File taxes", "completed": false,
         "estimate": 90000, "timestamp": ts, "category": "💵"},
        {"id": "t2a", "parentId": "t2", "text": "Collect receipts", "completed": false,
         "estimate": null, "timestamp": ts, "category": "💵"},
        {"id": "lost", "parentId": "deleted", "text": "Stray subtask", "completed": false,
         "timestamp": ts}
    ])
    .to_string()
}

/// A minimal JSON Canvas with a parent card, two children and one file card.
pub fn obsidian_canvas() -> String {
    json!({
        "nodes": [
            {"id": "p", "type": "text", "text": "Launch website", "x": 0, "y": 0,
             "width": 300, "height": 80},
            {"id": "k1", "type": "text", "text": "Write copy", "x": 0, "y": 200,
             "width": 300, "height": 80, "color": "4"},
            {"id": "k2", "type": "text", "text": "Pick a domain", "x": 350, "y": 200,
             "width": 300, "height": 80},
            {"id": "img", "type": "file", "file": "assets/logo.png", "x": 700, "y": 0,
             "width": 200, "height": 200}
        ],
        "edges": [
            {"id": "e1", "fromNode": "p", "fromSide": "bottom", "toNode": "k1", "toSide": "top"},
            {"id": "e2", "fromNode": "p", "toNode": "k2"},
            {"id": "e3", "fromNode": "p", "toNode": "img"}
        ]
    })
    .to_string()
}
