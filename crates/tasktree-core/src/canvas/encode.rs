//! Task list to canvas layout.
//!
//! Layout is a fixed grid. Roots form a row along `y = 0`, one column each.
//! Direct children stack below their root; deeper descendants continue the
//! same column in depth-first order. Tasks that no root reaches get a final
//! column of their own.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::types::{Canvas, CanvasEdge, CanvasNode, TEXT_NODE};
use crate::format::{category_emoji, format_estimate};
use crate::task::Task;

pub const NODE_WIDTH: i64 = 400;
pub const NODE_HEIGHT: i64 = 100;
pub const NODE_COLOR: &str = "1";

/// Distance between root columns.
pub const HORIZONTAL_SPACING: i64 = 500;
/// Distance from a root to its first child.
pub const VERTICAL_SPACING: i64 = 150;
/// Distance between stacked cards in a column.
pub const CHILD_SPACING: i64 = 120;

/// Card label: category glyph, text, then the estimate suffix.
pub fn card_label(task: &Task) -> String {
    format!(
        "{} {}{}",
        category_emoji(task.category.as_deref()),
        task.text,
        format_estimate(task.estimate)
    )
}

/// Lay out `tasks` as a canvas with one card per task and one edge per task
/// that names a parent, whether or not that parent is in the batch.
pub fn encode_canvas(tasks: &[Task]) -> Canvas {
    let positions = layout(tasks);

    let nodes = tasks
        .iter()
        .zip(positions)
        .map(|(task, (x, y))| CanvasNode {
            id: task.id.clone(),
            kind: TEXT_NODE.to_owned(),
            text: card_label(task),
            x,
            y,
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
            color: Some(NODE_COLOR.to_owned()),
        })
        .collect();

    let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let mut edges = Vec::new();
    for task in tasks {
        let Some(parent_id) = task.parent_id.as_deref() else {
            continue;
        };
        if !ids.contains(parent_id) {
            warn!(id = %task.id, parent_id, "parent not in batch, canvas edge points at a missing card");
        }
        edges.push(CanvasEdge::link(parent_id, &task.id));
    }

    debug!(nodes = tasks.len(), edges = edges.len(), "encoded canvas");
    Canvas { nodes, edges }
}

/// Compute `(x, y)` for every task, in input order.
fn layout(tasks: &[Task]) -> Vec<(i64, i64)> {
    let mut positions: Vec<Option<(i64, i64)>> = vec![None; tasks.len()];
    let children = children_by_parent(tasks);
    let children_of = |i: usize| kids(&children, &tasks[i].id);

    let roots: Vec<usize> = (0..tasks.len()).filter(|&i| tasks[i].is_root()).collect();
    for (column, &root) in roots.iter().enumerate() {
        let x = column as i64 * HORIZONTAL_SPACING;
        let y = 0;
        positions[root] = Some((x, y));

        let direct = children_of(root);
        for (j, &child) in direct.iter().enumerate() {
            positions[child] = Some((x, y + VERTICAL_SPACING + j as i64 * CHILD_SPACING));
        }

        // Deeper descendants, depth-first below the direct children. Anything
        // already placed is skipped, which also stops parent cycles.
        let mut row = direct.len() as i64;
        let mut pending: Vec<usize> = Vec::new();
        for &child in direct {
            pending.clear();
            pending.extend(children_of(child).iter().rev());
            while let Some(next) = pending.pop() {
                if positions[next].is_some() {
                    continue;
                }
                positions[next] = Some((x, y + VERTICAL_SPACING + row * CHILD_SPACING));
                row += 1;
                pending.extend(children_of(next).iter().rev());
            }
        }
    }

    // Orphans and parent cycles.
    let spill_x = roots.len() as i64 * HORIZONTAL_SPACING;
    let mut spill_row = 0;
    positions
        .into_iter()
        .map(|pos| {
            pos.unwrap_or_else(|| {
                let pos = (spill_x, spill_row * CHILD_SPACING);
                spill_row += 1;
                pos
            })
        })
        .collect()
}

fn kids<'m>(children: &'m HashMap<&str, Vec<usize>>, id: &str) -> &'m [usize] {
    children.get(id).map(Vec::as_slice).unwrap_or_default()
}

/// Task indices grouped by the parent id they name, in input order.
fn children_by_parent(tasks: &[Task]) -> HashMap<&str, Vec<usize>> {
    let mut map: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, task) in tasks.iter().enumerate() {
        if let Some(parent_id) = task.parent_id.as_deref() {
            map.entry(parent_id).or_default().push(i);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(canvas: &Canvas, id: &str) -> (i64, i64) {
        let node = canvas
            .nodes
            .iter()
            .find(|n| n.id == id)
            .unwrap_or_else(|| panic!("no node {id}"));
        (node.x, node.y)
    }

    #[test]
    fn roots_form_a_row() {
        let tasks = vec![Task::new("a", "A"), Task::new("b", "B")];
        let canvas = encode_canvas(&tasks);
        assert_eq!(position(&canvas, "a"), (0, 0));
        assert_eq!(position(&canvas, "b"), (500, 0));
        assert!(canvas.edges.is_empty());
    }

    #[test]
    fn direct_children_stack_below_root() {
        let tasks = vec![
            Task::new("a", "A"),
            Task::new("b", "B"),
            Task::new("b1", "B1").with_parent("b"),
            Task::new("b2", "B2").with_parent("b"),
        ];
        let canvas = encode_canvas(&tasks);
        assert_eq!(position(&canvas, "b1"), (500, 150));
        assert_eq!(position(&canvas, "b2"), (500, 270));
    }

    #[test]
    fn deeper_descendants_continue_the_column() {
        let tasks = vec![
            Task::new("a", "A"),
            Task::new("a1", "A1").with_parent("a"),
            Task::new("a1x", "A1x").with_parent("a1"),
            Task::new("a2", "A2").with_parent("a"),
            Task::new("a1xy", "A1xy").with_parent("a1x"),
            Task::new("a2x", "A2x").with_parent("a2"),
        ];
        let canvas = encode_canvas(&tasks);
        // Direct children keep their fixed slots.
        assert_eq!(position(&canvas, "a1"), (0, 150));
        assert_eq!(position(&canvas, "a2"), (0, 270));
        // Then depth-first below them.
        assert_eq!(position(&canvas, "a1x"), (0, 390));
        assert_eq!(position(&canvas, "a1xy"), (0, 510));
        assert_eq!(position(&canvas, "a2x"), (0, 630));
    }

    #[test]
    fn unreachable_tasks_spill_into_trailing_column() {
        let tasks = vec![
            Task::new("a", "A"),
            Task::new("o", "Orphan").with_parent("missing"),
            Task::new("c1", "C1").with_parent("c2"),
            Task::new("c2", "C2").with_parent("c1"),
        ];
        let canvas = encode_canvas(&tasks);
        assert_eq!(position(&canvas, "o"), (500, 0));
        assert_eq!(position(&canvas, "c1"), (500, 120));
        assert_eq!(position(&canvas, "c2"), (500, 240));
    }

    #[test]
    fn nodes_carry_label_size_and_color() {
        let mut task = Task::new("a", "Write report");
        task.category = Some("🖊".to_owned());
        task.estimate = Some(3661);
        let canvas = encode_canvas(&[task]);
        let node = &canvas.nodes[0];
        assert_eq!(node.text, "🖊 Write report (1h 1m)");
        assert_eq!(node.kind, "text");
        assert_eq!((node.width, node.height), (400, 100));
        assert_eq!(node.color.as_deref(), Some("1"));
    }

    #[test]
    fn label_defaults_category() {
        assert_eq!(card_label(&Task::new("a", "Plain")), "☑️ Plain");
    }

    #[test]
    fn one_edge_per_task_with_a_parent() {
        let tasks = vec![
            Task::new("a", "A"),
            Task::new("b", "B").with_parent("a"),
            Task::new("c", "C").with_parent("b"),
            Task::new("o", "Orphan").with_parent("missing"),
        ];
        let canvas = encode_canvas(&tasks);
        assert_eq!(
            canvas.edges,
            vec![
                CanvasEdge::link("a", "b"),
                CanvasEdge::link("b", "c"),
                CanvasEdge::link("missing", "o"),
            ]
        );
        assert_eq!(canvas.edges[0].id, "a-b");
    }

    #[test]
    fn nodes_follow_input_order() {
        let tasks = vec![Task::new("c", "C").with_parent("p"), Task::new("p", "P")];
        let canvas = encode_canvas(&tasks);
        let ids: Vec<&str> = canvas.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "p"]);
        assert_eq!(position(&canvas, "c"), (0, 150));
    }

    #[test]
    fn very_deep_chain_stays_in_one_column() {
        let tasks: Vec<Task> = (0..10_000)
            .map(|i| {
                let task = Task::new(format!("t{i}"), format!("Step {i}"));
                if i == 0 {
                    task
                } else {
                    task.with_parent(format!("t{}", i - 1))
                }
            })
            .collect();
        let canvas = encode_canvas(&tasks);
        assert_eq!(position(&canvas, "t1"), (0, 150));
        assert_eq!(position(&canvas, "t9999"), (0, 150 + 9_998 * 120));
        assert_eq!(canvas.edges.len(), 9_999);
    }
}
