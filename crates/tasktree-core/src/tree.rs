//! Forest construction from a flat task list.
//!
//! Tasks reference their parent by id. Building runs in two linear passes:
//! register every id, then attach each task to its parent (or the root list)
//! in input order. Sibling order is always input order.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConvertError;
use crate::task::Task;

/// What to do with a task whose `parentId` names no task in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Leave the task (and its subtree) out of the forest.
    #[default]
    Drop,
    /// Treat the task as an additional root.
    Promote,
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Drop => "drop",
            Self::Promote => "promote",
        };
        f.write_str(s)
    }
}

impl FromStr for OrphanPolicy {
    type Err = OrphanPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(Self::Drop),
            "promote" => Ok(Self::Promote),
            other => Err(OrphanPolicyParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`OrphanPolicy`] string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid orphan policy: {0:?} (expected drop or promote)")]
pub struct OrphanPolicyParseError(pub String);

// ---------------------------------------------------------------------------

/// One task in a [`Forest`]. `children` index into [`Forest::nodes`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<'a> {
    pub task: &'a Task,
    /// Distance from the root; roots are 0.
    pub depth: usize,
    pub children: Vec<usize>,
}

/// The trees of a task list, stored flat in depth-first pre-order, plus the
/// ids of tasks whose parent could not be resolved.
///
/// Nothing here recurses on tree depth, so arbitrarily long parent chains
/// are safe to build, walk and drop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forest<'a> {
    /// Every reachable task, pre-order.
    pub nodes: Vec<TreeNode<'a>>,
    /// Indices of root nodes, in input order.
    pub roots: Vec<usize>,
    /// Ids of orphaned tasks in input order, whether or not they were promoted.
    pub orphans: Vec<&'a str>,
}

impl<'a> Forest<'a> {
    /// Root nodes in input order.
    pub fn root_nodes(&self) -> impl Iterator<Item = &TreeNode<'a>> + '_ {
        self.roots.iter().map(|&i| &self.nodes[i])
    }

    /// Direct children of `node`, in input order.
    pub fn children<'f>(
        &'f self,
        node: &'f TreeNode<'a>,
    ) -> impl Iterator<Item = &'f TreeNode<'a>> + 'f {
        node.children.iter().map(|&i| &self.nodes[i])
    }

    /// Depth-first pre-order walk, paired with each task's depth (roots are 0).
    pub fn flatten(&self) -> Vec<(usize, &'a Task)> {
        self.nodes.iter().map(|n| (n.depth, n.task)).collect()
    }

    /// Number of tasks reachable from the roots.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build a forest, dropping orphaned tasks.
pub fn build_forest(tasks: &[Task]) -> Result<Forest<'_>, ConvertError> {
    build_forest_with(tasks, OrphanPolicy::Drop)
}

/// Build a forest with an explicit orphan policy.
///
/// Fails only on a record with an empty id. Tasks caught in a parent cycle are
/// unreachable from any root and are absent from the result.
pub fn build_forest_with(
    tasks: &[Task],
    policy: OrphanPolicy,
) -> Result<Forest<'_>, ConvertError> {
    // Pass 1: id -> position.
    let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        if task.id.is_empty() {
            return Err(ConvertError::MalformedRecord {
                index: i,
                reason: "task id must not be empty".to_owned(),
            });
        }
        if by_id.insert(task.id.as_str(), i).is_some() {
            warn!(id = %task.id, "duplicate task id, the later record receives its children");
        }
    }

    // Pass 2: attach children, collect roots.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    let mut roots = Vec::new();
    let mut orphans = Vec::new();
    for (i, task) in tasks.iter().enumerate() {
        let Some(parent_id) = task.parent_id.as_deref() else {
            roots.push(i);
            continue;
        };
        match by_id.get(parent_id) {
            Some(&parent) => children[parent].push(i),
            None => {
                warn!(id = %task.id, parent_id, %policy, "task parent not found in batch");
                orphans.push(task.id.as_str());
                if policy == OrphanPolicy::Promote {
                    roots.push(i);
                }
            }
        }
    }

    let forest = assemble(tasks, &children, &roots, orphans);
    debug!(
        tasks = tasks.len(),
        roots = forest.roots.len(),
        reachable = forest.len(),
        orphans = forest.orphans.len(),
        "built task forest"
    );
    Ok(forest)
}

/// Lay the trees out in pre-order with an explicit work stack.
///
/// Each task has at most one parent and roots have none, so the walk from a
/// root cannot revisit a task.
fn assemble<'a>(
    tasks: &'a [Task],
    children: &[Vec<usize>],
    roots: &[usize],
    orphans: Vec<&'a str>,
) -> Forest<'a> {
    let mut nodes: Vec<TreeNode<'a>> = Vec::with_capacity(tasks.len());
    let mut root_nodes = Vec::with_capacity(roots.len());
    // (task index, depth, parent node index)
    let mut stack: Vec<(usize, usize, Option<usize>)> =
        roots.iter().rev().map(|&i| (i, 0, None)).collect();

    while let Some((i, depth, parent)) = stack.pop() {
        let node = nodes.len();
        nodes.push(TreeNode {
            task: &tasks[i],
            depth,
            children: Vec::with_capacity(children[i].len()),
        });
        match parent {
            Some(p) => nodes[p].children.push(node),
            None => root_nodes.push(node),
        }
        stack.extend(children[i].iter().rev().map(|&c| (c, depth + 1, Some(node))));
    }

    Forest {
        nodes,
        roots: root_nodes,
        orphans,
    }
}
