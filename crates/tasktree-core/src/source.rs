//! Input detection: a JSON document is either a flat task array or a canvas.

use serde_json::Value;
use tracing::debug;

use crate::canvas::{Canvas, decode_canvas};
use crate::error::ConvertError;
use crate::task::Task;

/// A parsed input document.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskSource {
    Tasks(Vec<Task>),
    Canvas(Canvas),
}

impl TaskSource {
    /// Flatten to a task list, decoding a canvas with the current time.
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            Self::Tasks(tasks) => tasks,
            Self::Canvas(canvas) => decode_canvas(&canvas),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tasks(_) => "task list",
            Self::Canvas(_) => "canvas",
        }
    }
}

/// Parse a JSON document and detect its shape.
///
/// An object with both `nodes` and `edges` is a canvas; an array is a task
/// list whose elements are decoded one by one so a bad record reports its
/// position.
pub fn parse_source(json: &str) -> Result<TaskSource, ConvertError> {
    let value: Value = serde_json::from_str(json)?;
    if is_canvas(&value) {
        let canvas: Canvas = serde_json::from_value(value)?;
        debug!(
            nodes = canvas.nodes.len(),
            edges = canvas.edges.len(),
            "detected canvas input"
        );
        return Ok(TaskSource::Canvas(canvas));
    }

    match value {
        Value::Array(items) => {
            let tasks = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| task_from_value(index, item))
                .collect::<Result<Vec<_>, _>>()?;
            debug!(tasks = tasks.len(), "detected task list input");
            Ok(TaskSource::Tasks(tasks))
        }
        other => Err(ConvertError::UnsupportedSourceShape(describe(&other))),
    }
}

fn is_canvas(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("nodes") && map.contains_key("edges"))
}

fn task_from_value(index: usize, item: Value) -> Result<Task, ConvertError> {
    if !item.is_object() {
        return Err(ConvertError::MalformedRecord {
            index,
            reason: format!("expected an object, got {}", describe(&item)),
        });
    }
    serde_json::from_value(item).map_err(|e| ConvertError::MalformedRecord {
        index,
        reason: e.to_string(),
    })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(_) => "a boolean".to_owned(),
        Value::Number(_) => "a number".to_owned(),
        Value::String(_) => "a string".to_owned(),
        Value::Array(_) => "an array".to_owned(),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("an object with keys [{}]", keys.join(", "))
        }
    }
}

/// Pretty-print tasks in the Goblin JSON schema.
pub fn tasks_to_json(tasks: &[Task]) -> Result<String, ConvertError> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_task_array() {
        let source = parse_source(r#"[{"id": "a", "parentId": null, "text": "A"}]"#)
            .expect("should parse");
        match source {
            TaskSource::Tasks(tasks) => assert_eq!(tasks, vec![Task::new("a", "A")]),
            other => panic!("expected tasks, got {other:?}"),
        }
    }

    #[test]
    fn detects_canvas() {
        let source = parse_source(
            r#"{"nodes": [{"id": "n", "type": "text", "text": "N"}], "edges": []}"#,
        )
        .expect("should parse");
        assert_eq!(source.kind(), "canvas");
        let tasks = source.into_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "N");
    }

    #[test]
    fn canvas_with_untyped_node_skips_it() {
        let source = parse_source(
            r#"{"nodes":[{"id":"a","type":"text","text":"A"},{"id":"g","label":"grp"}],"edges":[]}"#,
        )
        .expect("untyped node should not fail the document");
        let tasks = source.into_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "a");
    }

    #[test]
    fn object_without_edges_is_unsupported() {
        let err = parse_source(r#"{"nodes": []}"#).unwrap_err();
        match err {
            ConvertError::UnsupportedSourceShape(found) => {
                assert_eq!(found, "an object with keys [nodes]")
            }
            other => panic!("expected UnsupportedSourceShape, got {other}"),
        }
    }

    #[test]
    fn scalar_is_unsupported() {
        let err = parse_source("42").unwrap_err();
        assert!(
            matches!(err, ConvertError::UnsupportedSourceShape(ref s) if s == "a number"),
            "got: {err}"
        );
    }

    #[test]
    fn missing_id_reports_index() {
        let err = parse_source(r#"[{"id": "a"}, {"text": "no id"}]"#).unwrap_err();
        match err {
            ConvertError::MalformedRecord { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("missing field `id`"), "reason: {reason}");
            }
            other => panic!("expected MalformedRecord, got {other}"),
        }
    }

    #[test]
    fn non_object_element_is_malformed() {
        let err = parse_source(r#"[{"id": "a"}, "b"]"#).unwrap_err();
        assert!(
            matches!(err, ConvertError::MalformedRecord { index: 1, .. }),
            "got: {err}"
        );
    }

    #[test]
    fn invalid_json_is_json_error() {
        let err = parse_source("[{").unwrap_err();
        assert!(matches!(err, ConvertError::Json(_)), "got: {err}");
    }

    #[test]
    fn tasks_json_roundtrip() {
        let tasks = vec![Task::new("a", "A"), Task::new("b", "B").with_parent("a")];
        let json = tasks_to_json(&tasks).expect("should serialize");
        assert_eq!(parse_source(&json).unwrap(), TaskSource::Tasks(tasks));
    }
}
