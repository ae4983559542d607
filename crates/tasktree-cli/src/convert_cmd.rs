//! `tasktree convert` command: read a task list or canvas, write the chosen
//! renderings next to the input file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tasktree_core::{
    MarkdownOptions, Task, build_forest_with, encode_canvas, parse_source, render_markdown_with,
    tasks_to_json,
};

use crate::config::Settings;

/// Input extensions the converter accepts (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["json", "goblin", "canvas"];

// -----------------------------------------------------------------------
// Output format
// -----------------------------------------------------------------------

/// Which renderings to produce.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Nested Markdown checklist (`.md`).
    #[default]
    Markdown,
    /// JSON Canvas board (`.canvas`).
    Canvas,
    /// Markdown and canvas.
    Both,
    /// Flat Goblin task list (`.goblin`).
    Tasks,
}

impl OutputFormat {
    /// The single-file renderings this format expands to.
    fn renderings(self) -> &'static [Rendering] {
        match self {
            Self::Markdown => &[Rendering::Markdown],
            Self::Canvas => &[Rendering::Canvas],
            Self::Both => &[Rendering::Markdown, Rendering::Canvas],
            Self::Tasks => &[Rendering::Tasks],
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Markdown => "markdown",
            Self::Canvas => "canvas",
            Self::Both => "both",
            Self::Tasks => "tasks",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "canvas" => Ok(Self::Canvas),
            "both" => Ok(Self::Both),
            "tasks" => Ok(Self::Tasks),
            other => Err(OutputFormatParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`OutputFormat`] string.
#[derive(Debug, Clone)]
pub struct OutputFormatParseError(pub String);

impl fmt::Display for OutputFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid output format: {:?} (expected markdown, canvas, both, or tasks)",
            self.0
        )
    }
}

impl std::error::Error for OutputFormatParseError {}

/// One output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rendering {
    Markdown,
    Canvas,
    Tasks,
}

impl Rendering {
    fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Canvas => "canvas",
            Self::Tasks => "goblin",
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Fail unless `path` has one of the [`SUPPORTED_EXTENSIONS`].
pub fn check_extension(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        bail!(
            "unsupported file extension {:?} on {}; use .json, .goblin or .canvas",
            ext,
            path.display()
        )
    }
}

/// Output path for a rendering: same directory and base name as the input.
fn output_path(input: &Path, rendering: Rendering) -> PathBuf {
    input.with_extension(rendering.extension())
}

// -----------------------------------------------------------------------
// Conversion
// -----------------------------------------------------------------------

/// Render `tasks` once per requested file, returning `(rendering, contents)`.
fn render(tasks: &[Task], settings: &Settings) -> Result<Vec<(Rendering, String)>> {
    settings
        .format
        .renderings()
        .iter()
        .map(|&rendering| -> Result<(Rendering, String)> {
            let contents = match rendering {
                Rendering::Markdown => {
                    let forest = build_forest_with(tasks, settings.orphans)?;
                    if !forest.orphans.is_empty() {
                        warn!(
                            count = forest.orphans.len(),
                            policy = %settings.orphans,
                            "tasks reference a parent that is not in the file"
                        );
                    }
                    let options = MarkdownOptions {
                        show_timestamps: settings.show_timestamps,
                        title: settings.title.clone(),
                    };
                    render_markdown_with(&forest, &options)
                }
                Rendering::Canvas => serde_json::to_string_pretty(&encode_canvas(tasks))
                    .context("failed to serialize canvas")?,
                Rendering::Tasks => tasks_to_json(tasks)?,
            };
            Ok((rendering, contents))
        })
        .collect()
}

/// Convert `input` per `settings`.
///
/// With `to_stdout` the single rendering is printed; otherwise each rendering
/// is written beside the input and the written paths are returned.
pub fn run_convert(input: &Path, settings: &Settings, to_stdout: bool) -> Result<Vec<PathBuf>> {
    if to_stdout && settings.format == OutputFormat::Both {
        bail!("--stdout needs a single output format, not `both`");
    }
    check_extension(input)?;

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read input file: {}", input.display()))?;
    let source = parse_source(&content)
        .with_context(|| format!("failed to parse input file: {}", input.display()))?;
    info!(input = %input.display(), kind = source.kind(), "loaded input");
    let tasks = source.into_tasks();

    let rendered = render(&tasks, settings)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    if to_stdout {
        for (_, contents) in &rendered {
            println!("{contents}");
        }
        return Ok(Vec::new());
    }

    // Plan every path first so a refusal leaves nothing behind.
    let planned: Vec<(PathBuf, String)> = rendered
        .into_iter()
        .map(|(rendering, contents)| (output_path(input, rendering), contents))
        .collect();
    if planned.iter().any(|(output, _)| same_file_name(output, input)) {
        bail!(
            "refusing to overwrite input file {} with {} output; use --stdout",
            input.display(),
            settings.format
        );
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(planned.len());
    for (output, contents) in planned {
        if let Err(e) = std::fs::write(&output, contents) {
            for done in &written {
                let _ = std::fs::remove_file(done);
            }
            return Err(e)
                .with_context(|| format!("failed to write output file: {}", output.display()));
        }
        written.push(output);
    }
    for output in &written {
        println!("Converted {} -> {}", input.display(), output.display());
    }

    Ok(written)
}

/// Path equality ignoring ASCII case, matching case-insensitive filesystems.
fn same_file_name(a: &Path, b: &Path) -> bool {
    a.as_os_str().eq_ignore_ascii_case(b.as_os_str())
}
