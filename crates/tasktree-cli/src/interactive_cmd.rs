//! `tasktree interactive`: prompt for the input file and options, then
//! convert as `tasktree convert` would.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::config::{CliOverrides, Settings};
use crate::convert_cmd::{OutputFormat, check_extension, run_convert};

/// Answers collected from the prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct Answers {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub show_timestamps: bool,
}

/// Run the prompts on stdin/stdout and convert the chosen file.
pub fn run_interactive() -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let answers = ask(&mut stdin.lock(), &mut stdout.lock())?;

    let settings = Settings::resolve(&CliOverrides {
        show_timestamps: Some(answers.show_timestamps),
        orphans: None,
        format: Some(answers.format),
    })?;
    run_convert(&answers.input, &settings, false)?;
    Ok(())
}

/// Ask every question in order.
pub fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Answers> {
    let path = ask_input_file(input, out)?;
    let format = ask_format(input, out)?;
    let show_timestamps = if format == OutputFormat::Canvas {
        false
    } else {
        ask_timestamps(input, out)?
    };
    Ok(Answers {
        input: path,
        format,
        show_timestamps,
    })
}

// -----------------------------------------------------------------------
// Prompts
// -----------------------------------------------------------------------

fn ask_input_file<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<PathBuf> {
    loop {
        let answer = prompt(input, out, "\nEnter the path to your .goblin, .json or .canvas file: ")?;
        if answer.is_empty() {
            writeln!(out, "Please enter a file path.")?;
            continue;
        }
        let path = PathBuf::from(&answer);
        if !path.is_file() {
            writeln!(out, "Error: file '{answer}' not found.")?;
            continue;
        }
        if let Err(e) = check_extension(&path) {
            writeln!(out, "Error: {e}")?;
            continue;
        }
        return Ok(path);
    }
}

fn ask_format<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<OutputFormat> {
    loop {
        writeln!(out, "\nWhat would you like to convert to?")?;
        writeln!(out, "1. Markdown (.md)")?;
        writeln!(out, "2. Canvas (.canvas)")?;
        writeln!(out, "3. Both formats")?;
        match prompt(input, out, "Enter your choice (1-3): ")?.as_str() {
            "1" => return Ok(OutputFormat::Markdown),
            "2" => return Ok(OutputFormat::Canvas),
            "3" => return Ok(OutputFormat::Both),
            _ => writeln!(out, "Please enter 1, 2, or 3.")?,
        }
    }
}

fn ask_timestamps<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<bool> {
    loop {
        let answer = prompt(input, out, "\nInclude timestamps in markdown output? (y/n): ")?;
        match answer.to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => writeln!(out, "Please enter 'y' or 'n'.")?,
        }
    }
}

/// Print `question` and read one trimmed line. End of input is an error.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read answer")?;
    if read == 0 {
        bail!("input closed before all questions were answered");
    }
    Ok(line.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<Answers>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = ask(&mut input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn goblin_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("todo.goblin");
        std::fs::write(&path, "[]").unwrap();
        path
    }

    #[test]
    fn collects_all_answers() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = goblin_file(&tmp);
        let (result, _) = run(&format!("{}\n3\nY\n", path.display()));

        assert_eq!(
            result.unwrap(),
            Answers {
                input: path,
                format: OutputFormat::Both,
                show_timestamps: true,
            }
        );
    }

    #[test]
    fn reprompts_on_bad_path_and_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = goblin_file(&tmp);
        let txt = tmp.path().join("notes.txt");
        std::fs::write(&txt, "").unwrap();
        let missing = tmp.path().join("missing.json");

        let script = format!(
            "\n{}\n{}\n{}\n1\nn\n",
            missing.display(),
            txt.display(),
            path.display()
        );
        let (result, out) = run(&script);

        let answers = result.unwrap();
        assert_eq!(answers.input, path);
        assert!(!answers.show_timestamps);
        assert!(out.contains("Please enter a file path."), "output: {out}");
        assert!(out.contains("not found"), "output: {out}");
        assert!(out.contains("unsupported file extension"), "output: {out}");
    }

    #[test]
    fn reprompts_on_bad_choices() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = goblin_file(&tmp);
        let (result, out) = run(&format!("{}\n4\nmarkdown\n1\nmaybe\ny\n", path.display()));

        let answers = result.unwrap();
        assert_eq!(answers.format, OutputFormat::Markdown);
        assert!(answers.show_timestamps);
        assert_eq!(out.matches("Please enter 1, 2, or 3.").count(), 2);
        assert_eq!(out.matches("Please enter 'y' or 'n'.").count(), 1);
    }

    #[test]
    fn canvas_only_skips_timestamp_question() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = goblin_file(&tmp);
        let (result, out) = run(&format!("{}\n2\n", path.display()));

        let answers = result.unwrap();
        assert_eq!(answers.format, OutputFormat::Canvas);
        assert!(!answers.show_timestamps);
        assert!(!out.contains("timestamps"), "output: {out}");
    }

    #[test]
    fn closed_input_is_an_error() {
        let (result, _) = run("");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("input closed"), "unexpected error: {err}");
    }
}
