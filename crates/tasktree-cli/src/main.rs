mod config;
mod convert_cmd;
mod interactive_cmd;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use tasktree_core::OrphanPolicy;

use config::{CliOverrides, Settings};
use convert_cmd::OutputFormat;

#[derive(Parser)]
#[command(
    name = "tasktree",
    version,
    about = "Convert Goblin Tools task lists to Markdown checklists and JSON Canvas boards"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a .json, .goblin or .canvas file
    Convert {
        /// Input file
        file: PathBuf,
        /// Output format (overrides TASKTREE_FORMAT and the config file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Shorthand for --format canvas
        #[arg(short, long, conflicts_with = "format")]
        canvas: bool,
        /// Append creation times to Markdown checklist items
        #[arg(short, long)]
        timestamps: bool,
        /// Render tasks with a missing parent as top-level sections
        #[arg(long)]
        promote_orphans: bool,
        /// Print the result instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Prompt for the input file and options
    Interactive,
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

/// Execute the `tasktree init` command: write config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    config::save_config_to(&path, &config::ConfigFile::with_defaults())?;

    println!("Config written to {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            file,
            format,
            canvas,
            timestamps,
            promote_orphans,
            stdout,
        } => {
            let overrides = CliOverrides {
                show_timestamps: timestamps.then_some(true),
                orphans: promote_orphans.then_some(OrphanPolicy::Promote),
                format: if canvas {
                    Some(OutputFormat::Canvas)
                } else {
                    format
                },
            };
            let settings = Settings::resolve(&overrides)?;
            convert_cmd::run_convert(&file, &settings, stdout)?;
        }
        Commands::Interactive => {
            interactive_cmd::run_interactive()?;
        }
        Commands::Init { force } => {
            cmd_init(force)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_owned();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_convert_flags() {
        let cli = Cli::try_parse_from(["tasktree", "convert", "todo.goblin", "-c", "-t"]).unwrap();
        match cli.command {
            Commands::Convert {
                file,
                format,
                canvas,
                timestamps,
                promote_orphans,
                stdout,
            } => {
                assert_eq!(file, PathBuf::from("todo.goblin"));
                assert_eq!(format, None);
                assert!(canvas);
                assert!(timestamps);
                assert!(!promote_orphans);
                assert!(!stdout);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn parses_format_value() {
        let cli =
            Cli::try_parse_from(["tasktree", "convert", "a.json", "--format", "both"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Convert {
                format: Some(OutputFormat::Both),
                ..
            }
        ));
    }

    #[test]
    fn canvas_conflicts_with_format() {
        let result =
            Cli::try_parse_from(["tasktree", "convert", "a.json", "-c", "--format", "tasks"]);
        assert!(result.is_err());
    }

    #[test]
    fn init_refuses_existing_config() {
        let _lock = test_util::lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };

        let first = cmd_init(false);
        let second = cmd_init(false);
        let forced = cmd_init(true);
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        first.unwrap();
        let err = second.unwrap_err();
        assert!(err.to_string().contains("already exists"), "unexpected error: {err}");
        forced.unwrap();
        assert!(tmp.path().join("tasktree/config.toml").is_file());
    }
}
