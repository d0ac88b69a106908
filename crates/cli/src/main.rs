mod render;

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use mccmd_core::{Position, Severity, TokenizeResult, Version, to_pretty_json, tokenize};
use mccmd_diagnostics::{self as diag, Diagnostic};
use mccmd_profile::{Profile, load_profile_from_str};

use crate::render::{
    Format, print_summary, print_tokens, render_diagnostics_json, render_diagnostics_pretty,
};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "mccmd",
    version,
    about = "Tokenize and check Minecraft Bedrock Edition command files"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log tokenizer activity to stderr (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the token stream of a command file.
    Tokenize {
        /// Command file, or `-` for stdin.
        file: String,
        #[command(flatten)]
        frame: FrameArgs,
    },

    /// Report errors and warnings in a command file.
    Check {
        /// Command file, or `-` for stdin.
        file: String,
        #[command(flatten)]
        frame: FrameArgs,
        /// Show only the first error on this line.
        #[arg(long)]
        focus_line: Option<usize>,
    },

    /// Explain a diagnostic ID (e.g. MCC1101).
    Explain { id: String },

    /// List the game versions at which the grammar changes.
    Versions,
}

/// Grammar version and source frame. Flags override the profile.
#[derive(Args, Debug)]
struct FrameArgs {
    /// Game version whose grammar is used, as major.minor.patch.
    #[arg(long)]
    game_version: Option<String>,
    /// Path to a tokenizer profile (JSON).
    #[arg(long)]
    profile: Option<String>,
    /// Line number of the first line in the file.
    #[arg(long)]
    line: Option<usize>,
    /// Column of the first character in the file.
    #[arg(long)]
    column: Option<usize>,
}

/// Settings after merging flags, profile and defaults.
struct Settings {
    version: Version,
    start: Position,
    profile: Option<Profile>,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    let mut log_builder = env_logger::builder();
    if std::env::var("RUST_LOG").is_err() {
        log_builder.filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        });
    }
    log_builder.init();

    if let Err(e) = run(cli.cmd, format) {
        match format {
            Format::Json => {
                let out = serde_json::json!({
                    "success": false,
                    "error": "command_failed",
                    "message": format!("{e:#}"),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&out).expect("error JSON serialization cannot fail")
                );
            }
            Format::Pretty => eprintln!("error: {e:#}"),
        }
        process::exit(1);
    }
}

fn run(cmd: Cmd, format: Format) -> Result<()> {
    match cmd {
        Cmd::Tokenize { file, frame } => cmd_tokenize(&file, &frame, format),
        Cmd::Check {
            file,
            frame,
            focus_line,
        } => cmd_check(&file, &frame, focus_line, format),
        Cmd::Explain { id } => cmd_explain(&id, format),
        Cmd::Versions => cmd_versions(format),
    }
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_tokenize(file: &str, frame: &FrameArgs, format: Format) -> Result<()> {
    let settings = resolve_settings(frame)?;
    let input = read_source(file)?;
    let result = tokenize(&input, settings.start, settings.version);

    match format {
        Format::Json => println!("{}", to_pretty_json(&result)),
        Format::Pretty => {
            print_tokens(&result.tokens);
            for warning in &result.warnings {
                eprintln!("warning: {warning}");
            }
        }
    }
    Ok(())
}

fn cmd_check(
    file: &str,
    frame: &FrameArgs,
    focus_line: Option<usize>,
    format: Format,
) -> Result<()> {
    let settings = resolve_settings(frame)?;
    let input = read_source(file)?;
    let result = tokenize(&input, settings.start, settings.version);
    let diagnostics = select_diagnostics(&result, settings.profile.as_ref(), focus_line);

    match format {
        Format::Json => render_diagnostics_json(&diagnostics),
        Format::Pretty => {
            render_diagnostics_pretty(&input, file, settings.start, &diagnostics);
            print_summary(&diagnostics);
            if !result.has_errors() {
                eprintln!("check ok ({})", settings.version);
            }
        }
    }

    if result.has_errors() {
        process::exit(1);
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // The explanation is the output itself, so stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

fn cmd_versions(format: Format) -> Result<()> {
    let versions = Version::all_meaningful();
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "versions": versions,
                "latest": Version::LATEST,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for v in versions {
                if v == Version::LATEST {
                    println!("{v} (latest)");
                } else {
                    println!("{v}");
                }
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read a command file (`-` for stdin), normalizing CRLF line endings.
fn read_source(file: &str) -> Result<String> {
    let text = if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?
    };
    Ok(text.replace("\r\n", "\n"))
}

/// Merge flags over the profile over the built-in defaults.
fn resolve_settings(frame: &FrameArgs) -> Result<Settings> {
    let profile = match &frame.profile {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read profile {path}"))?;
            Some(load_profile_from_str(&text).with_context(|| format!("invalid profile {path}"))?)
        }
        None => None,
    };

    let version_text = frame
        .game_version
        .as_deref()
        .or_else(|| profile.as_ref()?.game_version.as_deref());
    let version = match version_text {
        Some(text) => text
            .parse::<Version>()
            .with_context(|| format!("unusable game version {text:?}"))?,
        None => Version::LATEST,
    };

    let line = frame
        .line
        .or_else(|| profile.as_ref()?.start_line)
        .unwrap_or(1);
    if line == 0 {
        bail!("--line must be at least 1");
    }
    let column = frame
        .column
        .or_else(|| profile.as_ref()?.start_column)
        .unwrap_or(0);

    log::debug!("grammar {version}, first character at {line}.{column}");
    Ok(Settings {
        version,
        start: Position::new(line, column),
        profile,
    })
}

/// Errors and warnings to report, after profile suppression and the
/// focus-line policy.
fn select_diagnostics(
    result: &TokenizeResult,
    profile: Option<&Profile>,
    focus_line: Option<usize>,
) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = result
        .diagnostics()
        .into_iter()
        .filter(|d| d.severity == Severity::Error || !profile.is_some_and(|p| p.suppresses(&d.id)))
        .collect();

    if let Some(line) = focus_line {
        diagnostics = diagnostics
            .into_iter()
            .find(|d| {
                d.severity == Severity::Error && d.span.is_some_and(|s| s.begin.line == line)
            })
            .into_iter()
            .collect();
    }
    diagnostics
}
