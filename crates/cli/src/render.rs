//! Terminal and JSON output for tokens and diagnostics.
//!
//! Errors and warnings become ariadne [`Report`]s pointing into the command
//! file. Piped output, or `--output json`, gets plain JSON instead.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use mccmd_core::{Position, Token, TokenKind};
use mccmd_diagnostics::{Diagnostic, LineIndex, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for tokens and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured token listing and ariadne reports.
    Pretty,
    /// JSON on stdout.
    Json,
}

impl Format {
    /// Use the explicit choice, or detect one from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // No flag: TTY gets pretty
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Styles ──────────────────────────────────────────────────────────────

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        _ => Color::Yellow,
    }
}

fn kind_color(kind: TokenKind) -> Color {
    match kind {
        TokenKind::Comment => Color::BrightBlack,
        TokenKind::Command => Color::Magenta,
        TokenKind::Option => Color::Blue,
        TokenKind::Number | TokenKind::Boolean => Color::Cyan,
        TokenKind::String => Color::Green,
        TokenKind::Selector | TokenKind::Tag | TokenKind::Scoreboard => Color::Yellow,
        TokenKind::Position => Color::BrightCyan,
        TokenKind::Error => Color::Red,
    }
}

// ── Tokens ──────────────────────────────────────────────────────────────

/// Print one token per line to stdout: `begin-end kind value`.
pub(crate) fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        let kind = format!("{:<10}", token.kind);
        let line = format!("{} {} {}", token.span, kind.fg(kind_color(token.kind)), token.value);
        println!("{}", line.trim_end());
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics in pretty (ariadne) format to stderr.
///
/// `first` is the position the source was tokenized from; spans are mapped
/// back to character offsets through a [`LineIndex`]. A span that falls
/// outside the source is rendered as a standalone message.
pub(crate) fn render_diagnostics_pretty(
    source: &str,
    filename: &str,
    first: Position,
    diagnostics: &[Diagnostic],
) {
    if diagnostics.is_empty() {
        return;
    }

    let config = Config::default().with_compact(false);
    let index = LineIndex::new(source, first);

    // Build the Source once and reuse it across all reports.
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        let range = diag.span.and_then(|span| {
            let start = index.offset(span.begin)?;
            let end = index.offset(span.end)?.max(start);
            Some(start..end)
        });

        let Some(range) = range else {
            eprintln!("{}[{}]: {}", diag.severity, diag.id, diag.located_message());
            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
            continue;
        };

        let mut builder = Report::build(report_kind(diag.severity), (filename, range.clone()))
            .with_code(diag.id.as_ref())
            .with_message(diag.located_message())
            .with_config(config);

        builder = builder.with_label(
            Label::new((filename, range))
                .with_message(make_label_message(diag))
                .with_color(severity_color(diag.severity)),
        );

        if let Some(explanation) = diag.explain() {
            builder = builder.with_help(explanation);
        }

        builder.finish().eprint(&mut cache).ok();
    }
}

/// A compact label from the diagnostic's parameters, or its message.
fn make_label_message(diag: &Diagnostic) -> String {
    if let Some(ctx) = &diag.context
        && !ctx.is_empty()
    {
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        diag.message.clone()
    }
}

// ── JSON rendering ──────────────────────────────────────────────────────

/// Render diagnostics as a JSON array to stdout.
pub(crate) fn render_diagnostics_json(diagnostics: &[Diagnostic]) {
    let json =
        serde_json::to_string_pretty(diagnostics).expect("Diagnostic serialization cannot fail");
    println!("{json}");
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary line to stderr, e.g. `2 errors, 1 warning`.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics.len() - errors;

    if errors + warnings == 0 {
        return;
    }

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if warnings > 0 {
        let s = if warnings == 1 { "" } else { "s" };
        parts.push(format!(
            "{}",
            format!("{warnings} warning{s}").fg(Color::Yellow)
        ));
    }
    eprintln!("{}", parts.join(", "));
}
