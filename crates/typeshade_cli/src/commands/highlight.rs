//! Highlight command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result, miette};
use tracing::info;
use typeshade_core::{AnnotationRange, HighlightSession, LineIndex, MemorySurface};
use typeshade_parser::TypeScriptParser;

use super::Input;
use crate::cli::{Cli, OutputFormat};

pub fn run_highlight(cli: &Cli, file: &Path, format: OutputFormat) -> Result<bool> {
    let input = Input::load(cli, file)?;

    let session = HighlightSession::new(MemorySurface::new(), input.config.style.as_str());
    session
        .highlight_source(&TypeScriptParser::new(), &input.source, &input.options)
        .map_err(|e| miette!("Failed to parse {}: {}", file.display(), e))?;
    let ranges = session.decorations();
    info!("Found {} erased range(s) in {}", ranges.len(), file.display());

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ranges).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Text => output_text(&input.source, &ranges),
    }
    Ok(true)
}

/// Prints one `line:col-line:col style` entry per range (1-based), then the
/// source with erased columns underlined.
fn output_text(source: &str, ranges: &[AnnotationRange]) {
    for range in ranges {
        println!(
            "{}:{}-{}:{} {}",
            range.start.line + 1,
            range.start.column + 1,
            range.end.line + 1,
            range.end.column + 1,
            range.style
        );
    }
    if ranges.is_empty() {
        println!("Nothing is erased");
        return;
    }

    println!();
    let index = LineIndex::new(source);
    for line in 0..index.line_count() {
        let Some(text) = index.line(line) else {
            continue;
        };
        println!("{:>4} | {}", line + 1, text);
        let marker = underline(text, line as u32, ranges);
        if !marker.is_empty() {
            println!("     | {}", marker);
        }
    }
}

/// Builds a `^` marker line for the columns of `text` covered by `ranges`.
fn underline(text: &str, line: u32, ranges: &[AnnotationRange]) -> String {
    let mut marker = String::new();
    let mut column = 0u32;
    for ch in text.chars() {
        let covered = ranges.iter().any(|range| {
            let after_start = line > range.start.line
                || (line == range.start.line && column >= range.start.column);
            let before_end =
                line < range.end.line || (line == range.end.line && column < range.end.column);
            after_start && before_end
        });
        marker.push(if covered { '^' } else { ' ' });
        column += ch.len_utf16() as u32;
    }
    marker.trim_end().to_string()
}
