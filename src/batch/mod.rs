//! At the command line, the compiler is mostly used as a "batch" compiler - run
//! once over a file, reporting everything wrong with it.

use std::io::Write;
use std::path::Path;

use anyhow::anyhow;
use draco_compiler::errors::{Diagnostic, Diagnostics, NoteType};
use draco_compiler::source::Source;
use draco_compiler::{Compilation, SyntaxTree};
use log::info;
use serde::Serialize;

use crate::args::Format;

pub fn run(path: &Path, format: Format) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)?;
    let source = Source::new(path.display().to_string(), text);
    let tree = SyntaxTree::parse(source.into());

    let compilation = Compilation::new(tree);
    let diagnostics = compilation.diagnostics();
    info!("checked {} with {} diagnostics", path.display(), diagnostics.len());

    let source = compilation.syntax_tree().source();
    let mut stdout = std::io::stdout().lock();
    match format {
        Format::Human => write_human(&mut stdout, source, &diagnostics)?,
        Format::Json => write_json(&mut stdout, source, &diagnostics)?,
    }

    let (errors, warnings) = (diagnostics.num_errors(), diagnostics.num_warnings());
    if errors == 0 {
        Ok(())
    } else {
        Err(anyhow!("{errors} errors and {warnings} warnings"))
    }
}

/// One `path:line:col: severity: message` line per diagnostic, followed by its
/// labels and notes.
fn write_human(
    out: &mut impl Write,
    source: &Source,
    diagnostics: &Diagnostics,
) -> anyhow::Result<()> {
    for diagnostic in diagnostics.iter() {
        let (line, column) = source.line_col(diagnostic.at.start);
        writeln!(
            out,
            "{}:{}:{}: {}: {}",
            source.path,
            line + 1,
            column + 1,
            diagnostic.severity(),
            diagnostic.message()
        )?;

        for (message, at) in diagnostic.labels.iter() {
            let (line, column) = source.line_col(at.start);
            writeln!(out, "  {}:{}:{}: {message}", source.path, line + 1, column + 1)?;
        }

        for (message, kind) in diagnostic.notes.iter() {
            writeln!(out, "  {}: {message}", note_kind(*kind))?;
        }
    }

    Ok(())
}

fn write_json(
    out: &mut impl Write,
    source: &Source,
    diagnostics: &Diagnostics,
) -> anyhow::Result<()> {
    let records: Vec<_> = diagnostics.iter().map(|d| JsonDiagnostic::new(source, d)).collect();
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    Ok(())
}

fn note_kind(kind: NoteType) -> &'static str {
    match kind {
        NoteType::Note => "note",
        NoteType::Help => "help",
    }
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic {
    code: &'static str,
    phase: String,
    severity: String,
    message: String,
    location: JsonLocation,
    labels: Vec<JsonLabel>,
    notes: Vec<JsonNote>,
}

/// One-based line and column of both ends of a span.
#[derive(Debug, Serialize)]
struct JsonLocation {
    path: String,
    start: (usize, usize),
    end: (usize, usize),
}

#[derive(Debug, Serialize)]
struct JsonLabel {
    message: String,
    location: JsonLocation,
}

#[derive(Debug, Serialize)]
struct JsonNote {
    kind: &'static str,
    message: String,
}

impl JsonDiagnostic {
    fn new(source: &Source, diagnostic: &Diagnostic) -> Self {
        let location = |start: usize, end: usize| {
            let (start_line, start_column) = source.line_col(start);
            let (end_line, end_column) = source.line_col(end);
            JsonLocation {
                path: source.path.clone(),
                start: (start_line + 1, start_column + 1),
                end: (end_line + 1, end_column + 1),
            }
        };

        Self {
            code: diagnostic.template.code,
            phase: diagnostic.template.phase.to_string(),
            severity: diagnostic.severity().to_string(),
            message: diagnostic.message(),
            location: location(diagnostic.at.start, diagnostic.at.end),
            labels: diagnostic
                .labels
                .iter()
                .map(|(message, at)| JsonLabel {
                    message: message.clone(),
                    location: location(at.start, at.end),
                })
                .collect(),
            notes: diagnostic
                .notes
                .iter()
                .map(|(message, kind)| JsonNote {
                    kind: note_kind(*kind),
                    message: message.clone(),
                })
                .collect(),
        }
    }
}
