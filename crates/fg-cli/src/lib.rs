//! CLI logic for the `fg` tool.
//!
//! Every command loads or creates a [`DiagramEditor`], drives it the way the
//! browser would, and writes the exported JSON back to disk.

pub mod error;

mod args;

pub use args::{Args, Command};
pub use error::CliError;

use fg_ai::{DiagramGenerator, GeminiClient, GeminiConfig};
use fg_core::lint::{LintSeverity, lint_document};
use fg_core::model::Document;
use fg_core::viewport::Point;
use fg_editor::{DiagramEditor, DropPayload, EditorEvent};
use log::{error, info};
use std::fs;
use std::path::Path;

/// Run one command.
pub async fn run(args: &Args) -> Result<(), CliError> {
    match &args.command {
        Command::New { output } => {
            let editor = DiagramEditor::new();
            save(&editor, output)
        }
        Command::Generate {
            prompt,
            input,
            output,
            api_key,
        } => {
            let mut editor = match input {
                Some(path) => load(path)?,
                None => DiagramEditor::new(),
            };
            let mut config = GeminiConfig::from_env();
            if let Some(key) = api_key {
                config = config.with_api_key(key.clone());
            }
            let generator = DiagramGenerator::new(GeminiClient::new(config)?);

            match editor.generate(&generator, prompt).await {
                Ok(true) => save(&editor, output),
                Ok(false) => Err(CliError::EmptyPrompt),
                Err(err) => {
                    report_alerts(&mut editor);
                    Err(err.into())
                }
            }
        }
        Command::Lint { file } => lint(file),
        Command::Place {
            file,
            kind,
            label,
            x,
            y,
            output,
        } => {
            let mut editor = load(file)?;
            let placed = editor.handle_drop_at(
                &DropPayload::new(kind.as_str(), label.as_str()),
                Point::new(*x, *y),
                Some(Point::default()),
            );
            if !placed {
                return Err(CliError::NothingPlaced);
            }
            save(&editor, output.as_deref().unwrap_or(file.as_path()))
        }
    }
}

fn load(path: &Path) -> Result<DiagramEditor, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut editor = DiagramEditor::with_document(Document::empty());
    editor.import_json(&text).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(editor)
}

fn save(editor: &DiagramEditor, path: &Path) -> Result<(), CliError> {
    let json = editor.export_json()?;
    fs::write(path, json).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "wrote {} nodes and {} edges to {}",
        editor.document().nodes.len(),
        editor.document().edges.len(),
        path.display()
    );
    Ok(())
}

fn lint(path: &Path) -> Result<(), CliError> {
    let editor = load(path)?;
    let diagnostics = lint_document(editor.document());
    let mut warnings = 0;
    for diag in &diagnostics {
        let level = match diag.severity {
            LintSeverity::Warning => {
                warnings += 1;
                "warning"
            }
            LintSeverity::Info => "info",
        };
        println!(
            "{}: {level} [{}] {}: {}",
            path.display(),
            diag.rule,
            diag.id,
            diag.message
        );
    }
    if warnings > 0 {
        return Err(CliError::Lint(warnings));
    }
    info!("{}: no problems found", path.display());
    Ok(())
}

fn report_alerts(editor: &mut DiagramEditor) {
    for event in editor.take_events() {
        if let EditorEvent::Alert(alert) = event {
            error!("{}", alert.message);
        }
    }
}
