//! Generate Command
//!
//! Runs one generation task from command-line inputs and, with `--export`,
//! files the result into a Drive folder.
//!
//! Usage:
//!   ideagen generate <task> --brand B --audience A --goal G --feature F
//!                           [--export] [--folder-id ID] [--model M]

use std::sync::Arc;

use crate::cli::{CommandContext, ConsolePresenter, Output};
use crate::types::{GenerationTask, InputRecord, Result};
use crate::workflow::{ExportOutcome, GenerationOutcome};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub task: GenerationTask,
    pub input: InputRecord,
    pub export: bool,
    pub folder_id: Option<String>,
    pub model: Option<String>,
    pub quiet: bool,
}

/// Returns `false` when a problem was already shown to the user
pub async fn run(options: GenerateOptions) -> Result<bool> {
    let task = options.task;
    let ctx = CommandContext::load(options.model)?;
    let output = Output::quiet(options.quiet);
    let presenter = Arc::new(ConsolePresenter::new(output));
    let mut controller = ctx.controller(presenter)?;

    match controller.generate(task, &options.input).await? {
        GenerationOutcome::Displayed(_) => {}
        GenerationOutcome::Incomplete(_) => return Ok(false),
    }

    if !options.export {
        return Ok(true);
    }

    let folder_id = ctx.folder_id(options.folder_id);
    match controller.export(task, &folder_id).await {
        ExportOutcome::Exported(document_id) => {
            output.info(&format!("Document ID: {}", document_id));
            Ok(true)
        }
        ExportOutcome::Failed(_) | ExportOutcome::NothingToExport | ExportOutcome::MissingFolder => {
            Ok(false)
        }
    }
}
