//! Session Command
//!
//! Interactive form: collect the four inputs once, then run tasks and exports
//! on demand. Each task keeps its own result until it is generated again.
//!
//! Usage:
//!   ideagen session [--folder-id ID] [--model M]

use console::style;
use std::io::BufRead;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::cli::{CommandContext, ConsolePresenter, Output};
use crate::types::{GenerationTask, InputRecord, Result};
use crate::workflow::{WorkflowController, WorkflowEvent};

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub input: InputRecord,
    pub folder_id: Option<String>,
    pub model: Option<String>,
    pub quiet: bool,
}

/// One line typed at the session prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Generate(GenerationTask),
    Export(GenerationTask),
    Folder(String),
    Edit,
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "" => Self::Empty,
            "q" | "quit" | "exit" => Self::Quit,
            "h" | "help" | "?" => Self::Help,
            "s" | "show" => Self::Show,
            "edit" => Self::Edit,
            "f" | "folder" => Self::Folder(rest.to_string()),
            "e" | "export" => match parse_task(rest) {
                Some(task) => Self::Export(task),
                None => Self::Unknown(line.to_string()),
            },
            _ if rest.is_empty() => match parse_task(head) {
                Some(task) => Self::Generate(task),
                None => Self::Unknown(line.to_string()),
            },
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Menu number (1-4) or task name
fn parse_task(s: &str) -> Option<GenerationTask> {
    match s.parse::<usize>() {
        Ok(n) if (1..=GenerationTask::ALL.len()).contains(&n) => Some(GenerationTask::ALL[n - 1]),
        Ok(_) => None,
        Err(_) => s.parse().ok(),
    }
}

pub fn run(options: SessionOptions) -> Result<()> {
    let ctx = CommandContext::load(options.model.clone())?;
    let output = Output::quiet(options.quiet);
    let controller = ctx.controller(Arc::new(ConsolePresenter::new(output)))?;

    let mut session = Session {
        reader: std::io::stdin().lock(),
        output,
        controller,
        input: options.input,
        folder_id: ctx.folder_id(options.folder_id),
    };

    let rt = Runtime::new()?;
    rt.block_on(session.run())
}

struct Session<R> {
    reader: R,
    output: Output,
    controller: WorkflowController,
    input: InputRecord,
    folder_id: String,
}

impl<R: BufRead> Session<R> {
    async fn run(&mut self) -> Result<()> {
        self.output.header("Marketing Idea Generator");
        if self.input == InputRecord::default() {
            if !self.edit_inputs()? {
                return Ok(());
            }
        } else {
            self.show_inputs();
        }
        self.print_menu();

        loop {
            let Some(line) = self.prompt("ideagen>")? else {
                break;
            };

            match SessionCommand::parse(&line) {
                SessionCommand::Quit => break,
                SessionCommand::Empty => {}
                SessionCommand::Help => self.print_menu(),
                SessionCommand::Show => self.show_inputs(),
                SessionCommand::Edit => {
                    if !self.edit_inputs()? {
                        break;
                    }
                }
                SessionCommand::Folder(id) => {
                    self.folder_id = id;
                    if self.folder_id.is_empty() {
                        self.output.info("Folder ID cleared");
                    } else {
                        self.output.info(&format!("Folder ID set to {}", self.folder_id));
                    }
                }
                SessionCommand::Generate(task) => {
                    let event = WorkflowEvent::Generate(task);
                    if let Err(e) = self.controller.handle(&self.input, event).await {
                        // Generation failures are shown as-is and the session goes on
                        self.output.error(&e.to_string());
                    }
                }
                SessionCommand::Export(task) => {
                    let event = WorkflowEvent::Export {
                        task,
                        folder_id: self.folder_id.clone(),
                    };
                    self.controller.handle(&self.input, event).await?;
                }
                SessionCommand::Unknown(text) => {
                    self.output
                        .warning(&format!("Unknown command '{}'. Type 'help' for options.", text));
                }
            }
        }

        debug!("Session ended");
        Ok(())
    }

    /// Read one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{} ", style(label).bold());
        std::io::Write::flush(&mut std::io::stdout())?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask for each field and the folder id, keeping the current value on an
    /// empty answer.
    /// Returns `false` at end of input.
    fn edit_inputs(&mut self) -> Result<bool> {
        let fields = [
            InputRecord::BRAND_LABEL,
            InputRecord::TARGET_AUDIENCE_LABEL,
            InputRecord::BUSINESS_GOAL_LABEL,
            InputRecord::SPECIAL_FEATURE_LABEL,
        ];

        for label in fields {
            let current = self.field_mut(label).clone();
            let question = if current.is_empty() {
                format!("{}:", label)
            } else {
                format!("{} [{}]:", label, current)
            };

            let Some(answer) = self.prompt(&question)? else {
                return Ok(false);
            };
            if !answer.is_empty() {
                *self.field_mut(label) = answer;
            }
        }

        let question = if self.folder_id.is_empty() {
            "Folder ID (optional):".to_string()
        } else {
            format!("Folder ID [{}]:", self.folder_id)
        };
        let Some(answer) = self.prompt(&question)? else {
            return Ok(false);
        };
        if !answer.is_empty() {
            self.folder_id = answer;
        }
        Ok(true)
    }

    fn field_mut(&mut self, label: &str) -> &mut String {
        match label {
            InputRecord::BRAND_LABEL => &mut self.input.brand,
            InputRecord::TARGET_AUDIENCE_LABEL => &mut self.input.target_audience,
            InputRecord::BUSINESS_GOAL_LABEL => &mut self.input.business_goal,
            _ => &mut self.input.special_feature,
        }
    }

    fn show_inputs(&self) {
        self.output.section("Inputs");
        self.output.field(InputRecord::BRAND_LABEL, &self.input.brand);
        self.output
            .field(InputRecord::TARGET_AUDIENCE_LABEL, &self.input.target_audience);
        self.output
            .field(InputRecord::BUSINESS_GOAL_LABEL, &self.input.business_goal);
        self.output
            .field(InputRecord::SPECIAL_FEATURE_LABEL, &self.input.special_feature);
        self.output.field("Folder ID", &self.folder_id);
    }

    fn print_menu(&self) {
        self.output.section("Commands");
        for (i, task) in GenerationTask::ALL.iter().enumerate() {
            println!("  {}  {}", style(i + 1).cyan(), task.title());
        }
        println!("  {}  export a result to Google Drive", style("export <n>").cyan());
        println!("  {}  set the destination folder", style("folder <id>").cyan());
        println!("  {}  re-enter the inputs", style("edit").cyan());
        println!("  {}  show the inputs", style("show").cyan());
        println!("  {}  leave", style("quit").cyan());
        if !self.controller.can_export() {
            self.output
                .info("Export is disabled until GOOGLE_ACCESS_TOKEN is set");
        }
    }
}
