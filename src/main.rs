use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ideagen::cli::commands::{config, generate, session, tasks};
use ideagen::{GenerationTask, IdeaError, InputRecord};

/// Parse a generation task from its name or alias
fn parse_task(s: &str) -> Result<GenerationTask, String> {
    s.parse().map_err(|e: IdeaError| e.to_string())
}

#[derive(Parser)]
#[command(name = "ideagen")]
#[command(
    version,
    about = "Marketing idea generator: buyer personas, content strategy, topics and platforms"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(clap::Args, Debug, Default)]
struct FormArgs {
    #[arg(long, default_value = "", help = "Brand name")]
    brand: String,
    #[arg(long, default_value = "", help = "Target audience")]
    audience: String,
    #[arg(long, default_value = "", help = "Business goal")]
    goal: String,
    #[arg(long, default_value = "", help = "Special feature of the product")]
    feature: String,
}

impl FormArgs {
    fn into_input(self) -> InputRecord {
        InputRecord::new(self.brand, self.audience, self.goal, self.feature)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run one generation task
    Generate {
        #[arg(value_parser = parse_task, help = "Task: personas, strategy, topics, platforms")]
        task: GenerationTask,
        #[command(flatten)]
        form: FormArgs,
        #[arg(long, help = "Export the result to Google Drive")]
        export: bool,
        #[arg(long, env = "IDEAGEN_FOLDER_ID", help = "Destination Drive folder ID")]
        folder_id: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
    },

    /// Interactive form: generate and export repeatedly
    Session {
        #[command(flatten)]
        form: FormArgs,
        #[arg(long, env = "IDEAGEN_FOLDER_ID", help = "Destination Drive folder ID")]
        folder_id: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
    },

    /// List generation tasks
    Tasks,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mideagen encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` means the failure was already reported
fn run_cli() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            task,
            form,
            export,
            folder_id,
            model,
        } => {
            let rt = Runtime::new()?;
            let ok = rt.block_on(generate::run(generate::GenerateOptions {
                task,
                input: form.into_input(),
                export,
                folder_id,
                model,
                quiet: cli.quiet,
            }))?;
            return Ok(ok);
        }
        Commands::Session {
            form,
            folder_id,
            model,
        } => {
            session::run(session::SessionOptions {
                input: form.into_input(),
                folder_id,
                model,
                quiet: cli.quiet,
            })?;
        }
        Commands::Tasks => tasks::run(),
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => config::show(&format)?,
            ConfigAction::Path => config::path()?,
            ConfigAction::Init { global, force } => config::init(global, force)?,
        },
    }

    Ok(true)
}
