//! Tasks Command
//!
//! Lists the generation tasks and the names accepted by `generate`.

use console::style;

use crate::cli::Output;
use crate::types::GenerationTask;

pub fn run() {
    let output = Output::new();
    output.header("Generation tasks");

    for task in GenerationTask::ALL {
        println!(
            "  {:<10} {}",
            style(task.slug()).cyan().bold(),
            task.title()
        );
    }
    println!();
    println!("Run: ideagen generate <task> --brand .. --audience .. --goal .. --feature ..");
}
