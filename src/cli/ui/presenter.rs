//! Terminal presenter: an indicatif spinner while a remote call runs, styled
//! lines for everything else.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

use super::Output;
use crate::types::GenerationResult;
use crate::workflow::Presenter;

const SPINNER_FRAMES: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";
const TICK: Duration = Duration::from_millis(80);

pub struct ConsolePresenter {
    output: Output,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsolePresenter {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(SPINNER_FRAMES)
    }

    fn clear_spinner(&self) {
        let mut slot = self
            .spinner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(bar) = slot.take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new(Output::new())
    }
}

impl Presenter for ConsolePresenter {
    fn begin_busy(&self, message: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK);

        let mut slot = self
            .spinner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = slot.replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn end_busy(&self) {
        self.clear_spinner();
    }

    fn show_result(&self, result: &GenerationResult) {
        self.output.result(result);
    }

    fn success(&self, message: &str) {
        self.output.success(message);
    }

    fn warning(&self, message: &str) {
        self.output.warning(message);
    }

    fn error(&self, message: &str) {
        self.output.error(message);
    }
}
