pub mod commands;
pub mod ui;
pub mod util;

pub use ui::{ConsolePresenter, Output};
pub use util::CommandContext;
