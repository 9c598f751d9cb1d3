mod output;
mod presenter;

pub use output::Output;
pub use presenter::ConsolePresenter;
