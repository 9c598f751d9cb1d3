//! Presentation seam between the workflow controller and a concrete UI.

use crate::types::GenerationResult;

/// Everything the controller shows to the user
pub trait Presenter: Send + Sync {
    /// Show a busy indicator until [`Presenter::end_busy`]
    fn begin_busy(&self, message: &str);

    fn end_busy(&self);

    /// Render a result under its task heading
    fn show_result(&self, result: &GenerationResult);

    fn success(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);
}

/// Busy indicator held for the duration of one remote call.
///
/// Released on drop, so early returns and `?` clear it too.
pub struct BusyGuard<'a> {
    presenter: &'a dyn Presenter,
}

impl<'a> BusyGuard<'a> {
    pub fn enter(presenter: &'a dyn Presenter, message: &str) -> Self {
        presenter.begin_busy(message);
        Self { presenter }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.presenter.end_busy();
    }
}
