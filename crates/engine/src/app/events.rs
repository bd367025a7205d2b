use crate::completion::Completion;
use crate::task::Task;

/// Host callbacks. All methods default to doing nothing.
pub trait AppEvents {
	/// The store finished loading its completions.
	fn on_load(&mut self) {}

	fn on_submit_completion(&mut self, _task: Option<&Task>, _completion: &Completion) {}

	fn on_update_completion(&mut self, _task: Option<&Task>, _completion: &Completion) {}

	fn on_skip_task(&mut self, _task: Option<&Task>) {}

	/// A message the user should see, such as a validation failure.
	fn alert(&mut self, _message: &str) {}
}

/// Ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvents;

impl AppEvents for NoopEvents {}
