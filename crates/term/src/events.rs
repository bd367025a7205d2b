use std::sync::Arc;

use annotix_engine::{AppEvents, Completion, ResultItem, Task};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{info, warn};

/// A host callback observed during a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
	Load,
	Submit {
		task: Option<u64>,
		result: Vec<ResultItem>,
	},
	Update {
		task: Option<u64>,
		result: Vec<ResultItem>,
	},
	Skip {
		task: Option<u64>,
	},
	Alert {
		message: String,
	},
}

/// Collects host callbacks for the session report.
#[derive(Debug, Clone, Default)]
pub struct ReportEvents(Arc<Mutex<Vec<Event>>>);

impl ReportEvents {
	pub fn take(&self) -> Vec<Event> {
		std::mem::take(&mut *self.0.lock())
	}

	fn push(&self, event: Event) {
		self.0.lock().push(event);
	}
}

fn task_id(task: Option<&Task>) -> Option<u64> {
	task.and_then(|t| t.id)
}

impl AppEvents for ReportEvents {
	fn on_load(&mut self) {
		self.push(Event::Load);
	}

	fn on_submit_completion(&mut self, task: Option<&Task>, completion: &Completion) {
		let result = completion.serialize();
		info!(task = ?task_id(task), items = result.len(), "completion submitted");
		self.push(Event::Submit {
			task: task_id(task),
			result,
		});
	}

	fn on_update_completion(&mut self, task: Option<&Task>, completion: &Completion) {
		let result = completion.serialize();
		info!(task = ?task_id(task), items = result.len(), "completion updated");
		self.push(Event::Update {
			task: task_id(task),
			result,
		});
	}

	fn on_skip_task(&mut self, task: Option<&Task>) {
		info!(task = ?task_id(task), "task skipped");
		self.push(Event::Skip { task: task_id(task) });
	}

	fn alert(&mut self, message: &str) {
		warn!(%message, "alert");
		self.push(Event::Alert {
			message: message.to_owned(),
		});
	}
}
