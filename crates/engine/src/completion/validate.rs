use annotix_primitives::NodeId;

use super::Completion;

/// A `required` group left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
	pub node: NodeId,
	pub message: String,
}

impl Completion {
	/// Whether every required group has a selection.
	pub fn validate(&self) -> bool {
		self.validation_issues().is_empty()
	}

	/// Required groups without a selection, in tree order.
	///
	/// A per-region group must have a value on every region of its object.
	pub fn validation_issues(&self) -> Vec<ValidationIssue> {
		let tree = &self.state.tree;
		let mut issues = Vec::new();

		for node in tree.iter() {
			let Some(group) = node.kind.as_group() else {
				continue;
			};
			if !group.required {
				continue;
			}
			let name = node.name.as_deref().unwrap_or(node.tag_name.as_str());
			let message = || {
				group
					.required_message
					.clone()
					.unwrap_or_else(|| format!("Checkbox \"{name}\" is required."))
			};

			if !group.per_region {
				if tree.selected_values(node.id).is_empty() {
					issues.push(ValidationIssue {
						node: node.id,
						message: message(),
					});
				}
				continue;
			}

			let missing = self
				.state
				.regions
				.iter()
				.filter(|r| Some(r.owner) == group.target)
				.any(|r| r.state(name).is_none_or(|v| v.is_empty()));
			if missing {
				issues.push(ValidationIssue {
					node: node.id,
					message: message(),
				});
			}
		}
		issues
	}
}
