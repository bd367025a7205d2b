use annotix_primitives::RegionId;
use tracing::debug;

use super::Completion;
use crate::regions::{Region, Relation};

impl Completion {
	pub fn highlighted(&self) -> Option<&RegionId> {
		self.highlighted.as_ref()
	}

	pub fn relation_mode(&self) -> bool {
		self.relation_mode
	}

	pub fn relation_source(&self) -> Option<&RegionId> {
		self.relation_source.as_ref()
	}

	/// Appends a region and returns its id.
	pub fn add_region(&mut self, region: Region) -> RegionId {
		let id = region.id.clone();
		self.edit("add-region", |scope| scope.insert_region(region));
		id
	}

	/// Selects a region.
	///
	/// In relation mode this instead links the relation source to `id` and
	/// leaves relation mode. Returns `false` for unknown regions.
	pub fn highlight_region(&mut self, id: &RegionId) -> bool {
		if !self.state.regions.contains(id) {
			debug!(region = %id, "highlight of unknown region");
			return false;
		}
		if self.relation_mode {
			if let Some(from) = self.relation_source.clone() {
				if &from != id {
					self.add_relation(&from, id);
				}
			}
			self.stop_relation_mode();
			return true;
		}
		self.highlighted = Some(id.clone());
		true
	}

	/// Clears the highlight.
	pub fn unselect_all_regions(&mut self) {
		self.highlighted = None;
	}

	/// Highlights the region after the current one, wrapping around.
	pub fn select_next_region(&mut self) -> Option<RegionId> {
		let next = self
			.state
			.regions
			.next_after(self.highlighted.as_ref())?
			.clone();
		self.highlighted = Some(next.clone());
		Some(next)
	}

	/// Enters relation mode with `source` as the relation start.
	pub fn start_relation_mode(&mut self, source: &RegionId) -> bool {
		if !self.state.regions.contains(source) {
			return false;
		}
		self.relation_mode = true;
		self.relation_source = Some(source.clone());
		true
	}

	pub fn stop_relation_mode(&mut self) {
		self.relation_mode = false;
		self.relation_source = None;
	}

	/// Links two existing regions. Returns `false` if either is missing or the
	/// pair is already linked.
	pub fn add_relation(&mut self, from: &RegionId, to: &RegionId) -> bool {
		if !self.state.regions.contains(from) || !self.state.regions.contains(to) {
			return false;
		}
		let relation = Relation::new(from.clone(), to.clone());
		self.edit("add-relation", |scope| scope.insert_relation(relation))
	}

	pub fn remove_relation(&mut self, from: &RegionId, to: &RegionId) -> bool {
		self.edit("remove-relation", |scope| scope.remove_relation(from, to))
	}

	/// Deletes a region along with its relations.
	pub fn delete_region(&mut self, id: &RegionId) -> bool {
		if !self.state.regions.contains(id) {
			return false;
		}
		self.edit("delete-region", |scope| scope.remove_region(id));
		true
	}

	/// Deletes every region and relation.
	pub fn delete_all_regions(&mut self) {
		let ids: Vec<RegionId> = self.state.regions.iter().map(|r| r.id.clone()).collect();
		self.edit("delete-all-regions", |scope| {
			for id in &ids {
				scope.remove_region(id);
			}
		});
	}

	pub fn toggle_region_hidden(&mut self, id: &RegionId) -> bool {
		let Some(hidden) = self.state.regions.get(id).map(|r| r.hidden) else {
			return false;
		};
		self.edit("toggle-hidden", |scope| scope.set_region_hidden(id, !hidden));
		true
	}
}
