//! Regions and relations of a completion.

use std::collections::BTreeMap;

use annotix_primitives::{NodeId, RegionId};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use uuid::Uuid;

/// Selected option values of one group.
pub type Values = SmallVec<[String; 2]>;

/// An annotated span or area of an object tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
	pub id: RegionId,
	/// Object tag the region belongs to.
	pub owner: NodeId,
	/// Geometry and other object-specific fields, kept as written in results.
	pub value: Map<String, Value>,
	/// Group name to the values selected for this region.
	pub states: BTreeMap<String, Values>,
	pub hidden: bool,
}

impl Region {
	/// Creates a region with a generated id.
	pub fn new(owner: NodeId, value: Map<String, Value>) -> Self {
		Self::with_id(generate_id(), owner, value)
	}

	pub fn with_id(id: RegionId, owner: NodeId, value: Map<String, Value>) -> Self {
		Self {
			id,
			owner,
			value,
			states: BTreeMap::new(),
			hidden: false,
		}
	}

	/// Adds a state at construction time.
	pub fn with_state(mut self, group: impl Into<String>, values: Values) -> Self {
		self.states.insert(group.into(), values);
		self
	}

	pub fn state(&self, group: &str) -> Option<&Values> {
		self.states.get(group)
	}
}

/// Short random id in the style of result payloads.
fn generate_id() -> RegionId {
	let mut id = Uuid::new_v4().simple().to_string();
	id.truncate(10);
	RegionId::new(id)
}

/// Ordered regions of a completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionStore {
	regions: Vec<Region>,
}

impl RegionStore {
	pub fn iter(&self) -> std::slice::Iter<'_, Region> {
		self.regions.iter()
	}

	pub fn len(&self) -> usize {
		self.regions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.regions.is_empty()
	}

	pub fn get(&self, id: &RegionId) -> Option<&Region> {
		self.regions.iter().find(|r| &r.id == id)
	}

	pub fn contains(&self, id: &RegionId) -> bool {
		self.position(id).is_some()
	}

	pub fn position(&self, id: &RegionId) -> Option<usize> {
		self.regions.iter().position(|r| &r.id == id)
	}

	/// Region following `current`, wrapping around; the first region when
	/// nothing is current.
	pub fn next_after(&self, current: Option<&RegionId>) -> Option<&RegionId> {
		let next = match current.and_then(|id| self.position(id)) {
			Some(index) => (index + 1) % self.regions.len(),
			None => 0,
		};
		self.regions.get(next).map(|r| &r.id)
	}

	pub(crate) fn get_mut(&mut self, id: &RegionId) -> Option<&mut Region> {
		self.regions.iter_mut().find(|r| &r.id == id)
	}

	pub(crate) fn insert(&mut self, index: usize, region: Region) {
		let index = index.min(self.regions.len());
		self.regions.insert(index, region);
	}

	pub(crate) fn remove(&mut self, index: usize) -> Option<Region> {
		(index < self.regions.len()).then(|| self.regions.remove(index))
	}
}

/// A directed link between two regions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
	pub from: RegionId,
	pub to: RegionId,
}

impl Relation {
	pub fn new(from: RegionId, to: RegionId) -> Self {
		Self { from, to }
	}

	pub fn involves(&self, id: &RegionId) -> bool {
		&self.from == id || &self.to == id
	}
}

/// Relations of a completion; at most one per ordered pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationStore {
	relations: Vec<Relation>,
}

impl RelationStore {
	pub fn iter(&self) -> std::slice::Iter<'_, Relation> {
		self.relations.iter()
	}

	pub fn len(&self) -> usize {
		self.relations.len()
	}

	pub fn is_empty(&self) -> bool {
		self.relations.is_empty()
	}

	pub fn position(&self, from: &RegionId, to: &RegionId) -> Option<usize> {
		self.relations
			.iter()
			.position(|r| &r.from == from && &r.to == to)
	}

	pub fn contains(&self, from: &RegionId, to: &RegionId) -> bool {
		self.position(from, to).is_some()
	}

	pub(crate) fn insert(&mut self, index: usize, relation: Relation) {
		let index = index.min(self.relations.len());
		self.relations.insert(index, relation);
	}

	pub(crate) fn remove(&mut self, index: usize) -> Option<Relation> {
		(index < self.relations.len()).then(|| self.relations.remove(index))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn region(id: &str) -> Region {
		Region::with_id(RegionId::new(id), NodeId(1), Map::new())
	}

	#[test]
	fn generated_ids_are_short_and_distinct() {
		let a = Region::new(NodeId(1), Map::new());
		let b = Region::new(NodeId(1), Map::new());
		assert_eq!(a.id.as_str().len(), 10);
		assert_ne!(a.id, b.id);
	}

	#[test]
	fn next_after_wraps() {
		let mut store = RegionStore::default();
		assert_eq!(store.next_after(None), None);
		for (i, id) in ["a", "b", "c"].into_iter().enumerate() {
			store.insert(i, region(id));
		}
		assert_eq!(store.next_after(None).map(RegionId::as_str), Some("a"));
		let b = RegionId::new("b");
		assert_eq!(store.next_after(Some(&b)).map(RegionId::as_str), Some("c"));
		let c = RegionId::new("c");
		assert_eq!(store.next_after(Some(&c)).map(RegionId::as_str), Some("a"));
	}
}
