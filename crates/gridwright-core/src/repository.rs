//! Authoritative collection of placed objects.

use crate::objects::{ObjectId, PlacedObject};
use std::collections::HashMap;

/// Storage for committed objects.
///
/// Placement reads `placed()` on every evaluation, so implementations must
/// reflect earlier inserts and removals immediately.
pub trait ObjectRepository {
    /// Add an object.
    fn insert(&mut self, object: PlacedObject);

    /// Remove an object by id. Missing ids are a no-op.
    fn remove(&mut self, id: ObjectId) -> Option<PlacedObject>;

    /// All placed objects in insertion order.
    fn placed(&self) -> Vec<&PlacedObject>;

    fn get(&self, id: ObjectId) -> Option<&PlacedObject>;

    fn len(&self) -> usize {
        self.placed().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory repository keyed by id, keeping insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    objects: HashMap<ObjectId, PlacedObject>,
    order: Vec<ObjectId>,
}

impl MemoryRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.order.clear();
    }
}

impl ObjectRepository for MemoryRepository {
    fn insert(&mut self, object: PlacedObject) {
        let id = object.id;
        if self.objects.insert(id, object).is_none() {
            self.order.push(id);
        }
    }

    fn remove(&mut self, id: ObjectId) -> Option<PlacedObject> {
        let removed = self.objects.remove(&id)?;
        self.order.retain(|&existing| existing != id);
        Some(removed)
    }

    fn placed(&self) -> Vec<&PlacedObject> {
        self.order.iter().filter_map(|id| self.objects.get(id)).collect()
    }

    fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.get(&id)
    }

    fn len(&self) -> usize {
        self.objects.len()
    }
}
