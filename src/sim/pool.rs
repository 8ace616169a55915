//! Registry of live falling discs
//!
//! Kept in spawn order; ids are never reused within a state so a stale id
//! from the input surface can't alias a newer disc.

use glam::Vec2;

use super::state::{FallingObject, ObjectId};

#[derive(Debug, Clone)]
pub struct ObjectPool {
    objects: Vec<FallingObject>,
    next_id: u32,
}

impl Default for ObjectPool {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }
}

impl ObjectPool {
    /// Register a disc and return its id
    pub fn insert(&mut self, value: u32, pos: Vec2, required: bool) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(FallingObject {
            id,
            value,
            pos,
            required,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[FallingObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [FallingObject] {
        &mut self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingObject> {
        self.objects.iter()
    }

    pub fn get(&self, id: ObjectId) -> Option<&FallingObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// The disc currently flagged as the required instance, if any
    pub fn required_instance(&self) -> Option<&FallingObject> {
        self.objects.iter().find(|o| o.required)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<FallingObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<FallingObject> {
        (index < self.objects.len()).then(|| self.objects.remove(index))
    }

    /// Remove every disc showing `value`, returning their ids
    pub fn remove_value(&mut self, value: u32) -> Vec<ObjectId> {
        let mut removed = Vec::new();
        self.objects.retain(|o| {
            if o.value == value {
                removed.push(o.id);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Drop the required flag from every disc; returns how many were demoted
    pub fn demote_required(&mut self) -> usize {
        let mut demoted = 0;
        for obj in self.objects.iter_mut().filter(|o| o.required) {
            obj.required = false;
            demoted += 1;
        }
        demoted
    }

    /// Empty the pool, handing back what was in it
    pub fn drain(&mut self) -> Vec<FallingObject> {
        std::mem::take(&mut self.objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_not_reused() {
        let mut pool = ObjectPool::default();
        let a = pool.insert(1, Vec2::ZERO, false);
        let b = pool.insert(2, Vec2::ZERO, false);
        assert_ne!(a, b);

        pool.remove(b);
        let c = pool.insert(3, Vec2::ZERO, false);
        assert_ne!(b, c);
        assert!(!pool.contains(b));
    }

    #[test]
    fn test_remove_value_keeps_order_of_the_rest() {
        let mut pool = ObjectPool::default();
        pool.insert(4, Vec2::ZERO, false);
        let keep = pool.insert(5, Vec2::ZERO, false);
        pool.insert(4, Vec2::ZERO, true);
        let keep2 = pool.insert(6, Vec2::ZERO, false);

        let removed = pool.remove_value(4);
        assert_eq!(removed.len(), 2);
        let ids: Vec<_> = pool.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![keep, keep2]);
        assert!(pool.required_instance().is_none());
    }

    #[test]
    fn test_demote_required() {
        let mut pool = ObjectPool::default();
        pool.insert(1, Vec2::ZERO, true);
        pool.insert(1, Vec2::ZERO, false);
        assert_eq!(pool.demote_required(), 1);
        assert!(pool.required_instance().is_none());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut pool = ObjectPool::default();
        assert!(pool.remove(ObjectId(99)).is_none());
        assert!(pool.remove_at(0).is_none());
    }
}
