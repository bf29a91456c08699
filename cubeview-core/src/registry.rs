//! Fixed-capacity object list

use log::debug;

use crate::geometry::Object3D;

/// Maximum number of objects a registry holds
pub const OBJECT_CAPACITY: usize = 100;

/// Ordered collection of scene objects; insertion order is render order
#[derive(Debug, Clone)]
pub struct ObjectRegistry {
    objects: Vec<Object3D>,
    capacity: usize,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::with_capacity(OBJECT_CAPACITY)
    }

    /// Registry holding at most `capacity` objects; the limit can only be
    /// lowered below [`OBJECT_CAPACITY`]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(OBJECT_CAPACITY);
        Self {
            objects: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an object. Once the registry is full the object is dropped
    /// and `false` is returned.
    pub fn add(&mut self, object: Object3D) -> bool {
        if self.objects.len() >= self.capacity {
            debug!(
                "object registry full ({} objects), dropping object",
                self.capacity
            );
            return false;
        }
        self.objects.push(object);
        true
    }

    pub fn objects(&self) -> &[Object3D] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Object3D> for ObjectRegistry {
    fn extend<I: IntoIterator<Item = Object3D>>(&mut self, iter: I) {
        for object in iter {
            self.add(object);
        }
    }
}
