//! Handle management for registered fixtures
//!
//! Vulkan hands out opaque 64-bit handles. Tests that want a device other
//! than the default one register a fixture and get back a handle; the
//! physical-device queries map that handle back to the fixture.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Thread-safe handle allocator
pub struct HandleAllocator<T> {
    next_handle: RwLock<u64>,
    objects: RwLock<FxHashMap<u64, Arc<T>>>,
}

impl<T> HandleAllocator<T> {
    pub fn new() -> Self {
        Self {
            next_handle: RwLock::new(1), // Start at 1, 0 is VK_NULL_HANDLE
            objects: RwLock::new(FxHashMap::default()),
        }
    }

    /// Allocate a new handle for an object
    pub fn allocate(&self, object: T) -> u64 {
        let mut next = self.next_handle.write();
        let handle = *next;
        *next += 1;

        let mut objects = self.objects.write();
        objects.insert(handle, Arc::new(object));

        handle
    }

    /// Get a reference to an object by handle
    pub fn get(&self, handle: u64) -> Option<Arc<T>> {
        let objects = self.objects.read();
        objects.get(&handle).cloned()
    }

    /// Remove an object by handle
    pub fn remove(&self, handle: u64) -> Option<Arc<T>> {
        let mut objects = self.objects.write();
        objects.remove(&handle)
    }

    pub fn contains(&self, handle: u64) -> bool {
        let objects = self.objects.read();
        objects.contains_key(&handle)
    }

    pub fn count(&self) -> usize {
        let objects = self.objects.read();
        objects.len()
    }
}

impl<T> Default for HandleAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}
