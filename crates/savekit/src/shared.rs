//! Shared, cycle-aware references for object graphs.
//!
//! Plain Rust values form trees, so the only way a value becomes reachable
//! from itself is through shared ownership. [`Shared`] wraps `Arc<RwLock<T>>`
//! and tracks which nodes are currently being serialized on this thread. When
//! traversal re-enters a node that is still in progress, the edge serializes
//! as `null`, which the value serializer then drops from the enclosing object.
//!
//! Only ancestors count as cycles; a node reachable twice through unrelated
//! paths is written twice.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

thread_local! {
    static IN_PROGRESS: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// Shared handle to a mutable value that may participate in reference cycles.
pub struct Shared<T>(Arc<RwLock<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Read access. A poisoned lock still yields the last written value.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access. A poisoned lock still yields the last written value.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn address(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> fmt::Debug for Shared<T> {
    // Printing the contents could recurse forever through a cycle.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared({:#x})", self.address())
    }
}

/// Removes a node from the in-progress set when its serialization ends,
/// including on early return through `?`.
struct VisitGuard(usize);

impl VisitGuard {
    fn enter(address: usize) -> Option<Self> {
        IN_PROGRESS
            .with(|set| set.borrow_mut().insert(address))
            .then_some(Self(address))
    }
}

impl Drop for VisitGuard {
    fn drop(&mut self) {
        IN_PROGRESS.with(|set| {
            set.borrow_mut().remove(&self.0);
        });
    }
}

impl<T: Serialize> Serialize for Shared<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(_guard) = VisitGuard::enter(self.address()) else {
            tracing::trace!("Dropping cyclic reference to {:#x}", self.address());
            return serializer.serialize_none();
        };
        let value = self.read();
        value.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Shared<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Shared::new)
    }
}
