use std::{
    rc::Rc,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A single-threaded, reference-counted handle with interior mutability.
///
/// The sculpting core is single-threaded by contract, but a few collaborators are
/// shared between owners: the block registry is read by the mesh builder and appended
/// to by custom-block registration, and the texture provider is polled by the mesh
/// builder while the renderer feeds it new tiles. `StResource` is the handle those
/// owners clone.
///
/// # Examples
///
/// ```
/// use voxel_sculpt::core::StResource;
///
/// let counter = StResource::new(0u32);
/// let alias = counter.clone();
///
/// *alias.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
/// ```
///
/// # Re-entrancy
/// Holding a write guard while asking for any other guard on the same handle
/// deadlocks. Callers keep guards short-lived and never hold one across a call back
/// into code that may lock the same resource.
pub struct StResource<T> {
    pub resource: Rc<RwLock<T>>,
}

impl<T> StResource<T> {
    /// Wraps `resource` in a new shared handle.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read guard over the contained value.
    ///
    /// A poisoned lock is recovered rather than propagated: no code path in the
    /// crate panics while holding a guard, and the data behind it stays valid.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a write guard over the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.resource, &other.resource)
    }
}

impl<T: Default> Default for StResource<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_value() {
        let original = StResource::new(vec![1, 2, 3]);
        let alias = original.clone();

        alias.get_mut().push(4);

        assert_eq!(original.get().len(), 4);
        assert!(original.ptr_eq(&alias));
        assert!(!original.ptr_eq(&StResource::new(vec![1, 2, 3, 4])));
    }
}
