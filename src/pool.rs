//! Recycling pools for component records.
//!
//! Entities are cheap to recycle in Bevy, but component records that own
//! heap data (texture keys, for example) are worth keeping around. Each
//! poolable kind gets a [`ComponentPool`] resource: the cleanup system
//! releases a despawned entity's records into it and the builder acquires
//! from it before inserting new ones.
//!
//! Every record is reset on release, so an acquired record is always equal
//! to its documented default regardless of its previous owner.

use bevy::prelude::*;

/// A component record that can be recycled through a [`ComponentPool`].
///
/// `reset` must return every field to the value `Default` produces. The
/// provided implementation does exactly that; kinds owning buffers override
/// it to keep their allocations.
pub trait Poolable: Default + Send + Sync + 'static {
    /// Restores the documented default state.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Free list of reset records of one component kind.
#[derive(Resource, Debug)]
pub struct ComponentPool<T: Poolable> {
    free: Vec<T>,
    capacity: usize,
    acquired: u64,
    reused: u64,
}

/// Default number of idle records a pool keeps before dropping releases.
pub const DEFAULT_POOL_CAPACITY: usize = 256;

impl<T: Poolable> Default for ComponentPool<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }
}

impl<T: Poolable> ComponentPool<T> {
    /// Creates a pool that retains at most `capacity` idle records.
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            free: Vec::new(),
            capacity,
            acquired: 0,
            reused: 0,
        }
    }

    /// Hands out a record in its default state, reusing an idle one if any.
    pub fn acquire(&mut self) -> T {
        self.acquired += 1;
        self.free.pop().map_or_else(T::default, |record| {
            self.reused += 1;
            record
        })
    }

    /// Resets `record` and keeps it for the next [`acquire`](Self::acquire).
    pub fn release(&mut self, mut record: T) {
        if self.free.len() >= self.capacity {
            return;
        }
        record.reset();
        self.free.push(record);
    }

    /// Number of idle records waiting for reuse.
    #[must_use]
    pub const fn idle(&self) -> usize {
        self.free.len()
    }

    /// Total acquisitions and how many of them were served from the free list.
    #[must_use]
    pub const fn stats(&self) -> (u64, u64) {
        (self.acquired, self.reused)
    }
}

/// Acquires a pooled record and overwrites it with `value`.
///
/// Uses `clone_from` so records owning buffers keep their allocation. Falls
/// back to `value` itself when no pool is registered for `T`.
#[must_use]
pub fn acquire_into<T: Poolable + Clone>(world: &mut World, value: T) -> T {
    let Some(mut pool) = world.get_resource_mut::<ComponentPool<T>>() else {
        return value;
    };
    let mut record = pool.acquire();
    record.clone_from(&value);
    record
}

/// Takes `T` off `entity` and returns it to its pool.
///
/// Does nothing when the entity is gone, lacks the component, or no pool is
/// registered.
pub fn recycle<T: Poolable + Component>(world: &mut World, entity: Entity) {
    let Ok(mut entity_mut) = world.get_entity_mut(entity) else {
        return;
    };
    let Some(record) = entity_mut.take::<T>() else {
        return;
    };
    if let Some(mut pool) = world.get_resource_mut::<ComponentPool<T>>() {
        pool.release(record);
    }
}
