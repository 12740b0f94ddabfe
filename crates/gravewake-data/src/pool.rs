// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Slot arena with a free list for recycling deactivated entities.
//!
//! Deactivating an entity pushes its slot index onto a LIFO free stack;
//! the next spawn pops that stack before ever growing the arena. Under a
//! population cap of K the arena never allocates more than K slots, which
//! keeps steady-state spawning allocation-free.

/// An entity that can live in a [`Pool`] slot.
pub trait Poolable: Default {
    /// Returns `true` while the slot holds a live entity.
    fn is_active(&self) -> bool;

    /// Flips the slot's live flag. Called by the pool only.
    fn set_active(&mut self, active: bool);
}

/// A fixed-capacity slot arena with LIFO index recycling.
///
/// The pool is mutated only from the simulation thread; it carries no
/// internal locking.
#[derive(Debug)]
pub struct Pool<T: Poolable> {
    slots: Vec<T>,
    free: Vec<u32>,
    cap: usize,
}

impl<T: Poolable> Pool<T> {
    /// Creates a pool that will hold at most `cap` live entities.
    pub fn new(cap: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            cap,
        }
    }

    /// The population cap.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Number of live entities.
    pub fn active_len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots ever allocated, live or recycled.
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Claims a slot, preferring the most recently recycled one, and runs
    /// `reset` on it before activation.
    ///
    /// Returns the slot index, or `None` when the live population is at
    /// the cap. A recycled slot keeps whatever state `reset` does not
    /// overwrite, so `reset` must restore everything gameplay reads.
    pub fn spawn(&mut self, reset: impl FnOnce(&mut T)) -> Option<usize> {
        if self.active_len() >= self.cap {
            return None;
        }

        let index = match self.free.pop() {
            Some(index) => index as usize,
            None => {
                self.slots.push(T::default());
                self.slots.len() - 1
            }
        };

        let slot = &mut self.slots[index];
        reset(slot);
        slot.set_active(true);
        Some(index)
    }

    /// Deactivates the entity in `index` and queues the slot for reuse.
    ///
    /// Recycling an already-inactive slot is a no-op, so a double
    /// deactivation cannot corrupt the free list.
    pub fn recycle(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.is_active() {
                slot.set_active(false);
                self.free.push(index as u32);
            }
        }
    }

    /// Returns the entity in `index` if it is live.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).filter(|slot| slot.is_active())
    }

    /// Mutable variant of [`get`](Pool::get).
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots
            .get_mut(index)
            .filter(|slot| slot.is_active())
    }

    /// Iterates over `(index, entity)` for every live entity.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_active())
    }

    /// Mutable variant of [`iter_active`](Pool::iter_active).
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.is_active())
    }

    /// Indices of every live entity, in slot order.
    ///
    /// Useful when a pass needs to mutate entries while consulting the
    /// rest of the pool.
    pub fn active_indices(&self) -> Vec<usize> {
        self.iter_active().map(|(index, _)| index).collect()
    }

    /// Raw slot access, live or not. Steering code uses this to read a
    /// neighbor while holding an index into the same pool.
    pub fn slot(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Mote {
        charge: u32,
        active: bool,
    }

    impl Poolable for Mote {
        fn is_active(&self) -> bool {
            self.active
        }

        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
    }

    #[test]
    fn spawn_is_refused_at_cap() {
        let mut pool: Pool<Mote> = Pool::new(3);
        for _ in 0..3 {
            assert!(pool.spawn(|_| {}).is_some());
        }
        assert!(pool.spawn(|_| {}).is_none());
        assert_eq!(pool.active_len(), 3);
    }

    #[test]
    fn recycled_slot_is_reused_before_allocating() {
        let mut pool: Pool<Mote> = Pool::new(4);
        let first = pool.spawn(|m| m.charge = 1).unwrap();
        pool.spawn(|m| m.charge = 2).unwrap();

        pool.recycle(first);
        assert_eq!(pool.active_len(), 1);

        let reused = pool.spawn(|m| m.charge = 3).unwrap();
        assert_eq!(reused, first);
        assert_eq!(pool.get(reused).unwrap().charge, 3);
        // No third slot was ever allocated.
        assert_eq!(pool.allocated(), 2);
    }

    #[test]
    fn free_list_is_lifo() {
        let mut pool: Pool<Mote> = Pool::new(8);
        let a = pool.spawn(|_| {}).unwrap();
        let b = pool.spawn(|_| {}).unwrap();

        pool.recycle(a);
        pool.recycle(b);

        // b was recycled last, so it comes back first.
        assert_eq!(pool.spawn(|_| {}).unwrap(), b);
        assert_eq!(pool.spawn(|_| {}).unwrap(), a);
    }

    #[test]
    fn allocation_never_exceeds_cap() {
        let mut pool: Pool<Mote> = Pool::new(5);
        for _ in 0..10 {
            let spawned: Vec<_> = (0..5).filter_map(|_| pool.spawn(|_| {})).collect();
            assert_eq!(spawned.len(), 5);
            for index in spawned {
                pool.recycle(index);
            }
        }
        assert!(pool.allocated() <= 5);
    }

    #[test]
    fn double_recycle_is_harmless() {
        let mut pool: Pool<Mote> = Pool::new(2);
        let a = pool.spawn(|_| {}).unwrap();
        pool.recycle(a);
        pool.recycle(a);

        // The slot appears once in the free list, not twice.
        assert!(pool.spawn(|_| {}).is_some());
        assert!(pool.spawn(|_| {}).is_some());
        assert_eq!(pool.active_len(), 2);
    }

    #[test]
    fn get_hides_inactive_slots() {
        let mut pool: Pool<Mote> = Pool::new(2);
        let a = pool.spawn(|m| m.charge = 9).unwrap();
        assert!(pool.get(a).is_some());

        pool.recycle(a);
        assert!(pool.get(a).is_none());
        // Raw slot access still sees the parked value.
        assert_eq!(pool.slot(a).unwrap().charge, 9);
    }

    #[test]
    fn iter_active_skips_recycled() {
        let mut pool: Pool<Mote> = Pool::new(4);
        let a = pool.spawn(|m| m.charge = 1).unwrap();
        pool.spawn(|m| m.charge = 2).unwrap();
        pool.recycle(a);

        let charges: Vec<u32> = pool.iter_active().map(|(_, m)| m.charge).collect();
        assert_eq!(charges, vec![2]);
    }
}
