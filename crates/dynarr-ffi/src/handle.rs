//! Generational handle table for arrays owned across the C boundary.
//!
//! A handle packs a slot index (high 32 bits) and a generation (low 32
//! bits). Destroying an array bumps its slot's generation, so every copy
//! of the old handle stops resolving: use-after-free and double-free
//! become `None` instead of UB. Generations start at 1, so `0` is never a
//! valid handle.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Handle {
    slot: u32,
    generation: u32,
}

impl Handle {
    fn pack(self) -> u64 {
        (u64::from(self.slot) << 32) | u64::from(self.generation)
    }

    fn unpack(raw: u64) -> Self {
        Self {
            slot: (raw >> 32) as u32,
            generation: raw as u32,
        }
    }
}

/// One table slot. `value` is `None` while the slot is free.
struct Slot<T> {
    /// Live handles must match this; a free slot hands it to the next value.
    generation: u32,
    value: Option<T>,
}

/// Maps packed `u64` handles to owned values.
pub(crate) struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    /// Indices of empty slots that may be reused.
    free: Vec<u32>,
}

impl<T> HandleTable<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store `value` and return its handle.
    pub fn insert(&mut self, value: T) -> u64 {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Handle {
                slot: index,
                generation: slot.generation,
            }
            .pack();
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 1,
            value: Some(value),
        });
        Handle {
            slot: index,
            generation: 1,
        }
        .pack()
    }

    pub fn get(&self, raw: u64) -> Option<&T> {
        let handle = Handle::unpack(raw);
        let slot = self.slots.get(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, raw: u64) -> Option<&mut T> {
        let handle = Handle::unpack(raw);
        let slot = self.slots.get_mut(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Take the value out, invalidating every copy of `raw`.
    ///
    /// A slot whose generation would wrap to 0 stays empty and is never
    /// recycled, so a stale handle can never match a later value.
    pub fn remove(&mut self, raw: u64) -> Option<T> {
        let handle = Handle::unpack(raw);
        let slot = self.slots.get_mut(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(handle.slot);
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_never_a_valid_handle() {
        let mut table = HandleTable::new();
        let h = table.insert("a");
        assert_ne!(h, 0);
        assert_eq!(table.get(0), None);
    }

    #[test]
    fn insert_then_get() {
        let mut table = HandleTable::new();
        let h = table.insert(42u32);
        assert_eq!(table.get(h), Some(&42));
        *table.get_mut(h).unwrap() += 1;
        assert_eq!(table.get(h), Some(&43));
    }

    #[test]
    fn removed_handle_is_stale() {
        let mut table = HandleTable::new();
        let h = table.insert(7u8);
        assert_eq!(table.remove(h), Some(7));
        assert_eq!(table.get(h), None);
        assert_eq!(table.get_mut(h), None);
        assert_eq!(table.remove(h), None);
    }

    #[test]
    fn churn_reuses_one_slot() {
        let mut table = HandleTable::new();
        let mut previous = Vec::new();
        for i in 0..1_000u32 {
            let h = table.insert(i);
            assert_eq!(Handle::unpack(h).slot, 0);
            assert_eq!(table.remove(h), Some(i));
            previous.push(h);
        }
        assert_eq!(table.slots.len(), 1);
        assert!(previous.iter().all(|&h| table.get(h).is_none()));
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut table = HandleTable::new();
        let first = table.insert(1u8);
        table.remove(first);
        let second = table.insert(2u8);
        let (a, b) = (Handle::unpack(first), Handle::unpack(second));
        assert_eq!(a.slot, b.slot);
        assert_eq!(b.generation, a.generation + 1);
        assert_eq!(table.get(first), None);
        assert_eq!(table.get(second), Some(&2));
    }

    #[test]
    fn unknown_slot_is_none() {
        let table: HandleTable<u8> = HandleTable::new();
        let bogus = Handle {
            slot: 99,
            generation: 1,
        }
        .pack();
        assert_eq!(table.get(bogus), None);
    }

    #[test]
    fn exhausted_slot_is_retired() {
        let mut table = HandleTable::new();
        let h = table.insert(1u8);
        table.slots[0].generation = u32::MAX;
        let last = Handle {
            slot: 0,
            generation: u32::MAX,
        }
        .pack();
        assert_eq!(table.remove(last), Some(1));
        assert!(table.slots[0].value.is_none());
        assert!(!table.free.contains(&0));
        assert_eq!(table.get(h), None);
        assert_eq!(table.get(last), None);

        let fresh = table.insert(2u8);
        assert_eq!(Handle::unpack(fresh).slot, 1);
    }
}
