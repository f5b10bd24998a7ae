//! Heap handles: values parked behind opaque ids for callers that cannot
//! hold a `Value` directly.
//!
//! A `HeapHandle` is move-only and is consumed by `free`, so within Rust a
//! handle cannot be freed twice. Handles that cross a boundary as raw `u64`
//! ids are checked on the way back: each slot carries a generation that is
//! bumped on free, and a stale or foreign id is an `InvalidHandle` error
//! rather than a read of whatever now occupies the slot.

use std::fmt;

use sym_value::{evaluation, invalid_handle, SymResult, Tag, Value};

/// Slot indices occupy the low 32 bits of a raw id.
const MAX_SLOTS: usize = u32::MAX as usize;

/// Owned token for one parked value. Not `Clone`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct HeapHandle {
    raw: u64,
}

impl HeapHandle {
    fn new(index: u32, generation: u32) -> Self {
        HeapHandle {
            raw: (u64::from(generation) << 32) | u64::from(index),
        }
    }

    /// Rebuild a handle from an id previously returned by `into_raw`.
    pub fn from_raw(raw: u64) -> Self {
        HeapHandle { raw }
    }

    /// Give up the handle as a plain id, for crossing a boundary.
    pub fn into_raw(self) -> u64 {
        self.raw
    }

    pub fn raw(&self) -> u64 {
        self.raw
    }

    fn index(&self) -> usize {
        (self.raw & u64::from(u32::MAX)) as usize
    }

    fn generation(&self) -> u32 {
        (self.raw >> 32) as u32
    }
}

impl fmt::Display for HeapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.raw)
    }
}

struct Slot {
    generation: u32,
    value: Option<Value>,
}

/// Generation-checked slab of parked values.
pub struct HeapHandleBridge {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    max_slots: usize,
}

impl Default for HeapHandleBridge {
    fn default() -> Self {
        Self::with_max_slots(MAX_SLOTS)
    }
}

impl HeapHandleBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slab that holds at most `max_slots` live values, clamped to the
    /// number of indices a raw id can address.
    pub fn with_max_slots(max_slots: usize) -> Self {
        HeapHandleBridge {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            max_slots: max_slots.min(MAX_SLOTS),
        }
    }

    /// Park a copy of `value`. Fails once every slot is live.
    pub fn alloc(&mut self, value: &Value) -> SymResult<HeapHandle> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = u32::try_from(self.slots.len())
                    .ok()
                    .filter(|_| self.slots.len() < self.max_slots)
                    .ok_or_else(|| {
                        evaluation(format!("heap handle slab is full ({} slots)", self.max_slots))
                    })?;
                self.slots.push(Slot {
                    generation: 0,
                    value: None,
                });
                index
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.value = Some(value.clone());
        self.live += 1;
        let handle = HeapHandle::new(index, slot.generation);
        tracing::trace!(%handle, tag = %value.type_name(), "heap handle allocated");
        Ok(handle)
    }

    /// Release the value behind `handle`.
    pub fn free(&mut self, handle: HeapHandle) -> SymResult<()> {
        let slot = self.live_slot_mut(&handle)?;
        slot.value = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index() as u32);
        self.live -= 1;
        tracing::trace!(%handle, "heap handle freed");
        Ok(())
    }

    /// Printed form of the parked value.
    pub fn print(&self, handle: &HeapHandle) -> SymResult<String> {
        let value = self.value(handle)?;
        tracing::trace!(%handle, "heap handle printed");
        Ok(value.to_string())
    }

    /// Type tag of the parked value.
    pub fn tag(&self, handle: &HeapHandle) -> SymResult<Tag> {
        self.value(handle).map(Value::tag)
    }

    /// Copy the parked value out; the handle stays live.
    pub fn reconstruct(&self, handle: &HeapHandle) -> SymResult<Value> {
        let value = self.value(handle)?.clone();
        tracing::trace!(%handle, "heap handle reconstructed");
        Ok(value)
    }

    /// Handles allocated and not yet freed.
    pub fn live_count(&self) -> usize {
        self.live
    }

    fn value(&self, handle: &HeapHandle) -> SymResult<&Value> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.value.as_ref())
            .ok_or_else(|| invalid_handle(handle.raw))
    }

    fn live_slot_mut(&mut self, handle: &HeapHandle) -> SymResult<&mut Slot> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation() && slot.value.is_some())
            .ok_or_else(|| invalid_handle(handle.raw))
    }
}

impl fmt::Debug for HeapHandleBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapHandleBridge")
            .field("slots", &self.slots.len())
            .field("live", &self.live)
            .finish()
    }
}

#[cfg(test)]
mod tests;
