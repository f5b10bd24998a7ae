//! Never-shrinking storage for context state.
//!
//! Every context's `KernelState` is leaked into a slot that lives for the
//! rest of the process, and the arena only ever grows. Dropping a context
//! resets the state inside its slot but never frees the slot, so memory held
//! here is bounded by the number of contexts ever created. In exchange no
//! value, handle or late destructor can observe freed kernel state.

use std::fmt;

use parking_lot::{const_mutex, Mutex};
use sym_kernel::{ContextConfig, KernelState};

/// Index of a context's slot in the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(usize);

impl ContextId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

pub(crate) type StateSlot = &'static Mutex<KernelState>;

static SLOTS: Mutex<Vec<StateSlot>> = const_mutex(Vec::new());

/// Leak a fresh state into a new slot.
pub(crate) fn allocate(config: ContextConfig) -> (ContextId, StateSlot) {
    let slot: StateSlot = Box::leak(Box::new(Mutex::new(KernelState::new(config))));
    let mut slots = SLOTS.lock();
    let id = ContextId(slots.len());
    slots.push(slot);
    tracing::debug!(%id, slots = slots.len(), "allocated context slot");
    (id, slot)
}

/// Slot for `id`, if one was ever allocated.
pub(crate) fn slot(id: ContextId) -> Option<StateSlot> {
    SLOTS.lock().get(id.0).copied()
}

/// Slots allocated so far in this process.
pub fn allocated_slots() -> usize {
    SLOTS.lock().len()
}
