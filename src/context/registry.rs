/*!
 * Context Registry
 * Dense slot assignment and per-thread current context binding
 */

use super::handle::Context;
use crate::core::types::Slot;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, ThreadId};
use tracing::debug;

/// Source of contexts and slot counts consumed by context pointers
#[cfg_attr(test, mockall::automock)]
pub trait SlotRegistry {
    /// Context of the calling thread
    fn current(&self) -> Context;

    /// Number of slots assigned so far
    fn num_slots(&self) -> usize;
}

/// Registry assigning dense, never-reused slots
///
/// Slot 0 belongs to the main context created with the registry. Threads
/// that never call [`make_current`](Self::make_current) see the main
/// context as current.
pub struct ContextRegistry {
    next_slot: AtomicUsize,
    main: Context,
    bound: DashMap<ThreadId, Context, ahash::RandomState>,
}

impl ContextRegistry {
    /// Create registry with its main context at slot 0
    pub fn new() -> Self {
        Self {
            next_slot: AtomicUsize::new(1),
            main: Context::from_slot(Slot(0)),
            bound: DashMap::with_hasher(ahash::RandomState::new()),
        }
    }

    /// Main context (slot 0)
    #[inline]
    pub fn main(&self) -> Context {
        self.main
    }

    /// Assign a new context the next free slot
    pub fn register(&self) -> Context {
        let slot = Slot(self.next_slot.fetch_add(1, Ordering::Relaxed));
        debug!(slot = slot.index(), "Context registered");
        Context::from_slot(slot)
    }

    /// Bind `context` as current for the calling thread
    ///
    /// Returns the previously bound context, if any.
    pub fn make_current(&self, context: &Context) -> Option<Context> {
        self.bound.insert(thread::current().id(), *context)
    }

    /// Drop the calling thread's binding, falling back to main
    pub fn release_current(&self) -> Option<Context> {
        self.bound
            .remove(&thread::current().id())
            .map(|(_, context)| context)
    }
}

impl SlotRegistry for ContextRegistry {
    fn current(&self) -> Context {
        self.bound
            .get(&thread::current().id())
            .map(|entry| *entry.value())
            .unwrap_or(self.main)
    }

    fn num_slots(&self) -> usize {
        self.next_slot.load(Ordering::Relaxed)
    }
}

impl Default for ContextRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ContextRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextRegistry")
            .field("num_slots", &self.num_slots())
            .field("bound_threads", &self.bound.len())
            .finish()
    }
}
