/*!
 * Context Handle
 */

use crate::core::types::Slot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One logical execution timeline, identified by its slot
///
/// Handles are cheap to copy. Contexts from a [`ContextRegistry`] carry a
/// slot that stays stable for the registry's lifetime.
///
/// [`ContextRegistry`]: super::ContextRegistry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    slot: Slot,
}

impl Context {
    /// Wrap a slot assigned by some external registry
    #[inline]
    pub const fn from_slot(slot: Slot) -> Self {
        Self { slot }
    }

    /// Slot backing this context
    #[inline]
    pub const fn slot(&self) -> Slot {
        self.slot
    }
}

impl From<Slot> for Context {
    fn from(slot: Slot) -> Self {
        Self::from_slot(slot)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "context#{}", self.slot)
    }
}
