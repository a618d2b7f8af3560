/*!
 * Core Types
 * Common types shared by the registry, storage and pointer layers
 */

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Dense per-context storage index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(pub usize);

impl Slot {
    /// Index into slot storage
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Slot {
    fn from(index: usize) -> Self {
        Slot(index)
    }
}

/// Shared, reference-counted holder of one payload instance
///
/// Several slots may hold clones of the same `Value`; the payload is dropped
/// with the last clone.
pub type Value<T> = Arc<RwLock<T>>;

/// Wrap a payload into a fresh, unshared [`Value`]
#[inline]
pub fn new_value<T>(payload: T) -> Value<T> {
    Arc::new(RwLock::new(payload))
}

/// Common result type for pointer operations
pub type CowResult<T> = Result<T, super::errors::ContextPtrError>;
