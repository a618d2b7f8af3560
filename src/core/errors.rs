/*!
 * Error Types
 * Pointer access errors with thiserror, miette and serde support
 */

use super::types::Slot;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when reading or writing a context's slot
///
/// Both variants are contract violations: the slot must be prepared with
/// `setup`, `map` or `apply` before it can be accessed.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ContextPtrError {
    #[error("Access of unmapped object in context {slot}")]
    #[diagnostic(
        code(context_ptr::unmapped),
        help("Call setup(), map() or apply() for this context before accessing it.")
    )]
    Unmapped { slot: Slot },

    #[error("Access of context {slot} beyond slot storage (capacity {capacity})")]
    #[diagnostic(
        code(context_ptr::out_of_range),
        help("The slot was never grown to. Map or set up the context first.")
    )]
    OutOfRange { slot: Slot, capacity: usize },
}

impl ContextPtrError {
    /// Slot the failed access targeted
    pub fn slot(&self) -> Slot {
        match self {
            ContextPtrError::Unmapped { slot } | ContextPtrError::OutOfRange { slot, .. } => *slot,
        }
    }

    /// Out-of-range slots are never mapped, so both variants count as an
    /// unmapped access.
    pub fn is_unmapped_access(&self) -> bool {
        matches!(
            self,
            ContextPtrError::Unmapped { .. } | ContextPtrError::OutOfRange { .. }
        )
    }
}
