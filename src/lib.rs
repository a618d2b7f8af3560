/*!
 * Context COW Library
 * Copy-on-write values shared across multi-buffered execution contexts
 */

pub mod context;
pub mod core;
pub mod cow;
pub mod logging;
pub mod storage;

// Re-exports
pub use crate::core::{new_value, ContextPtrConfig, ContextPtrError, CowResult, Slot, Value};
pub use context::{Context, ContextRegistry, SlotRegistry};
pub use cow::{ChangedCallback, ContextPtr, CowStats, Scoped, ValueMut, ValueRef};
pub use logging::init_tracing;
pub use storage::GrowableArray;
