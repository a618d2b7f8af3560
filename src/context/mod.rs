/*!
 * Execution Contexts
 *
 * Context handles and the registry that assigns their slots. Pointers never
 * look up a current context on their own; callers resolve it here and pass
 * it explicitly.
 */

mod handle;
mod registry;

pub use handle::Context;
pub use registry::{ContextRegistry, SlotRegistry};

#[cfg(test)]
pub use registry::MockSlotRegistry;
