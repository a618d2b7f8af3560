/*!
 * Copy-on-Write Context Pointers
 *
 * Multi-buffered values shared across execution contexts:
 * - One slot per context, slots may alias one value
 * - First write from a shared slot makes a private copy
 * - Changed callback on divergence and explicit apply
 *
 * # Use Cases
 *
 * - **Frame pipelining**: Render reads frame N while update writes N+1
 * - **Pipeline stages**: Each stage sees a stable snapshot
 * - **Replicas**: Simulation branches diverge from a shared start
 */

mod callback;
mod pointer;
mod scoped;
mod stats;

pub use callback::ChangedCallback;
pub use pointer::{ContextPtr, ValueMut, ValueRef};
pub use scoped::Scoped;
pub use stats::CowStats;
