/*!
 * Slot Storage
 *
 * Growable indexed storage backing per-context slots:
 * - Segmented layout, existing elements never move
 * - Lock-free reads of populated indices
 * - Growth serialized behind a single mutex
 */

mod segmented;

pub use segmented::GrowableArray;
