/*!
 * Segmented Growable Array
 * Indexed storage that grows without moving existing elements
 */

use crate::core::limits::{MAX_SEGMENTS, SEGMENT_BASE, SEGMENT_BASE_SHIFT};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Growable array with address-stable elements
///
/// # Layout
///
/// Segment `k` holds `SEGMENT_BASE << k` elements. Segments are allocated
/// once and never reallocated, so a `&E` handed out by [`get`](Self::get)
/// stays valid while the array grows underneath it.
///
/// # Performance
///
/// - **Reads**: Lock-free, one atomic load plus a segment lookup
/// - **Growth**: Serialized by a mutex, allocates only the missing segments
/// - **Writes**: Go through the element's own interior mutability
pub struct GrowableArray<E> {
    segments: Box<[OnceLock<Box<[E]>>]>,
    len: AtomicUsize,
    grow_lock: Mutex<()>,
}

impl<E: Default> GrowableArray<E> {
    /// Create array holding `initial` default elements
    pub fn new(initial: usize) -> Self {
        let segments = (0..MAX_SEGMENTS)
            .map(|_| OnceLock::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        let array = Self {
            segments,
            len: AtomicUsize::new(0),
            grow_lock: Mutex::new(()),
        };
        array.expand(initial);
        array
    }

    /// Grow to at least `n` elements
    ///
    /// Never shrinks. Elements already stored keep their address.
    pub fn expand(&self, n: usize) {
        if n <= self.len.load(Ordering::Acquire) {
            return;
        }

        let _guard = self.grow_lock.lock();
        let current = self.len.load(Ordering::Acquire);
        if n <= current {
            return;
        }

        let Some((last_segment, _)) = locate(n - 1) else {
            return;
        };
        for segment in 0..=last_segment {
            self.segments[segment].get_or_init(|| {
                (0..segment_len(segment))
                    .map(|_| E::default())
                    .collect::<Vec<_>>()
                    .into_boxed_slice()
            });
        }

        // Publish only after every covering segment exists
        self.len.store(n, Ordering::Release);
        tracing::trace!(from = current, to = n, "Slot storage expanded");
    }
}

impl<E> GrowableArray<E> {
    /// Element at `index`, or None past the current length
    #[inline]
    pub fn get(&self, index: usize) -> Option<&E> {
        if index >= self.len.load(Ordering::Acquire) {
            return None;
        }
        let (segment, offset) = locate(index)?;
        self.segments[segment].get()?.get(offset)
    }

    /// Number of addressable elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(index, element)` over the addressable range
    pub fn iter(&self) -> impl Iterator<Item = (usize, &E)> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index).map(|e| (index, e)))
    }
}

impl<E: Default> Default for GrowableArray<E> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<E> std::fmt::Debug for GrowableArray<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let allocated = self.segments.iter().filter(|s| s.get().is_some()).count();
        f.debug_struct("GrowableArray")
            .field("len", &self.len())
            .field("segments", &allocated)
            .finish()
    }
}

#[inline]
const fn segment_len(segment: usize) -> usize {
    SEGMENT_BASE << segment
}

/// Map an index to `(segment, offset)`
#[inline]
fn locate(index: usize) -> Option<(usize, usize)> {
    let adjusted = index.checked_add(SEGMENT_BASE)?;
    let high_bit = usize::BITS - 1 - adjusted.leading_zeros();
    let segment = (high_bit - SEGMENT_BASE_SHIFT) as usize;
    Some((segment, adjusted - segment_len(segment)))
}
