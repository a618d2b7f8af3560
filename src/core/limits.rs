/*!
 * Storage Limits and Constants
 *
 * Sizing constants for slot storage and pointer defaults.
 */

// =============================================================================
// SEGMENTED STORAGE
// =============================================================================

/// Element count of the first storage segment
/// Segment k holds `SEGMENT_BASE << k` elements
/// [PERF] Covers typical double/triple buffering without a second segment
pub const SEGMENT_BASE: usize = 32;

/// log2 of [`SEGMENT_BASE`]
pub const SEGMENT_BASE_SHIFT: u32 = SEGMENT_BASE.trailing_zeros();

/// Number of segment directory entries
/// Enough for every index representable in a `usize`
pub const MAX_SEGMENTS: usize = (usize::BITS - SEGMENT_BASE_SHIFT) as usize;

// =============================================================================
// POINTER DEFAULTS
// =============================================================================

/// Slots allocated up front when no registry or config says otherwise
pub const DEFAULT_INITIAL_SLOTS: usize = 1;

/// Environment variable overriding the initial slot count
pub const ENV_INITIAL_SLOTS: &str = "CONTEXT_COW_INITIAL_SLOTS";

/// Environment variable naming a pointer in log output
pub const ENV_LABEL: &str = "CONTEXT_COW_LABEL";
