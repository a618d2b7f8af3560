/*!
 * Pointer Statistics
 */

use serde::{Deserialize, Serialize};

/// Snapshot of slot usage for one context pointer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CowStats {
    /// Addressable slots
    pub capacity: usize,
    /// Slots holding a value
    pub mapped_slots: usize,
    /// Mapped slots whose value has other holders
    pub shared_slots: usize,
    /// Distinct payload instances across all mapped slots
    pub distinct_values: usize,
}

impl CowStats {
    /// Mapped slots holding their value exclusively
    pub fn exclusive_slots(&self) -> usize {
        self.mapped_slots - self.shared_slots
    }

    /// Slots served per payload instance (1.0 when nothing is shared)
    pub fn sharing_ratio(&self) -> f64 {
        if self.distinct_values == 0 {
            return 0.0;
        }
        self.mapped_slots as f64 / self.distinct_values as f64
    }
}
