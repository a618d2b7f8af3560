/*!
 * Pointer Configuration
 *
 * Construction-time settings for context pointers
 */

use super::limits::{DEFAULT_INITIAL_SLOTS, ENV_INITIAL_SLOTS, ENV_LABEL};
use serde::{Deserialize, Serialize};

/// Context pointer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPtrConfig {
    /// Slots allocated (all unmapped) at construction
    pub initial_slots: usize,
    /// Name attached to log events from this pointer
    pub label: Option<String>,
}

impl Default for ContextPtrConfig {
    fn default() -> Self {
        Self {
            initial_slots: DEFAULT_INITIAL_SLOTS,
            label: None,
        }
    }
}

impl ContextPtrConfig {
    /// One context, no multi-buffering
    pub const fn single() -> Self {
        Self {
            initial_slots: 1,
            label: None,
        }
    }

    /// Two contexts, e.g. a render and an update frame
    pub const fn double_buffered() -> Self {
        Self {
            initial_slots: 2,
            label: None,
        }
    }

    /// Three in-flight contexts
    pub const fn triple_buffered() -> Self {
        Self {
            initial_slots: 3,
            label: None,
        }
    }

    /// Attach a label used in log output
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Load configuration from the environment
    ///
    /// Environment variables:
    /// - CONTEXT_COW_INITIAL_SLOTS: initial slot count (default: 1)
    /// - CONTEXT_COW_LABEL: label for log events (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let initial_slots = match lookup(ENV_INITIAL_SLOTS) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "Ignoring invalid {}", ENV_INITIAL_SLOTS);
                    defaults.initial_slots
                }
            },
            None => defaults.initial_slots,
        };

        let label = lookup(ENV_LABEL).filter(|l| !l.is_empty());

        Self {
            initial_slots,
            label,
        }
    }
}
