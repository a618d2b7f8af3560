/*!
 * Change Notification
 */

use crate::context::Context;
use crate::core::types::Value;

type ChangedFn<T> = dyn Fn(&Context, &Value<T>) + Send + Sync;

/// Callback fired when a slot's value is replaced by a copy or by `apply`
///
/// Runs synchronously on the writing thread before the write returns, with
/// no slot lock held. Keeping a clone of the value makes the slot shared
/// again, so the next mutable access will copy.
pub struct ChangedCallback<T> {
    f: Box<ChangedFn<T>>,
}

impl<T> ChangedCallback<T> {
    /// Wrap a notification closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Context, &Value<T>) + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }

    #[inline]
    pub(crate) fn invoke(&self, context: &Context, value: &Value<T>) {
        (self.f)(context, value)
    }
}

impl<T> std::fmt::Debug for ChangedCallback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangedCallback").finish_non_exhaustive()
    }
}
