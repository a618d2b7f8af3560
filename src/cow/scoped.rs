/*!
 * Context-Bound Pointer View
 */

use super::pointer::{ContextPtr, ValueMut, ValueRef};
use crate::context::Context;
use crate::core::types::{CowResult, Value};

/// A [`ContextPtr`] with its context resolved once at the call boundary
///
/// Obtained from [`ContextPtr::scoped`] or [`ContextPtr::current`].
pub struct Scoped<'a, T> {
    ptr: &'a ContextPtr<T>,
    context: Context,
}

impl<'a, T> Scoped<'a, T> {
    pub(crate) fn new(ptr: &'a ContextPtr<T>, context: Context) -> Self {
        Self { ptr, context }
    }

    /// Context this view is bound to
    pub fn context(&self) -> Context {
        self.context
    }

    pub fn get(&self) -> CowResult<ValueRef<T>> {
        self.ptr.get(&self.context)
    }

    pub fn get_mut(&self) -> CowResult<ValueMut<T>>
    where
        T: Clone,
    {
        self.ptr.get_mut(&self.context)
    }

    pub fn value(&self) -> CowResult<Value<T>> {
        self.ptr.value(&self.context)
    }

    pub fn is_mapped(&self) -> bool {
        self.ptr.is_mapped(&self.context)
    }

    pub fn setup(&self)
    where
        T: Default,
    {
        self.ptr.setup(&self.context)
    }

    pub fn apply(&self, value: Value<T>) {
        self.ptr.apply(value, &self.context)
    }

    pub fn unmap(&self) {
        self.ptr.unmap(&self.context)
    }

    /// Make this view's context alias `from`
    pub fn map_from(&self, from: &Context) {
        self.ptr.map(from, &self.context)
    }
}
