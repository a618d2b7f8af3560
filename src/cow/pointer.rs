/*!
 * Context-Aware Copy-on-Write Pointer
 * Share one value across contexts, copy lazily when a context diverges
 */

use super::callback::ChangedCallback;
use super::scoped::Scoped;
use super::stats::CowStats;
use crate::context::{Context, SlotRegistry};
use crate::core::config::ContextPtrConfig;
use crate::core::errors::ContextPtrError;
use crate::core::types::{new_value, CowResult, Value};
use crate::storage::GrowableArray;
use arc_swap::ArcSwapOption;
use parking_lot::{ArcRwLockReadGuard, ArcRwLockWriteGuard, RawRwLock, RwLock};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Shared read access to a context's payload
pub type ValueRef<T> = ArcRwLockReadGuard<RawRwLock, T>;

/// Exclusive write access to a context's payload
pub type ValueMut<T> = ArcRwLockWriteGuard<RawRwLock, T>;

type SlotCell<T> = RwLock<Option<Value<T>>>;

/// Pointer to multi-buffered data with one slot per context
///
/// Every context reads through its own slot. Slots may alias the same
/// [`Value`]; the first mutable access from a context whose value is shared
/// gives that context a private copy and fires the changed callback.
///
/// # Performance
///
/// - **Read**: Slot read lock, Arc clone, value read lock
/// - **Map**: Arc clone, never copies the payload
/// - **First write after sharing**: One `T::clone`
/// - **Later writes**: No copy, no callback
///
/// # Example
///
/// ```ignore
/// let registry = ContextRegistry::new();
/// let update = registry.main();
/// let render = registry.register();
///
/// let camera = ContextPtr::<Camera>::from_registry(&registry);
/// camera.setup(&update);
/// camera.map(&update, &render);
///
/// // render diverges, update keeps the original
/// camera.get_mut(&render)?.fov = 70.0;
/// ```
///
/// # Concurrency
///
/// Distinct slots never contend. Racing `get_mut`, `map`, `unmap` or
/// `apply` on the same slot is memory safe but leaves the copy decision
/// unspecified. Holding a [`ValueMut`] while reading a slot that aliases
/// the same value deadlocks.
pub struct ContextPtr<T> {
    values: GrowableArray<SlotCell<T>>,
    callback: ArcSwapOption<ChangedCallback<T>>,
    label: Option<String>,
}

impl<T> ContextPtr<T> {
    /// Create pointer with `initial_slots` unmapped slots
    pub fn new(initial_slots: usize) -> Self {
        Self::with_config(ContextPtrConfig {
            initial_slots,
            ..Default::default()
        })
    }

    /// Create pointer from configuration
    pub fn with_config(config: ContextPtrConfig) -> Self {
        Self {
            values: GrowableArray::new(config.initial_slots),
            callback: ArcSwapOption::empty(),
            label: config.label,
        }
    }

    /// Create pointer sized for every slot the registry knows so far
    pub fn from_registry<R>(registry: &R) -> Self
    where
        R: SlotRegistry + ?Sized,
    {
        Self::new(registry.num_slots())
    }

    /// Replace the changed callback
    pub fn set_changed_callback<F>(&self, f: F)
    where
        F: Fn(&Context, &Value<T>) + Send + Sync + 'static,
    {
        self.callback.store(Some(Arc::new(ChangedCallback::new(f))));
    }

    /// Remove the changed callback
    pub fn clear_changed_callback(&self) {
        self.callback.store(None);
    }

    /// Shared handle stored for `context`
    pub fn value(&self, context: &Context) -> CowResult<Value<T>> {
        let cell = self.cell(context)?;
        let slot = cell.read();
        slot.clone().ok_or(ContextPtrError::Unmapped {
            slot: context.slot(),
        })
    }

    /// Read access to the payload for `context`
    pub fn get(&self, context: &Context) -> CowResult<ValueRef<T>> {
        Ok(self.value(context)?.read_arc())
    }

    /// Run `f` against the payload for `context`
    pub fn read<F, R>(&self, context: &Context, f: F) -> CowResult<R>
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.get(context)?;
        Ok(f(&guard))
    }

    /// Write access to the payload for `context` (copies if shared)
    ///
    /// When another holder references the slot's value, the payload is
    /// cloned into a fresh value owned by this slot alone and the changed
    /// callback fires before the guard is returned. An exclusively held
    /// value is returned as is.
    pub fn get_mut(&self, context: &Context) -> CowResult<ValueMut<T>>
    where
        T: Clone,
    {
        let cell = self.cell(context)?;

        let (value, copied) = {
            let mut slot = cell.write();
            let current = slot.as_ref().ok_or(ContextPtrError::Unmapped {
                slot: context.slot(),
            })?;

            if Arc::strong_count(current) == 1 {
                (Arc::clone(current), false)
            } else {
                let copy = new_value(T::clone(&current.read_recursive()));
                let previous = slot.replace(Arc::clone(&copy));
                drop(slot);
                drop(previous);
                (copy, true)
            }
        };

        if copied {
            debug!(
                slot = context.slot().index(),
                label = self.label(),
                "Copy-on-write: context diverged"
            );
            self.notify(context, &value);
        }

        Ok(value.write_arc())
    }

    /// Run `f` against a writable payload for `context` (copies if shared)
    pub fn write<F, R>(&self, context: &Context, f: F) -> CowResult<R>
    where
        T: Clone,
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.get_mut(context)?;
        Ok(f(&mut guard))
    }

    /// Make `to` alias the value currently held by `from`
    ///
    /// Never copies the payload. An unmapped `from` leaves `to` unmapped.
    pub fn map(&self, from: &Context, to: &Context) {
        if from.slot() == to.slot() {
            return;
        }

        let shared = self
            .values
            .get(from.slot().index())
            .and_then(|cell| cell.read().clone());

        let Some(target) = self.grow_to(to) else {
            return;
        };

        trace!(
            from = from.slot().index(),
            to = to.slot().index(),
            mapped = shared.is_some(),
            label = self.label(),
            "Context mapped"
        );
        let previous = std::mem::replace(&mut *target.write(), shared);
        drop(previous);
    }

    /// Drop the value reference held by `context`
    pub fn unmap(&self, context: &Context) {
        let Some(cell) = self.values.get(context.slot().index()) else {
            return;
        };

        let previous = cell.write().take();
        if previous.is_some() {
            trace!(
                slot = context.slot().index(),
                label = self.label(),
                "Context unmapped"
            );
        }
    }

    /// Check if `context` holds a value
    pub fn is_mapped(&self, context: &Context) -> bool {
        self.values
            .get(context.slot().index())
            .is_some_and(|cell| cell.read().is_some())
    }

    /// Check if the value of `context` has other holders
    pub fn is_shared(&self, context: &Context) -> bool {
        self.values
            .get(context.slot().index())
            .is_some_and(|cell| cell.read().as_ref().is_some_and(|v| Arc::strong_count(v) > 1))
    }

    /// Give `context` a default payload if it is unmapped
    ///
    /// Mapped slots are left untouched. Never fires the changed callback.
    pub fn setup(&self, context: &Context)
    where
        T: Default,
    {
        self.setup_inner(context, || new_value(T::default()));
    }

    /// Make an unmapped `context` alias `default`
    pub fn setup_with(&self, context: &Context, default: Value<T>) {
        self.setup_inner(context, move || default);
    }

    /// Store `value` for `context` and notify
    ///
    /// A no-op when the slot already holds this exact value. Otherwise the
    /// callback fires whether or not the previous value was shared.
    pub fn apply(&self, value: Value<T>, context: &Context) {
        let Some(cell) = self.grow_to(context) else {
            return;
        };

        let previous = {
            let mut slot = cell.write();
            if slot.as_ref().is_some_and(|current| Arc::ptr_eq(current, &value)) {
                return;
            }
            slot.replace(Arc::clone(&value))
        };
        drop(previous);

        debug!(
            slot = context.slot().index(),
            label = self.label(),
            "Value applied"
        );
        self.notify(context, &value);
    }

    /// View bound to one context
    pub fn scoped<'a>(&'a self, context: &Context) -> Scoped<'a, T> {
        Scoped::new(self, *context)
    }

    /// View bound to the registry's current context
    pub fn current<'a, R>(&'a self, registry: &R) -> Scoped<'a, T>
    where
        R: SlotRegistry + ?Sized,
    {
        Scoped::new(self, registry.current())
    }

    /// Number of addressable slots
    pub fn slot_capacity(&self) -> usize {
        self.values.len()
    }

    /// Slot usage snapshot
    pub fn stats(&self) -> CowStats {
        let mut stats = CowStats {
            capacity: self.values.len(),
            ..Default::default()
        };
        let mut distinct: HashSet<usize, ahash::RandomState> = HashSet::default();

        for (_, cell) in self.values.iter() {
            if let Some(value) = cell.read().as_ref() {
                stats.mapped_slots += 1;
                if Arc::strong_count(value) > 1 {
                    stats.shared_slots += 1;
                }
                distinct.insert(Arc::as_ptr(value) as usize);
            }
        }

        stats.distinct_values = distinct.len();
        stats
    }

    fn cell(&self, context: &Context) -> CowResult<&SlotCell<T>> {
        self.values
            .get(context.slot().index())
            .ok_or(ContextPtrError::OutOfRange {
                slot: context.slot(),
                capacity: self.values.len(),
            })
    }

    fn grow_to(&self, context: &Context) -> Option<&SlotCell<T>> {
        let index = context.slot().index();
        self.values.expand(index.saturating_add(1));
        let cell = self.values.get(index);
        if cell.is_none() {
            warn!(slot = index, label = self.label(), "Slot index beyond storage limits");
        }
        cell
    }

    fn setup_inner<F>(&self, context: &Context, default: F)
    where
        F: FnOnce() -> Value<T>,
    {
        let Some(cell) = self.grow_to(context) else {
            return;
        };

        let mut slot = cell.write();
        if slot.is_none() {
            *slot = Some(default());
            trace!(
                slot = context.slot().index(),
                label = self.label(),
                "Context set up"
            );
        }
    }

    fn notify(&self, context: &Context, value: &Value<T>) {
        if let Some(callback) = self.callback.load_full() {
            callback.invoke(context, value);
        }
    }

    fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("-")
    }
}

impl<T> std::fmt::Debug for ContextPtr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextPtr")
            .field("label", &self.label)
            .field("stats", &self.stats())
            .field("has_callback", &self.callback.load().is_some())
            .finish()
    }
}
