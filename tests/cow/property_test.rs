/*!
 * Context Pointer Property Tests
 * Copy-on-write invariants checked over generated slots and payloads
 */

use context_cow::{new_value, Context, ContextPtr, ContextPtrError, Slot};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn ctx(slot: usize) -> Context {
    Context::from_slot(Slot(slot))
}

fn with_counter(ptr: &ContextPtr<i64>) -> Arc<AtomicUsize> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    ptr.set_changed_callback(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    calls
}

proptest! {
    #[test]
    fn setup_materializes_only_unmapped(slot in 0usize..200, first: i64, second: i64) {
        let ptr = ContextPtr::<i64>::new(1);
        let context = ctx(slot);

        ptr.setup_with(&context, new_value(first));
        prop_assert_eq!(*ptr.get(&context).unwrap(), first);

        ptr.setup_with(&context, new_value(second));
        prop_assert_eq!(*ptr.get(&context).unwrap(), first);
    }

    #[test]
    fn repeated_get_mut_copies_once(writes in 1usize..10, aliases in 1usize..6) {
        let ptr = ContextPtr::<i64>::new(aliases + 1);
        let calls = with_counter(&ptr);
        ptr.setup(&ctx(0));
        for alias in 1..=aliases {
            ptr.map(&ctx(0), &ctx(alias));
        }

        for i in 0..writes {
            *ptr.get_mut(&ctx(aliases)).unwrap() = i as i64;
        }

        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
        prop_assert_eq!(*ptr.get(&ctx(aliases)).unwrap(), writes as i64 - 1);
    }

    #[test]
    fn copy_isolates_readers(from in 0usize..64, to in 0usize..64, initial: i64, delta in 1i64..1000) {
        prop_assume!(from != to);
        let ptr = ContextPtr::<i64>::new(1);
        ptr.setup_with(&ctx(from), new_value(initial));
        ptr.map(&ctx(from), &ctx(to));
        prop_assert_eq!(*ptr.get(&ctx(from)).unwrap(), *ptr.get(&ctx(to)).unwrap());

        ptr.write(&ctx(to), |v| *v = v.wrapping_add(delta)).unwrap();

        prop_assert_eq!(*ptr.get(&ctx(from)).unwrap(), initial);
        prop_assert_eq!(*ptr.get(&ctx(to)).unwrap(), initial.wrapping_add(delta));
    }

    #[test]
    fn unmap_clears(slot in 0usize..128, value: i64) {
        let ptr = ContextPtr::<i64>::new(1);
        ptr.setup_with(&ctx(slot), new_value(value));

        ptr.unmap(&ctx(slot));

        prop_assert!(!ptr.is_mapped(&ctx(slot)));
        prop_assert_eq!(
            ptr.get(&ctx(slot)).err(),
            Some(ContextPtrError::Unmapped { slot: Slot(slot) })
        );
    }

    #[test]
    fn apply_same_reference_is_silent(slot in 0usize..64, value: i64, repeats in 1usize..5) {
        let ptr = ContextPtr::<i64>::new(1);
        let shared = new_value(value);
        ptr.apply(shared.clone(), &ctx(slot));
        let calls = with_counter(&ptr);

        for _ in 0..repeats {
            ptr.apply(shared.clone(), &ctx(slot));
        }

        prop_assert_eq!(calls.load(Ordering::SeqCst), 0);
        prop_assert!(Arc::ptr_eq(&ptr.value(&ctx(slot)).unwrap(), &shared));
    }

    #[test]
    fn apply_new_reference_notifies_once(value: i64, exclusive: bool) {
        let ptr = ContextPtr::<i64>::new(2);
        ptr.setup_with(&ctx(0), new_value(value));
        if !exclusive {
            ptr.map(&ctx(0), &ctx(1));
        }
        let calls = with_counter(&ptr);

        ptr.apply(new_value(value), &ctx(0));

        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
