/*!
 * Context Pointer Scenario Tests
 * End-to-end multi-buffering flows through the public API
 */

use context_cow::{
    new_value, Context, ContextPtr, ContextPtrConfig, ContextPtrError, ContextRegistry, CowStats,
    Slot, SlotRegistry, Value,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
struct Frame {
    id: u64,
    objects: Vec<String>,
}

#[test]
fn test_two_slot_divergence() {
    let ptr = ContextPtr::<i32>::new(2);
    let ctx0 = Context::from_slot(Slot(0));
    let ctx1 = Context::from_slot(Slot(1));

    let events: Arc<Mutex<Vec<Slot>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    ptr.set_changed_callback(move |context, _| sink.lock().push(context.slot()));

    ptr.setup_with(&ctx0, new_value(5));
    ptr.map(&ctx0, &ctx1);
    assert_eq!(*ptr.get(&ctx1).unwrap(), 5);

    {
        let mut private = ptr.get_mut(&ctx1).unwrap();
        assert_eq!(*events.lock(), vec![Slot(1)]);
        *private = 6;
    }

    assert_eq!(*ptr.get(&ctx0).unwrap(), 5);
    assert_eq!(*ptr.get(&ctx1).unwrap(), 6);
    assert_eq!(events.lock().len(), 1);
}

#[test]
fn test_registry_driven_pipeline() {
    let registry = ContextRegistry::new();
    let update = registry.main();
    let render = registry.register();
    let present = registry.register();

    let frames = ContextPtr::<Frame>::from_registry(&registry);
    assert_eq!(frames.slot_capacity(), 3);

    frames.setup(&update);
    frames.write(&update, |f| f.objects.push("cube".into())).unwrap();

    // Hand the finished frame down the pipeline
    frames.map(&update, &render);
    frames.map(&render, &present);
    assert_eq!(
        frames.stats(),
        CowStats {
            capacity: 3,
            mapped_slots: 3,
            shared_slots: 3,
            distinct_values: 1,
        }
    );

    // Update starts the next frame without disturbing render/present
    frames
        .write(&update, |f| {
            f.id += 1;
            f.objects.push("sphere".into());
        })
        .unwrap();

    let rendered = frames.read(&render, Frame::clone).unwrap();
    assert_eq!(
        rendered,
        Frame {
            id: 0,
            objects: vec!["cube".to_string()],
        }
    );
    assert_eq!(frames.read(&update, |f| f.objects.len()).unwrap(), 2);
    assert_eq!(frames.stats().distinct_values, 2);
}

#[test]
fn test_late_context_grows_storage() {
    let registry = ContextRegistry::new();
    let frames = ContextPtr::<Frame>::from_registry(&registry);
    frames.setup(&registry.main());

    let late = registry.register();
    assert!(matches!(
        frames.get(&late),
        Err(ContextPtrError::OutOfRange { capacity: 1, .. })
    ));

    frames.setup(&late);
    assert!(frames.is_mapped(&late));
    assert_eq!(frames.slot_capacity(), registry.num_slots());
}

#[test]
fn test_apply_propagates_change_to_other_pointer() {
    // Callback forwards every new value of `source` into `mirror`
    let source = ContextPtr::<u32>::new(2);
    let mirror = Arc::new(ContextPtr::<u32>::new(2));
    let forward = mirror.clone();
    source.set_changed_callback(move |context, value: &Value<u32>| {
        forward.apply(value.clone(), context);
    });

    let ctx0 = Context::from_slot(Slot(0));
    let ctx1 = Context::from_slot(Slot(1));
    source.setup(&ctx0);
    source.map(&ctx0, &ctx1);

    source.write(&ctx1, |v| *v = 11).unwrap();

    assert_eq!(*mirror.get(&ctx1).unwrap(), 11);
    assert!(!mirror.is_mapped(&ctx0));
    // The mirror holds the value too, so the next write copies again
    assert!(source.is_shared(&ctx1));
}

#[test]
fn test_unmapped_errors_are_diagnostics() {
    let ptr = ContextPtr::<u8>::with_config(ContextPtrConfig::double_buffered().with_label("ui"));
    let ctx = Context::from_slot(Slot(1));

    let err = ptr.get_mut(&ctx).err().unwrap();
    assert_eq!(err, ContextPtrError::Unmapped { slot: Slot(1) });
    assert!(err.is_unmapped_access());

    let report = miette::Report::new(err);
    assert!(format!("{:?}", report).contains("setup()"));
}
