/*!
 * Context COW Demo
 *
 * Double-buffered frame pipeline:
 * - Update context writes the next frame's camera
 * - Render context keeps drawing the previous snapshot
 * - Divergence is reported through the changed callback
 */

use anyhow::Result;
use tracing::info;

use context_cow::{
    init_tracing, new_value, ContextPtr, ContextPtrConfig, ContextRegistry, SlotRegistry,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Camera {
    position: [f32; 3],
    fov: f32,
}

fn main() -> Result<()> {
    init_tracing();

    let registry = ContextRegistry::new();
    let update = registry.main();
    let render = registry.register();

    let mut config = ContextPtrConfig::from_env();
    config.initial_slots = config.initial_slots.max(registry.num_slots());
    if config.label.is_none() {
        config = config.with_label("camera");
    }
    let camera = ContextPtr::<Camera>::with_config(config);

    let copies = Arc::new(AtomicUsize::new(0));
    let counter = copies.clone();
    camera.set_changed_callback(move |context, _value| {
        counter.fetch_add(1, Ordering::Relaxed);
        info!(context = %context, "Camera diverged");
    });

    camera.setup_with(
        &update,
        new_value(Camera {
            position: [0.0, 0.0, 5.0],
            fov: 60.0,
        }),
    );

    for frame in 0..3u32 {
        // Render picks up the last finished frame
        camera.map(&update, &render);

        camera.write(&update, |cam| {
            cam.position[2] -= 1.0;
            cam.fov += 2.5;
        })?;

        let drawn = camera.read(&render, |cam| cam.clone())?;
        let next = camera.read(&update, |cam| cam.clone())?;
        info!(
            frame,
            render_z = drawn.position[2],
            update_z = next.position[2],
            update_fov = next.fov,
            "Frame complete"
        );
    }

    info!(copies = copies.load(Ordering::Relaxed), "Pipeline finished");
    println!("{}", serde_json::to_string_pretty(&camera.stats())?);

    Ok(())
}
