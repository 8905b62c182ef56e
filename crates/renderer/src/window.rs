use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use tracing::{error, info};

use crate::engine::{Engine, FrameOutcome};
use crate::error::InitError;
use crate::gpu::WgpuBackend;
use crate::types::EngineConfig;

/// User-facing explanation for each way `init` can fail; the embedder
/// shows this instead of a blank surface.
fn fallback_message(err: &InitError) -> &'static str {
    match err {
        InitError::NoGpuSupport => "this system does not support GPU rendering",
        InitError::NoAdapter(_) => "no usable graphics adapter was found",
        InitError::NoSurfaceContext(_) => "the window cannot be used as a rendering surface",
        InitError::PipelineConstruction(_) => "the gradient shader failed to build",
    }
}

/// Opens a fixed-size preview window and drives the engine until the
/// window closes: `init` → `start` → one `render_frame` per redraw
/// callback, with `teardown` on the way out.
///
/// The surface is configured with Fifo presentation, so requesting the
/// next redraw immediately after a presented frame paces the loop to
/// the display refresh.
pub fn run_windowed(config: EngineConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let (width, height) = config.surface_size;
    let window = WindowBuilder::new()
        .with_title("Mesh Gradient")
        .with_inner_size(PhysicalSize::new(width.max(1), height.max(1)))
        .with_resizable(false)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    let mut engine = Engine::new(WgpuBackend::new(), config);
    if let Err(err) = engine.init(window.as_ref()) {
        error!(error = %err, "engine initialization failed: {}", fallback_message(&err));
        return Err(err).context("engine initialization failed");
    }
    engine.start();
    info!(width, height, "mesh gradient running");
    window.request_redraw();

    let loop_window = window.clone();
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == loop_window.id() => {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        engine.teardown();
                        elwt.exit();
                    }
                    WindowEvent::RedrawRequested => match engine.render_frame() {
                        // Fifo presentation paces this to the display
                        // refresh, so the next callback is the next vsync.
                        Ok(FrameOutcome::Presented) => loop_window.request_redraw(),
                        Ok(FrameOutcome::Halted) => {}
                        Err(err) => {
                            // Frame-level failure is fatal for the run;
                            // masking it would leave a stale surface.
                            error!(error = %err, "frame submission failed; shutting down");
                            engine.teardown();
                            elwt.exit();
                        }
                    },
                    _ => {}
                }
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}
