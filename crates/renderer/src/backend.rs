use anyhow::Result;

use crate::error::InitError;
use crate::types::EngineConfig;

/// Seam between the engine state machine and a concrete GPU stack.
///
/// The engine never touches wgpu directly; it drives a backend that
/// owns device acquisition, resource construction, and frame
/// submission. The production implementation is
/// [`WgpuBackend`](crate::WgpuBackend); tests substitute a recording
/// fake so the controller, clock, and teardown semantics can be
/// exercised deterministically without a GPU.
pub trait RenderBackend {
    /// Drawable surface the backend can bind to (a window for wgpu,
    /// a plain capability-bearing stub in tests).
    type Surface;
    /// Everything built during `initialize`; dropped on teardown.
    type Resources;

    /// Performs the full initialization sequence: capability probe,
    /// surface context, adapter, device, format selection, mesh
    /// generation, surface configuration, uniform binding, pipeline.
    ///
    /// On failure everything constructed so far must be released;
    /// returning `Err` and relying on drop order satisfies that.
    fn initialize(
        &mut self,
        surface: &Self::Surface,
        config: &EngineConfig,
    ) -> Result<Self::Resources, InitError>;

    /// Mirrors the animation clock into the GPU uniform buffer.
    fn write_clock(&mut self, resources: &mut Self::Resources, seconds: f32);

    /// Encodes and submits one clearing draw pass over the full mesh.
    ///
    /// Steady-state failures here (e.g. the swapchain texture cannot
    /// be acquired) are fatal for the run and must propagate.
    fn submit_frame(&mut self, resources: &mut Self::Resources) -> Result<()>;
}
