//! wgpu implementation of the [`RenderBackend`](crate::RenderBackend)
//! seam: device/surface negotiation (`context`), the time uniform
//! (`binding`), shader + pipeline assembly (`pipeline`), and the
//! resource bundle with frame submission (`state`).

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;

mod binding;
mod context;
mod pipeline;
mod state;

pub use state::{GpuResources, WgpuBackend};

/// Drawable targets the wgpu backend can bind to: raw window/display
/// handles plus a readable pixel size.
pub trait DrawTarget: HasDisplayHandle + HasWindowHandle {
    fn surface_size(&self) -> PhysicalSize<u32>;
}

impl DrawTarget for winit::window::Window {
    fn surface_size(&self) -> PhysicalSize<u32> {
        self.inner_size()
    }
}
