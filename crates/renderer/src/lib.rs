//! Rendering engine for a continuously animated, full-viewport
//! gradient mesh.
//!
//! The core is a small state machine driving a `wgpu` pipeline from a
//! single time uniform:
//!
//! ```text
//!   CLI / meshgradient
//!          │ EngineConfig
//!          ▼
//!   run_windowed ──▶ Engine::init ──▶ WgpuBackend ──▶ device/surface
//!          │                                │          mesh + uniform
//!          │                                │          pipeline
//!          └─▶ winit redraw loop ──▶ Engine::render_frame()
//!                                         │ clock tick ─▶ GPU UBO
//!                                         └─▶ one clearing draw pass
//! ```
//!
//! [`Engine`] owns the animation clock and, through the
//! [`RenderBackend`] seam, every GPU resource; the seam exists so the
//! controller's init/start/stop/teardown semantics can be tested with
//! a fake backend while [`WgpuBackend`] supplies the real device. Host
//! frame pacing is external: the driver (windowed preview or a test
//! harness) calls [`Engine::render_frame`] once per refresh for as
//! long as the returned [`FrameOutcome`] asks for more.

mod backend;
mod clock;
mod engine;
mod error;
mod gpu;
mod mesh;
mod types;
mod window;

pub use backend::RenderBackend;
pub use clock::AnimationClock;
pub use engine::{Engine, FrameOutcome};
pub use error::InitError;
pub use gpu::{DrawTarget, GpuResources, WgpuBackend};
pub use mesh::{PlaneMesh, Vertex};
pub use types::{EngineConfig, EngineStatus};
pub use window::run_windowed;
