/// Whether the render loop is scheduling further frames.
///
/// `start()` is the only transition into `Running`; `stop()` (or
/// `teardown()`, which implies it) is the only transition back. The
/// status is checked at the top of every frame and again before the
/// driver is told to reschedule, so a `stop()` lands within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Stopped,
    Running,
}

/// Immutable configuration handed to the engine at construction.
///
/// `EngineConfig` mirrors CLI flags and tells the engine how large the
/// target surface should be, how finely the plane is subdivided, and
/// how fast the animation clock advances per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Window or surface size in physical pixels.
    pub surface_size: (u32, u32),
    /// Plane subdivisions along the horizontal axis (minimum 1).
    pub grid_columns: u32,
    /// Plane subdivisions along the vertical axis (minimum 1).
    pub grid_rows: u32,
    /// Seconds added to the animation clock on every rendered frame.
    pub animation_speed: f32,
    /// Normalized RGBA clear color for the render pass.
    pub clear_color: [f64; 4],
}

impl Default for EngineConfig {
    /// Provides a 1080p single-quad configuration with a slow drift.
    fn default() -> Self {
        Self {
            surface_size: (1920, 1080),
            grid_columns: 1,
            grid_rows: 1,
            animation_speed: 0.01,
            clear_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}
