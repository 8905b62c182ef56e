use anyhow::Result;
use tracing::debug;

use crate::backend::RenderBackend;
use crate::clock::AnimationClock;
use crate::error::InitError;
use crate::types::{EngineConfig, EngineStatus};

/// What the driver should do after a frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A frame was submitted and the loop is still running; schedule
    /// the next vsync callback.
    Presented,
    /// The loop is stopped; do not reschedule.
    Halted,
}

/// Initialization state machine for the engine's GPU resources.
///
/// A single tagged state instead of per-resource `Option`s: either
/// nothing exists yet, everything exists, or `init` failed and the
/// engine is permanently parked with the error it failed on.
enum EngineState<R> {
    Uninitialized,
    Ready(R),
    Failed(InitError),
}

impl<R> EngineState<R> {
    fn name(&self) -> &'static str {
        match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Ready(_) => "ready",
            EngineState::Failed(_) => "failed",
        }
    }
}

/// Owns the animation clock, the render-loop status, and (through the
/// backend) every GPU resource. The embedder contract is
/// `init` / `start` / `stop` / `render_frame` / `teardown` plus a
/// `status` read; frame pacing itself belongs to the host, which calls
/// [`Engine::render_frame`] once per display refresh for as long as
/// the returned [`FrameOutcome`] asks for more.
pub struct Engine<B: RenderBackend> {
    backend: B,
    config: EngineConfig,
    state: EngineState<B::Resources>,
    status: EngineStatus,
    clock: AnimationClock,
}

impl<B: RenderBackend> Engine<B> {
    /// Creates a stopped, uninitialized engine around the backend.
    pub fn new(backend: B, config: EngineConfig) -> Self {
        let clock = AnimationClock::new(config.animation_speed);
        Self {
            backend,
            config,
            state: EngineState::Uninitialized,
            status: EngineStatus::Stopped,
            clock,
        }
    }

    /// Acquires the device context and builds every GPU resource.
    ///
    /// Callable exactly once per engine instance. On failure the
    /// engine parks in a failed state with no partially-constructed
    /// resources retained; the embedder maps the error to fallback UI
    /// and may construct a fresh engine to retry.
    ///
    /// # Panics
    ///
    /// Panics if called a second time, whatever the first outcome.
    pub fn init(&mut self, surface: &B::Surface) -> Result<(), InitError> {
        assert!(
            matches!(self.state, EngineState::Uninitialized),
            "init() called twice (state is {})",
            self.state.name()
        );

        match self.backend.initialize(surface, &self.config) {
            Ok(resources) => {
                debug!("engine initialized");
                self.state = EngineState::Ready(resources);
                Ok(())
            }
            Err(err) => {
                self.status = EngineStatus::Stopped;
                self.state = EngineState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Begins the render loop: the next `render_frame` call will draw.
    ///
    /// # Panics
    ///
    /// Panics when called before a successful `init`: a programming
    /// error, not a recoverable condition.
    pub fn start(&mut self) {
        assert!(
            matches!(self.state, EngineState::Ready(_)),
            "start() called without a successful init() (state is {})",
            self.state.name()
        );
        self.status = EngineStatus::Running;
    }

    /// Stops scheduling further frames. The in-flight frame, if any,
    /// completes; the clock freezes at its current value.
    ///
    /// # Panics
    ///
    /// Panics when called before a successful `init`.
    pub fn stop(&mut self) {
        assert!(
            matches!(self.state, EngineState::Ready(_)),
            "stop() called without a successful init() (state is {})",
            self.state.name()
        );
        self.status = EngineStatus::Stopped;
    }

    /// Current render-loop status.
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// The error `init` failed with, if it did. Stays set for the
    /// lifetime of the instance; there is no retry path.
    pub fn init_error(&self) -> Option<&InitError> {
        match &self.state {
            EngineState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Advances exactly one frame: clock tick, uniform write, one
    /// clearing draw pass over the full mesh.
    ///
    /// Invocable by a real display-sync driver or by a test harness;
    /// the engine does not own a scheduling primitive. Status is
    /// checked on entry (a stopped engine renders nothing) and again
    /// for the returned outcome, so `stop()` takes effect within one
    /// frame even with callbacks already queued.
    ///
    /// # Panics
    ///
    /// Panics when called while running without a successful `init`.
    pub fn render_frame(&mut self) -> Result<FrameOutcome> {
        if self.status == EngineStatus::Stopped {
            return Ok(FrameOutcome::Halted);
        }

        let EngineState::Ready(resources) = &mut self.state else {
            panic!(
                "render_frame() while running without resources (state is {})",
                self.state.name()
            );
        };

        let seconds = self.clock.advance();
        self.backend.write_clock(resources, seconds);
        self.backend.submit_frame(resources)?;

        if self.status == EngineStatus::Running {
            Ok(FrameOutcome::Presented)
        } else {
            Ok(FrameOutcome::Halted)
        }
    }

    /// Releases the device context and every dependent resource.
    ///
    /// Stop semantics are forced first so no already-queued frame
    /// callback can touch freed resources afterwards. Safe to call in
    /// any state and idempotent: the second call is a no-op.
    pub fn teardown(&mut self) {
        self.status = EngineStatus::Stopped;
        if matches!(self.state, EngineState::Ready(_)) {
            debug!("releasing engine resources");
            self.state = EngineState::Uninitialized;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::mesh::PlaneMesh;

    /// Stand-in for a drawable surface: readable pixel size plus a
    /// host capability bit.
    struct FakeSurface {
        width: u32,
        height: u32,
        gpu_capable: bool,
    }

    impl FakeSurface {
        fn capable(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                gpu_capable: true,
            }
        }
    }

    #[derive(Default)]
    struct BackendLog {
        init_calls: u32,
        mesh_vertex_count: u32,
        clock_writes: Vec<f32>,
        submissions: u32,
        releases: u32,
    }

    /// Recording fake for the GPU seam. Builds the real `PlaneMesh`
    /// so the init-time geometry contract is exercised too.
    struct RecordingBackend {
        log: Rc<RefCell<BackendLog>>,
    }

    struct FakeResources {
        log: Rc<RefCell<BackendLog>>,
    }

    impl Drop for FakeResources {
        fn drop(&mut self) {
            self.log.borrow_mut().releases += 1;
        }
    }

    impl RecordingBackend {
        fn new() -> (Self, Rc<RefCell<BackendLog>>) {
            let log = Rc::new(RefCell::new(BackendLog::default()));
            (Self { log: log.clone() }, log)
        }
    }

    impl RenderBackend for RecordingBackend {
        type Surface = FakeSurface;
        type Resources = FakeResources;

        fn initialize(
            &mut self,
            surface: &FakeSurface,
            config: &EngineConfig,
        ) -> Result<FakeResources, InitError> {
            let mut log = self.log.borrow_mut();
            log.init_calls += 1;
            if !surface.gpu_capable {
                // Capability probe fails before any resource exists.
                return Err(InitError::NoGpuSupport);
            }
            let mesh = PlaneMesh::new(
                surface.width,
                surface.height,
                config.grid_columns,
                config.grid_rows,
            );
            log.mesh_vertex_count = mesh.vertex_count();
            Ok(FakeResources {
                log: self.log.clone(),
            })
        }

        fn write_clock(&mut self, _resources: &mut FakeResources, seconds: f32) {
            self.log.borrow_mut().clock_writes.push(seconds);
        }

        fn submit_frame(&mut self, _resources: &mut FakeResources) -> Result<()> {
            self.log.borrow_mut().submissions += 1;
            Ok(())
        }
    }

    fn engine_with_log() -> (Engine<RecordingBackend>, Rc<RefCell<BackendLog>>) {
        let (backend, log) = RecordingBackend::new();
        (Engine::new(backend, EngineConfig::default()), log)
    }

    #[test]
    fn full_session_renders_and_halts() {
        let (mut engine, log) = engine_with_log();
        let surface = FakeSurface::capable(800, 600);

        engine.init(&surface).expect("init");
        assert_eq!(log.borrow().mesh_vertex_count, 4);
        assert_eq!(engine.status(), EngineStatus::Stopped);

        engine.start();
        assert_eq!(engine.status(), EngineStatus::Running);
        for _ in 0..3 {
            assert_eq!(engine.render_frame().unwrap(), FrameOutcome::Presented);
        }

        {
            let log = log.borrow();
            assert_eq!(log.submissions, 3);
            assert_eq!(log.clock_writes.len(), 3);
            let speed = EngineConfig::default().animation_speed;
            for (frame, pair) in log.clock_writes.windows(2).enumerate() {
                assert!(pair[1] > pair[0], "clock regressed at frame {frame}");
                assert!((pair[1] - pair[0] - speed).abs() < 1e-6);
            }
        }

        engine.stop();
        assert_eq!(engine.render_frame().unwrap(), FrameOutcome::Halted);
        let log = log.borrow();
        assert_eq!(log.submissions, 3, "no draw after stop()");
        assert_eq!(log.clock_writes.len(), 3, "clock frozen after stop()");
    }

    #[test]
    fn init_reports_missing_gpu_support() {
        let (mut engine, log) = engine_with_log();
        let surface = FakeSurface {
            width: 800,
            height: 600,
            gpu_capable: false,
        };

        let err = engine.init(&surface).unwrap_err();
        assert!(matches!(err, InitError::NoGpuSupport));
        assert!(matches!(engine.init_error(), Some(InitError::NoGpuSupport)));
        assert_eq!(engine.status(), EngineStatus::Stopped);
        // No resources were ever constructed, so none were released.
        assert_eq!(log.borrow().releases, 0);
        assert_eq!(log.borrow().mesh_vertex_count, 0);
    }

    #[test]
    fn clock_resumes_after_stop_and_start() {
        let (mut engine, log) = engine_with_log();
        engine.init(&FakeSurface::capable(640, 480)).expect("init");

        engine.start();
        engine.render_frame().unwrap();
        engine.render_frame().unwrap();
        engine.stop();
        let frozen = *log.borrow().clock_writes.last().unwrap();

        engine.start();
        engine.render_frame().unwrap();
        let resumed = *log.borrow().clock_writes.last().unwrap();
        assert!(
            resumed > frozen,
            "clock must continue from its last value, not reset"
        );
        assert!((resumed - frozen - EngineConfig::default().animation_speed).abs() < 1e-6);
    }

    #[test]
    fn teardown_is_idempotent() {
        let (mut engine, log) = engine_with_log();
        engine.init(&FakeSurface::capable(320, 240)).expect("init");

        engine.teardown();
        assert_eq!(log.borrow().releases, 1);
        engine.teardown();
        assert_eq!(log.borrow().releases, 1, "second teardown is a no-op");
    }

    #[test]
    fn teardown_while_running_halts_first() {
        let (mut engine, log) = engine_with_log();
        engine.init(&FakeSurface::capable(320, 240)).expect("init");
        engine.start();
        engine.render_frame().unwrap();

        engine.teardown();
        assert_eq!(engine.status(), EngineStatus::Stopped);
        assert_eq!(log.borrow().releases, 1);
        // A callback that was already queued lands on a stopped engine
        // and must not touch anything.
        assert_eq!(engine.render_frame().unwrap(), FrameOutcome::Halted);
        assert_eq!(log.borrow().submissions, 1);
    }

    #[test]
    fn teardown_before_init_is_safe() {
        let (mut engine, log) = engine_with_log();
        engine.teardown();
        engine.teardown();
        assert_eq!(log.borrow().releases, 0);
    }

    #[test]
    #[should_panic(expected = "start() called without a successful init()")]
    fn start_before_init_panics() {
        let (mut engine, _log) = engine_with_log();
        engine.start();
    }

    #[test]
    #[should_panic(expected = "stop() called without a successful init()")]
    fn stop_before_init_panics() {
        let (mut engine, _log) = engine_with_log();
        engine.stop();
    }

    #[test]
    #[should_panic(expected = "init() called twice")]
    fn init_after_failure_panics() {
        let (mut engine, _log) = engine_with_log();
        let dead = FakeSurface {
            width: 1,
            height: 1,
            gpu_capable: false,
        };
        let _ = engine.init(&dead);
        let _ = engine.init(&FakeSurface::capable(800, 600));
    }
}
