use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;

use crate::error::InitError;

use super::DrawTarget;

/// The negotiated GPU connection plus the configured presentation
/// surface. Owned by the backend resources; dropping it releases the
/// device, queue, and swapchain.
pub(crate) struct GpuContext {
    pub _instance: wgpu::Instance,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub surface_format: wgpu::TextureFormat,
    pub size: PhysicalSize<u32>,
}

impl GpuContext {
    /// Acquires adapter, device, and a configured surface, mapping
    /// each failing step onto the init error taxonomy.
    ///
    /// wgpu wants the surface before the adapter request (the adapter
    /// must be compatible with it), so the surface is created right
    /// after the capability probe; a failure at any step drops
    /// whatever was built before it.
    pub(crate) fn new<T>(target: &T) -> Result<Self, InitError>
    where
        T: DrawTarget,
    {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: wgpu::InstanceFlags::default(),
            memory_budget_thresholds: wgpu::MemoryBudgetThresholds::default(),
            backend_options: wgpu::BackendOptions::default(),
        });

        // Capability probe: a host with no adapters on any backend has
        // no GPU support at all, which is distinct from "no adapter
        // suitable for this surface" below.
        if instance.enumerate_adapters(wgpu::Backends::all()).is_empty() {
            return Err(InitError::NoGpuSupport);
        }

        let window_handle = target
            .window_handle()
            .map_err(|err| InitError::NoSurfaceContext(format!("no window handle: {err}")))?;
        let display_handle = target
            .display_handle()
            .map_err(|err| InitError::NoSurfaceContext(format!("no display handle: {err}")))?;

        let surface = unsafe {
            instance.create_surface_unsafe(wgpu::SurfaceTargetUnsafe::RawHandle {
                raw_display_handle: display_handle.as_raw(),
                raw_window_handle: window_handle.as_raw(),
            })
        }
        .map_err(|err| InitError::NoSurfaceContext(err.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|err| InitError::NoAdapter(err.to_string()))?;

        let adapter_info = adapter.get_info();
        tracing::debug!(
            name = %adapter_info.name,
            backend = ?adapter_info.backend,
            device_type = ?adapter_info.device_type,
            "selected GPU adapter"
        );

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("mesh gradient device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::default(),
        }))
        .map_err(|err| InitError::NoAdapter(format!("adapter refused device request: {err}")))?;

        let caps = surface.get_capabilities(&adapter);
        // The preferred presentation format is the first one the
        // surface advertises.
        let surface_format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| InitError::NoSurfaceContext("surface offers no formats".into()))?;

        let size = target.surface_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        tracing::debug!(
            ?surface_format,
            width = config.width,
            height = config.height,
            "configured presentation surface"
        );

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            surface_format,
            size,
        })
    }
}
