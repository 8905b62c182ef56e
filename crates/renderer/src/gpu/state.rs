use std::marker::PhantomData;

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::backend::RenderBackend;
use crate::error::InitError;
use crate::mesh::PlaneMesh;
use crate::types::EngineConfig;

use super::binding::TimeBinding;
use super::context::GpuContext;
use super::pipeline::build_pipeline;
use super::DrawTarget;

/// Everything `initialize` builds, released as one unit on teardown.
/// Dropping the struct drops buffers and pipeline before the device
/// context they depend on.
pub struct GpuResources {
    context: GpuContext,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    time_binding: TimeBinding,
    pipeline: wgpu::RenderPipeline,
    clear_color: wgpu::Color,
}

/// Production implementation of the GPU seam, parameterized over any
/// drawable target that exposes raw window/display handles and a
/// pixel size (a winit window in practice).
pub struct WgpuBackend<T> {
    _target: PhantomData<fn(&T)>,
}

impl<T> WgpuBackend<T> {
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for WgpuBackend<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DrawTarget> RenderBackend for WgpuBackend<T> {
    type Surface = T;
    type Resources = GpuResources;

    fn initialize(&mut self, surface: &T, config: &EngineConfig) -> Result<GpuResources, InitError> {
        let context = GpuContext::new(surface)?;

        let mesh = PlaneMesh::new(
            context.size.width,
            context.size.height,
            config.grid_columns,
            config.grid_rows,
        );
        let vertex_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("plane mesh vertices"),
                contents: mesh.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("plane mesh strip indices"),
                contents: mesh.index_bytes(),
                usage: wgpu::BufferUsages::INDEX,
            });

        let time_binding = TimeBinding::new(&context.device);
        let pipeline = build_pipeline(
            &context.device,
            context.surface_format,
            &mesh,
            &time_binding.layout,
        )?;

        tracing::debug!(
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            grid = ?mesh.grid(),
            "GPU resources ready"
        );

        let [r, g, b, a] = config.clear_color;
        Ok(GpuResources {
            context,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            time_binding,
            pipeline,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    fn write_clock(&mut self, resources: &mut GpuResources, seconds: f32) {
        resources
            .time_binding
            .write(&resources.context.queue, seconds);
    }

    fn submit_frame(&mut self, resources: &mut GpuResources) -> Result<()> {
        let frame = resources
            .context
            .surface
            .get_current_texture()
            .context("failed to acquire presentable texture")?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            resources
                .context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("frame encoder"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gradient mesh pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(resources.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&resources.pipeline);
            render_pass.set_vertex_buffer(0, resources.vertex_buffer.slice(..));
            render_pass.set_index_buffer(resources.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.set_bind_group(0, &resources.time_binding.bind_group, &[]);
            render_pass.draw_indexed(0..resources.index_count, 0, 0..1);
        }

        resources
            .context
            .queue
            .submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
