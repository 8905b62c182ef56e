use std::borrow::Cow;

use crate::error::InitError;
use crate::mesh::PlaneMesh;

/// The shader program is an opaque artifact with two entry points and
/// one vertex-visible uniform; everything here only wires it up.
const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// Compiles the shader module and assembles the render pipeline:
/// vertex stage consuming the plane mesh layout, fragment stage
/// targeting the negotiated surface format, triangle-strip topology,
/// and a pipeline layout matching the time binding exactly.
///
/// Shader compilation and pipeline validation errors surface through a
/// wgpu validation scope and fail `init`; a binding or visibility
/// mismatch is a construction-time failure, never a runtime one.
pub(crate) fn build_pipeline(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    mesh: &PlaneMesh,
    uniform_layout: &wgpu::BindGroupLayout,
) -> Result<wgpu::RenderPipeline, InitError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("gradient mesh shader"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(SHADER_SOURCE)),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("gradient mesh pipeline layout"),
        bind_group_layouts: &[uniform_layout],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("gradient mesh pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some("vs_main"),
            buffers: &[mesh.buffer_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: Some(wgpu::IndexFormat::Uint32),
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview: None,
        cache: None,
    });

    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(InitError::PipelineConstruction(err.to_string()));
    }

    Ok(pipeline)
}
