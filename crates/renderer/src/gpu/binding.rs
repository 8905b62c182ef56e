/// The animation-time uniform: one 4-byte float at binding 0, visible
/// to the vertex stage only, matching the shader contract.
///
/// Buffer, layout, and bind group are coupled: the buffer size is
/// fixed at construction and any future uniform layout change means
/// rebuilding all three together (and the pipeline, whose layout
/// references this one).
pub(crate) struct TimeBinding {
    buffer: wgpu::Buffer,
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl TimeBinding {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("animation time buffer"),
            size: std::mem::size_of::<f32>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("animation time layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("animation time bind group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }

    /// Writes the current clock value; called once per frame before
    /// the draw is encoded.
    pub(crate) fn write(&self, queue: &wgpu::Queue, seconds: f32) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&seconds));
    }
}
