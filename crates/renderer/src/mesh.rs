use bytemuck::{Pod, Zeroable};

/// Single vertex of the gradient plane: a 2-D position in normalized
/// device coordinates. Everything else the shader needs (UVs, colors)
/// is derived from the position in the vertex stage.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

/// A rectangular plane subdivided into a grid, covering the full
/// `[-1,1] x [-1,1]` clip-space rectangle regardless of surface size.
///
/// Vertices are stored row-major, `(columns + 1)` per row and
/// `(rows + 1)` rows, top row first. Drawing goes through a strip
/// index buffer: each row band alternates top/bottom vertices column
/// by column, with degenerate stitch indices joining bands, so one
/// triangle-strip draw covers the whole grid for any subdivision. The
/// default single quad yields the strip top-left, bottom-left,
/// top-right, bottom-right: two triangles covering the rectangle with
/// no gap beyond the shared diagonal.
#[derive(Debug, Clone)]
pub struct PlaneMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    pixel_size: (u32, u32),
    columns: u32,
    rows: u32,
}

impl PlaneMesh {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    /// Generates the grid. Subdivision counts below 1 are clamped to 1.
    ///
    /// The pixel dimensions do not affect the normalized output today;
    /// they are retained so a later aspect-aware subdivision can use
    /// them without changing the signature.
    pub fn new(pixel_width: u32, pixel_height: u32, columns: u32, rows: u32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);

        let mut vertices = Vec::with_capacity(((columns + 1) * (rows + 1)) as usize);
        for row in 0..=rows {
            let y = 1.0 - 2.0 * (row as f32 / rows as f32);
            for column in 0..=columns {
                let x = -1.0 + 2.0 * (column as f32 / columns as f32);
                vertices.push(Vertex { position: [x, y] });
            }
        }

        // One strip per row band, top/bottom alternating per column.
        // Repeating the band's last index and the next band's first
        // produces four zero-area triangles that carry the strip into
        // the next band without flipping the winding.
        let stride = columns + 1;
        let mut indices = Vec::with_capacity((rows * 2 * stride + (rows - 1) * 2) as usize);
        for row in 0..rows {
            if row > 0 {
                indices.push(row * stride + columns);
                indices.push(row * stride);
            }
            for column in 0..=columns {
                indices.push(row * stride + column);
                indices.push((row + 1) * stride + column);
            }
        }

        Self {
            vertices,
            indices,
            pixel_size: (pixel_width, pixel_height),
            columns,
            rows,
        }
    }

    /// Number of vertices the draw call must cover.
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Vertex records in draw order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for uploading into a GPU vertex buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of strip indices the draw call must cover.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Triangle-strip indices into [`Self::vertices`], stitch entries
    /// included.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Raw bytes for uploading into a GPU index buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Describes how the vertex records map onto shader inputs.
    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Surface pixel dimensions the mesh was generated for.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.pixel_size
    }

    /// Effective (clamped) subdivision counts.
    pub fn grid(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }
}
