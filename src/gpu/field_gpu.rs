//! GPU-resident point clouds.
//!
//! [`GpuField`] is the renderable bundle for one point cloud: position and
//! color vertex buffers plus a per-object uniform (model transform and point
//! size) with its bind group. [`GpuFieldBackend`] builds and releases them
//! for the field lifecycle.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::error::FieldError;
use crate::generator::ParticleBuffers;
use crate::lifecycle::FieldBackend;
use crate::material::PointMaterial;

/// Per-object uniform block, `@group(1)`.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    size: f32,
    attenuation: f32,
    _padding: [f32; 2],
}

impl ObjectUniforms {
    fn new(model: Mat4, material: &PointMaterial) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            size: material.size,
            attenuation: if material.size_attenuation { 1.0 } else { 0.0 },
            _padding: [0.0; 2],
        }
    }
}

/// One uploaded point cloud.
pub struct GpuField {
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    count: u32,
    material: PointMaterial,
}

impl GpuField {
    /// Number of points drawn.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn material(&self) -> &PointMaterial {
        &self.material
    }

    /// Rewrite the model transform, keeping the material.
    pub(crate) fn set_transform(&self, queue: &wgpu::Queue, model: Mat4) {
        let uniforms = ObjectUniforms::new(model, &self.material);
        queue.write_buffer(&self.object_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    pub(crate) fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        render_pass.set_bind_group(1, &self.object_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.positions.slice(..));
        render_pass.set_vertex_buffer(1, self.colors.slice(..));
        render_pass.draw(0..6, 0..self.count);
    }
}

/// Vertex layouts matching [`GpuField`]'s two buffers.
pub(crate) fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    const POSITION: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    const COLOR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
    [
        wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &POSITION,
        },
        wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &COLOR,
        },
    ]
}

pub(crate) fn object_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Object Bind Group Layout"),
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
    })
}

/// Uploads fields to the GPU.
pub struct GpuFieldBackend<'a> {
    device: &'a wgpu::Device,
    object_layout: &'a wgpu::BindGroupLayout,
}

impl<'a> GpuFieldBackend<'a> {
    pub(crate) fn new(device: &'a wgpu::Device, object_layout: &'a wgpu::BindGroupLayout) -> Self {
        Self {
            device,
            object_layout,
        }
    }

    fn vertex_buffer(&self, label: &str, data: &[f32]) -> wgpu::Buffer {
        // Zero-sized vertex buffers can't be bound; keep one dummy vertex
        let contents: &[f32] = if data.is_empty() { &[0.0; 3] } else { data };
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(contents),
                usage: wgpu::BufferUsages::VERTEX,
            })
    }
}

impl FieldBackend for GpuFieldBackend<'_> {
    type Resource = GpuField;

    fn build(
        &mut self,
        buffers: &ParticleBuffers,
        material: &PointMaterial,
    ) -> Result<GpuField, FieldError> {
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let positions = self.vertex_buffer("Field Positions", &buffers.positions);
        let colors = self.vertex_buffer("Field Colors", &buffers.colors);

        let uniforms = ObjectUniforms::new(Mat4::IDENTITY, material);
        let object_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Field Object Uniforms"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let object_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Field Object Bind Group"),
            layout: self.object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_buffer.as_entire_binding(),
            }],
        });

        let validation = pollster::block_on(self.device.pop_error_scope());
        let out_of_memory = pollster::block_on(self.device.pop_error_scope());
        if let Some(err) = validation.or(out_of_memory) {
            positions.destroy();
            colors.destroy();
            object_buffer.destroy();
            return Err(FieldError::Resource(err.to_string()));
        }

        Ok(GpuField {
            positions,
            colors,
            object_buffer,
            object_bind_group,
            count: buffers.len() as u32,
            material: *material,
        })
    }

    fn release(&mut self, field: &mut GpuField) -> Result<(), FieldError> {
        field.positions.destroy();
        field.colors.destroy();
        field.object_buffer.destroy();
        field.count = 0;
        Ok(())
    }
}
