//! CPU-side quad batching.
//!
//! Every frame the game pushes axis-aligned quads into a `SpriteBatch`; the
//! batch keeps a flat vertex/index list plus a list of draw calls, merging
//! consecutive quads that sample the same texture into one `draw_indexed`.
//! The result is streamed into GPU buffers by `BatchBuffers`.

use std::sync::Arc;

use crate::vertex::SpriteVertex;

/// Texture key for the built-in 1×1 white texture. Solid-colour quads use
/// it with a tint.
pub const WHITE_TEXTURE: &str = "__white";

/// A contiguous run of indices that share one texture binding.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub texture_key: Arc<str>,
    pub index_start: u32,
    pub index_count: u32,
}

/// One quad in canvas space. `uv` is `[u0, v0, u1, v1]`; swapping `u0` and
/// `u1` mirrors the sprite horizontally.
#[derive(Debug, Clone)]
pub struct QuadSpec {
    pub texture_key: Arc<str>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub uv: [f32; 4],
    pub color: [f32; 4],
}

impl QuadSpec {
    /// Untextured rectangle filled with `color`.
    pub fn solid(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Self {
        Self {
            texture_key: Arc::from(WHITE_TEXTURE),
            x,
            y,
            width,
            height,
            uv: [0.0, 0.0, 1.0, 1.0],
            color,
        }
    }
}

#[derive(Debug, Default)]
pub struct SpriteBatch {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Number of bind-group switches the draw list needs.
    pub fn texture_binds(&self) -> usize {
        let mut binds = 0usize;
        let mut current: Option<&str> = None;
        for draw in &self.draw_calls {
            let key: &str = &draw.texture_key;
            if current != Some(key) {
                current = Some(key);
                binds += 1;
            }
        }
        binds
    }

    pub fn push(&mut self, spec: QuadSpec) {
        let base_index = self.vertices.len() as u32;
        let [u0, v0, u1, v1] = spec.uv;
        let left = spec.x;
        let right = spec.x + spec.width;
        let top = spec.y;
        let bottom = spec.y + spec.height;

        self.vertices.extend_from_slice(&[
            SpriteVertex {
                position: [left, top],
                tex_coords: [u0, v0],
                color: spec.color,
            },
            SpriteVertex {
                position: [right, top],
                tex_coords: [u1, v0],
                color: spec.color,
            },
            SpriteVertex {
                position: [right, bottom],
                tex_coords: [u1, v1],
                color: spec.color,
            },
            SpriteVertex {
                position: [left, bottom],
                tex_coords: [u0, v1],
                color: spec.color,
            },
        ]);

        let draw_start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);

        self.push_draw_call(spec.texture_key, draw_start, 6);
    }

    fn push_draw_call(&mut self, texture_key: Arc<str>, index_start: u32, index_count: u32) {
        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == index_start;
            if *last.texture_key == *texture_key && contiguous {
                last.index_count += index_count;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            texture_key,
            index_start,
            index_count,
        });
    }
}

/// GPU vertex/index buffers sized for the largest batch seen so far.
/// Buffers grow (power-of-two) but never shrink.
pub struct BatchBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
}

impl BatchBuffers {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            vertex_buffer: create_vertex_buffer(device, 4),
            index_buffer: create_index_buffer(device, 6),
            vertex_capacity: 4,
            index_capacity: 6,
        }
    }

    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, batch: &SpriteBatch) {
        let needed_vertices = batch.vertices.len().max(1);
        if needed_vertices > self.vertex_capacity {
            self.vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(device, self.vertex_capacity);
        }
        let needed_indices = batch.indices.len().max(1);
        if needed_indices > self.index_capacity {
            self.index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(device, self.index_capacity);
        }

        if !batch.vertices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&batch.vertices));
        }
        if !batch.indices.is_empty() {
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&batch.indices));
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
