//! Uniform buffer holding the packed shader-constant block.
//!
//! The registry's packed layout is fixed once the tree is built, so the
//! buffer is created at init time and refreshed in place each frame — after
//! the frame's writes complete and before any pass samples it. Consumers
//! bind it like any other uniform buffer; this crate owns no pipeline state.

use glimmer_registry::{export_shader_constants, pack_constant_words, packed_byte_size, Registry};

/// Minimum uniform buffer size. An all-trigger or empty registry still gets
/// a bindable buffer of one register.
const MIN_BUFFER_SIZE: u64 = 16;

pub struct SettingsBuffer {
    buffer: wgpu::Buffer,
    size: u64,
}

impl SettingsBuffer {
    /// Creates the buffer sized to the registry's packed layout.
    pub fn new(device: &wgpu::Device, registry: &Registry) -> Self {
        let size = packed_byte_size(registry).max(MIN_BUFFER_SIZE);
        log::info!("SettingsBuffer: {} bytes", size);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("settings-constants"),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer, size }
    }

    /// Re-packs the registry and uploads the block. Call once per frame,
    /// after the frame's settings writes.
    pub fn update(&self, queue: &wgpu::Queue, registry: &Registry) {
        let words = pack_constant_words(&export_shader_constants(registry));
        if !words.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&words));
        }
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn byte_size(&self) -> u64 {
        self.size
    }

    pub fn binding(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }

    /// Bind group layout entry for binding the block at `binding`, visible
    /// to all shader stages.
    pub fn layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::all(),
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_entry_is_uniform() {
        let entry = SettingsBuffer::layout_entry(7);
        assert_eq!(entry.binding, 7);
        assert!(matches!(
            entry.ty,
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                ..
            }
        ));
    }
}
