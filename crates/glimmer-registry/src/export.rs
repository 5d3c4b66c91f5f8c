//! Shader-constant export projection.
//!
//! `export_shader_constants` produces, in declaration order, the value of
//! every setting flagged as shader-visible, with declared export scales
//! applied on the way out. `pack_constant_words` lays that sequence out as
//! 32-bit words under HLSL constant-buffer packing rules so the block can be
//! uploaded verbatim as a uniform buffer. The sequence is positionally
//! stable for a given registry build; re-registering settings in a different
//! order changes the layout contract.

use glam::Vec3;

use crate::registry::{Payload, Registry};

/// One exported constant. Bools export as 0/1 words, enums as their ordinal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShaderValue {
    Uint(u32),
    Int(i32),
    Float(f32),
    Vec3(Vec3),
}

/// Declaration-ordered values of every shader-visible setting.
pub fn export_shader_constants(registry: &Registry) -> Vec<ShaderValue> {
    let mut values = Vec::new();
    for handle in registry.handles() {
        let slot = registry.slot(handle);
        if !slot.shader_constant {
            continue;
        }
        let value = match slot.payload {
            Payload::Bool => ShaderValue::Uint(registry.bool(handle) as u32),
            Payload::Float { export_scale, .. } => {
                ShaderValue::Float(registry.float(handle) * export_scale)
            }
            Payload::Int { export_scale, .. } => {
                ShaderValue::Int(registry.int(handle).saturating_mul(export_scale))
            }
            Payload::Color { .. } => ShaderValue::Vec3(registry.color(handle)),
            Payload::Direction => ShaderValue::Vec3(registry.direction(handle)),
            Payload::Enum { .. } => ShaderValue::Int(registry.enum_ordinal(handle) as i32),
            Payload::Trigger => continue,
        };
        values.push(value);
    }
    values
}

/// Packs exported constants into 32-bit words with HLSL cbuffer layout:
/// scalars occupy one word, vec3 values are aligned to a 16-byte register
/// (a following scalar fills the register's fourth word), and the block is
/// padded to a whole register.
pub fn pack_constant_words(values: &[ShaderValue]) -> Vec<u32> {
    let mut words = Vec::new();
    for value in values {
        match *value {
            ShaderValue::Uint(v) => words.push(v),
            ShaderValue::Int(v) => words.push(v as u32),
            ShaderValue::Float(v) => words.push(v.to_bits()),
            ShaderValue::Vec3(v) => {
                while words.len() % 4 != 0 {
                    words.push(0);
                }
                words.extend(v.to_array().map(f32::to_bits));
            }
        }
    }
    while words.len() % 4 != 0 {
        words.push(0);
    }
    words
}

/// Byte size of the packed constant block for the registry's current build.
pub fn packed_byte_size(registry: &Registry) -> u64 {
    pack_constant_words(&export_shader_constants(registry)).len() as u64 * 4
}
