pub mod decl;
pub mod describe;
pub mod export;
pub mod registry;

pub use decl::{BoolDecl, ColorDecl, DirectionDecl, EnumDecl, FloatDecl, IntDecl, TriggerDecl};
pub use describe::{describe, UiChoice, UiControl, UiGroup, UiNode, UiSetting};
pub use export::{export_shader_constants, pack_constant_words, packed_byte_size, ShaderValue};
pub use registry::{GroupHandle, Registry, SettingHandle};
