//! Per-kind setting declarations.
//!
//! A declaration carries everything the registry needs to validate and store
//! a setting: default value, bounds, step granularity, help text, display
//! name, visibility, and whether the value is exported as a shader constant.
//! Declarations are consumed by the `add_*` registration calls on
//! [`crate::Registry`].

use glam::Vec3;
use glimmer_core::enums::EnumSetting;

/// Metadata shared by every setting kind.
#[derive(Debug, Clone)]
pub(crate) struct Meta {
    pub name: String,
    pub display_name: Option<String>,
    pub help: String,
    pub visible: bool,
    pub shader_constant: bool,
}

impl Meta {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            display_name: None,
            help: String::new(),
            visible: true,
            shader_constant: true,
        }
    }
}

macro_rules! meta_builders {
    () => {
        /// UI display name, when it should differ from the registered name.
        pub fn display(mut self, display_name: &str) -> Self {
            self.meta.display_name = Some(display_name.to_owned());
            self
        }

        /// Help text shown as a tooltip in the inspector.
        pub fn help(mut self, help: &str) -> Self {
            self.meta.help = help.to_owned();
            self
        }

        /// Whether the setting appears in UI descriptors. Hidden settings are
        /// still exported and persisted.
        pub fn visible(mut self, visible: bool) -> Self {
            self.meta.visible = visible;
            self
        }

        /// Whether the value is included in the shader-constant export.
        pub fn shader_constant(mut self, shader_constant: bool) -> Self {
            self.meta.shader_constant = shader_constant;
            self
        }
    };
}

#[derive(Debug, Clone)]
pub struct BoolDecl {
    pub(crate) meta: Meta,
    pub(crate) default: bool,
}

impl BoolDecl {
    pub fn new(name: &str, default: bool) -> Self {
        Self {
            meta: Meta::new(name),
            default,
        }
    }

    meta_builders!();
}

#[derive(Debug, Clone)]
pub struct FloatDecl {
    pub(crate) meta: Meta,
    pub(crate) default: f32,
    pub(crate) min: f32,
    pub(crate) max: f32,
    pub(crate) step: f32,
    pub(crate) export_scale: f32,
}

impl FloatDecl {
    pub fn new(name: &str, default: f32) -> Self {
        Self {
            meta: Meta::new(name),
            default,
            min: f32::MIN,
            max: f32::MAX,
            step: 0.01,
            export_scale: 1.0,
        }
    }

    pub fn min(mut self, min: f32) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: f32) -> Self {
        self.max = max;
        self
    }

    /// UI increment granularity. Defaults to 0.01.
    pub fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Multiplier applied at shader-constant export time. The stored value
    /// stays in the authored range (e.g. an exposure-range scale that brings
    /// lighting values into fp16-safe territory).
    pub fn export_scale(mut self, export_scale: f32) -> Self {
        self.export_scale = export_scale;
        self
    }

    meta_builders!();
}

#[derive(Debug, Clone)]
pub struct IntDecl {
    pub(crate) meta: Meta,
    pub(crate) default: i32,
    pub(crate) min: i32,
    pub(crate) max: i32,
    pub(crate) export_scale: i32,
}

impl IntDecl {
    pub fn new(name: &str, default: i32) -> Self {
        Self {
            meta: Meta::new(name),
            default,
            min: i32::MIN,
            max: i32::MAX,
            export_scale: 1,
        }
    }

    pub fn min(mut self, min: i32) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: i32) -> Self {
        self.max = max;
        self
    }

    /// Multiplier applied at shader-constant export time (e.g. a count
    /// authored in increments of 1024).
    pub fn export_scale(mut self, export_scale: i32) -> Self {
        self.export_scale = export_scale;
        self
    }

    meta_builders!();
}

#[derive(Debug, Clone)]
pub struct ColorDecl {
    pub(crate) meta: Meta,
    pub(crate) default: Vec3,
    pub(crate) hdr: bool,
}

impl ColorDecl {
    pub fn new(name: &str, default: Vec3) -> Self {
        Self {
            meta: Meta::new(name),
            default,
            hdr: false,
        }
    }

    /// HDR colors are only bounded below (channels >= 0); LDR colors are
    /// clamped to [0, 1] per channel.
    pub fn hdr(mut self, hdr: bool) -> Self {
        self.hdr = hdr;
        self
    }

    meta_builders!();
}

#[derive(Debug, Clone)]
pub struct DirectionDecl {
    pub(crate) meta: Meta,
    pub(crate) default: Vec3,
}

impl DirectionDecl {
    /// The default is normalized at registration; a zero-length default is a
    /// registration error.
    pub fn new(name: &str, default: Vec3) -> Self {
        Self {
            meta: Meta::new(name),
            default,
        }
    }

    meta_builders!();
}

#[derive(Debug, Clone)]
pub struct EnumDecl<T: EnumSetting> {
    pub(crate) meta: Meta,
    pub(crate) default: T,
}

impl<T: EnumSetting> EnumDecl<T> {
    pub fn new(name: &str, default: T) -> Self {
        Self {
            meta: Meta::new(name),
            default,
        }
    }

    meta_builders!();
}

/// Momentary action setting. Has no stored value, is never persisted, and is
/// never exported as a shader constant.
#[derive(Debug, Clone)]
pub struct TriggerDecl {
    pub(crate) meta: Meta,
}

impl TriggerDecl {
    pub fn new(name: &str) -> Self {
        let mut meta = Meta::new(name);
        meta.shader_constant = false;
        Self { meta }
    }

    /// UI display name, when it should differ from the registered name.
    pub fn display(mut self, display_name: &str) -> Self {
        self.meta.display_name = Some(display_name.to_owned());
        self
    }

    /// Help text shown as a tooltip in the inspector.
    pub fn help(mut self, help: &str) -> Self {
        self.meta.help = help.to_owned();
        self
    }

    /// Whether the trigger's button appears in UI descriptors.
    pub fn visible(mut self, visible: bool) -> Self {
        self.meta.visible = visible;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_decl_defaults() {
        let decl = FloatDecl::new("FilterSize", 2.0);
        assert_eq!(decl.min, f32::MIN);
        assert_eq!(decl.max, f32::MAX);
        assert_eq!(decl.step, 0.01);
        assert_eq!(decl.export_scale, 1.0);
        assert!(decl.meta.visible);
        assert!(decl.meta.shader_constant);
    }

    #[test]
    fn test_builder_chain() {
        let decl = FloatDecl::new("SunSize", 0.27)
            .min(0.01)
            .step(0.001)
            .display("Sun Size")
            .help("Angular radius of the sun in degrees")
            .shader_constant(false);
        assert_eq!(decl.min, 0.01);
        assert_eq!(decl.step, 0.001);
        assert_eq!(decl.meta.display_name.as_deref(), Some("Sun Size"));
        assert!(!decl.meta.shader_constant);
    }

    #[test]
    fn test_trigger_never_a_shader_constant() {
        let decl = TriggerDecl::new("TakeScreenshot");
        assert!(!decl.meta.shader_constant);
    }
}
