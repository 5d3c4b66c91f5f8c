use glam::Vec3;
use glimmer_core::value::SettingKind;
use glimmer_registry::Registry;

use crate::error::PersistError;
use crate::format::{Profile, ProfileValue};

/// Result of applying a profile: how many keys took effect and what was
/// skipped. Skips are never fatal — unknown keys come from newer or older
/// builds, and the registry's own write policy handles out-of-range values.
#[derive(Debug)]
pub struct LoadReport {
    pub applied: usize,
    pub warnings: Vec<String>,
}

/// Applies a serialized profile to the registry.
///
/// Unknown keys are ignored, keys absent from the profile keep their current
/// values, and kind mismatches or unknown enum identifiers skip the key.
/// Numeric values pass through the normal clamping setters. Only a document
/// that fails to parse is an error.
pub fn apply_profile(registry: &mut Registry, text: &str) -> Result<LoadReport, PersistError> {
    let options = ron::Options::default();
    let profile: Profile = options
        .from_str(text)
        .map_err(|e| PersistError::Parse(e.to_string()))?;

    let mut report = LoadReport {
        applied: 0,
        warnings: Vec::new(),
    };

    for (path, value) in &profile {
        let Some(handle) = registry.find(path) else {
            warn(&mut report, format!("ignoring unknown setting '{path}'"));
            continue;
        };
        let kind = registry.kind(handle);
        match (value, kind) {
            (ProfileValue::Bool(v), SettingKind::Bool) => {
                registry.set_bool(handle, *v);
                report.applied += 1;
            }
            (ProfileValue::Float(v), SettingKind::Float) => {
                registry.set_float(handle, *v);
                report.applied += 1;
            }
            (ProfileValue::Int(v), SettingKind::Int) => {
                registry.set_int(handle, *v);
                report.applied += 1;
            }
            (ProfileValue::Color(v), SettingKind::Color) => {
                registry.set_color(handle, Vec3::from_array(*v));
                report.applied += 1;
            }
            (ProfileValue::Direction(v), SettingKind::Direction) => {
                registry.set_direction(handle, Vec3::from_array(*v));
                report.applied += 1;
            }
            (ProfileValue::Enum(ident), SettingKind::Enum) => {
                let descriptor = registry
                    .enum_descriptor(handle)
                    .expect("enum kind implies enum payload");
                match descriptor.by_ident(ident) {
                    Some(variant) => {
                        registry
                            .set_enum_ordinal(handle, variant.ordinal)
                            .expect("declared variant");
                        report.applied += 1;
                    }
                    None => warn(
                        &mut report,
                        format!(
                            "'{path}': enum '{}' has no variant '{ident}'",
                            descriptor.name
                        ),
                    ),
                }
            }
            _ => warn(
                &mut report,
                format!("'{path}' is a {kind} setting; profile holds a different kind"),
            ),
        }
    }

    Ok(report)
}

fn warn(report: &mut LoadReport, message: String) {
    log::warn!("{message}");
    report.warnings.push(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::save_profile;
    use glimmer_core::enums::{EnumDescriptor, EnumSetting, EnumVariant};
    use glimmer_registry::{
        BoolDecl, ColorDecl, DirectionDecl, EnumDecl, FloatDecl, IntDecl, SettingHandle,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Upsample {
        Msaa = 0,
        NearestDepth = 1,
    }

    static UPSAMPLE: EnumDescriptor = EnumDescriptor {
        name: "Upsample",
        variants: &[
            EnumVariant {
                ordinal: 0,
                ident: "Msaa",
                label: "MSAA",
            },
            EnumVariant {
                ordinal: 1,
                ident: "NearestDepth",
                label: "Nearest-Depth",
            },
        ],
    };

    impl EnumSetting for Upsample {
        const DESCRIPTOR: &'static EnumDescriptor = &UPSAMPLE;

        fn ordinal(self) -> u32 {
            self as u32
        }

        fn from_ordinal(ordinal: u32) -> Option<Self> {
            match ordinal {
                0 => Some(Upsample::Msaa),
                1 => Some(Upsample::NearestDepth),
                _ => None,
            }
        }
    }

    struct Handles {
        enable_sun: SettingHandle,
        sun_size: SettingHandle,
        sun_tint: SettingHandle,
        sun_direction: SettingHandle,
        num_particles: SettingHandle,
        upsample_mode: SettingHandle,
    }

    fn sample_registry() -> (Registry, Handles) {
        let mut reg = Registry::new();
        let sun = reg.add_group(reg.root(), "SunLight", false).expect("group");
        let enable_sun = reg
            .add_bool(sun, BoolDecl::new("EnableSun", true))
            .expect("setting");
        let sun_size = reg
            .add_float(sun, FloatDecl::new("SunSize", 0.27).min(0.01))
            .expect("setting");
        let sun_tint = reg
            .add_color(sun, ColorDecl::new("SunTintColor", Vec3::ONE))
            .expect("setting");
        let sun_direction = reg
            .add_direction(sun, DirectionDecl::new("SunDirection", Vec3::new(-0.75, 0.977, -0.4)))
            .expect("setting");
        let particles = reg.add_group(reg.root(), "Particles", true).expect("group");
        let num_particles = reg
            .add_int(particles, IntDecl::new("NumParticles", 8).min(0).max(32))
            .expect("setting");
        let upsample_mode = reg
            .add_enum(particles, EnumDecl::new("UpsampleMode", Upsample::Msaa))
            .expect("setting");
        (
            reg,
            Handles {
                enable_sun,
                sun_size,
                sun_tint,
                sun_direction,
                num_particles,
                upsample_mode,
            },
        )
    }

    #[test]
    fn test_profile_roundtrip_preserves_every_value() {
        let (mut reg, h) = sample_registry();
        reg.set_bool(h.enable_sun, false);
        reg.set_float(h.sun_size, 1.25);
        reg.set_color(h.sun_tint, Vec3::new(1.0, 0.5, 0.25));
        reg.set_direction(h.sun_direction, Vec3::new(0.0, 0.0, 1.0));
        reg.set_int(h.num_particles, 17);
        reg.set_enum(h.upsample_mode, Upsample::NearestDepth);

        let text = save_profile(&reg).expect("should serialize");

        let (mut fresh, fh) = sample_registry();
        let report = apply_profile(&mut fresh, &text).expect("should load");
        assert!(report.warnings.is_empty(), "unexpected: {:?}", report.warnings);
        assert_eq!(report.applied, 6);

        assert!(!fresh.bool(fh.enable_sun));
        assert_eq!(fresh.float(fh.sun_size), 1.25);
        assert_eq!(fresh.color(fh.sun_tint), Vec3::new(1.0, 0.5, 0.25));
        assert_eq!(fresh.direction(fh.sun_direction), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(fresh.int(fh.num_particles), 17);
        assert_eq!(fresh.enum_value::<Upsample>(fh.upsample_mode), Upsample::NearestDepth);
    }

    #[test]
    fn test_unknown_key_ignored_without_side_effects() {
        let (mut reg, h) = sample_registry();
        let report = apply_profile(
            &mut reg,
            r#"{ "SunLight.SomeFutureSetting": Float(9.0) }"#,
        )
        .expect("should load");
        assert_eq!(report.applied, 0);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("SomeFutureSetting"));
        // Existing state untouched.
        assert_eq!(reg.float(h.sun_size), 0.27);
    }

    #[test]
    fn test_missing_keys_keep_current_values() {
        let (mut reg, h) = sample_registry();
        reg.set_float(h.sun_size, 2.0);
        let report = apply_profile(&mut reg, r#"{ "SunLight.EnableSun": Bool(false) }"#)
            .expect("should load");
        assert_eq!(report.applied, 1);
        assert!(!reg.bool(h.enable_sun));
        assert_eq!(reg.float(h.sun_size), 2.0);
    }

    #[test]
    fn test_kind_mismatch_skipped() {
        let (mut reg, h) = sample_registry();
        let report = apply_profile(&mut reg, r#"{ "SunLight.SunSize": Bool(true) }"#)
            .expect("should load");
        assert_eq!(report.applied, 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(reg.float(h.sun_size), 0.27);
    }

    #[test]
    fn test_unknown_enum_ident_skipped() {
        let (mut reg, h) = sample_registry();
        let report = apply_profile(
            &mut reg,
            r#"{ "Particles.UpsampleMode": Enum("Bilinear") }"#,
        )
        .expect("should load");
        assert_eq!(report.applied, 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(reg.enum_value::<Upsample>(h.upsample_mode), Upsample::Msaa);
    }

    #[test]
    fn test_loaded_values_clamped() {
        let (mut reg, h) = sample_registry();
        let report = apply_profile(
            &mut reg,
            r#"{ "Particles.NumParticles": Int(500), "SunLight.SunSize": Float(-5.0) }"#,
        )
        .expect("should load");
        assert_eq!(report.applied, 2);
        assert_eq!(reg.int(h.num_particles), 32);
        assert_eq!(reg.float(h.sun_size), 0.01);
    }

    #[test]
    fn test_malformed_profile_rejected() {
        let (mut reg, _) = sample_registry();
        let result = apply_profile(&mut reg, "this is { not RON");
        assert!(matches!(result, Err(PersistError::Parse(_))));
    }
}
