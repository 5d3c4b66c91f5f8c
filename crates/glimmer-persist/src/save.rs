use glimmer_core::value::SettingValue;
use glimmer_registry::Registry;

use crate::error::PersistError;
use crate::format::{Profile, ProfileValue};

/// Serializes every setting's current value keyed by its fully-qualified
/// name. Trigger settings carry no value and are skipped.
pub fn save_profile(registry: &Registry) -> Result<String, PersistError> {
    let mut profile = Profile::new();
    for handle in registry.handles() {
        let value = match registry.value(handle) {
            SettingValue::Bool(v) => ProfileValue::Bool(v),
            SettingValue::Float(v) => ProfileValue::Float(v),
            SettingValue::Int(v) => ProfileValue::Int(v),
            SettingValue::Color(v) => ProfileValue::Color(v.to_array()),
            SettingValue::Direction(v) => ProfileValue::Direction(v.to_array()),
            SettingValue::Enum(ordinal) => {
                let descriptor = registry
                    .enum_descriptor(handle)
                    .expect("enum value implies enum payload");
                let variant = descriptor
                    .by_ordinal(ordinal)
                    .expect("ordinal validated at write time");
                ProfileValue::Enum(variant.ident.to_owned())
            }
            SettingValue::Trigger => continue,
        };
        profile.insert(registry.path(handle), value);
    }
    ron::ser::to_string_pretty(&profile, ron::ser::PrettyConfig::default())
        .map_err(|e| PersistError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimmer_registry::{BoolDecl, FloatDecl, TriggerDecl};

    #[test]
    fn test_saved_keys_are_group_qualified() {
        let mut reg = Registry::new();
        let sun = reg.add_group(reg.root(), "SunLight", false).expect("group");
        reg.add_float(sun, FloatDecl::new("SunIntensityScale", 1.0).min(0.0))
            .expect("setting");
        let text = save_profile(&reg).expect("should serialize");
        assert!(text.contains("\"SunLight.SunIntensityScale\""));
        assert!(text.contains("Float(1.0)"));
    }

    #[test]
    fn test_triggers_not_persisted() {
        let mut reg = Registry::new();
        let debug = reg.add_group(reg.root(), "Debug", true).expect("group");
        reg.add_trigger(debug, TriggerDecl::new("TakeScreenshot"))
            .expect("setting");
        reg.add_bool(debug, BoolDecl::new("ShowMsaaEdges", false))
            .expect("setting");
        let text = save_profile(&reg).expect("should serialize");
        assert!(!text.contains("TakeScreenshot"));
        assert!(text.contains("\"Debug.ShowMsaaEdges\""));
    }
}
