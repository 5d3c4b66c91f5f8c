use serde::{Deserialize, Serialize};

/// A profile is a flat map of fully-qualified setting names
/// (`GroupPath.Name`) to typed literals. Enum settings are stored by variant
/// identifier, not ordinal, so reordering an enum declaration does not
/// silently change saved profiles. Trigger settings are never persisted.
pub type Profile = std::collections::BTreeMap<String, ProfileValue>;

/// Type-appropriate literal for one persisted setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProfileValue {
    Bool(bool),
    Float(f32),
    Int(i32),
    Color([f32; 3]),
    Direction([f32; 3]),
    Enum(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_value_ron_representation() {
        let options = ron::Options::default();
        let value: ProfileValue = options.from_str("Float(0.27)").expect("should parse");
        assert_eq!(value, ProfileValue::Float(0.27));
        let value: ProfileValue = options
            .from_str(r#"Enum("NearestDepth")"#)
            .expect("should parse");
        assert_eq!(value, ProfileValue::Enum("NearestDepth".to_owned()));
        let value: ProfileValue = options
            .from_str("Direction((0.0, 1.0, 0.0))")
            .expect("should parse");
        assert_eq!(value, ProfileValue::Direction([0.0, 1.0, 0.0]));
    }
}
