use glam::Vec3;

/// Semantic type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Bool,
    Float,
    Int,
    /// RGB color. LDR colors are bounded to [0, 1] per channel.
    Color,
    /// Unit-length 3D direction vector.
    Direction,
    /// One ordinal out of a closed set of declared variants.
    Enum,
    /// Momentary action with no persisted value.
    Trigger,
}

impl std::fmt::Display for SettingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SettingKind::Bool => "bool",
            SettingKind::Float => "float",
            SettingKind::Int => "int",
            SettingKind::Color => "color",
            SettingKind::Direction => "direction",
            SettingKind::Enum => "enum",
            SettingKind::Trigger => "trigger",
        };
        f.write_str(name)
    }
}

/// Current value of a setting.
///
/// Enum settings carry their variant ordinal; the descriptor lives in the
/// declaration. Triggers have no stored value and always read as idle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Float(f32),
    Int(i32),
    Color(Vec3),
    Direction(Vec3),
    Enum(u32),
    Trigger,
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::Float(_) => SettingKind::Float,
            SettingValue::Int(_) => SettingKind::Int,
            SettingValue::Color(_) => SettingKind::Color,
            SettingValue::Direction(_) => SettingKind::Direction,
            SettingValue::Enum(_) => SettingKind::Enum,
            SettingValue::Trigger => SettingKind::Trigger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind() {
        assert_eq!(SettingValue::Bool(true).kind(), SettingKind::Bool);
        assert_eq!(SettingValue::Float(1.0).kind(), SettingKind::Float);
        assert_eq!(SettingValue::Int(3).kind(), SettingKind::Int);
        assert_eq!(SettingValue::Color(Vec3::ONE).kind(), SettingKind::Color);
        assert_eq!(
            SettingValue::Direction(Vec3::Y).kind(),
            SettingKind::Direction
        );
        assert_eq!(SettingValue::Enum(0).kind(), SettingKind::Enum);
        assert_eq!(SettingValue::Trigger.kind(), SettingKind::Trigger);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SettingKind::Direction.to_string(), "direction");
        assert_eq!(SettingKind::Trigger.to_string(), "trigger");
    }
}
