//! Enumerated setting types for the renderer schema.
//!
//! Each type carries a static descriptor so profiles store stable variant
//! identifiers while dropdowns show separate display labels.

use glimmer_core::enums::{EnumDescriptor, EnumSetting, EnumVariant};

/// How the sun direction is authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SunDirectionMode {
    UnitVector = 0,
    HorizontalCoord = 1,
}

pub static SUN_DIRECTION_MODE: EnumDescriptor = EnumDescriptor {
    name: "SunDirectionMode",
    variants: &[
        EnumVariant {
            ordinal: 0,
            ident: "UnitVector",
            label: "Unit Vector",
        },
        EnumVariant {
            ordinal: 1,
            ident: "HorizontalCoord",
            label: "Horizontal Coordinate System",
        },
    ],
};

impl EnumSetting for SunDirectionMode {
    const DESCRIPTOR: &'static EnumDescriptor = &SUN_DIRECTION_MODE;

    fn ordinal(self) -> u32 {
        self as u32
    }

    fn from_ordinal(ordinal: u32) -> Option<Self> {
        match ordinal {
            0 => Some(SunDirectionMode::UnitVector),
            1 => Some(SunDirectionMode::HorizontalCoord),
            _ => None,
        }
    }
}

/// MSAA sample count for full-resolution rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MsaaMode {
    Off = 0,
    X2 = 1,
}

pub static MSAA_MODE: EnumDescriptor = EnumDescriptor {
    name: "MsaaMode",
    variants: &[
        EnumVariant {
            ordinal: 0,
            ident: "Off",
            label: "None",
        },
        EnumVariant {
            ordinal: 1,
            ident: "X2",
            label: "2x",
        },
    ],
};

impl EnumSetting for MsaaMode {
    const DESCRIPTOR: &'static EnumDescriptor = &MSAA_MODE;

    fn ordinal(self) -> u32 {
        self as u32
    }

    fn from_ordinal(ordinal: u32) -> Option<Self> {
        match ordinal {
            0 => Some(MsaaMode::Off),
            1 => Some(MsaaMode::X2),
            _ => None,
        }
    }
}

/// Technique used to upscale half-resolution particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum UpsampleMode {
    Msaa = 0,
    NearestDepth = 1,
}

pub static UPSAMPLE_MODE: EnumDescriptor = EnumDescriptor {
    name: "UpsampleMode",
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

impl EnumSetting for UpsampleMode {
    const DESCRIPTOR: &'static EnumDescriptor = &UPSAMPLE_MODE;

    fn ordinal(self) -> u32 {
        self as u32
    }

    fn from_ordinal(ordinal: u32) -> Option<Self> {
        match ordinal {
            0 => Some(UpsampleMode::Msaa),
            1 => Some(UpsampleMode::NearestDepth),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_roundtrip() {
        for mode in [SunDirectionMode::UnitVector, SunDirectionMode::HorizontalCoord] {
            assert_eq!(SunDirectionMode::from_ordinal(mode.ordinal()), Some(mode));
        }
        for mode in [MsaaMode::Off, MsaaMode::X2] {
            assert_eq!(MsaaMode::from_ordinal(mode.ordinal()), Some(mode));
        }
        for mode in [UpsampleMode::Msaa, UpsampleMode::NearestDepth] {
            assert_eq!(UpsampleMode::from_ordinal(mode.ordinal()), Some(mode));
        }
        assert_eq!(MsaaMode::from_ordinal(5), None);
    }

    #[test]
    fn test_labels_differ_from_idents() {
        assert_eq!(MSAA_MODE.label(0), "None");
        assert_eq!(MSAA_MODE.by_ident("Off").expect("declared").ordinal, 0);
        assert_eq!(UPSAMPLE_MODE.label(1), "Nearest-Depth");
    }

    #[test]
    fn test_descriptors_match_variant_count() {
        assert_eq!(SUN_DIRECTION_MODE.variants.len(), 2);
        assert_eq!(MSAA_MODE.variants.len(), 2);
        assert_eq!(UPSAMPLE_MODE.variants.len(), 2);
    }
}
