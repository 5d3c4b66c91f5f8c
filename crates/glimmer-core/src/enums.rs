/// One declared option of an enumerated setting type.
///
/// `ident` is the stable identifier used in profiles; `label` is the text
/// shown in UI dropdowns and may differ (e.g. ident `Off`, label `"None"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumVariant {
    pub ordinal: u32,
    pub ident: &'static str,
    pub label: &'static str,
}

/// Closed set of integer-backed options for an enumerated setting type.
///
/// Descriptors are `'static` side tables shared by every setting of the same
/// type, keeping wire/storage representation (ordinal, ident) decoupled from
/// presentation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub variants: &'static [EnumVariant],
}

impl EnumDescriptor {
    pub fn contains(&self, ordinal: u32) -> bool {
        self.variants.iter().any(|v| v.ordinal == ordinal)
    }

    pub fn by_ordinal(&self, ordinal: u32) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.ordinal == ordinal)
    }

    pub fn by_ident(&self, ident: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.ident == ident)
    }

    /// Display label for an ordinal. Falls back to the ident, then to "?"
    /// for ordinals that are not declared.
    pub fn label(&self, ordinal: u32) -> &'static str {
        self.by_ordinal(ordinal).map(|v| v.label).unwrap_or("?")
    }
}

/// Binds a Rust enum to its registry descriptor.
///
/// Implementations guarantee that `from_ordinal(v.ordinal())` round-trips for
/// every variant, so a typed value is valid by construction.
pub trait EnumSetting: Copy {
    const DESCRIPTOR: &'static EnumDescriptor;

    fn ordinal(self) -> u32;
    fn from_ordinal(ordinal: u32) -> Option<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_MODE: EnumDescriptor = EnumDescriptor {
        name: "TestMode",
        variants: &[
            EnumVariant {
                ordinal: 0,
                ident: "Off",
                label: "None",
            },
            EnumVariant {
                ordinal: 1,
                ident: "Fast",
                label: "Fast (approximate)",
            },
        ],
    };

    #[test]
    fn test_lookup_by_ordinal() {
        assert!(TEST_MODE.contains(0));
        assert!(TEST_MODE.contains(1));
        assert!(!TEST_MODE.contains(2));
        assert_eq!(TEST_MODE.by_ordinal(1).expect("declared").ident, "Fast");
    }

    #[test]
    fn test_lookup_by_ident() {
        assert_eq!(TEST_MODE.by_ident("Off").expect("declared").ordinal, 0);
        assert!(TEST_MODE.by_ident("None").is_none());
    }

    #[test]
    fn test_label_decoupled_from_ident() {
        assert_eq!(TEST_MODE.label(0), "None");
        assert_eq!(TEST_MODE.label(1), "Fast (approximate)");
        assert_eq!(TEST_MODE.label(7), "?");
    }
}
