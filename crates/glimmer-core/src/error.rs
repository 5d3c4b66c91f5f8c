use thiserror::Error;

/// Errors raised by a settings registry.
///
/// The registration-time variants indicate an authoring bug in the static
/// declaration and are meant to abort initialization. `UnknownVariant` is the
/// one recoverable case: it is also returned by runtime ordinal writes, which
/// leave the prior value in place.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid name '{name}': names must be non-empty and must not contain '.'")]
    InvalidName { name: String },

    #[error("duplicate name '{name}' under group '{group}'")]
    DuplicateName { group: String, name: String },

    #[error("default for '{path}' is out of bounds: {value} not in [{min}, {max}]")]
    DefaultOutOfBounds {
        path: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("default for '{path}' is not a finite number")]
    DefaultNotFinite { path: String },

    #[error("default direction for '{path}' has zero length")]
    ZeroLengthDirection { path: String },

    #[error("enum '{enum_name}' has no variant with ordinal {ordinal} (setting '{path}')")]
    UnknownVariant {
        path: String,
        enum_name: &'static str,
        ordinal: u32,
    },
}
