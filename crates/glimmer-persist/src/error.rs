use thiserror::Error;

/// Errors that can occur while saving or loading a settings profile.
///
/// Individual unknown keys, kind mismatches, and out-of-range values never
/// error; they degrade to warnings on the load report. Only an unreadable
/// document does.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to parse settings profile: {0}")]
    Parse(String),

    #[error("failed to serialize settings profile: {0}")]
    Serialize(String),
}
