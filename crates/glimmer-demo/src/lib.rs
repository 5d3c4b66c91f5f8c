//! Settings schema of the low-resolution particle renderer demo: sun
//! lighting, sky model, anti-aliasing, scene material defaults, particle
//! system tuning, post-processing, and debug toggles, declared once against
//! the registry and consumed by the inspector UI, the constant-buffer
//! packer, and profile persistence.

pub mod enums;
pub mod schema;

pub use enums::{MsaaMode, SunDirectionMode, UpsampleMode};
pub use schema::{
    build, particle_count, sync_conditional_visibility, RenderSettings, BASE_SUN_SIZE,
    EXPOSURE_RANGE_SCALE, MAX_PARTICLES,
};
