//! The renderer settings declaration.
//!
//! Declaration order is load-bearing: it defines the shader-constant export
//! layout, so new settings go at the end of their group and groups are never
//! reordered.

use glam::Vec3;
use glimmer_core::error::RegistryError;
use glimmer_registry::{
    BoolDecl, ColorDecl, DirectionDecl, EnumDecl, FloatDecl, IntDecl, Registry, SettingHandle,
    TriggerDecl,
};

use crate::enums::{MsaaMode, SunDirectionMode, UpsampleMode};

/// Scale factor for bringing lighting values down into a range suitable for
/// fp16 storage. Equal to 2^-10. Applied as an export scale where a shader
/// consumes a luminance-range value.
pub const EXPOSURE_RANGE_SCALE: f32 = 0.0009765625;

/// Angular radius of the sun in degrees, as seen from Earth.
pub const BASE_SUN_SIZE: f32 = 0.27;

/// Particle count ceiling; NumParticles is authored in increments of 1024.
pub const MAX_PARTICLES: i32 = 32 * 1024;

/// Handles for every registered setting, in declaration order.
pub struct RenderSettings {
    pub enable_sun: SettingHandle,
    pub sun_area_light_approximation: SettingHandle,
    pub sun_tint_color: SettingHandle,
    pub sun_intensity_scale: SettingHandle,
    pub sun_size: SettingHandle,
    pub normalize_sun_intensity: SettingHandle,
    pub sun_dir_type: SettingHandle,
    pub sun_direction: SettingHandle,
    pub sun_azimuth: SettingHandle,
    pub sun_elevation: SettingHandle,

    pub turbidity: SettingHandle,
    pub ground_albedo: SettingHandle,

    pub msaa_mode: SettingHandle,
    pub filter_size: SettingHandle,

    pub enable_albedo_maps: SettingHandle,
    pub enable_normal_maps: SettingHandle,
    pub normal_map_intensity: SettingHandle,
    pub diffuse_intensity: SettingHandle,
    pub roughness: SettingHandle,
    pub specular_intensity: SettingHandle,

    pub num_particles: SettingHandle,
    pub emit_radius: SettingHandle,
    pub emit_center_x: SettingHandle,
    pub emit_center_y: SettingHandle,
    pub emit_center_z: SettingHandle,
    pub rotation_speed: SettingHandle,
    pub absorption_scale: SettingHandle,
    pub sort_particles: SettingHandle,
    pub enable_particle_albedo_map: SettingHandle,
    pub billboard_particles: SettingHandle,
    pub render_low_res: SettingHandle,
    pub upsample_mode: SettingHandle,
    pub resolve_sub_pixel_threshold: SettingHandle,
    pub composite_sub_pixel_threshold: SettingHandle,
    pub programmable_sample_points: SettingHandle,
    pub nearest_depth_threshold: SettingHandle,

    pub bloom_exposure: SettingHandle,
    pub bloom_magnitude: SettingHandle,
    pub bloom_blur_sigma: SettingHandle,

    pub enable_vsync: SettingHandle,
    pub take_screenshot: SettingHandle,
    pub show_msaa_edges: SettingHandle,
}

/// Builds the full settings tree. Registration failures are authoring bugs;
/// callers abort startup on error.
pub fn build() -> Result<(Registry, RenderSettings), RegistryError> {
    let mut reg = Registry::new();
    let root = reg.root();

    let sun = reg.add_group(root, "SunLight", false)?;
    let enable_sun = reg.add_bool(sun, BoolDecl::new("EnableSun", true).help("Enables the sun light"))?;
    let sun_area_light_approximation = reg.add_bool(
        sun,
        BoolDecl::new("SunAreaLightApproximation", true)
            .help("Treats the sun as a disc area light in the real-time shader"),
    )?;
    let sun_tint_color = reg.add_color(
        sun,
        ColorDecl::new("SunTintColor", Vec3::ONE).help("The color of the sun"),
    )?;
    let sun_intensity_scale = reg.add_float(
        sun,
        FloatDecl::new("SunIntensityScale", 1.0)
            .min(0.0)
            .help("Scales the intensity of the sun"),
    )?;
    let sun_size = reg.add_float(
        sun,
        FloatDecl::new("SunSize", BASE_SUN_SIZE)
            .min(0.01)
            .step(0.001)
            .help("Angular radius of the sun in degrees"),
    )?;
    let normalize_sun_intensity = reg.add_bool(
        sun,
        BoolDecl::new("NormalizeSunIntensity", false).shader_constant(false),
    )?;
    let sun_dir_type = reg.add_enum(
        sun,
        EnumDecl::new("SunDirType", SunDirectionMode::UnitVector)
            .help("Input direction type for the sun"),
    )?;
    let sun_direction = reg.add_direction(
        sun,
        DirectionDecl::new("SunDirection", Vec3::new(-0.75, 0.977, -0.4))
            .help("Direction of the sun"),
    )?;
    let sun_azimuth = reg.add_float(
        sun,
        FloatDecl::new("SunAzimuth", 0.0)
            .min(0.0)
            .max(360.0)
            .help("Angle around the horizon"),
    )?;
    let sun_elevation = reg.add_float(
        sun,
        FloatDecl::new("SunElevation", 0.0)
            .min(0.0)
            .max(90.0)
            .help("Elevation of the sun above the ground. 0 degrees is on the horizon, 90 degrees is directly overhead"),
    )?;

    let sky = reg.add_group(root, "Sky", false)?;
    let turbidity = reg.add_float(
        sky,
        FloatDecl::new("Turbidity", 2.0)
            .min(1.0)
            .max(10.0)
            .shader_constant(false)
            .help("Atmospheric turbidity (thickness) used by the procedural sun and sky model"),
    )?;
    let ground_albedo = reg.add_color(
        sky,
        ColorDecl::new("GroundAlbedo", Vec3::splat(0.5))
            .shader_constant(false)
            .help("Ground albedo color used by the procedural sun and sky model"),
    )?;

    let aa = reg.add_group(root, "AntiAliasing", false)?;
    let msaa_mode = reg.add_enum(
        aa,
        EnumDecl::new("MsaaMode", MsaaMode::Off)
            .help("MSAA mode to use for full-resolution rendering"),
    )?;
    let filter_size = reg.add_float(
        aa,
        FloatDecl::new("FilterSize", 2.0)
            .min(0.0)
            .max(6.0)
            .step(0.01)
            .help("Filter radius for the MSAA resolve"),
    )?;

    let scene = reg.add_group(root, "Scene", false)?;
    let enable_albedo_maps = reg.add_bool(
        scene,
        BoolDecl::new("EnableAlbedoMaps", true)
            .display("Enable Albedo Maps")
            .help("Enables albedo maps"),
    )?;
    let enable_normal_maps = reg.add_bool(
        scene,
        BoolDecl::new("EnableNormalMaps", true)
            .display("Enable Normal Maps")
            .help("Enables normal maps"),
    )?;
    let normal_map_intensity = reg.add_float(
        scene,
        FloatDecl::new("NormalMapIntensity", 0.5)
            .min(0.0)
            .max(1.0)
            .step(0.01)
            .display("Normal Map Intensity")
            .help("Intensity of the normal map"),
    )?;
    let diffuse_intensity = reg.add_float(
        scene,
        FloatDecl::new("DiffuseIntensity", 0.75)
            .min(0.0)
            .max(1.0)
            .step(0.001)
            .display("Diffuse Intensity")
            .help("Diffuse albedo intensity parameter for the material"),
    )?;
    let roughness = reg.add_float(
        scene,
        FloatDecl::new("Roughness", 0.25)
            .min(0.001)
            .max(1.0)
            .step(0.001)
            .display("Specular Roughness")
            .help("Specular roughness parameter for the material"),
    )?;
    let specular_intensity = reg.add_float(
        scene,
        FloatDecl::new("SpecularIntensity", 0.04)
            .min(0.0)
            .max(1.0)
            .step(0.001)
            .display("Specular Intensity")
            .help("Specular intensity parameter for the material"),
    )?;

    let particles = reg.add_group(root, "Particles", true)?;
    let num_particles = reg.add_int(
        particles,
        IntDecl::new("NumParticles", 8)
            .min(0)
            .max(MAX_PARTICLES / 1024)
            .display("Num Particles (x1024)")
            .help("The number of particles to render, in increments of 1024"),
    )?;
    let emit_radius = reg.add_float(
        particles,
        FloatDecl::new("EmitRadius", 2.0)
            .min(0.01)
            .step(0.01)
            .help("The radius in which to emit particles"),
    )?;
    let emit_center_x = reg.add_float(
        particles,
        FloatDecl::new("EmitCenterX", 0.0)
            .step(0.01)
            .help("The X coordinate of the point particles are emitted from"),
    )?;
    let emit_center_y = reg.add_float(
        particles,
        FloatDecl::new("EmitCenterY", 2.5)
            .step(0.01)
            .help("The Y coordinate of the point particles are emitted from"),
    )?;
    let emit_center_z = reg.add_float(
        particles,
        FloatDecl::new("EmitCenterZ", 0.0)
            .step(0.01)
            .help("The Z coordinate of the point particles are emitted from"),
    )?;
    let rotation_speed = reg.add_float(
        particles,
        FloatDecl::new("RotationSpeed", 0.5)
            .min(0.0)
            .shader_constant(false)
            .help("How fast the particles rotate around the emitter center"),
    )?;
    let absorption_scale = reg.add_float(
        particles,
        FloatDecl::new("AbsorptionScale", 1.0)
            .min(0.0)
            .help("Scales the absorption coefficient used for particle self-shadowing"),
    )?;
    let sort_particles = reg.add_bool(
        particles,
        BoolDecl::new("SortParticles", true)
            .shader_constant(false)
            .help("Sorts particles by depth each frame"),
    )?;
    let enable_particle_albedo_map = reg.add_bool(
        particles,
        BoolDecl::new("EnableParticleAlbedoMap", true)
            .help("Samples an albedo map in the particle pixel shader"),
    )?;
    let billboard_particles = reg.add_bool(
        particles,
        BoolDecl::new("BillboardParticles", true)
            .help("Billboards particles towards the camera"),
    )?;
    let render_low_res = reg.add_bool(
        particles,
        BoolDecl::new("RenderLowRes", true)
            .display("Render Low-Res")
            .help("Renders the particles at half resolution"),
    )?;
    let upsample_mode = reg.add_enum(
        particles,
        EnumDecl::new("UpsampleMode", UpsampleMode::Msaa)
            .help("Technique used to upscale particles from half resolution"),
    )?;
    let resolve_sub_pixel_threshold = reg.add_float(
        particles,
        FloatDecl::new("ResolveSubPixelThreshold", 0.025)
            .min(0.0)
            .max(1.0)
            .step(0.001)
            .display("Resolve Sub-Pixel Threshold")
            .help("Threshold used during the low-resolution resolve to find pixels containing sub-pixel edges"),
    )?;
    let composite_sub_pixel_threshold = reg.add_float(
        particles,
        FloatDecl::new("CompositeSubPixelThreshold", 0.1)
            .min(0.0)
            .max(1.0)
            .step(0.001)
            .display("Composite Sub-Pixel Threshold")
            .help("Threshold used during the low-resolution composite to find pixels containing sub-pixel edges"),
    )?;
    let programmable_sample_points = reg.add_bool(
        particles,
        BoolDecl::new("ProgrammableSamplePoints", true)
            .visible(false)
            .shader_constant(false)
            .help("Uses programmable sample positions when rendering low-resolution particles in MSAA mode"),
    )?;
    let nearest_depth_threshold = reg.add_float(
        particles,
        FloatDecl::new("NearestDepthThreshold", 0.25)
            .min(0.0)
            .max(100.0)
            .step(0.01)
            .display("Nearest-Depth Threshold")
            .help("Depth threshold to use for nearest-depth upsampling"),
    )?;

    let post = reg.add_group(root, "PostProcessing", false)?;
    let bloom_exposure = reg.add_float(
        post,
        FloatDecl::new("BloomExposure", -4.0)
            .min(-10.0)
            .max(0.0)
            .step(0.01)
            .display("Bloom Exposure Offset")
            .help("Exposure offset applied to generate the input of the bloom pass"),
    )?;
    let bloom_magnitude = reg.add_float(
        post,
        FloatDecl::new("BloomMagnitude", 1.0)
            .min(0.0)
            .max(2.0)
            .step(0.01)
            .display("Bloom Magnitude")
            .help("Scale factor applied to the bloom results when combined with the tone-mapped result"),
    )?;
    let bloom_blur_sigma = reg.add_float(
        post,
        FloatDecl::new("BloomBlurSigma", 2.5)
            .min(0.5)
            .max(2.5)
            .step(0.01)
            .display("Bloom Blur Sigma")
            .help("Sigma parameter of the Gaussian filter used in the bloom pass"),
    )?;

    let debug = reg.add_group(root, "Debug", true)?;
    let enable_vsync = reg.add_bool(
        debug,
        BoolDecl::new("EnableVSync", true)
            .shader_constant(false)
            .display("Enable VSync")
            .help("Enables vertical sync during presentation"),
    )?;
    let take_screenshot = reg.add_trigger(
        debug,
        TriggerDecl::new("TakeScreenshot")
            .display("Take Screenshot")
            .help("Captures the screen output (before HUD rendering) and saves it to a file"),
    )?;
    let show_msaa_edges = reg.add_bool(
        debug,
        BoolDecl::new("ShowMsaaEdges", false)
            .display("Show MSAA Edges")
            .help("When using the MSAA upsample mode, shows pixels that use sub-pixel data"),
    )?;

    let handles = RenderSettings {
        enable_sun,
        sun_area_light_approximation,
        sun_tint_color,
        sun_intensity_scale,
        sun_size,
        normalize_sun_intensity,
        sun_dir_type,
        sun_direction,
        sun_azimuth,
        sun_elevation,
        turbidity,
        ground_albedo,
        msaa_mode,
        filter_size,
        enable_albedo_maps,
        enable_normal_maps,
        normal_map_intensity,
        diffuse_intensity,
        roughness,
        specular_intensity,
        num_particles,
        emit_radius,
        emit_center_x,
        emit_center_y,
        emit_center_z,
        rotation_speed,
        absorption_scale,
        sort_particles,
        enable_particle_albedo_map,
        billboard_particles,
        render_low_res,
        upsample_mode,
        resolve_sub_pixel_threshold,
        composite_sub_pixel_threshold,
        programmable_sample_points,
        nearest_depth_threshold,
        bloom_exposure,
        bloom_magnitude,
        bloom_blur_sigma,
        enable_vsync,
        take_screenshot,
        show_msaa_edges,
    };
    Ok((reg, handles))
}

/// Re-derives panel visibility from the current direction-input and upsample
/// modes. Call once per frame before building the UI.
pub fn sync_conditional_visibility(
    reg: &mut Registry,
    settings: &RenderSettings,
    programmable_samples_supported: bool,
) {
    let dir_mode = reg.enum_value::<SunDirectionMode>(settings.sun_dir_type);
    reg.set_visible(
        settings.sun_direction,
        dir_mode == SunDirectionMode::UnitVector,
    );
    reg.set_visible(
        settings.sun_azimuth,
        dir_mode == SunDirectionMode::HorizontalCoord,
    );
    reg.set_visible(
        settings.sun_elevation,
        dir_mode == SunDirectionMode::HorizontalCoord,
    );

    let upsample = reg.enum_value::<UpsampleMode>(settings.upsample_mode);
    reg.set_visible(
        settings.nearest_depth_threshold,
        upsample == UpsampleMode::NearestDepth,
    );
    reg.set_visible(
        settings.resolve_sub_pixel_threshold,
        upsample == UpsampleMode::Msaa,
    );
    reg.set_visible(
        settings.composite_sub_pixel_threshold,
        upsample == UpsampleMode::Msaa,
    );
    reg.set_visible(settings.show_msaa_edges, upsample == UpsampleMode::Msaa);
    reg.set_visible(
        settings.programmable_sample_points,
        programmable_samples_supported && upsample == UpsampleMode::Msaa,
    );
}

/// Total particle count: the stored setting is authored in units of 1024.
pub fn particle_count(reg: &Registry, settings: &RenderSettings) -> u32 {
    reg.int(settings.num_particles) as u32 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimmer_persist::{apply_profile, save_profile};
    use glimmer_registry::{describe, export_shader_constants, pack_constant_words, ShaderValue, UiNode};

    #[test]
    fn test_schema_builds() {
        let (reg, settings) = build().expect("schema should register");
        assert_eq!(reg.len(), 42);
        assert_eq!(reg.float(settings.sun_size), BASE_SUN_SIZE);
        assert_eq!(reg.path(settings.sun_intensity_scale), "SunLight.SunIntensityScale");
        assert_eq!(
            reg.find("Particles.NumParticles"),
            Some(settings.num_particles)
        );
    }

    #[test]
    fn test_sun_size_clamps_to_minimum() {
        let (mut reg, settings) = build().expect("schema should register");
        assert_eq!(reg.set_float(settings.sun_size, -5.0), 0.01);
        assert_eq!(reg.float(settings.sun_size), 0.01);
    }

    #[test]
    fn test_export_layout_is_stable() {
        let (reg, _) = build().expect("schema should register");
        let exported = export_shader_constants(&reg);
        assert_eq!(exported.len(), 34);
        // EnableSun leads the block.
        assert_eq!(exported[0], ShaderValue::Uint(1));
        // SunTintColor is the first vector.
        assert!(matches!(exported[2], ShaderValue::Vec3(_)));
        // NumParticles exports raw at its declared position; the x1024
        // conversion belongs to the consumer.
        assert_eq!(exported[17], ShaderValue::Int(8));
        // ShowMsaaEdges closes the block.
        assert_eq!(exported[33], ShaderValue::Uint(0));
    }

    #[test]
    fn test_packed_block_matches_register_layout() {
        let (reg, _) = build().expect("schema should register");
        let words = pack_constant_words(&export_shader_constants(&reg));
        // Two vec3 values (tint at word 4, direction at word 12) force
        // register alignment; the block rounds up to 44 words.
        assert_eq!(words.len(), 44);
        assert_eq!(words[4], 1.0f32.to_bits());
        assert_eq!(words[8], BASE_SUN_SIZE.to_bits());
    }

    #[test]
    fn test_conditional_visibility_follows_modes() {
        let (mut reg, settings) = build().expect("schema should register");
        sync_conditional_visibility(&mut reg, &settings, false);
        assert!(reg.visible(settings.sun_direction));
        assert!(!reg.visible(settings.sun_azimuth));
        assert!(!reg.visible(settings.nearest_depth_threshold));
        assert!(reg.visible(settings.resolve_sub_pixel_threshold));
        assert!(!reg.visible(settings.programmable_sample_points));

        reg.set_enum(settings.sun_dir_type, SunDirectionMode::HorizontalCoord);
        reg.set_enum(settings.upsample_mode, UpsampleMode::NearestDepth);
        sync_conditional_visibility(&mut reg, &settings, true);
        assert!(!reg.visible(settings.sun_direction));
        assert!(reg.visible(settings.sun_azimuth));
        assert!(reg.visible(settings.sun_elevation));
        assert!(reg.visible(settings.nearest_depth_threshold));
        assert!(!reg.visible(settings.resolve_sub_pixel_threshold));
        assert!(!reg.visible(settings.show_msaa_edges));
        assert!(!reg.visible(settings.programmable_sample_points));

        reg.set_enum(settings.upsample_mode, UpsampleMode::Msaa);
        sync_conditional_visibility(&mut reg, &settings, true);
        assert!(reg.visible(settings.programmable_sample_points));
    }

    #[test]
    fn test_hidden_settings_absent_from_descriptors() {
        let (reg, _) = build().expect("schema should register");
        fn names(nodes: &[UiNode], out: &mut Vec<String>) {
            for node in nodes {
                match node {
                    UiNode::Group(g) => names(&g.children, out),
                    UiNode::Setting(s) => out.push(s.name.clone()),
                }
            }
        }
        let mut flat = Vec::new();
        names(&describe(&reg), &mut flat);
        assert_eq!(flat.len(), 41);
        assert!(!flat.contains(&"ProgrammableSamplePoints".to_owned()));
        assert!(flat.contains(&"TakeScreenshot".to_owned()));
    }

    #[test]
    fn test_full_profile_roundtrip() {
        let (mut reg, settings) = build().expect("schema should register");
        reg.set_bool(settings.enable_sun, false);
        reg.set_float(settings.turbidity, 7.5);
        reg.set_int(settings.num_particles, 21);
        reg.set_enum(settings.msaa_mode, MsaaMode::X2);
        reg.set_enum(settings.upsample_mode, UpsampleMode::NearestDepth);
        reg.set_direction(settings.sun_direction, Vec3::new(1.0, 2.0, -1.0));

        let text = save_profile(&reg).expect("should serialize");
        let (mut fresh, fh) = build().expect("schema should register");
        let report = apply_profile(&mut fresh, &text).expect("should load");
        assert!(report.warnings.is_empty(), "unexpected: {:?}", report.warnings);

        for handle in reg.handles() {
            assert_eq!(
                reg.value(handle),
                fresh.value(handle),
                "mismatch at {}",
                reg.path(handle)
            );
        }
        assert_eq!(fresh.enum_value::<MsaaMode>(fh.msaa_mode), MsaaMode::X2);
    }

    #[test]
    fn test_particle_count_scaled_for_consumers() {
        let (mut reg, settings) = build().expect("schema should register");
        assert_eq!(particle_count(&reg, &settings), 8192);
        reg.set_int(settings.num_particles, 32);
        assert_eq!(particle_count(&reg, &settings), MAX_PARTICLES as u32);
    }

    #[test]
    fn test_screenshot_trigger_polls_once() {
        let (mut reg, settings) = build().expect("schema should register");
        reg.trigger(settings.take_screenshot);
        assert!(reg.take_trigger(settings.take_screenshot));
        assert!(!reg.take_trigger(settings.take_screenshot));
    }
}
