use std::path::PathBuf;
use std::process;

use glimmer_demo::{build, particle_count, sync_conditional_visibility};
use glimmer_persist::{apply_profile, save_profile};
use glimmer_registry::{export_shader_constants, packed_byte_size};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut profile_path: Option<PathBuf> = None;
    let mut save_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--profile" => {
                i += 1;
                profile_path = Some(PathBuf::from(&args[i]));
            }
            "--save" => {
                i += 1;
                save_path = Some(PathBuf::from(&args[i]));
            }
            "--help" | "-h" => {
                eprintln!("Usage: settings-demo [OPTIONS]");
                eprintln!("  --profile <path>   Apply a settings profile (RON) before reporting");
                eprintln!("  --save <path>      Write the resulting profile to disk");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let (mut registry, settings) = match build() {
        Ok(built) => built,
        Err(e) => {
            log::error!("settings declaration is invalid: {}", e);
            process::exit(1);
        }
    };

    if let Some(ref path) = profile_path {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::error!("failed to read {}: {}", path.display(), e);
                process::exit(1);
            }
        };
        match apply_profile(&mut registry, &text) {
            Ok(report) => {
                log::info!(
                    "applied {} settings from {} ({} warnings)",
                    report.applied,
                    path.display(),
                    report.warnings.len()
                );
            }
            Err(e) => {
                log::error!("failed to load {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    sync_conditional_visibility(&mut registry, &settings, false);

    println!("## Settings\n");
    for handle in registry.handles() {
        println!("{} = {:?}", registry.path(handle), registry.value(handle));
    }
    println!(
        "\n{} settings, {} shader constants, {}-byte constant block, {} particles",
        registry.len(),
        export_shader_constants(&registry).len(),
        packed_byte_size(&registry),
        particle_count(&registry, &settings),
    );

    if let Some(ref path) = save_path {
        let text = save_profile(&registry).expect("profile serialization should not fail");
        if let Err(e) = std::fs::write(path, text) {
            log::error!("failed to write {}: {}", path.display(), e);
            process::exit(1);
        }
        log::info!("saved profile to {}", path.display());
    }
}
