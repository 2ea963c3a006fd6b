//! Scene generator binary: builds a scene headless and reports it.
//!
//! Usage: cargo run --release --bin generate_scene -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Scene config JSON (default: built-in defaults)
//!   --seed <SEED>     Override the world seed
//!   --frames <N>      Simulated frames to run (default: 120)
//!   --dt <SECONDS>    Fixed timestep per frame (default: 1/60)
//!   --out <PATH>      Write a JSON manifest of the generated buffers
//!
//! With no --out, the manifest is printed to stdout.

use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;

use tidepool::core::time::FrameTimer;
use tidepool::scene::{Scene, SceneConfig};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = parse_str_arg(&args, "--config").map(PathBuf::from);
    let seed = parse_i32_arg(&args, "--seed");
    let frames = parse_usize_arg(&args, "--frames").unwrap_or(120);
    let dt = parse_f32_arg(&args, "--dt").unwrap_or(1.0 / 60.0);
    let out = parse_str_arg(&args, "--out").map(PathBuf::from);

    let mut config = match &config_path {
        Some(path) => match SceneConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("failed to load {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };
    if let Some(seed) = seed {
        config.world.seed = seed;
    }

    println!("=== Tidepool Scene Generator ===");
    println!("Seed:   {}", config.world.seed);
    println!("Size:   {} x {}", config.terrain.size, config.terrain.size);
    println!("Frames: {} at {:.4}s", frames, dt);
    println!();

    let build_start = Instant::now();
    let mut scene = Scene::new(&config);
    let build_elapsed = build_start.elapsed();

    // Simulation time advances by the fixed step (reproducible runs);
    // the frame timer measures what each update costs on the wall clock.
    let mut timer = FrameTimer::new();
    for frame in 0..frames {
        scene.update(frame as f32 * dt);
        timer.tick();
    }

    let frame_ms = if frames > 0 {
        timer.elapsed_secs() as f64 * 1000.0 / frames as f64
    } else {
        0.0
    };
    println!(
        "Build:  {:.2}ms ({} terrain verts, {} water verts)",
        build_elapsed.as_secs_f64() * 1000.0,
        scene.terrain.vertex_count(),
        scene.water_surface.mesh().vertex_count() + scene.water_volume.mesh().vertex_count(),
    );
    println!(
        "Sim:    {} frames in {:.1}ms ({:.3}ms/frame)",
        timer.frame_count(),
        timer.elapsed_secs() * 1000.0,
        frame_ms,
    );
    println!(
        "Scene:  {} rocks, {} seaweed, {} starfish, {} bubbles, {} live ripples",
        scene.rocks.len(),
        scene.seaweed.len(),
        scene.starfish.len(),
        scene.bubbles.bubbles().len(),
        scene.ripples.len(),
    );

    let bounds = scene.terrain.bounds();
    let manifest = json!({
        "seed": scene.config().world.seed,
        "frames": frames,
        "dt": dt,
        "terrain": {
            "vertices": scene.terrain.vertex_count(),
            "triangles": scene.terrain.triangle_count(),
            "bounds_min": [bounds.min.x, bounds.min.y, bounds.min.z],
            "bounds_max": [bounds.max.x, bounds.max.y, bounds.max.z],
        },
        "water": {
            "surface_vertices": scene.water_surface.mesh().vertex_count(),
            "volume_vertices": scene.water_volume.mesh().vertex_count(),
            "top_rim_vertices": scene.water_volume.top_rim().len(),
        },
        "populations": {
            "rocks": scene.rocks.len(),
            "rock_shapes": scene.rock_shapes.len(),
            "seaweed": scene.seaweed.len(),
            "starfish": scene.starfish.len(),
            "bubbles": scene.bubbles.bubbles().len(),
        },
        "ripples_live": scene.ripples.len(),
        "timing_ms": {
            "build": build_elapsed.as_secs_f64() * 1000.0,
            "per_frame": frame_ms,
        },
    });

    let pretty = serde_json::to_string_pretty(&manifest).expect("manifest serialization");
    match out {
        Some(path) => {
            if let Err(err) = std::fs::write(&path, pretty) {
                eprintln!("failed to write {}: {err}", path.display());
                std::process::exit(1);
            }
            println!();
            println!("Manifest: {}", path.display());
        }
        None => {
            println!();
            println!("{pretty}");
        }
    }
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.clone())
}
