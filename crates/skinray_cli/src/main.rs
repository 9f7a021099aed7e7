use std::fs;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

mod cli;

use cli::Args;
use skinray_core::builder::{build_default_scene, build_scene};
use skinray_core::pose::{builtin_poses, find_pose};
use skinray_core::{parse_skin, Pixmap, Scene};
use skinray_render::{generate_tiles, render, RenderConfig};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.clone().into())
        .init();

    if args.list_poses {
        for pose in builtin_poses() {
            println!("{}", pose.name);
        }
        return Ok(());
    }

    let config = load_config(&args)?;
    let mut scene = load_scene(&args)?;

    if let Some(radius) = args.light_radius {
        scene.light.radius = radius;
    }

    let tiles_total = generate_tiles(config.width, config.height, config.tile_size).len();
    let bar = ProgressBar::new(tiles_total as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} tiles [{elapsed_precise}]")
            .context("invalid progress bar template")?,
    );

    let progress = |done: usize, _total: usize| bar.set_position(done as u64);
    let result = render(&scene, &config, Some(&progress));
    bar.finish();

    for error in &result.errors {
        warn!("tile {} failed: {}", error.tile_index, error.message);
    }
    if !result.errors.is_empty() {
        warn!(
            "{} of {} tiles failed; the image contains unfinished regions",
            result.errors.len(),
            tiles_total
        );
    }

    result
        .image
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("wrote {}", args.output.display());

    Ok(())
}

/// Start from defaults, merge the optional TOML file, then apply
/// command-line overrides.
fn load_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(spp) = args.samples_per_pixel {
        config.samples_per_pixel = spp;
    }
    if let Some(bounces) = args.bounces {
        config.max_bounces = bounces;
    }
    if let Some(tile_size) = args.tile_size {
        config.tile_size = tile_size;
    }
    if let Some(threads) = args.threads {
        config.thread_count = threads;
    }
    if args.soft_shadows || args.shadow_samples.is_some() {
        config.soft_shadows = true;
    }
    if let Some(samples) = args.shadow_samples {
        config.shadow_samples = samples;
    }
    if args.ao {
        config.ao_enabled = true;
    }
    if args.dof {
        config.dof_enabled = true;
    }
    if let Some(aperture) = args.aperture {
        config.aperture = aperture;
    }
    if let Some(focus) = args.focus_distance {
        config.focus_distance = focus;
    }
    if args.no_gradient {
        config.gradient_bg = false;
    }

    if config.width == 0 || config.height == 0 {
        bail!("image dimensions must be at least 1x1");
    }
    if config.tile_size == 0 {
        bail!("tile size must be at least 1");
    }

    Ok(config)
}

fn load_scene(args: &Args) -> Result<Scene> {
    let Some(pose) = find_pose(&args.pose) else {
        let names: Vec<String> = builtin_poses().into_iter().map(|p| p.name).collect();
        bail!(
            "unknown pose '{}' (available: {})",
            args.pose,
            names.join(", ")
        );
    };

    match &args.skin {
        Some(path) => {
            let atlas = Pixmap::load(path)
                .with_context(|| format!("failed to load skin {}", path.display()))?;
            let skin = parse_skin(&atlas)
                .with_context(|| format!("failed to parse skin {}", path.display()))?;
            info!(
                "parsed skin {} ({:?}, pose: {})",
                path.display(),
                skin.format,
                pose.name
            );
            Ok(build_scene(&skin, &pose))
        }
        None => {
            info!("no skin given, rendering the default white character");
            Ok(build_default_scene())
        }
    }
}
