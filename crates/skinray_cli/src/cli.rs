use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Ray trace a Minecraft skin into a still image.
#[derive(Parser)]
#[command(name = "skinray")]
#[command(about = "Ray trace a Minecraft skin into a still image")]
pub struct Args {
    /// Skin PNG (64x64 or legacy 64x32). Renders a plain white character
    /// when omitted.
    pub skin: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// TOML file with render settings; command-line flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Character pose by name (see --list-poses)
    #[arg(short, long, default_value = "standing")]
    pub pose: String,

    /// List the built-in poses and exit
    #[arg(long)]
    pub list_poses: bool,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Anti-aliasing samples per pixel
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Maximum reflection bounces
    #[arg(long)]
    pub bounces: Option<u32>,

    /// Scheduler tile size in pixels
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Worker threads (0 = all hardware threads)
    #[arg(long, short = 'j')]
    pub threads: Option<u32>,

    /// Enable area-light soft shadows
    #[arg(long)]
    pub soft_shadows: bool,

    /// Shadow rays per shading point (implies --soft-shadows)
    #[arg(long)]
    pub shadow_samples: Option<u32>,

    /// Area light radius
    #[arg(long)]
    pub light_radius: Option<f32>,

    /// Enable ambient occlusion
    #[arg(long)]
    pub ao: bool,

    /// Enable depth of field
    #[arg(long)]
    pub dof: bool,

    /// Lens radius for depth of field
    #[arg(long)]
    pub aperture: Option<f32>,

    /// Focal distance (0 = auto-focus on the character)
    #[arg(long)]
    pub focus_distance: Option<f32>,

    /// Use the flat scene background instead of the radial gradient
    #[arg(long)]
    pub no_gradient: bool,
}
