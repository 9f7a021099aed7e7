//! Tile scheduler: partitions the image, spreads tiles across worker
//! threads and assembles the output.
//!
//! Workers claim tile indices from a shared atomic counter, so slow tiles
//! never stall fast workers and no static partitioning is needed. Each
//! tile's sampling sequence comes from its own RNG seeded by the tile's
//! top-left coordinates - tile-to-thread assignment varies between runs,
//! but the pixels do not, which makes the output bit-identical for any
//! thread count.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;

use skinray_core::{Pixmap, Scene};
use skinray_math::{Ray, Rgba};

use crate::config::RenderConfig;
use crate::gen_f32;
use crate::intersect::intersect_scene;
use crate::tracer::{background_color, trace_ray};

/// A rectangular region of the image rendered as one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of the tile's top-left corner.
    pub x: u32,
    /// Y coordinate of the tile's top-left corner.
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A failure recorded for a single tile. The render as a whole still
/// completes; the failed tile's pixels keep whatever was written before
/// the failure (black for an untouched tile).
#[derive(Debug, Clone)]
pub struct TileError {
    pub tile_index: usize,
    pub message: String,
}

/// Output of [`render`]: the image plus any per-tile failures.
#[derive(Debug)]
pub struct RenderResult {
    pub image: Pixmap,
    pub errors: Vec<TileError>,
}

/// Partition an image into a row-major grid of tiles aligned to
/// `tile_size`, with boundary tiles clipped to the image extent.
///
/// The tiles never overlap, never exceed the image bounds, and their union
/// is exactly the full image. Zero width, height or tile size yields no
/// tiles.
pub fn generate_tiles(width: u32, height: u32, tile_size: u32) -> Vec<Tile> {
    if width == 0 || height == 0 || tile_size == 0 {
        return Vec::new();
    }

    let cols = width.div_ceil(tile_size) as usize;
    let rows = height.div_ceil(tile_size) as usize;
    let mut tiles = Vec::with_capacity(cols * rows);

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            tiles.push(Tile {
                x,
                y,
                width: tile_size.min(width - x),
                height: tile_size.min(height - y),
            });
            x += tile_size;
        }
        y += tile_size;
    }

    tiles
}

/// Render all pixels of one tile, returning them row-major within the
/// tile.
///
/// Sub-pixel jitter, depth-of-field lens offsets and all downstream
/// sampling (soft shadows, AO) draw from a generator seeded by the tile
/// coordinates alone.
pub fn render_tile(tile: &Tile, scene: &Scene, config: &RenderConfig) -> Vec<Rgba> {
    let aspect = config.width as f32 / config.height as f32;
    let spp = config.samples_per_pixel.max(1);

    let mut rng = StdRng::seed_from_u64(tile.y as u64 * config.width as u64 + tile.x as u64);

    let focus_dist = if config.focus_distance > 0.0 {
        config.focus_distance
    } else {
        (scene.camera.target - scene.camera.position).length()
    };

    let mut pixels = Vec::with_capacity((tile.width * tile.height) as usize);

    for py in tile.y..tile.y + tile.height {
        for px in tile.x..tile.x + tile.width {
            let mut accum = Rgba::TRANSPARENT;

            for _ in 0..spp {
                let (jx, jy) = if spp == 1 {
                    (0.5, 0.5)
                } else {
                    (gen_f32(&mut rng), gen_f32(&mut rng))
                };
                let u = (px as f32 + jx) / config.width as f32;
                let v = (py as f32 + jy) / config.height as f32;

                let ray = if config.dof_enabled && config.aperture > 1e-6 {
                    generate_dof_ray(scene, u, v, aspect, config.aperture, focus_dist, &mut rng)
                } else {
                    scene.camera.generate_ray(u, v, aspect)
                };

                // Primary-ray misses take the image-space gradient; hits go
                // through the tracer (whose own misses use the flat color).
                let color = if intersect_scene(&ray, scene).hit {
                    trace_ray(
                        &ray,
                        scene,
                        0,
                        config.max_bounces,
                        &config.shading,
                        config,
                        &mut rng,
                    )
                } else {
                    background_color(scene, config, u, v)
                };

                accum += color;
            }

            pixels.push(accum / spp as f32);
        }
    }

    pixels
}

/// Render the scene into a new image using `config.thread_count` workers
/// (0 = hardware concurrency), with lock-free tile claiming.
///
/// `progress` is invoked as `(tiles_completed, tiles_total)` after each
/// tile; invocation order across tiles is not guaranteed, but the final
/// call reports `tiles_completed == tiles_total`. The callback must not
/// re-enter the scheduler.
///
/// A panicking tile is recorded in the result's error list and does not
/// abort its siblings.
pub fn render(
    scene: &Scene,
    config: &RenderConfig,
    progress: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> RenderResult {
    let thread_count = if config.thread_count > 0 {
        config.thread_count as usize
    } else {
        thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    };

    let tiles = generate_tiles(config.width, config.height, config.tile_size);
    let total = tiles.len();

    let image = Mutex::new(Pixmap::new(config.width, config.height));
    let errors = Mutex::new(Vec::new());

    if total == 0 {
        return RenderResult {
            image: into_inner(image),
            errors: Vec::new(),
        };
    }

    let workers = thread_count.min(total).max(1);
    log::info!(
        "rendering {}x{} ({} tiles, {} worker threads, {} spp)",
        config.width,
        config.height,
        total,
        workers,
        config.samples_per_pixel.max(1)
    );

    let next_tile = AtomicUsize::new(0);
    let completed = AtomicUsize::new(0);
    let progress_lock = Mutex::new(());

    thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| loop {
                let index = next_tile.fetch_add(1, Ordering::Relaxed);
                if index >= total {
                    break;
                }
                let tile = &tiles[index];

                match panic::catch_unwind(AssertUnwindSafe(|| render_tile(tile, scene, config))) {
                    Ok(pixels) => {
                        let mut image = lock(&image);
                        blit(&mut image, tile, &pixels);
                    }
                    Err(payload) => {
                        let message = panic_message(payload);
                        log::warn!("tile {index} failed: {message}");
                        lock(&errors).push(TileError {
                            tile_index: index,
                            message,
                        });
                    }
                }

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(callback) = progress {
                    let _guard = lock(&progress_lock);
                    callback(done, total);
                }
            });
        }
    });

    RenderResult {
        image: into_inner(image),
        errors: into_inner(errors),
    }
}

/// Thin-lens depth-of-field ray: offset the origin on the aperture disk
/// and aim back at the pinhole ray's focal point.
fn generate_dof_ray(
    scene: &Scene,
    u: f32,
    v: f32,
    aspect: f32,
    aperture: f32,
    focus_dist: f32,
    rng: &mut StdRng,
) -> Ray {
    let pinhole = scene.camera.generate_ray(u, v, aspect);
    if aperture < 1e-6 {
        return pinhole;
    }

    let (_, right, cam_up) = scene.camera.basis();
    let focus_point = pinhole.origin + pinhole.direction * focus_dist;

    let angle = std::f32::consts::TAU * gen_f32(rng);
    let radius = aperture * gen_f32(rng).sqrt();
    let (sin_a, cos_a) = angle.sin_cos();
    let lens_offset = right * (radius * cos_a) + cam_up * (radius * sin_a);

    let origin = scene.camera.position + lens_offset;
    Ray::new(origin, (focus_point - origin).normalize_or_zero())
}

/// Copy a tile's pixels into the shared output image.
fn blit(image: &mut Pixmap, tile: &Tile, pixels: &[Rgba]) {
    for row in 0..tile.height {
        for col in 0..tile.width {
            image.set(
                tile.x + col,
                tile.y + row,
                pixels[(row * tile.width + col) as usize],
            );
        }
    }
}

/// Lock a mutex, tolerating poisoning: a panicked tile must not take the
/// whole render down with it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn into_inner<T>(mutex: Mutex<T>) -> T {
    mutex
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
