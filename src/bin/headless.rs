//! Run the particle field without a window.
//! Sweeps a pointer across the surface and reports what each frame would draw,
//! comparing the all-pairs and grid connection searches.

use spark_core::{ConnectionIndex, ParticlesConfig, SiteConfig};
use spark_sim::{ParticleField, RecordingCanvas};
use std::time::{Duration, Instant};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;
const FRAMES: u32 = 600;

struct RunStats {
    particles: usize,
    total_lines: usize,
    max_lines: usize,
    elapsed: Duration,
}

fn run(config: ParticlesConfig) -> RunStats {
    let mut field = ParticleField::mount(config);
    field.init_surface(WIDTH, HEIGHT, 1.0);
    let mut canvas = RecordingCanvas::default();

    let mut total_lines = 0;
    let mut max_lines = 0;
    let start = Instant::now();

    for frame in 0..FRAMES {
        // Pointer enters for the middle half of the run, tracing a figure eight
        if (FRAMES / 4..3 * FRAMES / 4).contains(&frame) {
            let t = frame as f32 * 0.02;
            let x = WIDTH * 0.5 + (WIDTH * 0.35) * t.sin();
            let y = HEIGHT * 0.5 + (HEIGHT * 0.3) * (2.0 * t).sin();
            field.pointer_moved([x, y], [0.0, 0.0]);
        } else if frame == 3 * FRAMES / 4 {
            field.pointer_left();
        }

        field.tick(&mut canvas);
        let lines = canvas.lines().count();
        total_lines += lines;
        max_lines = max_lines.max(lines);
    }

    let stats = RunStats {
        particles: field.particles().len(),
        total_lines,
        max_lines,
        elapsed: start.elapsed(),
    };
    field.teardown();
    stats
}

fn main() {
    let site = match SiteConfig::load_default() {
        Ok(site) => site,
        Err(e) => {
            eprintln!("{e:#}; using defaults");
            SiteConfig::default()
        }
    };
    let base = ParticlesConfig {
        seed: Some(site.particles.seed.unwrap_or(42)),
        ..site.particles
    };

    println!("=== Particle field, {FRAMES} frames on {WIDTH}x{HEIGHT} ===");
    for index in [ConnectionIndex::AllPairs, ConnectionIndex::Grid] {
        let stats = run(ParticlesConfig {
            connection_index: index,
            ..base.clone()
        });
        let per_frame = stats.elapsed.as_secs_f64() * 1000.0 / FRAMES as f64;
        println!(
            "{:<9} particles: {:>5} | lines/frame avg {:>7.1} max {:>6} | {:.3} ms/frame",
            format!("{index:?}"),
            stats.particles,
            stats.total_lines as f64 / FRAMES as f64,
            stats.max_lines,
            per_frame,
        );
    }
}
