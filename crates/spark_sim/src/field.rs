use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use spark_core::constants::{
    CONNECTION_DISTANCE, CONNECTION_MAX_WIDTH, CONNECTION_OPACITY_GAIN, LINE_WIDTH_GAIN,
    MAX_PARTICLES, POINTER_OPACITY_GAIN,
};
use spark_core::{Particle, ParticlesConfig, PointerState, Rgb, SimClock, SurfaceSize};
use spark_physics::connections::{find_connections, strength, Connection};
use spark_physics::forces::{distance, Attraction};
use spark_physics::motion::{advance_all, FrameInput};
use spark_physics::particle::generate_field;

use super::canvas::{Canvas, Paint};
use super::frame_loop::FrameLoop;

/// The particle background: owns its particles, pointer, clock and frame loop
/// for the duration of one mount.
#[derive(Resource)]
pub struct ParticleField {
    config: ParticlesConfig,
    /// Resolved once at mount; invalid strings become white
    color: Rgb,
    particles: Vec<Particle>,
    pointer: PointerState,
    clock: SimClock,
    surface: SurfaceSize,
    rng: ChaCha8Rng,
    frame_loop: FrameLoop,
    /// Incremented every time the particle set is regenerated
    generation: u32,
    /// Last refresh flag seen; a different value triggers re-initialization
    last_refresh: bool,
    /// Cleared at teardown; resize and pointer signals are ignored afterwards
    observing: bool,
    /// Pairs found by the most recent render
    connections: Vec<Connection>,
}

impl ParticleField {
    /// Mount with `config`. The surface stays unmeasured until `init_surface`.
    pub fn mount(config: ParticlesConfig) -> Self {
        let color = match Rgb::parse(&config.color) {
            Ok(c) => c,
            Err(e) => {
                warn!("Particle color: {e}; using white");
                Rgb::WHITE
            }
        };
        if config.particle_count > MAX_PARTICLES {
            warn!(
                "Particle count {} capped at {} (pair pass is quadratic)",
                config.particle_count, MAX_PARTICLES
            );
        }
        if config.has_inert_overrides() {
            debug!("staticity, ease and base velocity are accepted but do not affect motion");
        }

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut frame_loop = FrameLoop::new();
        frame_loop.start();

        Self {
            last_refresh: config.refresh,
            config,
            color,
            particles: Vec::new(),
            pointer: PointerState::default(),
            clock: SimClock::default(),
            surface: SurfaceSize::new(0.0, 0.0, 1.0),
            rng,
            frame_loop,
            generation: 0,
            observing: true,
            connections: Vec::new(),
        }
    }

    /// Size the surface and regenerate the whole particle set.
    ///
    /// A zero-sized container leaves the field empty until the next resize.
    pub fn init_surface(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        if !self.observing {
            return;
        }
        self.surface = SurfaceSize::new(width, height, pixel_ratio);
        self.connections.clear();

        if !self.surface.is_measured() {
            self.particles.clear();
            debug!("Particle surface not measured yet ({width}x{height}), deferring");
            return;
        }

        self.particles = generate_field(self.config.effective_count(), &self.surface, &mut self.rng);
        self.generation = self.generation.wrapping_add(1);

        let [pw, ph] = self.surface.physical();
        info!(
            "Particle field #{}: {} particles on {:.0}x{:.0} ({}x{} px)",
            self.generation,
            self.particles.len(),
            self.surface.width,
            self.surface.height,
            pw,
            ph
        );
    }

    /// Container size changed; particles are regenerated, not rescaled
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        if !self.observing {
            return;
        }
        let next = SurfaceSize::new(width, height, pixel_ratio);
        if next == self.surface && self.surface.is_measured() {
            return;
        }
        self.init_surface(width, height, pixel_ratio);
    }

    /// Apply the mount's refresh flag; a changed value forces re-initialization
    pub fn set_refresh(&mut self, refresh: bool) {
        if !self.observing || refresh == self.last_refresh {
            return;
        }
        self.last_refresh = refresh;
        self.init_surface(self.surface.width, self.surface.height, self.surface.pixel_ratio);
    }

    /// Flip the refresh flag
    pub fn refresh(&mut self) {
        self.set_refresh(!self.last_refresh);
    }

    /// Pointer moved; `viewport_pos` is translated by the container's origin
    pub fn pointer_moved(&mut self, viewport_pos: [f32; 2], container_origin: [f32; 2]) {
        if !self.observing {
            return;
        }
        self.pointer.position = [
            viewport_pos[0] - container_origin[0],
            viewport_pos[1] - container_origin[1],
        ];
        self.pointer.active = true;
    }

    /// Pointer left the tracked region; attraction stops on the next frame
    pub fn pointer_left(&mut self) {
        if !self.observing {
            return;
        }
        self.pointer.active = false;
    }

    /// Run one frame: update every particle, then draw. Returns false when no
    /// frame was pending (after teardown).
    pub fn tick(&mut self, canvas: &mut impl Canvas) -> bool {
        if !self.advance_frame() {
            return false;
        }
        self.render(canvas);
        true
    }

    /// Update half of a frame: clock, oscillation, attraction, friction, bounce
    pub fn advance_frame(&mut self) -> bool {
        if self.frame_loop.begin_frame().is_none() {
            return false;
        }

        self.clock.advance();
        let input = FrameInput {
            time: self.clock.elapsed,
            pointer: self.pointer.active.then_some(self.pointer.position),
            attraction: Attraction {
                force: self.config.mouse_force,
                radius: self.config.effective_mouse_radius(),
            },
            surface: self.surface,
        };
        advance_all(&mut self.particles, &input);

        self.frame_loop.reschedule();
        true
    }

    /// Draw half of a frame: particles, pair lines, pointer lines.
    ///
    /// The pair search is O(n²) with `ConnectionIndex::AllPairs`.
    pub fn render(&mut self, canvas: &mut impl Canvas) {
        if self.frame_loop.is_cancelled() {
            return;
        }
        canvas.clear(&self.surface);

        for p in &self.particles {
            canvas.fill_circle(p.position, p.radius, Paint::opaque(self.color));
        }

        let positions: Vec<[f32; 2]> = self.particles.iter().map(|p| p.position).collect();
        self.connections = find_connections(&positions, CONNECTION_DISTANCE, self.config.connection_index);
        for c in &self.connections {
            let s = strength(c.distance, CONNECTION_DISTANCE);
            canvas.stroke_line(
                positions[c.a],
                positions[c.b],
                (s * LINE_WIDTH_GAIN).min(CONNECTION_MAX_WIDTH),
                Paint::with_opacity(self.color, s * CONNECTION_OPACITY_GAIN),
            );
        }

        let radius = self.config.effective_mouse_radius();
        if self.pointer.active && radius > 0.0 {
            let pointer = self.pointer.position;
            for &pos in &positions {
                let d = distance(pos, pointer);
                if d < radius {
                    let s = strength(d, radius);
                    canvas.stroke_line(
                        pos,
                        pointer,
                        s * LINE_WIDTH_GAIN,
                        Paint::with_opacity(self.color, s * POINTER_OPACITY_GAIN),
                    );
                }
            }
        }
    }

    /// Stop the frame loop, stop observing signals, and release the particles.
    /// Only the first call has any effect.
    pub fn teardown(&mut self) -> bool {
        if !self.observing {
            warn!("Particle field already torn down");
            return false;
        }
        self.frame_loop.cancel();
        self.observing = false;
        self.pointer.active = false;
        self.particles.clear();
        self.connections.clear();
        info!(
            "Particle field torn down after {} frames",
            self.frame_loop.frames_run()
        );
        true
    }

    /// Replace the live particle set, starting a new epoch
    pub fn replace_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
        self.connections.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn config(&self) -> &ParticlesConfig {
        &self.config
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Pairs drawn by the most recent render
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_mounted(&self) -> bool {
        self.observing
    }

    pub fn frames_run(&self) -> u64 {
        self.frame_loop.frames_run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};

    fn config(count: u32) -> ParticlesConfig {
        ParticlesConfig {
            particle_count: count,
            seed: Some(42),
            ..Default::default()
        }
    }

    fn still(anchor: [f32; 2]) -> Particle {
        Particle::at_rest(anchor, 1.5)
    }

    #[test]
    fn test_init_generates_configured_count() {
        for count in [0u32, 1, 40, 200] {
            let mut field = ParticleField::mount(config(count));
            field.init_surface(320.0, 240.0, 2.0);
            assert_eq!(field.particles().len(), count as usize);
            assert_eq!(field.surface().physical(), [640, 480]);
            for p in field.particles() {
                assert!(field.surface().contains(p.anchor));
            }
        }
    }

    #[test]
    fn test_zero_size_defers_init() {
        let mut field = ParticleField::mount(config(30));
        field.init_surface(0.0, 0.0, 1.0);
        assert!(field.particles().is_empty());
        assert_eq!(field.generation(), 0);

        field.resize(200.0, 100.0, 1.0);
        assert_eq!(field.particles().len(), 30);
        assert_eq!(field.generation(), 1);
    }

    #[test]
    fn test_two_particle_connection() {
        let mut field = ParticleField::mount(config(2));
        field.init_surface(100.0, 100.0, 1.0);
        field.replace_particles(vec![still([10.0, 10.0]), still([20.0, 20.0])]);

        let mut canvas = RecordingCanvas::default();
        for _ in 0..5 {
            assert!(field.tick(&mut canvas));
            let lines: Vec<_> = canvas.lines().collect();
            assert_eq!(lines.len(), 1, "exactly one pair line per frame");
            let DrawCommand::Line { paint, width, .. } = lines[0] else {
                unreachable!()
            };
            let s = strength(field.connections()[0].distance, CONNECTION_DISTANCE);
            assert!((s - 0.9057).abs() < 1e-3);
            // 0.906 * 1.5 saturates
            assert_eq!(paint.alpha, 255);
            assert_eq!(*width, 1.5);
            assert_eq!(canvas.circles().count(), 2);
        }
    }

    #[test]
    fn test_far_pair_not_connected() {
        let mut field = ParticleField::mount(config(2));
        field.init_surface(400.0, 400.0, 1.0);
        field.replace_particles(vec![still([0.0, 0.0]), still([300.0, 300.0])]);
        let mut canvas = RecordingCanvas::default();
        field.tick(&mut canvas);
        assert_eq!(canvas.lines().count(), 0);
    }

    #[test]
    fn test_corner_bounce_scenario() {
        let mut field = ParticleField::mount(config(1));
        field.init_surface(100.0, 100.0, 1.0);
        let mut p = still([0.0, 0.0]);
        p.velocity = [-5.0, 0.0];
        field.replace_particles(vec![p]);

        field.tick(&mut RecordingCanvas::default());
        let p = field.particles()[0];
        assert_eq!(p.position[0], 0.0);
        assert!((p.velocity[0] - 4.5).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_leave_is_immediate() {
        let mut field = ParticleField::mount(config(1));
        field.init_surface(300.0, 300.0, 1.0);
        field.replace_particles(vec![still([100.0, 100.0])]);

        field.pointer_moved([160.0, 130.0], [10.0, 30.0]);
        assert_eq!(field.pointer().position, [150.0, 100.0]);

        let mut canvas = RecordingCanvas::default();
        field.tick(&mut canvas);
        assert!(field.particles()[0].velocity[0] > 0.0);
        assert_eq!(canvas.lines_touching([150.0, 100.0]), 1);

        field.pointer_left();
        let before = field.particles()[0].velocity;
        field.tick(&mut canvas);
        let after = field.particles()[0].velocity;
        // Only friction acted
        assert!(after[0] < before[0]);
        assert!(after[0] <= before[0] * 0.9 + 1e-6);
        assert_eq!(canvas.lines().count(), 0);
    }

    #[test]
    fn test_pointer_line_opacity() {
        let mut field = ParticleField::mount(config(1));
        field.init_surface(400.0, 400.0, 1.0);
        field.replace_particles(vec![still([100.0, 100.0])]);
        field.pointer_moved([100.0, 175.0], [0.0, 0.0]);

        let mut canvas = RecordingCanvas::default();
        field.tick(&mut canvas);
        let pos = field.particles()[0].position;
        let d = distance(pos, [100.0, 175.0]);
        let expected = Paint::with_opacity(Rgb::WHITE, (1.0 - d / 150.0) * 0.8);
        let line = canvas.lines().next().expect("pointer line");
        let DrawCommand::Line { paint, .. } = line else {
            unreachable!()
        };
        assert_eq!(*paint, expected);
    }

    #[test]
    fn test_reinit_discards_particles() {
        let mut field = ParticleField::mount(config(25));
        field.init_surface(500.0, 500.0, 1.0);
        let old: Vec<[f32; 2]> = field.particles().iter().map(|p| p.anchor).collect();

        field.resize(600.0, 400.0, 1.0);
        assert_eq!(field.particles().len(), 25);
        assert_eq!(field.generation(), 2);
        for p in field.particles() {
            assert!(!old.contains(&p.anchor));
        }

        // Same size again is not a change
        field.resize(600.0, 400.0, 1.0);
        assert_eq!(field.generation(), 2);
    }

    #[test]
    fn test_refresh_toggle_regenerates() {
        let mut field = ParticleField::mount(config(10));
        field.init_surface(200.0, 200.0, 1.0);
        field.set_refresh(false);
        assert_eq!(field.generation(), 1, "unchanged flag is a no-op");
        field.set_refresh(true);
        assert_eq!(field.generation(), 2);
        field.refresh();
        assert_eq!(field.generation(), 3);
        assert_eq!(field.particles().len(), 10);
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let mut field = ParticleField::mount(ParticlesConfig {
            mouse_force: 500.0,
            ..config(80)
        });
        field.init_surface(120.0, 90.0, 1.0);
        let mut canvas = RecordingCanvas::default();
        for frame in 0..400 {
            if frame % 50 < 40 {
                field.pointer_moved([(frame % 120) as f32, 45.0], [0.0, 0.0]);
            } else {
                field.pointer_left();
            }
            field.tick(&mut canvas);
            for p in field.particles() {
                assert!(field.surface().contains(p.position), "frame {frame}: {:?}", p.position);
            }
        }
    }

    #[test]
    fn test_teardown_stops_ticks_once() {
        let mut field = ParticleField::mount(config(5));
        field.init_surface(100.0, 100.0, 1.0);
        let mut canvas = RecordingCanvas::default();
        assert!(field.tick(&mut canvas));
        assert!(field.teardown());
        assert!(!field.tick(&mut canvas));
        assert!(!field.teardown());
        assert_eq!(field.frames_run(), 1);

        // Signals after teardown are ignored
        field.resize(300.0, 300.0, 1.0);
        field.pointer_moved([1.0, 1.0], [0.0, 0.0]);
        assert!(field.particles().is_empty());
        assert!(!field.pointer().active);
    }

    #[test]
    fn test_bad_color_renders_white() {
        let mut field = ParticleField::mount(ParticlesConfig {
            color: "not-a-color".into(),
            ..config(1)
        });
        field.init_surface(50.0, 50.0, 1.0);
        assert_eq!(field.color(), Rgb::WHITE);
    }
}
