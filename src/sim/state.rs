//! Simulation controller
//!
//! Owns the balls, the arena size, the seeded RNG and the frame statistics.
//! A host calls [`Simulation::on_tick`] once per displayed frame and reads
//! back the draw list and stats label afterwards.

use std::ops::Range;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{BallColor, Body};
use super::collision::resolve_collisions;
use super::events::{EventQueue, SimEvent};
use super::step::{nanos_to_seconds, step_world};
use crate::polar_to_cartesian;
use crate::renderer::DrawCommand;
use crate::settings::Settings;
use crate::stats::FrameStats;

/// Arena axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Current arena size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn size(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    fn set_size(&mut self, axis: Axis, size: f64) {
        match axis {
            Axis::X => self.width = size,
            Axis::Y => self.height = size,
        }
    }
}

/// Parameters used every time the arena is (re)seeded
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnParams {
    pub count: usize,
    pub radius: Range<f64>,
    pub speed: Range<f64>,
}

impl From<&Settings> for SpawnParams {
    fn from(settings: &Settings) -> Self {
        Self {
            count: settings.body_count,
            radius: settings.min_radius..settings.max_radius,
            speed: settings.min_speed..settings.max_speed,
        }
    }
}

/// The running simulation
pub struct Simulation {
    /// Balls in creation order
    pub bodies: Vec<Body>,
    viewport: Viewport,
    spawn: SpawnParams,
    seed: u64,
    rng: Pcg32,
    stats: FrameStats,
    events: EventQueue,
    /// Timestamp (ns) of the previous tick
    last_timestamp: Option<u64>,
    commands: Vec<DrawCommand>,
}

impl Simulation {
    /// Create a simulation and seed it at the center of the initial arena
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let settings = settings.clone().sanitized();
        let viewport = Viewport::new(settings.viewport_width, settings.viewport_height);
        let spawn = SpawnParams::from(&settings);

        let mut sim = Self {
            bodies: Vec::with_capacity(spawn.count),
            viewport,
            spawn: spawn.clone(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            stats: FrameStats::new(),
            events: EventQueue::new(),
            last_timestamp: None,
            commands: Vec::with_capacity(spawn.count + 1),
        };

        sim.create_bodies(spawn.count, spawn.radius, spawn.speed, viewport.center());
        log::info!(
            "Simulation seeded with {} balls (seed {}) in {}x{} arena",
            sim.bodies.len(),
            seed,
            viewport.width,
            viewport.height
        );
        sim
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Mutable stats access, for registering label observers
    pub fn stats_mut(&mut self) -> &mut FrameStats {
        &mut self.stats
    }

    /// Current HUD label
    pub fn stats_text(&self) -> String {
        self.stats.text()
    }

    /// Draw list produced by the most recent step
    pub fn draw_commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Add `count` balls at `origin`
    ///
    /// Radius and speed are sampled uniformly from their half-open ranges,
    /// direction uniformly from [0, 2pi). Colours cycle through the palette
    /// by creation index. A radius range that could yield a non-positive
    /// or non-finite radius creates nothing.
    pub fn create_bodies(
        &mut self,
        count: usize,
        radius: Range<f64>,
        speed: Range<f64>,
        origin: DVec2,
    ) {
        if !(radius.start > 0.0 && radius.end >= radius.start && radius.end.is_finite()) {
            log::warn!(
                "Refusing to create {} balls with radius range [{}, {})",
                count,
                radius.start,
                radius.end
            );
            return;
        }

        self.bodies.reserve(count);
        for i in 0..count {
            let r = radius.start + (radius.end - radius.start) * self.rng.random::<f64>();
            let s = speed.start + (speed.end - speed.start) * self.rng.random::<f64>();
            let angle = std::f64::consts::TAU * self.rng.random::<f64>();

            self.bodies.push(Body::new(
                origin,
                r,
                polar_to_cartesian(s, angle),
                BallColor::for_index(i),
            ));
        }
    }

    /// Remove every ball and reseed at the current arena center
    pub fn reset(&mut self) {
        self.bodies.clear();
        let spawn = self.spawn.clone();
        let origin = self.viewport.center();
        self.create_bodies(spawn.count, spawn.radius, spawn.speed, origin);
        log::info!(
            "Reset: {} balls at ({:.1}, {:.1})",
            self.bodies.len(),
            origin.x,
            origin.y
        );
    }

    /// Apply a resize along one axis
    ///
    /// Shrinking pulls any ball that would stick out back inside the new
    /// edge. Growing never moves a ball.
    pub fn on_viewport_resize(&mut self, axis: Axis, old_size: f64, new_size: f64) {
        self.viewport.set_size(axis, new_size);
        if new_size < old_size {
            self.constrain_to(axis, new_size);
        }
    }

    /// Set the arena size, handling each axis that changed
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        let old = self.viewport;
        if width != old.width {
            self.on_viewport_resize(Axis::X, old.width, width);
        }
        if height != old.height {
            self.on_viewport_resize(Axis::Y, old.height, height);
        }
    }

    fn constrain_to(&mut self, axis: Axis, bound: f64) {
        if bound <= 0.0 {
            log::debug!("Ignoring shrink of {:?} to {}", axis, bound);
            return;
        }

        let mut clamped = 0;
        for body in &mut self.bodies {
            let max = (bound - body.radius()).max(0.0);
            let pos = match axis {
                Axis::X => &mut body.center.x,
                Axis::Y => &mut body.center.y,
            };
            if *pos > max {
                *pos = max;
                clamped += 1;
            }
        }
        log::debug!("Arena {:?} shrank to {}: clamped {} balls", axis, bound, clamped);
    }

    /// Queue an event for the next tick
    pub fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    fn apply_event(&mut self, event: SimEvent) {
        match event {
            SimEvent::ViewportResized { width, height } => self.set_viewport(width, height),
            SimEvent::ResetRequested => self.reset(),
        }
    }

    /// Advance the simulation to `timestamp` (monotonic nanoseconds)
    ///
    /// The first tick only records its timestamp. Later ticks resolve
    /// collisions against the current arena, integrate by the elapsed time,
    /// rebuild the draw list and record the interval. Returns whether a
    /// step was taken.
    pub fn on_tick(&mut self, timestamp: u64) -> bool {
        for event in self.events.drain() {
            self.apply_event(event);
        }

        let stepped = match self.last_timestamp {
            Some(last) => {
                let elapsed = timestamp.saturating_sub(last);
                let Viewport { width, height } = self.viewport;

                let bounces = resolve_collisions(&mut self.bodies, width, height);
                step_world(
                    &mut self.bodies,
                    nanos_to_seconds(elapsed),
                    width,
                    height,
                    &mut self.commands,
                );
                self.stats.add_frame(elapsed);
                log::trace!("Tick {}: {} ns, {} bounces", self.stats.frame_count(), elapsed, bounces);
                true
            }
            None => false,
        };

        self.last_timestamp = Some(timestamp);
        stepped
    }

    /// Total kinetic energy of all balls
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = 1_000_000;

    fn settings(count: usize) -> Settings {
        Settings {
            body_count: count,
            ..Settings::default()
        }
    }

    fn ball_at(x: f64, y: f64, r: f64) -> Body {
        Body::new(DVec2::new(x, y), r, DVec2::ZERO, BallColor::Red)
    }

    #[test]
    fn test_create_bodies_respects_ranges() {
        let sim = Simulation::new(&Settings::default(), 42);
        assert_eq!(sim.bodies.len(), 400);

        for (i, body) in sim.bodies.iter().enumerate() {
            assert!(body.radius() >= 5.0 && body.radius() < 15.0);
            let speed = body.velocity.length();
            assert!(speed >= 50.0 - 1e-9 && speed < 250.0 + 1e-9, "speed {speed}");
            assert_eq!(body.center, DVec2::new(400.0, 300.0));
            assert_eq!(body.color(), BallColor::for_index(i));
            assert!((body.mass() - (body.radius() / 40.0).powi(3)).abs() < 1e-15);
        }
    }

    #[test]
    fn test_create_bodies_rejects_non_positive_radius() {
        let mut sim = Simulation::new(&settings(0), 9);
        let origin = DVec2::new(10.0, 10.0);

        sim.create_bodies(2, 0.0..0.0, 50.0..60.0, origin);
        sim.create_bodies(2, -5.0..10.0, 50.0..60.0, origin);
        sim.create_bodies(2, 10.0..5.0, 50.0..60.0, origin);
        sim.create_bodies(2, 5.0..f64::INFINITY, 50.0..60.0, origin);
        assert!(sim.bodies.is_empty());

        // A degenerate but positive range is fine
        sim.create_bodies(3, 8.0..8.0, 50.0..60.0, origin);
        assert_eq!(sim.bodies.len(), 3);
        assert!(sim.bodies.iter().all(|b| b.radius() == 8.0 && b.mass() > 0.0));
    }

    #[test]
    fn test_same_seed_same_bodies() {
        let a = Simulation::new(&settings(50), 7);
        let b = Simulation::new(&settings(50), 7);
        let c = Simulation::new(&settings(50), 8);
        assert_eq!(a.bodies, b.bodies);
        assert_ne!(a.bodies, c.bodies);
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_first_tick_only_records_timestamp() {
        let mut sim = Simulation::new(&settings(10), 1);
        let before = sim.bodies.clone();

        assert!(!sim.on_tick(0));
        assert_eq!(sim.bodies, before);
        assert_eq!(sim.stats().frame_count(), 0);
        assert!(sim.draw_commands().is_empty());
        assert_eq!(sim.stats_text(), crate::stats::INITIAL_TEXT);
    }

    #[test]
    fn test_mean_interval_over_three_frames() {
        let mut sim = Simulation::new(&settings(10), 1);
        for ts in [0, 16 * MS, 33 * MS, 50 * MS] {
            sim.on_tick(ts);
        }
        assert_eq!(sim.stats().frame_count(), 3);
        let mean = sim.stats().mean_frame_interval().unwrap();
        assert!((mean - (16.0 + 17.0 + 17.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_tick_moves_balls_and_draws() {
        let mut sim = Simulation::new(&settings(0), 1);
        sim.bodies.push(Body::new(
            DVec2::new(100.0, 100.0),
            10.0,
            DVec2::new(100.0, 0.0),
            BallColor::Blue,
        ));
        sim.on_tick(1_000 * MS);
        assert!(sim.on_tick(1_500 * MS));

        assert!((sim.bodies[0].center.x - 150.0).abs() < 1e-9);
        assert_eq!(sim.draw_commands().len(), 2);
        assert!(matches!(sim.draw_commands()[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_collision_resolved_before_integration() {
        let mut sim = Simulation::new(&settings(0), 1);
        // Touching the right wall and moving out
        sim.bodies.push(Body::new(
            DVec2::new(795.0, 300.0),
            10.0,
            DVec2::new(100.0, 0.0),
            BallColor::Red,
        ));
        sim.on_tick(0);
        sim.on_tick(100 * MS);
        assert!((sim.bodies[0].center.x - 785.0).abs() < 1e-9);
    }

    #[test]
    fn test_backwards_timestamp_is_zero_interval() {
        let mut sim = Simulation::new(&settings(5), 3);
        sim.on_tick(50 * MS);
        let before = sim.bodies.clone();
        assert!(sim.on_tick(40 * MS));
        let moved = sim
            .bodies
            .iter()
            .zip(&before)
            .any(|(a, b)| a.center != b.center);
        assert!(!moved);
        assert_eq!(sim.stats().mean_frame_interval(), Some(0.0));
    }

    #[test]
    fn test_reset_reseeds_at_viewport_center() {
        let mut sim = Simulation::new(&Settings::default(), 11);
        sim.on_tick(0);
        sim.on_tick(16 * MS);
        sim.set_viewport(600.0, 400.0);
        sim.reset();

        assert_eq!(sim.bodies.len(), 400);
        assert!(sim.bodies.iter().all(|b| b.center == DVec2::new(300.0, 200.0)));
        // Stats survive a reset
        assert_eq!(sim.stats().frame_count(), 1);
    }

    #[test]
    fn test_shrink_clamps_only_protruding_balls() {
        let mut sim = Simulation::new(&settings(0), 1);
        sim.bodies = vec![
            ball_at(590.0, 100.0, 15.0),
            ball_at(100.0, 100.0, 15.0),
            ball_at(585.0, 100.0, 15.0),
        ];
        sim.on_viewport_resize(Axis::X, 800.0, 600.0);

        assert_eq!(sim.bodies[0].center.x, 585.0);
        assert_eq!(sim.bodies[1].center.x, 100.0);
        assert_eq!(sim.bodies[2].center.x, 585.0);
        assert_eq!(sim.viewport().width, 600.0);
        // Other axis untouched
        assert!(sim.bodies.iter().all(|b| b.center.y == 100.0));
    }

    #[test]
    fn test_grow_never_moves_balls() {
        let mut sim = Simulation::new(&settings(0), 1);
        sim.bodies = vec![ball_at(790.0, 590.0, 15.0)];
        sim.set_viewport(1000.0, 900.0);
        assert_eq!(sim.bodies[0].center, DVec2::new(790.0, 590.0));
        assert_eq!(sim.viewport(), Viewport::new(1000.0, 900.0));
    }

    #[test]
    fn test_shrink_to_zero_is_noop() {
        let mut sim = Simulation::new(&settings(0), 1);
        sim.bodies = vec![ball_at(300.0, 200.0, 10.0)];
        sim.set_viewport(0.0, 0.0);
        assert_eq!(sim.bodies[0].center, DVec2::new(300.0, 200.0));

        // Narrower than the ball: clamp stops at zero
        sim.set_viewport(800.0, 600.0);
        sim.on_viewport_resize(Axis::Y, 600.0, 4.0);
        assert_eq!(sim.bodies[0].center.y, 0.0);
    }

    #[test]
    fn test_events_apply_on_next_tick() {
        let mut sim = Simulation::new(&settings(20), 5);
        sim.bodies[0].center = DVec2::new(790.0, 300.0);
        sim.push_event(SimEvent::ViewportResized {
            width: 500.0,
            height: 600.0,
        });
        assert_eq!(sim.viewport().width, 800.0);

        sim.on_tick(0);
        assert_eq!(sim.viewport().width, 500.0);
        assert!(sim.bodies[0].center.x <= 500.0 - sim.bodies[0].radius());

        sim.push_event(SimEvent::ResetRequested);
        sim.on_tick(16 * MS);
        assert_eq!(sim.bodies.len(), 20);
        // Reset happened at (250, 300), then one 16ms step
        for body in &sim.bodies {
            let travelled = body.center - DVec2::new(250.0, 300.0);
            assert!((travelled - body.velocity * 0.016).length() < 1e-9);
        }
    }

    #[test]
    fn test_long_run_conserves_energy() {
        let mut sim = Simulation::new(&Settings::default(), 2024);
        let energy = sim.kinetic_energy();

        let frame = 16_666_667;
        for i in 0..600u64 {
            sim.on_tick(i * frame);
        }

        assert_eq!(sim.stats().frame_count(), 599);
        assert!(sim.bodies.iter().all(|b| b.center.is_finite() && b.velocity.is_finite()));
        let after = sim.kinetic_energy();
        assert!((after - energy).abs() <= 1e-6 * energy, "{energy} -> {after}");
    }
}
