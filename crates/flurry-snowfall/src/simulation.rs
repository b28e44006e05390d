//! Snowfall controller: surface sizing, flake population and frame lifecycle.

use std::time::Instant;

use flurry_core::{FrameHandle, FrameScheduler, InitError, Point, Surface, Vector2, Viewport};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, trace, warn};

use crate::caster::FlakeCaster;
use crate::flake::Flake;
use crate::interaction::PointerInteraction;
use crate::pointer::{PointerEvent, PointerTracker};
use crate::random::stochastic_count;
use crate::settings::{MAX_FLAKES_PER_FRAME, SnowfallSettings};
use crate::throttle::{RateLimiter, Throttle};

/// Where a simulation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, no surface attached yet.
    Uninitialized,
    /// Initialized and sized, never started.
    Ready,
    Running,
    /// Stopped after running. Can be started again.
    Stopped,
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: usize,
    pub culled: usize,
    /// Flakes alive at the end of the frame.
    pub live: usize,
}

/// A snowfall animation bound to a host surface, frame scheduler and viewport.
pub struct Snowfall<S, C, V> {
    settings: SnowfallSettings,
    surface: Option<S>,
    scheduler: C,
    viewport: V,
    interaction: Option<Box<dyn PointerInteraction>>,
    limiter: Option<Box<dyn RateLimiter<Point>>>,
    tracker: PointerTracker,
    flakes: Vec<Flake>,
    rng: SmallRng,
    width: u32,
    height: u32,
    flakes_per_frame: f32,
    lifecycle: Lifecycle,
    pending_frame: Option<FrameHandle>,
}

impl<S, C, V> Snowfall<S, C, V>
where
    S: Surface,
    C: FrameScheduler,
    V: Viewport,
{
    pub fn new(settings: SnowfallSettings, scheduler: C, viewport: V) -> Self {
        Self {
            settings,
            surface: None,
            scheduler,
            viewport,
            interaction: None,
            limiter: None,
            tracker: PointerTracker::new(),
            flakes: Vec::new(),
            rng: SmallRng::from_entropy(),
            width: 0,
            height: 0,
            flakes_per_frame: 0.0,
            lifecycle: Lifecycle::Uninitialized,
            pending_frame: None,
        }
    }

    /// Use a deterministic random stream.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Plug in a pointer interaction module. It needs a rate limiter as well.
    pub fn with_interaction(mut self, interaction: Box<dyn PointerInteraction>) -> Self {
        self.interaction = Some(interaction);
        self
    }

    /// Rate limiter for pointer samples.
    pub fn with_rate_limiter(mut self, limiter: Box<dyn RateLimiter<Point>>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Enable the pointer-driven [`FlakeCaster`] with a [`Throttle`], as
    /// configured by the settings.
    pub fn with_pointer_casting(self) -> Self {
        let cast = self.settings.cast.clone();
        self.with_interaction(Box::new(FlakeCaster::new(&cast)))
            .with_rate_limiter(Box::new(Throttle::new(cast.throttle_interval())))
    }

    /// Attach the drawing surface and size everything to the viewport.
    ///
    /// Calling this again after a successful init does nothing.
    pub fn init(&mut self, surface: Option<S>) -> Result<(), InitError> {
        if self.lifecycle != Lifecycle::Uninitialized {
            warn!("snowfall already initialized");
            return Ok(());
        }

        let Some(surface) = surface else {
            error!("snowfall needs a drawing surface");
            return Err(InitError::SurfaceMissing);
        };
        if !surface.is_usable() {
            error!("snowfall drawing surface is not usable");
            return Err(InitError::SurfaceUnusable);
        }
        if self.interaction.is_some() && self.limiter.is_none() {
            error!("snowfall pointer interaction requires a rate limiter");
            return Err(InitError::RateLimiterMissing);
        }

        self.surface = Some(surface);
        self.lifecycle = Lifecycle::Ready;
        self.resize();
        info!(pointer = self.interaction.is_some(), "snowfall initialized");
        Ok(())
    }

    /// Re-read the viewport size and recompute everything that depends on it.
    pub fn resize(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let (width, height) = self.viewport.size();
        surface.set_size(width, height);

        self.width = width;
        self.height = height;
        self.flakes_per_frame = self.settings.flakes_per_frame(width);
        if self.flakes_per_frame >= MAX_FLAKES_PER_FRAME {
            warn!(rate = self.flakes_per_frame, "snowfall spawn rate capped");
        }
        if let Some(interaction) = self.interaction.as_mut() {
            interaction.reset(width, height);
        }
        debug!(width, height, rate = self.flakes_per_frame, "snowfall resized");
    }

    /// Start animating. Does nothing if already running or not initialized.
    pub fn start(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            error!("snowfall cannot start: not initialized");
            return;
        };
        if self.lifecycle == Lifecycle::Running {
            return;
        }
        self.lifecycle = Lifecycle::Running;
        surface.set_visible(true);
        info!("snowfall started");

        if self.pending_frame.is_none() {
            self.frame();
        }
    }

    /// Stop animating and hide the surface.
    ///
    /// The pending frame is cancelled; pointer forces still held by flakes are
    /// retracted so they cannot resurface on the next start.
    pub fn stop(&mut self) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.lifecycle = Lifecycle::Stopped;

        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        if let Some(interaction) = self.interaction.as_mut() {
            interaction.release(&mut self.flakes);
        }
        if let Some(limiter) = self.limiter.as_mut() {
            limiter.cancel();
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.set_visible(false);
        }
        info!("snowfall stopped");
    }

    /// Run one frame. The host calls this when the requested frame is due.
    pub fn frame(&mut self) -> FrameReport {
        self.pending_frame = None;
        if self.lifecycle != Lifecycle::Running {
            return FrameReport::default();
        }

        if !self.surface.as_ref().is_some_and(|s| s.is_usable()) {
            error!("snowfall drawing surface lost, stopping");
            self.stop();
            return FrameReport::default();
        }
        let Some(surface) = self.surface.as_mut() else {
            return FrameReport::default();
        };

        let (width, height) = (self.width, self.height);
        surface.clear(width, height);

        if let Some(interaction) = self.interaction.as_mut() {
            interaction.apply_to(&mut self.flakes);
        }

        let spawned = stochastic_count(&mut self.rng, self.flakes_per_frame);
        for _ in 0..spawned {
            let x = self.rng.gen_range(0..=width) as f32;
            let flake = Flake::spawn(
                Point::new(x, -self.settings.flake.max_size),
                &self.settings.flake,
                self.settings.fps,
                &mut self.rng,
            );
            self.flakes.push(flake);
        }

        let padding = self.settings.removal_padding;
        let (right, bottom) = (width as f32 + padding, height as f32 + padding);
        let before = self.flakes.len();
        let rng = &mut self.rng;
        self.flakes.retain_mut(|flake| {
            let position = flake.position();
            if position.y > bottom || position.x < -padding || position.x > right {
                return false;
            }
            flake.evolve(rng);
            flake.draw(&mut *surface);
            true
        });

        let report = FrameReport {
            spawned,
            culled: before - self.flakes.len(),
            live: self.flakes.len(),
        };
        trace!(?report, "snowfall frame");

        self.pending_frame = Some(self.scheduler.request_frame());
        report
    }

    /// Feed a pointer event from the host.
    ///
    /// Ignored unless running with pointer interaction. Samples pass through
    /// the rate limiter; held-back samples come out of [`poll_pointer`].
    ///
    /// [`poll_pointer`]: Snowfall::poll_pointer
    pub fn pointer_moved(&mut self, now: Instant, event: &PointerEvent) {
        if self.lifecycle != Lifecycle::Running || self.interaction.is_none() {
            return;
        }
        let Some(position) = event.position() else {
            return;
        };
        let Some(limiter) = self.limiter.as_mut() else {
            return;
        };
        if let Some(position) = limiter.offer(now, position) {
            self.process_pointer(position);
        }
    }

    /// Release a rate-limited pointer sample whose interval has elapsed.
    pub fn poll_pointer(&mut self, now: Instant) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        let sample = self.limiter.as_mut().and_then(|limiter| limiter.poll(now));
        if let Some(position) = sample {
            self.process_pointer(position);
        }
    }

    fn process_pointer(&mut self, position: Point) {
        self.tracker.record(position);
        let velocity = self.tracker.velocity();
        if velocity == Vector2::ZERO {
            return;
        }
        if let Some(interaction) = self.interaction.as_mut() {
            interaction.on_pointer_sample(position, velocity);
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn settings(&self) -> &SnowfallSettings {
        &self.settings
    }

    pub fn flakes(&self) -> &[Flake] {
        &self.flakes
    }

    /// Expected new flakes per frame at the current width.
    pub fn flakes_per_frame(&self) -> f32 {
        self.flakes_per_frame
    }

    /// Current surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut C {
        &mut self.scheduler
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use flurry_core::Rgb;

    use super::*;
    use crate::caster::CAST_FORCE;

    #[derive(Debug)]
    struct RecordingSurface {
        usable: bool,
        visible: bool,
        size: (u32, u32),
        clears: usize,
        circles: Vec<(Point, f32)>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self {
                usable: true,
                visible: false,
                size: (0, 0),
                clears: 0,
                circles: Vec::new(),
            }
        }
    }

    impl Surface for RecordingSurface {
        fn is_usable(&self) -> bool {
            self.usable
        }

        fn set_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn clear(&mut self, _width: u32, _height: u32) {
            self.clears += 1;
            self.circles.clear();
        }

        fn fill_circle(&mut self, center: Point, radius: f32, _color: Rgb) {
            self.circles.push((center, radius));
        }
    }

    #[derive(Debug, Default)]
    struct ManualScheduler {
        next_id: u64,
        pending: Vec<FrameHandle>,
        requested: usize,
    }

    impl FrameScheduler for ManualScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next_id += 1;
            self.requested += 1;
            let handle = FrameHandle(self.next_id);
            self.pending.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.pending.retain(|h| *h != handle);
        }
    }

    #[derive(Debug)]
    struct FixedViewport(u32, u32);

    impl Viewport for FixedViewport {
        fn size(&self) -> (u32, u32) {
            (self.0, self.1)
        }
    }

    type TestSnowfall = Snowfall<RecordingSurface, ManualScheduler, FixedViewport>;

    fn snowfall(settings: SnowfallSettings, width: u32, height: u32) -> TestSnowfall {
        Snowfall::new(settings, ManualScheduler::default(), FixedViewport(width, height))
            .with_seed(1234)
    }

    fn ready(settings: SnowfallSettings, width: u32, height: u32) -> TestSnowfall {
        let mut sim = snowfall(settings, width, height);
        sim.init(Some(RecordingSurface::new())).unwrap();
        sim
    }

    fn no_spawning() -> SnowfallSettings {
        SnowfallSettings {
            frequency: 0.0,
            ..Default::default()
        }
    }

    /// Fire the pending frame the way a host would.
    fn fire(sim: &mut TestSnowfall) -> FrameReport {
        let handle = sim.scheduler_mut().pending.pop();
        assert!(handle.is_some(), "no frame was scheduled");
        sim.frame()
    }

    fn flake_at(x: f32, y: f32) -> Flake {
        Flake::with_depth(Point::new(x, y), &Default::default(), 60.0, 0.5, 0.0)
    }

    #[test]
    fn test_init_without_surface_fails() {
        let mut sim = snowfall(SnowfallSettings::default(), 100, 100);
        assert_eq!(sim.init(None), Err(InitError::SurfaceMissing));
        assert_eq!(sim.lifecycle(), Lifecycle::Uninitialized);

        sim.start();
        assert!(!sim.is_running());
        assert_eq!(sim.scheduler().requested, 0);
    }

    #[test]
    fn test_init_with_unusable_surface_fails() {
        let mut sim = snowfall(SnowfallSettings::default(), 100, 100);
        let mut surface = RecordingSurface::new();
        surface.usable = false;
        assert_eq!(sim.init(Some(surface)), Err(InitError::SurfaceUnusable));
        assert!(sim.surface().is_none());
    }

    #[test]
    fn test_init_interaction_without_limiter_fails() {
        let settings = SnowfallSettings::default();
        let mut sim = snowfall(settings.clone(), 100, 100)
            .with_interaction(Box::new(FlakeCaster::new(&settings.cast)));
        assert_eq!(
            sim.init(Some(RecordingSurface::new())),
            Err(InitError::RateLimiterMissing)
        );
    }

    #[test]
    fn test_init_sizes_surface_and_rate() {
        let mut sim = ready(SnowfallSettings::default(), 1200, 800);
        assert_eq!(sim.lifecycle(), Lifecycle::Ready);
        assert_eq!(sim.size(), (1200, 800));
        assert_eq!(sim.surface().unwrap().size, (1200, 800));
        assert!((sim.flakes_per_frame() - 1.4).abs() < 1e-5);

        // Second init is ignored.
        assert_eq!(sim.init(None), Ok(()));
        assert_eq!(sim.lifecycle(), Lifecycle::Ready);
    }

    #[test]
    fn test_resize_recomputes_rate() {
        let mut sim = ready(SnowfallSettings::default(), 1200, 800);
        *sim.viewport_mut() = FixedViewport(600, 300);
        sim.resize();
        assert_eq!(sim.size(), (600, 300));
        assert_eq!(sim.surface().unwrap().size, (600, 300));
        assert!((sim.flakes_per_frame() - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_huge_frequency_spawns_a_bounded_batch() {
        let settings = SnowfallSettings {
            frequency: 1e12,
            ..Default::default()
        };
        let mut sim = ready(settings, 1000, 800);
        assert_eq!(sim.flakes_per_frame(), MAX_FLAKES_PER_FRAME);
        sim.start();
        assert_eq!(sim.flakes().len(), MAX_FLAKES_PER_FRAME as usize);
    }

    #[test]
    fn test_start_twice_schedules_one_frame() {
        let mut sim = ready(no_spawning(), 200, 200);
        sim.start();
        sim.start();
        assert!(sim.is_running());
        assert!(sim.surface().unwrap().visible);
        assert_eq!(sim.scheduler().pending.len(), 1);
        assert_eq!(sim.scheduler().requested, 1);
        assert_eq!(sim.surface().unwrap().clears, 1);
    }

    #[test]
    fn test_stop_cancels_frame_and_hides() {
        let mut sim = ready(no_spawning(), 200, 200);
        sim.start();
        sim.stop();
        assert_eq!(sim.lifecycle(), Lifecycle::Stopped);
        assert!(!sim.has_pending_frame());
        assert!(sim.scheduler().pending.is_empty());
        assert!(!sim.surface().unwrap().visible);

        // Already stopped.
        sim.stop();
        assert_eq!(sim.lifecycle(), Lifecycle::Stopped);
    }

    #[test]
    fn test_stop_before_start_is_noop() {
        let mut sim = ready(no_spawning(), 200, 200);
        sim.stop();
        assert_eq!(sim.lifecycle(), Lifecycle::Ready);
    }

    #[test]
    fn test_in_flight_frame_after_stop_does_nothing() {
        let mut sim = ready(SnowfallSettings::default(), 1000, 800);
        sim.start();
        sim.stop();
        let report = sim.frame();
        assert_eq!(report, FrameReport::default());
        assert_eq!(sim.scheduler().requested, 1);
    }

    #[test]
    fn test_restart_after_stop() {
        let mut sim = ready(no_spawning(), 200, 200);
        sim.start();
        sim.stop();
        sim.start();
        assert!(sim.is_running());
        assert_eq!(sim.scheduler().pending.len(), 1);
        assert_eq!(sim.scheduler().requested, 2);
    }

    #[test]
    fn test_flake_past_bottom_is_culled_and_not_drawn() {
        let mut sim = ready(no_spawning(), 200, 100);
        sim.start();
        sim.flakes.push(flake_at(50.0, 100.0 + 50.0 + 1.0));
        sim.flakes.push(flake_at(50.0, 10.0));

        let report = fire(&mut sim);

        assert_eq!(report.culled, 1);
        assert_eq!(report.live, 1);
        assert_eq!(sim.surface().unwrap().circles.len(), 1);
        assert!(sim.surface().unwrap().circles[0].0.y < 100.0);

        fire(&mut sim);
        assert_eq!(sim.flakes().len(), 1);
    }

    #[test]
    fn test_flakes_past_side_margins_are_culled() {
        let mut sim = ready(no_spawning(), 200, 100);
        sim.start();
        sim.flakes.push(flake_at(-51.0, 10.0));
        sim.flakes.push(flake_at(251.0, 10.0));
        sim.flakes.push(flake_at(-49.0, 10.0));

        let report = fire(&mut sim);

        assert_eq!(report.culled, 2);
        assert_eq!(sim.flakes().len(), 1);
    }

    #[test]
    fn test_surface_loss_stops_simulation() {
        let mut sim = ready(no_spawning(), 200, 100);
        sim.start();
        sim.surface_mut().unwrap().usable = false;

        let report = fire(&mut sim);

        assert_eq!(report, FrameReport::default());
        assert_eq!(sim.lifecycle(), Lifecycle::Stopped);
        assert!(sim.scheduler().pending.is_empty());
    }

    #[test]
    fn test_end_to_end_spawn_sizes() {
        // (1000 / 100) * 4.2 / 60 = 0.7 flakes per frame.
        let settings = SnowfallSettings {
            frequency: 4.2,
            ..Default::default()
        };
        let flake = settings.flake.clone();
        let mut sim = ready(settings, 1000, 800);
        assert!((sim.flakes_per_frame() - 0.7).abs() < 1e-5);

        sim.start();
        let mut reports = Vec::new();
        for _ in 0..9 {
            reports.push(fire(&mut sim));
        }

        assert!(reports.iter().all(|r| r.spawned <= 1 && r.culled == 0));
        assert!(sim.flakes().len() <= 10);
        let lower = flake.min_size * (1.0 - flake.size_noise);
        let upper = flake.max_size * (1.0 + flake.size_noise);
        for f in sim.flakes() {
            assert!(f.size() >= lower - 1e-6 && f.size() <= upper + 1e-6);
            assert!(f.position().x >= -1.0 && f.position().x <= 1001.0);
        }
    }

    #[test]
    fn test_spawn_rate_mean_converges() {
        let settings = SnowfallSettings {
            frequency: 4.2,
            ..Default::default()
        };
        // A short surface keeps the live population small.
        let mut sim = ready(settings, 1000, 10);
        sim.start();
        let frames = 20_000;
        let spawned: usize = (0..frames).map(|_| fire(&mut sim).spawned).sum();
        let mean = spawned as f32 / frames as f32;
        assert!((mean - 0.7).abs() < 0.02, "mean spawn rate {mean}");
    }

    #[test]
    fn test_new_flake_drawn_in_its_first_frame() {
        let settings = SnowfallSettings {
            frequency: 600.0,
            ..Default::default()
        };
        // 100 px wide: exactly 10 flakes per frame.
        let mut sim = ready(settings, 100, 100);
        sim.start();
        assert_eq!(sim.flakes().len(), 10);
        assert_eq!(sim.surface().unwrap().circles.len(), 10);
    }

    fn casting(width: u32, height: u32) -> TestSnowfall {
        let mut sim = snowfall(no_spawning(), width, height).with_pointer_casting();
        sim.init(Some(RecordingSurface::new())).unwrap();
        sim
    }

    #[test]
    fn test_pointer_motion_reaches_nearby_flake() {
        let mut sim = casting(400, 400);
        sim.start();
        sim.flakes.push(flake_at(200.0, 200.0));

        let before = sim.flakes()[0].particle().velocity();

        // First sample moves from the origin: velocity (200, 200), full
        // intensity 0.05 at the flake's cell.
        let t0 = Instant::now();
        sim.pointer_moved(t0, &PointerEvent::Move { x: 200.0, y: 200.0 });
        fire(&mut sim);
        let cast = sim.flakes()[0].particle().external_force(CAST_FORCE);
        assert!(cast.is_some_and(|f| f.abs_diff_eq(Vector2::new(10.0, 10.0), 1e-4)));

        // The cast acted in this same frame's step. Weight and friction cancel
        // at the flake's terminal velocity.
        let after = sim.flakes()[0].particle().velocity();
        assert!(after.abs_diff_eq(before + Vector2::new(10.0, 10.0), 1e-4));

        // Pointer held still: no contribution, stale force retracted.
        sim.pointer_moved(
            t0 + Duration::from_millis(100),
            &PointerEvent::Move { x: 200.0, y: 200.0 },
        );
        fire(&mut sim);
        assert_eq!(sim.flakes()[0].particle().external_force(CAST_FORCE), None);
    }

    #[test]
    fn test_resize_shrinks_cast_field_and_radius() {
        // At 400x400 the radius is 160: a sample at (150, 50) reaches (99, 50).
        let mut wide = casting(400, 400);
        wide.start();
        wide.flakes.push(flake_at(99.0, 50.0));
        wide.pointer_moved(Instant::now(), &PointerEvent::Move { x: 150.0, y: 50.0 });
        fire(&mut wide);
        assert!(wide.flakes()[0].particle().external_force(CAST_FORCE).is_some());

        // At 100x100 the radius is 40 and the sample lies off the field.
        let mut narrow = casting(400, 400);
        *narrow.viewport_mut() = FixedViewport(100, 100);
        narrow.resize();
        narrow.start();
        narrow.flakes.push(flake_at(99.0, 50.0));
        narrow.pointer_moved(Instant::now(), &PointerEvent::Move { x: 150.0, y: 50.0 });
        fire(&mut narrow);
        assert_eq!(narrow.flakes()[0].particle().external_force(CAST_FORCE), None);

        // A sample within the new radius still reaches it.
        narrow.pointer_moved(
            Instant::now() + Duration::from_millis(100),
            &PointerEvent::Move { x: 120.0, y: 50.0 },
        );
        fire(&mut narrow);
        assert!(narrow.flakes()[0].particle().external_force(CAST_FORCE).is_some());
    }

    #[test]
    fn test_throttled_sample_released_by_poll() {
        let mut sim = casting(400, 400);
        sim.start();
        sim.flakes.push(flake_at(100.0, 100.0));

        let t0 = Instant::now();
        sim.pointer_moved(t0, &PointerEvent::Move { x: 300.0, y: 300.0 });
        fire(&mut sim);
        assert_eq!(sim.flakes()[0].particle().external_force(CAST_FORCE), None);

        sim.pointer_moved(
            t0 + Duration::from_millis(10),
            &PointerEvent::Move { x: 100.0, y: 100.0 },
        );
        sim.poll_pointer(t0 + Duration::from_millis(20));
        fire(&mut sim);
        assert_eq!(sim.flakes()[0].particle().external_force(CAST_FORCE), None);

        sim.poll_pointer(t0 + Duration::from_millis(60));
        fire(&mut sim);
        assert!(sim.flakes()[0].particle().external_force(CAST_FORCE).is_some());
    }

    #[test]
    fn test_pointer_ignored_while_stopped() {
        let mut sim = casting(400, 400);
        sim.flakes.push(flake_at(200.0, 200.0));
        sim.pointer_moved(Instant::now(), &PointerEvent::Move { x: 200.0, y: 200.0 });
        sim.start();
        assert_eq!(sim.flakes()[0].particle().external_force(CAST_FORCE), None);
    }

    #[test]
    fn test_stop_strips_lingering_cast_forces() {
        let mut sim = casting(400, 400);
        sim.start();
        sim.flakes.push(flake_at(200.0, 200.0));
        sim.flakes[0]
            .particle_mut()
            .set_external_force(CAST_FORCE, Vector2::new(2.0, 0.0));
        sim.pointer_moved(Instant::now(), &PointerEvent::Move { x: 190.0, y: 200.0 });

        sim.stop();
        assert_eq!(sim.flakes()[0].particle().external_force(CAST_FORCE), None);

        // Nothing painted before the stop survives into the next run.
        sim.start();
        assert_eq!(sim.flakes()[0].particle().external_force(CAST_FORCE), None);
    }

    #[test]
    fn test_touch_uses_first_contact() {
        let mut sim = casting(400, 400);
        sim.start();
        sim.flakes.push(flake_at(50.0, 50.0));
        sim.pointer_moved(
            Instant::now(),
            &PointerEvent::Touch {
                touches: vec![Point::new(50.0, 50.0), Point::new(390.0, 390.0)],
            },
        );
        fire(&mut sim);
        assert!(sim.flakes()[0].particle().external_force(CAST_FORCE).is_some());
    }
}
