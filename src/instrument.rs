//! The generic instrument: one state machine shared by every widget.
//!
//! # Painter Strategy
//!
//! The gauge, bar, and readout differ only in how they paint. Everything
//! else (lifecycle, smoothing, dirty tracking, store binding) lives here
//! once, parameterized by an [`InstrumentPainter`] with two hooks: a
//! static-layer builder and a dynamic-layer updater. No per-widget
//! subclassing.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --mount()--> Initializing --setup ok--> Ready
//!                                 |                       |
//!                             setup fails             dispose()
//!                                 v                       v
//!                              Failed ---dispose()--> Disposed
//! ```
//!
//! Surface setup does not happen inside `mount()`: it completes on a later
//! `frame()` call, when the host first supplies the container geometry.
//! That gap is the crate's one suspension point, guarded by a cancellation
//! flag that `dispose()` sets and the setup continuation checks before
//! touching anything. A gauge disposed between mount and its first frame
//! therefore never allocates a surface and never paints.
//!
//! `Failed` is terminal and non-rendering: the error hook fires exactly
//! once and every subsequent `frame()` is a no-op. A broken instrument
//! must not panic inside the host's frame loop, where it would take the
//! healthy instruments down with it.
//!
//! # Per-frame Step (Ready)
//!
//! 1. Drain the coalescing inbox; apply the latest bound-store value.
//! 2. If the container size changed, resize the surface and dirty both
//!    layers (the redraw happens below, exactly once).
//! 3. If not converged, tick the smoother and dirty the dynamic layer.
//! 4. Repaint only the dirty layers; present only if something repainted.
//!
//! A converged, unchanged instrument falls through all four steps doing
//! zero drawing work.

use std::{cell::Cell, rc::Rc};

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use tracing::{debug, error, warn};

use crate::{
    config::InstrumentOptions,
    dirty::DirtyLayers,
    error::{ConfigError, SetupError},
    smoothing::{Range, SmoothedValue},
    source::{Subscription, UpdateInbox, ValueSource},
    surface::{FrameLayer, LayerSurface},
};

// =============================================================================
// Phase
// =============================================================================

/// Instrument lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, not yet mounted.
    Uninitialized,
    /// Mounted; surface setup pending the first frame with a container.
    Initializing,
    /// Surface live, rendering on demand.
    Ready,
    /// Surface setup failed. Terminal, non-rendering.
    Failed,
    /// Disposed. Terminal; all resources released.
    Disposed,
}

// =============================================================================
// Painter Strategy
// =============================================================================

/// The two draw hooks a widget supplies.
pub trait InstrumentPainter {
    /// Paint the cached static layer: dial face, ticks, labels, frame.
    fn draw_static(&mut self, layer: &mut FrameLayer, options: &InstrumentOptions);

    /// Paint the value-dependent elements over a fresh copy of the static
    /// layer. `display` is the smoothed display value, already in range.
    fn draw_dynamic(&mut self, layer: &mut FrameLayer, options: &InstrumentOptions, display: f32);
}

/// Callback receiving setup failures (the error event surface).
pub type ErrorHook = Box<dyn FnMut(&SetupError)>;

// =============================================================================
// Instrument
// =============================================================================

/// One widget instance: painter + smoother + dirty flags + surface.
pub struct Instrument<P: InstrumentPainter> {
    painter: P,
    options: InstrumentOptions,
    phase: Phase,
    smoother: SmoothedValue,
    dirty: DirtyLayers,
    surface: Option<LayerSurface>,
    inbox: UpdateInbox,
    subscription: Option<Subscription>,
    cancelled: Rc<Cell<bool>>,
    error_hook: Option<ErrorHook>,
    pixel_scale: u32,
}

impl<P: InstrumentPainter> Instrument<P> {
    /// Build an instrument. Fails if `options` do not validate; nothing is
    /// allocated until the first frame after [`mount`](Self::mount).
    pub fn new(painter: P, options: InstrumentOptions, pixel_scale: u32) -> Result<Self, ConfigError> {
        options.validate()?;
        let range = Range::new(options.min, options.max);
        let smoother = SmoothedValue::new(range, options.damping, options.min);
        Ok(Self {
            painter,
            options,
            phase: Phase::Uninitialized,
            smoother,
            dirty: DirtyLayers::default(),
            surface: None,
            inbox: UpdateInbox::new(),
            subscription: None,
            cancelled: Rc::new(Cell::new(false)),
            error_hook: None,
            pixel_scale,
        })
    }

    #[inline]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current (possibly unconverged) display value.
    #[inline]
    pub fn display_value(&self) -> f32 {
        self.smoother.display()
    }

    #[inline]
    pub const fn options(&self) -> &InstrumentOptions {
        &self.options
    }

    /// Register the setup-error callback. At most one hook; a new
    /// registration replaces the old.
    pub fn on_error(&mut self, hook: impl FnMut(&SetupError) + 'static) {
        self.error_hook = Some(Box::new(hook));
    }

    /// Begin the lifecycle. Surface setup completes on a later
    /// [`frame`](Self::frame), once the host supplies a container.
    pub fn mount(&mut self) {
        if self.phase != Phase::Uninitialized {
            warn!(phase = ?self.phase, "mount ignored outside Uninitialized");
            return;
        }
        self.phase = Phase::Initializing;
        debug!("instrument mounted, awaiting first frame");
    }

    /// Replace the configuration. Validation runs first; on failure the
    /// previous configuration stays active untouched. On success the
    /// target and display re-clamp into the new range and both layers are
    /// marked dirty.
    pub fn configure(&mut self, options: InstrumentOptions) -> Result<(), ConfigError> {
        options.validate()?;
        self.smoother
            .reconfigure(Range::new(options.min, options.max), options.damping);
        self.options = options;
        self.dirty.mark_static();
        self.dirty.mark_dynamic();
        Ok(())
    }

    /// Imperative value assignment. Applies immediately (no coalescing);
    /// dirties the dynamic layer only if the effective target changed.
    pub fn set_value(&mut self, value: f32) {
        if self.smoother.set_target(value) {
            self.dirty.mark_dynamic();
        }
    }

    /// Bind an observable store. Any previous binding is disposed first,
    /// so at most one subscription is live and no listener leaks across
    /// rebinds. The store's current value seeds the inbox; emissions
    /// coalesce there until the next frame.
    pub fn bind_source(&mut self, source: &impl ValueSource) {
        self.subscription = None; // drop guard unsubscribes the old store
        let inbox = self.inbox.clone();
        inbox.post(source.current());
        self.subscription = Some(source.subscribe(Rc::new(move |v| inbox.post(v))));
    }

    /// Resize the rendering surface. Ready-only; both layers are marked
    /// dirty and the single redraw happens on the next frame, never here.
    pub fn resize(&mut self, logical: Size) {
        if self.phase != Phase::Ready {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match surface.resize(logical) {
            Ok(()) => {
                self.dirty.mark_static();
                self.dirty.mark_dynamic();
            }
            Err(err) => warn!(%err, "resize rejected, keeping previous surface"),
        }
    }

    /// Tear down from any phase. Sets the cancellation flag for an
    /// in-flight setup, drops the store subscription, and releases the
    /// surface buffers. No draw work happens afterward.
    pub fn dispose(&mut self) {
        self.cancelled.set(true);
        self.subscription = None;
        if let Some(mut surface) = self.surface.take() {
            surface.release();
        }
        self.phase = Phase::Disposed;
        debug!("instrument disposed");
    }

    /// Drive one animation frame. `container` is the instrument's region
    /// on the host display, in logical pixels.
    ///
    /// In `Initializing` this is the setup continuation; in `Ready` the
    /// per-frame render step; in every other phase a no-op.
    pub fn frame<D>(&mut self, target: &mut D, container: Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self.phase {
            Phase::Initializing => {
                // resuming after the mount->frame gap: cancellation first
                if self.cancelled.get() {
                    self.phase = Phase::Disposed;
                    return Ok(());
                }
                match LayerSurface::new(container.size, self.pixel_scale) {
                    Ok(surface) => {
                        self.surface = Some(surface);
                        self.dirty = DirtyLayers::all_dirty();
                        self.phase = Phase::Ready;
                        debug!("surface ready, entering render loop");
                        self.ready_step(target, container)
                    }
                    Err(err) => {
                        error!(%err, "surface setup failed");
                        self.phase = Phase::Failed;
                        if let Some(hook) = self.error_hook.as_mut() {
                            hook(&err);
                        }
                        Ok(())
                    }
                }
            }
            Phase::Ready => self.ready_step(target, container),
            Phase::Uninitialized | Phase::Failed | Phase::Disposed => Ok(()),
        }
    }

    fn ready_step<D>(&mut self, target: &mut D, container: Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if let Some(value) = self.inbox.take() {
            self.set_value(value);
        }

        if self.surface.as_ref().is_some_and(|s| s.logical_size() != container.size) {
            self.resize(container.size);
        }

        if !self.smoother.is_converged() {
            self.smoother.tick();
            self.dirty.mark_dynamic();
        }

        let repaint_static = self.dirty.consume_static();
        let repaint_dynamic = self.dirty.consume_dynamic() || repaint_static;
        if !repaint_dynamic {
            return Ok(()); // idle frame, zero drawing work
        }

        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        if repaint_static {
            let painter = &mut self.painter;
            let options = &self.options;
            surface.draw_static(|layer| painter.draw_static(layer, options));
        }
        let painter = &mut self.painter;
        let options = &self.options;
        let display = self.smoother.display();
        surface.draw_dynamic(|layer| painter.draw_dynamic(layer, options, display));

        surface.present(target, container.top_left)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use heapless::String;

    /// Painter that counts invocations instead of drawing.
    struct SpyPainter {
        static_draws: Rc<Cell<u32>>,
        dynamic_draws: Rc<Cell<u32>>,
        last_display: Rc<Cell<f32>>,
    }

    struct SpyCounters {
        static_draws: Rc<Cell<u32>>,
        dynamic_draws: Rc<Cell<u32>>,
        last_display: Rc<Cell<f32>>,
    }

    impl SpyPainter {
        fn new() -> (Self, SpyCounters) {
            let static_draws = Rc::new(Cell::new(0));
            let dynamic_draws = Rc::new(Cell::new(0));
            let last_display = Rc::new(Cell::new(f32::NAN));
            let counters = SpyCounters {
                static_draws: Rc::clone(&static_draws),
                dynamic_draws: Rc::clone(&dynamic_draws),
                last_display: Rc::clone(&last_display),
            };
            (Self { static_draws, dynamic_draws, last_display }, counters)
        }
    }

    impl InstrumentPainter for SpyPainter {
        fn draw_static(&mut self, _layer: &mut FrameLayer, _options: &InstrumentOptions) {
            self.static_draws.set(self.static_draws.get() + 1);
        }

        fn draw_dynamic(&mut self, _layer: &mut FrameLayer, _options: &InstrumentOptions, display: f32) {
            self.dynamic_draws.set(self.dynamic_draws.get() + 1);
            self.last_display.set(display);
        }
    }

    fn snap_options() -> InstrumentOptions {
        // damping 1.0 converges in a single tick, keeping frame counts exact
        InstrumentOptions { damping: 1.0, ..Default::default() }
    }

    fn display() -> MockDisplay<Rgb565> {
        let mut d = MockDisplay::new();
        d.set_allow_overdraw(true);
        d
    }

    const CONTAINER: Rectangle = Rectangle::new(Point::zero(), Size::new(16, 16));

    fn ready_instrument() -> (Instrument<SpyPainter>, SpyCounters) {
        let (painter, counters) = SpyPainter::new();
        let mut instrument = Instrument::new(painter, snap_options(), 1).unwrap();
        instrument.mount();
        instrument.frame(&mut display(), CONTAINER).unwrap();
        assert_eq!(instrument.phase(), Phase::Ready);
        (instrument, counters)
    }

    #[test]
    fn test_first_frame_completes_setup_and_paints_both_layers() {
        let (instrument, counters) = ready_instrument();
        assert_eq!(counters.static_draws.get(), 1);
        assert_eq!(counters.dynamic_draws.get(), 1);
        drop(instrument);
    }

    #[test]
    fn test_frame_before_mount_is_a_noop() {
        let (painter, counters) = SpyPainter::new();
        let mut instrument = Instrument::new(painter, snap_options(), 1).unwrap();
        instrument.frame(&mut display(), CONTAINER).unwrap();
        assert_eq!(instrument.phase(), Phase::Uninitialized);
        assert_eq!(counters.static_draws.get(), 0);
    }

    #[test]
    fn test_dispose_mid_setup_prevents_all_drawing() {
        let (painter, counters) = SpyPainter::new();
        let mut instrument = Instrument::new(painter, snap_options(), 1).unwrap();
        instrument.mount();
        instrument.dispose(); // before the first frame

        instrument.frame(&mut display(), CONTAINER).unwrap();
        instrument.frame(&mut display(), CONTAINER).unwrap();
        assert_eq!(instrument.phase(), Phase::Disposed);
        assert_eq!(counters.static_draws.get(), 0, "no draw calls after mid-setup disposal");
        assert_eq!(counters.dynamic_draws.get(), 0);
    }

    #[test]
    fn test_setup_failure_fires_hook_once_and_stops_rendering() {
        let (painter, counters) = SpyPainter::new();
        let mut instrument = Instrument::new(painter, snap_options(), 1).unwrap();
        let errors = Rc::new(Cell::new(0u32));
        let errors_in_hook = Rc::clone(&errors);
        instrument.on_error(move |err| {
            assert!(matches!(err, SetupError::EmptyContainer { .. }));
            errors_in_hook.set(errors_in_hook.get() + 1);
        });

        instrument.mount();
        let empty = Rectangle::new(Point::zero(), Size::zero());
        instrument.frame(&mut display(), empty).unwrap();
        assert_eq!(instrument.phase(), Phase::Failed);
        assert_eq!(errors.get(), 1);

        // later frames with a valid container must not retry or paint
        instrument.frame(&mut display(), CONTAINER).unwrap();
        assert_eq!(errors.get(), 1, "error hook fires exactly once");
        assert_eq!(counters.dynamic_draws.get(), 0);
    }

    #[test]
    fn test_converged_instrument_does_no_frame_work() {
        let (mut instrument, counters) = ready_instrument();
        let after_setup = counters.dynamic_draws.get();

        for _ in 0..5 {
            instrument.frame(&mut display(), CONTAINER).unwrap();
        }
        assert_eq!(counters.dynamic_draws.get(), after_setup, "idle frames must not repaint");
        assert_eq!(counters.static_draws.get(), 1);
    }

    #[test]
    fn test_set_value_repaints_dynamic_only() {
        let (mut instrument, counters) = ready_instrument();
        instrument.set_value(42.0);
        instrument.frame(&mut display(), CONTAINER).unwrap();
        assert_eq!(counters.static_draws.get(), 1, "static layer stays cached");
        assert_eq!(counters.dynamic_draws.get(), 2);
        assert_eq!(counters.last_display.get(), 42.0);
    }

    #[test]
    fn test_bound_store_coalesces_to_one_target_per_frame() {
        let (mut instrument, counters) = ready_instrument();
        let store = crate::source::SharedValue::new(0.0);
        instrument.bind_source(&store);

        store.set(10.0);
        store.set(20.0);
        store.set(30.0);
        instrument.frame(&mut display(), CONTAINER).unwrap();
        assert_eq!(counters.last_display.get(), 30.0, "only the last emission is applied");
        let after = counters.dynamic_draws.get();

        instrument.frame(&mut display(), CONTAINER).unwrap();
        assert_eq!(counters.dynamic_draws.get(), after, "coalesced burst costs one repaint");
    }

    #[test]
    fn test_rebind_disposes_previous_subscription() {
        let (mut instrument, _counters) = ready_instrument();
        let first = crate::source::SharedValue::new(1.0);
        let second = crate::source::SharedValue::new(2.0);

        instrument.bind_source(&first);
        assert_eq!(first.listener_count(), 1);
        instrument.bind_source(&second);
        assert_eq!(first.listener_count(), 0, "rebinding must unsubscribe the old store");
        assert_eq!(second.listener_count(), 1);

        instrument.dispose();
        assert_eq!(second.listener_count(), 0, "dispose drops the live subscription");
    }

    #[test]
    fn test_configure_failure_keeps_previous_config() {
        let (mut instrument, _counters) = ready_instrument();
        let good = instrument.options().clone();

        let mut bad = good.clone();
        bad.min = 500.0; // min > max
        assert!(instrument.configure(bad).is_err());
        assert_eq!(instrument.options(), &good, "rejected configure must leave options untouched");

        let mut bad = good.clone();
        bad.max = f32::NAN;
        assert!(instrument.configure(bad).is_err());
        assert_eq!(instrument.options(), &good);
    }

    #[test]
    fn test_configure_success_reclamps_and_repaints_everything() {
        let (mut instrument, counters) = ready_instrument();
        instrument.set_value(90.0);
        instrument.frame(&mut display(), CONTAINER).unwrap();

        let mut options = snap_options();
        options.max = 50.0;
        options.label = String::try_from("POWER").unwrap();
        instrument.configure(options).unwrap();
        instrument.frame(&mut display(), CONTAINER).unwrap();

        assert_eq!(counters.static_draws.get(), 2, "new config rebuilds the static layer");
        assert_eq!(counters.last_display.get(), 50.0, "display re-clamps into the new range");
    }

    #[test]
    fn test_container_size_change_triggers_single_full_repaint() {
        let (mut instrument, counters) = ready_instrument();
        let grown = Rectangle::new(Point::zero(), Size::new(24, 24));
        instrument.frame(&mut display(), grown).unwrap();
        assert_eq!(counters.static_draws.get(), 2);
        assert_eq!(counters.dynamic_draws.get(), 2);

        instrument.frame(&mut display(), grown).unwrap();
        assert_eq!(counters.static_draws.get(), 2, "stable size must not keep repainting");
    }

    #[test]
    fn test_invalid_options_rejected_at_construction() {
        let (painter, _counters) = SpyPainter::new();
        let options = InstrumentOptions { damping: 0.0, ..Default::default() };
        assert!(matches!(
            Instrument::new(painter, options, 1),
            Err(ConfigError::InvalidDamping { .. })
        ));
    }

    #[test]
    fn test_dispose_is_terminal_from_ready() {
        let (mut instrument, counters) = ready_instrument();
        instrument.dispose();
        let drawn = counters.dynamic_draws.get();

        instrument.set_value(99.0);
        instrument.frame(&mut display(), CONTAINER).unwrap();
        assert_eq!(instrument.phase(), Phase::Disposed);
        assert_eq!(counters.dynamic_draws.get(), drawn);
    }
}
