//! Simulator demo: a three-instrument cluster in a desktop window.
//!
//! Layout (320x240 logical pixels):
//!
//! ```text
//! +--------------------+----------+
//! |                    |  POWER   |
//! |    SPEED gauge     |   bar    |
//! |    0..260 km/h     +----------+
//! |                    |   TRIP   |
//! |                    | readout  |
//! +--------------------+----------+
//! ```
//!
//! Synthetic signals drive the cluster: a slow sinusoid for speed, its
//! derivative for power (regen shows as the blue bar segment), and the
//! integrated distance for the trip readout.
//!
//! # Controls
//!
//! | Key      | Action                                       |
//! |----------|----------------------------------------------|
//! | `Q`/Esc  | Quit                                         |
//! | `D`      | Dispose and remount the speed gauge          |
//! | `F`      | Freeze / unfreeze the signal feed            |

use std::{error::Error, thread, time::Instant};

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use heapless::String;
use tracing::info;
use tracing_subscriber::EnvFilter;

use instrument_cluster::{
    BarPainter, GaugePainter, Instrument, InstrumentOptions, ReadoutPainter, SharedValue,
    config::{
        BAR_HEIGHT, FRAME_TIME, GAUGE_WIDTH, READOUT_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH,
        SIDE_WIDTH,
    },
};

// =============================================================================
// Cluster Layout
// =============================================================================

const GAUGE_AREA: Rectangle =
    Rectangle::new(Point::zero(), Size::new(GAUGE_WIDTH, SCREEN_HEIGHT));
const BAR_AREA: Rectangle =
    Rectangle::new(Point::new(GAUGE_WIDTH as i32, 0), Size::new(SIDE_WIDTH, BAR_HEIGHT));
const READOUT_AREA: Rectangle = Rectangle::new(
    Point::new(GAUGE_WIDTH as i32, BAR_HEIGHT as i32),
    Size::new(SIDE_WIDTH, READOUT_HEIGHT),
);

// =============================================================================
// Instrument Configuration
// =============================================================================

fn text<const N: usize>(s: &str) -> String<N> {
    String::try_from(s).unwrap_or_default()
}

fn speed_options() -> InstrumentOptions {
    InstrumentOptions {
        min: 0.0,
        max: 260.0,
        start_deg: -210.0,
        end_deg: 30.0,
        label: text("SPEED"),
        unit: text("km/h"),
        ..Default::default()
    }
}

fn power_options() -> InstrumentOptions {
    InstrumentOptions {
        min: -80.0,
        max: 240.0,
        label: text("POWER"),
        unit: text("kW"),
        ..Default::default()
    }
}

fn trip_options() -> InstrumentOptions {
    InstrumentOptions {
        min: 0.0,
        max: 999_999.0,
        // the readout ignores smoothing lag visually; snap it
        damping: 1.0,
        label: text("TRIP"),
        unit: text("km"),
        ..Default::default()
    }
}

fn build_gauge(store: &SharedValue) -> Result<Instrument<GaugePainter>, Box<dyn Error>> {
    let mut gauge = Instrument::new(GaugePainter::default(), speed_options(), 1)?;
    gauge.on_error(|err| tracing::error!(%err, "speed gauge setup failed"));
    gauge.mount();
    gauge.bind_source(store);
    Ok(gauge)
}

// =============================================================================
// Synthetic Signals
// =============================================================================

/// Fake drive cycle: speed swings on a slow sinusoid, power follows the
/// speed derivative (negative while decelerating), distance integrates.
struct DriveCycle {
    t: f32,
    distance_km: f32,
}

impl DriveCycle {
    const fn new() -> Self {
        Self { t: 0.0, distance_km: 1024.0 }
    }

    fn advance(&mut self, dt: f32) -> (f32, f32, f32) {
        self.t += dt;
        let speed = 130.0 + 125.0 * (self.t * 0.35).sin();
        // d(speed)/dt scaled into the power range
        let power = 125.0 * 0.35 * (self.t * 0.35).cos() * 4.0 + 30.0;
        self.distance_km += speed * dt / 3600.0;
        (speed, power, self.distance_km)
    }
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Instrument Cluster", &output_settings);

    let speed_store = SharedValue::new(0.0);
    let power_store = SharedValue::new(0.0);
    let trip_store = SharedValue::new(0.0);

    let mut gauge = build_gauge(&speed_store)?;
    let mut bar = Instrument::new(BarPainter, power_options(), 1)?;
    bar.mount();
    bar.bind_source(&power_store);
    let mut readout = Instrument::new(ReadoutPainter, trip_options(), 1)?;
    readout.mount();
    readout.bind_source(&trip_store);

    let mut cycle = DriveCycle::new();
    let mut frozen = false;
    info!("cluster running, Q quits, D remounts the gauge, F freezes the feed");

    'running: loop {
        let frame_start = Instant::now();

        window.update(&display);
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::D => {
                        info!("disposing and remounting the speed gauge");
                        gauge.dispose();
                        gauge = build_gauge(&speed_store)?;
                    }
                    Keycode::F => {
                        frozen = !frozen;
                        info!(frozen, "signal feed toggled");
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        if !frozen {
            let (speed, power, trip) = cycle.advance(FRAME_TIME.as_secs_f32());
            speed_store.set(speed);
            power_store.set(power);
            trip_store.set(trip);
        }

        // mount order: gauge, bar, readout
        gauge.frame(&mut display, GAUGE_AREA)?;
        bar.frame(&mut display, BAR_AREA)?;
        readout.frame(&mut display, READOUT_AREA)?;

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    gauge.dispose();
    bar.dispose();
    readout.dispose();
    Ok(())
}
