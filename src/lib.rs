//! # Instrument Cluster
//!
//! An animated dashboard core: instruments that ease a target value
//! toward a displayed value every frame and repaint only what changed,
//! rendering through `embedded-graphics` onto per-instrument layered
//! surfaces.
//!
//! ## Architecture
//!
//! | Module       | Responsibility                                        |
//! |--------------|-------------------------------------------------------|
//! | `smoothing`  | Range clamping + exponential target/display easing    |
//! | `angle`      | Value to dial-angle mapping                           |
//! | `dirty`      | Static/dynamic layer redraw flags                     |
//! | `surface`    | Cached static layer + composite, pixel-scale aware    |
//! | `source`     | Observable stores, subscriptions, per-frame coalescing|
//! | `instrument` | Lifecycle state machine, painter strategy, frame step |
//! | `widgets`    | Gauge, bar, and readout painters                      |
//! | `config`     | Layout/timing constants, `InstrumentOptions`          |
//! | `error`      | `ConfigError`, `SetupError`                           |
//! | `colors`     | Rgb565 palette                                        |
//! | `styles`     | Const text styles                                     |
//!
//! The library is headless: everything renders into any
//! `DrawTarget<Color = Rgb565>`, and the whole core is exercised by unit
//! tests without a window. The `cluster-sim` binary presents the cluster
//! in a simulator window.
//!
//! ## Frame Model
//!
//! Single-threaded and cooperative: the host calls
//! [`Instrument::frame`](instrument::Instrument::frame) on each mounted
//! instrument once per animation frame, in mount order. Instruments whose
//! display value has converged and whose layers are clean do zero drawing
//! work for that frame.

pub mod angle;
pub mod colors;
pub mod config;
pub mod dirty;
pub mod error;
pub mod instrument;
pub mod smoothing;
pub mod source;
pub mod styles;
pub mod surface;
pub mod widgets;

pub use config::InstrumentOptions;
pub use error::{ConfigError, SetupError};
pub use instrument::{Instrument, InstrumentPainter, Phase};
pub use source::{SharedValue, Subscription, ValueSource};
pub use widgets::{BarPainter, GaugePainter, ReadoutPainter};
