//! Touch pressure calibration
//!
//! Many touchscreens report a force value without really measuring it. Before
//! a layout is built, touches on the menu are sampled: a screen that never
//! reports a force strictly between 0 and 1 gets position input right away.
//! Otherwise the user is asked to press harder and softer, and then confirms
//! or rejects pressure input.
//!
//! # State Machine
//!
//! ```text
//! Detecting ─(no usable sample)──────────────────► Finished(Position)
//!    │
//!    └──(usable samples)──► Calibrating ──confirm──► Finished(Pressure)
//!                                │
//!                                └──reject──► Finished(Position)
//! ```

use crate::controls::InputMode;
use statum::{machine, state};
use tracing::{debug, info};

/// Observed force range. Starts inverted (`min > max`) until a usable sample arrives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressureCalibration {
    pub min_force: f64,
    pub max_force: f64,
}

impl Default for PressureCalibration {
    fn default() -> Self {
        Self {
            min_force: 1.0,
            max_force: 0.0,
        }
    }
}

impl PressureCalibration {
    /// Widens the range with `force`. Exactly 0 and 1 carry no information and are ignored.
    pub fn record(&mut self, force: f64) -> bool {
        if force > 0.0 && force < 1.0 {
            self.min_force = self.min_force.min(force);
            self.max_force = self.max_force.max(force);
            true
        } else {
            false
        }
    }

    /// Whether the screen reported at least one usable force.
    pub fn detects_pressure(&self) -> bool {
        self.min_force <= self.max_force
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn input_mode(&self) -> InputMode {
        InputMode::Pressure {
            min: self.min_force,
            max: self.max_force,
        }
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum CalibrationState {
    Detecting,
    Calibrating,
    Finished(InputMode),
}

#[machine]
#[derive(Debug)]
pub struct CalibrationSession<S: CalibrationState> {
    range: PressureCalibration,
    samples: usize,
}

impl<S: CalibrationState> CalibrationSession<S> {
    pub fn range(&self) -> PressureCalibration {
        self.range
    }

    /// Number of usable samples so far.
    pub fn samples(&self) -> usize {
        self.samples
    }

    fn sample(&mut self, force: f64) {
        if self.range.record(force) {
            self.samples += 1;
        }
    }
}

/// Result of the detection phase.
pub enum DetectOutcome {
    /// The screen can sense pressure; keep sampling and ask the user.
    Supported(CalibrationSession<Calibrating>),
    /// No usable sample: position input.
    Unsupported(CalibrationSession<Finished>),
}

impl CalibrationSession<Detecting> {
    pub fn start() -> Self {
        debug!("Detecting touch pressure");
        Self::new(PressureCalibration::default(), 0)
    }

    pub fn record(&mut self, force: f64) {
        self.sample(force);
    }

    pub fn finish_detection(self) -> DetectOutcome {
        if self.range.detects_pressure() {
            info!(
                "Screen reports pressure in [{:.3}, {:.3}], calibrating",
                self.range.min_force, self.range.max_force
            );
            DetectOutcome::Supported(self.transition())
        } else {
            info!("No pressure sensing, using position input");
            DetectOutcome::Unsupported(self.transition_with(InputMode::Position))
        }
    }
}

impl CalibrationSession<Calibrating> {
    pub fn record(&mut self, force: f64) {
        self.sample(force);
    }

    /// Accepts pressure input with the recorded range.
    pub fn confirm(self) -> CalibrationSession<Finished> {
        let mode = self.range.input_mode();
        info!("Pressure input confirmed: {:?}", mode);
        self.transition_with(mode)
    }

    /// Discards the recorded range and falls back to position input.
    pub fn reject(mut self) -> CalibrationSession<Finished> {
        info!("Pressure input rejected");
        self.range.reset();
        self.samples = 0;
        self.transition_with(InputMode::Position)
    }
}

impl CalibrationSession<Finished> {
    /// Input mode for every pedal and analog button of the next layout.
    pub fn mode(&self) -> InputMode {
        self.get_state_data().copied().unwrap_or_default()
    }
}
