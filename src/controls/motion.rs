//! Motion sensor axes.
//!
//! All six axes live in one [`SensorState`] owned by the layout. A motion
//! control only selects which of them it reports. Each physical feed is routed
//! through at most one registered control: the last one built for that feed.

use crate::controls::mnemonic::MotionAxis;
use crate::controls::{quantize, Encoded};
use std::collections::HashMap;
use tracing::trace;

/// Physical sensor delivering motion samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorFeed {
    /// Acceleration including gravity (x, y, z).
    Acceleration,
    /// Device orientation (alpha, beta, gamma) in degrees.
    Orientation,
}

/// Normalized readings of both feeds, each in `[0, 1]` when in range.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorState {
    axes: [f64; 6],
    acceleration_constant: f64,
    /// Feed → id of the control registered for it. Last registration wins.
    routes: HashMap<SensorFeed, String>,
}

impl SensorState {
    pub fn new(acceleration_constant: f64) -> Self {
        Self {
            axes: [0.0; 6],
            acceleration_constant,
            routes: HashMap::new(),
        }
    }

    pub fn axis(&self, axis: MotionAxis) -> f64 {
        self.axes[axis.index()]
    }

    /// Registers `id` as the listener of `feed`, replacing any earlier one.
    pub fn register(&mut self, feed: SensorFeed, id: &str) {
        if let Some(previous) = self.routes.insert(feed, id.to_string()) {
            trace!("{} replaces {} as {:?} listener", id, previous, feed);
        }
    }

    pub fn listener(&self, feed: SensorFeed) -> Option<&str> {
        self.routes.get(&feed).map(String::as_str)
    }

    fn normalize_acceleration(&self, value: f64) -> f64 {
        (value * self.acceleration_constant).clamp(-0.499999, 0.499999) + 0.5
    }

    /// Stores an accelerometer sample. Returns the listener that reports it.
    pub fn accelerate(&mut self, x: f64, y: f64, z: f64) -> Option<&str> {
        if !self.routes.contains_key(&SensorFeed::Acceleration) {
            return None;
        }
        self.axes[0] = self.normalize_acceleration(x);
        self.axes[1] = self.normalize_acceleration(y);
        self.axes[2] = self.normalize_acceleration(z);
        self.listener(SensorFeed::Acceleration)
    }

    /// Stores an orientation sample. Returns the listener that reports it.
    pub fn orient(&mut self, alpha: f64, beta: f64, gamma: f64) -> Option<&str> {
        if !self.routes.contains_key(&SensorFeed::Orientation) {
            return None;
        }
        self.axes[3] = alpha / 360.0;
        self.axes[4] = beta / 180.0 + 0.5;
        self.axes[5] = gamma / 180.0 + 0.5;
        self.listener(SensorFeed::Orientation)
    }
}

impl Default for SensorState {
    fn default() -> Self {
        Self::new(crate::config::MotionSettings::default().acceleration_constant)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
    axis: MotionAxis,
}

impl Motion {
    pub fn new(axis: MotionAxis) -> Self {
        Self { axis }
    }

    pub fn axis(&self) -> MotionAxis {
        self.axis
    }

    pub fn encode(&self, sensors: &SensorState) -> Encoded {
        Encoded::Byte(quantize(sensors.axis(self.axis)))
    }
}
