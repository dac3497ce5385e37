//! Physical vibration motor abstraction.

use std::time::Duration;
use tracing::debug;

/// The single vibration motor of the device.
pub trait Actuator {
    /// Runs the motor for `pulse`.
    fn vibrate(&mut self, pulse: Duration);

    /// Pattern form `[pulse, pause, pulse, ...]`. Motors without pattern
    /// support only play the first pulse.
    fn vibrate_pattern(&mut self, pattern: &[Duration]) {
        if let Some(pulse) = pattern.first() {
            self.vibrate(*pulse);
        }
    }
}

/// Actuator for devices without a motor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullActuator;

impl Actuator for NullActuator {
    fn vibrate(&mut self, _pulse: Duration) {}
}

/// Logs every pulse instead of driving hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingActuator;

impl Actuator for TracingActuator {
    fn vibrate(&mut self, pulse: Duration) {
        debug!("Vibrate {:.1}ms", pulse.as_secs_f64() * 1000.0);
    }

    fn vibrate_pattern(&mut self, pattern: &[Duration]) {
        debug!("Vibrate pattern {:?}", pattern);
    }
}

/// Keeps every pulse it receives, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingActuator {
    pub pulses: Vec<Duration>,
}

impl Actuator for RecordingActuator {
    fn vibrate(&mut self, pulse: Duration) {
        self.pulses.push(pulse);
    }
}
