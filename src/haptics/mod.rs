//! Haptic feedback mixing
//!
//! Many controls may want the single vibration motor at the same time: a
//! joystick held beyond its rim, a pedal floored, a button being pressed. The
//! [`HapticMixer`] keeps at most one repeating request per control and fires
//! them from a periodic tick.
//!
//! # Request lifecycle
//!
//! ```text
//! queue(id) ──► live ──► tick: due? ──► pulse + reschedule
//!                 │
//!           unqueue(id)
//!                 ▼
//!              killed ──► tick: sweep ──► removed
//! ```
//!
//! Handlers never remove requests directly. They only flag them, and the tick
//! is the single place where the working set shrinks.

pub mod actuator;

pub use actuator::{Actuator, NullActuator, RecordingActuator, TracingActuator};

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Converts fractional milliseconds into a [`Duration`].
pub fn millis(ms: f64) -> Duration {
    Duration::from_nanos((ms.max(0.0) * 1_000_000.0).round() as u64)
}

/// Pulse/pause pair of a repeating vibration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VibrationPattern {
    pub pulse: Duration,
    pub pause: Duration,
}

impl VibrationPattern {
    pub fn from_millis(pulse_ms: f64, pause_ms: f64) -> Self {
        Self {
            pulse: millis(pulse_ms),
            pause: millis(pause_ms),
        }
    }
}

#[derive(Clone, Debug)]
struct VibrationRequest {
    next_fire: Instant,
    pattern: VibrationPattern,
    kill: bool,
}

/// Arbitrates repeating vibration requests onto one actuator.
#[derive(Debug, Default)]
pub struct HapticMixer {
    requests: BTreeMap<String, VibrationRequest>,
}

impl HapticMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a repeating vibration for `id`, replacing any previous request.
    ///
    /// The first pulse fires on the first tick strictly after `now`.
    pub fn queue(&mut self, id: &str, pattern: VibrationPattern, now: Instant) {
        trace!("Queueing vibration for {}: {:?}", id, pattern);
        self.requests.insert(
            id.to_string(),
            VibrationRequest {
                next_fire: now,
                pattern,
                kill: false,
            },
        );
    }

    /// Flags the request of `id` for removal at the next tick.
    pub fn unqueue(&mut self, id: &str) {
        if let Some(request) = self.requests.get_mut(id) {
            request.kill = true;
        }
    }

    /// Whether `id` has a request that will still fire.
    pub fn is_queued(&self, id: &str) -> bool {
        self.requests.get(id).is_some_and(|r| !r.kill)
    }

    /// Number of stored requests, including killed ones not yet swept.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Sweeps killed requests and fires every due one. Returns the pulses fired.
    pub fn tick(&mut self, now: Instant, actuator: &mut dyn Actuator) -> usize {
        let before = self.requests.len();
        self.requests.retain(|_, request| !request.kill);
        if self.requests.len() != before {
            debug!("Swept {} killed vibration request(s)", before - self.requests.len());
        }

        let mut fired = 0;
        for (id, request) in self.requests.iter_mut() {
            if now > request.next_fire {
                request.next_fire = now + request.pattern.pulse + request.pattern.pause;
                trace!("Vibration pulse for {}: {:?}", id, request.pattern.pulse);
                actuator.vibrate_pattern(&[request.pattern.pulse, request.pattern.pause]);
                fired += 1;
            }
        }
        fired
    }
}
