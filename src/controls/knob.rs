//! Rotary knob.
//!
//! The knob adds the angle turned since the finger landed to the value it had
//! at that moment. Where on the knob the finger lands does not matter, only how
//! far it turns.

use crate::config::HapticSettings;
use crate::controls::{quantize, Encoded, Response, Touch};
use crate::geometry::Geometry;
use std::f64::consts::TAU;

/// Haptic detents per revolution.
pub const SECTORS: f64 = 16.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Knob {
    /// Rotation in turns, `[0, 1)`.
    state: f64,
    /// `state - angle / 2π + 1` at touch start.
    init_state: f64,
    sector: u8,
}

impl Knob {
    pub fn new() -> Self {
        Self {
            state: 0.0,
            init_state: 0.0,
            sector: 0,
        }
    }

    pub fn state(&self) -> f64 {
        self.state
    }

    pub fn attach(&mut self) {
        self.sector = 0;
    }

    pub fn touch_start(
        &mut self,
        geometry: &Geometry,
        touch: &Touch,
        haptics: &HapticSettings,
    ) -> Response {
        self.init_state = self.state - geometry.angle_of(touch.x, touch.y) / TAU + 1.0;
        Response::unchanged().pulse(haptics.press_ms)
    }

    pub fn touch_move(
        &mut self,
        geometry: &Geometry,
        touch: &Touch,
        haptics: &HapticSettings,
    ) -> Response {
        self.state = (self.init_state + geometry.angle_of(touch.x, touch.y) / TAU).rem_euclid(1.0);

        let mut response = Response::changed();
        let sector = (self.state * SECTORS).floor() as u8;
        if haptics.vibrate_on_quadrant_boundary && sector != self.sector {
            response = response.pulse(haptics.sector_ms);
        }
        self.sector = sector;
        response
    }

    pub fn touch_end(&mut self) -> Response {
        Response::changed()
    }

    pub fn encode(&self) -> Encoded {
        Encoded::Byte(quantize(self.state))
    }
}

impl Default for Knob {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Haptic;
    use crate::geometry::{Rect, Shape};
    use crate::haptics::millis;

    fn dial() -> Geometry {
        Geometry::resolve(Rect::new(0.0, 0.0, 300.0, 200.0), Shape::Square)
    }

    fn on_rim(geometry: &Geometry, angle: f64) -> Touch {
        Touch::at(
            geometry.x_center + geometry.half_width * angle.cos(),
            geometry.y_center + geometry.half_height * angle.sin(),
        )
    }

    /// Rotates by a tenth of a turn, then by `delta` grabbed at `start`.
    fn turn(start: f64, delta: f64) -> u8 {
        let geometry = dial();
        let haptics = HapticSettings::default();
        let mut knob = Knob::new();
        knob.touch_start(&geometry, &on_rim(&geometry, 0.0), &haptics);
        knob.touch_move(&geometry, &on_rim(&geometry, TAU / 10.0), &haptics);
        knob.touch_end();

        knob.touch_start(&geometry, &on_rim(&geometry, start), &haptics);
        knob.touch_move(&geometry, &on_rim(&geometry, start + delta), &haptics);
        knob.touch_end();
        match knob.encode() {
            Encoded::Byte(v) => v,
            other => panic!("unexpected encoding {:?}", other),
        }
    }

    #[test]
    fn test_quarter_turn_independent_of_grab_point() {
        let quarter = std::f64::consts::FRAC_PI_2;
        // 0.1 + 0.25 turns
        let expected = turn(0.0, quarter);
        assert_eq!(expected, 89);
        for start in [0.3, 1.0, 2.5, -2.0, 3.1] {
            assert_eq!(turn(start, quarter), expected, "grabbed at {}", start);
        }
    }

    #[test]
    fn test_rotation_accumulates_across_touches() {
        let geometry = dial();
        let haptics = HapticSettings::default();
        let mut knob = Knob::new();
        let quarter = std::f64::consts::FRAC_PI_2;

        knob.touch_start(&geometry, &on_rim(&geometry, 0.0), &haptics);
        knob.touch_move(&geometry, &on_rim(&geometry, quarter), &haptics);
        knob.touch_end();
        knob.touch_start(&geometry, &on_rim(&geometry, 2.0), &haptics);
        knob.touch_move(&geometry, &on_rim(&geometry, 2.0 + quarter), &haptics);

        assert!((knob.state() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_counter_clockwise_wraps_below_zero() {
        let geometry = dial();
        let haptics = HapticSettings::default();
        let mut knob = Knob::new();

        knob.touch_start(&geometry, &on_rim(&geometry, 1.0), &haptics);
        knob.touch_move(&geometry, &on_rim(&geometry, 1.0 - TAU / 8.0), &haptics);
        assert!((knob.state() - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_start_pulses_without_state_change() {
        let geometry = dial();
        let mut knob = Knob::new();
        let response = knob.touch_start(&geometry, &on_rim(&geometry, 0.7), &HapticSettings::default());
        assert!(!response.changed);
        assert_eq!(response.haptics, vec![Haptic::Pulse(millis(40.0))]);
    }

    #[test]
    fn test_detent_pulse_on_sector_change() {
        let geometry = dial();
        let haptics = HapticSettings::default();
        let mut knob = Knob::new();
        knob.touch_start(&geometry, &on_rim(&geometry, 0.0), &haptics);

        let small = knob.touch_move(&geometry, &on_rim(&geometry, 0.1), &haptics);
        assert!(small.haptics.is_empty());

        let detent = knob.touch_move(&geometry, &on_rim(&geometry, 0.5), &haptics);
        assert_eq!(detent.haptics, vec![Haptic::Pulse(millis(20.0))]);
    }

    #[test]
    fn test_detents_can_be_disabled() {
        let geometry = dial();
        let haptics = HapticSettings {
            vibrate_on_quadrant_boundary: false,
            ..HapticSettings::default()
        };
        let mut knob = Knob::new();
        knob.touch_start(&geometry, &on_rim(&geometry, 0.0), &haptics);

        let turned = knob.touch_move(&geometry, &on_rim(&geometry, 0.5), &haptics);
        assert!(turned.changed);
        assert!(turned.haptics.is_empty());
        assert_eq!(knob.encode(), Encoded::Byte(20));
    }
}
