//! Single-axis analog controls: pedals and analog buttons.
//!
//! Both read either the finger position or, on screens with calibrated
//! pressure sensing, the touch force. The choice is made once for the whole
//! layout and stored in every control at construction.

use crate::config::HapticSettings;
use crate::controls::mnemonic::PedalKind;
use crate::controls::{quantize, truncate, Encoded, Response, Touch, TRUNCATE_MAX};
use crate::geometry::Geometry;
use tracing::trace;

/// How pedals and analog buttons turn a touch into a value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InputMode {
    /// Position of the finger inside the control.
    #[default]
    Position,
    /// Touch force remapped from the calibrated `[min, max]` range.
    Pressure { min: f64, max: f64 },
}

impl InputMode {
    fn pressure(min: f64, max: f64, touch: &Touch) -> f64 {
        truncate((touch.force - min) / (max - min))
    }
}

/// Pedal pressed by sliding up: the top edge is full travel.
#[derive(Clone, Debug, PartialEq)]
pub struct Pedal {
    state: f64,
    mode: InputMode,
    kind: PedalKind,
}

impl Pedal {
    pub fn new(kind: PedalKind, mode: InputMode) -> Self {
        Self {
            state: 0.0,
            mode,
            kind,
        }
    }

    pub fn state(&self) -> f64 {
        self.state
    }

    pub fn kind(&self) -> PedalKind {
        self.kind
    }

    pub fn touch_start(
        &mut self,
        geometry: &Geometry,
        touch: &Touch,
        haptics: &HapticSettings,
    ) -> Response {
        Response::unchanged()
            .pulse(haptics.press_ms)
            .then(self.touch_move(geometry, touch, haptics))
    }

    pub fn touch_move(
        &mut self,
        geometry: &Geometry,
        touch: &Touch,
        haptics: &HapticSettings,
    ) -> Response {
        self.state = match self.mode {
            InputMode::Position => truncate((geometry.y - touch.y) / geometry.height + 1.0),
            InputMode::Pressure { min, max } => InputMode::pressure(min, max, touch),
        };

        // Only a fully floored pedal hits the truncation ceiling exactly.
        if self.state == TRUNCATE_MAX {
            trace!("{:?} pedal floored", self.kind);
            Response::changed().repeat(haptics.saturation())
        } else {
            Response::changed().cancel()
        }
    }

    pub fn touch_end(&mut self) -> Response {
        self.state = 0.0;
        Response::changed().cancel()
    }

    pub fn encode(&self) -> Encoded {
        Encoded::Byte(quantize(self.state))
    }
}

/// Axis along which an analog button measures the finger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonAxis {
    Horizontal,
    #[default]
    Vertical,
}

/// Button whose value grows towards its center line.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalogButton {
    state: f64,
    mode: InputMode,
    axis: ButtonAxis,
}

impl AnalogButton {
    pub fn new(mode: InputMode) -> Self {
        Self {
            state: 0.0,
            mode,
            axis: ButtonAxis::default(),
        }
    }

    pub fn state(&self) -> f64 {
        self.state
    }

    pub fn axis(&self) -> ButtonAxis {
        self.axis
    }

    /// Wide buttons measure horizontally, all others vertically.
    pub fn attach(&mut self, geometry: &Geometry) {
        self.axis = if geometry.width > geometry.height {
            ButtonAxis::Horizontal
        } else {
            ButtonAxis::Vertical
        };
    }

    pub fn touch_start(
        &mut self,
        geometry: &Geometry,
        touch: &Touch,
        haptics: &HapticSettings,
    ) -> Response {
        Response::unchanged()
            .pulse(haptics.press_ms)
            .then(self.touch_move(geometry, touch))
    }

    pub fn touch_move(&mut self, geometry: &Geometry, touch: &Touch) -> Response {
        self.state = match (self.mode, self.axis) {
            (InputMode::Pressure { min, max }, _) => InputMode::pressure(min, max, touch),
            (InputMode::Position, ButtonAxis::Horizontal) => {
                truncate(1.0 - (geometry.x_center - touch.x).abs() / geometry.half_width)
            }
            (InputMode::Position, ButtonAxis::Vertical) => {
                truncate(1.0 - (geometry.y_center - touch.y).abs() / geometry.half_height)
            }
        };
        Response::changed()
    }

    pub fn touch_end(&mut self) -> Response {
        self.state = 0.0;
        Response::changed()
    }

    pub fn encode(&self) -> Encoded {
        Encoded::Byte(quantize(self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{Haptic, TRUNCATE_MIN};
    use crate::geometry::{Rect, Shape};
    use crate::haptics::millis;

    fn tall() -> Geometry {
        Geometry::resolve(Rect::new(0.0, 100.0, 50.0, 200.0), Shape::Rectangle)
    }

    #[test]
    fn test_pedal_follows_finger_height() {
        let mut pedal = Pedal::new(PedalKind::Accelerator, InputMode::Position);
        let haptics = HapticSettings::default();

        pedal.touch_move(&tall(), &Touch::at(10.0, 200.0), &haptics);
        assert_eq!(pedal.state(), 0.5);
        assert_eq!(pedal.encode(), Encoded::Byte(128));
    }

    #[test]
    fn test_pedal_bottom_and_top_hit_sentinels() {
        let mut pedal = Pedal::new(PedalKind::Accelerator, InputMode::Position);
        let haptics = HapticSettings::default();

        let bottom = pedal.touch_move(&tall(), &Touch::at(10.0, 300.0), &haptics);
        assert_eq!(pedal.state(), TRUNCATE_MIN);
        assert_eq!(bottom.haptics, vec![Haptic::Cancel]);

        let top = pedal.touch_move(&tall(), &Touch::at(10.0, 100.0), &haptics);
        assert_eq!(pedal.state(), TRUNCATE_MAX);
        assert_eq!(top.haptics, vec![Haptic::Repeat(haptics.saturation())]);
        assert_eq!(pedal.encode(), Encoded::Byte(255));

        let beyond = pedal.touch_move(&tall(), &Touch::at(10.0, 40.0), &haptics);
        assert_eq!(pedal.state(), TRUNCATE_MAX);
        assert_eq!(beyond.haptics, vec![Haptic::Repeat(haptics.saturation())]);
    }

    #[test]
    fn test_pedal_nearly_floored_does_not_saturate() {
        let mut pedal = Pedal::new(PedalKind::Accelerator, InputMode::Position);
        let haptics = HapticSettings::default();
        let response = pedal.touch_move(&tall(), &Touch::at(10.0, 100.5), &haptics);
        assert!(pedal.state() < TRUNCATE_MAX);
        assert_eq!(response.haptics, vec![Haptic::Cancel]);
    }

    #[test]
    fn test_pedal_press_and_release() {
        let mut pedal = Pedal::new(PedalKind::Accelerator, InputMode::Position);
        let haptics = HapticSettings::default();
        let start = pedal.touch_start(&tall(), &Touch::at(10.0, 200.0), &haptics);
        assert!(start.changed);
        assert_eq!(start.haptics[0], Haptic::Pulse(millis(40.0)));

        let end = pedal.touch_end();
        assert!(end.changed);
        assert_eq!(pedal.state(), 0.0);
        assert_eq!(pedal.encode(), Encoded::Byte(0));
    }

    #[test]
    fn test_pressure_mode_remaps_force() {
        let mode = InputMode::Pressure { min: 0.2, max: 0.6 };
        let haptics = HapticSettings::default();
        let mut pedal = Pedal::new(PedalKind::Brake, mode);
        assert_eq!(pedal.kind(), PedalKind::Brake);

        pedal.touch_move(&tall(), &Touch::pressed(10.0, 290.0, 0.4), &haptics);
        assert!((pedal.state() - 0.5).abs() < 1e-12);

        let hard = pedal.touch_move(&tall(), &Touch::pressed(10.0, 290.0, 0.9), &haptics);
        assert_eq!(pedal.state(), TRUNCATE_MAX);
        assert_eq!(hard.haptics, vec![Haptic::Repeat(haptics.saturation())]);

        pedal.touch_move(&tall(), &Touch::pressed(10.0, 290.0, 0.1), &haptics);
        assert_eq!(pedal.state(), TRUNCATE_MIN);
    }

    #[test]
    fn test_single_sample_range_stays_in_bounds() {
        // One calibration sample leaves min == max, so force == min divides 0 by 0.
        let mode = InputMode::Pressure { min: 0.5, max: 0.5 };
        let haptics = HapticSettings::default();
        let touch = Touch::pressed(10.0, 290.0, 0.5);

        let mut pedal = Pedal::new(PedalKind::Accelerator, mode);
        pedal.touch_move(&tall(), &touch, &haptics);
        assert_eq!(pedal.state(), TRUNCATE_MIN);

        let mut button = AnalogButton::new(mode);
        button.touch_move(&tall(), &touch);
        assert_eq!(button.state(), TRUNCATE_MIN);

        let harder = Touch::pressed(10.0, 290.0, 0.7);
        pedal.touch_move(&tall(), &harder, &haptics);
        assert_eq!(pedal.state(), TRUNCATE_MAX);
    }

    #[test]
    fn test_analog_button_axis_follows_shape() {
        let wide = Geometry::resolve(Rect::new(0.0, 0.0, 200.0, 50.0), Shape::Rectangle);
        let mut button = AnalogButton::new(InputMode::Position);
        button.attach(&wide);
        assert_eq!(button.axis(), ButtonAxis::Horizontal);

        button.touch_move(&wide, &Touch::at(150.0, 0.0));
        assert_eq!(button.state(), 0.5);
        button.touch_move(&wide, &Touch::at(100.0, 49.0));
        assert_eq!(button.state(), TRUNCATE_MAX);
        button.touch_move(&wide, &Touch::at(0.0, 25.0));
        assert_eq!(button.state(), TRUNCATE_MIN);

        button.attach(&tall());
        assert_eq!(button.axis(), ButtonAxis::Vertical);
        button.touch_move(&tall(), &Touch::at(0.0, 150.0));
        assert_eq!(button.state(), 0.5);
    }

    #[test]
    fn test_analog_button_never_repeats() {
        let mut button = AnalogButton::new(InputMode::Pressure { min: 0.1, max: 0.3 });
        let geometry = tall();
        button.attach(&geometry);
        let response = button.touch_move(&geometry, &Touch::pressed(0.0, 0.0, 0.9));
        assert_eq!(button.state(), TRUNCATE_MAX);
        assert!(response.haptics.is_empty());
        assert!(button.touch_end().changed);
        assert_eq!(button.encode(), Encoded::Byte(0));
    }
}
