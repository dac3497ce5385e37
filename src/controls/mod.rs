//! Control model of the gamepad surface
//!
//! Each control type owns its state and its input → state algorithm. Handlers
//! never talk to the haptic mixer or the host themselves: they return a
//! [`Response`] describing whether the state changed and which vibrations they
//! want, and the layout applies it.
//!
//! ```text
//! Touch ──► Control::touch ──► Response { changed, haptics }
//!                                  │            │
//!                             state frame   mixer / actuator
//! ```

pub mod analog;
pub mod button;
pub mod dpad;
pub mod joystick;
pub mod knob;
pub mod mnemonic;
pub mod motion;

pub use analog::{AnalogButton, InputMode, Pedal};
pub use button::Button;
pub use dpad::DPad;
pub use joystick::Joystick;
pub use knob::Knob;
pub use mnemonic::{ControlType, MotionAxis, PedalKind};
pub use motion::{Motion, SensorFeed, SensorState};

use crate::config::{DPadSettings, HapticSettings};
use crate::error::MnemonicError;
use crate::geometry::{Geometry, Rect, Shape};
use crate::haptics::{millis, VibrationPattern};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Lowest value an analog control reports while touched.
pub const TRUNCATE_MIN: f64 = 0.000001;
/// Highest value an analog control reports. Reaching it exactly means saturation.
pub const TRUNCATE_MAX: f64 = 0.999999;

/// Clamps into `[TRUNCATE_MIN, TRUNCATE_MAX]`, so 0 and 1 are never produced.
///
/// NaN, from a degenerate pressure range, maps to `TRUNCATE_MIN`.
pub fn truncate(value: f64) -> f64 {
    if value.is_nan() || value < TRUNCATE_MIN {
        TRUNCATE_MIN
    } else if value > TRUNCATE_MAX {
        TRUNCATE_MAX
    } else {
        value
    }
}

/// `floor(256 * v)` as a byte.
pub fn quantize(value: f64) -> u8 {
    (256.0 * value).floor().clamp(0.0, 255.0) as u8
}

/// One finger on the screen, in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub x: f64,
    pub y: f64,
    /// Normalized pressure in `[0, 1]`, when the screen reports it.
    #[serde(default)]
    pub force: f64,
}

impl Touch {
    pub const fn at(x: f64, y: f64) -> Self {
        Self { x, y, force: 0.0 }
    }

    pub const fn pressed(x: f64, y: f64, force: f64) -> Self {
        Self { x, y, force }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Vibration wish of a handler.
#[derive(Clone, Debug, PartialEq)]
pub enum Haptic {
    /// Fire once, immediately.
    Pulse(Duration),
    /// Repeat through the mixer until cancelled.
    Repeat(VibrationPattern),
    /// Cancel this control's repeating vibration.
    Cancel,
}

/// Outcome of one input event on one control.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    /// The control asks for a state frame to be sent.
    pub changed: bool,
    pub haptics: Vec<Haptic>,
}

impl Response {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            haptics: Vec::new(),
        }
    }

    pub fn pulse(mut self, ms: f64) -> Self {
        self.haptics.push(Haptic::Pulse(millis(ms)));
        self
    }

    pub fn repeat(mut self, pattern: VibrationPattern) -> Self {
        self.haptics.push(Haptic::Repeat(pattern));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.haptics.push(Haptic::Cancel);
        self
    }

    /// Appends the effects of a handler that ran after this one.
    pub fn then(mut self, other: Response) -> Self {
        self.changed |= other.changed;
        self.haptics.extend(other.haptics);
        self
    }
}

/// Contribution of a control to the state frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoded {
    /// Single quantized axis.
    Byte(u8),
    /// Two quantized axes.
    Pair(u8, u8),
    /// Digital button.
    Flag(bool),
    /// D-pad directions (up, left, down, right), sent as text bits.
    Bits([u8; 4]),
}

impl fmt::Display for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoded::Byte(v) => write!(f, "{}", v),
            Encoded::Pair(x, y) => write!(f, "{},{}", x, y),
            Encoded::Flag(pressed) => write!(f, "{}", u8::from(*pressed)),
            Encoded::Bits([up, left, down, right]) => {
                write!(f, "{},{},{},{}", up, left, down, right)
            }
        }
    }
}

/// Type-specific state of a control.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlKind {
    Joystick(Joystick),
    Motion(Motion),
    Pedal(Pedal),
    AnalogButton(AnalogButton),
    Knob(Knob),
    Button(Button),
    DPad(DPad),
}

/// A control placed in the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    id: String,
    geometry: Geometry,
    kind: ControlKind,
}

impl Control {
    /// Builds the control named by `id`, validating the mnemonic.
    pub fn from_mnemonic(id: &str, mode: InputMode) -> Result<Self, MnemonicError> {
        let control_type = ControlType::resolve(id)?;
        Ok(Self::new(id, control_type, mode))
    }

    pub fn new(id: &str, control_type: ControlType, mode: InputMode) -> Self {
        let kind = match control_type {
            ControlType::Joystick { locking } => ControlKind::Joystick(Joystick::new(locking)),
            ControlType::Motion(axis) => ControlKind::Motion(Motion::new(axis)),
            ControlType::Pedal(kind) => ControlKind::Pedal(Pedal::new(kind, mode)),
            ControlType::AnalogButton => ControlKind::AnalogButton(AnalogButton::new(mode)),
            ControlType::Knob => ControlKind::Knob(Knob::new()),
            ControlType::Button => ControlKind::Button(Button::new()),
            ControlType::DPad => ControlKind::DPad(DPad::new()),
        };

        Self {
            id: id.to_string(),
            geometry: Geometry::default(),
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn shape(&self) -> Shape {
        match self.kind {
            ControlKind::Knob(_) => Shape::Square,
            _ => Shape::Rectangle,
        }
    }

    /// Analog axes this control adds to the gamepad.
    pub fn axes(&self) -> usize {
        match self.kind {
            ControlKind::Joystick(_) => 2,
            ControlKind::Motion(_)
            | ControlKind::Pedal(_)
            | ControlKind::AnalogButton(_)
            | ControlKind::Knob(_) => 1,
            ControlKind::Button(_) | ControlKind::DPad(_) => 0,
        }
    }

    /// Digital buttons this control adds to the gamepad.
    pub fn buttons(&self) -> usize {
        match self.kind {
            ControlKind::Button(_) => 1,
            ControlKind::DPad(_) => 4,
            _ => 0,
        }
    }

    /// Binds the control to its on-screen rectangle. Called again on every resize.
    pub fn attach(&mut self, rect: Rect, dpad: &DPadSettings) {
        self.geometry = Geometry::resolve(rect, self.shape());
        match &mut self.kind {
            ControlKind::AnalogButton(button) => button.attach(&self.geometry),
            ControlKind::Knob(knob) => knob.attach(),
            ControlKind::DPad(pad) => pad.attach(&self.geometry, dpad),
            _ => {}
        }
    }

    /// Feeds one touch event. `touches` are the fingers currently on this control.
    pub fn touch(
        &mut self,
        phase: TouchPhase,
        touches: &[Touch],
        haptics: &HapticSettings,
    ) -> Response {
        let geometry = &self.geometry;
        match (&mut self.kind, phase) {
            (ControlKind::Joystick(stick), TouchPhase::Start) => {
                primary(touches, |t| stick.touch_start(geometry, t, haptics))
            }
            (ControlKind::Joystick(stick), TouchPhase::Move) => {
                primary(touches, |t| stick.touch_move(geometry, t, haptics))
            }
            (ControlKind::Joystick(stick), _) => stick.touch_end(),

            (ControlKind::Pedal(pedal), TouchPhase::Start) => {
                primary(touches, |t| pedal.touch_start(geometry, t, haptics))
            }
            (ControlKind::Pedal(pedal), TouchPhase::Move) => {
                primary(touches, |t| pedal.touch_move(geometry, t, haptics))
            }
            (ControlKind::Pedal(pedal), _) => pedal.touch_end(),

            (ControlKind::AnalogButton(button), TouchPhase::Start) => {
                primary(touches, |t| button.touch_start(geometry, t, haptics))
            }
            (ControlKind::AnalogButton(button), TouchPhase::Move) => {
                primary(touches, |t| button.touch_move(geometry, t))
            }
            (ControlKind::AnalogButton(button), _) => button.touch_end(),

            (ControlKind::Knob(knob), TouchPhase::Start) => {
                primary(touches, |t| knob.touch_start(geometry, t, haptics))
            }
            (ControlKind::Knob(knob), TouchPhase::Move) => {
                primary(touches, |t| knob.touch_move(geometry, t, haptics))
            }
            (ControlKind::Knob(knob), _) => knob.touch_end(),

            (ControlKind::Button(button), TouchPhase::Start) => button.touch_start(haptics),
            (ControlKind::Button(_), TouchPhase::Move) => Response::unchanged(),
            (ControlKind::Button(button), _) => button.touch_end(),

            (ControlKind::DPad(pad), TouchPhase::Start | TouchPhase::Move) => {
                pad.touch_move(touches, haptics)
            }
            (ControlKind::DPad(pad), _) => pad.touch_end(),

            // Motion controls are driven by the sensor feeds only.
            (ControlKind::Motion(_), _) => Response::unchanged(),
        }
    }

    /// Current contribution to the state frame.
    pub fn encode(&self, sensors: &SensorState) -> Encoded {
        match &self.kind {
            ControlKind::Joystick(stick) => stick.encode(),
            ControlKind::Motion(motion) => motion.encode(sensors),
            ControlKind::Pedal(pedal) => pedal.encode(),
            ControlKind::AnalogButton(button) => button.encode(),
            ControlKind::Knob(knob) => knob.encode(),
            ControlKind::Button(button) => button.encode(),
            ControlKind::DPad(pad) => pad.encode(),
        }
    }
}

/// Runs `handler` with the first touch, or does nothing when there is none.
fn primary(touches: &[Touch], handler: impl FnOnce(&Touch) -> Response) -> Response {
    touches.first().map(handler).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_reserves_extremes() {
        assert_eq!(truncate(0.0), TRUNCATE_MIN);
        assert_eq!(truncate(-3.0), TRUNCATE_MIN);
        assert_eq!(truncate(1.0), TRUNCATE_MAX);
        assert_eq!(truncate(7.5), TRUNCATE_MAX);
        assert_eq!(truncate(0.5), 0.5);
        assert_eq!(truncate(f64::NAN), TRUNCATE_MIN);
        assert_eq!(truncate(f64::INFINITY), TRUNCATE_MAX);
        assert_eq!(truncate(f64::NEG_INFINITY), TRUNCATE_MIN);
    }

    #[test]
    fn test_quantize_bounds() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(TRUNCATE_MIN), 0);
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(TRUNCATE_MAX), 255);
        assert_eq!(quantize(1.4), 255);
        assert_eq!(quantize(-0.2), 0);
    }

    #[test]
    fn test_encoded_display() {
        assert_eq!(Encoded::Pair(128, 128).to_string(), "128,128");
        assert_eq!(Encoded::Flag(true).to_string(), "1");
        assert_eq!(Encoded::Bits([1, 0, 0, 1]).to_string(), "1,0,0,1");
        assert_eq!(Encoded::Byte(7).to_string(), "7");
    }

    #[test]
    fn test_counters_per_type() {
        let mode = InputMode::Position;
        let stick = Control::from_mnemonic("j1", mode).unwrap();
        let pad = Control::from_mnemonic("dp", mode).unwrap();
        let knob = Control::from_mnemonic("k1", mode).unwrap();
        assert_eq!((stick.axes(), stick.buttons()), (2, 0));
        assert_eq!((pad.axes(), pad.buttons()), (0, 4));
        assert_eq!((knob.axes(), knob.buttons()), (1, 0));
        assert_eq!(knob.shape(), Shape::Square);
    }

    #[test]
    fn test_pedal_keeps_its_kind() {
        let brake = Control::from_mnemonic("pb", InputMode::Position).unwrap();
        match brake.kind() {
            ControlKind::Pedal(pedal) => assert_eq!(pedal.kind(), PedalKind::Brake),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_touch_without_fingers_is_ignored() {
        let mut stick = Control::from_mnemonic("j1", InputMode::Position).unwrap();
        stick.attach(Rect::new(0.0, 0.0, 100.0, 100.0), &DPadSettings::default());
        let response = stick.touch(TouchPhase::Move, &[], &HapticSettings::default());
        assert_eq!(response, Response::unchanged());
    }
}
