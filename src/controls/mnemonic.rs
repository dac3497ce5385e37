//! Mnemonic codes naming the controls of a layout.
//!
//! | Code        | Control                                  |
//! |-------------|------------------------------------------|
//! | `s…`        | locking joystick                         |
//! | `j…`        | joystick, returns to center on release   |
//! | `mx`…`mg`   | motion sensor axis (`x y z a b g`)       |
//! | `pa` `pt`   | accelerator pedal                        |
//! | `pb`        | brake pedal                              |
//! | `k…`        | knob                                     |
//! | `a…`        | analog button                            |
//! | `b…`        | button                                   |
//! | `dp`        | D-pad                                    |

use crate::error::MnemonicError;
use crate::controls::motion::SensorFeed;

/// One of the six motion axes, in sensor-state order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionAxis {
    X,
    Y,
    Z,
    Alpha,
    Beta,
    Gamma,
}

impl MotionAxis {
    pub const LABELS: &'static str = "xyzabg";

    pub fn from_label(label: char) -> Option<Self> {
        match label {
            'x' => Some(MotionAxis::X),
            'y' => Some(MotionAxis::Y),
            'z' => Some(MotionAxis::Z),
            'a' => Some(MotionAxis::Alpha),
            'b' => Some(MotionAxis::Beta),
            'g' => Some(MotionAxis::Gamma),
            _ => None,
        }
    }

    /// Position of the axis in the shared sensor state.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The physical sensor producing this axis.
    pub fn feed(self) -> SensorFeed {
        match self {
            MotionAxis::X | MotionAxis::Y | MotionAxis::Z => SensorFeed::Acceleration,
            MotionAxis::Alpha | MotionAxis::Beta | MotionAxis::Gamma => SensorFeed::Orientation,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PedalKind {
    Accelerator,
    Brake,
}

/// Control selected by a mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlType {
    Joystick { locking: bool },
    Motion(MotionAxis),
    Pedal(PedalKind),
    Knob,
    AnalogButton,
    Button,
    DPad,
}

impl ControlType {
    /// Resolves a 2 or 3 character code into the control it names.
    pub fn resolve(id: &str) -> Result<Self, MnemonicError> {
        let chars: Vec<char> = id.chars().collect();
        if chars.len() < 2 || chars.len() > 3 {
            return Err(MnemonicError::InvalidLength(id.to_string()));
        }

        match chars[0] {
            's' => Ok(ControlType::Joystick { locking: true }),
            'j' => Ok(ControlType::Joystick { locking: false }),
            'm' => {
                let axis = MotionAxis::from_label(chars[1])
                    .ok_or(MnemonicError::UnknownMotionAxis(chars[1]))?;
                if chars.len() != 2 {
                    return Err(MnemonicError::MultipleMotionAxes(id.to_string()));
                }
                Ok(ControlType::Motion(axis))
            }
            'p' => match chars[1] {
                'a' | 't' => Ok(ControlType::Pedal(PedalKind::Accelerator)),
                'b' => Ok(ControlType::Pedal(PedalKind::Brake)),
                _ => Err(MnemonicError::UnknownPedal(id.to_string())),
            },
            'k' => Ok(ControlType::Knob),
            'a' => Ok(ControlType::AnalogButton),
            'b' => Ok(ControlType::Button),
            'd' if id == "dp" => Ok(ControlType::DPad),
            'd' => Err(MnemonicError::LegacyDPad(id.to_string())),
            _ => Err(MnemonicError::UnknownControl(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_codes() {
        assert_eq!(
            ControlType::resolve("s1"),
            Ok(ControlType::Joystick { locking: true })
        );
        assert_eq!(
            ControlType::resolve("j12"),
            Ok(ControlType::Joystick { locking: false })
        );
        assert_eq!(
            ControlType::resolve("mg"),
            Ok(ControlType::Motion(MotionAxis::Gamma))
        );
        assert_eq!(
            ControlType::resolve("pt"),
            Ok(ControlType::Pedal(PedalKind::Accelerator))
        );
        assert_eq!(
            ControlType::resolve("pb2"),
            Ok(ControlType::Pedal(PedalKind::Brake))
        );
        assert_eq!(ControlType::resolve("k1"), Ok(ControlType::Knob));
        assert_eq!(ControlType::resolve("aa"), Ok(ControlType::AnalogButton));
        assert_eq!(ControlType::resolve("b10"), Ok(ControlType::Button));
        assert_eq!(ControlType::resolve("dp"), Ok(ControlType::DPad));
    }

    #[test]
    fn test_every_motion_label() {
        for (index, label) in MotionAxis::LABELS.chars().enumerate() {
            let id = format!("m{}", label);
            match ControlType::resolve(&id) {
                Ok(ControlType::Motion(axis)) => assert_eq!(axis.index(), index),
                other => panic!("{} resolved to {:?}", id, other),
            }
        }
    }

    #[test]
    fn test_length_is_checked_first() {
        assert_eq!(
            ControlType::resolve("j"),
            Err(MnemonicError::InvalidLength("j".into()))
        );
        assert_eq!(
            ControlType::resolve("b1234"),
            Err(MnemonicError::InvalidLength("b1234".into()))
        );
        assert_eq!(
            ControlType::resolve(""),
            Err(MnemonicError::InvalidLength("".into()))
        );
    }

    #[test]
    fn test_invalid_sub_codes() {
        assert_eq!(
            ControlType::resolve("mq"),
            Err(MnemonicError::UnknownMotionAxis('q'))
        );
        assert_eq!(
            ControlType::resolve("mxy"),
            Err(MnemonicError::MultipleMotionAxes("mxy".into()))
        );
        assert_eq!(
            ControlType::resolve("pz"),
            Err(MnemonicError::UnknownPedal("pz".into()))
        );
        assert_eq!(
            ControlType::resolve("d1"),
            Err(MnemonicError::LegacyDPad("d1".into()))
        );
        assert_eq!(
            ControlType::resolve("dpx"),
            Err(MnemonicError::LegacyDPad("dpx".into()))
        );
        assert_eq!(
            ControlType::resolve("x1"),
            Err(MnemonicError::UnknownControl("x1".into()))
        );
    }

    #[test]
    fn test_feed_split() {
        assert_eq!(MotionAxis::Z.feed(), SensorFeed::Acceleration);
        assert_eq!(MotionAxis::Alpha.feed(), SensorFeed::Orientation);
    }
}
