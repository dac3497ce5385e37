//! Error types of the control layout.

use thiserror::Error;

/// A grid-area code that does not name a control.
///
/// The display text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemonicError {
    #[error("`{0}` is not a valid code. Control codes have 2 or 3 characters.")]
    InvalidLength(String),

    #[error("Motion detection error: unrecognised coordinate `{0}`.")]
    UnknownMotionAxis(char),

    #[error("`{0}` uses more than one coordinate. Please use only one coordinate per motion sensor.")]
    MultipleMotionAxes(String),

    #[error("`{0}` is not a valid pedal. Please use `pa` or `pt` for accelerator and `pb` for brakes.")]
    UnknownPedal(String),

    #[error("`{0}`: D-pads are now produced with the code `dp`. Please update your layout.")]
    LegacyDPad(String),

    #[error("Unrecognised control `{0}` in the layout.")]
    UnknownControl(String),
}

/// Problems found while building a layout. None of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error(transparent)]
    InvalidMnemonic(#[from] MnemonicError),

    #[error("Your gamepad looks empty. Is the layout description missing or broken?")]
    EmptyLayout,
}
