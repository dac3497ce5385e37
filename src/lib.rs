//! Core of a virtual touchscreen gamepad.
//!
//! Turns touches and motion samples on a configurable surface of joysticks,
//! pedals, knobs, buttons and a D-pad into compact numeric frames for a host
//! application, and mixes the haptic feedback of all controls onto one motor.

pub mod calibration;
pub mod config;
pub mod controls;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod haptics;
pub mod host;
pub mod layout;

pub use config::JoypadConfig;
pub use error::{LayoutError, MnemonicError};
pub use layout::{GridArea, Joypad};
