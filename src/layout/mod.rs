//! The gamepad surface
//!
//! A [`Joypad`] is built once from the grid areas of a layout description and
//! then owns everything the controls share: the counters, the motion sensor
//! state, the haptic mixer, the actuator and the host link.
//!
//! # Build
//!
//! ```text
//! grid areas ──► order ──► resolve mnemonics ──► attach ──► layout frame
//!                              │ error
//!                              ▼
//!                         diagnostics
//! ```
//!
//! # Events
//!
//! ```text
//! touch(id) ──► Control ──► Response ──┬─► pulse ──► actuator
//!                                      ├─► repeat / cancel ──► mixer
//!                                      └─► changed ──► state frame ──► host, debug label
//! ```

pub mod ordering;

use crate::config::JoypadConfig;
use crate::controls::{
    Control, ControlKind, Haptic, InputMode, Response, SensorState, Touch, TouchPhase,
};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::LayoutError;
use crate::frame::{layout_frame, StateFrame};
use crate::geometry::Rect;
use crate::haptics::{Actuator, HapticMixer};
use crate::host::HostLink;
use ordering::DEBUG_ID;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Named area of the layout grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridArea {
    pub id: String,
    #[serde(flatten)]
    pub rect: Rect,
}

impl GridArea {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Text area echoing the frames sent to the host. Not a control.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugLabel {
    text: String,
}

impl DebugLabel {
    pub fn text(&self) -> &str {
        &self.text
    }

    fn show(&mut self, frame: &str) {
        self.text.clear();
        self.text.push_str(frame);
    }
}

fn rect_of(areas: &[GridArea], id: &str) -> Option<Rect> {
    areas
        .iter()
        .find(|area| area.id.trim() == id)
        .map(|area| area.rect)
}

#[derive(Debug)]
pub struct Joypad<A: Actuator> {
    controls: Vec<Control>,
    debug_label: Option<DebugLabel>,
    axes: usize,
    buttons: usize,
    sensors: SensorState,
    mixer: HapticMixer,
    actuator: A,
    host: HostLink,
    diagnostics: Diagnostics,
    config: JoypadConfig,
}

impl<A: Actuator> Joypad<A> {
    /// Builds the surface and sends the layout frame.
    ///
    /// Invalid mnemonics are dropped and reported through [`Joypad::diagnostics`].
    pub fn build(
        areas: &[GridArea],
        mode: InputMode,
        config: JoypadConfig,
        host: HostLink,
        actuator: A,
    ) -> Self {
        let mut joypad = Self {
            controls: Vec::new(),
            debug_label: None,
            axes: 0,
            buttons: 0,
            sensors: SensorState::new(config.motion.acceleration_constant),
            mixer: HapticMixer::new(),
            actuator,
            host,
            diagnostics: Diagnostics::new(),
            config,
        };

        for id in ordering::order(areas.iter().map(|area| area.id.as_str())) {
            if id == DEBUG_ID {
                if joypad.debug_label.is_none() {
                    joypad.debug_label = Some(DebugLabel::default());
                }
                continue;
            }
            match Control::from_mnemonic(&id, mode) {
                Ok(control) => joypad.add(control),
                Err(e) => joypad.diagnostics.push(LayoutError::from(e).to_string()),
            }
        }

        for control in joypad.controls.iter_mut() {
            match rect_of(areas, control.id()) {
                Some(rect) => control.attach(rect, &joypad.config.dpad),
                None => warn!("No grid area for {}", control.id()),
            }
        }

        if joypad.axes == 0 && joypad.buttons == 0 {
            joypad.diagnostics.push(LayoutError::EmptyLayout.to_string());
        }

        let frame = joypad.layout_frame();
        info!(
            "Joypad built with {} control(s), {} axes, {} buttons: {}",
            joypad.controls.len(),
            joypad.axes,
            joypad.buttons,
            frame
        );
        if let Some(label) = joypad.debug_label.as_mut() {
            label.show(&frame);
        }
        joypad.host.notify(&frame);
        joypad
    }

    fn add(&mut self, control: Control) {
        self.axes += control.axes();
        self.buttons += control.buttons();
        if let ControlKind::Motion(motion) = control.kind() {
            self.sensors.register(motion.axis().feed(), control.id());
        }
        trace!("Added control {}", control.id());
        self.controls.push(control);
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id() == id)
    }

    pub fn axes(&self) -> usize {
        self.axes
    }

    pub fn buttons(&self) -> usize {
        self.buttons
    }

    pub fn debug_label(&self) -> Option<&DebugLabel> {
        self.debug_label.as_ref()
    }

    pub fn sensors(&self) -> &SensorState {
        &self.sensors
    }

    pub fn mixer(&self) -> &HapticMixer {
        &self.mixer
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn config(&self) -> &JoypadConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Acknowledges the warning on screen and returns the next one.
    pub fn dismiss_diagnostic(&mut self) -> Option<&Diagnostic> {
        self.diagnostics.dismiss()
    }

    pub fn layout_frame(&self) -> String {
        layout_frame(&self.controls)
    }

    pub fn state_frame(&self) -> StateFrame {
        StateFrame::capture(&self.controls, &self.sensors)
    }

    /// Routes a touch event to the control `id`. Returns whether a state frame was sent.
    pub fn touch(&mut self, id: &str, phase: TouchPhase, touches: &[Touch], now: Instant) -> bool {
        let Some(control) = self.controls.iter_mut().find(|c| c.id() == id) else {
            warn!("Touch {:?} for unknown control {}", phase, id);
            return false;
        };
        let response = control.touch(phase, touches, &self.config.haptics);
        self.apply(id, response, now)
    }

    /// Accelerometer sample, in m/s².
    pub fn acceleration(&mut self, x: f64, y: f64, z: f64) -> bool {
        if self.sensors.accelerate(x, y, z).is_none() {
            trace!("Acceleration sample without listener");
            return false;
        }
        self.publish_state();
        true
    }

    /// Orientation sample, in degrees.
    pub fn orientation(&mut self, alpha: f64, beta: f64, gamma: f64) -> bool {
        if self.sensors.orient(alpha, beta, gamma).is_none() {
            trace!("Orientation sample without listener");
            return false;
        }
        self.publish_state();
        true
    }

    /// Re-attaches every control to its new area.
    pub fn resize(&mut self, areas: &[GridArea]) {
        debug!("Resizing joypad to {} area(s)", areas.len());
        for control in self.controls.iter_mut() {
            match rect_of(areas, control.id()) {
                Some(rect) => control.attach(rect, &self.config.dpad),
                None => warn!("No grid area for {} after resize", control.id()),
            }
        }
    }

    /// Drives the haptic mixer. Returns the number of pulses fired.
    pub fn tick_haptics(&mut self, now: Instant) -> usize {
        self.mixer.tick(now, &mut self.actuator)
    }

    fn apply(&mut self, id: &str, response: Response, now: Instant) -> bool {
        for haptic in response.haptics {
            match haptic {
                Haptic::Pulse(pulse) => self.actuator.vibrate(pulse),
                Haptic::Repeat(pattern) => self.mixer.queue(id, pattern, now),
                Haptic::Cancel => self.mixer.unqueue(id),
            }
        }
        if response.changed {
            self.publish_state();
        }
        response.changed
    }

    fn publish_state(&mut self) {
        let frame = self.state_frame().to_string();
        debug!("State frame: {}", frame);
        self.host.notify(&frame);
        if let Some(label) = self.debug_label.as_mut() {
            label.show(&frame);
        }
    }
}
