//! Scripted session driver
//!
//! Replays a recorded session against a [`Joypad`]: the pressure check decides
//! the input mode, the grid areas build the surface, and timed input events
//! are interleaved with the periodic haptic tick on a single task.
//!
//! ```text
//!            ┌─────────── tokio::select! ───────────┐
//! events ──► │ sleep_until(at) ──► Joypad::touch …  │ ──► host
//! ticker ──► │ interval(16ms)  ──► tick_haptics     │ ──► actuator
//! shutdown ► │ break                                │
//!            └──────────────────────────────────────┘
//! ```

use crate::calibration::{CalibrationSession, DetectOutcome};
use crate::config::JoypadConfig;
use crate::controls::{InputMode, Touch, TouchPhase};
use crate::haptics::Actuator;
use crate::host::HostLink;
use crate::layout::{GridArea, Joypad};
use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tokio::time::{interval, sleep_until, MissedTickBehavior};
use tracing::{debug, info, trace};

/// Haptic tick, roughly one display frame.
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// One input delivered to the surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InputEvent {
    Touch {
        target: String,
        phase: TouchPhase,
        #[serde(default)]
        touches: Vec<Touch>,
    },
    Acceleration {
        x: f64,
        y: f64,
        z: f64,
    },
    Orientation {
        alpha: f64,
        beta: f64,
        gamma: f64,
    },
    Resize {
        #[serde(default)]
        areas: Vec<GridArea>,
    },
    /// Acknowledges the warning on screen.
    Dismiss,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// Offset from the start of the session.
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: InputEvent,
}

/// Force readings taken before the layout is built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureScript {
    /// Touches on the menu.
    pub menu: Vec<f64>,
    /// Touches on the calibration prompt.
    pub samples: Vec<f64>,
    /// Answer to the calibration prompt.
    pub accept: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    #[serde(rename = "area")]
    pub areas: Vec<GridArea>,
    pub pressure: PressureScript,
    #[serde(rename = "event")]
    pub events: Vec<ScriptedEvent>,
    /// Keeps ticking after the last event so repeating vibrations play out.
    pub linger_ms: u64,
}

impl Session {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| eyre!("Failed to parse session: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read session {}: {}", path.display(), e))?;
        let session = Self::from_toml(&content)?;
        info!(
            "Loaded session {} with {} area(s) and {} event(s)",
            path.display(),
            session.areas.len(),
            session.events.len()
        );
        Ok(session)
    }

    /// Runs the pressure calibration flow on the recorded forces.
    pub fn input_mode(&self) -> InputMode {
        let mut detecting = CalibrationSession::start();
        for force in &self.pressure.menu {
            detecting.record(*force);
        }

        match detecting.finish_detection() {
            DetectOutcome::Unsupported(finished) => finished.mode(),
            DetectOutcome::Supported(mut calibrating) => {
                for force in &self.pressure.samples {
                    calibrating.record(*force);
                }
                debug!("Calibrated with {} sample(s)", calibrating.samples());
                if self.pressure.accept {
                    calibrating.confirm().mode()
                } else {
                    calibrating.reject().mode()
                }
            }
        }
    }
}

pub struct SessionDriver<A: Actuator> {
    joypad: Joypad<A>,
    events: Vec<ScriptedEvent>,
    linger: Duration,
}

impl<A: Actuator> SessionDriver<A> {
    /// Calibrates, builds the joypad and sends the layout frame.
    pub fn new(session: Session, config: JoypadConfig, host: HostLink, actuator: A) -> Self {
        let mode = session.input_mode();
        let joypad = Joypad::build(&session.areas, mode, config, host, actuator);

        let mut events = session.events;
        events.sort_by_key(|e| e.at_ms);

        Self {
            joypad,
            events,
            linger: Duration::from_millis(session.linger_ms),
        }
    }

    pub fn joypad(&self) -> &Joypad<A> {
        &self.joypad
    }

    /// Replays the script until it ends or `shutdown_rx` fires.
    ///
    /// A dropped shutdown sender stops the driver as well.
    pub async fn run_until_shutdown(mut self, mut shutdown_rx: oneshot::Receiver<()>) -> Joypad<A> {
        let start = tokio::time::Instant::now();
        let finish = start
            + self
                .events
                .last()
                .map(|e| Duration::from_millis(e.at_ms))
                .unwrap_or_default()
            + self.linger;

        let mut ticker = interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut events = std::mem::take(&mut self.events).into_iter().peekable();

        info!("Starting session replay");
        loop {
            let due = events
                .peek()
                .map(|e| start + Duration::from_millis(e.at_ms));

            tokio::select! {
                biased;

                _ = &mut shutdown_rx => {
                    info!("Shutdown signal received");
                    break;
                }

                _ = sleep_until(due.unwrap_or(start)), if due.is_some() => {
                    if let Some(scripted) = events.next() {
                        trace!("Event at {}ms: {:?}", scripted.at_ms, scripted.event);
                        self.dispatch(scripted.event);
                    }
                }

                _ = ticker.tick() => {
                    let fired = self.joypad.tick_haptics(Instant::now());
                    if fired > 0 {
                        trace!("Fired {} vibration pulse(s)", fired);
                    }
                    if events.peek().is_none() && tokio::time::Instant::now() >= finish {
                        info!("Session replay finished");
                        break;
                    }
                }
            }
        }

        self.joypad
    }

    fn dispatch(&mut self, event: InputEvent) {
        let now = Instant::now();
        match event {
            InputEvent::Touch {
                target,
                phase,
                touches,
            } => {
                self.joypad.touch(&target, phase, &touches, now);
            }
            InputEvent::Acceleration { x, y, z } => {
                self.joypad.acceleration(x, y, z);
            }
            InputEvent::Orientation { alpha, beta, gamma } => {
                self.joypad.orientation(alpha, beta, gamma);
            }
            InputEvent::Resize { areas } => self.joypad.resize(&areas),
            InputEvent::Dismiss => match self.joypad.dismiss_diagnostic() {
                Some(next) => info!("Next warning: {}", next),
                None => debug!("No more warnings"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = r#"
        linger_ms = 20

        [pressure]
        menu = [0.0, 1.0]

        [[area]]
        id = "b1"
        x = 0.0
        y = 0.0
        width = 100.0
        height = 100.0

        [[event]]
        at_ms = 5
        kind = "touch"
        target = "b1"
        phase = "start"
        touches = [{ x = 50.0, y = 50.0 }]

        [[event]]
        at_ms = 0
        kind = "acceleration"
        x = 1.0
        y = 2.0
        z = 3.0

        [[event]]
        at_ms = 10
        kind = "dismiss"
    "#;

    #[test]
    fn test_session_parses_all_event_kinds() {
        let session = Session::from_toml(SESSION).unwrap();
        assert_eq!(session.areas.len(), 1);
        assert_eq!(session.linger_ms, 20);
        assert_eq!(session.events.len(), 3);
        assert_eq!(
            session.events[0].event,
            InputEvent::Touch {
                target: "b1".to_string(),
                phase: TouchPhase::Start,
                touches: vec![Touch::at(50.0, 50.0)],
            }
        );
        assert_eq!(session.events[2].event, InputEvent::Dismiss);
    }

    #[test]
    fn test_menu_without_force_selects_position() {
        let session = Session::from_toml(SESSION).unwrap();
        assert_eq!(session.input_mode(), InputMode::Position);
    }

    #[test]
    fn test_pressure_prompt_answer() {
        let mut session = Session::default();
        session.pressure = PressureScript {
            menu: vec![0.25],
            samples: vec![0.75],
            accept: true,
        };
        assert_eq!(
            session.input_mode(),
            InputMode::Pressure {
                min: 0.25,
                max: 0.75
            }
        );

        session.pressure.accept = false;
        assert_eq!(session.input_mode(), InputMode::Position);
    }

    #[test]
    fn test_driver_sorts_events() {
        let session = Session::from_toml(SESSION).unwrap();
        let driver = SessionDriver::new(
            session,
            JoypadConfig::default(),
            HostLink::default(),
            crate::haptics::NullActuator,
        );
        let offsets: Vec<_> = driver.events.iter().map(|e| e.at_ms).collect();
        assert_eq!(offsets, vec![0, 5, 10]);
        assert_eq!(driver.joypad().layout_frame(), "b1");
    }
}
