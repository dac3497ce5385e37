//! Wire frames sent to the host.
//!
//! ```text
//! layout frame:  j1,b1,dp             (once, after build)
//! state frame:   128,128,0,0,0,0,0    (on every change)
//!                └─j1──┘ b1 └─dp──┘
//! ```
//!
//! Both list the controls in layout order. Multi-value controls write their
//! own comma-separated fields into the state frame.

use crate::controls::{Control, Encoded, SensorState};
use std::fmt;

/// Comma-joined control ids, in layout order.
pub fn layout_frame(controls: &[Control]) -> String {
    controls
        .iter()
        .map(Control::id)
        .collect::<Vec<_>>()
        .join(",")
}

/// Snapshot of every control's encoding, in layout order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateFrame {
    segments: Vec<Encoded>,
}

impl StateFrame {
    pub fn capture(controls: &[Control], sensors: &SensorState) -> Self {
        Self {
            segments: controls.iter().map(|c| c.encode(sensors)).collect(),
        }
    }

    /// One entry per control.
    pub fn segments(&self) -> &[Encoded] {
        &self.segments
    }
}

impl fmt::Display for StateFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
