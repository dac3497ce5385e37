//! Two-axis joystick.
//!
//! The stick position is the finger offset from the center, scaled by the half
//! extents so the pad rim sits at ±1. Past the rim each axis is clamped just
//! inside ±1 and a repeating vibration tells the user the stick is saturated.

use crate::config::HapticSettings;
use crate::controls::{Encoded, Response, Touch};
use crate::geometry::Geometry;
use crate::haptics::VibrationPattern;
use std::f64::consts::PI;
use tracing::trace;

/// Limit of each axis once the finger left the pad.
pub const AXIS_LIMIT: f64 = 0.99999;

#[derive(Clone, Debug, PartialEq)]
pub struct Joystick {
    state: [f64; 2],
    /// 8-way sector of the last in-pad position, `None` after leaving the pad.
    sector: Option<u8>,
    locking: bool,
}

impl Joystick {
    pub fn new(locking: bool) -> Self {
        Self {
            state: [0.0, 0.0],
            sector: None,
            locking,
        }
    }

    pub fn state(&self) -> [f64; 2] {
        self.state
    }

    pub fn sector(&self) -> Option<u8> {
        self.sector
    }

    pub fn is_locking(&self) -> bool {
        self.locking
    }

    /// 8-way sector of a position, with sector boundaries shifted by 1/16 turn.
    pub fn sector_of(x: f64, y: f64) -> u8 {
        // atan2 / π is in [-1, 1]; shifted into [0.125, 2.125].
        let turns = y.atan2(x) / PI + 1.125;
        ((turns * 4.0) % 8.0).floor() as u8
    }

    pub fn touch_start(
        &mut self,
        geometry: &Geometry,
        touch: &Touch,
        haptics: &HapticSettings,
    ) -> Response {
        self.touch_move(geometry, touch, haptics)
            .pulse(haptics.press_ms)
    }

    pub fn touch_move(
        &mut self,
        geometry: &Geometry,
        touch: &Touch,
        haptics: &HapticSettings,
    ) -> Response {
        let x = (touch.x - geometry.x_center) / geometry.half_width;
        let y = (touch.y - geometry.y_center) / geometry.half_height;
        let distance = x.abs().max(y.abs());

        if distance < 1.0 {
            self.state = [x, y];
            let mut response = Response::changed().cancel();
            let sector = Self::sector_of(x, y);
            if haptics.vibrate_on_quadrant_boundary
                && self.sector.is_some_and(|previous| previous != sector)
            {
                trace!("Joystick crossed into sector {}", sector);
                response = response.pulse(haptics.sector_ms);
            }
            self.sector = Some(sector);
            response
        } else {
            self.state = [
                x.clamp(-AXIS_LIMIT, AXIS_LIMIT),
                y.clamp(-AXIS_LIMIT, AXIS_LIMIT),
            ];
            let mut response = Response::changed();
            if haptics.vibrate_on_pad_boundary {
                let scale = if haptics.vibrate_proportionally_to_distance {
                    distance
                } else {
                    1.0
                };
                response = response.repeat(VibrationPattern::from_millis(
                    scale * haptics.saturation_ms[0],
                    haptics.saturation_ms[1],
                ));
            }
            self.sector = None;
            response
        }
    }

    pub fn touch_end(&mut self) -> Response {
        let response = if self.locking {
            Response::unchanged()
        } else {
            self.state = [0.0, 0.0];
            Response::changed()
        };
        self.sector = None;
        response.cancel()
    }

    pub fn encode(&self) -> Encoded {
        let [x, y] = self.state.map(|v| (128.0 * (v + 1.0)).floor().clamp(0.0, 255.0) as u8);
        Encoded::Pair(x, y)
    }
}
