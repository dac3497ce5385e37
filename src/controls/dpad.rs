//! Four-way directional pad.
//!
//! Every finger on the pad is tested against four leg-shaped hit zones, so
//! diagonals are pressed with two fingers or where zones meet. Feedback only
//! fires when the combination of pressed directions changes.

use crate::config::{DPadSettings, HapticSettings};
use crate::controls::{Encoded, Response, Touch};
use crate::geometry::Geometry;
use tracing::trace;

pub const UP: usize = 0;
pub const LEFT: usize = 1;
pub const DOWN: usize = 2;
pub const RIGHT: usize = 3;

/// Hit-zone borders, precomputed on attach.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Zones {
    x: f64,
    y: f64,
    x_max: f64,
    y_max: f64,
    /// Vertical band holding the up and down legs.
    x1: f64,
    x2: f64,
    /// Horizontal band holding the left and right legs.
    y1: f64,
    y2: f64,
    up_y: f64,
    down_y: f64,
    left_x: f64,
    right_x: f64,
}

impl Zones {
    fn new(geometry: &Geometry, settings: &DPadSettings) -> Self {
        Self {
            x: geometry.x,
            y: geometry.y,
            x_max: geometry.x_max,
            y_max: geometry.y_max,
            x1: geometry.x_center - settings.leg_width * geometry.half_width,
            x2: geometry.x_center + settings.leg_width * geometry.half_width,
            y1: geometry.y_center - settings.leg_width * geometry.half_height,
            y2: geometry.y_center + settings.leg_width * geometry.half_height,
            up_y: geometry.y + settings.leg_length * geometry.height,
            down_y: geometry.y_max - settings.leg_length * geometry.height,
            left_x: geometry.x + settings.leg_length * geometry.width,
            right_x: geometry.x_max - settings.leg_length * geometry.width,
        }
    }

    fn press(&self, touch: &Touch, state: &mut [u8; 4]) {
        if touch.x > self.x1 && touch.x < self.x2 {
            if touch.y < self.up_y && touch.y > self.y {
                state[UP] = 1;
            } else if touch.y > self.down_y && touch.y < self.y_max {
                state[DOWN] = 1;
            }
        }
        if touch.y > self.y1 && touch.y < self.y2 {
            if touch.x < self.left_x && touch.x > self.x {
                state[LEFT] = 1;
            } else if touch.x > self.right_x && touch.x < self.x_max {
                state[RIGHT] = 1;
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DPad {
    /// up, left, down, right
    state: [u8; 4],
    /// `state` packed with up as the most significant bit.
    packed: u8,
    zones: Zones,
}

impl DPad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> [u8; 4] {
        self.state
    }

    pub fn packed(&self) -> u8 {
        self.packed
    }

    pub fn attach(&mut self, geometry: &Geometry, settings: &DPadSettings) {
        self.zones = Zones::new(geometry, settings);
    }

    pub fn touch_move(&mut self, touches: &[Touch], haptics: &HapticSettings) -> Response {
        self.state = [0; 4];
        for touch in touches {
            self.zones.press(touch, &mut self.state);
        }

        let mut response = Response::changed();
        let packed = self.state.iter().fold(0u8, |acc, bit| (acc << 1) + bit);
        if packed != self.packed {
            trace!("D-pad changed to {:04b}", packed);
            self.packed = packed;
            response = response.pulse(haptics.dpad_ms);
        }
        response
    }

    pub fn touch_end(&mut self) -> Response {
        self.state = [0; 4];
        self.packed = 0;
        Response::changed()
    }

    pub fn encode(&self) -> Encoded {
        Encoded::Bits(self.state)
    }
}
