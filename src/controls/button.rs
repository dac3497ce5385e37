use crate::config::HapticSettings;
use crate::controls::{Encoded, Response};

/// Digital button: pressed while touched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Button {
    pressed: bool,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn touch_start(&mut self, haptics: &HapticSettings) -> Response {
        self.pressed = true;
        Response::changed().pulse(haptics.press_ms)
    }

    pub fn touch_end(&mut self) -> Response {
        self.pressed = false;
        Response::changed()
    }

    pub fn encode(&self) -> Encoded {
        Encoded::Flag(self.pressed)
    }
}
