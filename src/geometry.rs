//! On-screen geometry of a control.
//!
//! Every touch-mapping algorithm works on the same derived measurements of the
//! control's rectangle: its center, its half extents and its far corner. These
//! are resolved once when a control is attached and again on every resize.

use serde::{Deserialize, Serialize};

/// Rectangle in page coordinates, as reported by the layout engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// How a control occupies its grid area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shape {
    /// Uses the whole rectangle.
    #[default]
    Rectangle,
    /// Largest square centered in the rectangle.
    Square,
}

/// Derived measurements of a control's area.
///
/// `x`/`y`/`width`/`height` describe the effective area after the shape has
/// been applied. The center is always the center of the original rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub half_width: f64,
    pub half_height: f64,
    pub x_center: f64,
    pub y_center: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Geometry {
    /// Resolves the geometry of `rect` for a control of the given `shape`.
    pub fn resolve(rect: Rect, shape: Shape) -> Self {
        let mut geometry = Geometry {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            half_width: rect.width / 2.0,
            half_height: rect.height / 2.0,
            x_center: rect.x + rect.width / 2.0,
            y_center: rect.y + rect.height / 2.0,
            x_max: 0.0,
            y_max: 0.0,
        };

        if shape == Shape::Square {
            if geometry.width < geometry.height {
                geometry.y += geometry.half_height - geometry.half_width;
                geometry.height = geometry.width;
                geometry.half_height = geometry.half_width;
            } else {
                geometry.x += geometry.half_width - geometry.half_height;
                geometry.width = geometry.height;
                geometry.half_width = geometry.half_height;
            }
        }

        geometry.x_max = geometry.x + geometry.width;
        geometry.y_max = geometry.y + geometry.height;
        geometry
    }

    /// Polar angle of a page point around the center, in radians (`atan2` range).
    pub fn angle_of(&self, px: f64, py: f64) -> f64 {
        (py - self.y_center).atan2(px - self.x_center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_keeps_area() {
        let g = Geometry::resolve(Rect::new(10.0, 20.0, 100.0, 50.0), Shape::Rectangle);
        assert_eq!(g.x_center, 60.0);
        assert_eq!(g.y_center, 45.0);
        assert_eq!(g.half_width, 50.0);
        assert_eq!(g.half_height, 25.0);
        assert_eq!(g.x_max, 110.0);
        assert_eq!(g.y_max, 70.0);
    }

    #[test]
    fn test_square_clamps_wide_rect() {
        let g = Geometry::resolve(Rect::new(0.0, 0.0, 200.0, 100.0), Shape::Square);
        assert_eq!(g.x, 50.0);
        assert_eq!(g.width, 100.0);
        assert_eq!(g.half_width, 50.0);
        assert_eq!(g.x_max, 150.0);
        assert_eq!(g.x_center, 100.0);
        assert_eq!(g.y_center, 50.0);
    }

    #[test]
    fn test_square_clamps_tall_rect() {
        let g = Geometry::resolve(Rect::new(0.0, 0.0, 80.0, 200.0), Shape::Square);
        assert_eq!(g.y, 60.0);
        assert_eq!(g.height, 80.0);
        assert_eq!(g.half_height, 40.0);
        assert_eq!(g.y_max, 140.0);
    }
}
