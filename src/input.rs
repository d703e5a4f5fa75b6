//! Pointer handling: screen → canvas pixel mapping and circle hit-testing.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point-in-circle by squared distance (no sqrt). The boundary counts as inside.
pub fn in_circle(p: Point, cx: f64, cy: f64, r: f64) -> bool {
    let dx = p.x - cx;
    let dy = p.y - cy;
    dx * dx + dy * dy <= r * r
}

/// Snapshot of the canvas' on-screen box versus its backing store size.
/// CSS may stretch the canvas, so each axis gets its own scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasMapping {
    pub rect_left: f64,
    pub rect_top: f64,
    pub rect_width: f64,
    pub rect_height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl CanvasMapping {
    pub fn to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        Point {
            x: (client_x - self.rect_left) * axis_scale(self.canvas_width, self.rect_width),
            y: (client_y - self.rect_top) * axis_scale(self.canvas_height, self.rect_height),
        }
    }
}

// A collapsed (display:none) canvas reports a zero-sized rect.
fn axis_scale(backing: f64, displayed: f64) -> f64 {
    if displayed > 0.0 { backing / displayed } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_includes_boundary() {
        assert!(in_circle(Point::new(3.0, 4.0), 0.0, 0.0, 5.0));
        assert!(!in_circle(Point::new(3.0, 4.01), 0.0, 0.0, 5.0));
        assert!(in_circle(Point::new(10.0, 10.0), 10.0, 10.0, 0.5));
    }

    #[test]
    fn mapping_scales_each_axis_independently() {
        let m = CanvasMapping {
            rect_left: 100.0,
            rect_top: 50.0,
            rect_width: 480.0,
            rect_height: 540.0,
            canvas_width: 960.0,
            canvas_height: 540.0,
        };
        let p = m.to_canvas(340.0, 320.0);
        assert_eq!(p, Point::new(480.0, 270.0));
    }

    #[test]
    fn zero_sized_rect_maps_one_to_one() {
        let m = CanvasMapping {
            rect_left: 10.0,
            rect_top: 10.0,
            rect_width: 0.0,
            rect_height: 0.0,
            canvas_width: 960.0,
            canvas_height: 540.0,
        };
        assert_eq!(m.to_canvas(20.0, 30.0), Point::new(10.0, 20.0));
    }
}
