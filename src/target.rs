//! A single rising target. Plain data plus free functions so the simulation can
//! be exercised without a canvas.

use crate::input::{Point, in_circle};

/// Base, hover and glow fill for one target, fixed at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub base: &'static str,
    pub hover: &'static str,
    pub glow: &'static str,
}

pub const PALETTE: [Palette; 5] = [
    Palette { base: "rgba(124,58,237,0.90)", hover: "rgba(34,211,238,0.98)", glow: "rgba(34,211,238,0.14)" },
    Palette { base: "rgba(255,61,127,0.90)", hover: "rgba(249,115,22,0.98)", glow: "rgba(255,61,127,0.14)" },
    Palette { base: "rgba(34,197,94,0.90)", hover: "rgba(34,211,238,0.98)", glow: "rgba(34,197,94,0.14)" },
    Palette { base: "rgba(59,130,246,0.90)", hover: "rgba(124,58,237,0.98)", glow: "rgba(59,130,246,0.14)" },
    Palette { base: "rgba(249,115,22,0.90)", hover: "rgba(255,61,127,0.98)", glow: "rgba(249,115,22,0.14)" },
];

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub vx: f64,
    pub vy: f64,
    pub alpha: f64,
    pub fading: bool,
    pub hovered: bool,
    pub colors: Palette,
}

impl Target {
    pub fn new(x: f64, y: f64, r: f64, vx: f64, vy: f64, colors: Palette) -> Self {
        Self { x, y, r, vx, vy, alpha: 1.0, fading: false, hovered: false, colors }
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }
}

/// Advance one tick.
///
/// Rising targets integrate their velocity and bounce off the side walls.
/// Fading targets stay put and lose `fade_speed` opacity. Hover is refreshed
/// from the latest pointer in both states.
pub fn update(t: &mut Target, canvas_width: f64, fade_speed: f64, pointer: Option<Point>) {
    if t.fading {
        t.alpha -= fade_speed;
    } else {
        t.x += t.vx;
        t.y += t.vy;

        if t.x - t.r < 0.0 {
            t.x = t.r;
            t.vx = -t.vx;
        }
        if t.x + t.r > canvas_width {
            t.x = canvas_width - t.r;
            t.vx = -t.vx;
        }
    }

    t.hovered = pointer.is_some_and(|p| contains_point(t, p));
}

/// One-way transition into the fading state.
pub fn start_fade(t: &mut Target) {
    t.fading = true;
}

/// Fully transparent, or drifted entirely above the top edge.
pub fn is_dead(t: &Target) -> bool {
    t.alpha <= 0.0 || t.y + t.r < 0.0
}

pub fn contains_point(t: &Target, p: Point) -> bool {
    in_circle(p, t.x, t.y, t.r)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(x: f64, y: f64, vx: f64, vy: f64) -> Target {
        Target::new(x, y, 10.0, vx, vy, PALETTE[0])
    }

    #[test]
    fn rising_target_integrates_velocity() {
        let mut t = target(100.0, 300.0, 0.5, -1.5);
        update(&mut t, 400.0, 0.04, None);
        assert_eq!((t.x, t.y), (100.5, 298.5));
        assert_eq!(t.alpha, 1.0);
    }

    #[test]
    fn walls_reflect_horizontal_velocity() {
        let mut t = target(11.0, 300.0, -3.0, -1.0);
        update(&mut t, 400.0, 0.04, None);
        assert_eq!(t.x, 10.0);
        assert_eq!(t.vx, 3.0);

        let mut t = target(388.0, 300.0, 5.0, -1.0);
        update(&mut t, 400.0, 0.04, None);
        assert_eq!(t.x, 390.0);
        assert_eq!(t.vx, -5.0);
    }

    #[test]
    fn fading_target_is_frozen_and_dims() {
        let mut t = target(100.0, 300.0, 2.0, -2.0);
        start_fade(&mut t);
        for _ in 0..5 {
            update(&mut t, 400.0, 0.04, None);
        }
        assert_eq!((t.x, t.y), (100.0, 300.0));
        assert!((t.alpha - 0.8).abs() < 1e-9);
        assert!(t.is_fading());
    }

    #[test]
    fn dead_when_transparent_or_above_top() {
        let mut t = target(100.0, 300.0, 0.0, -1.0);
        assert!(!is_dead(&t));
        t.alpha = 0.0;
        assert!(is_dead(&t));

        let t = target(100.0, -10.5, 0.0, -1.0);
        assert!(is_dead(&t));
        let t = target(100.0, -9.5, 0.0, -1.0);
        assert!(!is_dead(&t));
    }

    #[test]
    fn hover_follows_pointer() {
        let mut t = target(100.0, 100.0, 0.0, 0.0);
        update(&mut t, 400.0, 0.04, Some(Point::new(105.0, 100.0)));
        assert!(t.hovered);
        update(&mut t, 400.0, 0.04, Some(Point::new(200.0, 100.0)));
        assert!(!t.hovered);
        update(&mut t, 400.0, 0.04, None);
        assert!(!t.hovered);
    }
}
