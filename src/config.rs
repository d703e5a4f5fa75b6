//! Gameplay tuning. Every constant the spawner, mover and fader read lives in
//! [`GameConfig`] so a page can override them with a JSON blob at startup.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Allowed wave sizes offered by the group-size selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub enum GroupSize {
    #[default]
    Ten,
    Fifteen,
    Twenty,
}

impl GroupSize {
    pub const ALL: [GroupSize; 3] = [GroupSize::Ten, GroupSize::Fifteen, GroupSize::Twenty];

    pub fn get(self) -> u32 {
        match self {
            GroupSize::Ten => 10,
            GroupSize::Fifteen => 15,
            GroupSize::Twenty => 20,
        }
    }

    /// Parse the `<select>` value. Anything outside the fixed set is rejected.
    pub fn from_selector(value: &str) -> Option<Self> {
        value.trim().parse::<u32>().ok().and_then(|n| Self::try_from(n).ok())
    }
}

impl TryFrom<u32> for GroupSize {
    type Error = String;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            10 => Ok(GroupSize::Ten),
            15 => Ok(GroupSize::Fifteen),
            20 => Ok(GroupSize::Twenty),
            other => Err(format!("group size {other} is not one of 10, 15, 20")),
        }
    }
}

impl From<GroupSize> for u32 {
    fn from(g: GroupSize) -> u32 {
        g.get()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub total_targets: u32,
    pub group_size: GroupSize,
    /// Upward speed (px/tick) at level 1.
    pub base_speed: f64,
    pub speed_per_level: f64,
    /// Opacity lost per tick once a target is popped.
    pub fade_speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    /// Horizontal speed is drawn from `[-max_drift, max_drift)`.
    pub max_drift: f64,
    /// Extra horizontal speed per level, as a fraction.
    pub drift_per_level: f64,
    pub speed_jitter_min: f64,
    pub speed_jitter_max: f64,
    /// Lower bound of the spawn depth below the bottom edge is `radius + spawn_gap`.
    pub spawn_gap: f64,
    pub spawn_depth_max: f64,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_targets: 150,
            group_size: GroupSize::Ten,
            base_speed: 0.55,
            speed_per_level: 0.12,
            fade_speed: 0.04,
            radius_min: 10.0,
            radius_max: 24.0,
            max_drift: 0.45,
            drift_per_level: 0.03,
            speed_jitter_min: 0.9,
            speed_jitter_max: 1.25,
            spawn_gap: 10.0,
            spawn_depth_max: 120.0,
            canvas_width: 960,
            canvas_height: 540,
        }
    }
}

impl GameConfig {
    /// `ceil(total_targets / group_size)`.
    pub fn total_levels(&self) -> u32 {
        self.total_targets.div_ceil(self.group_size.get())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.total_targets > 0, "total_targets must be positive");
        anyhow::ensure!(self.base_speed > 0.0, "base_speed must be positive");
        anyhow::ensure!(self.speed_per_level > 0.0, "speed_per_level must be positive");
        anyhow::ensure!(
            self.fade_speed > 0.0 && self.fade_speed <= 1.0,
            "fade_speed must be in (0, 1], got {}",
            self.fade_speed
        );
        anyhow::ensure!(
            self.radius_min > 0.0 && self.radius_min < self.radius_max,
            "radius range [{}, {}) is empty or not positive",
            self.radius_min,
            self.radius_max
        );
        anyhow::ensure!(self.max_drift >= 0.0, "max_drift must not be negative");
        anyhow::ensure!(
            self.speed_jitter_min > 0.0 && self.speed_jitter_min <= self.speed_jitter_max,
            "speed jitter range [{}, {}) is invalid",
            self.speed_jitter_min,
            self.speed_jitter_max
        );
        anyhow::ensure!(self.spawn_gap >= 0.0, "spawn_gap must not be negative");
        anyhow::ensure!(
            self.canvas_width > 0 && self.canvas_height > 0,
            "canvas must have a non-zero size"
        );
        anyhow::ensure!(
            self.canvas_width as f64 >= 2.0 * self.radius_max,
            "canvas width {} cannot fit a target of radius {}",
            self.canvas_width,
            self.radius_max
        );
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        use anyhow::Context;
        let cfg: GameConfig = serde_json::from_str(json).context("parsing game config")?;
        cfg.validate().context("validating game config")?;
        Ok(cfg)
    }
}
