//! Wave-based progression and the simulation half of the frame loop.
//!
//! Targets spawn in groups of `group_size`. A level is earned each time a full
//! group has been cleared off the screen: the check runs when the active set
//! empties, *before* the next group spawns, so every cleared wave advances the
//! level exactly once no matter how many frames were skipped while paused.

use rand::Rng;
use rand::rngs::StdRng;

use crate::audio::AudioNotifier;
use crate::config::{GameConfig, GroupSize};
use crate::input::Point;
use crate::target::{self, PALETTE, Target};

/// What happened during one unpaused tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub removed: usize,
    pub spawned: u32,
    pub leveled_up: bool,
    pub complete: bool,
}

pub struct GameState {
    config: GameConfig,
    rng: StdRng,
    targets: Vec<Target>,
    removed_count: u32,
    spawned_count: u32,
    current_level: u32,
    total_levels: u32,
    paused: bool,
    music_enabled: bool,
    pointer: Option<Point>,
}

impl GameState {
    /// Builds the game and spawns the first wave.
    pub fn new(config: GameConfig, rng: StdRng) -> Self {
        let total_levels = config.total_levels();
        let mut game = Self {
            config,
            rng,
            targets: Vec::new(),
            removed_count: 0,
            spawned_count: 0,
            current_level: 1,
            total_levels,
            paused: false,
            music_enabled: false,
            pointer: None,
        };
        game.spawn_group();
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }
    pub fn removed_count(&self) -> u32 {
        self.removed_count
    }
    pub fn spawned_count(&self) -> u32 {
        self.spawned_count
    }
    pub fn current_level(&self) -> u32 {
        self.current_level
    }
    pub fn total_levels(&self) -> u32 {
        self.total_levels
    }
    pub fn total_targets(&self) -> u32 {
        self.config.total_targets
    }
    pub fn group_size(&self) -> GroupSize {
        self.config.group_size
    }
    pub fn is_paused(&self) -> bool {
        self.paused
    }
    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.config.canvas_width as f64, self.config.canvas_height as f64)
    }

    /// Every target has been spawned and none remain on screen.
    pub fn is_complete(&self) -> bool {
        self.spawned_count >= self.config.total_targets && self.targets.is_empty()
    }

    /// Base upward speed for a level; strictly increasing while `speed_per_level > 0`.
    pub fn speed_for_level(&self, level: u32) -> f64 {
        self.config.base_speed + level.saturating_sub(1) as f64 * self.config.speed_per_level
    }

    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Spawn the next wave: `min(group_size, remaining)` targets. No-op once all have spawned.
    pub fn spawn_group(&mut self) -> u32 {
        if self.spawned_count >= self.config.total_targets {
            return 0;
        }
        let remaining = self.config.total_targets - self.spawned_count;
        let to_spawn = self.config.group_size.get().min(remaining);
        let speed = self.speed_for_level(self.current_level);
        let (width, height) = self.canvas_size();
        let level = self.current_level as f64;
        let cfg = &self.config;

        for _ in 0..to_spawn {
            let r = uniform(&mut self.rng, cfg.radius_min, cfg.radius_max);
            let x = if width > 2.0 * r { uniform(&mut self.rng, r, width - r) } else { width / 2.0 };
            let y = height + uniform(&mut self.rng, r + cfg.spawn_gap, cfg.spawn_depth_max);
            let vx = uniform(&mut self.rng, -cfg.max_drift, cfg.max_drift) * (1.0 + level * cfg.drift_per_level);
            let vy = -speed * uniform(&mut self.rng, cfg.speed_jitter_min, cfg.speed_jitter_max);
            let colors = PALETTE[self.rng.gen_range(0..PALETTE.len())];

            self.targets.push(Target::new(x, y, r, vx, vy, colors));
            self.spawned_count += 1;
        }
        to_spawn
    }

    /// One frame of simulation. Does nothing while paused.
    pub fn tick(&mut self, audio: &mut dyn AudioNotifier) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.paused {
            return outcome;
        }

        let (width, _) = self.canvas_size();
        let fade = self.config.fade_speed;
        for t in &mut self.targets {
            target::update(t, width, fade, self.pointer);
        }

        let before = self.targets.len();
        self.targets.retain(|t| !target::is_dead(t));
        outcome.removed = before - self.targets.len();

        if self.targets.is_empty() && self.spawned_count < self.config.total_targets {
            let group = self.config.group_size.get();
            if self.spawned_count != 0 && self.spawned_count % group == 0 {
                let next = (self.current_level + 1).min(self.total_levels);
                if next != self.current_level {
                    self.current_level = next;
                    outcome.leveled_up = true;
                    log::info!("level {}/{}", self.current_level, self.total_levels);
                    audio.notify_level_up();
                }
            }
            outcome.spawned = self.spawn_group();
        }

        outcome.complete = self.is_complete();
        outcome
    }

    /// Pop the topmost non-fading target under `p`. At most one target per click.
    pub fn click(&mut self, p: Point, audio: &mut dyn AudioNotifier) -> bool {
        let Some(hit) = self
            .targets
            .iter_mut()
            .rev()
            .find(|t| !t.fading && target::contains_point(t, p))
        else {
            return false;
        };
        target::start_fade(hit);
        self.removed_count += 1;
        log::debug!("hit at ({:.1}, {:.1}), removed {}", p.x, p.y, self.removed_count);
        audio.notify_hit();
        true
    }

    /// Discard every target and counter, unpause, and spawn the first wave.
    pub fn reset(&mut self, audio: &mut dyn AudioNotifier) {
        self.targets.clear();
        self.removed_count = 0;
        self.spawned_count = 0;
        self.current_level = 1;
        self.total_levels = self.config.total_levels();
        self.paused = false;
        self.spawn_group();
        audio.set_music(self.music_playing());
        log::info!(
            "reset: {} targets in {} levels of {}",
            self.config.total_targets,
            self.total_levels,
            self.config.group_size.get()
        );
    }

    /// Changing the wave size always restarts the game.
    pub fn set_group_size(&mut self, group_size: GroupSize, audio: &mut dyn AudioNotifier) {
        log::debug!("group size -> {}", group_size.get());
        self.config.group_size = group_size;
        self.reset(audio);
    }

    pub fn toggle_pause(&mut self, audio: &mut dyn AudioNotifier) -> bool {
        self.paused = !self.paused;
        audio.set_music(self.music_playing());
        self.paused
    }

    pub fn toggle_music(&mut self, audio: &mut dyn AudioNotifier) -> bool {
        self.music_enabled = !self.music_enabled;
        audio.set_music(self.music_playing());
        self.music_enabled
    }

    pub fn music_playing(&self) -> bool {
        self.music_enabled && !self.paused
    }
}

fn uniform(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use rand::SeedableRng;

    fn game(total: u32, group: GroupSize) -> GameState {
        let cfg = GameConfig { total_targets: total, group_size: group, ..GameConfig::default() };
        GameState::new(cfg, StdRng::seed_from_u64(42))
    }

    #[derive(Default)]
    struct Recorder {
        hits: u32,
        level_ups: u32,
        music: Vec<bool>,
    }

    impl AudioNotifier for Recorder {
        fn notify_hit(&mut self) {
            self.hits += 1;
        }
        fn notify_level_up(&mut self) {
            self.level_ups += 1;
        }
        fn set_music(&mut self, enabled: bool) {
            self.music.push(enabled);
        }
    }

    #[test]
    fn first_wave_spawns_below_canvas_moving_up() {
        let g = game(150, GroupSize::Ten);
        assert_eq!(g.targets().len(), 10);
        assert_eq!(g.spawned_count(), 10);
        let (w, h) = g.canvas_size();
        for t in g.targets() {
            assert!((10.0..24.0).contains(&t.r));
            assert!(t.x >= t.r && t.x <= w - t.r);
            assert!(t.y - t.r >= h);
            assert!(t.vy < 0.0);
            assert!(-t.vy >= 0.55 * 0.9 && -t.vy < 0.55 * 1.25);
            assert_eq!(t.alpha, 1.0);
        }
    }

    #[test]
    fn last_group_is_truncated_and_spawning_stops() {
        let mut g = game(25, GroupSize::Ten);
        g.targets.clear();
        g.spawned_count = 20;
        assert_eq!(g.spawn_group(), 5);
        assert_eq!(g.spawned_count(), 25);
        assert_eq!(g.spawn_group(), 0);
        assert_eq!(g.targets().len(), 5);
    }

    #[test]
    fn cleared_wave_advances_level_before_spawning() {
        let mut g = game(150, GroupSize::Ten);
        let mut audio = Recorder::default();
        g.targets.clear();
        let out = g.tick(&mut audio);
        assert!(out.leveled_up);
        assert_eq!(out.spawned, 10);
        assert_eq!(g.current_level(), 2);
        assert_eq!(audio.level_ups, 1);
        let min_speed = g.speed_for_level(2) * 0.9;
        assert!(g.targets().iter().all(|t| -t.vy >= min_speed));
    }

    #[test]
    fn level_is_capped_at_total_levels() {
        let mut g = game(20, GroupSize::Ten);
        let mut audio = Recorder::default();
        g.current_level = 2;
        g.targets.clear();
        g.spawned_count = 10;
        let out = g.tick(&mut audio);
        assert!(!out.leveled_up);
        assert_eq!(g.current_level(), 2);
        assert_eq!(audio.level_ups, 0);
    }

    #[test]
    fn paused_tick_changes_nothing() {
        let mut g = game(150, GroupSize::Ten);
        let mut audio = NullAudio;
        g.toggle_pause(&mut audio);
        let before = g.targets().to_vec();
        g.targets.clear();
        assert_eq!(g.tick(&mut audio), TickOutcome::default());
        assert!(g.targets().is_empty());
        g.targets = before.clone();
        g.tick(&mut audio);
        assert_eq!(g.targets(), &before[..]);
    }

    #[test]
    fn click_pops_topmost_overlapping_target_only() {
        let mut g = game(150, GroupSize::Ten);
        let mut audio = Recorder::default();
        g.targets.clear();
        g.targets.push(Target::new(100.0, 100.0, 20.0, 0.0, -1.0, PALETTE[0]));
        g.targets.push(Target::new(110.0, 100.0, 20.0, 0.0, -1.0, PALETTE[1]));

        assert!(g.click(Point::new(105.0, 100.0), &mut audio));
        assert!(!g.targets[0].fading);
        assert!(g.targets[1].fading);

        // Topmost is already fading, so the next click falls through.
        assert!(g.click(Point::new(105.0, 100.0), &mut audio));
        assert!(g.targets[0].fading);
        assert_eq!(g.removed_count(), 2);
        assert_eq!(audio.hits, 2);

        assert!(!g.click(Point::new(105.0, 100.0), &mut audio));
        assert_eq!(g.removed_count(), 2);
    }

    #[test]
    fn pause_and_music_gate_the_loop() {
        let mut g = game(150, GroupSize::Ten);
        let mut audio = Recorder::default();
        assert!(g.toggle_music(&mut audio));
        assert!(g.toggle_pause(&mut audio));
        assert!(!g.toggle_pause(&mut audio));
        assert!(!g.toggle_music(&mut audio));
        assert_eq!(audio.music, vec![true, false, true, false]);
    }

    #[test]
    fn reset_unpauses_and_keeps_music_choice() {
        let mut g = game(150, GroupSize::Ten);
        let mut audio = Recorder::default();
        g.toggle_music(&mut audio);
        g.toggle_pause(&mut audio);
        g.reset(&mut audio);
        assert!(!g.is_paused());
        assert!(g.music_enabled());
        assert_eq!(audio.music.last(), Some(&true));
    }

    #[test]
    fn narrow_canvas_centres_spawns() {
        let cfg = GameConfig { canvas_width: 30, ..GameConfig::default() };
        let g = GameState::new(cfg, StdRng::seed_from_u64(1));
        assert!(g.targets().iter().all(|t| t.x == 15.0 || (t.x >= t.r && t.x <= 30.0 - t.r)));
    }
}
