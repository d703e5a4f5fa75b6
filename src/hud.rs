//! Text and bar values pushed to the page chrome each frame.

use crate::game::GameState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    pub removed_text: String,
    /// Rounded percentage of all targets popped; also the removed bar width.
    pub removed_pct: u32,
    pub levels_text: String,
    pub level_badge: String,
    pub levels_pct: u32,
    pub level_hint: String,
    pub on_screen: String,
    pub spawned: String,
}

impl HudSnapshot {
    pub fn from_game(game: &GameState) -> Self {
        let total = game.total_targets();
        let level = game.current_level();
        let levels = game.total_levels();
        Self {
            removed_text: game.removed_count().to_string(),
            removed_pct: percent(game.removed_count(), total),
            levels_text: format!("{level} / {levels}"),
            level_badge: format!("Level: {level}/{levels}"),
            levels_pct: percent(level, levels),
            level_hint: format!(
                "Speed: {:.2} • Targets/level: {}",
                game.speed_for_level(level),
                game.group_size().get()
            ),
            on_screen: format!("On screen: {}", game.targets().len()),
            spawned: format!("Spawned: {}/{}", game.spawned_count(), total),
        }
    }
}

fn percent(n: u32, of: u32) -> u32 {
    if of == 0 { 0 } else { (n as f64 / of as f64 * 100.0).round() as u32 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, GroupSize};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fresh_game_snapshot() {
        let g = GameState::new(GameConfig::default(), StdRng::seed_from_u64(3));
        let hud = HudSnapshot::from_game(&g);
        assert_eq!(hud.removed_text, "0");
        assert_eq!(hud.removed_pct, 0);
        assert_eq!(hud.levels_text, "1 / 15");
        assert_eq!(hud.level_badge, "Level: 1/15");
        assert_eq!(hud.levels_pct, 7);
        assert_eq!(hud.level_hint, "Speed: 0.55 • Targets/level: 10");
        assert_eq!(hud.on_screen, "On screen: 10");
        assert_eq!(hud.spawned, "Spawned: 10/150");
    }

    #[test]
    fn hint_tracks_group_size() {
        let cfg = GameConfig { group_size: GroupSize::Twenty, ..GameConfig::default() };
        let g = GameState::new(cfg, StdRng::seed_from_u64(3));
        let hud = HudSnapshot::from_game(&g);
        assert_eq!(hud.level_hint, "Speed: 0.55 • Targets/level: 20");
        assert_eq!(hud.levels_text, "1 / 8");
        assert_eq!(hud.levels_pct, 13);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(75, 150), 50);
        assert_eq!(percent(3, 0), 0);
    }
}
