//! Idle/demo pilot used by the headless runner
//!
//! Steers toward the middle of the next gap with a simple bang-bang rule:
//! jump whenever the boat is falling and has sunk below the target.

use super::state::GameState;

/// Slack below the target before a jump is triggered
const DEADBAND: f32 = 12.0;

/// Vertical target: middle of the nearest gap still ahead of (or over) the boat
pub fn target_y(state: &GameState) -> f32 {
    let player_x = state.player.pos.x;
    state
        .obstacles
        .iter()
        .filter(|o| o.x + state.tuning.pass_width >= player_x)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|o| o.top + o.gap / 2.0)
        .unwrap_or(state.tuning.player_start_y)
}

/// Whether the pilot wants to jump this frame
pub fn wants_jump(state: &GameState) -> bool {
    let player = &state.player;
    player.vel >= 0.0 && player.pos.y > target_y(state) + DEADBAND
}
