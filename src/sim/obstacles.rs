//! Obstacle generation, scrolling, collision, pickups, scoring and retirement

use glam::Vec2;
use rand::Rng;

use super::collision::{wall_contact, within_pickup};
use super::session::game_over;
use super::state::{GameEvent, GameState, Item, Obstacle, Phase, Zone};
use crate::consts::{JITTER_SLOTS, WORLD_HEIGHT};
use crate::tuning::Tuning;

/// Scroll speed for a score (stepped, not stateful)
pub fn speed_for_score(score: u64, tuning: &Tuning) -> f32 {
    let steps = score / tuning.speed_score_step;
    tuning.base_speed + steps as f32 * tuning.speed_increment
}

/// Seconds between spawns at the given speed
pub fn spawn_interval(canyon: bool, speed: f32, tuning: &Tuning) -> f32 {
    let distance = if canyon {
        tuning.canyon_spawn_distance
    } else {
        tuning.open_spawn_distance
    };
    distance / speed
}

/// Create the next obstacle for the current zone
pub fn spawn(state: &mut GameState) {
    state.obstacle_counter += 1;
    let counter = state.obstacle_counter;
    let canyon = state.phase.is_canyon();

    let GameState {
        tuning,
        rng,
        phase,
        player,
        obstacles,
        score,
        speed,
        ..
    } = state;

    let gap = tuning.gap(canyon);
    let (top, item) = if canyon {
        let center = phase.channel.advance(rng, *speed, player.gravity, tuning);
        let anchor = Vec2::new(tuning.item_offset_x, center);
        let item = if counter % tuning.canyon_powerup_every == 0 {
            Item::Powerup { anchor }
        } else if rng.random_bool(tuning.canyon_coin_chance) {
            Item::Coin { anchor }
        } else {
            Item::None
        };
        (center - gap / 2.0, item)
    } else {
        let top = rng.random::<f32>() * tuning.open_top_range + tuning.open_top_min;
        let anchor = Vec2::new(tuning.item_offset_x, top + gap / 2.0);
        let item = if *score >= tuning.open_powerup_min_score
            && counter % tuning.open_powerup_every == 0
        {
            Item::Powerup { anchor }
        } else if rng.random_bool(tuning.open_coin_chance) {
            Item::Coin { anchor }
        } else {
            Item::None
        };
        (top, item)
    };

    let mut jitter = [0.0; JITTER_SLOTS];
    if canyon {
        for offset in jitter.iter_mut() {
            *offset = (rng.random::<f32>() - 0.5) * 2.0 * tuning.canyon_jitter;
        }
    }

    let zone = if canyon { Zone::Canyon } else { Zone::OpenSea };
    log::debug!("Spawn #{} {:?} top={:.1} item={:?}", counter, zone, top, item);

    obstacles.push(Obstacle {
        id: counter,
        x: tuning.spawn_x,
        top,
        bottom: WORLD_HEIGHT - top - gap,
        gap,
        passed: false,
        item,
        zone,
        jitter,
        rotate: canyon && counter % tuning.canyon_rotate_every == 0,
    });
}

/// Spawn on cadence, then advance and resolve every obstacle
pub fn update(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt;
    let interval = spawn_interval(state.phase.is_canyon(), state.speed, &state.tuning);
    if state.spawn_timer > interval && state.phase.phase() != Phase::Transitioning {
        spawn(state);
        state.spawn_timer = 0.0;
    }

    let player = state.player.pos;
    for i in 0..state.obstacles.len() {
        state.obstacles[i].x -= state.speed * dt;

        if !state.is_protected() && wall_contact(player, &state.obstacles[i], &state.tuning).hit() {
            game_over(state);
            return;
        }

        collect_item(state, i, player);
        score_pass(state, i, player.x);
    }

    let retire_x = state.tuning.retire_x;
    state.obstacles.retain(|o| o.x >= retire_x);
}

fn collect_item(state: &mut GameState, index: usize, player: Vec2) {
    let obstacle = &mut state.obstacles[index];
    let Some(anchor) = obstacle.item_position() else {
        return;
    };
    if !within_pickup(player, anchor, state.tuning.pickup_radius) {
        return;
    }

    let item = std::mem::take(&mut obstacle.item);
    match item {
        Item::Coin { .. } => {
            let value = state.tuning.coin_value;
            state.score += value;
            state.push_event(GameEvent::CoinCollected { value });
        }
        Item::Powerup { .. } => {
            let secs = state.tuning.powerup_secs;
            state.player.grant_invincibility(secs);
            state.push_event(GameEvent::PowerupCollected { secs });
        }
        Item::None => {}
    }
}

fn score_pass(state: &mut GameState, index: usize, player_x: f32) {
    let obstacle = &mut state.obstacles[index];
    if obstacle.passed || obstacle.x + state.tuning.pass_width >= player_x {
        return;
    }
    obstacle.passed = true;

    match obstacle.zone {
        Zone::OpenSea => state.score += 1,
        Zone::Canyon => {
            state.canyon_passes += 1;
            if state.canyon_passes >= state.tuning.canyon_passes_per_point {
                state.score += 1;
                state.canyon_passes = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::Status;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default(), 0);
        state.status = Status::Playing;
        state.generation = 1;
        state
    }

    fn parked_obstacle(x: f32, zone: Zone) -> Obstacle {
        // Gap spans 300..560, well clear of a boat at y = 500 +- 25
        Obstacle {
            id: 99,
            x,
            top: 300.0,
            bottom: 440.0,
            gap: 260.0,
            passed: false,
            item: Item::None,
            zone,
            jitter: [0.0; JITTER_SLOTS],
            rotate: false,
        }
    }

    #[test]
    fn test_speed_steps_with_score() {
        let tuning = Tuning::default();
        assert_eq!(speed_for_score(0, &tuning), 350.0);
        assert_eq!(speed_for_score(49, &tuning), 350.0);
        assert_eq!(speed_for_score(50, &tuning), 380.0);
        assert_eq!(speed_for_score(275, &tuning), 500.0);
    }

    #[test]
    fn test_canyon_spawns_denser() {
        let tuning = Tuning::default();
        assert!((spawn_interval(false, 350.0, &tuning) - 2.0).abs() < 1e-6);
        assert!(spawn_interval(true, 350.0, &tuning) < spawn_interval(false, 350.0, &tuning));
    }

    #[test]
    fn test_open_sea_spawn_geometry() {
        let mut state = playing_state(5);
        for _ in 0..50 {
            spawn(&mut state);
        }
        for o in &state.obstacles {
            assert_eq!(o.gap, 260.0);
            assert!((100.0..550.0).contains(&o.top));
            assert!((o.top + o.gap + o.bottom - WORLD_HEIGHT).abs() < 1e-3);
            assert_eq!(o.jitter, [0.0; JITTER_SLOTS]);
            assert!(!o.rotate);
            assert_eq!(o.zone, Zone::OpenSea);
            if let Some(anchor) = o.item.anchor() {
                assert_eq!(anchor.y, o.top + o.gap / 2.0);
            }
        }
    }

    #[test]
    fn test_open_sea_powerup_cadence_needs_score() {
        let mut state = playing_state(8);
        for _ in 0..15 {
            spawn(&mut state);
        }
        assert!(!matches!(state.obstacles[14].item, Item::Powerup { .. }));

        state.score = 20;
        for _ in 0..15 {
            spawn(&mut state);
        }
        assert!(matches!(state.obstacles[29].item, Item::Powerup { .. }));
    }

    #[test]
    fn test_canyon_spawn_follows_channel() {
        let mut state = playing_state(11);
        state.phase.zone = Zone::Canyon;
        for _ in 0..120 {
            spawn(&mut state);
            let o = state.obstacles.last().unwrap();
            let center = state.phase.channel.center;
            assert_eq!(o.gap, 320.0);
            assert!((o.top - (center - 160.0)).abs() < 1e-3);
            assert!((220.0..=780.0).contains(&center));
            assert_eq!(o.rotate, o.id % 3 == 0);
            if let Some(anchor) = o.item.anchor() {
                assert_eq!(anchor.y, center);
            }
            if o.id % 40 == 0 {
                assert!(matches!(o.item, Item::Powerup { .. }));
            }
            assert!(o.jitter.iter().all(|j| j.abs() <= 30.0));
        }
    }

    #[test]
    fn test_open_sea_pass_scores_each() {
        let mut state = playing_state(1);
        for i in 0..3 {
            state.obstacles.push(parked_obstacle(70.0 - i as f32, Zone::OpenSea));
        }
        update(&mut state, SIM_DT);
        assert_eq!(state.score, 3);
        assert!(state.obstacles.iter().all(|o| o.passed));

        // Passed obstacles never score twice
        update(&mut state, SIM_DT);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_canyon_pass_scores_every_tenth() {
        let mut state = playing_state(1);
        for _ in 0..9 {
            state.obstacles.push(parked_obstacle(70.0, Zone::Canyon));
        }
        update(&mut state, SIM_DT);
        assert_eq!(state.score, 0);
        assert_eq!(state.canyon_passes, 9);

        state.obstacles.push(parked_obstacle(70.0, Zone::Canyon));
        update(&mut state, SIM_DT);
        assert_eq!(state.score, 1);
        assert_eq!(state.canyon_passes, 0);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut state = playing_state(1);
        let mut obstacle = parked_obstacle(140.0, Zone::OpenSea);
        obstacle.item = Item::Coin {
            anchor: Vec2::new(60.0, 480.0),
        };
        state.obstacles.push(obstacle);

        update(&mut state, SIM_DT);
        assert_eq!(state.score, 5);
        assert!(state.obstacles[0].item.is_none());
        assert_eq!(state.status, Status::Playing);

        update(&mut state, SIM_DT);
        assert_eq!(state.score, 5);
        let coins = state
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
            .count();
        assert_eq!(coins, 1);
    }

    #[test]
    fn test_powerup_grants_invincibility() {
        let mut state = playing_state(1);
        let mut obstacle = parked_obstacle(140.0, Zone::OpenSea);
        obstacle.item = Item::Powerup {
            anchor: Vec2::new(60.0, 500.0),
        };
        state.obstacles.push(obstacle);
        update(&mut state, SIM_DT);
        assert_eq!(state.player.invincible, 8.0);
        assert!(state.is_protected());
    }

    #[test]
    fn test_wall_hit_ends_run_unless_protected() {
        let mut state = playing_state(1);
        let mut obstacle = parked_obstacle(150.0, Zone::OpenSea);
        obstacle.top = 600.0;
        state.obstacles.push(obstacle);

        state.player.grant_invincibility(1.0);
        update(&mut state, SIM_DT);
        assert_eq!(state.status, Status::Playing);

        state.player.invincible = 0.0;
        update(&mut state, SIM_DT);
        assert_eq!(state.status, Status::GameOver);
    }

    #[test]
    fn test_retire_past_left_margin() {
        let mut state = playing_state(1);
        let mut obstacle = parked_obstacle(-196.0, Zone::OpenSea);
        obstacle.passed = true;
        state.obstacles.push(obstacle);
        update(&mut state, SIM_DT);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_no_spawn_while_transitioning() {
        let mut state = playing_state(1);
        state.score = 460;
        crate::sim::phase::check_cycle(&mut state);
        state.spawn_timer = 10.0;
        update(&mut state, SIM_DT);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.obstacle_counter, 0);
    }
}
