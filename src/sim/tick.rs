//! Fixed timestep simulation tick
//!
//! `advance` turns host time into spawn and fall steps in chronological
//! order; `fall_tick` is one 16 ms step of gravity.

use super::spawn::spawn_decoy;
use super::state::{EndReason, GameEvent, GameState, Removal};
use super::run::end_run;

/// Let `dt_ms` of game time pass, firing each due timer in order.
///
/// On a tie the spawn fires first, so a fresh disc gets the same tick as
/// everything else. Stops early if the run ends mid-step.
pub fn advance(state: &mut GameState, dt_ms: u32) {
    let mut remaining = dt_ms;
    while remaining > 0 && state.is_running() {
        let step = [state.spawn_timer.until_due(), state.tick_timer.until_due()]
            .into_iter()
            .flatten()
            .fold(remaining, u32::min);

        remaining -= step;
        state.clock_ms += u64::from(step);

        let spawn_due = state.spawn_timer.elapse(step);
        let tick_due = state.tick_timer.elapse(step);
        if spawn_due {
            spawn_decoy(state);
        }
        if tick_due {
            fall_tick(state);
        }
    }
}

/// Move every disc down by the current fall speed and resolve the ones that
/// crossed the floor.
pub fn fall_tick(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    let speed = state.session.fall_speed;
    let floor = state.area.y;
    let required_number = state.session.required_number;

    // Reverse so removals don't shift unvisited entries
    for index in (0..state.pool.len()).rev() {
        let obj = &mut state.pool.objects_mut()[index];
        obj.pos.y += speed;
        if obj.pos.y <= floor {
            continue;
        }

        if obj.required && obj.value == required_number {
            log::info!("Missed required disc {}", obj.value);
            end_run(state, EndReason::MissedRequired);
            return;
        }

        if let Some(obj) = state.pool.remove_at(index) {
            state.events.push(GameEvent::Removed {
                id: obj.id,
                cause: Removal::FellOff,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    use crate::sim::run::start_run;
    use crate::sim::state::GamePhase;
    use crate::tuning::{Tier, Tuning};

    fn running() -> GameState {
        let mut state = GameState::new(12345, Tuning::default());
        state.set_area(Vec2::new(400.0, 600.0));
        start_run(&mut state, Tier::Easy).expect("idle state starts");
        state
    }

    #[test]
    fn test_fall_moves_every_disc() {
        let mut state = running();
        state.pool.insert(3, Vec2::new(0.0, 100.0), false);
        fall_tick(&mut state);
        let ys: Vec<f32> = state.pool.iter().map(|o| o.pos.y).collect();
        assert!((ys[0] - (-48.5)).abs() < 0.0001);
        assert!((ys[1] - 101.5).abs() < 0.0001);
    }

    #[test]
    fn test_decoy_falls_off_silently() {
        let mut state = running();
        // Same value as the required number, but only a decoy
        let decoy = state.pool.insert(1, Vec2::new(0.0, 599.0), false);
        fall_tick(&mut state);

        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.pool.contains(decoy));
        assert!(state.events().contains(&GameEvent::Removed {
            id: decoy,
            cause: Removal::FellOff,
        }));
    }

    #[test]
    fn test_missed_required_ends_run() {
        let mut state = running();
        state.pool.objects_mut()[0].pos.y = 599.0;
        fall_tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.pool.is_empty());
    }

    #[test]
    fn test_stale_required_is_removed_not_fatal() {
        let mut state = running();
        // Flag still set but the player has moved past this number
        state.session.required_number = 2;
        state.pool.objects_mut()[0].pos.y = 599.0;
        fall_tick(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.pool.is_empty());
    }

    #[test]
    fn test_multiple_removals_in_one_tick() {
        let mut state = running();
        let a = state.pool.insert(7, Vec2::new(0.0, 600.0), false);
        let keep = state.pool.insert(8, Vec2::new(100.0, 10.0), false);
        let b = state.pool.insert(9, Vec2::new(200.0, 600.0), false);
        fall_tick(&mut state);

        assert!(!state.pool.contains(a));
        assert!(!state.pool.contains(b));
        assert!(state.pool.contains(keep));
        assert_eq!(state.pool.len(), 2);
    }

    #[test]
    fn test_advance_interleaves_timers() {
        let mut state = running();
        advance(&mut state, 1000);
        // 62 ticks, no spawn yet
        assert_eq!(state.pool.len(), 1);
        let y = state.pool.objects()[0].pos.y;
        assert!((y - (-50.0 + 62.0 * 1.5)).abs() < 0.001);

        advance(&mut state, 500);
        assert_eq!(state.pool.len(), 2);
        assert_eq!(state.clock_ms, 1500);
    }

    #[test]
    fn test_advance_stops_at_game_over() {
        let mut state = running();
        // 650 px at 1.5 px per 16 ms is ~6.9 s
        advance(&mut state, 60_000);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.clock_ms < 8000);
    }

    #[test]
    fn test_determinism() {
        let mut a = running();
        let mut b = running();
        for dt in [16, 33, 100, 7, 1500, 16] {
            advance(&mut a, dt);
            advance(&mut b, dt);
        }
        assert_eq!(a.pool.objects(), b.pool.objects());
        assert_eq!(a.clock_ms, b.clock_ms);
    }
}
