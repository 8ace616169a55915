//! Run lifecycle: start and game over

use super::spawn::spawn_required;
use super::state::{EndReason, GameEvent, GamePhase, GameState, Removal, Session};
use crate::error::{Error, Result};
use crate::tuning::Tier;

/// Reset the session for `tier`, place the first required disc and start
/// both timers.
pub fn start_run(state: &mut GameState, tier: Tier) -> Result<()> {
    if state.is_running() {
        return Err(Error::RunInProgress);
    }

    state.session = Session::new(tier, &state.tuning);
    state.clock_ms = 0;
    for obj in state.pool.drain() {
        state.events.push(GameEvent::Removed {
            id: obj.id,
            cause: Removal::Cleared,
        });
    }
    state.phase = GamePhase::Running;
    state.events.push(GameEvent::Started { tier });

    spawn_required(state);
    state.spawn_timer.start(state.session.spawn_interval_ms);
    state.tick_timer.start(state.tuning.tick_ms);

    log::info!(
        "Run started on {} (spawn every {} ms, speed {:.1})",
        tier.as_str(),
        state.session.spawn_interval_ms,
        state.session.fall_speed
    );
    Ok(())
}

/// Stop both timers, sweep the board and enter `GameOver`.
///
/// Returns the final score, or None if no run was active.
pub fn end_run(state: &mut GameState, reason: EndReason) -> Option<u32> {
    if !state.is_running() {
        return None;
    }

    state.phase = GamePhase::GameOver;
    state.spawn_timer.cancel();
    state.tick_timer.cancel();
    for obj in state.pool.drain() {
        state.events.push(GameEvent::Removed {
            id: obj.id,
            cause: Removal::Cleared,
        });
    }

    let score = state.session.score;
    log::info!("Game over ({:?}) with score {}", reason, score);
    state.events.push(GameEvent::GameOver { score, reason });
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_start_places_required_one() {
        let mut state = GameState::new(9, Tuning::default());
        start_run(&mut state, Tier::Hard).expect("idle state starts");

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.session.spawn_interval_ms, 700);
        let required = state.pool.required_instance().expect("first disc");
        assert_eq!(required.value, 1);
        assert_eq!(state.spawn_timer().until_due(), Some(700));
        assert_eq!(state.tick_timer().until_due(), Some(16));
    }

    #[test]
    fn test_double_start_is_rejected() {
        let mut state = GameState::new(9, Tuning::default());
        start_run(&mut state, Tier::Easy).expect("idle state starts");
        assert!(matches!(
            start_run(&mut state, Tier::Hard),
            Err(Error::RunInProgress)
        ));
        assert_eq!(state.session.tier, Tier::Easy);
    }

    #[test]
    fn test_end_run_clears_board_and_timers() {
        let mut state = GameState::new(9, Tuning::default());
        start_run(&mut state, Tier::Easy).expect("idle state starts");
        state.session.score = 3;

        assert_eq!(end_run(&mut state, EndReason::MissedRequired), Some(3));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.pool.is_empty());
        assert!(!state.spawn_timer().is_active());
        assert!(!state.tick_timer().is_active());
        assert!(matches!(
            state.events().last(),
            Some(GameEvent::GameOver { score: 3, .. })
        ));

        // Second stop is a no-op
        assert_eq!(end_run(&mut state, EndReason::MissedRequired), None);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = GameState::new(9, Tuning::default());
        start_run(&mut state, Tier::Easy).expect("idle state starts");
        state.session.score = 4;
        state.session.required_number = 5;
        end_run(&mut state, EndReason::WrongPick);

        start_run(&mut state, Tier::Medium).expect("game over restarts");
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.required_number, 1);
        assert_eq!(state.pool.len(), 1);
    }
}
