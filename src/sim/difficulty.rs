//! Milestone difficulty escalation

use super::state::{GameEvent, GameState};

/// Called after every match. On each milestone the discs fall faster and
/// spawn more often; the spawn timer restarts with the shorter period.
pub fn escalate(state: &mut GameState) -> bool {
    let milestone = state.tuning.milestone.max(1);
    let score = state.session.score;
    if score == 0 || score % milestone != 0 {
        return false;
    }

    let session = &mut state.session;
    session.fall_speed += state.tuning.speed_step;
    session.spawn_interval_ms = session
        .spawn_interval_ms
        .saturating_sub(state.tuning.interval_step_ms)
        .max(state.tuning.min_spawn_interval_ms);

    state.spawn_timer.reschedule(session.spawn_interval_ms);

    log::info!(
        "Difficulty up at score {}: speed {:.1}, spawn every {} ms",
        score,
        session.fall_speed,
        session.spawn_interval_ms
    );
    state.events.push(GameEvent::Escalated {
        fall_speed: session.fall_speed,
        spawn_interval_ms: session.spawn_interval_ms,
    });
    true
}
