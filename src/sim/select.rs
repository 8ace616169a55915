//! Player selection of a disc
//!
//! The only input the simulation takes. Selections that arrive after a disc
//! has gone (or after the run has ended) are dropped.

use super::difficulty::escalate;
use super::run::end_run;
use super::spawn::spawn_required;
use super::state::{EndReason, GameEvent, GameState, ObjectId, Removal};
use crate::tuning::WrongPickPolicy;

/// Result of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Stale id or no active run
    Ignored,
    /// Right number; the game moved on to the next
    Matched,
    /// Wrong number, flashed and left falling
    Rejected,
    /// Wrong number and the policy ends the run
    GameOver,
}

pub fn select(state: &mut GameState, id: ObjectId) -> Selection {
    if !state.is_running() {
        return Selection::Ignored;
    }
    let Some(value) = state.pool.get(id).map(|o| o.value) else {
        log::debug!("Ignoring selection of gone disc {:?}", id);
        return Selection::Ignored;
    };

    if value != state.session.required_number {
        return match state.tuning.wrong_pick {
            WrongPickPolicy::Flash => {
                log::debug!("Wrong pick {} (want {})", value, state.session.required_number);
                state.events.push(GameEvent::Rejected { id });
                Selection::Rejected
            }
            WrongPickPolicy::EndRun => {
                end_run(state, EndReason::WrongPick);
                Selection::GameOver
            }
        };
    }

    state.pool.remove(id);
    state.events.push(GameEvent::Removed {
        id,
        cause: Removal::Matched,
    });

    let session = &mut state.session;
    session.score += 1;
    session.required_number += 1;
    log::debug!("Matched {}, next {}", value, session.required_number);
    state.events.push(GameEvent::Advanced {
        required_number: session.required_number,
        score: session.score,
    });

    escalate(state);

    if state.tuning.purge_on_advance {
        for id in state.pool.remove_value(state.session.required_number) {
            state.events.push(GameEvent::Removed {
                id,
                cause: Removal::Purged,
            });
        }
    }

    spawn_required(state);
    Selection::Matched
}
