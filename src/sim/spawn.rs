//! Disc spawning
//!
//! The spawn timer only ever emits decoys. The required instance is placed
//! by run start and by each successful match.

use glam::Vec2;
use rand::Rng;

use super::placement::choose_placement;
use super::state::{GameEvent, GameState, ObjectId};
use crate::tuning::Tuning;

/// Value for a scheduled spawn: often the required number, otherwise noise
/// from a band a little above it
pub fn pick_decoy_value<R: Rng + ?Sized>(rng: &mut R, required_number: u32, tuning: &Tuning) -> u32 {
    if rng.random_bool(tuning.decoy_match_chance) {
        required_number
    } else {
        rng.random_range(1..=required_number.saturating_add(tuning.decoy_spread))
    }
}

/// Spawn-timer callback. Decoys are never flagged required, even when their
/// value matches.
pub fn spawn_decoy(state: &mut GameState) -> Option<ObjectId> {
    if !state.is_running() {
        return None;
    }
    let value = pick_decoy_value(&mut state.rng, state.session.required_number, &state.tuning);
    Some(place(state, value, false))
}

/// Place the one guaranteed copy of the current required number
pub fn spawn_required(state: &mut GameState) -> ObjectId {
    let demoted = state.pool.demote_required();
    if demoted > 0 {
        log::debug!("Demoted {} stale required disc(s)", demoted);
    }
    let value = state.session.required_number;
    place(state, value, true)
}

fn place(state: &mut GameState, value: u32, required: bool) -> ObjectId {
    let x = choose_placement(
        state.pool.objects(),
        state.area.x,
        state.tuning.object_size,
        state.tuning.placement_attempts,
        &mut state.rng,
    );
    let pos = Vec2::new(x, state.tuning.spawn_y);
    let id = state.pool.insert(value, pos, required);
    log::debug!("Spawned {} at x={} (required: {})", value, x, required);
    state.events.push(GameEvent::Spawned {
        id,
        value,
        pos,
        required,
    });
    id
}
