//! Idle/demo mode - a simple AI plays the game
//!
//! Watches for a visible disc with the required number and clicks it after a
//! fixed reaction delay. Falls faster than it can react eventually, so demo
//! runs end on their own.

use super::state::{GameState, ObjectId};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ticks a target must be visible before it is clicked
    reaction_ticks: u32,
    tracking: Option<(ObjectId, u32)>,
}

impl Autopilot {
    pub fn new(reaction_ticks: u32) -> Self {
        Self {
            reaction_ticks,
            tracking: None,
        }
    }

    /// Call once per tick; returns a disc to click when ready
    pub fn observe(&mut self, state: &GameState) -> Option<ObjectId> {
        if !state.is_running() {
            self.tracking = None;
            return None;
        }

        // Lowest visible copy of the required number is the most urgent
        let target = state
            .pool
            .iter()
            .filter(|o| o.value == state.session.required_number && o.pos.y >= 0.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|o| o.id)?;

        let seen = match self.tracking {
            Some((id, ticks)) if id == target => ticks + 1,
            _ => 1,
        };
        if seen >= self.reaction_ticks {
            self.tracking = None;
            Some(target)
        } else {
            self.tracking = Some((target, seen));
            None
        }
    }
}
