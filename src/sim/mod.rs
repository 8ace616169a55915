//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time arrives only as elapsed milliseconds from the host
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod difficulty;
pub mod placement;
pub mod pool;
pub mod run;
pub mod select;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use autopilot::Autopilot;
pub use difficulty::escalate;
pub use placement::choose_placement;
pub use pool::ObjectPool;
pub use run::{end_run, start_run};
pub use select::{Selection, select};
pub use spawn::{pick_decoy_value, spawn_decoy, spawn_required};
pub use state::{
    EndReason, FallingObject, GameEvent, GamePhase, GameState, ObjectId, Removal, Session,
};
pub use tick::{advance, fall_tick};
pub use timer::PeriodicTask;
