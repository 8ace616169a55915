//! Game state and core simulation types
//!
//! Everything a run mutates lives in `GameState`; the free functions in the
//! sibling modules take it by `&mut` so there is no global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::ObjectPool;
use super::timer::PeriodicTask;
use crate::consts::{DEFAULT_AREA_HEIGHT, DEFAULT_AREA_WIDTH};
use crate::tuning::{Tier, Tuning};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting on the difficulty screen
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; terminal until the next start
    GameOver,
}

/// Opaque identity of a falling disc, handed to the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// A numbered disc on its way down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: ObjectId,
    pub value: u32,
    /// Top-left corner in play-area pixels
    pub pos: Vec2,
    /// The guaranteed copy of the required number; missing it ends the run
    pub required: bool,
}

/// Per-run counters and the current difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub tier: Tier,
    pub required_number: u32,
    pub score: u32,
    /// Pixels per tick
    pub fall_speed: f32,
    pub spawn_interval_ms: u32,
}

impl Session {
    pub fn new(tier: Tier, tuning: &Tuning) -> Self {
        let params = tuning.tier(tier);
        Self {
            tier,
            required_number: 1,
            score: 0,
            fall_speed: params.fall_speed,
            spawn_interval_ms: params.spawn_interval_ms,
        }
    }
}

/// Why a disc left the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Clicked with the right number
    Matched,
    /// Duplicate of a freshly advanced required number
    Purged,
    /// Crossed the bottom edge
    FellOff,
    /// Swept away when the run ended
    Cleared,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The required instance crossed the bottom edge
    MissedRequired,
    /// Wrong disc clicked under `WrongPickPolicy::EndRun`
    WrongPick,
}

/// Things the presentation layer needs to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started { tier: Tier },
    Spawned { id: ObjectId, value: u32, pos: Vec2, required: bool },
    Removed { id: ObjectId, cause: Removal },
    Rejected { id: ObjectId },
    Advanced { required_number: u32, score: u32 },
    Escalated { fall_speed: f32, spawn_interval_ms: u32 },
    GameOver { score: u32, reason: EndReason },
}

/// Complete simulation state for one player
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub session: Session,
    pub pool: ObjectPool,
    /// Play-area size in pixels, refreshed by the host before each step
    pub area: Vec2,
    /// Milliseconds simulated in the current run
    pub clock_ms: u64,
    pub(crate) spawn_timer: PeriodicTask,
    pub(crate) tick_timer: PeriodicTask,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let session = Session::new(Tier::default(), &tuning);
        Self {
            seed,
            tuning,
            phase: GamePhase::Idle,
            session,
            pool: ObjectPool::default(),
            area: Vec2::new(DEFAULT_AREA_WIDTH, DEFAULT_AREA_HEIGHT),
            clock_ms: 0,
            spawn_timer: PeriodicTask::default(),
            tick_timer: PeriodicTask::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn set_area(&mut self, area: Vec2) {
        self.area = area;
    }

    pub fn spawn_timer(&self) -> &PeriodicTask {
        &self.spawn_timer
    }

    pub fn tick_timer(&self) -> &PeriodicTask {
        &self.tick_timer
    }

    /// Pending events
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take pending events for presentation
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
