//! Number Rain - catch the falling numbers in order
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, matching, difficulty)
//! - `game`: Run controller tying the simulation to a surface and scores
//! - `platform`: DOM / headless rendering surfaces
//! - `persistence`: Key/value storage for scores and settings
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use game::{Game, RunSummary};
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Tier, Tuning, WrongPickPolicy};

/// Game configuration constants
pub mod consts {
    /// Fall step period (~60 Hz)
    pub const TICK_MS: u32 = 16;
    /// Longest frame the host will simulate in one go
    pub const MAX_FRAME_MS: u32 = 100;

    /// Disc diameter (px)
    pub const OBJECT_SIZE: f32 = 50.0;
    /// Discs start one diameter above the visible area
    pub const SPAWN_Y: f32 = -OBJECT_SIZE;

    /// Wrong-pick highlight duration
    pub const FLASH_MS: u32 = 200;

    /// Play area used until the surface reports its real size
    pub const DEFAULT_AREA_WIDTH: f32 = 400.0;
    pub const DEFAULT_AREA_HEIGHT: f32 = 600.0;
}

/// Clamp a frame delta (ms, as reported by the browser) to a simulatable step.
///
/// The sim runs on whole milliseconds; the fraction left over is kept in
/// `carry_ms` and added to the next frame so game time tracks wall time.
#[inline]
pub fn frame_step_ms(dt_ms: f64, carry_ms: &mut f64) -> u32 {
    if !(dt_ms.is_finite() && dt_ms > 0.0) {
        return 0;
    }
    let total = dt_ms.min(consts::MAX_FRAME_MS as f64) + *carry_ms;
    let step = total.floor();
    *carry_ms = total - step;
    step as u32
}
