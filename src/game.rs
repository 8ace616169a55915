//! Run controller: the simulation wired to a surface and a score store
//!
//! Hosts call `start`, `advance` and `select`; after each call the pending
//! simulation events are replayed onto the surface and the leaderboard.

use std::collections::HashMap;

use crate::error::Result;
use crate::highscores::HighScores;
use crate::persistence::Storage;
use crate::platform::RenderSurface;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState, ObjectId, Selection, Session};
use crate::tuning::{Tier, Tuning};

/// Outcome of the last finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    /// Leaderboard position, if the score made it
    pub rank: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Flash {
    id: ObjectId,
    remaining_ms: u32,
}

pub struct Game<S: RenderSurface, K: Storage> {
    state: GameState,
    surface: S,
    storage: K,
    high_scores: HighScores,
    settings: Settings,
    visuals: HashMap<ObjectId, S::Handle>,
    flashes: Vec<Flash>,
    last_run: Option<RunSummary>,
}

impl<S: RenderSurface, K: Storage> Game<S, K> {
    pub fn new(surface: S, storage: K, tuning: Tuning, seed: u64) -> Self {
        let high_scores = HighScores::load(&storage);
        let settings = Settings::load(&storage);
        let mut state = GameState::new(seed, tuning);
        state.set_area(surface.measure_area());
        Self {
            state,
            surface,
            storage,
            high_scores,
            settings,
            visuals: HashMap::new(),
            flashes: Vec::new(),
            last_run: None,
        }
    }

    /// Begin a run. Fails if one is already going.
    pub fn start(&mut self, tier: Tier) -> Result<()> {
        self.state.set_area(self.surface.measure_area());
        sim::start_run(&mut self.state, tier)?;
        self.last_run = None;

        if self.settings.difficulty != tier {
            self.settings.difficulty = tier;
            if let Err(e) = self.settings.save(&mut self.storage) {
                log::warn!("Failed to save settings: {}", e);
            }
        }

        self.present();
        Ok(())
    }

    /// Let `dt_ms` of game time pass
    pub fn advance(&mut self, dt_ms: u32) {
        if self.state.is_running() {
            self.state.set_area(self.surface.measure_area());
            sim::advance(&mut self.state, dt_ms);
            self.present();
        }
        self.update_flashes(dt_ms);
    }

    /// Pointer-down on a disc
    pub fn select(&mut self, id: ObjectId) -> Selection {
        let selection = sim::select(&mut self.state, id);
        self.present();
        selection
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_reduced_motion(&mut self, on: bool) {
        self.settings.reduced_motion = on;
        if let Err(e) = self.settings.save(&mut self.storage) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// Replay simulation events onto the surface, then sync positions
    fn present(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Spawned { id, value, pos, .. } => {
                    let handle = self.surface.create_visual(id, value, pos);
                    self.visuals.insert(id, handle);
                }
                GameEvent::Removed { id, .. } => {
                    if let Some(handle) = self.visuals.remove(&id) {
                        self.surface.destroy_visual(handle);
                    }
                }
                GameEvent::Rejected { id } => self.flash(id),
                GameEvent::GameOver { score, .. } => self.finish_run(score),
                GameEvent::Started { .. }
                | GameEvent::Advanced { .. }
                | GameEvent::Escalated { .. } => {}
            }
        }

        for obj in self.state.pool.iter() {
            if let Some(handle) = self.visuals.get(&obj.id) {
                self.surface.move_visual(handle, obj.pos);
            }
        }
    }

    fn flash(&mut self, id: ObjectId) {
        if !self.settings.effective_flash() {
            return;
        }
        let Some(handle) = self.visuals.get(&id) else {
            return;
        };
        self.surface.set_flash(handle, true);
        self.flashes.retain(|f| f.id != id);
        self.flashes.push(Flash {
            id,
            remaining_ms: self.state.tuning.flash_ms,
        });
    }

    fn update_flashes(&mut self, dt_ms: u32) {
        let visuals = &self.visuals;
        let surface = &mut self.surface;
        self.flashes.retain_mut(|flash| {
            flash.remaining_ms = flash.remaining_ms.saturating_sub(dt_ms);
            if flash.remaining_ms > 0 {
                return true;
            }
            // Disc may already be gone
            if let Some(handle) = visuals.get(&flash.id) {
                surface.set_flash(handle, false);
            }
            false
        });
    }

    fn finish_run(&mut self, score: u32) {
        // Sweep anything the simulation didn't report
        for (_, handle) in self.visuals.drain() {
            self.surface.destroy_visual(handle);
        }
        self.flashes.clear();

        let rank = if self.high_scores.qualifies(score) {
            let rank = self.high_scores.record_score(score);
            if let Err(e) = self.high_scores.save(&mut self.storage) {
                log::warn!("Failed to save high scores: {}", e);
            }
            rank
        } else {
            None
        };
        if let Some(rank) = rank {
            log::info!("New high score {} at rank {}", score, rank);
        }
        self.last_run = Some(RunSummary { score, rank });
    }
}
