//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a build can ship
//! different balance by overlaying JSON on the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Named difficulty preset chosen on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Tier::Easy),
            "medium" | "med" => Some(Tier::Medium),
            "hard" => Some(Tier::Hard),
            _ => None,
        }
    }
}

/// Starting parameters for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    pub spawn_interval_ms: u32,
    /// Pixels per tick
    pub fall_speed: f32,
}

/// What happens when the player clicks a disc with the wrong number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WrongPickPolicy {
    /// Flash the disc and leave it falling; the run continues
    #[default]
    Flash,
    /// The run ends on the spot
    EndRun,
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub easy: TierParams,
    pub medium: TierParams,
    pub hard: TierParams,

    // === Spawning ===
    /// Chance that a scheduled spawn carries the required number
    pub decoy_match_chance: f64,
    /// Decoys draw from 1..=required + spread
    pub decoy_spread: u32,
    /// Placement retries before accepting an overlapping spot
    pub placement_attempts: u32,
    /// Disc diameter in pixels
    pub object_size: f32,
    /// Spawn height (negative = above the play area)
    pub spawn_y: f32,

    // === Difficulty ===
    /// Escalate every this many points
    pub milestone: u32,
    pub speed_step: f32,
    pub interval_step_ms: u32,
    pub min_spawn_interval_ms: u32,

    // === Timing ===
    pub tick_ms: u32,
    pub flash_ms: u32,

    // === Rules ===
    pub wrong_pick: WrongPickPolicy,
    /// Clear board copies of the new required number after each match
    pub purge_on_advance: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            easy: TierParams {
                spawn_interval_ms: 1500,
                fall_speed: 1.5,
            },
            medium: TierParams {
                spawn_interval_ms: 1000,
                fall_speed: 2.0,
            },
            hard: TierParams {
                spawn_interval_ms: 700,
                fall_speed: 2.5,
            },

            decoy_match_chance: 0.4,
            decoy_spread: 10,
            placement_attempts: 20,
            object_size: OBJECT_SIZE,
            spawn_y: SPAWN_Y,

            milestone: 5,
            speed_step: 0.5,
            interval_step_ms: 200,
            min_spawn_interval_ms: 500,

            tick_ms: TICK_MS,
            flash_ms: FLASH_MS,

            wrong_pick: WrongPickPolicy::Flash,
            purge_on_advance: true,
        }
    }
}

impl Tuning {
    /// Overlay a (possibly partial) JSON document on the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn tier(&self, tier: Tier) -> TierParams {
        match tier {
            Tier::Easy => self.easy,
            Tier::Medium => self.medium,
            Tier::Hard => self.hard,
        }
    }

    /// Clamp values that would stall the timers or the RNG
    fn sanitized(mut self) -> Self {
        self.decoy_match_chance = self.decoy_match_chance.clamp(0.0, 1.0);
        self.placement_attempts = self.placement_attempts.max(1);
        self.milestone = self.milestone.max(1);
        self.tick_ms = self.tick_ms.max(1);
        self.min_spawn_interval_ms = self.min_spawn_interval_ms.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_table() {
        let tuning = Tuning::default();
        assert_eq!(tuning.tier(Tier::Easy).spawn_interval_ms, 1500);
        assert_eq!(tuning.tier(Tier::Medium).spawn_interval_ms, 1000);
        assert_eq!(tuning.tier(Tier::Hard).spawn_interval_ms, 700);
        assert!((tuning.tier(Tier::Hard).fall_speed - 2.5).abs() < 0.0001);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!(Tier::from_str("Medium"), Some(Tier::Medium));
        assert_eq!(Tier::from_str(" hard "), Some(Tier::Hard));
        assert_eq!(Tier::from_str("nightmare"), None);
        for tier in Tier::ALL {
            assert_eq!(Tier::from_str(tier.as_str()), Some(tier));
        }
    }

    #[test]
    fn test_partial_json_overlays_defaults() {
        let tuning = Tuning::from_json(r#"{ "wrong_pick": "end_run", "milestone": 0 }"#)
            .expect("valid json");
        assert_eq!(tuning.wrong_pick, WrongPickPolicy::EndRun);
        // Zero would divide by zero in the milestone check
        assert_eq!(tuning.milestone, 1);
        assert_eq!(tuning.decoy_spread, 10);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }
}
