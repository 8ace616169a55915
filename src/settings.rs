//! Player preferences
//!
//! Persisted separately from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::{Storage, load_json, save_json};
use crate::tuning::Tier;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Last tier picked, highlighted on the difficulty screen
    pub difficulty: Tier,

    // === Accessibility ===
    /// Reduced motion (no wrong-pick flash)
    pub reduced_motion: bool,
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "number_rain_settings";

    /// Whether wrong picks should flash
    pub fn effective_flash(&self) -> bool {
        !self.reduced_motion
    }

    pub fn load(storage: &impl Storage) -> Self {
        match load_json(storage, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut impl Storage) -> Result<()> {
        save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
