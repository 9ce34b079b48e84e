use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::PrefsResult, store::KeyValueStore};

/// Playback rates the player accepts.
pub const RATE_RANGE: RangeInclusive<f64> = 0.25..=4.0;

const DEFAULT_KEY: &str = "kinema.player.preferences";

/// Preferences persisted between sessions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerPreferences {
    pub volume: f64,
    pub playback_rate: f64,
}

impl Default for PlayerPreferences {
    fn default() -> Self {
        Self {
            volume: 1.0,
            playback_rate: 1.0,
        }
    }
}

impl PlayerPreferences {
    /// Clamp stored values into range; non-finite values fall back to defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            volume: sanitize(self.volume, 0.0..=1.0, defaults.volume),
            playback_rate: sanitize(self.playback_rate, RATE_RANGE, defaults.playback_rate),
        }
    }
}

fn sanitize(value: f64, range: RangeInclusive<f64>, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}

/// Reads preferences once and writes them back on change.
#[derive(Debug)]
pub struct PreferenceStore<K: KeyValueStore> {
    store: K,
    key: String,
    current: PlayerPreferences,
}

impl<K: KeyValueStore> PreferenceStore<K> {
    pub fn new(store: K) -> Self {
        Self::with_key(store, DEFAULT_KEY)
    }

    pub fn with_key(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            current: PlayerPreferences::default(),
        }
    }

    /// Read stored preferences. Missing or malformed data yields defaults.
    pub fn load(&mut self) -> PlayerPreferences {
        let loaded = match self.store.get(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<PlayerPreferences>(&raw) {
                Ok(prefs) => prefs.sanitized(),
                Err(err) => {
                    debug!(key = %self.key, %err, "malformed preferences, using defaults");
                    PlayerPreferences::default()
                }
            },
            Ok(None) => PlayerPreferences::default(),
            Err(err) => {
                debug!(key = %self.key, %err, "preferences unavailable, using defaults");
                PlayerPreferences::default()
            }
        };
        self.current = loaded;
        loaded
    }

    #[must_use]
    pub fn current(&self) -> PlayerPreferences {
        self.current
    }

    /// Persist a volume in `[0, 1]`. Returns the stored value.
    pub fn set_volume(&mut self, volume: f64) -> PrefsResult<f64> {
        self.current.volume = sanitize(volume, 0.0..=1.0, self.current.volume);
        self.persist()?;
        Ok(self.current.volume)
    }

    /// Persist a playback rate. Returns the stored value.
    pub fn set_rate(&mut self, rate: f64) -> PrefsResult<f64> {
        self.current.playback_rate = sanitize(rate, RATE_RANGE, self.current.playback_rate);
        self.persist()?;
        Ok(self.current.playback_rate)
    }

    #[must_use]
    pub fn store(&self) -> &K {
        &self.store
    }

    fn persist(&self) -> PrefsResult<()> {
        let raw = serde_json::to_string(&self.current)?;
        self.store.set(&self.key, &raw)
    }
}
