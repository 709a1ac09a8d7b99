//! Data-driven game balance
//!
//! Every field has a default so a tuning file only needs the values it
//! overrides. Loaded from JSON (LocalStorage override on web, a file path on
//! native).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::storage::Storage;

/// Errors from loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tuning value `{name}` is out of range: {value}")]
    OutOfRange { name: &'static str, value: f32 },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Speed per axis while an arrow key is held (px/s)
    pub player_speed: f32,

    // === Skeletons ===
    pub static_count: u32,
    pub wanderer_count: u32,
    pub chaser_count: u32,
    /// Initial downward speed of static skeletons
    pub static_fall_speed: f32,
    /// Wanderer velocity components are drawn from [-max, max]
    pub wander_max_speed: f32,
    /// Chaser speed at score 0
    pub chase_base_speed: f32,
    /// Extra chaser speed per score point
    pub chase_speed_per_point: f32,
    /// Skeletons never spawn above this y (keeps the HUD clear)
    pub spawn_top_margin: f32,

    // === Timers ===
    pub score_interval_ms: u32,
    pub power_up_interval_ms: u32,

    // === Power-ups ===
    pub power_up_bonus: u64,
    pub power_up_max_speed: f32,
    pub max_power_ups: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 200.0,

            static_count: 5,
            wanderer_count: 5,
            chaser_count: 5,
            static_fall_speed: 100.0,
            wander_max_speed: 100.0,
            chase_base_speed: 100.0,
            chase_speed_per_point: 2.0,
            spawn_top_margin: 100.0,

            score_interval_ms: 1000,
            power_up_interval_ms: 5000,

            power_up_bonus: 10,
            power_up_max_speed: 100.0,
            max_power_ups: 16,
        }
    }
}

impl Tuning {
    /// Upper bound for every per-kind entity count
    pub const MAX_ENTITY_COUNT: usize = 500;

    /// LocalStorage key for a developer override
    pub const STORAGE_KEY: &'static str = "dodge_football_tuning";

    /// Parse and validate tuning JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Developer override from storage, or defaults
    ///
    /// The override is stored as plain JSON (no envelope) so it can be pasted
    /// in from the browser console. Invalid overrides are logged and ignored.
    pub fn load(storage: &dyn Storage) -> Self {
        let Some(json) = storage.get_item(Self::STORAGE_KEY) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using tuning override from storage");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let speeds = [
            ("player_speed", self.player_speed),
            ("static_fall_speed", self.static_fall_speed),
            ("wander_max_speed", self.wander_max_speed),
            ("chase_base_speed", self.chase_base_speed),
            ("chase_speed_per_point", self.chase_speed_per_point),
            ("spawn_top_margin", self.spawn_top_margin),
            ("power_up_max_speed", self.power_up_max_speed),
        ];
        for (name, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::OutOfRange { name, value });
            }
        }
        let counts = [
            ("static_count", self.static_count as usize),
            ("wanderer_count", self.wanderer_count as usize),
            ("chaser_count", self.chaser_count as usize),
            ("max_power_ups", self.max_power_ups),
        ];
        for (name, count) in counts {
            if count > Self::MAX_ENTITY_COUNT {
                return Err(TuningError::OutOfRange {
                    name,
                    value: count as f32,
                });
            }
        }
        if self.score_interval_ms == 0 {
            return Err(TuningError::OutOfRange {
                name: "score_interval_ms",
                value: 0.0,
            });
        }
        if self.power_up_interval_ms == 0 {
            return Err(TuningError::OutOfRange {
                name: "power_up_interval_ms",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Chaser speed at the given score
    pub fn chase_speed(&self, score: u64) -> f32 {
        self.chase_base_speed + score as f32 * self.chase_speed_per_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStorage;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "chaser_count": 8, "power_up_bonus": 25 }"#).unwrap();
        assert_eq!(tuning.chaser_count, 8);
        assert_eq!(tuning.power_up_bonus, 25);
        assert_eq!(tuning.static_count, 5);
        assert_eq!(tuning.player_speed, 200.0);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Tuning::from_json(r#"{ "score_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                name: "score_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let err = Tuning::from_json(r#"{ "player_speed": -5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { name: "player_speed", .. }));
    }

    #[test]
    fn test_rejects_huge_counts() {
        let err = Tuning::from_json(r#"{ "chaser_count": 4000000000 }"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { name: "chaser_count", .. }));

        let err = Tuning::from_json(r#"{ "max_power_ups": 100000 }"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { name: "max_power_ups", .. }));

        let at_cap = format!(r#"{{ "static_count": {} }}"#, Tuning::MAX_ENTITY_COUNT);
        assert!(Tuning::from_json(&at_cap).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_load_override_from_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(Tuning::load(&storage), Tuning::default());

        storage.set_item(Tuning::STORAGE_KEY, r#"{ "wanderer_count": 2 }"#).unwrap();
        assert_eq!(Tuning::load(&storage).wanderer_count, 2);

        storage.set_item(Tuning::STORAGE_KEY, r#"{ "player_speed": "fast" }"#).unwrap();
        assert_eq!(Tuning::load(&storage), Tuning::default());
    }

    #[test]
    fn test_chase_speed_ramps_with_score() {
        let tuning = Tuning::default();
        assert_eq!(tuning.chase_speed(0), 100.0);
        assert_eq!(tuning.chase_speed(30), 160.0);
    }
}
