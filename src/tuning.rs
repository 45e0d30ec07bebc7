//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so it can be overridden
//! from JSON (LocalStorage on web, a file on native). Defaults match `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected tuning values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} range is empty: [{min}, {max})")]
    EmptyRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name} must be a probability in [0, 1], got {value}")]
    BadProbability { name: &'static str, value: f64 },
    #[error("rotation smoothing must be in (0, 1], got {0}")]
    BadSmoothing(f32),
}

/// Game balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Craft ===
    pub craft_width: f32,
    pub craft_height: f32,
    /// Units per tick on each pressed axis (diagonals are not normalized)
    pub craft_speed: f32,
    pub rotation_smoothing: f32,

    // === Asteroids ===
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_min_radius: f32,
    pub asteroid_max_radius: f32,
    pub hitbox_forgiveness: f32,
    pub spawn_margin: f32,
    pub cull_margin: f32,

    // === Spawn policy ===
    pub spawn_chance: f64,
    pub burst_chance: f64,
    pub burst_size: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            craft_width: CRAFT_WIDTH,
            craft_height: CRAFT_HEIGHT,
            craft_speed: CRAFT_SPEED,
            rotation_smoothing: ROTATION_SMOOTHING,

            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_max_radius: ASTEROID_MAX_RADIUS,
            hitbox_forgiveness: HITBOX_FORGIVENESS,
            spawn_margin: SPAWN_MARGIN,
            cull_margin: CULL_MARGIN,

            spawn_chance: SPAWN_CHANCE,
            burst_chance: BURST_CHANCE,
            burst_size: BURST_SIZE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Upper-left clamp bound is the origin; this is the lower-right one
    pub fn craft_max_x(&self) -> f32 {
        FIELD_WIDTH - self.craft_width
    }

    pub fn craft_max_y(&self) -> f32 {
        FIELD_HEIGHT - self.craft_height
    }

    /// Check that every range is non-empty and every probability is valid
    pub fn validate(&self) -> Result<(), TuningError> {
        let positives = [
            ("craft_width", self.craft_width),
            ("craft_height", self.craft_height),
            ("craft_speed", self.craft_speed),
            ("asteroid_min_speed", self.asteroid_min_speed),
            ("asteroid_min_radius", self.asteroid_min_radius),
            ("hitbox_forgiveness", self.hitbox_forgiveness),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { name, value });
            }
        }

        if !(self.asteroid_max_speed > self.asteroid_min_speed) {
            return Err(TuningError::EmptyRange {
                name: "asteroid speed",
                min: self.asteroid_min_speed,
                max: self.asteroid_max_speed,
            });
        }
        if !(self.asteroid_max_radius > self.asteroid_min_radius) {
            return Err(TuningError::EmptyRange {
                name: "asteroid radius",
                min: self.asteroid_min_radius,
                max: self.asteroid_max_radius,
            });
        }

        for (name, value) in [
            ("spawn_chance", self.spawn_chance),
            ("burst_chance", self.burst_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::BadProbability { name, value });
            }
        }

        if !(self.rotation_smoothing > 0.0 && self.rotation_smoothing <= 1.0) {
            return Err(TuningError::BadSmoothing(self.rotation_smoothing));
        }

        Ok(())
    }

    /// Keep this table if it validates, otherwise log why and use defaults
    pub fn validated_or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Ignoring invalid tuning: {}", e);
                Self::default()
            }
        }
    }

    /// Parse and validate, falling back to defaults on any failure
    fn parse_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning.validated_or_default(),
            Err(e) => {
                log::warn!("Ignoring unparsable tuning: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "astro_dodge_tuning";

    /// Environment variable naming a tuning JSON file (native only)
    pub const ENV_VAR: &'static str = "ASTRO_DODGE_TUNING";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded tuning from LocalStorage");
                return Self::parse_or_default(&json);
            }
        }

        Self::default()
    }

    /// Load tuning overrides from the file named by `ASTRO_DODGE_TUNING`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(path) => Self::load_from_path(path),
            Err(_) => Self::default(),
        }
    }

    /// Read a tuning JSON file, falling back to defaults if it is missing or bad
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded tuning from {}", path.display());
                Self::parse_or_default(&json)
            }
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert_eq!(tuning.validate(), Ok(()));
        assert_eq!(tuning.craft_max_x(), 770.0);
        assert_eq!(tuning.craft_max_y(), 570.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_chance": 0.5 }"#).unwrap();
        assert_eq!(tuning.spawn_chance, 0.5);
        assert_eq!(tuning.burst_chance, BURST_CHANCE);
        assert_eq!(tuning.craft_speed, CRAFT_SPEED);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let tuning = Tuning {
            asteroid_max_radius: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::EmptyRange { .. })
        ));

        let tuning = Tuning {
            burst_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::BadProbability { name: "burst_chance", .. })
        ));

        let tuning = Tuning {
            craft_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotPositive { name: "craft_speed", .. })
        ));
    }

    #[test]
    fn test_parse_or_default_falls_back() {
        assert_eq!(Tuning::parse_or_default("not json"), Tuning::default());
        assert_eq!(
            Tuning::parse_or_default(r#"{ "rotation_smoothing": 2.0 }"#),
            Tuning::default()
        );
    }

    #[test]
    fn test_validated_or_default() {
        let custom = Tuning {
            spawn_chance: 0.2,
            ..Default::default()
        };
        assert_eq!(custom.clone().validated_or_default(), custom);

        let broken = Tuning {
            spawn_chance: 1.5,
            ..Default::default()
        };
        assert_eq!(broken.validated_or_default(), Tuning::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod native_load {
        use super::*;
        use std::path::PathBuf;

        fn scratch_file(name: &str, contents: &str) -> PathBuf {
            let path = std::env::temp_dir().join(format!(
                "astro_dodge_{}_{}.json",
                name,
                std::process::id()
            ));
            std::fs::write(&path, contents).unwrap();
            path
        }

        #[test]
        fn test_load_from_file() {
            let path = scratch_file("ok", r#"{ "craft_speed": 7.5, "burst_size": 5 }"#);
            let tuning = Tuning::load_from_path(&path);
            std::fs::remove_file(&path).unwrap();

            assert_eq!(tuning.craft_speed, 7.5);
            assert_eq!(tuning.burst_size, 5);
            assert_eq!(tuning.spawn_chance, SPAWN_CHANCE);
        }

        #[test]
        fn test_load_falls_back_on_bad_file() {
            let garbage = scratch_file("garbage", "{ craft_speed: ");
            let invalid = scratch_file("invalid", r#"{ "burst_chance": -0.1 }"#);
            assert_eq!(Tuning::load_from_path(&garbage), Tuning::default());
            assert_eq!(Tuning::load_from_path(&invalid), Tuning::default());
            std::fs::remove_file(&garbage).unwrap();
            std::fs::remove_file(&invalid).unwrap();

            let missing = std::env::temp_dir().join("astro_dodge_missing_tuning.json");
            assert_eq!(Tuning::load_from_path(&missing), Tuning::default());
        }

        #[test]
        fn test_load_reads_env_var() {
            let path = scratch_file("env", r#"{ "asteroid_max_speed": 9.0 }"#);
            // Only this test touches the variable
            unsafe { std::env::set_var(Tuning::ENV_VAR, &path) };
            let tuning = Tuning::load();
            unsafe { std::env::remove_var(Tuning::ENV_VAR) };
            std::fs::remove_file(&path).unwrap();

            assert_eq!(tuning.asteroid_max_speed, 9.0);
            assert_eq!(Tuning::load(), Tuning::default());
        }
    }
}
