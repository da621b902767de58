//! Combat tuning with documented constants
//!
//! Every probability, multiplier and threshold the resolver uses is
//! collected here. Values default to the original game's rules and can be
//! overridden from a TOML file, field by field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{Difficulty, NativeLevel};

/// Configuration for the combat engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === PROMOTION ===
    /// Chance that an eligible combat winner is promoted
    ///
    /// Skipped entirely (no draw) when the unit has no promotion path or
    /// its player holds George Washington.
    pub promotion_probability: f64,

    // === NATIVE EQUIPMENT ===
    /// Chance that a tribe recovers the horses (or muskets) of a destroyed
    /// brave. Each resource carried is drawn separately.
    pub retention_probability: f64,

    /// Horse breeding a tribe must have before it can mount a brave
    pub horse_breeding_to_mount: i32,

    /// Muskets a tribe must have before it can arm a brave
    pub muskets_to_arm: i32,

    /// Horse breeding added back when a tribe recovers a brave's horses
    pub horse_breeding_per_retained_horses: i32,

    /// Ceiling on horse breeding recovered from destroyed braves
    pub horse_breeding_cap: HorseBreedingCapConfig,

    // === MISSIONS ===
    /// Chance that a tribe burns the attacker's missions
    pub burn_missions_probability: f64,

    /// Tribal alarm at or above which missions may be burned
    ///
    /// Below this threshold the burn draw is never taken.
    pub burn_missions_min_alarm: i32,

    /// Conversion chance when a dwelling is beaten with a missionary inside
    pub convert: ConvertConfig,

    // === CONTEXTUAL MODIFIERS ===
    pub modifiers: ModifierConfig,

    // === TREASURE ===
    pub treasure: TreasureConfig,

    // === ALARM ===
    pub alarm: AlarmConfig,
}

/// Conversion probability by missionary type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub jesuit_missionary: f64,
    /// Missionary on a free colonist base (and any expert base)
    pub free_colonist: f64,
    pub indentured_servant: f64,
    pub petty_criminal: f64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            jesuit_missionary: 0.66,
            free_colonist: 0.33,
            indentured_servant: 0.22,
            petty_criminal: 0.11,
        }
    }
}

/// Weight multipliers for contextual modifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierConfig {
    /// Defender with fortify orders
    pub fortified: f64,
    /// Artillery defending outside a colony
    pub artillery_in_the_open: f64,
    pub stockade: f64,
    pub fort: f64,
    pub fortress: f64,
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            fortified: 1.5,
            artillery_in_the_open: 0.25,
            stockade: 2.0,
            fort: 2.5,
            fortress: 3.0,
        }
    }
}

/// Level-dependent part of the horse breeding ceiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorseBreedingBonus {
    pub flat: i32,
    pub per_dwelling: i32,
}

/// Retained horses never lift a tribe's breeding above
/// `base + flat + per_dwelling * dwellings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorseBreedingCapConfig {
    pub base: i32,
    pub semi_nomadic: HorseBreedingBonus,
    pub agrarian: HorseBreedingBonus,
    pub advanced: HorseBreedingBonus,
    pub civilized: HorseBreedingBonus,
}

impl HorseBreedingCapConfig {
    pub fn max_for(&self, level: NativeLevel, dwellings: usize) -> i32 {
        let bonus = match level {
            NativeLevel::SemiNomadic => &self.semi_nomadic,
            NativeLevel::Agrarian => &self.agrarian,
            NativeLevel::Advanced => &self.advanced,
            NativeLevel::Civilized => &self.civilized,
        };
        self.base + bonus.flat + bonus.per_dwelling * dwellings as i32
    }
}

impl Default for HorseBreedingCapConfig {
    fn default() -> Self {
        Self {
            base: 50,
            semi_nomadic: HorseBreedingBonus { flat: 0, per_dwelling: 6 },
            agrarian: HorseBreedingBonus { flat: 4, per_dwelling: 10 },
            advanced: HorseBreedingBonus { flat: 6, per_dwelling: 14 },
            civilized: HorseBreedingBonus { flat: 8, per_dwelling: 18 },
        }
    }
}

/// Treasure yield for one native level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreasureYield {
    /// Chance of any treasure when neither capital nor Cortes applies
    pub probability: f64,
    pub min: i32,
    pub max: i32,
    /// Final amount is rounded down to a multiple of this
    pub multiple: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreasureConfig {
    pub capital_amount_scale: f64,
    pub cortes_amount_scale: f64,
    pub semi_nomadic: TreasureYield,
    pub agrarian: TreasureYield,
    pub advanced: TreasureYield,
    pub civilized: TreasureYield,

    /// King's transport fee is `tax_rate * multiplier`, clamped to the range
    pub king_transport_tax_multiplier: i32,
    pub king_transport_cut_min: i32,
    pub king_transport_cut_max: i32,
}

impl TreasureConfig {
    pub fn yield_for(&self, level: NativeLevel) -> &TreasureYield {
        match level {
            NativeLevel::SemiNomadic => &self.semi_nomadic,
            NativeLevel::Agrarian => &self.agrarian,
            NativeLevel::Advanced => &self.advanced,
            NativeLevel::Civilized => &self.civilized,
        }
    }
}

impl Default for TreasureConfig {
    fn default() -> Self {
        Self {
            capital_amount_scale: 2.0,
            cortes_amount_scale: 1.5,
            semi_nomadic: TreasureYield { probability: 0.25, min: 100, max: 300, multiple: 100 },
            agrarian: TreasureYield { probability: 0.33, min: 300, max: 800, multiple: 100 },
            advanced: TreasureYield { probability: 0.5, min: 2000, max: 5000, multiple: 100 },
            civilized: TreasureYield { probability: 0.66, min: 5000, max: 10000, multiple: 100 },
            king_transport_tax_multiplier: 2,
            king_transport_cut_min: 50,
            king_transport_cut_max: 70,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    /// Positive alarm deltas are scaled by this once Pocahontas joins
    pub increase_scale_after_pocahontas: f64,
    /// Alarm deltas caused at a capital are scaled by this
    pub scale_for_capital: f64,
    pub increase_from_attacking_brave: f64,
    pub increase_from_attacking_dwelling: f64,
    /// Alarm is capped to this when Pocahontas joins
    pub tribal_alarm_after_pocahontas: i32,
    /// Alarm is capped to this after the tribe's capital burns
    pub tribal_alarm_after_burning_capital: i32,
    pub land_grab: LandGrabConfig,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            increase_scale_after_pocahontas: 0.5,
            scale_for_capital: 1.5,
            increase_from_attacking_brave: 15.0,
            increase_from_attacking_dwelling: 30.0,
            tribal_alarm_after_pocahontas: 0,
            tribal_alarm_after_burning_capital: 10,
            land_grab: LandGrabConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandGrabConfig {
    /// Base increase, indexed by difficulty from discoverer to viceroy
    pub tribal_increase: [f64; 5],
    pub prime_resource_scale: f64,
    /// Falloff per ring of distance past the first
    pub distance_factor: f64,
}

impl LandGrabConfig {
    pub fn tribal_increase_for(&self, difficulty: Difficulty) -> f64 {
        let idx = match difficulty {
            Difficulty::Discoverer => 0,
            Difficulty::Explorer => 1,
            Difficulty::Conquistador => 2,
            Difficulty::Governor => 3,
            Difficulty::Viceroy => 4,
        };
        self.tribal_increase[idx]
    }
}

impl Default for LandGrabConfig {
    fn default() -> Self {
        Self {
            tribal_increase: [2.0, 4.0, 6.0, 8.0, 10.0],
            prime_resource_scale: 2.0,
            distance_factor: 0.5,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            promotion_probability: 0.45,
            retention_probability: 0.5,
            horse_breeding_to_mount: 25,
            muskets_to_arm: 1,
            horse_breeding_per_retained_horses: 25,
            horse_breeding_cap: HorseBreedingCapConfig::default(),
            burn_missions_probability: 0.5,
            burn_missions_min_alarm: 85,
            convert: ConvertConfig::default(),
            modifiers: ModifierConfig::default(),
            treasure: TreasureConfig::default(),
            alarm: AlarmConfig::default(),
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        let probabilities = [
            ("promotion_probability", self.promotion_probability),
            ("retention_probability", self.retention_probability),
            ("burn_missions_probability", self.burn_missions_probability),
            ("convert.jesuit_missionary", self.convert.jesuit_missionary),
            ("convert.free_colonist", self.convert.free_colonist),
            ("convert.indentured_servant", self.convert.indentured_servant),
            ("convert.petty_criminal", self.convert.petty_criminal),
            ("treasure.semi_nomadic.probability", self.treasure.semi_nomadic.probability),
            ("treasure.agrarian.probability", self.treasure.agrarian.probability),
            ("treasure.advanced.probability", self.treasure.advanced.probability),
            ("treasure.civilized.probability", self.treasure.civilized.probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} ({}) must be within [0, 1]", name, p));
            }
        }

        for (name, y) in [
            ("semi_nomadic", &self.treasure.semi_nomadic),
            ("agrarian", &self.treasure.agrarian),
            ("advanced", &self.treasure.advanced),
            ("civilized", &self.treasure.civilized),
        ] {
            if y.min > y.max {
                return Err(format!("treasure.{} min ({}) exceeds max ({})", name, y.min, y.max));
            }
            if y.multiple <= 0 {
                return Err(format!("treasure.{} multiple must be positive", name));
            }
        }

        if !(0..=99).contains(&self.burn_missions_min_alarm) {
            return Err(format!(
                "burn_missions_min_alarm ({}) must be within [0, 99]",
                self.burn_missions_min_alarm
            ));
        }

        if self.horse_breeding_to_mount <= 0 || self.muskets_to_arm <= 0 {
            return Err("Equipment costs must be positive".into());
        }

        if self.treasure.king_transport_cut_min > self.treasure.king_transport_cut_max {
            return Err("king_transport_cut_min exceeds king_transport_cut_max".into());
        }

        let m = &self.modifiers;
        if [m.fortified, m.artillery_in_the_open, m.stockade, m.fort, m.fortress]
            .iter()
            .any(|v| *v <= 0.0)
        {
            return Err("Weight modifiers must be positive".into());
        }

        Ok(())
    }

    /// Load a config from a TOML file; missing fields keep their defaults
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigLoadError::IoError(e.to_string()))?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self, ConfigLoadError> {
        let config: CombatConfig =
            toml::from_str(content).map_err(|e| ConfigLoadError::ParseError(e.to_string()))?;
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }
}

/// Error type for config loading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<CombatConfig> = OnceLock::new();

/// Get the global combat config (initializes with defaults if not set)
pub fn config() -> &'static CombatConfig {
    CONFIG.get_or_init(CombatConfig::default)
}

/// Set the global combat config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: CombatConfig) -> Result<(), CombatConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CombatConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CombatConfig::parse_toml(
            r#"
            promotion_probability = 0.5

            [treasure.agrarian]
            probability = 0.4
            min = 200
            max = 600
            multiple = 50
            "#,
        )
        .expect("should parse");

        assert_eq!(config.promotion_probability, 0.5);
        assert_eq!(config.retention_probability, 0.5);
        assert_eq!(config.treasure.agrarian.multiple, 50);
        assert_eq!(config.treasure.civilized.min, 5000);
        assert_eq!(config.convert, ConvertConfig::default());
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let result = CombatConfig::parse_toml("promotion_probability = 1.5");
        assert!(matches!(result, Err(ConfigLoadError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = CombatConfig::parse_toml("promotion_probability = ");
        assert!(matches!(result, Err(ConfigLoadError::ParseError(_))));
    }

    #[test]
    fn test_inverted_treasure_range_rejected() {
        let mut config = CombatConfig::default();
        config.treasure.advanced.min = 9000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_horse_breeding_cap_by_level() {
        let cap = HorseBreedingCapConfig::default();
        assert_eq!(cap.max_for(NativeLevel::SemiNomadic, 0), 50);
        assert_eq!(cap.max_for(NativeLevel::SemiNomadic, 1), 56);
        assert_eq!(cap.max_for(NativeLevel::Agrarian, 2), 74);
        assert_eq!(cap.max_for(NativeLevel::Civilized, 3), 112);
    }

    #[test]
    fn test_land_grab_by_difficulty() {
        let conf = LandGrabConfig::default();
        assert_eq!(conf.tribal_increase_for(Difficulty::Discoverer), 2.0);
        assert_eq!(conf.tribal_increase_for(Difficulty::Viceroy), 10.0);
    }
}
