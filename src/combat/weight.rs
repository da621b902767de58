//! Combat weight table
//!
//! Weights are relative strengths: the chance that `a` beats `d` is
//! `a / (a + d)`. Land units use the same number attacking and defending.

use serde::{Deserialize, Serialize};

use crate::core::config::ModifierConfig;
use crate::state::ColonyBuilding;
use crate::units::{NativeUnitType, UnitKind};

/// Weight of a dwelling defending itself
pub const DWELLING_WEIGHT: f64 = 1.0;

/// A contextual adjustment applied to a participant's base weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatModifier {
    /// Defender holding fortify orders
    Fortified,
    /// Artillery defending outside a colony
    ArtilleryInTheOpen,
    /// Military defender behind colony walls
    ColonyFortification(ColonyBuilding),
}

impl CombatModifier {
    pub fn multiplier(&self, conf: &ModifierConfig) -> f64 {
        match self {
            CombatModifier::Fortified => conf.fortified,
            CombatModifier::ArtilleryInTheOpen => conf.artillery_in_the_open,
            CombatModifier::ColonyFortification(ColonyBuilding::Stockade) => conf.stockade,
            CombatModifier::ColonyFortification(ColonyBuilding::Fort) => conf.fort,
            CombatModifier::ColonyFortification(ColonyBuilding::Fortress) => conf.fortress,
            CombatModifier::ColonyFortification(ColonyBuilding::Drydock) => 1.0,
        }
    }
}

/// Base land weight of a European unit
pub fn unit_weight(kind: UnitKind) -> f64 {
    match kind {
        UnitKind::Soldier => 2.0,
        UnitKind::Dragoon | UnitKind::VeteranSoldier => 3.0,
        UnitKind::VeteranDragoon | UnitKind::ContinentalArmy => 4.0,
        UnitKind::ContinentalCavalry => 5.0,
        UnitKind::Artillery => 5.0,
        UnitKind::DamagedArtillery => 2.0,
        // Ships fight with their naval weights
        UnitKind::Caravel
        | UnitKind::Merchantman
        | UnitKind::Galleon
        | UnitKind::Privateer
        | UnitKind::Frigate
        | UnitKind::ManOWar => 0.0,
        _ => 1.0,
    }
}

pub fn native_weight(unit_type: NativeUnitType) -> f64 {
    match unit_type {
        NativeUnitType::Brave => 1.0,
        NativeUnitType::ArmedBrave | NativeUnitType::MountedBrave => 2.0,
        NativeUnitType::MountedWarrior => 3.0,
    }
}

/// Base weight times the product of every modifier's multiplier
pub fn modified_weight(base: f64, modifiers: &[CombatModifier], conf: &ModifierConfig) -> f64 {
    modifiers.iter().fold(base, |w, m| w * m.multiplier(conf))
}

/// Chance that a side with weight `a` beats a side with weight `d`
///
/// Two zero weights count as an even fight (0.5). No resolver path asks
/// for that today: the zero-strength raid on a last colony is decided
/// without a draw.
pub fn win_probability(a: f64, d: f64) -> f64 {
    let total = a + d;
    if total <= 0.0 {
        return 0.5;
    }
    a / total
}

// === SHIPS ===

pub fn ship_attack_weight(kind: UnitKind) -> Option<f64> {
    kind.ship_stats().map(|s| s.attack as f64)
}

pub fn ship_combat_weight(kind: UnitKind) -> Option<f64> {
    kind.ship_stats().map(|s| s.combat as f64)
}

/// Evasion strength: movement plus one, doubled for privateers
pub fn ship_evade_weight(kind: UnitKind) -> Option<f64> {
    let stats = kind.ship_stats()?;
    let weight = (stats.movement + 1) as f64;
    Some(if kind == UnitKind::Privateer { weight * 2.0 } else { weight })
}
