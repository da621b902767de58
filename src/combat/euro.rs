//! Outcome tables for European land units

use tracing::debug;

use crate::combat::outcome::EuroUnitCombatOutcome;
use crate::combat::rand::{clamp_probability, RandomSource};
use crate::core::config::CombatConfig;
use crate::core::types::{Coord, FoundingFather, Nation};
use crate::state::Player;
use crate::units::{
    on_capture_demoted_type, on_death_demoted_type, promoted_by_combat, UnitDeathAction, UnitType,
};

/// Outcome for a European unit that won a fight
///
/// Takes at most one draw: none when the unit has no promotion path or
/// its player has George Washington.
pub fn promotion_outcome(
    rand: &mut dyn RandomSource,
    conf: &CombatConfig,
    unit_type: UnitType,
    player: &Player,
) -> EuroUnitCombatOutcome {
    let Some(to) = promoted_by_combat(unit_type, player.independence_declared()) else {
        return EuroUnitCombatOutcome::NoChange;
    };
    if player.has_father(FoundingFather::GeorgeWashington) {
        debug!(from = %unit_type, %to, "promotion guaranteed by George Washington");
        return EuroUnitCombatOutcome::Promoted { to };
    }
    let promoted = rand.bernoulli(clamp_probability(conf.promotion_probability));
    debug!(from = %unit_type, %to, promoted, "promotion roll");
    if promoted {
        EuroUnitCombatOutcome::Promoted { to }
    } else {
        EuroUnitCombatOutcome::NoChange
    }
}

/// Outcome for a European unit beaten by another European unit
///
/// `winner_nation` and `winner_coord` describe where a captured unit goes.
/// Only defenders can be captured; an attacker that would be is destroyed.
pub fn loss_outcome_vs_euro(
    unit_type: UnitType,
    capturable: bool,
    winner_nation: Nation,
    winner_coord: Coord,
) -> EuroUnitCombatOutcome {
    match unit_type.kind().death_action() {
        UnitDeathAction::Demote => demoted_or_destroyed(unit_type),
        UnitDeathAction::Capture if capturable => EuroUnitCombatOutcome::Captured {
            new_nation: winner_nation,
            new_coord: winner_coord,
        },
        UnitDeathAction::CaptureAndDemote if capturable => match on_capture_demoted_type(unit_type) {
            Some(to) => EuroUnitCombatOutcome::CapturedAndDemoted {
                to,
                new_nation: winner_nation,
                new_coord: winner_coord,
            },
            None => EuroUnitCombatOutcome::Captured {
                new_nation: winner_nation,
                new_coord: winner_coord,
            },
        },
        _ => EuroUnitCombatOutcome::Destroyed,
    }
}

/// Outcome for a European unit beaten by natives, who never capture
pub fn loss_outcome_vs_natives(unit_type: UnitType) -> EuroUnitCombatOutcome {
    demoted_or_destroyed(unit_type)
}

fn demoted_or_destroyed(unit_type: UnitType) -> EuroUnitCombatOutcome {
    match on_death_demoted_type(unit_type) {
        Some(to) => EuroUnitCombatOutcome::Demoted { to },
        None => EuroUnitCombatOutcome::Destroyed,
    }
}

/// The type a unit has after an outcome; `None` when it no longer exists
pub fn type_after(unit_type: UnitType, outcome: &EuroUnitCombatOutcome) -> Option<UnitType> {
    match outcome {
        EuroUnitCombatOutcome::NoChange | EuroUnitCombatOutcome::Captured { .. } => Some(unit_type),
        EuroUnitCombatOutcome::Promoted { to }
        | EuroUnitCombatOutcome::Demoted { to }
        | EuroUnitCombatOutcome::CapturedAndDemoted { to, .. } => Some(*to),
        EuroUnitCombatOutcome::Destroyed => None,
    }
}
