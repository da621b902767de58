//! Combat outcomes and results
//!
//! Every result is a plain value: the resolver builds it from state plus
//! random draws, and the apply step consumes it. Nothing here touches the
//! game state.

use serde::Serialize;

use crate::combat::weight::CombatModifier;
use crate::core::types::{ColonyId, Coord, DwellingId, Nation, NativeUnitId, Tribe, UnitId};
use crate::units::{NativeUnitType, UnitType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatWinner {
    Attacker,
    Defender,
}

/// What happens to a European land unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum EuroUnitCombatOutcome {
    NoChange,
    Promoted { to: UnitType },
    Demoted { to: UnitType },
    Captured { new_nation: Nation, new_coord: Coord },
    CapturedAndDemoted { to: UnitType, new_nation: Nation, new_coord: Coord },
    Destroyed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum NativeUnitCombatOutcome {
    NoChange,
    Promoted { to: NativeUnitType, tribe_gains_horse_herd: bool },
    Destroyed { tribe_retains_horses: bool, tribe_retains_muskets: bool },
}

impl NativeUnitCombatOutcome {
    /// Destroyed with nothing recovered
    pub fn destroyed() -> Self {
        NativeUnitCombatOutcome::Destroyed {
            tribe_retains_horses: false,
            tribe_retains_muskets: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DwellingCombatOutcome {
    NoChange,
    PopulationDecrease {
        convert_produced: bool,
    },
    Destruction {
        /// Braves belonging to the dwelling, in id order
        braves_to_kill: Vec<NativeUnitId>,
        missionary_to_release: Option<UnitId>,
        treasure_amount: Option<i32>,
        /// Set when this was the tribe's last dwelling
        tribe_destroyed: Option<Tribe>,
        convert_produced: bool,
    },
}

/// What happens to the colonist defending a colony with no soldiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EuroColonyWorkerCombatOutcome {
    NoChange,
    /// The colony changes hands
    Defeated,
}

/// Where a damaged ship is sent for repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipRepairPort {
    EuropeanHarbor,
    Colony(ColonyId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum EuroNavalUnitCombatOutcome {
    NoChange,
    Moved { to: Coord },
    Damaged { port: ShipRepairPort },
    Sunk,
}

/// One side of a land fight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatParticipant<Id, O> {
    pub id: Id,
    pub modifiers: Vec<CombatModifier>,
    pub base_weight: f64,
    pub modified_weight: f64,
    pub outcome: O,
}

/// One side of a naval fight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavalCombatParticipant {
    pub id: UnitId,
    pub modifiers: Vec<CombatModifier>,
    pub evade_weight: f64,
    /// Attack strength for the attacker, combat strength for the defender
    pub base_combat_weight: f64,
    pub modified_combat_weight: f64,
    pub outcome: EuroNavalUnitCombatOutcome,
}

/// The winner's guns against the loser's hull
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sinking {
    pub guns: i32,
    pub hull: i32,
}

/// A ship sharing the defender's square that shares its fate roll
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffectedNavalDefender {
    pub id: UnitId,
    pub sink_weights: Sinking,
    pub outcome: EuroNavalUnitCombatOutcome,
}

pub type EuroParticipant = CombatParticipant<UnitId, EuroUnitCombatOutcome>;
pub type NativeParticipant = CombatParticipant<NativeUnitId, NativeUnitCombatOutcome>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatEuroAttackEuro {
    pub winner: CombatWinner,
    pub attacker: EuroParticipant,
    pub defender: EuroParticipant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatEuroAttackUndefendedColony {
    pub winner: CombatWinner,
    pub colony_id: ColonyId,
    pub attacker: EuroParticipant,
    pub defender: CombatParticipant<UnitId, EuroColonyWorkerCombatOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatEuroAttackBrave {
    pub winner: CombatWinner,
    pub attacker: EuroParticipant,
    pub defender: NativeParticipant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatBraveAttackEuro {
    pub winner: CombatWinner,
    pub attacker: NativeParticipant,
    pub defender: EuroParticipant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatBraveAttackColony {
    pub winner: CombatWinner,
    pub colony_id: ColonyId,
    pub colony_destroyed: bool,
    pub attacker: NativeParticipant,
    pub defender: EuroParticipant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatEuroAttackDwelling {
    pub winner: CombatWinner,
    pub missions_burned: bool,
    pub attacker: EuroParticipant,
    pub defender: CombatParticipant<DwellingId, DwellingCombatOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatShipAttackShip {
    /// `None` when the defender evaded
    pub winner: Option<CombatWinner>,
    pub sink_weights: Option<Sinking>,
    pub attacker: NavalCombatParticipant,
    pub defender: NavalCombatParticipant,
    /// Other ships on the defender's square, in id order
    pub affected_defender_units: Vec<AffectedNavalDefender>,
}
