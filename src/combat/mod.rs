//! Combat resolution: weights, random draws, outcomes, the resolver and
//! the apply step

pub mod effects;
pub mod euro;
pub mod native;
pub mod outcome;
pub mod rand;
pub mod resolver;
pub mod weight;

pub use effects::{apply_combat, CombatEffects, CombatEffectsMessages};
pub use outcome::{
    CombatBraveAttackColony, CombatBraveAttackEuro, CombatEuroAttackBrave,
    CombatEuroAttackDwelling, CombatEuroAttackEuro, CombatEuroAttackUndefendedColony,
    CombatShipAttackShip, CombatWinner, DwellingCombatOutcome, EuroColonyWorkerCombatOutcome,
    EuroNavalUnitCombatOutcome, EuroUnitCombatOutcome, NativeUnitCombatOutcome, ShipRepairPort,
};
pub use self::rand::{Interval, RandomSource, ScriptedRand, SeededRand};
pub use resolver::{Combat, RealCombat};
pub use weight::CombatModifier;
