//! Applying combat results to the game state
//!
//! Messages describe the participants as they were before the fight, so
//! they are built first and the state is mutated afterwards.
//! [`apply_combat`] does both in that order.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::combat::outcome::{
    CombatBraveAttackColony, CombatBraveAttackEuro, CombatEuroAttackBrave, CombatEuroAttackDwelling,
    CombatEuroAttackEuro, CombatEuroAttackUndefendedColony, CombatShipAttackShip, CombatWinner,
    DwellingCombatOutcome, EuroColonyWorkerCombatOutcome, EuroNavalUnitCombatOutcome,
    EuroUnitCombatOutcome, NativeUnitCombatOutcome, ShipRepairPort,
};
use crate::core::config::CombatConfig;
use crate::core::error::Result;
use crate::core::types::{ColonyId, Coord, DwellingId, Nation, NativeUnitId, Tribe, UnitId};
use crate::natives::missions::burn_missions;
use crate::state::{GameState, NativeUnit, Unit, UnitLocation, UnitOrders};
use crate::units::UnitKind;

/// Colonies further than this many squares away are not named in summaries
pub const NEARBY_COLONY_SEARCH_DISTANCE: i64 = 3;

/// Messages about one participant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitCombatEffectsMessages {
    /// Shown only to the participant's owner
    pub for_owner: Vec<String>,
    /// Shown only to the opponent
    pub for_other: Vec<String>,
    pub for_both: Vec<String>,
}

/// One-sentence account of the fight for each side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombatEffectsSummaries {
    pub attacker: Option<String>,
    pub defender: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombatEffectsMessages {
    pub summaries: CombatEffectsSummaries,
    pub attacker: UnitCombatEffectsMessages,
    pub defender: UnitCombatEffectsMessages,
}

/// Messages routed to the attacking and defending players
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MixedCombatEffectsMessages {
    pub summaries: CombatEffectsSummaries,
    pub attacker: Vec<String>,
    pub defender: Vec<String>,
}

/// What each player is actually shown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilteredCombatEffectsMessages {
    pub attacker: Vec<String>,
    pub defender: Vec<String>,
}

impl CombatEffectsMessages {
    /// Route each message to the players that should see it
    pub fn mix(&self) -> MixedCombatEffectsMessages {
        fn flatten(parts: [&[String]; 4]) -> Vec<String> {
            parts.iter().flat_map(|p| p.iter()).filter(|s| !s.is_empty()).cloned().collect()
        }
        let (att, def) = (&self.attacker, &self.defender);
        MixedCombatEffectsMessages {
            summaries: self.summaries.clone(),
            attacker: flatten([&att.for_both, &att.for_owner, &def.for_both, &def.for_other]),
            defender: flatten([&def.for_both, &def.for_owner, &att.for_both, &att.for_other]),
        }
    }
}

impl MixedCombatEffectsMessages {
    /// The attacker never sees a summary; the defender sees one only when
    /// nothing else is shown.
    pub fn filter(&self) -> FilteredCombatEffectsMessages {
        let mut defender = self.defender.clone();
        if defender.is_empty() {
            defender.extend(self.summaries.defender.iter().filter(|s| !s.is_empty()).cloned());
        }
        FilteredCombatEffectsMessages { attacker: self.attacker.clone(), defender }
    }
}

/// A combat result that knows how to describe and apply itself
pub trait CombatEffects {
    fn messages(&self, state: &GameState) -> Result<CombatEffectsMessages>;

    fn perform(&self, state: &mut GameState, conf: &CombatConfig) -> Result<()>;
}

/// Build the messages for a result, then apply it
pub fn apply_combat<C: CombatEffects + ?Sized>(
    state: &mut GameState,
    conf: &CombatConfig,
    combat: &C,
) -> Result<CombatEffectsMessages> {
    let messages = combat.messages(state)?;
    combat.perform(state, conf)?;
    Ok(messages)
}

// === MESSAGES ===

pub fn euro_unit_combat_effects_msg(
    unit: &Unit,
    outcome: &EuroUnitCombatOutcome,
) -> UnitCombatEffectsMessages {
    let mut res = UnitCombatEffectsMessages::default();
    let adj = unit.nation;
    let name = unit.kind().name();
    let capture = |res: &mut UnitCombatEffectsMessages, new_nation: Nation| {
        let worth = match unit.kind() {
            UnitKind::Treasure => format!(" worth [{}]", unit.gold),
            _ => String::new(),
        };
        res.for_both.push(format!("[{adj}] [{name}]{worth} captured by the [{new_nation}]!"));
    };

    match outcome {
        EuroUnitCombatOutcome::NoChange => {}
        EuroUnitCombatOutcome::Destroyed if unit.kind() == UnitKind::DamagedArtillery => {
            res.for_both.push(format!("Damaged [{adj}] Artillery has been [destroyed]."));
        }
        EuroUnitCombatOutcome::Destroyed => {
            res.for_owner.push(format!("[{adj}] [{name}] lost in battle."));
        }
        EuroUnitCombatOutcome::Captured { new_nation, .. } => capture(&mut res, *new_nation),
        EuroUnitCombatOutcome::CapturedAndDemoted { new_nation, .. } => {
            capture(&mut res, *new_nation);
            // Only the capturing player hears about the demotion
            let msg = if unit.kind() == UnitKind::VeteranColonist {
                "Veteran status lost upon capture."
            } else {
                "Unit demoted upon capture."
            };
            res.for_other.push(msg.to_string());
        }
        EuroUnitCombatOutcome::Demoted { to } if to.kind() == UnitKind::DamagedArtillery => {
            res.for_both.push(format!("[{adj}] Artillery [damaged]. Further damage will destroy it."));
        }
        EuroUnitCombatOutcome::Demoted { to } => {
            let to = to.kind();
            let demoted_to = if !to.is_military() && to.is_colonist() {
                "colonist status".to_string()
            } else {
                format!("[{}]", to.name())
            };
            res.for_both.push(format!("[{adj}] [{name}] routed! Unit demoted to {demoted_to}."));
        }
        EuroUnitCombatOutcome::Promoted { to } => {
            res.for_owner.push(format!(
                "[{adj}] {name} promoted to [{}] for victory in combat!",
                to.kind().name()
            ));
        }
    }
    res
}

pub fn native_unit_combat_effects_msg(
    tribe: Tribe,
    unit: &NativeUnit,
    outcome: &NativeUnitCombatOutcome,
) -> UnitCombatEffectsMessages {
    let mut res = UnitCombatEffectsMessages::default();
    if let NativeUnitCombatOutcome::Promoted { to, .. } = outcome {
        let from = unit.unit_type;
        // A brave never gains both in one fight
        let acquired = if to.has_muskets() && !from.has_muskets() {
            Some("muskets")
        } else if to.has_horses() && !from.has_horses() {
            Some("horses")
        } else {
            None
        };
        if let Some(acquired) = acquired {
            res.for_both.push(format!(
                "[{tribe}] {} have acquired [{acquired}] upon victory in combat!",
                from.plural_name()
            ));
        }
    }
    res
}

fn ship_damaged_message(state: &GameState, ship: &Unit, port: ShipRepairPort) -> Result<String> {
    let destination = match port {
        ShipRepairPort::EuropeanHarbor => "Europe".to_string(),
        ShipRepairPort::Colony(id) => state.colony(id)?.name.clone(),
    };
    Ok(format!(
        "[{}] [{}] damaged in battle and sent to [{}] for repairs.",
        ship.nation,
        ship.kind().name(),
        destination
    ))
}

pub fn naval_unit_combat_effects_msg(
    state: &GameState,
    ship: &Unit,
    opponent: &Unit,
    outcome: &EuroNavalUnitCombatOutcome,
) -> Result<UnitCombatEffectsMessages> {
    let mut res = UnitCombatEffectsMessages::default();
    match outcome {
        EuroNavalUnitCombatOutcome::NoChange | EuroNavalUnitCombatOutcome::Moved { .. } => {}
        EuroNavalUnitCombatOutcome::Damaged { port } => {
            res.for_both.push(ship_damaged_message(state, ship, *port)?);
        }
        EuroNavalUnitCombatOutcome::Sunk => res.for_both.push(format!(
            "[{}] [{}] sunk by [{}] [{}].",
            ship.nation,
            ship.kind().name(),
            opponent.nation,
            opponent.kind().name()
        )),
    }
    Ok(res)
}

// === SUMMARIES ===

/// " in X" / " near X" for the closest colony, else `default`
fn colony_clause(state: &GameState, at: Coord, default: &str) -> String {
    let max = NEARBY_COLONY_SEARCH_DISTANCE * NEARBY_COLONY_SEARCH_DISTANCE;
    let closest = state
        .colony_ids()
        .into_iter()
        .filter_map(|id| state.colony(id).ok())
        .filter(|c| c.coord.distance_squared(&at) <= max)
        .min_by_key(|c| (c.coord.distance_squared(&at), c.id));
    match closest {
        Some(colony) if colony.coord == at => format!(" in {}", colony.name),
        Some(colony) => format!(" near {}", colony.name),
        None => default.to_string(),
    }
}

fn summarize_for_euro_unit(
    state: &GameState,
    won: bool,
    unit: &Unit,
    opponent: &Unit,
    default: &str,
) -> Result<String> {
    let clause = colony_clause(state, state.coord_for_unit(unit.id)?, default);
    Ok(if won {
        format!("[{}] {} defeats [{}]{}!", unit.nation, unit.kind().name(), opponent.nation, clause)
    } else {
        format!("[{}] {} defeats [{}]{}!", opponent.nation, opponent.kind().name(), unit.nation, clause)
    })
}

fn tribe_of_brave(state: &GameState, brave: &NativeUnit) -> Result<Tribe> {
    Ok(state.dwelling(brave.dwelling_id)?.tribe)
}

// === PERFORMING ===

pub fn perform_euro_unit_combat_effects(
    state: &mut GameState,
    unit_id: UnitId,
    outcome: &EuroUnitCombatOutcome,
) -> Result<()> {
    let capture = |state: &mut GameState, new_nation: Nation, new_coord: Coord| -> Result<()> {
        let unit = state.unit_mut(unit_id)?;
        unit.nation = new_nation;
        unit.location = UnitLocation::Map(new_coord);
        // A captured unit does not get to move again this turn
        unit.forfeit_movement_points();
        unit.orders = UnitOrders::None;
        Ok(())
    };

    match outcome {
        EuroUnitCombatOutcome::NoChange => {}
        EuroUnitCombatOutcome::Destroyed => {
            state.remove_unit(unit_id)?;
        }
        EuroUnitCombatOutcome::Captured { new_nation, new_coord } => {
            capture(state, *new_nation, *new_coord)?;
        }
        EuroUnitCombatOutcome::CapturedAndDemoted { to, new_nation, new_coord } => {
            capture(state, *new_nation, *new_coord)?;
            state.unit_mut(unit_id)?.unit_type = *to;
        }
        EuroUnitCombatOutcome::Demoted { to } | EuroUnitCombatOutcome::Promoted { to } => {
            state.unit_mut(unit_id)?.unit_type = *to;
        }
    }
    info!(unit = %unit_id, ?outcome, "euro unit combat effects applied");
    Ok(())
}

pub fn perform_native_unit_combat_effects(
    state: &mut GameState,
    conf: &CombatConfig,
    brave_id: NativeUnitId,
    outcome: &NativeUnitCombatOutcome,
) -> Result<()> {
    let tribe = tribe_of_brave(state, state.native_unit(brave_id)?)?;
    match outcome {
        NativeUnitCombatOutcome::NoChange => {}
        NativeUnitCombatOutcome::Promoted { to, tribe_gains_horse_herd } => {
            state.native_unit_mut(brave_id)?.unit_type = *to;
            if *tribe_gains_horse_herd {
                state.tribe_mut(tribe)?.horse_herds += 1;
            }
        }
        NativeUnitCombatOutcome::Destroyed { tribe_retains_horses, tribe_retains_muskets } => {
            let max_breeding = conf
                .horse_breeding_cap
                .max_for(tribe.level(), state.dwellings_for_tribe(tribe).len());
            let tribe = state.tribe_mut(tribe)?;
            if *tribe_retains_horses {
                // Never lowers breeding the tribe already has
                let raised = tribe.horse_breeding + conf.horse_breeding_per_retained_horses;
                tribe.horse_breeding = raised.min(max_breeding.max(tribe.horse_breeding));
            }
            if *tribe_retains_muskets {
                tribe.muskets += conf.muskets_to_arm;
            }
            state.remove_native_unit(brave_id)?;
        }
    }
    info!(brave = %brave_id, ?tribe, ?outcome, "native unit combat effects applied");
    Ok(())
}

pub fn perform_naval_unit_combat_effects(
    state: &mut GameState,
    ship_id: UnitId,
    outcome: &EuroNavalUnitCombatOutcome,
) -> Result<()> {
    match outcome {
        EuroNavalUnitCombatOutcome::NoChange => {}
        EuroNavalUnitCombatOutcome::Moved { to } => {
            state.unit_mut(ship_id)?.location = UnitLocation::Map(*to);
        }
        EuroNavalUnitCombatOutcome::Damaged { port } => {
            let location = match port {
                ShipRepairPort::EuropeanHarbor => UnitLocation::EuropeanHarbor,
                ShipRepairPort::Colony(id) => UnitLocation::Map(state.colony(*id)?.coord),
            };
            let ship = state.unit_mut(ship_id)?;
            ship.location = location;
            ship.orders = UnitOrders::Damaged;
            ship.forfeit_movement_points();
        }
        EuroNavalUnitCombatOutcome::Sunk => {
            state.remove_unit(ship_id)?;
        }
    }
    info!(ship = %ship_id, ?outcome, "naval combat effects applied");
    Ok(())
}

/// Apply a dwelling outcome; `attacker_nation` receives converts and treasure
pub fn perform_dwelling_combat_effects(
    state: &mut GameState,
    dwelling_id: DwellingId,
    attacker_nation: Nation,
    outcome: &DwellingCombatOutcome,
) -> Result<()> {
    let coord = state.dwelling(dwelling_id)?.coord;
    let produce_convert = |state: &mut GameState, produced: bool| {
        if produced {
            let convert = state.add_unit_on_map(UnitKind::NativeConvert, coord, attacker_nation);
            debug!(%convert, dwelling = %dwelling_id, "convert produced");
        }
    };

    match outcome {
        DwellingCombatOutcome::NoChange => {}
        DwellingCombatOutcome::PopulationDecrease { convert_produced } => {
            let dwelling = state.dwelling_mut(dwelling_id)?;
            dwelling.population = (dwelling.population - 1).max(1);
            produce_convert(state, *convert_produced);
        }
        DwellingCombatOutcome::Destruction {
            braves_to_kill,
            missionary_to_release,
            treasure_amount,
            tribe_destroyed,
            convert_produced,
        } => {
            for brave in braves_to_kill {
                if state.native_unit_exists(*brave) {
                    state.remove_native_unit(*brave)?;
                } else {
                    warn!(%brave, dwelling = %dwelling_id, "brave already gone");
                }
            }
            if let Some(missionary) = missionary_to_release {
                let unit = state.unit_mut(*missionary)?;
                unit.location = UnitLocation::Map(coord);
                unit.orders = UnitOrders::None;
            }
            // Whoever else was preaching there goes down with the dwelling
            while let Some(other) = state.missionary_in_dwelling(dwelling_id) {
                state.remove_unit(other)?;
            }
            produce_convert(state, *convert_produced);
            if let Some(gold) = treasure_amount {
                let treasure = state.add_treasure_on_map(*gold, coord, attacker_nation);
                debug!(%treasure, gold, "treasure left behind");
            }
            let dwelling = state.remove_dwelling(dwelling_id)?;
            if let Some(tribe) = tribe_destroyed {
                state.remove_tribe(*tribe)?;
                info!(?tribe, "tribe destroyed");
            }
            info!(dwelling = %dwelling_id, tribe = ?dwelling.tribe, "dwelling destroyed");
        }
    }
    Ok(())
}

/// Apply the outcome for the worker of an undefended colony
pub fn perform_colony_worker_combat_effects(
    state: &mut GameState,
    colony_id: ColonyId,
    attacker_nation: Nation,
    outcome: &EuroColonyWorkerCombatOutcome,
) -> Result<()> {
    if *outcome == EuroColonyWorkerCombatOutcome::NoChange {
        return Ok(());
    }
    let colony = state.colony_mut(colony_id)?;
    let old_nation = colony.nation;
    colony.nation = attacker_nation;
    let coord = colony.coord;
    let mut changed = state.workers_in_colony(colony_id);
    changed.extend(
        state
            .units_at(coord)
            .into_iter()
            .filter(|id| state.unit(*id).is_ok_and(|u| u.nation == old_nation)),
    );
    for id in &changed {
        state.unit_mut(*id)?.nation = attacker_nation;
    }
    info!(colony = %colony_id, from = ?old_nation, to = ?attacker_nation, units = changed.len(), "colony captured");
    Ok(())
}

/// Burn a colony: it and every unit of its nation there are removed
pub fn destroy_colony(state: &mut GameState, colony_id: ColonyId) -> Result<()> {
    let colony = state.colony(colony_id)?;
    let (nation, coord) = (colony.nation, colony.coord);
    let mut lost = state.workers_in_colony(colony_id);
    lost.extend(
        state
            .units_at(coord)
            .into_iter()
            .filter(|id| state.unit(*id).is_ok_and(|u| u.nation == nation)),
    );
    for id in &lost {
        state.remove_unit(*id)?;
    }
    let colony = state.remove_colony(colony_id)?;
    info!(colony = %colony_id, name = %colony.name, units = lost.len(), "colony burned");
    Ok(())
}

// === PER-COMBAT ===

impl CombatEffects for CombatEuroAttackEuro {
    fn messages(&self, state: &GameState) -> Result<CombatEffectsMessages> {
        const DEFAULT: &str = " in the wilderness";
        let attacker = state.unit(self.attacker.id)?;
        let defender = state.unit(self.defender.id)?;
        let attacker_won = self.winner == CombatWinner::Attacker;
        Ok(CombatEffectsMessages {
            summaries: CombatEffectsSummaries {
                attacker: Some(summarize_for_euro_unit(state, attacker_won, attacker, defender, DEFAULT)?),
                defender: Some(summarize_for_euro_unit(state, !attacker_won, defender, attacker, DEFAULT)?),
            },
            attacker: euro_unit_combat_effects_msg(attacker, &self.attacker.outcome),
            defender: euro_unit_combat_effects_msg(defender, &self.defender.outcome),
        })
    }

    fn perform(&self, state: &mut GameState, _conf: &CombatConfig) -> Result<()> {
        perform_euro_unit_combat_effects(state, self.attacker.id, &self.attacker.outcome)?;
        perform_euro_unit_combat_effects(state, self.defender.id, &self.defender.outcome)
    }
}

impl CombatEffects for CombatEuroAttackUndefendedColony {
    fn messages(&self, state: &GameState) -> Result<CombatEffectsMessages> {
        let attacker = state.unit(self.attacker.id)?;
        Ok(CombatEffectsMessages {
            attacker: euro_unit_combat_effects_msg(attacker, &self.attacker.outcome),
            ..Default::default()
        })
    }

    fn perform(&self, state: &mut GameState, _conf: &CombatConfig) -> Result<()> {
        let nation = state.unit(self.attacker.id)?.nation;
        perform_euro_unit_combat_effects(state, self.attacker.id, &self.attacker.outcome)?;
        perform_colony_worker_combat_effects(state, self.colony_id, nation, &self.defender.outcome)?;
        if self.defender.outcome == EuroColonyWorkerCombatOutcome::Defeated {
            let coord = state.colony(self.colony_id)?.coord;
            state.unit_mut(self.attacker.id)?.location = UnitLocation::Map(coord);
        }
        Ok(())
    }
}

impl CombatEffects for CombatEuroAttackBrave {
    fn messages(&self, state: &GameState) -> Result<CombatEffectsMessages> {
        let attacker = state.unit(self.attacker.id)?;
        let brave = state.native_unit(self.defender.id)?;
        Ok(CombatEffectsMessages {
            summaries: CombatEffectsSummaries::default(),
            attacker: euro_unit_combat_effects_msg(attacker, &self.attacker.outcome),
            defender: native_unit_combat_effects_msg(
                tribe_of_brave(state, brave)?,
                brave,
                &self.defender.outcome,
            ),
        })
    }

    fn perform(&self, state: &mut GameState, conf: &CombatConfig) -> Result<()> {
        perform_euro_unit_combat_effects(state, self.attacker.id, &self.attacker.outcome)?;
        perform_native_unit_combat_effects(state, conf, self.defender.id, &self.defender.outcome)
    }
}

impl CombatEffects for CombatBraveAttackEuro {
    fn messages(&self, state: &GameState) -> Result<CombatEffectsMessages> {
        let brave = state.native_unit(self.attacker.id)?;
        let defender = state.unit(self.defender.id)?;
        let tribe = tribe_of_brave(state, brave)?;
        let clause = colony_clause(state, state.coord_for_unit(defender.id)?, " in the wilderness");
        let name = defender.kind().name();
        let summary = match self.winner {
            CombatWinner::Attacker => {
                format!("[{tribe}] ambush [{}] [{name}]{clause}!", defender.nation)
            }
            CombatWinner::Defender => format!(
                "[{}] {name} defeats [{tribe}] {}{clause}!",
                defender.nation,
                brave.unit_type.name()
            ),
        };
        Ok(CombatEffectsMessages {
            summaries: CombatEffectsSummaries { attacker: None, defender: Some(summary) },
            attacker: native_unit_combat_effects_msg(tribe, brave, &self.attacker.outcome),
            defender: euro_unit_combat_effects_msg(defender, &self.defender.outcome),
        })
    }

    fn perform(&self, state: &mut GameState, conf: &CombatConfig) -> Result<()> {
        perform_native_unit_combat_effects(state, conf, self.attacker.id, &self.attacker.outcome)?;
        perform_euro_unit_combat_effects(state, self.defender.id, &self.defender.outcome)
    }
}

impl CombatEffects for CombatBraveAttackColony {
    fn messages(&self, state: &GameState) -> Result<CombatEffectsMessages> {
        let brave = state.native_unit(self.attacker.id)?;
        let defender = state.unit(self.defender.id)?;
        let colony = state.colony(self.colony_id)?;
        let tribe = tribe_of_brave(state, brave)?;

        // The brave is always lost and gets no message of its own
        if self.colony_destroyed {
            let king = if state.player(colony.nation)?.independence_declared() {
                " The King laughs at such incompetent governance!"
            } else {
                " The King demands accountability!"
            };
            let summary = format!(
                "[{tribe}] massacre [{}] population in [{}]! Colony set ablaze and decimated!{king}",
                colony.nation, colony.name
            );
            return Ok(CombatEffectsMessages {
                summaries: CombatEffectsSummaries { attacker: None, defender: Some(summary) },
                ..Default::default()
            });
        }

        let summary = match self.winner {
            CombatWinner::Attacker => format!(
                "[{tribe}] ambush [{}] [{}] in [{}]!",
                defender.nation,
                defender.kind().name(),
                colony.name
            ),
            CombatWinner::Defender => format!(
                "[{tribe}] raiding party wiped out in [{}]! Colonists celebrate!",
                colony.name
            ),
        };
        Ok(CombatEffectsMessages {
            summaries: CombatEffectsSummaries { attacker: None, defender: Some(summary) },
            defender: euro_unit_combat_effects_msg(defender, &self.defender.outcome),
            ..Default::default()
        })
    }

    fn perform(&self, state: &mut GameState, conf: &CombatConfig) -> Result<()> {
        perform_native_unit_combat_effects(state, conf, self.attacker.id, &self.attacker.outcome)?;
        if self.colony_destroyed {
            destroy_colony(state, self.colony_id)
        } else {
            perform_euro_unit_combat_effects(state, self.defender.id, &self.defender.outcome)
        }
    }
}

impl CombatEffects for CombatEuroAttackDwelling {
    fn messages(&self, state: &GameState) -> Result<CombatEffectsMessages> {
        let attacker = state.unit(self.attacker.id)?;
        Ok(CombatEffectsMessages {
            attacker: euro_unit_combat_effects_msg(attacker, &self.attacker.outcome),
            ..Default::default()
        })
    }

    fn perform(&self, state: &mut GameState, _conf: &CombatConfig) -> Result<()> {
        let nation = state.unit(self.attacker.id)?.nation;
        let tribe = state.dwelling(self.defender.id)?.tribe;
        perform_euro_unit_combat_effects(state, self.attacker.id, &self.attacker.outcome)?;
        if self.missions_burned {
            burn_missions(state, tribe, nation)?;
        }
        perform_dwelling_combat_effects(state, self.defender.id, nation, &self.defender.outcome)
    }
}

impl CombatEffects for CombatShipAttackShip {
    fn messages(&self, state: &GameState) -> Result<CombatEffectsMessages> {
        let attacker = state.unit(self.attacker.id)?;
        let defender = state.unit(self.defender.id)?;
        let Some(winner) = self.winner else {
            let evade = format!(
                "[{}] [{}] evades [{}] [{}].",
                defender.nation,
                defender.kind().name(),
                attacker.nation,
                attacker.kind().name()
            );
            return Ok(CombatEffectsMessages {
                defender: UnitCombatEffectsMessages { for_both: vec![evade], ..Default::default() },
                ..Default::default()
            });
        };

        const DEFAULT: &str = " at sea";
        let attacker_won = winner == CombatWinner::Attacker;
        let mut defender_msgs =
            naval_unit_combat_effects_msg(state, defender, attacker, &self.defender.outcome)?;
        for affected in &self.affected_defender_units {
            let ship = state.unit(affected.id)?;
            let msgs = naval_unit_combat_effects_msg(state, ship, attacker, &affected.outcome)?;
            defender_msgs.for_both.extend(msgs.for_both);
            defender_msgs.for_owner.extend(msgs.for_owner);
        }
        Ok(CombatEffectsMessages {
            summaries: CombatEffectsSummaries {
                attacker: Some(summarize_for_euro_unit(state, attacker_won, attacker, defender, DEFAULT)?),
                defender: Some(summarize_for_euro_unit(state, !attacker_won, defender, attacker, DEFAULT)?),
            },
            attacker: naval_unit_combat_effects_msg(state, attacker, defender, &self.attacker.outcome)?,
            defender: defender_msgs,
        })
    }

    fn perform(&self, state: &mut GameState, _conf: &CombatConfig) -> Result<()> {
        perform_naval_unit_combat_effects(state, self.attacker.id, &self.attacker.outcome)?;
        perform_naval_unit_combat_effects(state, self.defender.id, &self.defender.outcome)?;
        for affected in &self.affected_defender_units {
            perform_naval_unit_combat_effects(state, affected.id, &affected.outcome)?;
        }
        Ok(())
    }
}
