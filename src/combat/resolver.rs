//! Combat resolution
//!
//! [`RealCombat`] reads the game state, takes every random decision from
//! the injected source and returns a result value. It never mutates state;
//! see `combat::effects` for that.
//!
//! Draw order is fixed per entry point and documented on each method of
//! [`Combat`]. Tests replay it exactly with a scripted source.

use tracing::debug;

use crate::combat::euro::{loss_outcome_vs_euro, loss_outcome_vs_natives, promotion_outcome};
use crate::combat::native::{destroyed_outcome, victory_outcome};
use crate::combat::outcome::{
    AffectedNavalDefender, CombatBraveAttackColony, CombatBraveAttackEuro, CombatEuroAttackBrave,
    CombatEuroAttackDwelling, CombatEuroAttackEuro, CombatEuroAttackUndefendedColony,
    CombatParticipant, CombatShipAttackShip, CombatWinner, DwellingCombatOutcome,
    EuroColonyWorkerCombatOutcome, EuroNavalUnitCombatOutcome, EuroUnitCombatOutcome,
    NavalCombatParticipant, NativeUnitCombatOutcome, ShipRepairPort, Sinking,
};
use crate::combat::rand::{clamp_probability, RandomSource};
use crate::combat::weight::{
    modified_weight, native_weight, ship_evade_weight, unit_weight, win_probability, CombatModifier,
    DWELLING_WEIGHT,
};
use crate::core::config::CombatConfig;
use crate::core::error::{CombatError, Result};
use crate::core::types::{ColonyId, Coord, DwellingId, NativeUnitId, UnitId};
use crate::natives::missions::{
    is_missionary, probability_dwelling_produces_convert_on_attack, should_burn_missions,
};
use crate::natives::treasure::treasure_from_dwelling;
use crate::state::{ColonyBuilding, GameState, NativeUnit, Unit, UnitLocation};
use crate::units::ShipStats;

/// The seven ways two sides can meet
pub trait Combat {
    /// Draws: win, then the winner's promotion.
    fn euro_attack_euro(&mut self, attacker: UnitId, defender: UnitId)
        -> Result<CombatEuroAttackEuro>;

    /// A colony with no military left is defended by one of its workers.
    ///
    /// Draws: win, then the attacker's promotion when it won. The worker
    /// never promotes.
    fn euro_attack_undefended_colony(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
        colony: ColonyId,
    ) -> Result<CombatEuroAttackUndefendedColony>;

    /// Draws: win, the attacker's promotion when it won, then the brave's
    /// retention draws when it lost.
    fn euro_attack_brave(
        &mut self,
        attacker: UnitId,
        defender: NativeUnitId,
    ) -> Result<CombatEuroAttackBrave>;

    /// Draws: win, then (when the brave lost) the defender's promotion and
    /// the brave's retention draws. A winning brave takes no further draws.
    fn brave_attack_euro(
        &mut self,
        attacker: NativeUnitId,
        defender: UnitId,
    ) -> Result<CombatBraveAttackEuro>;

    /// The raiding brave is always destroyed afterwards.
    ///
    /// Draws: win (skipped when this is the player's only colony, which the
    /// defender always holds), the defender's promotion when it won, the
    /// brave's regular outcome draws, then a second set of retention draws
    /// whose result is the one reported.
    fn brave_attack_colony(
        &mut self,
        attacker: NativeUnitId,
        defender: UnitId,
        colony: ColonyId,
    ) -> Result<CombatBraveAttackColony>;

    /// Draws: win, the attacker's promotion when it won, burn missions,
    /// convert, then treasure.
    fn euro_attack_dwelling(
        &mut self,
        attacker: UnitId,
        dwelling: DwellingId,
    ) -> Result<CombatEuroAttackDwelling>;

    /// Draws: evade (only when the defender is weaker than the attack),
    /// win, sink, then one sink draw per other ship on the defender's
    /// square when the attacker won.
    fn ship_attack_ship(&mut self, attacker: UnitId, defender: UnitId)
        -> Result<CombatShipAttackShip>;
}

/// Resolves combats against a read-only view of the game state
pub struct RealCombat<'a> {
    state: &'a GameState,
    rand: &'a mut dyn RandomSource,
    conf: &'a CombatConfig,
}

impl<'a> RealCombat<'a> {
    pub fn new(
        state: &'a GameState,
        rand: &'a mut dyn RandomSource,
        conf: &'a CombatConfig,
    ) -> Self {
        Self { state, rand, conf }
    }

    fn attacker_wins(&mut self, attack: f64, defense: f64) -> CombatWinner {
        let p = clamp_probability(win_probability(attack, defense));
        if self.rand.bernoulli(p) {
            CombatWinner::Attacker
        } else {
            CombatWinner::Defender
        }
    }

    fn land_unit(&self, id: UnitId) -> Result<&'a Unit> {
        let unit = self.state.unit(id)?;
        if unit.kind().is_ship() {
            return Err(CombatError::invalid(id, "ships cannot fight on land"));
        }
        Ok(unit)
    }

    fn ship(&self, id: UnitId) -> Result<(&'a Unit, ShipStats)> {
        let unit = self.state.unit(id)?;
        let stats = unit
            .kind()
            .ship_stats()
            .ok_or_else(|| CombatError::invalid(id, "not a ship"))?;
        Ok((unit, stats))
    }

    fn native_unit(&self, id: NativeUnitId) -> Result<&'a NativeUnit> {
        self.state.native_unit(id)
    }

    fn colony_at_unit(&self, unit: &Unit) -> Option<ColonyId> {
        match unit.location {
            UnitLocation::Colony(id) => Some(id),
            UnitLocation::Map(coord) => self.state.colony_at(coord),
            _ => None,
        }
    }

    /// Contextual modifiers for a European unit that is defending
    fn defender_modifiers(&self, unit: &Unit) -> Result<Vec<CombatModifier>> {
        let mut modifiers = Vec::new();
        if unit.is_fortified() {
            modifiers.push(CombatModifier::Fortified);
        }
        match self.colony_at_unit(unit) {
            Some(colony_id) => {
                let colony = self.state.colony(colony_id)?;
                if unit.kind().is_military() {
                    if let Some(walls) = colony.fortification() {
                        modifiers.push(CombatModifier::ColonyFortification(walls));
                    }
                }
            }
            None if unit.kind().is_artillery() => modifiers.push(CombatModifier::ArtilleryInTheOpen),
            None => {}
        }
        Ok(modifiers)
    }

    fn attacker_participant<Id, O>(&self, id: Id, base: f64, outcome: O) -> CombatParticipant<Id, O> {
        CombatParticipant { id, modifiers: Vec::new(), base_weight: base, modified_weight: base, outcome }
    }

    fn defender_participant<Id, O>(
        &self,
        id: Id,
        base: f64,
        modifiers: Vec<CombatModifier>,
        outcome: O,
    ) -> CombatParticipant<Id, O> {
        let modified = modified_weight(base, &modifiers, &self.conf.modifiers);
        CombatParticipant { id, modifiers, base_weight: base, modified_weight: modified, outcome }
    }

    fn require_enemies(&self, attacker: &Unit, defender: &Unit) -> Result<()> {
        if attacker.nation == defender.nation {
            return Err(CombatError::invalid(
                defender.id,
                format!("{} cannot attack its own nation", attacker.id),
            ));
        }
        Ok(())
    }

    /// Where a losing ship goes for repair
    ///
    /// The closest of its nation's colonies with a drydock, otherwise the
    /// European harbor unless independence cuts that off.
    fn repair_port(&self, ship: &Unit, at: Coord) -> Result<Option<ShipRepairPort>> {
        let closest = self
            .state
            .colonies_for_nation(ship.nation)
            .into_iter()
            .filter_map(|id| self.state.colony(id).ok())
            .filter(|c| c.has_building(ColonyBuilding::Drydock))
            .min_by_key(|c| (c.coord.distance_squared(&at), c.id));
        if let Some(colony) = closest {
            return Ok(Some(ShipRepairPort::Colony(colony.id)));
        }
        if self.state.player(ship.nation)?.independence_declared() {
            return Ok(None);
        }
        Ok(Some(ShipRepairPort::EuropeanHarbor))
    }

    /// A beaten ship rolls to sink; survivors head for repair
    fn naval_loss(
        &mut self,
        ship: &Unit,
        at: Coord,
        sink_weights: Sinking,
    ) -> Result<EuroNavalUnitCombatOutcome> {
        let p = win_probability(sink_weights.guns as f64, sink_weights.hull as f64);
        let sunk = self.rand.bernoulli(clamp_probability(p));
        debug!(ship = %ship.id, guns = sink_weights.guns, hull = sink_weights.hull, sunk, "sink roll");
        if sunk {
            return Ok(EuroNavalUnitCombatOutcome::Sunk);
        }
        Ok(match self.repair_port(ship, at)? {
            Some(port) => EuroNavalUnitCombatOutcome::Damaged { port },
            None => EuroNavalUnitCombatOutcome::Sunk,
        })
    }
}

impl Combat for RealCombat<'_> {
    fn euro_attack_euro(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
    ) -> Result<CombatEuroAttackEuro> {
        let att = self.land_unit(attacker)?;
        let def = self.land_unit(defender)?;
        self.require_enemies(att, def)?;
        let att_coord = self.state.coord_for_unit(attacker)?;
        let def_coord = self.state.coord_for_unit(defender)?;
        let att_player = self.state.player(att.nation)?;
        let def_player = self.state.player(def.nation)?;

        let att_weight = unit_weight(att.kind());
        let def_modifiers = self.defender_modifiers(def)?;
        let def_weight = unit_weight(def.kind());
        let def_modified = modified_weight(def_weight, &def_modifiers, &self.conf.modifiers);

        let winner = self.attacker_wins(att_weight, def_modified);
        let (att_outcome, def_outcome) = match winner {
            CombatWinner::Attacker => (
                promotion_outcome(self.rand, self.conf, att.unit_type, att_player),
                loss_outcome_vs_euro(def.unit_type, true, att.nation, att_coord),
            ),
            CombatWinner::Defender => (
                loss_outcome_vs_euro(att.unit_type, false, def.nation, def_coord),
                promotion_outcome(self.rand, self.conf, def.unit_type, def_player),
            ),
        };
        debug!(%attacker, %defender, ?winner, ?att_outcome, ?def_outcome, "euro attack euro");

        Ok(CombatEuroAttackEuro {
            winner,
            attacker: self.attacker_participant(attacker, att_weight, att_outcome),
            defender: self.defender_participant(defender, def_weight, def_modifiers, def_outcome),
        })
    }

    fn euro_attack_undefended_colony(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
        colony_id: ColonyId,
    ) -> Result<CombatEuroAttackUndefendedColony> {
        let att = self.land_unit(attacker)?;
        let def = self.land_unit(defender)?;
        let colony = self.state.colony(colony_id)?;
        if def.location != UnitLocation::Colony(colony_id) {
            return Err(CombatError::invalid(defender, format!("not working in {}", colony_id)));
        }
        self.require_enemies(att, def)?;
        let att_player = self.state.player(att.nation)?;

        let att_weight = unit_weight(att.kind());
        let def_modifiers = self.defender_modifiers(def)?;
        let def_weight = unit_weight(def.kind());
        let def_modified = modified_weight(def_weight, &def_modifiers, &self.conf.modifiers);

        let winner = self.attacker_wins(att_weight, def_modified);
        let (att_outcome, def_outcome) = match winner {
            CombatWinner::Attacker => (
                promotion_outcome(self.rand, self.conf, att.unit_type, att_player),
                EuroColonyWorkerCombatOutcome::Defeated,
            ),
            CombatWinner::Defender => (
                loss_outcome_vs_euro(att.unit_type, false, colony.nation, colony.coord),
                EuroColonyWorkerCombatOutcome::NoChange,
            ),
        };
        debug!(%attacker, colony = %colony_id, ?winner, ?att_outcome, "euro attack undefended colony");

        Ok(CombatEuroAttackUndefendedColony {
            winner,
            colony_id,
            attacker: self.attacker_participant(attacker, att_weight, att_outcome),
            defender: self.defender_participant(defender, def_weight, def_modifiers, def_outcome),
        })
    }

    fn euro_attack_brave(
        &mut self,
        attacker: UnitId,
        defender: NativeUnitId,
    ) -> Result<CombatEuroAttackBrave> {
        let att = self.land_unit(attacker)?;
        let brave = self.native_unit(defender)?;
        let att_player = self.state.player(att.nation)?;

        let att_weight = unit_weight(att.kind());
        let def_weight = native_weight(brave.unit_type);

        let winner = self.attacker_wins(att_weight, def_weight);
        let (att_outcome, def_outcome) = match winner {
            CombatWinner::Attacker => {
                let promotion = promotion_outcome(self.rand, self.conf, att.unit_type, att_player);
                (promotion, destroyed_outcome(self.rand, self.conf, brave.unit_type))
            }
            CombatWinner::Defender => {
                (loss_outcome_vs_natives(att.unit_type), NativeUnitCombatOutcome::NoChange)
            }
        };
        debug!(%attacker, brave = %defender, ?winner, ?att_outcome, ?def_outcome, "euro attack brave");

        Ok(CombatEuroAttackBrave {
            winner,
            attacker: self.attacker_participant(attacker, att_weight, att_outcome),
            defender: self.defender_participant(defender, def_weight, Vec::new(), def_outcome),
        })
    }

    fn brave_attack_euro(
        &mut self,
        attacker: NativeUnitId,
        defender: UnitId,
    ) -> Result<CombatBraveAttackEuro> {
        let brave = self.native_unit(attacker)?;
        let def = self.land_unit(defender)?;
        let def_player = self.state.player(def.nation)?;

        let att_weight = native_weight(brave.unit_type);
        let def_modifiers = self.defender_modifiers(def)?;
        let def_weight = unit_weight(def.kind());
        let def_modified = modified_weight(def_weight, &def_modifiers, &self.conf.modifiers);

        let winner = self.attacker_wins(att_weight, def_modified);
        let (att_outcome, def_outcome) = match winner {
            CombatWinner::Attacker => {
                let loss = loss_outcome_vs_natives(def.unit_type);
                (victory_outcome(brave.unit_type, def.unit_type, &loss), loss)
            }
            CombatWinner::Defender => {
                let promotion = promotion_outcome(self.rand, self.conf, def.unit_type, def_player);
                (destroyed_outcome(self.rand, self.conf, brave.unit_type), promotion)
            }
        };
        debug!(brave = %attacker, %defender, ?winner, ?att_outcome, ?def_outcome, "brave attack euro");

        Ok(CombatBraveAttackEuro {
            winner,
            attacker: self.attacker_participant(attacker, att_weight, att_outcome),
            defender: self.defender_participant(defender, def_weight, def_modifiers, def_outcome),
        })
    }

    fn brave_attack_colony(
        &mut self,
        attacker: NativeUnitId,
        defender: UnitId,
        colony_id: ColonyId,
    ) -> Result<CombatBraveAttackColony> {
        let brave = self.native_unit(attacker)?;
        let def = self.land_unit(defender)?;
        let colony = self.state.colony(colony_id)?;
        if self.state.coord_for_unit(defender)? != colony.coord {
            return Err(CombatError::invalid(defender, format!("not defending {}", colony_id)));
        }
        let def_player = self.state.player(def.nation)?;

        // The last colony cannot be burned: the brave fights at zero strength
        let last_colony = self.state.colonies_for_nation(colony.nation).len() == 1;
        let att_weight = if last_colony { 0.0 } else { native_weight(brave.unit_type) };
        let def_modifiers = self.defender_modifiers(def)?;
        let def_weight = unit_weight(def.kind());
        let def_modified = modified_weight(def_weight, &def_modifiers, &self.conf.modifiers);

        let winner = if last_colony {
            CombatWinner::Defender
        } else {
            self.attacker_wins(att_weight, def_modified)
        };

        let mut colony_destroyed = false;
        let def_outcome = match winner {
            CombatWinner::Defender => {
                promotion_outcome(self.rand, self.conf, def.unit_type, def_player)
            }
            CombatWinner::Attacker if def.kind().is_military() => {
                loss_outcome_vs_natives(def.unit_type)
            }
            CombatWinner::Attacker => {
                colony_destroyed = true;
                EuroUnitCombatOutcome::Destroyed
            }
        };
        let regular = match winner {
            CombatWinner::Attacker => victory_outcome(brave.unit_type, def.unit_type, &def_outcome),
            CombatWinner::Defender => destroyed_outcome(self.rand, self.conf, brave.unit_type),
        };
        // The raiding brave never survives; this second roll is what counts
        let att_outcome = destroyed_outcome(self.rand, self.conf, brave.unit_type);
        debug!(
            brave = %attacker,
            colony = %colony_id,
            ?winner,
            last_colony,
            colony_destroyed,
            ?regular,
            ?def_outcome,
            "brave attack colony"
        );

        Ok(CombatBraveAttackColony {
            winner,
            colony_id,
            colony_destroyed,
            attacker: self.attacker_participant(attacker, att_weight, att_outcome),
            defender: self.defender_participant(defender, def_weight, def_modifiers, def_outcome),
        })
    }

    fn euro_attack_dwelling(
        &mut self,
        attacker: UnitId,
        dwelling_id: DwellingId,
    ) -> Result<CombatEuroAttackDwelling> {
        let att = self.land_unit(attacker)?;
        let dwelling = self.state.dwelling(dwelling_id)?;
        let tribe = self.state.tribe(dwelling.tribe)?;
        let att_player = self.state.player(att.nation)?;
        let tribal_alarm = tribe.relationship(att.nation).tribal_alarm;

        let own_missionary = self
            .state
            .missionary_in_dwelling(dwelling_id)
            .and_then(|id| self.state.unit(id).ok())
            .filter(|m| m.nation == att.nation && is_missionary(m.kind()));

        let att_weight = unit_weight(att.kind());
        let winner = self.attacker_wins(att_weight, DWELLING_WEIGHT);
        let att_outcome = match winner {
            CombatWinner::Attacker => {
                promotion_outcome(self.rand, self.conf, att.unit_type, att_player)
            }
            CombatWinner::Defender => loss_outcome_vs_natives(att.unit_type),
        };

        let missions_burned = should_burn_missions(self.conf, tribal_alarm, own_missionary.is_some())
            && self.rand.bernoulli(clamp_probability(self.conf.burn_missions_probability));

        let def_outcome = match winner {
            CombatWinner::Defender => DwellingCombatOutcome::NoChange,
            CombatWinner::Attacker => {
                let converter = own_missionary.filter(|_| !missions_burned);
                let convert_produced = match converter {
                    Some(m) => {
                        let p = probability_dwelling_produces_convert_on_attack(
                            &self.conf.convert,
                            m.unit_type,
                        );
                        self.rand.bernoulli(clamp_probability(p))
                    }
                    None => false,
                };
                if dwelling.population > 1 {
                    DwellingCombatOutcome::PopulationDecrease { convert_produced }
                } else {
                    let treasure_amount =
                        treasure_from_dwelling(self.rand, &self.conf.treasure, att_player, dwelling);
                    let last_dwelling = self.state.dwellings_for_tribe(dwelling.tribe).len() == 1;
                    DwellingCombatOutcome::Destruction {
                        braves_to_kill: self.state.braves_for_dwelling(dwelling_id),
                        missionary_to_release: converter.map(|m| m.id),
                        treasure_amount,
                        tribe_destroyed: last_dwelling.then_some(dwelling.tribe),
                        convert_produced,
                    }
                }
            }
        };
        debug!(
            %attacker,
            dwelling = %dwelling_id,
            ?winner,
            missions_burned,
            ?att_outcome,
            ?def_outcome,
            "euro attack dwelling"
        );

        Ok(CombatEuroAttackDwelling {
            winner,
            missions_burned,
            attacker: self.attacker_participant(attacker, att_weight, att_outcome),
            defender: self.defender_participant(dwelling_id, DWELLING_WEIGHT, Vec::new(), def_outcome),
        })
    }

    fn ship_attack_ship(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
    ) -> Result<CombatShipAttackShip> {
        let (att, att_stats) = self.ship(attacker)?;
        let (def, def_stats) = self.ship(defender)?;
        self.require_enemies(att, def)?;
        let att_coord = self.state.coord_for_unit(attacker)?;
        let def_coord = self.state.coord_for_unit(defender)?;

        let att_evade = ship_evade_weight(att.kind()).unwrap_or_default();
        let def_evade = ship_evade_weight(def.kind()).unwrap_or_default();
        let att_weight = att_stats.attack as f64;
        let def_weight = def_stats.combat as f64;

        let participants = move |att_outcome, def_outcome| {
            (
                NavalCombatParticipant {
                    id: attacker,
                    modifiers: Vec::new(),
                    evade_weight: att_evade,
                    base_combat_weight: att_weight,
                    modified_combat_weight: att_weight,
                    outcome: att_outcome,
                },
                NavalCombatParticipant {
                    id: defender,
                    modifiers: Vec::new(),
                    evade_weight: def_evade,
                    base_combat_weight: def_weight,
                    modified_combat_weight: def_weight,
                    outcome: def_outcome,
                },
            )
        };

        if def_weight < att_weight {
            let p = clamp_probability(win_probability(def_evade, att_evade));
            if self.rand.bernoulli(p) {
                debug!(%attacker, %defender, "defender evades");
                let (attacker, defender) = participants(
                    EuroNavalUnitCombatOutcome::NoChange,
                    EuroNavalUnitCombatOutcome::NoChange,
                );
                return Ok(CombatShipAttackShip {
                    winner: None,
                    sink_weights: None,
                    attacker,
                    defender,
                    affected_defender_units: Vec::new(),
                });
            }
        }

        let winner = self.attacker_wins(att_weight, def_weight);
        let mut affected_defender_units = Vec::new();
        let (sink_weights, att_outcome, def_outcome) = match winner {
            CombatWinner::Attacker => {
                let sink_weights = Sinking { guns: att_stats.guns, hull: def_stats.hull };
                let def_outcome = self.naval_loss(def, def_coord, sink_weights)?;
                for other in self.state.units_at(def_coord) {
                    if other == defender {
                        continue;
                    }
                    let (ship, stats) = match self.ship(other) {
                        Ok(found) if found.0.nation == def.nation => found,
                        _ => continue,
                    };
                    let weights = Sinking { guns: att_stats.guns, hull: stats.hull };
                    let outcome = self.naval_loss(ship, def_coord, weights)?;
                    affected_defender_units.push(AffectedNavalDefender {
                        id: other,
                        sink_weights: weights,
                        outcome,
                    });
                }
                (sink_weights, EuroNavalUnitCombatOutcome::Moved { to: def_coord }, def_outcome)
            }
            CombatWinner::Defender => {
                let sink_weights = Sinking { guns: def_stats.guns, hull: att_stats.hull };
                let att_outcome = self.naval_loss(att, att_coord, sink_weights)?;
                (sink_weights, att_outcome, EuroNavalUnitCombatOutcome::NoChange)
            }
        };
        debug!(
            %attacker,
            %defender,
            ?winner,
            ?att_outcome,
            ?def_outcome,
            affected = affected_defender_units.len(),
            "ship attack ship"
        );

        let (attacker, defender) = participants(att_outcome, def_outcome);
        Ok(CombatShipAttackShip {
            winner: Some(winner),
            sink_weights: Some(sink_weights),
            attacker,
            defender,
            affected_defender_units,
        })
    }
}
