//! Game state consumed by the combat engine
//!
//! This is the narrow slice of the persistent game state that combat reads
//! and that the apply step mutates: units, braves, dwellings, tribes,
//! colonies and players. Storage is hashed; anything whose order is
//! observable is returned sorted by id.

pub mod colony;
pub mod natives;
pub mod player;
pub mod unit;

use ahash::{AHashMap, AHashSet};

use crate::core::error::{CombatError, Result};
use crate::core::types::{
    ColonyId, Coord, Difficulty, DwellingId, Nation, NativeUnitId, Tribe, UnitId,
};
use crate::units::{NativeUnitType, UnitKind, UnitType};

pub use colony::{Colony, ColonyBuilding};
pub use natives::{Dwelling, NativeUnit, TribeRelationship, TribeState};
pub use player::Player;
pub use unit::{Unit, UnitLocation, UnitOrders};

/// Population a freshly added dwelling starts with
pub const DEFAULT_DWELLING_POPULATION: i32 = 3;

#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub difficulty: Difficulty,
    players: AHashMap<Nation, Player>,
    units: AHashMap<UnitId, Unit>,
    native_units: AHashMap<NativeUnitId, NativeUnit>,
    dwellings: AHashMap<DwellingId, Dwelling>,
    tribes: AHashMap<Tribe, TribeState>,
    colonies: AHashMap<ColonyId, Colony>,
    next_id: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    // === PLAYERS ===

    pub fn add_player(&mut self, nation: Nation) -> &mut Player {
        self.players.entry(nation).or_insert_with(|| Player::new(nation))
    }

    pub fn player(&self, nation: Nation) -> Result<&Player> {
        self.players.get(&nation).ok_or(CombatError::PlayerNotFound(nation))
    }

    pub fn player_mut(&mut self, nation: Nation) -> Result<&mut Player> {
        self.players.get_mut(&nation).ok_or(CombatError::PlayerNotFound(nation))
    }

    // === EUROPEAN UNITS ===

    fn insert_unit(&mut self, unit_type: UnitType, nation: Nation, location: UnitLocation) -> UnitId {
        let id = UnitId(self.allocate_id());
        self.units.insert(id, Unit::new(id, unit_type, nation, location));
        id
    }

    pub fn add_unit_on_map(
        &mut self,
        unit_type: impl Into<UnitType>,
        coord: Coord,
        nation: Nation,
    ) -> UnitId {
        self.insert_unit(unit_type.into(), nation, UnitLocation::Map(coord))
    }

    pub fn add_treasure_on_map(&mut self, gold: i32, coord: Coord, nation: Nation) -> UnitId {
        let id = self.add_unit_on_map(UnitKind::Treasure, coord, nation);
        if let Some(unit) = self.units.get_mut(&id) {
            unit.gold = gold;
        }
        id
    }

    /// Adds a colonist working inside a colony, owned by the colony's nation
    pub fn add_unit_in_colony(
        &mut self,
        unit_type: impl Into<UnitType>,
        colony_id: ColonyId,
    ) -> Result<UnitId> {
        let nation = self.colony(colony_id)?.nation;
        Ok(self.insert_unit(unit_type.into(), nation, UnitLocation::Colony(colony_id)))
    }

    pub fn add_missionary_in_dwelling(
        &mut self,
        unit_type: impl Into<UnitType>,
        dwelling_id: DwellingId,
        nation: Nation,
    ) -> Result<UnitId> {
        self.dwelling(dwelling_id)?;
        Ok(self.insert_unit(unit_type.into(), nation, UnitLocation::Dwelling(dwelling_id)))
    }

    pub fn unit(&self, id: UnitId) -> Result<&Unit> {
        self.units.get(&id).ok_or(CombatError::UnitNotFound(id))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Result<&mut Unit> {
        self.units.get_mut(&id).ok_or(CombatError::UnitNotFound(id))
    }

    pub fn unit_exists(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    pub fn remove_unit(&mut self, id: UnitId) -> Result<Unit> {
        self.units.remove(&id).ok_or(CombatError::UnitNotFound(id))
    }

    /// The map square a unit occupies, directly or through its colony/dwelling
    pub fn coord_for_unit(&self, id: UnitId) -> Result<Coord> {
        match self.unit(id)?.location {
            UnitLocation::Map(coord) => Ok(coord),
            UnitLocation::Colony(colony_id) => Ok(self.colony(colony_id)?.coord),
            UnitLocation::Dwelling(dwelling_id) => Ok(self.dwelling(dwelling_id)?.coord),
            UnitLocation::EuropeanHarbor => {
                Err(CombatError::invalid(id, "unit is in the european harbor"))
            }
        }
    }

    /// Units standing on a map square, in id order
    pub fn units_at(&self, coord: Coord) -> Vec<UnitId> {
        let mut ids: Vec<UnitId> = self
            .units
            .values()
            .filter(|u| u.location == UnitLocation::Map(coord))
            .map(|u| u.id)
            .collect();
        ids.sort();
        ids
    }

    /// Units owned by a nation, in id order
    pub fn units_for_nation(&self, nation: Nation) -> Vec<UnitId> {
        let mut ids: Vec<UnitId> =
            self.units.values().filter(|u| u.nation == nation).map(|u| u.id).collect();
        ids.sort();
        ids
    }

    // === NATIVES ===

    pub fn add_tribe(&mut self, tribe: Tribe) -> &mut TribeState {
        self.tribes.entry(tribe).or_insert_with(|| TribeState::new(tribe))
    }

    pub fn tribe(&self, tribe: Tribe) -> Result<&TribeState> {
        self.tribes.get(&tribe).ok_or(CombatError::TribeNotFound(tribe))
    }

    pub fn tribe_mut(&mut self, tribe: Tribe) -> Result<&mut TribeState> {
        self.tribes.get_mut(&tribe).ok_or(CombatError::TribeNotFound(tribe))
    }

    pub fn tribe_exists(&self, tribe: Tribe) -> bool {
        self.tribes.contains_key(&tribe)
    }

    pub fn remove_tribe(&mut self, tribe: Tribe) -> Result<TribeState> {
        self.tribes.remove(&tribe).ok_or(CombatError::TribeNotFound(tribe))
    }

    /// Adds a dwelling, creating its tribe if needed
    pub fn add_dwelling(&mut self, coord: Coord, tribe: Tribe) -> DwellingId {
        self.add_tribe(tribe);
        let id = DwellingId(self.allocate_id());
        self.dwellings.insert(
            id,
            Dwelling {
                id,
                tribe,
                coord,
                population: DEFAULT_DWELLING_POPULATION,
                is_capital: false,
                dwelling_only_alarm: AHashMap::new(),
            },
        );
        id
    }

    pub fn dwelling(&self, id: DwellingId) -> Result<&Dwelling> {
        self.dwellings.get(&id).ok_or(CombatError::DwellingNotFound(id))
    }

    pub fn dwelling_mut(&mut self, id: DwellingId) -> Result<&mut Dwelling> {
        self.dwellings.get_mut(&id).ok_or(CombatError::DwellingNotFound(id))
    }

    pub fn dwelling_exists(&self, id: DwellingId) -> bool {
        self.dwellings.contains_key(&id)
    }

    pub fn remove_dwelling(&mut self, id: DwellingId) -> Result<Dwelling> {
        self.dwellings.remove(&id).ok_or(CombatError::DwellingNotFound(id))
    }

    pub fn dwellings_for_tribe(&self, tribe: Tribe) -> Vec<DwellingId> {
        let mut ids: Vec<DwellingId> =
            self.dwellings.values().filter(|d| d.tribe == tribe).map(|d| d.id).collect();
        ids.sort();
        ids
    }

    pub fn tribe_for_dwelling(&self, id: DwellingId) -> Result<&TribeState> {
        let tribe = self.dwelling(id)?.tribe;
        self.tribe(tribe)
    }

    pub fn add_native_unit(
        &mut self,
        unit_type: NativeUnitType,
        coord: Coord,
        dwelling_id: DwellingId,
    ) -> Result<NativeUnitId> {
        self.dwelling(dwelling_id)?;
        let id = NativeUnitId(self.allocate_id());
        let movement_points = if unit_type.has_horses() { 4 } else { 1 };
        self.native_units.insert(
            id,
            NativeUnit { id, unit_type, dwelling_id, coord, movement_points },
        );
        Ok(id)
    }

    pub fn native_unit(&self, id: NativeUnitId) -> Result<&NativeUnit> {
        self.native_units.get(&id).ok_or(CombatError::NativeUnitNotFound(id))
    }

    pub fn native_unit_mut(&mut self, id: NativeUnitId) -> Result<&mut NativeUnit> {
        self.native_units.get_mut(&id).ok_or(CombatError::NativeUnitNotFound(id))
    }

    pub fn native_unit_exists(&self, id: NativeUnitId) -> bool {
        self.native_units.contains_key(&id)
    }

    pub fn remove_native_unit(&mut self, id: NativeUnitId) -> Result<NativeUnit> {
        self.native_units.remove(&id).ok_or(CombatError::NativeUnitNotFound(id))
    }

    /// Braves belonging to a dwelling, in id order
    pub fn braves_for_dwelling(&self, id: DwellingId) -> Vec<NativeUnitId> {
        let mut ids: Vec<NativeUnitId> = self
            .native_units
            .values()
            .filter(|n| n.dwelling_id == id)
            .map(|n| n.id)
            .collect();
        ids.sort();
        ids
    }

    /// The missionary (of any nation) inside a dwelling
    pub fn missionary_in_dwelling(&self, id: DwellingId) -> Option<UnitId> {
        self.units
            .values()
            .filter(|u| u.location == UnitLocation::Dwelling(id))
            .map(|u| u.id)
            .min()
    }

    // === COLONIES ===

    pub fn add_colony(&mut self, coord: Coord, nation: Nation, name: impl Into<String>) -> ColonyId {
        let id = ColonyId(self.allocate_id());
        self.colonies.insert(
            id,
            Colony { id, nation, name: name.into(), coord, buildings: AHashSet::new() },
        );
        id
    }

    pub fn colony(&self, id: ColonyId) -> Result<&Colony> {
        self.colonies.get(&id).ok_or(CombatError::ColonyNotFound(id))
    }

    pub fn colony_mut(&mut self, id: ColonyId) -> Result<&mut Colony> {
        self.colonies.get_mut(&id).ok_or(CombatError::ColonyNotFound(id))
    }

    pub fn remove_colony(&mut self, id: ColonyId) -> Result<Colony> {
        self.colonies.remove(&id).ok_or(CombatError::ColonyNotFound(id))
    }

    /// Every colony on the map, in id order
    pub fn colony_ids(&self) -> Vec<ColonyId> {
        let mut ids: Vec<ColonyId> = self.colonies.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn colony_at(&self, coord: Coord) -> Option<ColonyId> {
        self.colonies.values().find(|c| c.coord == coord).map(|c| c.id)
    }

    pub fn colonies_for_nation(&self, nation: Nation) -> Vec<ColonyId> {
        let mut ids: Vec<ColonyId> =
            self.colonies.values().filter(|c| c.nation == nation).map(|c| c.id).collect();
        ids.sort();
        ids
    }

    /// Colonists working inside a colony, in id order
    pub fn workers_in_colony(&self, id: ColonyId) -> Vec<UnitId> {
        let mut ids: Vec<UnitId> = self
            .units
            .values()
            .filter(|u| u.location == UnitLocation::Colony(id))
            .map(|u| u.id)
            .collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_allocated_in_order() {
        let mut state = GameState::new();
        let a = state.add_unit_on_map(UnitKind::Soldier, Coord::new(0, 0), Nation::English);
        let b = state.add_unit_on_map(UnitKind::Soldier, Coord::new(0, 0), Nation::English);
        assert!(a < b);
        assert_eq!(state.units_at(Coord::new(0, 0)), vec![a, b]);
    }

    #[test]
    fn test_missing_entities_are_errors() {
        let state = GameState::new();
        assert!(matches!(state.unit(UnitId(9)), Err(CombatError::UnitNotFound(_))));
        assert!(matches!(state.player(Nation::French), Err(CombatError::PlayerNotFound(_))));
        assert!(matches!(state.tribe(Tribe::Inca), Err(CombatError::TribeNotFound(_))));
    }

    #[test]
    fn test_coord_for_unit_follows_container() {
        let mut state = GameState::new();
        let colony = state.add_colony(Coord::new(4, 4), Nation::English, "Jamestown");
        let worker = state.add_unit_in_colony(UnitKind::FreeColonist, colony).expect("colony exists");
        assert_eq!(state.coord_for_unit(worker).expect("on map"), Coord::new(4, 4));
        assert_eq!(state.unit(worker).expect("exists").nation, Nation::English);
        assert_eq!(state.workers_in_colony(colony), vec![worker]);
    }

    #[test]
    fn test_dwelling_queries() {
        let mut state = GameState::new();
        let d1 = state.add_dwelling(Coord::new(2, 1), Tribe::Arawak);
        let d2 = state.add_dwelling(Coord::new(2, 2), Tribe::Arawak);
        let brave = state
            .add_native_unit(NativeUnitType::Brave, Coord::new(0, 1), d1)
            .expect("dwelling exists");
        assert_eq!(state.dwellings_for_tribe(Tribe::Arawak), vec![d1, d2]);
        assert_eq!(state.braves_for_dwelling(d1), vec![brave]);
        assert!(state.braves_for_dwelling(d2).is_empty());
        assert_eq!(state.dwelling(d1).expect("exists").population, DEFAULT_DWELLING_POPULATION);
    }
}
