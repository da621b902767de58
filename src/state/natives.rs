use ahash::AHashMap;

use crate::core::types::{Coord, DwellingId, Nation, NativeUnitId, Tribe};
use crate::units::NativeUnitType;

#[derive(Debug, Clone, PartialEq)]
pub struct NativeUnit {
    pub id: NativeUnitId,
    pub unit_type: NativeUnitType,
    /// Dwelling the brave belongs to
    pub dwelling_id: DwellingId,
    pub coord: Coord,
    pub movement_points: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dwelling {
    pub id: DwellingId,
    pub tribe: Tribe,
    pub coord: Coord,
    pub population: i32,
    pub is_capital: bool,
    /// Alarm toward each nation on top of the tribe-wide alarm
    pub dwelling_only_alarm: AHashMap<Nation, i32>,
}

impl Dwelling {
    pub fn dwelling_only_alarm(&self, nation: Nation) -> i32 {
        self.dwelling_only_alarm.get(&nation).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TribeRelationship {
    pub encountered: bool,
    pub at_war: bool,
    /// Hostility toward a nation, always within [0, 99]
    pub tribal_alarm: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TribeState {
    pub tribe: Tribe,
    pub muskets: i32,
    pub horse_herds: i32,
    pub horse_breeding: i32,
    pub relationship: AHashMap<Nation, TribeRelationship>,
}

impl TribeState {
    pub fn new(tribe: Tribe) -> Self {
        Self {
            tribe,
            muskets: 0,
            horse_herds: 0,
            horse_breeding: 0,
            relationship: AHashMap::new(),
        }
    }

    pub fn relationship(&self, nation: Nation) -> TribeRelationship {
        self.relationship.get(&nation).copied().unwrap_or_default()
    }

    pub fn relationship_mut(&mut self, nation: Nation) -> &mut TribeRelationship {
        self.relationship.entry(nation).or_default()
    }
}
