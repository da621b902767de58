use crate::core::types::{ColonyId, Coord, DwellingId, Nation, UnitId};
use crate::units::{UnitKind, UnitType};

/// Where a European unit currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitLocation {
    Map(Coord),
    /// Working inside a colony
    Colony(ColonyId),
    /// Serving as a missionary inside a dwelling
    Dwelling(DwellingId),
    EuropeanHarbor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitOrders {
    #[default]
    None,
    Sentry,
    Fortified,
    /// Ship under repair
    Damaged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: UnitId,
    pub unit_type: UnitType,
    pub nation: Nation,
    pub location: UnitLocation,
    pub orders: UnitOrders,
    pub movement_points: i32,
    /// Worth of a treasure train; zero for every other unit
    pub gold: i32,
}

impl Unit {
    pub fn new(id: UnitId, unit_type: UnitType, nation: Nation, location: UnitLocation) -> Self {
        Self {
            id,
            unit_type,
            nation,
            location,
            orders: UnitOrders::None,
            movement_points: full_movement_points(unit_type.kind()),
            gold: 0,
        }
    }

    pub fn kind(&self) -> UnitKind {
        self.unit_type.kind()
    }

    pub fn is_fortified(&self) -> bool {
        self.orders == UnitOrders::Fortified
    }

    pub fn forfeit_movement_points(&mut self) {
        self.movement_points = 0;
    }
}

fn full_movement_points(kind: UnitKind) -> i32 {
    match kind.ship_stats() {
        Some(stats) => stats.movement,
        None if kind.carries_horses() => 4,
        None => 1,
    }
}
