//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identifier of a European unit (land unit or ship)
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "unit#{}", _0)]
pub struct UnitId(pub u32);

/// Identifier of a native unit (brave)
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "native#{}", _0)]
pub struct NativeUnitId(pub u32);

#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "dwelling#{}", _0)]
pub struct DwellingId(pub u32);

#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "colony#{}", _0)]
pub struct ColonyId(pub u32);

/// Map square coordinate
#[derive(
    Debug, Display, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance; enough for nearest-of comparisons
    pub fn distance_squared(&self, other: &Self) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Chebyshev distance (rings of squares around a tile)
    pub fn concentric_square_distance(&self, other: &Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// European colonial powers
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nation {
    English,
    French,
    Spanish,
    Dutch,
}

/// Native tribes
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tribe {
    Apache,
    Sioux,
    Tupi,
    Arawak,
    Cherokee,
    Iroquois,
    Aztec,
    Inca,
}

impl Tribe {
    /// Cultural level; drives treasure yields
    pub fn level(&self) -> NativeLevel {
        match self {
            Tribe::Apache | Tribe::Sioux => NativeLevel::SemiNomadic,
            Tribe::Tupi | Tribe::Arawak | Tribe::Cherokee | Tribe::Iroquois => {
                NativeLevel::Agrarian
            }
            Tribe::Aztec => NativeLevel::Advanced,
            Tribe::Inca => NativeLevel::Civilized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeLevel {
    SemiNomadic,
    Agrarian,
    Advanced,
    Civilized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Discoverer,
    Explorer,
    Conquistador,
    Governor,
    Viceroy,
}

/// Founding fathers that the combat engine cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoundingFather {
    /// Every eligible combat winner is promoted
    GeorgeWashington,
    /// Every destroyed dwelling yields more treasure
    HernanCortes,
    /// Slows tribal alarm growth
    Pocahontas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevolutionStatus {
    #[default]
    NotDeclared,
    Declared,
    Won,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(UnitId(7).to_string(), "unit#7");
        assert_eq!(DwellingId(2).to_string(), "dwelling#2");
        assert_eq!(Coord::new(1, 3).to_string(), "(1, 3)");
    }

    #[test]
    fn test_id_ordering() {
        let mut ids = vec![UnitId(3), UnitId(1), UnitId(2)];
        ids.sort();
        assert_eq!(ids, vec![UnitId(1), UnitId(2), UnitId(3)]);
    }

    #[test]
    fn test_coord_distances() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, -4);
        assert_eq!(a.distance_squared(&b), 25);
        assert_eq!(a.concentric_square_distance(&b), 4);
    }

    #[test]
    fn test_tribe_levels() {
        assert_eq!(Tribe::Arawak.level(), NativeLevel::Agrarian);
        assert_eq!(Tribe::Sioux.level(), NativeLevel::SemiNomadic);
        assert_eq!(Tribe::Aztec.level(), NativeLevel::Advanced);
        assert_eq!(Tribe::Inca.level(), NativeLevel::Civilized);
    }

    #[test]
    fn test_revolution_status_ordering() {
        assert!(RevolutionStatus::Declared > RevolutionStatus::NotDeclared);
        assert!(RevolutionStatus::Won > RevolutionStatus::Declared);
    }
}
