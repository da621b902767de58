use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{ColonyId, Coord, Nation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColonyBuilding {
    Stockade,
    Fort,
    Fortress,
    Drydock,
}

impl ColonyBuilding {
    pub fn name(&self) -> &'static str {
        match self {
            ColonyBuilding::Stockade => "Stockade",
            ColonyBuilding::Fort => "Fort",
            ColonyBuilding::Fortress => "Fortress",
            ColonyBuilding::Drydock => "Drydock",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Colony {
    pub id: ColonyId,
    pub nation: Nation,
    pub name: String,
    pub coord: Coord,
    pub buildings: AHashSet<ColonyBuilding>,
}

impl Colony {
    pub fn has_building(&self, building: ColonyBuilding) -> bool {
        self.buildings.contains(&building)
    }

    /// The strongest fortification present, if any
    pub fn fortification(&self) -> Option<ColonyBuilding> {
        [ColonyBuilding::Fortress, ColonyBuilding::Fort, ColonyBuilding::Stockade]
            .into_iter()
            .find(|b| self.has_building(*b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strongest_fortification_wins() {
        let mut colony = Colony {
            id: ColonyId(1),
            nation: Nation::Dutch,
            name: "Fort Orange".into(),
            coord: Coord::new(0, 0),
            buildings: AHashSet::new(),
        };
        assert_eq!(colony.fortification(), None);
        colony.buildings.insert(ColonyBuilding::Stockade);
        colony.buildings.insert(ColonyBuilding::Fort);
        colony.buildings.insert(ColonyBuilding::Drydock);
        assert_eq!(colony.fortification(), Some(ColonyBuilding::Fort));
    }
}
