//! European unit types
//!
//! A unit type is a pair of a *kind* (what the unit currently is, e.g. a
//! dragoon) and a *base* (the colonist underneath, e.g. an indentured
//! servant). Kinds that are not derived from a colonist have base == kind.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    // Colonists
    FreeColonist,
    IndenturedServant,
    PettyCriminal,
    NativeConvert,
    ExpertFarmer,
    ExpertFisherman,
    ExpertOreMiner,
    MasterCarpenter,
    FirebrandPreacher,
    ElderStatesman,
    VeteranColonist,
    SeasonedColonist,
    HardyColonist,
    JesuitColonist,

    // Kinds derived from a colonist base
    Soldier,
    Dragoon,
    VeteranSoldier,
    VeteranDragoon,
    ContinentalArmy,
    ContinentalCavalry,
    Scout,
    SeasonedScout,
    Pioneer,
    HardyPioneer,
    Missionary,
    JesuitMissionary,

    // Standalone land units
    Artillery,
    DamagedArtillery,
    Treasure,
    WagonTrain,

    // Ships
    Caravel,
    Merchantman,
    Galleon,
    Privateer,
    Frigate,
    ManOWar,
}

/// What happens to a unit of this kind when it loses a fight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitDeathAction {
    Destroy,
    Demote,
    Capture,
    CaptureAndDemote,
    Naval,
}

/// Naval statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipStats {
    pub movement: i32,
    pub attack: i32,
    pub combat: i32,
    pub guns: i32,
    pub hull: i32,
}

impl UnitKind {
    pub const ALL: [UnitKind; 36] = [
        UnitKind::FreeColonist,
        UnitKind::IndenturedServant,
        UnitKind::PettyCriminal,
        UnitKind::NativeConvert,
        UnitKind::ExpertFarmer,
        UnitKind::ExpertFisherman,
        UnitKind::ExpertOreMiner,
        UnitKind::MasterCarpenter,
        UnitKind::FirebrandPreacher,
        UnitKind::ElderStatesman,
        UnitKind::VeteranColonist,
        UnitKind::SeasonedColonist,
        UnitKind::HardyColonist,
        UnitKind::JesuitColonist,
        UnitKind::Soldier,
        UnitKind::Dragoon,
        UnitKind::VeteranSoldier,
        UnitKind::VeteranDragoon,
        UnitKind::ContinentalArmy,
        UnitKind::ContinentalCavalry,
        UnitKind::Scout,
        UnitKind::SeasonedScout,
        UnitKind::Pioneer,
        UnitKind::HardyPioneer,
        UnitKind::Missionary,
        UnitKind::JesuitMissionary,
        UnitKind::Artillery,
        UnitKind::DamagedArtillery,
        UnitKind::Treasure,
        UnitKind::WagonTrain,
        UnitKind::Caravel,
        UnitKind::Merchantman,
        UnitKind::Galleon,
        UnitKind::Privateer,
        UnitKind::Frigate,
        UnitKind::ManOWar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UnitKind::FreeColonist => "Free Colonist",
            UnitKind::IndenturedServant => "Indentured Servant",
            UnitKind::PettyCriminal => "Petty Criminal",
            UnitKind::NativeConvert => "Native Convert",
            UnitKind::ExpertFarmer => "Expert Farmer",
            UnitKind::ExpertFisherman => "Expert Fisherman",
            UnitKind::ExpertOreMiner => "Expert Ore Miner",
            UnitKind::MasterCarpenter => "Master Carpenter",
            UnitKind::FirebrandPreacher => "Firebrand Preacher",
            UnitKind::ElderStatesman => "Elder Statesman",
            UnitKind::VeteranColonist => "Veteran Colonist",
            UnitKind::SeasonedColonist => "Seasoned Colonist",
            UnitKind::HardyColonist => "Hardy Colonist",
            UnitKind::JesuitColonist => "Jesuit Colonist",
            UnitKind::Soldier => "Soldier",
            UnitKind::Dragoon => "Dragoon",
            UnitKind::VeteranSoldier => "Veteran Soldier",
            UnitKind::VeteranDragoon => "Veteran Dragoon",
            UnitKind::ContinentalArmy => "Continental Army",
            UnitKind::ContinentalCavalry => "Continental Cavalry",
            UnitKind::Scout => "Scout",
            UnitKind::SeasonedScout => "Seasoned Scout",
            UnitKind::Pioneer => "Pioneer",
            UnitKind::HardyPioneer => "Hardy Pioneer",
            UnitKind::Missionary => "Missionary",
            UnitKind::JesuitMissionary => "Jesuit Missionary",
            UnitKind::Artillery => "Artillery",
            UnitKind::DamagedArtillery => "Damaged Artillery",
            UnitKind::Treasure => "Treasure",
            UnitKind::WagonTrain => "Wagon Train",
            UnitKind::Caravel => "Caravel",
            UnitKind::Merchantman => "Merchantman",
            UnitKind::Galleon => "Galleon",
            UnitKind::Privateer => "Privateer",
            UnitKind::Frigate => "Frigate",
            UnitKind::ManOWar => "Man-O-War",
        }
    }

    /// A colonist that can work in a colony and underlie a derived kind
    pub fn is_colonist(&self) -> bool {
        matches!(
            self,
            UnitKind::FreeColonist
                | UnitKind::IndenturedServant
                | UnitKind::PettyCriminal
                | UnitKind::NativeConvert
                | UnitKind::ExpertFarmer
                | UnitKind::ExpertFisherman
                | UnitKind::ExpertOreMiner
                | UnitKind::MasterCarpenter
                | UnitKind::FirebrandPreacher
                | UnitKind::ElderStatesman
                | UnitKind::VeteranColonist
                | UnitKind::SeasonedColonist
                | UnitKind::HardyColonist
                | UnitKind::JesuitColonist
        )
    }

    /// Kinds that only exist on top of a colonist base
    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            UnitKind::Soldier
                | UnitKind::Dragoon
                | UnitKind::VeteranSoldier
                | UnitKind::VeteranDragoon
                | UnitKind::ContinentalArmy
                | UnitKind::ContinentalCavalry
                | UnitKind::Scout
                | UnitKind::SeasonedScout
                | UnitKind::Pioneer
                | UnitKind::HardyPioneer
                | UnitKind::Missionary
                | UnitKind::JesuitMissionary
        )
    }

    pub fn is_military(&self) -> bool {
        matches!(
            self,
            UnitKind::Soldier
                | UnitKind::Dragoon
                | UnitKind::VeteranSoldier
                | UnitKind::VeteranDragoon
                | UnitKind::ContinentalArmy
                | UnitKind::ContinentalCavalry
                | UnitKind::Artillery
                | UnitKind::DamagedArtillery
        )
    }

    pub fn is_ship(&self) -> bool {
        self.ship_stats().is_some()
    }

    pub fn is_artillery(&self) -> bool {
        matches!(self, UnitKind::Artillery | UnitKind::DamagedArtillery)
    }

    pub fn carries_muskets(&self) -> bool {
        matches!(
            self,
            UnitKind::Soldier
                | UnitKind::Dragoon
                | UnitKind::VeteranSoldier
                | UnitKind::VeteranDragoon
                | UnitKind::ContinentalArmy
                | UnitKind::ContinentalCavalry
        )
    }

    pub fn carries_horses(&self) -> bool {
        matches!(
            self,
            UnitKind::Dragoon
                | UnitKind::VeteranDragoon
                | UnitKind::ContinentalCavalry
                | UnitKind::Scout
                | UnitKind::SeasonedScout
        )
    }

    pub fn death_action(&self) -> UnitDeathAction {
        match self {
            UnitKind::Soldier
            | UnitKind::Dragoon
            | UnitKind::VeteranSoldier
            | UnitKind::VeteranDragoon
            | UnitKind::ContinentalArmy
            | UnitKind::ContinentalCavalry
            | UnitKind::Artillery => UnitDeathAction::Demote,
            UnitKind::DamagedArtillery
            | UnitKind::Scout
            | UnitKind::SeasonedScout
            | UnitKind::Missionary
            | UnitKind::JesuitMissionary
            | UnitKind::WagonTrain => UnitDeathAction::Destroy,
            UnitKind::VeteranColonist | UnitKind::Pioneer | UnitKind::HardyPioneer => {
                UnitDeathAction::CaptureAndDemote
            }
            UnitKind::Caravel
            | UnitKind::Merchantman
            | UnitKind::Galleon
            | UnitKind::Privateer
            | UnitKind::Frigate
            | UnitKind::ManOWar => UnitDeathAction::Naval,
            _ => UnitDeathAction::Capture,
        }
    }

    pub fn ship_stats(&self) -> Option<ShipStats> {
        let (movement, attack, combat, guns, hull) = match self {
            UnitKind::Caravel => (4, 0, 2, 0, 4),
            UnitKind::Merchantman => (5, 0, 6, 1, 8),
            UnitKind::Galleon => (6, 0, 10, 4, 20),
            UnitKind::Privateer => (8, 8, 8, 4, 12),
            UnitKind::Frigate => (6, 16, 16, 12, 32),
            UnitKind::ManOWar => (5, 24, 24, 32, 64),
            _ => return None,
        };
        Some(ShipStats { movement, attack, combat, guns, hull })
    }

    /// The colonist a derived kind sits on when none is specified
    fn default_base(&self) -> UnitKind {
        match self {
            UnitKind::Soldier
            | UnitKind::Dragoon
            | UnitKind::Scout
            | UnitKind::Pioneer
            | UnitKind::Missionary => UnitKind::FreeColonist,
            UnitKind::VeteranSoldier
            | UnitKind::VeteranDragoon
            | UnitKind::ContinentalArmy
            | UnitKind::ContinentalCavalry => UnitKind::VeteranColonist,
            UnitKind::SeasonedScout => UnitKind::SeasonedColonist,
            UnitKind::HardyPioneer => UnitKind::HardyColonist,
            UnitKind::JesuitMissionary => UnitKind::JesuitColonist,
            other => *other,
        }
    }

    /// Whether `base` may underlie this kind
    fn accepts_base(&self, base: UnitKind) -> bool {
        if !self.is_derived() {
            return base == *self;
        }
        let specialist = self.default_base();
        if specialist != UnitKind::FreeColonist {
            return base == specialist;
        }
        // Generic derived kinds take any colonist except the ones that
        // have a dedicated derived kind of their own.
        base.is_colonist()
            && !matches!(
                (self, base),
                (_, UnitKind::NativeConvert)
                    | (UnitKind::Soldier | UnitKind::Dragoon, UnitKind::VeteranColonist)
                    | (UnitKind::Scout, UnitKind::SeasonedColonist)
                    | (UnitKind::Pioneer, UnitKind::HardyColonist)
                    | (UnitKind::Missionary, UnitKind::JesuitColonist)
            )
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A unit kind together with the colonist underneath it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitType {
    kind: UnitKind,
    base: UnitKind,
}

impl UnitType {
    /// The kind on its default base
    pub fn new(kind: UnitKind) -> Self {
        Self { kind, base: kind.default_base() }
    }

    /// The kind on an explicit base; `None` when the pair is not valid
    pub fn with_base(kind: UnitKind, base: UnitKind) -> Option<Self> {
        kind.accepts_base(base).then_some(Self { kind, base })
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn base(&self) -> UnitKind {
        self.base
    }
}

impl From<UnitKind> for UnitType {
    fn from(kind: UnitKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == self.base || self.base == self.kind.default_base() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} ({})", self.kind, self.base)
        }
    }
}
