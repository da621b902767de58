use serde::{Deserialize, Serialize};
use std::fmt;

/// Native military unit types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeUnitType {
    Brave,
    ArmedBrave,
    MountedBrave,
    MountedWarrior,
}

impl NativeUnitType {
    pub const ALL: [NativeUnitType; 4] = [
        NativeUnitType::Brave,
        NativeUnitType::ArmedBrave,
        NativeUnitType::MountedBrave,
        NativeUnitType::MountedWarrior,
    ];

    pub fn has_muskets(&self) -> bool {
        matches!(self, NativeUnitType::ArmedBrave | NativeUnitType::MountedWarrior)
    }

    pub fn has_horses(&self) -> bool {
        matches!(self, NativeUnitType::MountedBrave | NativeUnitType::MountedWarrior)
    }

    /// The type carrying exactly the given equipment
    pub fn from_equipment(muskets: bool, horses: bool) -> Self {
        match (muskets, horses) {
            (false, false) => NativeUnitType::Brave,
            (true, false) => NativeUnitType::ArmedBrave,
            (false, true) => NativeUnitType::MountedBrave,
            (true, true) => NativeUnitType::MountedWarrior,
        }
    }

    /// This type with extra equipment added
    pub fn equipped(&self, muskets: bool, horses: bool) -> Self {
        Self::from_equipment(self.has_muskets() || muskets, self.has_horses() || horses)
    }

    pub fn name(&self) -> &'static str {
        match self {
            NativeUnitType::Brave => "Brave",
            NativeUnitType::ArmedBrave => "Armed Brave",
            NativeUnitType::MountedBrave => "Mounted Brave",
            NativeUnitType::MountedWarrior => "Mounted Warrior",
        }
    }

    pub fn plural_name(&self) -> &'static str {
        match self {
            NativeUnitType::Brave => "Braves",
            NativeUnitType::ArmedBrave => "Armed Braves",
            NativeUnitType::MountedBrave => "Mounted Braves",
            NativeUnitType::MountedWarrior => "Mounted Warriors",
        }
    }
}

impl fmt::Display for NativeUnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
