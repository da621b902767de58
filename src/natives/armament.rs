//! Equipping braves from tribal stock
//!
//! A brave standing on its own dwelling picks up horses and muskets the
//! tribe has stockpiled, including whatever the tribe recovered from braves
//! destroyed in combat. Purely deterministic.

use tracing::debug;

use crate::core::config::CombatConfig;
use crate::core::error::Result;
use crate::core::types::NativeUnitId;
use crate::state::{GameState, TribeState};
use crate::units::NativeUnitType;

/// The equipment a brave would take, without spending anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EquipmentChoice {
    pub horses: bool,
    pub muskets: bool,
}

pub fn select_equipment(
    conf: &CombatConfig,
    tribe: &TribeState,
    brave: NativeUnitType,
) -> EquipmentChoice {
    EquipmentChoice {
        horses: !brave.has_horses() && tribe.horse_breeding >= conf.horse_breeding_to_mount,
        muskets: !brave.has_muskets() && tribe.muskets >= conf.muskets_to_arm,
    }
}

/// Equip a brave sitting on its dwelling, spending tribal stock
///
/// Returns the brave's new type when it changed.
pub fn equip_brave_on_dwelling(
    state: &mut GameState,
    conf: &CombatConfig,
    brave_id: NativeUnitId,
) -> Result<Option<NativeUnitType>> {
    let brave = state.native_unit(brave_id)?.clone();
    let dwelling = state.dwelling(brave.dwelling_id)?;
    if dwelling.coord != brave.coord {
        return Ok(None);
    }
    let tribe_kind = dwelling.tribe;
    let tribe = state.tribe_mut(tribe_kind)?;
    let choice = select_equipment(conf, tribe, brave.unit_type);
    if !choice.horses && !choice.muskets {
        return Ok(None);
    }
    if choice.horses {
        tribe.horse_breeding -= conf.horse_breeding_to_mount;
    }
    if choice.muskets {
        tribe.muskets -= conf.muskets_to_arm;
    }
    let to = brave.unit_type.equipped(choice.muskets, choice.horses);
    state.native_unit_mut(brave_id)?.unit_type = to;
    debug!(brave = %brave_id, from = %brave.unit_type, %to, "brave equipped");
    Ok(Some(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Coord, Tribe};

    #[test]
    fn test_breeding_threshold() {
        let conf = CombatConfig::default();
        let mut tribe = TribeState::new(Tribe::Sioux);
        tribe.horse_breeding = 24;
        assert!(!select_equipment(&conf, &tribe, NativeUnitType::Brave).horses);
        tribe.horse_breeding = 25;
        assert!(select_equipment(&conf, &tribe, NativeUnitType::Brave).horses);
        assert!(!select_equipment(&conf, &tribe, NativeUnitType::MountedBrave).horses);
    }

    #[test]
    fn test_equip_spends_stock() {
        let conf = CombatConfig::default();
        let mut state = GameState::new();
        let at = Coord::new(3, 3);
        let dwelling = state.add_dwelling(at, Tribe::Sioux);
        let brave = state.add_native_unit(NativeUnitType::Brave, at, dwelling).expect("dwelling");
        {
            let tribe = state.tribe_mut(Tribe::Sioux).expect("tribe");
            tribe.horse_breeding = 30;
            tribe.muskets = 2;
        }
        let to = equip_brave_on_dwelling(&mut state, &conf, brave).expect("exists");
        assert_eq!(to, Some(NativeUnitType::MountedWarrior));
        let tribe = state.tribe(Tribe::Sioux).expect("tribe");
        assert_eq!((tribe.horse_breeding, tribe.muskets), (5, 1));
        // Fully equipped: nothing more to take
        assert_eq!(equip_brave_on_dwelling(&mut state, &conf, brave).expect("exists"), None);
    }

    #[test]
    fn test_away_from_dwelling_is_not_equipped() {
        let conf = CombatConfig::default();
        let mut state = GameState::new();
        let dwelling = state.add_dwelling(Coord::new(3, 3), Tribe::Sioux);
        let brave = state
            .add_native_unit(NativeUnitType::Brave, Coord::new(4, 3), dwelling)
            .expect("dwelling");
        state.tribe_mut(Tribe::Sioux).expect("tribe").muskets = 5;
        assert_eq!(equip_brave_on_dwelling(&mut state, &conf, brave).expect("exists"), None);
    }
}
