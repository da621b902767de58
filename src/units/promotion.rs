//! Promotion and demotion paths for European units

use crate::units::unit_type::{UnitDeathAction, UnitKind, UnitType};

/// The type a unit becomes when promoted for winning a battle
///
/// Only military units promote. A soldier or dragoon first works its base
/// up from criminal to servant to free colonist, then becomes a veteran;
/// veterans become continentals once independence has been declared.
pub fn promoted_by_combat(ut: UnitType, independence_declared: bool) -> Option<UnitType> {
    match ut.kind() {
        UnitKind::Soldier | UnitKind::Dragoon => match ut.base() {
            UnitKind::PettyCriminal => UnitType::with_base(ut.kind(), UnitKind::IndenturedServant),
            UnitKind::IndenturedServant => UnitType::with_base(ut.kind(), UnitKind::FreeColonist),
            UnitKind::FreeColonist => Some(UnitType::new(if ut.kind() == UnitKind::Soldier {
                UnitKind::VeteranSoldier
            } else {
                UnitKind::VeteranDragoon
            })),
            _ => None,
        },
        UnitKind::VeteranSoldier if independence_declared => {
            Some(UnitType::new(UnitKind::ContinentalArmy))
        }
        UnitKind::VeteranDragoon if independence_declared => {
            Some(UnitType::new(UnitKind::ContinentalCavalry))
        }
        _ => None,
    }
}

/// The type a unit is demoted to when it loses; `None` if it does not demote
pub fn on_death_demoted_type(ut: UnitType) -> Option<UnitType> {
    if ut.kind().death_action() != UnitDeathAction::Demote {
        return None;
    }
    match ut.kind() {
        UnitKind::Soldier => Some(UnitType::new(ut.base())),
        UnitKind::Dragoon => UnitType::with_base(UnitKind::Soldier, ut.base()),
        UnitKind::VeteranSoldier | UnitKind::ContinentalArmy => {
            Some(UnitType::new(UnitKind::VeteranColonist))
        }
        UnitKind::VeteranDragoon => Some(UnitType::new(UnitKind::VeteranSoldier)),
        UnitKind::ContinentalCavalry => Some(UnitType::new(UnitKind::ContinentalArmy)),
        UnitKind::Artillery => Some(UnitType::new(UnitKind::DamagedArtillery)),
        _ => None,
    }
}

/// The type a captured unit is demoted to; `None` if capture keeps the type
pub fn on_capture_demoted_type(ut: UnitType) -> Option<UnitType> {
    if ut.kind().death_action() != UnitDeathAction::CaptureAndDemote {
        return None;
    }
    match ut.kind() {
        UnitKind::VeteranColonist => Some(UnitType::new(UnitKind::FreeColonist)),
        UnitKind::Pioneer | UnitKind::HardyPioneer => Some(UnitType::new(ut.base())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soldier_on(base: UnitKind) -> UnitType {
        UnitType::with_base(UnitKind::Soldier, base).expect("valid soldier")
    }

    #[test]
    fn test_soldier_promotes_to_veteran() {
        let promoted = promoted_by_combat(UnitType::new(UnitKind::Soldier), false);
        assert_eq!(promoted, Some(UnitType::new(UnitKind::VeteranSoldier)));
    }

    #[test]
    fn test_servile_bases_move_up_one_step() {
        assert_eq!(
            promoted_by_combat(soldier_on(UnitKind::PettyCriminal), false),
            Some(soldier_on(UnitKind::IndenturedServant))
        );
        assert_eq!(
            promoted_by_combat(soldier_on(UnitKind::IndenturedServant), false),
            Some(soldier_on(UnitKind::FreeColonist))
        );
    }

    #[test]
    fn test_experts_do_not_promote() {
        assert_eq!(promoted_by_combat(soldier_on(UnitKind::ExpertFarmer), true), None);
    }

    #[test]
    fn test_continentals_need_independence() {
        let vet = UnitType::new(UnitKind::VeteranDragoon);
        assert_eq!(promoted_by_combat(vet, false), None);
        assert_eq!(
            promoted_by_combat(vet, true),
            Some(UnitType::new(UnitKind::ContinentalCavalry))
        );
        assert_eq!(promoted_by_combat(UnitType::new(UnitKind::ContinentalArmy), true), None);
    }

    #[test]
    fn test_non_military_never_promotes() {
        for kind in [UnitKind::FreeColonist, UnitKind::Scout, UnitKind::Artillery] {
            assert_eq!(promoted_by_combat(UnitType::new(kind), true), None);
        }
    }

    #[test]
    fn test_demotions() {
        assert_eq!(
            on_death_demoted_type(soldier_on(UnitKind::IndenturedServant)),
            Some(UnitType::new(UnitKind::IndenturedServant))
        );
        assert_eq!(
            on_death_demoted_type(UnitType::new(UnitKind::VeteranDragoon)),
            Some(UnitType::new(UnitKind::VeteranSoldier))
        );
        assert_eq!(
            on_death_demoted_type(UnitType::new(UnitKind::Artillery)),
            Some(UnitType::new(UnitKind::DamagedArtillery))
        );
        assert_eq!(on_death_demoted_type(UnitType::new(UnitKind::DamagedArtillery)), None);
        assert_eq!(on_death_demoted_type(UnitType::new(UnitKind::Scout)), None);
    }

    #[test]
    fn test_dragoon_keeps_base_when_demoted() {
        let dragoon = UnitType::with_base(UnitKind::Dragoon, UnitKind::PettyCriminal).expect("valid");
        assert_eq!(on_death_demoted_type(dragoon), Some(soldier_on(UnitKind::PettyCriminal)));
    }

    #[test]
    fn test_capture_demotions() {
        assert_eq!(
            on_capture_demoted_type(UnitType::new(UnitKind::VeteranColonist)),
            Some(UnitType::new(UnitKind::FreeColonist))
        );
        assert_eq!(
            on_capture_demoted_type(UnitType::new(UnitKind::HardyPioneer)),
            Some(UnitType::new(UnitKind::HardyColonist))
        );
        assert_eq!(on_capture_demoted_type(UnitType::new(UnitKind::FreeColonist)), None);
    }
}
