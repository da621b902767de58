//! Missions inside native dwellings

use tracing::info;

use crate::core::config::{CombatConfig, ConvertConfig};
use crate::core::error::Result;
use crate::core::types::{Nation, Tribe, UnitId};
use crate::state::{GameState, UnitLocation};
use crate::units::{UnitKind, UnitType};

/// Chance that beating a dwelling with this missionary inside yields a convert
pub fn probability_dwelling_produces_convert_on_attack(
    conf: &ConvertConfig,
    missionary: UnitType,
) -> f64 {
    match missionary.kind() {
        UnitKind::JesuitMissionary => conf.jesuit_missionary,
        _ => match missionary.base() {
            UnitKind::IndenturedServant => conf.indentured_servant,
            UnitKind::PettyCriminal => conf.petty_criminal,
            _ => conf.free_colonist,
        },
    }
}

/// Whether an attack on a dwelling risks the attacker's missions burning
///
/// Requires one of the attacker's own missionaries in the dwelling and
/// tribal alarm at or above the configured threshold.
pub fn should_burn_missions(conf: &CombatConfig, tribal_alarm: i32, has_own_missionary: bool) -> bool {
    has_own_missionary && tribal_alarm >= conf.burn_missions_min_alarm
}

pub fn is_missionary(kind: UnitKind) -> bool {
    matches!(kind, UnitKind::Missionary | UnitKind::JesuitMissionary)
}

/// Remove every missionary of `nation` from the tribe's dwellings
///
/// Returns the removed units in id order.
pub fn burn_missions(state: &mut GameState, tribe: Tribe, nation: Nation) -> Result<Vec<UnitId>> {
    let dwellings = state.dwellings_for_tribe(tribe);
    let burned: Vec<UnitId> = state
        .units_for_nation(nation)
        .into_iter()
        .filter(|id| match state.unit(*id).map(|u| u.location) {
            Ok(UnitLocation::Dwelling(d)) => dwellings.contains(&d),
            _ => false,
        })
        .collect();
    for id in &burned {
        state.remove_unit(*id)?;
    }
    info!(?tribe, ?nation, count = burned.len(), "missions burned");
    Ok(burned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Coord;

    #[test]
    fn test_convert_probabilities() {
        let conf = ConvertConfig::default();
        let p = |ut| probability_dwelling_produces_convert_on_attack(&conf, ut);
        assert_eq!(p(UnitType::new(UnitKind::JesuitMissionary)), 0.66);
        assert_eq!(p(UnitType::new(UnitKind::Missionary)), 0.33);
        let on = |base| UnitType::with_base(UnitKind::Missionary, base).expect("valid");
        assert_eq!(p(on(UnitKind::IndenturedServant)), 0.22);
        assert_eq!(p(on(UnitKind::PettyCriminal)), 0.11);
        assert_eq!(p(on(UnitKind::ExpertFarmer)), 0.33);
    }

    #[test]
    fn test_burn_threshold() {
        let conf = CombatConfig::default();
        assert!(!should_burn_missions(&conf, 84, true));
        assert!(should_burn_missions(&conf, 85, true));
        assert!(!should_burn_missions(&conf, 99, false));
    }

    #[test]
    fn test_burn_only_own_missions_of_the_tribe() {
        let mut state = GameState::new();
        let a = state.add_dwelling(Coord::new(1, 1), Tribe::Sioux);
        let b = state.add_dwelling(Coord::new(5, 5), Tribe::Sioux);
        let other = state.add_dwelling(Coord::new(9, 9), Tribe::Aztec);
        let m1 = state.add_missionary_in_dwelling(UnitKind::Missionary, a, Nation::English).expect("ok");
        let m2 = state.add_missionary_in_dwelling(UnitKind::Missionary, b, Nation::English).expect("ok");
        let foreign = state.add_missionary_in_dwelling(UnitKind::Missionary, b, Nation::French).expect("ok");
        let elsewhere =
            state.add_missionary_in_dwelling(UnitKind::Missionary, other, Nation::English).expect("ok");
        let burned = burn_missions(&mut state, Tribe::Sioux, Nation::English).expect("burns");
        assert_eq!(burned, vec![m1, m2]);
        assert!(state.unit_exists(foreign));
        assert!(state.unit_exists(elsewhere));
    }
}
