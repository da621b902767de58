//! Resolve-then-apply integration tests
//!
//! A combat is resolved against a snapshot of the state, then the result is
//! applied back to it. These check what the game state looks like
//! afterwards and what each player is told.

use colonial_combat::combat::{
    apply_combat, Combat, Interval, RealCombat, ScriptedRand,
};
use colonial_combat::core::types::{Coord, Nation, Tribe};
use colonial_combat::core::CombatConfig;
use colonial_combat::natives::burn_missions;
use colonial_combat::state::{ColonyBuilding, GameState, UnitLocation, UnitOrders};
use colonial_combat::units::{NativeUnitType, UnitKind, UnitType};

fn new_state() -> GameState {
    let mut state = GameState::new();
    state.add_player(Nation::English);
    state.add_player(Nation::French);
    state
}

#[test]
fn test_destroyed_dwelling_leaves_treasure_convert_and_missionary() {
    let conf = CombatConfig::default();
    let mut state = new_state();
    let at = Coord::new(2, 1);
    let dwelling = state.add_dwelling(at, Tribe::Arawak);
    state.dwelling_mut(dwelling).expect("dwelling").population = 1;
    let braves = [
        state.add_native_unit(NativeUnitType::MountedBrave, Coord::new(0, 1), dwelling).expect("dwelling"),
        state.add_native_unit(NativeUnitType::Brave, Coord::new(0, 2), dwelling).expect("dwelling"),
    ];
    let missionary = UnitType::with_base(UnitKind::Missionary, UnitKind::IndenturedServant).expect("valid");
    let missionary = state.add_missionary_in_dwelling(missionary, dwelling, Nation::English).expect("dwelling");
    let attacker = state.add_unit_on_map(UnitKind::Dragoon, Coord::new(1, 0), Nation::English);

    let mut rand = ScriptedRand::new();
    rand.expect_bernoulli(0.75, true)
        .expect_bernoulli(0.45, false)
        .expect_bernoulli(0.22, true)
        .expect_bernoulli(0.33, true)
        .expect_between_ints(300, 800, Interval::Closed, 345);
    let result = RealCombat::new(&state, &mut rand, &conf)
        .euro_attack_dwelling(attacker, dwelling)
        .expect("valid combat");
    assert!(rand.is_exhausted());

    apply_combat(&mut state, &conf, &result).expect("applies");

    assert!(!state.dwelling_exists(dwelling));
    assert!(!state.tribe_exists(Tribe::Arawak));
    assert!(braves.iter().all(|b| !state.native_unit_exists(*b)));
    assert_eq!(state.unit(missionary).expect("released").location, UnitLocation::Map(at));

    let on_site: Vec<_> = state
        .units_at(at)
        .into_iter()
        .filter(|id| *id != missionary)
        .map(|id| state.unit(id).expect("exists").clone())
        .collect();
    assert_eq!(on_site.len(), 2);
    assert!(on_site.iter().all(|u| u.nation == Nation::English));
    assert!(on_site.iter().any(|u| u.kind() == UnitKind::NativeConvert));
    let treasure = on_site.iter().find(|u| u.kind() == UnitKind::Treasure).expect("treasure");
    assert_eq!(treasure.gold, 300);
}

#[test]
fn test_burned_missions_take_every_mission_of_the_tribe() {
    let conf = CombatConfig::default();
    let mut state = new_state();
    let target = state.add_dwelling(Coord::new(2, 1), Tribe::Sioux);
    let other = state.add_dwelling(Coord::new(6, 6), Tribe::Sioux);
    state.dwelling_mut(target).expect("dwelling").population = 2;
    state
        .tribe_mut(Tribe::Sioux)
        .expect("tribe")
        .relationship_mut(Nation::English)
        .tribal_alarm = 95;
    let here = state.add_missionary_in_dwelling(UnitKind::Missionary, target, Nation::English).expect("dwelling");
    let there = state.add_missionary_in_dwelling(UnitKind::Missionary, other, Nation::English).expect("dwelling");
    let french = state.add_missionary_in_dwelling(UnitKind::Missionary, other, Nation::French).expect("dwelling");
    let attacker = state.add_unit_on_map(UnitKind::Soldier, Coord::new(1, 0), Nation::English);

    let mut rand = ScriptedRand::new();
    rand.expect_bernoulli(2.0 / 3.0, true).expect_bernoulli(0.45, false).expect_bernoulli(0.5, true);
    let result = RealCombat::new(&state, &mut rand, &conf)
        .euro_attack_dwelling(attacker, target)
        .expect("valid combat");
    assert!(result.missions_burned);

    apply_combat(&mut state, &conf, &result).expect("applies");

    assert!(!state.unit_exists(here));
    assert!(!state.unit_exists(there));
    assert!(state.unit_exists(french));
    assert_eq!(state.dwelling(target).expect("survives").population, 1);
    // Nothing left to burn
    assert!(burn_missions(&mut state, Tribe::Sioux, Nation::English).expect("tribe").is_empty());
}

#[test]
fn test_destroyed_warrior_returns_horses_and_muskets_to_tribe() {
    let conf = CombatConfig::default();
    let mut state = new_state();
    let dwelling = state.add_dwelling(Coord::new(5, 5), Tribe::Sioux);
    let attacker = state.add_unit_on_map(UnitKind::Soldier, Coord::new(1, 0), Nation::English);
    let mut breeding = Vec::new();
    for _ in 0..3 {
        let brave = state
            .add_native_unit(NativeUnitType::MountedWarrior, Coord::new(1, 1), dwelling)
            .expect("dwelling");
        let mut rand = ScriptedRand::new();
        rand.expect_bernoulli(0.4, true)
            .expect_bernoulli(0.45, false)
            .expect_bernoulli(0.5, true)
            .expect_bernoulli(0.5, true);
        let result = RealCombat::new(&state, &mut rand, &conf)
            .euro_attack_brave(attacker, brave)
            .expect("valid combat");
        assert!(rand.is_exhausted());

        apply_combat(&mut state, &conf, &result).expect("applies");
        assert!(!state.native_unit_exists(brave));
        breeding.push(state.tribe(Tribe::Sioux).expect("tribe").horse_breeding);
    }

    // Semi-nomadic tribe with one dwelling tops out at 56
    assert_eq!(breeding, vec![25, 50, 56]);
    let tribe = state.tribe(Tribe::Sioux).expect("tribe");
    assert_eq!(tribe.muskets, 3);
    assert_eq!(tribe.horse_herds, 0);
}

#[test]
fn test_brave_takes_horses_from_dragoon() {
    let conf = CombatConfig::default();
    let mut state = new_state();
    let dwelling = state.add_dwelling(Coord::new(5, 5), Tribe::Sioux);
    let dragoons = [
        state.add_unit_on_map(UnitKind::Dragoon, Coord::new(1, 0), Nation::English),
        state.add_unit_on_map(UnitKind::Dragoon, Coord::new(2, 0), Nation::English),
    ];

    for (herds, dragoon) in (1..).zip(dragoons) {
        let brave = state
            .add_native_unit(NativeUnitType::Brave, Coord::new(1, 1), dwelling)
            .expect("dwelling");
        let mut rand = ScriptedRand::new();
        rand.expect_bernoulli(0.25, true);
        let result = RealCombat::new(&state, &mut rand, &conf)
            .brave_attack_euro(brave, dragoon)
            .expect("valid combat");

        let messages = apply_combat(&mut state, &conf, &result).expect("applies");

        assert_eq!(state.native_unit(brave).expect("survives").unit_type, NativeUnitType::MountedBrave);
        assert_eq!(state.unit(dragoon).expect("survives").kind(), UnitKind::Soldier);
        let tribe = state.tribe(Tribe::Sioux).expect("tribe");
        assert_eq!(tribe.horse_herds, herds);
        assert_eq!(tribe.horse_breeding, 0);
        assert!(messages.attacker.for_both.iter().any(|m| m.contains("[horses]")));
    }
}

#[test]
fn test_captured_colony_changes_hands() {
    let conf = CombatConfig::default();
    let mut state = new_state();
    let colony = state.add_colony(Coord::new(1, 1), Nation::French, "Quebec");
    let worker = state.add_unit_in_colony(UnitKind::FreeColonist, colony).expect("colony");
    let wagon = state.add_unit_on_map(UnitKind::WagonTrain, Coord::new(1, 1), Nation::French);
    let attacker = state.add_unit_on_map(UnitKind::Soldier, Coord::new(1, 0), Nation::English);

    let mut rand = ScriptedRand::new();
    rand.expect_bernoulli(2.0 / 3.0, true).expect_bernoulli(0.45, true);
    let result = RealCombat::new(&state, &mut rand, &conf)
        .euro_attack_undefended_colony(attacker, worker, colony)
        .expect("valid combat");

    let messages = apply_combat(&mut state, &conf, &result).expect("applies");

    assert_eq!(state.colony(colony).expect("colony").nation, Nation::English);
    assert_eq!(state.unit(worker).expect("worker").nation, Nation::English);
    assert_eq!(state.unit(wagon).expect("wagon").nation, Nation::English);
    let attacker = state.unit(attacker).expect("attacker");
    assert_eq!(attacker.kind(), UnitKind::VeteranSoldier);
    assert_eq!(attacker.location, UnitLocation::Map(Coord::new(1, 1)));
    assert_eq!(messages.attacker.for_owner.len(), 1);
    assert!(messages.attacker.for_owner[0].contains("promoted"));
}

#[test]
fn test_raiders_burn_a_colony() {
    let conf = CombatConfig::default();
    let mut state = new_state();
    let colony = state.add_colony(Coord::new(1, 0), Nation::English, "Jamestown");
    state.add_colony(Coord::new(8, 8), Nation::English, "Plymouth");
    let worker = state.add_unit_in_colony(UnitKind::FreeColonist, colony).expect("colony");
    let dwelling = state.add_dwelling(Coord::new(1, 1), Tribe::Arawak);
    let brave = state
        .add_native_unit(NativeUnitType::ArmedBrave, Coord::new(0, 1), dwelling)
        .expect("dwelling");

    let mut rand = ScriptedRand::new();
    rand.expect_bernoulli(2.0 / 3.0, true).expect_bernoulli(0.5, true);
    let result = RealCombat::new(&state, &mut rand, &conf)
        .brave_attack_colony(brave, worker, colony)
        .expect("valid combat");
    assert!(result.colony_destroyed);
    assert!(rand.is_exhausted());

    let messages = apply_combat(&mut state, &conf, &result).expect("applies");

    assert!(state.colony(colony).is_err());
    assert!(!state.unit_exists(worker));
    assert!(!state.native_unit_exists(brave));
    assert_eq!(state.tribe(Tribe::Arawak).expect("tribe").muskets, conf.muskets_to_arm);
    let filtered = messages.mix().filter();
    assert_eq!(filtered.defender.len(), 1);
    assert!(filtered.defender[0].contains("Jamestown"));
    assert!(filtered.defender[0].contains("The King demands accountability!"));
}

#[test]
fn test_sea_battle_sinks_and_damages() {
    let conf = CombatConfig::default();
    let mut state = new_state();
    let drydock = state.add_colony(Coord::new(4, 4), Nation::French, "Montreal");
    state.colony_mut(drydock).expect("colony").buildings.insert(ColonyBuilding::Drydock);
    let attacker = state.add_unit_on_map(UnitKind::Frigate, Coord::new(0, 3), Nation::English);
    let defender = state.add_unit_on_map(UnitKind::Privateer, Coord::new(1, 3), Nation::French);
    let merchantman = state.add_unit_on_map(UnitKind::Merchantman, Coord::new(1, 3), Nation::French);

    let mut rand = ScriptedRand::new();
    rand.expect_bernoulli(0.72, false)
        .expect_bernoulli(2.0 / 3.0, true)
        .expect_bernoulli(0.5, true)
        .expect_bernoulli(0.6, false);
    let result = RealCombat::new(&state, &mut rand, &conf)
        .ship_attack_ship(attacker, defender)
        .expect("valid combat");

    let messages = apply_combat(&mut state, &conf, &result).expect("applies");

    assert!(!state.unit_exists(defender));
    assert_eq!(state.unit(attacker).expect("winner").location, UnitLocation::Map(Coord::new(1, 3)));
    let damaged = state.unit(merchantman).expect("survives");
    assert_eq!(damaged.location, UnitLocation::Map(Coord::new(4, 4)));
    assert_eq!(damaged.orders, UnitOrders::Damaged);
    assert_eq!(damaged.movement_points, 0);

    let mixed = messages.mix();
    assert_eq!(mixed.defender.len(), 2);
    assert!(mixed.defender[0].contains("sunk"));
    assert!(mixed.defender[1].contains("Montreal"));
    assert_eq!(mixed.attacker, mixed.defender);
}

#[test]
fn test_evaded_attack_changes_nothing() {
    let conf = CombatConfig::default();
    let mut state = new_state();
    let attacker = state.add_unit_on_map(UnitKind::Privateer, Coord::new(0, 3), Nation::English);
    let defender = state.add_unit_on_map(UnitKind::Caravel, Coord::new(1, 3), Nation::French);

    let mut rand = ScriptedRand::new();
    rand.expect_bernoulli(5.0 / 23.0, true);
    let result = RealCombat::new(&state, &mut rand, &conf)
        .ship_attack_ship(attacker, defender)
        .expect("valid combat");
    let before = state.clone();

    let messages = apply_combat(&mut state, &conf, &result).expect("applies");

    assert_eq!(state.unit(attacker).expect("exists"), before.unit(attacker).expect("exists"));
    assert_eq!(state.unit(defender).expect("exists"), before.unit(defender).expect("exists"));
    let filtered = messages.mix().filter();
    assert_eq!(filtered.attacker.len(), 1);
    assert!(filtered.attacker[0].contains("evades"));
}
