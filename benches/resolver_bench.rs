//! Resolver throughput: combats resolved per second
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use colonial_combat::combat::{Combat, RealCombat, SeededRand};
use colonial_combat::core::config::CombatConfig;
use colonial_combat::core::types::{Coord, Nation, Tribe};
use colonial_combat::state::GameState;
use colonial_combat::units::{NativeUnitType, UnitKind};

fn bench_resolver(c: &mut Criterion) {
    let conf = CombatConfig::default();
    let mut state = GameState::new();
    state.add_player(Nation::English);
    state.add_player(Nation::French);
    let soldier = state.add_unit_on_map(UnitKind::VeteranSoldier, Coord::new(1, 1), Nation::English);
    let colonist = state.add_unit_on_map(UnitKind::FreeColonist, Coord::new(1, 2), Nation::French);
    let frigate = state.add_unit_on_map(UnitKind::Frigate, Coord::new(8, 8), Nation::English);
    let privateer = state.add_unit_on_map(UnitKind::Privateer, Coord::new(8, 9), Nation::French);
    state.add_unit_on_map(UnitKind::Merchantman, Coord::new(8, 9), Nation::French);
    let dwelling = state.add_dwelling(Coord::new(4, 4), Tribe::Inca);
    state.dwelling_mut(dwelling).expect("just added").population = 1;
    let brave = state
        .add_native_unit(NativeUnitType::MountedWarrior, Coord::new(4, 5), dwelling)
        .expect("dwelling exists");

    let mut group = c.benchmark_group("resolver");
    group.throughput(Throughput::Elements(1));
    let mut rand = SeededRand::new(7);

    group.bench_function("euro_attack_euro", |b| {
        b.iter(|| {
            let mut combat = RealCombat::new(&state, &mut rand, &conf);
            black_box(combat.euro_attack_euro(soldier, colonist))
        })
    });
    group.bench_function("euro_attack_brave", |b| {
        b.iter(|| {
            let mut combat = RealCombat::new(&state, &mut rand, &conf);
            black_box(combat.euro_attack_brave(soldier, brave))
        })
    });
    group.bench_function("euro_attack_dwelling", |b| {
        b.iter(|| {
            let mut combat = RealCombat::new(&state, &mut rand, &conf);
            black_box(combat.euro_attack_dwelling(soldier, dwelling))
        })
    });
    group.bench_function("ship_attack_ship", |b| {
        b.iter(|| {
            let mut combat = RealCombat::new(&state, &mut rand, &conf);
            black_box(combat.ship_attack_ship(frigate, privateer))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_resolver);
criterion_main!(benches);
