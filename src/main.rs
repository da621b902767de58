//! Colonial Combat - Simulation CLI
//!
//! Runs a matchup many times with a seeded random source and prints how
//! often each side wins and which outcomes it gets.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use colonial_combat::combat::{Combat, CombatWinner, RealCombat, SeededRand};
use colonial_combat::core::config::CombatConfig;
use colonial_combat::core::error::{CombatError, Result};
use colonial_combat::core::types::{ColonyId, Coord, Nation, Tribe};
use colonial_combat::state::{ColonyBuilding, GameState, UnitOrders};
use colonial_combat::units::{NativeUnitType, UnitKind};

const ATTACKER_NATION: Nation = Nation::English;
const DEFENDER_NATION: Nation = Nation::French;
const TRIBE: Tribe = Tribe::Arawak;

/// One side of a matchup as named on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
enum Side {
    Euro(UnitKind),
    Native(NativeUnitType),
    Dwelling,
}

fn parse_side(s: &str) -> std::result::Result<Side, String> {
    if s == "dwelling" {
        return Ok(Side::Dwelling);
    }
    let value = serde_json::Value::String(s.to_string());
    if let Ok(kind) = serde_json::from_value::<UnitKind>(value.clone()) {
        return Ok(Side::Euro(kind));
    }
    if let Ok(native) = serde_json::from_value::<NativeUnitType>(value) {
        return Ok(Side::Native(native));
    }
    Err(format!("unknown unit kind '{s}' (e.g. soldier, frigate, mounted_brave, dwelling)"))
}

fn parse_walls(s: &str) -> std::result::Result<ColonyBuilding, String> {
    match s {
        "stockade" => Ok(ColonyBuilding::Stockade),
        "fort" => Ok(ColonyBuilding::Fort),
        "fortress" => Ok(ColonyBuilding::Fortress),
        _ => Err(format!("unknown fortification '{s}' (stockade, fort, fortress)")),
    }
}

/// Colonial Combat - run seeded combats and report statistics
#[derive(Parser, Debug)]
#[command(name = "colonial-combat")]
#[command(about = "Run a combat matchup many times and report outcome statistics")]
struct Args {
    /// Attacking unit kind (snake_case, e.g. veteran_soldier, privateer, armed_brave)
    #[arg(long, value_parser = parse_side)]
    attacker: Side,

    /// Defending unit kind, or `dwelling`
    #[arg(long, value_parser = parse_side)]
    defender: Side,

    /// Number of combats to resolve
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the default combat tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print statistics as JSON
    #[arg(long)]
    json: bool,

    /// The defender stands in a colony
    #[arg(long)]
    colony: bool,

    /// Colonies the defending player owns (with --colony)
    #[arg(long, default_value_t = 2)]
    colonies: u32,

    /// Colony fortification (with --colony)
    #[arg(long, value_parser = parse_walls)]
    walls: Option<ColonyBuilding>,

    /// The defender holds fortify orders
    #[arg(long)]
    fortified: bool,

    /// Tribal alarm toward the attacker (dwelling attacks)
    #[arg(long, default_value_t = 0)]
    alarm: i32,

    /// The attacker has a missionary in the dwelling
    #[arg(long)]
    missionary: bool,

    /// Dwelling population
    #[arg(long, default_value_t = 3)]
    population: i32,

    /// The dwelling is the tribe's capital
    #[arg(long)]
    capital: bool,
}

#[derive(Debug, Default, Serialize)]
struct Stats {
    trials: u32,
    seed: u64,
    attacker_wins: u32,
    defender_wins: u32,
    evasions: u32,
    attacker_outcomes: BTreeMap<String, u32>,
    defender_outcomes: BTreeMap<String, u32>,
    events: BTreeMap<String, u32>,
}

/// The variant name of a serialized outcome
fn outcome_key<T: Serialize>(outcome: &T) -> String {
    match serde_json::to_value(outcome) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => match map.get("type") {
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => map.keys().next().cloned().unwrap_or_default(),
        },
        _ => "unknown".to_string(),
    }
}

impl Stats {
    fn record<A: Serialize, D: Serialize>(
        &mut self,
        winner: Option<CombatWinner>,
        attacker: &A,
        defender: &D,
    ) {
        self.trials += 1;
        match winner {
            Some(CombatWinner::Attacker) => self.attacker_wins += 1,
            Some(CombatWinner::Defender) => self.defender_wins += 1,
            None => self.evasions += 1,
        }
        *self.attacker_outcomes.entry(outcome_key(attacker)).or_default() += 1;
        *self.defender_outcomes.entry(outcome_key(defender)).or_default() += 1;
    }

    fn event(&mut self, name: &str, count: u32) {
        if count > 0 {
            *self.events.entry(name.to_string()).or_default() += count;
        }
    }

    fn print_text(&self, args: &Args) {
        let pct = |n: u32| 100.0 * n as f64 / self.trials.max(1) as f64;
        println!("\n=== {:?} attacks {:?} ===", args.attacker, args.defender);
        println!("trials: {}  seed: {}", self.trials, self.seed);
        println!("attacker wins: {:>6} ({:.1}%)", self.attacker_wins, pct(self.attacker_wins));
        println!("defender wins: {:>6} ({:.1}%)", self.defender_wins, pct(self.defender_wins));
        if self.evasions > 0 {
            println!("evasions:      {:>6} ({:.1}%)", self.evasions, pct(self.evasions));
        }
        for (title, table) in [
            ("attacker outcomes", &self.attacker_outcomes),
            ("defender outcomes", &self.defender_outcomes),
            ("events", &self.events),
        ] {
            if table.is_empty() {
                continue;
            }
            println!("{title}:");
            for (name, n) in table {
                println!("  {:<24} {:>6} ({:.1}%)", name, n, pct(*n));
            }
        }
    }
}

/// Fresh state for one trial; returns the defender's colony when it has one
fn build_state(args: &Args) -> Result<(GameState, Option<ColonyId>)> {
    let mut state = GameState::new();
    state.add_player(ATTACKER_NATION);
    state.add_player(DEFENDER_NATION);
    if !args.colony {
        return Ok((state, None));
    }
    let home = state.add_colony(Coord::new(5, 5), DEFENDER_NATION, "Home");
    if let Some(walls) = args.walls {
        state.colony_mut(home)?.buildings.insert(walls);
    }
    for n in 1..args.colonies {
        state.add_colony(Coord::new(5 + 4 * n as i32, 5), DEFENDER_NATION, format!("Colony {n}"));
    }
    Ok((state, Some(home)))
}

fn run_trial(args: &Args, conf: &CombatConfig, rand: &mut SeededRand, stats: &mut Stats) -> Result<()> {
    let (mut state, colony) = build_state(args)?;
    let defender_at = Coord::new(5, 5);
    let attacker_at = Coord::new(5, 6);

    let add_defender = |state: &mut GameState, kind: UnitKind| -> Result<_> {
        let id = match colony {
            Some(colony) if !kind.is_military() => state.add_unit_in_colony(kind, colony)?,
            _ => state.add_unit_on_map(kind, defender_at, DEFENDER_NATION),
        };
        if args.fortified {
            state.unit_mut(id)?.orders = UnitOrders::Fortified;
        }
        Ok(id)
    };

    match (args.attacker, args.defender) {
        (Side::Euro(a), Side::Euro(d)) if a.is_ship() && d.is_ship() => {
            let attacker = state.add_unit_on_map(a, attacker_at, ATTACKER_NATION);
            let defender = state.add_unit_on_map(d, defender_at, DEFENDER_NATION);
            let result = RealCombat::new(&state, rand, conf).ship_attack_ship(attacker, defender)?;
            stats.record(result.winner, &result.attacker.outcome, &result.defender.outcome);
            stats.event("affected_ships", result.affected_defender_units.len() as u32);
        }
        (Side::Euro(a), Side::Euro(d)) => {
            let attacker = state.add_unit_on_map(a, attacker_at, ATTACKER_NATION);
            let defender = add_defender(&mut state, d)?;
            match colony {
                Some(colony) if !d.is_military() => {
                    let result = RealCombat::new(&state, rand, conf)
                        .euro_attack_undefended_colony(attacker, defender, colony)?;
                    stats.record(Some(result.winner), &result.attacker.outcome, &result.defender.outcome);
                }
                _ => {
                    let result =
                        RealCombat::new(&state, rand, conf).euro_attack_euro(attacker, defender)?;
                    stats.record(Some(result.winner), &result.attacker.outcome, &result.defender.outcome);
                }
            }
        }
        (Side::Euro(a), Side::Native(d)) => {
            let dwelling = state.add_dwelling(Coord::new(1, 1), TRIBE);
            let attacker = state.add_unit_on_map(a, attacker_at, ATTACKER_NATION);
            let brave = state.add_native_unit(d, defender_at, dwelling)?;
            let result = RealCombat::new(&state, rand, conf).euro_attack_brave(attacker, brave)?;
            stats.record(Some(result.winner), &result.attacker.outcome, &result.defender.outcome);
        }
        (Side::Native(a), Side::Euro(d)) => {
            let dwelling = state.add_dwelling(Coord::new(1, 1), TRIBE);
            let brave = state.add_native_unit(a, attacker_at, dwelling)?;
            let defender = add_defender(&mut state, d)?;
            match colony {
                Some(colony) => {
                    let result = RealCombat::new(&state, rand, conf)
                        .brave_attack_colony(brave, defender, colony)?;
                    stats.record(Some(result.winner), &result.attacker.outcome, &result.defender.outcome);
                    stats.event("colony_destroyed", result.colony_destroyed as u32);
                }
                None => {
                    let result = RealCombat::new(&state, rand, conf).brave_attack_euro(brave, defender)?;
                    stats.record(Some(result.winner), &result.attacker.outcome, &result.defender.outcome);
                }
            }
        }
        (Side::Euro(a), Side::Dwelling) => {
            let dwelling = state.add_dwelling(defender_at, TRIBE);
            {
                let d = state.dwelling_mut(dwelling)?;
                d.population = args.population;
                d.is_capital = args.capital;
            }
            state.tribe_mut(TRIBE)?.relationship_mut(ATTACKER_NATION).tribal_alarm = args.alarm;
            if args.missionary {
                state.add_missionary_in_dwelling(UnitKind::Missionary, dwelling, ATTACKER_NATION)?;
            }
            let attacker = state.add_unit_on_map(a, attacker_at, ATTACKER_NATION);
            let result = RealCombat::new(&state, rand, conf).euro_attack_dwelling(attacker, dwelling)?;
            stats.record(Some(result.winner), &result.attacker.outcome, &result.defender.outcome);
            stats.event("missions_burned", result.missions_burned as u32);
        }
        (attacker, defender) => {
            return Err(CombatError::invalid(
                format!("{attacker:?} vs {defender:?}"),
                "no combat exists for this matchup",
            ));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let conf = match &args.config {
        Some(path) => CombatConfig::load_from_toml(path)?,
        None => CombatConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, trials = args.trials, "running combats");

    let mut rand = SeededRand::new(seed);
    let mut stats = Stats { seed, ..Default::default() };
    for _ in 0..args.trials {
        run_trial(&args, &conf, &mut rand, &mut stats)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        stats.print_text(&args);
    }
    Ok(())
}
