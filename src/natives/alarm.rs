//! Tribal alarm
//!
//! Alarm is a tribe's hostility toward one European nation, an integer in
//! `[0, 99]`. Dwellings add their own alarm on top of the tribe's.

use serde::Serialize;
use tracing::debug;

use crate::core::config::AlarmConfig;
use crate::core::types::{Coord, Difficulty, FoundingFather};
use crate::state::{Dwelling, Player, TribeRelationship, TribeState};

/// Alarm added by trespassing on a burial ground
pub const BURIAL_GROUND_TRESPASS_ALARM: f64 = 100.0;

const ALARM_CATEGORY_CHUNK: i32 = 17;
const REACTION_CHUNK: i32 = 20;

/// How a tribe feels about a nation, in increasing hostility
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmCategory {
    Happy,
    Content,
    Wary,
    Uneasy,
    Restless,
    Angry,
}

impl AlarmCategory {
    pub const ALL: [AlarmCategory; 6] = [
        AlarmCategory::Happy,
        AlarmCategory::Content,
        AlarmCategory::Wary,
        AlarmCategory::Uneasy,
        AlarmCategory::Restless,
        AlarmCategory::Angry,
    ];

    /// Lowest alarm that still falls in this category
    pub fn minimum_alarm(&self) -> i32 {
        *self as i32 * ALARM_CATEGORY_CHUNK
    }
}

/// What greets a unit entering a dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnterDwellingReaction {
    WaveHappily,
    WaveHappilyWithScalps,
    FrowningArchers,
    WaryWarriors,
    ScalpsAndWarDrums,
}

impl EnterDwellingReaction {
    fn from_effective_alarm(alarm: i32) -> Self {
        match alarm / REACTION_CHUNK {
            0 => EnterDwellingReaction::WaveHappily,
            1 => EnterDwellingReaction::WaveHappilyWithScalps,
            2 => EnterDwellingReaction::FrowningArchers,
            3 => EnterDwellingReaction::WaryWarriors,
            _ => EnterDwellingReaction::ScalpsAndWarDrums,
        }
    }
}

pub fn clamp_alarm(alarm: i32) -> i32 {
    alarm.clamp(0, 99)
}

fn clamp_round_alarm(alarm: f64) -> i32 {
    let floored = alarm.floor();
    if floored.is_nan() {
        return 0;
    }
    // Saturating cast keeps huge deltas inside i32 before clamping
    clamp_alarm(floored.round() as i32)
}

/// Apply a delta to a tribal alarm value
///
/// With Pocahontas only increases are scaled down.
pub fn increase_tribal_alarm(conf: &AlarmConfig, player: &Player, delta: f64, alarm: &mut i32) {
    let delta = if player.has_father(FoundingFather::Pocahontas) && delta >= 0.0 {
        delta * conf.increase_scale_after_pocahontas
    } else {
        delta
    };
    let before = *alarm;
    *alarm = clamp_round_alarm(*alarm as f64 + delta);
    debug!(nation = ?player.nation, delta, before, after = *alarm, "tribal alarm changed");
}

/// Like [`increase_tribal_alarm`], scaled up when the dwelling is a capital
pub fn increase_tribal_alarm_from_dwelling(
    conf: &AlarmConfig,
    player: &Player,
    dwelling: &Dwelling,
    delta: f64,
    alarm: &mut i32,
) {
    let delta = if dwelling.is_capital { delta * conf.scale_for_capital } else { delta };
    increase_tribal_alarm(conf, player, delta, alarm);
}

/// Combined tribe and dwelling alarm; zero until the tribe has met the nation
pub fn effective_dwelling_alarm(tribe: &TribeState, dwelling: &Dwelling, player: &Player) -> i32 {
    let relationship = tribe.relationship(player.nation);
    if !relationship.encountered {
        return 0;
    }
    let tribal = clamp_alarm(relationship.tribal_alarm) as f64 / 100.0;
    let local = clamp_alarm(dwelling.dwelling_only_alarm(player.nation)) as f64 / 100.0;
    let effective = ((1.0 - (1.0 - tribal) * (1.0 - local)) * 100.0).round() as i32;
    clamp_alarm(effective)
}

pub fn reaction_for_dwelling(
    tribe: &TribeState,
    dwelling: &Dwelling,
    player: &Player,
) -> EnterDwellingReaction {
    let relationship = tribe.relationship(player.nation);
    if !relationship.encountered {
        return EnterDwellingReaction::WaveHappily;
    }
    if relationship.at_war {
        return EnterDwellingReaction::ScalpsAndWarDrums;
    }
    EnterDwellingReaction::from_effective_alarm(effective_dwelling_alarm(tribe, dwelling, player))
}

/// Alarm raised by a colony or improvement taking a tile the tribe owns
///
/// The increase falls off with the ring distance from the owning dwelling,
/// the first ring counting as adjacent.
pub fn increase_tribal_alarm_from_land_grab(
    conf: &AlarmConfig,
    difficulty: Difficulty,
    player: &Player,
    dwelling: &Dwelling,
    relationship: &mut TribeRelationship,
    tile: Coord,
    prime_resource: bool,
) {
    let land_grab = &conf.land_grab;
    let mut delta = land_grab.tribal_increase_for(difficulty);
    if prime_resource {
        delta *= land_grab.prime_resource_scale;
    }
    let rings = (dwelling.coord.concentric_square_distance(&tile) - 1).max(0);
    delta *= land_grab.distance_factor.powi(rings);
    increase_tribal_alarm_from_dwelling(conf, player, dwelling, delta, &mut relationship.tribal_alarm);
}

pub fn increase_tribal_alarm_from_attacking_brave(
    conf: &AlarmConfig,
    player: &Player,
    dwelling: &Dwelling,
    relationship: &mut TribeRelationship,
) {
    increase_tribal_alarm_from_dwelling(
        conf,
        player,
        dwelling,
        conf.increase_from_attacking_brave,
        &mut relationship.tribal_alarm,
    );
}

pub fn increase_tribal_alarm_from_attacking_dwelling(
    conf: &AlarmConfig,
    player: &Player,
    dwelling: &Dwelling,
    relationship: &mut TribeRelationship,
) {
    increase_tribal_alarm_from_dwelling(
        conf,
        player,
        dwelling,
        conf.increase_from_attacking_dwelling,
        &mut relationship.tribal_alarm,
    );
}

pub fn increase_tribal_alarm_from_burial_ground_trespass(
    conf: &AlarmConfig,
    player: &Player,
    relationship: &mut TribeRelationship,
) {
    increase_tribal_alarm(conf, player, BURIAL_GROUND_TRESPASS_ALARM, &mut relationship.tribal_alarm);
}

pub fn max_tribal_alarm_after_pocahontas(conf: &AlarmConfig) -> i32 {
    conf.tribal_alarm_after_pocahontas
}

pub fn max_tribal_alarm_after_burning_capital(conf: &AlarmConfig) -> i32 {
    conf.tribal_alarm_after_burning_capital
}

pub fn tribe_alarm_category(tribal_alarm: i32) -> AlarmCategory {
    AlarmCategory::ALL
        .into_iter()
        .rev()
        .find(|c| tribal_alarm >= c.minimum_alarm())
        .unwrap_or(AlarmCategory::Happy)
}
