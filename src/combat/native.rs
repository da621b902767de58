//! Outcome tables for native braves

use tracing::debug;

use crate::combat::euro::type_after;
use crate::combat::outcome::{EuroUnitCombatOutcome, NativeUnitCombatOutcome};
use crate::combat::rand::{clamp_probability, RandomSource};
use crate::core::config::CombatConfig;
use crate::units::{NativeUnitType, UnitType};

/// A brave that lost: the tribe may recover what it carried
///
/// Draws once for horses (if carried), then once for muskets (if carried).
pub fn destroyed_outcome(
    rand: &mut dyn RandomSource,
    conf: &CombatConfig,
    brave: NativeUnitType,
) -> NativeUnitCombatOutcome {
    let p = clamp_probability(conf.retention_probability);
    let tribe_retains_horses = brave.has_horses() && rand.bernoulli(p);
    let tribe_retains_muskets = brave.has_muskets() && rand.bernoulli(p);
    debug!(%brave, tribe_retains_horses, tribe_retains_muskets, "brave destroyed");
    NativeUnitCombatOutcome::Destroyed { tribe_retains_horses, tribe_retains_muskets }
}

/// A brave that beat a European unit takes the equipment the loser lost
///
/// No draws. Only equipment the brave does not already have counts.
pub fn victory_outcome(
    brave: NativeUnitType,
    loser: UnitType,
    loser_outcome: &EuroUnitCombatOutcome,
) -> NativeUnitCombatOutcome {
    let after = type_after(loser, loser_outcome);
    let kept_muskets = after.is_some_and(|t| t.kind().carries_muskets());
    let kept_horses = after.is_some_and(|t| t.kind().carries_horses());
    let gains_muskets = loser.kind().carries_muskets() && !kept_muskets && !brave.has_muskets();
    let gains_horses = loser.kind().carries_horses() && !kept_horses && !brave.has_horses();
    if !gains_muskets && !gains_horses {
        return NativeUnitCombatOutcome::NoChange;
    }
    let to = brave.equipped(gains_muskets, gains_horses);
    debug!(from = %brave, %to, gains_horses, "brave captures equipment");
    NativeUnitCombatOutcome::Promoted { to, tribe_gains_horse_herd: gains_horses }
}
