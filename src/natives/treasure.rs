//! Treasure from destroyed dwellings and its reimbursement

use serde::Serialize;
use tracing::{debug, info};

use crate::combat::rand::{clamp_probability, Interval, RandomSource};
use crate::core::config::TreasureConfig;
use crate::core::error::{CombatError, Result};
use crate::core::types::{FoundingFather, UnitId};
use crate::state::{Dwelling, GameState, Player};
use crate::units::UnitKind;

/// Gold found in a dwelling that was just destroyed, if any
///
/// A capital or Cortes guarantees treasure; otherwise one draw decides.
/// The amount is a closed-range draw, scaled for a capital and for Cortes,
/// then rounded down to the level's multiple.
pub fn treasure_from_dwelling(
    rand: &mut dyn RandomSource,
    conf: &TreasureConfig,
    player: &Player,
    dwelling: &Dwelling,
) -> Option<i32> {
    let level = dwelling.tribe.level();
    let yield_conf = conf.yield_for(level);
    let has_cortes = player.has_father(FoundingFather::HernanCortes);
    let capital = dwelling.is_capital;

    let should_get =
        capital || has_cortes || rand.bernoulli(clamp_probability(yield_conf.probability));
    if !should_get {
        debug!(dwelling = %dwelling.id, "no treasure");
        return None;
    }

    let mut amount = rand.between_ints(yield_conf.min, yield_conf.max, Interval::Closed) as f64;
    if capital {
        amount *= conf.capital_amount_scale;
    }
    if has_cortes {
        amount *= conf.cortes_amount_scale;
    }
    let amount = round_down_to_multiple(amount, yield_conf.multiple);
    debug!(dwelling = %dwelling.id, capital, has_cortes, amount, "treasure found");
    Some(amount)
}

fn round_down_to_multiple(amount: f64, multiple: i32) -> i32 {
    let multiple = multiple.max(1);
    (amount.floor() as i32 / multiple) * multiple
}

/// Who carries a treasure to Europe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TreasureTransportMode {
    /// The player's own galleon brought it to the harbor
    Player,
    KingWithCharge,
    KingNoExtraCharge,
    /// Sold off after independence, tax free
    TravelingMerchants,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreasureReceipt {
    pub treasure_id: UnitId,
    pub transport_mode: TreasureTransportMode,
    pub original_worth: i32,
    pub kings_cut_percent: i32,
    pub net_received: i32,
}

impl TreasureReceipt {
    fn new(
        treasure_id: UnitId,
        transport_mode: TreasureTransportMode,
        worth: i32,
        cut_percent: i32,
    ) -> Self {
        let cut = (worth as f64 * (cut_percent as f64 / 100.0)) as i32;
        Self {
            treasure_id,
            transport_mode,
            original_worth: worth,
            kings_cut_percent: cut_percent,
            net_received: (worth - cut).max(0),
        }
    }
}

fn treasure_worth(state: &GameState, treasure_id: UnitId) -> Result<i32> {
    let unit = state.unit(treasure_id)?;
    if unit.kind() != UnitKind::Treasure {
        return Err(CombatError::invalid(treasure_id, "unit is not a treasure train"));
    }
    Ok(unit.gold)
}

/// Receipt for a treasure the player shipped to the harbor; the cut is the tax rate
pub fn treasure_in_harbor_receipt(
    state: &GameState,
    player: &Player,
    treasure_id: UnitId,
) -> Result<TreasureReceipt> {
    let worth = treasure_worth(state, treasure_id)?;
    Ok(TreasureReceipt::new(treasure_id, TreasureTransportMode::Player, worth, player.tax_rate))
}

/// The transport offer made when a treasure enters a colony
///
/// `None` when no offer is made: the player has galleons of their own and
/// no Cortes to waive the fee.
pub fn treasure_enter_colony(
    state: &GameState,
    conf: &TreasureConfig,
    player: &Player,
    treasure_id: UnitId,
) -> Result<Option<TreasureReceipt>> {
    let worth = treasure_worth(state, treasure_id)?;
    if player.independence_declared() {
        return Ok(Some(TreasureReceipt::new(
            treasure_id,
            TreasureTransportMode::TravelingMerchants,
            worth,
            0,
        )));
    }

    let has_galleons = state
        .units_for_nation(player.nation)
        .into_iter()
        .filter_map(|id| state.unit(id).ok())
        .any(|u| u.kind() == UnitKind::Galleon);
    let has_cortes = player.has_father(FoundingFather::HernanCortes);
    if has_galleons && !has_cortes {
        return Ok(None);
    }

    let receipt = if has_cortes {
        TreasureReceipt::new(
            treasure_id,
            TreasureTransportMode::KingNoExtraCharge,
            worth,
            player.tax_rate,
        )
    } else {
        let cut = (player.tax_rate * conf.king_transport_tax_multiplier)
            .clamp(conf.king_transport_cut_min, conf.king_transport_cut_max);
        TreasureReceipt::new(treasure_id, TreasureTransportMode::KingWithCharge, worth, cut)
    };
    Ok(Some(receipt))
}

/// Pay out a receipt and remove the treasure train
pub fn apply_treasure_reimbursement(state: &mut GameState, receipt: &TreasureReceipt) -> Result<()> {
    let nation = state.unit(receipt.treasure_id)?.nation;
    state.remove_unit(receipt.treasure_id)?;
    let player = state.player_mut(nation)?;
    player.money += receipt.net_received;
    player.total_after_tax_revenue += receipt.net_received;
    player.royal_money += (receipt.original_worth - receipt.net_received).max(0);
    info!(
        ?nation,
        worth = receipt.original_worth,
        net = receipt.net_received,
        mode = ?receipt.transport_mode,
        "treasure reimbursed"
    );
    Ok(())
}

/// Player-facing text for a receipt
pub fn treasure_receipt_message(receipt: &TreasureReceipt) -> String {
    match receipt.transport_mode {
        TreasureTransportMode::Player => format!(
            "Treasure worth {} reimbursed yielding [{}] after {}% taxes witheld.",
            receipt.original_worth, receipt.net_received, receipt.kings_cut_percent
        ),
        TreasureTransportMode::KingWithCharge => format!(
            "Treasure worth {} arrives! The crown has provided a reimbursement of [{}] after a [{}%] witholding.",
            receipt.original_worth, receipt.net_received, receipt.kings_cut_percent
        ),
        TreasureTransportMode::KingNoExtraCharge => format!(
            "Treasure worth {} arrives! The crown has provided a reimbursement of [{}] after a [{}%] tax witholding.",
            receipt.original_worth, receipt.net_received, receipt.kings_cut_percent
        ),
        TreasureTransportMode::TravelingMerchants => format!(
            "Treasure sold to traveling merchants for [{}].",
            receipt.original_worth
        ),
    }
}
