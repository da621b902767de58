//! Native-side calculators that combat consults or triggers

pub mod alarm;
pub mod armament;
pub mod missions;
pub mod treasure;

pub use alarm::{
    effective_dwelling_alarm, increase_tribal_alarm, reaction_for_dwelling, tribe_alarm_category,
    AlarmCategory, EnterDwellingReaction,
};
pub use armament::{equip_brave_on_dwelling, select_equipment, EquipmentChoice};
pub use missions::{
    burn_missions, probability_dwelling_produces_convert_on_attack, should_burn_missions,
};
pub use treasure::{
    apply_treasure_reimbursement, treasure_enter_colony, treasure_from_dwelling,
    treasure_in_harbor_receipt, TreasureReceipt, TreasureTransportMode,
};
