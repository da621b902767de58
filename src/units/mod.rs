//! Unit catalogue: European and native unit types and their attributes

pub mod native_unit;
pub mod promotion;
pub mod unit_type;

pub use native_unit::NativeUnitType;
pub use promotion::{on_capture_demoted_type, on_death_demoted_type, promoted_by_combat};
pub use unit_type::{ShipStats, UnitDeathAction, UnitKind, UnitType};
