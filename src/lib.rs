//! Colonial Combat - combat resolution for a colonization strategy game
//!
//! The resolver decides every fight between European units, native braves,
//! native dwellings, colonies and ships from the game state plus an
//! injected random source; the apply step turns its results into state
//! changes and player messages.

pub mod combat;
pub mod core;
pub mod natives;
pub mod state;
pub mod units;
