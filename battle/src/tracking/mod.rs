//! Battle state tracking from server messages

mod battle;
mod updater;

pub use battle::{KickingInactive, PokemonRef, Rated, TrackedBattle, TrackerConfig};
