//! Battle state tracking for the Pokemon Showdown protocol.
//!
//! This crate folds the decoded lines of one battle room into a model of the
//! battle as seen by a client: sides, rosters, active slots, HP, status,
//! boosts, volatiles and field conditions.
//!
//! # Overview
//!
//! ```text
//! showdown-protocol (lines -> ServerMessage + KeywordArgs)
//!        │
//!        ▼
//! showdown-battle (TrackedBattle::update) ← THIS CRATE
//! ```
//!
//! # Main Types
//!
//! ## State Tracking
//! - [`TrackedBattle`] - Main entry point, updated one message at a time
//! - [`TrackerConfig`] - Settings the protocol does not carry (our user ID)
//!
//! ## State Model
//! - [`SideState`] - One player's side: roster, active slots, side conditions
//! - [`PokemonState`] - Everything revealed about one Pokemon
//! - [`BoostTable`] - Stat stage modifiers
//! - [`Volatile`] - Volatile conditions (Substitute, Confusion, etc.)
//! - [`FieldState`], [`Weather`], [`PseudoWeather`] - Field conditions
//!
//! With the `serde` feature, the whole model implements `Serialize`.
//!
//! # Example Usage
//!
//! ```
//! use showdown_battle::{Player, TrackedBattle};
//!
//! let mut battle = TrackedBattle::new();
//! battle.apply_frame(
//!     ">battle-gen9randombattle-1\n\
//!      |player|p1|Alice|1|\n\
//!      |switch|p1a: Pikachu|Pikachu, L84, M|100/100\n\
//!      |-damage|p1a: Pikachu|52/100\n\
//!      |turn|1\n",
//! );
//!
//! let side = battle.get_side(Player::P1).unwrap();
//! let pikachu = side.active_pokemon(0).unwrap();
//! assert_eq!(pikachu.health.hp, 52.0);
//! ```

pub mod tracking;
pub mod types;

// Re-export main types at crate root for convenience
pub use tracking::{KickingInactive, PokemonRef, Rated, TrackedBattle, TrackerConfig};
pub use types::{
    BoostTable, FieldState, PokemonState, PseudoWeather, RevealedMove, SideConditionState,
    SideState, StatusData, Volatile, Weather,
};

// Re-export commonly used protocol types
pub use showdown_protocol::{BoostId, GameType, Player, Status};
