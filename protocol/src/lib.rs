//! Line decoder for the Pokemon Showdown battle protocol.
//!
//! Raw server text goes through three stages before it reaches a consumer:
//!
//! ```text
//! raw line ──> parse_line / keyword extraction ──> upgrade (shim) ──> ServerMessage
//! ```
//!
//! [`handle`] drives the whole pipeline over a websocket frame and yields one
//! [`BattleLine`] per non-empty line.

use thiserror::Error;

pub mod server;

pub use server::battle::{
    BoostId, DetailedPokemon, Effect, EffectKind, GameType, HpColor, NameParts, Player,
    PokemonHealth, PokemonIdent, Status, leading_float, leading_int, parse_details, parse_effect,
    parse_effect_id, parse_health, parse_name_parts, parse_pokemon_ident, to_id,
};
pub use server::kwargs::{Keyword, KeywordArgs, KwValue, extract_keyword_args};
pub use server::request::{
    BattleRequest, Challenges, SearchState, SideInfo, SidePokemon, TournamentEnded,
    TournamentUpdate, parse_challenges, parse_request, parse_search_state, parse_tournament_ended,
    parse_tournament_update,
};
pub use server::upgrade::{UpgradeRules, upgrade, upgrade_legacy, upgrade_with};
pub use server::{
    BattleLine, Handle, ServerFrame, ServerMessage, TournamentMessage, handle, parse_battle_line,
    parse_line, parse_server_frame, parse_server_message,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Empty message")]
    EmptyMessage,

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
