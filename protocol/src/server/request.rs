//! JSON payloads carried by protocol messages
//!
//! `|request|`, `|updatesearch|`, `|updatechallenges|`, `|tournament|update|`
//! and `|tournament|end|` each carry one JSON object.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Deserializer};

use super::battle::{PokemonHealth, Player, parse_health};
use crate::ParseError;

fn from_json<'a, T: Deserialize<'a>>(json: &'a str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| ParseError::Json(e).into())
}

/// Parse the JSON body of `|request|`
pub fn parse_request(json: &str) -> Result<BattleRequest> {
    from_json(json)
}

/// Parse the JSON body of `|updatechallenges|`
pub fn parse_challenges(json: &str) -> Result<Challenges> {
    from_json(json)
}

/// Parse the JSON body of `|updatesearch|`
pub fn parse_search_state(json: &str) -> Result<SearchState> {
    from_json(json)
}

/// Parse the JSON body of `|tournament|update|`
pub fn parse_tournament_update(json: &str) -> Result<TournamentUpdate> {
    from_json(json)
}

/// Parse the JSON body of `|tournament|end|`
pub fn parse_tournament_ended(json: &str) -> Result<TournamentEnded> {
    from_json(json)
}

/// A battle request asking the player to make a decision
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    /// Request ID for synchronization
    pub rqid: Option<u64>,

    /// Active pokemon and their available moves
    #[serde(default)]
    pub active: Vec<ActivePokemon>,

    /// Our own side, with full information
    pub side: Option<SideInfo>,

    /// Which slots need to switch (for doubles/triples)
    #[serde(default)]
    pub force_switch: Option<Vec<bool>>,

    #[serde(default)]
    pub team_preview: bool,

    /// Waiting on the opponent
    #[serde(default)]
    pub wait: bool,

    #[serde(default)]
    pub no_cancel: bool,
}

impl BattleRequest {
    /// Check if this request requires a decision
    pub fn needs_decision(&self) -> bool {
        !self.wait && (self.team_preview || self.force_switch.is_some() || !self.active.is_empty())
    }

    /// Check if this is a force switch request
    pub fn is_force_switch(&self) -> bool {
        self.force_switch
            .as_ref()
            .is_some_and(|slots| slots.iter().any(|&b| b))
    }
}

/// Information about an active pokemon in battle
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePokemon {
    #[serde(default)]
    pub moves: Vec<MoveSlot>,

    #[serde(default)]
    pub trapped: bool,

    #[serde(default)]
    pub maybe_trapped: bool,

    #[serde(default)]
    pub maybe_disabled: bool,

    #[serde(default)]
    pub can_mega_evo: bool,

    #[serde(default)]
    pub can_ultra_burst: bool,

    /// One entry per move slot; `None` where no Z-move applies
    #[serde(default)]
    pub can_z_move: Option<Vec<Option<ZMoveInfo>>>,

    #[serde(default)]
    pub can_dynamax: bool,

    /// Terastallization type (if available)
    #[serde(default)]
    pub can_terastallize: Option<String>,

    /// Max moves (when dynamaxed)
    #[serde(default)]
    pub max_moves: Option<MaxMoves>,
}

impl ActivePokemon {
    /// Move slots that can currently be selected
    pub fn usable_moves(&self) -> impl Iterator<Item = (usize, &MoveSlot)> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.disabled && m.pp > 0)
    }
}

/// A move slot on an active pokemon
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSlot {
    /// Display name of the move
    #[serde(rename = "move")]
    pub name: String,

    pub id: String,

    #[serde(default)]
    pub pp: u32,

    #[serde(rename = "maxpp", default)]
    pub max_pp: u32,

    #[serde(default)]
    pub target: String,

    /// The server sends either a bool or the name of the disabling effect
    #[serde(default, deserialize_with = "bool_or_reason")]
    pub disabled: bool,
}

fn bool_or_reason<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Disabled {
        Flag(bool),
        Reason(String),
    }

    Ok(match Option::<Disabled>::deserialize(deserializer)? {
        Some(Disabled::Flag(flag)) => flag,
        Some(Disabled::Reason(reason)) => !reason.is_empty(),
        None => false,
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZMoveInfo {
    #[serde(rename = "move")]
    pub name: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxMoves {
    #[serde(default)]
    pub max_moves: Vec<MaxMoveSlot>,

    /// Gigantamax species, when available
    #[serde(default)]
    pub gigantamax: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaxMoveSlot {
    #[serde(rename = "move")]
    pub name: String,
    pub target: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Information about the player's side
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SideInfo {
    pub name: String,

    /// Player ID (p1, p2, etc.)
    pub id: String,

    #[serde(default)]
    pub pokemon: Vec<SidePokemon>,
}

impl SideInfo {
    pub fn player(&self) -> Option<Player> {
        Player::parse(&self.id)
    }
}

/// A pokemon on the player's side
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePokemon {
    /// Pokemon identifier (e.g., "p1: Pikachu")
    pub ident: String,

    pub details: String,

    /// HP and status in `|-damage|` form
    pub condition: String,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub stats: PokemonStats,

    /// Move IDs
    #[serde(default)]
    pub moves: Vec<String>,

    #[serde(default)]
    pub base_ability: String,

    #[serde(default)]
    pub ability: String,

    #[serde(default)]
    pub item: String,

    #[serde(default)]
    pub pokeball: String,

    #[serde(default)]
    pub teratype: Option<String>,

    #[serde(default)]
    pub terastallized: Option<String>,
}

impl SidePokemon {
    /// Decoded `condition`
    pub fn health(&self) -> Option<PokemonHealth> {
        parse_health(&self.condition, None)
    }

    pub fn is_fainted(&self) -> bool {
        self.health().is_some_and(|health| health.fainted)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PokemonStats {
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

/// `|updatechallenges|` payload
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenges {
    /// Challenger user ID to format ID
    #[serde(default)]
    pub challenges_from: BTreeMap<String, String>,

    /// Our outgoing challenge, if any
    #[serde(default)]
    pub challenge_to: Option<ChallengeTo>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChallengeTo {
    /// Opponent username
    #[serde(rename = "to", alias = "o")]
    pub opponent: String,
    pub format: String,
}

/// `|updatesearch|` payload
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SearchState {
    /// Format IDs being searched
    #[serde(default)]
    pub searching: Vec<String>,

    /// Room ID to room title for every game in progress
    #[serde(default)]
    pub games: Option<BTreeMap<String, String>>,
}

/// `|tournament|update|` payload; only changed fields are present
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentUpdate {
    pub format: Option<String>,
    pub teambuilder_format: Option<String>,
    pub is_started: Option<bool>,
    pub is_joined: Option<bool>,
    pub generator: Option<String>,
    /// 0 when the cap was removed
    pub player_cap: Option<u32>,
    pub bracket_data: Option<serde_json::Value>,
    pub challenges: Option<Vec<String>>,
    pub challenge_bys: Option<Vec<String>>,
    pub challenged: Option<String>,
    pub challenging: Option<String>,
}

/// `|tournament|end|` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentEnded {
    /// Winner names, possibly grouped per placing
    pub results: Vec<serde_json::Value>,
    pub format: String,
    pub generator: String,
    #[serde(default)]
    pub bracket_data: serde_json::Value,
}

impl TournamentEnded {
    /// Winner names with any per-placing grouping flattened
    pub fn winners(&self) -> Vec<String> {
        fn collect(value: &serde_json::Value, out: &mut Vec<String>) {
            match value {
                serde_json::Value::String(name) => out.push(name.clone()),
                serde_json::Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
                _ => {}
            }
        }

        let mut winners = Vec::new();
        self.results.iter().for_each(|v| collect(v, &mut winners));
        winners
    }
}
