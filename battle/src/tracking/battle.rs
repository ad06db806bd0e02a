//! TrackedBattle - main battle state tracking struct

use anyhow::Result;
use showdown_protocol::{
    BattleRequest, GameType, Player, handle, parse_battle_line, parse_details,
    parse_pokemon_ident,
};

use crate::types::{FieldState, PokemonState, SideState};

/// Settings that are not carried by the protocol itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrackerConfig {
    /// ID of the user we play as, used to pick our own timer warnings
    pub user_id: Option<String>,
}

/// State of the inactivity timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum KickingInactive {
    #[default]
    Off,
    /// The timer is running but we have not been told how long is left
    OnUnknown,
    /// Seconds left before we are kicked
    Seconds(i64),
}

/// Value of `|rated|`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Rated {
    Yes,
    /// Rated with a custom message (tournaments)
    Message(String),
}

/// Where a Pokemon lives: its side and roster index
pub type PokemonRef = (Player, usize);

/// A battle being tracked from server messages
///
/// This struct reconstructs battle state from the protocol messages
/// received from the Pokemon Showdown server. It maintains the perspective
/// of one player and tracks what information has been revealed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrackedBattle {
    // === Battle metadata ===
    pub game_type: Option<GameType>,

    pub generation: u8,

    /// Format name
    pub tier: String,

    /// Current turn number (0 = not started)
    pub turn: u32,

    pub rated: Option<Rated>,

    /// Every `|rule|` line, in order
    pub rules: Vec<String>,

    pub species_clause: bool,

    pub team_preview_count: Option<u32>,

    // === Timer ===
    pub kicking_inactive: KickingInactive,

    pub total_time_left: Option<i64>,

    pub grace_time_left: i64,

    // === State ===
    pub field: FieldState,

    /// Player sides, indexed by player
    pub(crate) sides: [Option<SideState>; 4],

    /// Active slots per side, kept for sides created after `|gametype|`
    active_slots: usize,

    // === Perspective ===
    perspective: Option<Player>,

    config: TrackerConfig,

    /// Latest decision request for our side
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) request: Option<BattleRequest>,

    // === Outcome ===
    pub ended: bool,

    pub winner: Option<String>,

    pub tie: bool,
}

impl TrackedBattle {
    /// Create a new battle tracker
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            game_type: None,
            generation: 9,
            tier: String::new(),
            turn: 0,
            rated: None,
            rules: Vec::new(),
            species_clause: false,
            team_preview_count: None,
            kicking_inactive: KickingInactive::Off,
            total_time_left: None,
            grace_time_left: 0,
            field: FieldState::new(),
            sides: [None, None, None, None],
            active_slots: 1,
            perspective: None,
            config,
            request: None,
            ended: false,
            winner: None,
            tie: false,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Set the perspective (which player we are)
    pub fn set_perspective(&mut self, player: Player) {
        self.perspective = Some(player);
    }

    pub fn perspective(&self) -> Option<Player> {
        self.perspective
    }

    /// Our side (based on perspective)
    pub fn me(&self) -> Option<&SideState> {
        self.perspective.and_then(|p| self.get_side(p))
    }

    /// The side across the field from ours
    pub fn opponent(&self) -> Option<&SideState> {
        self.perspective.and_then(|p| self.get_side(p.foe()))
    }

    pub fn get_side(&self, player: Player) -> Option<&SideState> {
        self.sides[player.index()].as_ref()
    }

    pub fn get_side_mut(&mut self, player: Player) -> Option<&mut SideState> {
        self.sides[player.index()].as_mut()
    }

    /// Get or create a side for a player
    pub fn get_or_create_side(&mut self, player: Player) -> &mut SideState {
        let slots = self.active_slots;
        self.sides[player.index()].get_or_insert_with(|| SideState::new(player, slots))
    }

    pub fn has_side(&self, player: Player) -> bool {
        self.sides[player.index()].is_some()
    }

    /// Iterate over all initialized sides
    pub fn sides(&self) -> impl Iterator<Item = &SideState> {
        self.sides.iter().flatten()
    }

    pub fn sides_mut(&mut self) -> impl Iterator<Item = &mut SideState> {
        self.sides.iter_mut().flatten()
    }

    /// Set game type and update active slots accordingly
    pub fn set_game_type(&mut self, game_type: GameType) {
        self.game_type = Some(game_type);
        self.active_slots = game_type.active_slots();

        let slots = self.active_slots;
        for side in self.sides_mut() {
            side.set_active_slots(slots);
        }
    }

    /// Check if the battle is in progress
    pub fn is_active(&self) -> bool {
        self.turn > 0 && !self.ended
    }

    /// Latest decision request for our side
    pub fn request(&self) -> Option<&BattleRequest> {
        self.request.as_ref()
    }

    /// Resolve an ident ("p1a: Pikachu" or "p1: Pikachu") to a roster entry
    ///
    /// An ident with a slot letter resolves to whoever occupies that slot.
    /// Without one, only Pokemon off the field are matched.
    pub fn find_pokemon(&self, ident: &str) -> Option<PokemonRef> {
        if matches!(ident, "" | "??" | "null" | "false") {
            return None;
        }
        let parsed = parse_pokemon_ident(ident)?;
        let side = self.get_side(parsed.player)?;

        let slot = parsed.slot();
        if let Some(index) = slot.and_then(|slot| side.active_index(slot)) {
            return Some((parsed.player, index));
        }

        let base = parsed.base_ident();
        side.pokemon
            .iter()
            .enumerate()
            .find(|(index, poke)| {
                poke.ident == base && (slot.is_some() || !side.is_active(*index))
            })
            .map(|(index, _)| (parsed.player, index))
    }

    pub fn pokemon(&self, (player, index): PokemonRef) -> Option<&PokemonState> {
        self.get_side(player)?.pokemon.get(index)
    }

    pub fn pokemon_mut(&mut self, (player, index): PokemonRef) -> Option<&mut PokemonState> {
        self.get_side_mut(player)?.pokemon.get_mut(index)
    }

    pub fn get_pokemon(&self, ident: &str) -> Option<&PokemonState> {
        self.find_pokemon(ident).and_then(|at| self.pokemon(at))
    }

    pub fn get_pokemon_mut(&mut self, ident: &str) -> Option<&mut PokemonState> {
        let at = self.resolve_pokemon(ident)?;
        self.pokemon_mut(at)
    }

    /// Like `find_pokemon`, but a Pokemon found by name under a slot letter
    /// is recorded as being in that slot
    pub fn resolve_pokemon(&mut self, ident: &str) -> Option<PokemonRef> {
        let at @ (player, index) = self.find_pokemon(ident)?;
        let slot = parse_pokemon_ident(ident).and_then(|parsed| parsed.slot());
        if let Some(slot) = slot
            && let Some(side) = self.get_side_mut(player)
            && slot < side.active.len()
            && let Some(poke) = side.pokemon.get_mut(index)
        {
            poke.slot = slot;
        }
        Some(at)
    }

    /// Whether a Pokemon currently occupies the slot it last moved to
    pub fn is_in_slot(&self, (player, index): PokemonRef) -> bool {
        self.get_side(player).is_some_and(|side| {
            side.pokemon
                .get(index)
                .is_some_and(|poke| side.active_index(poke.slot) == Some(index))
        })
    }

    /// Find the roster entry a switch-in refers to, creating it if needed
    ///
    /// A known Pokemon off the field matches by ident and details. A team
    /// preview entry matches by details alone and is upgraded in place.
    pub fn get_switched_pokemon(&mut self, ident: &str, details: &str) -> Option<PokemonRef> {
        let parsed = parse_pokemon_ident(ident)?;
        let base = parsed.base_ident();
        let searchid = format!("{base}|{details}");
        let data = parse_details(&parsed.name, &base, details);

        let side = self.get_or_create_side(parsed.player);
        // A Pokemon that just left an empty slot is not the one coming back
        let slot_empty = parsed
            .slot()
            .is_none_or(|slot| side.active_index(slot).is_none());
        let just_left = side.last_pokemon.filter(|_| slot_empty);
        let found = side
            .pokemon
            .iter()
            .enumerate()
            .filter(|(index, poke)| {
                !poke.is_fainted() && !side.is_active(*index) && just_left != Some(*index)
            })
            .find_map(|(index, poke)| {
                if poke.searchid == searchid {
                    Some((index, false))
                } else if poke.searchid.is_empty() && poke.check_details(details) {
                    Some((index, true))
                } else {
                    None
                }
            });

        let index = match found {
            Some((index, false)) => index,
            Some((index, true)) => {
                let preview_item = side.pokemon[index].item.take();
                let mut poke = PokemonState::new(data);
                poke.item = preview_item;
                side.pokemon[index] = poke;
                index
            }
            None => side.add_pokemon(PokemonState::new(data)),
        };

        if let Some(slot) = parsed.slot() {
            side.pokemon[index].slot = slot;
        }

        let at = (parsed.player, index);
        self.sync_from_request(at);
        Some(at)
    }

    /// Add a team preview entry; only the details are known
    pub fn remember_team_preview_pokemon(&mut self, player: Player, details: &str) -> usize {
        self.get_or_create_side(player)
            .add_pokemon(PokemonState::new(parse_details("", "", details)))
    }

    /// Parse one protocol line and apply it
    pub fn apply_line(&mut self, line: &str) -> Result<()> {
        let parsed = parse_battle_line(line)?;
        self.update(&parsed.message, &parsed.kwargs);
        Ok(())
    }

    /// Apply every line of a server frame, skipping malformed ones
    ///
    /// Returns the number of lines applied.
    pub fn apply_frame(&mut self, frame: &str) -> usize {
        let mut applied = 0;
        for (_room, line) in handle(frame) {
            self.update(&line.message, &line.kwargs);
            applied += 1;
        }
        applied
    }
}

impl Default for TrackedBattle {
    fn default() -> Self {
        Self::new()
    }
}
