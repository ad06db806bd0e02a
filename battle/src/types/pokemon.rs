//! Pokemon state types

use std::collections::BTreeSet;

use showdown_protocol::{
    DetailedPokemon, EffectKind, PokemonHealth, Status, parse_effect, to_id,
};

use super::stats::BoostTable;
use super::volatile::Volatile;

/// A move this Pokemon has been seen using
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RevealedMove {
    pub name: String,
    /// Times used, 0 for moves revealed without being used
    pub uses: u32,
}

/// Counters attached to the current status condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatusData {
    pub toxic_turns: u32,
    pub sleep_turns: u32,
}

/// Pokemon state during battle (changes as battle progresses)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PokemonState {
    // === Identity ===
    /// "p1: Name", empty for a team preview entry not yet seen in battle
    pub ident: String,

    pub name: String,

    /// Species from the details string (persistent forme)
    pub species: String,

    /// Raw details string
    pub details: String,

    /// "IDENT|DETAILS", empty for a team preview entry
    pub searchid: String,

    pub level: u8,

    pub gender: Option<char>,

    pub shiny: bool,

    // === HP and status ===
    pub health: PokemonHealth,

    pub status_data: StatusData,

    /// Active slot this Pokemon last occupied
    pub slot: usize,

    // === Combat state (cleared on switch) ===
    pub boosts: BoostTable,

    pub volatiles: BTreeSet<Volatile>,

    /// Volatiles from `-singleturn`, cleared at the next turn
    pub turn_volatiles: BTreeSet<Volatile>,

    /// Volatiles from `-singlemove`, cleared when this Pokemon next acts
    pub move_volatiles: BTreeSet<Volatile>,

    /// Species shown by a temporary `-formechange`
    pub forme: Option<String>,

    /// Species copied by Transform
    pub transformed: Option<String>,

    /// Types set by a typechange effect
    pub types: Option<Vec<String>>,

    // === Revealed information ===
    pub moves: Vec<RevealedMove>,

    /// ID of the last move used
    pub last_move: Option<String>,

    pub ability: Option<String>,

    /// Ability it had coming into battle
    pub base_ability: Option<String>,

    /// Held item; "(exists)" when team preview only showed that it has one
    pub item: Option<String>,

    pub prev_item: Option<String>,

    /// How the previous item was lost ("eaten", "Knock Off")
    pub prev_item_effect: Option<String>,

    pub tera_type: Option<String>,

    /// Type it terastallized into
    pub terastallized: Option<String>,
}

impl PokemonState {
    /// Create from a parsed ident and details pair
    pub fn new(data: DetailedPokemon) -> Self {
        let name = if data.name.is_empty() {
            data.species.clone()
        } else {
            data.name
        };

        Self {
            ident: data.ident,
            name,
            species: data.species,
            details: data.details,
            searchid: data.searchid,
            level: data.level,
            gender: data.gender,
            shiny: data.shiny,
            health: PokemonHealth {
                hp: 100.0,
                maxhp: 100.0,
                ..PokemonHealth::default()
            },
            status_data: StatusData::default(),
            slot: 0,
            boosts: BoostTable::new(),
            volatiles: BTreeSet::new(),
            turn_volatiles: BTreeSet::new(),
            move_volatiles: BTreeSet::new(),
            forme: None,
            transformed: None,
            types: None,
            moves: Vec::new(),
            last_move: None,
            ability: None,
            base_ability: None,
            item: None,
            prev_item: None,
            prev_item_effect: None,
            tera_type: data.tera_type,
            terastallized: None,
        }
    }

    /// Species currently shown, including temporary formes
    pub fn current_species(&self) -> &str {
        self.forme.as_deref().unwrap_or(&self.species)
    }

    pub fn status(&self) -> Option<Status> {
        self.health.status
    }

    pub fn is_fainted(&self) -> bool {
        self.health.fainted
    }

    /// Whether a switch with these details can be this Pokemon
    ///
    /// Team preview entries hide formes ("Urshifu-*") and shininess.
    pub fn check_details(&self, details: &str) -> bool {
        if details == self.details {
            return true;
        }
        if !self.searchid.is_empty() {
            return false;
        }
        if details.contains(", shiny") && self.check_details(&details.replace(", shiny", "")) {
            return true;
        }
        hide_forme(details) == self.details
    }

    /// Take over the persistent details after a `detailschange`
    pub fn set_details(&mut self, data: DetailedPokemon) {
        self.species = data.species;
        self.details = data.details;
        self.level = data.level;
        self.gender = data.gender;
        self.shiny = data.shiny;
        if !data.searchid.is_empty() {
            self.searchid = data.searchid;
        }
        if data.tera_type.is_some() {
            self.tera_type = data.tera_type;
        }
        self.forme = None;
    }

    pub fn has_volatile(&self, volatile: &Volatile) -> bool {
        self.volatiles.contains(volatile)
    }

    pub fn add_volatile(&mut self, volatile: Volatile) {
        self.volatiles.insert(volatile);
    }

    pub fn remove_volatile(&mut self, volatile: &Volatile) -> bool {
        self.volatiles.remove(volatile)
    }

    /// Reset everything that does not survive leaving the field
    pub fn clear_volatile(&mut self) {
        self.boosts.clear();
        self.volatiles.clear();
        self.turn_volatiles.clear();
        self.move_volatiles.clear();
        self.forme = None;
        self.transformed = None;
        self.types = None;
        self.status_data.toxic_turns = 0;
    }

    /// Take over the boosts and passable volatiles of a Baton Pass user
    pub fn copy_volatile_from(&mut self, other: &PokemonState) {
        self.boosts = other.boosts.clone();
        self.volatiles = other
            .volatiles
            .iter()
            .filter(|v| v.is_passable())
            .cloned()
            .collect();
    }

    /// Record a move as revealed, adding `uses` to its count
    pub fn remember_move(&mut self, name: &str, uses: u32) {
        let id = to_id(name);
        match self.moves.iter_mut().find(|m| to_id(&m.name) == id) {
            Some(revealed) => revealed.uses += uses,
            None => self.moves.push(RevealedMove {
                name: name.to_string(),
                uses,
            }),
        }
    }

    pub fn move_uses(&self, name: &str) -> Option<u32> {
        let id = to_id(name);
        self.moves
            .iter()
            .find(|m| to_id(&m.name) == id)
            .map(|m| m.uses)
    }

    /// Apply a `|move|` by this Pokemon
    ///
    /// A move called by another effect (`[from]`) is not counted as one of
    /// its own moves.
    pub fn use_move(&mut self, move_name: &str, from: Option<&str>) {
        if let Some(from) = from {
            self.activate_ability(from);
        }
        self.move_volatiles.clear();

        let id = to_id(move_name);
        if id == "focuspunch" {
            self.turn_volatiles.remove(&Volatile::FocusPunch);
        }
        if from.is_none() {
            self.remember_move(move_name, 1);
        }
        self.last_move = Some(id);
    }

    /// Apply a `|cant|` for this Pokemon
    pub fn cant_use_move(&mut self, reason: &str, move_name: Option<&str>) {
        self.move_volatiles.clear();
        self.activate_ability(reason);
        if let Some(move_name) = move_name.filter(|m| !m.is_empty()) {
            self.remember_move(move_name, 0);
        }

        match to_id(&parse_effect(reason).name).as_str() {
            "slp" => self.status_data.sleep_turns += 1,
            "recharge" => {
                self.remove_volatile(&Volatile::MustRecharge);
            }
            _ => {}
        }
    }

    /// Record an ability revealed by an effect, if the effect is an ability
    pub fn activate_ability(&mut self, effect: &str) {
        let effect = parse_effect(effect);
        if effect.kind == Some(EffectKind::Ability) && !effect.name.is_empty() {
            self.remember_ability(&effect.name, false);
        }
    }

    /// Record the current ability
    ///
    /// `is_not_base` is set when the ability was acquired in battle
    /// (Skill Swap, Trace) and so says nothing about the base ability.
    pub fn remember_ability(&mut self, ability: &str, is_not_base: bool) {
        self.ability = Some(ability.to_string());
        if self.base_ability.is_none() && !is_not_base {
            self.base_ability = Some(ability.to_string());
        }
    }

    pub fn set_item(&mut self, item: &str) {
        self.item = Some(item.to_string());
        self.prev_item_effect = None;
        self.remove_volatile(&Volatile::ItemRemoved);
    }

    /// The held item is gone
    pub fn remove_item(&mut self, item: &str, effect: Option<String>) {
        self.prev_item = Some(item.to_string());
        self.prev_item_effect = effect;
        self.item = None;
        self.add_volatile(Volatile::ItemRemoved);
    }

    /// Set a new status condition, restarting its counters
    pub fn set_status(&mut self, status: Option<Status>) {
        match status {
            Some(Status::Sleep) => self.status_data.sleep_turns = 0,
            Some(Status::BadPoison) => self.status_data.toxic_turns = 0,
            _ => {}
        }
        self.health.status = status;
        self.remove_volatile(&Volatile::Yawn);
    }

    pub fn cure_status(&mut self) {
        if self.health.status == Some(Status::Sleep) {
            self.status_data.sleep_turns = 0;
        }
        self.health.status = None;
    }

    /// Faint: no HP and nothing left on the field
    pub fn faint(&mut self) {
        self.clear_volatile();
        self.health.hp = 0.0;
        self.health.fainted = true;
    }
}

/// Replace the forme suffix of the species with "-*", as team preview does
fn hide_forme(details: &str) -> String {
    let (species, tail) = match details.find(", ") {
        Some(at) => details.split_at(at),
        None => (details, ""),
    };

    let is_forme_char = |c: char| c.is_ascii_alphanumeric() || c == '-';
    let base = species
        .match_indices('-')
        .map(|(at, _)| at)
        .find(|&at| {
            let suffix = &species[at + 1..];
            !suffix.is_empty() && suffix.chars().all(is_forme_char)
        })
        .map_or(species, |at| &species[..at]);

    format!("{base}-*{tail}")
}
