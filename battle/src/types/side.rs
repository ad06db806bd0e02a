//! Side (player) state

use std::collections::BTreeMap;

use showdown_protocol::{Player, Status, to_id};

use super::conditions::SideConditionState;
use super::pokemon::PokemonState;
use super::volatile::Volatile;

/// One player's side of the battle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SideState {
    pub player: Player,

    pub name: String,

    pub avatar: String,

    pub rating: Option<String>,

    /// Team size announced by `|teamsize|`
    pub total_pokemon: u32,

    /// Pokemon on this side, in the order they were revealed
    pub pokemon: Vec<PokemonState>,

    /// Roster index of the occupant of each active slot
    pub active: Vec<Option<usize>>,

    /// Roster index of the Pokemon that most recently left the field
    pub last_pokemon: Option<usize>,

    /// Side conditions keyed by ID
    pub conditions: BTreeMap<String, SideConditionState>,
}

impl SideState {
    pub fn new(player: Player, active_slots: usize) -> Self {
        Self {
            player,
            name: String::new(),
            avatar: String::new(),
            rating: None,
            total_pokemon: 0,
            pokemon: Vec::new(),
            active: vec![None; active_slots.max(1)],
            last_pokemon: None,
            conditions: BTreeMap::new(),
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_avatar(&mut self, avatar: &str) {
        self.avatar = avatar.to_string();
    }

    /// The teammate in a multi battle
    pub fn ally(&self) -> Player {
        self.player.ally()
    }

    /// The opposing player across the field
    pub fn foe(&self) -> Player {
        self.player.foe()
    }

    /// Set the number of active slots (1 for singles, 2 for doubles, etc.)
    pub fn set_active_slots(&mut self, count: usize) {
        self.active = vec![None; count.max(1)];
    }

    /// Roster index of the occupant of a slot
    pub fn active_index(&self, slot: usize) -> Option<usize> {
        self.active.get(slot).copied().flatten()
    }

    pub fn active_pokemon(&self, slot: usize) -> Option<&PokemonState> {
        self.active_index(slot).and_then(|idx| self.pokemon.get(idx))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.contains(&Some(index))
    }

    /// Iterate over all active Pokemon
    pub fn get_active(&self) -> impl Iterator<Item = &PokemonState> {
        self.active
            .iter()
            .flatten()
            .filter_map(|&idx| self.pokemon.get(idx))
    }

    /// Active Pokemon, mutably
    pub fn get_active_mut(&mut self) -> impl Iterator<Item = &mut PokemonState> {
        let active = &self.active;
        self.pokemon
            .iter_mut()
            .enumerate()
            .filter(move |(idx, _)| active.contains(&Some(*idx)))
            .map(|(_, poke)| poke)
    }

    /// Last recorded slot of a Pokemon
    pub fn slot_of(&self, index: usize) -> usize {
        self.pokemon.get(index).map_or(0, |p| p.slot)
    }

    /// Find a roster entry by its "p1: Name" ident
    pub fn find_pokemon(&self, ident: &str) -> Option<usize> {
        self.pokemon.iter().position(|p| p.ident == ident)
    }

    /// Add a Pokemon to the roster and return its index
    pub fn add_pokemon(&mut self, pokemon: PokemonState) -> usize {
        self.pokemon.push(pokemon);
        self.pokemon.len() - 1
    }

    /// Forget the roster (a new team preview is coming)
    pub fn clear_pokemon(&mut self) {
        self.pokemon.clear();
        self.active.iter_mut().for_each(|slot| *slot = None);
        self.last_pokemon = None;
    }

    /// Slots past the game type's count are never created
    fn set_slot(&mut self, slot: usize, occupant: Option<usize>) {
        if let Some(entry) = self.active.get_mut(slot) {
            *entry = occupant;
        }
    }

    /// Put a Pokemon into its slot by a regular switch
    ///
    /// Baton Pass and Shed Tail hand state over from the previous occupant.
    pub fn switch_in(&mut self, index: usize) {
        let slot = self.slot_of(index);
        let passer = self
            .last_pokemon
            .filter(|&last| last != index)
            .and_then(|last| self.pokemon.get(last))
            .filter(|last| {
                matches!(
                    last.last_move.as_deref(),
                    Some("batonpass" | "zbatonpass" | "shedtail")
                )
            })
            .cloned();

        if let Some(passer) = passer {
            if let Some(poke) = self.pokemon.get_mut(index) {
                if passer.last_move.as_deref() == Some("shedtail") {
                    if passer.has_volatile(&Volatile::Substitute) {
                        poke.add_volatile(Volatile::Substitute);
                    }
                } else {
                    poke.copy_volatile_from(&passer);
                }
            }
            if let Some(last) = self.last_pokemon.and_then(|i| self.pokemon.get_mut(i)) {
                last.clear_volatile();
            }
        }

        self.set_slot(slot, Some(index));
    }

    /// Take a Pokemon out of its slot by a regular switch
    pub fn switch_out(&mut self, index: usize) {
        let slot = self.slot_of(index);
        if let Some(poke) = self.pokemon.get_mut(index) {
            match poke.last_move.as_deref() {
                Some("batonpass" | "zbatonpass" | "shedtail") => {
                    poke.remove_volatile(&Volatile::Transform);
                    poke.remove_volatile(&Volatile::FormeChange);
                    poke.forme = None;
                    poke.transformed = None;
                }
                _ => poke.clear_volatile(),
            }
            poke.turn_volatiles.clear();
        }

        self.last_pokemon = Some(index);
        if self.active_index(slot) == Some(index) {
            self.set_slot(slot, None);
        }
    }

    /// Put a Pokemon into its slot by a forced switch (Roar, Dragon Tail)
    pub fn drag_in(&mut self, index: usize) {
        let slot = self.slot_of(index);
        let old = self.active_index(slot);
        if old == Some(index) {
            return;
        }

        self.last_pokemon = old;
        if let Some(old) = old.and_then(|i| self.pokemon.get_mut(i)) {
            old.clear_volatile();
        }
        if let Some(poke) = self.pokemon.get_mut(index) {
            poke.clear_volatile();
        }
        self.set_slot(slot, Some(index));
    }

    /// Reveal the Pokemon behind an Illusion in its slot
    ///
    /// The revealed Pokemon takes over everything the disguise went through.
    /// All that is known of the disguise afterwards is that it has not fainted.
    pub fn replace(&mut self, index: usize) {
        let slot = self.slot_of(index);
        let old = self.active_index(slot);
        if old == Some(index) {
            return;
        }

        self.last_pokemon = old;
        let disguise = old.and_then(|i| self.pokemon.get(i)).cloned();
        if let Some(poke) = self.pokemon.get_mut(index) {
            poke.clear_volatile();
            if let Some(disguise) = &disguise {
                poke.last_move = disguise.last_move.clone();
                poke.health = disguise.health.clone();
                poke.status_data = disguise.status_data;
                poke.boosts = disguise.boosts.clone();
                poke.volatiles = disguise.volatiles.clone();
            }
        }
        if let Some(old) = old.and_then(|i| self.pokemon.get_mut(i)) {
            old.clear_volatile();
            old.health.hp = old.health.maxhp;
            old.health.status = Some(Status::Unknown);
        }
        self.set_slot(slot, Some(index));
    }

    /// Move an active Pokemon to another slot, trading places with its occupant
    pub fn swap_to(&mut self, index: usize, slot: usize) {
        let from = self.slot_of(index);
        if from == slot || slot >= self.active.len() {
            return;
        }

        let target = self.active_index(slot);
        if let Some(poke) = self.pokemon.get_mut(index) {
            poke.slot = slot;
        }
        if let Some(other) = target.and_then(|i| self.pokemon.get_mut(i)) {
            other.slot = from;
        }
        self.set_slot(slot, Some(index));
        self.set_slot(from, target);
    }

    /// Exchange the slots of two active Pokemon
    pub fn swap_with(&mut self, index: usize, other: usize) {
        if index == other {
            return;
        }

        let (slot, other_slot) = (self.slot_of(index), self.slot_of(other));
        if let Some(poke) = self.pokemon.get_mut(index) {
            poke.slot = other_slot;
        }
        if let Some(poke) = self.pokemon.get_mut(other) {
            poke.slot = slot;
        }
        self.set_slot(other_slot, Some(index));
        self.set_slot(slot, Some(other));
    }

    pub fn faint(&mut self, index: usize) {
        let slot = self.slot_of(index);
        if let Some(poke) = self.pokemon.get_mut(index) {
            poke.faint();
        }
        self.last_pokemon = Some(index);
        self.set_slot(slot, None);
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.contains_key(&to_id(name))
    }

    /// Layers of a condition (0 if not present)
    pub fn condition_layers(&self, name: &str) -> u32 {
        self.conditions.get(&to_id(name)).map_or(0, |s| s.layers)
    }

    /// Start a side condition, or add a layer of Spikes / Toxic Spikes
    pub fn add_condition(&mut self, name: &str, persistent: bool, generation: u8) {
        let id = to_id(name);
        match self.conditions.get_mut(&id) {
            Some(state) => {
                if state.is_stackable() {
                    state.layers += 1;
                }
            }
            None => {
                self.conditions
                    .insert(id, SideConditionState::new(name, persistent, generation));
            }
        }
    }

    pub fn remove_condition(&mut self, name: &str) -> bool {
        self.conditions.remove(&to_id(name)).is_some()
    }

    /// Count down every timed condition by one turn
    pub fn tick_conditions(&mut self) {
        for state in self.conditions.values_mut() {
            state.tick();
        }
    }

    /// Check if all known Pokemon have fainted
    pub fn all_fainted(&self) -> bool {
        !self.pokemon.is_empty() && self.pokemon.iter().all(|p| p.is_fainted())
    }
}
