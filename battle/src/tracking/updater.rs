//! Update logic for processing ServerMessage into battle state

use showdown_protocol::{
    BattleRequest, BoostId, EffectKind, Keyword, KeywordArgs, Player, ServerMessage, SidePokemon,
    Status, leading_int, parse_details, parse_effect, parse_health, parse_pokemon_ident,
    parse_request, to_id,
};
use tracing::debug;

use super::battle::{KickingInactive, PokemonRef, Rated, TrackedBattle};
use crate::types::{PokemonState, Volatile, Weather};

/// How a Pokemon entered its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwitchKind {
    Switch,
    Drag,
    Replace,
}

impl TrackedBattle {
    /// Update battle state from a server message
    ///
    /// Messages that refer to unknown Pokemon or carry malformed fields
    /// leave the state untouched.
    pub fn update(&mut self, msg: &ServerMessage, kwargs: &KeywordArgs) {
        match msg {
            // === Battle Initialization ===
            ServerMessage::Player {
                player,
                username,
                avatar,
                rating,
            } => {
                let side = self.get_or_create_side(*player);
                side.set_name(username.as_deref().unwrap_or_default());
                if let Some(avatar) = avatar.as_deref().filter(|a| !a.is_empty()) {
                    side.set_avatar(avatar);
                }
                if let Some(rating) = rating.as_deref().filter(|r| !r.is_empty()) {
                    side.rating = Some(rating.to_string());
                }
            }

            ServerMessage::TeamSize { player, size } => {
                self.get_or_create_side(*player).total_pokemon = *size;
            }

            ServerMessage::GameType(game_type) => {
                self.set_game_type(*game_type);
            }

            ServerMessage::Gen(generation) => {
                self.generation = *generation;
            }

            ServerMessage::Tier(tier) => {
                self.tier = tier.clone();
                if tier.ends_with("Random Battle") {
                    self.species_clause = true;
                }
            }

            ServerMessage::Rated(message) => {
                self.rated = Some(match message.as_deref().filter(|m| !m.is_empty()) {
                    Some(message) => Rated::Message(message.to_string()),
                    None => Rated::Yes,
                });
            }

            ServerMessage::Rule(rule) => {
                if rule.split(": ").next() == Some("Species Clause") {
                    self.species_clause = true;
                }
                self.rules.push(rule.clone());
            }

            ServerMessage::ClearPoke => {
                for player in [Player::P1, Player::P2] {
                    if let Some(side) = self.get_side_mut(player) {
                        side.clear_pokemon();
                    }
                }
            }

            ServerMessage::Poke {
                player,
                details,
                item,
            } => {
                let index = self.remember_team_preview_pokemon(*player, details);
                if item.as_deref() == Some("item")
                    && let Some(poke) = self.pokemon_mut((*player, index))
                {
                    poke.item = Some("(exists)".to_string());
                }
            }

            ServerMessage::TeamPreview(count) => {
                self.team_preview_count = *count;
            }

            ServerMessage::Start => {
                for player in [Player::P1, Player::P2] {
                    if let Some(slot) = self
                        .get_side_mut(player)
                        .and_then(|side| side.active.first_mut())
                    {
                        *slot = None;
                    }
                }
            }

            // === Battle Progress ===
            ServerMessage::Request(json) => {
                if json.is_empty() {
                    return;
                }
                match parse_request(json) {
                    Ok(request) => self.update_from_request(&request),
                    Err(e) => debug!(error = %e, "ignoring unreadable request"),
                }
            }

            ServerMessage::Inactive(message) => {
                self.update_inactive(message);
            }

            ServerMessage::InactiveOff(_) => {
                self.kicking_inactive = KickingInactive::Off;
            }

            ServerMessage::Upkeep => {
                self.field.tick_pseudo_weather();
                for side in self.sides_mut() {
                    side.tick_conditions();
                    for poke in side.get_active_mut() {
                        if poke.status() == Some(Status::BadPoison) {
                            poke.status_data.toxic_turns += 1;
                        }
                    }
                }
            }

            ServerMessage::Turn(turn) => {
                self.turn = *turn;
                for side in self.sides_mut() {
                    for poke in &mut side.pokemon {
                        poke.turn_volatiles.clear();
                    }
                }
            }

            ServerMessage::Win(winner) => {
                self.ended = true;
                self.winner = Some(winner.clone());
            }

            ServerMessage::Tie => {
                self.ended = true;
                self.tie = true;
            }

            // === Major Actions ===
            ServerMessage::Switch {
                pokemon,
                details,
                hp_status,
            } => {
                self.handle_switch(SwitchKind::Switch, pokemon, details, hp_status.as_deref());
            }

            ServerMessage::Drag {
                pokemon,
                details,
                hp_status,
            } => {
                self.handle_switch(SwitchKind::Drag, pokemon, details, hp_status.as_deref());
            }

            ServerMessage::Replace {
                pokemon,
                details,
                hp_status,
            } => {
                self.handle_switch(SwitchKind::Replace, pokemon, details, hp_status.as_deref());
            }

            ServerMessage::Faint(pokemon) => {
                if let Some((player, index)) = self.locate(pokemon)
                    && let Some(side) = self.get_side_mut(player)
                {
                    side.faint(index);
                }
            }

            ServerMessage::Swap { pokemon, position } => {
                self.handle_swap(pokemon, position.as_deref());
            }

            ServerMessage::Move {
                pokemon, move_name, ..
            } => {
                let Some(at) = self.locate(pokemon) else {
                    return;
                };
                if !self.is_in_slot(at) {
                    debug!(pokemon, move_name, "ignoring move from a pokemon not on the field");
                    return;
                }
                if let Some(poke) = self.pokemon_mut(at) {
                    poke.use_move(move_name, kwargs.value(&Keyword::From));
                }
            }

            ServerMessage::Cant {
                pokemon,
                reason,
                move_name,
            } => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.cant_use_move(reason, move_name.as_deref());
                }
            }

            ServerMessage::DetailsChange {
                pokemon,
                details,
                hp_status,
            } => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    let data = parse_details(&poke.name, &poke.ident, details);
                    poke.set_details(data);
                    if let Some(hp) = hp_status {
                        apply_health(poke, hp);
                    }
                }
            }

            // === HP Changes ===
            ServerMessage::Damage { pokemon, hp_status }
            | ServerMessage::Heal { pokemon, hp_status }
            | ServerMessage::SetHp {
                pokemon, hp_status, ..
            } => {
                let Some(at) = self.locate(pokemon) else {
                    return;
                };
                if let Some(poke) = self.pokemon_mut(at) {
                    apply_health(poke, hp_status);
                }
                self.reveal_from(kwargs, Some(at));
            }

            // === Status ===
            ServerMessage::Status { pokemon, status } => {
                let Some(at) = self.locate(pokemon) else {
                    return;
                };
                match Status::from_protocol(status) {
                    Some(status) => {
                        if let Some(poke) = self.pokemon_mut(at) {
                            poke.set_status(Some(status));
                        }
                    }
                    None => debug!(pokemon, status, "unknown status"),
                }
                self.reveal_from(kwargs, Some(at));
            }

            ServerMessage::CureStatus { pokemon, .. } => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.cure_status();
                }
            }

            ServerMessage::CureTeam(pokemon) => {
                if let Some(side) = Player::from_prefix(pokemon).and_then(|p| self.get_side_mut(p)) {
                    for poke in &mut side.pokemon {
                        poke.cure_status();
                    }
                }
            }

            // === Boosts ===
            ServerMessage::Boost {
                pokemon,
                stat,
                amount,
            } => {
                self.handle_boost(pokemon, stat, *amount, kwargs);
            }

            ServerMessage::Unboost {
                pokemon,
                stat,
                amount,
            } => {
                self.handle_boost(pokemon, stat, amount.saturating_neg(), kwargs);
            }

            ServerMessage::SetBoost {
                pokemon,
                stat,
                amount,
            } => match BoostId::parse(stat) {
                Some(stat) => {
                    let Some(stat) = self.boost_stat(stat) else {
                        return;
                    };
                    if let Some(poke) = self.lookup_mut(pokemon) {
                        poke.boosts.set(stat, *amount);
                    }
                }
                None => debug!(pokemon, stat, "unknown boost"),
            },

            ServerMessage::SwapBoost {
                pokemon,
                target,
                stats,
            } => {
                let (Some(first), Some(second)) = (self.locate(pokemon), self.locate(target))
                else {
                    return;
                };
                let (Some(first_boosts), Some(second_boosts)) = (
                    self.pokemon(first).map(|p| p.boosts.clone()),
                    self.pokemon(second).map(|p| p.boosts.clone()),
                ) else {
                    return;
                };

                let stats = BoostId::parse_list(stats.as_deref())
                    .into_iter()
                    .filter_map(|stat| self.boost_stat(stat))
                    .collect::<Vec<_>>();
                for stat in stats {
                    if let Some(poke) = self.pokemon_mut(first) {
                        poke.boosts.set(stat, second_boosts.get(stat));
                    }
                    if let Some(poke) = self.pokemon_mut(second) {
                        poke.boosts.set(stat, first_boosts.get(stat));
                    }
                }
            }

            ServerMessage::CopyBoost {
                pokemon,
                from_pokemon,
                stats,
            } => {
                self.handle_copy_boost(pokemon, from_pokemon, stats.as_deref());
            }

            ServerMessage::ClearBoost(pokemon) => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.boosts.clear();
                }
            }

            ServerMessage::ClearPositiveBoost { target, .. } => {
                if let Some(poke) = self.lookup_mut(target) {
                    poke.boosts.clear_positive();
                }
            }

            ServerMessage::ClearNegativeBoost(pokemon) => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.boosts.clear_negative();
                }
            }

            ServerMessage::InvertBoost(pokemon) => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.boosts.invert();
                }
            }

            ServerMessage::ClearAllBoost => {
                for side in self.sides_mut() {
                    for poke in side.get_active_mut() {
                        poke.boosts.clear();
                    }
                }
            }

            // === Field ===
            ServerMessage::Weather(weather) => {
                if kwargs.has(&Keyword::Upkeep) {
                    self.field.tick_weather();
                    return;
                }
                match Weather::from_protocol(weather) {
                    Some(weather) => {
                        let from_pokemon = kwargs.has(&Keyword::Of);
                        self.field.set_weather(weather, from_pokemon, self.generation);
                        self.reveal_from(kwargs, None);
                    }
                    None => self.field.clear_weather(),
                }
            }

            ServerMessage::FieldStart(condition) => {
                let name = parse_effect(condition).name;
                let persistent = kwargs.has(&Keyword::Persistent);
                self.field.add_pseudo_weather(&name, persistent, self.generation);
                self.reveal_from(kwargs, None);
            }

            ServerMessage::FieldEnd(condition) => {
                let name = parse_effect(condition).name;
                if !self.field.remove_pseudo_weather(&name) {
                    debug!(condition, "ending a field condition that was never started");
                }
            }

            ServerMessage::SideStart { side, condition } => {
                let name = parse_effect(condition).name;
                let persistent = kwargs.has(&Keyword::Persistent);
                let generation = self.generation;
                match Player::from_prefix(side) {
                    Some(player) => {
                        self.get_or_create_side(player)
                            .add_condition(&name, persistent, generation);
                    }
                    None => debug!(side, "unknown side"),
                }
            }

            ServerMessage::SideEnd { side, condition } => {
                let name = parse_effect(condition).name;
                if let Some(side) = Player::from_prefix(side).and_then(|p| self.get_side_mut(p)) {
                    side.remove_condition(&name);
                }
            }

            ServerMessage::SwapSideConditions => {
                if let [Some(p1), Some(p2), _, _] = &mut self.sides {
                    std::mem::swap(&mut p1.conditions, &mut p2.conditions);
                }
            }

            // === Volatiles ===
            ServerMessage::VolatileStart {
                pokemon,
                effect,
                extra,
            } => {
                let Some(at) = self.locate(pokemon) else {
                    return;
                };
                let volatile = Volatile::from_effect(effect);
                if let Some(poke) = self.pokemon_mut(at) {
                    if volatile == Volatile::TypeChange
                        && let Some(types) = extra.first()
                    {
                        poke.types = Some(types.split('/').map(str::to_string).collect());
                    }
                    poke.add_volatile(volatile);
                }
                self.reveal_from(kwargs, Some(at));
            }

            ServerMessage::VolatileEnd { pokemon, effect, .. } => {
                let volatile = Volatile::from_effect(effect);
                if let Some(poke) = self.lookup_mut(pokemon) {
                    if volatile == Volatile::TypeChange {
                        poke.types = None;
                    }
                    poke.remove_volatile(&volatile);
                }
            }

            ServerMessage::SingleTurn { pokemon, move_name } => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.turn_volatiles.insert(Volatile::from_effect(move_name));
                }
            }

            ServerMessage::SingleMove { pokemon, move_name } => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.move_volatiles.insert(Volatile::from_effect(move_name));
                }
            }

            ServerMessage::MustRecharge(pokemon) => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.add_volatile(Volatile::MustRecharge);
                }
            }

            // === Items and Abilities ===
            ServerMessage::Item { pokemon, item } => {
                let Some(at) = self.locate(pokemon) else {
                    return;
                };
                if let Some(poke) = self.pokemon_mut(at) {
                    poke.set_item(item);
                }
                self.activate_from(kwargs, Some(at));
            }

            ServerMessage::EndItem { pokemon, item } => {
                let effect = if kwargs.has(&Keyword::Eat) {
                    Some("eaten".to_string())
                } else {
                    kwargs.value(&Keyword::From).map(|from| parse_effect(from).name)
                };
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.remove_item(item, effect);
                }
            }

            ServerMessage::Ability {
                pokemon, ability, ..
            } => {
                self.handle_ability(pokemon, ability, kwargs);
            }

            ServerMessage::EndAbility { pokemon, ability } => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    if let Some(ability) = ability.as_deref().filter(|a| !a.is_empty()) {
                        poke.remember_ability(ability, false);
                    }
                    poke.add_volatile(Volatile::GastroAcid);
                }
            }

            ServerMessage::Activate {
                pokemon, effect, ..
            } => {
                if let Some(poke) = self.find_pokemon(pokemon).and_then(|at| self.pokemon_mut(at))
                {
                    poke.activate_ability(effect);
                }
            }

            // === Formes ===
            ServerMessage::Transform { pokemon, species } => {
                let Some(at) = self.locate(pokemon) else {
                    return;
                };
                // The second field is usually the target's ident
                let source = self.find_pokemon(species).and_then(|source| self.pokemon(source));
                let (transformed, boosts) = match source {
                    Some(source) => (
                        source.current_species().to_string(),
                        Some(source.boosts.clone()),
                    ),
                    None => (species.clone(), None),
                };

                if let Some(poke) = self.pokemon_mut(at) {
                    poke.transformed = Some(transformed);
                    if let Some(boosts) = boosts {
                        poke.boosts = boosts;
                    }
                    poke.add_volatile(Volatile::Transform);
                }
            }

            ServerMessage::FormeChange {
                pokemon,
                species,
                hp_status,
            } => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.forme = Some(species.clone());
                    poke.add_volatile(Volatile::FormeChange);
                    if let Some(hp) = hp_status {
                        apply_health(poke, hp);
                    }
                }
            }

            ServerMessage::Mega {
                pokemon,
                species,
                item,
            } => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.forme = Some(mega_forme(species, item));
                    poke.set_item(item);
                }
            }

            ServerMessage::Burst {
                pokemon,
                species,
                item,
            } => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.forme = Some(species.clone());
                    poke.set_item(item);
                }
            }

            ServerMessage::Primal(pokemon) => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.forme = Some(format!("{}-Primal", poke.species));
                }
            }

            ServerMessage::Terastallize { pokemon, tera_type } => {
                if let Some(poke) = self.lookup_mut(pokemon) {
                    poke.tera_type = Some(tera_type.clone());
                    poke.terastallized = Some(tera_type.clone());
                }
            }

            // === Display only ===
            _ => {}
        }
    }

    /// Update battle state from a BattleRequest (provides full team info for our side)
    pub fn update_from_request(&mut self, request: &BattleRequest) {
        self.request = Some(request.clone());

        let Some(side_info) = &request.side else {
            return;
        };
        let Some(player) = side_info.player() else {
            debug!(id = %side_info.id, "request for an unknown side");
            return;
        };

        self.set_perspective(player);
        let side = self.get_or_create_side(player);
        if side.name.is_empty() {
            side.set_name(&side_info.name);
        }
        for poke in &mut side.pokemon {
            if let Some(info) = request_pokemon(&side_info.pokemon, poke) {
                apply_request_info(poke, info);
            }
        }
    }

    /// Fill in request information for one of our own Pokemon
    pub(crate) fn sync_from_request(&mut self, (player, index): PokemonRef) {
        let Some(side_info) = self.request.as_ref().and_then(|r| r.side.as_ref()) else {
            return;
        };
        if side_info.player() != Some(player) {
            return;
        }
        let Some(poke) = self.sides[player.index()]
            .as_mut()
            .and_then(|side| side.pokemon.get_mut(index))
        else {
            return;
        };
        if let Some(info) = request_pokemon(&side_info.pokemon, poke) {
            apply_request_info(poke, info);
        }
    }

    /// Resolve an ident, logging when nothing matches
    fn locate(&mut self, ident: &str) -> Option<PokemonRef> {
        let found = self.resolve_pokemon(ident);
        if found.is_none() {
            debug!(ident, "no pokemon matches ident");
        }
        found
    }

    fn lookup_mut(&mut self, ident: &str) -> Option<&mut PokemonState> {
        let at = self.locate(ident)?;
        self.pokemon_mut(at)
    }

    /// Handle a switch, drag or replace message
    fn handle_switch(
        &mut self,
        kind: SwitchKind,
        pokemon: &str,
        details: &str,
        hp_status: Option<&str>,
    ) {
        let Some(at @ (player, index)) = self.get_switched_pokemon(pokemon, details) else {
            debug!(pokemon, details, "cannot switch in unparseable pokemon");
            return;
        };

        if let Some(poke) = self.pokemon_mut(at) {
            if let Some(hp) = hp_status {
                apply_health(poke, hp);
            }
            poke.remove_volatile(&Volatile::ItemRemoved);
        }

        let Some(side) = self.get_side_mut(player) else {
            return;
        };
        match kind {
            SwitchKind::Switch => {
                if let Some(old) = side.active_index(side.slot_of(index)) {
                    side.switch_out(old);
                }
                side.switch_in(index);
            }
            SwitchKind::Drag => side.drag_in(index),
            SwitchKind::Replace => side.replace(index),
        }
    }

    /// Handle a swap message; the position is a slot number or an ident
    fn handle_swap(&mut self, pokemon: &str, position: Option<&str>) {
        let Some((player, index)) = self.locate(pokemon) else {
            return;
        };
        let Some(position) = position else {
            debug!(pokemon, "swap without a position");
            return;
        };

        let other = match position.trim().parse::<usize>() {
            Ok(slot) => {
                match self.get_side_mut(player) {
                    Some(side) if slot < side.active.len() => side.swap_to(index, slot),
                    _ => debug!(pokemon, slot, "swap to a slot outside the field"),
                }
                return;
            }
            Err(_) => self.locate(position),
        };

        match other {
            Some((other_player, other)) if other_player == player => {
                if let Some(side) = self.get_side_mut(player) {
                    side.swap_with(index, other);
                }
            }
            _ => debug!(pokemon, position, "swap partner not found"),
        }
    }

    /// Gen 1 has a single special stat stored as `spc`
    fn boost_stat(&self, stat: BoostId) -> Option<BoostId> {
        match (self.generation, stat) {
            (1, BoostId::Spd) => None,
            (1, BoostId::Spa) => Some(BoostId::Spc),
            _ => Some(stat),
        }
    }

    fn handle_boost(&mut self, pokemon: &str, stat: &str, amount: i32, kwargs: &KeywordArgs) {
        let Some(at) = self.locate(pokemon) else {
            return;
        };
        let Some(stat) = BoostId::parse(stat) else {
            debug!(pokemon, stat, "unknown boost");
            return;
        };
        let Some(stat) = self.boost_stat(stat) else {
            return;
        };
        if amount == 0 {
            return;
        }

        if let Some(poke) = self.pokemon_mut(at) {
            poke.boosts.boost(stat, amount);
        }

        if kwargs.has(&Keyword::Silent) {
            return;
        }
        if let Some(from) = kwargs.value(&Keyword::From) {
            // Weak Armor raising Speed is a side effect of the Defense drop
            let weak_armor = to_id(&parse_effect(from).name) == "weakarmor";
            if !(amount > 0 && weak_armor && stat == BoostId::Spe) {
                self.activate_from(kwargs, Some(at));
            }
        }
    }

    fn handle_copy_boost(&mut self, pokemon: &str, from_pokemon: &str, stats: Option<&str>) {
        let (Some(at), Some(from)) = (self.locate(pokemon), self.locate(from_pokemon)) else {
            return;
        };
        let Some(source) = self.pokemon(from).cloned() else {
            return;
        };
        let generation = self.generation;

        let Some(poke) = self.pokemon_mut(at) else {
            return;
        };
        for stat in BoostId::parse_list(stats) {
            poke.boosts.set(stat, source.boosts.get(stat));
        }
        if generation >= 6 {
            for volatile in [Volatile::FocusEnergy, Volatile::LaserFocus] {
                if source.has_volatile(&volatile) {
                    poke.add_volatile(volatile);
                } else {
                    poke.remove_volatile(&volatile);
                }
            }
        }
    }

    fn handle_ability(&mut self, pokemon: &str, ability: &str, kwargs: &KeywordArgs) {
        let Some(at) = self.locate(pokemon) else {
            return;
        };

        match kwargs.value(&Keyword::From) {
            // Trace, Skill Swap and the like: the new ability is not the base one
            Some(from) => {
                if let Some(poke) = self.pokemon_mut(at) {
                    poke.activate_ability(from);
                    poke.remember_ability(ability, true);
                }
                if let Some(of) = kwargs.value(&Keyword::Of).and_then(|of| self.find_pokemon(of))
                    && let Some(source) = self.pokemon_mut(of)
                {
                    source.remember_ability(ability, false);
                }
            }
            None => {
                if let Some(poke) = self.pokemon_mut(at) {
                    poke.remember_ability(ability, false);
                }
            }
        }
    }

    fn update_inactive(&mut self, message: &str) {
        if self.kicking_inactive == KickingInactive::Off {
            self.kicking_inactive = KickingInactive::OnUnknown;
        }
        let seconds = |value: Option<i64>| match value {
            Some(secs) if secs != 0 => KickingInactive::Seconds(secs),
            _ => KickingInactive::OnUnknown,
        };

        if let Some(rest) = message.strip_prefix("Time left: ") {
            let mut parts = rest.split(" | ");
            let time = parts.next().and_then(leading_int);
            let total = parts.next().and_then(leading_int);
            let grace = parts.next().and_then(leading_int);

            self.kicking_inactive = seconds(time);
            self.total_time_left = total;
            self.grace_time_left = grace.unwrap_or(0);
            if let KickingInactive::Seconds(kicking) = self.kicking_inactive
                && total == Some(kicking)
            {
                self.total_time_left = Some(0);
            }
        } else if let Some(rest) = message.strip_prefix("You have ") {
            self.kicking_inactive = seconds(leading_int(rest));
        } else if message.ends_with(" seconds left.")
            && let Some((name, rest)) = message.split_once(" has ")
            && self.config().user_id.as_deref() == Some(to_id(name).as_str())
        {
            self.kicking_inactive = seconds(leading_int(rest));
        }
    }

    /// Credit the ability behind a `[from]` effect to its owner
    ///
    /// The owner is the `[of]` Pokemon, falling back to `default`.
    fn activate_from(&mut self, kwargs: &KeywordArgs, default: Option<PokemonRef>) {
        let Some(from) = kwargs.value(&Keyword::From) else {
            return;
        };
        let owner = kwargs
            .value(&Keyword::Of)
            .and_then(|of| self.find_pokemon(of))
            .or(default);
        if let Some(poke) = owner.and_then(|at| self.pokemon_mut(at)) {
            poke.activate_ability(from);
        }
    }

    /// Like [`Self::activate_from`], also revealing held items
    fn reveal_from(&mut self, kwargs: &KeywordArgs, default: Option<PokemonRef>) {
        let Some(from) = kwargs.value(&Keyword::From) else {
            return;
        };
        let effect = parse_effect(from);
        if effect.kind != Some(EffectKind::Item) {
            self.activate_from(kwargs, default);
            return;
        }

        let owner = kwargs
            .value(&Keyword::Of)
            .and_then(|of| self.find_pokemon(of))
            .or(default);
        if let Some(poke) = owner.and_then(|at| self.pokemon_mut(at)) {
            poke.set_item(&effect.name);
        }
    }
}

fn apply_health(poke: &mut PokemonState, hp_status: &str) {
    match parse_health(hp_status, Some(&poke.health)) {
        Some(health) => poke.health = health,
        None => debug!(pokemon = %poke.ident, hp_status, "malformed hp"),
    }
}

/// The request entry describing one of our roster entries
fn request_pokemon<'a>(
    entries: &'a [SidePokemon],
    poke: &PokemonState,
) -> Option<&'a SidePokemon> {
    entries.iter().find(|info| {
        parse_pokemon_ident(&info.ident).is_some_and(|ident| ident.base_ident() == poke.ident)
            && (info.details == poke.details || poke.searchid.is_empty())
    })
}

/// Take over what the request knows and the battle log has not shown yet
fn apply_request_info(poke: &mut PokemonState, info: &SidePokemon) {
    for move_id in &info.moves {
        if poke.move_uses(move_id).is_none() {
            poke.remember_move(move_id, 0);
        }
    }
    if !info.base_ability.is_empty() {
        poke.base_ability = Some(info.base_ability.clone());
    }
    if !info.ability.is_empty() {
        poke.ability = Some(info.ability.clone());
    } else if poke.ability.is_none() {
        poke.ability = poke.base_ability.clone();
    }
    poke.item = (!info.item.is_empty()).then(|| info.item.clone());
    if info.teratype.is_some() {
        poke.tera_type = info.teratype.clone();
    }
    if info.terastallized.is_some() {
        poke.terastallized = info.terastallized.clone();
    }
}

/// Forme shown after mega evolving; X and Y stones pick their own forme
fn mega_forme(species: &str, stone: &str) -> String {
    match stone.rsplit_once(' ') {
        Some((_, suffix @ ("X" | "Y"))) => format!("{species}-Mega-{suffix}"),
        _ => format!("{species}-Mega"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::TrackerConfig;
    use showdown_protocol::GameType;

    fn apply(battle: &mut TrackedBattle, lines: &[&str]) {
        for line in lines {
            battle.apply_line(line).unwrap();
        }
    }

    fn create_singles_battle() -> TrackedBattle {
        let mut battle = TrackedBattle::new();
        apply(
            &mut battle,
            &[
                "|player|p1|Alice|60|1500",
                "|player|p2|Bob|1|",
                "|gametype|singles",
                "|gen|9",
                "|start",
                "|switch|p1a: Pikachu|Pikachu, L50, M|100/100",
                "|switch|p2a: Garchomp|Garchomp, L50, F|100/100",
                "|turn|1",
            ],
        );
        battle
    }

    fn active(battle: &TrackedBattle, player: Player, slot: usize) -> Option<&PokemonState> {
        battle.get_side(player)?.active_pokemon(slot)
    }

    #[test]
    fn test_update_battle_player() {
        let mut battle = TrackedBattle::new();

        battle.update(
            &ServerMessage::Player {
                player: Player::P1,
                username: Some("Alice".to_string()),
                avatar: Some("60".to_string()),
                rating: Some("1500".to_string()),
            },
            &KeywordArgs::new(),
        );

        let side = battle.get_side(Player::P1).unwrap();
        assert_eq!(side.name, "Alice");
        assert_eq!(side.avatar, "60");
        assert_eq!(side.rating.as_deref(), Some("1500"));
    }

    #[test]
    fn test_update_game_type() {
        let mut battle = TrackedBattle::new();
        battle.get_or_create_side(Player::P1);

        battle.update(&ServerMessage::GameType(GameType::Doubles), &KeywordArgs::new());

        assert_eq!(battle.game_type, Some(GameType::Doubles));
        assert_eq!(battle.get_side(Player::P1).unwrap().active.len(), 2);
    }

    #[test]
    fn test_update_switch() {
        let battle = create_singles_battle();

        let poke = active(&battle, Player::P1, 0).unwrap();
        assert_eq!(poke.species, "Pikachu");
        assert_eq!(poke.level, 50);
        assert_eq!(poke.health.hp, 100.0);
        assert_eq!(battle.turn, 1);
        assert!(battle.is_active());
    }

    #[test]
    fn test_update_switch_out_clears_boosts() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-boost|p1a: Pikachu|atk|2",
                "|switch|p1a: Raichu|Raichu, L50, M|100/100",
            ],
        );

        let side = battle.get_side(Player::P1).unwrap();
        assert_eq!(side.active_pokemon(0).unwrap().species, "Raichu");
        assert!(side.pokemon[0].boosts.is_empty());
        assert_eq!(side.last_pokemon, Some(0));
    }

    #[test]
    fn test_update_doubles_swap() {
        let mut battle = TrackedBattle::new();
        apply(
            &mut battle,
            &[
                "|gametype|doubles",
                "|switch|p1a: A|Pikachu, L50, M|100/100",
                "|switch|p1b: B|Eevee, L50, F|100/100",
                "|swap|p1a: A|1",
            ],
        );

        assert_eq!(active(&battle, Player::P1, 0).unwrap().species, "Eevee");
        assert_eq!(active(&battle, Player::P1, 1).unwrap().species, "Pikachu");
    }

    #[test]
    fn test_update_swap_past_field_is_ignored() {
        let mut battle = TrackedBattle::new();
        apply(
            &mut battle,
            &[
                "|gametype|doubles",
                "|switch|p1a: A|Pikachu|100/100",
                "|swap|p1a: A|18446744073709551615",
                "|swap|p1a: A|2",
            ],
        );

        let side = battle.get_side(Player::P1).unwrap();
        assert_eq!(side.active, vec![Some(0), None]);
        assert_eq!(side.pokemon[0].slot, 0);
    }

    #[test]
    fn test_update_damage_and_heal() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-damage|p2a: Garchomp|40/100",
                "|-heal|p2a: Garchomp|46/100|[from] item: Leftovers",
                "|-damage|p1a: Pikachu|0 fnt",
                "|faint|p1a: Pikachu",
            ],
        );

        let garchomp = active(&battle, Player::P2, 0).unwrap();
        assert_eq!(garchomp.health.hp, 46.0);
        assert_eq!(garchomp.item.as_deref(), Some("Leftovers"));

        let side = battle.get_side(Player::P1).unwrap();
        assert_eq!(side.active_index(0), None);
        assert!(side.pokemon[0].is_fainted());
    }

    #[test]
    fn test_update_malformed_hp_is_skipped() {
        let mut battle = create_singles_battle();
        apply(&mut battle, &["|-damage|p2a: Garchomp|x/y"]);

        assert_eq!(active(&battle, Player::P2, 0).unwrap().health.hp, 100.0);
    }

    #[test]
    fn test_update_status() {
        let mut battle = create_singles_battle();
        apply(&mut battle, &["|-status|p2a: Garchomp|tox", "|upkeep", "|upkeep"]);
        let garchomp = active(&battle, Player::P2, 0).unwrap();
        assert_eq!(garchomp.status(), Some(Status::BadPoison));
        assert_eq!(garchomp.status_data.toxic_turns, 2);

        apply(&mut battle, &["|-curestatus|p2a: Garchomp|tox"]);
        assert_eq!(active(&battle, Player::P2, 0).unwrap().status(), None);
    }

    #[test]
    fn test_update_gen1_boosts() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|gen|1",
                "|-boost|p1a: Pikachu|spa|1",
                "|-boost|p1a: Pikachu|spd|2",
                "|-boost|p1a: Pikachu|atk|0",
            ],
        );

        let boosts = &active(&battle, Player::P1, 0).unwrap().boosts;
        assert_eq!(boosts.spc, Some(1));
        assert_eq!(boosts.spa, None);
        assert_eq!(boosts.spd, None);
        assert_eq!(boosts.atk, None);
    }

    #[test]
    fn test_update_boost_reveals_ability() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-unboost|p2a: Garchomp|atk|1|[from] ability: Intimidate|[of] p1a: Pikachu",
                "|-boost|p2a: Garchomp|spe|2|[from] ability: Weak Armor",
            ],
        );

        let pikachu = active(&battle, Player::P1, 0).unwrap();
        assert_eq!(pikachu.ability.as_deref(), Some("Intimidate"));

        let garchomp = active(&battle, Player::P2, 0).unwrap();
        assert_eq!(garchomp.boosts.atk, Some(-1));
        assert_eq!(garchomp.boosts.spe, Some(2));
        assert_eq!(garchomp.ability, None);
    }

    #[test]
    fn test_update_swapboost() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-boost|p1a: Pikachu|atk|2",
                "|-unboost|p2a: Garchomp|def|1",
                "|-swapboost|p1a: Pikachu|p2a: Garchomp|atk, def",
            ],
        );

        let pikachu = active(&battle, Player::P1, 0).unwrap();
        assert_eq!((pikachu.boosts.atk, pikachu.boosts.def), (None, Some(-1)));
        let garchomp = active(&battle, Player::P2, 0).unwrap();
        assert_eq!((garchomp.boosts.atk, garchomp.boosts.def), (Some(2), None));
    }

    #[test]
    fn test_update_copyboost_volatiles() {
        let mut battle = TrackedBattle::new();
        apply(
            &mut battle,
            &[
                "|gametype|doubles",
                "|gen|9",
                "|switch|p1a: A|Pikachu|100/100",
                "|switch|p1b: B|Eevee|100/100",
                "|-boost|p1b: B|atk|2",
                "|-start|p1b: B|move: Focus Energy",
                "|-start|p1a: A|Laser Focus",
                "|-copyboost|p1a: A|p1b: B",
            ],
        );

        let a = active(&battle, Player::P1, 0).unwrap();
        assert_eq!(a.boosts.atk, Some(2));
        assert!(a.has_volatile(&Volatile::FocusEnergy));
        assert!(!a.has_volatile(&Volatile::LaserFocus));
    }

    #[test]
    fn test_update_clear_all_boost() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-boost|p1a: Pikachu|atk|2",
                "|-unboost|p2a: Garchomp|spe|1",
                "|-clearallboost",
            ],
        );

        assert!(active(&battle, Player::P1, 0).unwrap().boosts.is_empty());
        assert!(active(&battle, Player::P2, 0).unwrap().boosts.is_empty());
    }

    #[test]
    fn test_update_set_and_clear_boosts() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-setboost|p1a: Pikachu|atk|6|[from] move: Belly Drum",
                "|-boost|p1a: Pikachu|spe|1",
                "|-unboost|p1a: Pikachu|def|2",
                "|-boost|p2a: Garchomp|atk|1",
                "|-unboost|p2a: Garchomp|spe|1",
                "|-boost|p2a: Garchomp|def|1",
                "|-clearnegativeboost|p2a: Garchomp",
            ],
        );

        let boosts = &active(&battle, Player::P1, 0).unwrap().boosts;
        assert_eq!((boosts.atk, boosts.spe, boosts.def), (Some(6), Some(1), Some(-2)));
        let boosts = &active(&battle, Player::P2, 0).unwrap().boosts;
        assert_eq!((boosts.atk, boosts.spe, boosts.def), (Some(1), None, Some(1)));

        apply(
            &mut battle,
            &[
                "|-clearpositiveboost|p1a: Pikachu|p2a: Garchomp|move: Spectral Thief",
                "|-clearboost|p2a: Garchomp",
            ],
        );

        let boosts = &active(&battle, Player::P1, 0).unwrap().boosts;
        assert_eq!((boosts.atk, boosts.spe, boosts.def), (None, None, Some(-2)));
        assert!(active(&battle, Player::P2, 0).unwrap().boosts.is_empty());
    }

    #[test]
    fn test_update_invertboost() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-boost|p2a: Garchomp|atk|2",
                "|-unboost|p2a: Garchomp|spe|1",
                "|-invertboost|p2a: Garchomp",
            ],
        );

        let boosts = &active(&battle, Player::P2, 0).unwrap().boosts;
        assert_eq!((boosts.atk, boosts.spe), (Some(-2), Some(1)));
    }

    #[test]
    fn test_update_gen1_set_and_swap_boosts() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|gen|1",
                "|-setboost|p1a: Pikachu|spa|2",
                "|-setboost|p1a: Pikachu|spd|3",
                "|-boost|p2a: Garchomp|spa|-1",
                "|-swapboost|p1a: Pikachu|p2a: Garchomp|spa, spd",
            ],
        );

        let pikachu = &active(&battle, Player::P1, 0).unwrap().boosts;
        assert_eq!((pikachu.spc, pikachu.spa, pikachu.spd), (Some(-1), None, None));
        let garchomp = &active(&battle, Player::P2, 0).unwrap().boosts;
        assert_eq!((garchomp.spc, garchomp.spa, garchomp.spd), (Some(2), None, None));
    }

    #[test]
    fn test_update_extreme_boost_amounts() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-unboost|p1a: Pikachu|atk|-2147483648",
                "|-boost|p1a: Pikachu|def|2147483647",
                "|-boost|p1a: Pikachu|def|1",
            ],
        );

        let boosts = &active(&battle, Player::P1, 0).unwrap().boosts;
        assert_eq!(boosts.atk, Some(i32::MAX));
        assert_eq!(boosts.def, Some(i32::MAX));
    }

    #[test]
    fn test_update_move_records_and_stale_guard() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|move|p1a: Pikachu|Thunderbolt|p2a: Garchomp",
                "|move|p1a: Pikachu|Metronome|p1a: Pikachu",
                "|move|p1a: Pikachu|Flamethrower|p2a: Garchomp|[from] move: Metronome",
                "|faint|p1a: Pikachu",
                "|move|p1a: Pikachu|Thunderbolt|p2a: Garchomp",
            ],
        );

        let pikachu = &battle.get_side(Player::P1).unwrap().pokemon[0];
        assert_eq!(pikachu.move_uses("Thunderbolt"), Some(1));
        assert_eq!(pikachu.move_uses("Metronome"), Some(1));
        assert_eq!(pikachu.move_uses("Flamethrower"), None);
        assert_eq!(pikachu.last_move.as_deref(), Some("flamethrower"));
    }

    #[test]
    fn test_update_replace_and_drag() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-damage|p1a: Pikachu|50/100",
                "|replace|p1a: Zoroark|Zoroark, L50, M|50/100",
            ],
        );

        let side = battle.get_side(Player::P1).unwrap();
        assert_eq!(side.active_pokemon(0).unwrap().species, "Zoroark");
        assert_eq!(side.pokemon[1].health.hp, 50.0);
        assert_eq!(side.pokemon[0].health.hp, 100.0);
        assert_eq!(side.pokemon[0].status(), Some(Status::Unknown));

        apply(&mut battle, &["|drag|p1a: Eevee|Eevee, L50, F|100/100"]);
        let side = battle.get_side(Player::P1).unwrap();
        assert_eq!(side.active_pokemon(0).unwrap().species, "Eevee");
        assert_eq!(side.last_pokemon, Some(1));
    }

    #[test]
    fn test_update_team_preview() {
        let mut battle = TrackedBattle::new();
        apply(
            &mut battle,
            &[
                "|clearpoke",
                "|poke|p2|Urshifu-*, L50|item",
                "|poke|p2|Garchomp, L50, F|",
                "|teampreview|6",
                "|switch|p2a: Urshifu|Urshifu-Rapid-Strike, L50|100/100",
            ],
        );

        assert_eq!(battle.team_preview_count, Some(6));
        let side = battle.get_side(Player::P2).unwrap();
        assert_eq!(side.pokemon.len(), 2);
        assert_eq!(side.pokemon[0].species, "Urshifu-Rapid-Strike");
        assert_eq!(side.pokemon[0].item.as_deref(), Some("(exists)"));
        assert_eq!(side.pokemon[1].item, None);
    }

    #[test]
    fn test_update_tier_and_rules() {
        let mut battle = TrackedBattle::new();
        apply(&mut battle, &["|tier|[Gen 9] OU", "|rule|Sleep Clause Mod: Limit one foe put to sleep"]);
        assert!(!battle.species_clause);

        apply(&mut battle, &["|rule|Species Clause: Limit one of each Pokémon"]);
        assert!(battle.species_clause);
        assert_eq!(battle.rules.len(), 2);

        let mut random = TrackedBattle::new();
        apply(&mut random, &["|tier|[Gen 9] Random Battle", "|rated|"]);
        assert!(random.species_clause);
        assert_eq!(random.rated, Some(Rated::Yes));
    }

    #[test]
    fn test_update_inactive() {
        let mut battle = TrackedBattle::with_config(TrackerConfig {
            user_id: Some("alice".to_string()),
        });

        apply(
            &mut battle,
            &["|inactive|Time left: 120 sec this turn | 300 sec total | 30 sec grace"],
        );
        assert_eq!(battle.kicking_inactive, KickingInactive::Seconds(120));
        assert_eq!(battle.total_time_left, Some(300));
        assert_eq!(battle.grace_time_left, 30);

        apply(&mut battle, &["|inactive|Time left: 150 sec this turn | 150 sec total"]);
        assert_eq!(battle.total_time_left, Some(0));
        assert_eq!(battle.grace_time_left, 0);

        apply(&mut battle, &["|inactive|You have 60 seconds to make your decision."]);
        assert_eq!(battle.kicking_inactive, KickingInactive::Seconds(60));

        apply(&mut battle, &["|inactive|Alice has 30 seconds left."]);
        assert_eq!(battle.kicking_inactive, KickingInactive::Seconds(30));

        apply(&mut battle, &["|inactive|Bob has 20 seconds left."]);
        assert_eq!(battle.kicking_inactive, KickingInactive::Seconds(30));

        apply(&mut battle, &["|inactiveoff|Battle timer is now OFF."]);
        assert_eq!(battle.kicking_inactive, KickingInactive::Off);

        apply(&mut battle, &["|inactive|Battle timer is ON: inactive players will automatically lose when time's up."]);
        assert_eq!(battle.kicking_inactive, KickingInactive::OnUnknown);
    }

    #[test]
    fn test_update_weather() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &["|-weather|RainDance|[from] ability: Drizzle|[of] p1a: Pikachu"],
        );
        assert_eq!(battle.field.weather, Some(Weather::Rain));
        assert_eq!(battle.field.weather_turns_left, 8);
        assert_eq!(
            active(&battle, Player::P1, 0).unwrap().ability.as_deref(),
            Some("Drizzle")
        );

        apply(&mut battle, &["|-weather|RainDance|[upkeep]"]);
        assert_eq!(battle.field.weather, Some(Weather::Rain));
        assert_eq!(battle.field.weather_turns_left, 7);

        apply(&mut battle, &["|-weather|none"]);
        assert_eq!(battle.field.weather, None);
    }

    #[test]
    fn test_update_field_conditions() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &["|-fieldstart|move: Trick Room|[of] p1a: Pikachu", "|upkeep"],
        );
        assert_eq!(battle.field.pseudo_weather[0].min_turns_left, 4);

        apply(&mut battle, &["|-fieldend|move: Trick Room"]);
        assert!(battle.field.pseudo_weather.is_empty());
    }

    #[test]
    fn test_update_side_conditions() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-sidestart|p2: Bob|Spikes",
                "|-sidestart|p2: Bob|Spikes",
                "|-sidestart|p1: Alice|move: Reflect",
                "|-swapsideconditions",
            ],
        );

        let p1 = battle.get_side(Player::P1).unwrap();
        assert_eq!(p1.condition_layers("spikes"), 2);
        assert!(!p1.has_condition("reflect"));
        assert!(battle.get_side(Player::P2).unwrap().has_condition("Reflect"));

        apply(&mut battle, &["|-sideend|p1: Alice|Spikes"]);
        assert!(!battle.get_side(Player::P1).unwrap().has_condition("spikes"));
    }

    #[test]
    fn test_update_volatiles() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-start|p2a: Garchomp|Substitute",
                "|-start|p2a: Garchomp|typechange|Water/Flying|[from] move: Soak",
                "|-singleturn|p2a: Garchomp|Protect",
            ],
        );

        let garchomp = active(&battle, Player::P2, 0).unwrap();
        assert!(garchomp.has_volatile(&Volatile::Substitute));
        assert_eq!(
            garchomp.types,
            Some(vec!["Water".to_string(), "Flying".to_string()])
        );
        assert!(garchomp.turn_volatiles.contains(&Volatile::Protect));

        apply(&mut battle, &["|-end|p2a: Garchomp|Substitute", "|turn|2"]);
        let garchomp = active(&battle, Player::P2, 0).unwrap();
        assert!(!garchomp.has_volatile(&Volatile::Substitute));
        assert!(garchomp.turn_volatiles.is_empty());
    }

    #[test]
    fn test_update_items() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-item|p2a: Garchomp|Sitrus Berry",
                "|-enditem|p2a: Garchomp|Sitrus Berry|[eat]",
            ],
        );

        let garchomp = active(&battle, Player::P2, 0).unwrap();
        assert_eq!(garchomp.item, None);
        assert_eq!(garchomp.prev_item.as_deref(), Some("Sitrus Berry"));
        assert_eq!(garchomp.prev_item_effect.as_deref(), Some("eaten"));
        assert!(garchomp.has_volatile(&Volatile::ItemRemoved));
    }

    #[test]
    fn test_update_traced_ability() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &["|-ability|p1a: Pikachu|Rough Skin|[from] ability: Trace|[of] p2a: Garchomp"],
        );

        let pikachu = active(&battle, Player::P1, 0).unwrap();
        assert_eq!(pikachu.ability.as_deref(), Some("Rough Skin"));
        assert_eq!(pikachu.base_ability.as_deref(), Some("Trace"));
        let garchomp = active(&battle, Player::P2, 0).unwrap();
        assert_eq!(garchomp.ability.as_deref(), Some("Rough Skin"));
    }

    #[test]
    fn test_update_transform_and_formes() {
        let mut battle = create_singles_battle();
        apply(
            &mut battle,
            &[
                "|-boost|p2a: Garchomp|atk|1",
                "|-transform|p1a: Pikachu|p2a: Garchomp",
                "|-terastallize|p2a: Garchomp|Steel",
            ],
        );

        let pikachu = active(&battle, Player::P1, 0).unwrap();
        assert_eq!(pikachu.transformed.as_deref(), Some("Garchomp"));
        assert_eq!(pikachu.boosts.atk, Some(1));
        assert!(pikachu.has_volatile(&Volatile::Transform));
        assert_eq!(
            active(&battle, Player::P2, 0).unwrap().terastallized.as_deref(),
            Some("Steel")
        );

        apply(&mut battle, &["|detailschange|p2a: Garchomp|Garchomp-Mega, L50, F"]);
        let garchomp = active(&battle, Player::P2, 0).unwrap();
        assert_eq!(garchomp.species, "Garchomp-Mega");
        assert_eq!(garchomp.current_species(), "Garchomp-Mega");
    }

    #[test]
    fn test_mega_forme() {
        assert_eq!(mega_forme("Charizard", "Charizardite X"), "Charizard-Mega-X");
        assert_eq!(mega_forme("Venusaur", "Venusaurite"), "Venusaur-Mega");
    }

    #[test]
    fn test_update_from_request() {
        let mut battle = TrackedBattle::new();
        let request = r#"{"rqid":1,"side":{"name":"Alice","id":"p1","pokemon":[{"ident":"p1: Pikachu","details":"Pikachu, L50, M","condition":"120/120","active":true,"moves":["thunderbolt","voltswitch"],"baseAbility":"static","ability":"static","item":"lightball","teraType":"Electric"}]}}"#;
        apply(&mut battle, &[&format!("|request|{request}")]);
        assert_eq!(battle.perspective(), Some(Player::P1));
        assert_eq!(battle.me().map(|s| s.name.as_str()), Some("Alice"));
        assert!(battle.request().is_some());

        apply(&mut battle, &["|switch|p1a: Pikachu|Pikachu, L50, M|120/120"]);
        let pikachu = active(&battle, Player::P1, 0).unwrap();
        assert_eq!(pikachu.item.as_deref(), Some("lightball"));
        assert_eq!(pikachu.base_ability.as_deref(), Some("static"));
        assert_eq!(pikachu.move_uses("voltswitch"), Some(0));
        assert_eq!(pikachu.health.maxhp, 120.0);
    }

    #[test]
    fn test_update_win() {
        let mut battle = create_singles_battle();
        apply(&mut battle, &["|win|Alice"]);
        assert!(battle.ended);
        assert_eq!(battle.winner.as_deref(), Some("Alice"));
        assert!(!battle.is_active());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_snapshot_serializes() {
        let mut battle = create_singles_battle();
        apply(&mut battle, &["|-start|p2a: Garchomp|Substitute", "|-weather|Sandstorm"]);

        let value = serde_json::to_value(&battle).unwrap();
        assert_eq!(value["turn"], 1);
        assert_eq!(value["sides"][0]["name"], "Alice");
        assert_eq!(value["sides"][1]["pokemon"][0]["volatiles"][0], "substitute");
        assert_eq!(value["game_type"], "singles");
        assert!(value.get("request").is_none());
    }
}
