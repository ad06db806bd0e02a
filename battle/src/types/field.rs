//! Global field state

use showdown_protocol::to_id;

use super::conditions::{PseudoWeather, Weather};

/// Global field state affecting all Pokemon
///
/// Turn counters of 0 mean unknown or unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldState {
    pub weather: Option<Weather>,

    /// Turns left if no weather rock is held
    pub weather_min_turns_left: u32,

    /// Turns left if one is
    pub weather_turns_left: u32,

    /// Terrains, rooms, Gravity and the like, in start order
    pub pseudo_weather: Vec<PseudoWeather>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all field conditions
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Start a weather
    ///
    /// `from_pokemon` is set when a Pokemon (usually its ability) caused it.
    /// Abilities set permanent weather up to generation 5.
    pub fn set_weather(&mut self, weather: Weather, from_pokemon: bool, generation: u8) {
        let (min, max) = if weather.is_primal() {
            (0, 0)
        } else if from_pokemon {
            if generation <= 5 { (0, 0) } else { (5, 8) }
        } else if generation <= 3 {
            (0, 5)
        } else {
            (5, 8)
        };

        self.weather = Some(weather);
        self.weather_min_turns_left = min;
        self.weather_turns_left = max;
    }

    pub fn clear_weather(&mut self) {
        self.weather = None;
        self.weather_min_turns_left = 0;
        self.weather_turns_left = 0;
    }

    /// Count down the weather for an `[upkeep]` weather line
    pub fn tick_weather(&mut self) {
        if self.weather.is_some() && self.weather_turns_left > 0 {
            self.weather_turns_left -= 1;
            self.weather_min_turns_left = self.weather_min_turns_left.saturating_sub(1);
        }
    }

    pub fn has_pseudo_weather(&self, name: &str) -> bool {
        let id = to_id(name);
        self.pseudo_weather.iter().any(|pw| pw.id() == id)
    }

    /// Start a pseudo-weather, or restart its counters if already present
    ///
    /// A new terrain replaces the current one.
    pub fn add_pseudo_weather(&mut self, name: &str, persistent: bool, generation: u8) {
        let id = to_id(name);
        let is_terrain = id.ends_with("terrain");
        if is_terrain {
            self.pseudo_weather.retain(|pw| !pw.is_terrain() || pw.id() == id);
        }

        let min_turns_left = if persistent { 7 } else { 5 };
        let turns_left = if is_terrain && generation > 6 { 8 } else { 0 };

        match self.pseudo_weather.iter_mut().find(|pw| pw.id() == id) {
            Some(existing) => {
                existing.min_turns_left = min_turns_left;
                existing.turns_left = turns_left;
            }
            None => self.pseudo_weather.push(PseudoWeather {
                name: name.to_string(),
                min_turns_left,
                turns_left,
            }),
        }
    }

    pub fn remove_pseudo_weather(&mut self, name: &str) -> bool {
        let id = to_id(name);
        let before = self.pseudo_weather.len();
        self.pseudo_weather.retain(|pw| pw.id() != id);
        self.pseudo_weather.len() != before
    }

    /// Count down every pseudo-weather by one turn
    pub fn tick_pseudo_weather(&mut self) {
        for pw in &mut self.pseudo_weather {
            pw.tick();
        }
    }

    /// The active terrain, if any
    pub fn terrain(&self) -> Option<&PseudoWeather> {
        self.pseudo_weather.iter().find(|pw| pw.is_terrain())
    }
}
