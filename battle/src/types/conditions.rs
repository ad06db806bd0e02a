//! Weather, pseudo-weather and side conditions

use showdown_protocol::to_id;

/// Weather conditions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
    Snow,        // Gen 9 replacement for Hail
    HarshSun,    // Desolate Land (Primal Groudon)
    HeavyRain,   // Primordial Sea (Primal Kyogre)
    StrongWinds, // Delta Stream (Mega Rayquaza)
    /// Weather this crate has no name for, kept as its ID
    Other(String),
}

impl Weather {
    /// Parse the effect field of `|-weather|`; `none` yields `None`
    pub fn from_protocol(s: &str) -> Option<Self> {
        let weather = match to_id(s).as_str() {
            "sunnyday" | "sun" => Weather::Sun,
            "raindance" | "rain" => Weather::Rain,
            "sandstorm" | "sand" => Weather::Sand,
            "hail" => Weather::Hail,
            "snow" | "snowscape" => Weather::Snow,
            "desolateland" | "harshsun" => Weather::HarshSun,
            "primordialsea" | "heavyrain" => Weather::HeavyRain,
            "deltastream" | "strongwinds" => Weather::StrongWinds,
            "none" | "" => return None,
            other => Weather::Other(other.to_string()),
        };
        Some(weather)
    }

    /// Primal weather lasts until its source leaves the field
    pub fn is_primal(&self) -> bool {
        matches!(
            self,
            Weather::HarshSun | Weather::HeavyRain | Weather::StrongWinds
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sandstorm",
            Weather::Hail => "Hail",
            Weather::Snow => "Snow",
            Weather::HarshSun => "Harsh Sun",
            Weather::HeavyRain => "Heavy Rain",
            Weather::StrongWinds => "Strong Winds",
            Weather::Other(id) => id,
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field-wide effect started by `|-fieldstart|` (terrains, rooms, Gravity)
///
/// Turn counters of 0 mean unknown or unlimited.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PseudoWeather {
    pub name: String,
    /// Turns left if no duration-extending item was involved
    pub min_turns_left: u32,
    /// Turns left if one was
    pub turns_left: u32,
}

impl PseudoWeather {
    pub fn id(&self) -> String {
        to_id(&self.name)
    }

    pub fn is_terrain(&self) -> bool {
        self.id().ends_with("terrain")
    }

    /// Count down one turn
    pub fn tick(&mut self) {
        self.min_turns_left = self.min_turns_left.saturating_sub(1);
        self.turns_left = self.turns_left.saturating_sub(1);
    }
}

/// State for a side condition (hazards, screens, Tailwind)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SideConditionState {
    pub name: String,
    /// Layers for Spikes and Toxic Spikes, 1 for everything else
    pub layers: u32,
    pub min_turns_left: u32,
    pub turns_left: u32,
}

impl SideConditionState {
    /// A freshly started condition with its usual duration
    ///
    /// `persistent` is the `[persistent]` keyword (an ability extending it).
    pub fn new(name: &str, persistent: bool, generation: u8) -> Self {
        let (min_turns_left, turns_left) = match to_id(name).as_str() {
            "auroraveil" => (5, 8),
            "reflect" | "lightscreen" if generation == 1 => (0, 0),
            "reflect" | "lightscreen" => (5, if generation >= 4 { 8 } else { 0 }),
            "safeguard" => (if persistent { 7 } else { 5 }, 0),
            "mist" | "luckychant" => (5, 0),
            "tailwind" => match (generation >= 5, persistent) {
                (true, true) => (6, 0),
                (true, false) => (4, 0),
                (false, true) => (5, 0),
                (false, false) => (3, 0),
            },
            "gmaxwildfire" | "gmaxvolcalith" | "gmaxvinelash" | "gmaxcannonade"
            | "grasspledge" | "firepledge" | "waterpledge" => (4, 0),
            _ => (0, 0),
        };

        Self {
            name: name.to_string(),
            layers: 1,
            min_turns_left,
            turns_left,
        }
    }

    /// Whether another `-sidestart` adds a layer rather than restarting it
    pub fn is_stackable(&self) -> bool {
        matches!(to_id(&self.name).as_str(), "spikes" | "toxicspikes")
    }

    /// Count down one turn
    pub fn tick(&mut self) {
        self.min_turns_left = self.min_turns_left.saturating_sub(1);
        self.turns_left = self.turns_left.saturating_sub(1);
    }
}
