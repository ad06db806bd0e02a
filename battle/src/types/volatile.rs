//! Volatile conditions (cleared on switching)

use showdown_protocol::{parse_effect, to_id};

/// A volatile condition, keyed by the ID of the effect that started it
///
/// Conditions this crate does not name are kept as [`Volatile::Other`] with
/// their ID, so `-start`/`-end` pairs always match up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Volatile {
    // Set by the reducer itself
    ItemRemoved,
    Transform,
    MustRecharge,
    GastroAcid,
    TypeChange,
    TypeAdd,
    FormeChange,

    // Copied by -copyboost from generation 6 on
    FocusEnergy,
    LaserFocus,

    Substitute,
    Confusion,
    Taunt,
    Encore,
    Disable,
    Torment,
    Attract,
    LeechSeed,
    Curse,
    Nightmare,
    Yawn,
    Imprison,
    Embargo,
    HealBlock,
    Foresight,
    MiracleEye,
    Mimic,
    PowerTrick,
    Autotomize,
    Stockpile1,
    Stockpile2,
    Stockpile3,
    Smackdown,
    Ingrain,
    AquaRing,
    MagnetRise,
    Telekinesis,
    AirBalloon,
    FlashFire,
    SlowStart,
    Dynamax,
    Octolock,
    TarShot,
    NoRetreat,
    SaltCure,
    SyrupBomb,

    // Turn-scoped, from -singleturn / -singlemove
    Protect,
    Endure,
    Roost,
    HelpingHand,
    DestinyBond,
    Grudge,
    Rage,
    FocusPunch,

    Other(String),
}

impl Volatile {
    /// Look up a volatile by its ID ("leechseed", "typechange")
    pub fn from_id(id: &str) -> Self {
        match id {
            "itemremoved" => Volatile::ItemRemoved,
            "transform" => Volatile::Transform,
            "mustrecharge" => Volatile::MustRecharge,
            "gastroacid" => Volatile::GastroAcid,
            "typechange" => Volatile::TypeChange,
            "typeadd" => Volatile::TypeAdd,
            "formechange" => Volatile::FormeChange,
            "focusenergy" => Volatile::FocusEnergy,
            "laserfocus" => Volatile::LaserFocus,
            "substitute" => Volatile::Substitute,
            "confusion" => Volatile::Confusion,
            "taunt" => Volatile::Taunt,
            "encore" => Volatile::Encore,
            "disable" => Volatile::Disable,
            "torment" => Volatile::Torment,
            "attract" => Volatile::Attract,
            "leechseed" => Volatile::LeechSeed,
            "curse" => Volatile::Curse,
            "nightmare" => Volatile::Nightmare,
            "yawn" => Volatile::Yawn,
            "imprison" => Volatile::Imprison,
            "embargo" => Volatile::Embargo,
            "healblock" => Volatile::HealBlock,
            "foresight" => Volatile::Foresight,
            "miracleeye" => Volatile::MiracleEye,
            "mimic" => Volatile::Mimic,
            "powertrick" => Volatile::PowerTrick,
            "autotomize" => Volatile::Autotomize,
            "stockpile1" => Volatile::Stockpile1,
            "stockpile2" => Volatile::Stockpile2,
            "stockpile3" => Volatile::Stockpile3,
            "smackdown" => Volatile::Smackdown,
            "ingrain" => Volatile::Ingrain,
            "aquaring" => Volatile::AquaRing,
            "magnetrise" => Volatile::MagnetRise,
            "telekinesis" => Volatile::Telekinesis,
            "airballoon" => Volatile::AirBalloon,
            "flashfire" => Volatile::FlashFire,
            "slowstart" => Volatile::SlowStart,
            "dynamax" => Volatile::Dynamax,
            "octolock" => Volatile::Octolock,
            "tarshot" => Volatile::TarShot,
            "noretreat" => Volatile::NoRetreat,
            "saltcure" => Volatile::SaltCure,
            "syrupbomb" => Volatile::SyrupBomb,
            "protect" => Volatile::Protect,
            "endure" => Volatile::Endure,
            "roost" => Volatile::Roost,
            "helpinghand" => Volatile::HelpingHand,
            "destinybond" => Volatile::DestinyBond,
            "grudge" => Volatile::Grudge,
            "rage" => Volatile::Rage,
            "focuspunch" => Volatile::FocusPunch,
            other => Volatile::Other(other.to_string()),
        }
    }

    /// Look up a volatile from an effect field ("move: Leech Seed", "Substitute")
    pub fn from_effect(effect: &str) -> Self {
        Self::from_id(&to_id(&parse_effect(effect).name))
    }

    pub fn id(&self) -> &str {
        match self {
            Volatile::ItemRemoved => "itemremoved",
            Volatile::Transform => "transform",
            Volatile::MustRecharge => "mustrecharge",
            Volatile::GastroAcid => "gastroacid",
            Volatile::TypeChange => "typechange",
            Volatile::TypeAdd => "typeadd",
            Volatile::FormeChange => "formechange",
            Volatile::FocusEnergy => "focusenergy",
            Volatile::LaserFocus => "laserfocus",
            Volatile::Substitute => "substitute",
            Volatile::Confusion => "confusion",
            Volatile::Taunt => "taunt",
            Volatile::Encore => "encore",
            Volatile::Disable => "disable",
            Volatile::Torment => "torment",
            Volatile::Attract => "attract",
            Volatile::LeechSeed => "leechseed",
            Volatile::Curse => "curse",
            Volatile::Nightmare => "nightmare",
            Volatile::Yawn => "yawn",
            Volatile::Imprison => "imprison",
            Volatile::Embargo => "embargo",
            Volatile::HealBlock => "healblock",
            Volatile::Foresight => "foresight",
            Volatile::MiracleEye => "miracleeye",
            Volatile::Mimic => "mimic",
            Volatile::PowerTrick => "powertrick",
            Volatile::Autotomize => "autotomize",
            Volatile::Stockpile1 => "stockpile1",
            Volatile::Stockpile2 => "stockpile2",
            Volatile::Stockpile3 => "stockpile3",
            Volatile::Smackdown => "smackdown",
            Volatile::Ingrain => "ingrain",
            Volatile::AquaRing => "aquaring",
            Volatile::MagnetRise => "magnetrise",
            Volatile::Telekinesis => "telekinesis",
            Volatile::AirBalloon => "airballoon",
            Volatile::FlashFire => "flashfire",
            Volatile::SlowStart => "slowstart",
            Volatile::Dynamax => "dynamax",
            Volatile::Octolock => "octolock",
            Volatile::TarShot => "tarshot",
            Volatile::NoRetreat => "noretreat",
            Volatile::SaltCure => "saltcure",
            Volatile::SyrupBomb => "syrupbomb",
            Volatile::Protect => "protect",
            Volatile::Endure => "endure",
            Volatile::Roost => "roost",
            Volatile::HelpingHand => "helpinghand",
            Volatile::DestinyBond => "destinybond",
            Volatile::Grudge => "grudge",
            Volatile::Rage => "rage",
            Volatile::FocusPunch => "focuspunch",
            Volatile::Other(id) => id,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Volatile::Other(_))
    }

    /// Whether Baton Pass hands this volatile to the incoming Pokemon
    pub fn is_passable(&self) -> bool {
        !matches!(
            self,
            Volatile::AirBalloon
                | Volatile::Attract
                | Volatile::Autotomize
                | Volatile::Disable
                | Volatile::Encore
                | Volatile::Foresight
                | Volatile::Imprison
                | Volatile::LaserFocus
                | Volatile::Mimic
                | Volatile::MiracleEye
                | Volatile::Nightmare
                | Volatile::Smackdown
                | Volatile::Stockpile1
                | Volatile::Stockpile2
                | Volatile::Stockpile3
                | Volatile::Torment
                | Volatile::TypeAdd
                | Volatile::TypeChange
                | Volatile::Yawn
                | Volatile::Transform
                | Volatile::FormeChange
                | Volatile::ItemRemoved
                | Volatile::MustRecharge
        )
    }
}

impl std::fmt::Display for Volatile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Volatile {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}
