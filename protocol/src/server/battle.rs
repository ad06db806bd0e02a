//! Sub-field parsers for battle protocol messages
//!
//! Battle messages carry compound fields (pokemon identifiers, details strings,
//! HP/status pairs, prefixed effect names). Every parser here returns `None`
//! instead of failing when a field cannot be interpreted, so the caller can
//! skip just that one update.

use std::fmt;

use serde::Serialize;

/// Player in a battle (p1, p2, p3, p4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    P1,
    P2,
    P3,
    P4,
}

impl Player {
    pub const ALL: [Player; 4] = [Player::P1, Player::P2, Player::P3, Player::P4];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            "p3" => Some(Player::P3),
            "p4" => Some(Player::P4),
            _ => None,
        }
    }

    /// Parse the player prefix of a side or ident field ("p2: Bob", "p1a")
    pub fn from_prefix(s: &str) -> Option<Self> {
        s.get(..2).and_then(Self::parse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
            Player::P3 => "p3",
            Player::P4 => "p4",
        }
    }

    /// Array index (p1 = 0 .. p4 = 3)
    pub fn index(&self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
            Player::P3 => 2,
            Player::P4 => 3,
        }
    }

    /// The teammate in a multi battle (players are grouped by parity)
    pub fn ally(&self) -> Player {
        match self {
            Player::P1 => Player::P3,
            Player::P2 => Player::P4,
            Player::P3 => Player::P1,
            Player::P4 => Player::P2,
        }
    }

    /// The opposing player sharing this player's slot column
    pub fn foe(&self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
            Player::P3 => Player::P4,
            Player::P4 => Player::P3,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pokemon identifier in the form "POSITION: NAME" (e.g., "p1a: Pikachu")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonIdent {
    /// Player who owns this pokemon
    pub player: Player,
    /// Position letter (a, b, c for active slots, or None if inactive)
    pub position: Option<char>,
    /// Pokemon's name/nickname
    pub name: String,
}

impl PokemonIdent {
    /// Active slot index for the position letter, if any
    pub fn slot(&self) -> Option<usize> {
        match self.position? {
            'a' => Some(0),
            'b' => Some(1),
            'c' => Some(2),
            _ => None,
        }
    }

    /// Identifier without the slot letter ("p1: Pikachu")
    pub fn base_ident(&self) -> String {
        format!("{}: {}", self.player, self.name)
    }
}

impl fmt::Display for PokemonIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{}{}: {}", self.player, pos, self.name),
            None => write!(f, "{}: {}", self.player, self.name),
        }
    }
}

/// Parse a pokemon ID string like "p1a: Pikachu" or "p1: Pikachu"
///
/// The position part is split off at the first ':'. A position shorter than
/// three characters names only the player.
pub fn parse_pokemon_ident(s: &str) -> Option<PokemonIdent> {
    let (pos_part, name) = s.split_once(':')?;
    let name = name.strip_prefix(' ').unwrap_or(name);

    let (player, position) = if pos_part.len() < 3 {
        (Player::parse(pos_part)?, None)
    } else {
        (Player::from_prefix(pos_part)?, pos_part[2..].chars().next())
    };

    Some(PokemonIdent {
        player,
        position,
        name: name.to_string(),
    })
}

/// A pokemon resolved from its ident and details strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedPokemon {
    /// Raw details string
    pub details: String,
    pub name: String,
    pub species: String,
    pub level: u8,
    pub shiny: bool,
    /// 'M', 'F', or None for genderless
    pub gender: Option<char>,
    pub tera_type: Option<String>,
    /// Ident without the slot letter, empty if the name is empty
    pub ident: String,
    /// "IDENT|DETAILS", used to match a switch against a known roster entry
    pub searchid: String,
}

/// Parse a details string like "Pikachu, L50, M, shiny" or "Arceus-*"
///
/// Fields after the species are matched by shape, so a non-canonical order
/// ("Sawsbuck, shiny, F, L50") decodes the same as the canonical one.
pub fn parse_details(name: &str, ident: &str, details: &str) -> DetailedPokemon {
    let mut output = DetailedPokemon {
        details: details.to_string(),
        name: name.to_string(),
        species: name.to_string(),
        level: 100,
        shiny: false,
        gender: None,
        tera_type: None,
        ident: if name.is_empty() {
            String::new()
        } else {
            ident.to_string()
        },
        searchid: if name.is_empty() {
            String::new()
        } else {
            format!("{ident}|{details}")
        },
    };

    let mut parts = details.split(", ");
    if let Some(species) = parts.next().filter(|s| !s.is_empty()) {
        output.species = species.to_string();
    }

    for part in parts {
        match part {
            "shiny" => output.shiny = true,
            "M" => output.gender = Some('M'),
            "F" => output.gender = Some('F'),
            _ => {
                if let Some(tera) = part.strip_prefix("tera:") {
                    output.tera_type = Some(tera.to_string());
                } else if let Some(level) = part.strip_prefix('L') {
                    output.level = leading_int(level)
                        .and_then(|l| u8::try_from(l).ok())
                        .filter(|l| *l > 0)
                        .unwrap_or(100);
                }
            }
        }
    }

    output
}

/// Non-volatile status conditions (persist through switching)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    BadPoison,
    Sleep,
    /// Status of a pokemon whose identity was taken over by an illusion
    Unknown,
}

impl Status {
    /// Parse from protocol string ("brn", "frz", "par", "psn", "tox", "slp")
    pub fn from_protocol(s: &str) -> Option<Self> {
        match s {
            "brn" => Some(Status::Burn),
            "frz" => Some(Status::Freeze),
            "par" => Some(Status::Paralysis),
            "psn" => Some(Status::Poison),
            "tox" => Some(Status::BadPoison),
            "slp" => Some(Status::Sleep),
            "???" => Some(Status::Unknown),
            _ => None,
        }
    }

    pub fn to_protocol(&self) -> &'static str {
        match self {
            Status::Burn => "brn",
            Status::Freeze => "frz",
            Status::Paralysis => "par",
            Status::Poison => "psn",
            Status::BadPoison => "tox",
            Status::Sleep => "slp",
            Status::Unknown => "???",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_protocol())
    }
}

/// HP bar color hint appended to the max HP of a bar-only HP string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HpColor {
    Yellow,
    Green,
}

/// HP and status condition (e.g., "100/100", "50/100 slp", "0 fnt")
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PokemonHealth {
    pub hp: f64,
    /// Zero until a max HP has been seen
    pub maxhp: f64,
    pub hpcolor: Option<HpColor>,
    pub status: Option<Status>,
    pub fainted: bool,
}

/// Parse an HP status string like "100/100", "50/100 slp", or "0 fnt"
///
/// `prior` is the last known health of the pokemon. A bare percentage is
/// scaled by its max HP, and a `psn` update never downgrades a known `tox`.
/// Returns `None` when a "CUR/MAX" pair is not numeric.
pub fn parse_health(hpstring: &str, prior: Option<&PokemonHealth>) -> Option<PokemonHealth> {
    let mut output = prior.cloned().unwrap_or_default();
    let (hp, status) = match hpstring.split_once(' ') {
        Some((hp, rest)) => (hp, rest.split(' ').next().unwrap_or("")),
        None => (hpstring, ""),
    };

    output.hpcolor = None;
    if hp == "0" || hp == "0.0" {
        if output.maxhp == 0.0 {
            output.maxhp = 100.0;
        }
        output.hp = 0.0;
    } else if hp.find('/').is_some_and(|i| i > 0) {
        let (cur, max) = hp.split_once('/')?;
        let (cur_hp, max_hp) = (leading_float(cur)?, leading_float(max)?);
        output.maxhp = max_hp;
        output.hp = cur_hp.min(max_hp);
        output.hpcolor = match max.chars().last() {
            Some('y') => Some(HpColor::Yellow),
            Some('g') => Some(HpColor::Green),
            _ => None,
        };
    } else if let Some(percent) = leading_float(hp) {
        if output.maxhp == 0.0 {
            output.maxhp = 100.0;
        }
        output.hp = output.maxhp * percent / 100.0;
    }

    match status {
        "" => output.status = None,
        "par" | "brn" | "slp" | "frz" | "tox" => output.status = Status::from_protocol(status),
        "psn" if output.status != Some(Status::BadPoison) => output.status = Some(Status::Poison),
        "fnt" => {
            output.hp = 0.0;
            output.fainted = true;
        }
        _ => {}
    }

    Some(output)
}

/// What kind of thing a prefixed effect name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Item,
    Move,
    Ability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub name: String,
    pub kind: Option<EffectKind>,
}

/// Parse an effect name like "move: Protect", "ability: Intimidate" or "Sandstorm"
pub fn parse_effect(effect: &str) -> Effect {
    let (name, kind) = if let Some(rest) = effect.strip_prefix("item:") {
        (rest, Some(EffectKind::Item))
    } else if let Some(rest) = effect.strip_prefix("move:") {
        (rest, Some(EffectKind::Move))
    } else if let Some(rest) = effect.strip_prefix("ability:") {
        (rest, Some(EffectKind::Ability))
    } else {
        (effect, None)
    };

    Effect {
        name: name.trim().to_string(),
        kind,
    }
}

/// Like [`parse_effect`], with the name reduced to its ID
pub fn parse_effect_id(effect: &str) -> Effect {
    let mut parsed = parse_effect(effect);
    parsed.name = to_id(&parsed.name);
    parsed
}

/// Reduce a name to its ID: lowercase ASCII letters and digits only
pub fn to_id(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A username split into its rank symbol, name, and status
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameParts {
    /// Rank symbol ('+', '%', '@', ...), if any
    pub group: Option<char>,
    pub name: String,
    pub away: bool,
    pub status: String,
}

/// Parse a username like "@Zarel@!busy" into its parts
pub fn parse_name_parts(text: &str) -> NameParts {
    let mut parts = NameParts::default();
    let mut text = text;

    if let Some(first) = text.chars().next()
        && !first.is_ascii_alphanumeric()
    {
        parts.group = Some(first);
        text = &text[first.len_utf8()..];
    }

    parts.name = text.to_string();
    if let Some(at) = text.find('@').filter(|i| *i > 0) {
        parts.name = text[..at].to_string();
        let status = &text[at + 1..];
        match status.strip_prefix('!') {
            Some(rest) => {
                parts.away = true;
                parts.status = rest.to_string();
            }
            None => parts.status = status.to_string(),
        }
    }

    parts
}

/// Game type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Singles,
    Doubles,
    Triples,
    Rotation,
    Multi,
    FreeForAll,
}

impl GameType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "singles" => Some(GameType::Singles),
            "doubles" => Some(GameType::Doubles),
            "triples" => Some(GameType::Triples),
            "rotation" => Some(GameType::Rotation),
            "multi" => Some(GameType::Multi),
            "freeforall" => Some(GameType::FreeForAll),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Singles => "singles",
            GameType::Doubles => "doubles",
            GameType::Triples => "triples",
            GameType::Rotation => "rotation",
            GameType::Multi => "multi",
            GameType::FreeForAll => "freeforall",
        }
    }

    /// Number of active slots per side
    pub fn active_slots(&self) -> usize {
        match self {
            GameType::Doubles => 2,
            GameType::Triples | GameType::Rotation => 3,
            _ => 1,
        }
    }
}

/// Boostable stat abbreviation
///
/// `Spc` is the generation 1 Special stat, which covers both special stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoostId {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
    Spc,
}

impl BoostId {
    /// The seven stats touched by whole-table boost effects
    pub const ALL: [BoostId; 7] = [
        BoostId::Atk,
        BoostId::Def,
        BoostId::Spa,
        BoostId::Spd,
        BoostId::Spe,
        BoostId::Accuracy,
        BoostId::Evasion,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(BoostId::Atk),
            "def" => Some(BoostId::Def),
            "spa" => Some(BoostId::Spa),
            "spd" => Some(BoostId::Spd),
            "spe" => Some(BoostId::Spe),
            "accuracy" => Some(BoostId::Accuracy),
            "evasion" => Some(BoostId::Evasion),
            "spc" => Some(BoostId::Spc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoostId::Atk => "atk",
            BoostId::Def => "def",
            BoostId::Spa => "spa",
            BoostId::Spd => "spd",
            BoostId::Spe => "spe",
            BoostId::Accuracy => "accuracy",
            BoostId::Evasion => "evasion",
            BoostId::Spc => "spc",
        }
    }

    /// Parse a ", "-separated stat list, falling back to all seven when empty
    pub fn parse_list(list: Option<&str>) -> Vec<BoostId> {
        match list.filter(|s| !s.is_empty()) {
            Some(list) => list.split(", ").filter_map(BoostId::parse).collect(),
            None => BoostId::ALL.to_vec(),
        }
    }
}

/// Parse the leading base-10 integer of a string, ignoring whatever follows
///
/// Leading whitespace and a single sign are accepted. Returns `None` when no
/// digit follows.
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;

    Some(if negative { -value } else { value })
}

/// Parse the leading decimal number of a string, ignoring whatever follows
pub fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start || has_digits {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
