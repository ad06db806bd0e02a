//! Bracketed keyword arguments (`[from] ability: Intimidate`, `[still]`)
//!
//! Keyword arguments trail the positional fields of a battle line. They are
//! read right to left and must be contiguous at the tail.

use std::collections::BTreeMap;
use std::fmt;

/// Keyword names the server is known to send
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    Ability,
    Ability2,
    Already,
    Anim,
    Block,
    Broken,
    Consumed,
    Damage,
    Eat,
    Fail,
    Fatigue,
    Forme,
    From,
    Heavy,
    Identify,
    Interrupt,
    Item,
    Miss,
    Move,
    Msg,
    Multiple,
    Name,
    NoTarget,
    Number,
    Of,
    Ohko,
    PartiallyTrapped,
    Persistent,
    Prepare,
    Silent,
    Spread,
    Still,
    Thaw,
    Upkeep,
    Weak,
    Weaken,
    Wisher,
    ZEffect,
    /// A keyword this decoder does not know about, kept verbatim (lowercased)
    Other(String),
}

impl Keyword {
    pub fn parse(s: &str) -> Self {
        match s {
            "ability" => Keyword::Ability,
            "ability2" => Keyword::Ability2,
            "already" => Keyword::Already,
            "anim" => Keyword::Anim,
            "block" => Keyword::Block,
            "broken" => Keyword::Broken,
            "consumed" => Keyword::Consumed,
            "damage" => Keyword::Damage,
            "eat" => Keyword::Eat,
            "fail" => Keyword::Fail,
            "fatigue" => Keyword::Fatigue,
            "forme" => Keyword::Forme,
            "from" => Keyword::From,
            "heavy" => Keyword::Heavy,
            "identify" => Keyword::Identify,
            "interrupt" => Keyword::Interrupt,
            "item" => Keyword::Item,
            "miss" => Keyword::Miss,
            "move" => Keyword::Move,
            "msg" => Keyword::Msg,
            "multiple" => Keyword::Multiple,
            "name" => Keyword::Name,
            "notarget" => Keyword::NoTarget,
            "number" => Keyword::Number,
            "of" => Keyword::Of,
            "ohko" => Keyword::Ohko,
            "partiallytrapped" => Keyword::PartiallyTrapped,
            "persistent" => Keyword::Persistent,
            "prepare" => Keyword::Prepare,
            "silent" => Keyword::Silent,
            "spread" => Keyword::Spread,
            "still" => Keyword::Still,
            "thaw" => Keyword::Thaw,
            "upkeep" => Keyword::Upkeep,
            "weak" => Keyword::Weak,
            "weaken" => Keyword::Weaken,
            "wisher" => Keyword::Wisher,
            "zeffect" => Keyword::ZEffect,
            other => Keyword::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Keyword::Ability => "ability",
            Keyword::Ability2 => "ability2",
            Keyword::Already => "already",
            Keyword::Anim => "anim",
            Keyword::Block => "block",
            Keyword::Broken => "broken",
            Keyword::Consumed => "consumed",
            Keyword::Damage => "damage",
            Keyword::Eat => "eat",
            Keyword::Fail => "fail",
            Keyword::Fatigue => "fatigue",
            Keyword::Forme => "forme",
            Keyword::From => "from",
            Keyword::Heavy => "heavy",
            Keyword::Identify => "identify",
            Keyword::Interrupt => "interrupt",
            Keyword::Item => "item",
            Keyword::Miss => "miss",
            Keyword::Move => "move",
            Keyword::Msg => "msg",
            Keyword::Multiple => "multiple",
            Keyword::Name => "name",
            Keyword::NoTarget => "notarget",
            Keyword::Number => "number",
            Keyword::Of => "of",
            Keyword::Ohko => "ohko",
            Keyword::PartiallyTrapped => "partiallytrapped",
            Keyword::Persistent => "persistent",
            Keyword::Prepare => "prepare",
            Keyword::Silent => "silent",
            Keyword::Spread => "spread",
            Keyword::Still => "still",
            Keyword::Thaw => "thaw",
            Keyword::Upkeep => "upkeep",
            Keyword::Weak => "weak",
            Keyword::Weaken => "weaken",
            Keyword::Wisher => "wisher",
            Keyword::ZEffect => "zeffect",
            Keyword::Other(s) => s,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a keyword argument: presence-only flag or a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KwValue {
    Flag,
    Value(String),
}

impl KwValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KwValue::Flag => None,
            KwValue::Value(s) => Some(s),
        }
    }
}

/// Keyword arguments of one battle line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordArgs {
    entries: BTreeMap<Keyword, KwValue>,
}

impl KeywordArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &Keyword) -> Option<&KwValue> {
        self.entries.get(key)
    }

    /// String value of a keyword; flags have none
    pub fn value(&self, key: &Keyword) -> Option<&str> {
        self.get(key).and_then(KwValue::as_str)
    }

    /// Whether the keyword is present at all (as a flag or with a value)
    pub fn has(&self, key: &Keyword) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set(&mut self, key: Keyword, value: KwValue) {
        self.entries.insert(key, value);
    }

    pub fn set_value(&mut self, key: Keyword, value: impl Into<String>) {
        self.entries.insert(key, KwValue::Value(value.into()));
    }

    pub fn set_flag(&mut self, key: Keyword) {
        self.entries.insert(key, KwValue::Flag);
    }

    pub fn remove(&mut self, key: &Keyword) -> Option<KwValue> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Keyword, &KwValue)> {
        self.entries.iter()
    }

    /// Serialize back to trailing wire fields (`[key] value` or `[key]`)
    pub fn to_fields(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(key, value)| match value {
                KwValue::Flag => format!("[{key}]"),
                KwValue::Value(v) => format!("[{key}] {v}"),
            })
            .collect()
    }
}

impl FromIterator<(Keyword, KwValue)> for KeywordArgs {
    fn from_iter<I: IntoIterator<Item = (Keyword, KwValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Pop trailing `[key]value` fields off `args`
///
/// At least one field (the command) is always left in place. Extraction stops
/// at the first trailing field that does not start with `[` or has no `]`
/// after it.
pub fn extract_keyword_args(args: &mut Vec<String>) -> KeywordArgs {
    let mut kwargs = KeywordArgs::new();

    while args.len() > 1 {
        let Some(last) = args.last() else { break };
        if !last.starts_with('[') {
            break;
        }
        let Some(bracket) = last.find(']').filter(|i| *i > 0) else {
            break;
        };

        let key = Keyword::parse(&last[1..bracket].to_lowercase());
        let value = last[bracket + 1..].trim();
        let value = if value.is_empty() {
            KwValue::Flag
        } else {
            KwValue::Value(value.to_string())
        };

        // later (leftmost) duplicates win, as they are read last
        kwargs.set(key, value);
        args.pop();
    }

    kwargs
}
