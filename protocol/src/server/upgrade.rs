//! Rewrites of legacy and overloaded commands into their current shapes
//!
//! Two passes exist. [`upgrade_legacy`] renames the single-letter room
//! commands (`n`, `c`, `j`, `l`, `b`) and runs on every line.
//! [`upgrade`] reclassifies battle commands whose meaning depended on the
//! effect they carried, chiefly `-activate`. It only runs on lines that went
//! through keyword extraction, and is a no-op on already-current input.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use anyhow::Result;
use serde::Deserialize;
use tracing::trace;

use super::battle::parse_effect_id;
use super::kwargs::{Keyword, KeywordArgs};
use crate::ParseError;

/// Effect sets driving the `-activate` reclassification
///
/// The sets reflect how older servers encoded these effects, so they are
/// data rather than code. Hosts replaying logs from a different protocol era
/// can load their own with [`UpgradeRules::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpgradeRules {
    /// Effect IDs whose `-activate` is really a `-block`
    pub blockable: BTreeSet<String>,
    /// Effect IDs whose `-activate` is really a `-start`
    pub startable: BTreeSet<String>,
    /// Effect IDs carrying a move and a number as positional fields
    pub numberable: BTreeSet<String>,
    /// `cant` reasons that are really a `-block`
    pub cant_block_abilities: Vec<String>,
}

impl Default for UpgradeRules {
    fn default() -> Self {
        fn set(ids: &[&str]) -> BTreeSet<String> {
            ids.iter().map(|s| s.to_string()).collect()
        }

        Self {
            blockable: set(&[
                "ingrain",
                "quickguard",
                "wideguard",
                "craftyshield",
                "matblock",
                "protect",
                "mist",
                "safeguard",
                "electricterrain",
                "mistyterrain",
                "psychicterrain",
                "telepathy",
                "stickyhold",
                "suctioncups",
                "aromaveil",
                "flowerveil",
                "sweetveil",
                "disguise",
                "safetygoggles",
                "protectivepads",
            ]),
            startable: set(&[
                "wrap",
                "clamp",
                "whirlpool",
                "firespin",
                "magmastorm",
                "sandtomb",
                "infestation",
                "charge",
                "trapped",
                "bind",
            ]),
            numberable: set(&[
                "spite",
                "grudge",
                "forewarn",
                "sketch",
                "leppaberry",
                "mysteryberry",
            ]),
            cant_block_abilities: vec![
                "ability: Queenly Majesty".to_string(),
                "ability: Damp".to_string(),
                "ability: Dazzling".to_string(),
            ],
        }
    }
}

impl UpgradeRules {
    /// Load rules from JSON; missing sets keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ParseError::Json(e).into())
    }
}

static DEFAULT_RULES: LazyLock<UpgradeRules> = LazyLock::new(UpgradeRules::default);

fn field(args: &[String], index: usize) -> String {
    args.get(index).cloned().unwrap_or_default()
}

/// Uppercase aliases are silent, lowercase ones are not, and the canonical
/// command keeps whatever flag it already carries
fn silent_flag(args: &[String], index: usize) -> String {
    match args.first().map(String::as_str) {
        Some("N" | "J" | "L") => "true".to_string(),
        Some("n" | "j" | "l") => "false".to_string(),
        _ => (field(args, index) == "true").to_string(),
    }
}

/// Rename legacy single-letter room commands to their canonical names
///
/// The uppercase variants (`N`, `J`, `L`) are the silent forms; the canonical
/// command carries that as a trailing `"true"`/`"false"` field.
pub fn upgrade_legacy(args: Vec<String>) -> Vec<String> {
    let Some(command) = args.first() else {
        return args;
    };

    match command.as_str() {
        "name" | "n" | "N" => vec![
            "name".to_string(),
            field(&args, 1),
            field(&args, 2),
            silent_flag(&args, 3),
        ],
        "chat" | "c" => vec!["chat".to_string(), field(&args, 1), field(&args, 2)],
        "join" | "j" | "J" => vec![
            "join".to_string(),
            field(&args, 1),
            silent_flag(&args, 2),
        ],
        "leave" | "l" | "L" => vec![
            "leave".to_string(),
            field(&args, 1),
            silent_flag(&args, 2),
        ],
        "battle" | "b" => vec![
            "battle".to_string(),
            field(&args, 1),
            field(&args, 2),
            field(&args, 3),
        ],
        _ => args,
    }
}

/// Reclassify overloaded battle commands using the default rule sets
pub fn upgrade(args: Vec<String>, kwargs: KeywordArgs) -> (Vec<String>, KeywordArgs) {
    upgrade_with(&DEFAULT_RULES, args, kwargs)
}

/// Reclassify overloaded battle commands using custom rule sets
pub fn upgrade_with(
    rules: &UpgradeRules,
    args: Vec<String>,
    mut kwargs: KeywordArgs,
) -> (Vec<String>, KeywordArgs) {
    let command = args.first().map(String::as_str).unwrap_or_default();

    match command {
        "-activate" => return upgrade_activate(rules, args, kwargs),
        "-start" => {
            if let Some(from @ ("Protean" | "Color Change")) = kwargs.value(&Keyword::From) {
                let upgraded = format!("ability:{from}");
                kwargs.set_value(Keyword::From, upgraded);
            }
        }
        "move" => {
            if kwargs.value(&Keyword::From) == Some("Magic Bounce") {
                kwargs.set_value(Keyword::From, "ability:Magic Bounce");
            }
        }
        "cant" => {
            let effect = field(&args, 2);
            if rules.cant_block_abilities.contains(&effect) {
                trace!(effect = %effect, "cant rewritten to -block");
                let mut upgraded = vec!["-block".to_string(), field(&args, 1), effect, field(&args, 3)];
                if let Some(of) = kwargs.value(&Keyword::Of) {
                    upgraded.push(of.to_string());
                }
                return (upgraded, KeywordArgs::new());
            }
        }
        "gen" => {
            let num = field(&args, 1);
            let num = match num.trim().parse::<u8>() {
                Ok(n) => n.to_string(),
                Err(_) => num,
            };
            return (vec!["gen".to_string(), num], KeywordArgs::new());
        }
        "-nothing" => {
            trace!("-nothing rewritten to -activate");
            let upgraded = vec![
                "-activate".to_string(),
                String::new(),
                "move:Splash".to_string(),
            ];
            return (upgraded, kwargs);
        }
        _ => {}
    }

    (args, kwargs)
}

fn upgrade_activate(
    rules: &UpgradeRules,
    args: Vec<String>,
    mut kwargs: KeywordArgs,
) -> (Vec<String>, KeywordArgs) {
    if [Keyword::Item, Keyword::Move, Keyword::Number, Keyword::Ability]
        .iter()
        .any(|k| kwargs.has(k))
    {
        return (args, kwargs);
    }

    let pokemon = field(&args, 1);
    let effect = field(&args, 2);
    let arg3 = args.get(3).cloned();
    let arg4 = args.get(4).cloned();
    let target = kwargs.value(&Keyword::Of).map(str::to_string);
    let id = parse_effect_id(&effect).name;

    if kwargs.has(&Keyword::Block) {
        return (vec!["-fail".to_string(), pokemon], kwargs);
    }
    if id == "sturdy" {
        let upgraded = vec![
            "-activate".to_string(),
            pokemon,
            "ability: Sturdy".to_string(),
        ];
        return (upgraded, kwargs);
    }
    if id == "wonderguard" {
        let mut immune = KeywordArgs::new();
        immune.set_value(Keyword::From, "ability:Wonder Guard");
        return (vec!["-immune".to_string(), pokemon], immune);
    }
    if id == "beatup"
        && let Some(of) = &target
    {
        let mut named = KeywordArgs::new();
        named.set_value(Keyword::Name, of.clone());
        return (args, named);
    }

    if rules.blockable.contains(&id) {
        trace!(effect = %id, "-activate rewritten to -block");
        let blocker = match target {
            Some(target) => {
                kwargs.set_value(Keyword::Of, pokemon);
                target
            }
            None => pokemon,
        };
        let mut upgraded = vec!["-block".to_string(), blocker, effect];
        upgraded.extend(arg3);
        return (upgraded, kwargs);
    }

    if rules.startable.contains(&id) {
        trace!(effect = %id, "-activate rewritten to -start");
        let mut started = KeywordArgs::new();
        if let Some(target) = target {
            started.set_value(Keyword::Of, target);
        }
        return (vec!["-start".to_string(), pokemon, effect], started);
    }

    if id == "fairylock" {
        return (
            vec!["-fieldactivate".to_string(), effect],
            KeywordArgs::new(),
        );
    }

    let mut repacked = true;
    match id.as_str() {
        "symbiosis" => set_opt(&mut kwargs, Keyword::Item, arg3),
        "magnitude" => set_opt(&mut kwargs, Keyword::Number, arg3),
        "skillswap" | "mummy" | "wanderingspirit" => {
            set_opt(&mut kwargs, Keyword::Ability, arg3);
            set_opt(&mut kwargs, Keyword::Ability2, arg4);
        }
        _ if rules.numberable.contains(&id) => {
            set_opt(&mut kwargs, Keyword::Move, arg3);
            set_opt(&mut kwargs, Keyword::Number, arg4);
        }
        _ => repacked = false,
    }

    let mut upgraded = vec!["-activate".to_string(), pokemon, effect];
    match target {
        Some(target) if !target.is_empty() => upgraded.push(target),
        _ if !repacked => upgraded.extend(args.into_iter().skip(3)),
        _ => {}
    }

    (upgraded, kwargs)
}

fn set_opt(kwargs: &mut KeywordArgs, key: Keyword, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        kwargs.set_value(key, value);
    }
}
