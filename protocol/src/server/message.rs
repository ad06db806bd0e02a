//! Typed server messages
//!
//! Every canonical command maps to one [`ServerMessage`] variant. Fields stay
//! in their wire form (strings) except where the protocol guarantees a
//! number; the sub-field parsers in [`super::battle`] decode them on demand.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use super::battle::{GameType, Player};
use super::upgrade::upgrade_legacy;
use super::{battle_init, battle_major, battle_minor, battle_progress, global, room};
use crate::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    // === Room messages ===
    /// `||MESSAGE` or a line without a leading `|`
    Text(String),
    Init(String),
    Title(String),
    UserList(String),
    Html(String),
    Uhtml {
        name: String,
        html: String,
    },
    UhtmlChange {
        name: String,
        html: String,
    },
    Join {
        user: String,
        silent: bool,
    },
    Leave {
        user: String,
        silent: bool,
    },
    Name {
        user: String,
        old_id: String,
        silent: bool,
    },
    Chat {
        user: String,
        message: String,
    },
    Timestamp(String),
    TimestampChat {
        timestamp: String,
        user: String,
        message: String,
    },
    Battle {
        room_id: String,
        user1: String,
        user2: String,
    },
    Raw(String),
    Warning(String),
    Error(String),
    BigError(String),
    ChatMsg(String),
    ChatMsgRaw(String),
    ControlsHtml(String),
    FieldHtml(String),
    Debug(String),
    Tournament(TournamentMessage),

    // === Global messages ===
    Popup(String),
    Pm {
        sender: String,
        receiver: String,
        message: String,
    },
    UserCount(u32),
    NameTaken {
        username: String,
        message: String,
    },
    Challstr(String),
    UpdateUser {
        user: String,
        named: bool,
        avatar: String,
        settings: Option<String>,
    },
    Formats(Vec<String>),
    UpdateSearch(String),
    UpdateChallenges(String),
    QueryResponse {
        query_type: String,
        json: String,
    },
    Unlink {
        user: String,
        hide: bool,
    },

    // === Battle initialization ===
    Player {
        player: Player,
        username: Option<String>,
        avatar: Option<String>,
        rating: Option<String>,
    },
    TeamSize {
        player: Player,
        size: u32,
    },
    GameType(GameType),
    Gen(u8),
    Tier(String),
    Rated(Option<String>),
    Seed(String),
    Rule(String),
    ClearPoke,
    Poke {
        player: Player,
        details: String,
        item: Option<String>,
    },
    TeamPreview(Option<u32>),
    Start,

    // === Battle progress ===
    Done,
    Request(String),
    Inactive(String),
    InactiveOff(String),
    Upkeep,
    Turn(u32),
    Win(String),
    Tie,

    // === Major actions ===
    Move {
        pokemon: String,
        move_name: String,
        target: Option<String>,
    },
    Switch {
        pokemon: String,
        details: String,
        hp_status: Option<String>,
    },
    Drag {
        pokemon: String,
        details: String,
        hp_status: Option<String>,
    },
    DetailsChange {
        pokemon: String,
        details: String,
        hp_status: Option<String>,
    },
    Replace {
        pokemon: String,
        details: String,
        hp_status: Option<String>,
    },
    Swap {
        pokemon: String,
        position: Option<String>,
    },
    Cant {
        pokemon: String,
        reason: String,
        move_name: Option<String>,
    },
    Faint(String),
    SwitchOut(String),
    Message(String),

    // === Minor actions ===
    FormeChange {
        pokemon: String,
        species: String,
        hp_status: Option<String>,
    },
    Fail {
        pokemon: String,
        action: Option<String>,
        stat: Option<String>,
    },
    Block {
        pokemon: String,
        effect: String,
        move_name: Option<String>,
        attacker: Option<String>,
    },
    NoTarget(Option<String>),
    Miss {
        source: String,
        target: Option<String>,
    },
    Damage {
        pokemon: String,
        hp_status: String,
    },
    Heal {
        pokemon: String,
        hp_status: String,
    },
    SetHp {
        pokemon: String,
        hp_status: String,
        extra: Vec<String>,
    },
    Status {
        pokemon: String,
        status: String,
    },
    CureStatus {
        pokemon: String,
        status: String,
    },
    CureTeam(String),
    Boost {
        pokemon: String,
        stat: String,
        amount: i32,
    },
    Unboost {
        pokemon: String,
        stat: String,
        amount: i32,
    },
    SetBoost {
        pokemon: String,
        stat: String,
        amount: i32,
    },
    SwapBoost {
        pokemon: String,
        target: String,
        stats: Option<String>,
    },
    InvertBoost(String),
    ClearBoost(String),
    ClearAllBoost,
    ClearPositiveBoost {
        target: String,
        source: Option<String>,
        effect: Option<String>,
    },
    ClearNegativeBoost(String),
    CopyBoost {
        pokemon: String,
        from_pokemon: String,
        stats: Option<String>,
    },
    Weather(String),
    FieldStart(String),
    FieldEnd(String),
    SideStart {
        side: String,
        condition: String,
    },
    SideEnd {
        side: String,
        condition: String,
    },
    SwapSideConditions,
    VolatileStart {
        pokemon: String,
        effect: String,
        extra: Vec<String>,
    },
    VolatileEnd {
        pokemon: String,
        effect: String,
        extra: Vec<String>,
    },
    Crit(String),
    SuperEffective(String),
    Resisted(String),
    Immune(String),
    Item {
        pokemon: String,
        item: String,
    },
    EndItem {
        pokemon: String,
        item: String,
    },
    Ability {
        pokemon: String,
        ability: String,
        extra: Vec<String>,
    },
    EndAbility {
        pokemon: String,
        ability: Option<String>,
    },
    Transform {
        pokemon: String,
        species: String,
    },
    Mega {
        pokemon: String,
        species: String,
        item: String,
    },
    Primal(String),
    Burst {
        pokemon: String,
        species: String,
        item: String,
    },
    ZPower(String),
    ZBroken(String),
    Terastallize {
        pokemon: String,
        tera_type: String,
    },
    Activate {
        pokemon: String,
        effect: String,
        fields: Vec<String>,
    },
    FieldActivate(String),
    Hint(String),
    Center,
    BattleMessage(String),
    Combine,
    Waiting {
        source: String,
        target: String,
    },
    Prepare {
        pokemon: String,
        move_name: String,
        target: Option<String>,
    },
    MustRecharge(String),
    HitCount {
        pokemon: String,
        count: u32,
    },
    SingleMove {
        pokemon: String,
        move_name: String,
    },
    SingleTurn {
        pokemon: String,
        move_name: String,
    },
    Anim {
        pokemon: String,
        move_name: String,
        target: Option<String>,
    },
    Ohko,

    /// A well-formed command outside the known vocabulary
    Unknown {
        command: String,
        fields: Vec<String>,
    },
}

/// `|tournament|SUBCOMMAND|...` messages
#[derive(Debug, Clone, PartialEq)]
pub enum TournamentMessage {
    Create {
        format: String,
        generator: String,
        player_cap: String,
    },
    Update(String),
    UpdateEnd,
    Error(String),
    ForceEnd,
    Join(String),
    Leave(String),
    Replace {
        old: String,
        new: String,
    },
    Start(u32),
    Disqualify(String),
    BattleStart {
        user1: String,
        user2: String,
        room_id: String,
    },
    BattleEnd {
        user1: String,
        user2: String,
        result: String,
        score: String,
        recorded: String,
    },
    End(String),
    Scouting(String),
    AutoStart {
        setting: String,
        timeout: Option<String>,
    },
    AutoDq {
        setting: String,
        timeout: Option<String>,
    },
    Other {
        subcommand: String,
        fields: Vec<String>,
    },
}

/// Positional field access over an upgraded argument list
pub(super) struct Fields<'a> {
    pub command: &'a str,
    args: &'a [String],
}

impl<'a> Fields<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self {
            command: args.first().map(String::as_str).unwrap_or_default(),
            args,
        }
    }

    /// Required field
    pub fn req(&self, index: usize) -> Result<String> {
        self.args.get(index).cloned().ok_or_else(|| {
            ParseError::MissingField(format!("{} field {index}", self.command)).into()
        })
    }

    /// Optional trailing field; an empty-but-present field is kept
    pub fn opt(&self, index: usize) -> Option<String> {
        self.args.get(index).cloned()
    }

    /// Field or empty string
    pub fn get(&self, index: usize) -> String {
        self.args.get(index).cloned().unwrap_or_default()
    }

    /// Required numeric field
    pub fn num<T: FromStr>(&self, index: usize) -> Result<T> {
        let raw = self.req(index)?;
        raw.trim().parse().map_err(|_| {
            ParseError::InvalidFormat(format!("{} field {index}: {raw:?}", self.command)).into()
        })
    }

    /// Optional numeric field; present but non-numeric is an error
    pub fn opt_num<T: FromStr>(&self, index: usize) -> Result<Option<T>> {
        match self.args.get(index) {
            Some(_) => self.num(index).map(Some),
            None => Ok(None),
        }
    }

    pub fn player(&self, index: usize) -> Result<Player> {
        let raw = self.req(index)?;
        Player::parse(&raw).ok_or_else(|| {
            ParseError::InvalidFormat(format!("{} player: {raw:?}", self.command)).into()
        })
    }

    /// All fields from `index` on
    pub fn rest(&self, index: usize) -> Vec<String> {
        self.args.get(index..).map(<[String]>::to_vec).unwrap_or_default()
    }

    /// Fields from `index` on, rejoined with the separator
    pub fn joined(&self, index: usize) -> String {
        self.args.get(index..).map(|rest| rest.join("|")).unwrap_or_default()
    }
}

fn bool_field(value: &str) -> bool {
    value == "true"
}

impl ServerMessage {
    /// Build a typed message from an argument list
    ///
    /// Legacy room command names are accepted. Unknown commands become [`ServerMessage::Unknown`]. A known command
    /// with missing or non-numeric required fields is an error.
    pub fn from_args(args: &[String]) -> Result<Self> {
        if args.is_empty() {
            return Err(ParseError::EmptyMessage.into());
        }
        let args = upgrade_legacy(args.to_vec());
        let fields = Fields::new(&args);

        if let Some(message) = global::parse(&fields) {
            return message;
        }
        if let Some(message) = room::parse(&fields) {
            return message;
        }
        if let Some(message) = battle_init::parse(&fields) {
            return message;
        }
        if let Some(message) = battle_progress::parse(&fields) {
            return message;
        }
        if let Some(message) = battle_major::parse(&fields) {
            return message;
        }
        if let Some(message) = battle_minor::parse(&fields) {
            return message;
        }

        Ok(ServerMessage::Unknown {
            command: fields.command.to_string(),
            fields: fields.rest(1),
        })
    }

    /// Wire command name
    pub fn command(&self) -> &str {
        match self {
            ServerMessage::Text(_) => "",
            ServerMessage::Init(_) => "init",
            ServerMessage::Title(_) => "title",
            ServerMessage::UserList(_) => "userlist",
            ServerMessage::Html(_) => "html",
            ServerMessage::Uhtml { .. } => "uhtml",
            ServerMessage::UhtmlChange { .. } => "uhtmlchange",
            ServerMessage::Join { silent: true, .. } => "J",
            ServerMessage::Join { .. } => "join",
            ServerMessage::Leave { silent: true, .. } => "L",
            ServerMessage::Leave { .. } => "leave",
            ServerMessage::Name { silent: true, .. } => "N",
            ServerMessage::Name { .. } => "name",
            ServerMessage::Chat { .. } => "chat",
            ServerMessage::Timestamp(_) => ":",
            ServerMessage::TimestampChat { .. } => "c:",
            ServerMessage::Battle { .. } => "battle",
            ServerMessage::Raw(_) => "raw",
            ServerMessage::Warning(_) => "warning",
            ServerMessage::Error(_) => "error",
            ServerMessage::BigError(_) => "bigerror",
            ServerMessage::ChatMsg(_) => "chatmsg",
            ServerMessage::ChatMsgRaw(_) => "chatmsg-raw",
            ServerMessage::ControlsHtml(_) => "controlshtml",
            ServerMessage::FieldHtml(_) => "fieldhtml",
            ServerMessage::Debug(_) => "debug",
            ServerMessage::Tournament(_) => "tournament",
            ServerMessage::Popup(_) => "popup",
            ServerMessage::Pm { .. } => "pm",
            ServerMessage::UserCount(_) => "usercount",
            ServerMessage::NameTaken { .. } => "nametaken",
            ServerMessage::Challstr(_) => "challstr",
            ServerMessage::UpdateUser { .. } => "updateuser",
            ServerMessage::Formats(_) => "formats",
            ServerMessage::UpdateSearch(_) => "updatesearch",
            ServerMessage::UpdateChallenges(_) => "updatechallenges",
            ServerMessage::QueryResponse { .. } => "queryresponse",
            ServerMessage::Unlink { .. } => "unlink",
            ServerMessage::Player { .. } => "player",
            ServerMessage::TeamSize { .. } => "teamsize",
            ServerMessage::GameType(_) => "gametype",
            ServerMessage::Gen(_) => "gen",
            ServerMessage::Tier(_) => "tier",
            ServerMessage::Rated(_) => "rated",
            ServerMessage::Seed(_) => "seed",
            ServerMessage::Rule(_) => "rule",
            ServerMessage::ClearPoke => "clearpoke",
            ServerMessage::Poke { .. } => "poke",
            ServerMessage::TeamPreview(_) => "teampreview",
            ServerMessage::Start => "start",
            ServerMessage::Done => "done",
            ServerMessage::Request(_) => "request",
            ServerMessage::Inactive(_) => "inactive",
            ServerMessage::InactiveOff(_) => "inactiveoff",
            ServerMessage::Upkeep => "upkeep",
            ServerMessage::Turn(_) => "turn",
            ServerMessage::Win(_) => "win",
            ServerMessage::Tie => "tie",
            ServerMessage::Move { .. } => "move",
            ServerMessage::Switch { .. } => "switch",
            ServerMessage::Drag { .. } => "drag",
            ServerMessage::DetailsChange { .. } => "detailschange",
            ServerMessage::Replace { .. } => "replace",
            ServerMessage::Swap { .. } => "swap",
            ServerMessage::Cant { .. } => "cant",
            ServerMessage::Faint(_) => "faint",
            ServerMessage::SwitchOut(_) => "switchout",
            ServerMessage::Message(_) => "message",
            ServerMessage::FormeChange { .. } => "-formechange",
            ServerMessage::Fail { .. } => "-fail",
            ServerMessage::Block { .. } => "-block",
            ServerMessage::NoTarget(_) => "-notarget",
            ServerMessage::Miss { .. } => "-miss",
            ServerMessage::Damage { .. } => "-damage",
            ServerMessage::Heal { .. } => "-heal",
            ServerMessage::SetHp { .. } => "-sethp",
            ServerMessage::Status { .. } => "-status",
            ServerMessage::CureStatus { .. } => "-curestatus",
            ServerMessage::CureTeam(_) => "-cureteam",
            ServerMessage::Boost { .. } => "-boost",
            ServerMessage::Unboost { .. } => "-unboost",
            ServerMessage::SetBoost { .. } => "-setboost",
            ServerMessage::SwapBoost { .. } => "-swapboost",
            ServerMessage::InvertBoost(_) => "-invertboost",
            ServerMessage::ClearBoost(_) => "-clearboost",
            ServerMessage::ClearAllBoost => "-clearallboost",
            ServerMessage::ClearPositiveBoost { .. } => "-clearpositiveboost",
            ServerMessage::ClearNegativeBoost(_) => "-clearnegativeboost",
            ServerMessage::CopyBoost { .. } => "-copyboost",
            ServerMessage::Weather(_) => "-weather",
            ServerMessage::FieldStart(_) => "-fieldstart",
            ServerMessage::FieldEnd(_) => "-fieldend",
            ServerMessage::SideStart { .. } => "-sidestart",
            ServerMessage::SideEnd { .. } => "-sideend",
            ServerMessage::SwapSideConditions => "-swapsideconditions",
            ServerMessage::VolatileStart { .. } => "-start",
            ServerMessage::VolatileEnd { .. } => "-end",
            ServerMessage::Crit(_) => "-crit",
            ServerMessage::SuperEffective(_) => "-supereffective",
            ServerMessage::Resisted(_) => "-resisted",
            ServerMessage::Immune(_) => "-immune",
            ServerMessage::Item { .. } => "-item",
            ServerMessage::EndItem { .. } => "-enditem",
            ServerMessage::Ability { .. } => "-ability",
            ServerMessage::EndAbility { .. } => "-endability",
            ServerMessage::Transform { .. } => "-transform",
            ServerMessage::Mega { .. } => "-mega",
            ServerMessage::Primal(_) => "-primal",
            ServerMessage::Burst { .. } => "-burst",
            ServerMessage::ZPower(_) => "-zpower",
            ServerMessage::ZBroken(_) => "-zbroken",
            ServerMessage::Terastallize { .. } => "-terastallize",
            ServerMessage::Activate { .. } => "-activate",
            ServerMessage::FieldActivate(_) => "-fieldactivate",
            ServerMessage::Hint(_) => "-hint",
            ServerMessage::Center => "-center",
            ServerMessage::BattleMessage(_) => "-message",
            ServerMessage::Combine => "-combine",
            ServerMessage::Waiting { .. } => "-waiting",
            ServerMessage::Prepare { .. } => "-prepare",
            ServerMessage::MustRecharge(_) => "-mustrecharge",
            ServerMessage::HitCount { .. } => "-hitcount",
            ServerMessage::SingleMove { .. } => "-singlemove",
            ServerMessage::SingleTurn { .. } => "-singleturn",
            ServerMessage::Anim { .. } => "-anim",
            ServerMessage::Ohko => "-ohko",
            ServerMessage::Unknown { command, .. } => command,
        }
    }

    /// Positional wire fields, command first
    ///
    /// Silent joins, leaves and renames use their uppercase legacy command,
    /// which is the only wire form that carries the flag.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.command().to_string()];
        let mut push = |s: &str| args.push(s.to_string());

        match self {
            ServerMessage::Text(s)
            | ServerMessage::Init(s)
            | ServerMessage::Title(s)
            | ServerMessage::UserList(s)
            | ServerMessage::Html(s)
            | ServerMessage::Timestamp(s)
            | ServerMessage::Raw(s)
            | ServerMessage::Warning(s)
            | ServerMessage::Error(s)
            | ServerMessage::BigError(s)
            | ServerMessage::ChatMsg(s)
            | ServerMessage::ChatMsgRaw(s)
            | ServerMessage::ControlsHtml(s)
            | ServerMessage::FieldHtml(s)
            | ServerMessage::Debug(s)
            | ServerMessage::Popup(s)
            | ServerMessage::Challstr(s)
            | ServerMessage::UpdateSearch(s)
            | ServerMessage::UpdateChallenges(s)
            | ServerMessage::Tier(s)
            | ServerMessage::Seed(s)
            | ServerMessage::Rule(s)
            | ServerMessage::Request(s)
            | ServerMessage::Inactive(s)
            | ServerMessage::InactiveOff(s)
            | ServerMessage::Win(s)
            | ServerMessage::Faint(s)
            | ServerMessage::SwitchOut(s)
            | ServerMessage::Message(s)
            | ServerMessage::CureTeam(s)
            | ServerMessage::InvertBoost(s)
            | ServerMessage::ClearBoost(s)
            | ServerMessage::ClearNegativeBoost(s)
            | ServerMessage::Weather(s)
            | ServerMessage::FieldStart(s)
            | ServerMessage::FieldEnd(s)
            | ServerMessage::Crit(s)
            | ServerMessage::SuperEffective(s)
            | ServerMessage::Resisted(s)
            | ServerMessage::Immune(s)
            | ServerMessage::Primal(s)
            | ServerMessage::ZPower(s)
            | ServerMessage::ZBroken(s)
            | ServerMessage::FieldActivate(s)
            | ServerMessage::Hint(s)
            | ServerMessage::BattleMessage(s)
            | ServerMessage::MustRecharge(s) => push(s),

            ServerMessage::ClearPoke
            | ServerMessage::Start
            | ServerMessage::Done
            | ServerMessage::Upkeep
            | ServerMessage::Tie
            | ServerMessage::ClearAllBoost
            | ServerMessage::SwapSideConditions
            | ServerMessage::Center
            | ServerMessage::Combine
            | ServerMessage::Ohko => {}

            ServerMessage::Uhtml { name, html } | ServerMessage::UhtmlChange { name, html } => {
                push(name);
                push(html);
            }
            ServerMessage::Join { user, .. } | ServerMessage::Leave { user, .. } => push(user),
            ServerMessage::Name { user, old_id, .. } => {
                push(user);
                push(old_id);
            }
            ServerMessage::Chat { user, message } => {
                push(user);
                push(message);
            }
            ServerMessage::TimestampChat {
                timestamp,
                user,
                message,
            } => {
                push(timestamp);
                push(user);
                push(message);
            }
            ServerMessage::Battle {
                room_id,
                user1,
                user2,
            } => {
                push(room_id);
                push(user1);
                push(user2);
            }
            ServerMessage::Tournament(tournament) => {
                args.extend(tournament.to_fields());
            }
            ServerMessage::Pm {
                sender,
                receiver,
                message,
            } => {
                push(sender);
                push(receiver);
                push(message);
            }
            ServerMessage::UserCount(count) => push(&count.to_string()),
            ServerMessage::NameTaken { username, message } => {
                push(username);
                push(message);
            }
            ServerMessage::UpdateUser {
                user,
                named,
                avatar,
                settings,
            } => {
                push(user);
                push(if *named { "1" } else { "0" });
                push(avatar);
                if let Some(settings) = settings {
                    push(settings);
                }
            }
            ServerMessage::Formats(formats) => args.extend(formats.iter().cloned()),
            ServerMessage::QueryResponse { query_type, json } => {
                push(query_type);
                push(json);
            }
            ServerMessage::Unlink { user, hide } => {
                if *hide {
                    push("hide");
                }
                push(user);
            }
            ServerMessage::Player {
                player,
                username,
                avatar,
                rating,
            } => {
                push(player.as_str());
                for field in [username, avatar, rating].into_iter().flatten() {
                    push(field);
                }
            }
            ServerMessage::TeamSize { player, size } => {
                push(player.as_str());
                push(&size.to_string());
            }
            ServerMessage::GameType(game_type) => push(game_type.as_str()),
            ServerMessage::Gen(generation) => push(&generation.to_string()),
            ServerMessage::Rated(message) => {
                if let Some(message) = message {
                    push(message);
                }
            }
            ServerMessage::Poke {
                player,
                details,
                item,
            } => {
                push(player.as_str());
                push(details);
                if let Some(item) = item {
                    push(item);
                }
            }
            ServerMessage::TeamPreview(count) => {
                if let Some(count) = count {
                    push(&count.to_string());
                }
            }
            ServerMessage::Turn(turn) => push(&turn.to_string()),
            ServerMessage::Move {
                pokemon,
                move_name,
                target,
            }
            | ServerMessage::Prepare {
                pokemon,
                move_name,
                target,
            }
            | ServerMessage::Anim {
                pokemon,
                move_name,
                target,
            } => {
                push(pokemon);
                push(move_name);
                if let Some(target) = target {
                    push(target);
                }
            }
            ServerMessage::Switch {
                pokemon,
                details,
                hp_status,
            }
            | ServerMessage::Drag {
                pokemon,
                details,
                hp_status,
            }
            | ServerMessage::DetailsChange {
                pokemon,
                details,
                hp_status,
            }
            | ServerMessage::Replace {
                pokemon,
                details,
                hp_status,
            }
            | ServerMessage::FormeChange {
                pokemon,
                species: details,
                hp_status,
            } => {
                push(pokemon);
                push(details);
                if let Some(hp_status) = hp_status {
                    push(hp_status);
                }
            }
            ServerMessage::Swap { pokemon, position } => {
                push(pokemon);
                if let Some(position) = position {
                    push(position);
                }
            }
            ServerMessage::Cant {
                pokemon,
                reason,
                move_name,
            } => {
                push(pokemon);
                push(reason);
                if let Some(move_name) = move_name {
                    push(move_name);
                }
            }
            ServerMessage::Fail {
                pokemon,
                action,
                stat,
            } => {
                push(pokemon);
                for field in [action, stat].into_iter().flatten() {
                    push(field);
                }
            }
            ServerMessage::Block {
                pokemon,
                effect,
                move_name,
                attacker,
            } => {
                push(pokemon);
                push(effect);
                for field in [move_name, attacker].into_iter().flatten() {
                    push(field);
                }
            }
            ServerMessage::NoTarget(pokemon) => {
                if let Some(pokemon) = pokemon {
                    push(pokemon);
                }
            }
            ServerMessage::Miss { source, target } => {
                push(source);
                if let Some(target) = target {
                    push(target);
                }
            }
            ServerMessage::Damage { pokemon, hp_status }
            | ServerMessage::Heal { pokemon, hp_status } => {
                push(pokemon);
                push(hp_status);
            }
            ServerMessage::SetHp {
                pokemon,
                hp_status,
                extra,
            } => {
                push(pokemon);
                push(hp_status);
                args.extend(extra.iter().cloned());
            }
            ServerMessage::Status { pokemon, status }
            | ServerMessage::CureStatus { pokemon, status } => {
                push(pokemon);
                push(status);
            }
            ServerMessage::Boost {
                pokemon,
                stat,
                amount,
            }
            | ServerMessage::Unboost {
                pokemon,
                stat,
                amount,
            }
            | ServerMessage::SetBoost {
                pokemon,
                stat,
                amount,
            } => {
                push(pokemon);
                push(stat);
                push(&amount.to_string());
            }
            ServerMessage::SwapBoost {
                pokemon,
                target: other,
                stats,
            }
            | ServerMessage::CopyBoost {
                pokemon,
                from_pokemon: other,
                stats,
            } => {
                push(pokemon);
                push(other);
                if let Some(stats) = stats {
                    push(stats);
                }
            }
            ServerMessage::ClearPositiveBoost {
                target,
                source,
                effect,
            } => {
                push(target);
                for field in [source, effect].into_iter().flatten() {
                    push(field);
                }
            }
            ServerMessage::SideStart { side, condition }
            | ServerMessage::SideEnd { side, condition } => {
                push(side);
                push(condition);
            }
            ServerMessage::VolatileStart {
                pokemon,
                effect,
                extra,
            }
            | ServerMessage::VolatileEnd {
                pokemon,
                effect,
                extra,
            }
            | ServerMessage::Ability {
                pokemon,
                ability: effect,
                extra,
            }
            | ServerMessage::Activate {
                pokemon,
                effect,
                fields: extra,
            } => {
                push(pokemon);
                push(effect);
                args.extend(extra.iter().cloned());
            }
            ServerMessage::Item { pokemon, item } | ServerMessage::EndItem { pokemon, item } => {
                push(pokemon);
                push(item);
            }
            ServerMessage::EndAbility { pokemon, ability } => {
                push(pokemon);
                if let Some(ability) = ability {
                    push(ability);
                }
            }
            ServerMessage::Transform { pokemon, species } => {
                push(pokemon);
                push(species);
            }
            ServerMessage::Mega {
                pokemon,
                species,
                item,
            }
            | ServerMessage::Burst {
                pokemon,
                species,
                item,
            } => {
                push(pokemon);
                push(species);
                push(item);
            }
            ServerMessage::Terastallize { pokemon, tera_type } => {
                push(pokemon);
                push(tera_type);
            }
            ServerMessage::Waiting { source, target } => {
                push(source);
                push(target);
            }
            ServerMessage::HitCount { pokemon, count } => {
                push(pokemon);
                push(&count.to_string());
            }
            ServerMessage::SingleMove { pokemon, move_name }
            | ServerMessage::SingleTurn { pokemon, move_name } => {
                push(pokemon);
                push(move_name);
            }
            ServerMessage::Unknown { fields, .. } => args.extend(fields.iter().cloned()),
        }

        args
    }
}

impl fmt::Display for ServerMessage {
    /// Wire form of the message, without keyword arguments
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let ServerMessage::Text(text) = self {
            return f.write_str(text);
        }
        write!(f, "|{}", self.to_args().join("|"))
    }
}

impl TournamentMessage {
    pub(super) fn from_fields(fields: &Fields) -> Result<Self> {
        let subcommand = fields.req(1)?;
        let message = match subcommand.as_str() {
            "create" => TournamentMessage::Create {
                format: fields.req(2)?,
                generator: fields.req(3)?,
                player_cap: fields.get(4),
            },
            "update" => TournamentMessage::Update(fields.joined(2)),
            "updateEnd" => TournamentMessage::UpdateEnd,
            "error" => TournamentMessage::Error(fields.joined(2)),
            "forceend" => TournamentMessage::ForceEnd,
            "join" => TournamentMessage::Join(fields.req(2)?),
            "leave" => TournamentMessage::Leave(fields.req(2)?),
            "replace" => TournamentMessage::Replace {
                old: fields.req(2)?,
                new: fields.req(3)?,
            },
            "start" => TournamentMessage::Start(fields.num(2)?),
            "disqualify" => TournamentMessage::Disqualify(fields.req(2)?),
            "battlestart" => TournamentMessage::BattleStart {
                user1: fields.req(2)?,
                user2: fields.req(3)?,
                room_id: fields.req(4)?,
            },
            "battleend" => TournamentMessage::BattleEnd {
                user1: fields.req(2)?,
                user2: fields.req(3)?,
                result: fields.req(4)?,
                score: fields.req(5)?,
                recorded: fields.get(6),
            },
            "end" => TournamentMessage::End(fields.joined(2)),
            "scouting" => TournamentMessage::Scouting(fields.req(2)?),
            "autostart" => TournamentMessage::AutoStart {
                setting: fields.req(2)?,
                timeout: fields.opt(3),
            },
            "autodq" => TournamentMessage::AutoDq {
                setting: fields.req(2)?,
                timeout: fields.opt(3),
            },
            _ => TournamentMessage::Other {
                subcommand,
                fields: fields.rest(2),
            },
        };

        Ok(message)
    }

    fn to_fields(&self) -> Vec<String> {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        match self {
            TournamentMessage::Create {
                format,
                generator,
                player_cap,
            } => strings(&["create", format, generator, player_cap]),
            TournamentMessage::Update(json) => strings(&["update", json]),
            TournamentMessage::UpdateEnd => strings(&["updateEnd"]),
            TournamentMessage::Error(message) => strings(&["error", message]),
            TournamentMessage::ForceEnd => strings(&["forceend"]),
            TournamentMessage::Join(user) => strings(&["join", user]),
            TournamentMessage::Leave(user) => strings(&["leave", user]),
            TournamentMessage::Replace { old, new } => strings(&["replace", old, new]),
            TournamentMessage::Start(count) => vec!["start".to_string(), count.to_string()],
            TournamentMessage::Disqualify(user) => strings(&["disqualify", user]),
            TournamentMessage::BattleStart {
                user1,
                user2,
                room_id,
            } => strings(&["battlestart", user1, user2, room_id]),
            TournamentMessage::BattleEnd {
                user1,
                user2,
                result,
                score,
                recorded,
            } => strings(&["battleend", user1, user2, result, score, recorded]),
            TournamentMessage::End(json) => strings(&["end", json]),
            TournamentMessage::Scouting(setting) => strings(&["scouting", setting]),
            TournamentMessage::AutoStart { setting, timeout } => {
                let mut fields = strings(&["autostart", setting]);
                fields.extend(timeout.clone());
                fields
            }
            TournamentMessage::AutoDq { setting, timeout } => {
                let mut fields = strings(&["autodq", setting]);
                fields.extend(timeout.clone());
                fields
            }
            TournamentMessage::Other { subcommand, fields } => {
                let mut out = vec![subcommand.clone()];
                out.extend(fields.iter().cloned());
                out
            }
        }
    }
}

pub(super) fn silent(fields: &Fields, index: usize) -> bool {
    bool_field(&fields.get(index))
}
