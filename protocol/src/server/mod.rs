//! Server-to-client protocol decoding
//!
//! [`parse_line`] tokenizes one line, [`parse_battle_line`] adds keyword
//! extraction and the compatibility shim, and [`handle`] walks a whole frame.

mod battle_init;
mod battle_major;
mod battle_minor;
mod battle_progress;
mod global;
mod message;
mod room;
mod tests;

pub mod battle;
pub mod kwargs;
pub mod request;
pub mod upgrade;

use std::fmt;

use anyhow::Result;
use tracing::warn;

pub use message::{ServerMessage, TournamentMessage};

use kwargs::{KeywordArgs, extract_keyword_args};
use upgrade::{upgrade, upgrade_legacy};

/// One decoded line: the canonical message and its keyword arguments
#[derive(Debug, Clone, PartialEq)]
pub struct BattleLine {
    pub message: ServerMessage,
    pub kwargs: KeywordArgs,
}

impl fmt::Display for BattleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for field in self.kwargs.to_fields() {
            write!(f, "|{field}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerFrame {
    pub room_id: Option<String>,
    pub messages: Vec<BattleLine>,
}

/// Number of fields a command keeps, the last one swallowing any separators
fn arity(command: &str) -> Option<usize> {
    match command {
        "chatmsg" | "chatmsg-raw" | "raw" | "error" | "html" | "inactive" | "inactiveoff"
        | "warning" | "fieldhtml" | "controlshtml" | "bigerror" | "debug" | "tier"
        | "challstr" | "popup" | "" => Some(1),
        "c" | "chat" | "uhtml" | "uhtmlchange" => Some(2),
        "c:" | "pm" => Some(3),
        _ => None,
    }
}

/// Tokenize one line into its command and positional fields
///
/// Commands outside the arity table are split on every `|`, unless
/// `no_default` is set, in which case they yield `None`. Legacy room
/// commands are renamed either way.
pub fn parse_line(line: &str, no_default: bool) -> Option<Vec<String>> {
    let Some(body) = line.strip_prefix('|') else {
        return Some(vec![String::new(), line.to_string()]);
    };
    if body.is_empty() {
        return Some(vec!["done".to_string()]);
    }

    let (command, rest) = match body.split_once('|') {
        Some((command, rest)) => (command, Some(rest)),
        None => (body, None),
    };

    let args: Vec<String> = match arity(command) {
        Some(n) => std::iter::once(command)
            .chain(rest.into_iter().flat_map(|rest| rest.splitn(n, '|')))
            .map(str::to_string)
            .collect(),
        None if no_default => return None,
        None => body.split('|').map(str::to_string).collect(),
    };

    Some(upgrade_legacy(args))
}

/// Decode one line into a canonical message and its keyword arguments
///
/// Commands in the arity table are taken as-is, with no keyword arguments.
/// Everything else has its trailing `[key] value` fields extracted and goes
/// through [`upgrade`] before conversion.
pub fn parse_battle_line(line: &str) -> Result<BattleLine> {
    if let Some(args) = parse_line(line, true) {
        return Ok(BattleLine {
            message: ServerMessage::from_args(&args)?,
            kwargs: KeywordArgs::new(),
        });
    }

    let body = line.strip_prefix('|').unwrap_or(line);
    let mut args: Vec<String> = body.split('|').map(str::to_string).collect();
    let kwargs = extract_keyword_args(&mut args);
    let (args, kwargs) = upgrade(upgrade_legacy(args), kwargs);

    Ok(BattleLine {
        message: ServerMessage::from_args(&args)?,
        kwargs,
    })
}

/// Parse a single line from the server into a ServerMessage
pub fn parse_server_message(line: &str) -> Result<ServerMessage> {
    parse_battle_line(line).map(|line| line.message)
}

fn split_room_id(frame: &str) -> (Option<&str>, &str) {
    match frame.strip_prefix('>') {
        Some(rest) => {
            let (room, body) = rest.split_once('\n').unwrap_or((rest, ""));
            (Some(room.trim_end_matches('\r')), body)
        }
        None => (None, frame),
    }
}

/// Parse a complete WebSocket frame into structured messages
///
/// The first malformed line fails the whole frame; see [`handle`] for the
/// lenient walk.
pub fn parse_server_frame(frame: &str) -> Result<ServerFrame> {
    let (room_id, body) = split_room_id(frame);

    let messages = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_battle_line)
        .collect::<Result<Vec<_>>>()?;

    Ok(ServerFrame {
        room_id: room_id.map(str::to_string),
        messages,
    })
}

/// Lazy walk over the lines of one frame
///
/// Cloning restarts nothing; it forks the walk at the current position.
#[derive(Debug, Clone)]
pub struct Handle<'a> {
    room_id: &'a str,
    lines: std::str::Lines<'a>,
}

impl<'a> Handle<'a> {
    pub fn room_id(&self) -> &'a str {
        self.room_id
    }
}

impl Iterator for Handle<'_> {
    type Item = (String, BattleLine);

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_battle_line(line) {
                Ok(parsed) => return Some((self.room_id.to_string(), parsed)),
                Err(e) => {
                    warn!(room = self.room_id, line, error = %e, "skipping malformed line");
                }
            }
        }
        None
    }
}

/// Walk a frame, yielding `(room_id, line)` for each non-empty line
///
/// The room id comes from a leading `>roomid` line and is empty otherwise.
/// Malformed lines are logged and skipped.
pub fn handle(frame: &str) -> Handle<'_> {
    let (room_id, body) = split_room_id(frame);
    Handle {
        room_id: room_id.unwrap_or_default(),
        lines: body.lines(),
    }
}
