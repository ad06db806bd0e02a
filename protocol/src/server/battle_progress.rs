//! Battle progress message parsers
//!
//! Turn structure, timer notices and the end of the battle.

use anyhow::Result;

use super::ServerMessage;
use super::message::Fields;

pub(super) fn parse(f: &Fields) -> Option<Result<ServerMessage>> {
    let message = match f.command {
        "done" => Ok(ServerMessage::Done),
        "request" => Ok(ServerMessage::Request(f.joined(1))),
        "inactive" => Ok(ServerMessage::Inactive(f.joined(1))),
        "inactiveoff" => Ok(ServerMessage::InactiveOff(f.joined(1))),
        "upkeep" => Ok(ServerMessage::Upkeep),
        "turn" => f.num(1).map(ServerMessage::Turn),
        "win" => Ok(ServerMessage::Win(f.get(1))),
        "tie" => Ok(ServerMessage::Tie),
        _ => return None,
    };
    Some(message)
}
