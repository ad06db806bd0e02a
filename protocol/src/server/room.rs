//! Room message parsers
//!
//! Chat, presence and HTML messages scoped to one room, plus tournaments.

use anyhow::Result;

use super::message::{Fields, silent};
use super::{ServerMessage, TournamentMessage};

pub(super) fn parse(f: &Fields) -> Option<Result<ServerMessage>> {
    let message = match f.command {
        "" => Ok(ServerMessage::Text(f.joined(1))),
        "init" => Ok(ServerMessage::Init(f.get(1))),
        "title" => Ok(ServerMessage::Title(f.joined(1))),
        "userlist" => Ok(ServerMessage::UserList(f.joined(1))),
        "html" => Ok(ServerMessage::Html(f.joined(1))),
        "uhtml" => parse_uhtml(f).map(|(name, html)| ServerMessage::Uhtml { name, html }),
        "uhtmlchange" => {
            parse_uhtml(f).map(|(name, html)| ServerMessage::UhtmlChange { name, html })
        }
        "join" => parse_join(f),
        "leave" => parse_leave(f),
        "name" => parse_name(f),
        "chat" => parse_chat(f),
        ":" => Ok(ServerMessage::Timestamp(f.get(1))),
        "c:" => parse_timestamped_chat(f),
        "battle" => parse_battle(f),
        "raw" => Ok(ServerMessage::Raw(f.joined(1))),
        "warning" => Ok(ServerMessage::Warning(f.joined(1))),
        "error" => Ok(ServerMessage::Error(f.joined(1))),
        "bigerror" => Ok(ServerMessage::BigError(f.joined(1))),
        "chatmsg" => Ok(ServerMessage::ChatMsg(f.joined(1))),
        "chatmsg-raw" => Ok(ServerMessage::ChatMsgRaw(f.joined(1))),
        "controlshtml" => Ok(ServerMessage::ControlsHtml(f.joined(1))),
        "fieldhtml" => Ok(ServerMessage::FieldHtml(f.joined(1))),
        "debug" => Ok(ServerMessage::Debug(f.joined(1))),
        "tournament" => TournamentMessage::from_fields(f).map(ServerMessage::Tournament),
        _ => return None,
    };
    Some(message)
}

fn parse_uhtml(f: &Fields) -> Result<(String, String)> {
    Ok((f.req(1)?, f.joined(2)))
}

/// Parse |join|USER|SILENT
fn parse_join(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Join {
        user: f.req(1)?,
        silent: silent(f, 2),
    })
}

/// Parse |leave|USER|SILENT
fn parse_leave(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Leave {
        user: f.req(1)?,
        silent: silent(f, 2),
    })
}

/// Parse |name|USER|OLDID|SILENT
fn parse_name(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Name {
        user: f.req(1)?,
        old_id: f.get(2),
        silent: silent(f, 3),
    })
}

/// Parse |chat|USER|MESSAGE
fn parse_chat(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Chat {
        user: f.req(1)?,
        message: f.joined(2),
    })
}

/// Parse |c:|TIMESTAMP|USER|MESSAGE
fn parse_timestamped_chat(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::TimestampChat {
        timestamp: f.req(1)?,
        user: f.req(2)?,
        message: f.joined(3),
    })
}

/// Parse |battle|ROOMID|USER1|USER2
fn parse_battle(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Battle {
        room_id: f.req(1)?,
        user1: f.get(2),
        user2: f.get(3),
    })
}
