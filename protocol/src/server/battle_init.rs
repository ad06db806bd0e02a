//! Battle initialization message parsers
//!
//! These arrive at the start of a battle to establish the format and teams.

use anyhow::Result;

use super::ServerMessage;
use super::battle::GameType;
use super::message::Fields;
use crate::ParseError;

pub(super) fn parse(f: &Fields) -> Option<Result<ServerMessage>> {
    let message = match f.command {
        "player" => parse_player(f),
        "teamsize" => parse_teamsize(f),
        "gametype" => parse_gametype(f),
        "gen" => f.num(1).map(ServerMessage::Gen),
        "tier" => Ok(ServerMessage::Tier(f.joined(1))),
        "rated" => Ok(ServerMessage::Rated(f.opt(1))),
        "seed" => Ok(ServerMessage::Seed(f.get(1))),
        "rule" => Ok(ServerMessage::Rule(f.joined(1))),
        "clearpoke" => Ok(ServerMessage::ClearPoke),
        "poke" => parse_poke(f),
        "teampreview" => f.opt_num(1).map(ServerMessage::TeamPreview),
        "start" => Ok(ServerMessage::Start),
        _ => return None,
    };
    Some(message)
}

/// Parse |player|PLAYER|USERNAME|AVATAR|RATING
fn parse_player(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Player {
        player: f.player(1)?,
        username: f.opt(2),
        avatar: f.opt(3),
        rating: f.opt(4),
    })
}

/// Parse |teamsize|PLAYER|NUMBER
fn parse_teamsize(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::TeamSize {
        player: f.player(1)?,
        size: f.num(2)?,
    })
}

/// Parse |gametype|GAMETYPE
fn parse_gametype(f: &Fields) -> Result<ServerMessage> {
    let raw = f.req(1)?;
    let game_type = GameType::parse(&raw)
        .ok_or_else(|| ParseError::InvalidFormat(format!("unknown game type: {raw}")))?;

    Ok(ServerMessage::GameType(game_type))
}

/// Parse |poke|PLAYER|DETAILS|ITEM
fn parse_poke(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Poke {
        player: f.player(1)?,
        details: f.req(2)?,
        item: f.opt(3),
    })
}
