//! Global message parsers
//!
//! Messages that apply to the whole connection rather than a room.

use anyhow::Result;

use super::ServerMessage;
use super::message::Fields;
use crate::ParseError;

pub(super) fn parse(f: &Fields) -> Option<Result<ServerMessage>> {
    let message = match f.command {
        "popup" => Ok(ServerMessage::Popup(f.joined(1))),
        "pm" => parse_pm(f),
        "usercount" => f.num(1).map(ServerMessage::UserCount),
        "nametaken" => parse_nametaken(f),
        "challstr" => parse_challstr(f),
        "updateuser" => parse_updateuser(f),
        "formats" => Ok(ServerMessage::Formats(f.rest(1))),
        "updatesearch" => Ok(ServerMessage::UpdateSearch(f.joined(1))),
        "updatechallenges" => Ok(ServerMessage::UpdateChallenges(f.joined(1))),
        "queryresponse" => parse_queryresponse(f),
        "unlink" => parse_unlink(f),
        _ => return None,
    };
    Some(message)
}

/// Parse |challstr|CHALLSTR
fn parse_challstr(f: &Fields) -> Result<ServerMessage> {
    // CHALLSTR can contain | characters
    let challstr = f.joined(1);
    if challstr.is_empty() {
        return Err(ParseError::InvalidFormat("challstr cannot be empty".to_string()).into());
    }

    Ok(ServerMessage::Challstr(challstr))
}

/// Parse |updateuser|USER|NAMED|AVATAR|SETTINGS
fn parse_updateuser(f: &Fields) -> Result<ServerMessage> {
    let user = f.req(1)?;
    let named = f.get(2) == "1";
    let avatar = f.get(3);
    let settings = f.opt(4).map(|_| f.joined(4));

    Ok(ServerMessage::UpdateUser {
        user,
        named,
        avatar,
        settings,
    })
}

/// Parse |nametaken|USERNAME|MESSAGE
fn parse_nametaken(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::NameTaken {
        username: f.req(1)?,
        message: f.joined(2),
    })
}

/// Parse |pm|SENDER|RECEIVER|MESSAGE
fn parse_pm(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Pm {
        sender: f.req(1)?,
        receiver: f.req(2)?,
        message: f.joined(3),
    })
}

/// Parse |queryresponse|QUERYTYPE|JSON
fn parse_queryresponse(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::QueryResponse {
        query_type: f.req(1)?,
        json: f.joined(2),
    })
}

/// Parse |unlink|USER or |unlink|hide|USER
fn parse_unlink(f: &Fields) -> Result<ServerMessage> {
    let first = f.req(1)?;
    if first == "hide" {
        return Ok(ServerMessage::Unlink {
            user: f.req(2)?,
            hide: true,
        });
    }

    Ok(ServerMessage::Unlink {
        user: first,
        hide: false,
    })
}
