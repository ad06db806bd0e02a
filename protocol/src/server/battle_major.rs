//! Major battle action message parsers
//!
//! Moves, switches and the other actions that take up a Pokemon's turn.

use anyhow::Result;

use super::ServerMessage;
use super::message::Fields;

pub(super) fn parse(f: &Fields) -> Option<Result<ServerMessage>> {
    let message = match f.command {
        "move" => parse_move(f),
        "switch" => parse_switch_like(f).map(|(pokemon, details, hp_status)| {
            ServerMessage::Switch {
                pokemon,
                details,
                hp_status,
            }
        }),
        "drag" => parse_switch_like(f).map(|(pokemon, details, hp_status)| ServerMessage::Drag {
            pokemon,
            details,
            hp_status,
        }),
        "detailschange" => parse_switch_like(f).map(|(pokemon, details, hp_status)| {
            ServerMessage::DetailsChange {
                pokemon,
                details,
                hp_status,
            }
        }),
        "replace" => parse_switch_like(f).map(|(pokemon, details, hp_status)| {
            ServerMessage::Replace {
                pokemon,
                details,
                hp_status,
            }
        }),
        "swap" => parse_swap(f),
        "cant" => parse_cant(f),
        "faint" => f.req(1).map(ServerMessage::Faint),
        "switchout" => f.req(1).map(ServerMessage::SwitchOut),
        "message" => Ok(ServerMessage::Message(f.joined(1))),
        _ => return None,
    };
    Some(message)
}

/// Parse |move|POKEMON|MOVE|TARGET
fn parse_move(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Move {
        pokemon: f.req(1)?,
        move_name: f.req(2)?,
        target: f.opt(3),
    })
}

/// Fields of |switch|, |drag|, |detailschange| and |replace|: POKEMON|DETAILS|HP STATUS
fn parse_switch_like(f: &Fields) -> Result<(String, String, Option<String>)> {
    Ok((f.req(1)?, f.req(2)?, f.opt(3)))
}

/// Parse |swap|POKEMON|POSITION
fn parse_swap(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Swap {
        pokemon: f.req(1)?,
        position: f.opt(2),
    })
}

/// Parse |cant|POKEMON|REASON|MOVE
fn parse_cant(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Cant {
        pokemon: f.req(1)?,
        reason: f.req(2)?,
        move_name: f.opt(3),
    })
}
