//! Minor battle action message parsers
//!
//! These are secondary effects in battle: damage, stat changes, status, etc.
//! In the official client, they're usually displayed in smaller font.

use anyhow::Result;

use super::ServerMessage;
use super::message::Fields;

pub(super) fn parse(f: &Fields) -> Option<Result<ServerMessage>> {
    let message = match f.command {
        "-formechange" => parse_formechange(f),
        "-fail" => parse_fail(f),
        "-block" => parse_block(f),
        "-notarget" => Ok(ServerMessage::NoTarget(f.opt(1))),
        "-miss" => parse_miss(f),

        // === HP and status ===
        "-damage" => parse_pair(f).map(|(pokemon, hp_status)| ServerMessage::Damage {
            pokemon,
            hp_status,
        }),
        "-heal" => parse_pair(f).map(|(pokemon, hp_status)| ServerMessage::Heal {
            pokemon,
            hp_status,
        }),
        "-sethp" => parse_sethp(f),
        "-status" => parse_pair(f).map(|(pokemon, status)| ServerMessage::Status {
            pokemon,
            status,
        }),
        "-curestatus" => {
            parse_pair(f).map(|(pokemon, status)| ServerMessage::CureStatus {
                pokemon,
                status,
            })
        }
        "-cureteam" => f.req(1).map(ServerMessage::CureTeam),

        // === Boosts ===
        "-boost" => parse_boost(f).map(|(pokemon, stat, amount)| ServerMessage::Boost {
            pokemon,
            stat,
            amount,
        }),
        "-unboost" => parse_boost(f).map(|(pokemon, stat, amount)| ServerMessage::Unboost {
            pokemon,
            stat,
            amount,
        }),
        "-setboost" => parse_boost(f).map(|(pokemon, stat, amount)| ServerMessage::SetBoost {
            pokemon,
            stat,
            amount,
        }),
        "-swapboost" => parse_swapboost(f),
        "-invertboost" => f.req(1).map(ServerMessage::InvertBoost),
        "-clearboost" => f.req(1).map(ServerMessage::ClearBoost),
        "-clearallboost" => Ok(ServerMessage::ClearAllBoost),
        "-clearpositiveboost" => parse_clearpositiveboost(f),
        "-clearnegativeboost" => f.req(1).map(ServerMessage::ClearNegativeBoost),
        "-copyboost" => parse_copyboost(f),

        // === Field and sides ===
        "-weather" => f.req(1).map(ServerMessage::Weather),
        "-fieldstart" => f.req(1).map(ServerMessage::FieldStart),
        "-fieldend" => f.req(1).map(ServerMessage::FieldEnd),
        "-sidestart" => parse_pair(f).map(|(side, condition)| ServerMessage::SideStart {
            side,
            condition,
        }),
        "-sideend" => parse_pair(f).map(|(side, condition)| ServerMessage::SideEnd {
            side,
            condition,
        }),
        "-swapsideconditions" => Ok(ServerMessage::SwapSideConditions),

        // === Volatiles ===
        "-start" => parse_volatile(f).map(|(pokemon, effect, extra)| {
            ServerMessage::VolatileStart {
                pokemon,
                effect,
                extra,
            }
        }),
        "-end" => parse_volatile(f).map(|(pokemon, effect, extra)| ServerMessage::VolatileEnd {
            pokemon,
            effect,
            extra,
        }),

        // === Damage modifiers ===
        "-crit" => f.req(1).map(ServerMessage::Crit),
        "-supereffective" => f.req(1).map(ServerMessage::SuperEffective),
        "-resisted" => f.req(1).map(ServerMessage::Resisted),
        "-immune" => f.req(1).map(ServerMessage::Immune),

        // === Items and abilities ===
        "-item" => parse_pair(f).map(|(pokemon, item)| ServerMessage::Item {
            pokemon,
            item,
        }),
        "-enditem" => parse_pair(f).map(|(pokemon, item)| ServerMessage::EndItem {
            pokemon,
            item,
        }),
        "-ability" => parse_volatile(f).map(|(pokemon, ability, extra)| ServerMessage::Ability {
            pokemon,
            ability,
            extra,
        }),
        "-endability" => parse_endability(f),

        // === Transformations ===
        "-transform" => {
            parse_pair(f).map(|(pokemon, species)| ServerMessage::Transform {
                pokemon,
                species,
            })
        }
        "-mega" => parse_mega(f).map(|(pokemon, species, item)| ServerMessage::Mega {
            pokemon,
            species,
            item,
        }),
        "-primal" => f.req(1).map(ServerMessage::Primal),
        "-burst" => parse_mega(f).map(|(pokemon, species, item)| ServerMessage::Burst {
            pokemon,
            species,
            item,
        }),
        "-zpower" => f.req(1).map(ServerMessage::ZPower),
        "-zbroken" => f.req(1).map(ServerMessage::ZBroken),
        "-terastallize" => {
            parse_pair(f).map(|(pokemon, tera_type)| ServerMessage::Terastallize {
                pokemon,
                tera_type,
            })
        }

        // === Miscellaneous ===
        "-activate" => parse_activate(f),
        "-fieldactivate" => f.req(1).map(ServerMessage::FieldActivate),
        "-hint" => Ok(ServerMessage::Hint(f.joined(1))),
        "-center" => Ok(ServerMessage::Center),
        "-message" => Ok(ServerMessage::BattleMessage(f.joined(1))),
        "-combine" => Ok(ServerMessage::Combine),
        "-waiting" => parse_waiting(f),
        "-prepare" => parse_move_like(f).map(|(pokemon, move_name, target)| {
            ServerMessage::Prepare {
                pokemon,
                move_name,
                target,
            }
        }),
        "-mustrecharge" => f.req(1).map(ServerMessage::MustRecharge),
        "-hitcount" => parse_hitcount(f),
        "-singlemove" => {
            parse_pair(f).map(|(pokemon, move_name)| ServerMessage::SingleMove {
                pokemon,
                move_name,
            })
        }
        "-singleturn" => {
            parse_pair(f).map(|(pokemon, move_name)| ServerMessage::SingleTurn {
                pokemon,
                move_name,
            })
        }
        "-anim" => parse_move_like(f).map(|(pokemon, move_name, target)| ServerMessage::Anim {
            pokemon,
            move_name,
            target,
        }),
        "-ohko" => Ok(ServerMessage::Ohko),
        _ => return None,
    };
    Some(message)
}

/// Parse |-formechange|POKEMON|SPECIES|HP STATUS
fn parse_formechange(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::FormeChange {
        pokemon: f.req(1)?,
        species: f.req(2)?,
        hp_status: f.opt(3),
    })
}

/// Parse |-fail|POKEMON|ACTION or |-fail|POKEMON|unboost|STAT
fn parse_fail(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Fail {
        pokemon: f.req(1)?,
        action: f.opt(2),
        stat: f.opt(3),
    })
}

/// Parse |-block|POKEMON|EFFECT|MOVE|ATTACKER
fn parse_block(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Block {
        pokemon: f.req(1)?,
        effect: f.req(2)?,
        move_name: f.opt(3),
        attacker: f.opt(4),
    })
}

/// Parse |-miss|SOURCE|TARGET
fn parse_miss(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Miss {
        source: f.req(1)?,
        target: f.opt(2),
    })
}

/// Parse |-sethp|POKEMON|HP, with the older two-Pokemon form kept as extra fields
fn parse_sethp(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::SetHp {
        pokemon: f.req(1)?,
        hp_status: f.req(2)?,
        extra: f.rest(3),
    })
}

/// Two required fields, usually POKEMON and one value
fn parse_pair(f: &Fields) -> Result<(String, String)> {
    Ok((f.req(1)?, f.req(2)?))
}

/// Fields of |-boost|, |-unboost| and |-setboost|: POKEMON|STAT|AMOUNT
fn parse_boost(f: &Fields) -> Result<(String, String, i32)> {
    Ok((f.req(1)?, f.req(2)?, f.num(3)?))
}

/// Parse |-swapboost|SOURCE|TARGET|STATS
fn parse_swapboost(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::SwapBoost {
        pokemon: f.req(1)?,
        target: f.req(2)?,
        stats: f.opt(3),
    })
}

/// Parse |-clearpositiveboost|TARGET|POKEMON|EFFECT
fn parse_clearpositiveboost(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::ClearPositiveBoost {
        target: f.req(1)?,
        source: f.opt(2),
        effect: f.opt(3),
    })
}

/// Parse |-copyboost|POKEMON|FROM|STATS
fn parse_copyboost(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::CopyBoost {
        pokemon: f.req(1)?,
        from_pokemon: f.req(2)?,
        stats: f.opt(3),
    })
}

/// POKEMON|EFFECT followed by any number of extra fields
fn parse_volatile(f: &Fields) -> Result<(String, String, Vec<String>)> {
    Ok((f.req(1)?, f.req(2)?, f.rest(3)))
}

/// Parse |-endability|POKEMON|ABILITY
fn parse_endability(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::EndAbility {
        pokemon: f.req(1)?,
        ability: f.opt(2),
    })
}

/// Fields of |-mega| and |-burst|: POKEMON|SPECIES|ITEM
fn parse_mega(f: &Fields) -> Result<(String, String, String)> {
    Ok((f.req(1)?, f.req(2)?, f.req(3)?))
}

/// Parse |-activate|POKEMON|EFFECT|...
///
/// The Pokemon is empty for field-wide activations such as Splash.
fn parse_activate(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Activate {
        pokemon: f.get(1),
        effect: f.req(2)?,
        fields: f.rest(3),
    })
}

/// Parse |-waiting|SOURCE|TARGET
fn parse_waiting(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::Waiting {
        source: f.req(1)?,
        target: f.req(2)?,
    })
}

fn parse_move_like(f: &Fields) -> Result<(String, String, Option<String>)> {
    Ok((f.req(1)?, f.req(2)?, f.opt(3)))
}

/// Parse |-hitcount|POKEMON|NUM
fn parse_hitcount(f: &Fields) -> Result<ServerMessage> {
    Ok(ServerMessage::HitCount {
        pokemon: f.req(1)?,
        count: f.num(2)?,
    })
}
