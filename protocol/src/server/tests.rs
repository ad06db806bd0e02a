#[cfg(test)]
mod tests {
    use crate::{
        BattleLine, EffectKind, GameType, HpColor, Keyword, KeywordArgs, KwValue, Player, Status,
        TournamentMessage, UpgradeRules, extract_keyword_args, handle, parse_battle_line,
        parse_challenges, parse_details, parse_effect, parse_effect_id, parse_health, parse_line,
        parse_name_parts, parse_pokemon_ident, parse_request, parse_search_state,
        parse_server_frame, parse_server_message, parse_tournament_ended, to_id, upgrade,
        upgrade_with, ServerMessage,
    };

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn tokenize(line: &str) -> (Vec<String>, KeywordArgs) {
        let mut args = strings(&line[1..].split('|').collect::<Vec<_>>());
        let kwargs = extract_keyword_args(&mut args);
        (args, kwargs)
    }

    // === Tokenizer ===

    #[test]
    fn test_parse_line_plain_text() {
        assert_eq!(parse_line("hello there", false), Some(strings(&["", "hello there"])));
        assert_eq!(parse_line("|", false), Some(strings(&["done"])));
    }

    #[test]
    fn test_parse_line_arity_table() {
        assert_eq!(
            parse_line("|chatmsg|a|b|c", false),
            Some(strings(&["chatmsg", "a|b|c"]))
        );
        assert_eq!(
            parse_line("|uhtml|poll|<b>a|b</b>", false),
            Some(strings(&["uhtml", "poll", "<b>a|b</b>"]))
        );
        assert_eq!(
            parse_line("|pm| Alice| Bob|hi|there", false),
            Some(strings(&["pm", " Alice", " Bob", "hi|there"]))
        );
        assert_eq!(
            parse_line("||some text|with pipes", true),
            Some(strings(&["", "some text|with pipes"]))
        );
    }

    #[test]
    fn test_parse_line_default_split() {
        assert_eq!(parse_line("|switch|p1a: Pikachu|Pikachu|100/100", true), None);
        assert_eq!(
            parse_line("|switch|p1a: Pikachu|Pikachu|100/100", false),
            Some(strings(&["switch", "p1a: Pikachu", "Pikachu", "100/100"]))
        );
    }

    #[test]
    fn test_parse_line_legacy_aliases() {
        assert_eq!(
            parse_line("|n|Bob|oldbob", false),
            Some(strings(&["name", "Bob", "oldbob", "false"]))
        );
        assert_eq!(
            parse_line("|N|Bob|oldbob", false),
            Some(strings(&["name", "Bob", "oldbob", "true"]))
        );
        assert_eq!(
            parse_line("|c|+Alice|hi|there", false),
            Some(strings(&["chat", "+Alice", "hi|there"]))
        );
        assert_eq!(
            parse_line("|J|Bob", false),
            Some(strings(&["join", "Bob", "true"]))
        );
        assert_eq!(
            parse_line("|l|Bob", false),
            Some(strings(&["leave", "Bob", "false"]))
        );
        assert_eq!(
            parse_line("|b|battle-gen9ou-1|Alice|Bob", false),
            Some(strings(&["battle", "battle-gen9ou-1", "Alice", "Bob"]))
        );
    }

    // === Keyword arguments ===

    #[test]
    fn test_extract_keyword_args() {
        let (args, kwargs) = tokenize("|move|p1a: X|Tackle|p2a: Y|[from] Metronome|[still]");

        assert_eq!(args, strings(&["move", "p1a: X", "Tackle", "p2a: Y"]));
        assert_eq!(kwargs.len(), 2);
        assert_eq!(kwargs.value(&Keyword::From), Some("Metronome"));
        assert_eq!(kwargs.get(&Keyword::Still), Some(&KwValue::Flag));
    }

    #[test]
    fn test_extract_keyword_args_stops_at_positional() {
        let (args, kwargs) = tokenize("|-damage|p1a: X|[weird]|50/100|[Silent]|[zeffect]");

        assert_eq!(args, strings(&["-damage", "p1a: X", "[weird]", "50/100"]));
        assert!(kwargs.has(&Keyword::Silent));
        assert!(kwargs.has(&Keyword::ZEffect));
    }

    #[test]
    fn test_extract_keyword_args_keeps_command() {
        let mut args = strings(&["[still]"]);
        let kwargs = extract_keyword_args(&mut args);

        assert!(kwargs.is_empty());
        assert_eq!(args, strings(&["[still]"]));
    }

    #[test]
    fn test_extract_unknown_keyword() {
        let (_, kwargs) = tokenize("|-heal|p1a: X|100/100|[Custom] thing");

        assert_eq!(
            kwargs.value(&Keyword::Other("custom".to_string())),
            Some("thing")
        );
    }

    // === Battle lines ===

    #[test]
    fn test_parse_battle_line_move() {
        let line = parse_battle_line("|move|p1a: X|Tackle|p2a: Y|[from] Metronome|[still]").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::Move {
                pokemon: "p1a: X".to_string(),
                move_name: "Tackle".to_string(),
                target: Some("p2a: Y".to_string()),
            }
        );
        assert_eq!(line.kwargs.value(&Keyword::From), Some("Metronome"));
    }

    #[test]
    fn test_arity_table_lines_skip_keywords() {
        let line = parse_battle_line("|tier|[Gen 9] OU").unwrap();

        assert_eq!(line.message, ServerMessage::Tier("[Gen 9] OU".to_string()));
        assert!(line.kwargs.is_empty());
    }

    #[test]
    fn test_parse_typed_numbers() {
        assert_eq!(parse_server_message("|turn|12").unwrap(), ServerMessage::Turn(12));
        assert_eq!(parse_server_message("|gen|9").unwrap(), ServerMessage::Gen(9));
        assert_eq!(
            parse_server_message("|teamsize|p2|6").unwrap(),
            ServerMessage::TeamSize {
                player: Player::P2,
                size: 6
            }
        );
        assert_eq!(
            parse_server_message("|-unboost|p2a: Y|spe|2").unwrap(),
            ServerMessage::Unboost {
                pokemon: "p2a: Y".to_string(),
                stat: "spe".to_string(),
                amount: 2,
            }
        );
        assert_eq!(
            parse_server_message("|gametype|doubles").unwrap(),
            ServerMessage::GameType(GameType::Doubles)
        );
    }

    #[test]
    fn test_parse_missing_fields_is_error() {
        assert!(parse_server_message("|turn|soon").is_err());
        assert!(parse_server_message("|move|p1a: X").is_err());
        assert!(parse_server_message("|player|p9|Alice").is_err());
    }

    #[test]
    fn test_parse_challstr() {
        let message = parse_server_message("|challstr|4|1234abc").unwrap();

        assert_eq!(message, ServerMessage::Challstr("4|1234abc".into()))
    }

    #[test]
    fn test_parse_challstr_invalid() {
        assert!(parse_server_message("|challstr|").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let message = parse_server_message("|someunknown|data").unwrap();

        assert_eq!(
            message,
            ServerMessage::Unknown {
                command: "someunknown".to_string(),
                fields: strings(&["data"]),
            }
        );
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(
            parse_server_message("Battle started!").unwrap(),
            ServerMessage::Text("Battle started!".to_string())
        );
    }

    #[test]
    fn test_parse_join_silent() {
        assert_eq!(
            parse_server_message("|J| Bob").unwrap(),
            ServerMessage::Join {
                user: " Bob".to_string(),
                silent: true
            }
        );
        assert_eq!(
            parse_server_message("|join| Bob").unwrap(),
            ServerMessage::Join {
                user: " Bob".to_string(),
                silent: false
            }
        );
    }

    #[test]
    fn test_parse_tournament() {
        assert_eq!(
            parse_server_message("|tournament|create|gen9ou|Elimination|32").unwrap(),
            ServerMessage::Tournament(TournamentMessage::Create {
                format: "gen9ou".to_string(),
                generator: "Elimination".to_string(),
                player_cap: "32".to_string(),
            })
        );
        assert_eq!(
            parse_server_message("|tournament|start|8").unwrap(),
            ServerMessage::Tournament(TournamentMessage::Start(8))
        );
    }

    // === Compatibility shim ===

    #[test]
    fn test_activate_protect_becomes_block() {
        let line = parse_battle_line("|-activate|p1a: X|move: Protect").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::Block {
                pokemon: "p1a: X".to_string(),
                effect: "move: Protect".to_string(),
                move_name: None,
                attacker: None,
            }
        );
    }

    #[test]
    fn test_activate_block_with_target_swaps_roles() {
        let line = parse_battle_line("|-activate|p2a: Y|move: Protect|[of] p1a: X").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::Block {
                pokemon: "p1a: X".to_string(),
                effect: "move: Protect".to_string(),
                move_name: None,
                attacker: None,
            }
        );
        assert_eq!(line.kwargs.value(&Keyword::Of), Some("p2a: Y"));
    }

    #[test]
    fn test_activate_startable() {
        let line = parse_battle_line("|-activate|p2a: Y|move: Wrap|[of] p1a: X").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::VolatileStart {
                pokemon: "p2a: Y".to_string(),
                effect: "move: Wrap".to_string(),
                extra: vec![],
            }
        );
        assert_eq!(line.kwargs.value(&Keyword::Of), Some("p1a: X"));
    }

    #[test]
    fn test_activate_wonder_guard() {
        let line = parse_battle_line("|-activate|p2a: Shedinja|ability: Wonder Guard").unwrap();

        assert_eq!(line.message, ServerMessage::Immune("p2a: Shedinja".to_string()));
        assert_eq!(line.kwargs.value(&Keyword::From), Some("ability:Wonder Guard"));
    }

    #[test]
    fn test_activate_repacks_positional_fields() {
        let line =
            parse_battle_line("|-activate|p1a: X|ability: Symbiosis|Leftovers|[of] p2a: Y").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::Activate {
                pokemon: "p1a: X".to_string(),
                effect: "ability: Symbiosis".to_string(),
                fields: strings(&["p2a: Y"]),
            }
        );
        assert_eq!(line.kwargs.value(&Keyword::Item), Some("Leftovers"));

        let line = parse_battle_line("|-activate|p1a: X|move: Spite|Tackle|4").unwrap();
        assert_eq!(line.kwargs.value(&Keyword::Move), Some("Tackle"));
        assert_eq!(line.kwargs.value(&Keyword::Number), Some("4"));
        assert_eq!(
            line.message,
            ServerMessage::Activate {
                pokemon: "p1a: X".to_string(),
                effect: "move: Spite".to_string(),
                fields: vec![],
            }
        );
    }

    #[test]
    fn test_activate_fairy_lock_becomes_field_activate() {
        let line = parse_battle_line("|-activate|p1a: X|move: Fairy Lock|[of] p2a: Y").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::FieldActivate("move: Fairy Lock".to_string())
        );
        assert!(line.kwargs.is_empty());
    }

    #[test]
    fn test_activate_beat_up_names_the_attacker() {
        let line = parse_battle_line("|-activate|p1a: X|move: Beat Up|[of] Pikachu").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::Activate {
                pokemon: "p1a: X".to_string(),
                effect: "move: Beat Up".to_string(),
                fields: vec![],
            }
        );
        assert_eq!(line.kwargs.value(&Keyword::Name), Some("Pikachu"));
        assert!(!line.kwargs.has(&Keyword::Of));
    }

    #[test]
    fn test_activate_sturdy_gets_ability_prefix() {
        let line = parse_battle_line("|-activate|p1a: X|Sturdy").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::Activate {
                pokemon: "p1a: X".to_string(),
                effect: "ability: Sturdy".to_string(),
                fields: vec![],
            }
        );
    }

    #[test]
    fn test_activate_block_keyword_fails() {
        let line = parse_battle_line("|-activate|p1a: X|move: Substitute|[block]").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::Fail {
                pokemon: "p1a: X".to_string(),
                action: None,
                stat: None,
            }
        );
    }

    #[test]
    fn test_cant_blocking_ability() {
        let line = parse_battle_line("|cant|p1a: X|ability: Damp|Explosion|[of] p2a: Y").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::Block {
                pokemon: "p1a: X".to_string(),
                effect: "ability: Damp".to_string(),
                move_name: Some("Explosion".to_string()),
                attacker: Some("p2a: Y".to_string()),
            }
        );
        assert!(line.kwargs.is_empty());
    }

    #[test]
    fn test_nothing_becomes_splash() {
        let line = parse_battle_line("|-nothing").unwrap();

        assert_eq!(
            line.message,
            ServerMessage::Activate {
                pokemon: String::new(),
                effect: "move:Splash".to_string(),
                fields: vec![],
            }
        );
    }

    #[test]
    fn test_protean_start_gets_ability_prefix() {
        let line = parse_battle_line("|-start|p1a: X|typechange|Fire|[from] Protean").unwrap();

        assert_eq!(line.kwargs.value(&Keyword::From), Some("ability:Protean"));
    }

    #[test]
    fn test_upgrade_is_idempotent() {
        let lines = [
            "|-activate|p1a: X|move: Protect",
            "|-activate|p2a: Y|move: Protect|[of] p1a: X",
            "|-activate|p1a: X|ability: Skill Swap|Intimidate|Levitate|[of] p2a: Y",
            "|-activate|p1a: X|item: Leppa Berry|Tackle|5",
            "|-activate|p1a: X|move: Wrap|[of] p2a: Y",
            "|-activate|p1a: X|move: Beat Up|[of] Pikachu",
            "|-activate|p1a: X|ability: Sturdy",
            "|-activate|p1a: X|Wonder Guard",
            "|-activate|p1a: X|move: Trick|Choice Scarf|Leftovers",
            "|-nothing",
            "|cant|p1a: X|ability: Damp|Explosion|[of] p2a: Y",
            "|-start|p1a: X|typechange|Fire|[from] Color Change",
            "|move|p1a: X|Taunt|p2a: Y|[from] Magic Bounce",
            "|gen|7",
        ];

        for line in lines {
            let (args, kwargs) = tokenize(line);
            let (once_args, once_kwargs) = upgrade(args, kwargs);
            let (twice_args, twice_kwargs) = upgrade(once_args.clone(), once_kwargs.clone());

            assert_eq!(once_args, twice_args, "{line}");
            assert_eq!(once_kwargs, twice_kwargs, "{line}");
        }
    }

    #[test]
    fn test_upgrade_rules_from_json() {
        let rules = UpgradeRules::from_json(r#"{"blockable": ["ingrain"]}"#).unwrap();

        assert_eq!(rules.blockable.len(), 1);
        assert_eq!(rules.startable, UpgradeRules::default().startable);

        let (args, kwargs) = tokenize("|-activate|p1a: X|move: Protect");
        let (args, _) = upgrade_with(&rules, args, kwargs);
        assert_eq!(args, strings(&["-activate", "p1a: X", "move: Protect"]));
    }

    #[test]
    fn test_upgrade_rules_invalid_json() {
        assert!(UpgradeRules::from_json("{").is_err());
    }

    // === Round trip ===

    #[test]
    fn test_round_trip() {
        let lines = [
            "|move|p1a: Pikachu|Thunderbolt|p2a: Eevee|[spread] p2a,p2b",
            "|switch|p1a: Pikachu|Pikachu, L50, M|100/100",
            "|-damage|p2a: Eevee|50/100 brn|[from] item: Life Orb",
            "|-boost|p1a: X|atk|2",
            "|-block|p1a: X|move: Protect",
            "|-start|p1a: X|typechange|Fire|[from] ability: Protean",
            "|-hitcount|p2a: Y|3",
            "|turn|3",
            "|gametype|doubles",
            "|player|p1|Alice|60|1500",
            "|poke|p1|Pikachu, L50|item",
            "|tier|[Gen 9] OU",
            "|teampreview|6",
            "|teampreview",
            "|rated",
            "|c:|1700000000|+Bob|hello|world",
            "|J|Bob",
            "|N|Bob|oldbob",
            "|updateuser| Guest 1|0|1|{\"blockPMs\":false}",
            "|tournament|battleend|Alice|Bob|win|1,0|success",
            "|unknowncmd|a|b",
            "Battle started!",
        ];

        for line in lines {
            let parsed = parse_battle_line(line).unwrap();
            let reparsed: BattleLine = parse_battle_line(&parsed.to_string()).unwrap();

            assert_eq!(parsed, reparsed, "{line}");
        }
    }

    #[test]
    fn test_display_wire_form() {
        let line = parse_battle_line("|-damage|p2a: Eevee|50/100|[from] Recoil|[of] p1a: X").unwrap();

        assert_eq!(
            line.to_string(),
            "|-damage|p2a: Eevee|50/100|[from] Recoil|[of] p1a: X"
        );
    }

    // === Frames ===

    #[test]
    fn test_handle_with_room_id() {
        let frame = ">battle-gen9ou-1\n|init|battle\n|title|Alice vs. Bob\n\n|turn|1";
        let lines: Vec<_> = handle(frame).collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|(room, _)| room == "battle-gen9ou-1"));
        assert_eq!(lines[2].1.message, ServerMessage::Turn(1));
    }

    #[test]
    fn test_handle_without_room_id_skips_malformed() {
        let frame = "|turn|soon\n|upkeep";
        let handled = handle(frame);
        let lines: Vec<_> = handled.clone().collect();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, "");
        assert_eq!(lines[0].1.message, ServerMessage::Upkeep);
        assert_eq!(handled.count(), 1);
    }

    #[test]
    fn test_parse_server_frame() {
        let frame = parse_server_frame(">lobby\n|c:|1|+Alice|hi").unwrap();

        assert_eq!(frame.room_id.as_deref(), Some("lobby"));
        assert_eq!(frame.messages.len(), 1);
        assert!(parse_server_frame("|turn|soon").is_err());
    }

    // === Sub-field parsers ===

    #[test]
    fn test_parse_pokemon_ident() {
        let ident = parse_pokemon_ident("p1a: Pikachu").unwrap();
        assert_eq!(ident.player, Player::P1);
        assert_eq!(ident.position, Some('a'));
        assert_eq!(ident.name, "Pikachu");
        assert_eq!(ident.slot(), Some(0));

        let ident = parse_pokemon_ident("p2: Mr. Mime: Jr").unwrap();
        assert_eq!(ident.position, None);
        assert_eq!(ident.name, "Mr. Mime: Jr");

        assert!(parse_pokemon_ident("Pikachu").is_none());
    }

    #[test]
    fn test_parse_details() {
        let details = parse_details("Sawsbuck", "p1a: Sawsbuck", "Sawsbuck, shiny, F, L50");

        assert_eq!(details.species, "Sawsbuck");
        assert!(details.shiny);
        assert_eq!(details.gender, Some('F'));
        assert_eq!(details.level, 50);
        assert_eq!(details.searchid, "p1a: Sawsbuck|Sawsbuck, shiny, F, L50");
    }

    #[test]
    fn test_parse_details_defaults() {
        let details = parse_details("Ogerpon", "p2: Ogerpon", "Ogerpon-Wellspring, tera:Water");
        assert_eq!(details.species, "Ogerpon-Wellspring");
        assert_eq!(details.level, 100);
        assert_eq!(details.tera_type.as_deref(), Some("Water"));

        let details = parse_details("", "p2: ", "");
        assert_eq!(details.ident, "");
        assert_eq!(details.searchid, "");
    }

    #[test]
    fn test_parse_health() {
        let health = parse_health("48/100 brn", None).unwrap();
        assert_eq!(health.hp, 48.0);
        assert_eq!(health.maxhp, 100.0);
        assert_eq!(health.status, Some(Status::Burn));
        assert_eq!(health.hpcolor, None);

        let health = parse_health("0 fnt", None).unwrap();
        assert_eq!(health.hp, 0.0);
        assert_eq!(health.maxhp, 100.0);
        assert!(health.fainted);
    }

    #[test]
    fn test_parse_health_with_prior() {
        let prior = parse_health("200/200 tox", None).unwrap();
        let health = parse_health("90 psn", Some(&prior)).unwrap();

        assert_eq!(health.hp, 180.0);
        assert_eq!(health.status, Some(Status::BadPoison));
    }

    #[test]
    fn test_parse_health_color_and_failure() {
        let health = parse_health("30/48y", None).unwrap();
        assert_eq!(health.hp, 30.0);
        assert_eq!(health.maxhp, 48.0);
        assert_eq!(health.hpcolor, Some(HpColor::Yellow));

        assert!(parse_health("abc/100", None).is_none());
        assert_eq!(parse_health("150/100", None).unwrap().hp, 100.0);
    }

    #[test]
    fn test_parse_effect() {
        let effect = parse_effect("move: Protect");
        assert_eq!(effect.name, "Protect");
        assert_eq!(effect.kind, Some(EffectKind::Move));

        let effect = parse_effect_id("ability: Intimidate");
        assert_eq!(effect.name, "intimidate");
        assert_eq!(effect.kind, Some(EffectKind::Ability));

        assert_eq!(parse_effect("Sandstorm").kind, None);
        assert_eq!(to_id("Farfetch’d"), "farfetchd");
    }

    #[test]
    fn test_parse_name_parts() {
        let parts = parse_name_parts("@Zarel@!busy");
        assert_eq!(parts.group, Some('@'));
        assert_eq!(parts.name, "Zarel");
        assert!(parts.away);
        assert_eq!(parts.status, "busy");

        let parts = parse_name_parts(" Guest 1");
        assert_eq!(parts.group, Some(' '));
        assert_eq!(parts.name, "Guest 1");
        assert!(!parts.away);
    }

    // === JSON payloads ===

    #[test]
    fn test_parse_request() {
        let json = r#"{
            "rqid": 3,
            "forceSwitch": [true, false],
            "side": {
                "name": "Alice",
                "id": "p1",
                "pokemon": [{
                    "ident": "p1: Pikachu",
                    "details": "Pikachu, L50, M",
                    "condition": "0 fnt",
                    "active": true,
                    "stats": {"atk": 50, "def": 40, "spa": 50, "spd": 50, "spe": 90},
                    "moves": ["thunderbolt"],
                    "baseAbility": "static",
                    "item": "lightball",
                    "pokeball": "pokeball"
                }]
            }
        }"#;
        let request = parse_request(json).unwrap();

        assert_eq!(request.rqid, Some(3));
        assert!(request.is_force_switch());
        let side = request.side.unwrap();
        assert_eq!(side.player(), Some(Player::P1));
        assert!(side.pokemon[0].is_fainted());
        assert_eq!(side.pokemon[0].base_ability, "static");
    }

    #[test]
    fn test_parse_request_disabled_reason() {
        let json = r#"{
            "active": [{"moves": [
                {"move": "Tackle", "id": "tackle", "pp": 35, "maxpp": 35, "target": "normal", "disabled": false},
                {"move": "Growl", "id": "growl", "pp": 40, "maxpp": 40, "target": "allAdjacentFoes", "disabled": "Taunt"}
            ]}]
        }"#;
        let request = parse_request(json).unwrap();

        assert!(request.needs_decision());
        let usable: Vec<_> = request.active[0].usable_moves().map(|(i, _)| i).collect();
        assert_eq!(usable, vec![0]);
    }

    #[test]
    fn test_parse_search_and_challenges() {
        let search =
            parse_search_state(r#"{"searching": ["gen9ou"], "games": {"battle-gen9ou-1": "A vs. B"}}"#)
                .unwrap();
        assert_eq!(search.searching, vec!["gen9ou".to_string()]);
        assert_eq!(search.games.unwrap().len(), 1);

        let challenges = parse_challenges(
            r#"{"challengesFrom": {"bob": "gen9ou"}, "challengeTo": {"to": "carol", "format": "gen9ubers"}}"#,
        )
        .unwrap();
        assert_eq!(challenges.challenges_from["bob"], "gen9ou");
        assert_eq!(challenges.challenge_to.unwrap().opponent, "carol");

        assert!(parse_challenges("not json").is_err());
    }

    #[test]
    fn test_parse_tournament_ended() {
        let ended = parse_tournament_ended(
            r#"{"results": [["Alice"]], "format": "gen9ou", "generator": "Single Elimination", "bracketData": {}}"#,
        )
        .unwrap();

        assert_eq!(ended.winners(), vec!["Alice".to_string()]);
    }
}
