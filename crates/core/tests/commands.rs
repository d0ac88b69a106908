//! Tests for the line loop, command dispatch, and individual command
//! grammars.

mod common;

use common::{assert_clean, commands, errors, kinds, lex, span, warnings};
use mccmd_core::{TokenKind, TokenValue};
use mccmd_diagnostics::{SyntaxError, WarningKind};

// ─── 1. Lines ────────────────────────────────────────────────────────────────

#[test]
fn comment_line() {
    let result = lex("# hello");
    assert_eq!(kinds(&result), vec![TokenKind::Comment]);
    assert_eq!(result.tokens[0].span, span((1, 0), (1, 7)));
}

#[test]
fn blank_lines_and_indentation() {
    let result = lex("\n   say hi\n\n# done\n");
    assert!(!result.has_errors());
    assert_eq!(commands(&result), vec!["say"]);
    assert_eq!(result.tokens[0].span.begin, common::pos(2, 3));
}

#[test]
fn empty_input() {
    let result = lex("");
    assert!(result.tokens.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn errors_do_not_cross_lines() {
    let result = lex("give @p\nsay ok");
    assert_eq!(errors(&result), vec![SyntaxError::ExpId]);
    assert_eq!(commands(&result), vec!["give", "say"]);
}

// ─── 2. Dispatch ─────────────────────────────────────────────────────────────

#[test]
fn aliases_resolve_to_canonical_names() {
    let result = lex("tp @s 1 2 3");
    assert_eq!(
        kinds(&result),
        vec![
            TokenKind::Command,
            TokenKind::Selector,
            TokenKind::Position,
            TokenKind::Position,
            TokenKind::Position
        ]
    );
    assert_eq!(
        result.tokens[0].value,
        TokenValue::Command("teleport".into())
    );
}

#[test]
fn unknown_command_covers_the_line() {
    let result = lex("foo bar");
    assert_eq!(
        errors(&result),
        vec![SyntaxError::UnknownCommand {
            command: "foo".into()
        }]
    );
    assert_eq!(result.tokens.len(), 1);
    assert_eq!(result.tokens[0].span, span((1, 0), (1, 7)));
}

#[test]
fn command_must_start_with_a_word() {
    assert_eq!(errors(&lex("@s")), vec![SyntaxError::ExpCommand]);
}

#[test]
fn surplus_arguments_are_one_error() {
    let result = lex("list extra");
    assert_eq!(errors(&result), vec![SyntaxError::TooManyArgs]);
    assert_eq!(result.tokens[1].span, span((1, 5), (1, 10)));
}

#[test]
fn malformed_argument_halts_the_command() {
    let result = lex("effect @s speed abc");
    assert_eq!(
        errors(&result),
        vec![SyntaxError::ExpInteger, SyntaxError::TooManyArgs]
    );
    assert_eq!(
        kinds(&result),
        vec![
            TokenKind::Command,
            TokenKind::Selector,
            TokenKind::String,
            TokenKind::Error,
            TokenKind::Error
        ]
    );
}

#[test]
fn restricted_commands_warn() {
    let result = lex("op @s");
    assert!(!result.has_errors());
    assert_eq!(
        warnings(&result),
        vec![WarningKind::NoPermission {
            command: "op".into()
        }]
    );
    let result = lex("connect ws://x");
    assert!(!result.has_errors());
    assert_eq!(
        warnings(&result),
        vec![WarningKind::NoPermission {
            command: "connect".into()
        }]
    );
}

// ─── 3. Command grammars ─────────────────────────────────────────────────────

#[test]
fn a_line_of_each_shape() {
    for src in [
        "ability @s mayfly true",
        "camerashake add @a 0.5 2 rotational",
        "clone 0 0 0 5 5 5 ~ ~ ~ filtered move stone",
        "damage @e 5 fall entity @p",
        "dialogue open @e[type=npc] @p scene_1",
        "difficulty 2",
        "difficulty peaceful",
        "effect @s clear",
        "enchant @p sharpness 3",
        "fill ~ ~ ~ ~5 ~5 ~5 air replace stone",
        "fog @a push minecraft:fog_hell my_fog",
        "gamerule keepInventory true",
        "give @s diamond_sword 1 0 {\"minecraft:can_destroy\":{\"blocks\":[\"stone\"]}}",
        "help 2",
        "kick Steve go away",
        "locate structure village true",
        "loot give @p kill @e[type=cow,c=1] mainhand",
        "mobevent minecraft:pillager_patrols_event false",
        "music queue theme 0.5 2 loop",
        "particle minecraft:heart ~ ~1 ~",
        "playanimation @s animation.player.wave none 0.2",
        "playsound note.harp @a ~ ~ ~ 1 1.5",
        "replaceitem entity @s slot.hotbar 0 destroy apple 5",
        "ride @s summon_ride horse reassign_rides",
        "schedule on_area_loaded add circle ~ ~ ~ 4 my/func",
        "scoreboard objectives add kills dummy \"Kills\"",
        "scoreboard objectives setdisplay sidebar kills descending",
        "scoreboard players add @a kills 1",
        "scoreboard players list *",
        "scoreboard players operation @s a += @p b",
        "scoreboard players reset * kills",
        "setmaxplayers 10",
        "spawnpoint @p ~ ~ ~",
        "stopsound @a",
        "structure save house ~ ~ ~ ~5 ~5 ~5 disk",
        "structure save house ~ ~ ~ ~5 ~5 ~5 false memory true",
        "structure load house ~ ~ ~ 90_degrees x layer_by_layer 2 true false 0.5 seed",
        "summon creeper ~ ~ ~ minecraft:become_charged Bob",
        "tag @s remove \"a b\"",
        "tell @a hello there",
        "testforblocks 0 0 0 1 1 1 2 2 2 masked",
        "tickingarea add circle ~ ~ ~ 4 spawn true",
        "tickingarea remove spawn",
        "time set noon",
        "time query daytime",
        "title @a times 10 70 20",
        "titleraw @a actionbar {\"rawtext\":[]}",
        "volumearea add my_area 0 0 0 5 5 5",
        "weather rain 600",
        "whitelist add Steve",
    ] {
        assert_clean(src);
    }
}

#[test]
fn teleport_shapes() {
    for src in [
        "tp @p",
        "tp @s @p true",
        "tp ~ ~1 ~",
        "tp @s ~ ~ ~ 90 0 true",
        "tp @s ~ ~ ~ 90",
        "tp @s ~ ~ ~ facing @p",
        "tp @s ~ ~ ~ facing 0 64 0 false",
        "tp @s ~ ~ ~ true",
    ] {
        assert_clean(src);
    }
}

#[test]
fn function_path_required() {
    assert_clean("function my/pack/func");
    let result = lex("function");
    assert_eq!(errors(&result), vec![SyntaxError::ExpFunctionPath]);
    assert!(result.tokens[1].span.is_empty());
    assert_eq!(result.tokens[1].span.begin, common::pos(1, 8));
}

#[test]
fn wsserver_takes_the_rest_of_the_line() {
    let result = lex("wsserver out");
    assert_eq!(
        kinds(&result),
        vec![TokenKind::Command, TokenKind::Option]
    );
    let result = lex("wsserver ws://localhost:8000/a b");
    assert_eq!(
        kinds(&result),
        vec![TokenKind::Command, TokenKind::String]
    );
}

#[test]
fn xp_level_suffix() {
    assert_clean("xp 5L @s");
    assert_clean("xp -3l");
    assert_clean("xp 100 @a");
}

#[test]
fn scoreboard_random_and_test_bounds() {
    assert_eq!(
        errors(&lex("scoreboard players random @a obj 5 1")),
        vec![SyntaxError::ImpossibleRandom]
    );
    assert_eq!(
        errors(&lex("scoreboard players test @s obj 5 1")),
        vec![SyntaxError::ImpossibleTest]
    );
    assert_clean("scoreboard players test @s obj * 10");
    assert_clean("scoreboard players test @s obj 5 *");
    assert_clean("scoreboard players test @s obj 5");
}

#[test]
fn scoreboard_operation_needs_an_operator() {
    assert_eq!(
        errors(&lex("scoreboard players operation @s a ? @p b")),
        vec![SyntaxError::ExpScbOp, SyntaxError::TooManyArgs]
    );
    for op in ["-=", "*=", "/=", "%=", "><", "=", "<", ">"] {
        assert_clean(&format!("scoreboard players operation @s a {op} @p b"));
    }
}

#[test]
fn spreadplayers_range_checks() {
    assert_clean("spreadplayers 0 0 5 10 @a");
    assert_eq!(
        errors(&lex("spreadplayers 0 0 5 5 @a")),
        vec![SyntaxError::ImpossibleSpread]
    );
    assert_eq!(
        errors(&lex("spreadplayers 0 0 0 0.5 @a")),
        vec![SyntaxError::below(1)]
    );
}

#[test]
fn difficulty_levels() {
    assert_eq!(
        errors(&lex("difficulty 4")),
        vec![SyntaxError::out_of_range(0, 3)]
    );
}

#[test]
fn inputpermission_grammar() {
    assert_clean("inputpermission query @s camera");
    assert_clean("inputpermission query @s movement disabled");
    assert_clean("inputpermission set @a movement enabled");
    assert_eq!(
        errors(&lex("inputpermission set @a movement on")),
        vec![SyntaxError::ExpState]
    );
}
