//! Argument grammars for every command except `execute`.
//!
//! Each rule starts with the cursor on the first argument. Trailing optional
//! arguments go through [`Tokenizer::chain`].

use mccmd_diagnostics::SyntaxError;

use super::json::JsonShape;
use super::registry::Rule;
use super::scan::{Halt, Parse, Scan};
use super::selector::PERMISSIONS;
use super::token::{TokenKind, TokenValue};
use super::tokenizer::{Arg, Tokenizer};

/// Commands whose grammar does not change between versions.
pub(crate) const TABLE: &[(&str, Rule)] = &[
    ("ability", ability),
    ("alwaysday", alwaysday),
    ("camerashake", camerashake),
    ("clear", clear),
    ("clearspawnpoint", clearspawnpoint),
    ("clone", clone),
    ("damage", damage),
    ("deop", Tokenizer::target),
    ("dialogue", dialogue),
    ("difficulty", difficulty),
    ("effect", effect),
    ("enchant", enchant),
    ("event", event),
    ("fill", fill),
    ("fog", fog),
    ("function", function),
    ("gamemode", gamemode),
    ("gamerule", gamerule),
    ("give", give),
    ("help", help),
    ("immutableworld", alwaysday),
    ("kick", kick),
    ("kill", clearspawnpoint),
    ("list", no_args),
    ("locate", locate),
    ("loot", loot),
    ("me", Tokenizer::message),
    ("mobevent", mobevent),
    ("music", music),
    ("op", Tokenizer::target),
    ("particle", particle),
    ("playanimation", playanimation),
    ("playsound", playsound),
    ("replaceitem", replaceitem),
    ("ride", ride),
    ("save", save),
    ("say", Tokenizer::message),
    ("schedule", schedule),
    ("scoreboard", scoreboard),
    ("seed", no_args),
    ("setblock", setblock),
    ("setmaxplayers", setmaxplayers),
    ("setworldspawn", setworldspawn),
    ("spawnpoint", spawnpoint),
    ("spreadplayers", spreadplayers),
    ("stop", no_args),
    ("stopsound", stopsound),
    ("structure", structure),
    ("summon", summon),
    ("tag", tag),
    ("teleport", teleport),
    ("tell", tell),
    ("tellraw", tellraw),
    ("testfor", Tokenizer::target),
    ("testforblock", testforblock),
    ("testforblocks", testforblocks),
    ("tickingarea", tickingarea),
    ("time", time),
    ("title", title),
    ("titleraw", titleraw),
    ("toggledownfall", no_args),
    ("volumearea", volumearea),
    ("weather", weather),
    ("whitelist", whitelist),
    ("worldbuilder", no_args),
    ("wsserver", wsserver),
    ("xp", xp),
];

const ALL_DIMENSIONS: &[&str] = &["all-dimensions"];

fn no_args(_: &mut Tokenizer) -> Parse {
    Ok(())
}

fn id(t: &mut Tokenizer) -> Parse {
    t.id_token().map(drop)
}

fn string(t: &mut Tokenizer) -> Parse {
    t.string_token().map(drop)
}

fn boolean(t: &mut Tokenizer) -> Parse {
    t.boolean_token().map(drop)
}

/// A full position, or a name when the argument is not a coordinate.
fn pos_or_name(t: &mut Tokenizer) -> Parse {
    if t.next_is_pos() { t.pos3() } else { string(t) }
}

/// `<center> <radius>`
fn circle(t: &mut Tokenizer) -> Parse {
    t.pos3()?;
    t.int_at_least(0)
}

fn ability(t: &mut Tokenizer) -> Parse {
    t.target()?;
    t.chain(&[|t| {
        t.options(&["worldbuilder", "mayfly", "mute"])?;
        boolean(t)
    }])
}

fn alwaysday(t: &mut Tokenizer) -> Parse {
    t.chain(&[boolean])
}

fn camerashake(t: &mut Tokenizer) -> Parse {
    match t.options(&["add", "stop"])? {
        "add" => {
            t.target()?;
            t.chain(&[
                |t| t.num_in(0.0, 4.0),
                Tokenizer::num_any,
                |t| t.options(&["positional", "rotational"]).map(drop),
            ])
        }
        _ => t.chain(&[Tokenizer::target]),
    }
}

fn clear(t: &mut Tokenizer) -> Parse {
    t.chain(&[
        Tokenizer::target,
        id,
        |t| t.int_at_least(-1),
        |t| t.int_at_least(-1),
    ])
}

fn clearspawnpoint(t: &mut Tokenizer) -> Parse {
    t.chain(&[Tokenizer::target])
}

fn clone_mode(t: &mut Tokenizer) -> Parse {
    t.options(&["force", "move", "normal"]).map(drop)
}

fn clone(t: &mut Tokenizer) -> Parse {
    for _ in 0..3 {
        t.pos3()?;
    }
    t.chain(&[|t| match t.options(&["masked", "replace", "filtered"])? {
        "filtered" => {
            clone_mode(t)?;
            id(t)?;
            t.block_suffix()
        }
        _ => t.chain(&[clone_mode]),
    }])
}

fn damage(t: &mut Tokenizer) -> Parse {
    t.target()?;
    t.int_at_least(0)?;
    t.chain(&[Tokenizer::word_token, |t| {
        t.options(&["entity"])?;
        t.target()
    }])
}

fn dialogue(t: &mut Tokenizer) -> Parse {
    let mode = t.options(&["change", "open"])?;
    t.target()?;
    if mode == "change" {
        string(t)?;
        t.chain(&[Tokenizer::target])
    } else {
        t.target()?;
        t.chain(&[string])
    }
}

fn difficulty(t: &mut Tokenizer) -> Parse {
    if !t.next_is_number() {
        return t
            .options(&["easy", "normal", "hard", "peaceful", "p", "e", "n", "h"])
            .map(drop);
    }
    let mut tok = t.token(TokenKind::Option);
    let level = tok.expect(Tokenizer::number)?;
    tok.set_value(TokenValue::Number(level));
    if !(0.0..=3.0).contains(&level) {
        tok.reject(SyntaxError::out_of_range(0, 3));
    }
    Ok(())
}

fn effect(t: &mut Tokenizer) -> Parse {
    t.target()?;
    {
        let mut tok = t.untyped_token();
        if tok.expect(Tokenizer::namespaced_id)? == "clear" {
            tok.set_kind(TokenKind::Option);
            return Ok(());
        }
        tok.set_kind(TokenKind::String);
    }
    t.chain(&[|t| t.int_at_least(0), |t| t.int_in(0, 255), boolean])
}

fn enchant(t: &mut Tokenizer) -> Parse {
    t.target()?;
    if t.next_is_number() {
        t.int_any()?;
    } else {
        id(t)?;
    }
    t.chain(&[Tokenizer::int_any])
}

fn event(t: &mut Tokenizer) -> Parse {
    t.options(&["entity"])?;
    t.target()?;
    string(t)
}

fn fill(t: &mut Tokenizer) -> Parse {
    t.pos3()?;
    t.pos3()?;
    id(t)?;
    t.chain(&[Tokenizer::block_suffix, |t| {
        match t.options(&["destroy", "hollow", "keep", "outline", "replace"])? {
            "replace" => t.chain(&[id, Tokenizer::block_suffix]),
            _ => Ok(()),
        }
    }])
}

fn fog(t: &mut Tokenizer) -> Parse {
    t.target()?;
    if t.options(&["push", "pop", "remove"])? == "push" {
        id(t)?;
    }
    string(t)
}

fn function(t: &mut Tokenizer) -> Parse {
    t.rest_of_line(SyntaxError::ExpFunctionPath)
}

fn gamemode(t: &mut Tokenizer) -> Parse {
    t.gamemode()?;
    t.chain(&[Tokenizer::target])
}

fn gamerule(t: &mut Tokenizer) -> Parse {
    t.chain(&[Tokenizer::word_token, |t| {
        if t.next_is_number() { t.int_any() } else { boolean(t) }
    }])
}

fn give(t: &mut Tokenizer) -> Parse {
    t.target()?;
    id(t)?;
    t.chain(&[
        |t| t.int_in(1, 32767),
        |t| t.int_in(0, 32767),
        |t| t.json(JsonShape::Object),
    ])
}

fn help(t: &mut Tokenizer) -> Parse {
    t.chain(&[|t| {
        if t.next_is_number() { t.int_any() } else { t.word_token() }
    }])
}

fn kick(t: &mut Tokenizer) -> Parse {
    t.target()?;
    t.chain(&[Tokenizer::message])
}

fn locate(t: &mut Tokenizer) -> Parse {
    let mode = t.options(&["biome", "structure"])?;
    id(t)?;
    if mode == "structure" {
        t.chain(&[boolean])?;
    }
    Ok(())
}

fn container_slot(t: &mut Tokenizer) -> Parse {
    match t.options(&["block", "entity"])? {
        "block" => {
            t.pos3()?;
            t.options(&["slot.container"]).map(drop)
        }
        _ => {
            t.target()?;
            t.word_token()
        }
    }
}

fn loot(t: &mut Tokenizer) -> Parse {
    match t.options(&["spawn", "give", "insert", "replace"])? {
        "spawn" | "insert" => t.pos3()?,
        "give" => t.target()?,
        _ => {
            container_slot(t)?;
            t.int_any()?;
            if t.next_is_number() {
                t.int_at_least(1)?;
            }
        }
    }
    match t.options(&["kill", "loot"])? {
        "kill" => t.target()?,
        _ => string(t)?,
    }
    t.chain(&[|t| {
        let mut tok = t.untyped_token();
        let tool = tok.expect(Tokenizer::string)?;
        tok.set_kind(if matches!(tool.as_str(), "mainhand" | "offhand") {
            TokenKind::Option
        } else {
            TokenKind::String
        });
        Ok(())
    }])
}

fn mobevent(t: &mut Tokenizer) -> Parse {
    id(t)?;
    t.chain(&[boolean])
}

fn music(t: &mut Tokenizer) -> Parse {
    const VOLUME: Arg = |t| t.num_in(0.0, 1.0);
    const FADE: Arg = |t| t.num_in(0.0, 10.0);
    match t.options(&["play", "queue", "stop", "volume"])? {
        "play" | "queue" => {
            string(t)?;
            t.chain(&[VOLUME, FADE, |t| {
                t.options(&["play_once", "loop"]).map(drop)
            }])
        }
        "stop" => t.chain(&[FADE]),
        _ => VOLUME(t),
    }
}

fn particle(t: &mut Tokenizer) -> Parse {
    id(t)?;
    t.chain(&[Tokenizer::pos3])
}

fn playanimation(t: &mut Tokenizer) -> Parse {
    t.target()?;
    string(t)?;
    // next state, blend out time, stop expression, controller
    t.chain(&[string, Tokenizer::num_any, string, string])
}

fn playsound(t: &mut Tokenizer) -> Parse {
    string(t)?;
    t.chain(&[
        Tokenizer::target,
        Tokenizer::pos3,
        |t| t.num_at_least(0.0),
        |t| t.num_in(0.0, 256.0),
        |t| t.num_at_least(0.0),
    ])
}

fn replaceitem(t: &mut Tokenizer) -> Parse {
    container_slot(t)?;
    t.int_any()?;
    let handling = {
        let mut tok = t.untyped_token();
        let item = tok.expect(Tokenizer::namespaced_id)?;
        let handling = matches!(item.as_str(), "destroy" | "keep");
        tok.set_kind(if handling {
            TokenKind::Option
        } else {
            TokenKind::String
        });
        handling
    };
    if handling {
        id(t)?;
    }
    t.chain(&[
        |t| t.int_in(1, 64),
        |t| t.int_in(0, 32767),
        |t| t.json(JsonShape::Object),
    ])
}

fn ride(t: &mut Tokenizer) -> Parse {
    t.target()?;
    let mode = t.options(&[
        "start_riding",
        "stop_riding",
        "evict_riders",
        "summon_rider",
        "summon_ride",
    ])?;
    match mode {
        "start_riding" => {
            t.target()?;
            t.chain(&[
                |t| t.options(&["teleport_ride", "teleport_rider"]).map(drop),
                |t| t.options(&["if_group_fits", "until_full"]).map(drop),
            ])
        }
        "summon_rider" => {
            id(t)?;
            t.chain(&[Tokenizer::spawn_event, string])
        }
        "summon_ride" => {
            id(t)?;
            t.chain(&[
                |t| {
                    t.options(&["skip_riders", "no_ride_change", "reassign_rides"])
                        .map(drop)
                },
                Tokenizer::spawn_event,
                string,
            ])
        }
        _ => Ok(()),
    }
}

fn save(t: &mut Tokenizer) -> Parse {
    t.options(&["hold", "query", "resume"]).map(drop)
}

fn schedule(t: &mut Tokenizer) -> Parse {
    t.options(&["on_area_loaded"])?;
    t.options(&["add"])?;
    if t.next_is_pos() {
        t.pos3()?;
        t.pos3()?;
    } else if t.options(&["circle", "tickingarea"])? == "circle" {
        circle(t)?;
    } else {
        string(t)?;
    }
    t.rest_of_line(SyntaxError::ExpFunctionPath)
}

fn scoreboard(t: &mut Tokenizer) -> Parse {
    match t.options(&["objectives", "players"])? {
        "objectives" => objectives(t),
        _ => players(t),
    }
}

fn objectives(t: &mut Tokenizer) -> Parse {
    match t.options(&["add", "list", "remove", "setdisplay"])? {
        "add" => {
            t.scoreboard_token()?;
            t.options(&["dummy"])?;
            t.chain(&[string])
        }
        "remove" => t.scoreboard_token(),
        "setdisplay" => {
            if t.options(&["list", "sidebar", "belowname"])? == "belowname" {
                t.chain(&[Tokenizer::scoreboard_token])
            } else {
                t.chain(&[Tokenizer::scoreboard_token, |t| {
                    t.options(&["ascending", "descending"]).map(drop)
                }])
            }
        }
        _ => Ok(()),
    }
}

fn players(t: &mut Tokenizer) -> Parse {
    let mode = t.options(&[
        "set",
        "add",
        "remove",
        "list",
        "operation",
        "random",
        "reset",
        "test",
    ])?;
    if mode == "list" {
        return t.chain(&[Tokenizer::starrable_target]);
    }
    t.starrable_target()?;
    match mode {
        "set" | "add" | "remove" => {
            t.scoreboard_token()?;
            t.int_any()
        }
        "operation" => {
            t.scoreboard_token()?;
            scoreboard_operator(t)?;
            t.starrable_target()?;
            t.scoreboard_token()
        }
        "random" => {
            t.scoreboard_token()?;
            let min = t.checked_int(i32::MIN, None)?;
            let mut tok = t.token(TokenKind::Number);
            let max = tok.expect(Tokenizer::integer)?;
            tok.set_value(TokenValue::Number(max.into()));
            if min > max {
                tok.reject(SyntaxError::ImpossibleRandom);
            }
            Ok(())
        }
        "reset" => t.chain(&[Tokenizer::scoreboard_token]),
        _ => {
            t.scoreboard_token()?;
            let min = bound_or_wildcard(t)?;
            if !t.line_not_end() {
                return Ok(());
            }
            let mut tok = t.token(TokenKind::Number);
            if tok.current() == '*' {
                tok.expect(|t| t.char('*'))?;
                return Ok(());
            }
            let max = tok.expect(Tokenizer::integer)?;
            tok.set_value(TokenValue::Number(max.into()));
            if min.is_some_and(|min| min > max) {
                tok.reject(SyntaxError::ImpossibleTest);
            }
            Ok(())
        }
    }
}

/// An integer, or `*` for an open bound (`None`).
fn bound_or_wildcard(t: &mut Tokenizer) -> Parse<Option<i32>> {
    let mut tok = t.token(TokenKind::Number);
    if tok.current() == '*' {
        tok.expect(|t| t.char('*'))?;
        return Ok(None);
    }
    let n = tok.expect(Tokenizer::integer)?;
    tok.set_value(TokenValue::Number(n.into()));
    Ok(Some(n))
}

fn scoreboard_operator(t: &mut Tokenizer) -> Parse {
    const OPERATORS: &[&str] = &["+=", "-=", "*=", "/=", "%=", "><", "=", "<", ">"];
    let Some(op) = OPERATORS.iter().find(|op| t.looking_at(op)) else {
        t.error_here(SyntaxError::ExpScbOp);
        return Err(Halt);
    };
    {
        let mut tok = t.token(TokenKind::Option);
        for _ in 0..op.len() {
            tok.advance();
        }
    }
    t.skip_spaces();
    Ok(())
}

fn setblock(t: &mut Tokenizer) -> Parse {
    t.pos3()?;
    id(t)?;
    t.chain(&[Tokenizer::block_suffix, |t| {
        t.options(&["destroy", "keep", "replace"]).map(drop)
    }])
}

fn setmaxplayers(t: &mut Tokenizer) -> Parse {
    t.int_in(1, 30)
}

fn setworldspawn(t: &mut Tokenizer) -> Parse {
    t.chain(&[Tokenizer::pos3])
}

fn spawnpoint(t: &mut Tokenizer) -> Parse {
    t.chain(&[Tokenizer::target, Tokenizer::pos3])
}

fn spreadplayers(t: &mut Tokenizer) -> Parse {
    t.full_pos(2)?;
    let distance = t.checked_num(Some(0.0), None)?;
    {
        let mut tok = t.token(TokenKind::Number);
        let max_range = tok.expect(Tokenizer::number)?;
        tok.set_value(TokenValue::Number(max_range));
        if max_range < 1.0 {
            tok.reject(SyntaxError::below(1));
        } else if max_range <= distance {
            tok.reject(SyntaxError::ImpossibleSpread);
        }
    }
    t.target()
}

fn stopsound(t: &mut Tokenizer) -> Parse {
    t.target()?;
    t.chain(&[string])
}

fn structure(t: &mut Tokenizer) -> Parse {
    let mode = t.options(&["save", "load", "delete"])?;
    string(t)?;
    match mode {
        "save" => {
            t.pos3()?;
            t.pos3()?;
            // [includeEntities] [saveMode] [includeBlocks], or just [saveMode]
            t.chain(&[|t| {
                if t.bool_or_options(&["memory", "disk"])?.is_some() {
                    return Ok(());
                }
                t.chain(&[|t| t.options(&["memory", "disk"]).map(drop), boolean])
            }])
        }
        "load" => {
            t.pos3()?;
            t.chain(&[
                |t| {
                    t.options(&["0_degrees", "90_degrees", "180_degrees", "270_degrees"])
                        .map(drop)
                },
                |t| t.options(&["none", "x", "z", "xz"]).map(drop),
                structure_load_tail,
            ])
        }
        _ => Ok(()),
    }
}

/// `[<animationMode> <animationSeconds>] [includeEntities] ...` after the
/// mirror axis. The first word is either an animation mode or the
/// include-entities flag.
fn structure_load_tail(t: &mut Tokenizer) -> Parse {
    let animated = t
        .bool_or_options(&["block_by_block", "layer_by_layer"])?
        .is_some();
    if animated {
        t.chain(&[|t| t.num_at_least(0.0), boolean, structure_load_flags])
    } else {
        t.chain(&[structure_load_flags])
    }
}

/// `<includeBlocks> [integrity] [seed]`
fn structure_load_flags(t: &mut Tokenizer) -> Parse {
    boolean(t)?;
    t.chain(&[|t| t.num_in(0.0, 1.0), string])
}

fn summon(t: &mut Tokenizer) -> Parse {
    id(t)?;
    t.chain(&[|t| {
        if t.next_is_pos() {
            t.pos3()?;
            t.chain(&[Tokenizer::spawn_event, string])
        } else {
            string(t)?;
            t.chain(&[Tokenizer::pos3])
        }
    }])
}

fn tag(t: &mut Tokenizer) -> Parse {
    t.starrable_target()?;
    match t.options(&["add", "remove", "list"])? {
        "list" => Ok(()),
        _ => t.token(TokenKind::Tag).expect(Tokenizer::string).map(drop),
    }
}

/// `tp [victim] <destination | position [rotation | facing ...]> [checkForBlocks]`
fn teleport(t: &mut Tokenizer) -> Parse {
    if !t.next_is_pos() {
        t.target()?;
        // A lone target is the destination.
        if !t.line_not_end() {
            return Ok(());
        }
    }
    if !t.next_is_pos() {
        t.target()?;
        return t.chain(&[boolean]);
    }
    t.pos3()?;
    if !t.line_not_end() {
        return Ok(());
    }
    if t.next_is_rotation() {
        t.rotation()?;
        // A yaw without a pitch cannot be followed by checkForBlocks.
        if !t.line_not_end() {
            return Ok(());
        }
        t.rotation()?;
    } else if t.bool_or_options(&["facing"])?.is_some() {
        if t.next_is_pos() {
            t.pos3()?;
        } else {
            t.target()?;
        }
    } else {
        return Ok(());
    }
    t.chain(&[boolean])
}

fn tell(t: &mut Tokenizer) -> Parse {
    t.target()?;
    t.message()
}

fn tellraw(t: &mut Tokenizer) -> Parse {
    t.target()?;
    t.json(JsonShape::Object)
}

fn testforblock(t: &mut Tokenizer) -> Parse {
    t.pos3()?;
    id(t)?;
    t.chain(&[Tokenizer::block_suffix])
}

fn testforblocks(t: &mut Tokenizer) -> Parse {
    for _ in 0..3 {
        t.pos3()?;
    }
    t.chain(&[|t| t.options(&["masked", "all"]).map(drop)])
}

fn tickingarea(t: &mut Tokenizer) -> Parse {
    match t.options(&["add", "remove", "remove_all", "preload", "list"])? {
        "add" => {
            if t.next_is_pos() {
                t.pos3()?;
                t.pos3()?;
            } else {
                t.options(&["circle"])?;
                circle(t)?;
            }
            t.chain(&[string, boolean])
        }
        "remove" => pos_or_name(t),
        "preload" => {
            pos_or_name(t)?;
            t.chain(&[boolean])
        }
        "list" => t.chain(&[|t| t.options(ALL_DIMENSIONS).map(drop)]),
        _ => Ok(()),
    }
}

fn time(t: &mut Tokenizer) -> Parse {
    match t.options(&["add", "query", "set"])? {
        "add" => t.int_any(),
        "query" => t.options(&["daytime", "gametime", "day"]).map(drop),
        _ if t.next_is_number() => t.int_any(),
        _ => t
            .options(&["day", "noon", "sunrise", "sunset", "night", "midnight"])
            .map(drop),
    }
}

fn title_with(t: &mut Tokenizer, text: Arg) -> Parse {
    t.target()?;
    match t.options(&["clear", "reset", "title", "subtitle", "actionbar", "times"])? {
        "title" | "subtitle" | "actionbar" => text(t),
        "times" => {
            // fade in, stay, fade out
            for _ in 0..3 {
                t.int_any()?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn title(t: &mut Tokenizer) -> Parse {
    title_with(t, Tokenizer::message)
}

fn titleraw(t: &mut Tokenizer) -> Parse {
    title_with(t, |t| t.json(JsonShape::Object))
}

fn volumearea(t: &mut Tokenizer) -> Parse {
    match t.options(&["add", "list", "remove", "remove_all"])? {
        "add" => {
            string(t)?;
            t.pos3()?;
            t.pos3()?;
            t.chain(&[string])
        }
        "list" => t.chain(&[|t| t.options(ALL_DIMENSIONS).map(drop)]),
        "remove" => pos_or_name(t),
        _ => Ok(()),
    }
}

fn weather(t: &mut Tokenizer) -> Parse {
    match t.options(&["clear", "rain", "thunder", "query"])? {
        "query" => Ok(()),
        _ => t.chain(&[|t| t.int_in(0, 1_000_000)]),
    }
}

fn whitelist(t: &mut Tokenizer) -> Parse {
    match t.options(&["add", "list", "off", "on", "reload", "remove"])? {
        "add" | "remove" => t.target(),
        _ => Ok(()),
    }
}

fn wsserver(t: &mut Tokenizer) -> Parse {
    let mut tok = t.untyped_token();
    let kind = if tok.skip_line() == "out" {
        TokenKind::Option
    } else {
        TokenKind::String
    };
    tok.set_kind(kind);
    Ok(())
}

/// `xp <amount>[L] [player]`
fn xp(t: &mut Tokenizer) -> Parse {
    {
        let mut tok = t.token(TokenKind::Number);
        let amount = tok.expect(Tokenizer::raw_integer)?;
        tok.set_value(TokenValue::Number(amount.into()));
        if matches!(tok.current(), 'L' | 'l') {
            tok.advance();
        }
        tok.expect(Tokenizer::argument_end)?;
    }
    t.chain(&[Tokenizer::target])
}

/// `inputpermission query <player> <permission> [state]` or
/// `inputpermission set <player> <permission> <state>`.
pub(crate) fn inputpermission(t: &mut Tokenizer) -> Parse {
    let mode = t.options(&["query", "set"])?;
    t.target()?;
    t.options(PERMISSIONS)?;
    if mode == "set" {
        t.permission_state()
    } else {
        t.chain(&[Tokenizer::permission_state])
    }
}
