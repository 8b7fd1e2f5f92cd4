use log::{debug, warn};

use crate::engine::output::Output;
use crate::world;

/// Walk through an exit named anywhere in `cmd` (`north`, `go north`, `n`).
/// Returns false when nothing in the command names an exit.
pub fn try_handle_movement(
    out: &mut Output,
    player: &mut world::Player,
    world: &world::World,
    room: &world::Room,
    cmd: &str,
) -> bool {
    let tokens: Vec<String> = cmd.split_whitespace().map(|t| t.to_lowercase()).collect();

    if tokens.is_empty() {
        return false;
    }

    // 1) Exact whole-token matches anywhere in the command
    let matches: Vec<&world::Exit> = room
        .exits
        .iter()
        .filter(|exit| {
            tokens
                .iter()
                .any(|tok| exit.direction.eq_ignore_ascii_case(tok))
        })
        .collect();

    if matches.len() == 1 {
        return do_move(out, player, world, matches[0]);
    } else if matches.len() > 1 {
        out.say(format!(
            "That movement is ambiguous here. Did you mean: {}?",
            list_directions(&matches)
        ));
        return true;
    }

    // 2) Abbreviations: only if a token is EXACTLY one character (e.g. "s")
    let abbrev_chars: Vec<char> = tokens
        .iter()
        .filter_map(|t| {
            let mut it = t.chars();
            let c = it.next()?;
            if it.next().is_some() { None } else { Some(c) }
        })
        .collect();

    if abbrev_chars.is_empty() {
        return false;
    }

    let abbrev_matches: Vec<&world::Exit> = room
        .exits
        .iter()
        .filter(|exit| {
            exit.direction
                .chars()
                .next()
                .map(|c| abbrev_chars.iter().any(|ac| ac.eq_ignore_ascii_case(&c)))
                .unwrap_or(false)
        })
        .collect();

    match abbrev_matches.len() {
        0 => false,
        1 => do_move(out, player, world, abbrev_matches[0]),
        _ => {
            out.say(format!(
                "That direction is ambiguous here. Did you mean: {}?",
                list_directions(&abbrev_matches)
            ));
            true
        }
    }
}

fn list_directions(exits: &[&world::Exit]) -> String {
    exits
        .iter()
        .map(|e| e.direction.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn do_move(
    out: &mut Output,
    player: &mut world::Player,
    world: &world::World,
    exit: &world::Exit,
) -> bool {
    if !world.rooms.contains_key(&exit.target) {
        warn!(
            "exit '{}' from '{}' targets missing room '{}'",
            exit.direction, player.location, exit.target
        );
        out.say(format!(
            "You try to go {}, but something feels wrong (room not found).",
            exit.direction
        ));
        return true;
    }
    debug!("player moves {} from '{}' to '{}'", exit.direction, player.location, exit.target);
    out.say(format!("You go {}.", exit.direction));
    player.location = exit.target.clone();
    true
}
