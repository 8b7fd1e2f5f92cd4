use log::info;

use crate::engine::output::Output;
use crate::world::{self, BuildError, GridPos};

/// Room-building verbs (`@rect`, `@door`, ...) applied to the player's
/// current room. Returns false when `verb` is not a builder verb.
pub fn try_handle_build(
    out: &mut Output,
    world: &mut world::World,
    player: &world::Player,
    verb: &str,
    args: &[&str],
) -> bool {
    let verb = verb.to_ascii_lowercase();
    let result = match verb.as_str() {
        "@cell" => build_cell(out, world, player, args),
        "@rect" => build_layout(out, world, player, args, 2, |grid, n| {
            grid.auto_build_grid(n[0], n[1])?;
            Ok(format!("Built a {}x{} room.", n[0], n[1]))
        }),
        "@circle" => build_layout(out, world, player, args, 1, |grid, n| {
            grid.build_circle(n[0])?;
            Ok(format!("Built a round room of radius {}.", n[0]))
        }),
        "@lshape" => build_layout(out, world, player, args, 3, |grid, n| {
            grid.build_l_shape(n[0], n[1], n[2])?;
            Ok(format!("Built an L-shaped room ({}x{}, leg {}).", n[0], n[1], n[2]))
        }),
        "@reset" => build_layout(out, world, player, args, 2, |grid, n| {
            grid.reset_grid(n[0], n[1])
        }),
        "@door" => build_door(out, world, player, args),
        _ => return false,
    };

    if let Err(e) = result {
        out.say(format!("Build failed: {}", e));
    }
    true
}

fn current_room<'w>(
    world: &'w mut world::World,
    player: &world::Player,
) -> Result<&'w mut world::Room, BuildError> {
    world
        .rooms
        .get_mut(&player.location)
        .ok_or_else(|| BuildError::UnknownRoom(player.location.clone()))
}

fn parse_numbers(args: &[&str], count: usize) -> Option<Vec<i32>> {
    if args.len() != count {
        return None;
    }
    args.iter().map(|a| a.parse::<i32>().ok()).collect()
}

fn build_cell(
    out: &mut Output,
    world: &mut world::World,
    player: &world::Player,
    args: &[&str],
) -> Result<(), BuildError> {
    let parsed = match args {
        [x, y, symbol] => match (x.parse::<i32>(), y.parse::<i32>(), single_char(symbol)) {
            (Ok(x), Ok(y), Some(c)) => Some((x, y, c)),
            _ => None,
        },
        _ => None,
    };
    let Some((x, y, symbol)) = parsed else {
        out.say("Usage: @cell <x> <y> <symbol>");
        return Ok(());
    };

    let room = current_room(world, player)?;
    room.ensure_grid().set_grid_cell(x, y, symbol);
    info!("room '{}': cell ({}, {}) set to '{}'", room.id, x, y, symbol);
    out.event(format!("Cell ({}, {}) is now '{}'.", x, y, symbol));
    Ok(())
}

fn build_layout<F>(
    out: &mut Output,
    world: &mut world::World,
    player: &world::Player,
    args: &[&str],
    arity: usize,
    apply: F,
) -> Result<(), BuildError>
where
    F: FnOnce(&mut world::GridRoom, &[i32]) -> Result<String, BuildError>,
{
    let Some(numbers) = parse_numbers(args, arity).filter(|n| n.iter().all(|v| *v >= 0)) else {
        out.say(format!(
            "Usage: expected {} non-negative whole number(s).",
            arity
        ));
        return Ok(());
    };

    // build on a copy so a refused layout leaves the room untouched
    let room = current_room(world, player)?;
    let mut grid = room.grid().cloned().unwrap_or_default();
    let message = apply(&mut grid, &numbers)?;
    *room.ensure_grid() = grid;
    info!("room '{}': {}", room.id, message);
    out.event(message);
    Ok(())
}

fn build_door(
    out: &mut Output,
    world: &mut world::World,
    player: &world::Player,
    args: &[&str],
) -> Result<(), BuildError> {
    let parsed = match args {
        [direction, x, y, target] => match (x.parse::<i32>(), y.parse::<i32>()) {
            (Ok(x), Ok(y)) => Some((*direction, GridPos::new(x, y), *target)),
            _ => None,
        },
        _ => None,
    };
    let Some((direction, position, target)) = parsed else {
        out.say("Usage: @door <direction> <x> <y> <room id>");
        return Ok(());
    };

    world.add_door(&player.location, direction, position, target)?;
    out.event(format!(
        "A door {} at {} now leads to '{}'.",
        direction.trim().to_ascii_lowercase(),
        position,
        target
    ));
    Ok(())
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() { None } else { Some(c) }
}
