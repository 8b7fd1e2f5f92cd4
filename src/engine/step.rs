use log::debug;

use crate::engine::output::Output;
use crate::world::{self, Direction};

/// `step <direction>`: move one cell inside the current grid room.
///
/// Rejections leave the player's position untouched.
pub fn handle_step(out: &mut Output, world: &world::World, player: &mut world::Player, arg: &str) {
    let Some((direction, (dx, dy))) = parse_step_direction(arg) else {
        out.say("Invalid direction! Use north, south, east, or west.");
        return;
    };

    let Some(grid) = world
        .rooms
        .get(&player.location)
        .and_then(|room| room.grid())
    else {
        out.say("You cannot use 'step' here.");
        return;
    };

    let Some(new_pos) = player.grid_position().checked_offset(dx, dy) else {
        out.say("You cannot go that way.");
        return;
    };

    match grid.get_grid_cell(new_pos.x, new_pos.y) {
        Some(symbol) if world::is_wall(symbol) => {
            out.say("You bump into a wall.");
        }
        None => {
            out.say("You cannot go that way.");
        }
        Some(symbol) => {
            player.position = Some(new_pos);
            debug!("player stepped {} to {} in '{}'", direction, new_pos, player.location);
            out.say(format!("You step {} to position {}.", direction, new_pos));
            if !symbol.is_whitespace() {
                out.say(format!("You see: {}.", symbol));
            }
        }
    }
}

fn parse_step_direction(arg: &str) -> Option<(Direction, (i32, i32))> {
    let direction: Direction = arg.parse().ok()?;
    direction.step_offset().map(|offset| (direction, offset))
}
