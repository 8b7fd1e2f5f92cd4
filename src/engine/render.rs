use crate::engine::output::Output;
use crate::world;

/// Full room appearance: the usual description with the grid map beneath it.
pub fn render_room(out: &mut Output, room: &world::Room, player: &world::Player) {
    out.title(room.name.clone());
    out.say(room.desc.trim());

    if let Some(grid) = room.grid() {
        out.map(grid.render_grid());
        out.say(format!("You are at {}.", player.grid_position()));
    }

    if room.exits.is_empty() {
        out.set_exits("Exits: (none)");
    } else {
        let mut dirs: Vec<&String> = room.exits.iter().map(|e| &e.direction).collect();
        dirs.sort();
        dirs.dedup();
        let list = dirs
            .into_iter()
            .map(|d| d.as_str())
            .collect::<Vec<&str>>()
            .join(", ");
        out.set_exits(format!("Exits: {}", list));
    }
}

/// Just the map, for the `map` verb.
pub fn render_map(out: &mut Output, room: &world::Room) {
    match room.grid() {
        Some(grid) => out.map(grid.render_grid()),
        None => out.say("There is no map of this place."),
    }
}
