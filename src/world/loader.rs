use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use super::errors::LoadError;
use super::grid::{Direction, GridPos};
use super::model::{Room, World};

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks
}

#[derive(Deserialize)]
struct WorldHeader {
    id: String,
    name: String,
    start_room: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    player_position: Option<(i32, i32)>,
}

#[derive(Deserialize)]
struct RoomConfig {
    id: String,
    name: String,
    #[serde(default)]
    desc: String,

    #[serde(default)]
    layout: Option<LayoutConfig>,
    #[serde(default)]
    floorplan: Option<Vec<String>>,

    #[serde(default)]
    cell: Vec<CellConfig>, // [[room.cell]]
    #[serde(default)]
    door: Vec<DoorConfig>, // [[room.door]]
    #[serde(default)]
    exit: Vec<ExitConfig>, // [[room.exit]]
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum LayoutConfig {
    Rect {
        width: i32,
        height: i32,
    },
    Circle {
        radius: i32,
    },
    LShape {
        width: i32,
        height: i32,
        leg_length: i32,
    },
}

#[derive(Deserialize)]
struct CellConfig {
    x: i32,
    y: i32,
    symbol: String,
}

#[derive(Deserialize)]
struct DoorConfig {
    direction: String,
    x: i32,
    y: i32,
    target: String,
}

#[derive(Deserialize)]
struct ExitConfig {
    direction: String,
    target: String,
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Public API: load a world from a .toml file on disk.
pub fn load_world_from_file(path: &Path) -> Result<World, LoadError> {
    let contents = fs::read_to_string(path)?;
    info!("loading world from {}", path.display());
    load_world_from_str(&contents)
}

/// Public API: load a world from a TOML string.
pub fn load_world_from_str(contents: &str) -> Result<World, LoadError> {
    let world_file: WorldFile = toml::from_str(contents)?;

    // Basic validation
    if world_file.world.id.trim().is_empty() {
        return Err(LoadError::invalid("world.id may not be empty"));
    }
    if world_file.world.start_room.trim().is_empty() {
        return Err(LoadError::invalid("world.start_room may not be empty"));
    }

    let mut world = World::new(
        world_file.world.id,
        world_file.world.name,
        world_file.world.start_room,
    );
    world.desc = normalize_multiline_desc(&world_file.world.desc);
    world.start_position = world_file.world.player_position.map(GridPos::from);

    // Doors and exits need every room in place first.
    let mut links: Vec<(String, Vec<DoorConfig>, Vec<ExitConfig>)> = Vec::new();
    let mut rooms_map: HashMap<String, Room> = HashMap::new();

    for room_cfg in world_file.room {
        if room_cfg.id.trim().is_empty() {
            return Err(LoadError::invalid("room id may not be empty"));
        }
        if rooms_map.contains_key(&room_cfg.id) {
            return Err(LoadError::invalid(format!(
                "Duplicate room id: {}",
                room_cfg.id
            )));
        }

        let room = build_room(&room_cfg)?;
        if !room_cfg.door.is_empty() && !room.is_grid_room() {
            return Err(LoadError::invalid(format!(
                "room '{}' has doors but no layout, floorplan or cells",
                room_cfg.id
            )));
        }

        debug!(
            "room '{}' loaded ({} grid cells)",
            room.id,
            room.grid().map(|g| g.cell_count()).unwrap_or(0)
        );
        links.push((room_cfg.id.clone(), room_cfg.door, room_cfg.exit));
        rooms_map.insert(room_cfg.id, room);
    }

    // Ensure start_room exists
    if !rooms_map.contains_key(&world.start_room) {
        return Err(LoadError::invalid(format!(
            "start_room '{}' not found among rooms",
            world.start_room
        )));
    }
    world.rooms = rooms_map;

    for (room_id, doors, exits) in links {
        for door in doors {
            world.add_door(
                &room_id,
                &door.direction,
                GridPos::new(door.x, door.y),
                &door.target,
            )?;
        }
        if let Some(room) = world.rooms.get_mut(&room_id) {
            for exit in exits {
                let door = exit
                    .direction
                    .parse::<Direction>()
                    .ok()
                    .and_then(|d| room.grid().and_then(|g| g.door(d)));
                if let Some(door) = door {
                    warn!(
                        "room '{}': exit '{}' replaces the exit of door {} at {}",
                        room_id, exit.direction, door.direction, door.position
                    );
                }
                room.add_exit(exit.direction, exit.target);
            }
        }
    }

    info!("world '{}' ready with {} rooms", world.id, world.rooms.len());
    Ok(world)
}

fn build_room(cfg: &RoomConfig) -> Result<Room, LoadError> {
    let mut room = Room::new(
        cfg.id.clone(),
        cfg.name.clone(),
        normalize_multiline_desc(&cfg.desc),
    );

    match (&cfg.layout, &cfg.floorplan) {
        (Some(_), Some(_)) => {
            return Err(LoadError::invalid(format!(
                "room '{}' may have a layout or a floorplan, not both",
                cfg.id
            )));
        }
        (Some(LayoutConfig::Rect { width, height }), None) => {
            room.ensure_grid().auto_build_grid(*width, *height)?;
        }
        (Some(LayoutConfig::Circle { radius }), None) => {
            room.ensure_grid().build_circle(*radius)?;
        }
        (
            Some(LayoutConfig::LShape {
                width,
                height,
                leg_length,
            }),
            None,
        ) => {
            room.ensure_grid().build_l_shape(*width, *height, *leg_length)?;
        }
        (None, Some(rows)) => {
            room.ensure_grid().build_custom_floorplan(rows)?;
        }
        (None, None) => {}
    }

    for cell in &cfg.cell {
        let symbol = parse_symbol(&cell.symbol).ok_or_else(|| {
            LoadError::invalid(format!(
                "room '{}' cell ({}, {}) symbol must be exactly one character, got '{}'",
                cfg.id, cell.x, cell.y, cell.symbol
            ))
        })?;
        room.ensure_grid().set_grid_cell(cell.x, cell.y, symbol);
    }

    Ok(room)
}

fn parse_symbol(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() { None } else { Some(c) }
}

/// Collapse TOML multi-line strings into single spaced paragraphs,
/// keeping blank lines as paragraph breaks.
fn normalize_multiline_desc(raw: &str) -> String {
    raw.split("\n\n")
        .map(|para| para.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|para| !para.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{BuildError, Direction};

    const KEEP: &str = r####"
[world]
id = "keep"
name = "The Keep"
start_room = "hall"
player_position = [1, 1]

[[room]]
id = "hall"
name = "Great Hall"
desc = """
Banners hang
from the rafters.
"""
layout = { kind = "rect", width = 5, height = 5 }

  [[room.cell]]
  x = 2
  y = 2
  symbol = "W"

  [[room.door]]
  direction = "north"
  x = 2
  y = 4
  target = "yard"

[[room]]
id = "yard"
name = "Courtyard"
floorplan = ["###", "#.#", "###"]

  [[room.exit]]
  direction = "south"
  target = "hall"

[[room]]
id = "tower"
name = "Tower"
layout = { kind = "lshape", width = 4, height = 2, leg_length = 3 }
"####;

    #[test]
    fn loads_layouts_cells_and_doors() {
        let world = load_world_from_str(KEEP).unwrap();
        assert_eq!(world.start_position, Some(GridPos::new(1, 1)));

        let hall = &world.rooms["hall"];
        assert_eq!(hall.desc, "Banners hang from the rafters.");
        let grid = hall.grid().unwrap();
        assert_eq!(grid.get_grid_cell(2, 2), Some('W'));
        assert_eq!(grid.get_grid_cell(0, 0), Some('#'));
        assert_eq!(grid.door(Direction::North).map(|d| d.position), Some(GridPos::new(2, 4)));
        assert_eq!(hall.exits[0].target, "yard");

        let yard = &world.rooms["yard"];
        assert_eq!(yard.grid().and_then(|g| g.get_grid_cell(1, 1)), Some('.'));
        assert_eq!(yard.exits[0].direction, "south");

        let tower = &world.rooms["tower"];
        assert_eq!(tower.grid().map(|g| g.cell_count()), Some(12));
    }

    #[test]
    fn missing_start_room_is_invalid() {
        let toml = r####"
[world]
id = "w"
name = "W"
start_room = "nowhere"

[[room]]
id = "hall"
name = "Hall"
"####;
        assert!(matches!(load_world_from_str(toml), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn layout_and_floorplan_are_exclusive() {
        let toml = r####"
[world]
id = "w"
name = "W"
start_room = "hall"

[[room]]
id = "hall"
name = "Hall"
layout = { kind = "circle", radius = 2 }
floorplan = ["..."]
"####;
        assert!(matches!(load_world_from_str(toml), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn door_errors_surface_as_build_errors() {
        let toml = r####"
[world]
id = "w"
name = "W"
start_room = "hall"

[[room]]
id = "hall"
name = "Hall"
layout = { kind = "rect", width = 3, height = 3 }

  [[room.door]]
  direction = "sideways"
  x = 1
  y = 2
  target = "hall"
"####;
        match load_world_from_str(toml) {
            Err(LoadError::Build(BuildError::InvalidDirection(d))) => assert_eq!(d, "sideways"),
            other => panic!("unexpected result: {:?}", other.map(|w| w.id)),
        }
    }

    #[test]
    fn multi_character_symbol_is_invalid() {
        let toml = r####"
[world]
id = "w"
name = "W"
start_room = "hall"

[[room]]
id = "hall"
name = "Hall"

  [[room.cell]]
  x = 0
  y = 0
  symbol = "##"
"####;
        assert!(matches!(load_world_from_str(toml), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn oversized_layout_is_a_build_error() {
        let toml = r####"
[world]
id = "w"
name = "W"
start_room = "hall"

[[room]]
id = "hall"
name = "Hall"
layout = { kind = "rect", width = 100000, height = 100000 }
"####;
        assert!(matches!(
            load_world_from_str(toml),
            Err(LoadError::Build(BuildError::GridTooLarge(100000)))
        ));

        let toml = toml.replace(
            "{ kind = \"rect\", width = 100000, height = 100000 }",
            "{ kind = \"circle\", radius = 1100000000 }",
        );
        assert!(matches!(
            load_world_from_str(&toml),
            Err(LoadError::Build(BuildError::GridTooLarge(_)))
        ));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(matches!(
            load_world_from_str("[world"),
            Err(LoadError::Parse(_))
        ));
    }
}
