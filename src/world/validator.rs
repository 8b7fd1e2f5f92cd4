use std::collections::HashMap;

use super::grid::GridPos;
use super::model::World;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

/// Non-fatal diagnostics for a loaded world. Door placement is never
/// enforced while building, so oddities are only reported here.
pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    // Rooms must not be empty
    if world.rooms.is_empty() {
        errors.push(ValidationError::new("world has no rooms"));
    }

    // start_room must exist
    if !world.rooms.contains_key(&world.start_room) {
        errors.push(ValidationError::new(format!(
            "start_room '{}' not found among rooms",
            world.start_room
        )));
    }

    let mut room_ids: Vec<&String> = world.rooms.keys().collect();
    room_ids.sort();

    for room_id in room_ids {
        let room = &world.rooms[room_id];

        // Validate exits
        for exit in &room.exits {
            if !world.rooms.contains_key(&exit.target) {
                errors.push(ValidationError::new(format!(
                    "room '{}' exit '{}' targets missing room '{}'",
                    room_id, exit.direction, exit.target
                )));
            }
        }

        let Some(grid) = room.grid() else {
            continue;
        };

        // Validate doors
        let mut seen: HashMap<GridPos, &str> = HashMap::new();
        for door in grid.doors() {
            if !grid.contains(door.position) {
                errors.push(ValidationError::new(format!(
                    "room '{}' door '{}' at {} lies outside the grid",
                    room_id, door.direction, door.position
                )));
            }
            match room
                .exits
                .iter()
                .find(|e| e.direction.eq_ignore_ascii_case(door.direction.name()))
            {
                Some(exit) if exit.target != door.destination => {
                    errors.push(ValidationError::new(format!(
                        "room '{}' door '{}' leads to '{}' but its exit leads to '{}'",
                        room_id, door.direction, door.destination, exit.target
                    )));
                }
                Some(_) => {}
                None => {
                    errors.push(ValidationError::new(format!(
                        "room '{}' door '{}' has no exit",
                        room_id, door.direction
                    )));
                }
            }
            if let Some(other) = seen.insert(door.position, door.direction.name()) {
                errors.push(ValidationError::new(format!(
                    "room '{}' doors '{}' and '{}' share cell {}",
                    room_id, other, door.direction, door.position
                )));
            }
        }
    }

    errors
}
