use std::collections::HashMap;

use log::info;

use super::errors::BuildError;
use super::grid::{GridPos, GridRoom};

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Runtime world type used by the game loop.
pub struct World {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub start_room: String,
    pub start_position: Option<GridPos>,
    pub rooms: HashMap<String, Room>,
}

pub struct Room {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub exits: Vec<Exit>,
    grid: Option<GridRoom>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    pub direction: String,
    pub target: String,
}

/// The avatar issuing commands.
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub location: String,
    pub position: Option<GridPos>,
}

impl Player {
    pub fn new(location: impl Into<String>) -> Self {
        Player {
            location: location.into(),
            position: None,
        }
    }

    /// Current grid position; an avatar that never stepped stands at the origin.
    pub fn grid_position(&self) -> GridPos {
        self.position.unwrap_or_default()
    }
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Room {
            id: id.into(),
            name: name.into(),
            desc: desc.into(),
            exits: Vec::new(),
            grid: None,
        }
    }

    /// Same as `new`, but the room starts with an empty grid.
    pub fn new_grid(
        id: impl Into<String>,
        name: impl Into<String>,
        desc: impl Into<String>,
    ) -> Self {
        let mut room = Room::new(id, name, desc);
        room.grid = Some(GridRoom::new());
        room
    }

    pub fn is_grid_room(&self) -> bool {
        self.grid.is_some()
    }

    pub fn grid(&self) -> Option<&GridRoom> {
        self.grid.as_ref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut GridRoom> {
        self.grid.as_mut()
    }

    /// Grid of this room, creating an empty one for a plain room.
    pub fn ensure_grid(&mut self) -> &mut GridRoom {
        self.grid.get_or_insert_with(GridRoom::new)
    }

    pub fn add_exit(&mut self, direction: impl Into<String>, target: impl Into<String>) {
        let direction = direction.into();
        self.exits.retain(|e| !e.direction.eq_ignore_ascii_case(&direction));
        self.exits.push(Exit {
            direction,
            target: target.into(),
        });
    }

    /// Register a door on the grid and open the matching exit.
    pub fn add_door(
        &mut self,
        direction: &str,
        position: GridPos,
        destination: &str,
    ) -> Result<(), BuildError> {
        let Some(grid) = self.grid.as_mut() else {
            return Err(BuildError::NotAGridRoom(self.id.clone()));
        };
        let direction = grid.add_door(direction, position, destination)?;
        self.add_exit(direction.name(), destination);
        info!(
            "room '{}': door {} at {} -> '{}'",
            self.id, direction, position, destination
        );
        Ok(())
    }
}

impl World {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_room: impl Into<String>,
    ) -> Self {
        World {
            id: id.into(),
            name: name.into(),
            desc: String::new(),
            start_room: start_room.into(),
            start_position: None,
            rooms: HashMap::new(),
        }
    }

    pub fn insert_room(&mut self, room: Room) {
        self.rooms.insert(room.id.clone(), room);
    }

    /// Add a door from `room_id` to an existing `destination` room.
    pub fn add_door(
        &mut self,
        room_id: &str,
        direction: &str,
        position: GridPos,
        destination: &str,
    ) -> Result<(), BuildError> {
        if !self.rooms.contains_key(destination) {
            return Err(BuildError::UnknownRoom(destination.to_string()));
        }
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| BuildError::UnknownRoom(room_id.to_string()))?;
        room.add_door(direction, position, destination)
    }
}
