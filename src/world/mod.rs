mod errors;
mod grid;
mod loader;
mod model;
mod validator;

pub use errors::{BuildError, LoadError};
pub use loader::{load_world_from_file, load_world_from_str};

// Minimal, intentional surface area: re-export only what the game/engine uses.
pub use grid::{Direction, Door, FLOOR, GridPos, GridRoom, MAX_DOORS, MAX_GRID_SPAN, WALL, WALL_MARKER, is_wall};
pub use model::{Exit, Player, Room, World};
pub use validator::{ValidationError, validate_world};
