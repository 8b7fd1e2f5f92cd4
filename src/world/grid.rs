use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::debug;

use super::errors::BuildError;

pub const MAX_DOORS: usize = 10;

/// Widest or tallest grid a layout generator will produce.
pub const MAX_GRID_SPAN: i32 = 256;

/// Symbol the layout generators write for unwalkable cells.
pub const WALL: char = '#';
/// Symbol the layout generators write for walkable cells.
pub const FLOOR: char = '.';
/// Hand-placed wall marker. Blocks movement just like `WALL`.
pub const WALL_MARKER: char = 'W';

const EMPTY_GRID_TEXT: &str = "The grid is empty.";
const UNSET_CELL: char = ' ';

pub fn is_wall(symbol: char) -> bool {
    symbol == WALL || symbol == WALL_MARKER
}

/////////////////
/// POSITIONS ///
/////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        GridPos { x, y }
    }

    /// `None` when the move would leave the `i32` plane.
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(GridPos::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

//////////////////
/// DIRECTIONS ///
//////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 10] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Northeast,
        Direction::Northwest,
        Direction::Southeast,
        Direction::Southwest,
        Direction::Up,
        Direction::Down,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Northeast => "northeast",
            Direction::Northwest => "northwest",
            Direction::Southeast => "southeast",
            Direction::Southwest => "southwest",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Letter drawn over a door's cell on the map.
    pub fn marker(self) -> char {
        self.name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    /// Unit offset for single-cell steps. Only the four cardinal directions
    /// move within a grid.
    pub fn step_offset(self) -> Option<(i32, i32)> {
        match self {
            Direction::North => Some((0, 1)),
            Direction::South => Some((0, -1)),
            Direction::East => Some((1, 0)),
            Direction::West => Some((-1, 0)),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Direction::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| BuildError::InvalidDirection(s.trim().to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/////////////
/// DOORS ///
/////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door {
    pub direction: Direction,
    pub position: GridPos,
    pub destination: String,
}

////////////////
/// GRIDROOM ///
////////////////

/// Sparse symbol map of a room plus the doors drawn on it.
#[derive(Debug, Clone, Default)]
pub struct GridRoom {
    cells: HashMap<GridPos, char>,
    doors: Vec<Door>, // registration order; later entries win on shared cells
}

impl GridRoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_grid_cell(&mut self, x: i32, y: i32, content: char) {
        self.cells.insert(GridPos::new(x, y), content);
    }

    /// `None` for any coordinate that was never set.
    pub fn get_grid_cell(&self, x: i32, y: i32) -> Option<char> {
        self.cells.get(&GridPos::new(x, y)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door(&self, direction: Direction) -> Option<&Door> {
        self.doors.iter().find(|d| d.direction == direction)
    }

    /// Register a door. Re-registering a direction replaces the earlier door
    /// and makes it the most recent one. Neither grid bounds nor shared
    /// positions are checked.
    pub fn add_door(
        &mut self,
        direction: &str,
        position: GridPos,
        destination: &str,
    ) -> Result<Direction, BuildError> {
        if self.doors.len() >= MAX_DOORS {
            return Err(BuildError::DoorLimit);
        }
        let direction: Direction = direction.parse()?;

        self.doors.retain(|d| d.direction != direction);
        self.doors.push(Door {
            direction,
            position,
            destination: destination.to_string(),
        });
        Ok(direction)
    }

    /// Inclusive bounding box of the set cells. The origin is always part of
    /// the box; negative coordinates extend it.
    pub fn bounds(&self) -> Option<(GridPos, GridPos)> {
        if self.cells.is_empty() {
            return None;
        }
        let mut min = GridPos::new(0, 0);
        let mut max = GridPos::new(0, 0);
        for pos in self.cells.keys() {
            min.x = min.x.min(pos.x);
            min.y = min.y.min(pos.y);
            max.x = max.x.max(pos.x);
            max.y = max.y.max(pos.y);
        }
        Some((min, max))
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        match self.bounds() {
            Some((min, max)) => {
                pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y
            }
            None => false,
        }
    }

    /// Map with door letters drawn over their cells.
    pub fn render_grid(&self) -> String {
        let mut overlay: HashMap<GridPos, char> = HashMap::new();
        for door in &self.doors {
            overlay.insert(door.position, door.direction.marker());
        }
        self.render_with(&overlay)
    }

    /// Map of the stored symbols only.
    pub fn render_cells(&self) -> String {
        self.render_with(&HashMap::new())
    }

    fn render_with(&self, overlay: &HashMap<GridPos, char>) -> String {
        let Some((min, max)) = self.bounds() else {
            return EMPTY_GRID_TEXT.to_string();
        };

        let mut output = String::new();
        for y in (min.y..=max.y).rev() {
            for x in min.x..=max.x {
                let pos = GridPos::new(x, y);
                let cell = overlay
                    .get(&pos)
                    .or_else(|| self.cells.get(&pos))
                    .copied()
                    .unwrap_or(UNSET_CELL);
                output.push('[');
                output.push(cell);
                output.push(']');
            }
            output.push('\n');
        }
        output
    }

    /////////////////////////
    /// LAYOUT GENERATORS ///
    /////////////////////////

    /// Walled rectangle: border cells are walls, the interior is floor.
    pub fn auto_build_grid(&mut self, width: i32, height: i32) -> Result<(), BuildError> {
        check_span(width as i64)?;
        check_span(height as i64)?;
        self.cells.clear();
        for x in 0..width {
            for y in 0..height {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                self.set_grid_cell(x, y, if border { WALL } else { FLOOR });
            }
        }
        debug!("built {}x{} rectangle ({} cells)", width, height, self.cells.len());
        Ok(())
    }

    /// Closed disk of `radius` centred on (radius, radius) inside its
    /// bounding square.
    pub fn build_circle(&mut self, radius: i32) -> Result<(), BuildError> {
        check_span(radius as i64 * 2 + 1)?;
        let diameter = radius.saturating_mul(2);
        self.cells.clear();
        let r = radius as f64;
        for x in 0..=diameter {
            for y in 0..=diameter {
                let dx = (x - radius) as f64;
                let dy = (y - radius) as f64;
                let inside = (dx * dx + dy * dy).sqrt() <= r;
                self.set_grid_cell(x, y, if inside { FLOOR } else { WALL });
            }
        }
        debug!("built circle r={} ({} cells)", radius, self.cells.len());
        Ok(())
    }

    /// A horizontal bar (`width` wide, `height` tall) joined at the origin
    /// with a vertical leg that is `height` wide and `leg_length` tall, so
    /// both strips share the same thickness. Everything else in the
    /// bounding box is wall.
    pub fn build_l_shape(
        &mut self,
        width: i32,
        height: i32,
        leg_length: i32,
    ) -> Result<(), BuildError> {
        let box_w = width.max(height);
        let box_h = height.max(leg_length);
        check_span(box_w as i64)?;
        check_span(box_h as i64)?;
        self.cells.clear();
        for x in 0..box_w {
            for y in 0..box_h {
                let in_bar = x < width && y < height;
                let in_leg = x < height && y < leg_length;
                self.set_grid_cell(x, y, if in_bar || in_leg { FLOOR } else { WALL });
            }
        }
        debug!(
            "built L-shape {}x{} leg {} ({} cells)",
            width,
            height,
            leg_length,
            self.cells.len()
        );
        Ok(())
    }

    /// Import a drawn floorplan. The first row is the top of the map.
    pub fn build_custom_floorplan<S: AsRef<str>>(&mut self, rows: &[S]) -> Result<(), BuildError> {
        check_span(rows.len() as i64)?;
        for row in rows {
            check_span(row.as_ref().chars().count() as i64)?;
        }
        self.cells.clear();
        let top = rows.len() as i32 - 1;
        for (i, row) in rows.iter().enumerate() {
            let y = top - i as i32;
            for (x, ch) in row.as_ref().chars().enumerate() {
                self.set_grid_cell(x as i32, y, ch);
            }
        }
        debug!("imported floorplan of {} rows", rows.len());
        Ok(())
    }

    pub fn reset_grid(&mut self, width: i32, height: i32) -> Result<String, BuildError> {
        self.auto_build_grid(width, height)?;
        Ok(format!("Grid reset to {}x{}.", width, height))
    }
}

fn check_span(span: i64) -> Result<(), BuildError> {
    if span > MAX_GRID_SPAN as i64 {
        return Err(BuildError::GridTooLarge(span));
    }
    Ok(())
}
