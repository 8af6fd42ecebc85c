//! Tile coordinates and the four cardinal facings
//!
//! Row 0 is the north edge of the board; rows grow southwards and columns
//! grow eastwards. World space maps columns to +x and rows to +z.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Row/column coordinate of a board tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct TilePos {
    pub row: usize,
    pub col: usize,
}

impl TilePos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbouring coordinate, or `None` when it would leave a `width` x `height` board
    pub fn step(&self, orientation: Orientation, width: usize, height: usize) -> Option<TilePos> {
        let (dr, dc) = orientation.offset();
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if row < 0 || col < 0 || row >= height as isize || col >= width as isize {
            return None;
        }
        Some(TilePos::new(row as usize, col as usize))
    }

    /// Centre of the tile in world space
    pub fn world_center(&self, tile_size: f32) -> Vec3 {
        Vec3::new(
            (self.col as f32 + 0.5) * tile_size,
            0.0,
            (self.row as f32 + 0.5) * tile_size,
        )
    }

    /// Signed (rows, cols) from `self` to `other`
    pub fn delta_to(&self, other: TilePos) -> (isize, isize) {
        (
            other.row as isize - self.row as isize,
            other.col as isize - self.col as isize,
        )
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal facing of a squad, indexed 0..4 clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Orientation {
    pub fn index(&self) -> usize {
        match self {
            Orientation::North => 0,
            Orientation::East => 1,
            Orientation::South => 2,
            Orientation::West => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Orientation::North,
            1 => Orientation::East,
            2 => Orientation::South,
            _ => Orientation::West,
        }
    }

    /// (row, col) offset of the neighbour in this direction
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Orientation::North => (-1, 0),
            Orientation::East => (0, 1),
            Orientation::South => (1, 0),
            Orientation::West => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Quarter turn counter-clockwise (the squad's left)
    pub fn rotate_left(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Quarter turn clockwise (the squad's right)
    pub fn rotate_right(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn all() -> [Orientation; 4] {
        [
            Orientation::North,
            Orientation::East,
            Orientation::South,
            Orientation::West,
        ]
    }

    /// Unit facing vector in world space
    pub fn world_vector(&self) -> Vec3 {
        let (dr, dc) = self.offset();
        Vec3::new(dc as f32, 0.0, dr as f32)
    }

    /// Dominant cardinal direction from `from` to `to`
    ///
    /// `None` when the tiles coincide or sit on an exact diagonal.
    pub fn toward(from: TilePos, to: TilePos) -> Option<Self> {
        let (dr, dc) = from.delta_to(to);
        if dr.abs() == dc.abs() {
            return None;
        }
        Some(if dr.abs() > dc.abs() {
            if dr > 0 {
                Orientation::South
            } else {
                Orientation::North
            }
        } else if dc > 0 {
            Orientation::East
        } else {
            Orientation::West
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_inside_board() {
        let pos = TilePos::new(4, 4);
        assert_eq!(pos.step(Orientation::North, 9, 9), Some(TilePos::new(3, 4)));
        assert_eq!(pos.step(Orientation::East, 9, 9), Some(TilePos::new(4, 5)));
        assert_eq!(pos.step(Orientation::South, 9, 9), Some(TilePos::new(5, 4)));
        assert_eq!(pos.step(Orientation::West, 9, 9), Some(TilePos::new(4, 3)));
    }

    #[test]
    fn test_step_off_edge_is_none() {
        assert_eq!(TilePos::new(0, 3).step(Orientation::North, 9, 9), None);
        assert_eq!(TilePos::new(8, 3).step(Orientation::South, 9, 9), None);
        assert_eq!(TilePos::new(3, 0).step(Orientation::West, 9, 9), None);
        assert_eq!(TilePos::new(3, 8).step(Orientation::East, 9, 9), None);
    }

    #[test]
    fn test_rotation_cycle() {
        let o = Orientation::North;
        assert_eq!(o.rotate_right(), Orientation::East);
        assert_eq!(o.rotate_left(), Orientation::West);
        assert_eq!(o.opposite(), Orientation::South);
        assert_eq!(o.rotate_right().rotate_right().rotate_right().rotate_right(), o);
    }

    #[test]
    fn test_index_round_trip() {
        for o in Orientation::all() {
            assert_eq!(Orientation::from_index(o.index()), o);
        }
    }

    #[test]
    fn test_toward_uses_dominant_axis() {
        let from = TilePos::new(4, 4);
        assert_eq!(Orientation::toward(from, TilePos::new(1, 5)), Some(Orientation::North));
        assert_eq!(Orientation::toward(from, TilePos::new(5, 7)), Some(Orientation::East));
        assert_eq!(Orientation::toward(from, TilePos::new(5, 5)), None);
        assert_eq!(Orientation::toward(from, from), None);
    }

    #[test]
    fn test_world_vector_matches_offset() {
        assert_eq!(Orientation::South.world_vector(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(Orientation::West.world_vector(), Vec3::new(-1.0, 0.0, 0.0));
    }
}
