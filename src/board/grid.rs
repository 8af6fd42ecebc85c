//! Board grid: tiles, adjacency, occupancy and highlight state
//!
//! Adjacency is wired once at construction. A missing neighbour is the edge
//! of the board and every scan treats it as a normal stopping point.

use serde::{Deserialize, Serialize};

use crate::board::orientation::{Orientation, TilePos};
use crate::core::error::{GameError, IllegalAction, Result};
use crate::core::types::SquadId;

/// Highlight categories shown on tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightKind {
    Move,
    Attack,
    Selected,
    Cleared,
}

/// A single tile on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardTile {
    pub pos: TilePos,
    occupant: Option<SquadId>,
    neighbors: [Option<TilePos>; 4],

    // Transient, reset every action
    pub valid_move_target: bool,
    pub valid_attack_target: bool,
    pub selected: bool,
}

impl BoardTile {
    fn new(pos: TilePos) -> Self {
        Self {
            pos,
            occupant: None,
            neighbors: [None; 4],
            valid_move_target: false,
            valid_attack_target: false,
            selected: false,
        }
    }

    pub fn occupant(&self) -> Option<SquadId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn neighbor(&self, orientation: Orientation) -> Option<TilePos> {
        self.neighbors[orientation.index()]
    }

    pub fn is_highlighted(&self) -> bool {
        self.valid_move_target || self.valid_attack_target || self.selected
    }

    fn clear_highlights(&mut self) {
        self.valid_move_target = false;
        self.valid_attack_target = false;
        self.selected = false;
    }
}

/// The full board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardGrid {
    tiles: Vec<BoardTile>,
    width: usize,
    height: usize,
}

impl BoardGrid {
    /// Allocate a `width` x `height` board and wire four-neighbour adjacency
    pub fn build(width: usize, height: usize) -> Self {
        let mut tiles = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let pos = TilePos::new(row, col);
                let mut tile = BoardTile::new(pos);
                for orientation in Orientation::all() {
                    tile.neighbors[orientation.index()] = pos.step(orientation, width, height);
                }
                tiles.push(tile);
            }
        }

        Self {
            tiles,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row * self.width + pos.col)
        } else {
            None
        }
    }

    pub fn tile(&self, pos: TilePos) -> Option<&BoardTile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    fn tile_mut(&mut self, pos: TilePos) -> Option<&mut BoardTile> {
        self.index(pos).map(move |i| &mut self.tiles[i])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &BoardTile> {
        self.tiles.iter()
    }

    /// Neighbour of `pos` in `orientation`; `None` at the edge (or for an off-board `pos`)
    pub fn scan_next_tile(&self, pos: TilePos, orientation: Orientation) -> Option<TilePos> {
        self.tile(pos).and_then(|tile| tile.neighbor(orientation))
    }

    pub fn occupant(&self, pos: TilePos) -> Option<SquadId> {
        self.tile(pos).and_then(|tile| tile.occupant)
    }

    pub fn is_occupied(&self, pos: TilePos) -> bool {
        self.occupant(pos).is_some()
    }

    /// Where `squad` currently stands, if anywhere
    pub fn position_of(&self, squad: SquadId) -> Option<TilePos> {
        self.tiles
            .iter()
            .find(|tile| tile.occupant == Some(squad))
            .map(|tile| tile.pos)
    }

    /// Put `squad` on an empty tile
    pub fn place_squad(&mut self, pos: TilePos, squad: SquadId) -> Result<()> {
        let tile = self
            .tile_mut(pos)
            .ok_or(IllegalAction::OffBoard(pos))?;
        if tile.occupant.is_some() {
            return Err(IllegalAction::TileOccupied(pos).into());
        }
        tile.occupant = Some(squad);
        Ok(())
    }

    /// Vacate a tile, returning whoever stood there
    pub fn clear_tile(&mut self, pos: TilePos) -> Option<SquadId> {
        self.tile_mut(pos).and_then(|tile| tile.occupant.take())
    }

    /// Move the occupant of `from` to the empty tile `to` as one operation
    pub fn move_squad(&mut self, from: TilePos, to: TilePos) -> Result<SquadId> {
        let squad = self
            .occupant(from)
            .ok_or_else(|| GameError::Invariant(format!("no squad at {} to move", from)))?;
        if !self.contains(to) {
            return Err(IllegalAction::OffBoard(to).into());
        }
        if self.is_occupied(to) {
            return Err(IllegalAction::TileOccupied(to).into());
        }
        self.clear_tile(from);
        self.place_squad(to, squad)?;
        Ok(squad)
    }

    /// Reset every tile's transient flags, returning the tiles that were lit
    pub fn clear_all_highlights(&mut self) -> Vec<TilePos> {
        let mut cleared = Vec::new();
        for tile in &mut self.tiles {
            if tile.is_highlighted() {
                cleared.push(tile.pos);
                tile.clear_highlights();
            }
        }
        cleared
    }

    /// Raise one highlight flag on a tile
    pub fn mark(&mut self, pos: TilePos, kind: HighlightKind) {
        if let Some(tile) = self.tile_mut(pos) {
            match kind {
                HighlightKind::Move => tile.valid_move_target = true,
                HighlightKind::Attack => tile.valid_attack_target = true,
                HighlightKind::Selected => tile.selected = true,
                HighlightKind::Cleared => tile.clear_highlights(),
            }
        }
    }

    pub fn is_valid_move_target(&self, pos: TilePos) -> bool {
        self.tile(pos).is_some_and(|tile| tile.valid_move_target)
    }

    pub fn is_valid_attack_target(&self, pos: TilePos) -> bool {
        self.tile(pos).is_some_and(|tile| tile.valid_attack_target)
    }

    /// Check that the squads' own idea of where they stand matches the board
    pub fn verify_occupancy<I>(&self, placements: I) -> Result<()>
    where
        I: IntoIterator<Item = (SquadId, Option<TilePos>)>,
    {
        let mut claimed = 0;
        for (squad, pos) in placements {
            let Some(pos) = pos else { continue };
            claimed += 1;
            match self.occupant(pos) {
                Some(occupant) if occupant == squad => {}
                other => {
                    return Err(GameError::Invariant(format!(
                        "squad {:?} claims {} but the board holds {:?}",
                        squad, pos, other
                    )))
                }
            }
        }

        let occupied = self.tiles.iter().filter(|t| t.is_occupied()).count();
        if occupied != claimed {
            return Err(GameError::Invariant(format!(
                "{} tiles occupied but {} squads on the board",
                occupied, claimed
            )));
        }
        Ok(())
    }
}
