//! Movement and attack reach per class
//!
//! Every scan walks tile neighbours; running off the board simply ends the
//! scan in that direction.

use crate::board::{BoardGrid, HighlightKind, Orientation, TilePos};
use crate::core::types::{PlayerId, SquadId};
use crate::squad::entity::SquadEntity;
use crate::squad::unit_class::UnitClass;

/// Tiles a squad may currently move to or attack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTargets {
    pub moves: Vec<TilePos>,
    pub attacks: Vec<TilePos>,
}

impl ActionTargets {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.attacks.is_empty()
    }
}

/// Tiles within attack reach of a squad of `class` at `pos`, occupied or not
pub fn attack_pattern(
    board: &BoardGrid,
    class: UnitClass,
    pos: TilePos,
    facing: Orientation,
) -> Vec<TilePos> {
    match class {
        UnitClass::King
        | UnitClass::Knight
        | UnitClass::Infantry
        | UnitClass::Mercenary
        | UnitClass::Peasant => board.scan_next_tile(pos, facing).into_iter().collect(),

        UnitClass::HeavyInfantry => {
            // Each orthogonal neighbour plus the diagonal one quarter-turn clockwise from it
            let mut tiles = Vec::with_capacity(8);
            for direction in Orientation::all() {
                if let Some(side) = board.scan_next_tile(pos, direction) {
                    tiles.push(side);
                }
                let diagonal = board
                    .scan_next_tile(pos, direction)
                    .and_then(|side| board.scan_next_tile(side, direction.rotate_right()));
                if let Some(corner) = diagonal {
                    tiles.push(corner);
                }
            }
            tiles
        }

        UnitClass::Archer => {
            let mut tiles = Vec::with_capacity(9);
            let mut centre = pos;
            for _ in 0..3 {
                let Some(next) = board.scan_next_tile(centre, facing) else {
                    break;
                };
                centre = next;
                if let Some(left) = board.scan_next_tile(centre, facing.rotate_left()) {
                    tiles.push(left);
                }
                tiles.push(centre);
                if let Some(right) = board.scan_next_tile(centre, facing.rotate_right()) {
                    tiles.push(right);
                }
            }
            tiles
        }
    }
}

/// Empty tiles a squad of `class` at `pos` may move to
pub fn move_pattern(
    board: &BoardGrid,
    class: UnitClass,
    pos: TilePos,
    facing: Orientation,
) -> Vec<TilePos> {
    let mut tiles = Vec::new();
    let mut current = pos;
    while let Some(next) = board.scan_next_tile(current, facing) {
        if board.is_occupied(next) {
            break;
        }
        tiles.push(next);
        if !class.has_long_move() {
            break;
        }
        current = next;
    }
    tiles
}

/// Compute the squad's targets against the current board
///
/// `owner_of` resolves the occupant of a tile to its player.
pub fn action_targets<F>(board: &BoardGrid, squad: &SquadEntity, owner_of: F) -> ActionTargets
where
    F: Fn(SquadId) -> Option<PlayerId>,
{
    let Some(pos) = squad.tile() else {
        return ActionTargets::default();
    };
    let facing = squad.orientation();

    let attacks = attack_pattern(board, squad.class(), pos, facing)
        .into_iter()
        .filter(|tile| {
            board
                .occupant(*tile)
                .and_then(&owner_of)
                .is_some_and(|owner| owner != squad.owner())
        })
        .collect();

    ActionTargets {
        moves: move_pattern(board, squad.class(), pos, facing),
        attacks,
    }
}

/// Mark the squad's tile as selected and its targets on the board
pub fn enable_action_highlights<F>(
    board: &mut BoardGrid,
    squad: &SquadEntity,
    owner_of: F,
) -> ActionTargets
where
    F: Fn(SquadId) -> Option<PlayerId>,
{
    let targets = action_targets(board, squad, owner_of);
    if let Some(pos) = squad.tile() {
        board.mark(pos, HighlightKind::Selected);
    }
    for tile in &targets.moves {
        board.mark(*tile, HighlightKind::Move);
    }
    for tile in &targets.attacks {
        board.mark(*tile, HighlightKind::Attack);
    }
    targets
}
