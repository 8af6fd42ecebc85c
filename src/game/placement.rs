//! Army deployment
//!
//! Player one deploys along the north edge facing south, player two along
//! the south edge facing north.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use crate::board::{Orientation, TilePos};
use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::PlayerId;
use crate::squad::UnitClass;

/// Squads a player still has to place, in order
#[derive(Debug, Clone, Default)]
pub struct PlacementQueue {
    pending: VecDeque<UnitClass>,
}

impl PlacementQueue {
    pub fn new(army: &[UnitClass]) -> Self {
        Self {
            pending: army.iter().copied().collect(),
        }
    }

    pub fn next(&self) -> Option<UnitClass> {
        self.pending.front().copied()
    }

    pub fn take(&mut self) -> Option<UnitClass> {
        self.pending.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

pub fn deployment_rows(player: PlayerId, config: &GameConfig) -> RangeInclusive<usize> {
    if player == PlayerId::ONE {
        0..=config.deployment_rows - 1
    } else {
        config.board_height - config.deployment_rows..=config.board_height - 1
    }
}

pub fn in_deployment_zone(player: PlayerId, pos: TilePos, config: &GameConfig) -> bool {
    pos.col < config.board_width && deployment_rows(player, config).contains(&pos.row)
}

/// Every tile of the player's deployment zone
pub fn deployment_tiles(player: PlayerId, config: &GameConfig) -> Vec<TilePos> {
    deployment_rows(player, config)
        .flat_map(|row| (0..config.board_width).map(move |col| TilePos::new(row, col)))
        .collect()
}

/// Facing of freshly placed squads: towards the enemy
pub fn default_facing(player: PlayerId) -> Orientation {
    if player == PlayerId::ONE {
        Orientation::South
    } else {
        Orientation::North
    }
}

/// Columns from the centre outwards
fn centre_out(width: usize) -> impl Iterator<Item = usize> {
    let centre = width / 2;
    (0..width).filter_map(move |i| {
        let offset = (i + 1) / 2;
        if i % 2 == 1 {
            centre.checked_sub(offset)
        } else {
            Some(centre + offset).filter(|col| *col < width)
        }
    })
}

/// Fixed layout for quick start
///
/// The king stands at the centre of the back row. Everyone else fills the
/// front row from the centre outwards, then each row behind it in turn.
pub fn quick_start_layout(
    player: PlayerId,
    config: &GameConfig,
) -> Result<Vec<(UnitClass, TilePos)>> {
    let mut rows: Vec<usize> = deployment_rows(player, config).collect();
    if player == PlayerId::ONE {
        rows.reverse();
    }
    let Some(&back) = rows.last() else {
        return Err(GameError::Config("no deployment rows".into()));
    };
    let width = config.board_width;
    let king_tile = TilePos::new(back, width / 2);

    let mut free = rows
        .iter()
        .flat_map(|&row| centre_out(width).map(move |col| TilePos::new(row, col)))
        .filter(|tile| *tile != king_tile);

    let mut layout = Vec::with_capacity(config.army.len());
    for class in &config.army {
        let tile = if *class == UnitClass::King {
            Some(king_tile)
        } else {
            free.next()
        };
        let tile = tile.ok_or_else(|| {
            GameError::Config(format!(
                "army of {} squads does not fit the quick start layout",
                config.army.len()
            ))
        })?;
        layout.push((*class, tile));
    }
    Ok(layout)
}
