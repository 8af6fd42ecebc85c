//! Where each member stands inside its tile
//!
//! The captain takes the front slot; the rest fill a rank behind it. Slots
//! are relative to the squad's facing, so a turn rearranges the squad.

use glam::Vec3;

use crate::board::{Orientation, TilePos};

/// Fraction of a tile between the centre and the front slot
const FRONT_DEPTH: f32 = 0.25;
/// Fraction of a tile between the centre and the rear rank
const REAR_DEPTH: f32 = 0.2;
/// Fraction of a tile the rear rank spreads across
const REAR_SPREAD: f32 = 0.6;

/// World-space offset of member `index` from the tile centre
pub fn slot_offset(index: usize, size: usize, orientation: Orientation, tile_size: f32) -> Vec3 {
    let forward = orientation.world_vector();
    let right = orientation.rotate_right().world_vector();

    if size <= 1 {
        return Vec3::ZERO;
    }
    if index == 0 {
        return forward * FRONT_DEPTH * tile_size;
    }

    let rear_count = size - 1;
    let lateral = if rear_count == 1 {
        0.0
    } else {
        let step = REAR_SPREAD / (rear_count - 1) as f32;
        -REAR_SPREAD / 2.0 + step * (index - 1) as f32
    };

    (right * lateral - forward * REAR_DEPTH) * tile_size
}

/// World-space position of member `index` on `tile`
pub fn slot_position(
    tile: TilePos,
    index: usize,
    size: usize,
    orientation: Orientation,
    tile_size: f32,
) -> Vec3 {
    tile.world_center(tile_size) + slot_offset(index, size, orientation, tile_size)
}
