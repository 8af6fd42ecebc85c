//! Board system - the 9x9 tile graph squads stand on
//!
//! Pure data plus traversal queries. Tiles know their four neighbours,
//! their occupant and the transient highlight flags that gate player
//! actions.

pub mod grid;
pub mod orientation;

pub use grid::{BoardGrid, BoardTile, HighlightKind};
pub use orientation::{Orientation, TilePos};
