//! Hex grid geometry and cell resources for the Hive simulation.
//!
//! The world is a bounded hexagon of axial cells, each holding a single
//! resource type and a small, regenerating amount of it.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid operations.
//! - [`hex`] -- Axial directions, offsets and hex distance.
//! - [`grid`] -- [`HexGrid`]: generation, lookup, neighbours, regeneration
//!   and harvesting.

pub mod error;
pub mod grid;
pub mod hex;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use grid::{
    HexGrid, INITIAL_AMOUNT_MAX, INITIAL_AMOUNT_MIN, MAP_RADIUS, MAX_CELL_AMOUNT, generate_grid,
};
pub use hex::{DIRECTIONS, direction_from_target, hex_distance, neighbor_coords, offset};
