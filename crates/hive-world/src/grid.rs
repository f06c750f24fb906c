//! The hex grid: a fixed set of resource cells.
//!
//! A [`HexGrid`] holds exactly one [`HexCell`] per axial coordinate inside a
//! hexagon of radius [`MAP_RADIUS`]. Cells are never created or destroyed
//! after generation; only their `amount` changes, downwards through
//! [`HexGrid::harvest`] and upwards through [`HexGrid::regenerate_all`].
//!
//! Internally cells live in a `BTreeMap<HexCoord, HexCell>`, so iteration
//! order is `q` then `r`, the same order generation visits them in.

use std::collections::BTreeMap;

use hive_types::{HexCell, HexCoord, ResourceType};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::WorldError;
use crate::hex;

/// Radius of the hexagonal map. Radius 3 yields 37 cells.
pub const MAP_RADIUS: i32 = 3;

/// Ceiling on any cell's amount.
pub const MAX_CELL_AMOUNT: u32 = 10;

/// Smallest amount a freshly generated cell can hold.
pub const INITIAL_AMOUNT_MIN: u32 = 2;

/// Largest amount a freshly generated cell can hold.
pub const INITIAL_AMOUNT_MAX: u32 = 9;

/// Generate the cells of a radius-[`MAP_RADIUS`] hexagon.
///
/// Every `(q, r)` with `q, r` in `[-3, 3]` and `|q + r| <= 3` gets one cell
/// with a uniformly random resource and an amount uniform in `[2, 9]`.
/// The output is ordered by `q` then `r`. A seeded `rng` makes the result
/// reproducible.
pub fn generate_grid<R: Rng + ?Sized>(rng: &mut R) -> Vec<HexCell> {
    let mut cells = Vec::new();
    for q in -MAP_RADIUS..=MAP_RADIUS {
        for r in -MAP_RADIUS..=MAP_RADIUS {
            if q.saturating_add(r).abs() > MAP_RADIUS {
                continue;
            }
            let resource = ResourceType::ALL
                .choose(rng)
                .copied()
                .unwrap_or(ResourceType::Food);
            let amount = rng.random_range(INITIAL_AMOUNT_MIN..=INITIAL_AMOUNT_MAX);
            cells.push(HexCell {
                q,
                r,
                resource,
                amount,
            });
        }
    }
    cells
}

/// The world's hex grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexGrid {
    cells: BTreeMap<HexCoord, HexCell>,
}

impl HexGrid {
    /// Generate a fresh grid from `rng`. See [`generate_grid`].
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let cells = generate_grid(rng)
            .into_iter()
            .map(|cell| (cell.coord(), cell))
            .collect();
        Self { cells }
    }

    /// Build a grid from explicit cells.
    ///
    /// Used for deterministic setups where the layout must be known.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateCell`] if two cells share a coordinate,
    /// or [`WorldError::AmountOutOfRange`] if an amount exceeds
    /// [`MAX_CELL_AMOUNT`].
    pub fn from_cells(cells: impl IntoIterator<Item = HexCell>) -> Result<Self, WorldError> {
        let mut map = BTreeMap::new();
        for cell in cells {
            let coord = cell.coord();
            if cell.amount > MAX_CELL_AMOUNT {
                return Err(WorldError::AmountOutOfRange {
                    coord,
                    amount: cell.amount,
                    max: MAX_CELL_AMOUNT,
                });
            }
            if map.insert(coord, cell).is_some() {
                return Err(WorldError::DuplicateCell(coord));
            }
        }
        Ok(Self { cells: map })
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether a cell exists at `coord`.
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// The cell at `coord`, if any.
    pub fn cell(&self, coord: HexCoord) -> Option<&HexCell> {
        self.cells.get(&coord)
    }

    /// The cell at `coord`, mutably.
    pub fn cell_mut(&mut self, coord: HexCoord) -> Option<&mut HexCell> {
        self.cells.get_mut(&coord)
    }

    /// Iterate over all cells in `q`, `r` order.
    pub fn cells(&self) -> impl Iterator<Item = &HexCell> {
        self.cells.values()
    }

    /// All coordinates in `q`, `r` order.
    pub fn coords(&self) -> Vec<HexCoord> {
        self.cells.keys().copied().collect()
    }

    /// Clone every cell into a vector, in `q`, `r` order.
    pub fn to_vec(&self) -> Vec<HexCell> {
        self.cells.values().cloned().collect()
    }

    /// Existing cells adjacent to `coord`, with their direction index.
    ///
    /// Off-grid directions are omitted, so border cells have fewer than six
    /// neighbours.
    pub fn neighbors(&self, coord: HexCoord) -> Vec<(usize, &HexCell)> {
        hex::neighbor_coords(coord)
            .into_iter()
            .filter_map(|(dir, c)| self.cells.get(&c).map(|cell| (dir, cell)))
            .collect()
    }

    /// Add `per_tick` units to every cell, capped at [`MAX_CELL_AMOUNT`].
    ///
    /// Returns the total number of units added across the grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ArithmeticOverflow`] if checked arithmetic fails.
    pub fn regenerate_all(&mut self, per_tick: u32) -> Result<u32, WorldError> {
        let mut total: u32 = 0;
        for cell in self.cells.values_mut() {
            let headroom = MAX_CELL_AMOUNT.saturating_sub(cell.amount);
            let added = per_tick.min(headroom);
            cell.amount = cell
                .amount
                .checked_add(added)
                .ok_or(WorldError::ArithmeticOverflow)?;
            total = total
                .checked_add(added)
                .ok_or(WorldError::ArithmeticOverflow)?;
        }
        Ok(total)
    }

    /// Take up to `cap` units from the cell at `coord`.
    ///
    /// Returns the cell's resource and the number of units actually taken,
    /// which is zero for an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellNotFound`] if no cell exists at `coord`.
    pub fn harvest(&mut self, coord: HexCoord, cap: u32) -> Result<(ResourceType, u32), WorldError> {
        let cell = self
            .cells
            .get_mut(&coord)
            .ok_or(WorldError::CellNotFound(coord))?;
        let taken = cap.min(cell.amount);
        cell.amount = cell
            .amount
            .checked_sub(taken)
            .ok_or(WorldError::ArithmeticOverflow)?;
        Ok((cell.resource, taken))
    }

    /// Overwrite the amount held by the cell at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellNotFound`] if no cell exists at `coord`, or
    /// [`WorldError::AmountOutOfRange`] if `amount` exceeds
    /// [`MAX_CELL_AMOUNT`].
    pub fn set_amount(&mut self, coord: HexCoord, amount: u32) -> Result<(), WorldError> {
        if amount > MAX_CELL_AMOUNT {
            return Err(WorldError::AmountOutOfRange {
                coord,
                amount,
                max: MAX_CELL_AMOUNT,
            });
        }
        let cell = self
            .cells
            .get_mut(&coord)
            .ok_or(WorldError::CellNotFound(coord))?;
        cell.amount = amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn seeded_grid(seed: u64) -> HexGrid {
        let mut rng = SmallRng::seed_from_u64(seed);
        HexGrid::generate(&mut rng)
    }

    #[test]
    fn grid_has_thirty_seven_unique_cells() {
        let grid = seeded_grid(7);
        assert_eq!(grid.len(), 37);
        let coords: BTreeSet<HexCoord> = grid.cells().map(HexCell::coord).collect();
        assert_eq!(coords.len(), 37);
        for coord in coords {
            assert!(coord.q.abs() <= MAP_RADIUS);
            assert!(coord.r.abs() <= MAP_RADIUS);
            assert!(coord.q.saturating_add(coord.r).abs() <= MAP_RADIUS);
        }
    }

    #[test]
    fn generated_amounts_within_initial_range() {
        let grid = seeded_grid(11);
        for cell in grid.cells() {
            assert!((INITIAL_AMOUNT_MIN..=INITIAL_AMOUNT_MAX).contains(&cell.amount));
        }
    }

    #[test]
    fn generation_is_reproducible_for_a_seed() {
        assert_eq!(seeded_grid(42), seeded_grid(42));
    }

    #[test]
    fn center_has_six_neighbors_corner_has_three() {
        let grid = seeded_grid(1);
        assert_eq!(grid.neighbors(HexCoord::new(0, 0)).len(), 6);
        assert_eq!(grid.neighbors(HexCoord::new(3, 0)).len(), 3);
        assert_eq!(grid.neighbors(HexCoord::new(3, -3)).len(), 3);
    }

    #[test]
    fn regeneration_caps_at_ten() {
        let mut grid = HexGrid::from_cells([
            HexCell {
                q: 0,
                r: 0,
                resource: ResourceType::Food,
                amount: 10,
            },
            HexCell {
                q: 1,
                r: 0,
                resource: ResourceType::Energy,
                amount: 4,
            },
        ])
        .unwrap_or_else(|_| seeded_grid(0));
        let added = grid.regenerate_all(1);
        assert_eq!(added.ok(), Some(1));
        assert_eq!(grid.cell(HexCoord::new(0, 0)).map(|c| c.amount), Some(10));
        assert_eq!(grid.cell(HexCoord::new(1, 0)).map(|c| c.amount), Some(5));
    }

    #[test]
    fn harvest_takes_at_most_cap() {
        let mut grid = seeded_grid(3);
        let origin = HexCoord::new(0, 0);
        assert!(grid.set_amount(origin, 7).is_ok());
        let first = grid.harvest(origin, 3);
        assert_eq!(first.ok().map(|(_, n)| n), Some(3));
        assert!(grid.set_amount(origin, 2).is_ok());
        let second = grid.harvest(origin, 3);
        assert_eq!(second.ok().map(|(_, n)| n), Some(2));
        let empty = grid.harvest(origin, 3);
        assert_eq!(empty.ok().map(|(_, n)| n), Some(0));
        assert_eq!(grid.cell(origin).map(|c| c.amount), Some(0));
    }

    #[test]
    fn harvest_off_grid_is_an_error() {
        let mut grid = seeded_grid(3);
        let result = grid.harvest(HexCoord::new(9, 9), 3);
        assert!(matches!(result, Err(WorldError::CellNotFound(_))));
    }

    #[test]
    fn from_cells_rejects_duplicates_and_overfull() {
        let cell = HexCell {
            q: 0,
            r: 0,
            resource: ResourceType::Food,
            amount: 5,
        };
        let dup = HexGrid::from_cells([cell.clone(), cell.clone()]);
        assert!(matches!(dup, Err(WorldError::DuplicateCell(_))));

        let overfull = HexGrid::from_cells([HexCell { amount: 11, ..cell }]);
        assert!(matches!(overfull, Err(WorldError::AmountOutOfRange { .. })));
    }

    #[test]
    fn snapshot_cells_round_trip_through_json() {
        let grid = seeded_grid(5);
        let json = serde_json::to_string(&grid.to_vec()).unwrap_or_default();
        let back: Vec<HexCell> = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back.len(), 37);
    }
}
