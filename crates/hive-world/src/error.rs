//! Error types for the `hive-world` crate.
//!
//! All fallible grid operations return [`WorldError`].

use hive_types::HexCoord;

/// Errors that can occur during grid operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No cell exists at the coordinate.
    #[error("no cell at {0}")]
    CellNotFound(HexCoord),

    /// Two cells were supplied for the same coordinate.
    #[error("duplicate cell at {0}")]
    DuplicateCell(HexCoord),

    /// A cell amount outside `0..=10` was supplied.
    #[error("cell amount {amount} at {coord} exceeds the maximum of {max}")]
    AmountOutOfRange {
        /// The offending cell.
        coord: HexCoord,
        /// The rejected amount.
        amount: u32,
        /// The allowed maximum.
        max: u32,
    },

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in grid calculation")]
    ArithmeticOverflow,
}
