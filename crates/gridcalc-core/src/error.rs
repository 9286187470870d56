//! Error types for gridcalc-core

use crate::cell::Position;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors that reject an operation outright.
///
/// Formula evaluation problems are not represented here; they are values
/// (see [`crate::FormulaError`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Position outside the grid
    #[error("Invalid position: ({}, {})", .0.row, .0.col)]
    InvalidPosition(Position),

    /// Invalid A1 address text
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Formula text rejected by the parser
    #[error("Formula parse error: {0}")]
    FormulaParse(String),

    /// Committing the formula would close a reference cycle
    #[error("Circular dependency detected involving cell {0}")]
    CircularDependency(Position),
}
