//! Cell-related value types
//!
//! This module contains:
//! - [`Position`] - A cell's location on the grid (e.g., "A1")
//! - [`Size`] - Dimensions of a region in rows and columns
//! - [`CellValue`] - The computed value of a cell
//! - [`FormulaError`] - Errors a formula can evaluate to

mod address;
mod value;

pub use address::{Position, Size};
pub use value::{CellValue, FormulaError};
