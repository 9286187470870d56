//! # gridcalc-core
//!
//! Core value types for the gridcalc spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`Position`] and [`Size`] - Cell addressing and region dimensions
//! - [`CellValue`] - Computed cell values (numbers, text, errors)
//! - [`FormulaError`] - Errors a formula can evaluate to
//! - [`Error`] - Structural errors (invalid position, parse failure, cycles)
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellValue, FormulaError, Position};
//!
//! let pos: Position = "C3".parse().unwrap();
//! assert_eq!((pos.row, pos.col), (2, 2));
//! assert_eq!(pos.to_string(), "C3");
//!
//! let value = CellValue::Error(FormulaError::Arithmetic);
//! assert_eq!(value.to_string(), "#ARITHM!");
//! ```

pub mod cell;
pub mod error;

// Re-exports for convenience
pub use cell::{CellValue, FormulaError, Position, Size};
pub use error::{Error, Result};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: i32 = 16_384;

/// Maximum number of columns in a sheet
pub const MAX_COLS: i32 = 16_384;

/// Leading character that marks cell text as a formula
pub const FORMULA_SIGN: char = '=';

/// Leading character that keeps cell text from being read as a formula;
/// it is dropped from the value but kept in the text
pub const ESCAPE_SIGN: char = '\'';
