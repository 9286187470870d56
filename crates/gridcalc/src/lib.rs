//! # gridcalc
//!
//! An in-memory spreadsheet engine: a sparse grid of cells holding text or
//! arithmetic formulas, with dependency tracking between formula cells.
//!
//! ## Features
//!
//! - Formulas over `+ - * /`, unary signs, parentheses and A1 references
//! - Bidirectional dependency edges, rebuilt on every assignment
//! - Assignments that would close a reference cycle are rejected whole
//! - Formula results are memoized and invalidated transitively on change
//! - Tabular dumps of values or raw texts over the printable area
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! let a1: Position = "A1".parse().unwrap();
//! let b1: Position = "B1".parse().unwrap();
//!
//! sheet.set_cell(a1, "=5+2").unwrap();
//! sheet.set_cell(b1, "=A1*10").unwrap();
//! assert_eq!(sheet.value(b1).unwrap(), CellValue::Number(70.0));
//!
//! // B1 already reads A1
//! assert_eq!(sheet.set_cell(a1, "=B1"), Err(Error::CircularDependency(a1)));
//!
//! sheet.set_cell(a1, "=1").unwrap();
//! assert_eq!(sheet.value(b1).unwrap(), CellValue::Number(10.0));
//!
//! let mut out = Vec::new();
//! sheet.print_values(&mut out).unwrap();
//! assert_eq!(out, b"1\t10\n");
//! ```

mod cell;
mod dependency;
pub mod prelude;
mod print;
mod sheet;

pub use print::PrintOptions;
pub use sheet::{CellMut, CellView, Sheet};

// Re-export core types
pub use gridcalc_core::{
    CellValue, Error, FormulaError, Position, Result, Size, ESCAPE_SIGN, FORMULA_SIGN, MAX_COLS,
    MAX_ROWS,
};

// Re-export formula types
pub use gridcalc_formula::{CellLookup, Formula, FormulaExpr, ParseError};
