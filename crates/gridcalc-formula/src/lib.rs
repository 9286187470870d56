//! # gridcalc-formula
//!
//! Formula parser and evaluator for gridcalc.
//!
//! This crate provides:
//! - Formula parsing (text → AST)
//! - Canonical printing of a parsed expression
//! - Numeric evaluation against a sheet through [`CellLookup`]
//! - The list of cells a formula references
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellValue, Position};
//! use gridcalc_formula::{parse_formula, CellLookup};
//!
//! struct Answer;
//!
//! impl CellLookup for Answer {
//!     fn value_at(&self, _pos: Position) -> Option<CellValue> {
//!         Some(CellValue::Number(21.0))
//!     }
//! }
//!
//! let formula = parse_formula("A1 * 2").unwrap();
//! assert_eq!(formula.expression(), "A1*2");
//! assert_eq!(formula.evaluate(&Answer), CellValue::Number(42.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use error::{ParseError, ParseResult};
pub use evaluator::{evaluate, EvalResult};
pub use formula::{parse_formula, CellLookup, Formula};
pub use parser::{parse_expression, MAX_DEPTH, MAX_NESTING};
