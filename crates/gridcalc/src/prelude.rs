//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Handles
    CellMut,
    CellView,
    // Values
    CellValue,
    // Error types
    Error,
    FormulaError,
    // Addressing
    Position,
    PrintOptions,
    Result,
    // Main types
    Sheet,
    Size,
};
