//! Cell value types

use std::fmt;
use thiserror::Error;

/// The externally visible result of a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Numeric value (every formula result is a number)
    Number(f64),

    /// Text value; empty cells read as empty text
    Text(String),

    /// Error value (#REF!, #VALUE!, #ARITHM!)
    Error(FormulaError),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// The value an empty cell reads as
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the error if this is one
    pub fn as_error(&self) -> Option<FormulaError> {
        match self {
            CellValue::Error(e) => Some(*e),
            _ => None,
        }
    }

    /// Check if the value contains an error
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<FormulaError> for CellValue {
    fn from(e: FormulaError) -> Self {
        CellValue::Error(e)
    }
}

/// Formula evaluation errors.
///
/// These are computed values, not failures of the calling operation: a cell
/// whose formula cannot be evaluated simply holds one of these. During
/// evaluation they also travel as the `Err` side of a `Result` so the first
/// failure aborts the rest of the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FormulaError {
    /// #REF! - Reference to a position outside the grid
    #[error("#REF!")]
    Ref,
    /// #VALUE! - Operand cannot be read as a number
    #[error("#VALUE!")]
    Value,
    /// #ARITHM! - Arithmetic produced a non-finite result
    #[error("#ARITHM!")]
    Arithmetic,
}

impl FormulaError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            FormulaError::Ref => "#REF!",
            FormulaError::Value => "#VALUE!",
            FormulaError::Arithmetic => "#ARITHM!",
        }
    }
}
