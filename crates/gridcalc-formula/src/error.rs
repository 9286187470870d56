//! Formula error types

use thiserror::Error;

/// Result type for formula parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Reasons the parser rejects formula text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing to parse
    #[error("empty expression")]
    Empty,

    /// Character that starts no token
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    /// Malformed numeric literal
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// Letters that do not form a cell reference
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    /// Token in a position the grammar does not allow
    #[error("unexpected {0}")]
    UnexpectedToken(String),

    /// Parentheses, unary signs or operator chains nested past the parser's limits
    #[error("expression is nested too deeply")]
    TooDeep,

    /// Input left over after a complete expression
    #[error("unexpected characters after expression: '{0}'")]
    TrailingInput(String),
}

impl From<ParseError> for gridcalc_core::Error {
    fn from(e: ParseError) -> Self {
        gridcalc_core::Error::FormulaParse(e.to_string())
    }
}
