//! Formula parser
//!
//! A recursive descent parser for arithmetic formulas over cell references.
//! The input is the expression text with the leading `=` already stripped.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{ParseError, ParseResult};
use gridcalc_core::Position;
use std::fmt;

/// Deepest syntax tree the parser builds
pub const MAX_DEPTH: usize = 1024;

/// Most parentheses and unary signs the parser follows inside one another
pub const MAX_NESTING: usize = 256;

/// A parsed subexpression and the depth of its tree
type Parsed = (FormulaExpr, usize);

/// Parse an expression string into an AST
///
/// # Example
/// ```rust
/// use gridcalc_formula::parse_expression;
///
/// let ast = parse_expression("1+2*A1").unwrap();
/// assert_eq!(ast.to_string(), "1+2*A1");
/// assert!(parse_expression("1+").is_err());
/// ```
pub fn parse_expression(input: &str) -> ParseResult<FormulaExpr> {
    let mut parser = FormulaParser::new(input)?;

    if parser.current_token == Token::Eof {
        return Err(ParseError::Empty);
    }

    let (expr, _) = parser.parse_additive()?;

    // Make sure we consumed all input
    if parser.current_token != Token::Eof {
        return Err(ParseError::TrailingInput(
            parser.input[parser.token_start..].to_string(),
        ));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    CellRef(Position),

    Plus,
    Minus,
    Star,
    Slash,

    LeftParen,
    RightParen,

    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::CellRef(pos) => write!(f, "cell reference {}", pos),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::Slash => f.write_str("'/'"),
            Token::LeftParen => f.write_str("'('"),
            Token::RightParen => f.write_str("')'"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

/// Formula parser
struct FormulaParser<'a> {
    input: &'a str,
    pos: usize,
    /// Byte offset where `current_token` starts
    token_start: usize,
    current_token: Token,
    /// Open parentheses and unary signs around the current token
    nesting: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> ParseResult<Self> {
        let mut parser = Self {
            input,
            pos: 0,
            token_start: 0,
            current_token: Token::Eof,
            nesting: 0,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> ParseResult<()> {
        self.skip_whitespace();
        self.token_start = self.pos;
        self.current_token = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> ParseResult<Token> {
        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        if c.is_ascii_alphabetic() {
            return self.scan_reference();
        }

        Err(ParseError::UnexpectedCharacter {
            ch: c,
            offset: self.pos,
        })
    }

    fn scan_number(&mut self) -> ParseResult<Token> {
        let start = self.pos;

        self.skip_digits();

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        // Exponent part
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek_char().map_or(false, |c| c == '+' || c == '-') {
                self.advance();
            }
            self.skip_digits();
        }

        let num_str = &self.input[start..self.pos];
        num_str
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Token::Number)
            .ok_or_else(|| ParseError::InvalidNumber(num_str.to_string()))
    }

    fn scan_reference(&mut self) -> ParseResult<Token> {
        let start = self.pos;
        while self.peek_char().map_or(false, |c| c.is_ascii_alphanumeric()) {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        let letters = text.bytes().take_while(|b| b.is_ascii_alphabetic()).count();
        let digits = &text[letters..];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::UnknownIdentifier(text.to_string()));
        }

        // Well-formed but off the grid: kept as a reference that evaluates to #REF!
        Ok(Token::CellRef(
            Position::parse(text).unwrap_or(Position::NONE),
        ))
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn consume(&mut self) -> ParseResult<Token> {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token()?;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> ParseResult<()> {
        if &self.current_token == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken(format!(
                "{}, expected {}",
                self.current_token, expected
            )))
        }
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return Err(ParseError::TooDeep);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Unary: +, -
    // 4. Primary: numbers, references, parentheses

    fn parse_additive(&mut self) -> ParseResult<Parsed> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right)?;
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Parsed> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_unary()?;
            left = binary(op, left, right)?;
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Parsed> {
        let op = match self.current_token {
            Token::Minus => UnaryOperator::Negate,
            Token::Plus => UnaryOperator::Plus,
            _ => return self.parse_primary(),
        };

        self.consume()?;
        self.enter()?;
        let (operand, depth) = self.parse_unary()?;
        self.leave();

        let expr = FormulaExpr::UnaryOp {
            op,
            operand: Box::new(operand),
        };
        Ok((expr, check_depth(depth + 1)?))
    }

    fn parse_primary(&mut self) -> ParseResult<Parsed> {
        match self.current_token {
            Token::Number(n) => {
                self.consume()?;
                Ok((FormulaExpr::Number(n), 1))
            }

            Token::CellRef(pos) => {
                self.consume()?;
                Ok((FormulaExpr::CellRef(pos), 1))
            }

            Token::LeftParen => {
                self.consume()?;
                self.enter()?;
                let parsed = self.parse_additive()?;
                self.expect(&Token::RightParen)?;
                self.leave();
                Ok(parsed)
            }

            _ => Err(ParseError::UnexpectedToken(self.current_token.to_string())),
        }
    }
}

fn binary(op: BinaryOperator, (left, l): Parsed, (right, r): Parsed) -> ParseResult<Parsed> {
    let depth = check_depth(l.max(r) + 1)?;
    let expr = FormulaExpr::BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    };
    Ok((expr, depth))
}

fn check_depth(depth: usize) -> ParseResult<usize> {
    if depth > MAX_DEPTH {
        Err(ParseError::TooDeep)
    } else {
        Ok(depth)
    }
}
