//! Formula Abstract Syntax Tree types

use gridcalc_core::Position;
use std::fmt;

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Numeric literal
    Number(f64),
    /// Single cell reference; [`Position::NONE`] when the text named a cell
    /// outside the grid
    CellRef(Position),
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

impl BinaryOperator {
    pub fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
        }
    }

    /// `a - (b - c)` and `a / (b * c)` need their parentheses
    fn is_right_sensitive(self) -> bool {
        matches!(self, BinaryOperator::Subtract | BinaryOperator::Divide)
    }
}

impl UnaryOperator {
    pub fn symbol(self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Negate => '-',
        }
    }
}

const UNARY_PRECEDENCE: u8 = 3;
const ATOM_PRECEDENCE: u8 = 4;

impl FormulaExpr {
    fn precedence(&self) -> u8 {
        match self {
            FormulaExpr::Number(_) | FormulaExpr::CellRef(_) => ATOM_PRECEDENCE,
            FormulaExpr::UnaryOp { .. } => UNARY_PRECEDENCE,
            FormulaExpr::BinaryOp { op, .. } => op.precedence(),
        }
    }

    /// Visit every cell reference in the tree, left to right
    pub fn for_each_cell<F: FnMut(Position)>(&self, f: &mut F) {
        match self {
            FormulaExpr::Number(_) => {}
            FormulaExpr::CellRef(pos) => f(*pos),
            FormulaExpr::BinaryOp { left, right, .. } => {
                left.for_each_cell(f);
                right.for_each_cell(f);
            }
            FormulaExpr::UnaryOp { operand, .. } => operand.for_each_cell(f),
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &FormulaExpr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Canonical form: no whitespace and only the parentheses the tree needs.
impl fmt::Display for FormulaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaExpr::Number(n) => write!(f, "{}", n),
            FormulaExpr::CellRef(pos) => write!(f, "{}", pos),
            FormulaExpr::BinaryOp { op, left, right } => {
                let prec = op.precedence();
                write_operand(f, left, left.precedence() < prec)?;
                write!(f, "{}", op.symbol())?;
                let right_prec = right.precedence();
                let parens =
                    right_prec < prec || (right_prec == prec && op.is_right_sensitive());
                write_operand(f, right, parens)
            }
            FormulaExpr::UnaryOp { op, operand } => {
                write!(f, "{}", op.symbol())?;
                write_operand(f, operand, operand.precedence() < UNARY_PRECEDENCE)
            }
        }
    }
}
