//! Formula evaluator
//!
//! Evaluates formula ASTs to a number. Operands that come from other cells
//! are obtained through a resolver callback; the first resolver failure or
//! arithmetic fault aborts the whole evaluation.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use gridcalc_core::{FormulaError, Position};

/// Result of evaluating an expression or resolving an operand
pub type EvalResult<T> = std::result::Result<T, FormulaError>;

/// Evaluate an expression, resolving cell references with `resolve`
pub fn evaluate<F>(expr: &FormulaExpr, resolve: &F) -> EvalResult<f64>
where
    F: Fn(Position) -> EvalResult<f64> + ?Sized,
{
    match expr {
        FormulaExpr::Number(n) => Ok(*n),
        FormulaExpr::CellRef(pos) => resolve(*pos),
        FormulaExpr::BinaryOp { op, left, right } => {
            evaluate_binary_op(*op, left, right, resolve)
        }
        FormulaExpr::UnaryOp { op, operand } => evaluate_unary_op(*op, operand, resolve),
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op<F>(
    op: BinaryOperator,
    left: &FormulaExpr,
    right: &FormulaExpr,
    resolve: &F,
) -> EvalResult<f64>
where
    F: Fn(Position) -> EvalResult<f64> + ?Sized,
{
    // Evaluate operands first
    let l = evaluate(left, resolve)?;
    let r = evaluate(right, resolve)?;

    let result = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        BinaryOperator::Divide => l / r,
    };

    finite(result)
}

/// Evaluate a unary operation
fn evaluate_unary_op<F>(op: UnaryOperator, operand: &FormulaExpr, resolve: &F) -> EvalResult<f64>
where
    F: Fn(Position) -> EvalResult<f64> + ?Sized,
{
    let value = evaluate(operand, resolve)?;
    match op {
        UnaryOperator::Plus => Ok(value),
        UnaryOperator::Negate => finite(-value),
    }
}

fn finite(n: f64) -> EvalResult<f64> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(FormulaError::Arithmetic)
    }
}
