//! Parsed formula with sheet-aware evaluation

use crate::ast::FormulaExpr;
use crate::error::ParseResult;
use crate::evaluator::{evaluate, EvalResult};
use crate::parser::parse_expression;
use gridcalc_core::{CellValue, FormulaError, Position};

/// Read-only view of a sheet used while evaluating formulas
pub trait CellLookup {
    /// Value of the cell at `pos`, or `None` if no cell is stored there.
    ///
    /// Only called with valid positions.
    fn value_at(&self, pos: Position) -> Option<CellValue>;
}

/// A parsed formula expression
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    expr: FormulaExpr,
}

/// Parse formula text with the leading `=` already removed
pub fn parse_formula(expression: &str) -> ParseResult<Formula> {
    Formula::parse(expression)
}

impl Formula {
    /// Parse formula text with the leading `=` already removed
    pub fn parse(expression: &str) -> ParseResult<Self> {
        Ok(Self {
            expr: parse_expression(expression)?,
        })
    }

    /// Evaluate against `sheet`, yielding a number or the first error hit
    pub fn evaluate<L: CellLookup + ?Sized>(&self, sheet: &L) -> CellValue {
        let resolve = |pos: Position| resolve_operand(sheet, pos);
        match evaluate(&self.expr, &resolve) {
            Ok(n) => CellValue::Number(n),
            Err(e) => CellValue::Error(e),
        }
    }

    /// Valid positions the formula reads, deduplicated in row-major order
    pub fn referenced_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        self.expr.for_each_cell(&mut |pos| {
            if pos.is_valid() {
                cells.push(pos);
            }
        });
        cells.sort_unstable();
        cells.dedup();
        cells
    }

    /// Canonical text of the expression, without the leading `=`
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }
}

fn resolve_operand<L: CellLookup + ?Sized>(sheet: &L, pos: Position) -> EvalResult<f64> {
    if !pos.is_valid() {
        return Err(FormulaError::Ref);
    }

    match sheet.value_at(pos) {
        None => Ok(0.0),
        Some(CellValue::Number(n)) => Ok(n),
        Some(CellValue::Text(text)) => text_to_number(&text),
        Some(CellValue::Error(e)) => Err(e),
    }
}

/// Empty text reads as zero; anything else must be a complete number
fn text_to_number(text: &str) -> EvalResult<f64> {
    let trimmed = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(FormulaError::Value)
}
