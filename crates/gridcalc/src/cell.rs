//! Cell content and per-cell dependency edges

use crate::sheet::Sheet;
use ahash::AHashSet;
use gridcalc_core::{CellValue, Position, Result, ESCAPE_SIGN, FORMULA_SIGN};
use gridcalc_formula::Formula;
use std::cell::OnceCell;

/// Handle of a cell slot in the sheet's arena.
///
/// Ids stay valid for as long as the cell is stored; a slot is only recycled
/// after its cell has been erased, which requires that no edge points at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct CellId(pub(crate) usize);

/// What a cell holds
#[derive(Debug)]
pub(crate) enum CellContent {
    Empty,
    /// Raw text, never empty
    Text(String),
    /// Parsed formula plus the memo of its last result.
    ///
    /// The memo is filled on read, so reading a value through `&Sheet` may
    /// write it. Every mutation of the sheet clears it for the changed cell
    /// and all of its transitive dependents.
    Formula {
        formula: Formula,
        cache: OnceCell<CellValue>,
    },
}

impl CellContent {
    /// Classify raw cell text.
    ///
    /// Empty text is [`CellContent::Empty`]; text of two or more characters
    /// starting with `=` must parse as a formula; anything else is text.
    pub(crate) fn parse(text: String) -> Result<Self> {
        if text.is_empty() {
            return Ok(CellContent::Empty);
        }

        match text.strip_prefix(FORMULA_SIGN) {
            Some(expression) if !expression.is_empty() => Ok(CellContent::Formula {
                formula: Formula::parse(expression)?,
                cache: OnceCell::new(),
            }),
            _ => Ok(CellContent::Text(text)),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }

    pub(crate) fn text(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(text) => text.clone(),
            CellContent::Formula { formula, .. } => {
                format!("{}{}", FORMULA_SIGN, formula.expression())
            }
        }
    }

    pub(crate) fn referenced_cells(&self) -> Vec<Position> {
        match self {
            CellContent::Formula { formula, .. } => formula.referenced_cells(),
            CellContent::Empty | CellContent::Text(_) => Vec::new(),
        }
    }

    /// Whether this is a formula without a memoized result
    pub(crate) fn needs_evaluation(&self) -> bool {
        matches!(self, CellContent::Formula { cache, .. } if cache.get().is_none())
    }

    /// Drop the memoized result, if any
    pub(crate) fn invalidate_cache(&mut self) {
        if let CellContent::Formula { cache, .. } = self {
            cache.take();
        }
    }

    #[cfg(test)]
    pub(crate) fn has_cached_value(&self) -> bool {
        matches!(self, CellContent::Formula { cache, .. } if cache.get().is_some())
    }
}

/// A stored cell: its content plus both directions of its dependency edges
#[derive(Debug)]
pub(crate) struct Cell {
    pub(crate) position: Position,
    pub(crate) content: CellContent,
    /// Cells this cell's formula reads
    pub(crate) depends_on: AHashSet<CellId>,
    /// Cells whose formulas read this cell
    pub(crate) dependents: AHashSet<CellId>,
}

impl Cell {
    pub(crate) fn new(position: Position) -> Self {
        Self {
            position,
            content: CellContent::Empty,
            depends_on: AHashSet::new(),
            dependents: AHashSet::new(),
        }
    }

    pub(crate) fn value(&self, sheet: &Sheet) -> CellValue {
        match &self.content {
            CellContent::Empty => CellValue::empty(),
            CellContent::Text(text) => {
                CellValue::text(text.strip_prefix(ESCAPE_SIGN).unwrap_or(text))
            }
            CellContent::Formula { formula, cache } => {
                // Operands are evaluated first so evaluation never recurses
                // into other formula cells
                if cache.get().is_none() {
                    sheet.evaluate_dependencies(self);
                }
                cache.get_or_init(|| formula.evaluate(sheet)).clone()
            }
        }
    }

    pub(crate) fn is_referenced(&self) -> bool {
        !self.dependents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcalc_core::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_content() {
        assert!(matches!(
            CellContent::parse(String::new()).unwrap(),
            CellContent::Empty
        ));
        assert!(matches!(
            CellContent::parse("hello".into()).unwrap(),
            CellContent::Text(_)
        ));
        // A lone formula sign is plain text
        assert!(matches!(
            CellContent::parse("=".into()).unwrap(),
            CellContent::Text(_)
        ));
        assert!(matches!(
            CellContent::parse("=1+2".into()).unwrap(),
            CellContent::Formula { .. }
        ));
        assert!(matches!(
            CellContent::parse("'=1+2".into()).unwrap(),
            CellContent::Text(_)
        ));
    }

    #[test]
    fn test_formula_parse_failure() {
        assert!(matches!(
            CellContent::parse("=1+".into()),
            Err(Error::FormulaParse(_))
        ));
    }

    #[test]
    fn test_content_text() {
        assert_eq!(CellContent::parse(String::new()).unwrap().text(), "");
        assert_eq!(CellContent::parse("'abc".into()).unwrap().text(), "'abc");
        assert_eq!(
            CellContent::parse("= (1 + 2) * a1".into()).unwrap().text(),
            "=(1+2)*A1"
        );
    }

    #[test]
    fn test_escaped_text_value() {
        let sheet = Sheet::new();
        let mut cell = Cell::new(Position::new(0, 0));

        cell.content = CellContent::parse("'=1+2".into()).unwrap();
        assert_eq!(cell.value(&sheet), CellValue::text("=1+2"));

        // Only one leading escape sign is dropped
        cell.content = CellContent::parse("''x".into()).unwrap();
        assert_eq!(cell.value(&sheet), CellValue::text("'x"));

        cell.content = CellContent::parse("'".into()).unwrap();
        assert_eq!(cell.value(&sheet), CellValue::empty());
    }

    #[test]
    fn test_formula_value_is_memoized() {
        let sheet = Sheet::new();
        let mut cell = Cell::new(Position::new(0, 0));
        cell.content = CellContent::parse("=5+2".into()).unwrap();

        assert!(!cell.content.has_cached_value());
        assert_eq!(cell.value(&sheet), CellValue::Number(7.0));
        assert!(cell.content.has_cached_value());

        cell.content.invalidate_cache();
        assert!(!cell.content.has_cached_value());
    }
}
