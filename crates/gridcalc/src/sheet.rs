//! Sparse cell storage and the public sheet API

use crate::cell::{Cell, CellContent, CellId};
use ahash::AHashMap;
use gridcalc_core::{CellValue, Error, Position, Result, Size};
use gridcalc_formula::CellLookup;
use tracing::{debug, trace};

/// A sparse grid of cells with formula dependency tracking.
///
/// Cells live in an arena of slots addressed by [`CellId`]; a position map
/// finds the slot for a position. Dependency edges are id sets stored on the
/// cells themselves and are always kept symmetric: `b` is in
/// `a.depends_on` exactly when `a` is in `b.dependents`.
///
/// A position without a stored cell reads as empty. Cells are created by
/// [`Sheet::set_cell`] and, as empty placeholders, for positions a formula
/// references. A cell is erased again once it is empty and nothing depends
/// on it.
///
/// The sheet is single-threaded: formula results are memoized in place
/// while reading, so a `Sheet` is not `Sync`.
#[derive(Debug, Default)]
pub struct Sheet {
    pub(crate) slots: Vec<Option<Cell>>,
    pub(crate) free: Vec<CellId>,
    pub(crate) index: AHashMap<Position, CellId>,
}

fn check_position(pos: Position) -> Result<()> {
    if pos.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidPosition(pos))
    }
}

impl Sheet {
    /// Create an empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign raw text to the cell at `pos`.
    ///
    /// Empty text empties the cell, text starting with `=` (and longer than
    /// it) is parsed as a formula, anything else is stored as text. Fails
    /// without changing anything if `pos` is invalid, the formula does not
    /// parse, or the formula would make the cell depend on itself.
    pub fn set_cell(&mut self, pos: Position, text: impl Into<String>) -> Result<()> {
        check_position(pos)?;

        let content = CellContent::parse(text.into()).map_err(|e| {
            debug!(%pos, error = %e, "rejected unparsable formula");
            e
        })?;

        let references = content.referenced_cells();
        if self.would_create_cycle(pos, &references) {
            debug!(%pos, "rejected formula that would create a circular dependency");
            return Err(Error::CircularDependency(pos));
        }

        let id = self.ensure_cell(pos);
        self.replace_content(id, content, &references);
        Ok(())
    }

    /// Read-only handle to the cell stored at `pos`, if any
    pub fn cell(&self, pos: Position) -> Result<Option<CellView<'_>>> {
        check_position(pos)?;
        Ok(self.cell_at(pos).map(|cell| CellView { sheet: self, cell }))
    }

    /// Mutable handle to the cell stored at `pos`, if any
    pub fn cell_mut(&mut self, pos: Position) -> Result<Option<CellMut<'_>>> {
        check_position(pos)?;
        if self.index.contains_key(&pos) {
            Ok(Some(CellMut { sheet: self, pos }))
        } else {
            Ok(None)
        }
    }

    /// Empty the cell at `pos` and erase it unless other cells reference it.
    ///
    /// Does nothing if no cell is stored at `pos`.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        check_position(pos)?;

        if let Some(&id) = self.index.get(&pos) {
            self.replace_content(id, CellContent::Empty, &[]);
            self.erase_if_unused(id);
        }
        Ok(())
    }

    /// Value of the cell at `pos`; empty text when no cell is stored there
    pub fn value(&self, pos: Position) -> Result<CellValue> {
        check_position(pos)?;
        Ok(self.value_at(pos).unwrap_or_default())
    }

    /// Smallest `rows x cols` box, anchored at A1, that covers every
    /// non-empty cell
    pub fn printable_size(&self) -> Size {
        self.live_cells()
            .filter(|cell| !cell.content.is_empty())
            .fold(Size::default(), |size, cell| {
                Size::new(
                    size.rows.max(cell.position.row + 1),
                    size.cols.max(cell.position.col + 1),
                )
            })
    }

    /// Number of stored cells, including empty placeholders kept alive by
    /// references
    pub fn cell_count(&self) -> usize {
        self.index.len()
    }

    // === Arena access ===

    pub(crate) fn get(&self, id: CellId) -> Option<&Cell> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub(crate) fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.index.get(&pos).and_then(|&id| self.get(id))
    }

    pub(crate) fn live_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.slots.iter().flatten()
    }

    /// Id of the cell at `pos`, creating an empty one if needed
    pub(crate) fn ensure_cell(&mut self, pos: Position) -> CellId {
        if let Some(&id) = self.index.get(&pos) {
            return id;
        }

        let cell = Cell::new(pos);
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(cell);
                id
            }
            None => {
                self.slots.push(Some(cell));
                CellId(self.slots.len() - 1)
            }
        };
        self.index.insert(pos, id);
        trace!(%pos, "materialized cell");
        id
    }

    /// Erase the cell if it is empty and nothing references it
    pub(crate) fn erase_if_unused(&mut self, id: CellId) {
        let unused = self
            .get(id)
            .map_or(false, |cell| cell.content.is_empty() && !cell.is_referenced());
        if !unused {
            return;
        }

        if let Some(cell) = self.slots.get_mut(id.0).and_then(Option::take) {
            debug_assert!(cell.depends_on.is_empty());
            self.index.remove(&cell.position);
            self.free.push(id);
            debug!(pos = %cell.position, "erased cell");
        }
    }
}

impl CellLookup for Sheet {
    fn value_at(&self, pos: Position) -> Option<CellValue> {
        self.cell_at(pos).map(|cell| cell.value(self))
    }
}

/// Read-only handle to a stored cell
#[derive(Debug, Clone, Copy)]
pub struct CellView<'a> {
    sheet: &'a Sheet,
    cell: &'a Cell,
}

impl<'a> CellView<'a> {
    pub fn position(&self) -> Position {
        self.cell.position
    }

    /// Computed value; formulas are evaluated on first read and memoized
    pub fn value(&self) -> CellValue {
        self.cell.value(self.sheet)
    }

    /// Raw text; formulas are shown in canonical form
    pub fn text(&self) -> String {
        self.cell.content.text()
    }

    /// Valid positions the cell's formula reads, in row-major order
    pub fn referenced_cells(&self) -> Vec<Position> {
        self.cell.content.referenced_cells()
    }

    /// Whether any formula reads this cell
    pub fn is_referenced(&self) -> bool {
        self.cell.is_referenced()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.content.is_empty()
    }
}

/// Mutable handle to a stored cell
#[derive(Debug)]
pub struct CellMut<'a> {
    sheet: &'a mut Sheet,
    pos: Position,
}

impl<'a> CellMut<'a> {
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Read-only view of the same cell
    pub fn as_view(&self) -> Option<CellView<'_>> {
        let sheet: &Sheet = self.sheet;
        sheet.cell_at(self.pos).map(|cell| CellView { sheet, cell })
    }

    pub fn value(&self) -> CellValue {
        self.as_view().map(|c| c.value()).unwrap_or_default()
    }

    pub fn text(&self) -> String {
        self.as_view().map(|c| c.text()).unwrap_or_default()
    }

    pub fn referenced_cells(&self) -> Vec<Position> {
        self.as_view()
            .map(|c| c.referenced_cells())
            .unwrap_or_default()
    }

    pub fn is_referenced(&self) -> bool {
        self.as_view().map_or(false, |c| c.is_referenced())
    }

    /// Assign new raw text, see [`Sheet::set_cell`]
    pub fn set(&mut self, text: impl Into<String>) -> Result<()> {
        self.sheet.set_cell(self.pos, text)
    }

    /// Empty the cell; the handle is consumed because the cell may be erased
    pub fn clear(self) -> Result<()> {
        self.sheet.clear_cell(self.pos)
    }
}
