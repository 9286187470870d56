//! Dependency graph maintenance
//!
//! Edges live on the cells (see [`Cell::depends_on`] and
//! [`Cell::dependents`]); this module keeps them consistent as contents are
//! replaced, rejects assignments that would close a cycle, and clears
//! memoized formula results downstream of every change.
//!
//! [`Cell::depends_on`]: crate::cell::Cell
//! [`Cell::dependents`]: crate::cell::Cell

use crate::cell::{Cell, CellContent, CellId};
use crate::sheet::Sheet;
use ahash::AHashSet;
use gridcalc_core::Position;
use tracing::trace;

impl Sheet {
    /// Whether making the cell at `pos` read `references` would close a
    /// cycle in the current graph.
    ///
    /// Walks backwards from `pos` over existing dependent edges; reaching any
    /// cell that is about to become a dependency means that cell already
    /// (transitively) reads `pos`.
    pub(crate) fn would_create_cycle(&self, pos: Position, references: &[Position]) -> bool {
        if references.contains(&pos) {
            return true;
        }

        let targets: AHashSet<CellId> = references
            .iter()
            .filter_map(|p| self.index.get(p).copied())
            .collect();
        if targets.is_empty() {
            return false;
        }

        // A position with no stored cell has no dependents
        let start = match self.index.get(&pos) {
            Some(&id) => id,
            None => return false,
        };

        let mut visited = AHashSet::new();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            if targets.contains(&id) {
                return true;
            }
            if let Some(cell) = self.get(id) {
                stack.extend(cell.dependents.iter().filter(|d| !visited.contains(*d)));
            }
        }

        false
    }

    /// Replace the content of `id` and rebuild its outgoing edges from
    /// scratch.
    ///
    /// Referenced positions without a cell get an empty one. Former
    /// dependencies left empty and unreferenced are erased afterwards.
    pub(crate) fn replace_content(
        &mut self,
        id: CellId,
        content: CellContent,
        references: &[Position],
    ) {
        let previous = self.release_dependencies(id);

        for &pos in references {
            let dep = self.ensure_cell(pos);
            if let Some(cell) = self.get_mut(dep) {
                cell.dependents.insert(id);
            }
            if let Some(cell) = self.get_mut(id) {
                cell.depends_on.insert(dep);
            }
        }

        if let Some(cell) = self.get_mut(id) {
            trace!(
                pos = %cell.position,
                released = previous.len(),
                added = cell.depends_on.len(),
                "rebuilt dependency edges"
            );
            cell.content = content;
        }

        self.invalidate_dependents(id);

        for dep in previous {
            self.erase_if_unused(dep);
        }
    }

    /// Remove every outgoing edge of `id`, returning the former dependencies
    fn release_dependencies(&mut self, id: CellId) -> Vec<CellId> {
        let previous: Vec<CellId> = match self.get_mut(id) {
            Some(cell) => cell.depends_on.drain().collect(),
            None => return Vec::new(),
        };

        for &dep in &previous {
            if let Some(cell) = self.get_mut(dep) {
                cell.dependents.remove(&id);
            }
        }

        previous
    }

    /// Memoize every unevaluated formula `cell` transitively reads,
    /// dependencies before their dependents.
    ///
    /// Uses an explicit stack, so chains of any length are evaluated
    /// without growing the call stack.
    pub(crate) fn evaluate_dependencies(&self, cell: &Cell) {
        let mut visited = AHashSet::new();
        // (cell, its dependencies are already evaluated)
        let mut stack: Vec<(CellId, bool)> =
            cell.depends_on.iter().map(|&id| (id, false)).collect();

        while let Some((id, ready)) = stack.pop() {
            let current = match self.get(id) {
                Some(cell) => cell,
                None => continue,
            };
            if ready {
                current.value(self);
                continue;
            }
            if !current.content.needs_evaluation() || !visited.insert(id) {
                continue;
            }

            stack.push((id, true));
            stack.extend(
                current
                    .depends_on
                    .iter()
                    .filter(|d| !visited.contains(*d))
                    .map(|&d| (d, false)),
            );
        }

        if !visited.is_empty() {
            trace!(pos = %cell.position, cells = visited.len(), "evaluated dependencies");
        }
    }

    /// Clear the memoized result of `id` and of every cell that transitively
    /// reads it
    pub(crate) fn invalidate_dependents(&mut self, id: CellId) {
        let mut visited = AHashSet::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(cell) = self.get_mut(current) {
                cell.content.invalidate_cache();
                stack.extend(cell.dependents.iter().copied());
            }
        }

        trace!(cells = visited.len(), "invalidated cached values");
    }
}
