//! Tabular dumps of a sheet's values and raw texts

use crate::cell::Cell;
use crate::sheet::Sheet;
use gridcalc_core::Position;
use std::io::{self, Write};

/// Delimiters used when printing a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Written between the fields of a row
    pub column_delimiter: char,
    /// Written after every row
    pub row_delimiter: char,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            column_delimiter: '\t',
            row_delimiter: '\n',
        }
    }
}

impl Sheet {
    /// Write the computed value of every cell in the printable area,
    /// tab-separated, one line per row
    pub fn print_values<W: Write + ?Sized>(&self, output: &mut W) -> io::Result<()> {
        self.print_values_with_options(output, &PrintOptions::default())
    }

    /// Write the raw text of every cell in the printable area,
    /// tab-separated, one line per row
    pub fn print_texts<W: Write + ?Sized>(&self, output: &mut W) -> io::Result<()> {
        self.print_texts_with_options(output, &PrintOptions::default())
    }

    pub fn print_values_with_options<W: Write + ?Sized>(
        &self,
        output: &mut W,
        options: &PrintOptions,
    ) -> io::Result<()> {
        self.print_with(output, options, |cell| cell.value(self).to_string())
    }

    pub fn print_texts_with_options<W: Write + ?Sized>(
        &self,
        output: &mut W,
        options: &PrintOptions,
    ) -> io::Result<()> {
        self.print_with(output, options, |cell| cell.content.text())
    }

    fn print_with<W, F>(&self, output: &mut W, options: &PrintOptions, render: F) -> io::Result<()>
    where
        W: Write + ?Sized,
        F: Fn(&Cell) -> String,
    {
        let size = self.printable_size();
        let mut line = String::new();

        for row in 0..size.rows {
            line.clear();
            for col in 0..size.cols {
                if col > 0 {
                    line.push(options.column_delimiter);
                }
                if let Some(cell) = self.cell_at(Position::new(row, col)) {
                    if !cell.content.is_empty() {
                        line.push_str(&render(cell));
                    }
                }
            }
            line.push(options.row_delimiter);
            output.write_all(line.as_bytes())?;
        }

        Ok(())
    }
}
