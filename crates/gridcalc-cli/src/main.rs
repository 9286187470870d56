//! gridcalc CLI - replay a cell assignment script and print the sheet
//!
//! Script format, one command per line:
//!
//! ```text
//! # comment
//! A1 5
//! B1 =A1*2
//! C1 'escaped text
//! clear A1
//! ```
//!
//! `A1 <text>` assigns everything after the first space to the cell (an
//! address alone assigns empty text), `clear A1` clears it. Blank lines and
//! lines starting with `#` are skipped.

use anyhow::{Context, Result};
use clap::Parser;
use gridcalc::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Replay a cell assignment script and print the sheet")]
struct Cli {
    /// Script file (default: stdin)
    input: Option<PathBuf>,

    /// Column delimiter (default: tab)
    #[arg(short, long, default_value = "\t")]
    delimiter: char,

    /// Print raw cell texts instead of computed values
    #[arg(short, long)]
    texts: bool,

    /// Print the printable size before the grid
    #[arg(short, long)]
    size: bool,

    /// Stop at the first rejected command instead of reporting and skipping it
    #[arg(long)]
    strict: bool,
}

/// One parsed script line
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Set(Position, &'a str),
    Clear(Position),
}

fn parse_command(line: &str) -> Result<Option<Command<'_>>> {
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    if head == "clear" {
        let pos = rest
            .trim()
            .parse()
            .with_context(|| format!("Invalid address '{}'", rest.trim()))?;
        return Ok(Some(Command::Clear(pos)));
    }

    let pos = head
        .parse()
        .with_context(|| format!("Invalid address '{}'", head))?;
    Ok(Some(Command::Set(pos, rest)))
}

fn apply(sheet: &mut Sheet, command: Command<'_>) -> Result<()> {
    match command {
        Command::Set(pos, text) => sheet
            .set_cell(pos, text)
            .with_context(|| format!("Failed to set {}", pos)),
        Command::Clear(pos) => sheet
            .clear_cell(pos)
            .with_context(|| format!("Failed to clear {}", pos)),
    }
}

/// Replay every command of `script` into `sheet`, returning how many were
/// rejected
fn run_script<R: BufRead>(sheet: &mut Sheet, script: R, strict: bool) -> Result<usize> {
    let mut rejected = 0;

    for (index, line) in script.lines().enumerate() {
        let line = line.context("Failed to read script")?;
        let line = line.trim_end_matches('\r');
        let line_no = index + 1;

        let result = parse_command(line).and_then(|command| match command {
            Some(command) => apply(sheet, command),
            None => Ok(()),
        });

        if let Err(e) = result {
            if strict {
                return Err(e.context(format!("Line {}", line_no)));
            }
            eprintln!("Line {}: {:#}", line_no, e);
            rejected += 1;
        }
    }

    Ok(rejected)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut sheet = Sheet::new();

    let rejected = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            run_script(&mut sheet, BufReader::new(file), cli.strict)?
        }
        None => run_script(&mut sheet, io::stdin().lock(), cli.strict)?,
    };

    if rejected > 0 {
        eprintln!("Warning: {} command(s) rejected", rejected);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.size {
        let size = sheet.printable_size();
        writeln!(out, "{}x{}", size.rows, size.cols).context("Failed to write to stdout")?;
    }

    let options = PrintOptions {
        column_delimiter: cli.delimiter,
        ..Default::default()
    };
    let printed = if cli.texts {
        sheet.print_texts_with_options(&mut out, &options)
    } else {
        sheet.print_values_with_options(&mut out, &options)
    };
    printed.context("Failed to write to stdout")?;
    out.flush().context("Failed to write to stdout")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("# A1 5").unwrap(), None);
        assert_eq!(
            parse_command("A1 =B1 + 2").unwrap(),
            Some(Command::Set(pos("A1"), "=B1 + 2"))
        );
        assert_eq!(parse_command("b2").unwrap(), Some(Command::Set(pos("B2"), "")));
        assert_eq!(
            parse_command("C3  two spaces").unwrap(),
            Some(Command::Set(pos("C3"), " two spaces"))
        );
        assert_eq!(
            parse_command("clear D4").unwrap(),
            Some(Command::Clear(pos("D4")))
        );
        assert!(parse_command("1A x").is_err());
        assert!(parse_command("clear").is_err());
    }

    #[test]
    fn test_run_script() {
        let script = "A1 =5+2\nB1 =A1*10\n\n# cycle\nA1 =B1\nA1 =1\nC1 'x\n";
        let mut sheet = Sheet::new();

        let rejected = run_script(&mut sheet, script.as_bytes(), false).unwrap();
        assert_eq!(rejected, 1);

        let mut out = Vec::new();
        sheet.print_values(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\t10\tx\n");
    }

    #[test]
    fn test_run_script_strict() {
        let mut sheet = Sheet::new();
        let err = run_script(&mut sheet, "A1 1\nA1 =1+\nB1 2\n".as_bytes(), true).unwrap_err();
        assert!(format!("{:#}", err).starts_with("Line 2"));
        assert!(sheet.cell(pos("B1")).unwrap().is_none());
    }
}
