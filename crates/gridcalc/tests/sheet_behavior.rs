//! End-to-end behavior of the public sheet API

use gridcalc::prelude::*;
use gridcalc::MAX_ROWS;
use pretty_assertions::assert_eq;

fn pos(s: &str) -> Position {
    s.parse().unwrap()
}

fn value(sheet: &Sheet, s: &str) -> CellValue {
    sheet.value(pos(s)).unwrap()
}

fn text(sheet: &Sheet, s: &str) -> Option<String> {
    sheet.cell(pos(s)).unwrap().map(|c| c.text())
}

/// Setting empty text reads back as empty, and keeps the cell referenced
#[test]
fn test_set_empty_text() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "").unwrap();
    assert_eq!(value(&sheet, "A1"), CellValue::empty());

    sheet.set_cell(pos("A1"), "5").unwrap();
    sheet.set_cell(pos("B1"), "=A1").unwrap();
    sheet.set_cell(pos("A1"), "").unwrap();

    let a1 = sheet.cell(pos("A1")).unwrap().unwrap();
    assert_eq!(a1.value(), CellValue::empty());
    assert!(a1.is_empty());
    assert!(a1.is_referenced());
    assert_eq!(value(&sheet, "B1"), CellValue::Number(0.0));
}

#[test]
fn test_text_round_trip() {
    let mut sheet = Sheet::new();
    for t in ["hello", "42", "  spaced  ", "=", "1+2", "#REF!"] {
        sheet.set_cell(pos("B2"), t).unwrap();
        assert_eq!(text(&sheet, "B2").as_deref(), Some(t));
        assert_eq!(value(&sheet, "B2"), CellValue::text(t));
    }
}

#[test]
fn test_escape_sign_is_stripped_from_value_only() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "'=1+2").unwrap();
    assert_eq!(text(&sheet, "A1").as_deref(), Some("'=1+2"));
    assert_eq!(value(&sheet, "A1"), CellValue::text("=1+2"));

    sheet.set_cell(pos("A1"), "''quoted").unwrap();
    assert_eq!(value(&sheet, "A1"), CellValue::text("'quoted"));
}

#[test]
fn test_formula_text_is_canonical() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "= ( b2 + 1 ) * ((3))").unwrap();
    assert_eq!(text(&sheet, "A1").as_deref(), Some("=(B2+1)*3"));
    assert_eq!(
        sheet.cell(pos("A1")).unwrap().unwrap().referenced_cells(),
        vec![pos("B2")]
    );
}

/// Referencing an absent cell materializes it as an empty placeholder
#[test]
fn test_referenced_cell_is_materialized() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=B5*2").unwrap();

    let b5 = sheet.cell(pos("B5")).unwrap().expect("placeholder cell");
    assert!(b5.is_empty());
    assert!(b5.is_referenced());
    assert_eq!(b5.text(), "");
    assert_eq!(value(&sheet, "A1"), CellValue::Number(0.0));

    // Placeholders do not count towards the printable size
    assert_eq!(sheet.printable_size(), Size::new(1, 1));
}

#[test]
fn test_cycle_is_rejected_without_side_effects() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=B1+1").unwrap();
    sheet.set_cell(pos("B1"), "=C1").unwrap();

    assert_eq!(
        sheet.set_cell(pos("B1"), "=A1+1"),
        Err(Error::CircularDependency(pos("B1")))
    );

    let b1 = sheet.cell(pos("B1")).unwrap().unwrap();
    assert_eq!(b1.text(), "=C1");
    assert_eq!(b1.referenced_cells(), vec![pos("C1")]);
    assert!(b1.is_referenced());
    assert!(!sheet.cell(pos("A1")).unwrap().unwrap().is_referenced());
    assert!(sheet.cell(pos("C1")).unwrap().unwrap().is_referenced());
    assert_eq!(value(&sheet, "A1"), CellValue::Number(1.0));
}

#[test]
fn test_self_reference_is_rejected() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "7").unwrap();
    assert_eq!(
        sheet.set_cell(pos("A1"), "=A1"),
        Err(Error::CircularDependency(pos("A1")))
    );
    assert_eq!(text(&sheet, "A1").as_deref(), Some("7"));
}

#[test]
fn test_parse_error_keeps_previous_content() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=2*3").unwrap();

    for bad in ["=1+", "=(1", "=1)", "=foo", "=1 2", "=$"] {
        assert!(
            matches!(sheet.set_cell(pos("A1"), bad), Err(Error::FormulaParse(_))),
            "{bad}"
        );
    }
    assert_eq!(text(&sheet, "A1").as_deref(), Some("=2*3"));
    assert_eq!(value(&sheet, "A1"), CellValue::Number(6.0));
}

#[test]
fn test_cache_is_invalidated_transitively() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=5+2").unwrap();
    assert_eq!(value(&sheet, "A1"), CellValue::Number(7.0));

    sheet.set_cell(pos("B1"), "=A1*10").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Number(70.0));

    sheet.set_cell(pos("C1"), "=B1+1").unwrap();
    assert_eq!(value(&sheet, "C1"), CellValue::Number(71.0));

    sheet.set_cell(pos("A1"), "=1").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Number(10.0));
    assert_eq!(value(&sheet, "C1"), CellValue::Number(11.0));

    sheet.clear_cell(pos("A1")).unwrap();
    assert_eq!(value(&sheet, "C1"), CellValue::Number(1.0));
}

#[test]
fn test_printable_size() {
    let mut sheet = Sheet::new();
    assert_eq!(sheet.printable_size(), Size::new(0, 0));

    // Row 3, column 2 is C4 in A1 notation
    sheet.set_cell(Position::new(3, 2), "x").unwrap();
    assert_eq!(sheet.printable_size(), Size::new(4, 3));

    sheet.set_cell(pos("E1"), "y").unwrap();
    assert_eq!(sheet.printable_size(), Size::new(4, 5));

    sheet.clear_cell(pos("C4")).unwrap();
    assert_eq!(sheet.printable_size(), Size::new(1, 5));

    sheet.clear_cell(pos("E1")).unwrap();
    assert_eq!(sheet.printable_size(), Size::new(0, 0));
}

#[test]
fn test_operand_conversion() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("B1"), "=A1").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Number(0.0));

    sheet.set_cell(pos("A1"), "abc").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Error(FormulaError::Value));

    sheet.set_cell(pos("A1"), "42").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Number(42.0));

    sheet.set_cell(pos("A1"), "=1/0").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Error(FormulaError::Arithmetic));

    sheet.set_cell(pos("A1"), "=ZZZZ1").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Error(FormulaError::Ref));
    assert_eq!(text(&sheet, "A1").as_deref(), Some("=#REF!"));
}

#[test]
fn test_clear_retains_referenced_cells() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "3").unwrap();
    sheet.set_cell(pos("B1"), "=A1").unwrap();
    sheet.set_cell(pos("C1"), "alone").unwrap();

    sheet.clear_cell(pos("A1")).unwrap();
    let a1 = sheet.cell(pos("A1")).unwrap().expect("still referenced");
    assert!(a1.is_empty());
    assert!(a1.is_referenced());

    sheet.clear_cell(pos("C1")).unwrap();
    assert!(sheet.cell(pos("C1")).unwrap().is_none());

    // Dropping the last reference erases the empty cell too
    sheet.clear_cell(pos("B1")).unwrap();
    assert!(sheet.cell(pos("A1")).unwrap().is_none());
    assert!(sheet.cell(pos("B1")).unwrap().is_none());
    assert_eq!(sheet.cell_count(), 0);

    // Clearing an absent cell is a no-op
    sheet.clear_cell(pos("D4")).unwrap();
    assert_eq!(sheet.cell_count(), 0);
}

#[test]
fn test_invalid_positions() {
    let mut sheet = Sheet::new();
    let outside = Position::new(MAX_ROWS, 0);

    assert_eq!(sheet.set_cell(outside, "1"), Err(Error::InvalidPosition(outside)));
    assert_eq!(sheet.clear_cell(outside), Err(Error::InvalidPosition(outside)));
    assert!(sheet.cell(outside).is_err());
    assert!(sheet.value(Position::new(0, -1)).is_err());
}

#[test]
fn test_print_layout() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=1/2").unwrap();
    sheet.set_cell(pos("C1"), "'=x").unwrap();
    sheet.set_cell(pos("B2"), "=A1*4").unwrap();

    let mut out = Vec::new();
    sheet.print_values(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0.5\t\t=x\n\t2\t\n");

    let mut out = Vec::new();
    sheet.print_texts(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "=1/2\t\t'=x\n\t=A1*4\t\n");
}

/// A chain as long as the grid is tall evaluates and invalidates
#[test]
fn test_full_height_chain() {
    let mut sheet = Sheet::new();
    sheet.set_cell(Position::new(0, 0), "1").unwrap();
    for row in 1..MAX_ROWS {
        let text = format!("=A{}+1", row);
        sheet.set_cell(Position::new(row, 0), text).unwrap();
    }

    let last = Position::new(MAX_ROWS - 1, 0);
    assert_eq!(sheet.value(last).unwrap(), CellValue::Number(f64::from(MAX_ROWS)));

    sheet.set_cell(Position::new(0, 0), "=2").unwrap();
    assert_eq!(
        sheet.value(last).unwrap(),
        CellValue::Number(f64::from(MAX_ROWS) + 1.0)
    );
}

#[test]
fn test_deeply_nested_formula_is_a_parse_error() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "keep").unwrap();

    let parens = format!("={}1{}", "(".repeat(50_000), ")".repeat(50_000));
    let signs = format!("={}1", "-".repeat(50_000));
    let chain = format!("={}", vec!["B1"; 50_000].join("+"));
    for text in [parens, signs, chain] {
        assert!(matches!(
            sheet.set_cell(pos("A1"), text),
            Err(Error::FormulaParse(_))
        ));
    }
    assert_eq!(text(&sheet, "A1").as_deref(), Some("keep"));
    assert!(sheet.cell(pos("B1")).unwrap().is_none());
}
