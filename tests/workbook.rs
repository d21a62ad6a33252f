use std::path::PathBuf;

use calamine::Data;
use dre_analise::*;
use pretty_assertions::assert_eq;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dre.xlsx")
}

#[test]
fn first_sheet_is_read_with_trimmed_headers() {
    let sheet = load_sheet(fixture(), None).unwrap();
    assert_eq!(sheet.name, "DRE");
    assert_eq!(sheet.headers, vec!["Descrição", "Valor Total"]);
    assert_eq!(sheet.rows.len(), 3);
    assert_eq!(sheet.rows[1][0], Data::Empty);
}

#[test]
fn named_sheet_is_selected() {
    let sheet = load_sheet(fixture(), Some("DRE")).unwrap();
    assert_eq!(sheet.name, "DRE");
}

#[test]
fn unknown_sheet_is_missing() {
    match load_sheet(fixture(), Some("X")) {
        Err(DreError::MissingSheet(name)) => assert_eq!(name, "X"),
        other => panic!("expected MissingSheet, got {other:?}"),
    }
}

#[test]
fn sheet_without_rows_is_empty() {
    match load_sheet(fixture(), Some("Vazia")) {
        Err(DreError::EmptySheet(name)) => assert_eq!(name, "Vazia"),
        other => panic!("expected EmptySheet, got {other:?}"),
    }
}

#[test]
fn loaded_sheet_feeds_extraction_and_aggregation() {
    let sheet = load_sheet(fixture(), None).unwrap();
    let extraction = extract(&sheet).unwrap();
    assert_eq!(extraction.description_column, "Descrição");
    assert_eq!(extraction.value_column, "Valor Total");
    assert_eq!(extraction.table.len(), 2);
    assert_eq!(
        aggregate(&extraction.table),
        Aggregates {
            revenue: 200_000.,
            profit: 80_000.
        }
    );
}
