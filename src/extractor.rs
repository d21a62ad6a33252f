use calamine::Data;
use tracing::{debug, info};

use crate::{DreError, DreResult, RawSheet};

const DESCRIPTION_KEYWORDS: &[&str] = &["desc"];
const VALUE_KEYWORDS: &[&str] = &["valor", "value"];
const REVENUE_KEYWORDS: &[&str] = &["receita", "revenue"];
const PROFIT_KEYWORDS: &[&str] = &["lucro", "profit"];

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub value: f64,
}

/// Line items in spreadsheet row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DreTable {
    items: Vec<LineItem>,
}

impl DreTable {
    pub fn new(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub table: DreTable,
    pub description_column: String,
    pub value_column: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregates {
    pub revenue: f64,
    pub profit: f64,
}

fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().to_lowercase();
        keywords.iter().any(|k| h.contains(k))
    })
}

/// Returns the indices of the description and value columns.
///
/// Falls back to the first column for the description and the last one for
/// the value when no header matches.
pub fn get_column_indices(headers: &[String]) -> (usize, usize) {
    let last = headers.len().saturating_sub(1);
    (
        find_column(headers, DESCRIPTION_KEYWORDS).unwrap_or(0),
        find_column(headers, VALUE_KEYWORDS).unwrap_or(last),
    )
}

fn is_missing(cell: Option<&Data>) -> bool {
    matches!(cell, None | Some(Data::Empty))
}

fn cell_to_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub fn extract(sheet: &RawSheet) -> DreResult<Extraction> {
    if sheet.headers.is_empty() {
        return Err(DreError::EmptySheet(sheet.name.clone()));
    }
    let (desc_index, value_index) = get_column_indices(&sheet.headers);
    let description_column = sheet.headers[desc_index].clone();
    let value_column = sheet.headers[value_index].clone();
    info!(%description_column, %value_column, "selected columns");

    let width = sheet.headers.len();
    let mut items = Vec::new();
    let mut dropped = 0;

    for (pos, r) in sheet.rows.iter().enumerate() {
        if (0..width).any(|i| is_missing(r.get(i))) {
            dropped += 1;
            continue;
        }
        let cell = &r[value_index];
        let value = cell_to_f64(cell).ok_or_else(|| DreError::MalformedRow {
            // header occupies row 1
            row: pos + 2,
            column: value_column.clone(),
            value: cell.to_string(),
        })?;
        items.push(LineItem {
            description: r[desc_index].to_string(),
            value,
        });
    }
    debug!(kept = items.len(), dropped, "filtered incomplete rows");

    Ok(Extraction {
        table: DreTable::new(items),
        description_column,
        value_column,
    })
}

fn sum_matching(table: &DreTable, keywords: &[&str]) -> f64 {
    table
        .items()
        .iter()
        .filter(|item| {
            let d = item.description.to_lowercase();
            keywords.iter().any(|k| d.contains(k))
        })
        .map(|item| item.value)
        .sum()
}

/// Sums revenue and profit lines. A line naming both counts toward both.
pub fn aggregate(table: &DreTable) -> Aggregates {
    Aggregates {
        revenue: sum_matching(table, REVENUE_KEYWORDS),
        profit: sum_matching(table, PROFIT_KEYWORDS),
    }
}
