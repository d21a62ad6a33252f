use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::{debug, info};

use crate::{DreError, DreResult};

/// Header row plus data rows of one worksheet, cells untouched.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Data>>,
}

/// Opens an `.xlsx` workbook and reads either the named worksheet or the first one.
pub fn load_sheet<P: AsRef<Path>>(file_path: P, sheet: Option<&str>) -> DreResult<RawSheet> {
    let file_path = file_path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(file_path)?;

    let names = workbook.sheet_names();
    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| DreError::MissingSheet(wanted.to_string()))?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| DreError::MissingSheet(file_path.display().to_string()))?,
    };

    let range = workbook.worksheet_range(&name)?;
    let headers: Vec<String> = range
        .headers()
        .ok_or_else(|| DreError::EmptySheet(name.clone()))?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();
    debug!(sheet = %name, ?headers, "read header row");

    let rows: Vec<Vec<Data>> = range.rows().skip(1).map(|r| r.to_vec()).collect();
    info!(
        file = %file_path.display(),
        sheet = %name,
        rows = rows.len(),
        "loaded worksheet"
    );

    Ok(RawSheet {
        name,
        headers,
        rows,
    })
}
