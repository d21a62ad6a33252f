use std::io;

use thiserror::Error;

pub type DreResult<T> = std::result::Result<T, DreError>;

#[derive(Error, Debug)]
pub enum DreError {
    #[error("failed to open workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("worksheet not found: {0}")]
    MissingSheet(String),

    #[error("worksheet <{0}> has no header row")]
    EmptySheet(String),

    #[error("row {row}: column <{column}> holds a non-numeric value: {value}")]
    MalformedRow {
        row: usize,
        column: String,
        value: String,
    },

    #[error("completion service error: {0}")]
    CompletionService(String),

    #[error("failed to render report: {0}")]
    Render(#[from] RenderError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("character {0:?} cannot be encoded in the report font")]
    UnsupportedCharacter(char),

    #[error(transparent)]
    Pdf(#[from] oxidize_pdf::PdfError),
}

impl From<reqwest::Error> for DreError {
    fn from(e: reqwest::Error) -> Self {
        DreError::CompletionService(e.to_string())
    }
}
