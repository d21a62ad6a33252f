//! Income statement (DRE) analysis: spreadsheet extraction, an LLM-written
//! executive summary, a Lucro Real / Lucro Presumido tax simulation and a PDF
//! export of the simulated amounts.

mod completion;
mod config;
mod display;
mod error;
mod extractor;
mod narrative;
mod report;
mod tax;
mod workbook;

pub use self::{
    completion::*, config::*, display::*, error::*, extractor::*, narrative::*, report::*,
    tax::*, workbook::*,
};
