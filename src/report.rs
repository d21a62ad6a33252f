use std::{fs, path::Path};

use oxidize_pdf::{measure_text, text::TextEncoding, Document, Font, Page};
use tracing::info;

use crate::{DreResult, RenderError, TaxResult};

pub const REPORT_TITLE: &str = "Resumo da Análise DRE";
pub const REPORT_FILE_NAME: &str = "resumo_dre.pdf";
pub const REPORT_MIME_TYPE: &str = "application/pdf";

const MM: f64 = 72.0 / 25.4;
// A4 in points
const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 10.0 * MM;
const LINE_HEIGHT: f64 = 10.0 * MM;
const TITLE_FONT: Font = Font::HelveticaBold;
const TITLE_SIZE: f64 = 16.0;
const BODY_FONT: Font = Font::Helvetica;
const BODY_SIZE: f64 = 12.0;

/// Formats an amount with `,` thousands separators and two decimals.
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

pub fn format_entry(label: &str, value: f64) -> String {
    format!("{label}: R$ {}", format_amount(value))
}

/// The report font is WinAnsi encoded; the encoder writes `?` for anything it
/// cannot map, so such characters are refused up front.
fn check_encodable(text: &str) -> Result<(), RenderError> {
    let mut buf = [0u8; 4];
    let unmapped = |c: &char| {
        c.is_control()
            || (*c != '?'
                && TextEncoding::WinAnsiEncoding.encode(c.encode_utf8(&mut buf)) == b"?")
    };
    match text.chars().find(unmapped) {
        Some(c) => Err(RenderError::UnsupportedCharacter(c)),
        None => Ok(()),
    }
}

/// One-page-at-a-time text report: a centered title followed by plain lines.
pub struct ReportBuilder {
    document: Document,
    page: Page,
    // top of the next line, in points from the page bottom
    cursor: f64,
}

impl ReportBuilder {
    pub fn new(title: &str) -> DreResult<Self> {
        check_encodable(title)?;
        let mut document = Document::new();
        document.set_title(title);
        let mut builder = Self {
            document,
            page: Page::a4(),
            cursor: PAGE_HEIGHT - MARGIN,
        };

        let width = measure_text(title, TITLE_FONT, TITLE_SIZE);
        let x = (PAGE_WIDTH - width) / 2.0;
        builder.write_at(x, title, TITLE_FONT, TITLE_SIZE)?;
        // blank gap under the title
        builder.cursor -= LINE_HEIGHT;
        Ok(builder)
    }

    pub fn line(&mut self, text: &str) -> DreResult<&mut Self> {
        check_encodable(text)?;
        if self.cursor - LINE_HEIGHT < MARGIN {
            let full = std::mem::replace(&mut self.page, Page::a4());
            self.document.add_page(full);
            self.cursor = PAGE_HEIGHT - MARGIN;
        }
        self.write_at(MARGIN, text, BODY_FONT, BODY_SIZE)?;
        Ok(self)
    }

    fn write_at(&mut self, x: f64, text: &str, font: Font, size: f64) -> Result<(), RenderError> {
        // vertically centred inside the line box
        let baseline = self.cursor - LINE_HEIGHT / 2.0 - size * 0.35;
        self.page
            .text()
            .set_font(font, size)
            .at(x, baseline)
            .write(text)?;
        self.cursor -= LINE_HEIGHT;
        Ok(())
    }

    pub fn finish(mut self) -> DreResult<Vec<u8>> {
        self.document.add_page(self.page);
        let mut buffer = Vec::new();
        self.document
            .write(&mut buffer)
            .map_err(RenderError::from)?;
        Ok(buffer)
    }
}

/// Renders the tax simulation as a PDF and returns its bytes.
pub fn render(result: &TaxResult) -> DreResult<Vec<u8>> {
    let mut builder = ReportBuilder::new(REPORT_TITLE)?;
    for (name, value) in result.entries() {
        builder.line(&format_entry(name.label(), *value))?;
    }
    let bytes = builder.finish()?;
    info!(bytes = bytes.len(), "rendered PDF report");
    Ok(bytes)
}

/// Renders the report and writes it to `file_path`.
pub fn export_pdf<P: AsRef<Path>>(result: &TaxResult, file_path: P) -> DreResult<()> {
    let bytes = render(result)?;
    fs::write(&file_path, bytes)?;
    info!(file = %file_path.as_ref().display(), "wrote PDF report");
    Ok(())
}

pub fn write_taxes_as_csv<P: AsRef<Path>>(result: &TaxResult, file_path: P) -> DreResult<()> {
    let mut wtr = csv::Writer::from_path(&file_path)?;
    wtr.write_record(["Imposto", "Valor (R$)"])?;
    for (name, value) in result.entries() {
        wtr.write_record([name.label().to_string(), format!("{value:.2}")])?;
    }
    wtr.flush()?;
    info!(
        file = %file_path.as_ref().display(),
        "wrote tax simulation as CSV"
    );
    Ok(())
}
