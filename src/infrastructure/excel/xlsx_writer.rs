//! Spreadsheet report writer.
//!
//! Layout (0-based rows):
//! - "Live Crypto Data": header at row 0, one row per record.
//! - "Analysis": top-5 block header at row 1, summary block header at row 8.

use crate::domain::analysis::{AnalysisSummary, format_change, format_usd};
use crate::domain::errors::ReportError;
use crate::domain::market::MarketTable;
use crate::domain::ports::ReportSink;
use async_trait::async_trait;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::PathBuf;
use tracing::{debug, info};

pub const DATA_SHEET: &str = "Live Crypto Data";
pub const ANALYSIS_SHEET: &str = "Analysis";

pub const DATA_HEADERS: [&str; 6] = [
    "Name",
    "Symbol",
    "Current Price (USD)",
    "Market Cap",
    "24h Trading Volume",
    "Price Change 24h (%)",
];
pub const TOP_HEADERS: [&str; 2] = ["Top 5 by Market Cap", "Market Cap"];
pub const SUMMARY_HEADERS: [&str; 2] = ["Metric", "Value"];

pub const TOP_BLOCK_ROW: u32 = 1;
pub const SUMMARY_BLOCK_ROW: u32 = 8;

/// Writes the report to a single xlsx file, replacing it on every call.
pub struct XlsxReportWriter {
    path: PathBuf,
}

impl XlsxReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Renders the whole workbook in memory.
    pub fn render(table: &MarketTable, summary: &AnalysisSummary) -> Result<Vec<u8>, ReportError> {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(data_sheet(table).map_err(layout_error(DATA_SHEET))?);
        workbook.push_worksheet(analysis_sheet(summary).map_err(layout_error(ANALYSIS_SHEET))?);

        workbook
            .save_to_buffer()
            .map_err(|e| ReportError::Layout {
                sheet: "workbook".to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ReportSink for XlsxReportWriter {
    async fn write_report(
        &self,
        table: &MarketTable,
        summary: &AnalysisSummary,
    ) -> Result<(), ReportError> {
        let bytes = Self::render(table, summary)?;
        debug!("XlsxReportWriter: rendered {} bytes", bytes.len());

        // Truncates any previous report in place.
        tokio::fs::write(&self.path, &bytes)
            .await
            .map_err(|e| ReportError::Write {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        info!(
            "Excel file updated successfully: {} ({} rows)",
            self.path.display(),
            table.len()
        );
        Ok(())
    }
}

fn layout_error(sheet: &'static str) -> impl Fn(XlsxError) -> ReportError {
    move |e| ReportError::Layout {
        sheet: sheet.to_string(),
        reason: e.to_string(),
    }
}

fn header_format() -> Format {
    Format::new().set_bold()
}

fn write_header(
    sheet: &mut Worksheet,
    row: u32,
    headers: &[&str],
    format: &Format,
) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, *header, format)?;
    }
    Ok(())
}

fn data_sheet(table: &MarketTable) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(DATA_SHEET)?;

    let header = header_format();
    let price = Format::new().set_num_format("#,##0.00######");
    let whole = Format::new().set_num_format("#,##0");
    let percent = Format::new().set_num_format("0.00");

    write_header(&mut sheet, 0, &DATA_HEADERS, &header)?;

    for (i, record) in table.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &record.name)?;
        sheet.write_string(row, 1, &record.symbol)?;
        sheet.write_number_with_format(row, 2, record.current_price, &price)?;
        sheet.write_number_with_format(row, 3, record.market_cap, &whole)?;
        sheet.write_number_with_format(row, 4, record.total_volume, &whole)?;
        if let Some(change) = record.price_change_percentage_24h {
            sheet.write_number_with_format(row, 5, change, &percent)?;
        }
    }

    sheet.set_column_width(0, 24)?;
    sheet.set_column_width(1, 10)?;
    for col in 2..=5 {
        sheet.set_column_width(col, 22)?;
    }

    Ok(sheet)
}

fn analysis_sheet(summary: &AnalysisSummary) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(ANALYSIS_SHEET)?;

    let header = header_format();
    let whole = Format::new().set_num_format("#,##0");

    write_header(&mut sheet, TOP_BLOCK_ROW, &TOP_HEADERS, &header)?;
    for (i, record) in summary.top_by_market_cap.iter().enumerate() {
        let row = TOP_BLOCK_ROW + 1 + i as u32;
        sheet.write_string(row, 0, &record.name)?;
        sheet.write_number_with_format(row, 1, record.market_cap, &whole)?;
    }

    write_header(&mut sheet, SUMMARY_BLOCK_ROW, &SUMMARY_HEADERS, &header)?;
    let metrics = [
        ("Average Price (USD)", format_usd(summary.average_price)),
        (
            "Highest 24h Change",
            format_change(summary.highest_change.as_ref()),
        ),
        (
            "Lowest 24h Change",
            format_change(summary.lowest_change.as_ref()),
        ),
    ];
    for (i, (label, value)) in metrics.iter().enumerate() {
        let row = SUMMARY_BLOCK_ROW + 1 + i as u32;
        sheet.write_string(row, 0, *label)?;
        sheet.write_string(row, 1, value)?;
    }

    sheet.set_column_width(0, 24)?;
    sheet.set_column_width(1, 28)?;

    Ok(sheet)
}
