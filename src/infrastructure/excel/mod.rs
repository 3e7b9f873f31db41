pub mod xlsx_writer;

pub use xlsx_writer::XlsxReportWriter;
