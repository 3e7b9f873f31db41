pub mod coingecko;
pub mod core;
pub mod excel;

pub use coingecko::CoinGeckoClient;
pub use excel::XlsxReportWriter;
