// Market data processing
pub mod market_data;

// System orchestrator
pub mod system;
