// Market data processing modules
pub mod analyzer;
pub mod transformer;
