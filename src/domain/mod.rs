// Market snapshot domain
pub mod market;

// Derived statistics over a market table
pub mod analysis;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
