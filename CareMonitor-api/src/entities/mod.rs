// Public entities for the CareMonitor API
// Response bodies shared across the application boundary

// Error responses
pub mod common;

// Operation responses
pub mod responses;
