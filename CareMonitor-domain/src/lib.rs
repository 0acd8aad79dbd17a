// CareMonitor Domain
// This crate contains the business logic for the CareMonitor application

// Request payload schema checks
pub mod validation;

// Domain entities
pub mod entities;

// Services that implement business logic
pub mod services;

// Health checks and system status
pub mod health;

// Re-export the data layer for convenience
pub use care_monitor_data as data;
