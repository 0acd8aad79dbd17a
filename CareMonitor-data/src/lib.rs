// CareMonitor Data
// This crate handles data access and external service interactions

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;

// Outgoing email delivery
pub mod mail;

// Spoken reminders
pub mod speech;

// In-memory and recording adapters - only available with mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
