// CareMonitor-api lib.rs
//
// HTTP surface of CareMonitor: router, handlers, response entities and
// OpenAPI documentation.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
