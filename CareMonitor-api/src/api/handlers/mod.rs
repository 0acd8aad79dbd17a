pub mod fall_alert;
pub mod health;
pub mod health_data;
pub mod pages;
pub mod reminder;

// Re-export handlers for easier imports
pub use fall_alert::send_fall_alert;
pub use health::health_check;
pub use health_data::submit_health_data;
pub use pages::{index, profile};
pub use reminder::send_reminder;
