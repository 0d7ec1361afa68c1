//! HTTP API handlers for tsa-api

pub mod analyze;
pub mod batch;
pub mod body;
pub mod health;
pub mod info;
pub mod special;

pub use analyze::analyze_text;
pub use batch::analyze_batch;
pub use health::health_routes;
pub use info::{analyze_usage, service_info};
pub use special::run_special_cases;
