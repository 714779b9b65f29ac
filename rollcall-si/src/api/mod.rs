//! HTTP API handlers for rollcall-si

pub mod health;
pub mod scan;

pub use health::health_routes;
pub use scan::{get_scan_queue, post_scan};
