//! Utils Module
pub mod panic;
pub mod telemetry;
pub mod truncate;

pub use telemetry::init_tracing;
pub use truncate::{render_values, truncate_text};
