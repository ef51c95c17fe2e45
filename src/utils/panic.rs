//! Panic Capture
//!
//! User callbacks (laws, generator functions) may panic. A panic while
//! sampling counts as a failed check, so it is caught and turned into a
//! message instead of unwinding through the validator.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Runs `f`, returning the panic message if it panicked.
pub fn catch_failure<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(describe_panic)
}

pub fn describe_panic(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked with a non-string payload".to_string()
    }
}
