//! Utilities shared by every backing-store connector

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{Attempted, RetryConfig, RetryExhausted, retry_counted};
