//! In-memory cloud services for testing.

mod cloud;

pub use cloud::{CallKind, CloudCall, InMemoryCloud, TEST_ACCOUNT_ID};
