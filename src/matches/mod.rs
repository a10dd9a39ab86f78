//! Match documents: where they come from and which ones count
//!
//! This module provides the sources that supply raw match documents and the
//! validation stage that turns finished ones into engine input.

pub mod source;
pub mod validation;

// Re-export commonly used types
pub use source::{InMemoryMatchSource, JsonFileMatchSource, MatchSource};
pub use validation::{collect_eligible, Eligibility, SkippedRecord, ValidationPolicy, MAX_GOALS};
