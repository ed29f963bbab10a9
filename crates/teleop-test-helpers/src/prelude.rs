//! Convenience re-exports for common test utilities.

pub use crate::must::{must, must_err, must_some, must_with};

#[cfg(feature = "mock")]
pub use crate::mock::{MockProbe, MockTransport, RecordingSink};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
