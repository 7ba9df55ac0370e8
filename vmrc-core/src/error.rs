/// Errors produced by the `vmrc-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A call result had a different shape than the caller expected.
    #[error("expected {expected} value, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },

    /// An integer result did not fit the expected width.
    #[error("integer value {value} does not fit {expected}")]
    IntegerRange { expected: &'static str, value: i64 },
}
