//! Error type for configuration and mask registration.

/// Errors surfaced by configuration and mask registration.
///
/// Dispatch itself is infallible: a call either reaches a sink method or is
/// a silent no-op when the sink reference is absent. Only the operations
/// that mutate crate or wrapper state report failures.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The process-wide location format slot was already configured.
    #[error("location format already configured")]
    LocationFormatSet,
    /// Mask values must be non-empty; an empty pattern would match between
    /// every pair of characters.
    #[error("mask value must not be empty")]
    EmptyMaskValue,
    /// The combined mask replacer failed to compile, typically because the
    /// accumulated pattern exceeds the regex size limit.
    #[error("mask replacer failed to compile: {0}")]
    MaskCompile(#[from] regex::Error),
}
