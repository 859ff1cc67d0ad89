// In: src/error.rs

//! This module defines the single, unified error type for the entire lamina library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaminaError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// Malformed caller input: mismatched datum lengths, an empty chunk list,
    /// or mixed element types within one chunked datum. Never retried.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    /// A programming-contract violation, e.g. a kernel handing the wrong
    /// number of output segments back to a re-wrap. Fails loudly.
    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    /// A size computation whose inputs are smaller than the fixed overhead
    /// they must cover. Rejected explicitly instead of wrapping around.
    #[error("Arithmetic underflow: {0}")]
    Underflow(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for LaminaError {
    fn from(err: bytemuck::PodCastError) -> Self {
        LaminaError::PodCast(err.to_string())
    }
}
