// In: src/compute/mod.rs

//! This module serves as the public API for the kernel-invocation layer of
//! the lamina Rust core.
//!
//! It owns the structural side of computation: the `Datum` shape over
//! contiguous and chunked columns, the dispatcher that aligns mismatched
//! chunk boundaries so kernels only ever see flat arrays, and the allocating
//! decorator that owns output buffer lifecycle for boolean-producing kernels.
//!
//! This module is PURE RUST and performs no I/O; everything operates on
//! in-memory, read-only array views.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// The allocating decorator and pre-allocated output buffers for boolean kernels.
pub mod allocate;
/// The `Datum` sum type and the checked `ChunkedArray` container.
pub mod datum;
/// Kernel traits, unary/binary invocation, and shape-mirroring re-wrap helpers.
pub mod dispatch;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
// Other parts of the crate (and downstream users) should interact with the
// compute layer through these re-exported items.

pub use allocate::{allocate_bitmap, AllocatingBooleanKernel, BooleanFillKernel, BooleanOutput};
pub use datum::{ChunkedArray, Datum};
pub use dispatch::{
    invoke_binary_array_kernel, invoke_binary_array_kernel_as_datum, invoke_unary_array_kernel,
    wrap_arrays_like, wrap_datums_like, BinaryKernel, UnaryKernel,
};

//==================================================================================
// 3. Unit Tests (Module-level integration tests)
//==================================================================================
