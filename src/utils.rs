// In: src/utils.rs

//! This module provides a set of shared, low-level utility functions used
//! throughout the lamina Rust core.
//!
//! Its primary responsibilities include:
//! 1.  Providing safe, validated conversions between raw byte slices and typed slices.
//! 2.  Keeping every byte reinterpretation behind `bytemuck`'s checked casts so
//!     the rest of the crate never touches raw pointers.

use crate::error::LaminaError;

//==================================================================================
// 1. Core Utility Functions
//==================================================================================

/// Safely reinterprets a byte slice as a slice of a plain-old-data type.
///
/// This is the gateway for turning raw page bytes into a workable, typed
/// slice. The view is zero-copy; the cast is rejected if the byte length is
/// not a multiple of `size_of::<T>()` or the slice is misaligned for `T`.
///
/// # Errors
/// Returns `LaminaError::PodCast` describing the length or alignment problem.
pub fn safe_bytes_to_typed_slice<T: bytemuck::Pod>(bytes: &[u8]) -> Result<&[T], LaminaError> {
    Ok(bytemuck::try_cast_slice(bytes)?)
}

/// Converts a slice of plain-old-data values into an owned `Vec<u8>`.
///
/// This performs a memory copy. Byte order is the machine's native order,
/// which for every supported target of this crate is little-endian.
pub fn typed_slice_to_bytes<T: bytemuck::Pod>(data: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}
