// In: src/compute/dispatch.rs

//! This module is the kernel-invocation layer: it applies single-array kernels
//! across datums that may be chunked, without the kernels ever learning that
//! chunking exists.
//!
//! ARCHITECTURAL NOTE: every compute operation in the surrounding system is
//! written once, against a flat array (or a flat pair). The dispatcher owns
//! the structural problem instead: it resolves each datum to an ordered chunk
//! list, walks both lists with independent cursors, and hands the kernel
//! zero-copy slices covering exactly the overlap of the two current chunks.
//! Re-chunking cost is therefore paid only at alignment boundaries, never by
//! materializing a full concatenated column.

use arrow::array::{Array, ArrayRef};
use arrow::compute::concat;

use crate::compute::datum::{ChunkedArray, Datum};
use crate::error::LaminaError;

//==================================================================================
// 1. Kernel Contracts
//==================================================================================

/// A compute operation over one flat array.
///
/// Implementations must be oblivious to chunking; the dispatcher guarantees
/// the input is a single contiguous (possibly sliced) array.
pub trait UnaryKernel {
    fn call(&self, input: &ArrayRef) -> Result<ArrayRef, LaminaError>;
}

/// A compute operation over a pair of flat arrays of equal length.
pub trait BinaryKernel {
    fn call(&self, left: &ArrayRef, right: &ArrayRef) -> Result<ArrayRef, LaminaError>;
}

// ERGONOMICS: plain closures are kernels. Tests and one-off callers can pass
// `|a, b| ...` without defining a struct.
impl<F> UnaryKernel for F
where
    F: Fn(&ArrayRef) -> Result<ArrayRef, LaminaError>,
{
    fn call(&self, input: &ArrayRef) -> Result<ArrayRef, LaminaError> {
        self(input)
    }
}

impl<F> BinaryKernel for F
where
    F: Fn(&ArrayRef, &ArrayRef) -> Result<ArrayRef, LaminaError>,
{
    fn call(&self, left: &ArrayRef, right: &ArrayRef) -> Result<ArrayRef, LaminaError> {
        self(left, right)
    }
}

//==================================================================================
// 2. Unary Invocation
//==================================================================================

/// Applies `kernel` across `value`, one call per segment.
///
/// A single array produces a one-element output list; a chunked array
/// produces one output per chunk, in chunk order.
pub fn invoke_unary_array_kernel<K>(
    kernel: &K,
    value: &Datum,
) -> Result<Vec<ArrayRef>, LaminaError>
where
    K: UnaryKernel + ?Sized,
{
    match value {
        Datum::Array(array) => Ok(vec![kernel.call(array)?]),
        Datum::Chunked(chunked) => {
            let mut outputs = Vec::with_capacity(chunked.num_chunks());
            for chunk in chunked.chunks() {
                outputs.push(kernel.call(chunk)?);
            }
            Ok(outputs)
        }
    }
}

//==================================================================================
// 3. Binary Invocation (The Alignment Walk)
//==================================================================================

/// Applies `kernel` across two datums whose chunk boundaries may disagree.
///
/// Both sides are resolved to ordered chunk lists and walked simultaneously
/// with independent cursors. Each step covers `min(remaining in left's
/// current chunk, remaining in right's current chunk)` elements, sliced
/// zero-copy from both sides, so the kernel always sees two flat arrays of
/// equal length. The output carries one segment per distinct alignment
/// boundary; it can have more segments than either input when boundaries
/// interleave.
///
/// # Errors
/// `LaminaError::InvalidInput` when the total lengths differ. Chunk
/// boundaries are free to differ; totals are not.
pub fn invoke_binary_array_kernel<K>(
    kernel: &K,
    left: &Datum,
    right: &Datum,
) -> Result<Vec<ArrayRef>, LaminaError>
where
    K: BinaryKernel + ?Sized,
{
    let left_length = left.length();
    let right_length = right.length();
    if right_length != left_length {
        return Err(LaminaError::InvalidInput(format!(
            "left and right datums have different lengths: left is {}, right is {}",
            left_length, right_length
        )));
    }

    let left_arrays = left.chunks();
    let right_arrays = right.chunks();

    // Zero total length still performs one call on an empty slice pair, so the
    // output list is never empty and re-wrapping stays uniform downstream.
    if left_length == 0 {
        let left_op = left_arrays[0].slice(0, 0);
        let right_op = right_arrays[0].slice(0, 0);
        return Ok(vec![kernel.call(&left_op, &right_op)?]);
    }

    let mut outputs = Vec::new();
    let mut left_chunk_idx = 0;
    let mut left_start_idx = 0;
    let mut right_chunk_idx = 0;
    let mut right_start_idx = 0;

    let mut elements_processed = 0;
    while elements_processed < left_length {
        let left_array = &left_arrays[left_chunk_idx];
        let right_array = &right_arrays[right_chunk_idx];
        let common_length = usize::min(
            left_array.len() - left_start_idx,
            right_array.len() - right_start_idx,
        );

        let left_op = left_array.slice(left_start_idx, common_length);
        let right_op = right_array.slice(right_start_idx, common_length);
        outputs.push(kernel.call(&left_op, &right_op)?);

        elements_processed += common_length;

        // If we have exhausted the current chunk, proceed to the next one
        // individually for each side.
        if left_start_idx + common_length == left_array.len() {
            left_chunk_idx += 1;
            left_start_idx = 0;
        } else {
            left_start_idx += common_length;
        }

        if right_start_idx + common_length == right_array.len() {
            right_chunk_idx += 1;
            right_start_idx = 0;
        } else {
            right_start_idx += common_length;
        }
    }

    log::trace!(
        "binary dispatch: {} x {} input chunks -> {} aligned segments ({} elements)",
        left_arrays.len(),
        right_arrays.len(),
        outputs.len(),
        left_length
    );
    log_metric!(
        "event" = "binary_dispatch",
        "left_chunks" = &left_arrays.len(),
        "right_chunks" = &right_arrays.len(),
        "segments" = &outputs.len(),
        "elements" = &left_length
    );

    Ok(outputs)
}

/// The datum-returning form of [`invoke_binary_array_kernel`]: re-assembles
/// the output segments into the structural shape of `left`.
///
/// When `left` is a single array but alignment against a chunked `right`
/// produced several segments, the segments are concatenated into one
/// contiguous array first; a caller holding a flat column always gets a flat
/// column back.
pub fn invoke_binary_array_kernel_as_datum<K>(
    kernel: &K,
    left: &Datum,
    right: &Datum,
) -> Result<Datum, LaminaError>
where
    K: BinaryKernel + ?Sized,
{
    let outputs = invoke_binary_array_kernel(kernel, left, right)?;
    match left {
        Datum::Array(_) if outputs.len() > 1 => {
            let segments: Vec<&dyn Array> = outputs.iter().map(|array| array.as_ref()).collect();
            let merged = concat(&segments)?;
            wrap_arrays_like(left, vec![merged])
        }
        _ => wrap_arrays_like(left, outputs),
    }
}

//==================================================================================
// 4. Re-wrapping Helpers
//==================================================================================

/// Wraps a list of output arrays into a datum whose shape mirrors `shape`.
///
/// A single-array shape demands exactly one output array; anything else is a
/// kernel-side programming defect and fails the internal consistency check
/// loudly rather than silently picking an element.
pub fn wrap_arrays_like(shape: &Datum, arrays: Vec<ArrayRef>) -> Result<Datum, LaminaError> {
    match shape {
        Datum::Array(_) => {
            let [array]: [ArrayRef; 1] = arrays.try_into().map_err(|arrays: Vec<ArrayRef>| {
                LaminaError::InternalError(format!(
                    "wrapping into a single-array datum requires exactly 1 segment, got {}",
                    arrays.len()
                ))
            })?;
            Ok(Datum::Array(array))
        }
        Datum::Chunked(_) => Ok(Datum::from(ChunkedArray::try_new(arrays)?)),
    }
}

/// Like [`wrap_arrays_like`], but over already-wrapped datums.
///
/// Every element must itself be a single array; a chunked element inside the
/// output list is a kernel-side defect.
pub fn wrap_datums_like(shape: &Datum, datums: Vec<Datum>) -> Result<Datum, LaminaError> {
    match shape {
        Datum::Array(_) => {
            let [datum]: [Datum; 1] = datums.try_into().map_err(|datums: Vec<Datum>| {
                LaminaError::InternalError(format!(
                    "wrapping into a single-array datum requires exactly 1 segment, got {}",
                    datums.len()
                ))
            })?;
            match datum {
                Datum::Array(_) => Ok(datum),
                Datum::Chunked(_) => Err(LaminaError::InternalError(
                    "a single-array-shaped result must itself be a single array".to_string(),
                )),
            }
        }
        Datum::Chunked(_) => {
            let mut arrays = Vec::with_capacity(datums.len());
            for (i, datum) in datums.into_iter().enumerate() {
                match datum {
                    Datum::Array(array) => arrays.push(array),
                    Datum::Chunked(_) => {
                        return Err(LaminaError::InternalError(format!(
                            "output {} is chunked; kernel outputs must be single arrays",
                            i
                        )));
                    }
                }
            }
            Ok(Datum::from(ChunkedArray::try_new(arrays)?))
        }
    }
}
