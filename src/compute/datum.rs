// In: src/compute/datum.rs

//! This module defines the `Datum` value handed to every compute operation:
//! either one contiguous array or an ordered sequence of chunks presented as
//! a single logical column.
//!
//! Chunk boundaries are a storage/performance detail. Nothing downstream may
//! treat them as meaningful; the dispatcher exists precisely to hide them.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;

use crate::error::LaminaError;

//==================================================================================
// 1. ChunkedArray
//==================================================================================

/// An ordered sequence of same-typed array segments forming one logical column.
///
/// The logical value is the concatenation of the chunks in order. Two
/// invariants are enforced at construction and hold for the lifetime of the
/// value: the chunk list is never empty, and every chunk shares one element
/// type. The total length is computed once and cached.
#[derive(Debug, Clone)]
pub struct ChunkedArray {
    chunks: Vec<ArrayRef>,
    data_type: DataType,
    length: usize,
}

impl ChunkedArray {
    /// Builds a chunked array from an ordered list of segments.
    ///
    /// # Errors
    /// `LaminaError::InvalidInput` if the list is empty or the segments do
    /// not all share one element type.
    pub fn try_new(chunks: Vec<ArrayRef>) -> Result<Self, LaminaError> {
        let first = chunks.first().ok_or_else(|| {
            LaminaError::InvalidInput("a chunked array requires at least one chunk".to_string())
        })?;
        let data_type = first.data_type().clone();
        for (i, chunk) in chunks.iter().enumerate().skip(1) {
            if chunk.data_type() != &data_type {
                return Err(LaminaError::InvalidInput(format!(
                    "chunk {} has type {}, but chunk 0 has type {}",
                    i,
                    chunk.data_type(),
                    data_type
                )));
            }
        }
        let length = chunks.iter().map(|chunk| chunk.len()).sum();
        Ok(Self {
            chunks,
            data_type,
            length,
        })
    }

    /// Total logical length in elements (sum of all chunk lengths).
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Borrow chunk `i`. Panics on out-of-range, like any slice index.
    pub fn chunk(&self, i: usize) -> &ArrayRef {
        &self.chunks[i]
    }

    pub fn chunks(&self) -> &[ArrayRef] {
        &self.chunks
    }

    /// The element type shared by every chunk.
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }
}

//==================================================================================
// 2. Datum
//==================================================================================

/// A value that is either a single contiguous array or a chunked array.
///
/// This is a closed sum: every consumption site in the crate matches both
/// variants exhaustively, so there is no "unknown datum kind" fallback
/// anywhere.
#[derive(Debug, Clone)]
pub enum Datum {
    /// One contiguous array.
    Array(ArrayRef),
    /// An ordered sequence of same-typed chunks.
    Chunked(Arc<ChunkedArray>),
}

impl Datum {
    /// Total logical length in elements.
    pub fn length(&self) -> usize {
        match self {
            Datum::Array(array) => array.len(),
            Datum::Chunked(chunked) => chunked.length(),
        }
    }

    /// The element type of the datum's values.
    pub fn data_type(&self) -> &DataType {
        match self {
            Datum::Array(array) => array.data_type(),
            Datum::Chunked(chunked) => chunked.data_type(),
        }
    }

    /// The datum's segments in order: a one-element slice for a single array,
    /// the full chunk list for a chunked array.
    pub fn chunks(&self) -> &[ArrayRef] {
        match self {
            Datum::Array(array) => std::slice::from_ref(array),
            Datum::Chunked(chunked) => chunked.chunks(),
        }
    }

    /// True when the datum is chunked. Output shaping mirrors this flag of
    /// the left operand.
    pub fn is_chunked(&self) -> bool {
        matches!(self, Datum::Chunked(_))
    }
}

// ERGONOMICS: most call sites hold a plain `ArrayRef` or a freshly built
// `ChunkedArray`; these conversions keep the dispatcher entry points tidy.
impl From<ArrayRef> for Datum {
    fn from(array: ArrayRef) -> Self {
        Datum::Array(array)
    }
}

impl From<ChunkedArray> for Datum {
    fn from(chunked: ChunkedArray) -> Self {
        Datum::Chunked(Arc::new(chunked))
    }
}
