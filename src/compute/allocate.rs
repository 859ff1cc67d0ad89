// In: src/compute/allocate.rs

//! This module contains the allocating decorator for boolean-producing
//! kernels: it pre-allocates the output validity/value bitmap pair sized to
//! the input, hands them to a fill kernel, and assembles the finished array.
//!
//! Keeping allocation out of the fill kernels means every boolean compute op
//! is written as pure bit-setting over buffers it does not own, and the
//! buffer lifecycle lives in exactly one place.

use arrow::array::{make_array, Array, ArrayData, ArrayRef};
use arrow::buffer::{Buffer, MutableBuffer};
use arrow::datatypes::DataType;
use arrow::util::bit_util;

use crate::compute::dispatch::UnaryKernel;
use crate::error::LaminaError;

//==================================================================================
// 1. Bitmap Allocation
//==================================================================================

/// Allocates a zeroed bitmap wide enough for `len` bits.
pub fn allocate_bitmap(len: usize) -> MutableBuffer {
    let mut buffer = MutableBuffer::from_len_zeroed(bit_util::ceil(len, 8));
    // Bits past the logical length must read as unset. The partial last byte
    // is forced to zero here regardless of what the allocation path did, so
    // word-aligned scans never see stale trailing bits.
    zero_last_byte(&mut buffer);
    buffer
}

fn zero_last_byte(buffer: &mut MutableBuffer) {
    if let Some(last) = buffer.as_slice_mut().last_mut() {
        *last = 0;
    }
}

//==================================================================================
// 2. The Pre-Allocated Output Pair
//==================================================================================

/// The output buffer set handed to a [`BooleanFillKernel`]: an optional fresh
/// validity bitmap and a value bitmap, both zeroed and sized to the input.
///
/// The validity bitmap is `None` when the input starts at offset zero; in
/// that case the input's own validity buffer is shared zero-copy at assembly
/// time and the fill kernel has nothing to do for validity. A sliced input
/// (offset != 0) gets a fresh bitmap that the fill kernel must populate,
/// re-aligned to bit zero, normally via [`BooleanOutput::copy_validity_from`].
pub struct BooleanOutput {
    len: usize,
    validity: Option<MutableBuffer>,
    values: MutableBuffer,
}

impl BooleanOutput {
    /// Logical length in elements of the output being filled.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when a fresh validity bitmap was allocated for this output.
    pub fn has_validity_bitmap(&self) -> bool {
        self.validity.is_some()
    }

    /// Sets value bit `i`. All value bits start unset.
    pub fn set_value_bit(&mut self, i: usize) {
        debug_assert!(i < self.len);
        bit_util::set_bit(self.values.as_slice_mut(), i);
    }

    /// Copies the input's validity bits into the fresh validity bitmap,
    /// re-aligned to bit zero. A no-op when the bitmap is shared zero-copy.
    pub fn copy_validity_from(&mut self, input: &ArrayRef) {
        if let Some(bitmap) = &mut self.validity {
            let dest = bitmap.as_slice_mut();
            match input.nulls() {
                Some(nulls) => {
                    for i in 0..input.len() {
                        if nulls.is_valid(i) {
                            bit_util::set_bit(dest, i);
                        }
                    }
                }
                None => {
                    for i in 0..input.len() {
                        bit_util::set_bit(dest, i);
                    }
                }
            }
        }
    }

    /// Assembles the filled buffers into a boolean array.
    fn into_array(self, input: &ArrayRef) -> Result<ArrayRef, LaminaError> {
        let BooleanOutput {
            len,
            validity,
            values,
        } = self;
        let nulls = match validity {
            Some(bitmap) => Some(Buffer::from(bitmap)),
            // Zero-copy share of the input's validity buffer.
            None => input.nulls().map(|nulls| nulls.buffer().clone()),
        };
        let data = ArrayData::try_new(
            DataType::Boolean,
            len,
            nulls,
            0,
            vec![Buffer::from(values)],
            vec![],
        )?;
        Ok(make_array(data))
    }
}

//==================================================================================
// 3. The Allocating Decorator
//==================================================================================

/// The fill contract: compute value (and, when present, validity) bits into a
/// pre-allocated [`BooleanOutput`]. Fill kernels never allocate.
pub trait BooleanFillKernel {
    fn fill(&self, input: &ArrayRef, out: &mut BooleanOutput) -> Result<(), LaminaError>;
}

// ERGONOMICS: closures work as fill kernels, mirroring the dispatch traits.
impl<F> BooleanFillKernel for F
where
    F: Fn(&ArrayRef, &mut BooleanOutput) -> Result<(), LaminaError>,
{
    fn fill(&self, input: &ArrayRef, out: &mut BooleanOutput) -> Result<(), LaminaError> {
        self(input, out)
    }
}

/// Decorates a [`BooleanFillKernel`] into a full [`UnaryKernel`]: allocates
/// the output buffer pair, delegates the fill, and assembles the array.
pub struct AllocatingBooleanKernel<K> {
    delegate: K,
}

impl<K> AllocatingBooleanKernel<K> {
    pub fn new(delegate: K) -> Self {
        Self { delegate }
    }
}

impl<K: BooleanFillKernel> UnaryKernel for AllocatingBooleanKernel<K> {
    fn call(&self, input: &ArrayRef) -> Result<ArrayRef, LaminaError> {
        let len = input.len();

        // At offset zero the input's validity buffer can be shared zero-copy,
        // so no fresh bitmap is allocated. A sliced input needs its validity
        // re-aligned to bit zero, which requires a fresh bitmap.
        let validity = if input.offset() == 0 {
            None
        } else {
            Some(allocate_bitmap(len))
        };
        let values = allocate_bitmap(len);

        let mut out = BooleanOutput {
            len,
            validity,
            values,
        };
        self.delegate.fill(input, &mut out)?;
        out.into_array(input)
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::datum::{ChunkedArray, Datum};
    use crate::compute::dispatch::invoke_unary_array_kernel;
    use arrow::array::BooleanArray;
    use std::sync::Arc;

    /// Elementwise boolean negation: the canonical shape of a fill kernel.
    /// Validity is propagated; value bits at null positions stay unset.
    struct InvertFill;

    impl BooleanFillKernel for InvertFill {
        fn fill(&self, input: &ArrayRef, out: &mut BooleanOutput) -> Result<(), LaminaError> {
            let bools = input
                .as_any()
                .downcast_ref::<BooleanArray>()
                .ok_or_else(|| {
                    LaminaError::UnsupportedType(format!(
                        "invert expects Boolean, got {}",
                        input.data_type()
                    ))
                })?;
            out.copy_validity_from(input);
            for i in 0..bools.len() {
                if bools.is_valid(i) && !bools.value(i) {
                    out.set_value_bit(i);
                }
            }
            Ok(())
        }
    }

    fn as_bools(array: &ArrayRef) -> &BooleanArray {
        array.as_any().downcast_ref::<BooleanArray>().unwrap()
    }

    #[test]
    fn test_allocate_bitmap_width() {
        assert_eq!(allocate_bitmap(0).len(), 0);
        assert_eq!(allocate_bitmap(1).len(), 1);
        assert_eq!(allocate_bitmap(8).len(), 1);
        assert_eq!(allocate_bitmap(9).len(), 2);
        assert!(allocate_bitmap(16).as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invert_offset_zero_shares_validity() {
        let input: ArrayRef = Arc::new(BooleanArray::from(vec![
            Some(true),
            None,
            Some(false),
            Some(true),
        ]));
        let kernel = AllocatingBooleanKernel::new(InvertFill);
        let result = kernel.call(&input).unwrap();
        let result = as_bools(&result);

        assert_eq!(result.len(), 4);
        assert!(!result.value(0));
        assert!(result.is_null(1));
        assert!(result.value(2));
        assert!(!result.value(3));
        assert_eq!(result.null_count(), 1);
    }

    #[test]
    fn test_invert_without_nulls_produces_no_nulls() {
        let input: ArrayRef = Arc::new(BooleanArray::from(vec![true, false, true]));
        let kernel = AllocatingBooleanKernel::new(InvertFill);
        let result = kernel.call(&input).unwrap();
        let result = as_bools(&result);

        assert_eq!(result.null_count(), 0);
        assert_eq!(
            (0..3).map(|i| result.value(i)).collect::<Vec<_>>(),
            vec![false, true, false]
        );
    }

    #[test]
    fn test_invert_sliced_input_reallocates_validity() {
        let full: ArrayRef = Arc::new(BooleanArray::from(vec![
            Some(true),
            Some(true),
            Some(false),
            None,
            Some(true),
        ]));
        // Slice [2..5]: offset is no longer zero, so the decorator must build
        // a fresh, re-aligned validity bitmap.
        let sliced = full.slice(2, 3);
        assert_ne!(sliced.offset(), 0);

        let kernel = AllocatingBooleanKernel::new(InvertFill);
        let result = kernel.call(&sliced).unwrap();
        let result = as_bools(&result);

        assert_eq!(result.len(), 3);
        assert!(result.value(0)); // invert of false
        assert!(result.is_null(1));
        assert!(!result.value(2)); // invert of true
        assert_eq!(result.null_count(), 1);
    }

    #[test]
    fn test_decorator_composes_with_unary_dispatch() {
        let chunked = ChunkedArray::try_new(vec![
            Arc::new(BooleanArray::from(vec![true, false])) as ArrayRef,
            Arc::new(BooleanArray::from(vec![Some(false), None])) as ArrayRef,
        ])
        .unwrap();
        let value = Datum::from(chunked);

        let kernel = AllocatingBooleanKernel::new(InvertFill);
        let outputs = invoke_unary_array_kernel(&kernel, &value).unwrap();

        assert_eq!(outputs.len(), 2);
        let first = as_bools(&outputs[0]);
        assert!(!first.value(0));
        assert!(first.value(1));
        let second = as_bools(&outputs[1]);
        assert!(second.value(0));
        assert!(second.is_null(1));
    }

    #[test]
    fn test_zero_length_input() {
        let input: ArrayRef = Arc::new(BooleanArray::from(Vec::<bool>::new()));
        let kernel = AllocatingBooleanKernel::new(InvertFill);
        let result = kernel.call(&input).unwrap();
        assert_eq!(result.len(), 0);
        assert_eq!(result.null_count(), 0);
    }
}
