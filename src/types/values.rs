// In: src/types/values.rs

//! This module defines the borrowed value views for the variable-length
//! physical kinds, the legacy 96-bit timestamp struct, and the formatter
//! that renders raw statistic bytes as human-readable strings.
//!
//! The views borrow their bytes from the owning page or statistics buffer;
//! nothing here copies value data.

use crate::error::LaminaError;
use crate::types::physical_type::PhysicalType;
use bytemuck::{Pod, Zeroable};
use std::fmt;

//==================================================================================
// 1. Calendar Constants
//==================================================================================

/// Julian day number of the Unix epoch, 1970-01-01.
pub const JULIAN_DAY_OF_EPOCH: i64 = 2_440_588;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const MILLISECONDS_PER_DAY: i64 = SECONDS_PER_DAY * 1_000;
pub const MICROSECONDS_PER_DAY: i64 = MILLISECONDS_PER_DAY * 1_000;
pub const NANOSECONDS_PER_DAY: i64 = MICROSECONDS_PER_DAY * 1_000;

//==================================================================================
// 2. Variable-Length Value Views
//==================================================================================

/// A borrowed view over one variable-length value. Equality is bytewise.
///
/// The on-disk format caps a single value's length at `u32::MAX` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteArray<'a> {
    data: &'a [u8],
}

impl<'a> ByteArray<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        debug_assert!(data.len() <= u32::MAX as usize);
        Self { data }
    }

    pub fn len(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Reinterprets the bytes as UTF-8 without copying.
    pub fn as_utf8(&self) -> Result<&'a str, LaminaError> {
        std::str::from_utf8(self.data).map_err(|e| {
            LaminaError::InvalidInput(format!("byte array is not valid UTF-8: {}", e))
        })
    }
}

/// Renders the bytes as a (lossy) UTF-8 string for diagnostics.
impl fmt::Display for ByteArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.data))
    }
}

/// A borrowed view over one fixed-length value. The width is declared by the
/// column, so the view itself carries no separate length field beyond the
/// slice it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FixedLenByteArray<'a> {
    data: &'a [u8],
}

impl<'a> FixedLenByteArray<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// Renders the bytes as a (lossy) UTF-8 string for diagnostics.
impl fmt::Display for FixedLenByteArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.data))
    }
}

//==================================================================================
// 3. The 96-Bit Timestamp
//==================================================================================

/// The legacy 96-bit timestamp value.
///
/// Layout invariant: words 0 and 1 hold the nanoseconds elapsed within the
/// day as a little-endian `u64`, and word 2 holds the Julian day number.
/// The struct is plain-old-data so a column of them can be cast directly
/// to and from its byte buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Int96 {
    value: [u32; 3],
}

impl Int96 {
    pub fn new(elem0: u32, elem1: u32, elem2: u32) -> Self {
        Self {
            value: [elem0, elem1, elem2],
        }
    }

    /// Builds the value from nanoseconds since the Unix epoch.
    ///
    /// Pre-epoch instants use Euclidean division, so they land on the
    /// correct (earlier) Julian day with a non-negative nanoseconds-of-day.
    pub fn from_nanoseconds(nanos_since_epoch: i64) -> Self {
        let days = nanos_since_epoch.div_euclid(NANOSECONDS_PER_DAY);
        let nanos_of_day = nanos_since_epoch.rem_euclid(NANOSECONDS_PER_DAY) as u64;
        let julian_day = (JULIAN_DAY_OF_EPOCH + days) as u32;
        Self {
            value: [nanos_of_day as u32, (nanos_of_day >> 32) as u32, julian_day],
        }
    }

    pub fn data(&self) -> &[u32; 3] {
        &self.value
    }

    pub fn set_data(&mut self, elem0: u32, elem1: u32, elem2: u32) {
        self.value = [elem0, elem1, elem2];
    }

    pub fn seconds(&self) -> i64 {
        let (days, nanos_of_day) = self.split();
        days.wrapping_sub(JULIAN_DAY_OF_EPOCH)
            .wrapping_mul(SECONDS_PER_DAY)
            .wrapping_add(nanos_of_day / 1_000_000_000)
    }

    pub fn milliseconds(&self) -> i64 {
        let (days, nanos_of_day) = self.split();
        days.wrapping_sub(JULIAN_DAY_OF_EPOCH)
            .wrapping_mul(MILLISECONDS_PER_DAY)
            .wrapping_add(nanos_of_day / 1_000_000)
    }

    pub fn microseconds(&self) -> i64 {
        let (days, nanos_of_day) = self.split();
        days.wrapping_sub(JULIAN_DAY_OF_EPOCH)
            .wrapping_mul(MICROSECONDS_PER_DAY)
            .wrapping_add(nanos_of_day / 1_000)
    }

    pub fn nanoseconds(&self) -> i64 {
        let (days, nanos_of_day) = self.split();
        days.wrapping_sub(JULIAN_DAY_OF_EPOCH)
            .wrapping_mul(NANOSECONDS_PER_DAY)
            .wrapping_add(nanos_of_day)
    }

    fn split(&self) -> (i64, i64) {
        let days = self.value[2] as i64;
        let nanos_of_day = ((self.value[1] as u64) << 32 | self.value[0] as u64) as i64;
        (days, nanos_of_day)
    }
}

/// Renders the three raw words, space-separated. This is the canonical
/// statistics representation for the kind, whose comparison is undefined.
impl fmt::Display for Int96 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.value[0], self.value[1], self.value[2])
    }
}

//==================================================================================
// 4. Statistics Formatting
//==================================================================================

/// Renders the raw bytes of a min/max statistic as a human-readable string.
///
/// Fixed-width kinds require the exact encoded width; anything else is
/// rejected rather than reinterpreted. The byte-array kinds render as a
/// lossy UTF-8 string of whatever bytes were stored.
pub fn format_stat_value(physical: PhysicalType, raw: &[u8]) -> Result<String, LaminaError> {
    match physical {
        PhysicalType::Boolean => {
            check_stat_width(physical, raw)?;
            Ok(if raw[0] != 0 { "true" } else { "false" }.to_string())
        }
        PhysicalType::Int32 => {
            check_stat_width(physical, raw)?;
            Ok(bytemuck::try_pod_read_unaligned::<i32>(raw)?.to_string())
        }
        PhysicalType::Int64 => {
            check_stat_width(physical, raw)?;
            Ok(bytemuck::try_pod_read_unaligned::<i64>(raw)?.to_string())
        }
        PhysicalType::Int96 => {
            check_stat_width(physical, raw)?;
            Ok(bytemuck::try_pod_read_unaligned::<Int96>(raw)?.to_string())
        }
        PhysicalType::Float => {
            check_stat_width(physical, raw)?;
            Ok(bytemuck::try_pod_read_unaligned::<f32>(raw)?.to_string())
        }
        PhysicalType::Double => {
            check_stat_width(physical, raw)?;
            Ok(bytemuck::try_pod_read_unaligned::<f64>(raw)?.to_string())
        }
        PhysicalType::ByteArray | PhysicalType::FixedLenByteArray => {
            Ok(String::from_utf8_lossy(raw).into_owned())
        }
    }
}

fn check_stat_width(physical: PhysicalType, raw: &[u8]) -> Result<(), LaminaError> {
    let expected = physical.byte_size()?;
    if raw.len() != expected {
        return Err(LaminaError::InvalidInput(format!(
            "a {} statistic must be exactly {} bytes, got {}",
            physical,
            expected,
            raw.len()
        )));
    }
    Ok(())
}
