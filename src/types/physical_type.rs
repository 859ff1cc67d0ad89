// In: src/types/physical_type.rs

//! This module defines the canonical, type-safe representation of the
//! physical storage types and their metadata: display names, byte widths,
//! and the sort-order classification used for statistics comparison.
//!
//! The enums mirror the columnar file format's metadata model, including its
//! historical discriminant numbering. The string representations and the
//! numbering are part of the on-disk/diagnostic contract and must stay
//! stable across versions.

use crate::error::LaminaError;
use arrow::datatypes::{DataType as ArrowDataType, TimeUnit};
use serde::{Deserialize, Serialize};
use std::fmt;

//==================================================================================
// 1. Physical Types
//==================================================================================

/// The physical storage kind of a column: how individual values are laid out
/// in bytes, independent of any semantic annotation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhysicalType {
    Boolean = 0,
    Int32 = 1,
    Int64 = 2,
    /// Legacy 96-bit timestamp storage: two 32-bit words of nanoseconds-of-day
    /// followed by a 32-bit Julian day number.
    Int96 = 3,
    Float = 4,
    Double = 5,
    ByteArray = 6,
    FixedLenByteArray = 7,
}

impl PhysicalType {
    /// Converts an Arrow `DataType` into the physical storage kind.
    ///
    /// `FixedSizeBinary` maps to `FixedLenByteArray` with its width dropped;
    /// the width travels separately through column metadata. Nanosecond
    /// timestamps map to the legacy `Int96` storage.
    pub fn from_arrow_type(arrow_type: &ArrowDataType) -> Result<Self, LaminaError> {
        match arrow_type {
            ArrowDataType::Boolean => Ok(Self::Boolean),
            ArrowDataType::Int32 => Ok(Self::Int32),
            ArrowDataType::Int64 => Ok(Self::Int64),
            ArrowDataType::Timestamp(TimeUnit::Nanosecond, None) => Ok(Self::Int96),
            ArrowDataType::Float32 => Ok(Self::Float),
            ArrowDataType::Float64 => Ok(Self::Double),
            ArrowDataType::Binary | ArrowDataType::Utf8 => Ok(Self::ByteArray),
            ArrowDataType::FixedSizeBinary(_) => Ok(Self::FixedLenByteArray),
            dt => Err(LaminaError::UnsupportedType(format!(
                "Cannot convert Arrow type {:?} to a physical type",
                dt
            ))),
        }
    }

    /// Converts the physical storage kind back into an Arrow `DataType`.
    ///
    /// # Errors
    /// `FixedLenByteArray` is refused: its width is declared per column, not
    /// by the type, so no arrow type can be produced from the kind alone.
    pub fn to_arrow_type(&self) -> Result<ArrowDataType, LaminaError> {
        match self {
            Self::Boolean => Ok(ArrowDataType::Boolean),
            Self::Int32 => Ok(ArrowDataType::Int32),
            Self::Int64 => Ok(ArrowDataType::Int64),
            Self::Int96 => Ok(ArrowDataType::Timestamp(TimeUnit::Nanosecond, None)),
            Self::Float => Ok(ArrowDataType::Float32),
            Self::Double => Ok(ArrowDataType::Float64),
            Self::ByteArray => Ok(ArrowDataType::Binary),
            Self::FixedLenByteArray => Err(LaminaError::UnsupportedType(
                "FIXED_LEN_BYTE_ARRAY width is declared per column; supply it externally"
                    .to_string(),
            )),
        }
    }

    /// Returns the fixed byte width of one value of this kind.
    ///
    /// # Errors
    /// The byte-array family has no single fixed width. Callers sizing
    /// fixed-width reads must never reach this with those kinds, so the
    /// call fails with `UnsupportedType` instead of returning a misleading
    /// number.
    pub fn byte_size(&self) -> Result<usize, LaminaError> {
        match self {
            Self::Boolean => Ok(1),
            Self::Int32 => Ok(4),
            Self::Int64 => Ok(8),
            Self::Int96 => Ok(12),
            Self::Float => Ok(4),
            Self::Double => Ok(8),
            Self::ByteArray => Err(LaminaError::UnsupportedType(
                "BYTE_ARRAY has no fixed byte width; lengths are per-value".to_string(),
            )),
            Self::FixedLenByteArray => Err(LaminaError::UnsupportedType(
                "FIXED_LEN_BYTE_ARRAY width is declared per column, not by the type".to_string(),
            )),
        }
    }

    /// The sort order statistics use for this kind when no annotation
    /// overrides it. The byte-array family compares lexicographically as
    /// unsigned bytes; `Int96`'s comparison was never defined.
    pub fn default_sort_order(&self) -> SortOrder {
        match self {
            Self::Boolean | Self::Int32 | Self::Int64 | Self::Float | Self::Double => {
                SortOrder::Signed
            }
            Self::ByteArray | Self::FixedLenByteArray => SortOrder::Unsigned,
            Self::Int96 => SortOrder::Unknown,
        }
    }
}

/// Provides the canonical string representation for a `PhysicalType`.
impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These string representations are part of the public contract and
        // match the file format's canonical spelling.
        let name = match self {
            Self::Boolean => "BOOLEAN",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Int96 => "INT96",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::ByteArray => "BYTE_ARRAY",
            Self::FixedLenByteArray => "FIXED_LEN_BYTE_ARRAY",
        };
        write!(f, "{}", name)
    }
}

//==================================================================================
// 2. Converted (Logical) Types
//==================================================================================

/// A semantic annotation layered on a physical type, e.g. "this INT32 is
/// actually an unsigned 8-bit integer".
///
/// The discriminants preserve the format's historical numbering, including
/// the gap before `Na`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvertedType {
    None = 0,
    Utf8 = 1,
    Map = 2,
    MapKeyValue = 3,
    List = 4,
    Enum = 5,
    Decimal = 6,
    Date = 7,
    TimeMillis = 8,
    TimeMicros = 9,
    TimestampMillis = 10,
    TimestampMicros = 11,
    Uint8 = 12,
    Uint16 = 13,
    Uint32 = 14,
    Uint64 = 15,
    Int8 = 16,
    Int16 = 17,
    Int32 = 18,
    Int64 = 19,
    Json = 20,
    Bson = 21,
    Interval = 22,
    Na = 25,
}

impl ConvertedType {
    /// The sort order for a column carrying this annotation over `physical`.
    ///
    /// `None` defers to the physical default. Signed widths and calendar
    /// annotations force SIGNED; unsigned widths and the string-like
    /// annotations force UNSIGNED; structural annotations, intervals, and
    /// decimals have no defined comparison and report UNKNOWN.
    pub fn sort_order(&self, physical: PhysicalType) -> SortOrder {
        match self {
            Self::None => physical.default_sort_order(),
            Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::Int64
            | Self::Date
            | Self::TimeMillis
            | Self::TimeMicros
            | Self::TimestampMillis
            | Self::TimestampMicros => SortOrder::Signed,
            Self::Uint8
            | Self::Uint16
            | Self::Uint32
            | Self::Uint64
            | Self::Enum
            | Self::Utf8
            | Self::Bson
            | Self::Json => SortOrder::Unsigned,
            Self::Decimal
            | Self::List
            | Self::Map
            | Self::MapKeyValue
            | Self::Interval
            | Self::Na => SortOrder::Unknown,
        }
    }
}

/// Provides the canonical string representation for a `ConvertedType`.
impl fmt::Display for ConvertedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Utf8 => "UTF8",
            Self::Map => "MAP",
            Self::MapKeyValue => "MAP_KEY_VALUE",
            Self::List => "LIST",
            Self::Enum => "ENUM",
            Self::Decimal => "DECIMAL",
            Self::Date => "DATE",
            Self::TimeMillis => "TIME_MILLIS",
            Self::TimeMicros => "TIME_MICROS",
            Self::TimestampMillis => "TIMESTAMP_MILLIS",
            Self::TimestampMicros => "TIMESTAMP_MICROS",
            Self::Uint8 => "UINT_8",
            Self::Uint16 => "UINT_16",
            Self::Uint32 => "UINT_32",
            Self::Uint64 => "UINT_64",
            Self::Int8 => "INT_8",
            Self::Int16 => "INT_16",
            Self::Int32 => "INT_32",
            Self::Int64 => "INT_64",
            Self::Json => "JSON",
            Self::Bson => "BSON",
            Self::Interval => "INTERVAL",
            Self::Na => "NA",
        };
        write!(f, "{}", name)
    }
}

//==================================================================================
// 3. Encodings, Compression, Schema Metadata
//==================================================================================

/// Value encoding of a data page. `PlainDictionary = 2` preserves the gap
/// left by a withdrawn encoding.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Plain = 0,
    PlainDictionary = 2,
    Rle = 3,
    BitPacked = 4,
    DeltaBinaryPacked = 5,
    DeltaLengthByteArray = 6,
    DeltaByteArray = 7,
    RleDictionary = 8,
}

/// Provides the canonical string representation for an `Encoding`.
impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plain => "PLAIN",
            Self::PlainDictionary => "PLAIN_DICTIONARY",
            Self::Rle => "RLE",
            Self::BitPacked => "BIT_PACKED",
            Self::DeltaBinaryPacked => "DELTA_BINARY_PACKED",
            Self::DeltaLengthByteArray => "DELTA_LENGTH_BYTE_ARRAY",
            Self::DeltaByteArray => "DELTA_BYTE_ARRAY",
            Self::RleDictionary => "RLE_DICTIONARY",
        };
        write!(f, "{}", name)
    }
}

/// Compression codec applied to page payloads. The codecs themselves live in
/// external collaborators; this crate only names them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    Uncompressed = 0,
    Snappy = 1,
    Gzip = 2,
    Lzo = 3,
    Brotli = 4,
    Lz4 = 5,
    Zstd = 6,
}

/// Provides the canonical string representation for a `Compression`.
impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uncompressed => "UNCOMPRESSED",
            Self::Snappy => "SNAPPY",
            Self::Gzip => "GZIP",
            Self::Lzo => "LZO",
            Self::Brotli => "BROTLI",
            Self::Lz4 => "LZ4",
            Self::Zstd => "ZSTD",
        };
        write!(f, "{}", name)
    }
}

/// Field repetition level from the schema layer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repetition {
    Required = 0,
    Optional = 1,
    Repeated = 2,
}

/// The kind of a file page.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageType {
    DataPage = 0,
    IndexPage = 1,
    DictionaryPage = 2,
    DataPageV2 = 3,
}

//==================================================================================
// 4. Sort Order & Column Order
//==================================================================================

/// The comparison discipline used to aggregate and compare column statistics.
///
/// Since on-disk format revision 2.3.1 the order used to aggregate stats is
/// always SIGNED and is not stored in the file. Readers must treat stats on
/// columns whose natural order is UNSIGNED as unreliable and discard them,
/// rather than re-interpreting them as unsigned.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Signed,
    Unsigned,
    Unknown,
}

/// How a column's statistics are ordered in file metadata.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnOrder {
    Undefined,
    TypeDefinedOrder,
}

impl Default for ColumnOrder {
    fn default() -> Self {
        Self::TypeDefinedOrder
    }
}

//==================================================================================
// 5. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_type_display_is_stable() {
        let expected = [
            (PhysicalType::Boolean, "BOOLEAN"),
            (PhysicalType::Int32, "INT32"),
            (PhysicalType::Int64, "INT64"),
            (PhysicalType::Int96, "INT96"),
            (PhysicalType::Float, "FLOAT"),
            (PhysicalType::Double, "DOUBLE"),
            (PhysicalType::ByteArray, "BYTE_ARRAY"),
            (PhysicalType::FixedLenByteArray, "FIXED_LEN_BYTE_ARRAY"),
        ];
        for (t, name) in expected {
            assert_eq!(t.to_string(), name);
        }
    }

    #[test]
    fn test_metadata_display_is_stable() {
        assert_eq!(ConvertedType::MapKeyValue.to_string(), "MAP_KEY_VALUE");
        assert_eq!(ConvertedType::Uint64.to_string(), "UINT_64");
        assert_eq!(ConvertedType::Na.to_string(), "NA");
        assert_eq!(Encoding::PlainDictionary.to_string(), "PLAIN_DICTIONARY");
        assert_eq!(
            Encoding::DeltaLengthByteArray.to_string(),
            "DELTA_LENGTH_BYTE_ARRAY"
        );
        assert_eq!(Compression::Uncompressed.to_string(), "UNCOMPRESSED");
        assert_eq!(Compression::Zstd.to_string(), "ZSTD");
    }

    #[test]
    fn test_historical_discriminants_preserved() {
        assert_eq!(PhysicalType::FixedLenByteArray as i32, 7);
        assert_eq!(Encoding::Plain as i32, 0);
        assert_eq!(Encoding::PlainDictionary as i32, 2);
        assert_eq!(Encoding::RleDictionary as i32, 8);
        assert_eq!(ConvertedType::Na as i32, 25);
        assert_eq!(ConvertedType::Interval as i32, 22);
        assert_eq!(PageType::DataPageV2 as i32, 3);
        assert_eq!(Repetition::Repeated as i32, 2);
    }

    #[test]
    fn test_byte_size_for_fixed_width_types() {
        assert_eq!(PhysicalType::Boolean.byte_size().unwrap(), 1);
        assert_eq!(PhysicalType::Int32.byte_size().unwrap(), 4);
        assert_eq!(PhysicalType::Int64.byte_size().unwrap(), 8);
        assert_eq!(PhysicalType::Int96.byte_size().unwrap(), 12);
        assert_eq!(PhysicalType::Float.byte_size().unwrap(), 4);
        assert_eq!(PhysicalType::Double.byte_size().unwrap(), 8);
    }

    #[test]
    fn test_byte_size_refuses_byte_array_family() {
        for t in [PhysicalType::ByteArray, PhysicalType::FixedLenByteArray] {
            let result = t.byte_size();
            assert!(
                matches!(result, Err(LaminaError::UnsupportedType(_))),
                "{} should have no fixed width",
                t
            );
        }
    }

    #[test]
    fn test_default_sort_order() {
        assert_eq!(PhysicalType::Boolean.default_sort_order(), SortOrder::Signed);
        assert_eq!(PhysicalType::Int32.default_sort_order(), SortOrder::Signed);
        assert_eq!(PhysicalType::Int64.default_sort_order(), SortOrder::Signed);
        assert_eq!(PhysicalType::Float.default_sort_order(), SortOrder::Signed);
        assert_eq!(PhysicalType::Double.default_sort_order(), SortOrder::Signed);
        assert_eq!(
            PhysicalType::ByteArray.default_sort_order(),
            SortOrder::Unsigned
        );
        assert_eq!(
            PhysicalType::FixedLenByteArray.default_sort_order(),
            SortOrder::Unsigned
        );
        assert_eq!(PhysicalType::Int96.default_sort_order(), SortOrder::Unknown);
    }

    #[test]
    fn test_annotation_overrides_sort_order() {
        // NONE defers to the physical default.
        assert_eq!(
            ConvertedType::None.sort_order(PhysicalType::ByteArray),
            SortOrder::Unsigned
        );
        // An unsigned annotation flips a signed physical column.
        assert_eq!(
            ConvertedType::Uint32.sort_order(PhysicalType::Int32),
            SortOrder::Unsigned
        );
        assert_eq!(
            ConvertedType::Int8.sort_order(PhysicalType::Int32),
            SortOrder::Signed
        );
        // String-like annotations compare as unsigned bytes.
        assert_eq!(
            ConvertedType::Utf8.sort_order(PhysicalType::ByteArray),
            SortOrder::Unsigned
        );
        // Calendar annotations are signed.
        assert_eq!(
            ConvertedType::Date.sort_order(PhysicalType::Int32),
            SortOrder::Signed
        );
        assert_eq!(
            ConvertedType::TimestampMicros.sort_order(PhysicalType::Int64),
            SortOrder::Signed
        );
        // No defined comparison.
        assert_eq!(
            ConvertedType::Decimal.sort_order(PhysicalType::FixedLenByteArray),
            SortOrder::Unknown
        );
        assert_eq!(
            ConvertedType::Interval.sort_order(PhysicalType::FixedLenByteArray),
            SortOrder::Unknown
        );
    }

    #[test]
    fn test_arrow_type_interop() {
        assert_eq!(
            PhysicalType::from_arrow_type(&ArrowDataType::Int32).unwrap(),
            PhysicalType::Int32
        );
        assert_eq!(
            PhysicalType::from_arrow_type(&ArrowDataType::Utf8).unwrap(),
            PhysicalType::ByteArray
        );
        assert_eq!(
            PhysicalType::from_arrow_type(&ArrowDataType::FixedSizeBinary(16)).unwrap(),
            PhysicalType::FixedLenByteArray
        );
        assert_eq!(
            PhysicalType::from_arrow_type(&ArrowDataType::Timestamp(TimeUnit::Nanosecond, None))
                .unwrap(),
            PhysicalType::Int96
        );
        assert!(PhysicalType::from_arrow_type(&ArrowDataType::Date32).is_err());

        assert_eq!(
            PhysicalType::Int96.to_arrow_type().unwrap(),
            ArrowDataType::Timestamp(TimeUnit::Nanosecond, None)
        );
        assert_eq!(
            PhysicalType::ByteArray.to_arrow_type().unwrap(),
            ArrowDataType::Binary
        );
        assert!(PhysicalType::FixedLenByteArray.to_arrow_type().is_err());
    }

    #[test]
    fn test_serde_names_are_stable() {
        assert_eq!(
            serde_json::to_string(&PhysicalType::FixedLenByteArray).unwrap(),
            "\"FixedLenByteArray\""
        );
        assert_eq!(
            serde_json::to_string(&ConvertedType::TimestampMicros).unwrap(),
            "\"TimestampMicros\""
        );
        let back: Encoding = serde_json::from_str("\"PlainDictionary\"").unwrap();
        assert_eq!(back, Encoding::PlainDictionary);
    }

    #[test]
    fn test_column_order_defaults_to_type_defined() {
        assert_eq!(ColumnOrder::default(), ColumnOrder::TypeDefinedOrder);
    }
}
