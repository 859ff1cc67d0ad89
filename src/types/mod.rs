//! This module defines the core, strongly-typed data representations used
//! throughout the lamina toolkit.
//!
//! It includes the canonical physical type system with its metadata enums
//! (encodings, compression codecs, sort orders), the borrowed value views
//! for variable-length data, and the statistics formatter. These replace
//! fragile integer- and string-based type handling with safe, serializable
//! enums whose representations are stable across versions.

pub mod physical_type;
pub mod values;

// Re-export the main types for easier access.
pub use physical_type::{
    ColumnOrder, Compression, ConvertedType, Encoding, PageType, PhysicalType, Repetition,
    SortOrder,
};
pub use values::{
    format_stat_value, ByteArray, FixedLenByteArray, Int96, JULIAN_DAY_OF_EPOCH,
    MICROSECONDS_PER_DAY, MILLISECONDS_PER_DAY, NANOSECONDS_PER_DAY, SECONDS_PER_DAY,
};
