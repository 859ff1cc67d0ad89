//! This file is the root of the `lamina_columnar` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library (`compute`, `types`,
//!     etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the handful of items that form the crate's front door,
//!     most importantly the unified `LaminaError` type.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod compute;
pub mod encryption;
pub mod error;
pub mod types;
pub mod utils;

//==================================================================================
// 2. Re-exports
//==================================================================================
pub use error::LaminaError;
