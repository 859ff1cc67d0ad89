// In: src/observability.rs

//! This module provides observability and diagnostics capabilities for the
//! compute dispatcher.
//!
//! Chunk alignment decisions are invisible from the outside: a caller hands
//! in two datums and gets one back, with no record of how the inputs were
//! segmented. This module provides structured logging hooks to make those
//! decisions transparent and debuggable. The `log_metric!` macro is the
//! primary tool.
//!
//! It is a zero-cost abstraction: the `#[cfg(debug_assertions)]` attribute
//! ensures that the macro and all calls to it are completely compiled out of
//! release builds, imposing no performance penalty in production.

/// Logs a structured key-value metric string to stdout, only in debug builds.
///
/// # Example
/// ```
/// use lamina_columnar::log_metric;
/// let segments = 4;
/// log_metric!("event"="binary_dispatch", "segments"=&segments);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            let output = format!("LAMINA_METRIC: {{ {} }}", parts.join(", "));
            println!("{}", output);
        }
    };
}
