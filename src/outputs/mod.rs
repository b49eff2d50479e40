//! Report rendering.
//!
//! - [`console`]: the tab-separated per-day tables with running totals
//! - [`json`]: the same reports as pretty-printed JSON
//!
//! Both render to a `String`; `main` decides where it goes.

pub mod console;
pub mod json;
