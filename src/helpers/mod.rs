//! Helper functions for collaborating page layers
//!
//! The pipeline keeps front-matter dates as raw strings; these helpers are
//! what a page layer reaches for when it needs an actual point in time or a
//! human-readable form.

mod date;

pub use date::*;
