//! User-facing output.
//!
//! - [`terminal`] — colored summaries and tables for `detect`, `classpath` and the generators.
//! - [`progress`] — spinner shown while a build tool runs.

pub mod progress;
pub mod terminal;
