//! Shared utilities.
//!
//! Hex RGB color handling shared by the options, the track renderer, and the
//! viewer command vocabulary.

pub mod color;
