// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive protein feature track kept in sync with a 3D structure viewer.
//!
//! The track lays exons, domains, and variant calls out in lanes along a
//! residue axis. Clicking a variant (or a whole variant lane) toggles it in a
//! selection set and emits the commands that make an external structure
//! viewer show the same residues as spheres in the lane color; clicking again
//! restores the viewer's default ribbon and confidence coloring.
//!
//! # Key entry points
//!
//! - [`session::TrackSession`] - a mounted track and its viewer connection
//! - [`track::FeatureTrack`] - glyph layout and the declarative draw commands
//! - [`feature::normalize`] - records to one glyph per feature instance
//! - [`selection::SelectionSynchronizer`] - click to viewer command sequences
//! - [`options::Options`] - layout, glyph, color and viewer configuration
//!
//! # Data flow
//!
//! records → [`feature`] → [`track`] (render) → click →
//! [`selection`] → [`viewer`] backend. The selection state is read back by
//! the next render to decide which glyphs are drawn emphasized.

pub mod error;
pub mod feature;
pub mod options;
pub mod scale;
pub mod selection;
pub mod session;
pub mod track;
pub mod util;
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;
