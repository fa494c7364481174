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
// Complexity limits
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

//! Pickable 3D scenes from structured object descriptions.
//!
//! pickscene turns a JSON description of a faceted solid or a molecule into
//! a scene of tagged, pickable primitives, resolves picks and stored
//! references to one logical entity at a time, highlights it, and computes
//! bond-angle overlays for selected atoms. Rendering is left to the caller:
//! the scene is plain data.
//!
//! # Key entry points
//!
//! - [`session::Session`] - owns the active model and its selection
//! - [`description::validate()`] - validation and normalization of input
//! - [`builder::build_scene`] - solid and molecule scene builders
//! - [`scene::Scene`] - node arena with parent table and ray picking
//! - [`selection::SelectionReference`] - persistable selection handle
//! - [`options::Options`] - geometry, label, color and overlay settings
//!
//! # Flow
//!
//! validate → build → pick or restore → resolve → highlight + overlays →
//! capture. Only schema violations and empty models are fatal; a single
//! bad triangle or bond is skipped with an [`error::InvalidPrimitive`]
//! diagnostic.

pub mod builder;
pub mod description;
pub mod error;
pub mod options;
pub mod overlay;
pub mod scene;
pub mod selection;
pub mod session;

pub use error::SceneError;
pub use session::Session;
