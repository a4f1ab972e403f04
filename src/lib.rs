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
// Complexity limits (clippy default thresholds)
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
#![allow(clippy::cargo_common_metadata)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Client-side router and elastic-grid navigation transition for a
//! static portfolio site.
//!
//! The router swaps HTML fragments into a single content container and
//! keeps browser history in step. The transition controller animates a
//! surface element toward a clicked link, docks it in the header, and only
//! then asks the router to navigate; returning to the host page plays the
//! docking in reverse.
//!
//! # Key entry points
//!
//! - [`routing::Router`] - page loading, history and the not-found fallback
//! - [`transition::TransitionController`] - the stretch, dock and return
//!   state machine
//! - [`options::SiteConfig`] - routes and tunables (TOML or JSON)
//! - [`events::PageLoaded`] - notification fired after every content swap
//!
//! # Architecture
//!
//! Both components reach the document only through capability traits:
//! [`view::ContentView`], [`routing::FragmentSource`],
//! [`routing::History`] and [`transition::Scheduler`]. The `web` feature
//! implements them over `web-sys` and exports the wasm entry point
//! `web::start`. Everything runs on one thread; collaborators are shared
//! through `Rc` and state lives in `RefCell`/`Cell`.

pub mod error;
pub mod events;
pub mod options;
pub mod routing;
pub mod transition;
pub mod view;
#[cfg(feature = "web")]
pub mod web;

#[cfg(test)]
mod scenarios;
#[cfg(test)]
mod test_support;

pub use error::NavError;
