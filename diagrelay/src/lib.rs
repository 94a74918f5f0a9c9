//! Leveled diagnostics through a minimal sink contract, with automatic use
//! of richer sink capabilities where available.
//!
//! This crate separates:
//! - **The contract**: [`Sink`] requires only the four plain methods
//!   (debug, print, warning, error); every richer behavior is an optional
//!   facet trait advertised through a capability query.
//! - **The dispatcher**: one free function per level and call shape that
//!   routes to the best-matching sink method in a fixed priority order,
//!   synthesizing formatted, located, and located-formatted behavior from
//!   whatever the sink implements.
//!
//! Typical use in a function that wants to produce diagnostics:
//!
//! ```
//! use diagrelay::{self as diag, args};
//!
//! fn frobnicate(log: Option<&dyn diag::Sink>) {
//!     diag::debugf(log, "hello {}!", args!["world"]);
//! }
//! ```
//!
//! Passing `None` (or [`NONE`]) makes every emission a silent no-op.
//!
//! What this crate does:
//! - dispatches each call shape to the most specific facet a sink exposes
//! - masks registered sensitive values out of emitted text ([`mask_value`])
//! - nests output into indented groups ([`group`])
//! - ships stream, capture, and (behind the `tracing` feature) tracing
//!   sinks for `main` and testing packages
//!
//! What it does not do:
//! - validate message content or format templates
//! - guarantee delivery; a sink may drop output
//! - produce structured or machine-parseable output

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod arg;
pub mod capture;
pub mod dispatch;
pub mod error;
mod group;
pub mod location;
pub mod mask;
mod render;
pub mod sink;
#[cfg(feature = "tracing")]
pub mod tracing;
pub mod writer;

pub use arg::{Arg, join};
pub use capture::CaptureSink;
pub use dispatch::{
    debug, debugf, error, error_at, error_atf, errorf, print, printf, warning, warning_at,
    warning_atf, warningf,
};
pub use error::Error;
pub use group::group;
pub use location::{LocationFormat, format_location, location_prefix, set_location_format};
pub use mask::{MASK_TOKEN, MaskSet, Masked, mask_value};
pub use render::{MISSING_MARKER, render};
pub use sink::{
    CallSiteHook, FormatSink, FullSink, GroupSink, Level, LocatedFormatSink, LocatedSink, NONE,
    RedactingSink, Sink,
};
#[cfg(feature = "tracing")]
pub use tracing::TracingSink;
pub use writer::{PrefixWriter, RoutedSink, WriterSink};
