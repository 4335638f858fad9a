//! Shared primitives for the Cyanea format converters.
//!
//! `cyanea-core` provides the foundation the converter crates build on:
//!
//! - **Error types**: [`CyaneaError`] and [`Result`] for structured error handling
//! - **Traits**: [`Sequence`], [`Annotated`], [`Summarizable`]
//! - **Fixed-width records**: declarative column tables read by [`fixed::FixedRecord`]
//! - **Warnings**: [`Warnings`] for recoverable problems, mirrored to `log`

pub mod error;
pub mod fixed;
pub mod traits;
pub mod warnings;

pub use error::{write_to_string, CyaneaError, Result};
pub use traits::*;
pub use warnings::Warnings;
