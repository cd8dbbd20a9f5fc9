//! # Bookworm Common
//!
//! Shared building blocks for the page-processing commands:
//!
//! * **[`paths`]**: temp file and output directory naming, [`paths::FileSet`] filtering.
//! * **[`resolution`]**: validated value objects ([`resolution::Resolution`], [`resolution::Dimensions`]).
//! * **[`args`]**: the argument mapping consumed by the argument processors.
//! * **[`config`]**: which external binaries to invoke and how.
//! * **[`error`]**: validation failures raised before any side effect happens.
//! * **[`macros`]**: `success!` and `warn!` logging shorthands.

pub mod args;
pub mod config;
pub mod error;
pub mod macros;
pub mod paths;
pub mod resolution;

#[doc(hidden)]
pub use tracing;
