//! # Bookworm Core
//!
//! Builds and drives invocations of external image tools.
//!
//! * **[`command`]**: the [`command::TerminalCommand`] contract and its lifecycle,
//!   plus the concrete page and PDF commands.
//! * **[`runner`]**: drives a command through setup, run and commit.
//! * **[`error`]**: what went wrong, and in which phase.

pub mod command;
pub mod error;
pub mod runner;

pub use command::expand_page::{self, ExpandPageWithFill, PageAction};
pub use command::unpack_pdf::{self, UnpackPdf};
pub use command::{Arg, CommandKind, Lifecycle, TerminalCommand};
pub use error::{CommandError, CommandResult, Phase};
pub use runner::Runner;
