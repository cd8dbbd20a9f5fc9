//! The central **abstraction** for external tool invocations.
//!
//! Every concrete command (see [`expand_page`] and [`unpack_pdf`]) describes itself
//! as an executable plus an ordered list of [`Arg`] tokens. All renderings (the
//! argument list, the subprocess argv and the shell string) are derived from that
//! single list, so they cannot drift apart.
//!
//! Commands move through an explicit [`Lifecycle`]:
//!
//! ```text
//! Unstarted --setup--> Ready --run--> Executed --commit--> Committed
//!     \                  \               \
//!      `------------------`---------------`----> Failed
//! ```
//!
//! Side effects (output directories, output files) happen only inside the
//! lifecycle operations, never at construction time.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Output};

use tracing::{debug, error};

use crate::error::{CommandError, CommandResult, Phase};

pub mod expand_page;
pub mod unpack_pdf;

use expand_page::ExpandPageWithFill;
use sealed::{LifecycleCell, Token};
use unpack_pdf::UnpackPdf;

mod sealed {
    use super::Lifecycle;

    /// Only the lifecycle operations of this module can make one.
    #[derive(Debug, Clone, Copy)]
    pub struct Token(pub(super) ());

    /// Write access to a command's lifecycle state.
    pub trait LifecycleCell {
        fn lifecycle_mut(&mut self, token: Token) -> &mut Lifecycle;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Unstarted,
    Ready,
    Executed,
    Committed,
    Failed,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &str = match self {
            Lifecycle::Unstarted => "unstarted",
            Lifecycle::Ready => "ready",
            Lifecycle::Executed => "executed",
            Lifecycle::Committed => "committed",
            Lifecycle::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One token of a command line, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A switch, optionally followed by its value (`-gravity Center`).
    Flag { name: String, value: Option<String> },
    /// A positional argument, usually a path.
    Operand(String),
}

impl Arg {
    pub fn flag(name: impl Into<String>) -> Self {
        Arg::Flag {
            name: name.into(),
            value: None,
        }
    }

    pub fn flag_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Arg::Flag {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn operand(path: &Path) -> Self {
        Arg::Operand(path.to_string_lossy().into_owned())
    }

    /// The token as one string, a flag and its value separated by a space.
    pub fn as_token(&self) -> String {
        match self {
            Arg::Flag { name, value: None } => name.clone(),
            Arg::Flag {
                name,
                value: Some(value),
            } => format!("{name} {value}"),
            Arg::Operand(operand) => operand.clone(),
        }
    }

    fn push_argv(&self, argv: &mut Vec<String>) {
        match self {
            Arg::Flag { name, value } => {
                argv.push(name.clone());
                argv.extend(value.iter().cloned());
            }
            Arg::Operand(operand) => argv.push(operand.clone()),
        }
    }
}

/// Contract shared by every external invocation.
///
/// Implementors provide what to run ([`executable`](Self::executable),
/// [`args`](Self::args)) and their phase-specific side effects
/// ([`prepare`](Self::prepare), [`finalize`](Self::finalize)). The lifecycle
/// operations are provided and enforce the legal order of calls.
///
/// The trait is sealed: the state can only move through
/// [`setup`](Self::setup), [`run`](Self::run) and [`commit`](Self::commit).
///
/// ```compile_fail
/// use bookworm_core::unpack_pdf::unpack_pdf;
/// use bookworm_core::{Lifecycle, TerminalCommand};
///
/// let mut command = unpack_pdf("book.pdf", None);
/// *command.lifecycle_mut() = Lifecycle::Executed;
/// ```
pub trait TerminalCommand: LifecycleCell {
    fn executable(&self) -> &str;

    /// The canonical, ordered argument list (without the executable).
    fn args(&self) -> Vec<Arg>;

    fn lifecycle(&self) -> Lifecycle;

    /// Preconditions and side effects needed before the process can run.
    fn prepare(&mut self) -> CommandResult<()> {
        Ok(())
    }

    /// Post-execution finalization. Only ever called after a successful run.
    fn finalize(&self) -> CommandResult<()> {
        Ok(())
    }

    fn as_arg_list(&self) -> Vec<String> {
        let mut list: Vec<String> = vec![self.executable().to_string()];
        list.extend(self.args().iter().map(Arg::as_token));
        list
    }

    fn as_subprocess_argv(&self) -> Vec<String> {
        let mut argv: Vec<String> = vec![self.executable().to_string()];
        for arg in self.args() {
            arg.push_argv(&mut argv);
        }
        argv
    }

    fn as_terminal_command(&self) -> String {
        shell_join(&self.as_subprocess_argv())
    }

    /// `Unstarted -> Ready`.
    fn setup(&mut self) -> CommandResult<()> {
        advance(self, "set up", Lifecycle::Unstarted, Lifecycle::Ready, |cmd| {
            cmd.prepare()
        })
    }

    /// `Ready -> Executed`. Blocks until the process exits.
    fn run(&mut self) -> CommandResult<()> {
        advance(self, "run", Lifecycle::Ready, Lifecycle::Executed, |cmd| {
            execute(&cmd.as_subprocess_argv())
        })
    }

    /// `Executed -> Committed`.
    fn commit(&mut self) -> CommandResult<()> {
        advance(self, "commit", Lifecycle::Executed, Lifecycle::Committed, |cmd| {
            cmd.finalize()
        })
    }
}

fn advance<C, F>(
    cmd: &mut C,
    action: &'static str,
    from: Lifecycle,
    to: Lifecycle,
    step: F,
) -> CommandResult<()>
where
    C: TerminalCommand + ?Sized,
    F: FnOnce(&mut C) -> CommandResult<()>,
{
    let state: Lifecycle = cmd.lifecycle();
    if state != from {
        return Err(CommandError::InvalidTransition { action, state });
    }

    let result: CommandResult<()> = step(&mut *cmd);
    *cmd.lifecycle_mut(Token(())) = if result.is_ok() { to } else { Lifecycle::Failed };
    result
}

/// Joins argv into a string a POSIX shell would split back into the same tokens.
pub fn shell_join(argv: &[String]) -> String {
    argv.iter()
        .map(|token| shell_quote(token))
        .collect::<Option<Vec<Cow<'_, str>>>>()
        .map(|tokens| tokens.join(" "))
        .unwrap_or_else(|| "<command included NUL byte>".to_string())
}

/// Quotes `token` only when a shell would otherwise split or expand it.
///
/// `=` and `%` are left alone: they are only special in the command position,
/// and Ghostscript switches are full of them.
fn shell_quote(token: &str) -> Option<Cow<'_, str>> {
    let plain: bool = !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-_./:@%=+,".contains(&b));

    if plain {
        Some(Cow::Borrowed(token))
    } else {
        shlex::try_quote(token).ok()
    }
}

fn execute(argv: &[String]) -> CommandResult<()> {
    let Some((program, rest)) = argv.split_first() else {
        return Err(CommandError::Spawn {
            program: String::new(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty argv"),
        });
    };

    debug!("executing {}", shell_join(argv));

    let output: Output = Command::new(program)
        .args(rest)
        .output()
        .map_err(|source| CommandError::Spawn {
            program: program.clone(),
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr: String = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
    error!("{program} exited with {}: {stderr}", output.status);

    Err(CommandError::NonZeroExit {
        program: program.clone(),
        status: output.status,
        stderr,
    })
}

/// Makes sure `dir` exists, creating at most the last path component.
///
/// A missing parent is reported as [`CommandError::NotFound`] and nothing is created.
pub(crate) fn ensure_directory(dir: &Path) -> CommandResult<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }

    if let Some(parent) = dir.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(CommandError::NotFound {
                phase: Phase::Setup,
                path: parent.to_path_buf(),
            });
        }
    }

    debug!("creating directory {}", dir.display());
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        // Batch commands share an output directory and may race to create it.
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(CommandError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Any of the supported commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    PageExpand(ExpandPageWithFill),
    PdfUnpack(UnpackPdf),
}

impl TerminalCommand for CommandKind {
    fn executable(&self) -> &str {
        match self {
            CommandKind::PageExpand(cmd) => cmd.executable(),
            CommandKind::PdfUnpack(cmd) => cmd.executable(),
        }
    }

    fn args(&self) -> Vec<Arg> {
        match self {
            CommandKind::PageExpand(cmd) => cmd.args(),
            CommandKind::PdfUnpack(cmd) => cmd.args(),
        }
    }

    fn lifecycle(&self) -> Lifecycle {
        match self {
            CommandKind::PageExpand(cmd) => cmd.lifecycle(),
            CommandKind::PdfUnpack(cmd) => cmd.lifecycle(),
        }
    }

    fn prepare(&mut self) -> CommandResult<()> {
        match self {
            CommandKind::PageExpand(cmd) => cmd.prepare(),
            CommandKind::PdfUnpack(cmd) => cmd.prepare(),
        }
    }

    fn finalize(&self) -> CommandResult<()> {
        match self {
            CommandKind::PageExpand(cmd) => cmd.finalize(),
            CommandKind::PdfUnpack(cmd) => cmd.finalize(),
        }
    }
}

impl LifecycleCell for CommandKind {
    fn lifecycle_mut(&mut self, token: Token) -> &mut Lifecycle {
        match self {
            CommandKind::PageExpand(cmd) => cmd.lifecycle_mut(token),
            CommandKind::PdfUnpack(cmd) => cmd.lifecycle_mut(token),
        }
    }
}

impl From<ExpandPageWithFill> for CommandKind {
    fn from(cmd: ExpandPageWithFill) -> Self {
        CommandKind::PageExpand(cmd)
    }
}

impl From<UnpackPdf> for CommandKind {
    fn from(cmd: UnpackPdf) -> Self {
        CommandKind::PdfUnpack(cmd)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_terminal_command())
    }
}
