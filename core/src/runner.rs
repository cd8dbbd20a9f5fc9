//! Drives commands through their lifecycle.
//!
//! The runner is the only supported way to execute a command: `setup`, then
//! `run`, then `commit`, always in that order. A failing step stops the
//! sequence and the error is returned untouched; nothing is retried.

use tracing::{info, info_span};

use crate::command::TerminalCommand;
use crate::error::CommandResult;

pub struct Runner;

impl Runner {
    /// Performs the pre-execution side effects of `command`.
    pub fn setup<C>(command: &mut C) -> CommandResult<()>
    where
        C: TerminalCommand + ?Sized,
    {
        let span = info_span!("setup", program = command.executable());
        let _guard = span.enter();

        command.setup()
    }

    /// Runs an already set up `command`, then commits it.
    pub fn execute<C>(command: &mut C) -> CommandResult<()>
    where
        C: TerminalCommand + ?Sized,
    {
        let span = info_span!("execute", program = command.executable());
        let _guard = span.enter();

        info!("{}", command.as_terminal_command());
        command.run()?;
        command.commit()
    }

    /// `setup`, `run` and `commit` in order.
    pub fn drive<C>(command: &mut C) -> CommandResult<()>
    where
        C: TerminalCommand + ?Sized,
    {
        Self::setup(command)?;
        Self::execute(command)
    }

    /// Drives every command in turn, stopping at the first failure.
    ///
    /// Returns how many commands were committed.
    pub fn drive_all<'a, C, I>(commands: I) -> CommandResult<usize>
    where
        C: TerminalCommand + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut C>,
    {
        let mut committed: usize = 0;
        for command in commands {
            Self::drive(command)?;
            committed += 1;
        }
        Ok(committed)
    }
}
