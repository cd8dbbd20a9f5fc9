use std::time::{Duration, Instant};

use anyhow::Context;
use indicatif::ProgressBar;
use rayon::prelude::*;

use bookworm_common::{args::ArgMap, config::Config, success, warn};
use bookworm_core::expand_page::{self, DEFAULT_BATCH_EXTENSION};
use bookworm_core::{CommandResult, ExpandPageWithFill, Runner};

use crate::terminal::{print, progress};

pub fn expand(args: ArgMap, cfg: &Config) -> anyhow::Result<()> {
    let action = expand_page::process_args_with(&args, &cfg.toolchain)
        .context("could not prepare page expansion")?;

    let mut commands: Vec<ExpandPageWithFill> = action.into_commands();
    if commands.is_empty() {
        warn!("No {DEFAULT_BATCH_EXTENSION} pages found");
        print::no_results(cfg.quiet);
        return Ok(());
    }

    if cfg.dry_run {
        commands
            .iter()
            .for_each(|command| print::command_line(&command.to_string()));
        return Ok(());
    }

    let start_time: Instant = Instant::now();
    let bar: ProgressBar = progress::pages(commands.len() as u64, cfg.quiet);

    let result: CommandResult<()> = if cfg.parallel {
        commands
            .par_iter_mut()
            .try_for_each(|command| drive(command, &bar))
    } else {
        commands
            .iter_mut()
            .try_for_each(|command| drive(command, &bar))
    };

    bar.finish_and_clear();
    result.context("page expansion failed")?;

    expansion_ends(&commands, start_time.elapsed(), cfg);
    Ok(())
}

fn drive(command: &mut ExpandPageWithFill, bar: &ProgressBar) -> CommandResult<()> {
    Runner::drive(command)?;
    bar.inc(1);
    Ok(())
}

fn expansion_ends(commands: &[ExpandPageWithFill], total_time: Duration, cfg: &Config) {
    if let [command] = commands {
        success!("Expanded page written to {}", command.target().display());
    }
    print::summary(commands.len(), "pages expanded", total_time, cfg.quiet);
}
