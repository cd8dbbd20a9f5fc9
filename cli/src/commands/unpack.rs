use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use indicatif::ProgressBar;

use bookworm_common::{args::ArgMap, config::Config, paths::FileSet, success};
use bookworm_core::{CommandResult, Runner, UnpackPdf, unpack_pdf};

use crate::terminal::{print, progress};

pub fn unpack(args: ArgMap, cfg: &Config) -> anyhow::Result<()> {
    let mut command: UnpackPdf = unpack_pdf::process_args_with(&args, &cfg.toolchain)
        .context("could not prepare pdf unpacking")?;

    if cfg.dry_run {
        print::command_line(&command.to_string());
        return Ok(());
    }

    let start_time: Instant = Instant::now();
    let spinner: ProgressBar = progress::spinner(
        format!("Rasterizing {} at {}", command.source().display(), command.resolution()),
        cfg.quiet,
    );

    let result: CommandResult<()> = Runner::drive(&mut command);
    spinner.finish_and_clear();
    result.with_context(|| format!("failed to unpack {}", command.source().display()))?;

    let image_dir: PathBuf = command.image_dir();
    let pages: usize = FileSet::read_dir(&image_dir)
        .map(|set| set.with_extension(".tiff").len())
        .with_context(|| format!("could not list {}", image_dir.display()))?;

    success!("Pages written to {}", image_dir.display());
    print::summary(pages, "pages unpacked", start_time.elapsed(), cfg.quiet);
    Ok(())
}
