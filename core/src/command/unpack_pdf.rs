//! Unpacking a PDF into a sequence of TIFF pages with Ghostscript.

use std::fmt;
use std::path::{Path, PathBuf};

use bookworm_common::args::ArgMap;
use bookworm_common::config::Toolchain;
use bookworm_common::paths;
use bookworm_common::resolution::Resolution;

use super::sealed::{LifecycleCell, Token};
use super::{Arg, Lifecycle, TerminalCommand, ensure_directory};
use crate::error::{CommandError, CommandResult, Phase};

const DEFAULT_PROGRAM: &str = "gs";
const DEVICE: &str = "tiff24nc";
const COMPRESSION: &str = "lzw";
/// Ghostscript substitutes the zero-padded page number for `%04d`.
const PAGE_PATTERN: &str = "_Page_%04d.tiff";

/// `gs -q -dNOPAUSE -dBATCH -sDEVICE=tiff24nc -sCompression=lzw -r600x600 -sOutputFile=<dir>_Page_%04d.tiff <source>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackPdf {
    program: String,
    source: PathBuf,
    target_dir: Option<PathBuf>,
    resolution: Resolution,
    state: Lifecycle,
}

impl UnpackPdf {
    pub fn new(source: impl Into<PathBuf>, target_dir: Option<PathBuf>) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            source: source.into(),
            target_dir,
            resolution: Resolution::default(),
            state: Lifecycle::Unstarted,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Where the unpacked pages land: the configured target directory, or the
    /// default subdirectory next to the source PDF.
    ///
    /// Does not touch the filesystem, so it is valid before [`setup`](TerminalCommand::setup).
    pub fn image_dir(&self) -> PathBuf {
        self.target_dir
            .clone()
            .unwrap_or_else(|| paths::temp_directory(&self.source))
    }

    /// The `-sOutputFile` pattern handed to Ghostscript.
    pub fn output_pattern(&self) -> PathBuf {
        self.image_dir().join(PAGE_PATTERN)
    }
}

impl TerminalCommand for UnpackPdf {
    fn executable(&self) -> &str {
        &self.program
    }

    fn args(&self) -> Vec<Arg> {
        let dpi: u32 = self.resolution.dots_per_inch();
        vec![
            Arg::flag("-q"),
            Arg::flag("-dNOPAUSE"),
            Arg::flag("-dBATCH"),
            Arg::flag(format!("-sDEVICE={DEVICE}")),
            Arg::flag(format!("-sCompression={COMPRESSION}")),
            Arg::flag(format!("-r{dpi}x{dpi}")),
            Arg::flag(format!("-sOutputFile={}", self.output_pattern().display())),
            Arg::operand(&self.source),
        ]
    }

    fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    fn prepare(&mut self) -> CommandResult<()> {
        if !self.source.is_file() {
            return Err(CommandError::NotFound {
                phase: Phase::Setup,
                path: self.source.clone(),
            });
        }

        ensure_directory(&self.image_dir())
    }

    // Pages are written straight into `image_dir`; nothing left to move.
    fn finalize(&self) -> CommandResult<()> {
        Ok(())
    }
}

impl LifecycleCell for UnpackPdf {
    fn lifecycle_mut(&mut self, _: Token) -> &mut Lifecycle {
        &mut self.state
    }
}

impl fmt::Display for UnpackPdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_terminal_command())
    }
}

/// Builds the command for `source`, unpacking into `target_dir` or the default subdirectory.
pub fn unpack_pdf(source: impl Into<PathBuf>, target_dir: Option<PathBuf>) -> UnpackPdf {
    UnpackPdf::new(source, target_dir)
}

/// [`process_args_with`] using the default toolchain.
pub fn process_args(args: &ArgMap) -> CommandResult<UnpackPdf> {
    process_args_with(args, &Toolchain::default())
}

/// Turns an argument mapping into an [`UnpackPdf`] command.
///
/// The source is not checked here; [`setup`](TerminalCommand::setup) reports a
/// missing PDF or output parent.
pub fn process_args_with(args: &ArgMap, toolchain: &Toolchain) -> CommandResult<UnpackPdf> {
    let input: &Path = args.input()?;
    let resolution: Resolution = args.resolution()?.unwrap_or_default();

    Ok(unpack_pdf(input, args.output().map(Path::to_path_buf))
        .with_resolution(resolution)
        .with_program(&toolchain.ghostscript))
}
