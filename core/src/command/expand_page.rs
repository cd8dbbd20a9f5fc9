//! Expanding a page canvas with a white fill.
//!
//! Scanned pages rarely share the exact same size. Padding every page to a
//! common canvas, centered, keeps the text block in place across a book.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use bookworm_common::args::ArgMap;
use bookworm_common::config::Toolchain;
use bookworm_common::paths::{self, FileSet};
use bookworm_common::resolution::Dimensions;
use tracing::debug;

use super::sealed::{LifecycleCell, Token};
use super::{Arg, Lifecycle, TerminalCommand, ensure_directory};
use crate::error::{CommandError, CommandResult, Phase};

/// Extension picked up when the input is a directory.
pub const DEFAULT_BATCH_EXTENSION: &str = ".tiff";

const DEFAULT_PROGRAM: &str = "convert";
const FILL_COLOR: &str = "white";
const GRAVITY: &str = "Center";

/// `convert -extent WxH -background white -gravity Center <source> <target>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandPageWithFill {
    program: String,
    source: PathBuf,
    target: PathBuf,
    dimensions: Dimensions,
    state: Lifecycle,
    /// Modification time of a target left over from an earlier run, taken at setup.
    stale_target: Option<SystemTime>,
}

impl ExpandPageWithFill {
    pub fn new(dimensions: Dimensions, source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            source: source.into(),
            target: target.into(),
            dimensions,
            state: Lifecycle::Unstarted,
            stale_target: None,
        }
    }

    /// Swaps the executable, e.g. for `magick` or a wrapper script.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }
}

impl TerminalCommand for ExpandPageWithFill {
    fn executable(&self) -> &str {
        &self.program
    }

    fn args(&self) -> Vec<Arg> {
        vec![
            Arg::flag_value("-extent", self.dimensions.geometry()),
            Arg::flag_value("-background", FILL_COLOR),
            Arg::flag_value("-gravity", GRAVITY),
            Arg::operand(&self.source),
            Arg::operand(&self.target),
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

        if let Some(dir) = self.target.parent() {
            ensure_directory(dir)?;
        }

        self.stale_target = modified(&self.target);
        Ok(())
    }

    fn finalize(&self) -> CommandResult<()> {
        if !self.target.is_file() {
            return Err(CommandError::CommitFailed {
                path: self.target.clone(),
                reason: "expanded page was not written",
            });
        }

        if self.stale_target.is_some() && modified(&self.target) == self.stale_target {
            return Err(CommandError::CommitFailed {
                path: self.target.clone(),
                reason: "target was left untouched by the image tool",
            });
        }

        Ok(())
    }
}

impl LifecycleCell for ExpandPageWithFill {
    fn lifecycle_mut(&mut self, _: Token) -> &mut Lifecycle {
        &mut self.state
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

impl fmt::Display for ExpandPageWithFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_terminal_command())
    }
}

/// The result of processing page arguments: one page, or a whole directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Single(ExpandPageWithFill),
    /// One command per matching file, keyed by source path.
    Batch(BTreeMap<PathBuf, ExpandPageWithFill>),
}

impl PageAction {
    pub fn len(&self) -> usize {
        match self {
            PageAction::Single(_) => 1,
            PageAction::Batch(commands) => commands.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_commands(self) -> Vec<ExpandPageWithFill> {
        match self {
            PageAction::Single(command) => vec![command],
            PageAction::Batch(commands) => commands.into_values().collect(),
        }
    }
}

/// Builds the command for a single page. Without a `target`, the page is
/// written next to its source under a temporary name (`name.bookworm.ext`).
pub fn expand_page_with_fill(
    dimensions: Dimensions,
    source: impl Into<PathBuf>,
    target: Option<PathBuf>,
) -> ExpandPageWithFill {
    let source: PathBuf = source.into();
    let target: PathBuf = target.unwrap_or_else(|| paths::temp_file_name(&source));

    ExpandPageWithFill::new(dimensions, source, target)
}

/// Builds one command per file in `files`, each writing to `output_dir/<file name>`.
pub fn multi_expand_page(
    dimensions: Dimensions,
    files: &FileSet,
    output_dir: &Path,
) -> BTreeMap<PathBuf, ExpandPageWithFill> {
    files
        .files
        .iter()
        .map(|file| {
            let source: PathBuf = files.path.join(file);
            let target: PathBuf = output_dir.join(file);
            let command = expand_page_with_fill(dimensions, source.clone(), Some(target));
            (source, command)
        })
        .collect()
}

/// [`process_args_with`] using the default toolchain.
pub fn process_args(args: &ArgMap) -> CommandResult<PageAction> {
    process_args_with(args, &Toolchain::default())
}

/// Turns an argument mapping into page commands.
///
/// Dimensions are validated before the filesystem is touched. A file input
/// yields a single command; a directory input yields one command per
/// [`DEFAULT_BATCH_EXTENSION`] file, written into `output` or the default
/// subdirectory of the input directory.
pub fn process_args_with(args: &ArgMap, toolchain: &Toolchain) -> CommandResult<PageAction> {
    let input: &Path = args.input()?;
    let dimensions: Dimensions = args.dimensions()?;

    if input.is_file() {
        let command = expand_page_with_fill(dimensions, input, args.output().map(Path::to_path_buf))
            .with_program(&toolchain.convert);
        debug!("single page: {command}");
        return Ok(PageAction::Single(command));
    }

    if input.is_dir() {
        let output_dir: PathBuf = args
            .output()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input.join(paths::default_subdirectory()));

        let files: FileSet = FileSet::read_dir(input)
            .map_err(|source| CommandError::ReadDir {
                path: input.to_path_buf(),
                source,
            })?
            .with_extension(DEFAULT_BATCH_EXTENSION);

        let commands: BTreeMap<PathBuf, ExpandPageWithFill> =
            multi_expand_page(dimensions, &files, &output_dir)
                .into_iter()
                .map(|(source, command)| (source, command.with_program(&toolchain.convert)))
                .collect();

        debug!("{} pages found in {}", commands.len(), input.display());
        return Ok(PageAction::Batch(commands));
    }

    Err(CommandError::NotFound {
        phase: Phase::Arguments,
        path: input.to_path_buf(),
    })
}
