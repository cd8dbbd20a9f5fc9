pub mod expand;
pub mod unpack;

#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use bookworm_common::args::ArgMap;
use bookworm_common::config::{Config, Toolchain};
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookworm")]
#[command(about = "Prepares scanned book pages with ImageMagick and Ghostscript.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print the commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Run independent page commands concurrently
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Reduce output (-q hides decorations, -qq hides summaries too)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show the commands as they are executed
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Image tool executable [default: $BOOKWORM_CONVERT or convert]
    #[arg(long, global = true, value_name = "BIN")]
    pub convert: Option<String>,

    /// Ghostscript executable [default: $BOOKWORM_GS or gs]
    #[arg(long, global = true, value_name = "BIN")]
    pub gs: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pad pages to a fixed canvas with a white fill
    #[command(alias = "e")]
    Expand {
        /// A page image, or a directory of .tiff pages
        input: PathBuf,
        /// Target canvas size in pixels
        #[arg(short, long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], required = true)]
        dimensions: Vec<String>,
        /// Target file (single page) or directory (batch)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rasterize a PDF into a sequence of TIFF pages
    #[command(alias = "u")]
    Unpack {
        /// The PDF to unpack
        input: PathBuf,
        /// Directory receiving the pages
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Rasterization density [default: 600]
        #[arg(short, long)]
        resolution: Option<String>,
        /// Unit of --resolution: PixelsPerInch or PixelsPerCentimeter
        #[arg(long, default_value = "PixelsPerInch", requires = "resolution")]
        units: String,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        let mut toolchain = Toolchain::from_env();
        if let Some(convert) = &self.convert {
            toolchain.convert = convert.clone();
        }
        if let Some(gs) = &self.gs {
            toolchain.ghostscript = gs.clone();
        }

        Config {
            toolchain,
            dry_run: self.dry_run,
            parallel: self.parallel,
            quiet: self.quiet,
        }
    }
}

pub fn page_args(input: PathBuf, dimensions: Vec<String>, output: Option<PathBuf>) -> ArgMap {
    let args = ArgMap::new(input).with_dimension_tokens(dimensions);
    match output {
        Some(output) => args.with_output(output),
        None => args,
    }
}

pub fn pdf_args(
    input: PathBuf,
    output: Option<PathBuf>,
    resolution: Option<String>,
    units: String,
) -> ArgMap {
    let mut args = ArgMap::new(input);
    if let Some(output) = output {
        args = args.with_output(output);
    }
    if let Some(resolution) = resolution {
        args = args.with_resolution(resolution, units);
    }
    args
}
