mod commands;
mod terminal;

use bookworm_common::config::Config;
use commands::{CommandLine, Commands, expand, unpack};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg: Config = commands.config();
    print::banner(cfg.quiet);

    match commands.command {
        Commands::Expand {
            input,
            dimensions,
            output,
        } => {
            print::header("expanding pages", cfg.quiet);
            expand::expand(commands::page_args(input, dimensions, output), &cfg)
        }
        Commands::Unpack {
            input,
            output,
            resolution,
            units,
        } => {
            print::header("unpacking pdf", cfg.quiet);
            unpack::unpack(commands::pdf_args(input, output, resolution, units), &cfg)
        }
    }
}
