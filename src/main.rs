use std::io::{self, IsTerminal};
use std::path::Path;

use clap::Parser;
use miette::Result;
use petal::cli::{Cli, Commands};
use petal::config::Config;
use petal::logging::{init_logging, LogConfig};
use petal::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_ansi(io::stderr().is_terminal());
    init_logging(&log_config);

    let printer = Printer::new();

    match cli.command {
        Commands::Compose(args) => {
            let config = Config::discover(cli.config.as_deref(), Path::new("."))?;
            petal::cli::compose::run(args, &config, &printer)?
        }
        Commands::Export(args) => {
            let config = Config::discover(cli.config.as_deref(), Path::new("."))?;
            petal::cli::export::run(args, &config, &printer)?
        }
        Commands::List => petal::cli::list::run(&printer),
        Commands::Completions(args) => petal::cli::completions::run(args),
    }

    Ok(())
}
