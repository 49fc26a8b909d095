//! wlast - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use wlast::cli::{Cli, Commands, ConfigCommands};

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    wlast::logging::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Last(args) => commands::last::handle(args),
        Commands::Boottime { file } => commands::boottime::handle(file),
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(),
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
