mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Check {
            source,
            warn_unused,
        } => commands::check::run(&source, warn_unused),
        Command::Ast { source } => commands::ast::run(&source),
        Command::Symbols { source, format } => commands::symbols::run(&source, format),
    }
}
