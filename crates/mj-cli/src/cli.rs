//! Command-line definition for `mjc`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum DumpFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "mjc", bin_name = "mjc")]
#[command(about = "Front-end for the MJ language: parse, analyze, and dump")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse and analyze a program, printing diagnostics
    #[command(after_help = r#"EXAMPLES:
  mjc check program.mj
  mjc check -s 'program p; class c { }'
  mjc check program.mj --warn-unused"#)]
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Report bindings that are never used
        #[arg(long)]
        warn_unused: bool,
    },

    /// Dump the annotated syntax tree
    #[command(after_help = r#"EXAMPLES:
  mjc ast program.mj
  mjc ast -s 'program p; class c { int x; }'"#)]
    Ast {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Dump the symbol table
    #[command(after_help = r#"EXAMPLES:
  mjc symbols program.mj
  mjc symbols program.mj --format json"#)]
    Symbols {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: DumpFormat,
    },
}

#[derive(Args)]
#[group(id = "source_input", multiple = false)]
pub struct SourceArgs {
    /// MJ source file
    #[arg(value_name = "FILE")]
    pub source_path: Option<PathBuf>,

    /// Source code as inline text
    #[arg(short = 's', long = "source", value_name = "TEXT")]
    pub source_text: Option<String>,
}
