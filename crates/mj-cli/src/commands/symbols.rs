use mj_frontend::Frontend;

use crate::cli::{DumpFormat, SourceArgs};

use super::load_source_or_exit;

pub fn run(source: &SourceArgs, format: DumpFormat) {
    let source = load_source_or_exit(source);

    let analyzed = Frontend::new(source).parse().analyze();
    print!("{}", analyzed.render_diagnostics());

    match format {
        DumpFormat::Text => print!("{}", analyzed.dump_symbols()),
        DumpFormat::Json => {
            let rows = analyzed.symbol_rows();
            match serde_json::to_string_pretty(&rows) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("error: cannot serialize symbol table: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    if analyzed.aborted() {
        std::process::exit(1);
    }
}
