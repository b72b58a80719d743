use mj_frontend::Frontend;

use crate::cli::SourceArgs;

use super::load_source_or_exit;

pub fn run(source: &SourceArgs) {
    let source = load_source_or_exit(source);

    let analyzed = Frontend::new(source).parse().analyze();
    print!("{}", analyzed.render_diagnostics());
    print!("{}", analyzed.dump_ast());

    if analyzed.aborted() {
        std::process::exit(1);
    }
}
