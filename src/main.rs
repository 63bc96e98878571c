use clap::Parser;
use pvscheck::cli::{self, Cli};
use pvscheck::errors::EXIT_ARGS_PARSE_ERROR;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here
            let code = if e.use_stderr() { EXIT_ARGS_PARSE_ERROR } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    cli::init_logging(cli.global.verbose);

    if let Err(e) = cli::run(cli) {
        cli::report_error(&e);
        std::process::exit(cli::exit_code_for(&e));
    }
}
