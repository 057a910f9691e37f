//! RepoSnap CLI — repository-to-markdown snapshot tool.
//!
//! Turns a GitHub repository URL or local directory into two portable
//! markdown documents: a rendered directory tree and a concatenation of
//! every matching file's content.

mod commands;

use clap::Parser;
use clap::error::ErrorKind;

use commands::Cli;

fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("failed to install error reporting: {e}");
    }

    // Usage errors go to stdout and map to exit code 1, like runtime
    // errors. --help and --version keep their normal exit-0 output.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            println!("{e}");
            std::process::exit(1);
        }
    };
    commands::init_tracing(&cli);

    // Errors go to stdout and map to exit code 1.
    if let Err(e) = commands::run(cli) {
        println!("Error: {e:?}");
        std::process::exit(1);
    }
}
