use std::io;
use std::process::ExitCode;

use chromestatus_query_cli::{run, Cli};
use clap::Parser;
use log::LevelFilter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, wins over -v.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let stderr = io::stderr();
    match run(&cli, io::stdin().lock(), &mut stdout.lock(), &mut stderr.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("featurequery: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
