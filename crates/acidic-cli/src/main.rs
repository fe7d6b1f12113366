use acidic_cli::{result_code, run, Cli};
use acidic_core::{AcidicError, ConfigError};
use clap::{CommandFactory, Parser};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .init();

    let result = run(&cli);
    if let Err(err) = &result {
        eprintln!("{}", err);
        if matches!(
            err.downcast_ref::<AcidicError>(),
            Some(AcidicError::Config(ConfigError::NoFileSpecified))
        ) {
            eprintln!();
            let _ = Cli::command().print_help();
        }
    }
    std::process::exit(result_code(&result));
}
