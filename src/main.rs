//! cloudctl - multi-cloud inspection and provisioning tool
//!
//! A command-line tool for listing compute instances and creating storage
//! resources on AWS, Azure and GCP.

use clap::Parser;
use cloudctl::cli::args::{generate_completions, Cli, Commands};
use cloudctl::commands::{run_aws, run_azure, run_gcp};
use cloudctl::domain::Provider;
use cloudctl::error::{AppError, ConfigError, ProviderError};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; --verbose overrides LOG_LEVEL
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().filter_or("LOG_LEVEL", "info"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.format_timestamp_secs().init();

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::debug!("{:?}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let env_file = cli.env_file.as_deref();

    match &cli.command {
        Commands::Aws(args) => run_aws(args, cli.format, env_file),

        Commands::Azure(args) => run_azure(args, cli.format, env_file),

        Commands::Gcp(args) => run_gcp(args, cli.format, env_file),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Provider(ProviderError::CliNotFound { program }) => {
            let provider = [Provider::Aws, Provider::Azure, Provider::Gcp]
                .into_iter()
                .find(|p| p.cli_program() == program.as_str());
            if let Some(provider) = provider {
                eprintln!();
                eprintln!("Hint: Install the {} CLI: {}", provider, provider.install_hint());
            }
        }
        AppError::Config(ConfigError::MissingRequiredVariable(_)) => {
            eprintln!();
            eprintln!("Hint: See .env.example for the variables each provider needs.");
        }
        _ => {}
    }
}
