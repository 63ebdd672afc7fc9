use clap::Parser;

use alvincora_cli::{run, Cli, CliError};
use alvincora_convert::FedoraConfig;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = FedoraConfig::from_env()
        .map_err(CliError::from)
        .and_then(|config| run(&cli, config, &mut std::io::stdout().lock()));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
