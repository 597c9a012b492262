use clap::Parser;
use courtside::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match cli::load_and_merge_config(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::init_logger_from_settings(&settings) {
        eprintln!("Logger initialization error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = cli::execute_command(&cli, settings).await {
        tracing::error!(error = %e, "Command execution failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
