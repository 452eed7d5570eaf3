use clap::Parser;
use flota_validation::app::commands::{self, exit_code, exit_status};
use flota_validation::utils::{logger, validation::Validate};
use flota_validation::{CliConfig, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    if config.json_logging() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting flota CLI");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    match commands::run(&cli.command, &config).await {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(exit_status(false)),
        Err(err) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                err,
                err.category(),
                err.severity()
            );
            eprintln!("❌ {}", err.user_friendly_message());
            eprintln!("💡 {}", err.recovery_suggestion());
            std::process::exit(exit_code(&err));
        }
    }
}
