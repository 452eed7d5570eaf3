//! What each `flota` subcommand does, kept out of `main` so the exit rules
//! can be exercised from tests.

use crate::adapters::InMemoryReferences;
use crate::config::toml_config::TomlConfig;
use crate::core::engine::ValidationEngine;
use crate::core::fields::validate_email;
use crate::core::numeric::check_float;
use crate::core::pagination::Pagination;
use crate::core::rut::Rut;
use crate::domain::model::{FloatParsing, NumericInput, Outcome, PayloadKind};
use crate::utils::error::{ErrorSeverity, FlotaError, Result};
use crate::utils::validation::validate_required_field;
use std::path::Path;

/// Some input was checked and rejected.
pub const EXIT_REJECTED: i32 = 4;

/// Process exit status once a command has run to completion.
pub fn exit_status(accepted: bool) -> i32 {
    if accepted {
        0
    } else {
        EXIT_REJECTED
    }
}

pub fn exit_code(err: &FlotaError) -> i32 {
    match err.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// Runs one subcommand. `Ok(false)` means some input was rejected.
#[cfg(feature = "cli")]
pub async fn run(command: &crate::config::cli::Command, config: &TomlConfig) -> Result<bool> {
    use crate::config::cli::Command;

    match command {
        Command::Rut { ruts } => Ok(check_ruts(ruts)),
        Command::Number { values, strict } => {
            let mode = if *strict {
                FloatParsing::Strict
            } else {
                config.float_parsing()
            };
            Ok(check_numbers(values, mode))
        }
        Command::Email { addresses } => Ok(check_emails(addresses)),
        Command::Page { page, page_size } => {
            let pagination = Pagination::from_query(
                page.as_deref(),
                page_size.as_deref(),
                &config.pagination_defaults(),
            );
            println!("{}", serde_json::to_string(&pagination)?);
            Ok(true)
        }
        Command::Payload {
            kind,
            file,
            references,
        } => check_payload(*kind, file, references.as_deref(), config).await,
    }
}

pub fn check_ruts(ruts: &[String]) -> bool {
    let mut all_valid = true;
    for input in ruts {
        match input.parse::<Rut>() {
            Ok(rut) => println!("✅ {} valid ({})", input, rut),
            Err(e) => {
                all_valid = false;
                println!("❌ {} invalid: {}", input, e);
            }
        }
    }
    all_valid
}

pub fn check_numbers(values: &[String], mode: FloatParsing) -> bool {
    let mut all_valid = true;
    for input in values {
        match check_float(&NumericInput::from(input.as_str()), mode) {
            Ok(value) => println!("✅ {} -> {}", input, value),
            Err(e) => {
                all_valid = false;
                println!("❌ {}: {}", input, e);
            }
        }
    }
    all_valid
}

pub fn check_emails(addresses: &[String]) -> bool {
    let mut all_valid = true;
    for address in addresses {
        if validate_email(address) {
            println!("✅ {}", address);
        } else {
            all_valid = false;
            println!("❌ {} is not a valid e-mail address", address);
        }
    }
    all_valid
}

/// Validates the JSON body in `file` against the reference CSV given on the
/// command line, or the one named in the config.
pub async fn check_payload<P: AsRef<Path>>(
    kind: PayloadKind,
    file: P,
    references: Option<&str>,
    config: &TomlConfig,
) -> Result<bool> {
    let references_path = references.or(config.references_path());
    let references_path = validate_required_field("references.path", &references_path)?;
    let references = InMemoryReferences::from_csv_file(references_path)?;
    tracing::info!("📁 Loaded {} reference rows", references.len());

    let content = tokio::fs::read_to_string(file.as_ref()).await.map_err(|e| {
        tracing::error!("Failed to read payload file '{}': {}", file.as_ref().display(), e);
        FlotaError::from(e)
    })?;
    let body: serde_json::Value = serde_json::from_str(&content)?;

    let engine = ValidationEngine::with_settings(references, config.settings());
    match engine.check(kind, &body).await? {
        Outcome::Valid(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(true)
        }
        Outcome::Invalid(errors) => {
            println!("{}", serde_json::to_string_pretty(&errors)?);
            Ok(false)
        }
    }
}
