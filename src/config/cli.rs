use crate::domain::model::PayloadKind;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "flota")]
#[command(about = "Request validation for the fire-department fleet backend")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check Chilean RUTs (dots and dash optional)
    Rut {
        #[arg(required = true)]
        ruts: Vec<String>,
    },

    /// Check non-negative measurements (km, hour meters, liters)
    Number {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,

        /// Require the whole value to be numeric instead of a numeric prefix
        #[arg(long)]
        strict: bool,
    },

    /// Check e-mail address shape
    Email {
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// Show the LIMIT/OFFSET window for `?page=&pageSize=`
    Page {
        #[arg(long, allow_hyphen_values = true)]
        page: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        page_size: Option<String>,
    },

    /// Validate a JSON request body
    Payload {
        #[arg(short, long, value_enum)]
        kind: PayloadKind,

        /// JSON file holding the request body
        #[arg(short, long)]
        file: String,

        /// CSV of existing rows (`table,id`); overrides `references.path`
        #[arg(short, long)]
        references: Option<String>,
    },
}
