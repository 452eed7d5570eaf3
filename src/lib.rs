pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use adapters::InMemoryReferences;
pub use crate::core::engine::ValidationEngine;
pub use crate::core::numeric::{validate_float, validate_float_with, FloatError};
pub use crate::core::rut::{validate_rut, Rut, RutError};
pub use domain::model::{NumericInput, Outcome, PayloadKind, ValidationErrors, ValidationSettings};
pub use utils::error::{FlotaError, Result};
