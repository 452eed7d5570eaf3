use crate::domain::model::{FloatParsing, PaginationDefaults, ValidationSettings};
use crate::utils::error::{FlotaError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_positive_number, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_PAGE_SIZE_LIMIT: u32 = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub validation: ValidationSection,
    #[serde(default)]
    pub pagination: PaginationSection,
    pub references: Option<ReferencesSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSection {
    pub float_parsing: Option<FloatParsing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationSection {
    pub default_page_size: Option<u32>,
    pub max_page_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencesSection {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FlotaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FlotaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FlotaError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let pagination = self.pagination_defaults();

        validate_positive_number("pagination.default_page_size", pagination.default_page_size, 1)?;

        if let Some(max) = pagination.max_page_size {
            validate_range("pagination.max_page_size", max, 1, MAX_PAGE_SIZE_LIMIT)?;
            if pagination.default_page_size > max {
                return Err(FlotaError::InvalidConfigValueError {
                    field: "pagination.default_page_size".to_string(),
                    value: pagination.default_page_size.to_string(),
                    reason: format!("Value must not exceed pagination.max_page_size ({})", max),
                });
            }
        }

        if let Some(path) = self.references_path() {
            validate_path("references.path", path)?;
            validate_file_extension("references.path", path, &["csv"])?;
        }

        Ok(())
    }

    pub fn float_parsing(&self) -> FloatParsing {
        self.validation.float_parsing.unwrap_or_default()
    }

    pub fn pagination_defaults(&self) -> PaginationDefaults {
        let defaults = PaginationDefaults::default();
        PaginationDefaults {
            default_page_size: self
                .pagination
                .default_page_size
                .unwrap_or(defaults.default_page_size),
            max_page_size: self.pagination.max_page_size.or(defaults.max_page_size),
        }
    }

    pub fn settings(&self) -> ValidationSettings {
        ValidationSettings {
            float_parsing: self.float_parsing(),
            pagination: self.pagination_defaults(),
        }
    }

    pub fn references_path(&self) -> Option<&str> {
        self.references.as_ref().map(|r| r.path.as_str())
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
