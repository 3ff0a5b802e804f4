use std::env;

use billsplit_domain::{RoundingMode, SettlementContext};
use thiserror::Error;

pub const ROUNDING_VAR: &str = "BILLSPLIT_ROUNDING";
pub const OUTPUT_VAR: &str = "BILLSPLIT_OUTPUT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be one of {expected}, got '{value}'")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Runtime settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub rounding_mode: RoundingMode,
    pub output: OutputFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let rounding_mode = match lookup(ROUNDING_VAR) {
            Some(value) => parse_rounding_mode(&value)?,
            None => RoundingMode::default(),
        };
        let output = match lookup(OUTPUT_VAR) {
            Some(value) => parse_output_format(&value)?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            rounding_mode,
            output,
        })
    }

    pub fn settlement_context(&self) -> SettlementContext {
        SettlementContext::with_rounding_mode(self.rounding_mode)
    }
}

fn parse_rounding_mode(value: &str) -> Result<RoundingMode, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "half_up" => Ok(RoundingMode::HalfUp),
        "half_even" => Ok(RoundingMode::HalfEven),
        _ => Err(ConfigError::InvalidValue {
            var: ROUNDING_VAR,
            value: value.to_string(),
            expected: "half_up, half_even",
        }),
    }
}

fn parse_output_format(value: &str) -> Result<OutputFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(ConfigError::InvalidValue {
            var: OUTPUT_VAR,
            value: value.to_string(),
            expected: "text, json",
        }),
    }
}
