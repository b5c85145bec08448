use std::env::var;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use dotenvy::dotenv;
use thiserror::Error;

use crate::{domain::models::LeadWindow, infrastructure::repositories::sheets::ServiceAccountKey};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required settings: {}", .0.join(", "))]
    Missing(Vec<String>),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Server settings, read once at startup.
pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
}

impl Config {
    pub fn try_parse() -> Result<Config, ConfigError> {
        let _ = dotenv();

        let mut missing = Vec::new();
        let mut required = |name: &'static str| -> String {
            match var(name) {
                Ok(value) if !value.trim().is_empty() => value,
                _ => {
                    missing.push(name.to_string());
                    String::new()
                }
            }
        };

        let port = required("PORT");
        let scheme = required("SCHEME");
        let host = required("HOST");

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(Config {
            port: port.parse::<u16>().map_err(|err| ConfigError::Invalid {
                name: "PORT",
                reason: err.to_string(),
            })?,
            scheme,
            host,
        })
    }
}

/// Everything one dispatch pass needs. Re-read from the environment at each
/// invocation so missing settings surface as an error response rather than a
/// startup crash.
#[derive(Debug)]
pub struct ReminderConfig {
    pub class_time: DateTime<FixedOffset>,
    pub class_title: String,
    pub join_link: String,
    pub default_region_prefix: String,
    pub channel_scheme: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_from: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub sheet_id: String,
    pub sheet_range: String,
    pub credentials: ServiceAccountKey,
    pub windows: Vec<LeadWindow>,
    pub generation_timeout: Duration,
    pub delivery_timeout: Duration,
}

impl ReminderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|name| var(name).ok())
    }

    /// Missing required keys are collected first so one response can name
    /// them all.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut required = |name: &'static str| -> String {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => value,
                _ => {
                    missing.push(name.to_string());
                    String::new()
                }
            }
        };

        let class_datetime = required("CLASS_DATETIME");
        let join_link = required("CLASS_JOIN_LINK");
        let twilio_account_sid = required("TWILIO_ACCOUNT_SID");
        let twilio_auth_token = required("TWILIO_AUTH_TOKEN");
        let twilio_from = required("TWILIO_WHATSAPP_FROM");
        let openai_api_key = required("OPENAI_API_KEY");
        let sheet_id = required("SHEET_ID");
        let creds_b64 = required("GOOGLE_CREDS_B64");

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let class_time =
            DateTime::parse_from_rfc3339(&class_datetime).map_err(|err| ConfigError::Invalid {
                name: "CLASS_DATETIME",
                reason: err.to_string(),
            })?;

        let credentials =
            ServiceAccountKey::from_base64(&creds_b64).map_err(|err| ConfigError::Invalid {
                name: "GOOGLE_CREDS_B64",
                reason: err.to_string(),
            })?;

        Ok(Self {
            class_time,
            class_title: lookup("CLASS_TITLE")
                .unwrap_or_else(|| "Roadmap to Data Engineering".to_string()),
            join_link,
            default_region_prefix: lookup("DEFAULT_REGION_PREFIX")
                .unwrap_or_else(|| "+91".to_string()),
            channel_scheme: lookup("CHANNEL_SCHEME").unwrap_or_else(|| "whatsapp".to_string()),
            twilio_account_sid,
            twilio_auth_token,
            twilio_from,
            openai_api_key,
            openai_model: lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            sheet_id,
            sheet_range: lookup("SHEET_RANGE").unwrap_or_else(|| "Sheet1".to_string()),
            credentials,
            windows: LeadWindow::defaults(),
            generation_timeout: seconds(&lookup, "GENERATION_TIMEOUT_SECS", 30)?,
            delivery_timeout: seconds(&lookup, "DELIVERY_TIMEOUT_SECS", 15)?,
        })
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|err| ConfigError::Invalid {
                name,
                reason: err.to_string(),
            }),
        None => Ok(Duration::from_secs(default)),
    }
}
