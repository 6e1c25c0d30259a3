// src/config.rs

use crate::common::{
    error::ConfigError,
    model::{self, SensorModel, DEFAULT_MODEL},
    timing,
};
use crate::poller::PollConfig;
use crate::sensor::{LinkSettings, DEFAULT_PORT};
use core::time::Duration;
use serde::Deserialize;
use std::path::Path;

/// Name of the table holding the sensor options in a configuration file.
pub const CONFIG_SECTION: &str = "Maxbotix";

/// Sensor options as written in the `[Maxbotix]` table. Durations are seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorConfig {
    pub port: String,
    pub model: String,
    pub baudrate: u32,
    pub timeout: f64,
    pub max_tries: u32,
    pub retry_wait: f64,
    pub poll_interval: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            port: DEFAULT_PORT.into(),
            model: DEFAULT_MODEL.into(),
            baudrate: timing::DEFAULT_BAUD_RATE,
            timeout: timing::DEFAULT_READ_TIMEOUT.as_secs_f64(),
            max_tries: timing::DEFAULT_MAX_TRIES,
            retry_wait: timing::DEFAULT_RETRY_WAIT.as_secs_f64(),
            poll_interval: timing::DEFAULT_POLL_INTERVAL.as_secs_f64(),
        }
    }
}

#[derive(Deserialize)]
struct Document {
    #[serde(rename = "Maxbotix")]
    maxbotix: Option<SensorConfig>,
}

/// Configuration that passed validation, split per component.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    pub model: &'static SensorModel,
    pub link: LinkSettings,
    pub poll: PollConfig,
}

fn seconds(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    if value < 0.0 {
        return Err(ConfigError::InvalidDuration { field, value });
    }
    // Rejects NaN, infinity and overflow
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDuration { field, value })
}

impl SensorConfig {
    /// Parses the `[Maxbotix]` table out of a TOML document. Other tables are ignored.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let document: Document = toml::from_str(document)?;
        document
            .maxbotix
            .ok_or(ConfigError::MissingSection(CONFIG_SECTION))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let model = model::lookup(&self.model)?;
        if self.baudrate == 0 {
            return Err(ConfigError::InvalidBaudRate);
        }
        let link = LinkSettings {
            port: self.port.clone(),
            baud_rate: self.baudrate,
            read_timeout: seconds("timeout", self.timeout)?,
        };
        let poll = PollConfig::new(
            self.max_tries,
            seconds("retry_wait", self.retry_wait)?,
            seconds("poll_interval", self.poll_interval)?,
        )?;

        tracing::info!(
            port = %link.port,
            model = model.id,
            baudrate = link.baud_rate,
            timeout = ?link.read_timeout,
            max_tries = poll.max_tries(),
            retry_wait = ?poll.retry_wait(),
            poll_interval = ?poll.poll_interval(),
            "sensor configuration"
        );
        Ok(ValidatedConfig { model, link, poll })
    }
}
