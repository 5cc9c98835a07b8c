//! Environment-based configuration.
//!
//! `SnapshotOptions` drives the extractors and is usable on its own as a library
//! type. `Config` wraps it with what the binary needs to connect and write output.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{config::ConfigError, SnapshotError};
use crate::util::parse::parse_u64_from_string;

const DEFAULT_MAX_MESSAGES_PER_CHANNEL: u8 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_READY_TIMEOUT_SECS: u64 = 60;

/// How emoji images are captured when not stored as remote URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    /// Download the image and inline it as standard base64.
    Base64,
}

/// Top-level snapshot sections that can be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSection {
    Bans,
    Members,
    Roles,
    Emojis,
    Channels,
}

impl FromStr for SnapshotSection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bans" => Ok(Self::Bans),
            "members" => Ok(Self::Members),
            "roles" => Ok(Self::Roles),
            "emojis" => Ok(Self::Emojis),
            "channels" => Ok(Self::Channels),
            other => Err(format!("unknown snapshot section '{}'", other)),
        }
    }
}

/// Options consumed by the extractors.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotOptions {
    /// `None` stores emoji remote URLs, `Some(Base64)` inlines the images.
    pub save_images: Option<ImageMode>,
    /// Messages captured per text channel and thread; 0 disables message capture.
    pub max_messages_per_channel: u8,
    /// Upper bound for each network-bound step.
    pub request_timeout: Duration,
    /// Sections left empty in the snapshot.
    pub skip: Vec<SnapshotSection>,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            save_images: None,
            max_messages_per_channel: DEFAULT_MAX_MESSAGES_PER_CHANNEL,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            skip: Vec::new(),
        }
    }
}

impl SnapshotOptions {
    pub fn includes(&self, section: SnapshotSection) -> bool {
        !self.skip.contains(&section)
    }
}

pub struct Config {
    pub discord_bot_token: String,
    pub guild_id: u64,

    pub output_path: PathBuf,
    pub pretty: bool,

    /// How long to wait for the guild to arrive over the gateway.
    pub ready_timeout: Duration,

    pub options: SnapshotOptions,
}

impl Config {
    pub fn from_env() -> Result<Self, SnapshotError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(SnapshotError::ConfigErr)` - Missing or invalid variable
    /// - `Err(SnapshotError::InternalErr)` - `GUILD_ID` is not a snowflake
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SnapshotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let discord_bot_token = require("DISCORD_BOT_TOKEN")?;
        let guild_id = parse_u64_from_string(require("GUILD_ID")?)?;

        let output_path = lookup("SNAPSHOT_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("snapshot-{}.json", guild_id)));

        let save_images = match lookup("SAVE_IMAGES") {
            None => None,
            Some(value) if value.trim().is_empty() => None,
            Some(value) if value.trim().eq_ignore_ascii_case("base64") => Some(ImageMode::Base64),
            Some(value) => {
                return Err(invalid("SAVE_IMAGES", value, "expected 'base64' or unset").into())
            }
        };

        let max_messages_per_channel = match lookup("MAX_MESSAGES_PER_CHANNEL") {
            None => DEFAULT_MAX_MESSAGES_PER_CHANNEL,
            Some(value) => value.trim().parse::<u8>().map_err(|e| {
                invalid("MAX_MESSAGES_PER_CHANNEL", value.clone(), &e.to_string())
            })?,
        };

        let request_timeout =
            seconds(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let ready_timeout = seconds(&lookup, "READY_TIMEOUT_SECS", DEFAULT_READY_TIMEOUT_SECS)?;

        let skip = match lookup("SNAPSHOT_SKIP") {
            None => Vec::new(),
            Some(value) => value
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| part.parse::<SnapshotSection>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|reason| invalid("SNAPSHOT_SKIP", value.clone(), &reason))?,
        };

        let pretty = match lookup("SNAPSHOT_PRETTY") {
            None => false,
            Some(value) => parse_bool(&value)
                .ok_or_else(|| invalid("SNAPSHOT_PRETTY", value.clone(), "expected a boolean"))?,
        };

        Ok(Self {
            discord_bot_token,
            guild_id,
            output_path,
            pretty,
            ready_timeout,
            options: SnapshotOptions {
                save_images,
                max_messages_per_channel,
                request_timeout,
                skip,
            },
        })
    }
}

fn seconds<F>(lookup: &F, name: &str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(Duration::from_secs(default)),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(0) => Err(invalid(name, value, "must be greater than zero")),
            Ok(secs) => Ok(Duration::from_secs(secs)),
            Err(e) => Err(invalid(name, value.clone(), &e.to_string())),
        },
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn invalid(name: &str, value: String, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
        reason: reason.to_string(),
    }
}
