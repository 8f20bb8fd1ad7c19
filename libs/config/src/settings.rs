//! Settings Module
//!
//! Provides settings loading for tools built on the Ivy core.
//! Layers, lowest to highest precedence: built-in defaults, an optional TOML
//! file, then `IVY__`-prefixed environment variables
//! (`IVY__CURVE__FEE_POLICY=clamp`).

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::protocol::{GAME_DECIMALS, IVY_DECIMALS, USDC_DECIMALS};

/// Largest scale a `rust_decimal::Decimal` can carry
const MAX_DECIMAL_SCALE: u32 = 28;

/// Main settings structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Settings {
    /// Global settings
    #[serde(default)]
    pub global: GlobalSettings,

    /// Curve engine behavior
    #[serde(default)]
    pub curve: CurveSettings,

    /// Token decimal overrides
    #[serde(default)]
    pub tokens: TokenSettings,

    /// Comment page decoding
    #[serde(default)]
    pub comments: CommentSettings,
}

/// Global settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GlobalSettings {
    pub log_level: String,
    pub json_logs: bool,
}

/// How fee basis points above 10000 are treated
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeePolicy {
    /// Out-of-range fees are a precondition error
    #[default]
    Reject,
    /// Out-of-range fees are clamped to 10000 bps
    Clamp,
}

/// Curve engine settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct CurveSettings {
    #[serde(default)]
    pub fee_policy: FeePolicy,
}

/// Token decimals used when scaling raw on-chain integers
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TokenSettings {
    pub ivy_decimals: u32,
    pub usdc_decimals: u32,
    pub game_decimals: u32,
}

/// Comment page layout
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct CommentSettings {
    /// Bytes skipped at the start of every page
    #[serde(default)]
    pub page_header_len: usize,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            ivy_decimals: IVY_DECIMALS,
            usdc_decimals: USDC_DECIMALS,
            game_decimals: GAME_DECIMALS,
        }
    }
}

impl Settings {
    /// Load settings from an optional file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults =
            Config::try_from(&Settings::default()).context("Failed to encode default settings")?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = path {
            info!("Loading settings file: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        } else {
            debug!("No settings file given, using defaults");
        }

        // Override with environment variables (IVY__ prefix)
        builder = builder.add_source(
            Environment::with_prefix("IVY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .context("Failed to build settings")?
            .try_deserialize()
            .context("Failed to deserialize settings")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the core cannot honor
    pub fn validate(&self) -> Result<()> {
        for (name, decimals) in [
            ("ivy_decimals", self.tokens.ivy_decimals),
            ("usdc_decimals", self.tokens.usdc_decimals),
            ("game_decimals", self.tokens.game_decimals),
        ] {
            if decimals > MAX_DECIMAL_SCALE {
                bail!("{name} = {decimals} exceeds the maximum decimal scale {MAX_DECIMAL_SCALE}");
            }
        }

        match self.global.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => bail!("Unknown log level '{other}'"),
        }
    }

    /// Render the effective settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }
}

/// Convenience function to load settings, falling back to defaults
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    Settings::load(path)
}
