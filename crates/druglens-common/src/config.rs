//! Runtime configuration for druglens.
//!
//! Reads `druglens.toml` from the current directory, or the path in the
//! `DRUGLENS_CONFIG` env var. Every key is optional; a missing file means
//! defaults. The `PORT` env var overrides `server.port` so hosting platforms
//! can assign the listen port.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{DruglensError, Result};

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "DRUGLENS_CONFIG";

/// Config file looked up in the working directory when `DRUGLENS_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "druglens.toml";

/// Env var overriding `server.port`.
pub const PORT_ENV: &str = "PORT";

/// Complete druglens configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub rdkit: RdkitConfig,

    #[serde(default)]
    pub pharmacokinetics: PharmacokineticPolicy,
}

// ── Server ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 10000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── RDKit backend ─────────────────────────────────────────────────────────────

/// Settings for the RDKit bridge process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdkitConfig {
    /// Python interpreter with the `rdkit` package importable
    #[serde(default = "default_python")]
    pub python: String,

    /// Wall-clock limit for one descriptor calculation
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_python() -> String { "python3".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for RdkitConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── Pharmacokinetic policy ────────────────────────────────────────────────────

/// Thresholds behind the HIA and BBB estimates.
///
/// These are very rough heuristics with no literature citation, not model
/// outputs. Both comparisons are strict (`<`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacokineticPolicy {
    /// HIA is "High" when logP is below this value
    #[serde(default = "default_hia_max_logp")]
    pub hia_max_logp: f64,

    /// BBB penetration requires logP below this value...
    #[serde(default = "default_bbb_max_logp")]
    pub bbb_max_logp: f64,

    /// ...and molecular weight below this value
    #[serde(default = "default_bbb_max_molecular_weight")]
    pub bbb_max_molecular_weight: f64,
}

fn default_hia_max_logp() -> f64 { 3.0 }
fn default_bbb_max_logp() -> f64 { 3.0 }
fn default_bbb_max_molecular_weight() -> f64 { 400.0 }

impl Default for PharmacokineticPolicy {
    fn default() -> Self {
        Self {
            hia_max_logp: default_hia_max_logp(),
            bbb_max_logp: default_bbb_max_logp(),
            bbb_max_molecular_weight: default_bbb_max_molecular_weight(),
        }
    }
}

impl PharmacokineticPolicy {
    /// All thresholds must be finite; the weight cutoff must be positive.
    pub fn validate(&self) -> bool {
        self.hia_max_logp.is_finite()
            && self.bbb_max_logp.is_finite()
            && self.bbb_max_molecular_weight.is_finite()
            && self.bbb_max_molecular_weight > 0.0
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl Config {
    /// Load configuration from `DRUGLENS_CONFIG` or `druglens.toml`, then
    /// apply the `PORT` override.
    ///
    /// An explicitly named file that does not exist is an error; a missing
    /// default file is not.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var(CONFIG_ENV).ok();
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            info!("Loading configuration from {}", path);
            Self::from_file(&path)?
        } else if explicit.is_some() {
            return Err(DruglensError::Config(format!(
                "{} points to a missing file: {}",
                CONFIG_ENV, path
            )));
        } else {
            info!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
            Self::default()
        };

        config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Replace `server.port` with the value of a `PORT`-style variable, if set.
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<()> {
        if let Some(raw) = port {
            self.server.port = raw.trim().parse().map_err(|_| {
                DruglensError::Config(format!("{} is not a valid port: {:?}", PORT_ENV, raw))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.rdkit.python.trim().is_empty() {
            return Err(DruglensError::Config("rdkit.python must not be empty".to_string()));
        }
        if self.rdkit.timeout_secs == 0 {
            return Err(DruglensError::Config("rdkit.timeout_secs must be at least 1".to_string()));
        }
        if !self.pharmacokinetics.validate() {
            return Err(DruglensError::Config(
                "pharmacokinetics thresholds must be finite and the weight cutoff positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
