use std::path::{Path, PathBuf};

use anyhow::Context;
use arl_gate::GateConfig;
use serde::{Deserialize, Serialize};

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "arl.toml";

/// `arl` configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// JSON file backing the ledger.
    pub ledger_path: PathBuf,
    /// Default tracing level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
    /// Argument limits.
    pub gate: GateConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("arl-ledger.json"),
            log_level: "info".into(),
            gate: GateConfig::default(),
        }
    }
}

impl CliConfig {
    /// `explicit` if given, else `./arl.toml` if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self =
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
        config
            .gate
            .validate()
            .with_context(|| format!("invalid [gate] in {}", path.display()))?;
        Ok(config)
    }
}
