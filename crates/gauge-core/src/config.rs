//! Service configuration. Everything that varies per deployment lives in
//! explicit structs handed to the server at startup; there is no ambient
//! global state. YAML file first, `GAUGE_*` environment overrides second.

use crate::errors::GaugeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Items evaluated concurrently within one batch.
    pub max_parallel_items: usize,
    /// Timeout for a single metric on a single item.
    pub metric_timeout_secs: u64,
    /// Timeout for an entire batch call.
    pub call_timeout_secs: u64,
    pub max_batch_size: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_parallel_items: 4,
            metric_timeout_secs: 60,
            call_timeout_secs: 300,
            max_batch_size: 100,
        }
    }
}

/// Which scoring collaborator backs the metric vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JudgeConfig {
    /// Deterministic configured scores; default for tests and local runs.
    Fixed {
        #[serde(default = "default_fixed_score")]
        default_score: f64,
        #[serde(default)]
        scores: BTreeMap<String, f64>,
    },
    /// External scoring service reached over HTTP.
    Http {
        endpoint: String,
        #[serde(default = "default_judge_timeout")]
        timeout_secs: u64,
    },
}

fn default_fixed_score() -> f64 {
    0.8
}

fn default_judge_timeout() -> u64 {
    90
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self::Fixed {
            default_score: default_fixed_score(),
            scores: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub engine: EngineSettings,
    pub judge: JudgeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8001".into(),
            engine: EngineSettings::default(),
            judge: JudgeConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, GaugeError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GaugeError::Config(format!("failed to read config {}: {}", path.display(), e))
        })?;
        let cfg: Self = serde_yaml::from_str(&raw)
            .map_err(|e| GaugeError::Config(format!("failed to parse YAML: {}", e)))?;
        Ok(cfg)
    }

    /// Defaults, then the config file if given, then env overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self, GaugeError> {
        let mut cfg = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        cfg.apply_env()?;
        Ok(cfg)
    }

    pub fn apply_env(&mut self) -> Result<(), GaugeError> {
        if let Ok(addr) = std::env::var("GAUGE_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(n) = env_parse::<usize>("GAUGE_MAX_PARALLEL_ITEMS")? {
            self.engine.max_parallel_items = n.max(1);
        }
        if let Some(n) = env_parse::<u64>("GAUGE_METRIC_TIMEOUT_SECS")? {
            self.engine.metric_timeout_secs = n;
        }
        if let Some(n) = env_parse::<u64>("GAUGE_CALL_TIMEOUT_SECS")? {
            self.engine.call_timeout_secs = n;
        }
        if let Some(n) = env_parse::<usize>("GAUGE_MAX_BATCH_SIZE")? {
            self.engine.max_batch_size = n;
        }
        if let Ok(endpoint) = std::env::var("GAUGE_JUDGE_ENDPOINT") {
            self.judge = JudgeConfig::Http {
                endpoint,
                timeout_secs: default_judge_timeout(),
            };
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, GaugeError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| GaugeError::Config(format!("invalid value for {}: {}", key, raw))),
        Err(_) => Ok(None),
    }
}
