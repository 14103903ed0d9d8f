//! Runtime configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{MAX_SEVERITY, MIN_SEVERITY};

/// Tunables for the session core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoreConfig {
    /// Simulated sign-in round trip
    pub auth_latency_ms: u64,
    /// Refuse doctors that are not taking new bookings
    pub require_accepting_bookings: bool,
    /// Severity the intake form starts at
    pub default_severity: u8,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            auth_latency_ms: 1000,
            require_accepting_bookings: true,
            default_severity: 5,
        }
    }
}

impl CoreConfig {
    /// Parse from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CoreConfig =
            serde_json::from_str(json).context("Failed to parse core config")?;
        Ok(config.normalized())
    }

    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::from_json(&contents)
    }

    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }

    fn normalized(mut self) -> Self {
        self.default_severity = self.default_severity.clamp(MIN_SEVERITY, MAX_SEVERITY);
        self
    }
}
