use crate::state::Building;
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Links a building to the resource it feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLink {
    pub building: String,
    pub resource: String,
}

impl ProductionLink {
    pub fn new(building: impl Into<String>, resource: impl Into<String>) -> Self {
        Self { building: building.into(), resource: resource.into() }
    }

    /// compiler → cpu, memory → memory.
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("compiler", "cpu"), Self::new("memory", "memory")]
    }
}

/// The timed "start coding" command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualCodeConfig {
    pub duration_secs: f64,
    pub resource:      String,
    pub amount:        f64,
}

impl Default for ManualCodeConfig {
    fn default() -> Self {
        Self {
            duration_secs: 5.0,
            resource:      "features".into(),
            amount:        1.0,
        }
    }
}

impl ManualCodeConfig {
    /// Unrepresentable values map to zero, which `Timer::new` rejects.
    /// [`SimConfig::validate`] refuses them up front.
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration_secs).unwrap_or(Duration::ZERO)
    }
}

/// The instant "write a line" command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualClickConfig {
    pub resource: String,
    pub amount:   f64,
}

impl Default for ManualClickConfig {
    fn default() -> Self {
        Self { resource: "lines".into(), amount: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tick_period_ms: u64,
    pub manual_code:    ManualCodeConfig,
    pub manual_click:   ManualClickConfig,
    pub production:     Vec<ProductionLink>,
    /// Seeded into the state store when the game is created.
    pub buildings:      Vec<Building>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 1000,
            manual_code:    ManualCodeConfig::default(),
            manual_click:   ManualClickConfig::default(),
            production:     ProductionLink::defaults(),
            buildings:      Vec::new(),
        }
    }
}

impl SimConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SimConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.tick_period_ms > 0, "tick_period_ms must be greater than zero");
        let secs = self.manual_code.duration_secs;
        ensure!(
            Duration::try_from_secs_f64(secs).map_or(false, |d| !d.is_zero()),
            "manual_code.duration_secs must be a positive, representable duration, got {secs}"
        );
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}
