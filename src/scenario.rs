use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    config::GameConfig,
    engine::{EngineBuilder, EngineSettings},
};

fn default_width() -> usize {
    10
}

fn default_height() -> usize {
    10
}

fn default_seconds() -> u64 {
    600
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_seconds")]
    pub seconds: u64,
    #[serde(default)]
    pub config: GameConfig,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario
            .config
            .validate()
            .with_context(|| format!("Invalid game tables in {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn engine(&self, seed_override: Option<u64>) -> EngineBuilder {
        EngineBuilder::new(EngineSettings {
            seed: seed_override.unwrap_or(self.seed),
            width: self.width,
            height: self.height,
        })
        .with_config(self.config.clone())
    }

    pub fn seconds(&self, override_seconds: Option<u64>) -> u64 {
        override_seconds.unwrap_or(self.seconds)
    }
}
