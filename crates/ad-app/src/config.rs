//! Dashboard configuration file.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ad_core::{CompartmentChoice, PolymerType};
use ad_pipeline::{FilterParams, PolymerMatching};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

fn default_title() -> String {
    "Additives dashboard".to_string()
}

fn default_polymers() -> Vec<PolymerType> {
    PolymerType::ALL.to_vec()
}

/// Initial state of the filter controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDefaults {
    #[serde(default)]
    pub compartment: CompartmentChoice,
    #[serde(default = "default_polymers")]
    pub polymers: Vec<PolymerType>,
}

impl Default for ControlDefaults {
    fn default() -> Self {
        Self {
            compartment: CompartmentChoice::default(),
            polymers: default_polymers(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Dataset file; relative paths resolve against the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,
    #[serde(default)]
    pub polymer_matching: PolymerMatching,
    #[serde(default)]
    pub defaults: ControlDefaults,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            dataset: None,
            polymer_matching: PolymerMatching::default(),
            defaults: ControlDefaults::default(),
        }
    }
}

impl DashboardConfig {
    /// Filter state the dashboard starts in.
    pub fn filter_params(&self) -> FilterParams {
        FilterParams {
            compartment: self.defaults.compartment,
            polymers: self.defaults.polymers.iter().copied().collect::<BTreeSet<_>>(),
            matching: self.polymer_matching,
        }
    }

    /// Dataset path with relative paths anchored at `config_dir`.
    pub fn dataset_path(&self, config_dir: Option<&Path>) -> Option<PathBuf> {
        let path = self.dataset.as_ref()?;
        match config_dir {
            Some(dir) if path.is_relative() => Some(dir.join(path)),
            _ => Some(path.clone()),
        }
    }
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> AppResult<DashboardConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: DashboardConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;

    Ok(config)
}

/// Save configuration to a YAML file.
pub fn save_config(path: &Path, config: &DashboardConfig) -> AppResult<()> {
    let content = serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ConfigFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
