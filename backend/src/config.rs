//! # Ledger Configuration
//!
//! Optional YAML file with tunables for the goal and transaction services.
//! Every field has a default, so a partial file (or no file) is valid.
//!
//! ```yaml
//! max_description_length: 256
//! recent_transactions_limit: 3
//! default_period_days: 30
//! default_standard_deadline_days: 30
//! default_survival_title: "Выживание"
//! ```

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Upper bound on transaction description length, in characters
    pub max_description_length: usize,
    /// How many transactions a goal card shows as "recent"
    pub recent_transactions_limit: usize,
    /// Period length used when a survival goal is created without an end date
    pub default_period_days: u32,
    /// Deadline offset used when a standard goal is created without a deadline
    pub default_standard_deadline_days: u32,
    /// Title used when a survival goal is created without one
    pub default_survival_title: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_description_length: 256,
            recent_transactions_limit: 3,
            default_period_days: 30,
            default_standard_deadline_days: 30,
            default_survival_title: "Выживание".to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: LedgerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file, or the defaults when `path` does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&yaml)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded ledger config from {:?}: {:?}", path, config);
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_description_length == 0 {
            bail!("max_description_length must be at least 1");
        }
        if self.default_period_days == 0 {
            bail!("default_period_days must be at least 1");
        }
        if self.default_survival_title.trim().is_empty() {
            bail!("default_survival_title cannot be empty");
        }
        Ok(())
    }
}
