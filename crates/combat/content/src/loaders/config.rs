//! Balance configuration loader.

use std::path::Path;

use combat_core::BalanceConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance parameters from TOML files.
///
/// Missing keys fall back to the reference defaults, so a balance file only
/// needs to name the values it overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<BalanceConfig> {
        let content = read_file(path)?;
        let config: BalanceConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse balance TOML: {}", e))?;
        Ok(config)
    }
}
