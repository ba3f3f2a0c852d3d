//! Difficulty tier loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{Tier, TierId};

use crate::loaders::{LoadResult, read_file};

/// Loader for difficulty tiers from RON files.
///
/// RON format: `Vec<(String, Tier)>`, keyed by tier id.
pub struct TierLoader;

impl TierLoader {
    pub fn load(path: &Path) -> LoadResult<HashMap<TierId, Tier>> {
        let content = read_file(path)?;
        let raw: Vec<(String, Tier)> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tier catalog RON: {}", e))?;

        let mut tiers = HashMap::with_capacity(raw.len());
        for (id, tier) in raw {
            if tier.difficulty_multiplier <= 0.0 {
                return Err(anyhow::anyhow!(
                    "Tier '{}' has non-positive difficulty multiplier {}",
                    id,
                    tier.difficulty_multiplier
                ));
            }
            if tiers.insert(TierId::from(id.clone()), tier).is_some() {
                return Err(anyhow::anyhow!("Duplicate tier id '{}'", id));
            }
        }
        Ok(tiers)
    }
}
