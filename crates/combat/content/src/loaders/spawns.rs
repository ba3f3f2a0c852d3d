//! Spawn pool loader.

use std::path::Path;

use combat_core::SpawnEntry;

use crate::loaders::{LoadResult, read_file};

/// Loader for spawn-pool memberships from RON files.
///
/// RON format: `Vec<SpawnEntry>`. Order matters: it fixes the deterministic
/// first-seen tiebreak of the weighted enemy draw.
pub struct SpawnLoader;

impl SpawnLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SpawnEntry>> {
        let content = read_file(path)?;
        let spawns: Vec<SpawnEntry> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spawn pool RON: {}", e))?;

        for (index, spawn) in spawns.iter().enumerate() {
            if spawn.min_level > spawn.max_level {
                return Err(anyhow::anyhow!(
                    "Spawn entry {} ('{}') has inverted level window {}..{}",
                    index,
                    spawn.enemy_type,
                    spawn.min_level,
                    spawn.max_level
                ));
            }
        }
        Ok(spawns)
    }
}
