//! Enemy type catalog loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{EnemyType, EnemyTypeId};

use crate::loaders::{LoadResult, read_file};

/// Loader for enemy templates from RON files.
///
/// RON format: `Vec<(String, EnemyType)>`, keyed by enemy type id.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<HashMap<EnemyTypeId, EnemyType>> {
        let content = read_file(path)?;
        let raw: Vec<(String, EnemyType)> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        let mut enemies = HashMap::with_capacity(raw.len());
        for (id, enemy) in raw {
            if enemies.insert(EnemyTypeId::from(id.clone()), enemy).is_some() {
                return Err(anyhow::anyhow!("Duplicate enemy type id '{}'", id));
            }
        }
        Ok(enemies)
    }
}
