//! Weapon dial spec loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::WeaponSpec;

use crate::loaders::{LoadResult, read_file};

/// Loader for weapon timing configurations from RON files.
///
/// RON format: `Vec<(String, WeaponSpec)>`, keyed by weapon id. Band sums
/// are checked again during catalog assembly; this loader only parses.
pub struct WeaponLoader;

impl WeaponLoader {
    pub fn load(path: &Path) -> LoadResult<HashMap<String, WeaponSpec>> {
        let content = read_file(path)?;
        let raw: Vec<(String, WeaponSpec)> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;

        let mut weapons = HashMap::with_capacity(raw.len());
        for (id, weapon) in raw {
            if weapons.insert(id.clone(), weapon).is_some() {
                return Err(anyhow::anyhow!("Duplicate weapon id '{}'", id));
            }
        }
        Ok(weapons)
    }
}
