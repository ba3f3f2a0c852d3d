//! Loot table loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{EnemyTypeId, LootEntry};

use crate::loaders::{LoadResult, read_file};

/// Loader for per-enemy loot tables from RON files.
///
/// RON format: `Vec<(String, Vec<LootEntry>)>`, keyed by enemy type id.
pub struct LootLoader;

impl LootLoader {
    pub fn load(path: &Path) -> LoadResult<HashMap<EnemyTypeId, Vec<LootEntry>>> {
        let content = read_file(path)?;
        let raw: Vec<(String, Vec<LootEntry>)> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loot table RON: {}", e))?;

        let mut tables = HashMap::with_capacity(raw.len());
        for (id, entries) in raw {
            if entries.is_empty() {
                return Err(anyhow::anyhow!("Loot table for '{}' is empty", id));
            }
            if tables.insert(EnemyTypeId::from(id.clone()), entries).is_some() {
                return Err(anyhow::anyhow!("Duplicate loot table for '{}'", id));
            }
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::Lootable;

    #[test]
    fn parses_material_and_item_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loot.ron");
        std::fs::write(
            &path,
            r#"[
                ("ghost", [
                    (lootable: Material("ectoplasm"), weight: 80, guaranteed: true),
                    (lootable: Item("haunted_ring"), weight: 5),
                ]),
            ]"#,
        )
        .unwrap();

        let tables = LootLoader::load(&path).unwrap();
        let entries = tables.get(&EnemyTypeId::from("ghost")).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].guaranteed);
        assert!(matches!(entries[1].lootable, Lootable::Item(_)));
        assert!(!entries[1].guaranteed);
    }
}
