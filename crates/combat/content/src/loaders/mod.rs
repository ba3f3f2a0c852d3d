//! Content loaders for reading combat reference data from files.
//!
//! One loader per data kind, all converging on [`load_catalog`], which
//! assembles and validates a [`Catalog`](crate::Catalog) from a content
//! directory. Loaders return errors with enough context to name the
//! offending file and entry.

pub mod config;
pub mod enemies;
pub mod loot;
pub mod spawns;
pub mod tiers;
pub mod weapons;

pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use loot::LootLoader;
pub use spawns::SpawnLoader;
pub use tiers::TierLoader;
pub use weapons::WeaponLoader;

use std::path::Path;

use combat_core::BalanceConfig;

use crate::Catalog;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Load a full catalog plus balance config from a content directory.
///
/// Expects `enemies.ron`, `tiers.ron`, `weapons.ron`, `loot.ron`,
/// `spawns.ron`, and optionally `balance.toml` (defaults apply when absent).
pub fn load_catalog(dir: &Path) -> LoadResult<(Catalog, BalanceConfig)> {
    let enemies = EnemyLoader::load(&dir.join("enemies.ron"))?;
    let tiers = TierLoader::load(&dir.join("tiers.ron"))?;
    let weapons = WeaponLoader::load(&dir.join("weapons.ron"))?;
    let loot = LootLoader::load(&dir.join("loot.ron"))?;
    let spawns = SpawnLoader::load(&dir.join("spawns.ron"))?;

    let config_path = dir.join("balance.toml");
    let config = if config_path.exists() {
        ConfigLoader::load(&config_path)?
    } else {
        BalanceConfig::default()
    };
    config
        .enemy_bands
        .validate("balance.enemy_bands")
        .map_err(|e| anyhow::anyhow!("Invalid balance config: {}", e))?;

    let catalog = Catalog::from_parts(enemies, tiers, weapons, loot, spawns)
        .map_err(|e| anyhow::anyhow!("Catalog validation failed: {}", e))?;

    Ok((catalog, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENEMIES: &str = r#"[
        ("park_rat", (
            name: "Park Rat",
            distribution: (atk_power: 0.33, atk_accuracy: 0.27, def_power: 0.25, def_accuracy: 0.15),
            base_hp: 80.0,
            tier: "common",
        )),
    ]"#;

    const TIERS: &str = r#"[
        ("common", (
            label: "Common",
            difficulty_multiplier: 1.0,
            gold_multiplier: 1.0,
            xp_multiplier: 1.0,
        )),
    ]"#;

    const WEAPONS: &str = r#"[
        ("starter_sword", (
            name: "Starter Sword",
            bands: (injure: 20.0, miss: 40.0, graze: 80.0, normal: 160.0, crit: 60.0),
            rotation_speed: 1.2,
        )),
    ]"#;

    const LOOT: &str = r#"[
        ("park_rat", [
            (lootable: Material("rat_fur"), weight: 100),
            (lootable: Item("rusty_dagger"), weight: 10),
        ]),
    ]"#;

    const SPAWNS: &str = r#"[
        (enemy_type: "park_rat", scope: Global, min_level: 1, max_level: 99, weight: 10),
    ]"#;

    #[test]
    fn full_directory_loads_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("enemies.ron"), ENEMIES).unwrap();
        std::fs::write(dir.path().join("tiers.ron"), TIERS).unwrap();
        std::fs::write(dir.path().join("weapons.ron"), WEAPONS).unwrap();
        std::fs::write(dir.path().join("loot.ron"), LOOT).unwrap();
        std::fs::write(dir.path().join("spawns.ron"), SPAWNS).unwrap();

        let (catalog, config) = load_catalog(dir.path()).unwrap();
        assert_eq!(catalog.enemy_count(), 1);
        assert!(catalog.weapon("starter_sword").is_some());
        assert_eq!(config, BalanceConfig::default());
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(err.to_string().contains("enemies.ron"));
    }
}
