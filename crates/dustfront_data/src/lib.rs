//! Descriptor loading for the Dustfront combat engine.
//!
//! Loads weapon (fire source) and gun descriptors from RON files,
//! validates them and registers them in an [`ArsenalRegistry`]. The
//! registry is the only way to instantiate runtime combat state: every
//! instantiation clones fresh, unshared state, so combatants sharing one
//! descriptor never share fire sources or in-flight projectiles.
//!
//! Loading is all-or-nothing: any malformed file, unknown direction
//! token or failed validation fails the whole load and leaves no
//! partially-registered state behind. Instantiating from an id that was
//! never loaded fails fast with a distinct error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dustfront_core::data::{FireSourceData, GunData, PresencePolicy};
use dustfront_core::direction::Direction;
use dustfront_core::fire_source::{FireSource, ProjectileKind, ProjectileScale};
use dustfront_core::firing_logic::FiringLogic;
use dustfront_core::math::{fixed_serde, Fixed, Vec2Fixed};
use dustfront_core::rotating_gun::RotatingGun;
use dustfront_core::specs::FiringProfile;

/// Errors that can occur during descriptor loading.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Failed to read file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON file.
    #[error("Failed to parse RON file '{path}': {source}")]
    ParseError {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Descriptor validation failed.
    #[error("Validation failed for descriptor '{id}': {errors:?}")]
    ValidationError {
        /// Descriptor that failed validation.
        id: String,
        /// List of validation errors.
        errors: Vec<String>,
    },

    /// A per-direction table used a token that names no direction.
    #[error("Unknown direction token '{token}' in '{path}'")]
    UnknownDirection {
        /// Path to the file.
        path: String,
        /// The offending token.
        token: String,
    },

    /// A per-direction table listed the same direction twice.
    #[error("Duplicate direction '{token}' in '{path}'")]
    DuplicateDirection {
        /// Path to the file.
        path: String,
        /// The duplicated token.
        token: String,
    },

    /// A per-direction table is missing a direction.
    #[error("Missing direction '{token}' in '{path}'")]
    MissingDirection {
        /// Path to the file.
        path: String,
        /// The absent token.
        token: String,
    },

    /// Duplicate descriptor ID.
    #[error("Duplicate descriptor ID: '{0}'")]
    DuplicateId(String),

    /// Instantiation from an ID that was never loaded.
    #[error("Descriptor '{0}' is not loaded")]
    NotLoaded(String),
}

/// Result type for data loading operations.
pub type DataLoadResult<T> = Result<T, DataLoadError>;

/// Weapon descriptor as authored on disk.
///
/// Per-direction tables are keyed by direction token rather than ring
/// index, so descriptors stay readable; conversion into
/// [`FireSourceData`] validates the tokens.
///
/// # Example RON
///
/// ```ron
/// WeaponDoc(
///     id: "tank_cannon",
///     kind: Shell,
///     scale: Medium,
///     gun_count: 1,
///     projectile_speed: 42949672960,  // Fixed-point for 10.0
///     fire_points: [
///         ("north", (x: 0, y: 6442450944)),
///         // ... seven more, one per direction
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponDoc {
    /// Unique string identifier.
    pub id: String,
    /// Projectile kind.
    pub kind: ProjectileKind,
    /// Projectile scale class.
    pub scale: ProjectileScale,
    /// Number of barrels rendered.
    pub gun_count: u32,
    /// Projectile speed (fixed-point bits).
    #[serde(with = "fixed_serde")]
    pub projectile_speed: Fixed,
    /// Launch offset per direction token.
    pub fire_points: Vec<(String, Vec2Fixed)>,
    /// Presence policy; defaults to both modes.
    #[serde(default)]
    pub presence: PresencePolicy,
}

/// Gun descriptor as authored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GunDoc {
    /// Unique string identifier.
    pub id: String,
    /// Texture atlas name.
    pub atlas: String,
    /// Sprite name per direction token.
    pub textures: Vec<(String, String)>,
    /// Sprite width (fixed-point bits).
    #[serde(with = "fixed_serde")]
    pub width: Fixed,
    /// Sprite height (fixed-point bits).
    #[serde(with = "fixed_serde")]
    pub height: Fixed,
    /// Recoil displacement per shot (fixed-point bits).
    #[serde(with = "fixed_serde")]
    pub recoil: Fixed,
    /// Recoil decay per second (fixed-point bits).
    #[serde(with = "fixed_serde")]
    pub recoil_resistance: Fixed,
    /// Rotation speed in steps per second (fixed-point bits).
    #[serde(with = "fixed_serde")]
    pub rotation_speed: Fixed,
    /// Pivot offset per direction token.
    pub rotation_offsets: Vec<(String, Vec2Fixed)>,
}

/// Resolve a token-keyed table into a ring-ordered array.
///
/// Every direction must appear exactly once; unknown and duplicate
/// tokens fail the load instead of being skipped.
fn direction_table<T: Clone>(
    path: &str,
    entries: &[(String, T)],
) -> DataLoadResult<[T; 8]> {
    let mut slots: [Option<T>; 8] = Default::default();
    for (token, value) in entries {
        let direction =
            Direction::from_name(token).ok_or_else(|| DataLoadError::UnknownDirection {
                path: path.to_string(),
                token: token.clone(),
            })?;
        let slot = &mut slots[direction.index() as usize];
        if slot.is_some() {
            return Err(DataLoadError::DuplicateDirection {
                path: path.to_string(),
                token: token.clone(),
            });
        }
        *slot = Some(value.clone());
    }

    for direction in Direction::ALL {
        if slots[direction.index() as usize].is_none() {
            return Err(DataLoadError::MissingDirection {
                path: path.to_string(),
                token: direction.name().to_string(),
            });
        }
    }

    Ok(slots.map(|slot| slot.expect("all slots filled above")))
}

impl WeaponDoc {
    /// Convert into validated core descriptor data.
    pub fn into_data(self, path: &str) -> DataLoadResult<FireSourceData> {
        let fire_points = direction_table(path, &self.fire_points)?;
        let data = FireSourceData {
            id: self.id,
            kind: self.kind,
            scale: self.scale,
            gun_count: self.gun_count,
            projectile_speed: self.projectile_speed,
            fire_points,
            presence: self.presence,
        };

        let errors = data.validate();
        if !errors.is_empty() {
            return Err(DataLoadError::ValidationError {
                id: data.id,
                errors,
            });
        }
        Ok(data)
    }

    /// Build the on-disk document form of core descriptor data.
    #[must_use]
    pub fn from_data(data: &FireSourceData) -> Self {
        Self {
            id: data.id.clone(),
            kind: data.kind,
            scale: data.scale,
            gun_count: data.gun_count,
            projectile_speed: data.projectile_speed,
            fire_points: Direction::ALL
                .iter()
                .map(|d| {
                    (
                        d.name().to_string(),
                        data.fire_points[d.index() as usize],
                    )
                })
                .collect(),
            presence: data.presence,
        }
    }
}

impl GunDoc {
    /// Convert into validated core descriptor data.
    pub fn into_data(self, path: &str) -> DataLoadResult<GunData> {
        let textures = direction_table(path, &self.textures)?;
        let rotation_offsets = direction_table(path, &self.rotation_offsets)?;
        let data = GunData {
            id: self.id,
            atlas: self.atlas,
            textures,
            width: self.width,
            height: self.height,
            recoil: self.recoil,
            recoil_resistance: self.recoil_resistance,
            rotation_speed: self.rotation_speed,
            rotation_offsets,
        };

        let errors = data.validate();
        if !errors.is_empty() {
            return Err(DataLoadError::ValidationError {
                id: data.id,
                errors,
            });
        }
        Ok(data)
    }

    /// Build the on-disk document form of core descriptor data.
    #[must_use]
    pub fn from_data(data: &GunData) -> Self {
        Self {
            id: data.id.clone(),
            atlas: data.atlas.clone(),
            textures: Direction::ALL
                .iter()
                .map(|d| {
                    (
                        d.name().to_string(),
                        data.textures[d.index() as usize].clone(),
                    )
                })
                .collect(),
            width: data.width,
            height: data.height,
            recoil: data.recoil,
            recoil_resistance: data.recoil_resistance,
            rotation_speed: data.rotation_speed,
            rotation_offsets: Direction::ALL
                .iter()
                .map(|d| {
                    (
                        d.name().to_string(),
                        data.rotation_offsets[d.index() as usize],
                    )
                })
                .collect(),
        }
    }
}

/// Registry containing all loaded weapon and gun descriptors.
#[derive(Debug, Clone, Default)]
pub struct ArsenalRegistry {
    /// Loaded weapon descriptors, indexed by id.
    weapons: HashMap<String, FireSourceData>,
    /// Loaded gun descriptors, indexed by id.
    guns: HashMap<String, GunData>,
}

impl ArsenalRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            weapons: HashMap::new(),
            guns: HashMap::new(),
        }
    }

    /// Register weapon descriptor data.
    ///
    /// # Errors
    ///
    /// Returns an error if a weapon with the same id is already
    /// registered.
    pub fn register_weapon(&mut self, data: FireSourceData) -> DataLoadResult<()> {
        if self.weapons.contains_key(&data.id) {
            return Err(DataLoadError::DuplicateId(data.id));
        }
        self.weapons.insert(data.id.clone(), data);
        Ok(())
    }

    /// Register gun descriptor data.
    ///
    /// # Errors
    ///
    /// Returns an error if a gun with the same id is already registered.
    pub fn register_gun(&mut self, data: GunData) -> DataLoadResult<()> {
        if self.guns.contains_key(&data.id) {
            return Err(DataLoadError::DuplicateId(data.id));
        }
        self.guns.insert(data.id.clone(), data);
        Ok(())
    }

    /// Get weapon descriptor data by id.
    #[must_use]
    pub fn weapon(&self, id: &str) -> Option<&FireSourceData> {
        self.weapons.get(id)
    }

    /// Get gun descriptor data by id.
    #[must_use]
    pub fn gun(&self, id: &str) -> Option<&GunData> {
        self.guns.get(id)
    }

    /// Number of registered weapons.
    #[must_use]
    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }

    /// Number of registered guns.
    #[must_use]
    pub fn gun_count(&self) -> usize {
        self.guns.len()
    }

    /// Check if the registry has nothing loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.guns.is_empty()
    }

    /// Instantiate independent fire source state from a loaded weapon.
    ///
    /// # Errors
    ///
    /// Fails fast with [`DataLoadError::NotLoaded`] if the id was never
    /// loaded; combat state must never be built from missing data.
    pub fn instantiate_fire_source(&self, id: &str) -> DataLoadResult<FireSource> {
        let data = self
            .weapons
            .get(id)
            .ok_or_else(|| DataLoadError::NotLoaded(id.to_string()))?;
        Ok(FireSource::from_data(data))
    }

    /// Instantiate an independent rotating gun from a loaded descriptor.
    ///
    /// The gun's fire sources are added separately; `sources` pairs the
    /// name to register with the weapon id to instantiate.
    ///
    /// # Errors
    ///
    /// Fails fast if the gun or any weapon id was never loaded, or if a
    /// source name repeats.
    pub fn instantiate_gun(
        &self,
        id: &str,
        profile: FiringProfile,
        sources: &[(&str, &str)],
    ) -> DataLoadResult<RotatingGun> {
        let data = self
            .guns
            .get(id)
            .ok_or_else(|| DataLoadError::NotLoaded(id.to_string()))?;
        let mut gun = RotatingGun::from_data(data, profile);
        for (name, weapon_id) in sources {
            let source = self.instantiate_fire_source(weapon_id)?;
            gun.add_source(*name, source)
                .map_err(|_| DataLoadError::DuplicateId((*name).to_string()))?;
        }
        Ok(gun)
    }

    /// Instantiate a hull-fixed firing logic from loaded weapons.
    ///
    /// # Errors
    ///
    /// Fails fast if any weapon id was never loaded or a source name
    /// repeats.
    pub fn instantiate_firing_logic(
        &self,
        profile: FiringProfile,
        sources: &[(&str, &str)],
    ) -> DataLoadResult<FiringLogic> {
        let mut logic = FiringLogic::new(profile);
        for (name, weapon_id) in sources {
            let source = self.instantiate_fire_source(weapon_id)?;
            logic
                .add_source(*name, source)
                .map_err(|_| DataLoadError::DuplicateId((*name).to_string()))?;
        }
        Ok(logic)
    }
}

fn read_file(path: &Path) -> DataLoadResult<String> {
    let path_str = path.display().to_string();
    let mut file = std::fs::File::open(path).map_err(|e| DataLoadError::IoError {
        path: path_str.clone(),
        source: e,
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| DataLoadError::IoError {
            path: path_str,
            source: e,
        })?;
    Ok(contents)
}

/// Load a weapon descriptor from a RON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_weapon_from_file(path: &Path) -> DataLoadResult<FireSourceData> {
    let path_str = path.display().to_string();
    let contents = read_file(path)?;
    let doc: WeaponDoc = ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path_str.clone(),
        source: e,
    })?;
    let data = doc.into_data(&path_str)?;

    tracing::info!(
        "Loaded weapon '{}' ({:?}, {:?}, {} barrel(s))",
        data.id,
        data.kind,
        data.scale,
        data.gun_count
    );
    Ok(data)
}

/// Load a gun descriptor from a RON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_gun_from_file(path: &Path) -> DataLoadResult<GunData> {
    let path_str = path.display().to_string();
    let contents = read_file(path)?;
    let doc: GunDoc = ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path_str.clone(),
        source: e,
    })?;
    let data = doc.into_data(&path_str)?;

    tracing::info!("Loaded gun '{}' from atlas '{}'", data.id, data.atlas);
    Ok(data)
}

/// Load all descriptors from an arsenal directory.
///
/// Scans `<dir>/weapons` and `<dir>/guns` for `.ron` files. Any file
/// that fails to load or validate fails the whole load; nothing is
/// registered from a failed load.
///
/// # Errors
///
/// Returns the first error encountered.
pub fn load_arsenal_from_directory(dir: &Path) -> DataLoadResult<ArsenalRegistry> {
    let mut registry = ArsenalRegistry::new();

    if !dir.exists() {
        tracing::warn!("Arsenal directory does not exist: {}", dir.display());
        return Ok(registry);
    }

    for path in ron_files(&dir.join("weapons"))? {
        let data = load_weapon_from_file(&path)?;
        registry.register_weapon(data)?;
    }
    for path in ron_files(&dir.join("guns"))? {
        let data = load_gun_from_file(&path)?;
        registry.register_gun(data)?;
    }

    tracing::info!(
        "Loaded {} weapons and {} guns from {}",
        registry.weapon_count(),
        registry.gun_count(),
        dir.display()
    );
    Ok(registry)
}

fn ron_files(dir: &Path) -> DataLoadResult<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();
    if !dir.exists() {
        return Ok(files);
    }

    let entries = std::fs::read_dir(dir).map_err(|e| DataLoadError::IoError {
        path: dir.display().to_string(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| DataLoadError::IoError {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "ron") {
            files.push(path);
        }
    }
    // Deterministic load order regardless of directory enumeration.
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_weapon_data() -> FireSourceData {
        let mut fire_points = [Vec2Fixed::ZERO; 8];
        for direction in Direction::ALL {
            fire_points[direction.index() as usize] = Vec2Fixed::new(
                Fixed::from_num(i32::from(direction.index())),
                Fixed::from_num(1.5),
            );
        }
        FireSourceData {
            id: "tank_cannon".to_string(),
            kind: ProjectileKind::Shell,
            scale: ProjectileScale::Medium,
            gun_count: 1,
            projectile_speed: Fixed::from_num(10),
            fire_points,
            presence: PresencePolicy::Always,
        }
    }

    fn sample_gun_data() -> GunData {
        GunData {
            id: "tank_turret".to_string(),
            atlas: "guns".to_string(),
            textures: std::array::from_fn(|i| format!("tank_turret_{i}")),
            width: Fixed::from_num(2),
            height: Fixed::from_num(2),
            recoil: Fixed::from_num(0.5),
            recoil_resistance: Fixed::from_num(2),
            rotation_speed: Fixed::from_num(4),
            rotation_offsets: [Vec2Fixed::ZERO; 8],
        }
    }

    fn write_ron(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_weapon_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample_weapon_data();
        let text = ron::to_string(&WeaponDoc::from_data(&data)).unwrap();
        let path = write_ron(dir.path(), "tank_cannon.ron", &text);

        let loaded = load_weapon_from_file(&path).unwrap();
        assert_eq!(loaded, data);

        // Instantiated state re-serializes to identical numeric fields.
        let source = FireSource::from_data(&loaded);
        assert_eq!(source.to_data("tank_cannon"), data);
    }

    #[test]
    fn test_gun_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample_gun_data();
        let text = ron::to_string(&GunDoc::from_data(&data)).unwrap();
        let path = write_ron(dir.path(), "tank_turret.ron", &text);

        let loaded = load_gun_from_file(&path).unwrap();
        assert_eq!(loaded, data);

        let profile = FiringProfile::uniform(dustfront_core::specs::FiringData::new(
            1,
            Fixed::from_num(0.25),
            Fixed::from_num(1),
        ));
        let gun = RotatingGun::from_data(&loaded, profile);
        assert_eq!(gun.to_data("tank_turret"), data);
    }

    #[test]
    fn test_unknown_direction_token_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = WeaponDoc::from_data(&sample_weapon_data());
        doc.fire_points[0].0 = "northish".to_string();
        let text = ron::to_string(&doc).unwrap();
        let path = write_ron(dir.path(), "bad.ron", &text);

        let result = load_weapon_from_file(&path);
        assert!(matches!(
            result,
            Err(DataLoadError::UnknownDirection { token, .. }) if token == "northish"
        ));
    }

    #[test]
    fn test_duplicate_direction_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = WeaponDoc::from_data(&sample_weapon_data());
        doc.fire_points[1].0 = "north".to_string();
        let text = ron::to_string(&doc).unwrap();
        let path = write_ron(dir.path(), "bad.ron", &text);

        let result = load_weapon_from_file(&path);
        assert!(matches!(
            result,
            Err(DataLoadError::DuplicateDirection { token, .. }) if token == "north"
        ));
    }

    #[test]
    fn test_missing_direction_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = WeaponDoc::from_data(&sample_weapon_data());
        doc.fire_points.pop();
        let text = ron::to_string(&doc).unwrap();
        let path = write_ron(dir.path(), "bad.ron", &text);

        let result = load_weapon_from_file(&path);
        assert!(matches!(
            result,
            Err(DataLoadError::MissingDirection { token, .. }) if token == "north_west"
        ));
    }

    #[test]
    fn test_invalid_numbers_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut data = sample_weapon_data();
        data.gun_count = 0;
        data.projectile_speed = Fixed::ZERO;
        let text = ron::to_string(&WeaponDoc::from_data(&data)).unwrap();
        let path = write_ron(dir.path(), "bad.ron", &text);

        let result = load_weapon_from_file(&path);
        match result {
            Err(DataLoadError::ValidationError { id, errors }) => {
                assert_eq!(id, "tank_cannon");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_ron_fails_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_ron(dir.path(), "bad.ron", "WeaponDoc(id: \"broken\"");

        assert!(matches!(
            load_weapon_from_file(&path),
            Err(DataLoadError::ParseError { .. })
        ));
    }

    #[test]
    fn test_registry_duplicate_id_rejected() {
        let mut registry = ArsenalRegistry::new();
        registry.register_weapon(sample_weapon_data()).unwrap();
        assert!(matches!(
            registry.register_weapon(sample_weapon_data()),
            Err(DataLoadError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_instantiate_unloaded_fails_fast() {
        let registry = ArsenalRegistry::new();
        assert!(matches!(
            registry.instantiate_fire_source("tank_cannon"),
            Err(DataLoadError::NotLoaded(_))
        ));

        let profile = FiringProfile::uniform(dustfront_core::specs::FiringData::new(
            1,
            Fixed::from_num(0.25),
            Fixed::from_num(1),
        ));
        assert!(matches!(
            registry.instantiate_gun("tank_turret", profile, &[]),
            Err(DataLoadError::NotLoaded(_))
        ));
    }

    #[test]
    fn test_instantiated_sources_are_independent() {
        let mut registry = ArsenalRegistry::new();
        registry.register_weapon(sample_weapon_data()).unwrap();

        let mut first = registry.instantiate_fire_source("tank_cannon").unwrap();
        let second = registry.instantiate_fire_source("tank_cannon").unwrap();

        first.fire(
            Direction::North,
            Vec2Fixed::ZERO,
            Vec2Fixed::new(Fixed::from_num(50), Fixed::ZERO),
        );
        assert_eq!(first.projectiles_in_flight(), 1);
        assert_eq!(second.projectiles_in_flight(), 0);
    }

    #[test]
    fn test_directory_load_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let weapons = dir.path().join("weapons");
        std::fs::create_dir_all(&weapons).unwrap();

        let good = ron::to_string(&WeaponDoc::from_data(&sample_weapon_data())).unwrap();
        write_ron(&weapons, "a_good.ron", &good);
        write_ron(&weapons, "b_bad.ron", "not ron at all (");

        assert!(load_arsenal_from_directory(dir.path()).is_err());
    }

    #[test]
    fn test_directory_load_registers_everything() {
        let dir = tempfile::tempdir().unwrap();
        let weapons = dir.path().join("weapons");
        let guns = dir.path().join("guns");
        std::fs::create_dir_all(&weapons).unwrap();
        std::fs::create_dir_all(&guns).unwrap();

        let weapon_text = ron::to_string(&WeaponDoc::from_data(&sample_weapon_data())).unwrap();
        write_ron(&weapons, "tank_cannon.ron", &weapon_text);
        let gun_text = ron::to_string(&GunDoc::from_data(&sample_gun_data())).unwrap();
        write_ron(&guns, "tank_turret.ron", &gun_text);

        let registry = load_arsenal_from_directory(dir.path()).unwrap();
        assert_eq!(registry.weapon_count(), 1);
        assert_eq!(registry.gun_count(), 1);

        let profile = FiringProfile::uniform(dustfront_core::specs::FiringData::new(
            2,
            Fixed::from_num(0.25),
            Fixed::from_num(1),
        ));
        let gun = registry
            .instantiate_gun("tank_turret", profile, &[("main", "tank_cannon")])
            .unwrap();
        assert_eq!(gun.firing().source_count(), 1);
    }

    #[test]
    fn test_missing_arsenal_directory_is_empty_registry() {
        let dir = tempfile::tempdir().unwrap();
        let registry =
            load_arsenal_from_directory(&dir.path().join("does_not_exist")).unwrap();
        assert!(registry.is_empty());
    }
}
