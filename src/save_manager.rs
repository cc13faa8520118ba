//! Checksummed binary save file plus a human-readable JSON export path.
//!
//! Binary format:
//! - Version magic (8 bytes)
//! - Data length (4 bytes)
//! - Serialized game state (variable length)
//! - SHA256 checksum (32 bytes)

use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::core::game_state::GameState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Everything that can go wrong loading or importing a save.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid save version: expected 0x{expected:016X}, got 0x{found:016X}")]
    BadVersion { expected: u64, found: u64 },
    #[error("checksum verification failed")]
    BadChecksum,
    #[error("could not decode save data: {0}")]
    Decode(#[from] bincode::Error),
    #[error("import is not a valid save: {0}")]
    BadImport(String),
}

/// Manages saving and loading game state with checksum verification.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Sets up the save directory at the platform's config location.
    pub fn new() -> Result<Self, SaveError> {
        let project_dirs = ProjectDirs::from("", "", "ascend").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// Uses an explicit file path instead of the platform default.
    pub fn with_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    pub fn save(&self, state: &GameState) -> Result<(), SaveError> {
        let data = bincode::serialize(state)?;
        let data_len = data.len() as u32;

        // Checksum covers version + length + data.
        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        log::debug!("saved {} bytes to {}", data.len(), self.save_path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<GameState, SaveError> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(SaveError::BadVersion {
                expected: SAVE_VERSION_MAGIC,
                found: version,
            });
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            log::warn!("save file failed checksum verification");
            return Err(SaveError::BadChecksum);
        }

        Ok(bincode::deserialize(&data)?)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn delete(&self) -> Result<(), SaveError> {
        if self.save_path.exists() {
            fs::remove_file(&self.save_path)?;
        }
        Ok(())
    }
}

/// Serializes the state to a pretty JSON string for manual backup.
pub fn export_text(state: &GameState) -> Result<String, SaveError> {
    serde_json::to_string_pretty(state).map_err(|e| SaveError::BadImport(e.to_string()))
}

/// Parses a JSON export back into a state, with structural validation:
/// the paths map must be non-empty and every level within range.
pub fn import_text(text: &str) -> Result<GameState, SaveError> {
    let state: GameState =
        serde_json::from_str(text).map_err(|e| SaveError::BadImport(e.to_string()))?;

    if state.paths.is_empty() {
        return Err(SaveError::BadImport("no cultivation paths".to_string()));
    }
    for (id, progress) in &state.paths {
        if progress.level == 0 || progress.level > crate::core::constants::MAX_PATH_LEVEL {
            return Err(SaveError::BadImport(format!(
                "path {id:?} has out-of-range level {}",
                progress.level
            )));
        }
        if !progress.current_xp.is_finite() || progress.current_xp < 0.0 {
            return Err(SaveError::BadImport(format!(
                "path {id:?} has invalid xp"
            )));
        }
    }
    if state.character_name.is_empty() {
        return Err(SaveError::BadImport("missing character name".to_string()));
    }
    Ok(state)
}
