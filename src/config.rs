use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "voxpaint.toml";
pub const CONFIG_ENV_VAR: &str = "VOXPAINT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level settings. Every section and field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub textures: TextureConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World units per voxel edge.
    pub grid_unit: f32,
    /// Clicks further than this hit nothing.
    pub max_pick_distance: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_unit: voxpaint_pick::DEFAULT_GRID_UNIT,
            max_pick_distance: voxpaint_pick::DEFAULT_MAX_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Edge length every texture is resized to.
    pub size: u32,
    pub decode_workers: usize,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            size: voxpaint_textures::CANONICAL_TEXTURE_SIZE,
            decode_workers: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start_position: [f32; 3],
    pub fov_deg: f32,
    /// Radians per pixel of pointer movement.
    pub mouse_sensitivity: f32,
    pub move_speed: f32,
    pub vertical_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [150.0, 150.0, 300.0],
            fov_deg: 75.0,
            mouse_sensitivity: 0.002,
            move_speed: 200.0,
            vertical_speed: 100.0,
        }
    }
}

/// Pixel size used to turn pointer positions into rays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    /// Load from the resolved config file, or defaults when there is none.
    pub fn load(cli: Option<PathBuf>) -> Result<Self, ConfigError> {
        match resolve_config_path(cli) {
            Some(path) => {
                log::info!("config: {}", path.display());
                Self::from_path(&path)
            }
            None => {
                log::debug!("no {} found; using defaults", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
        }
    }
}

pub fn resolve_config_path(cli: Option<PathBuf>) -> Option<PathBuf> {
    // Precedence: CLI flag -> VOXPAINT_CONFIG env -> search nearby dirs.
    // An explicit flag is returned even if missing so the read error surfaces.
    if let Some(p) = cli {
        return Some(p);
    }
    if let Ok(p) = std::env::var(CONFIG_ENV_VAR) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return Some(pb);
        }
    }
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.to_path_buf());
        }
    }
    candidates.into_iter().find_map(|base| search_upward(&base, 5))
}

/// Look for the config file in `base` and up to `levels` parents.
fn search_upward(base: &Path, levels: usize) -> Option<PathBuf> {
    base.ancestors()
        .take(levels + 1)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [world]
            grid_unit = 10.0

            [camera]
            fov_deg = 60.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.world.grid_unit, 10.0);
        assert_eq!(cfg.world.max_pick_distance, 12_000.0);
        assert_eq!(cfg.camera.fov_deg, 60.0);
        assert_eq!(cfg.camera.move_speed, 200.0);
        assert_eq!(cfg.textures.size, 256);
    }

    #[test]
    fn wrong_types_are_parse_errors() {
        assert!(matches!(
            AppConfig::from_toml_str("[textures]\nsize = \"big\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn upward_search_finds_parent_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[viewport]\nwidth = 640.0\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let found = search_upward(&nested, 5).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
        let cfg = AppConfig::from_path(&found).unwrap();
        assert_eq!(cfg.viewport.width, 640.0);
        assert!(search_upward(&nested, 1).is_none());
    }

    #[test]
    fn explicit_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert_eq!(resolve_config_path(Some(missing.clone())), Some(missing.clone()));
        assert!(matches!(AppConfig::load(Some(missing)), Err(ConfigError::Io { .. })));
    }
}
