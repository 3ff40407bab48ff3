//! TOML configuration file loading.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Load and deserialize a TOML config file.
///
/// There is no fallback: a missing file is operator error.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when `path` does not exist,
/// [`ConfigError::Read`] when it cannot be read and [`ConfigError::Parse`]
/// when it is not valid TOML for `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn write_temp_toml(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).expect("write temp toml");
        (dir, path)
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config::<Config>(&dir.path().join("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }), "got {err:?}");
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let (_dir, path) = write_temp_toml("[dock\napps = [");
        let err = load_config::<Config>(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let (_dir, path) = write_temp_toml("[dock]\ntile_size = \"big\"\n");
        let err = load_config::<Config>(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config::<Config>(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "got {err:?}");
    }

    #[test]
    fn valid_file_loads() {
        let (_dir, path) = write_temp_toml("brew_formulae = [\"wget\"]\n");
        let config: Config = load_config(&path).unwrap();
        assert_eq!(config.brew_formulae, vec!["wget"]);
    }
}
