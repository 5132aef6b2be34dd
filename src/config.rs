use std::env;
use std::fs::File;
use std::io::{ BufReader, ErrorKind };
use std::path::{ Path, PathBuf };

use serde::Deserialize;

use crate::errors::ConfigError;

/// User defaults, read from `config.json`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_length: usize,
    pub allow_all_specials: bool,
    pub copy_to_clipboard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_length: Self::DEFAULT_MIN_LENGTH,
            allow_all_specials: true,
            copy_to_clipboard: false,
        }
    }
}

impl Config {
    pub const DEFAULT_MIN_LENGTH: usize = 6;
    const ENV_PATH: &str = "PASSGEN_CONFIG";

    /// `PASSGEN_CONFIG` wins over the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(Self::ENV_PATH) {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir().map(|dir| dir.join("passgen").join("config.json"))
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => {
                log::warn!("no config directory on this platform, using defaults");
                return Ok(Self::default());
            }
        };

        Self::load_from_file(&path)
    }

    /// A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io { path: path.to_path_buf(), source });
            }
        };

        let config: Config = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?;

        if config.min_length == 0 {
            return Err(ConfigError::InvalidMinimum);
        }

        log::debug!("loaded config from {}: {:?}", path.display(), config);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(&dir.path().join("config.json")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.min_length, 6);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(r#"{ "min_length": 4 }"#);
        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.min_length, 4);
        assert!(config.allow_all_specials);
        assert!(!config.copy_to_clipboard);
    }

    #[test]
    fn full_file() {
        let file = write_config(r#"{ "min_length": 10, "allow_all_specials": false, "copy_to_clipboard": true }"#);
        let config = Config::load_from_file(file.path()).unwrap();

        assert_eq!(
            config,
            Config { min_length: 10, allow_all_specials: false, copy_to_clipboard: true }
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        let file = write_config("{ min_length: ");

        assert!(matches!(Config::load_from_file(file.path()), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn zero_minimum_is_rejected() {
        let file = write_config(r#"{ "min_length": 0 }"#);

        assert!(matches!(Config::load_from_file(file.path()), Err(ConfigError::InvalidMinimum)));
    }
}
