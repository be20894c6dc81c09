//! Read the `[env]` table from `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `<config dir>/<app_name>/config.toml`; `dirs` honours `XDG_CONFIG_HOME` on Linux.
fn xdg_config_path(app_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(app_name).join("config.toml"))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Parses the `[env]` table of one TOML file. Missing file or section yields an empty map.
pub fn load_env_map_from(path: &Path) -> Result<HashMap<String, String>, LoadError> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.env)
}

/// Same as [`load_env_map_from`] for the XDG location of `app_name`.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    match xdg_config_path(app_name) {
        Some(path) => load_env_map_from(&path),
        None => Ok(HashMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_config_returns_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let map = load_env_map_from(&dir.path().join("config.toml")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn reads_env_table() {
        let (_dir, path) = write_config("[env]\nFOO = \"from_toml\"\nBAR = \"baz\"\n");
        let map = load_env_map_from(&path).unwrap();
        assert_eq!(map["FOO"], "from_toml");
        assert_eq!(map["BAR"], "baz");
    }

    #[test]
    fn config_without_env_section_returns_empty_map() {
        let (_dir, path) = write_config("[other]\nkey = \"ignored\"\n");
        assert!(load_env_map_from(&path).unwrap().is_empty());
    }

    #[test]
    fn invalid_toml_returns_xdg_parse_error() {
        let (_dir, path) = write_config("not valid toml [[[\n");
        assert!(matches!(
            load_env_map_from(&path),
            Err(LoadError::XdgParse(_))
        ));
    }
}
