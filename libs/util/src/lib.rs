use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Overrides the directory `Config.toml` and `Secrets.toml` are read from.
pub const CONFIG_DIR_ENV: &str = "BACKSTAGE_CONFIG_DIR";

pub fn workspace_dir() -> anyhow::Result<PathBuf> {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .context("failed to run cargo locate-project")?
        .stdout;
    let cargo_path = Path::new(
        std::str::from_utf8(&output)
            .context("cargo locate-project printed non utf-8")?
            .trim(),
    );

    cargo_path
        .parent()
        .map(Path::to_path_buf)
        .context("workspace manifest has no parent directory")
}

pub fn config_dir() -> anyhow::Result<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => workspace_dir(),
    }
}

pub fn load_toml<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<T>(&text)
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub fn load_config<T: DeserializeOwned>(config_name: &str) -> anyhow::Result<T> {
    load_toml(&config_dir()?.join(config_name))
}

pub fn load_env<T: DeserializeOwned>() -> anyhow::Result<T> {
    load_toml(&config_dir()?.join("Secrets.toml"))
}

#[cfg(test)]
mod test {
    use std::fs;

    use serde::Deserialize;

    use super::load_toml;

    #[derive(Deserialize)]
    struct Server {
        port: u16,
        name: Option<String>,
    }

    #[test]
    fn test_load_toml() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Config.toml");
        fs::write(&path, "port = 8000\n").unwrap();

        // Act
        let server = load_toml::<Server>(&path);

        // Assert
        let server = server.unwrap();
        assert_eq!(server.port, 8000);
        assert!(server.name.is_none());
    }

    #[test]
    fn test_load_toml_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let server = load_toml::<Server>(&dir.path().join("nope.toml"));

        assert!(server.is_err());
    }
}
