use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.sutgen/config.toml`.
///
/// Every section is optional; missing keys fall back to the defaults the
/// pathcov/jdart containers are built with.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub container: ContainerConfig,
    pub tools: ToolsConfig,
    pub env: EnvFilesConfig,
    pub output: OutputConfig,
    /// Compose services that receive the dependency and SUT volumes.
    pub services: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            container: ContainerConfig::default(),
            tools: ToolsConfig::default(),
            env: EnvFilesConfig::default(),
            output: OutputConfig::default(),
            services: default_services(),
        }
    }
}

fn default_services() -> Vec<String> {
    vec!["pathcov".to_string(), "jdart".to_string()]
}

/// Mount points inside the analysis containers.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub deps_dir: String,
    pub sut_dir: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            deps_dir: "/dependencies".to_string(),
            sut_dir: "/sut".to_string(),
        }
    }
}

/// Executables used to drive each build tool, e.g. `./mvnw` instead of `mvn`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub maven: String,
    pub gradle: String,
    pub ant: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            maven: "mvn".to_string(),
            gradle: "gradle".to_string(),
            ant: "ant".to_string(),
        }
    }
}

/// Key-value environment files, relative to the workspace root.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EnvFilesConfig {
    pub dot_env: PathBuf,
    pub sut_env: PathBuf,
    pub container_env: PathBuf,
}

impl Default for EnvFilesConfig {
    fn default() -> Self {
        Self {
            dot_env: PathBuf::from(".env"),
            sut_env: PathBuf::from("sut.env"),
            container_env: PathBuf::from("container.env"),
        }
    }
}

/// Input and generated files, relative to the workspace root.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub sut_config: PathBuf,
    pub pathcov_config: PathBuf,
    pub jdart_config: PathBuf,
    pub deps_compose: PathBuf,
    pub sut_compose: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sut_config: PathBuf::from("configs/sut.yml"),
            pathcov_config: PathBuf::from("pathcov/configs/sut.config"),
            jdart_config: PathBuf::from("jdart/configs/sut_gen.jpf"),
            deps_compose: PathBuf::from("docker-compose.deps.yml"),
            sut_compose: PathBuf::from("docker-compose.sut.yml"),
        }
    }
}

/// Load the tool settings, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<workspace>/.sutgen/config.toml`
/// 3. `~/.config/sutgen/config.toml`
/// 4. Built-in [`Settings::default`]
pub fn load_settings(workspace: &Path, config_override: Option<&Path>) -> Result<Settings> {
    if let Some(path) = config_override {
        return read_settings(path);
    }

    let workspace_config = workspace.join(".sutgen").join("config.toml");
    if workspace_config.exists() {
        return read_settings(&workspace_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("sutgen").join("config.toml");
        if home_config.exists() {
            return read_settings(&home_config);
        }
    }

    Ok(Settings::default())
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let settings = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.container.deps_dir, "/dependencies");
        assert_eq!(s.container.sut_dir, "/sut");
        assert_eq!(s.tools.maven, "mvn");
        assert_eq!(s.output.jdart_config, PathBuf::from("jdart/configs/sut_gen.jpf"));
    }

    #[test]
    fn test_partial_override() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"
services = ["pathcov"]

[tools]
maven = "./mvnw"

[container]
deps_dir = "/deps"
"#
        )
        .unwrap();
        let s = load_settings(Path::new("."), Some(f.path())).unwrap();
        assert_eq!(s.tools.maven, "./mvnw");
        assert_eq!(s.tools.gradle, "gradle");
        assert_eq!(s.container.deps_dir, "/deps");
        assert_eq!(s.container.sut_dir, "/sut");
        assert_eq!(s.services, vec!["pathcov".to_string()]);
    }

    #[test]
    fn test_empty_file_keeps_default_services() {
        let f = NamedTempFile::new().unwrap();
        let s = load_settings(Path::new("."), Some(f.path())).unwrap();
        assert_eq!(s.services, default_services());
    }

    #[test]
    fn test_workspace_config_is_found() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".sutgen")).unwrap();
        std::fs::write(
            dir.path().join(".sutgen/config.toml"),
            "[container]\nsut_dir = \"/work\"\n",
        )
        .unwrap();
        let s = load_settings(dir.path(), None).unwrap();
        assert_eq!(s.container.sut_dir, "/work");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "[tools\nmaven = ").unwrap();
        assert!(load_settings(Path::new("."), Some(f.path())).is_err());
    }
}
