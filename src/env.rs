use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Values read from a `KEY=value` environment file.
#[derive(Debug, Default, Clone)]
pub struct EnvFile {
    values: HashMap<String, String>,
}

impl EnvFile {
    /// Parse `path`; a missing file yields an empty set of values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "env file not found");
            return Ok(Self::default());
        }

        let mut values = HashMap::new();
        let iter = dotenvy::from_path_iter(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        for item in iter {
            let (key, value) = item.with_context(|| format!("failed to parse {}", path.display()))?;
            values.insert(key, value);
        }

        Ok(Self { values })
    }

    /// Trimmed value; blank values count as unset.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Layer `vars` over the file values; non-blank entries replace what the
    /// file says.
    pub fn overlay(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        for (key, value) in vars {
            if !value.trim().is_empty() {
                self.values.insert(key, value);
            }
        }
        self
    }
}

/// Variables of the running process, skipping any that are not valid UTF-8.
pub fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_and_trim() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "# comment\nSUT_DIR=/work/sut\nDEPS_DIR=\"  /home/u/.m2  \"\nEMPTY=\n").unwrap();
        let env = EnvFile::load(f.path()).unwrap();
        assert_eq!(env.get("SUT_DIR").as_deref(), Some("/work/sut"));
        assert_eq!(env.get("DEPS_DIR").as_deref(), Some("/home/u/.m2"));
        assert_eq!(env.get("EMPTY"), None);
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let env = EnvFile::load(Path::new("/definitely/not/here.env")).unwrap();
        assert_eq!(env.get("SUT_DIR"), None);
    }

    #[test]
    fn test_overlay_wins_over_file() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "DEPS_DIR=/from/file\nSUT_DIR=/work/sut\n").unwrap();
        let env = EnvFile::load(f.path()).unwrap().overlay(vec![
            ("DEPS_DIR".to_string(), "/from/process".to_string()),
            ("SUT_DIR".to_string(), "   ".to_string()),
        ]);
        assert_eq!(env.get("DEPS_DIR").as_deref(), Some("/from/process"));
        // blank overlay values leave the file value in place
        assert_eq!(env.get("SUT_DIR").as_deref(), Some("/work/sut"));
    }
}
