//! The SUT description (`configs/sut.yml`): what to analyse and where the
//! compiled classes live.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::error::Error;

#[derive(Debug, Deserialize)]
pub struct SutDescription {
    pub target: Target,
    pub analysis: Analysis,
    pub sut: SutLayout,
    pub test_generation: TestGeneration,
}

#[derive(Debug, Deserialize)]
pub struct Target {
    pub class: String,
    pub method: String,
    #[serde(rename = "return")]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub project_prefixes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SutLayout {
    pub compiled_root: String,
    pub test_root: String,
    pub source_root: String,
    /// `None` when the key is absent, `Some(None)` when it is `null`.
    #[serde(default, deserialize_with = "present")]
    pub deps_class_path: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct TestGeneration {
    pub generated_tests_dir_out: String,
}

/// Where the dependency classpath comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepsClasspath {
    /// Ask the build tool.
    Detect,
    /// The SUT has no dependencies.
    Empty,
    /// A host classpath given verbatim in `sut.yml`.
    Explicit(String),
}

fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl SutDescription {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let description: SutDescription = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        description.validate()?;
        Ok(description)
    }

    fn validate(&self) -> Result<()> {
        let ident = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$")?;
        let qualified = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")?;

        if !qualified.is_match(&self.target.class) {
            return Err(Error::InvalidSetting {
                key: "target.class".to_string(),
                reason: format!("'{}' is not a qualified Java class name", self.target.class),
            }
            .into());
        }
        if !ident.is_match(&self.target.method) {
            return Err(Error::InvalidSetting {
                key: "target.method".to_string(),
                reason: format!("'{}' is not a Java method name", self.target.method),
            }
            .into());
        }
        Ok(())
    }

    pub fn deps_classpath(&self) -> DepsClasspath {
        match &self.sut.deps_class_path {
            None => DepsClasspath::Detect,
            Some(None) => DepsClasspath::Empty,
            Some(Some(cp)) if cp.trim().is_empty() => DepsClasspath::Empty,
            Some(Some(cp)) => DepsClasspath::Explicit(cp.trim().to_string()),
        }
    }

    /// `int,java.lang.String`
    pub fn param_types(&self) -> String {
        self.target
            .parameters
            .iter()
            .map(|p| p.type_name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `x:int,s:java.lang.String`
    pub fn named_params(&self) -> String {
        self.target
            .parameters
            .iter()
            .map(|p| format!("{}:{}", p.name, p.type_name))
            .collect::<Vec<_>>()
            .join(",")
    }
}
