use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Build tool recognised from a project's marker files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTool {
    Maven,
    Gradle,
    Ivy,
    Ant,
    /// No marker file was found.
    #[serde(rename = "none")]
    Unsupported,
}

impl std::fmt::Display for BuildTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildTool::Maven => write!(f, "maven"),
            BuildTool::Gradle => write!(f, "gradle"),
            BuildTool::Ivy => write!(f, "ivy"),
            BuildTool::Ant => write!(f, "ant"),
            BuildTool::Unsupported => write!(f, "none"),
        }
    }
}

/// Which subset of the declared dependencies to put on the classpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Runtime,
    Test,
}

impl Scope {
    /// Name understood by Maven's `includeScope` and Ivy's `ivy.conf`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Runtime => "runtime",
            Scope::Test => "test",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of inspecting a project directory, as shown by `sutgen detect`.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub project: PathBuf,
    pub build_tool: BuildTool,
    pub marker: Option<String>,
    pub deps_dir: Option<PathBuf>,
    pub deps_dir_exists: bool,
}

/// A classpath extracted for one scope.
#[derive(Debug, Clone, Serialize)]
pub struct ScopedClasspath {
    pub scope: Scope,
    pub classpath: String,
}

impl ScopedClasspath {
    pub fn entry_count(&self) -> usize {
        self.classpath.split(':').filter(|e| !e.trim().is_empty()).count()
    }
}
