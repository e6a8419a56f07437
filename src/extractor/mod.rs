//! Per-build-tool classpath extraction.
//!
//! Each [`ClasspathStrategy`] shells out to its build tool and returns a
//! colon-separated list of absolute artifact paths for one [`Scope`].

use std::path::{Path, PathBuf};

use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use crate::models::{BuildTool, Scope};

pub mod gradle;
pub mod ivy;
pub mod maven;

pub trait ClasspathStrategy {
    fn extract(&self, project: &Path, scope: Scope) -> Result<String>;
}

/// Pick the strategy for `tool`. Ivy and plain Ant projects share one.
pub fn strategy_for(tool: BuildTool, tools: &ToolsConfig) -> Result<Box<dyn ClasspathStrategy>> {
    match tool {
        BuildTool::Maven => Ok(Box::new(maven::MavenStrategy::new(&tools.maven))),
        BuildTool::Gradle => Ok(Box::new(gradle::GradleStrategy::new(&tools.gradle))),
        BuildTool::Ivy | BuildTool::Ant => Ok(Box::new(ivy::IvyStrategy::new(&tools.ant))),
        BuildTool::Unsupported => Err(Error::UnsupportedBuildTool(
            "unsupported build tool".to_string(),
        )),
    }
}

/// Extract the dependency classpath of `project` for `scope`.
pub fn extract(tool: BuildTool, project: &Path, scope: Scope, tools: &ToolsConfig) -> Result<String> {
    tracing::info!(%tool, %scope, project = %project.display(), "extracting classpath");
    let classpath = strategy_for(tool, tools)?.extract(project, scope)?;
    tracing::debug!(
        entries = classpath.split(':').filter(|e| !e.is_empty()).count(),
        "classpath extracted"
    );
    Ok(classpath)
}

/// A file the build tool needs (or writes) only for the duration of one
/// extraction. Removed on drop, whichever way the extraction ends.
pub(crate) struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    /// Claim `path` for a file someone else will create.
    pub(crate) fn reserve(path: PathBuf) -> Self {
        Self { path }
    }

    /// Write `contents` to `path` and claim it.
    pub(crate) fn write(path: PathBuf, contents: &str) -> Result<Self> {
        std::fs::write(&path, contents)?;
        Ok(Self { path })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temporary file"),
        }
    }
}

/// Split a configured tool command such as `./gradlew --offline` into argv.
pub(crate) fn tool_command(configured: &str) -> Vec<String> {
    configured.split_whitespace().map(str::to_string).collect()
}
