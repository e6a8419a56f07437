use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{BuildTool, Detection};

/// Marker files in priority order. The first one present decides the build tool.
const MARKERS: &[(&str, BuildTool)] = &[
    ("pom.xml", BuildTool::Maven),
    ("build.gradle", BuildTool::Gradle),
    ("build.gradle.kts", BuildTool::Gradle),
    ("ivy.xml", BuildTool::Ivy),
    ("build.xml", BuildTool::Ant),
];

/// Classify a project directory by the marker files it contains.
///
/// Returns [`BuildTool::Unsupported`] when nothing matches; callers decide
/// whether that is fatal.
pub fn detect_build_tool(path: &Path) -> BuildTool {
    marker(path)
        .map(|(_, tool)| tool)
        .unwrap_or(BuildTool::Unsupported)
}

/// The marker file that decided [`detect_build_tool`], if any.
pub fn marker(path: &Path) -> Option<(&'static str, BuildTool)> {
    MARKERS
        .iter()
        .find(|(name, _)| path.join(name).exists())
        .copied()
}

/// Directory where `tool` caches resolved artifacts, relative to the user's home.
pub fn resolve_deps_dir(tool: BuildTool, project: &Path) -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::MissingRequiredSetting("home directory".to_string()))?;
    resolve_deps_dir_in(tool, project, &home)
}

/// [`resolve_deps_dir`] with an explicit home directory.
pub fn resolve_deps_dir_in(tool: BuildTool, project: &Path, home: &Path) -> Result<PathBuf> {
    match tool {
        BuildTool::Maven => Ok(home.join(".m2").join("repository")),
        BuildTool::Gradle => Ok(home
            .join(".gradle")
            .join("caches")
            .join("modules-2")
            .join("files-2.1")),
        BuildTool::Ivy => Ok(home.join(".ivy2").join("cache")),
        BuildTool::Ant => {
            // Ant has no dependency manager of its own: prefer an Ivy cache,
            // then a project-local lib/, then the project itself.
            let ivy_cache = home.join(".ivy2").join("cache");
            if ivy_cache.exists() {
                return Ok(ivy_cache);
            }
            let lib = project.join("lib");
            if lib.exists() {
                return Ok(lib);
            }
            Ok(project.to_path_buf())
        }
        BuildTool::Unsupported => Err(Error::UnsupportedBuildTool(
            "could not detect build tool (Maven, Gradle, Ivy/Ant)".to_string(),
        )),
    }
}

/// Canonicalize a user-supplied project path, failing if it does not exist.
pub fn project_dir(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::ProjectDirectoryMissing(path.to_path_buf()));
    }
    Ok(path.canonicalize()?)
}

/// Everything `sutgen detect` reports about a project.
pub fn inspect(path: &Path) -> Detection {
    let found = marker(path);
    let build_tool = found
        .map(|(_, tool)| tool)
        .unwrap_or(BuildTool::Unsupported);
    let deps_dir = resolve_deps_dir(build_tool, path).ok();
    let deps_dir_exists = deps_dir.as_deref().is_some_and(Path::exists);

    Detection {
        project: path.to_path_buf(),
        build_tool,
        marker: found.map(|(name, _)| name.to_string()),
        deps_dir,
        deps_dir_exists,
    }
}
