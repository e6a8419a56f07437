use std::path::Path;

use anyhow::{Context, Result};

/// Override mounting the host dependency cache read-only into every service.
pub fn deps_compose(deps_dir: &str, container_deps_dir: &str, services: &[String]) -> String {
    volumes_override(&format!("{}:{}:ro", deps_dir, container_deps_dir), services)
}

/// Override mounting the SUT read-write into every service.
pub fn sut_compose(sut_dir: &str, container_sut_dir: &str, services: &[String]) -> String {
    volumes_override(&format!("{}:{}", sut_dir, container_sut_dir), services)
}

fn volumes_override(volume: &str, services: &[String]) -> String {
    let blocks: Vec<String> = services
        .iter()
        .map(|service| format!("  {}:\n    volumes:\n      - {}\n", service, volume))
        .collect();
    format!("services:\n{}", blocks.join("\n"))
}

/// What happened to an override file.
#[derive(Debug, PartialEq, Eq)]
pub enum ComposeOutcome {
    Written,
    Removed,
    Absent,
}

/// Write `content` to `path`, or when there is nothing to mount remove a
/// previously generated override so compose stops picking it up.
pub fn write_or_remove(path: &Path, content: Option<String>) -> Result<ComposeOutcome> {
    match content {
        Some(content) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(ComposeOutcome::Written)
        }
        None if path.exists() => {
            std::fs::remove_file(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
            Ok(ComposeOutcome::Removed)
        }
        None => Ok(ComposeOutcome::Absent),
    }
}
