use std::path::Path;

use super::{tool_command, ClasspathStrategy, TempArtifact};
use crate::error::Result;
use crate::models::Scope;
use crate::process;

/// Runs `dependency:build-classpath` and reads the classpath from the
/// plugin's output file.
pub struct MavenStrategy {
    program: Vec<String>,
}

impl MavenStrategy {
    pub fn new(program: &str) -> Self {
        Self {
            program: tool_command(program),
        }
    }

    fn command(&self, output_file: &Path, scope: Scope) -> Vec<String> {
        let mut cmd = self.program.clone();
        cmd.extend([
            "-q".to_string(),
            "-Dmdep.outputAbsoluteArtifactFilename=true".to_string(),
            "-Dmdep.pathSeparator=:".to_string(),
            format!("-Dmdep.outputFile={}", output_file.display()),
            format!("-DincludeScope={}", scope),
            "dependency:build-classpath".to_string(),
        ]);
        cmd
    }
}

impl ClasspathStrategy for MavenStrategy {
    fn extract(&self, project: &Path, scope: Scope) -> Result<String> {
        let output = TempArtifact::reserve(project.join(format!(".classpath.{}.tmp", scope)));

        process::run(&self.command(output.path(), scope), project)?;

        if !output.path().exists() {
            return Ok(String::new());
        }
        Ok(std::fs::read_to_string(output.path())?.trim().to_string())
    }
}
