use std::collections::HashSet;
use std::path::Path;

use super::{tool_command, ClasspathStrategy, TempArtifact};
use crate::error::Result;
use crate::models::Scope;
use crate::process;

/// Registers a classpath-printing task through a generated init script.
///
/// The runtime task prints only the `main` source set; the test task prints
/// `main` plus `test`, so the test classpath is always a superset.
pub struct GradleStrategy {
    program: Vec<String>,
}

const RUNTIME_TASK: &str = "printRuntimeDepsClasspath";
const TEST_TASK: &str = "printAllDepsClasspath";

const RUNTIME_INIT_SCRIPT: &str = r#"
allprojects {
    afterEvaluate { project ->
        if (project.plugins.hasPlugin('java')) {
            project.tasks.register("printRuntimeDepsClasspath") {
                doLast {
                    def runtimeCp = project.sourceSets.main.runtimeClasspath.files
                        .collect { it.absolutePath }
                        .unique()
                        .join(":")
                    println runtimeCp
                }
            }
        }
    }
}
"#;

const TEST_INIT_SCRIPT: &str = r#"
allprojects {
    afterEvaluate { project ->
        if (project.plugins.hasPlugin('java')) {
            project.tasks.register("printAllDepsClasspath") {
                doLast {
                    def cp = []
                    if (project.sourceSets.findByName("main")) {
                        cp += project.sourceSets.main.runtimeClasspath.files
                    }
                    if (project.sourceSets.findByName("test")) {
                        cp += project.sourceSets.test.runtimeClasspath.files
                    }
                    println cp.collect { it.absolutePath }.unique().join(":")
                }
            }
        }
    }
}
"#;

impl GradleStrategy {
    pub fn new(program: &str) -> Self {
        Self {
            program: tool_command(program),
        }
    }

    /// (init script file name, script body, task name)
    fn script_for(scope: Scope) -> (&'static str, &'static str, &'static str) {
        match scope {
            Scope::Runtime => (".print_runtime_classpath.gradle", RUNTIME_INIT_SCRIPT, RUNTIME_TASK),
            Scope::Test => (".print_classpath.gradle", TEST_INIT_SCRIPT, TEST_TASK),
        }
    }
}

impl ClasspathStrategy for GradleStrategy {
    fn extract(&self, project: &Path, scope: Scope) -> Result<String> {
        let (file_name, body, task) = Self::script_for(scope);
        let script = TempArtifact::write(project.join(file_name), body)?;

        let mut cmd = self.program.clone();
        cmd.extend([
            "-q".to_string(),
            "--init-script".to_string(),
            script.path().display().to_string(),
            task.to_string(),
        ]);

        let output = process::run(&cmd, project)?;
        Ok(merge_project_lines(&output))
    }
}

/// Each Java project prints one line; join them, keeping first occurrences.
fn merge_project_lines(output: &str) -> String {
    let mut seen = HashSet::new();
    output
        .lines()
        .flat_map(|line| line.split(':'))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter(|entry| seen.insert(*entry))
        .collect::<Vec<_>>()
        .join(":")
}
