//! Artifacts consumed by the analysis containers.
//!
//! - [`compose`] — docker-compose overrides mounting the dependency cache and the SUT.
//! - [`pathcov`] — `sut.config` for pathcov.
//! - [`jdart`] — `sut_gen.jpf` for jdart.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Settings;
use crate::detector;
use crate::env::EnvFile;
use crate::error::Error;
use crate::extractor;
use crate::models::Scope;
use crate::report::progress;
use crate::rewrite::rewrite_classpath;
use crate::sut::{DepsClasspath, SutDescription};

pub mod compose;
pub mod jdart;
pub mod pathcov;

use compose::ComposeOutcome;

/// Files written by [`generate_sut_configs`].
#[derive(Debug)]
pub struct GeneratedConfigs {
    pub pathcov: PathBuf,
    pub jdart: PathBuf,
    /// Container-side dependency classpath, if the SUT has dependencies.
    pub deps_classpath: Option<String>,
}

/// Read `configs/sut.yml` and `.env`, work out the container-side dependency
/// classpath and write the pathcov and jdart configs.
///
/// `process_env` is layered over `.env`, so `SUT_DIR` and `DEPS_DIR` exported
/// in the calling shell win over the file.
pub fn generate_sut_configs(
    settings: &Settings,
    workspace: &Path,
    scope: Scope,
    quiet: bool,
    process_env: impl IntoIterator<Item = (String, String)>,
) -> Result<GeneratedConfigs> {
    let sut = SutDescription::load(&workspace.join(&settings.output.sut_config))?;
    let env = EnvFile::load(&workspace.join(&settings.env.dot_env))?.overlay(process_env);

    let sut_dir = env
        .get("SUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| Error::MissingRequiredSetting("SUT_DIR in .env".to_string()))?;
    let container_deps = settings.container.deps_dir.trim_end_matches('/');

    let deps_classpath = match sut.deps_classpath() {
        DepsClasspath::Empty => {
            info!("sut.yml declares no dependencies");
            None
        }
        DepsClasspath::Explicit(classpath) => {
            info!("using deps_class_path from sut.yml");
            let deps_dir = deps_dir(&env, &sut_dir)?;
            Some(rewrite_classpath(&deps_dir, container_deps, &classpath)?)
        }
        DepsClasspath::Detect => {
            let project = detector::project_dir(&sut_dir)?;
            let tool = detector::detect_build_tool(&project);
            let deps_dir = deps_dir(&env, &project)?;
            let raw = progress::with_spinner(
                format!("Resolving {} classpath with {}", scope, tool),
                quiet,
                || extractor::extract(tool, &project, scope, &settings.tools),
            )??;
            Some(rewrite_classpath(&deps_dir, container_deps, &raw)?)
        }
    };

    let pathcov_path = workspace.join(&settings.output.pathcov_config);
    write_file(&pathcov_path, &pathcov::render(&sut, deps_classpath.as_deref()))?;

    let jdart_path = workspace.join(&settings.output.jdart_config);
    write_file(&jdart_path, &jdart::render(&sut, &settings.container.sut_dir))?;

    Ok(GeneratedConfigs {
        pathcov: pathcov_path,
        jdart: jdart_path,
        deps_classpath,
    })
}

/// `DEPS_DIR` from the environment, else the cache of the SUT's build tool.
fn deps_dir(env: &EnvFile, sut_dir: &Path) -> Result<String> {
    let dir = match env.get("DEPS_DIR") {
        Some(dir) => dir,
        None => {
            let tool = detector::detect_build_tool(sut_dir);
            let dir = detector::resolve_deps_dir(tool, sut_dir)?;
            info!(%tool, deps_dir = %dir.display(), "detected dependency directory");
            dir.display().to_string()
        }
    };
    Ok(dir.trim_end_matches('/').to_string())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Outcome of regenerating one compose override.
#[derive(Debug)]
pub struct ComposeReport {
    pub path: PathBuf,
    pub outcome: ComposeOutcome,
    /// (host directory, container directory) when both were set.
    pub mount: Option<(String, String)>,
}

/// Mount `DEPS_DIR` (sut.env) at `CONTAINER_DEPS_DIR` (container.env).
pub fn generate_deps_compose(settings: &Settings, workspace: &Path) -> Result<ComposeReport> {
    compose_override(
        settings,
        workspace,
        ("DEPS_DIR", "CONTAINER_DEPS_DIR"),
        &settings.output.deps_compose,
        compose::deps_compose,
    )
}

/// Mount `SUT_DIR` (sut.env) at `CONTAINER_SUT_DIR` (container.env).
pub fn generate_sut_compose(settings: &Settings, workspace: &Path) -> Result<ComposeReport> {
    compose_override(
        settings,
        workspace,
        ("SUT_DIR", "CONTAINER_SUT_DIR"),
        &settings.output.sut_compose,
        compose::sut_compose,
    )
}

fn compose_override(
    settings: &Settings,
    workspace: &Path,
    (host_key, container_key): (&str, &str),
    output: &Path,
    render: fn(&str, &str, &[String]) -> String,
) -> Result<ComposeReport> {
    let sut_env = EnvFile::load(&workspace.join(&settings.env.sut_env))?;
    let container_env = EnvFile::load(&workspace.join(&settings.env.container_env))?;

    let mount = sut_env.get(host_key).zip(container_env.get(container_key));
    if mount.is_none() {
        info!("{} or {} not set; no override will be generated", host_key, container_key);
    }

    let content = mount
        .as_ref()
        .map(|(host, container)| render(host, container, &settings.services));
    let path = workspace.join(output);
    let outcome = compose::write_or_remove(&path, content)?;

    Ok(ComposeReport {
        path,
        outcome,
        mount,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sut::{Analysis, Parameter, SutLayout, Target, TestGeneration};
    use tempfile::TempDir;

    pub(crate) fn sample_sut() -> SutDescription {
        SutDescription {
            target: Target {
                class: "com.example.Calc".to_string(),
                method: "add".to_string(),
                return_type: "int".to_string(),
                parameters: vec![
                    Parameter {
                        name: "a".to_string(),
                        type_name: "int".to_string(),
                    },
                    Parameter {
                        name: "s".to_string(),
                        type_name: "java.lang.String".to_string(),
                    },
                ],
            },
            analysis: Analysis {
                project_prefixes: vec!["com.example".to_string(), "org.demo".to_string()],
            },
            sut: SutLayout {
                compiled_root: "target/classes".to_string(),
                test_root: "target/test-classes".to_string(),
                source_root: "src/main/java".to_string(),
                deps_class_path: None,
            },
            test_generation: TestGeneration {
                generated_tests_dir_out: "jdart-tests".to_string(),
            },
        }
    }

    const SUT_YML: &str = r#"
target:
  class: com.example.Calc
  method: add
  return: int
  parameters:
    - { name: a, type: int }
analysis:
  project_prefixes: [com.example]
sut:
  compiled_root: target/classes
  test_root: target/test-classes
  source_root: src/main/java
test_generation:
  generated_tests_dir_out: jdart-tests
"#;

    fn workspace(sut_yml: &str, dot_env: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("configs")).unwrap();
        std::fs::write(dir.path().join("configs/sut.yml"), sut_yml).unwrap();
        std::fs::write(dir.path().join(".env"), dot_env).unwrap();
        dir
    }

    fn no_process_env() -> Vec<(String, String)> {
        Vec::new()
    }

    fn with_deps(line: &str) -> String {
        SUT_YML.replace(
            "  source_root: src/main/java\n",
            &format!("  source_root: src/main/java\n  deps_class_path: {}\n", line),
        )
    }

    #[test]
    fn test_explicit_classpath_is_rewritten() {
        let ws = workspace(
            &with_deps("/home/u/.m2/repository/a.jar:/home/u/.m2/repository/b/c.jar"),
            "SUT_DIR=/work/sut\nDEPS_DIR=/home/u/.m2/repository/\n",
        );
        let out = generate_sut_configs(&Settings::default(), ws.path(), Scope::Test, true, no_process_env()).unwrap();

        assert_eq!(
            out.deps_classpath.as_deref(),
            Some("/dependencies/a.jar:/dependencies/b/c.jar")
        );
        let pathcov = std::fs::read_to_string(&out.pathcov).unwrap();
        assert!(pathcov.contains("DEPS_CLASS_PATH=\"/dependencies/a.jar:/dependencies/b/c.jar\""));
        let jdart = std::fs::read_to_string(&out.jdart).unwrap();
        assert!(jdart.contains("classpath=/sut/target/classes"));
        assert!(out.pathcov.ends_with("pathcov/configs/sut.config"));
    }

    #[test]
    fn test_explicit_classpath_outside_deps_dir_fails() {
        let ws = workspace(
            &with_deps("/opt/other/a.jar"),
            "SUT_DIR=/work/sut\nDEPS_DIR=/home/u/.m2/repository\n",
        );
        let err = generate_sut_configs(&Settings::default(), ws.path(), Scope::Test, true, no_process_env()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::PathNotUnderRoot { .. })
        ));
        assert!(!ws.path().join("pathcov/configs/sut.config").exists());
    }

    #[test]
    fn test_empty_override_means_no_dependencies() {
        let ws = workspace(&with_deps("\"\""), "SUT_DIR=/work/sut\n");
        let out = generate_sut_configs(&Settings::default(), ws.path(), Scope::Test, true, no_process_env()).unwrap();
        assert!(out.deps_classpath.is_none());
        let pathcov = std::fs::read_to_string(&out.pathcov).unwrap();
        assert!(pathcov.contains("# No Dependencies"));
    }

    #[test]
    fn test_missing_sut_dir() {
        let ws = workspace(&with_deps("\"\""), "DEPS_DIR=/x\n");
        let err = generate_sut_configs(&Settings::default(), ws.path(), Scope::Test, true, no_process_env()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::MissingRequiredSetting(_))
        ));
    }

    #[test]
    fn test_exported_variables_override_dot_env() {
        let ws = workspace(
            &with_deps("/cache/other/a.jar"),
            "SUT_DIR=/work/sut\nDEPS_DIR=/home/u/.m2/repository\n",
        );
        let exported = vec![("DEPS_DIR".to_string(), "/cache/other/".to_string())];
        let out = generate_sut_configs(&Settings::default(), ws.path(), Scope::Test, true, exported).unwrap();
        assert_eq!(out.deps_classpath.as_deref(), Some("/dependencies/a.jar"));
    }

    #[test]
    fn test_exported_sut_dir_satisfies_requirement() {
        let ws = workspace(&with_deps("\"\""), "");
        let exported = vec![("SUT_DIR".to_string(), "/work/sut".to_string())];
        let out = generate_sut_configs(&Settings::default(), ws.path(), Scope::Test, true, exported).unwrap();
        assert!(out.deps_classpath.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_detected_classpath_via_maven() {
        use crate::extractor::testing::fake_tool;

        let bin = TempDir::new().unwrap();
        let sut = TempDir::new().unwrap();
        std::fs::write(sut.path().join("pom.xml"), "<project/>").unwrap();
        let mvn = fake_tool(
            bin.path(),
            "mvn",
            r#"for arg in "$@"; do
  case "$arg" in -Dmdep.outputFile=*) out="${arg#-Dmdep.outputFile=}" ;; esac
done
echo "/cache/repo/org/a.jar:/cache/repo/org/b.jar" > "$out""#,
        );

        let ws = workspace(
            SUT_YML,
            &format!("SUT_DIR={}\nDEPS_DIR=/cache/repo\n", sut.path().display()),
        );
        let mut settings = Settings::default();
        settings.tools.maven = mvn;

        let out = generate_sut_configs(&settings, ws.path(), Scope::Runtime, true, no_process_env()).unwrap();
        assert_eq!(
            out.deps_classpath.as_deref(),
            Some("/dependencies/org/a.jar:/dependencies/org/b.jar")
        );
    }

    #[test]
    fn test_compose_overrides_follow_env_files() {
        let ws = TempDir::new().unwrap();
        std::fs::write(ws.path().join("sut.env"), "SUT_DIR=/work/sut\nDEPS_DIR=/home/u/.m2/repository\n").unwrap();
        std::fs::write(ws.path().join("container.env"), "CONTAINER_DEPS_DIR=/dependencies\n").unwrap();
        let settings = Settings::default();

        let deps = generate_deps_compose(&settings, ws.path()).unwrap();
        assert_eq!(deps.outcome, ComposeOutcome::Written);
        let yaml = std::fs::read_to_string(ws.path().join("docker-compose.deps.yml")).unwrap();
        assert!(yaml.contains("- /home/u/.m2/repository:/dependencies:ro"));

        // CONTAINER_SUT_DIR missing: no SUT override
        let sut = generate_sut_compose(&settings, ws.path()).unwrap();
        assert_eq!(sut.outcome, ComposeOutcome::Absent);
        assert!(sut.mount.is_none());

        std::fs::write(ws.path().join("container.env"), "CONTAINER_SUT_DIR=/sut\n").unwrap();
        let deps = generate_deps_compose(&settings, ws.path()).unwrap();
        assert_eq!(deps.outcome, ComposeOutcome::Removed);
        let sut = generate_sut_compose(&settings, ws.path()).unwrap();
        assert_eq!(sut.outcome, ComposeOutcome::Written);
    }
}
