use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;
use walkdir::WalkDir;

use super::{tool_command, ClasspathStrategy};
use crate::error::Result;
use crate::models::Scope;
use crate::process;

/// Ant + Ivy projects: `ant resolve retrieve`, then collect every JAR under
/// the project directory.
///
/// The scope only selects the Ivy configuration passed to Ant; discovered
/// JARs are not filtered afterwards.
pub struct IvyStrategy {
    program: Vec<String>,
}

impl IvyStrategy {
    pub fn new(program: &str) -> Self {
        Self {
            program: tool_command(program),
        }
    }

    fn command(&self, project: &Path, scope: Scope) -> Vec<String> {
        let mut cmd = self.program.clone();
        cmd.push("-q".to_string());
        if conf_applies(project, scope) {
            cmd.push(format!("-Divy.conf={}", scope));
        }
        cmd.extend(["resolve".to_string(), "retrieve".to_string()]);
        cmd
    }
}

impl ClasspathStrategy for IvyStrategy {
    fn extract(&self, project: &Path, scope: Scope) -> Result<String> {
        process::run(&self.command(project, scope), project)?;
        collect_jars(project)
    }
}

/// Whether `-Divy.conf=<scope>` should be passed. Only skipped when `ivy.xml`
/// declares its configurations and none is named after the scope.
fn conf_applies(project: &Path, scope: Scope) -> bool {
    let ivy_xml = project.join("ivy.xml");
    if !ivy_xml.exists() {
        return true;
    }
    match declared_confs(&ivy_xml) {
        Ok(Some(confs)) if !confs.iter().any(|c| c == scope.as_str()) => {
            warn!(
                %scope,
                declared = %confs.join(","),
                "ivy.xml has no matching configuration; using the build file's default"
            );
            false
        }
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "could not read ivy.xml configurations");
            true
        }
    }
}

/// Names of `<conf>` elements inside `<configurations>`, or `None` when the
/// module declares no configurations block.
fn declared_confs(path: &Path) -> anyhow::Result<Option<Vec<String>>> {
    let content = std::fs::read_to_string(path)?;
    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut confs = None::<Vec<String>>;
    let mut in_configurations = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.local_name().as_ref() == b"configurations" => {
                in_configurations = true;
                confs.get_or_insert_with(Vec::new);
            }
            Event::Empty(ref e) if e.local_name().as_ref() == b"configurations" => {
                confs.get_or_insert_with(Vec::new);
            }
            Event::End(ref e) if e.local_name().as_ref() == b"configurations" => {
                in_configurations = false;
            }
            Event::Start(ref e) | Event::Empty(ref e)
                if in_configurations && e.local_name().as_ref() == b"conf" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"name" {
                        let name = String::from_utf8_lossy(&attr.value).into_owned();
                        confs.get_or_insert_with(Vec::new).push(name);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(confs)
}

/// Absolute paths of every `*.jar` below `project`, in file-name order.
fn collect_jars(project: &Path) -> Result<String> {
    let mut jars = Vec::new();
    for entry in WalkDir::new(project).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable path");
                continue;
            }
        };
        let is_jar = entry.path().extension().is_some_and(|ext| ext == "jar");
        if entry.file_type().is_file() && is_jar {
            jars.push(entry.path().canonicalize()?.display().to_string());
        }
    }
    Ok(jars.join(":"))
}
