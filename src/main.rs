//! `sutgen` — prepare a Java system under test for the pathcov and jdart containers.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]); usage errors exit with status 1.
//! 2. Initialise logging ([`logging`]) and load settings ([`config::load_settings`]).
//! 3. Detect the build tool ([`detector`]) and extract its classpath ([`extractor`]).
//! 4. Re-root host paths under the container mount ([`rewrite`]).
//! 5. Write configs and compose overrides ([`generate`]) and report ([`report`]).
//!
//! Any error propagates to `main`, which echoes a failed build tool's stderr
//! and exits non-zero with the message.

mod cli;
mod config;
mod detector;
mod env;
mod error;
mod extractor;
mod generate;
mod logging;
mod models;
mod process;
mod report;
mod rewrite;
mod sut;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use cli::{Cli, Command};
use error::Error;
use config::{load_settings, Settings};
use models::ScopedClasspath;
use report::{progress, terminal};

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // A closed stdout/stderr leaves nowhere to report the failure.
            e.print().ok();
            std::process::exit(usage_exit_code(&e));
        }
    };

    run(cli).inspect_err(|err| {
        if let Some(stderr) = failed_command_stderr(err) {
            eprintln!("{}", stderr);
        }
    })
}

/// `--help` and `--version` exit 0; every other parse failure exits 1.
fn usage_exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() {
        1
    } else {
        0
    }
}

/// Non-blank stderr of a build tool that exited non-zero, if that is what `err` wraps.
fn failed_command_stderr(err: &anyhow::Error) -> Option<&str> {
    err.chain()
        .find_map(|cause| match cause.downcast_ref::<Error>() {
            Some(Error::CommandFailed { stderr, .. }) => Some(stderr.trim_end()),
            _ => None,
        })
        .filter(|stderr| !stderr.trim().is_empty())
}

fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level.as_deref(), cli.verbose, cli.quiet);
    debug!("sutgen v{} starting", env!("CARGO_PKG_VERSION"));

    let workspace = cli.root.clone();
    let settings = load_settings(&workspace, cli.config.as_deref())?;

    match cli.command {
        Command::Classpath {
            project_dir,
            scope,
            json,
        } => {
            let project = detector::project_dir(&project_dir)?;
            let tool = detector::detect_build_tool(&project);
            let classpaths = scope
                .scopes()
                .into_iter()
                .map(|scope| extract_scope(&settings, tool, &project, scope, cli.quiet))
                .collect::<Result<Vec<_>>>()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&classpaths)?);
            } else {
                terminal::render_classpaths(&classpaths, cli.verbose);
            }
        }
        Command::Detect { project_dir, json } => {
            let project = detector::project_dir(&project_dir)?;
            let detection = detector::inspect(&project);
            if json {
                println!("{}", serde_json::to_string_pretty(&detection)?);
            } else {
                terminal::render_detection(&detection, cli.quiet);
            }
        }
        Command::Rewrite {
            original_deps_dir,
            new_deps_prefix,
            classpath,
        } => {
            let rewritten = rewrite::rewrite_classpath(
                original_deps_dir.trim_end_matches('/'),
                new_deps_prefix.trim_end_matches('/'),
                classpath.trim(),
            )?;
            println!("{}", rewritten);
        }
        Command::DepsCompose => {
            let report = generate::generate_deps_compose(&settings, &workspace)?;
            terminal::render_compose(&report, "deps");
        }
        Command::SutCompose => {
            let report = generate::generate_sut_compose(&settings, &workspace)?;
            terminal::render_compose(&report, "SUT");
        }
        Command::Configs { scope } => {
            let configs =
                generate::generate_sut_configs(
                &settings,
                &workspace,
                scope.into(),
                cli.quiet,
                env::process_vars(),
            )?;
            terminal::render_generated(&configs);
        }
    }

    Ok(())
}

fn extract_scope(
    settings: &Settings,
    tool: models::BuildTool,
    project: &std::path::Path,
    scope: models::Scope,
    quiet: bool,
) -> Result<ScopedClasspath> {
    let classpath = progress::with_spinner(
        format!("Resolving {} classpath with {}", scope, tool),
        quiet,
        || extractor::extract(tool, project, scope, &settings.tools),
    )??;
    Ok(ScopedClasspath { scope, classpath })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_exit_codes() {
        let bad = Cli::try_parse_from(["sutgen", "--no-such-flag"]).unwrap_err();
        assert_eq!(usage_exit_code(&bad), 1);
        let help = Cli::try_parse_from(["sutgen", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&help), 0);
    }

    #[test]
    fn test_failed_command_stderr_through_context() {
        let err = anyhow::Error::from(Error::CommandFailed {
            command: "mvn dependency:build-classpath".to_string(),
            code: 1,
            stderr: "[ERROR] no pom\n".to_string(),
        })
        .context("classpath extraction failed");
        assert_eq!(failed_command_stderr(&err), Some("[ERROR] no pom"));

        let quiet = anyhow::Error::from(Error::CommandFailed {
            command: "ant".to_string(),
            code: 2,
            stderr: "  \n".to_string(),
        });
        assert_eq!(failed_command_stderr(&quiet), None);
        assert_eq!(failed_command_stderr(&anyhow::anyhow!("other")), None);
    }
}
