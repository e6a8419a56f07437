use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::Scope;

#[derive(Parser, Debug)]
#[command(
    name = "sutgen",
    about = "Detect a Java project's dependency classpath and generate pathcov/jdart configs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file [default: ./.sutgen/config.toml, fallback ~/.config/sutgen/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workspace holding configs/, env files and compose overrides
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Debug logging and per-entry output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only errors and the essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the runtime and/or test dependency classpath of a project
    Classpath {
        /// Root of the Java project
        project_dir: PathBuf,

        /// Which classpath to extract
        #[arg(long, default_value = "all")]
        scope: ScopeArg,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the detected build tool and its dependency directory
    Detect {
        /// Root of the Java project
        project_dir: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Re-root a colon-separated classpath from one directory to another
    Rewrite {
        /// Directory every entry must currently live under
        original_deps_dir: String,
        /// Replacement prefix, e.g. the container mount
        new_deps_prefix: String,
        /// Colon-separated classpath
        classpath: String,
    },

    /// Generate (or remove) the docker-compose override mounting the dependency cache
    DepsCompose,

    /// Generate (or remove) the docker-compose override mounting the SUT
    SutCompose,

    /// Generate the pathcov and jdart configs from configs/sut.yml and .env
    Configs {
        /// Classpath used for auto-detected dependencies
        #[arg(long, default_value = "test")]
        scope: SingleScopeArg,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ScopeArg {
    Runtime,
    Test,
    All,
}

impl ScopeArg {
    /// Scopes to extract, runtime first.
    pub fn scopes(&self) -> Vec<Scope> {
        match self {
            ScopeArg::Runtime => vec![Scope::Runtime],
            ScopeArg::Test => vec![Scope::Test],
            ScopeArg::All => vec![Scope::Runtime, Scope::Test],
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SingleScopeArg {
    Runtime,
    Test,
}

impl From<SingleScopeArg> for Scope {
    fn from(arg: SingleScopeArg) -> Self {
        match arg {
            SingleScopeArg::Runtime => Scope::Runtime,
            SingleScopeArg::Test => Scope::Test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classpath_defaults_to_all_scopes() {
        let cli = Cli::try_parse_from(["sutgen", "classpath", "/tmp/p"]).unwrap();
        match cli.command {
            Command::Classpath { scope, json, .. } => {
                assert_eq!(scope.scopes(), vec![Scope::Runtime, Scope::Test]);
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_missing_project_dir_is_usage_error() {
        let err = Cli::try_parse_from(["sutgen", "classpath"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_rewrite_takes_three_positionals() {
        let cli = Cli::try_parse_from(["sutgen", "rewrite", "/a/", "/b", "/a/x.jar"]).unwrap();
        assert!(matches!(cli.command, Command::Rewrite { .. }));
        assert!(Cli::try_parse_from(["sutgen", "rewrite", "/a", "/b"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sutgen", "configs", "--root", "/w", "-q"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("/w"));
        assert!(cli.quiet);
    }
}
