use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the detection, extraction and rewrite pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("command '{command}' failed with exit code {code}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },
    #[error("could not start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}; please set deps_class_path and DEPS_DIR manually")]
    UnsupportedBuildTool(String),
    #[error("classpath entry '{entry}' does not start with original deps dir '{root}'")]
    PathNotUnderRoot { entry: String, root: String },
    #[error("{0} not set")]
    MissingRequiredSetting(String),
    #[error("project directory {} does not exist", .0.display())]
    ProjectDirectoryMissing(PathBuf),
    #[error("invalid value for {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
