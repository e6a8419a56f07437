use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Run `f` behind a spinner, hidden when `quiet` or when stderr is not a terminal.
pub fn with_spinner<T>(message: String, quiet: bool, f: impl FnOnce() -> T) -> Result<T> {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    };
    pb.set_message(message);

    let result = f();

    pb.finish_and_clear();
    Ok(result)
}
