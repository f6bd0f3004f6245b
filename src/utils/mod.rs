use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::error::OrganizeError;

pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(OrganizeError::DirectoryNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    if !path.is_dir() {
        return Err(OrganizeError::NotADirectory {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

/// Verbose stdout channel. Lines are printed with the spinner suspended so
/// they never share a terminal row with it.
#[derive(Clone)]
pub struct Reporter {
    verbose: bool,
    progress: ProgressBar,
}

impl Reporter {
    pub fn new(verbose: bool, progress: ProgressBar) -> Self {
        Self { verbose, progress }
    }

    #[cfg(test)]
    pub fn quiet() -> Self {
        Self::new(false, ProgressBar::hidden())
    }

    pub fn say(&self, line: &str) {
        if self.verbose {
            self.progress.suspend(|| println!("{line}"));
        }
    }

    pub fn status(&self, message: String) {
        self.progress.set_message(message);
        self.progress.tick();
    }
}
