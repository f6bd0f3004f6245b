use anyhow::{anyhow, Context, Result};
use std::{
    ffi::{OsStr, OsString},
    fs,
    path::{Path, PathBuf},
};

use crate::utils::Reporter;

/// Creates bucket directories and renames files into them.
pub struct Mover {
    reporter: Reporter,
}

impl Mover {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    /// Moves `file` to `destination/<file name>`, creating `destination` and
    /// any missing parents first. Conflicts follow `fs::rename`: a plain file
    /// at the target is replaced, a directory is an error.
    pub fn move_file(&self, file: &Path, destination: &Path) -> Result<PathBuf> {
        let file_name = file
            .file_name()
            .ok_or_else(|| anyhow!("cannot move {}: path has no file name", file.display()))?;

        // A file whose bucket carries its own name has to get out of the way
        // before the bucket can be created.
        let target = if file == destination {
            let staged = self.stage(file)?;
            self.place(&staged, destination, file_name)
                .inspect_err(|_| self.restore(&staged, file))?
        } else {
            self.place(file, destination, file_name)?
        };

        log::debug!("moved {} -> {}", file.display(), target.display());
        self.reporter.say(&format!(
            "Moved '{}' to '{}'.",
            file_name.to_string_lossy(),
            destination.display()
        ));

        Ok(target)
    }

    fn place(&self, source: &Path, destination: &Path, file_name: &OsStr) -> Result<PathBuf> {
        fs::create_dir_all(destination)
            .with_context(|| format!("failed to create directory {}", destination.display()))?;

        let target = destination.join(file_name);
        fs::rename(source, &target).with_context(|| {
            format!(
                "failed to move {} to {}",
                source.display(),
                target.display()
            )
        })?;
        Ok(target)
    }

    fn stage(&self, file: &Path) -> Result<PathBuf> {
        let parent = file.parent().unwrap_or_else(|| Path::new("."));
        let name = file.file_name().unwrap_or_default();

        let staged = (0u32..)
            .map(|n| {
                let mut staged_name = OsString::from(".");
                staged_name.push(name);
                staged_name.push(format!(".staging-{n}"));
                parent.join(staged_name)
            })
            .find(|candidate| fs::symlink_metadata(candidate).is_err())
            .ok_or_else(|| anyhow!("no free staging name for {}", file.display()))?;

        fs::rename(file, &staged).with_context(|| {
            format!("failed to stage {} as {}", file.display(), staged.display())
        })?;
        log::debug!("staged {} as {}", file.display(), staged.display());
        Ok(staged)
    }

    /// Puts a staged file back under its own name after a failed move. The
    /// bucket at that path is removed first if it was left empty.
    fn restore(&self, staged: &Path, original: &Path) {
        if original.is_dir() {
            let _ = fs::remove_dir(original);
        }
        match fs::rename(staged, original) {
            Ok(()) => log::debug!("restored {} from {}", original.display(), staged.display()),
            Err(err) => log::warn!(
                "could not restore {} from {}: {}",
                original.display(),
                staged.display(),
                err
            ),
        }
    }
}
