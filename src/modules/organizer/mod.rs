use anyhow::Result;
use async_trait::async_trait;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::{Path, PathBuf};

use crate::modules::{
    base::FileOrganizer,
    classifiers::SizeLimits,
    dispatcher::{CriteriaList, Criterion, Dispatcher, OrganizeSummary},
};
use crate::utils::{create_spinner, ensure_directory, Reporter};

pub struct CriteriaOrganizer {
    input_dir: PathBuf,
    criteria: CriteriaList,
    limits: SizeLimits,
    verbose: bool,
    interactive: bool,
}

impl CriteriaOrganizer {
    pub fn new(
        input_dir: PathBuf,
        criteria: &str,
        limits: SizeLimits,
        verbose: bool,
        interactive: bool,
    ) -> Self {
        Self {
            input_dir,
            criteria: CriteriaList::parse(criteria),
            limits,
            verbose,
            interactive,
        }
    }

    /// Runs the whole criteria chain from the root directory.
    pub fn organize(&self, reporter: Reporter) -> Result<OrganizeSummary> {
        let Some((first, rest)) = self.criteria.split_first() else {
            return Ok(OrganizeSummary::default());
        };

        Dispatcher::new(self.limits, reporter).apply(&self.input_dir, first, rest)
    }

    fn confirm(&self) -> Result<bool> {
        let mut prompt = format!(
            "Organize {} by {}",
            style(self.input_dir.display()).cyan(),
            style(&self.criteria).bold()
        );
        if self.criteria.mentions(Criterion::Size) {
            prompt.push_str(&format!(" ({})", self.limits));
        }
        prompt.push('?');

        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

#[async_trait]
impl FileOrganizer for CriteriaOrganizer {
    async fn run(&self) -> Result<()> {
        // Nothing is dispatched without a known first criterion, so the root
        // is never looked at either.
        match self.criteria.split_first() {
            Some((first, _)) if Criterion::from_name(first).is_some() => {}
            Some((first, _)) => {
                log::debug!("unknown first criterion '{}', nothing to organize", first);
                return Ok(());
            }
            None => {
                log::debug!("no criteria given, nothing to organize");
                return Ok(());
            }
        }

        ensure_directory(self.get_input_dir())?;

        if self.interactive && !self.confirm()? {
            println!("Operation cancelled");
            return Ok(());
        }

        let spinner = create_spinner("Organizing files...");
        let reporter = Reporter::new(self.verbose, spinner.clone());

        let summary = match self.organize(reporter) {
            Ok(summary) => summary,
            Err(err) => {
                spinner.abandon_with_message("Organization aborted");
                return Err(err);
            }
        };

        log::info!(
            "moved {} files, classified {} directories",
            summary.files_moved,
            summary.directories_classified
        );
        spinner.finish_with_message(format!(
            "Organized {} files across {} directories",
            summary.files_moved, summary.directories_classified
        ));
        Ok(())
    }

    fn get_input_dir(&self) -> &Path {
        &self.input_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn organizer(root: &Path, criteria: &str) -> CriteriaOrganizer {
        CriteriaOrganizer::new(
            root.to_path_buf(),
            criteria,
            SizeLimits::default(),
            false,
            false,
        )
    }

    #[test]
    fn type_run_sorts_by_extension() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("a.txt"), b"a").unwrap();
        fs::write(root.path().join("b.txt"), b"b").unwrap();
        fs::write(root.path().join("c.png"), b"c").unwrap();
        fs::write(root.path().join("README"), b"r").unwrap();

        let summary = organizer(root.path(), "type")
            .organize(Reporter::quiet())
            .unwrap();

        assert_eq!(summary.files_moved, 4);
        assert!(root.path().join("txt/a.txt").exists());
        assert!(root.path().join("txt/b.txt").exists());
        assert!(root.path().join("png/c.png").exists());
        assert!(root.path().join("README/README").exists());
        assert_eq!(fs::read_dir(root.path().join("txt")).unwrap().count(), 2);
    }

    #[test]
    fn size_limits_come_from_configuration() {
        let root = tempdir().unwrap();
        File::create(root.path().join("blob.bin"))
            .unwrap()
            .set_len(2048)
            .unwrap();

        CriteriaOrganizer::new(
            root.path().to_path_buf(),
            "size",
            SizeLimits::new(1024, 4096).unwrap(),
            false,
            false,
        )
        .organize(Reporter::quiet())
        .unwrap();

        assert!(root.path().join("Medium/blob.bin").exists());
    }

    #[test]
    fn empty_criteria_moves_nothing() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("a.txt"), b"a").unwrap();

        let summary = organizer(root.path(), "").organize(Reporter::quiet()).unwrap();

        assert_eq!(summary, OrganizeSummary::default());
        assert!(root.path().join("a.txt").exists());
    }

    #[tokio::test]
    async fn run_rejects_missing_root() {
        let root = tempdir().unwrap();
        let missing = root.path().join("missing");

        assert!(organizer(&missing, "type").run().await.is_err());
    }

    #[tokio::test]
    async fn run_with_empty_criteria_is_a_no_op_even_for_missing_root() {
        let root = tempdir().unwrap();
        let missing = root.path().join("missing");

        assert!(organizer(&missing, "").run().await.is_ok());
    }

    #[tokio::test]
    async fn run_with_unknown_first_criterion_skips_root_validation() {
        let root = tempdir().unwrap();
        let missing = root.path().join("missing");

        assert!(organizer(&missing, "bogus,type").run().await.is_ok());
        assert!(!missing.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_extensions_get_separate_buckets() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = tempdir().unwrap();
        fs::write(root.path().join(OsStr::from_bytes(b"a.\xff")), b"a").unwrap();
        fs::write(root.path().join(OsStr::from_bytes(b"b.\xfe")), b"b").unwrap();

        organizer(root.path(), "type")
            .organize(Reporter::quiet())
            .unwrap();

        let first = root.path().join(OsStr::from_bytes(b"\xff"));
        let second = root.path().join(OsStr::from_bytes(b"\xfe"));
        assert!(first.join(OsStr::from_bytes(b"a.\xff")).exists());
        assert!(second.join(OsStr::from_bytes(b"b.\xfe")).exists());
        assert_eq!(fs::read_dir(root.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn run_surfaces_move_failures() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("txt/a.txt/blocker")).unwrap();
        fs::write(root.path().join("a.txt"), b"a").unwrap();

        let err = organizer(root.path(), "type").run().await.unwrap_err();

        assert!(err.to_string().contains("failed to move"));
        assert!(root.path().join("a.txt").exists());
    }
}
