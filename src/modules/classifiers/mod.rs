use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};
use walkdir::{DirEntry, WalkDir};

use crate::modules::{base::Classifier, mover::Mover};

mod date;
mod file_type;
mod size;

pub use date::DateClassifier;
pub use file_type::TypeClassifier;
pub use size::{SizeClassifier, SizeLimits, MIB};

/// A plain file directly inside the scanned directory, as seen at scan time.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: OsString,
    pub size: u64,
    pub modified: DateTime<Local>,
}

impl FileEntry {
    fn from_dir_entry(entry: &DirEntry) -> Result<Self> {
        let metadata = entry
            .metadata()
            .with_context(|| format!("failed to read metadata of {}", entry.path().display()))?;
        let modified = metadata.modified().with_context(|| {
            format!(
                "failed to read modification time of {}",
                entry.path().display()
            )
        })?;
        let modified = local_time(modified).ok_or_else(|| {
            anyhow!(
                "modification time of {} is out of range",
                entry.path().display()
            )
        })?;

        Ok(Self {
            path: entry.path().to_path_buf(),
            name: entry.file_name().to_os_string(),
            size: metadata.len(),
            modified,
        })
    }
}

/// `None` when the timestamp lies outside what chrono can represent.
fn local_time(time: SystemTime) -> Option<DateTime<Local>> {
    let utc = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            let secs = i64::try_from(after.as_secs()).ok()?;
            DateTime::from_timestamp(secs, after.subsec_nanos())?
        }
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => DateTime::from_timestamp(-secs, 0)?,
                nanos => DateTime::from_timestamp(-secs - 1, 1_000_000_000 - nanos)?,
            }
        }
    };
    Some(utc.with_timezone(&Local))
}

/// Immediate entries of a directory, in file-name order.
struct Snapshot {
    entries: Vec<DirEntry>,
    /// Links back to the listed directory itself. walkdir reports them as
    /// loops instead of entries, but they still name a directory.
    ancestor_links: Vec<PathBuf>,
}

/// Lists `dir` one level deep. Symbolic links are followed; dangling links
/// are neither files nor directories and are left out.
fn snapshot(dir: &Path) -> Result<Snapshot> {
    let mut snapshot = Snapshot {
        entries: Vec::new(),
        ancestor_links: Vec::new(),
    };
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => snapshot.entries.push(entry),
            Err(err) if err.depth() > 0 && err.loop_ancestor().is_some() => {
                if let Some(path) = err.path() {
                    snapshot.ancestor_links.push(path.to_path_buf());
                }
            }
            Err(err) if is_dangling_link(&err) => {
                log::debug!("skipping {}", err);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to list {}", dir.display()));
            }
        }
    }
    Ok(snapshot)
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.depth() > 0
        && err.path().is_some_and(|path| {
            path.symlink_metadata()
                .map(|meta| meta.file_type().is_symlink())
                .unwrap_or(false)
        })
}

pub fn list_files(dir: &Path) -> Result<Vec<FileEntry>> {
    snapshot(dir)?
        .entries
        .iter()
        .filter(|entry| entry.file_type().is_file())
        .map(FileEntry::from_dir_entry)
        .collect()
}

pub fn list_subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let Snapshot {
        entries,
        mut ancestor_links,
    } = snapshot(dir)?;

    let mut subdirectories: Vec<PathBuf> = entries
        .into_iter()
        .filter(|entry| entry.file_type().is_dir())
        .map(DirEntry::into_path)
        .collect();
    if !ancestor_links.is_empty() {
        subdirectories.append(&mut ancestor_links);
        subdirectories.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }
    Ok(subdirectories)
}

/// Moves every file directly inside `dir` into the bucket `classifier`
/// picks for it. The listing is taken once, before the first move, so
/// buckets and staged files created along the way are never rescanned.
/// Returns the number of files moved.
pub fn classify_directory(dir: &Path, classifier: &dyn Classifier, mover: &Mover) -> Result<usize> {
    let files = list_files(dir)?;

    for file in &files {
        let bucket = classifier.bucket_for(file);
        mover.move_file(&file.path, &dir.join(&bucket))?;
    }

    Ok(files.len())
}
