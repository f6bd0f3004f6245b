use anyhow::Result;
use async_trait::async_trait;
use std::{ffi::OsString, path::Path};

use crate::modules::classifiers::FileEntry;

#[async_trait]
pub trait FileOrganizer {
    /// Run the organization process
    async fn run(&self) -> Result<()>;

    /// Get the root directory for the operation
    fn get_input_dir(&self) -> &Path;
}

/// Maps a scanned file to the name of the bucket it belongs in.
pub trait Classifier {
    /// Criterion name as written on the command line
    fn name(&self) -> &'static str;

    /// Bucket directory name, relative to the directory being scanned
    fn bucket_for(&self, file: &FileEntry) -> OsString;
}
