use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::modules::{
    base::FileOrganizer,
    classifiers::{SizeLimits, MIB},
    organizer::CriteriaOrganizer,
};

/// Organizes files in the specified directory based on specific criteria.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to organize
    directory: PathBuf,

    /// Order of organization criteria, separated by commas: date,type,size
    #[arg(long, default_value = "type")]
    criteria: String,

    /// Print every move as it happens
    #[arg(short, long)]
    verbose: bool,

    /// Files below this many bytes are Small
    #[arg(long, value_name = "BYTES", default_value_t = 10 * MIB)]
    small_limit: u64,

    /// Files below this many bytes (and not Small) are Medium
    #[arg(long, value_name = "BYTES", default_value_t = 50 * MIB)]
    medium_limit: u64,

    /// Ask for confirmation before moving anything
    #[arg(short, long)]
    interactive: bool,
}

impl Cli {
    pub fn new() -> Result<Self> {
        Ok(Self::parse())
    }

    pub async fn run(&self) -> Result<()> {
        let limits = SizeLimits::new(self.small_limit, self.medium_limit)?;
        let organizer = CriteriaOrganizer::new(
            self.directory.clone(),
            &self.criteria,
            limits,
            self.verbose,
            self.interactive,
        );
        organizer.run().await
    }
}
