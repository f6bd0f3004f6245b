use std::ffi::OsString;

use crate::modules::base::Classifier;

use super::FileEntry;

/// Buckets files by local modification date, `YYYY-MM-DD`.
pub struct DateClassifier;

impl Classifier for DateClassifier {
    fn name(&self) -> &'static str {
        "date"
    }

    fn bucket_for(&self, file: &FileEntry) -> OsString {
        file.modified.format("%Y-%m-%d").to_string().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    #[test]
    fn formats_local_calendar_date() {
        let file = FileEntry {
            path: PathBuf::from("report.pdf"),
            name: "report.pdf".into(),
            size: 1,
            modified: Local.with_ymd_and_hms(2023, 3, 7, 23, 59, 0).unwrap(),
        };

        assert_eq!(DateClassifier.bucket_for(&file), "2023-03-07");
    }
}
