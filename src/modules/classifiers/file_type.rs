use std::ffi::{OsStr, OsString};

use crate::modules::base::Classifier;

use super::FileEntry;

/// Buckets files by the text after the last `.` of their name. Names
/// without a dot are their own bucket.
pub struct TypeClassifier;

impl Classifier for TypeClassifier {
    fn name(&self) -> &'static str {
        "type"
    }

    fn bucket_for(&self, file: &FileEntry) -> OsString {
        extension_of(&file.name)
    }
}

/// Splits on raw bytes so names that are not valid UTF-8 keep distinct
/// buckets.
#[cfg(unix)]
fn extension_of(name: &OsStr) -> OsString {
    use std::os::unix::ffi::OsStrExt;

    let bytes = name.as_bytes();
    match bytes.iter().rposition(|&b| b == b'.') {
        Some(dot) => OsStr::from_bytes(&bytes[dot + 1..]).to_os_string(),
        None => name.to_os_string(),
    }
}

#[cfg(not(unix))]
fn extension_of(name: &OsStr) -> OsString {
    let lossy = name.to_string_lossy();
    match lossy.rsplit_once('.') {
        Some((_, extension)) => OsString::from(extension),
        None => name.to_os_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::path::PathBuf;

    fn bucket(name: impl Into<OsString>) -> OsString {
        let name = name.into();
        TypeClassifier.bucket_for(&FileEntry {
            path: PathBuf::from(&name),
            name,
            size: 0,
            modified: Local::now(),
        })
    }

    #[test]
    fn uses_last_extension_case_sensitively() {
        assert_eq!(bucket("notes.txt"), "txt");
        assert_eq!(bucket("IMG_0001.JPG"), "JPG");
        assert_eq!(bucket("backup.tar.gz"), "gz");
    }

    #[test]
    fn dotless_name_is_its_own_bucket() {
        assert_eq!(bucket("README"), "README");
        assert_eq!(bucket("Makefile"), "Makefile");
    }

    #[test]
    fn dotfiles_and_trailing_dots() {
        assert_eq!(bucket(".bashrc"), "bashrc");
        assert_eq!(bucket("draft."), "");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_extensions_stay_distinct() {
        use std::os::unix::ffi::OsStringExt;

        let first = bucket(OsString::from_vec(b"a.\xff".to_vec()));
        let second = bucket(OsString::from_vec(b"b.\xfe".to_vec()));

        assert_eq!(first.into_vec(), b"\xff");
        assert_eq!(second.into_vec(), b"\xfe");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_without_dot_is_kept_verbatim() {
        use std::os::unix::ffi::OsStringExt;

        let raw = b"caf\xe9".to_vec();
        assert_eq!(bucket(OsString::from_vec(raw.clone())).into_vec(), raw);
    }
}
