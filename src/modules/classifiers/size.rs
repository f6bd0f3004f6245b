use humansize::{format_size, BINARY};
use std::{ffi::OsString, fmt};

use crate::error::OrganizeError;
use crate::modules::base::Classifier;

use super::FileEntry;

pub const MIB: u64 = 1024 * 1024;

/// Exclusive upper bounds, in bytes, of the `Small` and `Medium` buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    pub small: u64,
    pub medium: u64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            small: 10 * MIB,
            medium: 50 * MIB,
        }
    }
}

impl SizeLimits {
    pub fn new(small: u64, medium: u64) -> Result<Self, OrganizeError> {
        if small > medium {
            return Err(OrganizeError::InvalidSizeLimits { small, medium });
        }
        Ok(Self { small, medium })
    }

    pub fn bucket(&self, size: u64) -> &'static str {
        if size < self.small {
            "Small"
        } else if size < self.medium {
            "Medium"
        } else {
            "Large"
        }
    }
}

impl fmt::Display for SizeLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Small < {}, Medium < {}",
            format_size(self.small, BINARY),
            format_size(self.medium, BINARY)
        )
    }
}

pub struct SizeClassifier {
    limits: SizeLimits,
}

impl SizeClassifier {
    pub fn new(limits: SizeLimits) -> Self {
        Self { limits }
    }
}

impl Classifier for SizeClassifier {
    fn name(&self) -> &'static str {
        "size"
    }

    fn bucket_for(&self, file: &FileEntry) -> OsString {
        self.limits.bucket(file.size).into()
    }
}
