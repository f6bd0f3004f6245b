use anyhow::Result;
use std::{fmt, ops::AddAssign, path::Path};

use crate::modules::{
    base::Classifier,
    classifiers::{
        classify_directory, list_subdirectories, DateClassifier, SizeClassifier, SizeLimits,
        TypeClassifier,
    },
    mover::Mover,
};
use crate::utils::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Date,
    Type,
    Size,
}

impl Criterion {
    /// Exact, case-sensitive lookup. Anything else is not a criterion.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "date" => Some(Self::Date),
            "type" => Some(Self::Type),
            "size" => Some(Self::Size),
            _ => None,
        }
    }

    pub fn classifier(self, limits: SizeLimits) -> Box<dyn Classifier> {
        match self {
            Self::Date => Box::new(DateClassifier),
            Self::Type => Box::new(TypeClassifier),
            Self::Size => Box::new(SizeClassifier::new(limits)),
        }
    }
}

/// Criterion names in nesting order, kept as written so an unknown name
/// can end its branch when dispatch reaches it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaList(Vec<String>);

impl CriteriaList {
    pub fn parse(spec: &str) -> Self {
        if spec.is_empty() {
            return Self::default();
        }
        Self(spec.split(',').map(str::to_string).collect())
    }

    pub fn split_first(&self) -> Option<(&str, &[String])> {
        self.0
            .split_first()
            .map(|(head, tail)| (head.as_str(), tail))
    }

    pub fn mentions(&self, criterion: Criterion) -> bool {
        self.0
            .iter()
            .any(|name| Criterion::from_name(name) == Some(criterion))
    }
}

impl fmt::Display for CriteriaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" > "))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizeSummary {
    pub files_moved: usize,
    pub directories_classified: usize,
}

impl AddAssign for OrganizeSummary {
    fn add_assign(&mut self, other: Self) {
        self.files_moved += other.files_moved;
        self.directories_classified += other.directories_classified;
    }
}

/// Applies one criterion per tree level, depth-first.
pub struct Dispatcher {
    limits: SizeLimits,
    mover: Mover,
    reporter: Reporter,
}

impl Dispatcher {
    pub fn new(limits: SizeLimits, reporter: Reporter) -> Self {
        Self {
            limits,
            mover: Mover::new(reporter.clone()),
            reporter,
        }
    }

    /// Classifies the files of `directory` by `criterion`, then hands every
    /// subdirectory present afterwards (fresh buckets and pre-existing ones
    /// alike) the next criterion in `remaining`. An unknown criterion is a
    /// no-op and stops this branch.
    pub fn apply(
        &self,
        directory: &Path,
        criterion: &str,
        remaining: &[String],
    ) -> Result<OrganizeSummary> {
        let Some(criterion) = Criterion::from_name(criterion) else {
            log::debug!(
                "ignoring unknown criterion '{}' in {}",
                criterion,
                directory.display()
            );
            return Ok(OrganizeSummary::default());
        };

        let classifier = criterion.classifier(self.limits);
        log::info!("organizing by {} in {}", classifier.name(), directory.display());
        self.reporter.say(&format!(
            "Organizing by {} in {}...",
            classifier.name(),
            directory.display()
        ));
        self.reporter.status(format!(
            "Organizing by {} in {}",
            classifier.name(),
            directory.display()
        ));

        let mut summary = OrganizeSummary {
            files_moved: classify_directory(directory, classifier.as_ref(), &self.mover)?,
            directories_classified: 1,
        };

        if let Some((next, rest)) = remaining.split_first() {
            for subdirectory in list_subdirectories(directory)? {
                summary += self.apply(&subdirectory, next, rest)?;
            }
        }

        Ok(summary)
    }
}
