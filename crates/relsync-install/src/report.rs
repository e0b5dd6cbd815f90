use std::path::{Path, PathBuf};

/// Outcome of deploying to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetResult {
    pub target: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

impl TargetResult {
    pub fn success(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            success: true,
            error: None,
        }
    }

    pub fn failure(target: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Aggregate outcome of a run that reached the target loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Release version deployed, when it came from a resolved release.
    pub version: Option<String>,
    pub results: Vec<TargetResult>,
    /// Whether dependency extraction ran for targets.
    pub dependencies_extracted: bool,
}

impl RunReport {
    /// True when every target succeeded.
    pub fn success(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &TargetResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn result_for(&self, target: &Path) -> Option<&TargetResult> {
        self.results.iter().find(|r| r.target == target)
    }
}
