use std::fmt;

/// Name of a git branch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName {
    name: String,
}

impl BranchName {
    /// Maintenance branch for a major.minor line, e.g. `1.4.x`
    pub fn release_line(major: u64, minor: u64) -> Self {
        BranchName {
            name: format!("{}.{}.x", major, minor),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
