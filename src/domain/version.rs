use crate::domain::BranchName;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version grammar from semver.org, with an optional leading `v`.
const VERSION_PATTERN: &str = r"^v?(?P<major>0|[1-9]\d*)\.(?P<minor>0|[1-9]\d*)\.(?P<patch>0|[1-9]\d*)(?:-(?P<prerelease>(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+(?P<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$";

/// Semantic version parsed from a milestone title or tag.
///
/// Values are immutable: derivations (`next_patch`, `next_minor`, `next_major`)
/// return new instances and always drop prerelease and build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemVerVersion {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: String,
    build_metadata: String,
}

impl SemVerVersion {
    fn release(major: u64, minor: u64, patch: u64) -> Self {
        SemVerVersion {
            major,
            minor,
            patch,
            prerelease: String::new(),
            build_metadata: String::new(),
        }
    }

    /// Parse a version such as `1.4.0`, `v2.0.0-rc.1` or `1.0.0+build.5`.
    ///
    /// # Returns
    /// * `Ok(SemVerVersion)` - Parsed version
    /// * `Err(InvalidVersionFormat)` - If the text is empty or does not match the full grammar
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(ReleaseError::invalid_version(text));
        }

        let re = Regex::new(VERSION_PATTERN).map_err(|_| ReleaseError::invalid_version(text))?;
        let captures = re
            .captures(text)
            .ok_or_else(|| ReleaseError::invalid_version(text))?;

        let number = |name: &str| -> Result<u64> {
            captures
                .name(name)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .ok_or_else(|| ReleaseError::invalid_version(text))
        };
        let text_part = |name: &str| -> String {
            captures
                .name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        Ok(SemVerVersion {
            major: number("major")?,
            minor: number("minor")?,
            patch: number("patch")?,
            prerelease: text_part("prerelease"),
            build_metadata: text_part("buildmetadata"),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> &str {
        &self.prerelease
    }

    pub fn build_metadata(&self) -> &str {
        &self.build_metadata
    }

    /// Canonical `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILDMETADATA]` rendering.
    pub fn full_release_name(&self) -> String {
        let mut name = format!("{}.{}.{}", self.major, self.minor, self.patch);
        if !self.prerelease.is_empty() {
            name.push('-');
            name.push_str(&self.prerelease);
        }
        if !self.build_metadata.is_empty() {
            name.push('+');
            name.push_str(&self.build_metadata);
        }
        name
    }

    /// Next patch release, e.g. `1.2.3` to `1.2.4`
    ///
    /// Fails with `InvalidVersionFormat` when the patch number cannot be incremented.
    pub fn next_patch(&self) -> Result<Self> {
        let patch = self.bump(self.patch)?;
        Ok(Self::release(self.major, self.minor, patch))
    }

    pub fn next_minor(&self) -> Result<Self> {
        let minor = self.bump(self.minor)?;
        Ok(Self::release(self.major, minor, 0))
    }

    pub fn next_major(&self) -> Result<Self> {
        let major = self.bump(self.major)?;
        Ok(Self::release(major, 0, 0))
    }

    fn bump(&self, component: u64) -> Result<u64> {
        component
            .checked_add(1)
            .ok_or_else(|| ReleaseError::invalid_version(self.full_release_name()))
    }

    /// The maintenance branch `{major}.{minor}.x` this version is released from.
    pub fn target_release_branch_name(&self) -> BranchName {
        BranchName::release_line(self.major, self.minor)
    }

    fn is_plain_release(&self) -> bool {
        self.prerelease.is_empty() && self.build_metadata.is_empty()
    }

    pub fn is_new_minor_release(&self) -> bool {
        self.patch == 0 && self.is_plain_release()
    }

    pub fn is_new_major_release(&self) -> bool {
        self.minor == 0 && self.patch == 0 && self.is_plain_release()
    }

    /// Compares the rendered release names byte-wise.
    ///
    /// This is not semantic-version precedence: `1.10.0` sorts before `1.9.0`.
    /// Release ordering decisions depend on this exact behavior; use
    /// [`SemVerVersion::cmp_precedence`] when true precedence is wanted.
    pub fn less_than_equal(&self, other: &SemVerVersion) -> bool {
        self.full_release_name() <= other.full_release_name()
    }

    /// Convert into a `semver::Version`.
    pub fn to_semver(&self) -> Result<semver::Version> {
        let name = self.full_release_name();
        semver::Version::parse(&name).map_err(|_| ReleaseError::invalid_version(name))
    }

    /// Numeric semantic-version precedence, ignoring build metadata.
    pub fn cmp_precedence(&self, other: &SemVerVersion) -> Result<Ordering> {
        Ok(self.to_semver()?.cmp_precedence(&other.to_semver()?))
    }
}

impl FromStr for SemVerVersion {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        SemVerVersion::parse(s)
    }
}

impl fmt::Display for SemVerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_release_name())
    }
}
