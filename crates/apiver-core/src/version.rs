//! API version type and parsing
//!
//! Provides the immutable, comparable version identifier used by every other
//! part of the selection engine.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const GROUP_VERSION_FORMAT: &str = "%Y-%m-%d";
const GROUP_VERSION_LEN: usize = 10;

/// API version identifier
///
/// Supports formats like:
/// - `1`, `1.0`, `v2.1` (major[.minor])
/// - `1.0-beta` (numeric with status)
/// - `2024-01-15` (group version)
/// - `2024-01-15.1.0-rc` (group version with numeric part and status)
///
/// A missing minor number is treated as `0`, so `"1"` and `"1.0"` parse to
/// equal values. Status labels compare case-insensitively.
#[derive(Debug, Clone)]
pub struct ApiVersion {
    group: Option<NaiveDate>,
    major: Option<u32>,
    minor: Option<u32>,
    status: Option<String>,
}

impl ApiVersion {
    /// Create a `major.minor` version
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            group: None,
            major: Some(major),
            minor: Some(minor),
            status: None,
        }
    }

    /// Create a version with only a major number (`major.0`)
    pub fn major(major: u32) -> Self {
        Self::new(major, 0)
    }

    /// Create a date-based group version
    pub fn from_group(date: NaiveDate) -> Self {
        Self {
            group: Some(date),
            major: None,
            minor: None,
            status: None,
        }
    }

    /// Create a group version that also carries a numeric part
    pub fn grouped(date: NaiveDate, major: u32, minor: u32) -> Self {
        Self {
            group: Some(date),
            major: Some(major),
            minor: Some(minor),
            status: None,
        }
    }

    /// Return a copy of this version carrying the given status label
    pub fn with_status(self, status: impl Into<String>) -> Result<Self, VersionParseError> {
        let status = status.into();
        validate_status(&status)?;
        Ok(Self {
            status: Some(status),
            ..self
        })
    }

    /// Parse a version token
    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(VersionParseError::Empty);
        }

        if looks_like_group_version(text) {
            let (date, rest) = text.split_at(GROUP_VERSION_LEN);
            let group = NaiveDate::parse_from_str(date, GROUP_VERSION_FORMAT)
                .map_err(|_| VersionParseError::InvalidGroupVersion(date.to_string()))?;

            let (numbers, status) = split_status(rest)?;
            let (major, minor) = match numbers {
                "" => (None, None),
                _ => match numbers.strip_prefix('.') {
                    Some(numbers) => {
                        let (major, minor) = parse_numbers(numbers)?;
                        (Some(major), Some(minor))
                    }
                    None => return Err(VersionParseError::InvalidFormat(text.to_string())),
                },
            };

            return Ok(Self {
                group: Some(group),
                major,
                minor,
                status,
            });
        }

        let unprefixed = text
            .strip_prefix('v')
            .or_else(|| text.strip_prefix('V'))
            .unwrap_or(text);
        let (numbers, status) = split_status(unprefixed)?;
        if numbers.is_empty() {
            return Err(VersionParseError::InvalidFormat(text.to_string()));
        }
        let (major, minor) = parse_numbers(numbers)?;

        Ok(Self {
            group: None,
            major: Some(major),
            minor: Some(minor),
            status,
        })
    }

    /// Group version date, if any
    pub fn group_version(&self) -> Option<NaiveDate> {
        self.group
    }

    /// Major version number, if any
    pub fn major_version(&self) -> Option<u32> {
        self.major
    }

    /// Minor version number, if any
    pub fn minor_version(&self) -> Option<u32> {
        self.minor
    }

    /// Status label, if any
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether this version carries a status label
    pub fn is_prerelease(&self) -> bool {
        self.status.is_some()
    }
}

fn looks_like_group_version(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= GROUP_VERSION_LEN
        && bytes[..GROUP_VERSION_LEN]
            .iter()
            .enumerate()
            .all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
}

/// Split `numbers[-status]`, validating the status label.
fn split_status(text: &str) -> Result<(&str, Option<String>), VersionParseError> {
    match text.split_once('-') {
        Some((numbers, status)) => {
            validate_status(status)?;
            Ok((numbers, Some(status.to_string())))
        }
        None => Ok((text, None)),
    }
}

fn parse_numbers(text: &str) -> Result<(u32, u32), VersionParseError> {
    let mut parts = text.split('.');
    let major = parse_number(parts.next().unwrap_or_default())?;
    let minor = match parts.next() {
        Some(minor) => parse_number(minor)?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(VersionParseError::InvalidFormat(text.to_string()));
    }
    Ok((major, minor))
}

fn parse_number(text: &str) -> Result<u32, VersionParseError> {
    // `u32::from_str` accepts a leading '+', version tokens do not
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionParseError::InvalidNumber(text.to_string()));
    }
    text.parse()
        .map_err(|_| VersionParseError::InvalidNumber(text.to_string()))
}

fn validate_status(status: &str) -> Result<(), VersionParseError> {
    if status.is_empty() || !status.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(VersionParseError::InvalidStatus(status.to_string()));
    }
    Ok(())
}

fn cmp_status(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .bytes()
            .map(|c| c.to_ascii_lowercase())
            .cmp(b.bytes().map(|c| c.to_ascii_lowercase())),
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(group) = self.group {
            write!(f, "{}", group.format(GROUP_VERSION_FORMAT))?;
            if self.major.is_some() {
                f.write_str(".")?;
            }
        }
        if let Some(major) = self.major {
            write!(f, "{}.{}", major, self.minor.unwrap_or(0))?;
        }
        if let Some(status) = &self.status {
            write!(f, "-{}", status)?;
        }
        Ok(())
    }
}

impl FromStr for ApiVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for ApiVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ApiVersion {}

impl Hash for ApiVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group.hash(state);
        self.major.hash(state);
        self.minor.unwrap_or(0).hash(state);
        match &self.status {
            Some(status) => {
                state.write_u8(1);
                for b in status.bytes() {
                    state.write_u8(b.to_ascii_lowercase());
                }
            }
            None => state.write_u8(0),
        }
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.group
            .cmp(&other.group)
            .then_with(|| self.major.cmp(&other.major))
            .then_with(|| self.minor.unwrap_or(0).cmp(&other.minor.unwrap_or(0)))
            .then_with(|| cmp_status(&self.status, &other.status))
    }
}

impl Serialize for ApiVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for version parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    /// Empty version string
    #[error("empty version string")]
    Empty,
    /// Invalid number in version string
    #[error("invalid number '{0}' in version")]
    InvalidNumber(String),
    /// Group version is not a valid `yyyy-MM-dd` date
    #[error("invalid group version '{0}'")]
    InvalidGroupVersion(String),
    /// Status label is empty or not alphanumeric
    #[error("invalid status '{0}'")]
    InvalidStatus(String),
    /// Invalid version format
    #[error("invalid version format '{0}'")]
    InvalidFormat(String),
}
