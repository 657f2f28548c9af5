//! Per-candidate version declarations

use crate::version::ApiVersion;
use std::collections::BTreeSet;

/// The versions a single candidate declares.
///
/// Built with value-returning steps during startup and read-only afterwards:
///
/// ```rust,ignore
/// let set = VersionSet::new()
///     .has(ApiVersion::new(1, 0))
///     .has_deprecated(ApiVersion::new(0, 9))
///     .map_to(ApiVersion::new(1, 0));
/// ```
///
/// A version in `mapped` does not need to appear in `supported`; mapped
/// versions are implemented by the candidate for selection purposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    neutral: bool,
    mapped: BTreeSet<ApiVersion>,
    supported: BTreeSet<ApiVersion>,
    deprecated: BTreeSet<ApiVersion>,
    advertised: BTreeSet<ApiVersion>,
    deprecated_advertised: BTreeSet<ApiVersion>,
}

impl VersionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the candidate as API version-neutral
    pub fn version_neutral(mut self) -> Self {
        self.neutral = true;
        self
    }

    /// Map a version explicitly to the candidate
    pub fn map_to(mut self, version: ApiVersion) -> Self {
        self.mapped.insert(version);
        self
    }

    /// Declare a supported (implemented) version
    pub fn has(mut self, version: ApiVersion) -> Self {
        self.supported.insert(version);
        self
    }

    /// Declare an implemented but deprecated version
    pub fn has_deprecated(mut self, version: ApiVersion) -> Self {
        self.deprecated.insert(version);
        self
    }

    /// Advertise a version implemented elsewhere
    pub fn advertises(mut self, version: ApiVersion) -> Self {
        self.advertised.insert(version);
        self
    }

    /// Advertise a deprecated version implemented elsewhere
    pub fn advertises_deprecated(mut self, version: ApiVersion) -> Self {
        self.deprecated_advertised.insert(version);
        self
    }

    /// Union another set's declarations into this one
    ///
    /// Neutrality is sticky: the result is neutral if either side is.
    pub fn merge(mut self, other: &VersionSet) -> Self {
        self.neutral |= other.neutral;
        self.mapped.extend(other.mapped.iter().cloned());
        self.supported.extend(other.supported.iter().cloned());
        self.deprecated.extend(other.deprecated.iter().cloned());
        self.advertised.extend(other.advertised.iter().cloned());
        self.deprecated_advertised
            .extend(other.deprecated_advertised.iter().cloned());
        self
    }

    /// True if the action accepts any or no version
    pub fn is_version_neutral(&self) -> bool {
        self.neutral
    }

    /// Explicitly mapped versions
    pub fn mapped(&self) -> &BTreeSet<ApiVersion> {
        &self.mapped
    }

    /// Supported versions
    pub fn supported(&self) -> &BTreeSet<ApiVersion> {
        &self.supported
    }

    /// Deprecated versions
    pub fn deprecated(&self) -> &BTreeSet<ApiVersion> {
        &self.deprecated
    }

    /// Advertised versions
    pub fn advertised(&self) -> &BTreeSet<ApiVersion> {
        &self.advertised
    }

    /// Advertised deprecated versions
    pub fn deprecated_advertised(&self) -> &BTreeSet<ApiVersion> {
        &self.deprecated_advertised
    }

    /// Whether any version is explicitly mapped
    pub fn is_explicitly_mapped(&self) -> bool {
        !self.mapped.is_empty()
    }

    /// Whether `version` is explicitly mapped
    pub fn maps(&self, version: &ApiVersion) -> bool {
        self.mapped.contains(version)
    }

    /// Whether `version` appears in any of the declared sets
    pub fn declares(&self, version: &ApiVersion) -> bool {
        self.mapped.contains(version)
            || self.supported.contains(version)
            || self.deprecated.contains(version)
            || self.advertised.contains(version)
            || self.deprecated_advertised.contains(version)
    }

    /// Whether no version is declared at all
    pub fn is_empty(&self) -> bool {
        self.mapped.is_empty()
            && self.supported.is_empty()
            && self.deprecated.is_empty()
            && self.advertised.is_empty()
            && self.deprecated_advertised.is_empty()
    }

    /// Versions the candidate actually implements: supported, deprecated and mapped
    pub fn implemented(&self) -> BTreeSet<ApiVersion> {
        self.supported
            .iter()
            .chain(&self.deprecated)
            .chain(&self.mapped)
            .cloned()
            .collect()
    }

    /// Every version the candidate mentions, implemented or advertised
    pub fn declared(&self) -> BTreeSet<ApiVersion> {
        self.implemented()
            .into_iter()
            .chain(self.advertised.iter().cloned())
            .chain(self.deprecated_advertised.iter().cloned())
            .collect()
    }
}
