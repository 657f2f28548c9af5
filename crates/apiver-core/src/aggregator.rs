//! Endpoint-wide version aggregation
//!
//! All candidates sharing a route template contribute to one aggregate, which
//! answers the endpoint-level questions: is the endpoint version-neutral,
//! which versions are supported or deprecated, and what is the current version.

use crate::headers::ReportedVersions;
use crate::version::ApiVersion;
use crate::version_set::VersionSet;
use std::collections::BTreeSet;

/// Union of the version sets of every candidate mapped to one endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionAggregator {
    neutral: bool,
    candidates: usize,
    mapped: BTreeSet<ApiVersion>,
    supported: BTreeSet<ApiVersion>,
    deprecated: BTreeSet<ApiVersion>,
    advertised: BTreeSet<ApiVersion>,
    deprecated_advertised: BTreeSet<ApiVersion>,
}

impl VersionAggregator {
    /// Create an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Union a candidate's declarations into the aggregate
    pub fn add_candidate(&mut self, versions: &VersionSet) {
        self.candidates += 1;
        self.neutral |= versions.is_version_neutral();
        self.mapped.extend(versions.mapped().iter().cloned());
        self.supported.extend(versions.supported().iter().cloned());
        self.deprecated.extend(versions.deprecated().iter().cloned());
        self.advertised.extend(versions.advertised().iter().cloned());
        self.deprecated_advertised
            .extend(versions.deprecated_advertised().iter().cloned());
    }

    /// Number of candidates added so far
    pub fn candidate_count(&self) -> usize {
        self.candidates
    }

    /// True if any candidate is version-neutral
    pub fn is_version_neutral(&self) -> bool {
        self.neutral
    }

    /// True if no candidate declared any version
    pub fn is_empty(&self) -> bool {
        self.mapped.is_empty()
            && self.supported.is_empty()
            && self.deprecated.is_empty()
            && self.advertised.is_empty()
            && self.deprecated_advertised.is_empty()
    }

    /// Whether `version` appears anywhere in the aggregate
    pub fn declares(&self, version: &ApiVersion) -> bool {
        self.mapped.contains(version)
            || self.supported.contains(version)
            || self.deprecated.contains(version)
            || self.advertised.contains(version)
            || self.deprecated_advertised.contains(version)
    }

    fn is_deprecated_anywhere(&self, version: &ApiVersion) -> bool {
        self.deprecated.contains(version) || self.deprecated_advertised.contains(version)
    }

    fn supported_set(&self) -> BTreeSet<ApiVersion> {
        self.supported
            .iter()
            .chain(&self.advertised)
            .chain(
                self.mapped
                    .iter()
                    .filter(|v| !self.is_deprecated_anywhere(v)),
            )
            .cloned()
            .collect()
    }

    /// Supported versions, ascending and deduplicated
    ///
    /// Includes advertised versions and mapped versions that are not
    /// deprecated anywhere on the endpoint.
    pub fn supported_versions(&self) -> Vec<ApiVersion> {
        self.supported_set().into_iter().collect()
    }

    /// Deprecated versions, ascending and deduplicated
    ///
    /// A version that some candidate still supports is reported as supported only.
    pub fn deprecated_versions(&self) -> Vec<ApiVersion> {
        let supported = self.supported_set();
        self.deprecated
            .iter()
            .chain(&self.deprecated_advertised)
            .filter(|v| !supported.contains(v))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Versions implemented on this endpoint: supported, deprecated and mapped
    pub fn implemented_versions(&self) -> Vec<ApiVersion> {
        self.supported
            .iter()
            .chain(&self.deprecated)
            .chain(&self.mapped)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The version served when a request does not specify one
    ///
    /// The highest implemented version that is not deprecated, or the highest
    /// deprecated one when every implemented version is deprecated.
    pub fn current_version(&self) -> Option<ApiVersion> {
        self.current_version_where(|_| true)
    }

    /// Like [`current_version`](Self::current_version), restricted to the
    /// implemented versions accepted by `servable`
    ///
    /// The selector passes a predicate that keeps only versions some
    /// candidate can actually serve.
    pub fn current_version_where<F>(&self, servable: F) -> Option<ApiVersion>
    where
        F: Fn(&ApiVersion) -> bool,
    {
        let supported = self.supported_set();
        let implemented: Vec<ApiVersion> = self
            .implemented_versions()
            .into_iter()
            .filter(|v| servable(v))
            .collect();

        implemented
            .iter()
            .rev()
            .find(|v| supported.contains(v))
            .or_else(|| implemented.last())
            .cloned()
    }

    /// The version lists reported in response headers
    pub fn reported(&self) -> ReportedVersions {
        ReportedVersions::new(self.supported_versions(), self.deprecated_versions())
    }
}

impl<'a> Extend<&'a VersionSet> for VersionAggregator {
    fn extend<I: IntoIterator<Item = &'a VersionSet>>(&mut self, iter: I) {
        for versions in iter {
            self.add_candidate(versions);
        }
    }
}

impl<'a> FromIterator<&'a VersionSet> for VersionAggregator {
    fn from_iter<I: IntoIterator<Item = &'a VersionSet>>(iter: I) -> Self {
        let mut aggregate = Self::new();
        aggregate.extend(iter);
        aggregate
    }
}
