//! Candidates and endpoints
//!
//! A [`Candidate`] is one routable action with its declared versions. An
//! [`Endpoint`] groups every candidate that shares a route template together
//! with the aggregate of their versions.

use crate::aggregator::VersionAggregator;
use crate::version::ApiVersion;
use crate::version_set::VersionSet;
use std::fmt;

/// A routable action and the versions it declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    resource: String,
    action: String,
    versions: VersionSet,
}

impl Candidate {
    /// Create a candidate for `resource.action`
    pub fn new(resource: impl Into<String>, action: impl Into<String>, versions: VersionSet) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
            versions,
        }
    }

    /// Name of the owning resource (controller)
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Name of the action within the resource
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Declared versions
    pub fn versions(&self) -> &VersionSet {
        &self.versions
    }

    /// True when the candidate maps specific versions explicitly
    pub fn is_explicitly_mapped(&self) -> bool {
        self.versions.is_explicitly_mapped()
    }

    /// Whether an implicit candidate can serve `version`
    ///
    /// A candidate that declares nothing serves every version of its endpoint.
    pub fn accepts(&self, version: &ApiVersion) -> bool {
        self.versions.is_empty() || self.versions.declares(version)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.action)
    }
}

/// Every candidate sharing one route template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    template: String,
    candidates: Vec<Candidate>,
    aggregate: VersionAggregator,
}

impl Endpoint {
    /// Create an endpoint with no candidates
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            candidates: Vec::new(),
            aggregate: VersionAggregator::new(),
        }
    }

    /// Add a candidate
    pub fn candidate(mut self, candidate: Candidate) -> Self {
        self.aggregate.add_candidate(candidate.versions());
        self.candidates.push(candidate);
        self
    }

    /// Add several candidates, keeping their order
    pub fn candidates(self, candidates: impl IntoIterator<Item = Candidate>) -> Self {
        candidates.into_iter().fold(self, Self::candidate)
    }

    /// Absorb the candidates of another endpoint
    pub fn merge(self, other: Endpoint) -> Self {
        self.candidates(other.candidates)
    }

    /// Route template shared by the candidates
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Candidates in declaration order
    pub fn candidate_list(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Aggregate of every candidate's versions
    pub fn aggregate(&self) -> &VersionAggregator {
        &self.aggregate
    }
}
