//! Version selection
//!
//! Given the raw version token of a request and the candidates of the matched
//! endpoint, decides which candidate serves the request and at which version,
//! or why the request is rejected.
//!
//! Selection order, first match wins:
//!
//! 1. a version-neutral candidate serves every request, whatever the token
//! 2. a token that does not parse is rejected as malformed
//! 3. a missing token resolves per [`UnspecifiedVersionPolicy`]
//! 4. a version mapped by exactly one candidate selects that candidate
//! 5. a version mapped by several candidates is ambiguous
//! 6. a version the endpoint declares but nobody maps goes to the implicit
//!    candidate accepting it, if there is exactly one
//! 7. anything else is unsupported
//!
//! Only candidates that map the version can be ambiguous. Several implicit
//! candidates accepting the same version leave it unsupported.

use crate::aggregator::VersionAggregator;
use crate::candidate::{Candidate, Endpoint};
use crate::error::{ApiVersionError, ErrorCode, Result};
use crate::options::{UnspecifiedVersionPolicy, VersioningOptions};
use crate::version::{ApiVersion, VersionParseError};
use tracing::{debug, error, warn};

/// Result of running the selection algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome<'a> {
    /// The requested version selected exactly one candidate
    Selected {
        candidate: &'a Candidate,
        version: ApiVersion,
    },
    /// No version was requested; the resolved version selected a candidate
    UnspecifiedVersionMatch {
        candidate: &'a Candidate,
        version: ApiVersion,
    },
    /// The endpoint is version-neutral; version resolution was skipped
    VersionNeutralMatch { candidate: &'a Candidate },
    /// Several candidates implement the resolved version
    AmbiguousMatch {
        version: ApiVersion,
        candidates: Vec<&'a Candidate>,
    },
    /// No version was requested and the policy requires one
    UnspecifiedVersion,
    /// The version parsed but no candidate serves it
    UnsupportedVersion { requested: ApiVersion },
    /// The version token could not be parsed
    MalformedVersion {
        token: String,
        reason: VersionParseError,
    },
}

impl<'a> SelectionOutcome<'a> {
    /// True when a candidate was chosen
    pub fn is_success(&self) -> bool {
        self.candidate().is_some()
    }

    /// The chosen candidate, if any
    pub fn candidate(&self) -> Option<&'a Candidate> {
        match self {
            Self::Selected { candidate, .. }
            | Self::UnspecifiedVersionMatch { candidate, .. }
            | Self::VersionNeutralMatch { candidate } => Some(*candidate),
            _ => None,
        }
    }

    /// The resolved version, if one was determined
    ///
    /// Version-neutral matches have no resolved version.
    pub fn version(&self) -> Option<&ApiVersion> {
        match self {
            Self::Selected { version, .. }
            | Self::UnspecifiedVersionMatch { version, .. }
            | Self::AmbiguousMatch { version, .. } => Some(version),
            Self::UnsupportedVersion { requested } => Some(requested),
            _ => None,
        }
    }

    /// Error code for rejected requests
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::AmbiguousMatch { .. } => Some(ErrorCode::AmbiguousApiVersion),
            Self::UnspecifiedVersion => Some(ErrorCode::ApiVersionUnspecified),
            Self::UnsupportedVersion { .. } => Some(ErrorCode::UnsupportedApiVersion),
            Self::MalformedVersion { .. } => Some(ErrorCode::InvalidApiVersion),
            _ => None,
        }
    }

    /// Build the error for a rejected request
    ///
    /// Client errors carry the endpoint's supported versions.
    pub fn to_error(&self, aggregate: &VersionAggregator) -> Option<ApiVersionError> {
        let err = match self {
            Self::AmbiguousMatch {
                version,
                candidates,
            } => {
                let names: Vec<String> = candidates.iter().map(ToString::to_string).collect();
                return Some(ApiVersionError::ambiguous(version, &names));
            }
            Self::UnspecifiedVersion => ApiVersionError::unspecified(),
            Self::UnsupportedVersion { requested } => ApiVersionError::unsupported(requested),
            Self::MalformedVersion { token, reason } => ApiVersionError::invalid(token, reason),
            _ => return None,
        };
        Some(err.with_supported_versions(aggregate.supported_versions()))
    }

    /// `Ok` for a chosen candidate, otherwise the error to respond with
    pub fn into_result(self, aggregate: &VersionAggregator) -> Result<Self> {
        match self.to_error(aggregate) {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

enum Match<'a> {
    One(&'a Candidate),
    Many(Vec<&'a Candidate>),
    Nothing,
}

impl<'a> Match<'a> {
    fn from_vec(mut candidates: Vec<&'a Candidate>) -> Self {
        match candidates.len() {
            0 => Self::Nothing,
            1 => Self::One(candidates.remove(0)),
            _ => Self::Many(candidates),
        }
    }
}

/// Runs the selection algorithm against endpoints
#[derive(Debug, Clone, Default)]
pub struct VersionSelector {
    options: VersioningOptions,
}

impl VersionSelector {
    /// Create a selector with the given options
    pub fn new(options: VersioningOptions) -> Self {
        Self { options }
    }

    /// Options used for resolution
    pub fn options(&self) -> &VersioningOptions {
        &self.options
    }

    /// Select a candidate of `endpoint` for the raw version token
    ///
    /// A blank token is treated as absent.
    pub fn select<'a>(&self, token: Option<&str>, endpoint: &'a Endpoint) -> SelectionOutcome<'a> {
        let _span = tracing::debug_span!("select_api_version", template = endpoint.template()).entered();
        self.select_from(token, endpoint.aggregate(), endpoint.candidate_list())
    }

    /// Select among `candidates`, whose versions are merged in `aggregate`
    pub fn select_from<'a>(
        &self,
        token: Option<&str>,
        aggregate: &VersionAggregator,
        candidates: &'a [Candidate],
    ) -> SelectionOutcome<'a> {
        let mut neutral = candidates.iter().filter(|c| c.versions().is_version_neutral());
        if let Some(candidate) = neutral.next() {
            if let Some(other) = neutral.next() {
                warn!(
                    selected = %candidate,
                    ignored = %other,
                    "multiple version-neutral candidates, using the first"
                );
            }
            debug!(candidate = %candidate, "version-neutral match");
            return SelectionOutcome::VersionNeutralMatch { candidate };
        }

        match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => match ApiVersion::parse(token) {
                Ok(version) => self.resolve(version, aggregate, candidates, false),
                Err(reason) => {
                    debug!(token, %reason, "malformed api version");
                    SelectionOutcome::MalformedVersion {
                        token: token.to_string(),
                        reason,
                    }
                }
            },
            None => {
                let version = match self.options.unspecified_version {
                    UnspecifiedVersionPolicy::Current => aggregate
                        .current_version_where(|v| self.can_serve(v, aggregate, candidates))
                        .unwrap_or_else(|| self.options.default_version.clone()),
                    UnspecifiedVersionPolicy::Default => self.options.default_version.clone(),
                    UnspecifiedVersionPolicy::Reject => {
                        debug!("api version required but not specified");
                        return SelectionOutcome::UnspecifiedVersion;
                    }
                };
                debug!(version = %version, "no api version requested");
                self.resolve(version, aggregate, candidates, true)
            }
        }
    }

    fn resolve<'a>(
        &self,
        version: ApiVersion,
        aggregate: &VersionAggregator,
        candidates: &'a [Candidate],
        unspecified: bool,
    ) -> SelectionOutcome<'a> {
        match self.match_version(&version, aggregate, candidates) {
            Match::One(candidate) => {
                debug!(candidate = %candidate, version = %version, "api version selected");
                if unspecified {
                    SelectionOutcome::UnspecifiedVersionMatch { candidate, version }
                } else {
                    SelectionOutcome::Selected { candidate, version }
                }
            }
            Match::Many(candidates) => {
                let names: Vec<String> = candidates.iter().map(ToString::to_string).collect();
                error!(
                    version = %version,
                    candidates = ?names,
                    "api version is implemented by multiple candidates"
                );
                SelectionOutcome::AmbiguousMatch {
                    version,
                    candidates,
                }
            }
            Match::Nothing => {
                debug!(version = %version, "unsupported api version");
                SelectionOutcome::UnsupportedVersion { requested: version }
            }
        }
    }

    fn match_version<'a>(
        &self,
        version: &ApiVersion,
        aggregate: &VersionAggregator,
        candidates: &'a [Candidate],
    ) -> Match<'a> {
        let mapped: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| c.versions().maps(version))
            .collect();
        if !mapped.is_empty() {
            return Match::from_vec(mapped);
        }

        if !self.is_declared(version, aggregate) {
            return Match::Nothing;
        }

        let mut implicit = candidates
            .iter()
            .filter(|c| !c.is_explicitly_mapped() && c.accepts(version));
        match (implicit.next(), implicit.next()) {
            (Some(candidate), None) => Match::One(candidate),
            (Some(first), Some(second)) => {
                debug!(
                    version = %version,
                    first = %first,
                    second = %second,
                    "several implicit candidates accept api version"
                );
                Match::Nothing
            }
            _ => Match::Nothing,
        }
    }

    // an endpoint declaring no versions at all implicitly has the default one
    fn is_declared(&self, version: &ApiVersion, aggregate: &VersionAggregator) -> bool {
        aggregate.declares(version)
            || (aggregate.is_empty() && *version == self.options.default_version)
    }

    /// Whether some candidate would be chosen for `version`
    ///
    /// Mapped versions count even when several candidates map them.
    fn can_serve(
        &self,
        version: &ApiVersion,
        aggregate: &VersionAggregator,
        candidates: &[Candidate],
    ) -> bool {
        candidates.iter().any(|c| c.versions().maps(version))
            || (self.is_declared(version, aggregate)
                && candidates
                    .iter()
                    .filter(|c| !c.is_explicitly_mapped() && c.accepts(version))
                    .count()
                    == 1)
    }
}
