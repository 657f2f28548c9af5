//! Version-aware route table
//!
//! The table is built once at startup and is read-only afterwards, so it can be
//! shared across request handlers behind an `Arc` without locking.
//!
//! # Example
//!
//! ```rust,ignore
//! let table = RouteTable::builder(VersioningOptions::default())
//!     .resource("api/orders", ResourceConventions::new("Orders").has(ApiVersion::new(1, 0)))
//!     .build();
//!
//! let resolution = table.resolve("api/orders", Some("1.0")).unwrap();
//! if let Some(err) = resolution.error() {
//!     // respond with err.status and err.to_json()
//! }
//! ```

use crate::candidate::{Candidate, Endpoint};
use crate::conventions::ResourceConventions;
use crate::error::{ApiVersionError, Result};
use crate::headers::ReportedVersions;
use crate::options::VersioningOptions;
use crate::selector::{SelectionOutcome, VersionSelector};
use std::collections::HashMap;

/// Normalize a route template for lookup
///
/// Leading and trailing slashes are ignored and ASCII letters compare
/// case-insensitively, so `/api/Values/` and `api/values` are the same route.
pub fn normalize_template(template: &str) -> String {
    template.trim_matches('/').to_ascii_lowercase()
}

#[derive(Debug, Clone)]
struct RouteEntry {
    endpoint: Endpoint,
    reported: ReportedVersions,
}

/// Builder for [`RouteTable`]
#[derive(Debug, Clone, Default)]
pub struct RouteTableBuilder {
    options: VersioningOptions,
    endpoints: Vec<Endpoint>,
}

impl RouteTableBuilder {
    /// Register an endpoint; candidates under an existing template are merged
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        let key = normalize_template(endpoint.template());
        match self
            .endpoints
            .iter()
            .position(|e| normalize_template(e.template()) == key)
        {
            Some(index) => {
                let existing = self.endpoints.remove(index);
                self.endpoints.insert(index, existing.merge(endpoint));
            }
            None => self.endpoints.push(endpoint),
        }
        self
    }

    /// Register a single candidate under a template
    pub fn candidate(self, template: impl Into<String>, candidate: Candidate) -> Self {
        self.endpoint(Endpoint::new(template).candidate(candidate))
    }

    /// Register every candidate built from a resource's conventions
    pub fn resource(self, template: impl Into<String>, conventions: ResourceConventions) -> Self {
        self.endpoint(Endpoint::new(template).candidates(conventions.build()))
    }

    /// Freeze the table
    pub fn build(self) -> RouteTable {
        let report = self.options.report_api_versions;
        let routes = self
            .endpoints
            .into_iter()
            .map(|endpoint| {
                let reported = if report {
                    endpoint.aggregate().reported()
                } else {
                    ReportedVersions::default()
                };
                tracing::debug!(
                    template = endpoint.template(),
                    candidates = endpoint.candidate_list().len(),
                    "registered versioned endpoint"
                );
                (
                    normalize_template(endpoint.template()),
                    RouteEntry { endpoint, reported },
                )
            })
            .collect();

        RouteTable {
            selector: VersionSelector::new(self.options),
            routes,
        }
    }
}

/// Read-only map from route template to versioned endpoint
#[derive(Debug, Clone)]
pub struct RouteTable {
    selector: VersionSelector,
    routes: HashMap<String, RouteEntry>,
}

impl RouteTable {
    /// Start building a table
    pub fn builder(options: VersioningOptions) -> RouteTableBuilder {
        RouteTableBuilder {
            options,
            endpoints: Vec::new(),
        }
    }

    /// Resolve a request for `template` carrying the raw version `token`
    ///
    /// Returns `None` when no endpoint is registered for the template.
    pub fn resolve(&self, template: &str, token: Option<&str>) -> Option<Resolution<'_>> {
        let entry = self.routes.get(&normalize_template(template))?;
        Some(Resolution {
            outcome: self.selector.select(token, &entry.endpoint),
            endpoint: &entry.endpoint,
            reported: &entry.reported,
        })
    }

    /// Endpoint registered for `template`
    pub fn endpoint(&self, template: &str) -> Option<&Endpoint> {
        self.routes
            .get(&normalize_template(template))
            .map(|entry| &entry.endpoint)
    }

    /// Registered templates, sorted
    pub fn templates(&self) -> Vec<&str> {
        let mut templates: Vec<_> = self.routes.values().map(|e| e.endpoint.template()).collect();
        templates.sort_unstable();
        templates
    }

    /// Options the table was built with
    pub fn options(&self) -> &VersioningOptions {
        self.selector.options()
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when no template is registered
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Outcome of resolving one request against the table
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// Selection result
    pub outcome: SelectionOutcome<'a>,
    endpoint: &'a Endpoint,
    reported: &'a ReportedVersions,
}

impl<'a> Resolution<'a> {
    /// Endpoint the request matched
    pub fn endpoint(&self) -> &'a Endpoint {
        self.endpoint
    }

    /// Versions to report in response headers (empty when reporting is off)
    pub fn reported(&self) -> &'a ReportedVersions {
        self.reported
    }

    /// The error to respond with, if the request was rejected
    pub fn error(&self) -> Option<ApiVersionError> {
        self.outcome.to_error(self.endpoint.aggregate())
    }

    /// The selection outcome, or the error to respond with
    pub fn into_result(self) -> Result<SelectionOutcome<'a>> {
        self.outcome.into_result(self.endpoint.aggregate())
    }
}
