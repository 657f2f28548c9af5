//! # apiver core
//!
//! API version resolution for HTTP routing.
//!
//! This crate provides:
//!
//! - [`ApiVersion`] parsing and comparison
//! - Per-action version declarations ([`VersionSet`]) and conventions
//! - Endpoint-wide aggregation of supported and deprecated versions
//! - The selection algorithm that picks the action serving a request
//! - Response headers and structured errors for the outcome
//!
//! This crate is not meant to be used directly. Use `apiver` instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use apiver_core::{ApiVersion, Endpoint, ResourceConventions, VersionSelector};
//!
//! let endpoint = Endpoint::new("api/orders").candidates(
//!     ResourceConventions::new("Orders")
//!         .has(ApiVersion::new(1, 0))
//!         .has(ApiVersion::new(2, 0))
//!         .action("Get", |a| a)
//!         .action("GetV2", |a| a.map_to(ApiVersion::new(2, 0)))
//!         .build(),
//! );
//!
//! let outcome = VersionSelector::default().select(Some("2.0"), &endpoint);
//! assert_eq!(outcome.candidate().unwrap().action(), "GetV2");
//! ```

mod aggregator;
mod candidate;
mod conventions;
mod error;
mod headers;
mod options;
mod router;
mod selector;
mod version;
mod version_set;

#[cfg(test)]
mod tests;

pub use aggregator::VersionAggregator;
pub use candidate::{Candidate, Endpoint};
pub use conventions::{ActionConventions, ConventionError, ResourceConventions, DEFAULT_ACTION};
pub use error::{ApiVersionError, ErrorCode, Result};
pub use headers::{format_versions, ReportedVersions, API_DEPRECATED_VERSIONS, API_SUPPORTED_VERSIONS};
#[cfg(feature = "config")]
pub use options::ConfigError;
pub use options::{UnspecifiedVersionPolicy, VersioningOptions};
pub use router::{normalize_template, Resolution, RouteTable, RouteTableBuilder};
pub use selector::{SelectionOutcome, VersionSelector};
pub use version::{ApiVersion, VersionParseError};
pub use version_set::VersionSet;
