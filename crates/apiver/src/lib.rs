//! # apiver
//!
//! API versioning for HTTP services.
//!
//! Several handlers can share one route template and differ only in the API
//! version they implement. apiver decides, per request, which of them serves
//! the request, reports the versions an endpoint supports and deprecates, and
//! produces a structured error when no handler fits.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apiver::prelude::*;
//!
//! let table = RouteTable::builder(VersioningOptions::default())
//!     .resource(
//!         "api/helloworld",
//!         ResourceConventions::new("HelloWorld")
//!             .has(ApiVersion::new(1, 0))
//!             .has(ApiVersion::new(2, 0))
//!             .action("Get", |a| a)
//!             .action("GetV2", |a| a.map_to(ApiVersion::new(2, 0))),
//!     )
//!     .build();
//!
//! let resolution = table.resolve("api/helloworld", Some("2.0")).unwrap();
//! assert_eq!(resolution.outcome.candidate().unwrap().action(), "GetV2");
//!
//! let mut headers = HeaderMap::new();
//! resolution.reported().apply(&mut headers);
//! ```
//!
//! ## Optional Features
//!
//! - `odata` - [`ModelCache`] and [`VersionedTypeKey`] for per-version models (default)
//! - `config` - `VersioningOptions::from_env` with `.env` file support (default)
//! - `full` - All optional features enabled

// Re-export core functionality
pub use apiver_core::*;

// Re-export the model cache (feature-gated)
#[cfg(feature = "odata")]
pub use apiver_odata::{ModelCache, TypeIdentity, VersionedTypeKey};

pub use http;

/// Prelude module - import everything you need with `use apiver::prelude::*`
pub mod prelude {
    pub use apiver_core::{
        // Declarations
        ActionConventions,
        // Errors
        ApiVersionError,
        // Versions
        ApiVersion,
        Candidate,
        Endpoint,
        ErrorCode,
        ReportedVersions,
        ResourceConventions,
        // Routing
        RouteTable,
        SelectionOutcome,
        UnspecifiedVersionPolicy,
        VersionAggregator,
        VersionSelector,
        VersionSet,
        VersioningOptions,
    };

    #[cfg(feature = "odata")]
    pub use apiver_odata::{ModelCache, VersionedTypeKey};

    pub use http::{HeaderMap, StatusCode};

    pub use tracing::{debug, error, info, trace, warn};
}
