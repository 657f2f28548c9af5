//! Version discovery response headers

use crate::version::ApiVersion;
use http::header::{HeaderMap, HeaderName, HeaderValue};

/// Header listing the supported versions of the matched endpoint
#[allow(clippy::declare_interior_mutable_const)]
pub const API_SUPPORTED_VERSIONS: HeaderName = HeaderName::from_static("api-supported-versions");

/// Header listing the deprecated versions of the matched endpoint
#[allow(clippy::declare_interior_mutable_const)]
pub const API_DEPRECATED_VERSIONS: HeaderName =
    HeaderName::from_static("api-deprecated-versions");

/// Supported and deprecated versions advertised by an endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportedVersions {
    supported: Vec<ApiVersion>,
    deprecated: Vec<ApiVersion>,
}

impl ReportedVersions {
    /// Create from already sorted, deduplicated lists
    pub fn new(supported: Vec<ApiVersion>, deprecated: Vec<ApiVersion>) -> Self {
        Self {
            supported,
            deprecated,
        }
    }

    /// Supported versions, ascending
    pub fn supported(&self) -> &[ApiVersion] {
        &self.supported
    }

    /// Deprecated versions, ascending
    pub fn deprecated(&self) -> &[ApiVersion] {
        &self.deprecated
    }

    /// True when there is nothing to report
    pub fn is_empty(&self) -> bool {
        self.supported.is_empty() && self.deprecated.is_empty()
    }

    /// Header name/value pairs; an empty list produces no header
    pub fn header_values(&self) -> Vec<(HeaderName, HeaderValue)> {
        [
            (API_SUPPORTED_VERSIONS, &self.supported),
            (API_DEPRECATED_VERSIONS, &self.deprecated),
        ]
        .into_iter()
        .filter(|(_, versions)| !versions.is_empty())
        .filter_map(|(name, versions)| {
            HeaderValue::try_from(format_versions(versions))
                .ok()
                .map(|value| (name, value))
        })
        .collect()
    }

    /// Write the headers into a response header map
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in self.header_values() {
            headers.insert(name, value);
        }
    }
}

/// Join versions as a `", "`-separated header value
pub fn format_versions(versions: &[ApiVersion]) -> String {
    versions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_values() {
        let reported = ReportedVersions::new(
            vec![ApiVersion::new(1, 0), ApiVersion::new(2, 0)],
            vec![ApiVersion::new(0, 9)],
        );

        let mut headers = HeaderMap::new();
        reported.apply(&mut headers);

        assert_eq!(headers.get("api-supported-versions").unwrap(), "1.0, 2.0");
        assert_eq!(headers.get("api-deprecated-versions").unwrap(), "0.9");
    }

    #[test]
    fn test_empty_lists_emit_nothing() {
        let reported = ReportedVersions::new(vec![ApiVersion::new(1, 0)], Vec::new());
        let values = reported.header_values();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].0, API_SUPPORTED_VERSIONS);

        assert!(ReportedVersions::default().header_values().is_empty());
    }
}
