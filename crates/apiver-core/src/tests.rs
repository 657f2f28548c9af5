//! Scenario tests for version selection
//!
//! These tests verify that the selection engine correctly:
//! - Selects explicitly mapped candidates over resource-level defaults
//! - Resolves the current version for requests without a version
//! - Reports ambiguity, malformed tokens and unsupported versions

use crate::*;

fn v(text: &str) -> ApiVersion {
    text.parse().unwrap()
}

fn select<'a>(token: Option<&str>, endpoint: &'a Endpoint) -> SelectionOutcome<'a> {
    VersionSelector::default().select(token, endpoint)
}

/// Two controllers sharing `api/values`, each implementing one version
fn values_endpoint() -> Endpoint {
    Endpoint::new("api/values")
        .candidates(ResourceConventions::new("Values").has(v("1.0")).build())
        .candidates(ResourceConventions::new("Values2").has(v("2.0")).build())
}

#[test]
fn test_parse_equivalence() {
    let pairs = [("1", "1.0"), ("v2", "2.0"), ("1.0-BETA", "1.0-beta"), ("2.5", " 2.5")];
    for (a, b) in pairs {
        assert_eq!(v(a), v(b), "{} != {}", a, b);
    }
}

#[test]
fn test_selects_candidate_mapped_to_requested_version() {
    let endpoint = Endpoint::new("api/orders")
        .candidate(Candidate::new("Orders", "Get", VersionSet::new().map_to(v("1.0"))))
        .candidate(Candidate::new("Orders", "GetV2", VersionSet::new().map_to(v("2.0"))));

    match select(Some("1.0"), &endpoint) {
        SelectionOutcome::Selected { candidate, version } => {
            assert_eq!(candidate.action(), "Get");
            assert_eq!(version, v("1.0"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    match select(None, &endpoint) {
        SelectionOutcome::UnspecifiedVersionMatch { candidate, version } => {
            assert_eq!(candidate.action(), "GetV2");
            assert_eq!(version, v("2.0"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_current_version_skips_deprecated() {
    let endpoint = Endpoint::new("api/orders").candidates(
        ResourceConventions::new("Orders")
            .has(v("1.0"))
            .has_deprecated(v("2.0"))
            .build(),
    );

    let outcome = select(None, &endpoint);
    assert!(matches!(outcome, SelectionOutcome::UnspecifiedVersionMatch { .. }));
    assert_eq!(outcome.version(), Some(&v("1.0")));

    // the deprecated version is still served when asked for
    assert!(select(Some("2.0"), &endpoint).is_success());
}

#[test]
fn test_neutral_wins_over_malformed_token() {
    let endpoint = Endpoint::new("api/ping")
        .candidate(Candidate::new("Ping", "Get", VersionSet::new().version_neutral()))
        .candidate(Candidate::new("Ping", "GetV1", VersionSet::new().map_to(v("1.0"))));

    for token in [Some("abc"), None, Some("1.0"), Some("9.9")] {
        let outcome = select(token, &endpoint);
        match outcome {
            SelectionOutcome::VersionNeutralMatch { candidate } => {
                assert_eq!(candidate.action(), "Get")
            }
            other => panic!("unexpected outcome for {:?}: {:?}", token, other),
        }
    }
}

#[test]
fn test_two_candidates_mapping_same_version_are_ambiguous() {
    let endpoint = Endpoint::new("api/orders")
        .candidate(Candidate::new("Orders", "Get", VersionSet::new().map_to(v("2.0"))))
        .candidate(Candidate::new("OrdersV2", "Get", VersionSet::new().map_to(v("2.0"))));

    let outcome = select(Some("2.0"), &endpoint);
    match &outcome {
        SelectionOutcome::AmbiguousMatch { version, candidates } => {
            assert_eq!(version, &v("2.0"));
            let names: Vec<_> = candidates.iter().map(|c| c.to_string()).collect();
            assert_eq!(names, vec!["Orders.Get", "OrdersV2.Get"]);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let err = outcome.to_error(endpoint.aggregate()).unwrap();
    assert_eq!(err.code, ErrorCode::AmbiguousApiVersion);
    assert!(!err.is_client_error());
}

#[test]
fn test_unsupported_version_reports_supported_header() {
    let endpoint = values_endpoint();
    let outcome = select(Some("3.0"), &endpoint);

    assert_eq!(outcome, SelectionOutcome::UnsupportedVersion { requested: v("3.0") });

    let mut headers = http::HeaderMap::new();
    endpoint.aggregate().reported().apply(&mut headers);
    assert_eq!(headers.get("api-supported-versions").unwrap(), "1.0, 2.0");

    let err = outcome.to_error(endpoint.aggregate()).unwrap();
    assert_eq!(err.to_json()["error"]["code"], "UnsupportedApiVersion");
}

#[test]
fn test_implicit_candidates_serve_their_own_versions() {
    let endpoint = values_endpoint();

    for (token, resource) in [("1.0", "Values"), ("2.0", "Values2")] {
        let outcome = select(Some(token), &endpoint);
        assert_eq!(outcome.candidate().unwrap().resource(), resource);
    }

    let outcome = select(None, &endpoint);
    assert_eq!(outcome.candidate().unwrap().resource(), "Values2");
}

#[test]
fn test_mapped_action_overrides_resource_default() {
    let endpoint = Endpoint::new("api/helloworld").candidates(
        ResourceConventions::new("HelloWorld")
            .has(v("1.0"))
            .has(v("2.0"))
            .action("Get", |a| a)
            .action("GetV2", |a| a.map_to(v("2.0")))
            .build(),
    );

    assert_eq!(select(Some("2.0"), &endpoint).candidate().unwrap().action(), "GetV2");
    assert_eq!(select(Some("1.0"), &endpoint).candidate().unwrap().action(), "Get");
}

#[test]
fn test_advertised_version_goes_to_sole_implicit_candidate() {
    let endpoint = Endpoint::new("api/orders")
        .candidates(ResourceConventions::new("Orders").has(v("1.0")).advertises(v("2.0")).build());

    let outcome = select(Some("2.0"), &endpoint);
    assert!(matches!(outcome, SelectionOutcome::Selected { .. }));
    assert_eq!(endpoint.aggregate().supported_versions(), vec![v("1.0"), v("2.0")]);
}

#[test]
fn test_several_implicit_candidates_for_one_version_are_unsupported() {
    let endpoint = Endpoint::new("api/orders")
        .candidates(ResourceConventions::new("Orders").has(v("1.0")).build())
        .candidates(ResourceConventions::new("LegacyOrders").has(v("1.0")).build());

    let outcome = select(Some("1.0"), &endpoint);
    assert_eq!(outcome, SelectionOutcome::UnsupportedVersion { requested: v("1.0") });
    assert_eq!(outcome.error_code(), Some(ErrorCode::UnsupportedApiVersion));
}

#[test]
fn test_version_only_mapped_elsewhere_is_unsupported_for_explicit_candidates() {
    // both candidates are explicit; 1.5 is declared but nobody maps it
    let endpoint = Endpoint::new("api/orders")
        .candidate(Candidate::new("Orders", "Get", VersionSet::new().has(v("1.5")).map_to(v("1.0"))))
        .candidate(Candidate::new("Orders", "GetV2", VersionSet::new().map_to(v("2.0"))));

    assert!(matches!(
        select(Some("1.5"), &endpoint),
        SelectionOutcome::UnsupportedVersion { .. }
    ));
}

#[test]
fn test_declared_version_without_accepting_implicit_candidate_is_unsupported() {
    // 3.0 is only advertised by an explicit candidate; the one implicit
    // candidate declares 2.0 only
    let endpoint = Endpoint::new("api/orders")
        .candidate(Candidate::new("Orders", "Get", VersionSet::new().map_to(v("1.0")).advertises(v("3.0"))))
        .candidate(Candidate::new("Orders", "GetV2", VersionSet::new().has(v("2.0"))));

    assert!(endpoint.aggregate().declares(&v("3.0")));
    assert_eq!(
        select(Some("3.0"), &endpoint),
        SelectionOutcome::UnsupportedVersion { requested: v("3.0") }
    );
    assert_eq!(select(Some("2.0"), &endpoint).candidate().unwrap().action(), "GetV2");
}

#[test]
fn test_unspecified_version_can_be_ambiguous() {
    let endpoint = Endpoint::new("api/orders")
        .candidate(Candidate::new("Orders", "Get", VersionSet::new().map_to(v("1.0"))))
        .candidate(Candidate::new("Orders", "GetV2", VersionSet::new().map_to(v("2.0"))))
        .candidate(Candidate::new("OrdersNext", "Get", VersionSet::new().map_to(v("2.0"))));

    let outcome = select(None, &endpoint);
    match &outcome {
        SelectionOutcome::AmbiguousMatch { version, candidates } => {
            assert_eq!(version, &v("2.0"));
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(outcome.error_code(), Some(ErrorCode::AmbiguousApiVersion));
}

#[test]
fn test_current_version_is_one_a_candidate_serves() {
    // 3.0 is declared by an explicitly mapped action, so nobody serves it
    let endpoint = Endpoint::new("api/orders")
        .candidate(Candidate::new("Orders", "Get", VersionSet::new().has(v("3.0")).map_to(v("1.0"))))
        .candidate(Candidate::new("Orders", "GetV2", VersionSet::new().map_to(v("2.0"))));

    assert_eq!(endpoint.aggregate().current_version(), Some(v("3.0")));
    match select(None, &endpoint) {
        SelectionOutcome::UnspecifiedVersionMatch { candidate, version } => {
            assert_eq!(candidate.action(), "GetV2");
            assert_eq!(version, v("2.0"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_current_version_skips_version_claimed_by_several_implicit_candidates() {
    let endpoint = Endpoint::new("api/orders")
        .candidates(ResourceConventions::new("Orders").has(v("1.0")).has(v("2.0")).build())
        .candidates(ResourceConventions::new("LegacyOrders").has(v("2.0")).build());

    let outcome = select(None, &endpoint);
    assert!(matches!(outcome, SelectionOutcome::UnspecifiedVersionMatch { .. }));
    assert_eq!(outcome.version(), Some(&v("1.0")));
    assert_eq!(outcome.candidate().unwrap().resource(), "Orders");
}

#[test]
fn test_malformed_token_error() {
    let endpoint = values_endpoint();
    let outcome = select(Some("1.0-"), &endpoint);

    let err = outcome.to_error(endpoint.aggregate()).unwrap();
    assert_eq!(err.code, ErrorCode::InvalidApiVersion);
    assert_eq!(err.status, http::StatusCode::BAD_REQUEST);
    assert_eq!(err.supported_versions, vec![v("1.0"), v("2.0")]);
}

#[test]
fn test_group_versions_select() {
    let endpoint = Endpoint::new("api/reports")
        .candidate(Candidate::new("Reports", "Get", VersionSet::new().map_to(v("2023-06-01"))))
        .candidate(Candidate::new("Reports", "GetNext", VersionSet::new().map_to(v("2024-01-15"))));

    assert_eq!(
        select(Some("2023-06-01"), &endpoint).candidate().unwrap().action(),
        "Get"
    );
    assert_eq!(select(None, &endpoint).version(), Some(&v("2024-01-15")));
}
