//! Property-based tests for address resolution, profile policy, and
//! resource path parsing.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use std::collections::HashMap;

use proptest::prelude::*;

use lxc_cli::domain::resource::{container_name, parse_resource_path};
use lxc_cli::domain::{LaunchError, ProfileSelection, parse_remote_and_container};

// ============================================================================
// parse_remote_and_container() property tests
// ============================================================================

proptest! {
    /// Tokens without a colon name the default remote and keep the whole token.
    #[test]
    fn prop_no_colon_is_default_remote(token in "[a-zA-Z0-9/._-]{0,40}") {
        let r = parse_remote_and_container(&token);
        prop_assert!(r.uses_default_remote());
        prop_assert_eq!(r.identifier, token);
    }

    /// Splitting happens on the first colon; the rest stays in the identifier.
    #[test]
    fn prop_splits_on_first_colon(
        remote in "[a-z0-9-]{0,12}",
        rest in "[a-zA-Z0-9:/._-]{0,30}",
    ) {
        let r = parse_remote_and_container(&format!("{remote}:{rest}"));
        prop_assert_eq!(r.remote, remote);
        prop_assert_eq!(r.identifier, rest);
    }
}

// ============================================================================
// ProfileSelection::from_flags() property tests
// ============================================================================

proptest! {
    /// Any non-empty token list is sent verbatim, order and duplicates kept.
    #[test]
    fn prop_tokens_are_sent_verbatim(
        tokens in prop::collection::vec("[a-z]{1,8}", 1..6),
        requested_empty in any::<bool>(),
    ) {
        let selection = ProfileSelection::from_flags(tokens.clone(), requested_empty);
        prop_assert_eq!(selection.as_request(), Some(tokens.as_slice()));
    }
}

#[test]
fn test_profile_policy_without_tokens() {
    assert_eq!(ProfileSelection::from_flags(Vec::new(), false).as_request(), None);
    assert_eq!(
        ProfileSelection::from_flags(Vec::new(), true).as_request(),
        Some(&[][..])
    );
}

// ============================================================================
// Resource name extraction property tests
// ============================================================================

fn reported(path: &str) -> HashMap<String, Vec<String>> {
    HashMap::from([("containers".to_string(), vec![path.to_string()])])
}

proptest! {
    /// Well-formed paths yield their version and name.
    #[test]
    fn prop_well_formed_paths_parse(
        version in "[0-9]\\.[0-9]",
        name in "[a-z][a-z0-9-]{0,20}",
    ) {
        let (v, n) = parse_resource_path(&format!("/{version}/containers/{name}"))
            .expect("well-formed path");
        prop_assert_eq!(v, version);
        prop_assert_eq!(n, name);
    }

    /// Paths issued by another API version never yield a name.
    #[test]
    fn prop_other_versions_are_rejected(
        major in 2u32..10,
        name in "[a-z][a-z0-9-]{0,20}",
    ) {
        let resources = reported(&format!("/{major}.0/containers/{name}"));
        let result = container_name(Some(&resources), "1.0");
        prop_assert!(
            matches!(result, Err(LaunchError::VersionMismatch { .. })),
            "unexpected: {result:?}"
        );
    }

    /// Extra trailing segments are malformed, not silently truncated.
    #[test]
    fn prop_trailing_segments_are_malformed(
        name in "[a-z]{1,10}",
        extra in "[a-z]{1,10}",
    ) {
        let result = parse_resource_path(&format!("/1.0/containers/{name}/{extra}"));
        prop_assert!(matches!(result, Err(LaunchError::MalformedResourcePath(_))));
    }
}
