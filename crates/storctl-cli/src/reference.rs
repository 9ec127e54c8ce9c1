//! Operator-facing reference parsing.

use storctl_api::{Reference, Result};
use tracing::debug;

/// Namespace substituted for unqualified references to scoped kinds.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Turns an operator token into a [`Reference`].
///
/// Flat kinds take the token as the name. For scoped kinds the token is
/// parsed as `namespace/name`; if that fails it is parsed again as
/// `default_namespace/token`, and the second result is final.
pub fn parse_reference(raw: &str, scoped: bool, default_namespace: &str) -> Result<Reference> {
    if !scoped {
        return Ok(Reference::flat(raw));
    }

    match Reference::parse(raw) {
        Ok(reference) => Ok(reference),
        Err(e) => {
            debug!(reference = raw, error = %e, "retrying with default namespace");
            Reference::parse(&format!("{default_namespace}/{raw}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use storctl_api::ApiError;

    #[test]
    fn test_qualified_reference_is_unchanged() {
        let r = parse_reference("myns/myvol", true, DEFAULT_NAMESPACE).unwrap();
        assert_eq!(r, Reference::scoped("myns", "myvol"));
    }

    #[test]
    fn test_unqualified_reference_gets_default_namespace() {
        let r = parse_reference("myvol", true, DEFAULT_NAMESPACE).unwrap();
        assert_eq!(r, Reference::scoped("default", "myvol"));
    }

    #[test]
    fn test_custom_default_namespace() {
        let r = parse_reference("myvol", true, "staging").unwrap();
        assert_eq!(r.namespace, "staging");
    }

    #[test]
    fn test_retry_error_is_reported() {
        let err = parse_reference("a/b/c", true, DEFAULT_NAMESPACE).unwrap_err();
        match err {
            ApiError::InvalidReference { reference } => assert_eq!(reference, "default/a/b/c"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_token_fails_after_retry() {
        let err = parse_reference("", true, DEFAULT_NAMESPACE).unwrap_err();
        match err {
            ApiError::InvalidReference { reference } => assert_eq!(reference, "default/"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_flat_kind_keeps_token_verbatim() {
        let r = parse_reference("some/odd/name", false, DEFAULT_NAMESPACE).unwrap();
        assert!(r.is_flat());
        assert_eq!(r.name, "some/odd/name");
    }

    proptest! {
        #[test]
        fn prop_unqualified_names_resolve_into_default(name in "[a-zA-Z0-9][a-zA-Z0-9._-]{0,30}") {
            let r = parse_reference(&name, true, DEFAULT_NAMESPACE).unwrap();
            prop_assert_eq!(r.namespace.as_str(), DEFAULT_NAMESPACE);
            prop_assert_eq!(r.name, name);
        }

        #[test]
        fn prop_qualified_names_round_trip(
            ns in "[a-z][a-z0-9-]{0,15}",
            name in "[a-z][a-z0-9-]{0,15}",
        ) {
            let raw = format!("{ns}/{name}");
            let r = parse_reference(&raw, true, DEFAULT_NAMESPACE).unwrap();
            prop_assert_eq!(r.to_string(), raw);
        }
    }
}
