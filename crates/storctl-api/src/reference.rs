//! Canonical `(namespace, name)` identifiers for addressable cluster objects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Separator between the namespace and name components of a reference.
pub const REF_SEPARATOR: char = '/';

/// Identifies one cluster object.
///
/// Flat resource kinds (nodes, pools, policies, users, namespaces) leave
/// `namespace` empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Empty for flat kinds.
    pub namespace: String,
    /// Object name.
    pub name: String,
}

impl Reference {
    /// Reference to a namespace-scoped object.
    pub fn scoped(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Reference to an object of a flat kind.
    pub fn flat(name: impl Into<String>) -> Self {
        Self {
            namespace: String::new(),
            name: name.into(),
        }
    }

    /// Returns true when the reference carries no namespace component.
    pub fn is_flat(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Parses a strict `namespace/name` reference.
    ///
    /// A token without a separator is reported as [`ApiError::MissingNamespace`];
    /// any other shape (extra separators, empty components) is
    /// [`ApiError::InvalidReference`].
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(REF_SEPARATOR).collect();
        match parts.as_slice() {
            [_] => Err(ApiError::MissingNamespace {
                reference: raw.to_string(),
            }),
            [namespace, name] if !namespace.is_empty() && !name.is_empty() => {
                validate_name(namespace)?;
                validate_name(name)?;
                Ok(Self::scoped(*namespace, *name))
            }
            _ => Err(ApiError::InvalidReference {
                reference: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_flat() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}{}{}", self.namespace, REF_SEPARATOR, self.name)
        }
    }
}

/// Checks that a single reference component only uses the allowed characters.
pub fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(ApiError::InvalidName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespaced() {
        let r = Reference::parse("myns/myvol").unwrap();
        assert_eq!(r.namespace, "myns");
        assert_eq!(r.name, "myvol");
        assert_eq!(r.to_string(), "myns/myvol");
    }

    #[test]
    fn test_parse_without_separator_is_missing_namespace() {
        let err = Reference::parse("myvol").unwrap_err();
        assert!(matches!(err, ApiError::MissingNamespace { .. }));
    }

    #[test]
    fn test_parse_extra_separator_is_invalid() {
        let err = Reference::parse("a/b/c").unwrap_err();
        match err {
            ApiError::InvalidReference { reference } => assert_eq!(reference, "a/b/c"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_empty_component_is_invalid() {
        assert!(matches!(
            Reference::parse("/vol").unwrap_err(),
            ApiError::InvalidReference { .. }
        ));
        assert!(matches!(
            Reference::parse("ns/").unwrap_err(),
            ApiError::InvalidReference { .. }
        ));
    }

    #[test]
    fn test_parse_rejects_illegal_characters() {
        assert!(matches!(
            Reference::parse("ns/vol name").unwrap_err(),
            ApiError::InvalidName { .. }
        ));
    }

    #[test]
    fn test_flat_display() {
        assert_eq!(Reference::flat("node-1").to_string(), "node-1");
        assert!(Reference::flat("node-1").is_flat());
    }
}
