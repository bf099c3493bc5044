//! Typed identifier newtypes.
//!
//! Every identifier that crosses the adapter is an opaque string owned by
//! someone else (the device cloud or the voice platform). Nothing here is
//! ever generated locally.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Cloud-assigned identifier of a device or a space.
    TargetId
);

define_id!(
    /// Identifier of one platform request, echoed back verbatim.
    RequestId
);

define_id!(
    /// Identifier of the end user on the voice platform side.
    AgentUserId
);

/// Opaque bearer token forwarded to the device cloud.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Extract the token from an `Authorization` header value (`Bearer <token>`).
    ///
    /// The scheme is matched case-insensitively; an empty token yields `None`.
    #[must_use]
    pub fn from_authorization(header: &str) -> Option<Self> {
        let (scheme, token) = header.trim().split_once(' ')?;
        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return None;
        }
        Some(Self::new(token))
    }

    /// Expose the secret, for the transport layer only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_as_plain_string() {
        let id = TargetId::new("123456789");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"123456789\"");
        let parsed: TargetId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_display_raw_value() {
        assert_eq!(RequestId::from("ff36a3cc").to_string(), "ff36a3cc");
    }

    #[test]
    fn should_parse_bearer_authorization_header() {
        let token = BearerToken::from_authorization("Bearer abc.def").unwrap();
        assert_eq!(token.expose(), "abc.def");
    }

    #[test]
    fn should_accept_lowercase_bearer_scheme() {
        let token = BearerToken::from_authorization("bearer xyz").unwrap();
        assert_eq!(token.expose(), "xyz");
    }

    #[test]
    fn should_reject_other_schemes_and_empty_tokens() {
        assert!(BearerToken::from_authorization("Basic dXNlcjpwYXNz").is_none());
        assert!(BearerToken::from_authorization("Bearer ").is_none());
        assert!(BearerToken::from_authorization("Bearer").is_none());
    }

    #[test]
    fn should_redact_token_in_debug_output() {
        let token = BearerToken::new("secret");
        assert_eq!(format!("{token:?}"), "BearerToken(***)");
    }
}
