//! The identity profile exposed to the frontend.
//!
//! LinkedIn's OIDC userinfo endpoint returns a handful of standard claims.
//! The gateway keeps only the ones the frontend renders and stores them as a
//! small JSON document, either in a script-readable cookie or in a
//! server-side session.

use linkedin_signin_core::Result;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// The user's locale as reported by the identity provider.
///
/// OIDC specifies a BCP 47 language tag, while LinkedIn sends an object
/// with separate country and language fields. Both shapes are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Locale {
    /// A language tag such as `en-US`.
    Tag(String),
    /// LinkedIn's `{"country": "US", "language": "en"}` form.
    Parts {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        country: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
}

/// Claims returned by the userinfo endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserinfoClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub locale: Option<Locale>,
}

/// The profile shown to the signed-in user.
///
/// Absent claims are omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    /// Subject identifier, unique per user at the identity provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// URL of the profile picture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

impl IdentityProfile {
    /// Decodes a profile previously written by [`to_cookie_value`](Self::to_cookie_value).
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Malformed`] if the value is not a JSON object
    /// of the profile shape.
    pub fn from_cookie_value(raw: &str) -> Result<Self, ProfileError> {
        let profile = serde_json::from_str(raw).map_err(|e| ProfileError::Malformed {
            reason: e.to_string(),
        })?;
        Ok(profile)
    }

    /// Serializes the profile as compact JSON for storage in a cookie.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Serialization`] if serialization fails.
    pub fn to_cookie_value(&self) -> Result<String, ProfileError> {
        let value = serde_json::to_string(self).map_err(|e| ProfileError::Serialization {
            reason: e.to_string(),
        })?;
        Ok(value)
    }

    /// Returns the name to greet the user with.
    ///
    /// Prefers the full `name` claim, then the given name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.given_name.as_deref().filter(|n| !n.is_empty()))
    }
}

impl From<UserinfoClaims> for IdentityProfile {
    fn from(claims: UserinfoClaims) -> Self {
        Self {
            sub: claims.sub,
            name: claims.name,
            given_name: claims.given_name,
            family_name: claims.family_name,
            email: claims.email,
            picture: claims.picture,
            locale: claims.locale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linkedin_userinfo() -> &'static str {
        r#"{
            "sub": "782bbtaQ",
            "email_verified": true,
            "name": "John Doe",
            "locale": {"country": "US", "language": "en"},
            "given_name": "John",
            "family_name": "Doe",
            "email": "doe@email.com",
            "picture": "https://media.licdn.com/dms/image/C5F03AQHqK8v7tB1HCQ/profile"
        }"#
    }

    #[test]
    fn projects_userinfo_claims() {
        let claims: UserinfoClaims = serde_json::from_str(linkedin_userinfo()).expect("parse");
        assert_eq!(claims.email_verified, Some(true));

        let profile = IdentityProfile::from(claims);
        assert_eq!(profile.sub.as_deref(), Some("782bbtaQ"));
        assert_eq!(profile.name.as_deref(), Some("John Doe"));
        assert_eq!(profile.given_name.as_deref(), Some("John"));
        assert_eq!(profile.family_name.as_deref(), Some("Doe"));
        assert_eq!(profile.email.as_deref(), Some("doe@email.com"));
        assert_eq!(
            profile.locale,
            Some(Locale::Parts {
                country: Some("US".to_string()),
                language: Some("en".to_string()),
            })
        );
    }

    #[test]
    fn projection_drops_unlisted_claims() {
        let claims: UserinfoClaims = serde_json::from_str(linkedin_userinfo()).expect("parse");
        let json = IdentityProfile::from(claims)
            .to_cookie_value()
            .expect("serialize");

        assert!(!json.contains("email_verified"));
        assert!(json.contains("\"sub\":\"782bbtaQ\""));
    }

    #[test]
    fn absent_claims_are_omitted() {
        let profile = IdentityProfile {
            sub: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.to_cookie_value().expect("serialize"), r#"{"sub":"abc"}"#);
    }

    #[test]
    fn string_locale_is_accepted() {
        let profile =
            IdentityProfile::from_cookie_value(r#"{"sub":"a","locale":"en-US"}"#).expect("decode");
        assert_eq!(profile.locale, Some(Locale::Tag("en-US".to_string())));
    }

    #[test]
    fn cookie_value_decodes_back() {
        let claims: UserinfoClaims = serde_json::from_str(linkedin_userinfo()).expect("parse");
        let profile = IdentityProfile::from(claims);
        let raw = profile.to_cookie_value().expect("serialize");
        assert_eq!(IdentityProfile::from_cookie_value(&raw).expect("decode"), profile);
    }

    #[test]
    fn non_json_cookie_is_malformed() {
        assert!(IdentityProfile::from_cookie_value("not-json").is_err());
        assert!(IdentityProfile::from_cookie_value("[1,2]").is_err());
        assert!(IdentityProfile::from_cookie_value(r#"{"name":42}"#).is_err());
    }

    #[test]
    fn display_name_falls_back_to_given_name() {
        let profile = IdentityProfile {
            name: Some(String::new()),
            given_name: Some("Ada".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), Some("Ada"));
        assert_eq!(IdentityProfile::default().display_name(), None);
    }
}
