//! Fitbit provider preset: canonical endpoints and profile normalization.

// crates.io
use serde_json::Value;
// self
use crate::{
	error::ParseError,
	profile::{CanonicalProfile, ProfileNormalizer, string_field},
	provider::{ProviderConfig, ProviderConfigBuilder},
};

/// Strategy identifier exposed for framework introspection.
pub const NAME: &str = "fitbit";
/// Canonical authorization endpoint.
pub const AUTHORIZATION_URL: &str = "https://www.fitbit.com/oauth2/authorize";
/// Canonical token endpoint.
pub const TOKEN_URL: &str = "https://api.fitbit.com/oauth2/token";
/// Fixed user-profile endpoint queried after token acquisition.
pub const PROFILE_URL: &str = "https://api.fitbit.com/1/user/-/profile.json";

/// Returns a configuration builder seeded with the canonical Fitbit endpoints.
///
/// Callers supply `client_id`, `client_secret`, and `callback_url`; every
/// seeded value can be overridden before `build()`.
pub fn config() -> ProviderConfigBuilder {
	ProviderConfig::builder(NAME)
		.authorization_url(AUTHORIZATION_URL)
		.token_url(TOKEN_URL)
		.profile_url(PROFILE_URL)
}

/// Normalizer for Fitbit profile payloads.
///
/// Promotes `user.encodedId` and `user.displayName` to the canonical top
/// level; the full payload stays attached unmodified.
#[derive(Clone, Copy, Debug, Default)]
pub struct FitbitNormalizer;
impl ProfileNormalizer for FitbitNormalizer {
	fn provider(&self) -> &'static str {
		NAME
	}

	fn normalize(&self, raw: Value) -> Result<CanonicalProfile, ParseError> {
		let id = string_field(&raw, &["user", "encodedId"], "user.encodedId")?;
		let display_name = string_field(&raw, &["user", "displayName"], "user.displayName")?;

		Ok(CanonicalProfile { provider: NAME, id, display_name, raw })
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn normalize_promotes_id_and_display_name() {
		let payload = json!({
			"user": {
				"encodedId": "AAA111",
				"displayName": "Homer",
				"country": "ES",
				"weight": 67
			}
		});
		let profile = FitbitNormalizer
			.normalize(payload.clone())
			.expect("Well-formed payload should normalize.");

		assert_eq!(profile.provider, "fitbit");
		assert_eq!(profile.id, "AAA111");
		assert_eq!(profile.display_name, "Homer");
		assert_eq!(profile.raw, payload);
	}

	#[test]
	fn normalize_reports_missing_promoted_fields() {
		let payload = json!({ "user": { "displayName": "Homer" } });
		let err = FitbitNormalizer
			.normalize(payload)
			.expect_err("Payload without an identifier must be rejected.");

		assert!(matches!(err, ParseError::MissingProfileField { field: "user.encodedId" }));
	}
}
