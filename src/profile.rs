//! Canonical profile records and provider-specific normalizers.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, error::ParseError};

/// Provider-agnostic user identity produced by a successful profile fetch.
///
/// `id` and `display_name` are always populated when parsing succeeds, and
/// `raw` holds the exact parsed payload; nothing is dropped or renamed beyond
/// the fields promoted to the top level.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanonicalProfile {
	/// Constant strategy identifier (e.g., `"fitbit"`).
	pub provider: &'static str,
	/// Provider's unique user identifier.
	pub id: String,
	/// Provider's display-name field.
	pub display_name: String,
	/// Full parsed payload, attached unmodified.
	pub raw: Value,
}

/// Maps a provider's raw profile payload into a [`CanonicalProfile`].
///
/// Provider specifics live in data and normalizer implementations instead of a
/// subclass hierarchy; the strategy invokes the hook exactly once per
/// successfully parsed payload.
pub trait ProfileNormalizer
where
	Self: 'static + Send + Sync,
{
	/// Constant strategy identifier stamped onto every normalized profile.
	fn provider(&self) -> &'static str;

	/// Builds the canonical record from the parsed payload.
	///
	/// Implementations must keep the full payload attached unmodified and fail
	/// with [`ParseError::MissingProfileField`] when a promoted field is
	/// absent or not a string.
	fn normalize(&self, raw: Value) -> Result<CanonicalProfile, ParseError>;
}

/// Promotes a nested string field from the payload, for normalizer implementations.
///
/// `path` walks object keys; `field` is the dotted path reported on failure.
pub fn string_field(raw: &Value, path: &[&str], field: &'static str) -> Result<String, ParseError> {
	let mut cursor = raw;

	for segment in path {
		cursor = &cursor[*segment];
	}

	cursor.as_str().map(str::to_owned).ok_or(ParseError::MissingProfileField { field })
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn string_field_walks_nested_objects() {
		let payload = json!({ "user": { "encodedId": "AAA111" } });
		let value = string_field(&payload, &["user", "encodedId"], "user.encodedId")
			.expect("Nested field should resolve.");

		assert_eq!(value, "AAA111");
	}

	#[test]
	fn string_field_reports_missing_and_non_string_values() {
		let payload = json!({ "user": { "age": 36 } });
		let missing = string_field(&payload, &["user", "encodedId"], "user.encodedId")
			.expect_err("Absent field must be reported.");

		assert!(matches!(
			missing,
			ParseError::MissingProfileField { field: "user.encodedId" }
		));

		let non_string = string_field(&payload, &["user", "age"], "user.age")
			.expect_err("Non-string field must be reported.");

		assert!(matches!(non_string, ParseError::MissingProfileField { field: "user.age" }));
	}
}
