//! Token material returned by the code exchange.

// std
use std::time::Duration;
// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping credentials and tokens out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Secret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Access and refresh tokens acquired from a code exchange.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenGrant {
	/// Access token secret; callers must avoid logging it.
	pub access_token: Secret,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<Secret>,
	/// Relative lifetime reported by the token endpoint, if any.
	pub expires_in: Option<Duration>,
}
impl TokenGrant {
	/// Creates a grant holding only an access token.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self { access_token: Secret::new(access_token), refresh_token: None, expires_in: None }
	}

	/// Attaches the refresh token issued alongside the access token.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
		self.refresh_token = Some(Secret::new(refresh_token));

		self
	}

	/// Attaches the relative expiry reported by the token endpoint.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_in = Some(expires_in);

		self
	}
}
