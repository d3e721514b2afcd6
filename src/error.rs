//! Strategy-level error taxonomy shared by construction, exchange, and profile flows.

// self
use crate::_prelude::*;

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error type carried as the cause of transport and verification failures.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
///
/// Configuration, transport, and parse failures stay distinguishable so
/// callers can branch on them; the kind probes below avoid pattern matching
/// at call sites.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem raised at strategy construction.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure while reaching the provider.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Provider payload was not valid structured data.
	#[error(transparent)]
	Parse(#[from] ParseError),

	/// Verification callback rejected the authenticated profile.
	#[error("Verification callback rejected the authenticated profile.")]
	Verification {
		/// Failure reported by the caller-supplied callback.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Returns true for construction-time configuration failures.
	pub fn is_config(&self) -> bool {
		matches!(self, Self::Config(_))
	}

	/// Returns true when the failure originated in the transport layer.
	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport(_))
	}

	/// Returns true for structured-data parse failures.
	pub fn is_parse(&self) -> bool {
		matches!(self, Self::Parse(_))
	}
}

/// Configuration and validation failures raised at strategy construction.
///
/// These are fatal: a strategy is never handed out with an incomplete
/// configuration, so redirect construction cannot fail deep inside an
/// asynchronous callback for a reason that was knowable up front.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier was absent or empty.
	#[error("Client identifier is required.")]
	MissingClientId,
	/// Client secret was absent or empty.
	#[error("Client secret is required.")]
	MissingClientSecret,
	/// Callback URL was absent or empty.
	#[error("Callback URL is required.")]
	MissingCallbackUrl,
	/// A provider endpoint was neither supplied nor seeded by a preset.
	#[error("Missing {endpoint} endpoint.")]
	MissingEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
	},
	/// Configuration contains an unparseable URL.
	#[error("The {endpoint} URL is invalid.")]
	InvalidUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Reject scope separators that are control characters.
	#[error("Scope separator must be a printable character.")]
	InvalidScopeSeparator {
		/// Invalid separator that was supplied.
		separator: char,
	},
	/// HTTP request construction failed inside the protocol engine.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}

/// Transport-level failures reaching the provider.
///
/// Every variant carries a fixed descriptive message; the underlying cause is
/// preserved through `source` for diagnostics. No retries happen at this
/// layer; retry policy belongs to the transport, not the strategy.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Profile endpoint could not be reached or answered unsuccessfully.
	///
	/// The response body is never parsed on this path.
	#[error("failed to fetch user profile")]
	ProfileFetch {
		/// Collaborator failure that prevented the fetch.
		#[source]
		source: BoxError,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
	/// Token endpoint answered with an OAuth error payload.
	#[error("Token endpoint rejected the exchange: {reason}.")]
	Rejected {
		/// Provider-supplied error code or description.
		reason: String,
	},
	/// Transport reported a failure that fits no other variant.
	#[error("HTTP client error occurred while calling the token endpoint: {message}.")]
	Unexpected {
		/// Transport-supplied message summarizing the failure.
		message: String,
	},
}
impl TransportError {
	/// Wraps the collaborator failure that prevented a profile fetch.
	pub fn profile_fetch(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::ProfileFetch { source: Box::new(src) }
	}

	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Structured-data parse failures, observably distinct in kind from
/// [`TransportError`].
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// Profile endpoint returned a body that is not valid JSON.
	#[error("Profile endpoint returned malformed JSON.")]
	ProfileJson {
		/// Structured parsing failure with its JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint responded with malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	TokenJson {
		/// Structured parsing failure with its JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Profile payload parsed but lacks a field required for normalization.
	#[error("Profile payload is missing the {field} field.")]
	MissingProfileField {
		/// Dotted path of the absent field.
		field: &'static str,
	},
}
