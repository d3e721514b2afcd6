//! Scope request modeling for authorization redirects.

// self
use crate::_prelude::*;

/// Scope value supplied with an authorization attempt.
///
/// Providers accept either a pre-joined string or an ordered list of scope
/// names. A list is joined with the provider's separator in its original
/// order, with no sorting and no deduplication, so the redirect carries
/// exactly what the caller requested. The serde representation is untagged, matching the dual
/// wire shape (`"weight profile"` or `["weight", "profile"]`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorizationScope {
	/// Already-joined scope string, passed through unchanged.
	Joined(String),
	/// Ordered list of scope names joined with the configured separator.
	List(Vec<String>),
}
impl AuthorizationScope {
	/// Renders the scope as the single string carried by the `scope` parameter.
	pub fn format(&self, separator: char) -> String {
		match self {
			Self::Joined(value) => value.clone(),
			Self::List(values) => {
				let mut buf = String::new();

				for (idx, value) in values.iter().enumerate() {
					if idx > 0 {
						buf.push(separator);
					}

					buf.push_str(value);
				}

				buf
			},
		}
	}
}
impl From<&str> for AuthorizationScope {
	fn from(value: &str) -> Self {
		Self::Joined(value.to_owned())
	}
}
impl From<String> for AuthorizationScope {
	fn from(value: String) -> Self {
		Self::Joined(value)
	}
}
impl From<Vec<String>> for AuthorizationScope {
	fn from(values: Vec<String>) -> Self {
		Self::List(values)
	}
}
impl From<&[&str]> for AuthorizationScope {
	fn from(values: &[&str]) -> Self {
		Self::List(values.iter().map(|value| (*value).to_owned()).collect())
	}
}
impl<const N: usize> From<[&str; N]> for AuthorizationScope {
	fn from(values: [&str; N]) -> Self {
		Self::from(values.as_slice())
	}
}
