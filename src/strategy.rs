//! Strategy orchestration: parameter construction, token-callback delegation,
//! and profile normalization.
//!
//! A [`Strategy`] composes an [`OAuth2Client`] collaborator instead of
//! subclassing a protocol engine: provider specifics (endpoints, credential
//! header derivation, profile mapping) arrive as a [`ProviderConfig`] and a
//! [`ProfileNormalizer`], never as virtual override chains. Each
//! authentication attempt is a short asynchronous sequence over request-scoped
//! values; the shared configuration is read-only, so concurrent attempts never
//! interfere.

// self
use crate::{
	_prelude::*,
	auth::{AuthorizationScope, TokenGrant},
	client::{OAuth2Client, TokenPlacement},
	error::{BoxError, ParseError, TransportError},
	obs::{self, StageKind, StageOutcome, StageSpan},
	profile::{CanonicalProfile, ProfileNormalizer},
	provider::ProviderConfig,
};
#[cfg(feature = "reqwest")] use crate::client::ReqwestOAuth2Client;

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest collaborator.
pub type ReqwestStrategy<U> = Strategy<U, ReqwestOAuth2Client>;

/// Verification callback invoked with the token grant and normalized profile.
///
/// The surrounding framework decides what a verified user looks like; the
/// strategy only guarantees the callback runs exactly once per successful
/// authentication and that its rejection surfaces as
/// [`Error::Verification`](crate::error::Error::Verification).
pub type VerifyFn<U> =
	dyn Fn(&TokenGrant, &CanonicalProfile) -> Result<U, BoxError> + Send + Sync;

/// Per-attempt authorization options.
///
/// Extra parameters are forwarded to the redirect URL verbatim, in insertion
/// order; the optional scope is rendered through the provider's separator.
/// Options are plain request-scoped values; building parameters from them
/// never mutates anything observable.
#[derive(Clone, Debug, Default)]
pub struct AuthorizationOptions {
	/// Requested scope, either pre-joined or an ordered list.
	pub scope: Option<AuthorizationScope>,
	/// Additional parameters forwarded verbatim.
	pub params: Vec<(String, String)>,
}
impl AuthorizationOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the requested scope.
	pub fn scope(mut self, scope: impl Into<AuthorizationScope>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Appends an extra parameter forwarded verbatim to the redirect URL.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.push((key.into(), value.into()));

		self
	}
}

/// Named, provider-specific authentication delegate.
///
/// Holds the immutable configuration, the OAuth2 collaborator, the profile
/// normalizer, and the caller-supplied verification callback.
pub struct Strategy<U, C>
where
	C: ?Sized + OAuth2Client,
{
	config: ProviderConfig,
	client: Arc<C>,
	normalizer: Arc<dyn ProfileNormalizer>,
	verify: Arc<VerifyFn<U>>,
}
impl<U, C> Strategy<U, C>
where
	C: ?Sized + OAuth2Client,
{
	/// Creates a strategy that reuses a caller-provided collaborator.
	pub fn with_client(
		config: ProviderConfig,
		client: impl Into<Arc<C>>,
		normalizer: Arc<dyn ProfileNormalizer>,
		verify: impl Fn(&TokenGrant, &CanonicalProfile) -> Result<U, BoxError>
		+ Send
		+ Sync
		+ 'static,
	) -> Self {
		Self { config, client: client.into(), normalizer, verify: Arc::new(verify) }
	}

	/// Immutable strategy identifier, constant regardless of per-call options.
	pub fn name(&self) -> &'static str {
		self.config.name()
	}

	/// Read-only configuration shared across authentication attempts.
	pub fn config(&self) -> &ProviderConfig {
		&self.config
	}

	/// Builds the extra query parameters for an authorization redirect.
	///
	/// Pure function of the configuration and options: caller parameters keep
	/// their insertion order, a scope list is joined with the configured
	/// separator in its original order, a scope string passes through
	/// unchanged, and an absent scope emits no `scope` key. Calling twice with
	/// the same input yields identical output.
	pub fn authorization_params(&self, options: &AuthorizationOptions) -> Vec<(String, String)> {
		let mut params = options.params.clone();

		if let Some(scope) = &options.scope {
			params.push(("scope".into(), scope.format(self.config.scope_separator())));
		}

		params
	}

	/// Constructs the authorization redirect URL via the collaborator.
	pub fn authorization_redirect(&self, options: &AuthorizationOptions) -> Result<Url> {
		const KIND: StageKind = StageKind::Authorize;

		let _guard = StageSpan::new(KIND, "authorization_redirect").entered();

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);

		let params = self.authorization_params(options);
		let result = self.client.authorization_redirect(self.config.authorization_url(), &params);

		match &result {
			Ok(_) => obs::record_stage_outcome(KIND, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(KIND, StageOutcome::Failure),
		}

		result
	}

	/// Exchanges an authorization code for a token grant via the collaborator.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
		const KIND: StageKind = StageKind::Exchange;

		let span = StageSpan::new(KIND, "exchange_code");

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);

		let result = span.instrument(self.client.exchange_code(code)).await;

		match &result {
			Ok(_) => obs::record_stage_outcome(KIND, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(KIND, StageOutcome::Failure),
		}

		result
	}

	/// Fetches the raw profile and normalizes it into a [`CanonicalProfile`].
	///
	/// The access token travels in the request header on every call; placement
	/// is a parameter of the GET itself, so there is no strategy-wide toggle
	/// for concurrent attempts to race on. Transport failures surface as
	/// [`TransportError`] with the message `failed to fetch user profile` and
	/// the body is never parsed on that path; malformed payloads surface as
	/// [`ParseError`], a distinct kind. Every call resolves with exactly one
	/// of profile or error.
	pub async fn user_profile(&self, access_token: &str) -> Result<CanonicalProfile> {
		const KIND: StageKind = StageKind::Profile;

		let span = StageSpan::new(KIND, "user_profile");

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);

		let result = span.instrument(self.fetch_and_normalize(access_token)).await;

		match &result {
			Ok(_) => obs::record_stage_outcome(KIND, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(KIND, StageOutcome::Failure),
		}

		result
	}

	/// Runs the full callback phase: code exchange, profile fetch, verification.
	///
	/// The verification callback receives the grant and normalized profile
	/// exactly once per successful authentication.
	pub async fn authenticate(&self, code: &str) -> Result<U> {
		let grant = self.exchange_code(code).await?;
		let profile = self.user_profile(grant.access_token.expose()).await?;

		(self.verify)(&grant, &profile).map_err(|source| Error::Verification { source })
	}

	async fn fetch_and_normalize(&self, access_token: &str) -> Result<CanonicalProfile> {
		let body = self
			.client
			.get(self.config.profile_url(), access_token, TokenPlacement::Header)
			.await
			.map_err(|source| TransportError::ProfileFetch { source: Box::new(source) })?;
		let mut deserializer = serde_json::Deserializer::from_str(&body);
		let raw: serde_json::Value = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ParseError::ProfileJson { source })?;
		let profile = self.normalizer.normalize(raw)?;

		Ok(profile)
	}
}
#[cfg(feature = "reqwest")]
impl<U> Strategy<U, ReqwestOAuth2Client> {
	/// Creates a strategy that provisions the built-in reqwest collaborator.
	///
	/// Fails synchronously with a configuration error before any network
	/// activity when the configuration cannot back a collaborator.
	pub fn new(
		config: ProviderConfig,
		normalizer: Arc<dyn ProfileNormalizer>,
		verify: impl Fn(&TokenGrant, &CanonicalProfile) -> Result<U, BoxError>
		+ Send
		+ Sync
		+ 'static,
	) -> Result<Self> {
		let client = ReqwestOAuth2Client::from_config(&config)?;

		Ok(Self::with_client(config, client, normalizer, verify))
	}
}
impl<U, C> Clone for Strategy<U, C>
where
	C: ?Sized + OAuth2Client,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			client: self.client.clone(),
			normalizer: self.normalizer.clone(),
			verify: self.verify.clone(),
		}
	}
}
impl<U, C> Debug for Strategy<U, C>
where
	C: ?Sized + OAuth2Client,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Strategy").field("name", &self.name()).field("config", &self.config).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		client::{ClientFuture, authorization_redirect_url},
		provider::fitbit,
	};

	struct StubClient {
		client_id: String,
	}
	impl OAuth2Client for StubClient {
		fn authorization_redirect(
			&self,
			authorization_url: &Url,
			params: &[(String, String)],
		) -> Result<Url> {
			Ok(authorization_redirect_url(authorization_url, &self.client_id, None, params))
		}

		fn exchange_code<'a>(&'a self, _code: &'a str) -> ClientFuture<'a, TokenGrant> {
			unimplemented!("Parameter tests never exchange codes.")
		}

		fn get<'a>(
			&'a self,
			_url: &'a Url,
			_access_token: &'a str,
			_placement: TokenPlacement,
		) -> ClientFuture<'a, String> {
			unimplemented!("Parameter tests never fetch profiles.")
		}
	}

	fn strategy() -> Strategy<(), StubClient> {
		let config = fitbit::config()
			.client_id("ABC123")
			.client_secret("secret")
			.callback_url("https://www.example.net/auth/fitbit/callback")
			.build()
			.expect("Test configuration should build successfully.");
		let client = StubClient { client_id: config.client_id().to_owned() };

		Strategy::with_client(config, client, Arc::new(fitbit::FitbitNormalizer), |_, _| Ok(()))
	}

	#[test]
	fn params_forward_extras_verbatim_in_insertion_order() {
		let strategy = strategy();
		let options =
			AuthorizationOptions::new().param("foo", "bar").param("prompt", "consent");
		let params = strategy.authorization_params(&options);

		assert_eq!(
			params,
			vec![("foo".to_owned(), "bar".to_owned()), ("prompt".to_owned(), "consent".to_owned())]
		);
	}

	#[test]
	fn params_join_scope_lists_and_pass_strings_through() {
		let strategy = strategy();
		let list = strategy.authorization_params(
			&AuthorizationOptions::new().scope(["weight", "profile"]),
		);
		let joined = strategy
			.authorization_params(&AuthorizationOptions::new().scope("weight profile"));

		assert_eq!(list, joined);
		assert_eq!(list, vec![("scope".to_owned(), "weight profile".to_owned())]);
	}

	#[test]
	fn params_omit_scope_key_when_absent() {
		let strategy = strategy();
		let params = strategy.authorization_params(&AuthorizationOptions::new());

		assert!(params.is_empty());
	}

	#[test]
	fn params_are_idempotent() {
		let strategy = strategy();
		let options = AuthorizationOptions::new().param("foo", "bar").scope(["weight", "profile"]);
		let first = strategy.authorization_params(&options);
		let second = strategy.authorization_params(&options);

		assert_eq!(first, second);
	}

	#[test]
	fn name_is_the_provider_constant() {
		assert_eq!(strategy().name(), "fitbit");
	}
}
