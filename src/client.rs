//! OAuth2 client collaborator boundary and the built-in reqwest implementation.
//!
//! The strategy never talks to a transport directly; it holds an
//! [`OAuth2Client`] that builds authorization redirects, exchanges codes for
//! tokens, and issues authenticated GET requests. Substitute implementations
//! (mocks, custom transports) must honor the same contract: deterministic
//! redirect parameter ordering, per-call token placement, and a non-null error
//! on every transport failure.

pub use oauth2;

// crates.io
use oauth2::{HttpClientError, RequestTokenError, basic::BasicRequestTokenError};
#[cfg(feature = "reqwest")]
use oauth2::{
	AsyncHttpClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet,
	EndpointSet, HttpRequest, HttpResponse, RedirectUrl, TokenResponse, TokenUrl,
	basic::BasicClient,
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
#[cfg(feature = "reqwest")] use reqwest::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	auth::TokenGrant,
	error::{ConfigError, ParseError, TransportError},
};
#[cfg(feature = "reqwest")] use crate::provider::ProviderConfig;

#[cfg(feature = "reqwest")]
type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Characters escaped when rendering redirect query parameters.
///
/// Everything outside the RFC 3986 unreserved set is percent-encoded, so a
/// space renders as `%20` rather than the `+` form emitted by form encoders.
const QUERY_ESCAPES: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Future type returned by asynchronous [`OAuth2Client`] operations.
pub type ClientFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Token placement for authenticated GET requests.
///
/// Placement travels with each call instead of living on the client as shared
/// mutable state, so concurrent authentication attempts can never observe each
/// other's toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenPlacement {
	/// `Authorization: Bearer <token>` request header.
	Header,
	/// `access_token=<token>` query-string parameter.
	Query,
}

/// Boundary with the OAuth2 protocol collaborator.
pub trait OAuth2Client
where
	Self: 'static + Send + Sync,
{
	/// Constructs the authorization redirect for the given extra parameters.
	///
	/// Implementations append `response_type=code`, their configured
	/// `client_id`, and their redirect URI (when one is configured) after the
	/// caller-supplied parameters; see [`authorization_redirect_url`].
	fn authorization_redirect(
		&self,
		authorization_url: &Url,
		params: &[(String, String)],
	) -> Result<Url>;

	/// Exchanges an authorization code for a token grant.
	fn exchange_code<'a>(&'a self, code: &'a str) -> ClientFuture<'a, TokenGrant>;

	/// Issues an authenticated GET and resolves with the raw response body.
	///
	/// `error` is non-null on any transport failure, including non-success
	/// status codes; the body is only returned for successful responses.
	fn get<'a>(
		&'a self,
		url: &'a Url,
		access_token: &'a str,
		placement: TokenPlacement,
	) -> ClientFuture<'a, String>;
}

/// Builds an authorization redirect with deterministic parameter ordering.
///
/// Caller parameters come first in insertion order, then `response_type=code`,
/// `client_id`, and finally `redirect_uri` when one is supplied. Keys and
/// values are percent-encoded per [`QUERY_ESCAPES`].
pub fn authorization_redirect_url(
	authorization_url: &Url,
	client_id: &str,
	redirect_uri: Option<&Url>,
	params: &[(String, String)],
) -> Url {
	let mut query = String::new();

	for (key, value) in params {
		push_pair(&mut query, key, value);
	}

	push_pair(&mut query, "response_type", "code");
	push_pair(&mut query, "client_id", client_id);

	if let Some(redirect) = redirect_uri {
		push_pair(&mut query, "redirect_uri", redirect.as_str());
	}

	let mut url = authorization_url.clone();

	url.set_query(Some(&query));

	url
}

fn push_pair(query: &mut String, key: &str, value: &str) {
	if !query.is_empty() {
		query.push('&');
	}

	query.extend(utf8_percent_encode(key, QUERY_ESCAPES));
	query.push('=');
	query.extend(utf8_percent_encode(value, QUERY_ESCAPES));
}

/// Translates `oauth2` token request failures into the strategy taxonomy.
///
/// Server-side OAuth error payloads are surfaced uniformly as
/// [`TransportError::Rejected`]; malformed token responses stay
/// distinguishable as [`ParseError::TokenJson`].
pub fn map_token_error<E>(err: BasicRequestTokenError<HttpClientError<E>>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		RequestTokenError::ServerResponse(response) => {
			let reason = if let Some(description) = response.error_description() {
				description.clone()
			} else {
				response.error().as_ref().to_owned()
			};

			TransportError::Rejected { reason }.into()
		},
		RequestTokenError::Request(error) => match error {
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) =>
				TransportError::Unexpected { message: message.to_string() }.into(),
			other => TransportError::Network { source: Box::new(other) }.into(),
		},
		RequestTokenError::Parse(source, _body) => ParseError::TokenJson { source }.into(),
		RequestTokenError::Other(message) => TransportError::Unexpected { message }.into(),
	}
}

/// Built-in collaborator backed by reqwest and the `oauth2` protocol engine.
///
/// Code exchanges authenticate with HTTP Basic credentials on every
/// token-endpoint request, the same `base64(client_id:client_secret)` header
/// precomputed by [`ProviderConfig::basic_authorization`].
/// Profile GETs place the access token per the caller's [`TokenPlacement`].
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestOAuth2Client {
	oauth_client: ConfiguredBasicClient,
	http: ReqwestClient,
	client_id: String,
	redirect_uri: Url,
}
#[cfg(feature = "reqwest")]
impl ReqwestOAuth2Client {
	/// Builds the collaborator from a validated provider configuration.
	pub fn from_config(config: &ProviderConfig) -> Result<Self> {
		Self::with_client(config, ReqwestClient::default())
	}

	/// Wraps a caller-provided reqwest client (custom TLS, proxies, timeouts).
	pub fn with_client(config: &ProviderConfig, http: ReqwestClient) -> Result<Self> {
		let auth_url = AuthUrl::new(config.authorization_url().to_string())
			.map_err(|source| ConfigError::InvalidUrl { endpoint: "authorization", source })?;
		let token_url = TokenUrl::new(config.token_url().to_string())
			.map_err(|source| ConfigError::InvalidUrl { endpoint: "token", source })?;
		let redirect_url = RedirectUrl::new(config.callback_url().to_string())
			.map_err(|source| ConfigError::InvalidUrl { endpoint: "callback", source })?;
		let oauth_client = BasicClient::new(ClientId::new(config.client_id().to_owned()))
			.set_client_secret(ClientSecret::new(config.client_secret().expose().to_owned()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_redirect_uri(redirect_url);

		Ok(Self {
			oauth_client,
			http,
			client_id: config.client_id().to_owned(),
			redirect_uri: config.callback_url().clone(),
		})
	}
}
#[cfg(feature = "reqwest")]
impl OAuth2Client for ReqwestOAuth2Client {
	fn authorization_redirect(
		&self,
		authorization_url: &Url,
		params: &[(String, String)],
	) -> Result<Url> {
		Ok(authorization_redirect_url(
			authorization_url,
			&self.client_id,
			Some(&self.redirect_uri),
			params,
		))
	}

	fn exchange_code<'a>(&'a self, code: &'a str) -> ClientFuture<'a, TokenGrant> {
		Box::pin(async move {
			let handle = HttpHandle::new(self.http.clone());
			let response = self
				.oauth_client
				.exchange_code(AuthorizationCode::new(code.to_owned()))
				.request_async(&handle)
				.await
				.map_err(map_token_error)?;
			let mut grant = TokenGrant::new(response.access_token().secret().clone());

			if let Some(refresh) = response.refresh_token() {
				grant = grant.with_refresh_token(refresh.secret().clone());
			}
			if let Some(expires_in) = response.expires_in() {
				grant = grant.with_expires_in(expires_in);
			}

			Ok(grant)
		})
	}

	fn get<'a>(
		&'a self,
		url: &'a Url,
		access_token: &'a str,
		placement: TokenPlacement,
	) -> ClientFuture<'a, String> {
		Box::pin(async move {
			let request = match placement {
				TokenPlacement::Header => self
					.http
					.get(url.clone())
					.header(AUTHORIZATION, format!("Bearer {access_token}")),
				TokenPlacement::Query => {
					let mut url = url.clone();

					url.query_pairs_mut().append_pair("access_token", access_token);

					self.http.get(url)
				},
			};
			let response = request
				.send()
				.await
				.and_then(reqwest::Response::error_for_status)
				.map_err(TransportError::from)?;
			let body = response.text().await.map_err(TransportError::from)?;

			Ok(body)
		})
	}
}

/// Adapter that satisfies the protocol engine's [`AsyncHttpClient`] contract
/// with a plain reqwest client.
#[cfg(feature = "reqwest")]
struct HttpHandle {
	client: ReqwestClient,
}
#[cfg(feature = "reqwest")]
impl HttpHandle {
	fn new(client: ReqwestClient) -> Self {
		Self { client }
	}
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for HttpHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.client.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut converted = HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*converted.status_mut() = status;
			*converted.headers_mut() = headers;

			Ok(converted)
		})
	}
}
