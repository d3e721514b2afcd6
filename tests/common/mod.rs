//! In-memory OAuth2 collaborator that records every call it receives.

// crates.io
use parking_lot::Mutex;
// self
use oauth2_strategy::{
	auth::TokenGrant,
	client::{ClientFuture, OAuth2Client, TokenPlacement, authorization_redirect_url},
	error::{Error, Result},
	url::Url,
};

/// Collaborator double with canned responses and call recording.
///
/// Canned responses are consumed on use; a call without a canned response
/// panics, which keeps tests explicit about every interaction they expect.
pub struct RecordingClient {
	client_id: String,
	redirect_uri: Option<Url>,
	exchanges: Mutex<Vec<String>>,
	gets: Mutex<Vec<(Url, String, TokenPlacement)>>,
	grant: Mutex<Option<Result<TokenGrant>>>,
	profile_body: Mutex<Option<Result<String>>>,
}
impl RecordingClient {
	pub fn new(client_id: &str) -> Self {
		Self {
			client_id: client_id.to_owned(),
			redirect_uri: None,
			exchanges: Mutex::new(Vec::new()),
			gets: Mutex::new(Vec::new()),
			grant: Mutex::new(None),
			profile_body: Mutex::new(None),
		}
	}

	#[allow(dead_code)]
	pub fn with_redirect(client_id: &str, redirect_uri: Url) -> Self {
		let mut client = Self::new(client_id);

		client.redirect_uri = Some(redirect_uri);

		client
	}

	#[allow(dead_code)]
	pub fn respond_grant(self, grant: TokenGrant) -> Self {
		*self.grant.lock() = Some(Ok(grant));

		self
	}

	#[allow(dead_code)]
	pub fn fail_exchange(self, error: Error) -> Self {
		*self.grant.lock() = Some(Err(error));

		self
	}

	#[allow(dead_code)]
	pub fn respond_profile(self, body: &str) -> Self {
		*self.profile_body.lock() = Some(Ok(body.to_owned()));

		self
	}

	#[allow(dead_code)]
	pub fn fail_profile(self, error: Error) -> Self {
		*self.profile_body.lock() = Some(Err(error));

		self
	}

	#[allow(dead_code)]
	pub fn recorded_exchanges(&self) -> Vec<String> {
		self.exchanges.lock().clone()
	}

	#[allow(dead_code)]
	pub fn recorded_gets(&self) -> Vec<(Url, String, TokenPlacement)> {
		self.gets.lock().clone()
	}
}
impl OAuth2Client for RecordingClient {
	fn authorization_redirect(
		&self,
		authorization_url: &Url,
		params: &[(String, String)],
	) -> Result<Url> {
		Ok(authorization_redirect_url(
			authorization_url,
			&self.client_id,
			self.redirect_uri.as_ref(),
			params,
		))
	}

	fn exchange_code<'a>(&'a self, code: &'a str) -> ClientFuture<'a, TokenGrant> {
		Box::pin(async move {
			self.exchanges.lock().push(code.to_owned());

			self.grant.lock().take().expect("Test must seed a token grant before exchanging.")
		})
	}

	fn get<'a>(
		&'a self,
		url: &'a Url,
		access_token: &'a str,
		placement: TokenPlacement,
	) -> ClientFuture<'a, String> {
		Box::pin(async move {
			self.gets.lock().push((url.clone(), access_token.to_owned(), placement));

			self.profile_body.lock().take().expect("Test must seed a profile body before fetching.")
		})
	}
}
