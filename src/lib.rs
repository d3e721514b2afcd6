//! Provider-pluggable OAuth 2.0 authentication strategies: deterministic authorization
//! redirects, code-for-token exchanges, and canonical profile normalization in one crate.
//!
//! A [`Strategy`](strategy::Strategy) composes an [`OAuth2Client`](client::OAuth2Client)
//! collaborator instead of subclassing a protocol engine. Provider specifics (endpoints,
//! client-credential header derivation, profile field mapping) are supplied as a validated
//! [`ProviderConfig`](provider::ProviderConfig) plus a
//! [`ProfileNormalizer`](profile::ProfileNormalizer) implementation. The crate ships a
//! Fitbit preset under [`provider::fitbit`] and a reqwest-backed collaborator behind the
//! default `reqwest` feature.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod obs;
pub mod profile;
pub mod provider;
pub mod strategy;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, parking_lot as _, tokio as _};
