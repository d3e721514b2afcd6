//! Provider-facing configuration (data) and built-in provider presets.
//!
//! `config` exposes the validated, immutable [`ProviderConfig`] consumed by a
//! strategy: credentials, endpoints, scope separator, and the precomputed HTTP
//! Basic credential header. `fitbit` is the built-in preset with canonical
//! endpoints and the Fitbit profile normalizer.

pub mod config;
pub mod fitbit;

pub use config::*;
