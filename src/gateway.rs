//! Identity-provider collaborator contract.
//!
//! The gateway is the session's only boundary to the identity provider: it
//! presents the provider's login experience (hosted page, native widget,
//! device prompt) and serves user-info lookups for an issued access token.
//! Both calls are single-shot; the session driver awaits each completion and
//! applies the outcome itself, so implementations never mutate session state.

#[cfg(feature = "reqwest")] pub mod user_info;
#[cfg(feature = "reqwest")] pub use user_info::UserInfoClient;

// self
use crate::{
	_prelude::*,
	auth::{Credentials, Profile},
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed single-shot completion returned by gateway calls.
pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

/// Terminal outcomes of one external login prompt.
#[derive(Debug)]
pub enum LoginOutcome {
	/// The user authenticated and the provider issued a credential bundle.
	Authenticated(Credentials),
	/// The user dismissed the prompt without authenticating.
	Cancelled,
	/// The prompt aborted with a provider or transport failure.
	Failed(GatewayError),
}

/// Identity-provider contract implemented by applications embedding a session.
pub trait IdentityGateway
where
	Self: Send + Sync,
{
	/// Presents the external login experience and resolves with its outcome.
	fn present_login(&self) -> GatewayFuture<'_, LoginOutcome>;

	/// Fetches the user profile authorized by the provided access token.
	fn fetch_user_info<'a>(
		&'a self,
		access_token: &'a str,
	) -> GatewayFuture<'a, Result<Profile, GatewayError>>;
}

/// Error type produced by [`IdentityGateway`] implementations.
#[derive(Debug, ThisError)]
pub enum GatewayError {
	/// Provider answered with a non-success response.
	#[error("The identity provider rejected the call: {message}.")]
	Provider {
		/// Provider- or gateway-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// User-info endpoint responded with JSON that could not be parsed.
	#[error("The user-info response was malformed JSON.")]
	MalformedUserInfo {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Underlying transport reported a network failure.
	#[error("Network error occurred while calling the identity provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl GatewayError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for GatewayError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::io;
	// self
	use super::*;

	#[test]
	fn network_errors_preserve_their_sources() {
		let error = GatewayError::network(io::Error::other("connection reset"));
		let source = StdError::source(&error)
			.expect("Network error should expose the transport failure as its source.");

		assert!(source.to_string().contains("connection reset"));
	}

	#[test]
	fn provider_errors_render_status_free_messages() {
		let error = GatewayError::Provider { message: "invalid_token".into(), status: Some(401) };

		assert_eq!(error.to_string(), "The identity provider rejected the call: invalid_token.");
	}
}
