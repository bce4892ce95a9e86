//! Reqwest-backed client for the provider's OIDC user-info endpoint.
//!
//! Login presentation stays application-specific, so this module only covers
//! the half of the gateway the crate can own outright: exchanging a bearer
//! token for a [`Profile`]. Embed a [`UserInfoClient`] inside an
//! [`IdentityGateway`](crate::gateway::IdentityGateway) implementation and
//! delegate `fetch_user_info` to [`UserInfoClient::fetch`].

// self
use crate::{
	_prelude::*, auth::Profile, gateway::GatewayError, http::ReqwestHttpClient,
	provider::ProviderDescriptor,
};

const BODY_PREVIEW_LEN: usize = 256;

/// HTTP client bound to one provider's user-info endpoint.
#[derive(Clone, Debug)]
pub struct UserInfoClient {
	http: ReqwestHttpClient,
	descriptor: ProviderDescriptor,
}
impl UserInfoClient {
	/// Creates a client with a default reqwest transport.
	pub fn new(descriptor: ProviderDescriptor) -> Self {
		Self::with_http_client(ReqwestHttpClient::default(), descriptor)
	}

	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(http: ReqwestHttpClient, descriptor: ProviderDescriptor) -> Self {
		Self { http, descriptor }
	}

	/// Returns the descriptor this client resolves user info against.
	pub fn descriptor(&self) -> &ProviderDescriptor {
		&self.descriptor
	}

	/// Fetches the profile authorized by `access_token`.
	pub async fn fetch(&self, access_token: &str) -> Result<Profile, GatewayError> {
		let response = self
			.http
			.get(self.descriptor.user_info_endpoint.clone())
			.bearer_auth(access_token)
			.send()
			.await?;
		let status = response.status();
		let bytes = response.bytes().await?;

		if !status.is_success() {
			return Err(GatewayError::Provider {
				message: rejection_message(status.as_u16(), &bytes),
				status: Some(status.as_u16()),
			});
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&bytes);

		serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
			GatewayError::MalformedUserInfo { source: e, status: Some(status.as_u16()) }
		})
	}
}

fn rejection_message(status: u16, body: &[u8]) -> String {
	let preview = body_preview(body);

	if preview.is_empty() {
		format!("user-info endpoint returned HTTP {status}")
	} else {
		format!("user-info endpoint returned HTTP {status}: {preview}")
	}
}

fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);
	let trimmed = text.trim();

	trimmed.chars().take(BODY_PREVIEW_LEN).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rejection_messages_include_trimmed_previews() {
		let message = rejection_message(401, b"  {\"error\":\"invalid_token\"}\n");

		assert_eq!(
			message,
			"user-info endpoint returned HTTP 401: {\"error\":\"invalid_token\"}"
		);
		assert_eq!(rejection_message(503, b""), "user-info endpoint returned HTTP 503");
	}

	#[test]
	fn previews_are_bounded() {
		let long = vec![b'x'; 4 * BODY_PREVIEW_LEN];

		assert_eq!(body_preview(&long).len(), BODY_PREVIEW_LEN);
	}
}
