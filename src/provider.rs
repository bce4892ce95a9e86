//! Identity-provider descriptors consumed by gateway components.

// self
use crate::{_prelude::*, auth::ProviderId};

/// Immutable provider descriptor naming the endpoints a session talks to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier.
	pub id: ProviderId,
	/// OIDC user-info endpoint queried after login.
	pub user_info_endpoint: Url,
}
impl ProviderDescriptor {
	/// Creates a descriptor after validating the endpoint scheme.
	pub fn new(id: ProviderId, user_info_endpoint: Url) -> Result<Self, ProviderDescriptorError> {
		validate_endpoint("user-info", &user_info_endpoint)?;

		Ok(Self { id, user_info_endpoint })
	}

	/// Builds a descriptor for a hosted tenant domain, deriving the standard
	/// `https://{domain}/userinfo` endpoint.
	pub fn from_domain(
		id: ProviderId,
		domain: &str,
	) -> Result<Self, ProviderDescriptorError> {
		let user_info_endpoint = Url::parse(&format!("https://{domain}/userinfo"))
			.map_err(|e| ProviderDescriptorError::InvalidUrl { source: e })?;

		Self::new(id, user_info_endpoint)
	}
}

/// Validation failures raised while assembling a [`ProviderDescriptor`].
#[derive(Debug, ThisError)]
pub enum ProviderDescriptorError {
	/// Descriptor contains an invalid URL.
	#[error("Descriptor contains an invalid URL.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Non-loopback endpoints must use HTTPS so bearer tokens never travel in
	/// the clear.
	#[error("The {endpoint} endpoint `{url}` must use HTTPS.")]
	InsecureEndpoint {
		/// Endpoint label.
		endpoint: &'static str,
		/// Offending URL.
		url: Url,
	},
}

fn validate_endpoint(endpoint: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	// Plain HTTP stays acceptable for loopback hosts (local development and
	// mock servers), mirroring RFC 8252's loopback carve-out.
	let loopback = match url.host() {
		Some(url::Host::Domain(domain)) => domain == "localhost",
		Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
		Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	};

	if url.scheme() == "https" || loopback {
		Ok(())
	} else {
		Err(ProviderDescriptorError::InsecureEndpoint { endpoint, url: url.clone() })
	}
}
