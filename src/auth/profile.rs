//! User-identity data fetched from the provider after login.

// self
use crate::{_prelude::*, auth::SubjectId};

/// Fallback shown when the provider supplies no usable display name.
const DEFAULT_DISPLAY_NAME: &str = "New User";

/// User profile returned by the provider's user-info endpoint.
///
/// Deserializes directly from an OIDC user-info document; unknown claims are
/// ignored so provider-specific extensions never break the fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
	/// Stable subject identifier assigned by the provider.
	pub sub: SubjectId,
	/// Full name claim, when released by the provider.
	#[serde(default)]
	pub name: Option<String>,
	/// Short-form nickname claim, when released by the provider.
	#[serde(default)]
	pub nickname: Option<String>,
	/// Email claim, when the granted scopes include it.
	#[serde(default)]
	pub email: Option<String>,
	/// Profile picture location, when one is set.
	#[serde(default)]
	pub picture: Option<Url>,
}
impl Profile {
	/// Returns the best available human-readable name, falling back to a
	/// placeholder for accounts that released neither name nor nickname.
	pub fn display_name(&self) -> &str {
		self.name
			.as_deref()
			.filter(|value| !value.is_empty())
			.or_else(|| self.nickname.as_deref().filter(|value| !value.is_empty()))
			.unwrap_or(DEFAULT_DISPLAY_NAME)
	}
}
