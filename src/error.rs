//! Session-level error taxonomy shared across the driver and its collaborators.
//!
//! Every variant is recovered locally by reverting the session to its prior
//! stable state; none are fatal. Invalid state transitions are programming
//! errors surfaced through debug assertions, not through this taxonomy.

// self
use crate::{_prelude::*, gateway::GatewayError, store::StoreError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical session error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Startup hydration found nothing usable; callers should present first-run UI.
	#[error("No stored credentials are available.")]
	NoCredentialsFound {
		/// Storage failure that prevented the lookup, when one occurred.
		#[source]
		source: Option<StoreError>,
	},
	/// The user dismissed the external login prompt.
	#[error("The login prompt was cancelled.")]
	LoginCancelled,
	/// The identity provider rejected or aborted the login attempt.
	#[error("The login attempt failed.")]
	LoginFailed {
		/// Gateway failure reported by the login prompt.
		#[source]
		source: GatewayError,
	},
	/// Freshly issued credentials could not be persisted; the attempt stays in flight.
	#[error("Issued credentials could not be persisted.")]
	PersistFailed {
		/// Storage failure raised by the credential store.
		#[source]
		source: StoreError,
	},
	/// The user profile could not be retrieved; session state is unchanged.
	#[error("The user profile could not be retrieved: {reason}.")]
	ProfileFetchFailed {
		/// Session- or gateway-supplied reason string.
		reason: String,
		/// Gateway failure behind the fetch, when one occurred.
		#[source]
		source: Option<GatewayError>,
	},
	/// Stored credentials could not be cleared; the session stays logged in.
	#[error("Stored credentials could not be cleared.")]
	LogoutFailed {
		/// Storage failure raised by the credential store.
		#[source]
		source: StoreError,
	},
}
impl Error {
	/// Builds a [`Error::ProfileFetchFailed`] for a fetch attempted without an access token.
	pub(crate) fn profile_without_token() -> Self {
		Self::ProfileFetchFailed { reason: "no access token is available".into(), source: None }
	}

	/// Wraps a gateway failure raised while fetching the user profile.
	pub(crate) fn profile_fetch(source: GatewayError) -> Self {
		Self::ProfileFetchFailed { reason: source.to_string(), source: Some(source) }
	}
}
