//! Storage contracts and built-in store implementations for session credentials.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::Credentials};

/// Boxed single-shot completion returned by store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for the session's single credential bundle.
///
/// The reference collaborator renews expired tokens internally before handing
/// them back; built-in stores do not reach the network, so [`has_valid`]
/// treats a renewable bundle (refresh token present) as loadable and leaves
/// actual renewal to the identity provider behind the gateway.
///
/// [`has_valid`]: CredentialStore::has_valid
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Cheap synchronous probe for a usable stored bundle.
	fn has_valid(&self) -> bool;

	/// Loads the stored bundle.
	fn load(&self) -> StoreFuture<'_, Credentials>;

	/// Persists or replaces the stored bundle.
	fn store(&self, credentials: Credentials) -> StoreFuture<'_, ()>;

	/// Removes the stored bundle.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// No bundle is currently stored.
	#[error("No credential bundle is stored.")]
	Missing,
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Shared validity policy applied by the built-in stores.
pub(crate) fn is_loadable(credentials: &Credentials) -> bool {
	!credentials.is_expired() || credentials.can_renew()
}
