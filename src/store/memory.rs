//! Thread-safe in-memory [`CredentialStore`] implementation for demos and tests.

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	store::{self, CredentialStore, StoreError, StoreFuture},
};

type Slot = Arc<RwLock<Option<Credentials>>>;

/// Thread-safe single-slot backend that keeps the bundle in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Slot);
impl MemoryStore {
	/// Creates a store that is pre-populated with a bundle, as if a prior run
	/// had persisted it.
	pub fn seeded(credentials: Credentials) -> Self {
		Self(Arc::new(RwLock::new(Some(credentials))))
	}

	fn load_now(slot: &Slot) -> Result<Credentials, StoreError> {
		slot.read().clone().ok_or(StoreError::Missing)
	}
}
impl CredentialStore for MemoryStore {
	fn has_valid(&self) -> bool {
		self.0.read().as_ref().is_some_and(store::is_loadable)
	}

	fn load(&self) -> StoreFuture<'_, Credentials> {
		let slot = self.0.clone();

		Box::pin(async move { Self::load_now(&slot) })
	}

	fn store(&self, credentials: Credentials) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			*slot.write() = Some(credentials);

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			*slot.write() = None;

			Ok(())
		})
	}
}
