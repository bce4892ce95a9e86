//! Session driver orchestrating the login lifecycle against its collaborators.
//!
//! [`Session`] owns the credential store and identity gateway behind `Arc`s
//! and drives the pure transition table in [`machine`]: every operation feeds
//! an event through [`machine::step`] and then executes the returned effects
//! itself. Operations take `&mut self`, so exactly one owner observes every
//! mutation and each asynchronous completion is applied at the owner's
//! `await`—the single-writer discipline the lifecycle requires, enforced by
//! ownership instead of a designated thread.

pub mod machine;
pub use machine::*;

mod metrics;
pub use metrics::SessionMetrics;

// self
use crate::{
	_prelude::*,
	auth::{Credentials, Profile},
	gateway::{IdentityGateway, LoginOutcome},
	obs::{self, SessionSpan, StageKind, StageOutcome},
	store::CredentialStore,
};

/// Conclusion of a login operation that did not error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginConclusion {
	/// The session reached the logged-in state.
	SignedIn {
		/// Whether the follow-up profile fetch succeeded immediately.
		profile_ready: bool,
	},
	/// No prompt was presented; an attempt is already in flight or the
	/// session is not in a state that accepts logins.
	NotPresented,
}

/// Conclusion of a logout operation that did not error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutConclusion {
	/// Stored and in-memory credentials were cleared.
	LoggedOut,
	/// The session was not logged in; nothing was touched.
	Ignored,
}

/// Successful hydration summary returned by [`Session::hydrate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hydration {
	/// Whether the post-restore profile fetch succeeded immediately.
	pub profile_ready: bool,
}

/// Asynchronous effects an operation still has to drive after a transition.
#[derive(Clone, Copy, Debug, Default)]
struct PendingIo {
	present_login: bool,
	fetch_profile: bool,
}

/// Tracks one user's authentication lifecycle and gates which actions are valid.
pub struct Session {
	/// Credential storage collaborator.
	pub store: Arc<dyn CredentialStore>,
	/// Identity-provider collaborator.
	pub gateway: Arc<dyn IdentityGateway>,
	/// Shared counters for login outcomes.
	pub metrics: Arc<SessionMetrics>,
	state: SessionState,
	credentials: Option<Credentials>,
	profile: Option<Profile>,
}
impl Session {
	/// Creates a fresh, not-logged-in session bound to its collaborators.
	pub fn new(store: Arc<dyn CredentialStore>, gateway: Arc<dyn IdentityGateway>) -> Self {
		Self {
			store,
			gateway,
			metrics: Default::default(),
			state: SessionState::NotLoggedIn,
			credentials: None,
			profile: None,
		}
	}

	/// Current lifecycle state.
	pub fn state(&self) -> SessionState {
		self.state
	}

	/// In-memory credential bundle; present exactly while logged in.
	pub fn credentials(&self) -> Option<&Credentials> {
		self.credentials.as_ref()
	}

	/// Fetched user profile, if the post-login fetch has succeeded.
	pub fn profile(&self) -> Option<&Profile> {
		self.profile.as_ref()
	}

	/// Attempts to restore a previous session from persisted credentials.
	///
	/// Invoked once at startup. Valid stored credentials move the session
	/// straight to logged-in (no prompt) and trigger the profile fetch;
	/// absence or a storage failure leaves the session untouched and returns
	/// [`Error::NoCredentialsFound`]—the caller's cue to present first-run UI.
	pub async fn hydrate(&mut self) -> Result<Hydration> {
		const KIND: StageKind = StageKind::Hydrate;

		let span = SessionSpan::new(KIND, "hydrate");

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);

		let result = span
			.instrument(async {
				if !matches!(self.state, SessionState::NotLoggedIn) {
					debug_assert!(false, "hydrate invoked in state {:?}", self.state);

					return Err(Error::NoCredentialsFound { source: None });
				}
				if !self.store.has_valid() {
					return Err(Error::NoCredentialsFound { source: None });
				}

				// The store renews expired material internally before handing
				// the bundle back.
				let store = self.store.clone();
				let credentials = store
					.load()
					.await
					.map_err(|e| Error::NoCredentialsFound { source: Some(e) })?;
				let Some(effects) = self.apply(SessionEvent::CredentialsRestored) else {
					return Err(Error::NoCredentialsFound { source: None });
				};

				self.credentials = Some(credentials);
				self.metrics.record_success();

				let pending = self.run_effects(effects);
				let profile_ready =
					pending.fetch_profile && self.fetch_profile().await.is_ok();

				Ok(Hydration { profile_ready })
			})
			.await;

		match &result {
			Ok(_) => obs::record_stage_outcome(KIND, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(KIND, StageOutcome::Failure),
		}

		result
	}

	/// Presents the external login prompt unless an attempt is already in flight.
	///
	/// The duplicate-request guard makes this idempotent: a second call while
	/// the prompt is up returns [`LoginConclusion::NotPresented`] without a
	/// second outbound invocation. Cancellation and prompt failures revert to
	/// the not-logged-in state.
	pub async fn request_login(&mut self) -> Result<LoginConclusion> {
		const KIND: StageKind = StageKind::Login;

		let span = SessionSpan::new(KIND, "request_login");
		let result = span
			.instrument(async {
				let Some(effects) = self.apply(SessionEvent::LoginRequested) else {
					return Ok(LoginConclusion::NotPresented);
				};
				let pending = self.run_effects(effects);

				debug_assert!(pending.present_login, "login transition must present the prompt");
				obs::record_stage_outcome(KIND, StageOutcome::Attempt);
				self.metrics.record_attempt();

				let gateway = self.gateway.clone();
				let outcome = gateway.present_login().await;

				match outcome {
					LoginOutcome::Authenticated(credentials) =>
						self.complete_login(credentials).await,
					LoginOutcome::Cancelled => {
						self.apply(SessionEvent::LoginCancelled);
						self.metrics.record_cancellation();

						Err(Error::LoginCancelled)
					},
					LoginOutcome::Failed(source) => {
						self.apply(SessionEvent::LoginFailed);
						self.metrics.record_failure();

						Err(Error::LoginFailed { source })
					},
				}
			})
			.await;

		match &result {
			Ok(LoginConclusion::SignedIn { .. }) =>
				obs::record_stage_outcome(KIND, StageOutcome::Success),
			Ok(LoginConclusion::NotPresented) => (),
			Err(Error::LoginCancelled) => obs::record_stage_outcome(KIND, StageOutcome::Cancelled),
			Err(_) => obs::record_stage_outcome(KIND, StageOutcome::Failure),
		}

		result
	}

	/// Persists freshly issued credentials and finishes the login attempt.
	///
	/// Persistence happens before the state advances, so a storage failure
	/// surfaces [`Error::PersistFailed`] and leaves the attempt in flight;
	/// the caller decides whether to retry or abandon it. A profile-fetch
	/// failure after the transition does not fail the login—it is reported
	/// through the returned `profile_ready` flag.
	pub async fn complete_login(&mut self, credentials: Credentials) -> Result<LoginConclusion> {
		let span = SessionSpan::new(StageKind::Login, "complete_login");

		span.instrument(async {
			if !matches!(self.state, SessionState::LoggingIn) {
				debug_assert!(false, "complete_login invoked in state {:?}", self.state);

				return Ok(LoginConclusion::NotPresented);
			}

			let store = self.store.clone();

			if let Err(e) = store.store(credentials.clone()).await {
				self.metrics.record_failure();

				return Err(Error::PersistFailed { source: e });
			}

			let Some(effects) = self.apply(SessionEvent::LoginSucceeded) else {
				return Ok(LoginConclusion::NotPresented);
			};

			self.credentials = Some(credentials);
			self.metrics.record_success();

			let pending = self.run_effects(effects);
			let profile_ready = pending.fetch_profile && self.fetch_profile().await.is_ok();

			Ok(LoginConclusion::SignedIn { profile_ready })
		})
		.await
	}

	/// Clears credentials and signs the user out.
	///
	/// A no-op unless currently logged in—state is untouched and no external
	/// call is made. When the external clear fails, the session stays logged
	/// in with its in-memory bundle intact and [`Error::LogoutFailed`] is
	/// surfaced.
	pub async fn request_logout(&mut self) -> Result<LogoutConclusion> {
		const KIND: StageKind = StageKind::Logout;

		let span = SessionSpan::new(KIND, "request_logout");
		let result = span
			.instrument(async {
				if !matches!(self.state, SessionState::LoggedIn) {
					return Ok(LogoutConclusion::Ignored);
				}

				obs::record_stage_outcome(KIND, StageOutcome::Attempt);

				// Hold the bundle aside so a failed clear leaves the
				// logged-in session with its credentials.
				let credentials = self.credentials.take();
				let store = self.store.clone();
				let outcome = store.clear().await;

				match outcome {
					Ok(()) => {
						if let Some(effects) = self.apply(SessionEvent::LogoutRequested) {
							self.run_effects(effects);
						}

						Ok(LogoutConclusion::LoggedOut)
					},
					Err(e) => {
						self.credentials = credentials;

						Err(Error::LogoutFailed { source: e })
					},
				}
			})
			.await;

		match &result {
			Ok(LogoutConclusion::LoggedOut) => obs::record_stage_outcome(KIND, StageOutcome::Success),
			Ok(LogoutConclusion::Ignored) => (),
			Err(_) => obs::record_stage_outcome(KIND, StageOutcome::Failure),
		}

		result
	}

	/// Fetches the user profile for the current access token.
	///
	/// Session state never changes here: a missing token or gateway failure
	/// surfaces [`Error::ProfileFetchFailed`] and the previous profile (if
	/// any) is kept. Concurrent duplicate fetches are not deduplicated;
	/// callers that need a gate can check [`Session::profile`] first.
	pub async fn fetch_profile(&mut self) -> Result<&Profile> {
		const KIND: StageKind = StageKind::Profile;

		let span = SessionSpan::new(KIND, "fetch_profile");

		obs::record_stage_outcome(KIND, StageOutcome::Attempt);

		let Some(access_token) =
			self.credentials.as_ref().map(|c| c.access_token.expose().to_owned())
		else {
			obs::record_stage_outcome(KIND, StageOutcome::Failure);

			return Err(Error::profile_without_token());
		};
		let gateway = self.gateway.clone();
		let outcome = span
			.instrument(async move { gateway.fetch_user_info(&access_token).await })
			.await;

		match outcome {
			Ok(profile) => {
				obs::record_stage_outcome(KIND, StageOutcome::Success);

				Ok(&*self.profile.insert(profile))
			},
			Err(e) => {
				obs::record_stage_outcome(KIND, StageOutcome::Failure);

				Err(Error::profile_fetch(e))
			},
		}
	}

	/// Feeds one event through the transition table, logging accepted
	/// transitions and asserting on impossible caller flows.
	fn apply(&mut self, event: SessionEvent) -> Option<&'static [Effect]> {
		match machine::step(self.state, event) {
			Transition::Changed { next, effects } => {
				obs::record_transition(self.state, event, next);
				self.state = next;

				Some(effects)
			},
			Transition::Ignored => None,
			Transition::Invalid => {
				debug_assert!(
					false,
					"invalid session transition: {event:?} in state {:?}",
					self.state,
				);

				None
			},
		}
	}

	/// Applies the in-memory consequences of a transition and reports which
	/// asynchronous effects the calling operation still has to drive.
	fn run_effects(&mut self, effects: &'static [Effect]) -> PendingIo {
		let mut pending = PendingIo::default();

		for effect in effects {
			match effect {
				Effect::PresentLogin => pending.present_login = true,
				Effect::FetchProfile => pending.fetch_profile = true,
				Effect::ClearCredentials => self.credentials = None,
				Effect::ClearProfile => self.profile = None,
			}
		}

		pending
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("state", &self.state)
			.field("credentials", &self.credentials.as_ref().map(|_| "<redacted>"))
			.field("profile", &self.profile.as_ref().map(|profile| &profile.sub))
			.finish()
	}
}
