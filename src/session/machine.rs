//! Pure login-lifecycle transition table.
//!
//! The table is a total function over `(state, event)` pairs: accepted pairs
//! produce the next state plus the effects the driver must execute, benign
//! duplicates are ignored, and everything else is a programmer error the
//! driver asserts on. Keeping the function pure makes the table directly
//! testable without collaborators.

/// Login lifecycle states tracked for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
	/// Starting from fresh; no usable stored credentials.
	NotLoggedIn,
	/// A login attempt is in flight; acts as the mutual-exclusion gate.
	LoggingIn,
	/// The user holds valid credentials.
	LoggedIn,
	/// Reserved for an asynchronous logout path; never entered while logout
	/// stays synchronous.
	LoggingOut,
	/// The user logged out from a previously logged-in state.
	LoggedOut,
}
impl SessionState {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SessionState::NotLoggedIn => "not_logged_in",
			SessionState::LoggingIn => "logging_in",
			SessionState::LoggedIn => "logged_in",
			SessionState::LoggingOut => "logging_out",
			SessionState::LoggedOut => "logged_out",
		}
	}
}

/// Events fed into the transition table by the session driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionEvent {
	/// The user asked to sign in.
	LoginRequested,
	/// Startup hydration recovered a stored credential bundle.
	CredentialsRestored,
	/// The external login prompt reported issued credentials that persisted.
	LoginSucceeded,
	/// The user dismissed the external login prompt.
	LoginCancelled,
	/// The external login prompt reported an error.
	LoginFailed,
	/// The user asked to sign out and the external clear succeeded.
	LogoutRequested,
}
impl SessionEvent {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SessionEvent::LoginRequested => "login_requested",
			SessionEvent::CredentialsRestored => "credentials_restored",
			SessionEvent::LoginSucceeded => "login_succeeded",
			SessionEvent::LoginCancelled => "login_cancelled",
			SessionEvent::LoginFailed => "login_failed",
			SessionEvent::LogoutRequested => "logout_requested",
		}
	}
}

/// Side effects the driver executes after an accepted transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
	/// Present the external login prompt.
	PresentLogin,
	/// Fetch the user profile with the freshly available access token.
	FetchProfile,
	/// Drop the in-memory credential bundle.
	ClearCredentials,
	/// Drop the in-memory profile.
	ClearProfile,
}

/// Outcome of feeding one event into the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
	/// The event is in the table; the state advances and effects run.
	Changed {
		/// State the session moves to.
		next: SessionState,
		/// Effects the driver executes, in order.
		effects: &'static [Effect],
	},
	/// Benign duplicate (second login request while one is in flight, logout
	/// while not logged in); state is unchanged and nothing runs.
	Ignored,
	/// Off-table pair indicating an impossible caller flow; the driver
	/// asserts in debug builds and leaves state unchanged in release builds.
	Invalid,
}

const PRESENT_LOGIN: &[Effect] = &[Effect::PresentLogin];
const FETCH_PROFILE: &[Effect] = &[Effect::FetchProfile];
const CLEAR_IDENTITY: &[Effect] = &[Effect::ClearCredentials, Effect::ClearProfile];
const NO_EFFECTS: &[Effect] = &[];

const fn changed(next: SessionState, effects: &'static [Effect]) -> Transition {
	Transition::Changed { next, effects }
}

/// Evaluates one event against the current state.
pub const fn step(state: SessionState, event: SessionEvent) -> Transition {
	use {SessionEvent as E, SessionState as S};

	match (state, event) {
		(S::NotLoggedIn, E::LoginRequested) => changed(S::LoggingIn, PRESENT_LOGIN),
		(S::NotLoggedIn, E::CredentialsRestored) => changed(S::LoggedIn, FETCH_PROFILE),
		(S::LoggingIn, E::LoginSucceeded) => changed(S::LoggedIn, FETCH_PROFILE),
		(S::LoggingIn, E::LoginCancelled | E::LoginFailed) => changed(S::NotLoggedIn, NO_EFFECTS),
		(S::LoggedIn, E::LogoutRequested) => changed(S::LoggedOut, CLEAR_IDENTITY),
		(S::LoggedOut, E::LoginRequested) => changed(S::LoggingIn, PRESENT_LOGIN),
		// Duplicate request while the prompt is already up.
		(S::LoggingIn, E::LoginRequested) => Transition::Ignored,
		// Logout is only meaningful while logged in.
		(_, E::LogoutRequested) => Transition::Ignored,
		_ => Transition::Invalid,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const ALL_STATES: [SessionState; 5] = [
		SessionState::NotLoggedIn,
		SessionState::LoggingIn,
		SessionState::LoggedIn,
		SessionState::LoggingOut,
		SessionState::LoggedOut,
	];
	const ALL_EVENTS: [SessionEvent; 6] = [
		SessionEvent::LoginRequested,
		SessionEvent::CredentialsRestored,
		SessionEvent::LoginSucceeded,
		SessionEvent::LoginCancelled,
		SessionEvent::LoginFailed,
		SessionEvent::LogoutRequested,
	];

	fn next_of(state: SessionState, event: SessionEvent) -> SessionState {
		match step(state, event) {
			Transition::Changed { next, .. } => next,
			Transition::Ignored | Transition::Invalid => state,
		}
	}

	#[test]
	fn accepted_pairs_match_the_table() {
		use {SessionEvent as E, SessionState as S};

		assert_eq!(next_of(S::NotLoggedIn, E::LoginRequested), S::LoggingIn);
		assert_eq!(next_of(S::NotLoggedIn, E::CredentialsRestored), S::LoggedIn);
		assert_eq!(next_of(S::LoggingIn, E::LoginSucceeded), S::LoggedIn);
		assert_eq!(next_of(S::LoggingIn, E::LoginCancelled), S::NotLoggedIn);
		assert_eq!(next_of(S::LoggingIn, E::LoginFailed), S::NotLoggedIn);
		assert_eq!(next_of(S::LoggedIn, E::LogoutRequested), S::LoggedOut);
		assert_eq!(next_of(S::LoggedOut, E::LoginRequested), S::LoggingIn);
	}

	#[test]
	fn effects_follow_each_accepted_transition() {
		use {Effect as F, SessionEvent as E, SessionState as S};

		let cases = [
			(S::NotLoggedIn, E::LoginRequested, &[F::PresentLogin][..]),
			(S::NotLoggedIn, E::CredentialsRestored, &[F::FetchProfile][..]),
			(S::LoggingIn, E::LoginSucceeded, &[F::FetchProfile][..]),
			(S::LoggingIn, E::LoginCancelled, &[][..]),
			(S::LoggedIn, E::LogoutRequested, &[F::ClearCredentials, F::ClearProfile][..]),
			(S::LoggedOut, E::LoginRequested, &[F::PresentLogin][..]),
		];

		for (state, event, expected) in cases {
			match step(state, event) {
				Transition::Changed { effects, .. } =>
					assert_eq!(effects, expected, "effects for {state:?} + {event:?}"),
				other => panic!("{state:?} + {event:?} should be accepted, got {other:?}"),
			}
		}
	}

	#[test]
	fn duplicate_requests_are_ignored_not_invalid() {
		use {SessionEvent as E, SessionState as S};

		assert_eq!(step(S::LoggingIn, E::LoginRequested), Transition::Ignored);
		assert_eq!(step(S::NotLoggedIn, E::LogoutRequested), Transition::Ignored);
		assert_eq!(step(S::LoggedOut, E::LogoutRequested), Transition::Ignored);
		assert_eq!(step(S::LoggingIn, E::LogoutRequested), Transition::Ignored);
	}

	#[test]
	fn off_table_pairs_are_invalid_and_preserve_state() {
		let accepted_or_ignored = |state, event| !matches!(step(state, event), Transition::Invalid);
		let mut invalid_pairs = 0;

		for state in ALL_STATES {
			for event in ALL_EVENTS {
				if !accepted_or_ignored(state, event) {
					assert_eq!(next_of(state, event), state);

					invalid_pairs += 1;
				}
			}
		}

		// 30 pairs total: 7 accepted, 5 ignored (logout in the 4 foreign
		// states plus the duplicate login request), the rest invalid.
		assert_eq!(invalid_pairs, 30 - 7 - 5);
	}

	#[test]
	fn reserved_logging_out_state_accepts_nothing() {
		for event in ALL_EVENTS {
			let transition = step(SessionState::LoggingOut, event);

			assert!(
				matches!(transition, Transition::Ignored | Transition::Invalid),
				"{event:?} must not advance the reserved state",
			);
		}
	}

	#[test]
	fn event_replay_matches_a_full_user_journey() {
		use {SessionEvent as E, SessionState as S};

		let journey = [
			(E::LoginRequested, S::LoggingIn),
			(E::LoginCancelled, S::NotLoggedIn),
			(E::LoginRequested, S::LoggingIn),
			(E::LoginSucceeded, S::LoggedIn),
			(E::LogoutRequested, S::LoggedOut),
			(E::LoginRequested, S::LoggingIn),
			(E::LoginFailed, S::NotLoggedIn),
		];
		let mut state = S::NotLoggedIn;

		for (event, expected) in journey {
			state = next_of(state, event);

			assert_eq!(state, expected, "after {event:?}");
		}
	}
}
