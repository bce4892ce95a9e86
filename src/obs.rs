//! Optional observability helpers for session stages.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `session_gate.stage` with
//!   the `stage` (lifecycle phase) and `op` (call site) fields, plus an event
//!   for every accepted state transition.
//! - Enable `metrics` to increment the `session_gate_stage_total` counter for
//!   every attempt/success/cancellation/failure, labeled by `stage` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Session lifecycle stages observed by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
	/// Startup restoration from persisted credentials.
	Hydrate,
	/// Externally presented login attempt.
	Login,
	/// Credential clearing and sign-out.
	Logout,
	/// Post-login user-info fetch.
	Profile,
}
impl StageKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageKind::Hydrate => "hydrate",
			StageKind::Login => "login",
			StageKind::Logout => "logout",
			StageKind::Profile => "profile",
		}
	}
}
impl Display for StageKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each stage attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageOutcome {
	/// Entry to a driver operation.
	Attempt,
	/// Successful completion.
	Success,
	/// User-initiated dismissal (login prompts only).
	Cancelled,
	/// Failure propagated back to the caller.
	Failure,
}
impl StageOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageOutcome::Attempt => "attempt",
			StageOutcome::Success => "success",
			StageOutcome::Cancelled => "cancelled",
			StageOutcome::Failure => "failure",
		}
	}
}
impl Display for StageOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
