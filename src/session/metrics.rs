// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for login attempts.
///
/// Attempts count prompts actually presented to the user, so a duplicate
/// request rejected by the in-flight guard never increments anything.
#[derive(Debug, Default)]
pub struct SessionMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	cancelled: AtomicU64,
	failure: AtomicU64,
}
impl SessionMetrics {
	/// Returns the number of login prompts presented.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of completed sign-ins (including hydrated restores).
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of prompts the user dismissed.
	pub fn cancellations(&self) -> u64 {
		self.cancelled.load(Ordering::Relaxed)
	}

	/// Returns the number of failed login attempts (prompt or persistence).
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_cancellation(&self) {
		self.cancelled.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}
}
