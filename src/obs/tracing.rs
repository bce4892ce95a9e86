// self
use crate::{
	_prelude::*,
	obs::StageKind,
	session::machine::{SessionEvent, SessionState},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedStage<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedStage<F> = F;

/// A span builder used by session driver operations.
#[derive(Clone, Debug)]
pub struct SessionSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl SessionSpan {
	/// Creates a new span tagged with the provided stage + call site.
	pub fn new(kind: StageKind, op: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("session_gate.stage", stage = kind.as_str(), op);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, op);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedStage<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a structured event for an accepted state transition (when enabled).
pub fn record_transition(from: SessionState, event: SessionEvent, to: SessionState) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(
			from = from.as_str(),
			event = event.as_str(),
			to = to.as_str(),
			"session state changed",
		);
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (from, event, to);
	}
}
