//! Submit → poll → collect.

use std::{
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
	time::Duration,
};

use crate::{Error, ImageSource, JobId, Outcome, ReadApi, RecognitionResult, Result, schema::OperationStatus};

/// How often, and for how long, to ask the service whether a read operation is done.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PollPolicy {
	/// Wait before the second status check.
	#[serde(with = "millis")]
	pub initial_interval: Duration,
	/// Each wait is the previous one times this factor.
	pub multiplier: f32,
	#[serde(with = "millis")]
	pub max_interval: Duration,
	/// Status checks before giving up with [`Error::Timeout`].
	pub max_attempts: u32,
}

impl Default for PollPolicy {
	fn default() -> Self {
		Self {
			initial_interval: Duration::from_secs(1),
			multiplier: 1.5,
			max_interval: Duration::from_secs(5),
			max_attempts: 60,
		}
	}
}

impl PollPolicy {
	/// Waits between consecutive status checks, capped at `max_interval`.
	pub fn intervals(&self) -> impl Iterator<Item = Duration> + use<> {
		let max = self.max_interval;
		let multiplier = if self.multiplier.is_finite() { self.multiplier.max(1.0) } else { 1.0 };
		std::iter::successors(Some(self.initial_interval.min(max)), move |prev| {
			Some(prev.mul_f32(multiplier).min(max))
		})
	}
}

/// Stops a running [`await_result`] before its next wait.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Start a read operation for `source`.
pub fn submit(api: &impl ReadApi, source: &ImageSource) -> Result<JobId> {
	api.submit(source)
}

/// Poll `job` until it reaches a terminal status, then collect its text.
///
/// Only `succeeded` produces [`Outcome::Text`]; every other terminal status collapses to
/// [`Outcome::Failed`].
pub fn await_result(api: &impl ReadApi, job: &JobId, policy: &PollPolicy, cancel: &CancelToken) -> Result<Outcome> {
	let mut intervals = policy.intervals();
	let mut attempts = 0;

	loop {
		if cancel.is_cancelled() {
			return Err(Error::Cancelled);
		}

		attempts += 1;
		let operation = api.read_result(job)?;
		tracing::debug!(%job, attempt = attempts, status = %operation.status, "polled read operation");

		if operation.status.is_terminal() {
			return match operation.status {
				OperationStatus::Succeeded => {
					let analyzed = operation.analyze_result.ok_or_else(|| {
						Error::MalformedResponse("succeeded operation has no analyzeResult".into())
					})?;
					let result = RecognitionResult::from(analyzed);
					tracing::info!(%job, pages = result.pages.len(), lines = result.line_count(), "read operation succeeded");
					Ok(Outcome::Text(result))
				}
				status => {
					tracing::warn!(%job, %status, "read operation did not succeed");
					Ok(Outcome::Failed(status))
				}
			};
		}

		if attempts >= policy.max_attempts {
			tracing::warn!(%job, attempts, "giving up on read operation");
			return Err(Error::Timeout { attempts });
		}

		if let Some(wait) = intervals.next() {
			std::thread::sleep(wait);
		}
	}
}

/// [`submit`] followed by [`await_result`].
pub fn extract(api: &impl ReadApi, source: &ImageSource, policy: &PollPolicy, cancel: &CancelToken) -> Result<Outcome> {
	let job = submit(api, source)?;
	await_result(api, &job, policy, cancel)
}

mod millis {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(value.as_millis() as u64)
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}
