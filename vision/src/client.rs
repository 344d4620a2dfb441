use std::time::Duration;

use ureq::{Body, http::Response};

use crate::{
	Error, ImageSource, JobId, ReadOptions, Result, Session,
	schema::{self, ReadOperation},
};

/// The two calls of the Read API.
///
/// [`Client`] talks to the real service; tests substitute scripted fakes.
pub trait ReadApi {
	/// Start a read operation and return its id.
	fn submit(&self, source: &ImageSource) -> Result<JobId>;

	/// Fetch the current state of a read operation.
	fn read_result(&self, job: &JobId) -> Result<ReadOperation>;
}

impl<T: ReadApi + ?Sized> ReadApi for &T {
	fn submit(&self, source: &ImageSource) -> Result<JobId> {
		(**self).submit(source)
	}

	fn read_result(&self, job: &JobId) -> Result<ReadOperation> {
		(**self).read_result(job)
	}
}

/// Blocking Read API client bound to one [`Session`].
pub struct Client {
	session: Session,
	options: ReadOptions,
	agent: ureq::Agent,
}

impl Client {
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

	pub fn new(session: Session, options: ReadOptions, timeout: Duration) -> Self {
		// Non-2xx responses are decoded by us so the service's error message reaches the user.
		let agent: ureq::Agent = ureq::Agent::config_builder()
			.timeout_global(Some(timeout))
			.http_status_as_error(false)
			.build()
			.into();

		Self { session, options, agent }
	}
}

impl ReadApi for Client {
	fn submit(&self, source: &ImageSource) -> Result<JobId> {
		let url = format!("{}{}", self.session.endpoint(), schema::ANALYZE_PATH);
		let mut request = self.agent.post(&url).header(schema::KEY_HEADER, self.session.key());
		for (key, value) in self.options.query_pairs() {
			request = request.query(key, value);
		}

		let response = match source {
			ImageSource::RemoteUrl(image_url) => {
				tracing::debug!(%url, %image_url, "submitting read operation");
				request.send_json(schema::UrlBody { url: image_url })?
			}
			ImageSource::LocalPath(path) => {
				let bytes = std::fs::read(path).map_err(|source| Error::Io {
					path: path.clone(),
					source,
				})?;
				tracing::debug!(%url, path = %path.display(), bytes = bytes.len(), "submitting read operation");
				request
					.header("Content-Type", "application/octet-stream")
					.send(&bytes[..])?
			}
		};

		if !response.status().is_success() {
			return Err(status_error(response));
		}

		let location = response
			.headers()
			.get(schema::OPERATION_LOCATION)
			.ok_or_else(|| Error::MalformedResponse("response has no Operation-Location header".into()))?
			.to_str()
			.map_err(|err| Error::MalformedResponse(format!("Operation-Location is not text: {err}")))?;

		let job = JobId::from_operation_location(location)?;
		tracing::debug!(%job, "read operation accepted");
		Ok(job)
	}

	fn read_result(&self, job: &JobId) -> Result<ReadOperation> {
		let url = format!("{}{}/{}", self.session.endpoint(), schema::RESULTS_PATH, job);
		let mut response = self
			.agent
			.get(&url)
			.header(schema::KEY_HEADER, self.session.key())
			.call()?;

		if !response.status().is_success() {
			return Err(status_error(response));
		}

		response.body_mut().read_json::<ReadOperation>().map_err(|err| match err {
			ureq::Error::Json(err) => Error::MalformedResponse(format!("read result: {err}")),
			other => Error::Transport(other),
		})
	}
}

/// Turn a non-2xx response into an error, keeping the service's own message when it sent one.
fn status_error(mut response: Response<Body>) -> Error {
	let status = response.status();
	let body = response.body_mut().read_to_string().unwrap_or_else(|err| {
		tracing::debug!(status = status.as_u16(), error = %err, "failed to read error body");
		String::new()
	});

	let (code, mut message) = match serde_json::from_str::<schema::ErrorResponse>(&body) {
		Ok(err) => (err.error.code, err.error.message),
		Err(_) => (String::new(), body.trim().to_owned()),
	};
	if message.is_empty() {
		message = status.canonical_reason().unwrap_or("no details").to_owned();
	}
	tracing::debug!(status = status.as_u16(), %code, %message, "service rejected request");

	match status.as_u16() {
		401 | 403 => Error::Auth {
			status: status.as_u16(),
			message,
		},
		status => Error::Service { status, code, message },
	}
}
