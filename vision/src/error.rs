use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong between "extract" and a finished read operation.
///
/// A job that *finishes* unsuccessfully is not an error; see [`crate::Outcome::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("subscription key and endpoint are both required")]
	MissingCredentials,

	#[error("invalid endpoint {endpoint:?}: {reason}")]
	InvalidEndpoint { endpoint: String, reason: String },

	#[error("access denied ({status}): {message}")]
	Auth { status: u16, message: String },

	#[error("service returned {status} ({code}): {message}")]
	Service {
		status: u16,
		code: String,
		message: String,
	},

	#[error("network error: {0}")]
	Transport(#[from] ureq::Error),

	#[error("could not read {path:?}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("unexpected response from service: {0}")]
	MalformedResponse(String),

	#[error("read operation still running after {attempts} status checks")]
	Timeout { attempts: u32 },

	#[error("cancelled")]
	Cancelled,
}

impl Error {
	/// Errors that mean the credentials (or the client built from them) are unusable.
	pub fn is_auth(&self) -> bool {
		matches!(self, Self::MissingCredentials | Self::InvalidEndpoint { .. } | Self::Auth { .. })
	}
}
