use crate::{Error, Result};

/// Opaque read-operation id. Good for exactly one polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobId(String);

impl JobId {
	/// Take the trailing path segment of an `Operation-Location` URL.
	pub fn from_operation_location(location: &str) -> Result<Self> {
		let path = location.split(['?', '#']).next().unwrap_or_default();
		let id = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default().trim();
		if id.is_empty() {
			return Err(Error::MalformedResponse(format!(
				"no operation id in Operation-Location {location:?}"
			)));
		}
		Ok(Self(id.to_owned()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for JobId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}
