//! What the user has typed and picked, independent of how it is drawn.

use std::path::PathBuf;

use vision::{ImageSource, Session};

/// Everything an extraction needs, moved into the worker by value.
#[derive(Debug, Clone)]
pub struct Request {
	pub session: Session,
	pub source: ImageSource,
}

/// Why "extract" did not start.
#[derive(Debug)]
pub enum Refusal {
	MissingCredentials,
	/// The client could not be built from the credentials (bad endpoint URL).
	Client(vision::Error),
	NoImage,
}

#[derive(Debug, Default)]
pub struct Form {
	pub key: String,
	pub endpoint: String,
	url: String,
	source: Option<ImageSource>,
}

impl Form {
	/// Text of the URL field.
	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn source(&self) -> Option<&ImageSource> {
		self.source.as_ref()
	}

	/// Use a local file. Clears the URL field.
	pub fn select_file(&mut self, path: PathBuf) {
		self.url.clear();
		self.source = Some(ImageSource::LocalPath(path));
	}

	/// Update the URL field. A non-blank URL replaces any local file.
	pub fn set_url(&mut self, text: String) {
		let url = text.trim();
		if !url.is_empty() {
			self.source = Some(ImageSource::RemoteUrl(url.to_owned()));
		} else if matches!(self.source, Some(ImageSource::RemoteUrl(_))) {
			self.source = None;
		}
		self.url = text;
	}

	/// Check the inputs and build the request for one extraction attempt.
	///
	/// Credentials are checked first, so a missing key never leads to a network call.
	pub fn prepare(&self) -> Result<Request, Refusal> {
		if self.key.trim().is_empty() || self.endpoint.trim().is_empty() {
			return Err(Refusal::MissingCredentials);
		}
		let session = Session::new(&self.endpoint, &self.key).map_err(Refusal::Client)?;
		let source = self.source.clone().ok_or(Refusal::NoImage)?;
		Ok(Request { session, source })
	}
}
