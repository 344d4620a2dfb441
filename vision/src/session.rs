use crate::{Error, Result};

/// Endpoint + subscription key for one extraction attempt.
///
/// Nothing else lives here; a new session is built for every attempt and dropped afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
	endpoint: String,
	key: String,
}

impl Session {
	pub fn new(endpoint: impl AsRef<str>, key: impl AsRef<str>) -> Result<Self> {
		let endpoint = endpoint.as_ref().trim();
		let key = key.as_ref().trim();
		if endpoint.is_empty() || key.is_empty() {
			return Err(Error::MissingCredentials);
		}

		let invalid = |reason: &str| Error::InvalidEndpoint {
			endpoint: endpoint.to_owned(),
			reason: reason.to_owned(),
		};
		let uri = endpoint
			.parse::<ureq::http::Uri>()
			.map_err(|err| invalid(&err.to_string()))?;
		if !matches!(uri.scheme_str(), Some("http" | "https")) {
			return Err(invalid("expected an http:// or https:// URL"));
		}
		if uri.host().is_none_or(str::is_empty) {
			return Err(invalid("missing host"));
		}

		Ok(Self {
			endpoint: endpoint.trim_end_matches('/').to_owned(),
			key: key.to_owned(),
		})
	}

	/// Endpoint without the trailing slash, e.g. `https://myres.cognitiveservices.azure.com`.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub fn key(&self) -> &str {
		&self.key
	}
}

impl std::fmt::Debug for Session {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Session")
			.field("endpoint", &self.endpoint)
			.field("key", &"<redacted>")
			.finish()
	}
}

/// Optional knobs forwarded to the analyze call as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ReadOptions {
	/// BCP-47 language hint (`"en"`, `"pt"`, ...). The service auto-detects when absent.
	pub language: Option<String>,
	/// `"basic"` or `"natural"`.
	pub reading_order: Option<String>,
	pub model_version: Option<String>,
}

impl ReadOptions {
	pub(crate) fn query_pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
		[
			("language", self.language.as_deref()),
			("readingOrder", self.reading_order.as_deref()),
			("model-version", self.model_version.as_deref()),
		]
		.into_iter()
		.filter_map(|(k, v)| Some((k, v?)).filter(|(_, v)| !v.is_empty()))
	}
}
