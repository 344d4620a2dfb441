use std::path::PathBuf;

/// Where the image to read comes from. Exactly one mode is ever active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
	LocalPath(PathBuf),
	RemoteUrl(String),
}

impl std::fmt::Display for ImageSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::LocalPath(path) => write!(f, "{}", path.display()),
			Self::RemoteUrl(url) => f.write_str(url),
		}
	}
}
