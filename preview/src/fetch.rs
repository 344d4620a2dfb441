use std::time::Duration;

use anyhow::{Context, Result};

use crate::Preview;

/// The Read API rejects images above 50 MB, so there is no point in previewing larger ones.
const MAX_DOWNLOAD: u64 = 50 * 1024 * 1024;

/// Download a remote image and turn it into a [`Preview`].
pub fn fetch(url: &str, max_width: u32, max_height: u32, timeout: Duration) -> Result<Preview> {
	let agent: ureq::Agent = ureq::Agent::config_builder()
		.timeout_global(Some(timeout))
		.build()
		.into();

	let mut res = agent.get(url).call().with_context(|| format!("GET {url}"))?;
	let bytes = res
		.body_mut()
		.with_config()
		.limit(MAX_DOWNLOAD)
		.read_to_vec()
		.with_context(|| format!("download {url}"))?;
	tracing::debug!(url, bytes = bytes.len(), "downloaded preview image");

	Preview::from_bytes(&bytes, max_width, max_height).with_context(|| format!("preview {url}"))
}
