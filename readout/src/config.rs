//! Application settings.
//!
//! Read (never written) from `readout.json` in the platform config directory.
//! Credentials are deliberately not part of it: they only live in the form fields.

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// UI language (`"en-US"`, `"pt-BR"`). `None` follows the desktop locale.
	pub locale: Option<String>,

	/// How the read operation is polled.
	pub poll: vision::PollPolicy,

	/// Hints forwarded to the Read API (language, reading order, model version).
	pub read: vision::ReadOptions,

	/// Per-request HTTP timeout (seconds), for both the Read API and preview downloads.
	pub request_timeout_s: f32,

	/// Box the image preview is scaled into.
	pub preview_width: u32,
	pub preview_height: u32,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			locale: None,
			poll: vision::PollPolicy::default(),
			read: vision::ReadOptions::default(),
			request_timeout_s: vision::Client::DEFAULT_TIMEOUT.as_secs_f32(),
			preview_width: preview::DEFAULT_MAX_WIDTH,
			preview_height: preview::DEFAULT_MAX_HEIGHT,
		}
	}
}

impl Config {
	/// Path to the settings file.
	pub fn path() -> Result<PathBuf> {
		let base = dirs::config_dir().context("config_dir() unavailable")?;
		Ok(base.join("readout.json"))
	}

	/// Load settings from disk, falling back to defaults on a missing or broken file.
	pub fn load_or_default() -> Self {
		match Self::try_load() {
			Ok(cfg) => cfg,
			Err(err) => {
				tracing::warn!(error = %format!("{err:#}"), "failed to load config; using defaults");
				Self::default()
			}
		}
	}

	/// Try to load settings from disk.
	pub fn try_load() -> Result<Self> {
		let path = Self::path()?;
		if !path.exists() {
			return Ok(Self::default());
		}
		let json = fs::read_to_string(&path).with_context(|| format!("read {:?}", path))?;
		let cfg = Self::parse(&json).with_context(|| format!("parse {:?}", path))?;
		tracing::info!(path = %path.display(), "loaded config");
		Ok(cfg)
	}

	pub fn parse(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::try_from_secs_f32(self.request_timeout_s)
			.ok()
			.filter(|timeout| !timeout.is_zero())
			.unwrap_or(vision::Client::DEFAULT_TIMEOUT)
	}
}
