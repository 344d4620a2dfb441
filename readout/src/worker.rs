//! Runs one extraction off the UI thread.
//!
//! The request moves into a worker thread; results come back over a channel that the UI
//! drains every frame. Nothing is shared except the cancel flag.

use std::{
	sync::mpsc::{self, Receiver, TryRecvError},
	time::Duration,
};

use vision::{CancelToken, ImageSource, Outcome, PollPolicy, ReadApi, ReadOptions};

use crate::form::Request;

/// Knobs taken from the config for one job.
#[derive(Debug, Clone)]
pub struct Settings {
	pub poll: PollPolicy,
	pub read: ReadOptions,
	pub timeout: Duration,
	pub preview_box: (u32, u32),
}

impl From<&crate::config::Config> for Settings {
	fn from(config: &crate::config::Config) -> Self {
		Self {
			poll: config.poll.clone(),
			read: config.read.clone(),
			timeout: config.request_timeout(),
			preview_box: (config.preview_width, config.preview_height),
		}
	}
}

#[derive(Debug)]
pub enum Event {
	Finished(vision::Result<Outcome>),
	/// Preview of a remote image, fetched once the read is done.
	Preview(String, anyhow::Result<preview::Preview>),
}

pub enum Poll {
	Ready(Event),
	Pending,
	/// The worker thread has exited and every event was delivered.
	Closed,
}

/// Handle to a running extraction.
pub struct Job {
	source: ImageSource,
	events: Receiver<Event>,
	cancel: CancelToken,
}

impl Job {
	pub fn spawn(request: Request, settings: Settings, ctx: egui::Context) -> Self {
		let (tx, events) = mpsc::channel();
		let cancel = CancelToken::new();
		let source = request.source.clone();

		let cancel_thread = cancel.clone();
		std::thread::spawn(move || {
			tracing::info!(endpoint = request.session.endpoint(), source = %request.source, "extraction started");
			let client = vision::Client::new(request.session, settings.read.clone(), settings.timeout);
			run(&client, &request.source, &settings, &cancel_thread, |event| {
				// The UI may be gone already; nothing left to do then.
				if tx.send(event).is_ok() {
					ctx.request_repaint();
				}
			});
			tracing::debug!("extraction thread done");
		});

		Self { source, events, cancel }
	}

	pub fn cancel(&self) {
		tracing::info!(source = %self.source, "extraction cancelled by user");
		self.cancel.cancel();
	}

	pub fn poll(&self) -> Poll {
		match self.events.try_recv() {
			Ok(event) => Poll::Ready(event),
			Err(TryRecvError::Empty) => Poll::Pending,
			Err(TryRecvError::Disconnected) => Poll::Closed,
		}
	}
}

/// Submit, poll, collect, and (for URLs) fetch a preview, reporting each step through `emit`.
pub fn run(
	api: &impl ReadApi,
	source: &ImageSource,
	settings: &Settings,
	cancel: &CancelToken,
	mut emit: impl FnMut(Event),
) {
	let result = vision::extract(api, source, &settings.poll, cancel);
	if let Err(err) = &result {
		tracing::warn!(error = %err, "extraction failed");
	}
	let fetch_preview = result.is_ok();
	emit(Event::Finished(result));

	// Only remote images still need a preview; local ones were shown when picked.
	if fetch_preview && let ImageSource::RemoteUrl(url) = source {
		let (width, height) = settings.preview_box;
		let preview = preview::fetch(url, width, height, settings.timeout);
		if let Err(err) = &preview {
			tracing::warn!(%url, error = %format!("{err:#}"), "failed to load preview");
		}
		emit(Event::Preview(url.clone(), preview));
	}
}
