use std::path::PathBuf;

use vision::ImageSource;

mod dialog;
mod report;

use self::{dialog::Dialog, report::Report};
use crate::{
	config::Config,
	form::Form,
	worker::{Event, Job, Poll, Settings},
};

/// A preview texture and the source it was made from.
struct Shown {
	source: ImageSource,
	texture: egui::TextureHandle,
}

pub struct Readout {
	config: Config,
	form: Form,
	output: String,
	preview: Option<Shown>,

	job: Option<Job>,
	/// The running job has not delivered its text yet.
	reading: bool,

	dialog: Option<Dialog>,
}

impl Readout {
	pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
		Self::with_config(config)
	}

	fn with_config(config: Config) -> Self {
		Self {
			config,
			form: Form::default(),
			output: String::new(),
			preview: None,
			job: None,
			reading: false,
			dialog: None,
		}
	}

	fn preview_box(&self) -> (u32, u32) {
		(self.config.preview_width, self.config.preview_height)
	}

	fn pick_file(&mut self, ctx: &egui::Context) {
		let Some(path) = rfd::FileDialog::new()
			.set_title(crate::tr!("pick-image"))
			.add_filter(crate::tr!("image-filter"), preview::SUPPORTED_EXTENSIONS)
			.pick_file()
		else {
			return;
		};
		self.select_image(ctx, path);
	}

	fn select_image(&mut self, ctx: &egui::Context, path: PathBuf) {
		// The picker filter is only a hint on some platforms.
		if !preview::is_supported(&path) {
			tracing::warn!(path = %path.display(), "ignoring file that is not a supported image");
			return;
		}
		tracing::info!(path = %path.display(), "image selected");

		self.form.select_file(path.clone());
		let (width, height) = self.preview_box();
		match preview::Preview::from_path(&path, width, height) {
			Ok(image) => self.show_preview(ctx, ImageSource::LocalPath(path), &image),
			Err(err) => {
				tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "failed to load preview");
				self.preview = None;
			}
		}
	}

	fn show_preview(&mut self, ctx: &egui::Context, source: ImageSource, image: &preview::Preview) {
		let image = egui::ColorImage::from_rgba_unmultiplied(image.size(), image.rgba());
		let texture = ctx.load_texture("preview", image, egui::TextureOptions::LINEAR);
		self.preview = Some(Shown { source, texture });
	}

	fn extract(&mut self, ctx: &egui::Context) {
		// Every attempt starts from a blank output, refused ones included.
		self.output.clear();
		match self.form.prepare() {
			Ok(request) => {
				// Replacing an old job drops its channel; whatever it still sends is discarded.
				self.job = Some(Job::spawn(request, Settings::from(&self.config), ctx.clone()));
				self.reading = true;
			}
			Err(refusal) => {
				tracing::info!(?refusal, "extraction refused");
				self.apply(Report::refused(refusal));
			}
		}
	}

	fn cancel(&mut self) {
		if let Some(job) = self.job.take() {
			job.cancel();
		}
		self.reading = false;
	}

	fn apply(&mut self, report: Report) {
		match report {
			Report::Output(text) => self.output = text,
			Report::Dialog(dialog) => self.dialog = Some(dialog),
			Report::Nothing => {}
		}
	}

	/// Take whatever the worker has sent since the last frame.
	fn drain_job(&mut self, ctx: &egui::Context) {
		let Some(job) = &self.job else { return };

		let mut events = Vec::new();
		let closed = loop {
			match job.poll() {
				Poll::Ready(event) => events.push(event),
				Poll::Pending => break false,
				Poll::Closed => break true,
			}
		};

		for event in events {
			match event {
				Event::Finished(result) => {
					self.reading = false;
					self.apply(Report::finished(result));
				}
				Event::Preview(url, Ok(image)) => {
					// The user may have moved on to another image meanwhile.
					let source = ImageSource::RemoteUrl(url);
					if self.form.source() == Some(&source) {
						self.show_preview(ctx, source, &image);
					}
				}
				Event::Preview(_, Err(_)) => {}
			}
		}

		if closed {
			self.job = None;
			self.reading = false;
		}
	}

	fn ui_preview(&self, ui: &mut egui::Ui) {
		let (width, height) = self.preview_box();
		let size = egui::vec2(width as f32, height as f32);

		ui.vertical_centered(|ui| {
			let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
			ui.painter().rect_stroke(
				rect,
				4.0,
				ui.visuals().widgets.noninteractive.bg_stroke,
				egui::StrokeKind::Outside,
			);

			match &self.preview {
				Some(shown) => {
					let image_rect = egui::Rect::from_center_size(rect.center(), shown.texture.size_vec2());
					egui::Image::from_texture(&shown.texture).paint_at(ui, image_rect);
				}
				None => {
					ui.painter().text(
						rect.center(),
						egui::Align2::CENTER_CENTER,
						crate::tr!("no-image"),
						egui::TextStyle::Body.resolve(ui.style()),
						ui.visuals().weak_text_color(),
					);
				}
			}
		});
	}

	fn ui_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
		let mut url = self.form.url().to_owned();
		let field = egui::TextEdit::singleline(&mut url)
			.hint_text(crate::tr!("url-hint"))
			.desired_width(f32::INFINITY);
		if ui.add(field).changed() {
			self.form.set_url(url);
		}

		ui.horizontal(|ui| {
			let width = (ui.available_width() - ui.spacing().item_spacing.x) / 2.0;
			ui.add(
				egui::TextEdit::singleline(&mut self.form.key)
					.hint_text(crate::tr!("key-hint"))
					.password(true)
					.desired_width(width),
			);
			ui.add(
				egui::TextEdit::singleline(&mut self.form.endpoint)
					.hint_text(crate::tr!("endpoint-hint"))
					.desired_width(width),
			);
		});

		let busy = self.reading;
		ui.horizontal(|ui| {
			if ui.add_enabled(!busy, egui::Button::new(crate::tr!("load-image"))).clicked() {
				self.pick_file(ctx);
			}
			if ui.add_enabled(!busy, egui::Button::new(crate::tr!("extract-text"))).clicked() {
				self.extract(ctx);
			}
			if busy {
				ui.spinner();
				ui.label(crate::tr!("extracting"));
				if ui.button(crate::tr!("cancel")).clicked() {
					self.cancel();
				}
			}
		});
	}
}

impl eframe::App for Readout {
	fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
		self.drain_job(ctx);

		// Only ever show the image that would be sent.
		if self.preview.as_ref().is_some_and(|shown| self.form.source() != Some(&shown.source)) {
			self.preview = None;
		}

		egui::CentralPanel::default().show(ctx, |ui| {
			self.ui_preview(ui);
			ui.add_space(8.0);
			self.ui_form(ui, ctx);
			ui.add_space(8.0);

			egui::ScrollArea::vertical().show(ui, |ui| {
				ui.add(
					egui::TextEdit::multiline(&mut self.output.as_str())
						.desired_width(f32::INFINITY)
						.desired_rows(12),
				);
			});
		});

		let dismissed = self.dialog.as_ref().is_some_and(|dialog| dialog.show(ctx));
		if dismissed {
			self.dialog = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ui::dialog::Kind;

	fn app_with_output(key: &str, endpoint: &str) -> Readout {
		let mut app = Readout::with_config(Config::default());
		app.form.key = key.into();
		app.form.endpoint = endpoint.into();
		app.form.select_file("cat.jpg".into());
		app.output = "Gato\npreto\n".into();
		app
	}

	#[test]
	fn refused_for_missing_credentials_clears_old_output() {
		let mut app = app_with_output("", "https://res.cognitiveservices.azure.com/");
		app.extract(&egui::Context::default());

		assert_eq!(app.output, "");
		assert_eq!(app.dialog.as_ref().map(|d| d.kind), Some(Kind::MissingCredentials));
		assert!(app.job.is_none());
	}

	#[test]
	fn refused_for_bad_endpoint_clears_old_output() {
		let mut app = app_with_output("key", "cognitiveservices");
		app.extract(&egui::Context::default());

		assert_eq!(app.output, "");
		assert_eq!(app.dialog.as_ref().map(|d| d.kind), Some(Kind::Auth));
		assert!(!app.reading);
	}

	#[test]
	fn unsupported_file_is_not_selected() {
		let mut app = Readout::with_config(Config::default());
		app.select_image(&egui::Context::default(), "notes.txt".into());

		assert_eq!(app.form.source(), None);
		assert!(app.preview.is_none());
	}

	#[test]
	fn unreadable_image_is_selected_without_preview() {
		let mut app = Readout::with_config(Config::default());
		app.select_image(&egui::Context::default(), "/definitely/not/here.png".into());

		assert_eq!(app.form.source(), Some(&ImageSource::LocalPath("/definitely/not/here.png".into())));
		assert!(app.preview.is_none());
	}
}
