//! Modal message boxes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
	/// Warning: the action was blocked before anything happened.
	MissingCredentials,
	/// The credentials or the client built from them were rejected.
	Auth,
	/// Submission or polling failed.
	Processing,
}

#[derive(Debug, Clone)]
pub struct Dialog {
	pub kind: Kind,
	pub title: String,
	pub body: String,
}

impl Dialog {
	pub fn missing_credentials() -> Self {
		Self {
			kind: Kind::MissingCredentials,
			title: crate::tr!("missing-keys-title"),
			body: crate::tr!("missing-keys-body"),
		}
	}

	/// Error dialog carrying the underlying message.
	pub fn for_error(err: &vision::Error) -> Self {
		let error = err.to_string();
		if err.is_auth() {
			Self {
				kind: Kind::Auth,
				title: crate::tr!("auth-error-title"),
				body: crate::tr!("auth-error-body", error = error),
			}
		} else {
			Self {
				kind: Kind::Processing,
				title: crate::tr!("error-title"),
				body: crate::tr!("error-body", error = error),
			}
		}
	}

	/// Draw the dialog. Returns `true` once the user dismissed it.
	pub fn show(&self, ctx: &egui::Context) -> bool {
		let modal = egui::Modal::new(egui::Id::new("readout_dialog")).show(ctx, |ui| {
			ui.set_max_width(420.0);

			let (icon, color) = match self.kind {
				Kind::MissingCredentials => ("⚠", ui.visuals().warn_fg_color),
				Kind::Auth | Kind::Processing => ("⛔", ui.visuals().error_fg_color),
			};
			ui.horizontal(|ui| {
				ui.label(egui::RichText::new(icon).color(color).heading());
				ui.heading(&self.title);
			});
			ui.add_space(6.0);
			ui.label(&self.body);
			ui.add_space(10.0);

			ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| ui.button(crate::tr!("ok")).clicked())
				.inner
		});

		modal.inner || modal.should_close()
	}
}
