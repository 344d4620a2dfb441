//! Readout: extract printed text from an image through the Azure Computer Vision Read API.

mod config;
mod form;
mod i18n;
mod ui;
mod worker;

fn main() -> eframe::Result {
	// Structured logging. Use `RUST_LOG=debug` etc.
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("readout=info,vision=info,preview=info")),
		)
		.init();

	let config = config::Config::load_or_default();
	i18n::init(config.locale.as_deref());

	let options = eframe::NativeOptions {
		viewport: egui::ViewportBuilder::default()
			.with_inner_size([480.0, 640.0])
			.with_min_inner_size([440.0, 560.0])
			.with_title(crate::tr!("app-title")),
		..Default::default()
	};

	eframe::run_native(
		"readout",
		options,
		Box::new(|cc| Ok(Box::new(ui::Readout::new(cc, config)))),
	)
}
