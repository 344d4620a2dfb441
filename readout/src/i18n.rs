use std::sync::LazyLock;

use i18n_embed::{
	DesktopLanguageRequester,
	fluent::{FluentLanguageLoader, fluent_language_loader},
};
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "i18n"]
struct Localizations;

static LOADER: LazyLock<FluentLanguageLoader> = LazyLock::new(|| {
	let loader = fluent_language_loader!();
	// egui renders the bidi isolation marks fluent puts around arguments as boxes.
	loader.set_use_isolating(false);
	loader
});

/// Access the global language loader (used by `tr!()`).
pub fn loader() -> &'static FluentLanguageLoader {
	&LOADER
}

/// Initialize localization. If `forced_locale` is provided, it is preferred over the system locale.
pub fn init(forced_locale: Option<&str>) {
	let requested = if let Some(tag) = forced_locale {
		match tag.parse::<LanguageIdentifier>() {
			Ok(id) => vec![id],
			Err(err) => {
				tracing::warn!(tag, error = %err, "ignoring unparseable locale");
				DesktopLanguageRequester::requested_languages()
			}
		}
	} else {
		DesktopLanguageRequester::requested_languages()
	};

	// Missing translations fall back to the embedded en-US strings.
	if let Err(err) = i18n_embed::select(loader(), &Localizations, &requested) {
		tracing::warn!(error = %err, "failed to select locale");
	}
}

#[macro_export]
macro_rules! tr {
	($id:literal $(, $name:ident = $value:expr )* $(,)?) => {
		i18n_embed_fl::fl!($crate::i18n::loader(), $id $(, $name = $value )* )
	};
}
