//! What the window shows for each way an extraction can end.

use vision::Outcome;

use super::dialog::Dialog;
use crate::form::Refusal;

#[derive(Debug)]
pub enum Report {
	/// Replace the output area with this text.
	Output(String),
	Dialog(Dialog),
	Nothing,
}

impl Report {
	pub fn refused(refusal: Refusal) -> Self {
		match refusal {
			Refusal::MissingCredentials => Self::Dialog(Dialog::missing_credentials()),
			Refusal::Client(err) => Self::Dialog(Dialog::for_error(&err)),
			Refusal::NoImage => Self::Output(crate::tr!("no-source")),
		}
	}

	pub fn finished(result: vision::Result<Outcome>) -> Self {
		match result {
			Ok(Outcome::Text(result)) => Self::Output(result.text()),
			// The particular status only goes to the log.
			Ok(Outcome::Failed(_)) => Self::Output(crate::tr!("extract-failed")),
			Err(vision::Error::Cancelled) => Self::Nothing,
			Err(err) => Self::Dialog(Dialog::for_error(&err)),
		}
	}
}
